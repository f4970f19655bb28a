#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Title,
    Playing,
    Feedback,
    Results,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub scenario_id: u32,
    pub selected_index: usize,
    pub was_correct: bool,
}

/// Everything that changes during a run. Owned by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameState {
    pub phase: Phase,
    pub current_scenario: usize,
    pub score: u32,
    pub answers: Vec<AnswerRecord>,
    /// Set from a scored answer until its feedback is on screen.
    pub is_transitioning: bool,
}

/// End-of-run numbers, logged when the results screen opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub score: u32,
    pub total: usize,
    pub percentage: u32,
    pub answers: Vec<AnswerRecord>,
}

impl GameSummary {
    pub fn new(score: u32, total: usize, answers: Vec<AnswerRecord>) -> Self {
        let percentage = if total == 0 {
            0
        } else {
            (score as f64 / total as f64 * 100.0).round() as u32
        };
        Self {
            score,
            total,
            percentage,
            answers,
        }
    }
}
