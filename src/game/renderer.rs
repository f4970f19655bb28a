use std::collections::BTreeSet;

use crate::catalog::{FeedbackMessage, Fixture, Rating};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Title,
    Game,
    Feedback,
    Results,
}

/// Presentation side of the game. The controller calls these in response
/// to its own transitions; implementations only draw.
///
/// Selection wiring is the renderer's job: it must only report indices of
/// unoccupied fixtures back to whoever calls
/// [`GameController::submit_selection`](super::GameController::submit_selection).
pub trait Renderer {
    fn render_layout(&mut self, scenario_id: u32, problem_text: &str, layout: &[Fixture]);

    fn highlight_selection(&mut self, index: usize);

    fn reveal_correct_answers(&mut self, indices: &BTreeSet<usize>);

    fn disable_all_input(&mut self);

    fn show_screen(&mut self, screen: Screen);

    fn update_score(&mut self, score: u32);

    fn show_feedback(&mut self, is_correct: bool, feedback: &FeedbackMessage);

    fn show_results(&mut self, score: u32, rating: &Rating);
}
