use serde::Deserialize;
use std::collections::BTreeSet;

use crate::error::{GameError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixtureKind {
    Urinal,
    Stall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Fixture {
    pub kind: FixtureKind,
    #[serde(default)]
    pub occupied: bool,
}

impl Fixture {
    pub const fn urinal(occupied: bool) -> Self {
        Self {
            kind: FixtureKind::Urinal,
            occupied,
        }
    }

    pub const fn stall(occupied: bool) -> Self {
        Self {
            kind: FixtureKind::Stall,
            occupied,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedbackMessage {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Feedback {
    pub correct: FeedbackMessage,
    pub wrong: FeedbackMessage,
}

impl Feedback {
    pub fn for_outcome(&self, was_correct: bool) -> &FeedbackMessage {
        if was_correct {
            &self.correct
        } else {
            &self.wrong
        }
    }
}

/// One quiz round.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Scenario {
    /// 1-based position in the catalog.
    pub id: u32,
    pub problem_text: String,
    pub layout: Vec<Fixture>,
    /// Any of these fixture indices is an acceptable answer.
    pub correct_answers: BTreeSet<usize>,
    pub feedback: Feedback,
}

impl Scenario {
    pub fn is_correct(&self, fixture_index: usize) -> bool {
        self.correct_answers.contains(&fixture_index)
    }

    pub fn is_selectable(&self, fixture_index: usize) -> bool {
        self.layout
            .get(fixture_index)
            .is_some_and(|fixture| !fixture.occupied)
    }

    pub(crate) fn validate(&self, position: usize) -> Result<()> {
        let invalid = |reason: String| GameError::InvalidScenario {
            id: self.id,
            reason,
        };

        if self.id as usize != position + 1 {
            return Err(invalid(format!(
                "expected id {} for catalog position {}",
                position + 1,
                position
            )));
        }
        if self.layout.is_empty() {
            return Err(invalid("layout has no fixtures".to_string()));
        }
        if self.correct_answers.is_empty() {
            return Err(invalid("no correct answers".to_string()));
        }
        for &index in &self.correct_answers {
            match self.layout.get(index) {
                None => {
                    return Err(invalid(format!(
                        "correct answer {} is outside a layout of {} fixtures",
                        index,
                        self.layout.len()
                    )))
                }
                Some(fixture) if fixture.occupied => {
                    return Err(invalid(format!(
                        "correct answer {} points at an occupied fixture",
                        index
                    )))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

/// Score band shown on the results screen.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Rating {
    pub min_score: u32,
    pub emoji: String,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RatingTable {
    #[serde(rename = "rating")]
    pub ratings: Vec<Rating>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(layout: Vec<Fixture>, correct: &[usize]) -> Scenario {
        Scenario {
            id: 1,
            problem_text: "Pick one.".to_string(),
            layout,
            correct_answers: correct.iter().copied().collect(),
            feedback: Feedback {
                correct: FeedbackMessage {
                    title: "Yes".to_string(),
                    message: "Good pick.".to_string(),
                },
                wrong: FeedbackMessage {
                    title: "No".to_string(),
                    message: "Bad pick.".to_string(),
                },
            },
        }
    }

    #[test]
    fn correctness_is_set_membership() {
        let s = scenario(vec![Fixture::urinal(false); 5], &[4, 0, 4]);
        assert_eq!(s.correct_answers.len(), 2);
        assert!(s.is_correct(0));
        assert!(s.is_correct(4));
        assert!(!s.is_correct(2));
        assert!(!s.is_correct(99));
    }

    #[test]
    fn feedback_picks_bundle_by_outcome() {
        let s = scenario(vec![Fixture::urinal(false)], &[0]);
        assert_eq!(s.feedback.for_outcome(true).title, "Yes");
        assert_eq!(s.feedback.for_outcome(false).title, "No");
    }

    #[test]
    fn occupied_fixtures_are_not_selectable() {
        let s = scenario(vec![Fixture::urinal(true), Fixture::stall(false)], &[1]);
        assert!(!s.is_selectable(0));
        assert!(s.is_selectable(1));
        assert!(!s.is_selectable(2));
    }

    #[test]
    fn validate_rejects_occupied_answer() {
        let s = scenario(vec![Fixture::urinal(true), Fixture::urinal(false)], &[0]);
        let err = s.validate(0).unwrap_err();
        assert!(matches!(err, GameError::InvalidScenario { id: 1, .. }));
    }

    #[test]
    fn validate_rejects_out_of_range_answer() {
        let s = scenario(vec![Fixture::urinal(false)], &[3]);
        assert!(s.validate(0).is_err());
    }

    #[test]
    fn validate_rejects_empty_answers_and_wrong_id() {
        let s = scenario(vec![Fixture::urinal(false)], &[]);
        assert!(s.validate(0).is_err());

        let s = scenario(vec![Fixture::urinal(false)], &[0]);
        assert!(s.validate(0).is_ok());
        assert!(s.validate(1).is_err());
    }
}
