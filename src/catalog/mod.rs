//! Scenario catalog: the fixed run of quiz rounds plus the rating table.

pub mod loader;
pub mod types;

pub use loader::{builtin_catalog, load_catalog};
pub use types::{Feedback, FeedbackMessage, Fixture, FixtureKind, Rating, Scenario};

use crate::error::{GameError, Result};

/// Validated, read-only scenario and rating data.
#[derive(Debug, Clone)]
pub struct Catalog {
    scenarios: Vec<Scenario>,
    /// Sorted by `min_score`, highest first; the last entry is always 0.
    ratings: Vec<Rating>,
}

impl Catalog {
    pub fn new(scenarios: Vec<Scenario>, mut ratings: Vec<Rating>) -> Result<Self> {
        if scenarios.is_empty() {
            return Err(GameError::EmptyCatalog);
        }
        for (position, scenario) in scenarios.iter().enumerate() {
            scenario.validate(position)?;
        }

        if ratings.is_empty() {
            return Err(GameError::InvalidRatings("no ratings defined".to_string()));
        }
        ratings.sort_by(|a, b| b.min_score.cmp(&a.min_score));
        if let Some(pair) = ratings
            .windows(2)
            .find(|pair| pair[0].min_score == pair[1].min_score)
        {
            return Err(GameError::InvalidRatings(format!(
                "duplicate threshold {}",
                pair[0].min_score
            )));
        }
        if ratings.last().map(|r| r.min_score) != Some(0) {
            return Err(GameError::InvalidRatings(
                "missing a catch-all rating with min_score 0".to_string(),
            ));
        }

        Ok(Self { scenarios, ratings })
    }

    pub fn builtin() -> Result<Self> {
        builtin_catalog()
    }

    pub fn scenario_at(&self, index: usize) -> Result<&Scenario> {
        self.scenarios.get(index).ok_or(GameError::IndexOutOfRange {
            index,
            len: self.scenarios.len(),
        })
    }

    pub fn scenario_count(&self) -> usize {
        self.scenarios.len()
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// First rating, scanning highest threshold first, that `score` reaches.
    pub fn resolve_rating(&self, score: u32) -> &Rating {
        self.ratings
            .iter()
            .find(|rating| score >= rating.min_score)
            .unwrap_or_else(|| &self.ratings[self.ratings.len() - 1])
    }
}
