use std::path::PathBuf;

/// Errors raised while building the catalog or wiring up a controller.
///
/// Out-of-phase input is not represented here: the controller ignores it.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("scenario index {index} out of range (catalog has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("scenario {id}: {reason}")]
    InvalidScenario { id: u32, reason: String },

    #[error("rating table: {0}")]
    InvalidRatings(String),

    #[error("catalog contains no scenarios")]
    EmptyCatalog,

    #[error("no renderer attached to the game controller")]
    MissingRenderer,

    #[error("expected {expected} scenarios, catalog has {actual}")]
    ScenarioCountMismatch { expected: usize, actual: usize },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, GameError>;
