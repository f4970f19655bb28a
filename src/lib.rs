//! The Urinal Game: a terminal quiz on restroom etiquette.
//!
//! Each round shows a row of urinals and stalls, some already taken. Pick the
//! right one, collect points, and get rated at the end.
//!
//! - `catalog` - scenario data, rating table and their loaders
//! - `game` - the controller state machine, its timers and the renderer seam
//! - `ui` - ratatui renderer and key bindings
//! - `config` - tunable delays and catalog location

pub mod catalog;
pub mod config;
pub mod error;
pub mod game;
pub mod ui;

pub use catalog::Catalog;
pub use config::GameConfig;
pub use error::{GameError, Result};
pub use game::{GameController, Phase, Renderer, Screen};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
