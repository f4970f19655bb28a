//! The game controller and the pieces it owns.
//!
//! ```text
//! Title --start--> Playing --select--> (transitioning) --timer--> Feedback
//!                    ^                                              |
//!                    +------------------advance---------------------+
//!                                                                   |
//! Results <----------------advance past last scenario---------------+
//!    |
//!    +--restart--> Title --> Playing
//! ```

pub mod controller;
pub mod renderer;
pub mod scheduler;
pub mod state;

#[cfg(test)]
pub mod testing;

pub use controller::{GameController, GameControllerBuilder};
pub use renderer::{Renderer, Screen};
pub use scheduler::{Scheduler, Task, TaskId};
pub use state::{AnswerRecord, GameState, GameSummary, Phase};
