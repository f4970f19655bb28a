//! Terminal front end: a ratatui [`Renderer`](crate::game::Renderer) and the
//! key bindings that drive the controller.

pub mod input;
pub mod terminal;

pub use input::{map_key, Command};
pub use terminal::{draw_load_error, TerminalRenderer};

use crate::game::GameController;

/// Applies one command. Returns `false` when the player asked to quit.
pub fn apply(controller: &mut GameController<TerminalRenderer>, command: Command) -> bool {
    match command {
        Command::Quit => return false,
        Command::Start => controller.start(),
        Command::Advance => controller.advance(),
        Command::Restart => controller.restart(),
        Command::CursorLeft => controller.renderer_mut().move_cursor(-1),
        Command::CursorRight => controller.renderer_mut().move_cursor(1),
        Command::Activate => {
            let renderer = controller.renderer();
            let target = renderer.cursor().filter(|&index| renderer.is_selectable(index));
            if let Some(index) = target {
                controller.submit_selection(index);
            }
        }
        Command::Pick(index) => {
            // Occupied fixtures are never wired to selection.
            if controller.renderer().is_selectable(index) {
                controller.submit_selection(index);
            }
        }
    }
    true
}
