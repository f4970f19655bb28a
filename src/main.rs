use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io::{self, Stdout};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use urinal_game::ui::{self, draw_load_error, map_key, TerminalRenderer};
use urinal_game::{GameConfig, GameController};

const LOG_FILE: &str = "urinal-game.log";
const FRAME: Duration = Duration::from_millis(16);

type Tui = Terminal<CrosstermBackend<Stdout>>;

fn init_logging() -> Result<()> {
    let file = File::create(LOG_FILE).with_context(|| format!("creating {}", LOG_FILE))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn build_controller() -> urinal_game::Result<GameController<TerminalRenderer>> {
    let config = GameConfig::discover()?;
    let catalog = config.load_catalog()?;
    let renderer = TerminalRenderer::new(catalog.scenario_count());
    GameController::builder()
        .catalog(catalog)
        .config(config)
        .renderer(renderer)
        .build()
}

fn main() -> Result<()> {
    init_logging()?;
    info!(version = urinal_game::VERSION, "starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Some(score) = result? {
        println!("\nThanks for playing! Last score: {}\n", score);
    }
    Ok(())
}

/// Returns the last score, or `None` if the player quit before finishing a
/// game or from the load error screen.
fn run(terminal: &mut Tui) -> Result<Option<u32>> {
    loop {
        match build_controller() {
            Ok(controller) => return play(terminal, controller),
            Err(err) => {
                error!(error = %err, "failed to initialize game");
                if !wait_for_reload(terminal, &err.to_string())? {
                    return Ok(None);
                }
            }
        }
    }
}

/// Returns `true` if the player asked to reload.
fn wait_for_reload(terminal: &mut Tui, message: &str) -> Result<bool> {
    loop {
        terminal.draw(|f| draw_load_error(f, message))?;
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('r') | KeyCode::Enter => return Ok(true),
                KeyCode::Char('q') | KeyCode::Esc => return Ok(false),
                _ => {}
            }
        }
    }
}

fn play(terminal: &mut Tui, mut controller: GameController<TerminalRenderer>) -> Result<Option<u32>> {
    let mut finished = None;
    let mut last = Instant::now();

    loop {
        terminal.draw(|f| controller.renderer().draw(f))?;

        if event::poll(FRAME)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let screen = controller.renderer().screen();
                    if let Some(command) = map_key(screen, key) {
                        if !ui::apply(&mut controller, command) {
                            break;
                        }
                    }
                }
            }
        }

        let now = Instant::now();
        controller.tick(now - last);
        last = now;

        if controller.phase() == urinal_game::Phase::Results {
            finished = Some(controller.score());
        }
    }

    Ok(finished)
}
