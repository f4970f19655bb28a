use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::collections::BTreeSet;

use crate::catalog::{FeedbackMessage, Fixture, FixtureKind, Rating};
use crate::game::{Renderer, Screen};

const URINAL_ART: [&str; 4] = [" ___ ", "|   |", "|   |", " \\_/ "];
const PERSON_ART: [&str; 4] = ["  o  ", " /|\\ ", "  |  ", " / \\ "];
const STALL_ART: [&str; 4] = ["+---+", "|   |", "|  o|", "|   |"];
const STALL_SHUT_ART: [&str; 4] = ["+---+", "|###|", "|###|", "|###|"];

/// Draws the game into a ratatui frame. Holds only what the controller has
/// told it plus the fixture cursor.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    screen: Screen,
    total: usize,
    scenario_id: u32,
    problem_text: String,
    layout: Vec<Fixture>,
    cursor: Option<usize>,
    selected: Option<usize>,
    revealed: BTreeSet<usize>,
    input_enabled: bool,
    score: u32,
    feedback: Option<(bool, FeedbackMessage)>,
    results: Option<(u32, Rating)>,
}

impl TerminalRenderer {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Only free fixtures on a live layout can be picked.
    pub fn is_selectable(&self, index: usize) -> bool {
        self.input_enabled
            && self
                .layout
                .get(index)
                .is_some_and(|fixture| !fixture.occupied)
    }

    /// Moves to the nearest free fixture in the direction of `step`,
    /// staying put at either end.
    pub fn move_cursor(&mut self, step: isize) {
        if !self.input_enabled || step == 0 {
            return;
        }
        let Some(current) = self.cursor else {
            self.cursor = self.first_selectable();
            return;
        };
        let mut index = current as isize;
        loop {
            index += step.signum();
            if index < 0 || index as usize >= self.layout.len() {
                return;
            }
            if !self.layout[index as usize].occupied {
                self.cursor = Some(index as usize);
                return;
            }
        }
    }

    fn first_selectable(&self) -> Option<usize> {
        self.layout.iter().position(|fixture| !fixture.occupied)
    }

    pub fn draw(&self, f: &mut Frame) {
        match self.screen {
            Screen::Title => draw_title_screen(f),
            Screen::Game => self.draw_game(f),
            Screen::Feedback => self.draw_feedback(f),
            Screen::Results => self.draw_results(f),
        }
    }

    fn draw_game(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Min(10),
                Constraint::Length(3),
            ])
            .split(f.area());

        // Status bar
        let status = Line::from(vec![
            Span::styled(
                " URINAL GAME ",
                Style::default().fg(Color::Black).bg(Color::Yellow),
            ),
            Span::raw("  "),
            Span::styled(
                format!(" PROBLEM {} ", self.scenario_id),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            ),
            Span::raw("  "),
            Span::styled(
                format!(" {}/{} ", self.scenario_id, self.total),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw("  "),
            Span::styled(
                format!(" Score: {} ", self.score),
                Style::default().fg(Color::Yellow),
            ),
        ]);
        let status_block = Paragraph::new(status).block(Block::default().borders(Borders::BOTTOM));
        f.render_widget(status_block, chunks[0]);

        let problem = Paragraph::new(self.problem_text.as_str())
            .block(Block::default().borders(Borders::ALL).title(" The Restroom "))
            .wrap(Wrap { trim: false })
            .style(Style::default().fg(Color::White));
        f.render_widget(problem, chunks[1]);

        self.draw_fixtures(f, chunks[2]);

        let help = if self.input_enabled {
            "←/→ to move  •  ENTER to choose  •  1-9 to pick directly  •  q to quit"
        } else {
            "..."
        };
        let help = Paragraph::new(help)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(help, chunks[3]);
    }

    fn draw_fixtures(&self, f: &mut Frame, area: Rect) {
        if self.layout.is_empty() {
            return;
        }
        let count = self.layout.len() as u32;
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(self.layout.iter().map(|_| Constraint::Ratio(1, count)))
            .split(area);

        for (index, fixture) in self.layout.iter().enumerate() {
            let art = match (fixture.kind, fixture.occupied) {
                (FixtureKind::Urinal, false) => URINAL_ART,
                (FixtureKind::Urinal, true) => PERSON_ART,
                (FixtureKind::Stall, false) => STALL_ART,
                (FixtureKind::Stall, true) => STALL_SHUT_ART,
            };
            let label = match fixture.kind {
                FixtureKind::Urinal => format!("{}", index + 1),
                FixtureKind::Stall => "STALL".to_string(),
            };

            let mut lines: Vec<Line> = art.iter().map(|row| Line::from(*row)).collect();
            lines.push(Line::from(""));
            lines.push(Line::from(label));

            let paragraph = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .style(self.fixture_style(index, fixture))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(self.fixture_border(index, fixture)),
                );
            f.render_widget(paragraph, columns[index]);
        }
    }

    fn fixture_style(&self, index: usize, fixture: &Fixture) -> Style {
        if fixture.occupied {
            Style::default().fg(Color::DarkGray)
        } else if self.revealed.contains(&index) {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else if self.selected == Some(index) {
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        }
    }

    fn fixture_border(&self, index: usize, fixture: &Fixture) -> Style {
        if self.selected == Some(index) {
            Style::default().fg(Color::Magenta)
        } else if self.input_enabled && self.cursor == Some(index) && !fixture.occupied {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    fn draw_feedback(&self, f: &mut Frame) {
        let Some((is_correct, feedback)) = &self.feedback else {
            return;
        };
        let (icon, color) = if *is_correct {
            ("✓", Color::Green)
        } else {
            ("✗", Color::Red)
        };

        let text = vec![
            Line::from(Span::styled(
                icon,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                feedback.title.as_str(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(feedback.message.as_str()),
            Line::from(""),
            Line::from(Span::styled(
                format!("Score: {}", self.score),
                Style::default().fg(Color::Yellow),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "[ ENTER ] Continue",
                Style::default().fg(Color::Black).bg(Color::Yellow),
            )),
        ];
        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" Problem {} ", self.scenario_id)),
            );
        f.render_widget(paragraph, centered(f.area(), 70, 14));
    }

    fn draw_results(&self, f: &mut Frame) {
        let Some((score, rating)) = &self.results else {
            return;
        };

        let text = vec![
            Line::from(Span::styled(
                "FINAL SCORE",
                Style::default().fg(Color::Cyan),
            )),
            Line::from(Span::styled(
                format!("{} / {}", score, self.total),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("{}  {}", rating.emoji, rating.title)),
            Line::from(""),
            Line::from(rating.message.as_str()),
            Line::from(""),
            Line::from(Span::styled(
                "[ ENTER ] Play again  •  q to quit",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Results "));
        f.render_widget(paragraph, centered(f.area(), 70, 13));
    }
}

impl Renderer for TerminalRenderer {
    fn render_layout(&mut self, scenario_id: u32, problem_text: &str, layout: &[Fixture]) {
        self.scenario_id = scenario_id;
        self.problem_text = problem_text.to_string();
        self.layout = layout.to_vec();
        self.selected = None;
        self.revealed.clear();
        self.feedback = None;
        self.input_enabled = true;
        self.cursor = self.first_selectable();
    }

    fn highlight_selection(&mut self, index: usize) {
        self.selected = Some(index);
    }

    fn reveal_correct_answers(&mut self, indices: &BTreeSet<usize>) {
        self.revealed.extend(indices.iter().copied());
    }

    fn disable_all_input(&mut self) {
        self.input_enabled = false;
    }

    fn show_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    fn update_score(&mut self, score: u32) {
        self.score = score;
    }

    fn show_feedback(&mut self, is_correct: bool, feedback: &FeedbackMessage) {
        self.feedback = Some((is_correct, feedback.clone()));
    }

    fn show_results(&mut self, score: u32, rating: &Rating) {
        self.results = Some((score, rating.clone()));
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_title_screen(f: &mut Frame) {
    let area = f.area();

    let title_art = r#"
    ╔═══════════════════════════════════════════════════╗
    ║                                                   ║
    ║     _   _ ____  ___ _   _    _    _               ║
    ║    | | | |  _ \|_ _| \ | |  / \  | |              ║
    ║    | | | | |_) || ||  \| | / _ \ | |              ║
    ║    | |_| |  _ < | || |\  |/ ___ \| |___           ║
    ║     \___/|_| \_\___|_| \_/_/   \_\_____|          ║
    ║                                                   ║
    ║                   T H E   G A M E                 ║
    ║                                                   ║
    ║       "Six restrooms. One unwritten code."        ║
    ║                                                   ║
    ╚═══════════════════════════════════════════════════╝
"#;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(16),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(area);

    let title = Paragraph::new(title_art)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let start = Paragraph::new("  START  ")
        .style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(start, chunks[1]);

    let help = Paragraph::new("ENTER to start  •  q to quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[2]);
}

/// Shown instead of the game when it cannot be set up.
pub fn draw_load_error(f: &mut Frame, error: &str) {
    let text = vec![
        Line::from(Span::styled(
            "Oops! Something went wrong.",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("The game could not be loaded."),
        Line::from(Span::styled(error, Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(Span::styled(
            "[ r ] RELOAD  •  q to quit",
            Style::default().fg(Color::Black).bg(Color::Magenta),
        )),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, centered(f.area(), 70, 10));
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn layout() -> Vec<Fixture> {
        vec![
            Fixture::urinal(true),
            Fixture::urinal(false),
            Fixture::urinal(true),
            Fixture::urinal(false),
            Fixture::stall(false),
        ]
    }

    fn rendered<F: FnOnce(&mut Frame)>(draw: F) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(draw).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn cursor_starts_on_first_free_fixture_and_skips_occupied() {
        let mut renderer = TerminalRenderer::new(6);
        renderer.render_layout(2, "Pick.", &layout());
        assert_eq!(renderer.cursor(), Some(1));

        renderer.move_cursor(1);
        assert_eq!(renderer.cursor(), Some(3));
        renderer.move_cursor(1);
        assert_eq!(renderer.cursor(), Some(4));
        renderer.move_cursor(1);
        assert_eq!(renderer.cursor(), Some(4));
        renderer.move_cursor(-1);
        renderer.move_cursor(-1);
        renderer.move_cursor(-1);
        assert_eq!(renderer.cursor(), Some(1));
    }

    #[test]
    fn disabled_input_blocks_selection() {
        let mut renderer = TerminalRenderer::new(6);
        renderer.render_layout(1, "Pick.", &layout());
        assert!(renderer.is_selectable(1));
        assert!(!renderer.is_selectable(0));
        assert!(!renderer.is_selectable(9));

        renderer.disable_all_input();
        assert!(!renderer.is_selectable(1));
        renderer.move_cursor(1);
        assert_eq!(renderer.cursor(), Some(1));

        renderer.render_layout(2, "Again.", &layout());
        assert!(renderer.is_selectable(1));
    }

    #[test]
    fn game_screen_shows_problem_and_score() {
        let mut renderer = TerminalRenderer::new(6);
        renderer.render_layout(3, "Someone is in the middle.", &layout());
        renderer.update_score(2);
        renderer.show_screen(Screen::Game);

        let screen = rendered(|f| renderer.draw(f));
        assert!(screen.contains("PROBLEM 3"));
        assert!(screen.contains("Score: 2"));
        assert!(screen.contains("Someone is in the middle."));
        assert!(screen.contains("STALL"));
    }

    #[test]
    fn feedback_and_results_screens() {
        let mut renderer = TerminalRenderer::new(6);
        renderer.show_feedback(
            false,
            &FeedbackMessage {
                title: "Too Close!".to_string(),
                message: "Keep your distance.".to_string(),
            },
        );
        renderer.show_screen(Screen::Feedback);
        let screen = rendered(|f| renderer.draw(f));
        assert!(screen.contains("Too Close!"));
        assert!(screen.contains("Continue"));

        renderer.show_results(
            3,
            &Rating {
                min_score: 3,
                emoji: "=".to_string(),
                title: "NEEDS PRACTICE".to_string(),
                message: "Study the buffer zone!".to_string(),
            },
        );
        renderer.show_screen(Screen::Results);
        let screen = rendered(|f| renderer.draw(f));
        assert!(screen.contains("3 / 6"));
        assert!(screen.contains("NEEDS PRACTICE"));
    }

    #[test]
    fn load_error_offers_reload() {
        let screen = rendered(|f| draw_load_error(f, "catalog contains no scenarios"));
        assert!(screen.contains("RELOAD"));
        assert!(screen.contains("catalog contains no scenarios"));
    }
}
