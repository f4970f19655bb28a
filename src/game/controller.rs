use std::time::Duration;
use tracing::{debug, info};

use super::renderer::{Renderer, Screen};
use super::scheduler::{Scheduler, Task, TaskId};
use super::state::{AnswerRecord, GameState, GameSummary, Phase};
use crate::catalog::{Catalog, Scenario};
use crate::config::GameConfig;
use crate::error::{GameError, Result};

/// Runs one game: sequences scenarios, scores selections and tells the
/// renderer what to show.
///
/// Calls that make no sense in the current phase are ignored rather than
/// reported, since they are usually stale key presses.
pub struct GameController<R: Renderer> {
    catalog: Catalog,
    config: GameConfig,
    renderer: R,
    state: GameState,
    scheduler: Scheduler,
}

pub struct GameControllerBuilder<R> {
    catalog: Option<Catalog>,
    config: GameConfig,
    renderer: Option<R>,
}

impl<R: Renderer> GameControllerBuilder<R> {
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn renderer(mut self, renderer: R) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Fails if no renderer was attached or the catalog size disagrees
    /// with `total_scenarios`. The built-in catalog is used when none is
    /// given.
    pub fn build(self) -> Result<GameController<R>> {
        let renderer = self.renderer.ok_or(GameError::MissingRenderer)?;
        let catalog = match self.catalog {
            Some(catalog) => catalog,
            None => Catalog::builtin()?,
        };

        let expected = self.config.total_scenarios;
        if expected != 0 && expected != catalog.scenario_count() {
            return Err(GameError::ScenarioCountMismatch {
                expected,
                actual: catalog.scenario_count(),
            });
        }

        Ok(GameController {
            catalog,
            config: self.config,
            renderer,
            state: GameState::default(),
            scheduler: Scheduler::new(),
        })
    }
}

/// Only the controller's own index arithmetic reaches this; an index past
/// the catalog is a bug, not a user error.
fn scenario_at(catalog: &Catalog, index: usize) -> &Scenario {
    match catalog.scenario_at(index) {
        Ok(scenario) => scenario,
        Err(err) => panic!("game controller lost track of the catalog: {err}"),
    }
}

impl<R: Renderer> GameController<R> {
    pub fn builder() -> GameControllerBuilder<R> {
        GameControllerBuilder {
            catalog: None,
            config: GameConfig::default(),
            renderer: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn current_scenario(&self) -> usize {
        self.state.current_scenario
    }

    pub fn is_playing(&self) -> bool {
        self.state.phase == Phase::Playing
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary::new(
            self.state.score,
            self.catalog.scenario_count(),
            self.state.answers.clone(),
        )
    }

    pub fn start(&mut self) {
        if self.state.is_transitioning {
            debug!("start ignored while transitioning");
            return;
        }

        let cancelled = self.scheduler.cancel_all();
        if cancelled > 0 {
            debug!(cancelled, "dropped pending timers on start");
        }
        self.state = GameState::default();
        self.state.phase = Phase::Playing;

        self.renderer.update_score(0);
        self.load_scenario(0);
        self.renderer.show_screen(Screen::Game);
        debug!(scenarios = self.catalog.scenario_count(), "game started");
    }

    pub fn restart(&mut self) {
        if self.state.is_transitioning {
            return;
        }
        self.start();
    }

    fn load_scenario(&mut self, index: usize) {
        let scenario = scenario_at(&self.catalog, index);
        self.state.current_scenario = index;
        self.renderer
            .render_layout(scenario.id, &scenario.problem_text, &scenario.layout);
    }

    /// Scores `fixture_index` against the current scenario. Occupancy is not
    /// re-checked here; an occupied fixture simply is not a correct answer.
    pub fn submit_selection(&mut self, fixture_index: usize) {
        if self.state.phase != Phase::Playing || self.state.is_transitioning {
            debug!(fixture_index, phase = ?self.state.phase, "selection ignored");
            return;
        }

        let index = self.state.current_scenario;
        let scenario = scenario_at(&self.catalog, index);
        let was_correct = scenario.is_correct(fixture_index);

        self.state.is_transitioning = true;
        self.state.answers.push(AnswerRecord {
            scenario_id: scenario.id,
            selected_index: fixture_index,
            was_correct,
        });
        if was_correct {
            self.state.score += 1;
        }
        debug!(
            scenario = scenario.id,
            fixture_index,
            was_correct,
            score = self.state.score,
            "answer recorded"
        );

        self.renderer.highlight_selection(fixture_index);
        self.renderer.disable_all_input();
        if was_correct {
            self.renderer.update_score(self.state.score);
        } else {
            self.scheduler
                .schedule(self.config.reveal_delay(), Task::RevealCorrect { scenario: index });
        }
        self.scheduler.schedule(
            self.config.feedback_delay(),
            Task::ShowFeedback {
                scenario: index,
                correct: was_correct,
            },
        );
    }

    pub fn advance(&mut self) {
        if self.state.is_transitioning || self.state.phase != Phase::Feedback {
            return;
        }

        let next = self.state.current_scenario + 1;
        if next < self.catalog.scenario_count() {
            self.state.phase = Phase::Playing;
            self.load_scenario(next);
            self.renderer.show_screen(Screen::Game);
            debug!(scenario = next + 1, "next scenario");
        } else {
            self.show_results();
        }
    }

    /// Moves the controller's clock forward and fires every timer that came
    /// due, earliest first.
    pub fn tick(&mut self, elapsed: Duration) {
        let until = self.scheduler.now() + elapsed;
        while let Some((id, task)) = self.scheduler.pop_due(until) {
            self.run_task(id, task);
        }
        self.scheduler.settle(until);
    }

    fn run_task(&mut self, id: TaskId, task: Task) {
        match task {
            Task::RevealCorrect { scenario } => {
                if self.state.phase != Phase::Playing || self.state.current_scenario != scenario {
                    debug!(?id, ?task, "stale timer skipped");
                    return;
                }
                let indices = &scenario_at(&self.catalog, scenario).correct_answers;
                self.renderer.reveal_correct_answers(indices);
            }
            Task::ShowFeedback { scenario, correct } => {
                if self.state.phase != Phase::Playing
                    || !self.state.is_transitioning
                    || self.state.current_scenario != scenario
                {
                    debug!(?id, ?task, "stale timer skipped");
                    return;
                }
                self.show_feedback(scenario, correct);
            }
            Task::AutoAdvance { scenario } => {
                if self.state.phase != Phase::Feedback || self.state.current_scenario != scenario {
                    debug!(?id, ?task, "stale timer skipped");
                    return;
                }
                self.advance();
            }
        }
    }

    fn show_feedback(&mut self, index: usize, was_correct: bool) {
        self.state.phase = Phase::Feedback;
        self.state.is_transitioning = false;

        let feedback = scenario_at(&self.catalog, index).feedback.for_outcome(was_correct);
        self.renderer.show_feedback(was_correct, feedback);
        self.renderer.show_screen(Screen::Feedback);

        if let Some(delay) = self.config.auto_advance_delay() {
            self.scheduler
                .schedule(delay, Task::AutoAdvance { scenario: index });
        }
    }

    fn show_results(&mut self) {
        self.state.phase = Phase::Results;
        self.state.is_transitioning = false;

        let rating = self.catalog.resolve_rating(self.state.score);
        self.renderer.show_results(self.state.score, rating);
        self.renderer.show_screen(Screen::Results);

        let summary = self.summary();
        info!(
            score = summary.score,
            total = summary.total,
            percentage = summary.percentage,
            rating = %rating.title,
            answers = ?summary.answers,
            "game complete"
        );
    }
}
