//! Test double for [`Renderer`].

use std::collections::BTreeSet;

use super::renderer::{Renderer, Screen};
use crate::catalog::{FeedbackMessage, Fixture, Rating};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCall {
    Layout { scenario_id: u32, fixtures: usize },
    Highlight(usize),
    Reveal(Vec<usize>),
    DisableInput,
    Screen(Screen),
    Score(u32),
    Feedback { is_correct: bool, title: String },
    Results { score: u32, title: String },
}

/// Records every call in order.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<RenderCall>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<RenderCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn last_screen(&self) -> Option<Screen> {
        self.calls.iter().rev().find_map(|call| match call {
            RenderCall::Screen(screen) => Some(*screen),
            _ => None,
        })
    }
}

impl Renderer for RecordingRenderer {
    fn render_layout(&mut self, scenario_id: u32, _problem_text: &str, layout: &[Fixture]) {
        self.calls.push(RenderCall::Layout {
            scenario_id,
            fixtures: layout.len(),
        });
    }

    fn highlight_selection(&mut self, index: usize) {
        self.calls.push(RenderCall::Highlight(index));
    }

    fn reveal_correct_answers(&mut self, indices: &BTreeSet<usize>) {
        self.calls
            .push(RenderCall::Reveal(indices.iter().copied().collect()));
    }

    fn disable_all_input(&mut self) {
        self.calls.push(RenderCall::DisableInput);
    }

    fn show_screen(&mut self, screen: Screen) {
        self.calls.push(RenderCall::Screen(screen));
    }

    fn update_score(&mut self, score: u32) {
        self.calls.push(RenderCall::Score(score));
    }

    fn show_feedback(&mut self, is_correct: bool, feedback: &FeedbackMessage) {
        self.calls.push(RenderCall::Feedback {
            is_correct,
            title: feedback.title.clone(),
        });
    }

    fn show_results(&mut self, score: u32, rating: &Rating) {
        self.calls.push(RenderCall::Results {
            score,
            title: rating.title.clone(),
        });
    }
}
