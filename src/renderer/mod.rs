//! Rendering strategies for comparison events
//!
//! A [`Renderer`] turns one [`ComparisonEvent`] into printable text. Both
//! variants pad the left column to a run-scoped `maxlen` measured in display
//! columns, so double-width and zero-width characters line up in a terminal.

mod inline_marked;
mod line_stacked;

use crate::comparator::ComparisonEvent;
use crate::constant::DEFAULT_SEPARATOR;
use crate::width::display_width;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use inline_marked::InlineMarkedRenderer;
pub use line_stacked::LineStackedRenderer;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Control character in {text:?} has unknown effect while printing")]
    InvalidInput { text: String },
}

impl RenderError {
    fn invalid(text: &str) -> Self {
        Self::InvalidInput {
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Separator printed between the two columns
    pub sep: String,
    /// Whether a replaced line whose counterpart carries no cue is shown as unchanged
    pub mark_unchanged: bool,
    /// Display width of the left column, set at the start of every run
    pub maxlen: usize,
}

impl RenderConfig {
    pub fn new(sep: impl Into<String>, mark_unchanged: bool) -> Self {
        Self {
            sep: sep.into(),
            mark_unchanged,
            maxlen: 0,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR, false)
    }
}

pub trait Renderer {
    fn config(&self) -> &RenderConfig;

    fn config_mut(&mut self) -> &mut RenderConfig;

    /// Build the printable text for one comparison event
    fn render(&self, event: &ComparisonEvent) -> Result<String, RenderError>;

    fn mark_unchanged(&self) -> bool {
        self.config().mark_unchanged
    }

    fn set_maxlen(&mut self, maxlen: usize) {
        self.config_mut().maxlen = maxlen;
    }

    /// Pad `left` to `maxlen` columns, then append the separator, `right` and a newline
    fn join_with_spaces(&self, left: &str, right: &str) -> Result<String, RenderError> {
        let config = self.config();
        let Some(left_width) = display_width(left) else {
            return Err(RenderError::invalid(left));
        };
        if display_width(right).is_none() {
            return Err(RenderError::invalid(right));
        }
        let padding = " ".repeat(config.maxlen.saturating_sub(left_width));
        Ok(format!("{left}{padding}{}{right}\n", config.sep))
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn config(&self) -> &RenderConfig {
        (**self).config()
    }

    fn config_mut(&mut self) -> &mut RenderConfig {
        (**self).config_mut()
    }

    fn render(&self, event: &ComparisonEvent) -> Result<String, RenderError> {
        (**self).render(event)
    }

    fn join_with_spaces(&self, left: &str, right: &str) -> Result<String, RenderError> {
        (**self).join_with_spaces(left, right)
    }
}

/// Renderer variants selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RendererKind {
    /// Intraline detail on a second line under the compared pair
    #[default]
    LineStacked,
    /// Changed spans wrapped in brackets on a single line
    InlineMarked,
}

impl RendererKind {
    pub const ALL: [RendererKind; 2] = [RendererKind::LineStacked, RendererKind::InlineMarked];

    /// The variant with every option at its default
    pub fn build_default(self) -> Box<dyn Renderer> {
        match self {
            RendererKind::LineStacked => Box::new(LineStackedRenderer::default()),
            RendererKind::InlineMarked => Box::new(InlineMarkedRenderer::default()),
        }
    }

    /// `mark_unchanged` when the option is not given explicitly
    pub fn default_mark_unchanged(self) -> bool {
        match self {
            RendererKind::LineStacked => false,
            RendererKind::InlineMarked => true,
        }
    }
}
