use super::{RenderConfig, RenderError, Renderer};
use crate::comparator::ComparisonEvent;
use crate::constant::DEFAULT_SEPARATOR;
use crate::width::char_width;

/// Renders each pair on one line, with intraline cues on a second line below it
#[derive(Debug, Clone)]
pub struct LineStackedRenderer {
    config: RenderConfig,
}

impl LineStackedRenderer {
    pub fn new(sep: impl Into<String>, mark_unchanged: bool) -> Self {
        Self {
            config: RenderConfig::new(sep, mark_unchanged),
        }
    }
}

impl Default for LineStackedRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR, false)
    }
}

/// Stretch every cue character over the columns of the character it annotates
fn align_cue(line: &str, cue: &str) -> String {
    let mut aligned = String::with_capacity(cue.len());
    for (c, mark) in line.chars().zip(cue.chars()) {
        let columns = char_width(c).unwrap_or(0);
        aligned.extend(std::iter::repeat_n(mark, columns));
    }
    aligned
}

fn non_empty(cue: &Option<String>) -> Option<&str> {
    cue.as_deref().filter(|cue| !cue.is_empty())
}

impl Renderer for LineStackedRenderer {
    fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut RenderConfig {
        &mut self.config
    }

    fn render(&self, event: &ComparisonEvent) -> Result<String, RenderError> {
        let mut rendered = self.join_with_spaces(&event.left, &event.right)?;

        let left_cue = non_empty(&event.left_replace);
        let right_cue = non_empty(&event.right_replace);
        if left_cue.is_some() || right_cue.is_some() {
            let left_detail = left_cue
                .map(|cue| align_cue(&event.left, cue))
                .unwrap_or_default();
            let right_detail = right_cue
                .map(|cue| align_cue(&event.right, cue))
                .unwrap_or_default();
            rendered.push_str(&self.join_with_spaces(&left_detail, &right_detail)?);
        }

        Ok(rendered)
    }
}
