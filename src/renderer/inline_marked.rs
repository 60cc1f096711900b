use super::{RenderConfig, RenderError, Renderer};
use crate::comparator::ComparisonEvent;
use crate::constant::{DEFAULT_DELETE_BRACKETS, DEFAULT_INSERT_BRACKETS, DEFAULT_SEPARATOR};
use crate::differ::Indicator;

/// Renders each pair on a single line with changed spans wrapped in brackets
///
/// With the default brackets `<added text>` and `>removed text<`.
#[derive(Debug, Clone)]
pub struct InlineMarkedRenderer {
    config: RenderConfig,
    insert_brackets: (String, String),
    delete_brackets: (String, String),
}

impl InlineMarkedRenderer {
    pub fn new(sep: impl Into<String>, mark_unchanged: bool) -> Self {
        Self {
            config: RenderConfig::new(sep, mark_unchanged),
            insert_brackets: owned(DEFAULT_INSERT_BRACKETS),
            delete_brackets: owned(DEFAULT_DELETE_BRACKETS),
        }
    }

    pub fn with_brackets(
        mut self,
        insert_brackets: (impl Into<String>, impl Into<String>),
        delete_brackets: (impl Into<String>, impl Into<String>),
    ) -> Self {
        self.insert_brackets = (insert_brackets.0.into(), insert_brackets.1.into());
        self.delete_brackets = (delete_brackets.0.into(), delete_brackets.1.into());
        self
    }

    fn mark_side(&self, line: &str, cue: Option<&str>) -> String {
        if line.is_empty() {
            return String::new();
        }
        let (prefix, content) = split_prefix(line);
        let brackets = if prefix == Indicator::Unchanged.prefix() {
            return content.to_string();
        } else if prefix == Indicator::Removed.prefix() {
            &self.delete_brackets
        } else if prefix == Indicator::Added.prefix() {
            &self.insert_brackets
        } else {
            return String::new();
        };

        let len = content.chars().count();
        let marked = match cue {
            None => vec![true; len],
            Some(cue) => {
                let mut marked = vec![false; len];
                let (_, cue) = split_prefix(cue);
                for (slot, mark) in marked.iter_mut().zip(cue.chars()) {
                    *slot = mark != ' ';
                }
                marked
            }
        };

        wrap_marked_runs(content, &marked, brackets)
    }
}

impl Default for InlineMarkedRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR, true)
    }
}

fn owned((open, close): (&str, &str)) -> (String, String) {
    (open.to_string(), close.to_string())
}

/// Split off the two-character indicator prefix
fn split_prefix(line: &str) -> (&str, &str) {
    let at = line.char_indices().nth(2).map_or(line.len(), |(i, _)| i);
    line.split_at(at)
}

fn wrap_marked_runs(content: &str, marked: &[bool], (open, close): &(String, String)) -> String {
    let mut wrapped = String::with_capacity(content.len());
    let mut in_run = false;
    for (c, &is_marked) in content.chars().zip(marked) {
        if is_marked != in_run {
            wrapped.push_str(if is_marked { open } else { close });
            in_run = is_marked;
        }
        wrapped.push(c);
    }
    if in_run {
        wrapped.push_str(close);
    }
    wrapped
}

impl Renderer for InlineMarkedRenderer {
    fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut RenderConfig {
        &mut self.config
    }

    fn render(&self, event: &ComparisonEvent) -> Result<String, RenderError> {
        let left = self.mark_side(&event.left, event.left_replace.as_deref());
        let right = self.mark_side(&event.right, event.right_replace.as_deref());
        self.join_with_spaces(&left, &right)
    }
}
