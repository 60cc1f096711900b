//! Side-by-side comparison driver
//!
//! [`Comparator`] runs a [`LineDiffer`] over two sequences of lines, regroups
//! the tagged output into [`ComparisonEvent`]s and hands every event to its
//! [`Renderer`]. Output is produced lazily, one rendered chunk per event.

mod machine;
mod types;

use crate::constant::INDICATOR_PAD;
use crate::differ::{LineDiffer, NdiffDiffer};
use crate::renderer::{LineStackedRenderer, RenderError, Renderer};
use crate::width::display_width_lossy;
use std::iter::FusedIterator;
use thiserror::Error;

pub use machine::Events;
pub use types::{ComparisonEvent, EventKind};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompareError {
    #[error("Unsupported diff shape: {indicators:?}")]
    UnsupportedDiffShape { indicators: String },

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

pub struct Comparator<R: Renderer = LineStackedRenderer, D: LineDiffer = NdiffDiffer> {
    renderer: R,
    differ: D,
}

impl Comparator {
    pub fn new() -> Self {
        Self::with_renderer(LineStackedRenderer::default())
    }
}

impl Default for Comparator {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Renderer> Comparator<R> {
    pub fn with_renderer(renderer: R) -> Self {
        Self {
            renderer,
            differ: NdiffDiffer,
        }
    }
}

impl<R: Renderer, D: LineDiffer> Comparator<R, D> {
    /// Replace the line differ, keeping the renderer
    pub fn with_differ<E: LineDiffer>(self, differ: E) -> Comparator<R, E> {
        Comparator {
            renderer: self.renderer,
            differ,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn set_renderer(&mut self, renderer: R) {
        self.renderer = renderer;
    }

    /// Resolved comparison events, without rendering
    pub fn events<A, B>(&self, left: &[A], right: &[B]) -> Events
    where
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let left: Vec<&str> = left.iter().map(AsRef::as_ref).collect();
        let right: Vec<&str> = right.iter().map(AsRef::as_ref).collect();
        let tagged = self.differ.tagged_lines(&left, &right);
        Events::new(tagged, self.renderer.mark_unchanged())
    }

    /// Lazily render the side-by-side comparison of `left` and `right`
    ///
    /// Column width is sized from `left` only; wider lines on the right are
    /// not accounted for.
    pub fn compare<A, B>(&mut self, left: &[A], right: &[B]) -> Comparison<'_, R>
    where
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let widest = left
            .iter()
            .map(|line| line.as_ref().trim_end_matches('\n'))
            .map(display_width_lossy)
            .max()
            .unwrap_or(0);
        let maxlen = widest + INDICATOR_PAD;
        self.renderer.set_maxlen(maxlen);
        tracing::debug!(
            "Comparing {} left lines with {} right lines, maxlen {}",
            left.len(),
            right.len(),
            maxlen
        );

        let events = self.events(left, right);
        Comparison {
            events,
            renderer: &self.renderer,
            failed: false,
        }
    }

    /// The whole comparison joined into one string
    pub fn comparison_string<A, B>(
        &mut self,
        left: &[A],
        right: &[B],
    ) -> Result<String, CompareError>
    where
        A: AsRef<str>,
        B: AsRef<str>,
    {
        self.compare(left, right).collect()
    }
}

/// Lazy sequence of rendered comparison chunks
pub struct Comparison<'r, R: Renderer + ?Sized> {
    events: Events,
    renderer: &'r R,
    failed: bool,
}

impl<R: Renderer + ?Sized> Iterator for Comparison<'_, R> {
    type Item = Result<String, CompareError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let rendered = match self.events.next()? {
            Ok(event) => self.renderer.render(&event).map_err(CompareError::from),
            Err(e) => Err(e),
        };
        if let Err(e) = &rendered {
            tracing::error!("Comparison aborted: {}", e);
            self.failed = true;
        }
        Some(rendered)
    }
}

impl<R: Renderer + ?Sized> FusedIterator for Comparison<'_, R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{InlineMarkedRenderer, RendererKind};
    use pretty_assertions::assert_eq;

    struct Scripted(Vec<&'static str>);

    impl LineDiffer for Scripted {
        fn tagged_lines(&self, _left: &[&str], _right: &[&str]) -> Vec<String> {
            self.0.iter().map(|l| l.to_string()).collect()
        }
    }

    fn kinds(left: &[&str], right: &[&str]) -> Vec<EventKind> {
        Comparator::new()
            .events(left, right)
            .map(|e| e.unwrap().kind())
            .collect()
    }

    #[test]
    fn equal_sequences_are_all_unchanged() {
        let lines = ["alpha", "beta", "감마"];
        let found = kinds(&lines, &lines);
        assert!(found.iter().all(|k| *k == EventKind::Unchanged));

        let mut comparator = Comparator::new();
        let out = comparator.comparison_string(&lines, &lines).unwrap();
        assert_eq!(out, "  alpha|  alpha\n  beta |  beta\n  감마 |  감마\n");
    }

    #[test]
    fn appended_line_is_one_insertion() {
        use EventKind::*;
        let found = kinds(&["a", "b"], &["a", "b", "c"]);
        assert_eq!(found, vec![Unchanged, Unchanged, Inserted]);
    }

    #[test]
    fn dropped_line_is_one_deletion() {
        assert_eq!(kinds(&["x"], &[]), vec![EventKind::Deleted]);
    }

    #[test]
    fn empty_inputs_produce_nothing() {
        let mut comparator = Comparator::new();
        let empty: [&str; 0] = [];
        assert_eq!(comparator.compare(&empty, &empty).count(), 0);
        assert_eq!(comparator.comparison_string(&empty, &empty).unwrap(), "");
    }

    #[test]
    fn empty_left_sizes_column_to_indicator_pad() {
        let mut comparator = Comparator::new();
        let empty: [&str; 0] = [];
        let out = comparator.comparison_string(&empty, &["new"]).unwrap();
        assert_eq!(comparator.renderer().config().maxlen, INDICATOR_PAD);
        assert_eq!(out, "  |+ new\n");
    }

    #[test]
    fn hello_world_is_one_replace_with_both_cues() {
        let comparator = Comparator::new();
        let events: Vec<_> = comparator
            .events(&["Hello, World"], &["Helo, Wold!"])
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.kind(), EventKind::Replaced);
        assert_eq!(event.left, "- Hello, World");
        assert_eq!(event.right, "+ Helo, Wold!");
        let left_cue = event.left_replace.as_deref().unwrap_or_default();
        let right_cue = event.right_replace.as_deref().unwrap_or_default();
        assert!(left_cue.starts_with("? ") && left_cue.len() > 2);
        assert!(right_cue.starts_with("? ") && right_cue.len() > 2);

        let out = Comparator::new()
            .comparison_string(&["Hello, World"], &["Helo, Wold!"])
            .unwrap();
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn trailing_newlines_are_ignored_for_width() {
        let mut comparator = Comparator::new();
        let lines = ["ab\n"];
        let out = comparator.comparison_string(&lines, &lines).unwrap();
        assert_eq!(comparator.renderer().config().maxlen, 4);
        assert_eq!(out, "  ab|  ab\n");
    }

    #[test]
    fn chunks_concatenate_to_comparison_string() {
        let left = ["Hello, World", "안녕, 세계", "For Test! 테스트용입니다."];
        let right = [
            "Helo, Wold!",
            "안넝, 새개!",
            "For Test! 테스트용",
            "빈 라인",
        ];

        let mut comparator = Comparator::new();
        let groups = comparator.events(&left, &right).count();
        let chunks: Vec<String> = comparator
            .compare(&left, &right)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(chunks.len(), groups);
        let whole = comparator.comparison_string(&left, &right).unwrap();
        assert_eq!(chunks.concat(), whole);
    }

    #[test]
    fn fresh_comparators_render_identically() {
        let left = ["one", "two", "three"];
        let right = ["one", "too", "three", "four"];
        for kind in [RendererKind::LineStacked, RendererKind::InlineMarked] {
            let first = Comparator::with_renderer(kind.build_default())
                .comparison_string(&left, &right)
                .unwrap();
            let second = Comparator::with_renderer(kind.build_default())
                .comparison_string(&left, &right)
                .unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn renderer_can_be_swapped_between_runs() {
        let (left, right) = (["x"], [] as [&str; 0]);
        let mut comparator = Comparator::with_renderer(RendererKind::LineStacked.build_default());
        let stacked = comparator.comparison_string(&left, &right).unwrap();
        comparator.set_renderer(RendererKind::InlineMarked.build_default());
        let inline = comparator.comparison_string(&left, &right).unwrap();
        assert_eq!(stacked, "- x|\n");
        assert_eq!(inline, ">x<|\n");
    }

    #[test]
    fn mark_unchanged_changes_inline_output() {
        let left = ["abcdefgh"];
        let right = ["abcdefg"];
        let marked = Comparator::with_renderer(InlineMarkedRenderer::default())
            .comparison_string(&left, &right)
            .unwrap();
        let unmarked = Comparator::with_renderer(InlineMarkedRenderer::new("|", false))
            .comparison_string(&left, &right)
            .unwrap();
        assert_eq!(marked, "abcdefg>h<|abcdefg\n");
        assert_eq!(unmarked, "abcdefg>h<|<abcdefg>\n");
        assert_ne!(marked, unmarked);
    }

    #[test]
    fn unsupported_shape_stops_after_valid_output() {
        let script = Scripted(vec!["  a", "- b", "? ^", "  c"]);
        let mut comparator = Comparator::new().with_differ(script);
        let mut chunks = comparator.compare(&["a", "b", "c"], &["a", "c"]);
        assert_eq!(chunks.next(), Some(Ok("  a|  a\n".to_string())));
        assert_eq!(
            chunks.next(),
            Some(Err(CompareError::UnsupportedDiffShape {
                indicators: "-? ".to_string(),
            }))
        );
        assert_eq!(chunks.next(), None);
    }

    #[test]
    fn control_characters_abort_rendering() {
        let mut comparator = Comparator::new();
        let mut chunks = comparator.compare(&["ok", "tab\there"], &["ok", "tab\there"]);
        assert!(chunks.next().unwrap().is_ok());
        assert_eq!(
            chunks.next(),
            Some(Err(CompareError::Render(RenderError::InvalidInput {
                text: "  tab\there".to_string(),
            })))
        );
        assert_eq!(chunks.next(), None);
    }
}
