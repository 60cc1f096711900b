use super::CompareError;
use super::types::ComparisonEvent;
use crate::differ::TaggedLine;
use std::collections::VecDeque;

/// Lazy stream of comparison events regrouped from tagged differ lines
///
/// Lines are appended to a log and the pending buffer is the tail of that log
/// starting at `start`. After every append the indicator shape of the whole
/// buffer is matched against the complete patterns; resolved lines are
/// consumed by advancing `start`.
///
/// A hint line that can never be attached to a replace pair ends the stream
/// with [`CompareError::UnsupportedDiffShape`]. This covers `-? `, `-?-`,
/// `-??` and a leading `?` while reading, and a dangling `-?` once the input
/// is exhausted.
pub struct Events {
    source: std::vec::IntoIter<String>,
    log: Vec<TaggedLine>,
    start: usize,
    ready: VecDeque<ComparisonEvent>,
    mark_unchanged: bool,
    finished: bool,
}

impl Events {
    pub(crate) fn new(tagged_lines: Vec<String>, mark_unchanged: bool) -> Self {
        Self {
            source: tagged_lines.into_iter(),
            log: Vec::new(),
            start: 0,
            ready: VecDeque::new(),
            mark_unchanged,
            finished: false,
        }
    }

    /// Indicators of the lines read but not yet resolved
    pub fn pending_shape(&self) -> String {
        self.log[self.start..]
            .iter()
            .map(|line| line.indicator.as_char())
            .collect()
    }

    fn take(&mut self) -> String {
        let text = std::mem::take(&mut self.log[self.start].text);
        self.start += 1;
        text
    }

    fn unsupported(&self, shape: String) -> CompareError {
        tracing::warn!("Differ produced an unsupported shape {:?}", shape);
        CompareError::UnsupportedDiffShape { indicators: shape }
    }

    fn emit_unchanged(&mut self) {
        let line = self.take();
        self.ready.push_back(ComparisonEvent::unchanged(line));
    }

    fn emit_inserted(&mut self) {
        let line = self.take();
        self.ready.push_back(ComparisonEvent::inserted(line));
    }

    fn emit_deleted(&mut self) {
        let line = self.take();
        self.ready.push_back(ComparisonEvent::deleted(line));
    }

    /// `-+`, `-+?`, `-?+` or `-?+?` at the front of the buffer
    fn emit_replaced(&mut self, left_cue: bool, right_cue: bool) {
        let mut left = self.take();
        let left_replace = left_cue.then(|| self.take());
        let mut right = self.take();
        let right_replace = right_cue.then(|| self.take());

        // The side without a cue only differs by what the other side lacks
        if self.mark_unchanged {
            match (left_cue, right_cue) {
                (true, false) => mark_as_unchanged(&mut right),
                (false, true) => mark_as_unchanged(&mut left),
                _ => {}
            }
        }

        self.ready.push_back(ComparisonEvent::replaced(
            left,
            right,
            left_replace,
            right_replace,
        ));
    }

    fn resolve(&mut self) -> Result<(), CompareError> {
        let shape = self.pending_shape();
        match shape.as_str() {
            " " => self.emit_unchanged(),
            "+" => self.emit_inserted(),
            "- " => {
                self.emit_deleted();
                self.emit_unchanged();
            }
            "--" => self.emit_deleted(),
            "-+ " => {
                self.emit_replaced(false, false);
                self.emit_unchanged();
            }
            "-+-" => self.emit_replaced(false, false),
            "-++" => {
                self.emit_replaced(false, false);
                self.emit_inserted();
            }
            "-+?" => self.emit_replaced(false, true),
            "-?+ " => {
                self.emit_replaced(true, false);
                self.emit_unchanged();
            }
            "-?+-" => self.emit_replaced(true, false),
            "-?++" => {
                self.emit_replaced(true, false);
                self.emit_inserted();
            }
            "-?+?" => self.emit_replaced(true, true),
            // A hint with nothing it could annotate never completes
            "-? " | "-?-" | "-??" | "?" => return Err(self.unsupported(shape)),
            _ => {}
        }
        self.compact();
        Ok(())
    }

    /// Resolve whatever is left once the differ output is exhausted
    fn flush(&mut self) -> Result<(), CompareError> {
        let shape = self.pending_shape();
        match shape.as_str() {
            "" => {}
            "-" => self.emit_deleted(),
            "-+" => self.emit_replaced(false, false),
            "-?+" => self.emit_replaced(true, false),
            _ => return Err(self.unsupported(shape)),
        }
        self.compact();
        Ok(())
    }

    fn compact(&mut self) {
        if self.start == self.log.len() {
            self.log.clear();
            self.start = 0;
        }
    }

    fn advance(&mut self) -> Result<(), CompareError> {
        match self.source.next() {
            Some(raw) => match TaggedLine::parse(&raw) {
                Some(line) => {
                    self.log.push(line);
                    self.resolve()
                }
                None => {
                    let mut shape = self.pending_shape();
                    shape.extend(raw.chars().next());
                    Err(self.unsupported(shape))
                }
            },
            None => {
                self.finished = true;
                self.flush()
            }
        }
    }
}

fn mark_as_unchanged(line: &mut String) {
    if !line.is_empty() {
        line.replace_range(..1, " ");
    }
}

impl Iterator for Events {
    type Item = Result<ComparisonEvent, CompareError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.ready.pop_front() {
                tracing::debug!("Resolved {:?} event", event.kind());
                return Some(Ok(event));
            }
            if self.finished {
                return None;
            }
            if let Err(e) = self.advance() {
                self.finished = true;
                self.ready.clear();
                return Some(Err(e));
            }
        }
    }
}

impl std::iter::FusedIterator for Events {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::types::EventKind;

    fn tagged(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    fn events(lines: &[&str], mark_unchanged: bool) -> Vec<Result<ComparisonEvent, CompareError>> {
        Events::new(tagged(lines), mark_unchanged).collect()
    }

    fn kinds(lines: &[&str]) -> Vec<EventKind> {
        events(lines, false)
            .into_iter()
            .map(|e| e.unwrap().kind())
            .collect()
    }

    #[test]
    fn single_line_patterns() {
        use EventKind::*;
        assert_eq!(kinds(&["  a"]), vec![Unchanged]);
        assert_eq!(kinds(&["+ a"]), vec![Inserted]);
        assert_eq!(kinds(&["- a"]), vec![Deleted]);
        assert!(kinds(&[]).is_empty());
    }

    #[test]
    fn deletion_then_unchanged() {
        let out = events(&["- a", "  b"], false);
        assert_eq!(
            out,
            vec![
                Ok(ComparisonEvent::deleted("- a".into())),
                Ok(ComparisonEvent::unchanged("  b".into())),
            ]
        );
    }

    #[test]
    fn consecutive_deletions_keep_second_buffered() {
        let mut events = Events::new(tagged(&["- a", "- b", "+ c"]), false);
        let deleted = ComparisonEvent::deleted("- a".into());
        assert_eq!(events.next(), Some(Ok(deleted)));
        assert_eq!(events.pending_shape(), "-");

        let replaced = ComparisonEvent::replaced("- b".into(), "+ c".into(), None, None);
        assert_eq!(events.next(), Some(Ok(replaced)));
        assert_eq!(events.next(), None);
    }

    #[test]
    fn replace_pair_followed_by_each_indicator() {
        use EventKind::*;
        assert_eq!(kinds(&["- a", "+ b", "  c"]), vec![Replaced, Unchanged]);
        assert_eq!(kinds(&["- a", "+ b", "- c"]), vec![Replaced, Deleted]);
        assert_eq!(kinds(&["- a", "+ b", "+ c"]), vec![Replaced, Inserted]);
        assert_eq!(kinds(&["- a", "+ b"]), vec![Replaced]);
    }

    #[test]
    fn right_cue_is_attached() {
        let out = events(&["- ab", "+ abc", "?   +"], false);
        assert_eq!(
            out,
            vec![Ok(ComparisonEvent::replaced(
                "- ab".into(),
                "+ abc".into(),
                None,
                Some("?   +".into()),
            ))]
        );
    }

    #[test]
    fn left_cue_patterns() {
        use EventKind::*;
        for (next, kind) in [("  z", Unchanged), ("- z", Deleted), ("+ z", Inserted)] {
            let found = kinds(&["- abc", "?   -", "+ ab", next]);
            assert_eq!(found, vec![Replaced, kind]);
        }
        assert_eq!(kinds(&["- abc", "?   -", "+ ab"]), vec![Replaced]);

        let out = events(&["- abc", "?   ^", "+ abd", "?   ^"], false);
        assert_eq!(
            out,
            vec![Ok(ComparisonEvent::replaced(
                "- abc".into(),
                "+ abd".into(),
                Some("?   ^".into()),
                Some("?   ^".into()),
            ))]
        );
    }

    #[test]
    fn mark_unchanged_retags_the_side_without_cue() {
        let marked = events(&["- abc", "?   -", "+ ab"], true);
        let plain = events(&["- abc", "?   -", "+ ab"], false);
        assert_eq!(marked[0].as_ref().unwrap().right, "  ab");
        assert_eq!(plain[0].as_ref().unwrap().right, "+ ab");

        let marked = events(&["- ab", "+ abc", "?   +"], true);
        assert_eq!(marked[0].as_ref().unwrap().left, "  ab");
        assert_eq!(marked[0].as_ref().unwrap().right, "+ abc");
    }

    #[test]
    fn lone_hint_shapes_are_rejected() {
        for (lines, shape) in [
            (vec!["- a", "? ^", "  b"], "-? "),
            (vec!["- a", "? ^", "- b"], "-?-"),
            (vec!["- a", "? ^", "? ^"], "-??"),
            (vec!["? ^"], "?"),
        ] {
            let out = events(&lines, false);
            assert_eq!(
                out,
                vec![Err(CompareError::UnsupportedDiffShape {
                    indicators: shape.to_string(),
                })]
            );
        }
    }

    #[test]
    fn dangling_hint_at_end_is_rejected() {
        let out = events(&["  a", "- b", "? ^"], false);
        assert_eq!(out.len(), 2);
        assert!(out[0].is_ok());
        assert_eq!(
            out[1],
            Err(CompareError::UnsupportedDiffShape {
                indicators: "-?".to_string(),
            })
        );
    }

    #[test]
    fn error_surfaces_only_when_reached() {
        let lines = tagged(&["  a", "  b", "- c", "? ^", "? ^"]);
        let mut events = Events::new(lines, false);
        assert!(events.next().unwrap().is_ok());
        assert!(events.next().unwrap().is_ok());
        assert!(events.next().unwrap().is_err());
        assert_eq!(events.next(), None);
    }

    #[test]
    fn malformed_line_is_rejected() {
        let out = events(&["- a", "* b"], false);
        assert_eq!(
            out,
            vec![Err(CompareError::UnsupportedDiffShape {
                indicators: "-*".to_string(),
            })]
        );
    }

    #[test]
    fn trailing_newlines_are_stripped() {
        let out = events(&["  a\n"], false);
        assert_eq!(out, vec![Ok(ComparisonEvent::unchanged("  a".into()))]);
    }
}
