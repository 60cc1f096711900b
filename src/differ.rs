//! Line differencing in the ndiff convention
//!
//! Every produced line starts with a two-character prefix: `"  "` for a line
//! present on both sides, `"- "` for a line only on the left, `"+ "` for a line
//! only on the right, and `"? "` for an intraline hint annotating the `-` or `+`
//! line right before it. Hint lines mark each character position with `^`
//! (replaced), `-` (deleted), `+` (inserted) or a blank (unchanged).

use crate::constant::FANCY_REPLACE_CUTOFF;
use similar::{Algorithm, DiffTag, TextDiff};
use std::ops::Range;

/// Classification of a single differ output line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Unchanged,
    Removed,
    Added,
    Hint,
}

impl Indicator {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ' ' => Some(Self::Unchanged),
            '-' => Some(Self::Removed),
            '+' => Some(Self::Added),
            '?' => Some(Self::Hint),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Unchanged => ' ',
            Self::Removed => '-',
            Self::Added => '+',
            Self::Hint => '?',
        }
    }

    /// The two-character prefix the differ writes in front of the line content
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Unchanged => "  ",
            Self::Removed => "- ",
            Self::Added => "+ ",
            Self::Hint => "? ",
        }
    }
}

/// One differ output line with its trailing newline stripped
///
/// `text` keeps the indicator prefix; renderers rely on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedLine {
    pub indicator: Indicator,
    pub text: String,
}

impl TaggedLine {
    /// Parse a raw differ line, `None` if it does not start with a known indicator
    pub fn parse(raw: &str) -> Option<Self> {
        let text = raw.trim_end_matches('\n');
        let indicator = Indicator::from_char(text.chars().next()?)?;
        Some(Self {
            indicator,
            text: text.to_string(),
        })
    }
}

/// Source of tagged lines for two sequences of lines
pub trait LineDiffer {
    fn tagged_lines(&self, left: &[&str], right: &[&str]) -> Vec<String>;
}

/// Line differ built on `similar` that pairs similar lines and emits intraline hints
#[derive(Debug, Clone, Copy, Default)]
pub struct NdiffDiffer;

impl LineDiffer for NdiffDiffer {
    fn tagged_lines(&self, left: &[&str], right: &[&str]) -> Vec<String> {
        let diff = TextDiff::configure()
            .algorithm(Algorithm::Myers)
            .diff_slices(left, right);
        let mut out = Vec::new();

        for op in diff.ops() {
            let (tag, old, new) = op.as_tag_tuple();
            match tag {
                DiffTag::Equal => dump(&mut out, Indicator::Unchanged, &left[old]),
                DiffTag::Delete => dump(&mut out, Indicator::Removed, &left[old]),
                DiffTag::Insert => dump(&mut out, Indicator::Added, &right[new]),
                DiffTag::Replace => fancy_replace(&mut out, left, old, right, new),
            }
        }

        out
    }
}

fn dump(out: &mut Vec<String>, indicator: Indicator, lines: &[&str]) {
    for line in lines {
        out.push(format!("{}{}", indicator.prefix(), line));
    }
}

/// Upper bound of the similarity ratio, computed from lengths alone
fn length_bound(old: &str, new: &str) -> f32 {
    let (la, lb) = (old.chars().count(), new.chars().count());
    if la + lb == 0 {
        return 1.0;
    }
    2.0 * la.min(lb) as f32 / (la + lb) as f32
}

/// Align a block of replaced lines by synchronizing on the most similar pair
fn fancy_replace(
    out: &mut Vec<String>,
    left: &[&str],
    old: Range<usize>,
    right: &[&str],
    new: Range<usize>,
) {
    let mut best_ratio = FANCY_REPLACE_CUTOFF - 0.01;
    let mut best = None;
    let mut identical = None;

    for j in new.clone() {
        for i in old.clone() {
            if left[i] == right[j] {
                if identical.is_none() {
                    identical = Some((i, j));
                }
                continue;
            }
            if length_bound(left[i], right[j]) <= best_ratio {
                continue;
            }
            let ratio = TextDiff::from_chars(left[i], right[j]).ratio();
            if ratio > best_ratio {
                best_ratio = ratio;
                best = Some((i, j));
            }
        }
    }

    let (i, j, synced_on_identical) = match (best, identical) {
        (Some((i, j)), _) if best_ratio >= FANCY_REPLACE_CUTOFF => (i, j, false),
        (_, Some((i, j))) => (i, j, true),
        _ => {
            plain_replace(out, left, old, right, new);
            return;
        }
    };

    fancy_helper(out, left, old.start..i, right, new.start..j);
    if synced_on_identical {
        dump(out, Indicator::Unchanged, &left[i..=i]);
    } else {
        push_hinted_pair(out, left[i], right[j]);
    }
    fancy_helper(out, left, i + 1..old.end, right, j + 1..new.end);
}

fn fancy_helper(
    out: &mut Vec<String>,
    left: &[&str],
    old: Range<usize>,
    right: &[&str],
    new: Range<usize>,
) {
    match (old.is_empty(), new.is_empty()) {
        (false, false) => fancy_replace(out, left, old, right, new),
        (false, true) => dump(out, Indicator::Removed, &left[old]),
        (true, false) => dump(out, Indicator::Added, &right[new]),
        (true, true) => {}
    }
}

/// Emit a block without pairing; the shorter side goes first
fn plain_replace(
    out: &mut Vec<String>,
    left: &[&str],
    old: Range<usize>,
    right: &[&str],
    new: Range<usize>,
) {
    if new.len() < old.len() {
        dump(out, Indicator::Added, &right[new]);
        dump(out, Indicator::Removed, &left[old]);
    } else {
        dump(out, Indicator::Removed, &left[old]);
        dump(out, Indicator::Added, &right[new]);
    }
}

fn push_hinted_pair(out: &mut Vec<String>, old: &str, new: &str) {
    let mut old_tags = String::new();
    let mut new_tags = String::new();

    let diff = TextDiff::from_chars(old, new);
    for op in diff.ops() {
        let (tag, a, b) = op.as_tag_tuple();
        let (old_mark, new_mark) = match tag {
            DiffTag::Replace => ('^', '^'),
            DiffTag::Delete => ('-', ' '),
            DiffTag::Insert => (' ', '+'),
            DiffTag::Equal => (' ', ' '),
        };
        old_tags.extend(std::iter::repeat_n(old_mark, a.len()));
        new_tags.extend(std::iter::repeat_n(new_mark, b.len()));
    }

    out.push(format!("{}{}", Indicator::Removed.prefix(), old));
    let old_tags = keep_original_whitespace(old, &old_tags);
    if !old_tags.is_empty() {
        out.push(format!("{}{}", Indicator::Hint.prefix(), old_tags));
    }
    out.push(format!("{}{}", Indicator::Added.prefix(), new));
    let new_tags = keep_original_whitespace(new, &new_tags);
    if !new_tags.is_empty() {
        out.push(format!("{}{}", Indicator::Hint.prefix(), new_tags));
    }
}

/// Blank tags under whitespace take the original whitespace so tabs stay aligned
fn keep_original_whitespace(line: &str, tags: &str) -> String {
    let kept: String = line
        .chars()
        .zip(tags.chars())
        .map(|(c, tag)| match tag {
            ' ' if c.is_whitespace() => c,
            tag => tag,
        })
        .collect();
    kept.trim_end().to_string()
}
