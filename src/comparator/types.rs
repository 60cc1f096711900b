#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Unchanged,
    Inserted,
    Deleted,
    Replaced,
}

/// One aligned row of the side-by-side output
///
/// Line texts keep the differ's two-character prefix; a side that has no line
/// in this row is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonEvent {
    kind: EventKind,
    pub left: String,
    pub right: String,
    pub left_replace: Option<String>,
    pub right_replace: Option<String>,
}

impl ComparisonEvent {
    /// Which side or sides of the row carry a line
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn unchanged(line: String) -> Self {
        Self {
            kind: EventKind::Unchanged,
            left: line.clone(),
            right: line,
            left_replace: None,
            right_replace: None,
        }
    }

    pub fn inserted(line: String) -> Self {
        Self {
            kind: EventKind::Inserted,
            left: String::new(),
            right: line,
            left_replace: None,
            right_replace: None,
        }
    }

    pub fn deleted(line: String) -> Self {
        Self {
            kind: EventKind::Deleted,
            left: line,
            right: String::new(),
            left_replace: None,
            right_replace: None,
        }
    }

    pub fn replaced(
        left: String,
        right: String,
        left_replace: Option<String>,
        right_replace: Option<String>,
    ) -> Self {
        Self {
            kind: EventKind::Replaced,
            left,
            right,
            left_replace,
            right_replace,
        }
    }
}
