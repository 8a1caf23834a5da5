use serde::Serialize;
use std::fmt;

/// A non-fatal anomaly found while normalizing. `line` is the 1-based
/// source line of the record concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Row matched none of the line/station/benefit predicates and was dropped.
    Unclassified { line: usize },
    /// Numeric column did not hold an integer; the field carries `None`.
    InvalidNumber {
        line: usize,
        column: String,
        value: String,
    },
    /// Benefit points at a station id that no station has; it was dropped.
    DanglingBenefit {
        line: usize,
        benefit_id: String,
        station_id: String,
    },
    /// Benefit points at a station id shared by several stations; it was
    /// attached to each of them.
    AmbiguousBenefit {
        line: usize,
        benefit_id: String,
        station_id: String,
        matches: usize,
    },
    DuplicateStation { line: usize, station_id: String },
    DuplicateLine { line: usize, line_id: String },
    /// Station references a line id that no line has.
    UnknownLine {
        line: usize,
        station_id: String,
        line_id: String,
    },
    InvalidColor {
        line: usize,
        line_id: String,
        color: String,
    },
}

impl Diagnostic {
    pub fn line(&self) -> usize {
        match self {
            Diagnostic::Unclassified { line }
            | Diagnostic::InvalidNumber { line, .. }
            | Diagnostic::DanglingBenefit { line, .. }
            | Diagnostic::AmbiguousBenefit { line, .. }
            | Diagnostic::DuplicateStation { line, .. }
            | Diagnostic::DuplicateLine { line, .. }
            | Diagnostic::UnknownLine { line, .. }
            | Diagnostic::InvalidColor { line, .. } => *line,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Unclassified { line } => {
                write!(f, "line {}: row is not a line, station or benefit", line)
            }
            Diagnostic::InvalidNumber {
                line,
                column,
                value,
            } => write!(f, "line {}: `{}` is not an integer: {:?}", line, column, value),
            Diagnostic::DanglingBenefit {
                line,
                benefit_id,
                station_id,
            } => write!(
                f,
                "line {}: benefit `{}` references unknown station `{}`",
                line, benefit_id, station_id
            ),
            Diagnostic::AmbiguousBenefit {
                line,
                benefit_id,
                station_id,
                matches,
            } => write!(
                f,
                "line {}: benefit `{}` matches {} stations with id `{}`",
                line, benefit_id, matches, station_id
            ),
            Diagnostic::DuplicateStation { line, station_id } => {
                write!(f, "line {}: duplicate station id `{}`", line, station_id)
            }
            Diagnostic::DuplicateLine { line, line_id } => {
                write!(f, "line {}: duplicate line id `{}`", line, line_id)
            }
            Diagnostic::UnknownLine {
                line,
                station_id,
                line_id,
            } => write!(
                f,
                "line {}: station `{}` references unknown line `{}`",
                line, station_id, line_id
            ),
            Diagnostic::InvalidColor {
                line,
                line_id,
                color,
            } => write!(
                f,
                "line {}: line `{}` has invalid color {:?}",
                line, line_id, color
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Stable sort by source line.
    pub(crate) fn sort_by_line(&mut self) {
        self.0.sort_by_key(Diagnostic::line);
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.0
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
