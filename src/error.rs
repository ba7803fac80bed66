//! Configuration errors reported before a search or carve touches the grid.

use core::fmt;

/// Everything that can be rejected up front. Running out of frontier or being cancelled by an
/// observer are ordinary outcomes and live in [PathResult](crate::PathResult) instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A grid needs at least one row.
    InvalidRows {
        /// The rejected row count
        rows: usize,
    },

    /// A coordinate or cell id does not lie inside the grid.
    OutOfBounds {
        /// Row of the rejected position
        row: i64,
        /// Column of the rejected position
        col: i64,
        /// Row count of the grid it was checked against
        rows: usize,
    },

    /// Start and end designate the same cell.
    StartEqualsEnd {
        /// Row of the shared cell
        row: usize,
        /// Column of the shared cell
        col: usize,
    },

    /// A search was requested before both endpoints were placed.
    MissingEndpoint {
        /// Either "start" or "end"
        which: &'static str,
    },

    /// A text layout could not be turned into a square grid.
    InvalidLayout {
        /// Description of what is wrong with the layout
        reason: String,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRows { rows } => {
                write!(f, "Invalid row count {rows}: a grid needs at least one row")
            }
            Self::OutOfBounds { row, col, rows } => {
                write!(f, "Position ({row}, {col}) lies outside the {rows}x{rows} grid")
            }
            Self::StartEqualsEnd { row, col } => {
                write!(f, "Start and end are both ({row}, {col})")
            }
            Self::MissingEndpoint { which } => {
                write!(f, "No {which} cell has been placed")
            }
            Self::InvalidLayout { reason } => write!(f, "Invalid grid layout: {reason}"),
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let err = GridError::OutOfBounds {
            row: -1,
            col: 3,
            rows: 5,
        };
        assert_eq!(
            err.to_string(),
            "Position (-1, 3) lies outside the 5x5 grid"
        );
        let err = GridError::MissingEndpoint { which: "end" };
        assert_eq!(err.to_string(), "No end cell has been placed");
    }
}
