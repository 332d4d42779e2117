//! Error types for layout calculation and roster bookkeeping.

use thiserror::Error;

/// Errors produced while computing a participant grid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// More participants than the template table can place.
    #[error("unsupported participant count {count}: at most {max} participants can be laid out")]
    UnsupportedCount {
        /// Requested participant count.
        count: usize,
        /// Largest count the active template table supports.
        max: usize,
    },

    /// A negative or non-finite count, dimension or padding.
    #[error("invalid {field}: {value}")]
    InvalidInput {
        /// Name of the offending argument.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A custom template table breaks the column-sum or positive-column rule.
    #[error("invalid template for {} participant(s): {reason}", .index + 1)]
    InvalidTemplate {
        /// Zero-based table index (participant count minus one).
        index: usize,
        /// What is wrong with the entry.
        reason: String,
    },
}

/// Errors produced while applying stage events to a [`Roster`](crate::roster::Roster).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// An event referenced a participant the roster has never seen.
    #[error("participant {0:?} is not in the roster")]
    UnknownParticipant(String),
}
