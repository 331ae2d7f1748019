//! Error types for schedule-text parsing.

use thiserror::Error;

/// Errors produced while parsing day-code or time-range text.
///
/// These are always per-record failures: the offending section is skipped and
/// the run continues.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No day abbreviation matched at this position in the day string.
    #[error("unknown day code '{found}' at position {position} in \"{input}\"")]
    UnknownDayCode {
        input: String,
        position: usize,
        found: char,
    },

    /// The time string does not match the `<start>-<end><AM|PM>` grammar.
    #[error("cannot parse time range: \"{input}\"")]
    MalformedTimeRange { input: String },

    /// The time string matched the grammar but a component is not a valid
    /// wall-clock time (e.g. hour 13 with a PM marker).
    #[error("time out of range in \"{input}\": {hour}:{minute:02}")]
    TimeOutOfRange {
        input: String,
        hour: i32,
        minute: i32,
    },
}
