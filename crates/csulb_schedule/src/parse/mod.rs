//! Schedule-text parsing: day codes, time ranges, and location tokens.
//!
//! The schedule pages express meeting patterns in compact, loosely-structured
//! text ("TuTh", "2:30-3:45PM", "ECS-413"). These parsers turn that text into
//! validated values; anything they cannot read becomes a [`ParseError`] that
//! the caller treats as a per-record skip.

mod days;
mod error;
mod location;
mod timerange;

pub use days::parse_days;
pub use error::ParseError;
pub use location::{
    classify_location, extract_floor, ExcludedReason, LocationOutcome, RoomLocation,
};
pub use timerange::parse_time_range;
