//! Ingestion of CSULB class-schedule pages into a normalized dataset of
//! buildings, classrooms, and recurring weekly time slots, used to back a
//! study-space availability app.
//!
//! The pipeline: scraped section rows ([`scrape`]) are normalized
//! ([`normalize`]) using the schedule-text parsers ([`parse`]) and the static
//! building directory ([`directory`]), written through the [`store`] layer,
//! and finally each building's weekday operating hours are derived from the
//! persisted rows ([`hours`]).

pub mod config;
pub mod directory;
pub mod hours;
pub mod normalize;
pub mod parse;
pub mod scrape;
pub mod store;
