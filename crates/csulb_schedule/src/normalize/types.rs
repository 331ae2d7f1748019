//! Types for section normalization.

use chrono::NaiveTime;
use std::collections::BTreeSet;

use crate::parse::{ParseError, RoomLocation};

/// A section that passed every check: location resolved, days and times
/// parsed. Expands into one schedule row per weekday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSection {
    pub room: RoomLocation,
    /// Day-of-week integers in input order, 0 = Sunday.
    pub days: Vec<u8>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub course_code: String,
    pub course_title: String,
    pub instructor_name: String,
}

/// Why a section was skipped. Intentional exclusions and parse failures are
/// counted together in the summary but logged differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Online-only/off-campus/TBA placeholder instead of a room.
    NonPhysicalLocation,
    /// Days or time column holds a no-schedule sentinel (NA/TBA/empty).
    NoScheduledMeeting,
    /// Location token has no building-room separator.
    MalformedLocation,
    /// Outdoor/athletic venue.
    OutdoorVenue,
    /// Day-code or time-range text did not parse.
    UnparsableSchedule(ParseError),
}

/// The classification result for one raw section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionOutcome {
    Scheduled(NormalizedSection),
    Skipped(SkipReason),
    /// Location parsed but the building code is not in the directory;
    /// aggregated for the end-of-run report.
    UnknownBuilding(String),
}

/// A schedule row ready for insertion, carrying its persisted classroom id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScheduleRow {
    pub classroom_id: String,
    pub semester: String,
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub course_code: String,
    pub course_title: String,
    pub instructor_name: String,
}

/// End-of-run counters. In dry-run mode `rows_inserted` counts rows that
/// would have been inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rows_inserted: usize,
    pub sections_skipped: usize,
    pub buildings_seen: usize,
    pub classrooms_seen: usize,
    /// Every distinct building code that failed the directory lookup,
    /// exactly once, for operator curation.
    pub unknown_building_codes: BTreeSet<String>,
}
