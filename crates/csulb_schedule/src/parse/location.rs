//! Location classification for "BUILDING-ROOM" tokens.

use regex::Regex;
use std::sync::OnceLock;

use crate::directory::BuildingDirectory;

/// A physical classroom location split out of a raw token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomLocation {
    pub building_code: String,
    pub room_number: String,
    /// Inferred from the room number; `None` when the room has no digits.
    /// Approximate only, see [`extract_floor`].
    pub floor: Option<i32>,
}

/// Why a location token was excluded from ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExcludedReason {
    /// Online-only, off-campus, TBA, or similar non-physical placeholder.
    NonPhysical,
    /// No separator between building and room; nothing to split.
    NoSeparator,
    /// Outdoor or athletic venue, not usable as a study space.
    OutdoorVenue,
}

/// The result of classifying one raw location token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationOutcome {
    /// A classroom in a building the directory knows about.
    Room(RoomLocation),
    /// Intentionally skipped; not an error.
    Excluded(ExcludedReason),
    /// Well-formed token, but the building code is not in the directory.
    /// Reported separately so an operator can extend the directory.
    UnknownBuilding(String),
}

/// Splits and validates a raw location token against the building directory.
pub fn classify_location(raw: &str, directory: &BuildingDirectory) -> LocationOutcome {
    let token = raw.trim();

    // Checked before splitting: several non-physical placeholders (e.g.
    // "ONLINE-ONLY") contain the separator themselves.
    if directory.is_non_physical(token) {
        return LocationOutcome::Excluded(ExcludedReason::NonPhysical);
    }

    let Some((building_code, room_number)) = token.split_once('-') else {
        return LocationOutcome::Excluded(ExcludedReason::NoSeparator);
    };

    if directory.is_outdoor_venue(building_code) {
        return LocationOutcome::Excluded(ExcludedReason::OutdoorVenue);
    }

    if !directory.contains(building_code) {
        return LocationOutcome::UnknownBuilding(building_code.to_string());
    }

    LocationOutcome::Room(RoomLocation {
        building_code: building_code.to_string(),
        room_number: room_number.to_string(),
        floor: extract_floor(room_number),
    })
}

fn digit_run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").unwrap())
}

/// Infers a floor from a room number: "413" -> 4, "051" -> 0.
///
/// Takes the first run of digits; values below 100 mean ground floor,
/// otherwise the digits before the last two are read as the floor. This is a
/// guess based on the common room-numbering convention and can be wrong for
/// irregularly numbered rooms; treat it as approximate, not authoritative.
pub fn extract_floor(room_number: &str) -> Option<i32> {
    let digits = digit_run_regex().find(room_number)?;
    let num: i32 = digits.as_str().parse().ok()?;
    if num < 100 {
        Some(0)
    } else {
        Some(num / 100)
    }
}
