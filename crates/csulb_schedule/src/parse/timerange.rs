//! Time-range parsing for strings like "9-11:45AM" or "2:30-3:45PM".
//!
//! Schedule pages mark AM/PM exactly once, on the end time. The start time's
//! period has to be inferred: assume it matches the end, then pull it back
//! twelve hours if that assumption breaks the start < end ordering.

use chrono::NaiveTime;
use regex::Regex;
use std::sync::OnceLock;

use super::error::ParseError;

fn range_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{1,2})(?::(\d{2}))?-(\d{1,2})(?::(\d{2}))?(AM|PM)$").unwrap()
    })
}

/// Parses a schedule time range into a validated `(start, end)` pair.
///
/// Minutes default to 0 when omitted. The trailing AM/PM marker converts the
/// end hour directly (12 PM stays 12, 12 AM becomes 0, otherwise PM adds 12);
/// the start is tentatively placed in the same period and flipped to the
/// opposite one when that would put it at or after the end.
///
/// # Examples
/// * `"9-11:45AM"`   -> `(09:00, 11:45)`
/// * `"2:30-3:45PM"` -> `(14:30, 15:45)`
/// * `"11-12:50PM"`  -> `(11:00, 12:50)`
/// * `"7-9:45PM"`    -> `(19:00, 21:45)`
pub fn parse_time_range(time_str: &str) -> Result<(NaiveTime, NaiveTime), ParseError> {
    let caps = range_regex().captures(time_str.trim()).ok_or_else(|| {
        ParseError::MalformedTimeRange {
            input: time_str.to_string(),
        }
    })?;

    let group = |i: usize| -> i32 {
        caps.get(i)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };

    let mut start_h = group(1);
    let start_m = group(2);
    let mut end_h = group(3);
    let end_m = group(4);
    let pm = &caps[5] == "PM";

    // The marker applies definitively to the end time.
    if pm && end_h != 12 {
        end_h += 12;
    } else if !pm && end_h == 12 {
        end_h = 0;
    }

    // Tentatively put the start in the same period.
    if pm && start_h != 12 {
        start_h += 12;
    } else if !pm && start_h == 12 {
        start_h = 0;
    }

    // start >= end means the assumption was wrong: the start belongs to the
    // earlier half of the day. The tie case still flips.
    if start_h > end_h || (start_h == end_h && start_m >= end_m) {
        start_h -= 12;
    }

    let start = wall_clock(start_h, start_m, time_str)?;
    let end = wall_clock(end_h, end_m, time_str)?;
    Ok((start, end))
}

fn wall_clock(hour: i32, minute: i32, input: &str) -> Result<NaiveTime, ParseError> {
    u32::try_from(hour)
        .ok()
        .and_then(|h| NaiveTime::from_hms_opt(h, minute as u32, 0))
        .ok_or_else(|| ParseError::TimeOutOfRange {
            input: input.to_string(),
            hour,
            minute,
        })
}
