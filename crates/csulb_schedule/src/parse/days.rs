//! Day-code parsing for compact weekday strings like "MWF" or "TuTh".

use super::error::ParseError;

/// Day-abbreviation tokens, two-letter codes first so the longest-prefix
/// match prefers "Tu"/"Th" over a bare (invalid) "T". Values are
/// day-of-week integers with 0 = Sunday.
const DAY_TOKENS: [(&str, u8); 7] = [
    ("Su", 0),
    ("Tu", 2),
    ("Th", 4),
    ("Sa", 6),
    ("M", 1),
    ("W", 3),
    ("F", 5),
];

/// Parses a concatenated day string into day-of-week integers.
///
/// Scans left to right, taking the longest token that matches at each
/// position. Duplicate codes in the input are preserved in the output.
///
/// # Examples
/// * `"MWF"`  -> `[1, 3, 5]`
/// * `"TuTh"` -> `[2, 4]`
/// * `"Sa"`   -> `[6]`
pub fn parse_days(day_str: &str) -> Result<Vec<u8>, ParseError> {
    let mut days = Vec::new();
    let mut position = 0;

    while position < day_str.len() {
        let rest = &day_str[position..];
        match DAY_TOKENS.iter().find(|(token, _)| rest.starts_with(token)) {
            Some((token, day)) => {
                days.push(*day);
                position += token.len();
            }
            None => {
                return Err(ParseError::UnknownDayCode {
                    input: day_str.to_string(),
                    position,
                    found: rest.chars().next().unwrap_or(' '),
                });
            }
        }
    }

    Ok(days)
}
