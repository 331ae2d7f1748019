//! Types for raw scraped schedule data.

/// One raw row from a subject page's section table, before any
/// normalization. Text is exactly as printed on the page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawSection {
    pub course_code: String,
    pub course_title: String,
    /// Compact day string, e.g. "MWF" or "TuTh"; may be "TBA"/"NA"/empty.
    pub days: String,
    /// Compact time range, e.g. "2:30-3:45PM"; may be "TBA"/"NA"/empty.
    pub time: String,
    /// "BUILDING-ROOM" token, e.g. "ECS-413", or a placeholder like
    /// "ONLINE-ONLY".
    pub location: String,
    pub instructor: String,
}
