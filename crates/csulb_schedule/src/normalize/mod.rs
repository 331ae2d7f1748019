//! Section normalization: turning raw scraped rows into schedule rows.
//!
//! Classification ([`classify_section`]) is a pure function shared by dry-run
//! and write mode, so the two can never disagree on what a section means.
//! The [`Ingestor`] drives it across a run, owning the per-run identity
//! caches and the insert batch.

mod types;

pub use types::{NewScheduleRow, NormalizedSection, RunSummary, SectionOutcome, SkipReason};

use std::collections::HashMap;
use tracing::warn;

use crate::directory::BuildingDirectory;
use crate::parse::{
    classify_location, parse_days, parse_time_range, ExcludedReason, LocationOutcome, RoomLocation,
};
use crate::scrape::RawSection;
use crate::store::{ScheduleStore, StoreError};

/// Schedule rows accumulated before each bulk insert.
pub const BATCH_SIZE: usize = 200;

/// Schedule pages carry no capacity data; every classroom gets this
/// placeholder until someone surveys the room.
pub const DEFAULT_CAPACITY: i32 = 30;

fn is_no_schedule(text: &str) -> bool {
    matches!(text.trim(), "NA" | "TBA" | "")
}

/// Classifies one raw section without touching storage.
///
/// Checks run in a fixed order: non-physical location, no-schedule sentinel
/// (before any structural parse), location shape and exclusions, directory
/// lookup, then day and time parsing.
pub fn classify_section(section: &RawSection, directory: &BuildingDirectory) -> SectionOutcome {
    if directory.is_non_physical(&section.location) {
        return SectionOutcome::Skipped(SkipReason::NonPhysicalLocation);
    }

    if is_no_schedule(&section.days) || is_no_schedule(&section.time) {
        return SectionOutcome::Skipped(SkipReason::NoScheduledMeeting);
    }

    let room = match classify_location(&section.location, directory) {
        LocationOutcome::Room(room) => room,
        LocationOutcome::UnknownBuilding(code) => return SectionOutcome::UnknownBuilding(code),
        LocationOutcome::Excluded(ExcludedReason::NonPhysical) => {
            return SectionOutcome::Skipped(SkipReason::NonPhysicalLocation);
        }
        LocationOutcome::Excluded(ExcludedReason::NoSeparator) => {
            return SectionOutcome::Skipped(SkipReason::MalformedLocation);
        }
        LocationOutcome::Excluded(ExcludedReason::OutdoorVenue) => {
            return SectionOutcome::Skipped(SkipReason::OutdoorVenue);
        }
    };

    let days = match parse_days(&section.days) {
        Ok(days) => days,
        Err(err) => return SectionOutcome::Skipped(SkipReason::UnparsableSchedule(err)),
    };
    let (start_time, end_time) = match parse_time_range(&section.time) {
        Ok(times) => times,
        Err(err) => return SectionOutcome::Skipped(SkipReason::UnparsableSchedule(err)),
    };

    SectionOutcome::Scheduled(NormalizedSection {
        room,
        days,
        start_time,
        end_time,
        course_code: section.course_code.clone(),
        course_title: section.course_title.clone(),
        instructor_name: section.instructor.clone(),
    })
}

/// Processes raw sections for one run.
///
/// In write mode (`store` is `Some`) buildings and classrooms are upserted at
/// most once per key, schedule rows are batched and bulk-inserted. In dry-run
/// mode (`store` is `None`) everything is classified and counted identically
/// but no write can happen, because there is nothing to write to.
pub struct Ingestor<'a> {
    directory: &'a BuildingDirectory,
    store: Option<&'a dyn ScheduleStore>,
    semester: String,
    /// building code -> persisted id (None in dry-run mode)
    building_ids: HashMap<String, Option<String>>,
    /// (building code, room number) -> persisted id (None in dry-run mode)
    classroom_ids: HashMap<(String, String), Option<String>>,
    batch: Vec<NewScheduleRow>,
    summary: RunSummary,
}

impl<'a> Ingestor<'a> {
    pub fn new(
        directory: &'a BuildingDirectory,
        store: Option<&'a dyn ScheduleStore>,
        semester: &str,
    ) -> Self {
        Self {
            directory,
            store,
            semester: semester.to_string(),
            building_ids: HashMap::new(),
            classroom_ids: HashMap::new(),
            batch: Vec::new(),
            summary: RunSummary::default(),
        }
    }

    /// Classifies one section and routes it: emitted rows, a counted skip,
    /// or the unknown-building bucket. A malformed row never aborts the run;
    /// only store failures propagate.
    pub fn ingest(&mut self, section: &RawSection) -> Result<(), StoreError> {
        match classify_section(section, self.directory) {
            SectionOutcome::Scheduled(normalized) => self.emit(normalized)?,
            SectionOutcome::Skipped(reason) => {
                if let SkipReason::UnparsableSchedule(err) = &reason {
                    warn!(%err, ?section, "skipping section with unparsable schedule");
                }
                self.summary.sections_skipped += 1;
            }
            SectionOutcome::UnknownBuilding(code) => {
                self.summary.sections_skipped += 1;
                self.summary.unknown_building_codes.insert(code);
            }
        }
        Ok(())
    }

    /// Flushes any partial batch and returns the run summary.
    pub fn finish(mut self) -> Result<RunSummary, StoreError> {
        self.flush()?;
        self.summary.buildings_seen = self.building_ids.len();
        self.summary.classrooms_seen = self.classroom_ids.len();
        Ok(self.summary)
    }

    fn emit(&mut self, normalized: NormalizedSection) -> Result<(), StoreError> {
        let classroom_id = self.classroom_identity(&normalized.room)?;

        for &day in &normalized.days {
            self.summary.rows_inserted += 1;
            if let Some(id) = &classroom_id {
                self.batch.push(NewScheduleRow {
                    classroom_id: id.clone(),
                    semester: self.semester.clone(),
                    day_of_week: day,
                    start_time: normalized.start_time,
                    end_time: normalized.end_time,
                    course_code: normalized.course_code.clone(),
                    course_title: normalized.course_title.clone(),
                    instructor_name: normalized.instructor_name.clone(),
                });
            }
        }

        if self.batch.len() >= BATCH_SIZE {
            self.flush()?;
        }
        Ok(())
    }

    fn building_identity(&mut self, code: &str) -> Result<Option<String>, StoreError> {
        if let Some(id) = self.building_ids.get(code) {
            return Ok(id.clone());
        }
        let id = match self.store {
            Some(store) => Some(store.upsert_building(code)?),
            None => None,
        };
        self.building_ids.insert(code.to_string(), id.clone());
        Ok(id)
    }

    fn classroom_identity(&mut self, room: &RoomLocation) -> Result<Option<String>, StoreError> {
        let key = (room.building_code.clone(), room.room_number.clone());
        if let Some(id) = self.classroom_ids.get(&key) {
            return Ok(id.clone());
        }
        let building_id = self.building_identity(&room.building_code)?;
        let id = match (self.store, building_id) {
            (Some(store), Some(building_id)) => Some(store.upsert_classroom(
                &building_id,
                &room.room_number,
                room.floor,
                DEFAULT_CAPACITY,
            )?),
            _ => None,
        };
        self.classroom_ids.insert(key, id.clone());
        Ok(id)
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        if self.batch.is_empty() {
            return Ok(());
        }
        if let Some(store) = self.store {
            store.insert_schedules(&self.batch)?;
        }
        self.batch.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::ParseError;
    use crate::store::memory::MemoryStore;
    use chrono::NaiveTime;
    use std::collections::BTreeSet;

    fn section(location: &str, days: &str, time: &str) -> RawSection {
        RawSection {
            course_code: "CECS 491A".to_string(),
            course_title: "Senior Design I".to_string(),
            days: days.to_string(),
            time: time.to_string(),
            location: location.to_string(),
            instructor: "Yu".to_string(),
        }
    }

    fn t(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_classify_scheduled_section() {
        let directory = BuildingDirectory::new();
        match classify_section(&section("ECS-413", "MWF", "9-11:45AM"), &directory) {
            SectionOutcome::Scheduled(normalized) => {
                assert_eq!(normalized.days, vec![1, 3, 5]);
                assert_eq!(normalized.start_time, t(9, 0));
                assert_eq!(normalized.end_time, t(11, 45));
                assert_eq!(normalized.room.building_code, "ECS");
                assert_eq!(normalized.room.floor, Some(4));
            }
            other => panic!("expected a schedule, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_skip_reasons() {
        let directory = BuildingDirectory::new();
        let cases = [
            (section("ONLINE-ONLY", "MWF", "9-11:45AM"), SkipReason::NonPhysicalLocation),
            (section("ECS-413", "TBA", "9-11:45AM"), SkipReason::NoScheduledMeeting),
            (section("ECS-413", "MWF", "NA"), SkipReason::NoScheduledMeeting),
            (section("ECS413", "MWF", "9-11:45AM"), SkipReason::MalformedLocation),
            (section("FLD-2", "MWF", "9-11:45AM"), SkipReason::OutdoorVenue),
        ];
        for (raw, reason) in cases {
            assert_eq!(
                classify_section(&raw, &directory),
                SectionOutcome::Skipped(reason.clone()),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn test_classify_parse_failures_skip_not_panic() {
        let directory = BuildingDirectory::new();
        assert!(matches!(
            classify_section(&section("ECS-413", "MXF", "9-11:45AM"), &directory),
            SectionOutcome::Skipped(SkipReason::UnparsableSchedule(
                ParseError::UnknownDayCode { .. }
            ))
        ));
        assert!(matches!(
            classify_section(&section("ECS-413", "MWF", "morning"), &directory),
            SectionOutcome::Skipped(SkipReason::UnparsableSchedule(
                ParseError::MalformedTimeRange { .. }
            ))
        ));
    }

    #[test]
    fn test_end_to_end_scenario() {
        let directory = BuildingDirectory::new();
        let store = MemoryStore::default();
        let mut ingestor = Ingestor::new(&directory, Some(&store), "Spring 2026");

        for raw in [
            section("ECS-413", "MWF", "9-11:45AM"),
            section("ONLINE-ONLY", "TBA", "TBA"),
            section("ZZZZ-100", "MWF", "9-11:45AM"),
        ] {
            ingestor.ingest(&raw).unwrap();
        }
        let summary = ingestor.finish().unwrap();

        assert_eq!(summary.rows_inserted, 3);
        assert_eq!(summary.sections_skipped, 2);
        assert_eq!(
            summary.unknown_building_codes,
            BTreeSet::from(["ZZZZ".to_string()])
        );

        let rows = store.schedules();
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows.iter().map(|r| r.day_of_week).collect::<Vec<_>>(),
            vec![1, 3, 5]
        );
        for row in &rows {
            assert_eq!(row.start_time, t(9, 0));
            assert_eq!(row.end_time, t(11, 45));
            assert_eq!(row.semester, "Spring 2026");
        }
    }

    #[test]
    fn test_dry_run_counts_without_store() {
        let directory = BuildingDirectory::new();
        let mut ingestor = Ingestor::new(&directory, None, "Spring 2026");

        for raw in [
            section("ECS-413", "MWF", "9-11:45AM"),
            section("ECS-413", "TuTh", "2:30-3:45PM"),
            section("LIB-051", "Sa", "10-11:50AM"),
            section("ONLINE-ONLY", "TBA", "TBA"),
        ] {
            ingestor.ingest(&raw).unwrap();
        }
        let summary = ingestor.finish().unwrap();

        assert_eq!(summary.rows_inserted, 6);
        assert_eq!(summary.sections_skipped, 1);
        assert_eq!(summary.buildings_seen, 2);
        assert_eq!(summary.classrooms_seen, 2);
    }

    #[test]
    fn test_upserts_memoized_per_key() {
        let directory = BuildingDirectory::new();
        let store = MemoryStore::default();
        let mut ingestor = Ingestor::new(&directory, Some(&store), "Spring 2026");

        // Three sections across two rooms of one building.
        for raw in [
            section("ECS-413", "MWF", "9-11:45AM"),
            section("ECS-413", "TuTh", "2:30-3:45PM"),
            section("ECS-302", "F", "8-8:50AM"),
        ] {
            ingestor.ingest(&raw).unwrap();
        }
        ingestor.finish().unwrap();

        assert_eq!(
            store.upsert_calls(),
            vec![
                "building:ECS".to_string(),
                "classroom:ECS/413".to_string(),
                "classroom:ECS/302".to_string(),
            ]
        );
    }

    #[test]
    fn test_same_section_twice_is_idempotent_across_runs() {
        let directory = BuildingDirectory::new();
        let raw = section("ECS-413", "TuTh", "2:30-3:45PM");

        let run = || {
            let store = MemoryStore::default();
            let mut ingestor = Ingestor::new(&directory, Some(&store), "Spring 2026");
            ingestor.ingest(&raw).unwrap();
            ingestor.ingest(&raw).unwrap();
            let summary = ingestor.finish().unwrap();
            (store.schedules(), store.upsert_calls(), summary)
        };

        let (rows_a, upserts_a, summary_a) = run();
        let (rows_b, upserts_b, summary_b) = run();
        assert_eq!(rows_a, rows_b);
        assert_eq!(upserts_a, upserts_b);
        assert_eq!(summary_a, summary_b);
        // The repeated section re-emits rows but never re-upserts identities.
        assert_eq!(rows_a.len(), 4);
        assert_eq!(upserts_a.len(), 2);
    }

    #[test]
    fn test_unknown_codes_deduplicated() {
        let directory = BuildingDirectory::new();
        let mut ingestor = Ingestor::new(&directory, None, "Spring 2026");

        for _ in 0..3 {
            ingestor
                .ingest(&section("ZZZZ-100", "MWF", "9-11:45AM"))
                .unwrap();
        }
        ingestor.ingest(&section("QQQ-1", "M", "9-9:50AM")).unwrap();
        let summary = ingestor.finish().unwrap();

        assert_eq!(summary.sections_skipped, 4);
        assert_eq!(
            summary.unknown_building_codes,
            BTreeSet::from(["QQQ".to_string(), "ZZZZ".to_string()])
        );
    }

    #[test]
    fn test_final_partial_batch_flushed() {
        let directory = BuildingDirectory::new();
        let store = MemoryStore::default();
        let mut ingestor = Ingestor::new(&directory, Some(&store), "Spring 2026");

        ingestor
            .ingest(&section("ECS-413", "MWF", "9-11:45AM"))
            .unwrap();
        // Nothing hits the store until the batch fills or the run finishes.
        assert_eq!(store.insert_batches(), 0);
        ingestor.finish().unwrap();
        assert_eq!(store.insert_batches(), 1);
        assert_eq!(store.schedules().len(), 3);
    }
}
