//! Persistence layer for the schedule dataset.
//!
//! The ingestion and derivation code talk to storage only through
//! [`ScheduleStore`], so the production Supabase client and the in-memory
//! store used by tests are interchangeable.

#[cfg(test)]
pub(crate) mod memory;
mod supabase;

pub use supabase::SupabaseStore;

use chrono::NaiveTime;
use serde::Deserialize;
use thiserror::Error;

use crate::normalize::NewScheduleRow;

/// Errors from the external table store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("store returned {status} for {context}: {body}")]
    UnexpectedResponse {
        context: String,
        status: u16,
        body: String,
    },

    #[error("store response for {context} carried no row id")]
    MissingId { context: String },

    #[error("could not decode store response for {context}: {source}")]
    Decode {
        context: String,
        source: serde_json::Error,
    },
}

/// A classroom row as read back from the store.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassroomRecord {
    pub id: String,
    pub building_id: String,
}

/// A schedule row as read back from the store for hours derivation.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleRecord {
    pub classroom_id: String,
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Table-oriented operations the ingestion pipeline needs.
///
/// Upserts are keyed (`buildings.code`, `classrooms.building_id+room_number`)
/// and return the persisted row id; callers memoize those ids per run rather
/// than re-upserting for every row that shares a classroom.
pub trait ScheduleStore {
    /// Upserts a building by code and returns its id.
    fn upsert_building(&self, code: &str) -> Result<String, StoreError>;

    /// Upserts a classroom by (building, room) and returns its id.
    fn upsert_classroom(
        &self,
        building_id: &str,
        room_number: &str,
        floor: Option<i32>,
        capacity: i32,
    ) -> Result<String, StoreError>;

    /// Bulk-inserts a batch of schedule rows.
    fn insert_schedules(&self, rows: &[NewScheduleRow]) -> Result<(), StoreError>;

    /// Deletes schedule rows for one semester. Never a full-table wipe.
    fn clear_semester(&self, semester: &str) -> Result<(), StoreError>;

    /// Reads the classroom -> building index.
    fn classrooms(&self) -> Result<Vec<ClassroomRecord>, StoreError>;

    /// Reads one page of schedule rows; a short page marks the end.
    fn schedules_page(&self, offset: usize, limit: usize)
        -> Result<Vec<ScheduleRecord>, StoreError>;

    /// Writes a building's full weekday-hours envelope.
    fn update_building_hours(
        &self,
        building_id: &str,
        open: NaiveTime,
        close: NaiveTime,
    ) -> Result<(), StoreError>;
}
