//! Building operating-hours derivation.
//!
//! A building is assumed to open at its first weekday class and close at its
//! last. The envelope is recomputed in full from the current schedule
//! snapshot on every pass, so re-running with unchanged data writes the same
//! hours again.

use chrono::NaiveTime;
use std::collections::HashMap;
use tracing::info;

use crate::store::{ScheduleStore, StoreError};

/// Rows fetched per page when reading back the schedule table.
const PAGE_SIZE: usize = 1000;

/// The derived weekday envelope for one building.
struct Envelope {
    open: NaiveTime,
    close: NaiveTime,
}

/// Recomputes weekday hours for every building with at least one weekday
/// class and writes them back. Weekend rows (Sunday/Saturday) never widen an
/// envelope, and buildings with only weekend rows are left untouched.
///
/// Returns the number of buildings updated.
pub fn derive_building_hours(store: &dyn ScheduleStore) -> Result<usize, StoreError> {
    let classroom_to_building: HashMap<String, String> = store
        .classrooms()?
        .into_iter()
        .map(|classroom| (classroom.id, classroom.building_id))
        .collect();
    info!(classrooms = classroom_to_building.len(), "loaded classroom index");

    let mut schedules = Vec::new();
    let mut offset = 0;
    loop {
        let page = store.schedules_page(offset, PAGE_SIZE)?;
        let page_len = page.len();
        schedules.extend(page);
        if page_len < PAGE_SIZE {
            break;
        }
        offset += PAGE_SIZE;
    }
    info!(schedules = schedules.len(), "loaded schedule snapshot");

    let mut envelopes: HashMap<String, Envelope> = HashMap::new();
    for row in &schedules {
        // Weekends are assumed fully closed.
        if row.day_of_week == 0 || row.day_of_week == 6 {
            continue;
        }
        let Some(building_id) = classroom_to_building.get(&row.classroom_id) else {
            continue;
        };
        envelopes
            .entry(building_id.clone())
            .and_modify(|envelope| {
                envelope.open = envelope.open.min(row.start_time);
                envelope.close = envelope.close.max(row.end_time);
            })
            .or_insert(Envelope {
                open: row.start_time,
                close: row.end_time,
            });
    }

    for (building_id, envelope) in &envelopes {
        store.update_building_hours(building_id, envelope.open, envelope.close)?;
    }
    info!(buildings = envelopes.len(), "updated building hours");

    Ok(envelopes.len())
}
