//! In-memory schedule store backing the normalizer and derivation tests.

use chrono::NaiveTime;
use std::cell::RefCell;
use std::collections::HashMap;

use super::{ClassroomRecord, ScheduleRecord, ScheduleStore, StoreError};
use crate::normalize::NewScheduleRow;

#[derive(Default)]
struct Inner {
    /// building id -> code
    buildings: Vec<String>,
    /// classroom id -> (building id, room number)
    classrooms: Vec<(String, String)>,
    schedules: Vec<NewScheduleRow>,
    hours: HashMap<String, (NaiveTime, NaiveTime)>,
    /// One entry per upsert call, e.g. "building:ECS" or "classroom:ECS/413".
    upsert_calls: Vec<String>,
    insert_batches: usize,
}

/// Single-threaded in-memory store. Ids are synthetic ("b0", "c1", ...).
#[derive(Default)]
pub(crate) struct MemoryStore {
    inner: RefCell<Inner>,
}

impl MemoryStore {
    pub fn schedules(&self) -> Vec<NewScheduleRow> {
        self.inner.borrow().schedules.clone()
    }

    pub fn upsert_calls(&self) -> Vec<String> {
        self.inner.borrow().upsert_calls.clone()
    }

    pub fn insert_batches(&self) -> usize {
        self.inner.borrow().insert_batches
    }

    pub fn hours(&self) -> HashMap<String, (NaiveTime, NaiveTime)> {
        self.inner.borrow().hours.clone()
    }

    /// Seeds one schedule row through the public trait surface.
    pub fn seed_schedule(
        &self,
        building_code: &str,
        room: &str,
        day_of_week: u8,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) {
        let building_id = self.upsert_building(building_code).unwrap();
        let classroom_id = self.upsert_classroom(&building_id, room, Some(0), 30).unwrap();
        self.insert_schedules(&[NewScheduleRow {
            classroom_id,
            semester: "Spring 2026".to_string(),
            day_of_week,
            start_time,
            end_time,
            course_code: "CECS 100".to_string(),
            course_title: "Seeded".to_string(),
            instructor_name: "Staff".to_string(),
        }])
        .unwrap();
    }
}

impl ScheduleStore for MemoryStore {
    fn upsert_building(&self, code: &str) -> Result<String, StoreError> {
        let mut inner = self.inner.borrow_mut();
        inner.upsert_calls.push(format!("building:{code}"));
        let index = match inner.buildings.iter().position(|c| c == code) {
            Some(index) => index,
            None => {
                inner.buildings.push(code.to_string());
                inner.buildings.len() - 1
            }
        };
        Ok(format!("b{index}"))
    }

    fn upsert_classroom(
        &self,
        building_id: &str,
        room_number: &str,
        _floor: Option<i32>,
        _capacity: i32,
    ) -> Result<String, StoreError> {
        let mut inner = self.inner.borrow_mut();
        let building_code = building_id
            .strip_prefix('b')
            .and_then(|i| i.parse::<usize>().ok())
            .and_then(|i| inner.buildings.get(i).cloned())
            .unwrap_or_else(|| building_id.to_string());
        inner
            .upsert_calls
            .push(format!("classroom:{building_code}/{room_number}"));

        let key = (building_id.to_string(), room_number.to_string());
        let index = match inner.classrooms.iter().position(|k| *k == key) {
            Some(index) => index,
            None => {
                inner.classrooms.push(key);
                inner.classrooms.len() - 1
            }
        };
        Ok(format!("c{index}"))
    }

    fn insert_schedules(&self, rows: &[NewScheduleRow]) -> Result<(), StoreError> {
        let mut inner = self.inner.borrow_mut();
        inner.insert_batches += 1;
        inner.schedules.extend_from_slice(rows);
        Ok(())
    }

    fn clear_semester(&self, semester: &str) -> Result<(), StoreError> {
        self.inner
            .borrow_mut()
            .schedules
            .retain(|row| row.semester != semester);
        Ok(())
    }

    fn classrooms(&self) -> Result<Vec<ClassroomRecord>, StoreError> {
        let inner = self.inner.borrow();
        Ok(inner
            .classrooms
            .iter()
            .enumerate()
            .map(|(index, (building_id, _))| ClassroomRecord {
                id: format!("c{index}"),
                building_id: building_id.clone(),
            })
            .collect())
    }

    fn schedules_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<ScheduleRecord>, StoreError> {
        let inner = self.inner.borrow();
        Ok(inner
            .schedules
            .iter()
            .skip(offset)
            .take(limit)
            .map(|row| ScheduleRecord {
                classroom_id: row.classroom_id.clone(),
                day_of_week: row.day_of_week,
                start_time: row.start_time,
                end_time: row.end_time,
            })
            .collect())
    }

    fn update_building_hours(
        &self,
        building_id: &str,
        open: NaiveTime,
        close: NaiveTime,
    ) -> Result<(), StoreError> {
        self.inner
            .borrow_mut()
            .hours
            .insert(building_id.to_string(), (open, close));
        Ok(())
    }
}
