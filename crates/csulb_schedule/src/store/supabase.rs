//! Supabase (PostgREST) implementation of the schedule store.

use chrono::NaiveTime;
use reqwest::blocking::{Client, Response};
use serde::Serialize;
use serde_json::json;

use super::{ClassroomRecord, ScheduleRecord, ScheduleStore, StoreError};
use crate::config::StoreConfig;
use crate::normalize::NewScheduleRow;

const TIME_FORMAT: &str = "%H:%M:%S";

/// REST client for the Supabase tables (`buildings`, `classrooms`,
/// `class_schedules`).
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    service_key: String,
}

/// Wire shape for one `class_schedules` insert.
#[derive(Serialize)]
struct ScheduleInsert<'a> {
    classroom_id: &'a str,
    semester: &'a str,
    day_of_week: u8,
    start_time: String,
    end_time: String,
    course_code: &'a str,
    course_title: &'a str,
    instructor_name: &'a str,
}

impl SupabaseStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            service_key: config.service_role_key,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authed(&self, request: reqwest::blocking::RequestBuilder) -> reqwest::blocking::RequestBuilder {
        request
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    /// Upserts one row and returns the id the store assigned (or kept).
    fn upsert_returning_id(
        &self,
        table: &str,
        on_conflict: &str,
        body: serde_json::Value,
    ) -> Result<String, StoreError> {
        let response = self
            .authed(self.client.post(self.table_url(table)))
            .query(&[("on_conflict", on_conflict)])
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&body)
            .send()?;
        let rows: Vec<serde_json::Value> = read_json(response, table)?;

        rows.first()
            .and_then(|row| row.get("id"))
            .and_then(|id| {
                // uuid keys come back as strings, serial keys as numbers
                id.as_str()
                    .map(str::to_string)
                    .or_else(|| id.as_i64().map(|n| n.to_string()))
            })
            .ok_or_else(|| StoreError::MissingId {
                context: table.to_string(),
            })
    }

    fn expect_success(response: Response, context: &str) -> Result<(), StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(StoreError::UnexpectedResponse {
            context: context.to_string(),
            status: status.as_u16(),
            body: response.text().unwrap_or_default(),
        })
    }
}

fn read_json<T: serde::de::DeserializeOwned>(
    response: Response,
    context: &str,
) -> Result<T, StoreError> {
    let status = response.status();
    let body = response.text()?;
    if !status.is_success() {
        return Err(StoreError::UnexpectedResponse {
            context: context.to_string(),
            status: status.as_u16(),
            body,
        });
    }
    serde_json::from_str(&body).map_err(|source| StoreError::Decode {
        context: context.to_string(),
        source,
    })
}

impl ScheduleStore for SupabaseStore {
    fn upsert_building(&self, code: &str) -> Result<String, StoreError> {
        self.upsert_returning_id("buildings", "code", json!({ "code": code }))
    }

    fn upsert_classroom(
        &self,
        building_id: &str,
        room_number: &str,
        floor: Option<i32>,
        capacity: i32,
    ) -> Result<String, StoreError> {
        self.upsert_returning_id(
            "classrooms",
            "building_id,room_number",
            json!({
                "building_id": building_id,
                "room_number": room_number,
                "floor": floor,
                "capacity": capacity,
            }),
        )
    }

    fn insert_schedules(&self, rows: &[NewScheduleRow]) -> Result<(), StoreError> {
        let payload: Vec<ScheduleInsert> = rows
            .iter()
            .map(|row| ScheduleInsert {
                classroom_id: &row.classroom_id,
                semester: &row.semester,
                day_of_week: row.day_of_week,
                start_time: row.start_time.format(TIME_FORMAT).to_string(),
                end_time: row.end_time.format(TIME_FORMAT).to_string(),
                course_code: &row.course_code,
                course_title: &row.course_title,
                instructor_name: &row.instructor_name,
            })
            .collect();

        let response = self
            .authed(self.client.post(self.table_url("class_schedules")))
            .header("Prefer", "return=minimal")
            .json(&payload)
            .send()?;
        Self::expect_success(response, "class_schedules insert")
    }

    fn clear_semester(&self, semester: &str) -> Result<(), StoreError> {
        let response = self
            .authed(self.client.delete(self.table_url("class_schedules")))
            .query(&[("semester", format!("eq.{semester}"))])
            .send()?;
        Self::expect_success(response, "class_schedules clear")
    }

    fn classrooms(&self) -> Result<Vec<ClassroomRecord>, StoreError> {
        let response = self
            .authed(self.client.get(self.table_url("classrooms")))
            .query(&[("select", "id,building_id"), ("limit", "10000")])
            .send()?;
        read_json(response, "classrooms")
    }

    fn schedules_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<ScheduleRecord>, StoreError> {
        let response = self
            .authed(self.client.get(self.table_url("class_schedules")))
            .query(&[("select", "classroom_id,day_of_week,start_time,end_time")])
            .header("Range-Unit", "items")
            .header("Range", format!("{}-{}", offset, offset + limit - 1))
            .send()?;
        read_json(response, "class_schedules page")
    }

    fn update_building_hours(
        &self,
        building_id: &str,
        open: NaiveTime,
        close: NaiveTime,
    ) -> Result<(), StoreError> {
        let response = self
            .authed(self.client.patch(self.table_url("buildings")))
            .query(&[("id", format!("eq.{building_id}"))])
            .header("Prefer", "return=minimal")
            .json(&json!({
                "weekday_open": open.format(TIME_FORMAT).to_string(),
                "weekday_close": close.format(TIME_FORMAT).to_string(),
            }))
            .send()?;
        Self::expect_success(response, "buildings hours update")
    }
}
