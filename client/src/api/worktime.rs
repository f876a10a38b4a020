//! Time-clock endpoints

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shared::models::{PunchKind, TimesheetEntry, WorkSite};
use shared::types::GpsCoordinates;

use super::{decode, ApiClient, SubmissionStamp};
use crate::error::AppResult;

#[derive(Debug, Deserialize)]
struct SiteRow {
    #[serde(rename = "siteId")]
    site_id: i64,
    name: String,
    latitude: Decimal,
    longitude: Decimal,
    #[serde(rename = "radiusM", default)]
    radius_m: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TimesheetRow {
    #[serde(rename = "workDate")]
    work_date: NaiveDate,
    #[serde(rename = "clockIn")]
    clock_in: Option<NaiveTime>,
    #[serde(rename = "clockOut")]
    clock_out: Option<NaiveTime>,
    #[serde(rename = "siteName")]
    site_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PunchCreatedResponse {
    #[serde(rename = "punchId")]
    punch_id: i64,
}

/// Punch request body
#[derive(Debug, Clone, Serialize)]
pub struct PunchRequest {
    pub date: String,
    pub time: String,
    pub kind: PunchKind,
    pub latitude: Decimal,
    pub longitude: Decimal,
    #[serde(rename = "siteId", skip_serializing_if = "Option::is_none")]
    pub site_id: Option<i64>,
    #[serde(rename = "updatedBy")]
    pub updated_by: String,
}

/// Assemble a punch submission
pub fn build_punch_payload(
    kind: PunchKind,
    position: &GpsCoordinates,
    site_id: Option<i64>,
    stamp: &SubmissionStamp,
) -> PunchRequest {
    PunchRequest {
        date: stamp.date_string(),
        time: stamp.time_string(),
        kind,
        latitude: position.latitude,
        longitude: position.longitude,
        site_id,
        updated_by: stamp.updated_by.clone(),
    }
}

impl ApiClient {
    /// Work sites staff may punch from. A site that defines no radius of
    /// its own takes `default_radius_m`.
    pub async fn fetch_work_sites(
        &self,
        token: &str,
        default_radius_m: f64,
    ) -> AppResult<Vec<WorkSite>> {
        let url = format!("{}/worktime/sites", self.base_url);
        let response = self.http.get(&url).bearer_auth(token).send().await?;
        let rows: Vec<SiteRow> = decode(response).await?;

        Ok(rows
            .into_iter()
            .map(|r| WorkSite {
                site_id: r.site_id,
                name: r.name,
                center: GpsCoordinates::new(r.latitude, r.longitude),
                radius_m: r.radius_m.unwrap_or(default_radius_m),
            })
            .collect())
    }

    /// Record a clock-in or clock-out and return the punch id
    pub async fn submit_punch(&self, token: &str, punch: &PunchRequest) -> AppResult<i64> {
        let url = format!("{}/worktime/punches", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(punch)
            .send()
            .await?;
        let body: PunchCreatedResponse = decode(response).await?;
        Ok(body.punch_id)
    }

    /// Timesheet rows for one day
    pub async fn fetch_timesheet(
        &self,
        token: &str,
        date: NaiveDate,
    ) -> AppResult<Vec<TimesheetEntry>> {
        let url = format!("{}/worktime/timesheet?date={}", self.base_url, date);
        let response = self.http.get(&url).bearer_auth(token).send().await?;
        let rows: Vec<TimesheetRow> = decode(response).await?;

        Ok(rows
            .into_iter()
            .map(|r| TimesheetEntry {
                work_date: r.work_date,
                clock_in: r.clock_in,
                clock_out: r.clock_out,
                site_name: r.site_name,
            })
            .collect())
    }
}
