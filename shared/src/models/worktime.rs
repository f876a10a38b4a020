//! Employee time-clock models

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::haversine_m;
use crate::types::GpsCoordinates;

/// Clock-in or clock-out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PunchKind {
    In,
    Out,
}

impl PunchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PunchKind::In => "in",
            PunchKind::Out => "out",
        }
    }
}

/// One time-clock punch as submitted to the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeClockPunch {
    pub staff_name: String,
    pub kind: PunchKind,
    pub punched_at: DateTime<Utc>,
    pub position: GpsCoordinates,
    pub site_id: Option<i64>,
}

/// Display row for one day of a staff timesheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimesheetEntry {
    pub work_date: NaiveDate,
    pub clock_in: Option<NaiveTime>,
    pub clock_out: Option<NaiveTime>,
    pub site_name: Option<String>,
}

/// A branch location staff may punch from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkSite {
    pub site_id: i64,
    pub name: String,
    pub center: GpsCoordinates,
    pub radius_m: f64,
}

impl WorkSite {
    pub fn distance_to(&self, position: &GpsCoordinates) -> f64 {
        haversine_m(&self.center, position)
    }

    /// Whether a position falls inside this site's geofence
    pub fn contains(&self, position: &GpsCoordinates) -> bool {
        self.distance_to(position) <= self.radius_m
    }
}
