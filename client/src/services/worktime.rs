//! Time-clock workflow: geofenced punches and the daily timesheet

use chrono::NaiveDate;

use shared::models::{PunchKind, TimesheetEntry, WorkSite};
use shared::types::GpsCoordinates;

use super::unix_now;
use crate::api::{build_punch_payload, ApiClient, SubmissionStamp};
use crate::config::GeofenceConfig;
use crate::error::{AppError, AppResult};
use crate::session::SessionStore;

/// Workflow service for the staff time-clock screen
#[derive(Clone)]
pub struct WorktimeService {
    api: ApiClient,
    geofence: GeofenceConfig,
}

impl WorktimeService {
    pub fn new(api: ApiClient, geofence: GeofenceConfig) -> Self {
        Self { api, geofence }
    }

    /// Work sites for the punch screen
    pub async fn sites(&self, store: &SessionStore) -> AppResult<Vec<WorkSite>> {
        let session = store.guard(unix_now())?;
        self.api
            .fetch_work_sites(&session.token, self.geofence.default_radius_m)
            .await
    }

    /// Record a clock-in or clock-out from the staff's position.
    ///
    /// The punch anchors to the nearest work site. When enforcement is on
    /// and the position falls outside that site's radius, the punch is
    /// blocked before any network call; with enforcement off (testing
    /// branches) it still anchors to the nearest site.
    pub async fn punch(
        &self,
        store: &SessionStore,
        kind: PunchKind,
        position: &GpsCoordinates,
        sites: &[WorkSite],
    ) -> AppResult<i64> {
        let session = store.guard(unix_now())?;

        let nearest = sites
            .iter()
            .min_by(|a, b| a.distance_to(position).total_cmp(&b.distance_to(position)));

        let site_id = match nearest {
            Some(site) => {
                let distance_m = site.distance_to(position);
                if self.geofence.enforce && distance_m > site.radius_m {
                    return Err(AppError::OutsideGeofence {
                        distance_m,
                        allowed_m: site.radius_m,
                    });
                }
                Some(site.site_id)
            }
            // No sites configured for this branch; record unanchored
            None => None,
        };

        let stamp = SubmissionStamp::now(&session.claims.name);
        let payload = build_punch_payload(kind, position, site_id, &stamp);
        tracing::info!(
            "Submitting clock-{} punch for {}",
            kind.as_str(),
            session.claims.name
        );
        self.api.submit_punch(&session.token, &payload).await
    }

    /// Timesheet rows for one day
    pub async fn timesheet(
        &self,
        store: &SessionStore,
        date: NaiveDate,
    ) -> AppResult<Vec<TimesheetEntry>> {
        let session = store.guard(unix_now())?;
        self.api.fetch_timesheet(&session.token, date).await
    }
}
