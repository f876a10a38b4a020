//! Count sheet workflow: snapshot → count → validate → submit

use shared::models::StockSheet;
use shared::validation::validate_count_complete;

use super::unix_now;
use crate::api::{build_count_payload, ApiClient, SubmissionStamp};
use crate::error::AppResult;
use crate::session::SessionStore;

/// Workflow service for the stock count screen
#[derive(Clone)]
pub struct CountSheetService {
    api: ApiClient,
}

impl CountSheetService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Start a fresh count from the live stock snapshot
    pub async fn start_new(&self, store: &SessionStore) -> AppResult<StockSheet> {
        let session = store.guard(unix_now())?;
        let lines = self.api.fetch_current_stock(&session.token).await?;
        tracing::debug!("Loaded stock snapshot with {} lines", lines.len());
        Ok(StockSheet::new(None, lines))
    }

    /// Reopen the sheet saved under a purchase order
    pub async fn load(&self, store: &SessionStore, order_id: i64) -> AppResult<StockSheet> {
        let session = store.guard(unix_now())?;
        self.api.fetch_sheet(&session.token, order_id).await
    }

    /// Validate and submit a counted sheet, returning the order id.
    ///
    /// An incomplete count blocks here, before any network call, with the
    /// exact number of offending lines; the sheet's incomplete set is
    /// refreshed so the UI can highlight them. On success the caller
    /// discards the sheet; on failure it is kept as edited for a retry.
    pub async fn submit(&self, store: &SessionStore, sheet: &mut StockSheet) -> AppResult<i64> {
        let session = store.guard(unix_now())?;
        validate_count_complete(sheet)?;

        let stamp = SubmissionStamp::now(&session.claims.name);
        let rows = build_count_payload(sheet, &stamp);
        tracing::info!("Submitting count sheet with {} modified rows", rows.len());
        self.api.submit_count(&session.token, &rows).await
    }
}
