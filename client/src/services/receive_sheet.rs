//! Receiving (stock-in) workflow: load order → record quantities → submit

use shared::models::StockSheet;
use shared::validation::validate_receive_has_lines;

use super::unix_now;
use crate::api::{build_receive_payload, ApiClient, SubmissionStamp};
use crate::error::AppResult;
use crate::session::SessionStore;

/// Workflow service for the stock-in screen
#[derive(Clone)]
pub struct ReceiveSheetService {
    api: ApiClient,
}

impl ReceiveSheetService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Load the sheet for the order being received against
    pub async fn load(&self, store: &SessionStore, order_id: i64) -> AppResult<StockSheet> {
        let session = store.guard(unix_now())?;
        self.api.fetch_sheet(&session.token, order_id).await
    }

    /// Validate and submit a receiving sheet, returning the receipt id.
    ///
    /// At least one line must carry a purchased quantity above zero;
    /// otherwise the submission is blocked before any network call.
    pub async fn submit(
        &self,
        store: &SessionStore,
        sheet: &mut StockSheet,
        is_paid: bool,
    ) -> AppResult<i64> {
        let session = store.guard(unix_now())?;
        validate_receive_has_lines(sheet)?;

        let stamp = SubmissionStamp::now(&session.claims.name);
        let submission = build_receive_payload(sheet, &stamp, is_paid);
        tracing::info!(
            "Submitting receipt with {} rows, total cost {}",
            submission.items.len(),
            submission.total_cost
        );
        self.api.submit_receive(&session.token, &submission).await
    }
}
