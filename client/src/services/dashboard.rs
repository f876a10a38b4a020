//! Dashboard data: sales and cost summaries over a date range

use shared::models::{sort_sales_by_date, CostCategoryRow, DailySalesRow};
use shared::types::DateRange;

use super::unix_now;
use crate::api::ApiClient;
use crate::error::AppResult;
use crate::session::SessionStore;

/// Read-only service behind the dashboard screen. Renders fetched state;
/// nothing is cached between calls.
#[derive(Clone)]
pub struct DashboardService {
    api: ApiClient,
}

impl DashboardService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Sales rows for the range, oldest day first
    pub async fn daily_sales(
        &self,
        store: &SessionStore,
        range: &DateRange,
    ) -> AppResult<Vec<DailySalesRow>> {
        let session = store.guard(unix_now())?;
        let rows = self.api.fetch_daily_sales(&session.token, range).await?;
        Ok(sort_sales_by_date(rows))
    }

    /// Ingredient spend per category for the range
    pub async fn cost_summary(
        &self,
        store: &SessionStore,
        range: &DateRange,
    ) -> AppResult<Vec<CostCategoryRow>> {
        let session = store.guard(unix_now())?;
        self.api.fetch_cost_summary(&session.token, range).await
    }
}
