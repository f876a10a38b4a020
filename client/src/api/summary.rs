//! Dashboard summary endpoints

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use shared::models::{CostCategoryRow, DailySalesRow};
use shared::types::DateRange;

use super::{decode, ApiClient};
use crate::error::AppResult;

#[derive(Debug, Deserialize)]
struct SalesRow {
    #[serde(rename = "businessDate")]
    business_date: NaiveDate,
    #[serde(rename = "receiptCount")]
    receipt_count: i64,
    #[serde(rename = "grossSales")]
    gross_sales: Decimal,
    #[serde(rename = "discountTotal")]
    discount_total: Decimal,
    #[serde(rename = "netSales")]
    net_sales: Decimal,
}

#[derive(Debug, Deserialize)]
struct CostRow {
    #[serde(rename = "categoryId")]
    category_id: Option<i64>,
    #[serde(rename = "categoryName")]
    category_name: Option<String>,
    spend: Decimal,
}

impl ApiClient {
    /// Per-day sales figures over a date range
    pub async fn fetch_daily_sales(
        &self,
        token: &str,
        range: &DateRange,
    ) -> AppResult<Vec<DailySalesRow>> {
        let url = format!(
            "{}/summary/sales?start={}&end={}",
            self.base_url, range.start, range.end
        );
        let response = self.http.get(&url).bearer_auth(token).send().await?;
        let rows: Vec<SalesRow> = decode(response).await?;

        Ok(rows
            .into_iter()
            .map(|r| DailySalesRow {
                business_date: r.business_date,
                receipt_count: r.receipt_count,
                gross_sales: r.gross_sales,
                discount_total: r.discount_total,
                net_sales: r.net_sales,
            })
            .collect())
    }

    /// Ingredient spend per category over a date range
    pub async fn fetch_cost_summary(
        &self,
        token: &str,
        range: &DateRange,
    ) -> AppResult<Vec<CostCategoryRow>> {
        let url = format!(
            "{}/summary/costs?start={}&end={}",
            self.base_url, range.start, range.end
        );
        let response = self.http.get(&url).bearer_auth(token).send().await?;
        let rows: Vec<CostRow> = decode(response).await?;

        Ok(rows
            .into_iter()
            .map(|r| CostCategoryRow {
                category_id: r.category_id,
                category_name: r.category_name,
                spend: r.spend,
            })
            .collect())
    }
}
