//! Dashboard summary models
//!
//! Rows for the sales and cost tables on the back-office dashboard. The
//! dashboard renders fetched state; the helpers here are pure display math.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sales figures for one business day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySalesRow {
    pub business_date: NaiveDate,
    pub receipt_count: i64,
    pub gross_sales: Decimal,
    pub discount_total: Decimal,
    pub net_sales: Decimal,
}

/// Spend for one ingredient category over the selected range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostCategoryRow {
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub spend: Decimal,
}

/// Total net sales across the range
pub fn net_sales_total(rows: &[DailySalesRow]) -> Decimal {
    rows.iter().map(|r| r.net_sales).sum()
}

/// Total spend across all cost categories
pub fn cost_total(rows: &[CostCategoryRow]) -> Decimal {
    rows.iter().map(|r| r.spend).sum()
}

/// Share of total spend for one category, in percent. Zero when the
/// total is zero.
pub fn cost_share_percent(row: &CostCategoryRow, total: Decimal) -> Decimal {
    if total.is_zero() {
        Decimal::ZERO
    } else {
        row.spend * Decimal::from(100) / total
    }
}

/// Sales rows in chronological order (stable for equal dates)
pub fn sort_sales_by_date(mut rows: Vec<DailySalesRow>) -> Vec<DailySalesRow> {
    rows.sort_by_key(|r| r.business_date);
    rows
}
