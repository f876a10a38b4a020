//! Stock endpoints: snapshots, saved sheets, and submissions

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shared::models::{StockLine, StockSheet};
use shared::types::QtyEntry;
use shared::validation::receive_total_cost;

use super::{decode, ApiClient, SubmissionStamp};
use crate::error::AppResult;

/// Stock row as served by the POS API. The quantity fields arrive as the
/// stringly sentinel ("" or digits) and are present only on saved sheets,
/// not on the live snapshot.
#[derive(Debug, Deserialize)]
struct StockRow {
    #[serde(rename = "stockId")]
    stock_id: i64,
    #[serde(rename = "itemName")]
    item_name: String,
    #[serde(rename = "categoryId")]
    category_id: Option<i64>,
    #[serde(rename = "categoryName")]
    category_name: Option<String>,
    #[serde(rename = "locationId")]
    location_id: Option<i64>,
    #[serde(rename = "locationName")]
    location_name: Option<String>,
    #[serde(rename = "unitName")]
    unit_name: String,
    #[serde(rename = "requiredQty")]
    required_qty: i32,
    #[serde(rename = "countedQty", default)]
    counted_qty: Option<QtyEntry>,
    #[serde(rename = "toPurchaseQty", default)]
    to_purchase_qty: Option<QtyEntry>,
    #[serde(rename = "purchasedQty", default)]
    purchased_qty: Option<QtyEntry>,
    #[serde(default)]
    price: Option<Decimal>,
    #[serde(default)]
    remark: Option<String>,
}

impl StockRow {
    fn into_line(self) -> StockLine {
        StockLine {
            stock_id: self.stock_id,
            item_name: self.item_name,
            category_id: self.category_id,
            category_name: self.category_name,
            location_id: self.location_id,
            location_name: self.location_name,
            unit_name: self.unit_name,
            required_qty: self.required_qty,
            counted_qty: self.counted_qty.unwrap_or_default(),
            to_purchase_qty: self.to_purchase_qty.unwrap_or_default(),
            purchased_qty: self.purchased_qty.unwrap_or_default(),
            price: self.price.unwrap_or_default(),
            remark: self.remark.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SheetResponse {
    #[serde(rename = "orderId")]
    order_id: i64,
    items: Vec<StockRow>,
}

#[derive(Debug, Deserialize)]
struct OrderCreatedResponse {
    #[serde(rename = "orderId")]
    order_id: i64,
}

#[derive(Debug, Deserialize)]
struct ReceiptCreatedResponse {
    #[serde(rename = "receiptId")]
    receipt_id: i64,
}

/// One submitted count row. Quantities leave the client as numbers here,
/// with an empty entry coerced to 0.
#[derive(Debug, Clone, Serialize)]
pub struct CountSubmissionRow {
    #[serde(rename = "stockId")]
    pub stock_id: i64,
    pub date: String,
    pub time: String,
    #[serde(rename = "countedQty")]
    pub counted_qty: i32,
    #[serde(rename = "requiredQty")]
    pub required_qty: i32,
    #[serde(rename = "toPurchaseQty")]
    pub to_purchase_qty: i32,
    pub remark: String,
    #[serde(rename = "updatedBy")]
    pub updated_by: String,
}

/// Receiving submission: a header plus the item rows
#[derive(Debug, Clone, Serialize)]
pub struct ReceiveSubmission {
    pub date: String,
    pub time: String,
    #[serde(rename = "totalCost")]
    pub total_cost: Decimal,
    #[serde(rename = "isPaid")]
    pub is_paid: bool,
    #[serde(rename = "orderId", skip_serializing_if = "Option::is_none")]
    pub order_id: Option<i64>,
    #[serde(rename = "updatedBy")]
    pub updated_by: String,
    pub items: Vec<ReceiveSubmissionRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReceiveSubmissionRow {
    #[serde(rename = "stockId")]
    pub stock_id: i64,
    pub date: String,
    pub time: String,
    #[serde(rename = "toPurchaseQty")]
    pub to_purchase_qty: i32,
    #[serde(rename = "purchasedQty")]
    pub purchased_qty: i32,
    pub price: Decimal,
    pub remark: String,
    #[serde(rename = "orderId", skip_serializing_if = "Option::is_none")]
    pub order_id: Option<i64>,
}

/// Serialize the modified rows of a counted sheet, in sheet order
pub fn build_count_payload(sheet: &StockSheet, stamp: &SubmissionStamp) -> Vec<CountSubmissionRow> {
    sheet
        .modified_lines()
        .map(|line| CountSubmissionRow {
            stock_id: line.stock_id,
            date: stamp.date_string(),
            time: stamp.time_string(),
            counted_qty: line.counted_qty.or_zero(),
            required_qty: line.required_qty,
            to_purchase_qty: line.to_purchase_qty.or_zero(),
            remark: line.remark.clone(),
            updated_by: stamp.updated_by.clone(),
        })
        .collect()
}

/// Assemble a receiving submission: the header total covers the whole
/// sheet (the footer figure the user saw), the item rows are the modified
/// lines in sheet order.
pub fn build_receive_payload(
    sheet: &StockSheet,
    stamp: &SubmissionStamp,
    is_paid: bool,
) -> ReceiveSubmission {
    let items = sheet
        .modified_lines()
        .map(|line| ReceiveSubmissionRow {
            stock_id: line.stock_id,
            date: stamp.date_string(),
            time: stamp.time_string(),
            to_purchase_qty: line.to_purchase_qty.or_zero(),
            purchased_qty: line.purchased_qty.or_zero(),
            price: line.price,
            remark: line.remark.clone(),
            order_id: sheet.order_id,
        })
        .collect();

    ReceiveSubmission {
        date: stamp.date_string(),
        time: stamp.time_string(),
        total_cost: receive_total_cost(&sheet.lines),
        is_paid,
        order_id: sheet.order_id,
        updated_by: stamp.updated_by.clone(),
        items,
    }
}

impl ApiClient {
    /// Fetch the live stock snapshot that seeds a fresh count sheet
    pub async fn fetch_current_stock(&self, token: &str) -> AppResult<Vec<StockLine>> {
        let url = format!("{}/stock/current", self.base_url);
        let response = self.http.get(&url).bearer_auth(token).send().await?;
        let rows: Vec<StockRow> = decode(response).await?;
        Ok(rows.into_iter().map(StockRow::into_line).collect())
    }

    /// Fetch the sheet saved under a purchase order
    pub async fn fetch_sheet(&self, token: &str, order_id: i64) -> AppResult<StockSheet> {
        let url = format!("{}/stock/orders/{}", self.base_url, order_id);
        let response = self.http.get(&url).bearer_auth(token).send().await?;
        let body: SheetResponse = decode(response).await?;
        Ok(StockSheet::new(
            Some(body.order_id),
            body.items.into_iter().map(StockRow::into_line).collect(),
        ))
    }

    /// Submit count rows; the server opens or updates the purchase order
    /// and returns its id
    pub async fn submit_count(&self, token: &str, rows: &[CountSubmissionRow]) -> AppResult<i64> {
        let url = format!("{}/stock/counts", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&rows)
            .send()
            .await?;
        let body: OrderCreatedResponse = decode(response).await?;
        Ok(body.order_id)
    }

    /// Submit a receiving sheet and return the receipt id
    pub async fn submit_receive(
        &self,
        token: &str,
        submission: &ReceiveSubmission,
    ) -> AppResult<i64> {
        let url = format!("{}/stock/receipts", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(submission)
            .send()
            .await?;
        let body: ReceiptCreatedResponse = decode(response).await?;
        Ok(body.receipt_id)
    }
}
