//! WebAssembly module for the POS back-office UI
//!
//! Provides client-side computation for:
//! - Quantity input gating and purchase-quantity derivation
//! - Sheet grouping and completeness counts
//! - Receiving sheet totals
//! - Geofence distance checks
//! - Session claims expiry (the route guard's cookie-blob check)

use rust_decimal::prelude::ToPrimitive;
use wasm_bindgen::prelude::*;

use shared::geo::haversine_m_f64;
use shared::models::{group_lines, SessionClaims, StockLine};
use shared::types::{GroupBy, QtyEntry};
use shared::validation;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn parse_lines(lines_json: &str) -> Result<Vec<StockLine>, JsValue> {
    serde_json::from_str(lines_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid lines JSON: {}", e)))
}

/// Keystroke filter for quantity fields: empty string or decimal digits
#[wasm_bindgen]
pub fn is_valid_qty_input(input: &str) -> bool {
    validation::is_valid_qty_input(input)
}

/// Suggested purchase quantity: `max(required - counted, 0)`
#[wasm_bindgen]
pub fn derive_purchase_qty(required: i32, counted: i32) -> i32 {
    shared::models::derive_purchase_qty(required, counted)
}

/// Partition sheet lines for display by `"category"` or `"location"`
#[wasm_bindgen]
pub fn group_sheet_lines(lines_json: &str, key: &str) -> Result<String, JsValue> {
    let key = GroupBy::from_code(key)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown grouping key: {}", key)))?;
    let groups = group_lines(&parse_lines(lines_json)?, key);

    serde_json::to_string(&groups).map_err(|e| JsValue::from_str(&format!("{}", e)))
}

/// Number of lines still missing a counted quantity
#[wasm_bindgen]
pub fn incomplete_line_count(lines_json: &str) -> Result<u32, JsValue> {
    let lines = parse_lines(lines_json)?;
    Ok(validation::find_incomplete(&lines).len() as u32)
}

/// The receiving sheet's footer figure: sum of price times purchased
/// quantity over all lines (empty as 0)
#[wasm_bindgen]
pub fn receive_total_cost(lines_json: &str) -> Result<f64, JsValue> {
    let lines = parse_lines(lines_json)?;
    Ok(validation::receive_total_cost(&lines)
        .to_f64()
        .unwrap_or(0.0))
}

/// Great-circle distance between two points, in meters
#[wasm_bindgen]
pub fn distance_between_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    haversine_m_f64(lat1, lon1, lat2, lon2)
}

/// Whether a position falls inside a work site's geofence
#[wasm_bindgen]
pub fn is_within_site_radius(
    lat: f64,
    lon: f64,
    site_lat: f64,
    site_lon: f64,
    radius_m: f64,
) -> bool {
    haversine_m_f64(lat, lon, site_lat, site_lon) <= radius_m
}

/// Advisory expiry check on the claims blob the UI reads from cookies.
///
/// Runs before every protected view renders; an expired or missing blob
/// bounces to login. Real authorization stays server-side.
#[wasm_bindgen]
pub fn claims_expired(claims_json: &str, now_epoch_secs: i64) -> Result<bool, JsValue> {
    let claims: SessionClaims = serde_json::from_str(claims_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid claims JSON: {}", e)))?;
    Ok(claims.is_expired(now_epoch_secs, 0))
}
