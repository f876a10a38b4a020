//! Validation utilities for the POS back-office platform
//!
//! Submission gates run locally, before any network call; a gate failure
//! blocks the submission and surfaces a bilingual message.

use rust_decimal::Decimal;

use crate::models::{SheetError, StockLine, StockSheet};
use crate::types::QtyEntry;

// ============================================================================
// Quantity Input Gating
// ============================================================================

/// Keystroke filter for quantity fields: the empty string or decimal
/// digits representing a non-negative integer. Everything else is ignored
/// by the edit, not reported as an error.
pub fn is_valid_qty_input(input: &str) -> bool {
    QtyEntry::parse(input).is_some()
}

// ============================================================================
// Submission Gates
// ============================================================================

/// Ids of lines whose counted quantity is still empty
pub fn find_incomplete(lines: &[StockLine]) -> Vec<i64> {
    lines
        .iter()
        .filter(|l| l.counted_qty.is_empty())
        .map(|l| l.stock_id)
        .collect()
}

/// Count sheet gate: recompute the incomplete set from scratch and block
/// when any line still has no counted quantity. The reported count is the
/// exact number of offending lines. On success the set is left empty.
pub fn validate_count_complete(sheet: &mut StockSheet) -> Result<(), SheetError> {
    sheet.incomplete = find_incomplete(&sheet.lines).into_iter().collect();
    if sheet.incomplete.is_empty() {
        Ok(())
    } else {
        Err(SheetError::IncompleteCount {
            missing: sheet.incomplete.len(),
        })
    }
}

/// Receiving sheet gate: at least one line must carry a purchased
/// quantity above zero, otherwise there is nothing to persist.
pub fn validate_receive_has_lines(sheet: &StockSheet) -> Result<(), SheetError> {
    if sheet.lines.iter().any(|l| l.purchased_qty.or_zero() > 0) {
        Ok(())
    } else {
        Err(SheetError::NothingToReceive)
    }
}

/// The receiving sheet's footer figure and submitted `totalCost`:
/// sum over lines of unit price times purchased quantity (empty as 0).
pub fn receive_total_cost(lines: &[StockLine]) -> Decimal {
    lines
        .iter()
        .map(|l| l.price * Decimal::from(l.purchased_qty.or_zero()))
        .sum()
}
