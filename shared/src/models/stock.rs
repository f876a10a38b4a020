//! Stock reconciliation sheet models
//!
//! One line shape serves both the count sheet and the stock-in (receiving)
//! sheet. A sheet is fetched wholesale, edited in place through the
//! operations here, and discarded after a successful submission; the next
//! view of the same order re-fetches. Last submission wins at the server.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{GroupBy, QtyEntry};

/// One row of a stock count or stock-in sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockLine {
    pub stock_id: i64,
    pub item_name: String,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub location_id: Option<i64>,
    pub location_name: Option<String>,
    pub unit_name: String,
    /// Server-supplied; read-only in the UI
    pub required_qty: i32,
    pub counted_qty: QtyEntry,
    pub to_purchase_qty: QtyEntry,
    /// Receiving sheet only
    pub purchased_qty: QtyEntry,
    /// User-entered unit cost
    pub price: Decimal,
    pub remark: String,
}

impl StockLine {
    /// A fresh line as it arrives from a stock snapshot: no quantities
    /// entered yet, price zero.
    pub fn new(stock_id: i64, item_name: &str, unit_name: &str, required_qty: i32) -> Self {
        Self {
            stock_id,
            item_name: item_name.to_string(),
            category_id: None,
            category_name: None,
            location_id: None,
            location_name: None,
            unit_name: unit_name.to_string(),
            required_qty,
            counted_qty: QtyEntry::Empty,
            to_purchase_qty: QtyEntry::Empty,
            purchased_qty: QtyEntry::Empty,
            price: Decimal::ZERO,
            remark: String::new(),
        }
    }
}

/// Suggested purchase quantity for a count
pub fn derive_purchase_qty(required: i32, counted: i32) -> i32 {
    required.saturating_sub(counted).max(0)
}

/// Local gates a sheet must pass before a submission leaves the client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    #[error("{missing} line(s) are missing a counted quantity")]
    IncompleteCount { missing: usize },

    #[error("no line has a purchased quantity to receive")]
    NothingToReceive,
}

impl SheetError {
    /// Thai rendering for the UI
    pub fn message_th(&self) -> String {
        match self {
            SheetError::IncompleteCount { missing } => {
                format!("ยังไม่ได้นับสินค้า {} รายการ", missing)
            }
            SheetError::NothingToReceive => "ไม่มีรายการสินค้าที่รับเข้า".to_string(),
        }
    }
}

/// A stock sheet: the aggregate the back-office screens edit.
///
/// `modified` and `incomplete` track line identifiers, not value diffs:
/// re-entering the original value still counts as modified. Every edit
/// operation returns `true` when state changed and `false` when the input
/// was rejected or the line id is unknown; a rejected edit changes nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockSheet {
    pub order_id: Option<i64>,
    pub lines: Vec<StockLine>,
    /// Ids of lines the user has touched
    pub modified: BTreeSet<i64>,
    /// Ids of lines failing the count-completeness rule
    pub incomplete: BTreeSet<i64>,
}

impl StockSheet {
    pub fn new(order_id: Option<i64>, lines: Vec<StockLine>) -> Self {
        Self {
            order_id,
            lines,
            modified: BTreeSet::new(),
            incomplete: BTreeSet::new(),
        }
    }

    pub fn line(&self, stock_id: i64) -> Option<&StockLine> {
        self.lines.iter().find(|l| l.stock_id == stock_id)
    }

    fn line_mut(&mut self, stock_id: i64) -> Option<&mut StockLine> {
        self.lines.iter_mut().find(|l| l.stock_id == stock_id)
    }

    pub fn is_modified(&self, stock_id: i64) -> bool {
        self.modified.contains(&stock_id)
    }

    /// Modified lines in sheet order, the rows a submission serializes
    pub fn modified_lines(&self) -> impl Iterator<Item = &StockLine> {
        self.lines
            .iter()
            .filter(|l| self.modified.contains(&l.stock_id))
    }

    /// Edit the counted quantity from raw field input.
    ///
    /// Accepts the empty string or digits only. On acceptance the line
    /// leaves the incomplete set and joins the modified set; a non-empty
    /// count additionally recomputes `to_purchase_qty`, overwriting any
    /// manual edit to it (last write wins).
    pub fn set_counted(&mut self, stock_id: i64, input: &str) -> bool {
        let Some(entry) = QtyEntry::parse(input) else {
            return false;
        };
        let Some(line) = self.line_mut(stock_id) else {
            return false;
        };
        line.counted_qty = entry;
        if let Some(n) = entry.value() {
            line.to_purchase_qty = QtyEntry::Value(derive_purchase_qty(line.required_qty, n));
        }
        self.incomplete.remove(&stock_id);
        self.modified.insert(stock_id);
        true
    }

    pub fn increment_counted(&mut self, stock_id: i64) -> bool {
        self.step_counted(stock_id, 1)
    }

    /// Decrement floors at zero; an empty field steps from zero.
    pub fn decrement_counted(&mut self, stock_id: i64) -> bool {
        self.step_counted(stock_id, -1)
    }

    fn step_counted(&mut self, stock_id: i64, delta: i32) -> bool {
        let Some(line) = self.line_mut(stock_id) else {
            return false;
        };
        let next = line.counted_qty.or_zero().saturating_add(delta).max(0);
        line.counted_qty = QtyEntry::Value(next);
        line.to_purchase_qty = QtyEntry::Value(derive_purchase_qty(line.required_qty, next));
        self.incomplete.remove(&stock_id);
        self.modified.insert(stock_id);
        true
    }

    /// Edit the to-purchase quantity directly; never touches the count.
    pub fn set_to_purchase(&mut self, stock_id: i64, input: &str) -> bool {
        self.set_entry(stock_id, input, |l| &mut l.to_purchase_qty)
    }

    pub fn increment_to_purchase(&mut self, stock_id: i64) -> bool {
        self.step_entry(stock_id, 1, |l| &mut l.to_purchase_qty)
    }

    pub fn decrement_to_purchase(&mut self, stock_id: i64) -> bool {
        self.step_entry(stock_id, -1, |l| &mut l.to_purchase_qty)
    }

    pub fn set_purchased(&mut self, stock_id: i64, input: &str) -> bool {
        self.set_entry(stock_id, input, |l| &mut l.purchased_qty)
    }

    pub fn increment_purchased(&mut self, stock_id: i64) -> bool {
        self.step_entry(stock_id, 1, |l| &mut l.purchased_qty)
    }

    pub fn decrement_purchased(&mut self, stock_id: i64) -> bool {
        self.step_entry(stock_id, -1, |l| &mut l.purchased_qty)
    }

    /// One-click prefill on the receiving sheet: copy the current
    /// to-purchase figure into the purchased field. Reads at call time,
    /// so an empty to-purchase copies as empty.
    pub fn prefill_purchased(&mut self, stock_id: i64) -> bool {
        let Some(line) = self.line_mut(stock_id) else {
            return false;
        };
        line.purchased_qty = line.to_purchase_qty;
        self.modified.insert(stock_id);
        true
    }

    /// Store the unit cost. Price edits stay out of the modified set:
    /// modification tracking covers counted, to-purchase, purchased and
    /// remark.
    pub fn set_price(&mut self, stock_id: i64, price: Decimal) -> bool {
        let Some(line) = self.line_mut(stock_id) else {
            return false;
        };
        line.price = price;
        true
    }

    pub fn set_remark(&mut self, stock_id: i64, remark: &str) -> bool {
        let Some(line) = self.line_mut(stock_id) else {
            return false;
        };
        line.remark = remark.to_string();
        self.modified.insert(stock_id);
        true
    }

    /// Reset the purchase-related fields of a line (to-purchase,
    /// purchased, price, remark) and drop it from both tracking sets.
    /// The counted quantity is left as entered.
    pub fn clear_line(&mut self, stock_id: i64) -> bool {
        let Some(line) = self.line_mut(stock_id) else {
            return false;
        };
        line.to_purchase_qty = QtyEntry::Empty;
        line.purchased_qty = QtyEntry::Empty;
        line.price = Decimal::ZERO;
        line.remark.clear();
        self.modified.remove(&stock_id);
        self.incomplete.remove(&stock_id);
        true
    }

    fn set_entry<F>(&mut self, stock_id: i64, input: &str, pick: F) -> bool
    where
        F: FnOnce(&mut StockLine) -> &mut QtyEntry,
    {
        let Some(entry) = QtyEntry::parse(input) else {
            return false;
        };
        let Some(line) = self.line_mut(stock_id) else {
            return false;
        };
        *pick(line) = entry;
        self.modified.insert(stock_id);
        true
    }

    fn step_entry<F>(&mut self, stock_id: i64, delta: i32, pick: F) -> bool
    where
        F: FnOnce(&mut StockLine) -> &mut QtyEntry,
    {
        let Some(line) = self.line_mut(stock_id) else {
            return false;
        };
        let field = pick(line);
        let next = field.or_zero().saturating_add(delta).max(0);
        *field = QtyEntry::Value(next);
        self.modified.insert(stock_id);
        true
    }
}

/// A display group of sheet lines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineGroup {
    pub id: i64,
    pub name: String,
    pub lines: Vec<StockLine>,
}

/// Partition lines for display by category or location.
///
/// Pure projection, recomputed on every render: groups ascend by id and
/// lines within a group ascend by item name (stock id breaks ties). A
/// missing group id coerces to -1; a group whose first line carries no
/// name gets a synthesized Thai label so the header never renders blank.
pub fn group_lines(lines: &[StockLine], key: GroupBy) -> Vec<LineGroup> {
    let mut groups: BTreeMap<i64, LineGroup> = BTreeMap::new();

    for line in lines {
        let (id, name) = match key {
            GroupBy::Category => (line.category_id, line.category_name.as_deref()),
            GroupBy::Location => (line.location_id, line.location_name.as_deref()),
        };
        let id = id.unwrap_or(-1);
        let group = groups.entry(id).or_insert_with(|| LineGroup {
            id,
            name: name
                .map(str::to_string)
                .unwrap_or_else(|| synthesized_group_name(key, id)),
            lines: Vec::new(),
        });
        group.lines.push(line.clone());
    }

    let mut out: Vec<LineGroup> = groups.into_values().collect();
    for group in &mut out {
        group.lines.sort_by(|a, b| {
            a.item_name
                .cmp(&b.item_name)
                .then(a.stock_id.cmp(&b.stock_id))
        });
    }
    out
}

fn synthesized_group_name(key: GroupBy, id: i64) -> String {
    match key {
        GroupBy::Category => format!("หมวด #{}", id),
        GroupBy::Location => format!("ตำแหน่ง #{}", id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet_with_one_line() -> StockSheet {
        StockSheet::new(None, vec![StockLine::new(1, "ข้าวหอมมะลิ", "กก.", 10)])
    }

    #[test]
    fn test_set_counted_derives_to_purchase() {
        let mut sheet = sheet_with_one_line();
        assert!(sheet.set_counted(1, "4"));

        let line = sheet.line(1).unwrap();
        assert_eq!(line.counted_qty, QtyEntry::Value(4));
        assert_eq!(line.to_purchase_qty, QtyEntry::Value(6));
        assert!(sheet.is_modified(1));
    }

    #[test]
    fn test_set_counted_overwrites_manual_to_purchase() {
        let mut sheet = sheet_with_one_line();
        assert!(sheet.set_to_purchase(1, "99"));
        assert!(sheet.set_counted(1, "3"));
        assert_eq!(sheet.line(1).unwrap().to_purchase_qty, QtyEntry::Value(7));
    }

    #[test]
    fn test_set_counted_empty_leaves_to_purchase_alone() {
        let mut sheet = sheet_with_one_line();
        sheet.set_to_purchase(1, "5");
        assert!(sheet.set_counted(1, ""));

        let line = sheet.line(1).unwrap();
        assert_eq!(line.counted_qty, QtyEntry::Empty);
        assert_eq!(line.to_purchase_qty, QtyEntry::Value(5));
    }

    #[test]
    fn test_rejected_input_changes_nothing() {
        let mut sheet = sheet_with_one_line();
        assert!(!sheet.set_counted(1, "4a"));
        assert!(!sheet.set_counted(1, "-2"));

        let line = sheet.line(1).unwrap();
        assert_eq!(line.counted_qty, QtyEntry::Empty);
        assert_eq!(line.to_purchase_qty, QtyEntry::Empty);
        assert!(!sheet.is_modified(1));
    }

    #[test]
    fn test_unknown_line_is_ignored() {
        let mut sheet = sheet_with_one_line();
        assert!(!sheet.set_counted(99, "4"));
        assert!(!sheet.increment_counted(99));
        assert!(!sheet.clear_line(99));
        assert!(sheet.modified.is_empty());
    }

    #[test]
    fn test_decrement_floors_at_zero() {
        let mut sheet = sheet_with_one_line();
        sheet.set_counted(1, "0");
        assert!(sheet.decrement_counted(1));
        assert_eq!(sheet.line(1).unwrap().counted_qty, QtyEntry::Value(0));
    }

    #[test]
    fn test_steppers_treat_empty_as_zero() {
        let mut sheet = sheet_with_one_line();
        assert!(sheet.increment_counted(1));
        assert_eq!(sheet.line(1).unwrap().counted_qty, QtyEntry::Value(1));

        let mut sheet = sheet_with_one_line();
        assert!(sheet.decrement_counted(1));
        assert_eq!(sheet.line(1).unwrap().counted_qty, QtyEntry::Value(0));
        assert_eq!(sheet.line(1).unwrap().to_purchase_qty, QtyEntry::Value(10));
    }

    #[test]
    fn test_to_purchase_edits_never_touch_count() {
        let mut sheet = sheet_with_one_line();
        sheet.set_counted(1, "4");
        sheet.set_to_purchase(1, "2");
        sheet.increment_to_purchase(1);
        assert_eq!(sheet.line(1).unwrap().counted_qty, QtyEntry::Value(4));
        assert_eq!(sheet.line(1).unwrap().to_purchase_qty, QtyEntry::Value(3));
    }

    #[test]
    fn test_prefill_purchased_reads_at_call_time() {
        let mut sheet = sheet_with_one_line();
        sheet.set_counted(1, "4");
        assert!(sheet.prefill_purchased(1));
        assert_eq!(sheet.line(1).unwrap().purchased_qty, QtyEntry::Value(6));

        // After clearing, the prefill copies the now-empty figure
        sheet.clear_line(1);
        assert!(sheet.prefill_purchased(1));
        assert_eq!(sheet.line(1).unwrap().purchased_qty, QtyEntry::Empty);
    }

    #[test]
    fn test_price_edit_does_not_mark_modified() {
        let mut sheet = sheet_with_one_line();
        assert!(sheet.set_price(1, Decimal::new(2550, 2)));
        assert!(!sheet.is_modified(1));

        assert!(sheet.set_remark(1, "ของใกล้หมด"));
        assert!(sheet.is_modified(1));
    }

    #[test]
    fn test_clear_line_resets_purchase_fields_only() {
        let mut sheet = sheet_with_one_line();
        sheet.set_counted(1, "4");
        sheet.set_purchased(1, "6");
        sheet.set_price(1, Decimal::new(120, 0));
        sheet.set_remark(1, "note");

        assert!(sheet.clear_line(1));
        let line = sheet.line(1).unwrap();
        assert_eq!(line.counted_qty, QtyEntry::Value(4));
        assert_eq!(line.to_purchase_qty, QtyEntry::Empty);
        assert_eq!(line.purchased_qty, QtyEntry::Empty);
        assert_eq!(line.price, Decimal::ZERO);
        assert_eq!(line.remark, "");
        assert!(!sheet.is_modified(1));
    }

    #[test]
    fn test_modified_lines_keeps_sheet_order() {
        let mut sheet = StockSheet::new(
            None,
            vec![
                StockLine::new(3, "c", "ชิ้น", 1),
                StockLine::new(1, "a", "ชิ้น", 1),
                StockLine::new(2, "b", "ชิ้น", 1),
            ],
        );
        sheet.set_counted(2, "1");
        sheet.set_counted(3, "1");

        let ids: Vec<i64> = sheet.modified_lines().map(|l| l.stock_id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    fn grouped_fixture() -> Vec<StockLine> {
        let mut noodle = StockLine::new(1, "เส้นเล็ก", "กก.", 5);
        noodle.category_id = Some(2);
        noodle.category_name = Some("ของแห้ง".to_string());

        let mut rice = StockLine::new(2, "ข้าวสาร", "กก.", 5);
        rice.category_id = Some(2);
        rice.category_name = Some("ของแห้ง".to_string());

        let mut basil = StockLine::new(3, "โหระพา", "ขีด", 5);
        basil.category_id = Some(1);
        basil.category_name = Some("ผักสด".to_string());

        // No category at all
        let stray = StockLine::new(4, "ถุงขยะ", "แพ็ค", 5);

        vec![noodle, rice, basil, stray]
    }

    #[test]
    fn test_group_lines_orders_and_synthesizes_names() {
        let groups = group_lines(&grouped_fixture(), GroupBy::Category);

        let ids: Vec<i64> = groups.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![-1, 1, 2]);
        assert_eq!(groups[0].name, "หมวด #-1");
        assert_eq!(groups[1].name, "ผักสด");

        // Items sort by name within the group
        let names: Vec<&str> = groups[2].lines.iter().map(|l| l.item_name.as_str()).collect();
        assert_eq!(names, vec!["ข้าวสาร", "เส้นเล็ก"]);
    }

    #[test]
    fn test_group_lines_by_location_synthesizes_thai_label() {
        let mut line = StockLine::new(1, "น้ำปลา", "ขวด", 2);
        line.location_id = Some(7);
        let groups = group_lines(&[line], GroupBy::Location);
        assert_eq!(groups[0].name, "ตำแหน่ง #7");
    }

    #[test]
    fn test_group_lines_is_idempotent() {
        let lines = grouped_fixture();
        let a = group_lines(&lines, GroupBy::Category);
        let b = group_lines(&lines, GroupBy::Category);
        assert_eq!(serde_json::to_value(&a).unwrap(), serde_json::to_value(&b).unwrap());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(100))]

            #[test]
            fn prop_derived_purchase_never_negative(
                required in 0i32..10_000,
                counted in 0i32..10_000
            ) {
                prop_assert!(derive_purchase_qty(required, counted) >= 0);
            }

            /// Accepted digit input always lands verbatim and re-derives
            /// the to-purchase figure
            #[test]
            fn prop_set_counted_applies_max_rule(
                required in 0i32..10_000,
                counted in 0i32..10_000
            ) {
                let mut sheet =
                    StockSheet::new(None, vec![StockLine::new(1, "x", "ชิ้น", required)]);
                prop_assert!(sheet.set_counted(1, &counted.to_string()));

                let line = sheet.line(1).unwrap();
                prop_assert_eq!(line.counted_qty, QtyEntry::Value(counted));
                prop_assert_eq!(
                    line.to_purchase_qty,
                    QtyEntry::Value((required - counted).max(0))
                );
            }

            #[test]
            fn prop_steppers_never_go_negative(
                steps in prop::collection::vec(any::<bool>(), 1..40)
            ) {
                let mut sheet = StockSheet::new(None, vec![StockLine::new(1, "x", "ชิ้น", 5)]);
                for up in steps {
                    if up {
                        sheet.increment_counted(1);
                    } else {
                        sheet.decrement_counted(1);
                    }
                    prop_assert!(sheet.line(1).unwrap().counted_qty.or_zero() >= 0);
                }
            }
        }
    }
}
