//! Sheet grouping projection tests
//!
//! Grouping is a pure, recomputed-per-render projection: stable group
//! order, stable line order within a group, and synthesized Thai labels
//! when a group has no name of its own.

use proptest::prelude::*;

use shared::models::{group_lines, StockLine};
use shared::types::GroupBy;

fn named_line(stock_id: i64, item: &str) -> StockLine {
    StockLine::new(stock_id, item, "กก.", 5)
}

fn fixture() -> Vec<StockLine> {
    let mut noodle = named_line(1, "เส้นเล็ก");
    noodle.category_id = Some(2);
    noodle.category_name = Some("ของแห้ง".to_string());
    noodle.location_id = Some(10);
    noodle.location_name = Some("ห้องเก็บของ".to_string());

    let mut rice = named_line(2, "ข้าวสาร");
    rice.category_id = Some(2);
    rice.category_name = Some("ของแห้ง".to_string());
    rice.location_id = Some(10);
    rice.location_name = Some("ห้องเก็บของ".to_string());

    let mut basil = named_line(3, "โหระพา");
    basil.category_id = Some(1);
    basil.category_name = Some("ผักสด".to_string());
    basil.location_id = Some(11);
    basil.location_name = Some("ตู้เย็น".to_string());

    // Carries no category and no location
    let stray = named_line(4, "ถุงขยะ");

    vec![noodle, rice, basil, stray]
}

// ============================================================================
// Group Order and Labels
// ============================================================================

mod group_order {
    use super::*;

    #[test]
    fn groups_ascend_by_id_with_missing_ids_first() {
        let groups = group_lines(&fixture(), GroupBy::Category);
        let ids: Vec<i64> = groups.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![-1, 1, 2]);
    }

    #[test]
    fn lines_within_a_group_sort_by_item_name() {
        let groups = group_lines(&fixture(), GroupBy::Category);
        let dry_goods = &groups[2];
        let names: Vec<&str> = dry_goods.lines.iter().map(|l| l.item_name.as_str()).collect();
        assert_eq!(names, vec!["ข้าวสาร", "เส้นเล็ก"]);
    }

    #[test]
    fn equal_item_names_fall_back_to_stock_id() {
        let a = named_line(9, "น้ำตาล");
        let b = named_line(4, "น้ำตาล");
        let groups = group_lines(&[a, b], GroupBy::Category);
        let ids: Vec<i64> = groups[0].lines.iter().map(|l| l.stock_id).collect();
        assert_eq!(ids, vec![4, 9]);
    }

    #[test]
    fn a_nameless_category_gets_a_synthesized_thai_label() {
        let groups = group_lines(&fixture(), GroupBy::Category);
        assert_eq!(groups[0].name, "หมวด #-1");
        assert_eq!(groups[1].name, "ผักสด");
    }

    #[test]
    fn a_nameless_location_gets_its_own_thai_label() {
        let mut l = named_line(1, "น้ำปลา");
        l.location_id = Some(7);
        let groups = group_lines(&[l], GroupBy::Location);
        assert_eq!(groups[0].name, "ตำแหน่ง #7");
    }
}

// ============================================================================
// Switching the Grouping Key
// ============================================================================

mod grouping_key {
    use super::*;

    #[test]
    fn location_grouping_uses_location_attributes() {
        let groups = group_lines(&fixture(), GroupBy::Location);
        let ids: Vec<i64> = groups.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![-1, 10, 11]);
        assert_eq!(groups[1].name, "ห้องเก็บของ");
    }

    #[test]
    fn switching_keys_regroups_the_same_lines() {
        let by_category = group_lines(&fixture(), GroupBy::Category);
        let by_location = group_lines(&fixture(), GroupBy::Location);

        let total_by_cat: usize = by_category.iter().map(|g| g.lines.len()).sum();
        let total_by_loc: usize = by_location.iter().map(|g| g.lines.len()).sum();
        assert_eq!(total_by_cat, 4);
        assert_eq!(total_by_loc, 4);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

mod property_tests {
    use super::*;

    /// Lines with arbitrary category assignments out of a small id pool
    fn lines_strategy() -> impl Strategy<Value = Vec<StockLine>> {
        prop::collection::vec(
            (1i64..100, proptest::option::of(0i64..5), "[a-z]{1,6}"),
            1..20,
        )
        .prop_map(|specs| {
            specs
                .into_iter()
                .map(|(stock_id, category_id, item)| {
                    let mut l = StockLine::new(stock_id, &item, "ชิ้น", 1);
                    l.category_id = category_id;
                    l.category_name = category_id.map(|id| format!("cat-{}", id));
                    l
                })
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Grouping twice over the same lines gives identical output
        #[test]
        fn prop_grouping_is_deterministic(lines in lines_strategy()) {
            let a = group_lines(&lines, GroupBy::Category);
            let b = group_lines(&lines, GroupBy::Category);

            prop_assert_eq!(
                serde_json::to_value(&a).unwrap(),
                serde_json::to_value(&b).unwrap()
            );
        }

        /// Grouping partitions the sheet: every line lands in exactly one
        /// group and none are invented or dropped
        #[test]
        fn prop_grouping_partitions_the_lines(lines in lines_strategy()) {
            let groups = group_lines(&lines, GroupBy::Category);

            let regrouped: usize = groups.iter().map(|g| g.lines.len()).sum();
            prop_assert_eq!(regrouped, lines.len());

            for group in &groups {
                for l in &group.lines {
                    prop_assert_eq!(l.category_id.unwrap_or(-1), group.id);
                }
            }
        }

        /// Group ids always come out strictly ascending
        #[test]
        fn prop_group_order_is_strictly_ascending(lines in lines_strategy()) {
            let groups = group_lines(&lines, GroupBy::Category);
            for pair in groups.windows(2) {
                prop_assert!(pair[0].id < pair[1].id);
            }
        }
    }
}
