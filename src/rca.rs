/**
 * File: /src/rca.rs
 * Created Date: Wednesday, June 17th 2026
 * Author: Zihan
 * -----
 * Last Modified: Thursday, 6th August 2026
 * Modified By: Zihan Wu <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 */
use std::collections::HashMap;

use crate::table::{Relation, RelationTable};

/// RCA显著性过滤器
///
/// Revealed Comparative Advantage per (category, entity) pair:
///
/// ```text
/// RCA(c,e) = (v(c,e) / Σ_e' v(c,e')) / (Σ_c' v(c',e) / Σ v)
/// ```
///
/// the entity's share of its category's total, over the entity's share of
/// the grand total. Pairs with RCA at or above the threshold count as
/// significant; the conventional threshold is 1.0, inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct RcaFilter {
    pub threshold: f64,
}

impl Default for RcaFilter {
    fn default() -> Self {
        RcaFilter { threshold: 1.0 }
    }
}

impl RcaFilter {
    pub fn new(threshold: f64) -> Self {
        RcaFilter { threshold }
    }

    /// RCA score per row, in row order.
    ///
    /// Built from three grouped aggregates (per-category totals, per-entity
    /// totals, grand total) in one linear pass, so large inputs never hit a
    /// pairwise blowup. A zero category or grand total yields NaN for the
    /// affected rows; NaN fails every threshold comparison downstream.
    pub fn scores(&self, table: &RelationTable) -> Vec<f64> {
        let mut category_totals: HashMap<&str, f64> = HashMap::new();
        let mut entity_totals: HashMap<&str, f64> = HashMap::new();
        let mut grand_total = 0.0;

        for row in table {
            *category_totals.entry(row.category.as_str()).or_insert(0.0) += row.value;
            *entity_totals.entry(row.entity.as_str()).or_insert(0.0) += row.value;
            grand_total += row.value;
        }

        table
            .iter()
            .map(|row| {
                let category_share = row.value / category_totals[row.category.as_str()];
                let entity_share = entity_totals[row.entity.as_str()] / grand_total;
                category_share / entity_share
            })
            .collect()
    }

    /// Keep only the rows whose RCA reaches the threshold.
    ///
    /// Row order is preserved; empty input short-circuits before any
    /// aggregate is built.
    pub fn filter(&self, table: &RelationTable) -> RelationTable {
        if table.is_empty() {
            return RelationTable::new();
        }

        let scores = self.scores(table);
        let rows: Vec<Relation> = table
            .iter()
            .zip(scores.iter())
            .filter(|(_, &score)| score >= self.threshold)
            .map(|(row, _)| row.clone())
            .collect();
        RelationTable::from_rows(rows)
    }
}

/// Filter a canonical table at the conventional RCA >= 1.0 threshold.
pub fn filter_significant(table: &RelationTable) -> RelationTable {
    RcaFilter::default().filter(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> RelationTable {
        RelationTable::from_rows(vec![
            Relation::new("cat1", "ent1", 2.0),
            Relation::new("cat1", "ent2", 3.0),
            Relation::new("cat2", "ent1", 4.0),
            Relation::new("cat3", "ent3", 5.0),
        ])
    }

    #[test]
    fn test_scores_match_hand_computation() {
        // category totals: cat1=5, cat2=4, cat3=5; entity totals: ent1=6,
        // ent2=3, ent3=5; grand total 14
        let scores = RcaFilter::default().scores(&sample_table());

        let expected = [
            (2.0 / 5.0) / (6.0 / 14.0),
            (3.0 / 5.0) / (3.0 / 14.0),
            (4.0 / 4.0) / (6.0 / 14.0),
            (5.0 / 5.0) / (5.0 / 14.0),
        ];
        for (score, expected) in scores.iter().zip(expected.iter()) {
            assert!((score - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_filter_drops_insignificant_pair() {
        let filtered = filter_significant(&sample_table());

        assert_eq!(
            filtered,
            RelationTable::from_rows(vec![
                Relation::new("cat1", "ent2", 3.0),
                Relation::new("cat2", "ent1", 4.0),
                Relation::new("cat3", "ent3", 5.0),
            ])
        );
    }

    #[test]
    fn test_filter_empty_table_stays_empty() {
        let filtered = filter_significant(&RelationTable::new());
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // a fully uniform bipartite fill puts every pair at RCA exactly 1
        let table = RelationTable::from_rows(vec![
            Relation::new("cat1", "ent1", 1.0),
            Relation::new("cat1", "ent2", 1.0),
            Relation::new("cat2", "ent1", 1.0),
            Relation::new("cat2", "ent2", 1.0),
        ]);

        let scores = RcaFilter::default().scores(&table);
        assert!(scores.iter().all(|&score| score == 1.0));
        assert_eq!(filter_significant(&table), table);
    }

    #[test]
    fn test_zero_values_filtered_out() {
        // all-zero values produce NaN ratios, which never pass the threshold
        let table = RelationTable::from_rows(vec![
            Relation::new("cat1", "ent1", 0.0),
            Relation::new("cat2", "ent2", 0.0),
        ]);

        assert!(filter_significant(&table).is_empty());
    }

    #[test]
    fn test_custom_threshold() {
        // only the two RCA = 2.8 rows clear a 2.5 threshold
        let filtered = RcaFilter::new(2.5).filter(&sample_table());

        assert_eq!(
            filtered,
            RelationTable::from_rows(vec![
                Relation::new("cat1", "ent2", 3.0),
                Relation::new("cat3", "ent3", 5.0),
            ])
        );
    }
}
