/**
 * File: /src/proximity.rs
 * Created Date: Monday, June 22nd 2026
 * Author: Zihan
 * -----
 * Last Modified: Thursday, 6th August 2026
 * Modified By: Zihan Wu <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-06-22		Zihan	Category proximity matrix from bipartite adjacency
 */
use std::collections::HashSet;
use std::fmt;
use std::ops::Index;

use indexmap::IndexMap;
use ndarray::Array2;
use rayon::prelude::*;

use crate::table::RelationTable;

/// Square symmetric category-by-category matrix with its labels.
///
/// Rows and columns are indexed by the distinct categories of the input, in
/// first-seen order. Off-diagonal values live in [0, 1]; the diagonal is
/// uniform per the self-loop flag of the builder.
///
/// # Example
/// ```
/// use fast_proximity::{co_occurrence, RelationTable};
///
/// let table = RelationTable::from_source(vec![
///     ("cat1", "ent1"),
///     ("cat1", "ent2"),
///     ("cat2", "ent1"),
/// ])
/// .unwrap();
/// let matrix = co_occurrence(&table, true);
///
/// assert_eq!(matrix.get("cat1", "cat2"), Some(0.5));
/// assert_eq!(matrix[(0, 0)], 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ProximityMatrix {
    labels: Vec<String>,
    data: Array2<f64>,
}

impl ProximityMatrix {
    fn new(labels: Vec<String>, data: Array2<f64>) -> Self {
        ProximityMatrix { labels, data }
    }

    /// Category labels, in row/column order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of categories (the matrix is len x len).
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// Row/column position of a category label.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Proximity between two categories by label.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let row = self.position(a)?;
        let col = self.position(b)?;
        Some(self.data[[row, col]])
    }
}

impl Index<(usize, usize)> for ProximityMatrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.data[[index.0, index.1]]
    }
}

/// # Example
/// ```log
/// [1, 0.5, ]
/// [0.5, 1, ]
/// ```
impl fmt::Display for ProximityMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = String::new();
        for i in 0..self.len() {
            s.push_str("[");
            for j in 0..self.len() {
                s.push_str(&format!("{}, ", self.data[[i, j]]));
            }
            s.push_str("]\n");
        }

        write!(f, "{}", s)
    }
}

/// 共现矩阵构建器
///
/// Builds the category -> entity-set bipartite adjacency and turns shared
/// entities into proximity: `shared / max(|A|, |B|)`. The value column is
/// ignored here, co-occurrence is presence-based.
#[derive(Debug, Clone, PartialEq)]
pub struct CooccurrenceBuilder {
    /// diagonal entries: 1.0 when true, 0.0 when false
    pub self_loops: bool,
    /// fan the pairwise step out with rayon
    pub parallel: bool,
}

impl Default for CooccurrenceBuilder {
    fn default() -> Self {
        CooccurrenceBuilder {
            self_loops: true,
            parallel: true,
        }
    }
}

impl CooccurrenceBuilder {
    pub fn new(self_loops: bool) -> Self {
        CooccurrenceBuilder {
            self_loops,
            ..Default::default()
        }
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Build the proximity matrix over the distinct categories of `table`.
    ///
    /// Each unordered pair is computed exactly once and the value written
    /// to both cells, so the matrix is symmetric bit-for-bit in both the
    /// serial and the parallel path. Empty input gives a 0x0 matrix.
    pub fn build(&self, table: &RelationTable) -> ProximityMatrix {
        let mut adjacency: IndexMap<&str, HashSet<&str>> = IndexMap::new();
        for row in table {
            adjacency
                .entry(row.category.as_str())
                .or_insert_with(HashSet::new)
                .insert(row.entity.as_str());
        }

        let n = adjacency.len();
        if n == 0 {
            return ProximityMatrix::new(Vec::new(), Array2::zeros((0, 0)));
        }

        let sets: Vec<&HashSet<&str>> = adjacency.values().collect();
        let pairs: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .collect();

        let cells: Vec<(usize, usize, f64)> = if self.parallel {
            pairs
                .par_iter()
                .map(|&(i, j)| (i, j, Self::proximity(sets[i], sets[j])))
                .collect()
        } else {
            pairs
                .iter()
                .map(|&(i, j)| (i, j, Self::proximity(sets[i], sets[j])))
                .collect()
        };

        let diagonal = if self.self_loops { 1.0 } else { 0.0 };
        let mut data = Array2::zeros((n, n));
        for i in 0..n {
            data[[i, i]] = diagonal;
        }
        for (i, j, value) in cells {
            data[[i, j]] = value;
            data[[j, i]] = value;
        }

        let labels = adjacency.keys().map(|label| label.to_string()).collect();
        ProximityMatrix::new(labels, data)
    }

    /// Shared entities over the larger of the two entity sets.
    ///
    /// 1.0 means the smaller set is fully contained in the larger one.
    fn proximity(a: &HashSet<&str>, b: &HashSet<&str>) -> f64 {
        let shared = a.intersection(b).count();
        shared as f64 / a.len().max(b.len()) as f64
    }
}

/// Build the co-occurrence matrix with default parallelism.
pub fn co_occurrence(table: &RelationTable, self_loops: bool) -> ProximityMatrix {
    CooccurrenceBuilder::new(self_loops).build(table)
}
