/**
 * File: /src/table.rs
 * Created Date: Tuesday, June 16th 2026
 * Author: Zihan
 * -----
 * Last Modified: Thursday, 6th August 2026
 * Modified By: Zihan Wu <wzh4464@gmail.com>
 * -----
 * HISTORY:
 * Date      		By   	Comments
 * ----------		------	---------------------------------------------------------
 * 2026-06-16		Zihan	Canonical relation table and raw-input boundary
 */
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One canonical row: a category observed in an entity with a weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub category: String,
    pub entity: String,
    pub value: f64,
}

impl Relation {
    pub fn new(category: impl Into<String>, entity: impl Into<String>, value: f64) -> Self {
        Relation {
            category: category.into(),
            entity: entity.into(),
            value,
        }
    }
}

/// The canonical 3-column table every stage operates on.
///
/// Columns are fixed named fields on [`Relation`]; positional column
/// conventions of raw inputs are resolved once, at the [`TableSource`]
/// boundary. Row order is preserved from input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationTable {
    rows: Vec<Relation>,
}

impl RelationTable {
    pub fn new() -> Self {
        RelationTable { rows: Vec::new() }
    }

    pub fn from_rows(rows: Vec<Relation>) -> Self {
        RelationTable { rows }
    }

    /// Normalize a raw input into canonical form.
    ///
    /// Column mappings are read positionally: first column = category,
    /// second = entity, optional third = value. Two-column inputs get a
    /// unit value per row; columns past the third are ignored.
    ///
    /// # Example
    /// ```
    /// use fast_proximity::RelationTable;
    ///
    /// let table = RelationTable::from_source(vec![("cat1", "ent1"), ("cat1", "ent2")]).unwrap();
    /// assert_eq!(table.len(), 2);
    /// assert_eq!(table.rows()[0].value, 1.0);
    /// ```
    pub fn from_source(source: impl Into<TableSource>) -> Result<Self, EmbedError> {
        match source.into() {
            TableSource::Table(table) => Ok(table),
            TableSource::Pairs(pairs) => Ok(RelationTable::from_rows(
                pairs
                    .into_iter()
                    .map(|(category, entity)| Relation::new(category, entity, 1.0))
                    .collect(),
            )),
            TableSource::Columns(columns) => Self::from_columns(columns),
        }
    }

    fn from_columns(columns: IndexMap<String, Column>) -> Result<Self, EmbedError> {
        if columns.len() < 2 {
            return Err(EmbedError::TooFewColumns {
                found: columns.len(),
            });
        }

        // every column must agree on length, ragged mappings are rejected
        let expected = columns[0].len();
        for (name, column) in columns.iter().skip(1) {
            if column.len() != expected {
                return Err(EmbedError::RaggedColumns {
                    column: name.clone(),
                    expected,
                    found: column.len(),
                });
            }
        }

        let mut iter = columns.iter();
        let categories = Self::label_column(iter.next().unwrap())?;
        let entities = Self::label_column(iter.next().unwrap())?;
        let values = match iter.next() {
            Some((_, Column::Values(values))) => values.clone(),
            Some((name, Column::Labels(_))) => {
                return Err(EmbedError::ColumnKind {
                    column: name.clone(),
                    expected: "numeric",
                })
            }
            None => vec![1.0; expected],
        };

        let rows = categories
            .iter()
            .zip(entities.iter())
            .zip(values.iter())
            .map(|((category, entity), &value)| Relation::new(category.clone(), entity.clone(), value))
            .collect();
        Ok(RelationTable::from_rows(rows))
    }

    fn label_column<'a>((name, column): (&String, &'a Column)) -> Result<&'a Vec<String>, EmbedError> {
        match column {
            Column::Labels(labels) => Ok(labels),
            Column::Values(_) => Err(EmbedError::ColumnKind {
                column: name.clone(),
                expected: "labels",
            }),
        }
    }

    pub fn rows(&self) -> &[Relation] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Relation> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a> IntoIterator for &'a RelationTable {
    type Item = &'a Relation;
    type IntoIter = std::slice::Iter<'a, Relation>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// A single raw input column: category/entity labels or numeric values.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Labels(Vec<String>),
    Values(Vec<f64>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Labels(labels) => labels.len(),
            Column::Values(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Heterogeneous raw input accepted by the normalizer.
///
/// `From` impls cover the convenient literal forms, so the public entry
/// points all take `impl Into<TableSource>`.
#[derive(Debug, Clone, PartialEq)]
pub enum TableSource {
    /// Ordered column-name -> column mapping, interpreted positionally.
    Columns(IndexMap<String, Column>),
    /// Two-column tabular input, unit value per row.
    Pairs(Vec<(String, String)>),
    /// Already-canonical table, passed through unchanged.
    Table(RelationTable),
}

impl From<RelationTable> for TableSource {
    fn from(table: RelationTable) -> Self {
        TableSource::Table(table)
    }
}

impl From<Vec<Relation>> for TableSource {
    fn from(rows: Vec<Relation>) -> Self {
        TableSource::Table(RelationTable::from_rows(rows))
    }
}

impl From<IndexMap<String, Column>> for TableSource {
    fn from(columns: IndexMap<String, Column>) -> Self {
        TableSource::Columns(columns)
    }
}

impl<S: Into<String>> From<Vec<(S, S)>> for TableSource {
    fn from(pairs: Vec<(S, S)>) -> Self {
        TableSource::Pairs(
            pairs
                .into_iter()
                .map(|(category, entity)| (category.into(), entity.into()))
                .collect(),
        )
    }
}

impl<S: Into<String>> From<Vec<(S, S, f64)>> for TableSource {
    fn from(rows: Vec<(S, S, f64)>) -> Self {
        TableSource::Table(RelationTable::from_rows(
            rows.into_iter()
                .map(|(category, entity, value)| Relation::new(category, entity, value))
                .collect(),
        ))
    }
}

/// Normalize raw input into the canonical 3-column table.
pub fn prep_data(source: impl Into<TableSource>) -> Result<RelationTable, EmbedError> {
    RelationTable::from_source(source)
}

/// Construction-time failures of the raw-input boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum EmbedError {
    /// A column mapping needs at least category and entity columns.
    TooFewColumns { found: usize },
    /// Columns in a mapping disagree on length.
    RaggedColumns {
        column: String,
        expected: usize,
        found: usize,
    },
    /// A column holds the wrong kind of data for its position.
    ColumnKind {
        column: String,
        expected: &'static str,
    },
}

impl fmt::Display for EmbedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbedError::TooFewColumns { found } => write!(
                f,
                "input needs at least 2 columns (category, entity), found {}",
                found
            ),
            EmbedError::RaggedColumns {
                column,
                expected,
                found,
            } => write!(
                f,
                "column '{}' has {} rows, expected {}",
                column, found, expected
            ),
            EmbedError::ColumnKind { column, expected } => {
                write!(f, "column '{}' must hold {} data", column, expected)
            }
        }
    }
}

impl std::error::Error for EmbedError {}
