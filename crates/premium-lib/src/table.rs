//! Columnar table model
//!
//! A [`Table`] is an ordered set of uniquely named, equal-length columns.
//! Row `i` of every column belongs to the same sample, and every operation
//! in this crate preserves row order.

use crate::error::{FrameError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of values held by a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Numeric,
    Text,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Numeric => f.write_str("numeric"),
            ColumnType::Text => f.write_str("text"),
        }
    }
}

/// Values of a single column
///
/// One-hot encoded categories are stored as `Numeric` 0/1 values. `Text`
/// holds categorical strings that were never encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum ColumnData {
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(values) => values.len(),
            ColumnData::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnData::Numeric(_) => ColumnType::Numeric,
            ColumnData::Text(_) => ColumnType::Text,
        }
    }

    pub fn as_numeric(&self) -> Option<&[f64]> {
        match self {
            ColumnData::Numeric(values) => Some(values),
            ColumnData::Text(_) => None,
        }
    }
}

impl From<Vec<f64>> for ColumnData {
    fn from(values: Vec<f64>) -> Self {
        ColumnData::Numeric(values)
    }
}

impl From<Vec<String>> for ColumnData {
    fn from(values: Vec<String>) -> Self {
        ColumnData::Text(values)
    }
}

impl From<Vec<&str>> for ColumnData {
    fn from(values: Vec<&str>) -> Self {
        ColumnData::Text(values.into_iter().map(str::to_string).collect())
    }
}

/// A named column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: impl Into<ColumnData>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Numeric view of the column, or `TypeMismatch` for text columns
    pub fn numeric(&self) -> Result<&[f64]> {
        self.data.as_numeric().ok_or_else(|| FrameError::TypeMismatch {
            column: self.name.clone(),
            found: self.data.column_type(),
        })
    }
}

/// Ordered collection of equal-length named columns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Column>", into = "Vec<Column>")]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Create a table with no columns and no rows
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column, consuming and returning the table
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        data: impl Into<ColumnData>,
    ) -> Result<Self> {
        self.push_column(name, data)?;
        Ok(self)
    }

    /// Append a column at the right edge of the table
    ///
    /// The first column fixes the row count; later columns must match it.
    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        data: impl Into<ColumnData>,
    ) -> Result<()> {
        let column = Column::new(name, data);

        if self.contains(&column.name) {
            return Err(FrameError::DuplicateColumn {
                column: column.name,
            });
        }
        if !self.columns.is_empty() && column.len() != self.n_rows {
            return Err(FrameError::shape(
                format!("column `{}`", column.name),
                self.n_rows,
                column.len(),
            ));
        }

        self.n_rows = column.len();
        self.columns.push(column);
        Ok(())
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// True when the table has no columns, regardless of row count
    pub fn has_no_columns(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in declaration order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Numeric values of `name`
    pub fn numeric(&self, name: &str) -> Result<&[f64]> {
        self.column(name)
            .ok_or_else(|| FrameError::missing(name))?
            .numeric()
    }

    /// Names of the columns starting with `prefix`, in declaration order
    ///
    /// Matching is purely by name: a general numeric column that happens to
    /// share the prefix of a one-hot group is returned too.
    pub fn columns_with_prefix(&self, prefix: &str) -> Vec<&str> {
        self.columns
            .iter()
            .map(|c| c.name.as_str())
            .filter(|name| name.starts_with(prefix))
            .collect()
    }
}

impl TryFrom<Vec<Column>> for Table {
    type Error = FrameError;

    fn try_from(columns: Vec<Column>) -> Result<Self> {
        let mut table = Table::new();
        for column in columns {
            table.push_column(column.name, column.data)?;
        }
        Ok(table)
    }
}

impl From<Table> for Vec<Column> {
    fn from(table: Table) -> Self {
        table.columns
    }
}
