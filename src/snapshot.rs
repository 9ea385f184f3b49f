//! Snapshot building and dtype classification.
//!
//! [`TableSnapshot`] is the immutable, JSON-safe description of a table
//! that the client viewer consumes. It is built fresh per render from any
//! [`TabularSource`] in one synchronous pass and discarded afterwards;
//! nothing is cached across calls.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::source::{ColumnType, TabularSource};
use crate::value::{Cell, CellValue, Label};

/// Per-column semantic type tag consumed by the client viewer.
///
/// Columns fitting none of these classes (text, boolean, categorical and
/// so on) stay unclassified and serialize as JSON null; the viewer renders
/// them as plain text. That default is deliberate, not an omission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dtype {
    /// Integral numbers.
    Int,
    /// Floating-point numbers.
    Float,
    /// Calendar dates: every non-missing value sits at midnight.
    Date,
    /// Timestamps carrying a time of day.
    DateTime,
}

/// The immutable, JSON-safe description of a table produced per render.
///
/// The serialized field names are the wire contract: `values`, `columns`,
/// `index`, `columnNames`, `indexNames`, `dtypes`. Invariants, held by
/// construction: every row of `values` has `columns.len()` cells,
/// `values.len() == index.len()`, `dtypes.len() == columns.len()`, and
/// every cell is plain JSON (null, boolean, number or string).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSnapshot {
    values: Vec<Vec<CellValue>>,
    columns: Vec<Label>,
    index: Vec<Label>,
    column_names: Vec<Option<String>>,
    index_names: Vec<Option<String>>,
    dtypes: Vec<Option<Dtype>>,
}

impl TableSnapshot {
    /// Build a snapshot from any tabular source.
    ///
    /// Walks rows in index order and columns in column order, encodes
    /// every cell to its JSON-safe form, copies labels and axis names
    /// verbatim (no sorting, no deduplication), and classifies one dtype
    /// per column from the column's declared type and, for temporal
    /// columns, its extracted cells.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails to produce a cell.
    pub fn from_source<S: TabularSource + ?Sized>(source: &S) -> Result<Self> {
        let rows = source.row_count();
        let cols = source.column_count();

        // One extraction pass: values and dtypes both come from the same
        // observation of the source.
        let mut grid: Vec<Vec<Cell>> = Vec::with_capacity(rows);
        for row in 0..rows {
            let mut record = Vec::with_capacity(cols);
            for col in 0..cols {
                record.push(source.cell(row, col)?);
            }
            grid.push(record);
        }

        let dtypes = (0..cols)
            .map(|col| {
                classify_dtype(
                    source.column_type(col),
                    grid.iter().filter_map(move |record| record.get(col)),
                )
            })
            .collect();

        let values = grid
            .iter()
            .map(|record| record.iter().map(CellValue::encode).collect())
            .collect();

        Ok(Self {
            values,
            columns: (0..cols).map(|col| source.column_label(col)).collect(),
            index: (0..rows).map(|row| source.row_label(row)).collect(),
            column_names: source.column_names(),
            index_names: source.index_names(),
            dtypes,
        })
    }

    /// Row-major cell grid.
    pub fn values(&self) -> &[Vec<CellValue>] {
        &self.values
    }

    /// Column labels in column order.
    pub fn columns(&self) -> &[Label] {
        &self.columns
    }

    /// Row labels in row order.
    pub fn index(&self) -> &[Label] {
        &self.index
    }

    /// Per-level names of the column index.
    pub fn column_names(&self) -> &[Option<String>] {
        &self.column_names
    }

    /// Per-level names of the row index.
    pub fn index_names(&self) -> &[Option<String>] {
        &self.index_names
    }

    /// Per-column dtype tags; `None` means unclassified.
    pub fn dtypes(&self) -> &[Option<Dtype>] {
        &self.dtypes
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.values.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// The JSON text handed to the template as `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails. Cells are JSON-safe by
    /// construction, so this does not happen through the public pipeline.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Classify one column from its declared type and its extracted cells.
///
/// Classification is per column and independent of row order: integral
/// storage is `int`, floating-point is `float`, temporal storage is
/// refined to `date` or `datetime` by inspection, and everything else is
/// left unclassified.
fn classify_dtype<'a>(
    declared: ColumnType,
    cells: impl Iterator<Item = &'a Cell>,
) -> Option<Dtype> {
    match declared {
        ColumnType::Int => Some(Dtype::Int),
        ColumnType::Float => Some(Dtype::Float),
        ColumnType::Temporal => Some(classify_temporal(cells)),
        ColumnType::Bool | ColumnType::Text | ColumnType::Other => None,
    }
}

/// Date versus datetime: drop missing values, then a column whose every
/// remaining value sits at midnight is `date`; any time of day flips the
/// whole column to `datetime`; a column with nothing left defaults to
/// `datetime`.
fn classify_temporal<'a>(cells: impl Iterator<Item = &'a Cell>) -> Dtype {
    let mut any_value = false;
    for cell in cells {
        if cell.is_missing() {
            continue;
        }
        if cell.has_time_of_day() {
            return Dtype::DateTime;
        }
        any_value = true;
    }
    if any_value {
        Dtype::Date
    } else {
        Dtype::DateTime
    }
}
