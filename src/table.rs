//! In-memory tabular sources.
//!
//! [`Table`] is a columnar labeled table and [`Series`] a labeled
//! one-dimensional sequence; both implement
//! [`TabularSource`](crate::TabularSource) so data that is not already
//! Arrow-resident can be rendered without conversion. A `Series` presents
//! itself as its single-column promotion.

use crate::error::{Error, Result};
use crate::source::{ColumnType, TabularSource};
use crate::value::{Cell, CellValue, Label};

/// A single labeled, typed column of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    label: Label,
    column_type: ColumnType,
    cells: Vec<Cell>,
}

impl Column {
    /// Create a column from a label, a declared type and its cells.
    pub fn new(label: impl Into<Label>, column_type: ColumnType, cells: Vec<Cell>) -> Self {
        Self {
            label: label.into(),
            column_type,
            cells,
        }
    }

    /// The column's label.
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// The declared storage class.
    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    /// The cells in row order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// An in-memory labeled table.
///
/// Row labels default to positional integers and both axes default to a
/// single unnamed level. Set labels before naming levels: replacing the
/// row labels resets the index names to unnamed at the new depth.
///
/// # Example
///
/// ```
/// use mirador::{Cell, Column, ColumnType, Table, TabularSource};
///
/// let table = Table::new(vec![
///     Column::new("city", ColumnType::Text, vec![Cell::from("Utrecht"), Cell::from("Leiden")]),
///     Column::new("population", ColumnType::Int, vec![Cell::from(361_924), Cell::from(127_046)]),
/// ])
/// .unwrap();
/// assert_eq!(table.row_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_labels: Option<Vec<Label>>,
    column_names: Vec<Option<String>>,
    index_names: Vec<Option<String>>,
    row_count: usize,
}

impl Table {
    /// Create a table from columns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaMismatch`] if the columns differ in length
    /// or their labels span different numbers of index levels.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map_or(0, Column::len);
        for column in &columns {
            if column.len() != row_count {
                return Err(Error::schema_mismatch(format!(
                    "column {:?} has {} rows, expected {}",
                    column.label(),
                    column.len(),
                    row_count
                )));
            }
        }

        let levels = columns.first().map_or(1, |c| c.label().levels());
        for column in &columns {
            if column.label().levels() != levels {
                return Err(Error::schema_mismatch(format!(
                    "column {:?} spans {} label levels, expected {}",
                    column.label(),
                    column.label().levels(),
                    levels
                )));
            }
        }

        Ok(Self {
            columns,
            row_labels: None,
            column_names: vec![None; levels],
            index_names: vec![None],
            row_count,
        })
    }

    /// Replace the default positional row labels.
    ///
    /// Resets the index names to unnamed at the labels' depth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaMismatch`] if the label count differs from
    /// the row count or the labels span different numbers of levels.
    pub fn with_row_labels(mut self, labels: Vec<Label>) -> Result<Self> {
        if labels.len() != self.row_count {
            return Err(Error::schema_mismatch(format!(
                "{} row labels for a table with {} rows",
                labels.len(),
                self.row_count
            )));
        }
        let levels = labels.first().map_or(1, Label::levels);
        if labels.iter().any(|label| label.levels() != levels) {
            return Err(Error::schema_mismatch(
                "row labels span different numbers of index levels",
            ));
        }
        self.index_names = vec![None; levels];
        self.row_labels = Some(labels);
        Ok(self)
    }

    /// Name the column-index levels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaMismatch`] if the name count differs from
    /// the number of column-label levels.
    pub fn with_column_names(mut self, names: Vec<Option<String>>) -> Result<Self> {
        if names.len() != self.column_names.len() {
            return Err(Error::schema_mismatch(format!(
                "{} column names for {} column-label levels",
                names.len(),
                self.column_names.len()
            )));
        }
        self.column_names = names;
        Ok(self)
    }

    /// Name the row-index levels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaMismatch`] if the name count differs from
    /// the number of row-label levels.
    pub fn with_index_names(mut self, names: Vec<Option<String>>) -> Result<Self> {
        if names.len() != self.index_names.len() {
            return Err(Error::schema_mismatch(format!(
                "{} index names for {} row-label levels",
                names.len(),
                self.index_names.len()
            )));
        }
        self.index_names = names;
        Ok(self)
    }

    /// The columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
}

impl TabularSource for Table {
    fn row_count(&self) -> usize {
        self.row_count
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn cell(&self, row: usize, col: usize) -> Result<Cell> {
        let column = self.columns.get(col).ok_or_else(|| {
            Error::source(format!(
                "column {col} out of bounds for table with {} columns",
                self.columns.len()
            ))
        })?;
        column
            .cells
            .get(row)
            .cloned()
            .ok_or(Error::IndexOutOfBounds {
                index: row,
                len: self.row_count,
            })
    }

    fn column_label(&self, col: usize) -> Label {
        self.columns
            .get(col)
            .map_or(Label::Scalar(CellValue::Null), |c| c.label.clone())
    }

    fn row_label(&self, row: usize) -> Label {
        match &self.row_labels {
            Some(labels) => labels
                .get(row)
                .cloned()
                .unwrap_or(Label::Scalar(CellValue::Null)),
            None => Label::position(row),
        }
    }

    fn column_type(&self, col: usize) -> ColumnType {
        self.columns
            .get(col)
            .map_or(ColumnType::Other, Column::column_type)
    }

    fn column_names(&self) -> Vec<Option<String>> {
        self.column_names.clone()
    }

    fn index_names(&self) -> Vec<Option<String>> {
        self.index_names.clone()
    }
}

/// A labeled one-dimensional sequence.
///
/// Snapshots see it as its single-column promotion: one column whose
/// label is the series name, or the integer `0` when unnamed.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: Option<String>,
    column_type: ColumnType,
    cells: Vec<Cell>,
    labels: Option<Vec<Label>>,
    index_names: Vec<Option<String>>,
}

impl Series {
    /// Create a named series.
    pub fn new(name: impl Into<String>, column_type: ColumnType, cells: Vec<Cell>) -> Self {
        Self {
            name: Some(name.into()),
            column_type,
            cells,
            labels: None,
            index_names: vec![None],
        }
    }

    /// Create a series with no name.
    pub fn unnamed(column_type: ColumnType, cells: Vec<Cell>) -> Self {
        Self {
            name: None,
            column_type,
            cells,
            labels: None,
            index_names: vec![None],
        }
    }

    /// Replace the default positional labels.
    ///
    /// Resets the index names to unnamed at the labels' depth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaMismatch`] if the label count differs from
    /// the cell count or the labels span different numbers of levels.
    pub fn with_labels(mut self, labels: Vec<Label>) -> Result<Self> {
        if labels.len() != self.cells.len() {
            return Err(Error::schema_mismatch(format!(
                "{} labels for a series with {} values",
                labels.len(),
                self.cells.len()
            )));
        }
        let levels = labels.first().map_or(1, Label::levels);
        if labels.iter().any(|label| label.levels() != levels) {
            return Err(Error::schema_mismatch(
                "series labels span different numbers of index levels",
            ));
        }
        self.index_names = vec![None; levels];
        self.labels = Some(labels);
        Ok(self)
    }

    /// Name the row-index levels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaMismatch`] if the name count differs from
    /// the number of label levels.
    pub fn with_index_names(mut self, names: Vec<Option<String>>) -> Result<Self> {
        if names.len() != self.index_names.len() {
            return Err(Error::schema_mismatch(format!(
                "{} index names for {} label levels",
                names.len(),
                self.index_names.len()
            )));
        }
        self.index_names = names;
        Ok(self)
    }

    /// The series name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the series has no values.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl TabularSource for Series {
    fn row_count(&self) -> usize {
        self.cells.len()
    }

    fn column_count(&self) -> usize {
        1
    }

    fn cell(&self, row: usize, col: usize) -> Result<Cell> {
        if col != 0 {
            return Err(Error::source(format!(
                "column {col} out of bounds for a single-column series"
            )));
        }
        self.cells
            .get(row)
            .cloned()
            .ok_or(Error::IndexOutOfBounds {
                index: row,
                len: self.cells.len(),
            })
    }

    fn column_label(&self, _col: usize) -> Label {
        match &self.name {
            Some(name) => Label::from(name.clone()),
            // An unnamed sequence promotes to column 0, like an unnamed
            // series becoming a one-column frame.
            None => Label::Scalar(CellValue::Int(0)),
        }
    }

    fn row_label(&self, row: usize) -> Label {
        match &self.labels {
            Some(labels) => labels
                .get(row)
                .cloned()
                .unwrap_or(Label::Scalar(CellValue::Null)),
            None => Label::position(row),
        }
    }

    fn column_type(&self, _col: usize) -> ColumnType {
        self.column_type
    }

    fn column_names(&self) -> Vec<Option<String>> {
        vec![None]
    }

    fn index_names(&self) -> Vec<Option<String>> {
        self.index_names.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_table() -> Table {
        Table::new(vec![
            Column::new("a", ColumnType::Int, vec![Cell::from(1), Cell::from(2)]),
            Column::new(
                "b",
                ColumnType::Text,
                vec![Cell::from("x"), Cell::from("y")],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_table_shape() {
        let table = small_table();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_table_rejects_ragged_columns() {
        let err = Table::new(vec![
            Column::new("a", ColumnType::Int, vec![Cell::from(1)]),
            Column::new("b", ColumnType::Int, vec![Cell::from(1), Cell::from(2)]),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch { .. }));
    }

    #[test]
    fn test_table_rejects_mixed_label_depth() {
        let err = Table::new(vec![
            Column::new("a", ColumnType::Int, vec![Cell::from(1)]),
            Column::new(("x", "y"), ColumnType::Int, vec![Cell::from(1)]),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch { .. }));
    }

    #[test]
    fn test_table_cell_access() {
        let table = small_table();
        assert_eq!(table.cell(0, 0).unwrap(), Cell::Int(1));
        assert_eq!(table.cell(1, 1).unwrap(), Cell::Str("y".to_string()));
    }

    #[test]
    fn test_table_exposes_its_columns() {
        let table = small_table();
        let columns = table.columns();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].label(), &Label::from("a"));
        assert_eq!(columns[0].cells(), &[Cell::Int(1), Cell::Int(2)]);
        assert_eq!(columns[0].len(), 2);
        assert!(!columns[0].is_empty());
        assert_eq!(columns[1].column_type(), ColumnType::Text);
    }

    #[test]
    fn test_table_cell_out_of_bounds() {
        let table = small_table();
        assert!(matches!(
            table.cell(5, 0),
            Err(Error::IndexOutOfBounds { index: 5, len: 2 })
        ));
        assert!(matches!(table.cell(0, 9), Err(Error::Source { .. })));
    }

    #[test]
    fn test_table_default_row_labels_are_positional() {
        let table = small_table();
        assert_eq!(table.row_label(0), Label::position(0));
        assert_eq!(table.row_label(1), Label::position(1));
    }

    #[test]
    fn test_table_explicit_row_labels() {
        let table = small_table()
            .with_row_labels(vec![Label::from("r1"), Label::from("r2")])
            .unwrap();
        assert_eq!(table.row_label(0), Label::from("r1"));
    }

    #[test]
    fn test_table_row_label_count_checked() {
        let err = small_table()
            .with_row_labels(vec![Label::from("only one")])
            .unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch { .. }));
    }

    #[test]
    fn test_table_multi_level_row_labels_widen_index_names() {
        let table = small_table()
            .with_row_labels(vec![Label::from(("a", "x")), Label::from(("a", "y"))])
            .unwrap()
            .with_index_names(vec![Some("outer".to_string()), None])
            .unwrap();
        assert_eq!(
            table.index_names(),
            vec![Some("outer".to_string()), None]
        );
    }

    #[test]
    fn test_table_column_names_depth_checked() {
        let err = small_table()
            .with_column_names(vec![None, None])
            .unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch { .. }));
    }

    #[test]
    fn test_table_column_types() {
        let table = small_table();
        assert_eq!(table.column_type(0), ColumnType::Int);
        assert_eq!(table.column_type(1), ColumnType::Text);
        assert_eq!(table.column_type(9), ColumnType::Other);
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new(Vec::new()).unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
        assert_eq!(table.column_names(), vec![None]);
        assert_eq!(table.index_names(), vec![None]);
    }

    #[test]
    fn test_series_is_single_column() {
        let series = Series::new(
            "score",
            ColumnType::Float,
            vec![Cell::from(1.5), Cell::from(2.5)],
        );
        assert_eq!(series.row_count(), 2);
        assert_eq!(series.column_count(), 1);
        assert_eq!(series.column_label(0), Label::from("score"));
        assert_eq!(series.cell(1, 0).unwrap(), Cell::Float(2.5));
    }

    #[test]
    fn test_unnamed_series_promotes_to_column_zero() {
        let series = Series::unnamed(ColumnType::Int, vec![Cell::from(1)]);
        assert_eq!(series.column_label(0), Label::Scalar(CellValue::Int(0)));
    }

    #[test]
    fn test_series_rejects_second_column() {
        let series = Series::unnamed(ColumnType::Int, vec![Cell::from(1)]);
        assert!(matches!(series.cell(0, 1), Err(Error::Source { .. })));
    }

    #[test]
    fn test_series_explicit_labels() {
        let series = Series::new("v", ColumnType::Int, vec![Cell::from(1), Cell::from(2)])
            .with_labels(vec![Label::from("a"), Label::from("b")])
            .unwrap();
        assert_eq!(series.row_label(1), Label::from("b"));
    }

    #[test]
    fn test_series_label_count_checked() {
        let err = Series::new("v", ColumnType::Int, vec![Cell::from(1)])
            .with_labels(vec![Label::from("a"), Label::from("b")])
            .unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch { .. }));
    }
}
