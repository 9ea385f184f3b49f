//! The tabular source contract.
//!
//! [`TabularSource`] is the capability trait the snapshot builder depends
//! on: anything exposing labeled rows and columns plus a typed cell grid
//! can adapt to it. Nothing in the crate ties a source to a concrete
//! storage library; [`Table`](crate::Table), [`Series`](crate::Series)
//! and the Arrow adapter are just three implementations.

use crate::error::Result;
use crate::value::{Cell, Label};

/// Declared storage class of a column.
///
/// This is the input to dtype classification: what the source says a
/// column holds, as opposed to what its cells turn out to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Integral numeric storage.
    Int,
    /// Floating-point numeric storage.
    Float,
    /// Boolean storage.
    Bool,
    /// UTF-8 text storage.
    Text,
    /// Date or timestamp storage.
    Temporal,
    /// Mixed, nested, categorical or otherwise untyped storage.
    Other,
}

/// A two-dimensional labeled table that can be snapshotted.
///
/// One-dimensional sequences implement this trait as their single-column
/// promotion (see [`Series`](crate::Series)), so the builder only ever
/// sees tables.
///
/// Label and name accessors take `col < column_count()` and
/// `row < row_count()`; implementations return a null scalar label for
/// positions out of range rather than panicking. Cell access is fallible
/// because a source may discover mid-walk that it cannot produce a value.
pub trait TabularSource: Send + Sync {
    /// Number of rows.
    fn row_count(&self) -> usize;

    /// Number of columns.
    fn column_count(&self) -> usize;

    /// Whether the table has no rows.
    fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// The cell at (row, column).
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot produce the cell, e.g. the
    /// position is out of bounds or the backing storage is inconsistent.
    fn cell(&self, row: usize, col: usize) -> Result<Cell>;

    /// Label of the given column.
    fn column_label(&self, col: usize) -> Label;

    /// Label of the given row.
    fn row_label(&self, row: usize) -> Label;

    /// Declared storage class of the given column.
    fn column_type(&self, col: usize) -> ColumnType;

    /// Names of the column-index levels; unnamed levels are `None`.
    fn column_names(&self) -> Vec<Option<String>>;

    /// Names of the row-index levels; unnamed levels are `None`.
    fn index_names(&self) -> Vec<Option<String>>;
}
