#![allow(clippy::unwrap_used)]
//! Property-based tests for snapshot construction.
//!
//! Uses proptest to verify the structural invariants hold across random
//! tables: shape, missing-to-null mapping, dtype classification and wire
//! round-trips.

use chrono::NaiveDate;
use proptest::prelude::*;

use mirador::{
    Cell, Column, ColumnType, Dtype, Table, TableSnapshot, TabularSource, Viewer,
};

/// One column worth of generated input: declared type plus cells.
type ColumnSpec = (ColumnType, Vec<Cell>);

// ═══════════════════════════════════════════════════════════════════════════════
// PROPERTY TESTS: Snapshot shape
// ═══════════════════════════════════════════════════════════════════════════════

proptest! {
    /// Property: Snapshot dimensions mirror the source dimensions
    #[test]
    fn prop_shape_matches_source(specs in column_specs_strategy()) {
        let table = build_table(&specs);
        let snapshot = TableSnapshot::from_source(&table).unwrap();

        prop_assert_eq!(snapshot.row_count(), table.row_count());
        prop_assert_eq!(snapshot.column_count(), table.column_count());
        prop_assert_eq!(snapshot.values().len(), table.row_count());
        for row in snapshot.values() {
            prop_assert_eq!(row.len(), table.column_count());
        }
        prop_assert_eq!(snapshot.columns().len(), table.column_count());
        prop_assert_eq!(snapshot.index().len(), table.row_count());
        prop_assert_eq!(snapshot.dtypes().len(), table.column_count());
    }

    /// Property: Building twice from the same source yields identical snapshots
    #[test]
    fn prop_rebuild_is_deterministic(specs in column_specs_strategy()) {
        let table = build_table(&specs);
        let first = TableSnapshot::from_source(&table).unwrap();
        let second = TableSnapshot::from_source(&table).unwrap();
        prop_assert_eq!(first, second);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PROPERTY TESTS: Missing values and dtypes
// ═══════════════════════════════════════════════════════════════════════════════

proptest! {
    /// Property: A payload cell is null exactly when the source cell is missing
    #[test]
    fn prop_missing_iff_null(specs in column_specs_strategy()) {
        let table = build_table(&specs);
        let snapshot = TableSnapshot::from_source(&table).unwrap();

        for row in 0..table.row_count() {
            for col in 0..table.column_count() {
                let missing = table.cell(row, col).unwrap().is_missing();
                prop_assert_eq!(missing, snapshot.values()[row][col].is_null());
            }
        }
    }

    /// Property: Classification follows the declared column kind
    #[test]
    fn prop_dtype_follows_declared_kind(specs in column_specs_strategy()) {
        let table = build_table(&specs);
        let snapshot = TableSnapshot::from_source(&table).unwrap();

        for (col, (kind, _)) in specs.iter().enumerate() {
            let dtype = snapshot.dtypes()[col];
            match kind {
                ColumnType::Int => prop_assert_eq!(dtype, Some(Dtype::Int)),
                ColumnType::Float => prop_assert_eq!(dtype, Some(Dtype::Float)),
                ColumnType::Temporal => prop_assert!(matches!(
                    dtype,
                    Some(Dtype::Date) | Some(Dtype::DateTime)
                )),
                ColumnType::Bool | ColumnType::Text | ColumnType::Other => {
                    prop_assert_eq!(dtype, None);
                }
            }
        }
    }

    /// Property: Reversing the rows never changes any dtype
    #[test]
    fn prop_row_reversal_preserves_dtypes(specs in column_specs_strategy()) {
        let reversed: Vec<ColumnSpec> = specs
            .iter()
            .map(|(kind, cells)| (*kind, cells.iter().rev().cloned().collect()))
            .collect();

        let forward = TableSnapshot::from_source(&build_table(&specs)).unwrap();
        let backward = TableSnapshot::from_source(&build_table(&reversed)).unwrap();
        prop_assert_eq!(forward.dtypes(), backward.dtypes());
    }

    /// Property: Rotating the columns rotates the dtypes with them
    #[test]
    fn prop_column_rotation_rotates_dtypes(specs in column_specs_strategy()) {
        let base = TableSnapshot::from_source(&build_table(&specs)).unwrap();
        let mid = specs.len().min(1);

        let mut rotated_specs = specs.clone();
        rotated_specs.rotate_left(mid);
        let rotated = TableSnapshot::from_source(&build_table(&rotated_specs)).unwrap();

        let mut expected = base.dtypes().to_vec();
        expected.rotate_left(mid);
        prop_assert_eq!(rotated.dtypes(), &expected[..]);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PROPERTY TESTS: Wire format and render boundary
// ═══════════════════════════════════════════════════════════════════════════════

proptest! {
    /// Property: The payload survives a JSON round-trip unchanged
    #[test]
    fn prop_json_round_trip(specs in column_specs_strategy()) {
        let snapshot = TableSnapshot::from_source(&build_table(&specs)).unwrap();
        let json = snapshot.to_json().unwrap();
        let back: TableSnapshot = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, snapshot);
    }

    /// Property: Rendering any well-formed table produces viewer markup
    #[test]
    fn prop_render_always_produces_markup(specs in column_specs_strategy()) {
        let table = build_table(&specs);
        let markup = Viewer::new().try_render(&table).unwrap();
        prop_assert!(markup.contains("viewer-"));
        prop_assert!(!markup.contains("{{ viewer_id }}"));
        prop_assert!(!markup.contains("{{ data }}"));
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// STRATEGY GENERATORS
// ═══════════════════════════════════════════════════════════════════════════════

fn epoch_day(offset: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + chrono::Days::new(u64::from(offset))
}

/// Strategy for a single cell, covering every storage kind plus missing.
/// Floats include the non-finite values: NaN counts as missing, while the
/// infinities must survive as payload cells.
fn cell_strategy() -> impl Strategy<Value = Cell> {
    prop_oneof![
        Just(Cell::Missing),
        any::<bool>().prop_map(Cell::Bool),
        any::<i64>().prop_map(Cell::Int),
        prop_oneof![
            (-1.0e9..1.0e9_f64),
            Just(f64::INFINITY),
            Just(f64::NEG_INFINITY),
            Just(f64::NAN),
        ]
        .prop_map(Cell::Float),
        "[a-z]{0,8}".prop_map(Cell::Str),
        (0u32..3650).prop_map(|d| Cell::Date(epoch_day(d))),
        (0u32..3650, 0u32..24, 0u32..60).prop_map(|(d, h, m)| {
            Cell::DateTime(epoch_day(d).and_hms_opt(h, m, 0).unwrap())
        }),
    ]
}

fn column_type_strategy() -> impl Strategy<Value = ColumnType> {
    prop_oneof![
        Just(ColumnType::Int),
        Just(ColumnType::Float),
        Just(ColumnType::Bool),
        Just(ColumnType::Text),
        Just(ColumnType::Temporal),
        Just(ColumnType::Other),
    ]
}

/// Strategy for a whole table: up to 5 rows and 4 columns, every column
/// the same length.
fn column_specs_strategy() -> impl Strategy<Value = Vec<ColumnSpec>> {
    (0usize..6, 0usize..5).prop_flat_map(|(rows, cols)| {
        proptest::collection::vec(
            (
                column_type_strategy(),
                proptest::collection::vec(cell_strategy(), rows),
            ),
            cols,
        )
    })
}

fn build_table(specs: &[ColumnSpec]) -> Table {
    let columns = specs
        .iter()
        .enumerate()
        .map(|(i, (kind, cells))| Column::new(format!("c{i}"), *kind, cells.clone()))
        .collect();
    Table::new(columns).unwrap()
}
