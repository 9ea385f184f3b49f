//! mirador - Tabular Data Viewer Embedding in Pure Rust
//!
//! Turns any labeled tabular dataset into a JSON-safe snapshot and embeds
//! it as interactive viewer markup for notebook display.
//!
//! # Design Principles
//!
//! 1. **Source-agnostic** - Any table adapts through the [`TabularSource`]
//!    trait; nothing depends on a concrete storage library
//! 2. **JSON-safe by construction** - Snapshots carry only null, booleans,
//!    numbers and strings; richer values take their ISO-8601 or plain
//!    string form
//! 3. **Total render boundary** - Rendering never panics and never raises
//!    past the display surface; failures become inline error markup
//! 4. **Ecosystem aligned** - Arrow 53 adapter behind the `arrow` feature
//!
//! # Quick Start
//!
//! ```
//! use mirador::{Cell, Column, ColumnType, Dtype, Table, TableSnapshot, Viewer};
//!
//! let table = Table::new(vec![
//!     Column::new("city", ColumnType::Text, vec![Cell::from("Utrecht"), Cell::from("Leiden")]),
//!     Column::new("population", ColumnType::Int, vec![Cell::from(361_924), Cell::from(127_046)]),
//! ])
//! .unwrap();
//!
//! // The payload the client viewer consumes.
//! let snapshot = TableSnapshot::from_source(&table).unwrap();
//! assert_eq!(snapshot.dtypes(), &[None, Some(Dtype::Int)]);
//!
//! // Embeddable markup; failures come back inline, never as a panic.
//! let markup = Viewer::new().render(&table);
//! assert!(markup.contains("data-viewer"));
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::cast_lossless,
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_precision_loss,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::unreadable_literal
    )
)]
// Allow some pedantic lints for cleaner code
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

#[cfg(feature = "arrow")]
pub mod adapter;
pub mod error;
pub mod render;
pub mod snapshot;
pub mod source;
pub mod table;
pub mod value;

// Re-exports for convenience
#[cfg(feature = "arrow")]
pub use adapter::RecordBatchSource;
// Re-export arrow types commonly needed
#[cfg(feature = "arrow")]
pub use arrow::{
    array::RecordBatch,
    datatypes::{Schema, SchemaRef},
};
pub use error::{Error, Result};
pub use render::Viewer;
pub use snapshot::{Dtype, TableSnapshot};
pub use source::{ColumnType, TabularSource};
pub use table::{Column, Series, Table};
pub use value::{Cell, CellValue, Label};
