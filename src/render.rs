//! The render boundary.
//!
//! [`Viewer`] turns any [`TabularSource`] into embeddable HTML: it builds
//! a fresh snapshot, serializes it, generates a unique element id and
//! substitutes both into a template. [`Viewer::render`] is total: every
//! failure anywhere in the pipeline comes back as an inline styled error
//! message, never a panic and never a partial viewer.

use std::fs;
use std::path::Path;

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::snapshot::TableSnapshot;
use crate::source::TabularSource;

/// Placeholder the generated element id is substituted into.
const VIEWER_ID_SLOT: &str = "{{ viewer_id }}";

/// Placeholder the JSON payload is substituted into.
const DATA_SLOT: &str = "{{ data }}";

/// Template embedded at compile time, used by [`Viewer::new`].
const DEFAULT_TEMPLATE: &str = include_str!("../templates/viewer.html");

/// Renders tabular sources as embeddable viewer markup.
///
/// The template is fixed at construction and read-only for the viewer's
/// lifetime. Each render call builds a new snapshot and a new element id;
/// nothing is shared between calls.
///
/// # Example
///
/// ```
/// use mirador::{Cell, Column, ColumnType, Table, Viewer};
///
/// let table = Table::new(vec![Column::new(
///     "n",
///     ColumnType::Int,
///     vec![Cell::from(1), Cell::from(2)],
/// )])
/// .unwrap();
///
/// let markup = Viewer::new().render(&table);
/// assert!(markup.contains("data-viewer"));
/// ```
#[derive(Debug, Clone)]
pub struct Viewer {
    template: String,
}

impl Viewer {
    /// Create a viewer with the embedded default template.
    pub fn new() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }

    /// Create a viewer from template text.
    ///
    /// The template must contain the `{{ viewer_id }}` and `{{ data }}`
    /// placeholders; rendering is literal substitution, not a template
    /// language.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Template`] if either placeholder is missing.
    pub fn from_template(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        for slot in [VIEWER_ID_SLOT, DATA_SLOT] {
            if !template.contains(slot) {
                return Err(Error::template(format!("missing placeholder {slot}")));
            }
        }
        Ok(Self { template })
    }

    /// Create a viewer from a template file, read once at construction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Template`] if it lacks a placeholder.
    pub fn from_template_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let template = fs::read_to_string(path).map_err(|err| Error::io(err, path))?;
        Self::from_template(template)
    }

    /// Render a source, containing every failure.
    ///
    /// On success the markup embeds the snapshot payload; on any failure
    /// the returned markup is an inline error message carrying the
    /// error's description. This method never panics and never returns a
    /// partial viewer.
    pub fn render<S: TabularSource + ?Sized>(&self, source: &S) -> String {
        match self.try_render(source) {
            Ok(markup) => markup,
            Err(err) => error_markup(&err),
        }
    }

    /// Render a source, surfacing failures to the caller.
    ///
    /// Builds a fresh [`TableSnapshot`], serializes it and substitutes it
    /// together with a freshly generated `viewer-{uuid}` element id into
    /// the template.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be walked or the payload
    /// cannot be serialized.
    pub fn try_render<S: TabularSource + ?Sized>(&self, source: &S) -> Result<String> {
        let snapshot = TableSnapshot::from_source(source)?;
        let data = snapshot.to_json()?;
        let viewer_id = format!("viewer-{}", Uuid::new_v4());
        Ok(self
            .template
            .replace(VIEWER_ID_SLOT, &viewer_id)
            .replace(DATA_SLOT, &data))
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

/// Inline error markup shown instead of a viewer.
fn error_markup(err: &Error) -> String {
    format!(
        "<div style='color: red;'>Error rendering data viewer: {}</div>",
        escape_html(&err.to_string())
    )
}

/// Escape text for safe inclusion in HTML.
fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
