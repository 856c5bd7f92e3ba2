//! Data interchange layer for the operations dashboard.
//!
//! Two directions:
//! - **Ingest**: loosely typed backend payloads ([`WireRecord`]) are normalized
//!   into the canonical records of the `shared` crate. Normalization never
//!   fails; missing or malformed fields take defined defaults.
//! - **Export**: canonical records become [`ExportRow`]s and are rendered as
//!   CSV, JSON, XML, delimited text or a print document.
//!
//! ```
//! use opsdash_interchange::{export_rows, normalize, to_format, ExportFormat, RecordKind};
//! use serde_json::json;
//!
//! let wire = json!({"title": "Pad Thai", "ingredients": "Rice noodles\nPeanuts"});
//! let recipe = normalize(RecordKind::Recipe, &wire);
//! let csv = to_format(ExportFormat::Csv, &export_rows(&[recipe])).unwrap();
//! assert!(csv.contains("Pad Thai"));
//! ```

pub mod domain;
pub mod errors;
pub mod io;

pub use domain::export_rows::{export_rows, ExportRow, ExportValue, ToExportRow};
pub use domain::export_service::{ExportService, ExportStrategy, ExportTable};
pub use domain::wire::WireRecord;
pub use errors::ExportError;
pub use io::export::{FilePrintHost, PrintDocument, PrintHost};
pub use io::rest::mappers::{
    denormalize, denormalize_batch, normalize, normalize_batch, normalize_payload,
};
pub use shared::{
    CanonicalRecord, Category, ExportConfig, ExportFormat, Ingredient, InstructionStep, Merchant,
    Recipe, RecordKind, Subcategory,
};

/// Render `rows` as `format` with the default configuration
pub fn to_format(format: ExportFormat, rows: &[ExportRow]) -> Result<String, ExportError> {
    ExportService::new().to_format(format, rows)
}

/// Print `rows` through `host` with the default configuration
pub fn print<H: PrintHost + ?Sized>(
    rows: &[ExportRow],
    host: &mut H,
) -> Result<PrintDocument, ExportError> {
    ExportService::new().print(rows, host)
}
