//! Export service domain logic.
//!
//! Turns a displayed record set into one of the portable export formats. The
//! column set is derived from the rows, the format is chosen from a closed
//! enumeration and dispatched to a strategy, and printing is delegated to a
//! [`PrintHost`] exactly once per request.

use std::collections::HashSet;

use log::{error, info};
use shared::{ExportConfig, ExportFormat};

use super::export_rows::{export_rows, ExportRow, ToExportRow};
use crate::errors::ExportError;
use crate::io::export::{
    CsvExport, JsonExport, PrintDocument, PrintExport, PrintHost, TextExport, XmlExport,
};

/// Union of all row labels, ordered by first appearance
pub fn derive_columns(rows: &[ExportRow]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut columns = Vec::new();
    for row in rows {
        for label in row.labels() {
            if seen.insert(label) {
                columns.push(label);
            }
        }
    }
    columns
}

/// Rows plus their derived column order, shared by every strategy
#[derive(Debug, Clone)]
pub struct ExportTable<'a> {
    columns: Vec<&'a str>,
    rows: &'a [ExportRow],
}

impl<'a> ExportTable<'a> {
    pub fn new(rows: &'a [ExportRow]) -> Self {
        Self {
            columns: derive_columns(rows),
            rows,
        }
    }

    pub fn columns(&self) -> &[&'a str] {
        &self.columns
    }

    pub fn rows(&self) -> &'a [ExportRow] {
        self.rows
    }

    /// Cell text for `row` in column order; missing cells render as ""
    pub fn rendered_cells<'r>(&'r self, row: &'r ExportRow) -> impl Iterator<Item = String> + 'r {
        self.columns
            .iter()
            .map(move |column| row.get(column).map(|v| v.render()).unwrap_or_default())
    }
}

/// One export format: `(rows) -> artifact`
pub trait ExportStrategy {
    fn format(&self) -> ExportFormat;
    fn render(&self, table: &ExportTable<'_>) -> Result<String, ExportError>;
}

/// Export service that handles all export-related business logic
#[derive(Debug, Clone, Default)]
pub struct ExportService {
    config: ExportConfig,
}

impl ExportService {
    /// Create a new ExportService with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Strategy implementing `format`
    pub fn strategy(&self, format: ExportFormat) -> Box<dyn ExportStrategy> {
        match format {
            ExportFormat::Csv => Box::new(CsvExport),
            ExportFormat::Json => Box::new(JsonExport),
            ExportFormat::Xml => Box::new(XmlExport::new(&self.config)),
            ExportFormat::Text => Box::new(TextExport::new(&self.config)),
            ExportFormat::Print => Box::new(PrintExport::new(&self.config)),
        }
    }

    /// Render `rows` as `format`
    pub fn to_format(&self, format: ExportFormat, rows: &[ExportRow]) -> Result<String, ExportError> {
        let table = ExportTable::new(rows);
        let body = self.strategy(format).render(&table).map_err(|e| {
            error!("❌ EXPORT: {} export failed: {}", format, e);
            e
        })?;
        info!(
            "✅ EXPORT: Rendered {} rows x {} columns as {}",
            rows.len(),
            table.columns().len(),
            format
        );
        Ok(body)
    }

    /// Convert canonical records to rows and render them as `format`
    pub fn export_records<T: ToExportRow>(
        &self,
        format: ExportFormat,
        records: &[T],
    ) -> Result<String, ExportError> {
        self.to_format(format, &export_rows(records))
    }

    /// Render the print document and hand it to `host`.
    ///
    /// The host is invoked exactly once; a host failure is returned to the
    /// caller and not retried.
    pub fn print<H: PrintHost + ?Sized>(
        &self,
        rows: &[ExportRow],
        host: &mut H,
    ) -> Result<PrintDocument, ExportError> {
        let document = PrintExport::new(&self.config).document(&ExportTable::new(rows));

        if let Err(e) = host.print(&document) {
            error!("❌ EXPORT: Print host failed for {:?}: {:#}", document.title, e);
            return Err(ExportError::Print(e));
        }

        info!("🖨️ EXPORT: Printed {} rows as {:?}", rows.len(), document.title);
        Ok(document)
    }
}
