use shared::ExportFormat;

use crate::domain::export_service::{ExportStrategy, ExportTable};
use crate::errors::ExportError;

/// RFC 4180 style CSV: header row, then one record per row.
///
/// Fields containing the delimiter, a quote or a line break are wrapped in
/// double quotes with inner quotes doubled.
#[derive(Debug, Clone, Default)]
pub struct CsvExport;

impl ExportStrategy for CsvExport {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn render(&self, table: &ExportTable<'_>) -> Result<String, ExportError> {
        if table.columns().is_empty() {
            return Ok(String::new());
        }

        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(Vec::new());

        writer.write_record(table.columns())?;
        for row in table.rows() {
            writer.write_record(table.rendered_cells(row))?;
        }

        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        Ok(String::from_utf8(bytes)?)
    }
}
