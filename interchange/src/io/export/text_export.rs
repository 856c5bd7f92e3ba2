use shared::{ExportConfig, ExportFormat};

use crate::domain::export_service::{ExportStrategy, ExportTable};
use crate::errors::ExportError;

/// Delimited plain text: a header line, then one line per row.
///
/// Embedded line breaks and delimiters are replaced with a single space so
/// every row stays on one line.
#[derive(Debug, Clone)]
pub struct TextExport {
    delimiter: String,
}

impl TextExport {
    pub fn new(config: &ExportConfig) -> Self {
        let delimiter = if config.text_delimiter.is_empty() {
            ExportConfig::default().text_delimiter
        } else {
            config.text_delimiter.clone()
        };
        Self { delimiter }
    }

    fn clean(&self, value: &str) -> String {
        value
            .replace("\r\n", " ")
            .replace(['\r', '\n'], " ")
            .replace(self.delimiter.as_str(), " ")
    }

    fn line<I: IntoIterator<Item = String>>(&self, cells: I) -> String {
        cells
            .into_iter()
            .map(|cell| self.clean(&cell))
            .collect::<Vec<_>>()
            .join(&self.delimiter)
    }
}

impl Default for TextExport {
    fn default() -> Self {
        Self::new(&ExportConfig::default())
    }
}

impl ExportStrategy for TextExport {
    fn format(&self) -> ExportFormat {
        ExportFormat::Text
    }

    fn render(&self, table: &ExportTable<'_>) -> Result<String, ExportError> {
        if table.columns().is_empty() {
            return Ok(String::new());
        }

        let mut out = self.line(table.columns().iter().map(|c| c.to_string()));
        out.push('\n');
        for row in table.rows() {
            out.push_str(&self.line(table.rendered_cells(row)));
            out.push('\n');
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::export_rows::ExportRow;

    #[test]
    fn test_tab_separated_output() {
        let rows = vec![
            ExportRow::new().with("Name", "Corner Deli").with("Rating", 4.5),
            ExportRow::new().with("Name", "Noodle Bar"),
        ];
        let text = TextExport::default().render(&ExportTable::new(&rows)).unwrap();
        assert_eq!(text, "Name\tRating\nCorner Deli\t4.5\nNoodle Bar\t\n");
    }

    #[test]
    fn test_line_breaks_and_delimiters_are_flattened() {
        let rows = vec![ExportRow::new().with("Address", "12 Main St\nApt 4\tRear")];
        let text = TextExport::default().render(&ExportTable::new(&rows)).unwrap();
        assert_eq!(text, "Address\n12 Main St Apt 4 Rear\n");
    }

    #[test]
    fn test_custom_delimiter() {
        let config = ExportConfig {
            text_delimiter: " | ".to_string(),
            ..ExportConfig::default()
        };
        let rows = vec![ExportRow::new().with("a", 1i64).with("b", 2i64)];
        let text = TextExport::new(&config).render(&ExportTable::new(&rows)).unwrap();
        assert_eq!(text, "a | b\n1 | 2\n");
    }

    #[test]
    fn test_empty_rows_give_empty_body() {
        let text = TextExport::default().render(&ExportTable::new(&[])).unwrap();
        assert_eq!(text, "");
    }
}
