use quick_xml::escape::escape;
use shared::{ExportConfig, ExportFormat};

use crate::domain::export_service::{ExportStrategy, ExportTable};
use crate::errors::ExportError;

/// A rendered, self-contained HTML document ready to hand to a print host
#[derive(Debug, Clone, PartialEq)]
pub struct PrintDocument {
    pub title: String,
    pub html: String,
}

// Inline so the table lays out even when no external stylesheet loads
const PRINT_STYLE: &str = "\
body { font-family: sans-serif; margin: 1em; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #444; padding: 4px 6px; text-align: left; vertical-align: top; }
th { background: #eee; }
tfoot td { border: none; font-size: smaller; }
@media print { thead { display: table-header-group; } tr { page-break-inside: avoid; } }";

/// Minimal HTML table view of the export
#[derive(Debug, Clone)]
pub struct PrintExport {
    title: String,
}

impl PrintExport {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            title: config.print_title.clone(),
        }
    }

    pub fn document(&self, table: &ExportTable<'_>) -> PrintDocument {
        PrintDocument {
            title: self.title.clone(),
            html: self.html(table),
        }
    }

    fn html(&self, table: &ExportTable<'_>) -> String {
        let title = escape(self.title.as_str());
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", title));
        html.push_str(&format!("<style>\n{}\n</style>\n", PRINT_STYLE));
        html.push_str("</head>\n<body>\n");
        html.push_str(&format!("<h1>{}</h1>\n", title));
        html.push_str("<table border=\"1\" cellspacing=\"0\" cellpadding=\"4\">\n");

        html.push_str("<thead>\n<tr>");
        for column in table.columns() {
            html.push_str(&format!("<th>{}</th>", escape(*column)));
        }
        html.push_str("</tr>\n</thead>\n");

        html.push_str("<tbody>\n");
        for row in table.rows() {
            html.push_str("<tr>");
            for cell in table.rendered_cells(row) {
                html.push_str(&format!("<td>{}</td>", escape(cell.as_str())));
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</tbody>\n");

        html.push_str(&format!(
            "<tfoot><tr><td colspan=\"{}\">{} record(s)</td></tr></tfoot>\n",
            table.columns().len().max(1),
            table.rows().len()
        ));
        html.push_str("</table>\n</body>\n</html>\n");
        html
    }
}

impl Default for PrintExport {
    fn default() -> Self {
        Self::new(&ExportConfig::default())
    }
}

impl ExportStrategy for PrintExport {
    fn format(&self) -> ExportFormat {
        ExportFormat::Print
    }

    fn render(&self, table: &ExportTable<'_>) -> Result<String, ExportError> {
        Ok(self.html(table))
    }
}
