//! Export strategies, one per [`shared::ExportFormat`], plus the print host seam.

pub mod csv_export;
pub mod json_export;
pub mod print_export;
pub mod print_host;
pub mod text_export;
pub mod xml_export;

pub use csv_export::CsvExport;
pub use json_export::JsonExport;
pub use print_export::{PrintDocument, PrintExport};
pub use print_host::{FilePrintHost, PrintHost};
pub use text_export::TextExport;
pub use xml_export::{sanitize_element_name, XmlExport};
