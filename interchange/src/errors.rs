//! Error types for the export side of the interchange layer.
//!
//! Normalization has no error type: malformed wire input is always resolved
//! to type defaults. Export has exactly one domain failure, an XML element
//! name collision; the remaining variants wrap writer failures.

use std::string::FromUtf8Error;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("columns {first:?} and {second:?} both map to XML element <{element}>")]
    XmlElementCollision {
        element: String,
        first: String,
        second: String,
    },
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write XML: {0}")]
    Xml(String),
    #[error("export buffer error: {0}")]
    Io(#[from] std::io::Error),
    #[error("export output is not valid UTF-8: {0}")]
    Encoding(#[from] FromUtf8Error),
    #[error("print failed: {0:#}")]
    Print(#[source] anyhow::Error),
}

impl ExportError {
    /// True for failures caused by the row data rather than the writers
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, ExportError::XmlElementCollision { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_message_names_both_columns() {
        let err = ExportError::XmlElementCollision {
            element: "Unit_Price".to_string(),
            first: "Unit Price".to_string(),
            second: "Unit_Price".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("\"Unit Price\""));
        assert!(message.contains("<Unit_Price>"));
        assert!(err.is_constraint_violation());
    }

    #[test]
    fn test_print_error_keeps_context() {
        let err = ExportError::Print(anyhow::anyhow!("printer offline").context("spooling document"));
        assert!(err.to_string().contains("printer offline"));
        assert!(!err.is_constraint_violation());
    }
}
