use serde::ser::{Serialize, SerializeMap, Serializer};
use shared::ExportFormat;

use crate::domain::export_rows::ExportRow;
use crate::domain::export_service::{ExportStrategy, ExportTable};
use crate::errors::ExportError;

/// Pretty-printed array of objects, keys in derived column order
#[derive(Debug, Clone, Default)]
pub struct JsonExport;

/// A row serialized in the table's column order; absent cells are omitted
struct OrderedRow<'t> {
    columns: &'t [&'t str],
    row: &'t ExportRow,
}

impl Serialize for OrderedRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for column in self.columns {
            if let Some(value) = self.row.get(column) {
                map.serialize_entry(column, value)?;
            }
        }
        map.end()
    }
}

impl ExportStrategy for JsonExport {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn render(&self, table: &ExportTable<'_>) -> Result<String, ExportError> {
        let rows: Vec<OrderedRow<'_>> = table
            .rows()
            .iter()
            .map(|row| OrderedRow {
                columns: table.columns(),
                row,
            })
            .collect();
        Ok(serde_json::to_string_pretty(&rows)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_keys_follow_first_seen_column_order() {
        let rows = vec![
            ExportRow::new().with("b", 1i64).with("a", "x"),
            ExportRow::new().with("a", "y").with("c", true).with("b", 2i64),
        ];
        let output = JsonExport.render(&ExportTable::new(&rows)).unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();

        let second: Vec<&str> = parsed[1].as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(second, vec!["b", "a", "c"]);
        assert_eq!(parsed[0]["a"], "x");
        assert!(parsed[0].get("c").is_none());
    }

    #[test]
    fn test_output_is_pretty_printed() {
        let rows = vec![ExportRow::new().with("name", "Deli")];
        let output = JsonExport.render(&ExportTable::new(&rows)).unwrap();
        assert_eq!(output, "[\n  {\n    \"name\": \"Deli\"\n  }\n]");
    }

    #[test]
    fn test_empty_and_non_finite_values_become_null() {
        let rows = vec![ExportRow::new().with("gap", None::<f64>).with("ratio", f64::NAN)];
        let output = JsonExport.render(&ExportTable::new(&rows)).unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert!(parsed[0]["gap"].is_null());
        assert!(parsed[0]["ratio"].is_null());
    }

    #[test]
    fn test_no_rows_is_empty_array() {
        assert_eq!(JsonExport.render(&ExportTable::new(&[])).unwrap(), "[]");
    }
}
