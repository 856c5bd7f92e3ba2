//! # Export Rows
//!
//! Flattened label→value rows built from canonical records at export time.
//! Rows keep insertion order; the column set of an export is derived from the
//! rows themselves (see [`crate::domain::export_service::ExportTable`]).

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use shared::{CanonicalRecord, Category, Merchant, Recipe, Subcategory};

/// A primitive display value
#[derive(Debug, Clone, PartialEq)]
pub enum ExportValue {
    Empty,
    Text(String),
    Integer(i64),
    Number(f64),
    Flag(bool),
}

impl ExportValue {
    /// Locale-independent display text; `Empty` renders as ""
    pub fn render(&self) -> String {
        match self {
            ExportValue::Empty => String::new(),
            ExportValue::Text(s) => s.clone(),
            ExportValue::Integer(i) => i.to_string(),
            ExportValue::Number(n) => n.to_string(),
            ExportValue::Flag(b) => b.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ExportValue::Empty)
    }

    fn from_json_scalar(value: &Value) -> Self {
        match value {
            Value::Null => ExportValue::Empty,
            Value::Bool(b) => ExportValue::Flag(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ExportValue::Integer(i),
                None => n.as_f64().map_or(ExportValue::Empty, ExportValue::Number),
            },
            Value::String(s) => ExportValue::Text(s.clone()),
            Value::Array(items) => ExportValue::Integer(items.len() as i64),
            Value::Object(_) => ExportValue::Empty,
        }
    }
}

impl Serialize for ExportValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ExportValue::Empty => serializer.serialize_unit(),
            ExportValue::Text(s) => serializer.serialize_str(s),
            ExportValue::Integer(i) => serializer.serialize_i64(*i),
            ExportValue::Number(n) => serializer.serialize_f64(*n),
            ExportValue::Flag(b) => serializer.serialize_bool(*b),
        }
    }
}

impl From<&str> for ExportValue {
    fn from(s: &str) -> Self {
        ExportValue::Text(s.to_string())
    }
}

impl From<String> for ExportValue {
    fn from(s: String) -> Self {
        ExportValue::Text(s)
    }
}

impl From<i64> for ExportValue {
    fn from(i: i64) -> Self {
        ExportValue::Integer(i)
    }
}

impl From<u32> for ExportValue {
    fn from(i: u32) -> Self {
        ExportValue::Integer(i64::from(i))
    }
}

impl From<usize> for ExportValue {
    fn from(i: usize) -> Self {
        ExportValue::Integer(i as i64)
    }
}

impl From<f64> for ExportValue {
    fn from(n: f64) -> Self {
        ExportValue::Number(n)
    }
}

impl From<bool> for ExportValue {
    fn from(b: bool) -> Self {
        ExportValue::Flag(b)
    }
}

impl<T: Into<ExportValue>> From<Option<T>> for ExportValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ExportValue::Empty, Into::into)
    }
}

/// Ordered mapping from column label to display value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportRow {
    cells: Vec<(String, ExportValue)>,
}

impl ExportRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`ExportRow::insert`]
    pub fn with(mut self, label: impl Into<String>, value: impl Into<ExportValue>) -> Self {
        self.insert(label, value);
        self
    }

    /// Set a cell; an existing label keeps its position and takes the new value
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<ExportValue>) {
        let label = label.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(l, _)| *l == label) {
            Some((_, existing)) => *existing = value,
            None => self.cells.push((label, value)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&ExportValue> {
        self.cells.iter().find(|(l, _)| l == label).map(|(_, v)| v)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExportValue)> {
        self.cells.iter().map(|(l, v)| (l.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flatten any serializable record into a row.
    ///
    /// Nested objects become dotted labels (`address.city`), arrays become
    /// their element count, and a non-object value lands in a `value` column.
    pub fn from_serialize<T: Serialize>(record: &T) -> Result<Self, serde_json::Error> {
        let value = serde_json::to_value(record)?;
        let mut row = ExportRow::new();
        match &value {
            Value::Object(_) => flatten_into(&mut row, "", &value),
            other => row.insert("value", ExportValue::from_json_scalar(other)),
        }
        Ok(row)
    }
}

fn flatten_into(row: &mut ExportRow, prefix: &str, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let label = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_into(row, &label, child);
            }
        }
        scalar => row.insert(prefix, ExportValue::from_json_scalar(scalar)),
    }
}

impl Serialize for ExportRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (label, value) in &self.cells {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

/// Records that know how to present themselves in an export
pub trait ToExportRow {
    fn to_export_row(&self) -> ExportRow;
}

/// Convert a displayed record set into export rows
pub fn export_rows<T: ToExportRow>(records: &[T]) -> Vec<ExportRow> {
    records.iter().map(ToExportRow::to_export_row).collect()
}

impl ToExportRow for Recipe {
    fn to_export_row(&self) -> ExportRow {
        ExportRow::new()
            .with("ID", self.id.as_str())
            .with("Name", self.name.as_str())
            .with("Description", self.description.as_str())
            .with("Category ID", self.category_id.as_str())
            .with("Subcategory ID", self.subcategory_id.as_str())
            .with("Merchant ID", self.merchant_id.as_str())
            .with("Image URL", self.image_url.as_str())
            .with("Prep Time (min)", self.prep_time_minutes)
            .with("Cook Time (min)", self.cook_time_minutes)
            .with("Servings", self.servings)
            .with("Price", self.price)
            .with("Active", self.is_active)
            .with("Featured", self.is_featured)
            .with("Ingredients", self.ingredients.len())
            .with("Steps", self.instructions.len())
            .with("Tags", self.tags.join("; "))
            .with("Created At", self.created_at.as_str())
            .with("Updated At", self.updated_at.as_str())
    }
}

impl ToExportRow for Category {
    fn to_export_row(&self) -> ExportRow {
        ExportRow::new()
            .with("ID", self.id.as_str())
            .with("Name", self.name.as_str())
            .with("Slug", self.slug.as_str())
            .with("Description", self.description.as_str())
            .with("Image URL", self.image_url.as_str())
            .with("Sort Order", self.sort_order)
            .with("Subcategories", self.subcategory_count)
            .with("Active", self.is_active)
            .with("Created At", self.created_at.as_str())
            .with("Updated At", self.updated_at.as_str())
    }
}

impl ToExportRow for Subcategory {
    fn to_export_row(&self) -> ExportRow {
        ExportRow::new()
            .with("ID", self.id.as_str())
            .with("Category ID", self.category_id.as_str())
            .with("Name", self.name.as_str())
            .with("Slug", self.slug.as_str())
            .with("Description", self.description.as_str())
            .with("Image URL", self.image_url.as_str())
            .with("Sort Order", self.sort_order)
            .with("Recipes", self.recipe_count)
            .with("Active", self.is_active)
            .with("Created At", self.created_at.as_str())
            .with("Updated At", self.updated_at.as_str())
    }
}

impl ToExportRow for Merchant {
    fn to_export_row(&self) -> ExportRow {
        ExportRow::new()
            .with("ID", self.id.as_str())
            .with("Business Name", self.business_name.as_str())
            .with("Owner", self.owner_name.as_str())
            .with("Email", self.email.as_str())
            .with("Phone", self.phone.as_str())
            .with("Address", self.address.as_str())
            .with("City", self.city.as_str())
            .with("Rating", self.rating)
            .with("Commission (%)", self.commission_rate)
            .with("Active", self.is_active)
            .with("Verified", self.is_verified)
            .with("Created At", self.created_at.as_str())
            .with("Updated At", self.updated_at.as_str())
    }
}

impl ToExportRow for CanonicalRecord {
    fn to_export_row(&self) -> ExportRow {
        match self {
            CanonicalRecord::Recipe(r) => r.to_export_row(),
            CanonicalRecord::Category(c) => c.to_export_row(),
            CanonicalRecord::Subcategory(s) => s.to_export_row(),
            CanonicalRecord::Merchant(m) => m.to_export_row(),
        }
    }
}
