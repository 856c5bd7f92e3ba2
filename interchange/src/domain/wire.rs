//! Reading and writing untyped wire records through [`FieldSpec`] tables.

use log::debug;
use serde_json::{Map, Value};
use shared::RecordKind;
use uuid::Uuid;

use super::coerce;
use super::field_mapping::{FieldSpec, FieldType};
use super::shape::{CollectionShape, Element, ParagraphRule};

/// An untyped payload as received from, or sent to, a backend endpoint
pub type WireRecord = Value;

/// Namespace for synthetic collection element identifiers
const ELEMENT_ID_NAMESPACE: Uuid = Uuid::from_u128(0x6f1d_3c2a_8b47_4e0f_9a51_2d7c_e0b3_a914);

/// Identifier for the `index`th element of a collection field.
///
/// Derived from the owning record rather than any wire identifier, so the
/// same payload always yields the same identifiers.
pub fn synthetic_id(kind: RecordKind, record_id: &str, field: &str, index: usize) -> String {
    let name = format!("{}:{}:{}:{}", kind.as_str(), record_id, field, index);
    Uuid::new_v5(&ELEMENT_ID_NAMESPACE, name.as_bytes()).to_string()
}

/// Read-side view over a wire object; non-objects read as empty
#[derive(Debug, Clone, Copy)]
pub struct WireView<'a> {
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> WireView<'a> {
    pub fn new(wire: &'a WireRecord) -> Self {
        Self {
            fields: wire.as_object(),
        }
    }

    pub fn from_map(map: &'a Map<String, Value>) -> Self {
        Self { fields: Some(map) }
    }

    /// First candidate key present in the payload, even if its value is `null`
    pub fn resolve(&self, spec: &FieldSpec) -> Option<&'a Value> {
        let fields = self.fields?;
        spec.wire_names.iter().find_map(|name| fields.get(*name))
    }

    pub fn text(&self, spec: &FieldSpec) -> String {
        coerce::text(self.resolve(spec))
    }

    pub fn integer(&self, spec: &FieldSpec) -> i64 {
        let fallback = match spec.field_type {
            FieldType::Integer { fallback } => fallback,
            _ => 0,
        };
        let value = self.resolve(spec);
        let parsed = coerce::integer(value, fallback);
        if parsed == fallback && fallback != 0 && value.is_some_and(|v| !v.is_null()) {
            debug!("NORMALIZE: {} = {:?} used fallback {}", spec.canonical, value, fallback);
        }
        parsed
    }

    pub fn count(&self, spec: &FieldSpec) -> u32 {
        self.integer(spec).clamp(0, i64::from(u32::MAX)) as u32
    }

    pub fn decimal(&self, spec: &FieldSpec) -> f64 {
        let fallback = match spec.field_type {
            FieldType::Decimal { fallback } => fallback,
            _ => 0.0,
        };
        coerce::decimal(self.resolve(spec), fallback)
    }

    pub fn flag(&self, spec: &FieldSpec) -> bool {
        coerce::flag(self.resolve(spec))
    }

    pub fn timestamp(&self, spec: &FieldSpec) -> String {
        coerce::timestamp(self.resolve(spec))
    }

    /// Classify and flatten a collection field
    pub fn elements(&self, spec: &FieldSpec, paragraph: ParagraphRule) -> Vec<Element<'a>> {
        let shape = CollectionShape::classify(self.resolve(spec));
        if shape == CollectionShape::Unrecognized {
            debug!("NORMALIZE: {} has an unrecognized shape, using empty list", spec.canonical);
        }
        shape.into_elements(paragraph)
    }
}

/// Write-side builder emitting each field under its preferred wire name
#[derive(Debug, Default)]
pub struct WireWriter {
    fields: Map<String, Value>,
}

impl WireWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(mut self, spec: &FieldSpec, value: Value) -> Self {
        self.fields.insert(spec.write_name().to_string(), value);
        self
    }

    pub fn text(self, spec: &FieldSpec, value: &str) -> Self {
        self.value(spec, Value::String(value.to_string()))
    }

    /// Like [`WireWriter::text`] but skips empty values
    pub fn text_if_present(self, spec: &FieldSpec, value: &str) -> Self {
        if value.is_empty() {
            self
        } else {
            self.text(spec, value)
        }
    }

    pub fn integer(self, spec: &FieldSpec, value: impl Into<i64>) -> Self {
        self.value(spec, Value::from(value.into()))
    }

    pub fn decimal(self, spec: &FieldSpec, value: f64) -> Self {
        self.value(spec, Value::from(value))
    }

    pub fn flag(self, spec: &FieldSpec, value: bool) -> Self {
        self.value(spec, Value::Bool(value))
    }

    pub fn array(self, spec: &FieldSpec, items: Vec<Value>) -> Self {
        self.value(spec, Value::Array(items))
    }

    pub fn finish(self) -> WireRecord {
        Value::Object(self.fields)
    }
}
