//! # Wire Mappers
//!
//! Per-kind conversion between backend wire records and canonical records.
//! Reading is shape-tolerant: aliases, missing fields and legacy collection
//! shapes are all accepted. Writing is shape-strict: every field goes out under
//! one name and collections go out in the single object-array shape.

pub mod category_mapper;
pub mod merchant_mapper;
pub mod recipe_mapper;
pub mod subcategory_mapper;

use serde_json::Value;
use shared::{CanonicalRecord, RecordKind};

use crate::domain::field_mapping::mapping_for;
use crate::domain::wire::WireRecord;

pub use category_mapper::CategoryMapper;
pub use merchant_mapper::MerchantMapper;
pub use recipe_mapper::RecipeMapper;
pub use subcategory_mapper::SubcategoryMapper;

/// Keys under which list endpoints wrap their records
const ENVELOPE_KEYS: &[&str] = &["data", "results", "items", "records"];

/// Normalize one wire record. Never fails; unusable input yields defaults.
pub fn normalize(kind: RecordKind, wire: &WireRecord) -> CanonicalRecord {
    match kind {
        RecordKind::Recipe => CanonicalRecord::Recipe(RecipeMapper::to_domain(wire)),
        RecordKind::Category => CanonicalRecord::Category(CategoryMapper::to_domain(wire)),
        RecordKind::Subcategory => {
            CanonicalRecord::Subcategory(SubcategoryMapper::to_domain(wire))
        }
        RecordKind::Merchant => CanonicalRecord::Merchant(MerchantMapper::to_domain(wire)),
    }
}

/// Normalize a list of wire records of one kind, keeping their order
pub fn normalize_batch(kind: RecordKind, wires: &[WireRecord]) -> Vec<CanonicalRecord> {
    match kind {
        RecordKind::Recipe => wrap(RecipeMapper::to_domain_list(wires), CanonicalRecord::Recipe),
        RecordKind::Category => {
            wrap(CategoryMapper::to_domain_list(wires), CanonicalRecord::Category)
        }
        RecordKind::Subcategory => {
            wrap(SubcategoryMapper::to_domain_list(wires), CanonicalRecord::Subcategory)
        }
        RecordKind::Merchant => {
            wrap(MerchantMapper::to_domain_list(wires), CanonicalRecord::Merchant)
        }
    }
}

/// Denormalize a list of canonical records, keeping their order
pub fn denormalize_batch(records: &[CanonicalRecord]) -> Vec<WireRecord> {
    records.iter().map(denormalize).collect()
}

fn wrap<T>(items: Vec<T>, variant: fn(T) -> CanonicalRecord) -> Vec<CanonicalRecord> {
    items.into_iter().map(variant).collect()
}

/// Normalize a whole response body.
///
/// Accepts a bare array, an envelope object (`{"data": [...]}`,
/// `{"recipes": [...]}`, possibly nested), or a single record object.
/// An object carrying any of the kind's own field names is a record, even if
/// it also has a `data` or `items` field. Scalars yield no records.
pub fn normalize_payload(kind: RecordKind, payload: &WireRecord) -> Vec<CanonicalRecord> {
    match payload {
        Value::Array(items) => normalize_batch(kind, items),
        Value::Object(map) if mapping_for(kind).describes(map) => vec![normalize(kind, payload)],
        Value::Object(map) => {
            let envelope = ENVELOPE_KEYS
                .iter()
                .copied()
                .chain(std::iter::once(collection_key(kind)))
                .find_map(|key| map.get(key).filter(|v| v.is_array() || v.is_object()));
            match envelope {
                Some(inner) => normalize_payload(kind, inner),
                None => vec![normalize(kind, payload)],
            }
        }
        _ => Vec::new(),
    }
}

/// Convert a canonical record into the body for a create/update call
pub fn denormalize(record: &CanonicalRecord) -> WireRecord {
    match record {
        CanonicalRecord::Recipe(r) => RecipeMapper::to_wire(r),
        CanonicalRecord::Category(c) => CategoryMapper::to_wire(c),
        CanonicalRecord::Subcategory(s) => SubcategoryMapper::to_wire(s),
        CanonicalRecord::Merchant(m) => MerchantMapper::to_wire(m),
    }
}

fn collection_key(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Recipe => "recipes",
        RecordKind::Category => "categories",
        RecordKind::Subcategory => "subcategories",
        RecordKind::Merchant => "merchants",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_record_normalizes_to_defaults_for_every_kind() {
        for kind in RecordKind::ALL {
            assert_eq!(normalize(*kind, &json!({})), CanonicalRecord::default_for(*kind));
        }
    }

    #[test]
    fn test_any_json_value_normalizes_without_panicking() {
        let inputs = [
            json!(null),
            json!(42),
            json!("recipe"),
            json!([1, 2, 3]),
            json!({"ingredients": 7, "tags": {"a": 1}, "prep_time": [], "id": {"x": 1}}),
            json!({"instructions": [null, 5, {"step": "x"}], "price": "NaN"}),
        ];
        for input in &inputs {
            for kind in RecordKind::ALL {
                assert_eq!(normalize(*kind, input).kind(), *kind);
            }
        }
    }

    #[test]
    fn test_normalize_payload_unwraps_envelopes() {
        let payload = json!({"data": {"recipes": [{"name": "A"}, {"name": "B"}]}, "meta": {}});
        let records = normalize_payload(RecordKind::Recipe, &payload);
        assert_eq!(records.len(), 2);

        let bare = json!([{"name": "A"}]);
        assert_eq!(normalize_payload(RecordKind::Category, &bare).len(), 1);

        let single = json!({"name": "Solo"});
        assert_eq!(normalize_payload(RecordKind::Merchant, &single).len(), 1);

        assert!(normalize_payload(RecordKind::Recipe, &json!("oops")).is_empty());
    }

    #[test]
    fn test_record_with_data_field_is_not_an_envelope() {
        let payload = json!({
            "id": "m1",
            "business_name": "Deli",
            "data": {"opening_hours": "9-5"},
            "items": [{"sku": "bagel"}]
        });
        let records = normalize_payload(RecordKind::Merchant, &payload);
        assert_eq!(records.len(), 1);
        match &records[0] {
            CanonicalRecord::Merchant(m) => {
                assert_eq!(m.id, "m1");
                assert_eq!(m.business_name, "Deli");
            }
            other => panic!("unexpected record: {:?}", other),
        }
    }

    #[test]
    fn test_envelope_with_unrelated_metadata_still_unwraps() {
        let payload = json!({"items": [{"title": "A"}, {"title": "B"}], "page": 1, "total": 2});
        assert_eq!(normalize_payload(RecordKind::Category, &payload).len(), 2);
    }

    #[test]
    fn test_batch_keeps_order_and_kind() {
        let wires = vec![json!({"name": "Soups"}), json!({"title": "Salads"})];
        let records = normalize_batch(RecordKind::Subcategory, &wires);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.kind() == RecordKind::Subcategory));

        let written = denormalize_batch(&records);
        assert_eq!(written[0]["name"], "Soups");
        assert_eq!(written[1]["name"], "Salads");
    }

    #[test]
    fn test_denormalize_dispatches_on_kind() {
        let record = normalize(RecordKind::Merchant, &json!({"businessName": "Deli"}));
        assert_eq!(denormalize(&record)["business_name"], "Deli");
    }
}
