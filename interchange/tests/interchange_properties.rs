use std::collections::BTreeSet;

use opsdash_interchange::{
    denormalize, export_rows, normalize, normalize_payload, print, to_format, CanonicalRecord,
    ExportFormat, ExportRow, FilePrintHost, Recipe, RecordKind,
};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::{json, Value};

fn recipe(record: CanonicalRecord) -> Recipe {
    match record {
        CanonicalRecord::Recipe(recipe) => recipe,
        other => panic!("expected a recipe, got {:?}", other.kind()),
    }
}

fn ingredient_names(recipe: &Recipe) -> BTreeSet<String> {
    recipe.ingredients.iter().map(|i| i.name.clone()).collect()
}

#[test]
fn test_ingredient_shapes_normalize_to_same_items() {
    let strings = json!({"id": "r1", "ingredients": ["Flour", "Sugar", "Butter"]});
    let nested = json!({"id": "r1", "ingredients": [["Flour", "Sugar"], ["Butter"]]});
    let objects = json!({"id": "r1", "ingredients": [
        {"name": "Flour", "quantity": "200", "unit": "g"},
        {"name": "Sugar", "quantity": "100", "unit": "g"},
        {"name": "Butter", "quantity": "50", "unit": "g"}
    ]});

    let variants: Vec<Recipe> = [strings, nested, objects]
        .iter()
        .map(|wire| recipe(normalize(RecordKind::Recipe, wire)))
        .collect();

    for variant in &variants {
        assert_eq!(variant.ingredients.len(), 3);
        assert_eq!(ingredient_names(variant), ingredient_names(&variants[0]));
    }
}

#[test]
fn test_empty_record_normalizes_to_defaults_for_every_kind() {
    let empty = json!({});
    for kind in RecordKind::ALL {
        let record = normalize(*kind, &empty);
        assert_eq!(record, CanonicalRecord::default_for(*kind));
    }
}

#[test]
fn test_columns_are_derived_and_csv_rows_are_rectangular() {
    let rows = vec![
        ExportRow::new().with("a", 1i64).with("b", 2i64),
        ExportRow::new().with("a", 3i64).with("c", 4i64),
    ];
    let csv = to_format(ExportFormat::Csv, &rows).unwrap();
    assert_eq!(csv, "a,b,c\n1,2,\n3,,4\n");
    for line in csv.lines() {
        assert_eq!(line.split(',').count(), 3);
    }
}

#[test]
fn test_csv_escapes_embedded_quotes_and_commas() {
    let rows = vec![ExportRow::new()
        .with("id", 7i64)
        .with("note", r#"He said "hi", then left"#)];
    let csv = to_format(ExportFormat::Csv, &rows).unwrap();
    assert_eq!(csv, "id,note\n7,\"He said \"\"hi\"\", then left\"\n");
}

#[test]
fn test_xml_text_decodes_back_to_original() {
    let original = r#"Salt & Pepper <fine> "ground""#;
    let rows = vec![ExportRow::new().with("Name", original)];
    let xml = to_format(ExportFormat::Xml, &rows).unwrap();

    let mut reader = Reader::from_str(&xml);
    reader.config_mut().trim_text(true);
    let mut decoded = Vec::new();
    loop {
        match reader.read_event().unwrap() {
            Event::Text(text) => decoded.push(text.unescape().unwrap().into_owned()),
            Event::Eof => break,
            _ => {}
        }
    }
    assert_eq!(decoded, vec![original.to_string()]);
}

#[test]
fn test_denormalize_always_writes_object_ingredients() {
    let shapes = [
        json!({"ingredients": ["Rice", "Water"]}),
        json!({"ingredients": [["Rice"], ["Water"]]}),
        json!({"ingredients": "Rice\nWater"}),
        json!({"ingredients": [{"item": "Rice", "qty": 1, "measure": "cup"}, {"item": "Water"}]}),
    ];

    for wire in &shapes {
        let record = normalize(RecordKind::Recipe, wire);
        let written = denormalize(&record);
        let ingredients = written["ingredients"].as_array().unwrap();
        assert_eq!(ingredients.len(), 2);
        for item in ingredients {
            let object = item.as_object().unwrap();
            for key in ["id", "name", "quantity", "unit"] {
                assert!(object.get(key).is_some_and(Value::is_string), "missing {key}");
            }
        }
    }
}

#[test]
fn test_salt_and_pepper_end_to_end() {
    let wire = json!({"id": "r-42", "name": "Seasoning", "ingredients": ["Salt", "Pepper"]});

    let normalized = recipe(normalize(RecordKind::Recipe, &wire));
    let names: Vec<&str> = normalized.ingredients.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Salt", "Pepper"]);
    for ingredient in &normalized.ingredients {
        assert_eq!(ingredient.quantity, "1");
        assert_eq!(ingredient.unit, "piece");
        assert!(!ingredient.id.is_empty());
    }

    let written = denormalize(&CanonicalRecord::Recipe(normalized.clone()));
    let items = written["ingredients"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "Salt");
    assert_eq!(items[1]["name"], "Pepper");
    assert_eq!(items[0]["quantity"], "1");
    assert_eq!(items[0]["unit"], "piece");
    assert_eq!(items[0]["id"], Value::String(normalized.ingredients[0].id.clone()));
}

#[test]
fn test_envelope_to_every_export_format() {
    let payload = json!({
        "data": {
            "merchants": [
                {"id": 1, "businessName": "Corner Deli", "rating": "4.5", "isVerified": 1},
                {"merchant_id": 2, "name": "Noodle Bar", "commission_rate": 12.5}
            ]
        }
    });
    let records = normalize_payload(RecordKind::Merchant, &payload);
    assert_eq!(records.len(), 2);

    let rows = export_rows(&records);
    for format in ExportFormat::ALL {
        let body = to_format(*format, &rows).unwrap();
        assert!(body.contains("Noodle Bar"), "{format} export lost a row");
    }

    let json: Value = serde_json::from_str(&to_format(ExportFormat::Json, &rows).unwrap()).unwrap();
    assert_eq!(json[0]["Business Name"], "Corner Deli");
    assert_eq!(json[0]["Rating"], 4.5);
    assert_eq!(json[0]["Verified"], true);
    assert_eq!(json[1]["Commission (%)"], 12.5);
}

#[test]
fn test_print_spools_document_once() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let mut host = FilePrintHost::new(temp_dir.path());
    let rows = vec![ExportRow::new().with("Name", "Corner Deli")];

    let document = print(&rows, &mut host).unwrap();

    assert_eq!(host.printed().len(), 1);
    let spooled = std::fs::read_to_string(&host.printed()[0]).unwrap();
    assert_eq!(spooled, document.html);
    assert!(spooled.contains("<td>Corner Deli</td>"));
}

#[test]
fn test_xml_accepts_unicode_labels_and_strips_control_characters() {
    let rows = vec![ExportRow::new()
        .with("名称", "汤")
        .with("价格", 12i64)
        .with("Note", "bell\u{7}here")];
    let xml = to_format(ExportFormat::Xml, &rows).unwrap();

    assert!(xml.contains("<名称>汤</名称>"));
    assert!(xml.contains("<价格>12</价格>"));
    assert!(!xml.contains('\u{7}'));
    assert!(xml.contains("bell\u{FFFD}here"));
}
