use serde_json::json;
use stubsmith_core::{Header, Parameter, Schema, SchemaItems};

#[test]
fn parameter_with_items_round_trips_constraints() {
    let value = json!({
        "name": "tags",
        "in": "query",
        "required": true,
        "type": "array",
        "collectionFormat": "pipes",
        "minItems": 1,
        "maxItems": 4,
        "uniqueItems": true,
        "items": {
            "type": "string",
            "maxLength": 8,
            "x-datagen": {"name": "word"}
        }
    });

    let param: Parameter = serde_json::from_value(value).expect("parse parameter");
    assert!(param.required);
    assert_eq!(param.simple.collection_format.as_deref(), Some("pipes"));
    assert_eq!(param.validations.min_items, Some(1));
    assert_eq!(param.validations.max_items, Some(4));
    assert!(param.validations.unique_items);

    let items = param.simple.items.as_ref().expect("items present");
    assert_eq!(items.simple.type_name.as_deref(), Some("string"));
    assert_eq!(items.validations.max_length, Some(8));
    assert_eq!(items.extensions.get("x-datagen"), Some(&json!({"name": "word"})));

    let encoded = serde_json::to_value(&param).expect("serialize parameter");
    assert_eq!(encoded["collectionFormat"], json!("pipes"));
    assert_eq!(encoded["items"]["maxLength"], json!(8));
}

#[test]
fn header_reads_enum_and_bounds() {
    let header: Header = serde_json::from_value(json!({
        "type": "number",
        "minimum": 0.5,
        "exclusiveMinimum": true,
        "multipleOf": 0.5,
        "enum": [1.0, 1.5, 2.0]
    }))
    .expect("parse header");

    assert_eq!(header.validations.minimum, Some(0.5));
    assert!(header.validations.exclusive_minimum);
    assert_eq!(header.validations.multiple_of, Some(0.5));
    assert_eq!(header.validations.enum_values.len(), 3);
}

#[test]
fn schema_items_accept_single_and_tuple_forms() {
    let single: Schema = serde_json::from_value(json!({
        "type": "array",
        "items": {"type": "string", "pattern": "^[a-z]+$"}
    }))
    .expect("parse single items");
    let first = single
        .items
        .as_ref()
        .and_then(SchemaItems::first)
        .expect("element schema");
    assert_eq!(first.validations.pattern.as_deref(), Some("^[a-z]+$"));

    let tuple: Schema = serde_json::from_value(json!({
        "type": "array",
        "items": [{"type": "integer"}, {"type": "string"}]
    }))
    .expect("parse tuple items");
    let first = tuple
        .items
        .as_ref()
        .and_then(SchemaItems::first)
        .expect("first tuple schema");
    assert_eq!(first.type_name(), "integer");
}
