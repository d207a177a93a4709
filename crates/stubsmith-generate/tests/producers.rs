use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use regex::Regex;
use serde_json::{Value, json};

use stubsmith_core::{Header, Parameter, Schema};
use stubsmith_generate::{Descriptor, GeneratedValue, GenerationError, Stubbing};

fn stubbing() -> Stubbing {
    Stubbing::new("en").expect("stubbing")
}

fn schema(value: Value) -> Schema {
    serde_json::from_value(value).expect("parse schema")
}

fn generate_schema(
    stubbing: &Stubbing,
    key: &str,
    schema: &Schema,
    rng: &mut ChaCha8Rng,
) -> Result<GeneratedValue, GenerationError> {
    stubbing.generate_with_rng(
        key,
        Descriptor::Schema {
            schema,
            required: false,
        },
        rng,
    )
}

fn text(value: GeneratedValue) -> String {
    match value {
        GeneratedValue::Text(text) => text,
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn characters_default_to_ten_and_honor_count() {
    let stubbing = stubbing();
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let plain = schema(json!({"type": "string", "x-datagen": {"name": "characters"}}));
    let value = text(generate_schema(&stubbing, "code", &plain, &mut rng).expect("characters"));
    assert_eq!(value.chars().count(), 10);

    let counted = schema(json!({
        "type": "string",
        "x-datagen": {"name": "characters", "args": [15]}
    }));
    let value = text(generate_schema(&stubbing, "code", &counted, &mut rng).expect("characters"));
    assert_eq!(value.chars().count(), 15);
    assert!(value.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
}

#[test]
fn bool_and_boolean_always_yield_booleans() {
    let stubbing = stubbing();
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    for name in ["bool", "boolean"] {
        let descriptor = schema(json!({"x-datagen": {"name": name}}));
        let mut seen_true = false;
        let mut seen_false = false;
        for _ in 0..100 {
            match generate_schema(&stubbing, "flag", &descriptor, &mut rng).expect("bool") {
                GeneratedValue::Bool(true) => seen_true = true,
                GeneratedValue::Bool(false) => seen_false = true,
                other => panic!("expected bool, got {other:?}"),
            }
        }
        assert!(seen_true && seen_false, "{name} should produce both values");
    }
}

#[test]
fn word_counts_follow_arguments() {
    let stubbing = stubbing();
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    let words = schema(json!({"x-datagen": {"name": "words", "args": ["4", true]}}));
    let value = text(generate_schema(&stubbing, "tags", &words, &mut rng).expect("words"));
    assert_eq!(value.split_whitespace().count(), 4);

    let sentence = schema(json!({"x-datagen": {"name": "sentence"}}));
    let value = text(generate_schema(&stubbing, "bio", &sentence, &mut rng).expect("sentence"));
    assert_eq!(value.split_whitespace().count(), 10);

    let bad = schema(json!({"x-datagen": {"name": "words", "args": ["lots"]}}));
    let err = generate_schema(&stubbing, "tags", &bad, &mut rng).expect_err("bad count");
    assert!(matches!(
        err,
        GenerationError::ArgumentConversion { index: 0, ref generator, .. } if generator == "words"
    ));
}

#[test]
fn identifier_producers_have_expected_shape() {
    let stubbing = stubbing();
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let cases = [
        ("uuid4", r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$"),
        ("uuid3", r"^[0-9a-f]{8}-[0-9a-f]{4}-3[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$"),
        ("uuid5", r"^[0-9a-f]{8}-[0-9a-f]{4}-5[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$"),
        ("isbn10", r"^[0-9]{9}[0-9X]$"),
        ("isbn13", r"^97[89][0-9]{10}$"),
        ("ssn", r"^[0-9]{3}-[0-9]{2}-[0-9]{4}$"),
        ("hexcolor", r"^#([0-9a-f]{3}|[0-9a-f]{6})$"),
        ("rgbcolor", r"^rgb\([0-9]{1,3},[0-9]{1,3},[0-9]{1,3}\)$"),
        ("mac", r"^([0-9a-f]{2}:){5}[0-9a-f]{2}$"),
        ("ip4", r"^[0-9]{1,3}(\.[0-9]{1,3}){3}$"),
        ("email", r"^[a-z0-9.]+@[a-z0-9]+\.[a-z.]+$"),
        ("hostname", r"^[a-z0-9]+$"),
    ];
    for (name, pattern) in cases {
        let descriptor = schema(json!({"type": "string", "x-datagen": {"name": name}}));
        let regex = Regex::new(pattern).expect("test regex");
        for _ in 0..10 {
            let value = text(generate_schema(&stubbing, "id", &descriptor, &mut rng).expect(name));
            assert!(regex.is_match(&value), "{name} produced {value}");
        }
    }
}

#[test]
fn coordinates_stay_within_range() {
    let stubbing = stubbing();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    for (name, limit) in [("lat", 90.0), ("longitude", 180.0)] {
        let descriptor = schema(json!({"x-datagen": {"name": name}}));
        for _ in 0..50 {
            let value = generate_schema(&stubbing, "geo", &descriptor, &mut rng).expect(name);
            let degrees = value.as_f64().expect("float coordinate");
            assert!((-limit..=limit).contains(&degrees));
        }
    }
}

#[test]
fn integers_respect_bounds_and_steps() {
    let stubbing = stubbing();
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let descriptor = schema(json!({
        "type": "integer",
        "minimum": 10,
        "maximum": 50,
        "exclusiveMaximum": true,
        "multipleOf": 7
    }));
    for _ in 0..100 {
        let value = generate_schema(&stubbing, "quantity", &descriptor, &mut rng).expect("int");
        let value = value.as_i64().expect("integer value");
        assert!((10..50).contains(&value));
        assert_eq!(value % 7, 0);
    }

    let contradictory = schema(json!({"type": "integer", "minimum": 5, "maximum": 1}));
    let err = generate_schema(&stubbing, "quantity", &contradictory, &mut rng)
        .expect_err("min > max");
    assert!(matches!(err, GenerationError::InvalidConstraint(_)));
}

#[test]
fn integer_bounds_beyond_i64_are_handled() {
    let stubbing = stubbing();
    let mut rng = ChaCha8Rng::seed_from_u64(15);

    let unreachable = schema(json!({
        "type": "integer",
        "minimum": 1e19,
        "exclusiveMinimum": true
    }));
    let err = generate_schema(&stubbing, "quantity", &unreachable, &mut rng)
        .expect_err("no i64 above 1e19");
    assert!(matches!(err, GenerationError::InvalidConstraint(_)));

    let open_below = schema(json!({"type": "integer", "minimum": -1e30, "maximum": 5}));
    let open_above = schema(json!({"type": "integer", "maximum": 1e30}));
    for _ in 0..20 {
        let value = generate_schema(&stubbing, "quantity", &open_below, &mut rng)
            .expect("clamped minimum");
        assert!(value.as_i64().is_some_and(|value| value <= 5));
        let value = generate_schema(&stubbing, "quantity", &open_above, &mut rng)
            .expect("clamped maximum");
        assert!(value.as_i64().is_some_and(|value| value >= 0));
    }
}

#[test]
fn numbers_with_huge_spans_stay_finite() {
    let stubbing = stubbing();
    let mut rng = ChaCha8Rng::seed_from_u64(16);
    let cases = [
        json!({"type": "number", "minimum": -1e308, "maximum": 1e308}),
        json!({"type": "number", "minimum": 1e308}),
        json!({"type": "number", "maximum": -1e308, "exclusiveMaximum": true}),
    ];
    for case in cases {
        let descriptor = schema(case.clone());
        for _ in 0..20 {
            let value = generate_schema(&stubbing, "ratio", &descriptor, &mut rng)
                .unwrap_or_else(|err| panic!("{case}: {err}"));
            let value = value.as_f64().expect("float value");
            assert!(value.is_finite(), "{case}: {value}");
            if let Some(min) = case["minimum"].as_f64() {
                assert!(value >= min, "{case}: {value}");
            }
            if let Some(max) = case["maximum"].as_f64() {
                assert!(value <= max, "{case}: {value}");
            }
        }
    }
}

#[test]
fn numbers_respect_exclusive_bounds() {
    let stubbing = stubbing();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let descriptor = schema(json!({
        "type": "number",
        "minimum": 0,
        "exclusiveMinimum": true,
        "maximum": 1
    }));
    for _ in 0..100 {
        let value = generate_schema(&stubbing, "ratio", &descriptor, &mut rng).expect("number");
        let value = value.as_f64().expect("float value");
        assert!(value > 0.0 && value <= 1.0, "{value}");
    }
}

#[test]
fn strings_follow_pattern_or_length() {
    let stubbing = stubbing();
    let mut rng = ChaCha8Rng::seed_from_u64(8);

    let patterned = schema(json!({"type": "string", "pattern": "^[A-Z]{3}-[0-9]{4}$"}));
    let regex = Regex::new("^[A-Z]{3}-[0-9]{4}$").expect("test regex");
    for _ in 0..20 {
        let value = text(generate_schema(&stubbing, "sku", &patterned, &mut rng).expect("sku"));
        assert!(regex.is_match(&value), "{value}");
    }

    let bounded = schema(json!({"type": "string", "minLength": 4, "maxLength": 6}));
    for _ in 0..20 {
        let value = text(generate_schema(&stubbing, "token", &bounded, &mut rng).expect("token"));
        assert!((4..=6).contains(&value.chars().count()), "{value}");
    }
}

#[test]
fn enums_pick_permitted_values() {
    let stubbing = stubbing();
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let descriptor = schema(json!({"type": "integer", "enum": [1, 2, 3]}));
    for _ in 0..30 {
        let value = generate_schema(&stubbing, "level", &descriptor, &mut rng).expect("enum");
        assert!(matches!(value, GeneratedValue::Int(1..=3)), "{value:?}");
    }
}

#[test]
fn arrays_generate_unique_items_within_bounds() {
    let stubbing = stubbing();
    let mut rng = ChaCha8Rng::seed_from_u64(10);
    let param: Parameter = serde_json::from_value(json!({
        "name": "ids",
        "in": "query",
        "type": "array",
        "minItems": 2,
        "maxItems": 5,
        "uniqueItems": true,
        "items": {"type": "integer", "minimum": 1, "maximum": 100}
    }))
    .expect("parse parameter");

    for _ in 0..20 {
        let value = stubbing
            .generate_with_rng("", Descriptor::Parameter(&param), &mut rng)
            .expect("array");
        let items = value.as_list().expect("list value");
        assert!((2..=5).contains(&items.len()));
        for (idx, item) in items.iter().enumerate() {
            assert!(!items[idx + 1..].contains(item), "duplicate in {items:?}");
        }
    }
}

#[test]
fn array_without_items_fails() {
    let stubbing = stubbing();
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let header: Header =
        serde_json::from_value(json!({"type": "array"})).expect("parse header");
    let err = stubbing
        .generate_with_rng("X-Tags", Descriptor::Header(&header), &mut rng)
        .expect_err("missing items");
    assert!(matches!(err, GenerationError::MissingElementSchema { field } if field == "X-Tags"));
}

#[test]
fn object_schema_with_properties_is_unsupported() {
    let stubbing = stubbing();
    let mut rng = ChaCha8Rng::seed_from_u64(12);
    let descriptor = schema(json!({
        "type": "object",
        "properties": {"id": {"type": "integer"}}
    }));
    let err = generate_schema(&stubbing, "body", &descriptor, &mut rng).expect_err("object");
    assert!(matches!(err, GenerationError::UnsupportedDescriptor(_)));
}

#[test]
fn dates_use_iso_formats() {
    let stubbing = stubbing();
    let mut rng = ChaCha8Rng::seed_from_u64(13);
    let date = schema(json!({"type": "string", "format": "date"}));
    let value = text(generate_schema(&stubbing, "birthday", &date, &mut rng).expect("date"));
    assert!(chrono::NaiveDate::parse_from_str(&value, "%Y-%m-%d").is_ok(), "{value}");

    let timestamp = schema(json!({"type": "string", "format": "date-time"}));
    let value = text(generate_schema(&stubbing, "created", &timestamp, &mut rng).expect("ts"));
    assert!(chrono::DateTime::parse_from_rfc3339(&value).is_ok(), "{value}");
}

#[test]
fn every_locale_produces_names_and_places() {
    for locale in ["en", "fr", "pt_BR", "zh_CN", "zh_TW"] {
        let stubbing = Stubbing::new(locale).expect("stubbing");
        let mut rng = ChaCha8Rng::seed_from_u64(14);
        let descriptor = schema(json!({"type": "string"}));
        for key in ["lastName", "city", "streetAddress"] {
            let value =
                text(generate_schema(&stubbing, key, &descriptor, &mut rng).expect("locale text"));
            assert!(!value.is_empty(), "{locale} {key}");
        }
    }
}
