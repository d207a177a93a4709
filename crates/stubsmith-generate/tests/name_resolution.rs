use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::json;

use stubsmith_core::{Parameter, Schema, StubMode};
use stubsmith_generate::{
    AliasTable, Descriptor, GenerationError, GeneratorRegistry, SchemaAccessor, SimpleAccessor,
    Stubbing,
};

fn registry() -> GeneratorRegistry {
    GeneratorRegistry::new("en", Arc::new(AliasTable::default())).expect("build registry")
}

#[test]
fn every_alias_resolves_to_its_canonical_producer() {
    let registry = registry();
    let aliases = AliasTable::default();
    assert!(!aliases.is_empty());

    for (alias, canonical) in aliases.entries() {
        let by_alias = registry
            .generator(alias)
            .unwrap_or_else(|| panic!("alias '{alias}' has no producer"));
        let by_canonical = registry
            .generator(canonical)
            .unwrap_or_else(|| panic!("canonical '{canonical}' has no producer"));
        assert_eq!(by_alias.id(), by_canonical.id(), "alias {alias}");
        assert_eq!(by_alias.id(), canonical);
    }
}

#[test]
fn resolution_is_case_insensitive() {
    let registry = registry();
    for name in ["UUID4", "uuid4", "uuidv4", "UuidV4"] {
        let producer = registry.generator(name).expect("uuid4 producer");
        assert_eq!(producer.id(), "uuid4");
    }
}

#[test]
fn explicit_hint_wins_over_field_name() {
    let registry = registry();
    let param: Parameter = serde_json::from_value(json!({
        "name": "email",
        "in": "query",
        "type": "string",
        "x-datagen": {"name": "Cell-Phone"}
    }))
    .expect("parse parameter");
    let accessor = SimpleAccessor::parameter("", &param, StubMode::VALID).expect("accessor");
    let producer = registry.resolve_generator(&accessor).expect("producer");
    assert_eq!(producer.id(), "mobile");
}

#[test]
fn field_name_is_kebab_cased_before_lookup() {
    let registry = registry();
    let schema: Schema = serde_json::from_value(json!({"type": "string"})).expect("schema");
    let accessor =
        SchemaAccessor::new("streetAddress", &schema, false, StubMode::VALID).expect("accessor");
    let producer = registry.resolve_generator(&accessor).expect("producer");
    assert_eq!(producer.id(), "street-address");

    let accessor =
        SchemaAccessor::new("Nick_Name", &schema, false, StubMode::VALID).expect("accessor");
    let producer = registry.resolve_generator(&accessor).expect("producer");
    assert_eq!(producer.id(), "user-name");
}

#[test]
fn unknown_hint_does_not_fall_back_to_field_name() {
    let registry = registry();
    let schema: Schema = serde_json::from_value(json!({
        "x-datagen": {"name": "no-such-generator"}
    }))
    .expect("schema");
    let accessor = SchemaAccessor::new("email", &schema, false, StubMode::VALID).expect("accessor");
    assert!(registry.resolve_generator(&accessor).is_none());
}

#[test]
fn type_and_format_drive_inference() {
    let registry = registry();
    let cases = [
        (json!({"type": "string", "format": "uuid"}), "uuid"),
        (json!({"type": "string", "format": "date-time"}), "date-time"),
        (json!({"type": "integer", "format": "int64"}), "integer"),
        (json!({"type": "number", "format": "double"}), "number"),
        (json!({"type": "boolean"}), "bool"),
        (json!({"type": "string", "enum": ["a", "b"]}), "enum"),
        (json!({"type": "string", "format": "password"}), "string"),
    ];
    for (schema, expected) in cases {
        let schema: Schema = serde_json::from_value(schema).expect("schema");
        let accessor =
            SchemaAccessor::new("payload", &schema, false, StubMode::VALID).expect("accessor");
        assert!(registry.resolve_generator(&accessor).is_none());
        let producer = registry.infer_generator(&accessor).expect("inferred producer");
        assert_eq!(producer.id(), expected);
    }
}

#[test]
fn unresolvable_field_reports_generator_not_found() {
    let stubbing = Stubbing::new("en").expect("stubbing");
    let schema: Schema = serde_json::from_value(json!({
        "type": "object",
        "x-datagen": {"name": "nothing-registered"}
    }))
    .expect("schema");
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let err = stubbing
        .generate_with_rng(
            "opaque",
            Descriptor::Schema {
                schema: &schema,
                required: false,
            },
            &mut rng,
        )
        .expect_err("no producer");
    match err {
        GenerationError::GeneratorNotFound { field } => assert_eq!(field, "opaque"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn registered_aliases_round_trip_and_last_write_wins() {
    let mut aliases = AliasTable::default();
    aliases.register("user-name", ["Handle", "screen-name"]);
    assert_eq!(aliases.resolve("handle"), "user-name");
    assert_eq!(aliases.resolve("SCREEN-NAME"), "user-name");

    aliases.register("email", ["handle"]);
    assert_eq!(aliases.resolve("handle"), "email");
    assert!(aliases.aliases_for("user-name").contains(&"screen-name"));
    assert!(!aliases.aliases_for("user-name").contains(&"handle"));

    aliases.register("handle", ["contact"]);
    assert_eq!(aliases.resolve("contact"), "email");

    let registry =
        GeneratorRegistry::new("en", Arc::new(aliases)).expect("registry with custom aliases");
    let producer = registry.generator("Screen-Name").expect("custom alias");
    assert_eq!(producer.id(), "user-name");
}

#[test]
fn unsupported_locale_is_rejected() {
    let err = Stubbing::new("tlh").expect_err("unknown locale");
    assert!(matches!(err, GenerationError::LocaleUnsupported(tag) if tag == "tlh"));
    for tag in ["", "en", "en_US", "fr", "pt-BR", "zh_CN", "zh_TW"] {
        Stubbing::new(tag).unwrap_or_else(|err| panic!("locale {tag:?}: {err}"));
    }
}
