use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constraints::{CommonValidations, SimpleSchema};

/// Vendor extensions and any other keys not modelled explicitly.
pub type Extensions = BTreeMap<String, Value>;

/// A non-body operation parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Parameter {
    #[serde(default)]
    pub name: String,
    /// Location of the parameter (`query`, `path`, `header`, `formData`).
    #[serde(default, rename = "in", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(flatten)]
    pub simple: SimpleSchema,
    #[serde(flatten)]
    pub validations: CommonValidations,
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// A response header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Header {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub simple: SimpleSchema,
    #[serde(flatten)]
    pub validations: CommonValidations,
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// `type` of a schema object; a single name or a list of names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum SchemaType {
    Single(String),
    List(Vec<String>),
}

impl SchemaType {
    /// First declared type name, if any.
    pub fn first(&self) -> Option<&str> {
        match self {
            SchemaType::Single(name) => Some(name.as_str()),
            SchemaType::List(names) => names.first().map(String::as_str),
        }
    }
}

/// `items` of a schema object; one schema for every element or a tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum SchemaItems {
    Single(Box<Schema>),
    Tuple(Vec<Schema>),
}

impl SchemaItems {
    /// Schema describing the first element.
    pub fn first(&self) -> Option<&Schema> {
        match self {
            SchemaItems::Single(schema) => Some(schema.as_ref()),
            SchemaItems::Tuple(schemas) => schemas.first(),
        }
    }
}

/// A schema object node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Schema {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<SchemaItems>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    /// Names of required properties; a schema never declares its own
    /// required-ness.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(flatten)]
    pub validations: CommonValidations,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Schema {
    /// First declared type, `object` when none is declared.
    pub fn type_name(&self) -> &str {
        self.schema_type
            .as_ref()
            .and_then(SchemaType::first)
            .unwrap_or("object")
    }

    /// Whether the named property is listed as required.
    pub fn requires(&self, property: &str) -> bool {
        self.required.iter().any(|name| name == property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parameter_keeps_vendor_extensions() {
        let param: Parameter = serde_json::from_value(json!({
            "name": "limit",
            "in": "query",
            "type": "integer",
            "maximum": 100,
            "x-datagen": {"name": "integer"}
        }))
        .expect("parse parameter");

        assert_eq!(param.simple.type_name.as_deref(), Some("integer"));
        assert_eq!(param.validations.maximum, Some(100.0));
        assert!(param.extensions.contains_key("x-datagen"));
        assert!(!param.extensions.contains_key("maximum"));
    }

    #[test]
    fn schema_type_defaults_to_object() {
        let schema = Schema::default();
        assert_eq!(schema.type_name(), "object");

        let schema: Schema =
            serde_json::from_value(json!({"type": ["string", "null"]})).expect("parse schema");
        assert_eq!(schema.type_name(), "string");
    }
}
