use std::collections::BTreeMap;
use std::sync::Arc;

use rand::RngCore;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use stubsmith_core::CollectionFormat;

use crate::accessor::ConstraintAccessor;
use crate::aliases::{AliasTable, command_name};
use crate::errors::GenerationError;
use crate::faker_rs::LocaleKey;

pub mod faker_rs;
pub mod primitives;
pub mod semantic;

/// Generated value for a field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GeneratedValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<GeneratedValue>),
}

impl GeneratedValue {
    pub fn is_null(&self) -> bool {
        matches!(self, GeneratedValue::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            GeneratedValue::Int(value) => Some(*value as f64),
            GeneratedValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            GeneratedValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            GeneratedValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[GeneratedValue]> {
        match self {
            GeneratedValue::List(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    /// Converts a JSON value (e.g. an enum member) into a generated value.
    /// Objects have no scalar form and are carried as their JSON text.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => GeneratedValue::Null,
            Value::Bool(value) => GeneratedValue::Bool(*value),
            Value::Number(number) => number
                .as_i64()
                .map(GeneratedValue::Int)
                .or_else(|| number.as_f64().map(GeneratedValue::Float))
                .unwrap_or(GeneratedValue::Null),
            Value::String(value) => GeneratedValue::Text(value.clone()),
            Value::Array(values) => {
                GeneratedValue::List(values.iter().map(GeneratedValue::from_json).collect())
            }
            Value::Object(_) => GeneratedValue::Text(value.to_string()),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            GeneratedValue::Null => Value::Null,
            GeneratedValue::Bool(value) => Value::Bool(*value),
            GeneratedValue::Int(value) => Value::from(*value),
            GeneratedValue::Float(value) => serde_json::Number::from_f64(*value)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            GeneratedValue::Text(value) => Value::String(value.clone()),
            GeneratedValue::List(values) => {
                Value::Array(values.iter().map(GeneratedValue::to_json).collect())
            }
        }
    }

    /// Whether this value equals a JSON value, comparing numbers by value.
    pub fn matches_json(&self, value: &Value) -> bool {
        match (self, value) {
            (GeneratedValue::Int(_) | GeneratedValue::Float(_), Value::Number(number)) => {
                self.as_f64() == number.as_f64()
            }
            _ => self.to_json() == *value,
        }
    }

    /// Serializes a list per `collectionFormat`. Returns `None` for non-list
    /// values and for `multi`, which is never joined.
    pub fn join_collection(&self, format: CollectionFormat) -> Option<String> {
        let GeneratedValue::List(values) = self else {
            return None;
        };
        let separator = format.separator()?;
        let parts: Vec<String> = values
            .iter()
            .map(|value| match value {
                GeneratedValue::List(_) => value.join_collection(format).unwrap_or_default(),
                other => other.to_plain_string(),
            })
            .collect();
        Some(parts.join(separator))
    }

    fn to_plain_string(&self) -> String {
        match self {
            GeneratedValue::Null => String::new(),
            GeneratedValue::Bool(value) => value.to_string(),
            GeneratedValue::Int(value) => value.to_string(),
            GeneratedValue::Float(value) => value.to_string(),
            GeneratedValue::Text(value) => value.clone(),
            GeneratedValue::List(_) => self.to_json().to_string(),
        }
    }
}

/// What a producer sees: the accessor for the field being generated and
/// the registry, for producers that generate nested elements.
pub struct GeneratorContext<'a> {
    pub accessor: &'a dyn ConstraintAccessor,
    pub registry: &'a GeneratorRegistry,
}

/// A value producer registered under a canonical name.
pub trait Producer: Send + Sync {
    fn id(&self) -> &'static str;

    fn produce(
        &self,
        ctx: &GeneratorContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedValue, GenerationError>;
}

/// Canonical name to producer mapping for one locale.
pub struct GeneratorRegistry {
    locale: LocaleKey,
    aliases: Arc<AliasTable>,
    producers: BTreeMap<&'static str, Box<dyn Producer>>,
}

impl GeneratorRegistry {
    /// Build the registry for a language/region tag. An empty tag means `en`.
    pub fn new(locale: &str, aliases: Arc<AliasTable>) -> Result<Self, GenerationError> {
        let locale = LocaleKey::parse_or_default(locale)
            .ok_or_else(|| GenerationError::LocaleUnsupported(locale.to_string()))?;

        let mut registry = Self {
            locale,
            aliases,
            producers: BTreeMap::new(),
        };
        primitives::register(&mut registry);
        semantic::register(&mut registry);
        faker_rs::register(&mut registry, locale);
        debug!(
            locale = %locale,
            generators = registry.producers.len(),
            "generator registry built"
        );
        Ok(registry)
    }

    pub fn register_generator(&mut self, producer: Box<dyn Producer>) {
        self.producers.insert(producer.id(), producer);
    }

    pub fn locale(&self) -> LocaleKey {
        self.locale
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Canonical names, sorted.
    pub fn generator_ids(&self) -> Vec<&'static str> {
        self.producers.keys().copied().collect()
    }

    /// Look up a producer by requested name, resolving aliases.
    pub fn generator(&self, name: &str) -> Option<&dyn Producer> {
        let canonical = self.aliases.resolve(name);
        self.producers.get(canonical.as_str()).map(Box::as_ref)
    }

    /// Explicit hint first, then the field name in kebab-case.
    pub fn resolve_generator(&self, accessor: &dyn ConstraintAccessor) -> Option<&dyn Producer> {
        let name = accessor.name();
        if !name.is_empty() {
            return self.generator(name);
        }
        self.generator(&command_name(accessor.field_name()))
    }

    /// Fallback when neither hint nor field name resolves: enum, then
    /// format, then type.
    pub fn infer_generator(&self, accessor: &dyn ConstraintAccessor) -> Option<&dyn Producer> {
        if accessor.enum_values().is_some() {
            return self.generator("enum");
        }
        let format = accessor.format();
        if !format.is_empty()
            && let Some(producer) = self.generator(format)
        {
            return Some(producer);
        }
        let type_name = accessor.type_name();
        if type_name.is_empty() {
            return None;
        }
        self.generator(type_name)
    }

    /// Resolve a producer for the accessor and generate a value with it,
    /// ignoring the accessor's invalid mode.
    pub fn generate(
        &self,
        accessor: &dyn ConstraintAccessor,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedValue, GenerationError> {
        let producer = self.producer_for(accessor)?;
        let ctx = GeneratorContext {
            accessor,
            registry: self,
        };
        producer.produce(&ctx, rng)
    }

    pub(crate) fn producer_for(
        &self,
        accessor: &dyn ConstraintAccessor,
    ) -> Result<&dyn Producer, GenerationError> {
        self.resolve_generator(accessor)
            .or_else(|| self.infer_generator(accessor))
            .ok_or_else(|| GenerationError::GeneratorNotFound {
                field: accessor.field_name().to_string(),
            })
    }
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("locale", &self.locale)
            .field("generators", &self.producers.len())
            .finish()
    }
}
