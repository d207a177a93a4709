//! Uniform read-only view over the constraints of one descriptor.
//!
//! Parameters, headers, collection items and schema nodes carry the same
//! validation keywords in different places; producers and the violation
//! engine only ever see them through [`ConstraintAccessor`].

use serde_json::Value;

use stubsmith_core::{CommonValidations, Header, Items, Parameter, Schema, SimpleSchema, StubMode};

use crate::errors::GenerationError;
use crate::hint::GeneratorHint;

/// A numeric bound together with its exclusivity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericBound {
    pub value: f64,
    pub exclusive: bool,
}

pub trait ConstraintAccessor {
    /// Explicit generator hint; empty when none was given.
    fn name(&self) -> &str;
    /// Identifier of the described field.
    fn field_name(&self) -> &str;
    fn args(&self) -> &[Value];
    fn type_name(&self) -> &str;
    fn format(&self) -> &str;
    fn collection_format(&self) -> &str;
    fn required(&self) -> bool;
    fn mode(&self) -> StubMode;
    /// Accessor for the element descriptor of a collection.
    fn items(&self) -> Result<Box<dyn ConstraintAccessor + '_>, GenerationError>;
    fn validations(&self) -> &CommonValidations;

    fn maximum(&self) -> Option<NumericBound> {
        let validations = self.validations();
        validations.maximum.map(|value| NumericBound {
            value,
            exclusive: validations.exclusive_maximum,
        })
    }

    fn minimum(&self) -> Option<NumericBound> {
        let validations = self.validations();
        validations.minimum.map(|value| NumericBound {
            value,
            exclusive: validations.exclusive_minimum,
        })
    }

    fn max_length(&self) -> Option<i64> {
        self.validations().max_length
    }

    fn min_length(&self) -> Option<i64> {
        self.validations().min_length
    }

    fn pattern(&self) -> Option<&str> {
        self.validations()
            .pattern
            .as_deref()
            .filter(|pattern| !pattern.is_empty())
    }

    fn max_items(&self) -> Option<i64> {
        self.validations().max_items
    }

    fn min_items(&self) -> Option<i64> {
        self.validations().min_items
    }

    fn unique_items(&self) -> bool {
        self.validations().unique_items
    }

    fn multiple_of(&self) -> Option<f64> {
        self.validations().multiple_of
    }

    fn enum_values(&self) -> Option<&[Value]> {
        let values = &self.validations().enum_values;
        (!values.is_empty()).then_some(values.as_slice())
    }
}

/// Accessor over parameters, headers and their collection items.
#[derive(Debug)]
pub struct SimpleAccessor<'a> {
    hint: GeneratorHint,
    field_name: String,
    simple: &'a SimpleSchema,
    validations: &'a CommonValidations,
    required: bool,
    mode: StubMode,
}

impl<'a> SimpleAccessor<'a> {
    /// Falls back to the parameter's own name when `key` is empty.
    pub fn parameter(
        key: &str,
        parameter: &'a Parameter,
        mode: StubMode,
    ) -> Result<Self, GenerationError> {
        let field_name = if key.is_empty() {
            parameter.name.clone()
        } else {
            key.to_string()
        };
        Ok(Self {
            hint: GeneratorHint::from_extensions(&field_name, &parameter.extensions)?,
            field_name,
            simple: &parameter.simple,
            validations: &parameter.validations,
            required: parameter.required,
            mode,
        })
    }

    /// Headers are always required.
    pub fn header(key: &str, header: &'a Header, mode: StubMode) -> Result<Self, GenerationError> {
        Ok(Self {
            hint: GeneratorHint::from_extensions(key, &header.extensions)?,
            field_name: key.to_string(),
            simple: &header.simple,
            validations: &header.validations,
            required: true,
            mode,
        })
    }

    /// Element accessor; never required and never carries collection flags.
    pub fn items(
        field_name: String,
        items: &'a Items,
        parent_mode: StubMode,
    ) -> Result<Self, GenerationError> {
        Ok(Self {
            hint: GeneratorHint::from_extensions(&field_name, &items.extensions)?,
            field_name,
            simple: &items.simple,
            validations: &items.validations,
            required: false,
            mode: parent_mode.difference(StubMode::COLLECTION),
        })
    }
}

impl ConstraintAccessor for SimpleAccessor<'_> {
    fn name(&self) -> &str {
        &self.hint.name
    }

    fn field_name(&self) -> &str {
        &self.field_name
    }

    fn args(&self) -> &[Value] {
        &self.hint.args
    }

    fn type_name(&self) -> &str {
        self.simple.type_name.as_deref().unwrap_or_default()
    }

    fn format(&self) -> &str {
        self.simple.format.as_deref().unwrap_or_default()
    }

    fn collection_format(&self) -> &str {
        self.simple.collection_format.as_deref().unwrap_or_default()
    }

    fn required(&self) -> bool {
        self.required
    }

    fn mode(&self) -> StubMode {
        self.mode
    }

    fn items(&self) -> Result<Box<dyn ConstraintAccessor + '_>, GenerationError> {
        let items = self
            .simple
            .items
            .as_deref()
            .ok_or_else(|| GenerationError::MissingElementSchema {
                field: self.field_name.clone(),
            })?;
        let accessor = SimpleAccessor::items(items_field(&self.field_name), items, self.mode)?;
        Ok(Box::new(accessor))
    }

    fn validations(&self) -> &CommonValidations {
        self.validations
    }
}

/// Accessor over a schema node; required-ness comes from the caller.
#[derive(Debug)]
pub struct SchemaAccessor<'a> {
    hint: GeneratorHint,
    field_name: String,
    schema: &'a Schema,
    required: bool,
    mode: StubMode,
}

impl<'a> SchemaAccessor<'a> {
    pub fn new(
        key: &str,
        schema: &'a Schema,
        required: bool,
        mode: StubMode,
    ) -> Result<Self, GenerationError> {
        Ok(Self {
            hint: GeneratorHint::from_extensions(key, &schema.extensions)?,
            field_name: key.to_string(),
            schema,
            required,
            mode,
        })
    }
}

impl ConstraintAccessor for SchemaAccessor<'_> {
    fn name(&self) -> &str {
        &self.hint.name
    }

    fn field_name(&self) -> &str {
        &self.field_name
    }

    fn args(&self) -> &[Value] {
        &self.hint.args
    }

    fn type_name(&self) -> &str {
        self.schema.type_name()
    }

    fn format(&self) -> &str {
        self.schema.format.as_deref().unwrap_or_default()
    }

    fn collection_format(&self) -> &str {
        ""
    }

    fn required(&self) -> bool {
        self.required
    }

    fn mode(&self) -> StubMode {
        self.mode
    }

    fn items(&self) -> Result<Box<dyn ConstraintAccessor + '_>, GenerationError> {
        let items = self
            .schema
            .items
            .as_ref()
            .and_then(|items| items.first())
            .ok_or_else(|| GenerationError::MissingElementSchema {
                field: self.field_name.clone(),
            })?;
        let accessor = SchemaAccessor::new(
            &items_field(&self.field_name),
            items,
            false,
            self.mode.difference(StubMode::COLLECTION),
        )?;
        Ok(Box::new(accessor))
    }

    fn validations(&self) -> &CommonValidations {
        &self.schema.validations
    }
}

fn items_field(field_name: &str) -> String {
    format!("{field_name}.items")
}
