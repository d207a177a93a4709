use std::sync::Arc;
use std::time::Instant;

use rand::RngCore;
use serde_json::Value;
use tracing::{debug, info, warn};

use stubsmith_core::{
    CollectionFormat, DescriptorKind, FieldSpec, FixtureDocument, Header, Parameter, Schema,
    StubMode,
};

use crate::accessor::{ConstraintAccessor, SchemaAccessor, SimpleAccessor};
use crate::aliases::AliasTable;
use crate::errors::GenerationError;
use crate::generators::{GeneratedValue, GeneratorContext, GeneratorRegistry};
use crate::invalid::violate;
use crate::model::{DocumentOptions, FieldIssue, FixtureReport};

/// A borrowed descriptor to generate a value for.
#[derive(Debug, Clone, Copy)]
pub enum Descriptor<'a> {
    Parameter(&'a Parameter),
    Header(&'a Header),
    /// Schema nodes never declare their own required-ness.
    Schema { schema: &'a Schema, required: bool },
}

impl<'a> From<&'a Parameter> for Descriptor<'a> {
    fn from(parameter: &'a Parameter) -> Self {
        Descriptor::Parameter(parameter)
    }
}

impl<'a> From<&'a Header> for Descriptor<'a> {
    fn from(header: &'a Header) -> Self {
        Descriptor::Header(header)
    }
}

/// A descriptor decoded from a raw `(kind, JSON)` pair.
#[derive(Debug, Clone, PartialEq)]
pub enum OwnedDescriptor {
    Parameter(Parameter),
    Header(Header),
    Schema { schema: Schema, required: bool },
}

impl OwnedDescriptor {
    /// Decode `value` as the descriptor kind named by `kind`. `required`
    /// only applies to schema descriptors.
    pub fn from_kind(kind: &str, value: &Value, required: bool) -> Result<Self, GenerationError> {
        let kind = DescriptorKind::parse(kind).ok_or_else(|| {
            GenerationError::UnsupportedDescriptor(format!("unknown descriptor kind '{kind}'"))
        })?;
        let descriptor = match kind {
            DescriptorKind::Parameter => {
                OwnedDescriptor::Parameter(serde_json::from_value(value.clone())?)
            }
            DescriptorKind::Header => {
                OwnedDescriptor::Header(serde_json::from_value(value.clone())?)
            }
            DescriptorKind::Schema => OwnedDescriptor::Schema {
                schema: serde_json::from_value(value.clone())?,
                required,
            },
        };
        Ok(descriptor)
    }

    pub fn as_descriptor(&self) -> Descriptor<'_> {
        match self {
            OwnedDescriptor::Parameter(parameter) => Descriptor::Parameter(parameter),
            OwnedDescriptor::Header(header) => Descriptor::Header(header),
            OwnedDescriptor::Schema { schema, required } => Descriptor::Schema {
                schema,
                required: *required,
            },
        }
    }
}

/// Generation facade: resolves a producer for a descriptor and applies the
/// requested invalid mode to its output.
#[derive(Debug)]
pub struct Stubbing {
    registry: GeneratorRegistry,
}

struct Traced {
    producer: &'static str,
    value: GeneratedValue,
    unhonored: StubMode,
}

impl Stubbing {
    /// Facade for `locale` with the built-in aliases.
    pub fn new(locale: &str) -> Result<Self, GenerationError> {
        Self::with_aliases(locale, Arc::new(AliasTable::default()))
    }

    pub fn with_aliases(locale: &str, aliases: Arc<AliasTable>) -> Result<Self, GenerationError> {
        Ok(Self {
            registry: GeneratorRegistry::new(locale, aliases)?,
        })
    }

    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }

    /// Generate a valid value for `descriptor`.
    pub fn generate(
        &self,
        field_key: &str,
        descriptor: Descriptor<'_>,
    ) -> Result<GeneratedValue, GenerationError> {
        self.generate_with_mode(field_key, descriptor, StubMode::VALID)
    }

    pub fn generate_with_mode(
        &self,
        field_key: &str,
        descriptor: Descriptor<'_>,
        mode: StubMode,
    ) -> Result<GeneratedValue, GenerationError> {
        let mut rng = rand::rng();
        self.generate_with_mode_rng(field_key, descriptor, mode, &mut rng)
    }

    pub fn generate_with_rng(
        &self,
        field_key: &str,
        descriptor: Descriptor<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedValue, GenerationError> {
        self.generate_with_mode_rng(field_key, descriptor, StubMode::VALID, rng)
    }

    /// Unhonored flags surface as [`GenerationError::PartialInvalidMode`],
    /// which carries the value that was produced.
    pub fn generate_with_mode_rng(
        &self,
        field_key: &str,
        descriptor: Descriptor<'_>,
        mode: StubMode,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedValue, GenerationError> {
        let accessor = build_accessor(field_key, descriptor, mode)?;
        self.generate_for(accessor.as_ref(), rng)
    }

    /// Generate for an already built accessor.
    pub fn generate_for(
        &self,
        accessor: &dyn ConstraintAccessor,
        rng: &mut dyn RngCore,
    ) -> Result<GeneratedValue, GenerationError> {
        let traced = self.trace(accessor, rng)?;
        if traced.unhonored.is_empty() {
            return Ok(traced.value);
        }
        Err(GenerationError::PartialInvalidMode {
            field: accessor.field_name().to_string(),
            unhonored: traced.unhonored,
            value: traced.value,
        })
    }

    /// Generate every field of `document`. A failing field is recorded as an
    /// issue and never stops the others.
    pub fn generate_document(
        &self,
        document: &FixtureDocument,
        options: &DocumentOptions,
    ) -> FixtureReport {
        let mut rng = rand::rng();
        self.generate_document_with_rng(document, options, &mut rng)
    }

    pub fn generate_document_with_rng(
        &self,
        document: &FixtureDocument,
        options: &DocumentOptions,
        rng: &mut dyn RngCore,
    ) -> FixtureReport {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let mut report = FixtureReport::new(run_id.clone(), self.registry.locale().to_string());

        info!(
            run_id = %run_id,
            fields = document.fields.len(),
            locale = %self.registry.locale(),
            "document generation started"
        );

        for field in &document.fields {
            match self.generate_field(field, options, rng) {
                Ok(traced) => {
                    report.record_generator_usage(traced.producer);
                    if !traced.unhonored.is_empty() {
                        warn!(
                            field = %field.key,
                            unhonored = %traced.unhonored,
                            "requested violations not honored"
                        );
                        report.record_issue(FieldIssue {
                            key: field.key.clone(),
                            code: "partial_invalid_mode".to_string(),
                            message: format!(
                                "requested violations not honored: {}",
                                traced.unhonored
                            ),
                            unhonored: traced.unhonored.flags(),
                        });
                    }
                    report.record_value(&field.key, traced.value.to_json());
                }
                Err(err) => {
                    warn!(
                        field = %field.key,
                        code = err.code(),
                        error = %err,
                        "field generation failed"
                    );
                    report.record_issue(FieldIssue {
                        key: field.key.clone(),
                        code: err.code().to_string(),
                        message: err.to_string(),
                        unhonored: Vec::new(),
                    });
                }
            }
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            run_id = %run_id,
            values = report.values.len(),
            issues = report.issues.len(),
            duration_ms = report.duration_ms,
            "document generation completed"
        );
        report
    }

    fn generate_field(
        &self,
        field: &FieldSpec,
        options: &DocumentOptions,
        rng: &mut dyn RngCore,
    ) -> Result<Traced, GenerationError> {
        let descriptor = OwnedDescriptor::from_kind(
            &field.kind,
            &field.descriptor,
            field.required.unwrap_or(false),
        )?;
        let mode = field.stub_mode() | options.mode;
        let accessor = build_accessor(&field.key, descriptor.as_descriptor(), mode)?;
        let mut traced = self.trace(accessor.as_ref(), rng)?;

        let collection = matches!(
            descriptor,
            OwnedDescriptor::Parameter(_) | OwnedDescriptor::Header(_)
        );
        if options.join_collections && collection {
            let format = accessor.collection_format();
            let format = CollectionFormat::parse(format).unwrap_or_else(|| {
                warn!(field = %field.key, format, "unknown collectionFormat, using csv");
                CollectionFormat::Csv
            });
            if let Some(joined) = traced.value.join_collection(format) {
                traced.value = GeneratedValue::Text(joined);
            }
        }
        Ok(traced)
    }

    fn trace(
        &self,
        accessor: &dyn ConstraintAccessor,
        rng: &mut dyn RngCore,
    ) -> Result<Traced, GenerationError> {
        let producer = self.registry.producer_for(accessor)?;
        let mode = accessor.mode();
        debug!(
            field = accessor.field_name(),
            hint = accessor.name(),
            generator = producer.id(),
            mode = %mode,
            "generator resolved"
        );

        let ctx = GeneratorContext {
            accessor,
            registry: &self.registry,
        };
        if mode.is_valid() {
            let value = producer.produce(&ctx, rng)?;
            return Ok(Traced {
                producer: producer.id(),
                value,
                unhonored: StubMode::empty(),
            });
        }

        let violation = violate(&ctx, producer, rng)?;
        Ok(Traced {
            producer: producer.id(),
            value: violation.value,
            unhonored: violation.unhonored,
        })
    }
}

/// Build the accessor for a descriptor; object schemas with nested
/// properties have no single value and are rejected.
pub fn build_accessor<'a>(
    field_key: &str,
    descriptor: Descriptor<'a>,
    mode: StubMode,
) -> Result<Box<dyn ConstraintAccessor + 'a>, GenerationError> {
    let accessor: Box<dyn ConstraintAccessor + 'a> = match descriptor {
        Descriptor::Parameter(parameter) => {
            Box::new(SimpleAccessor::parameter(field_key, parameter, mode)?)
        }
        Descriptor::Header(header) => Box::new(SimpleAccessor::header(field_key, header, mode)?),
        Descriptor::Schema { schema, required } => {
            if schema.type_name() == "object" && !schema.properties.is_empty() {
                return Err(GenerationError::UnsupportedDescriptor(format!(
                    "field '{field_key}': object schema with properties"
                )));
            }
            Box::new(SchemaAccessor::new(field_key, schema, required, mode)?)
        }
    };
    Ok(accessor)
}
