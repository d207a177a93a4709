//! Core contracts for stubsmith.
//!
//! This crate defines the API descriptor model (parameters, headers, schema
//! objects), the invalid-mode flag set, and the fixture document contract
//! shared by the generator engine and the CLI.

pub mod constraints;
pub mod descriptor;
pub mod document;
pub mod error;
pub mod mode;
pub mod validation;

pub use constraints::{CollectionFormat, CommonValidations, Items, SimpleSchema};
pub use descriptor::{Extensions, Header, Parameter, Schema, SchemaItems, SchemaType};
pub use document::{DescriptorKind, FieldSpec, FixtureDocument};
pub use error::{Error, Result};
pub use mode::{InvalidFlag, StubMode};
pub use validation::{
    IssueSeverity, ValidationIssue, ValidationReport, fixture_document_json_schema,
    validate_document_json,
};

/// Vendor-extension key carrying the generator hint block.
pub const DATAGEN_EXTENSION: &str = "x-datagen";
