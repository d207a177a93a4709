//! Constraint-aware fixture value generation for stubsmith.
//!
//! Given an API descriptor (parameter, header or schema node) this crate
//! picks a locale-aware producer by explicit `x-datagen` hint, field name or
//! declared type, and returns a value that satisfies the descriptor's
//! constraints or, in invalid mode, deliberately breaks selected ones.

pub mod accessor;
pub mod aliases;
pub mod engine;
pub mod errors;
pub mod faker_rs;
pub mod generators;
pub mod hint;
pub mod invalid;
pub mod model;
pub mod params;

pub use accessor::{ConstraintAccessor, NumericBound, SchemaAccessor, SimpleAccessor};
pub use aliases::{AliasTable, command_name};
pub use engine::{Descriptor, OwnedDescriptor, Stubbing, build_accessor};
pub use errors::GenerationError;
pub use faker_rs::LocaleKey;
pub use generators::{GeneratedValue, GeneratorContext, GeneratorRegistry, Producer};
pub use hint::GeneratorHint;
pub use model::{DocumentOptions, FieldIssue, FixtureReport};
