//! Schemas for the structured objects idealab recovers from generated text.
//!
//! The recovery parser only guarantees a syntactically valid JSON object.
//! Each consumer here decides which fields it requires and how missing
//! fields are defaulted.

pub mod descriptor;
pub mod idea;
pub mod prototype;
pub mod roast;
pub mod schema;
pub mod validation;

pub use descriptor::{InputDescriptor, InputKind, OutputDescriptor, OutputKind};
pub use idea::{Band, GeneratedIdea, Reasoning, ScoreField, Scores};
pub use prototype::{GeneratedPrototype, PrototypeConfig};
pub use roast::{ResumeRoast, RoastFix};
pub use schema::SchemaError;
pub use validation::{IntegrityWarning, SpecIntegrityError};
