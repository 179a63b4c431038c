#![deny(missing_docs)]

//! # Service Generator Core
//!
//! Compiles service contracts (traits carrying a marker supertrait) into an HTTP
//! client proxy per contract and one actix-web route table for all of them.
//!
//! The pipeline is pure: [`pipeline::generate`] takes interface declarations, a
//! type oracle and a configuration, and returns text units plus diagnostics.
//! The [`source`] module is the host that builds those inputs from Rust files.

/// Shared error types.
pub mod error;

/// Generator settings.
pub mod config;

/// Input declarations and descriptors.
pub mod model;

/// Type-resolution questions and the serializability predicate.
pub mod oracle;

/// Type classification.
pub mod classifier;

/// Request body synthesis for multi-object methods.
pub mod transfer_object;

/// Method modeling.
pub mod method;

/// Contract modeling and endpoint collision resolution.
pub mod contract;

/// Contract-shape rules and diagnostics.
pub mod validation;

/// Indentation-aware text composition.
pub mod code_writer;

/// Client proxy, route table, marker and index renderers.
pub mod render;

/// Generation and live-diagnostics entry points.
pub mod pipeline;

/// `syn`-backed source host.
pub mod source;

pub use classifier::TypeClassifier;
pub use code_writer::CodeWriter;
pub use config::{GeneratorConfig, GENERATOR_NAME, GENERATOR_VERSION};
pub use contract::{generated_class_name, model_contract, resolve_collisions, simple_name};
pub use error::{AppError, AppResult};
pub use method::model_method;
pub use model::{
    AsyncStyle, ContractDescriptor, InterfaceSpec, MemberKind, MemberSpec, MethodDescriptor,
    ParameterDescriptor, ParameterSpec, Passing, RequestBody, SourceLocation,
    TransferObjectDescriptor, Transport, TypeDescriptor, TypeRef,
};
pub use oracle::{
    is_awaitable, Capability, DenyList, SerializabilityPolicy, StaticOracle, TypeOracle,
    ASYNC_RESULT_PROTOCOL,
};
pub use pipeline::{diagnose, generate, CancellationSignal, GenerationOutput, NeverCancelled};
pub use render::GeneratedUnit;
pub use source::SourceSet;
pub use validation::{Diagnostic, Rule, Severity, Validator};
