#![deny(missing_docs)]

//! # Models
//!
//! Input declarations and the descriptors derived from them.

/// Interface, member and type references supplied by the host.
pub mod spec;

/// Classified, immutable descriptors consumed by validation and rendering.
pub mod descriptors;

pub use descriptors::{
    AsyncStyle, ContractDescriptor, MethodDescriptor, ParameterDescriptor, Passing,
    RequestBody, TransferObjectDescriptor, Transport, TypeDescriptor,
};
pub use spec::{
    InterfaceSpec, MemberKind, MemberSpec, ParameterSpec, SourceLocation, TypeRef, IMPL_FUTURE,
    UNIT,
};
