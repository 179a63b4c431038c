#![deny(missing_docs)]

//! # Transfer Objects
//!
//! When a method takes two or more non-primitive parameters they are folded into
//! one synthesized request body. Primitive parameters stay on the query string.

use crate::model::{ParameterDescriptor, TransferObjectDescriptor};
use heck::ToUpperCamelCase;

impl TransferObjectDescriptor {
    /// Synthesizes the transfer object for `endpoint_name` of `class_name`.
    ///
    /// Always returns a fresh descriptor; renaming an endpoint means calling this again.
    pub fn synthesize(
        class_name: &str,
        endpoint_name: &str,
        parameters: &[ParameterDescriptor],
    ) -> Self {
        Self {
            name: Self::derive_name(class_name, endpoint_name),
            fields: parameters
                .iter()
                .filter(|p| !p.ty.is_primitive)
                .cloned()
                .collect(),
        }
    }

    /// `<Class><Endpoint>Dto`, the endpoint in UpperCamelCase.
    pub fn derive_name(class_name: &str, endpoint_name: &str) -> String {
        format!("{}{}Dto", class_name, endpoint_name.to_upper_camel_case())
    }
}
