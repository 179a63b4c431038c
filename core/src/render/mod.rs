#![deny(missing_docs)]

//! # Renderers
//!
//! Turn [`ContractDescriptor`]s into Rust source units. Every unit is a sibling
//! module of one generated directory:
//!
//! * `blazor_service.rs` - the marker trait, always emitted.
//! * `<snake(class)>.rs` - one HTTP client proxy per valid contract.
//! * `blazor_services.rs` - actix-web route table and client registry.
//! * `mod.rs` - the module index.

pub mod client;
pub mod index;
pub mod marker;
pub mod routes;

use crate::config::GeneratorConfig;
use crate::model::{ContractDescriptor, TypeDescriptor};
use heck::ToSnakeCase;
use serde::Serialize;

pub use client::render_client;
pub use index::render_index;
pub use marker::render_marker;
pub use routes::render_routes;

/// Module name of the marker unit.
pub const MARKER_MODULE: &str = "blazor_service";

/// Module name of the route table unit.
pub const ROUTES_MODULE: &str = "blazor_services";

/// One emitted source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedUnit {
    /// File name relative to the output directory, e.g. `todo_blazor_service.rs`.
    pub name: String,
    /// Full file content.
    pub content: String,
}

impl GeneratedUnit {
    /// A unit for module `module`.
    pub fn module(module: &str, content: String) -> Self {
        Self {
            name: format!("{}.rs", module),
            content,
        }
    }
}

/// The first line of every unit.
pub fn header(config: &GeneratorConfig) -> String {
    format!(
        "// @generated by {} {}. Do not edit.",
        config.generator_name, config.generator_version
    )
}

/// Module holding the proxy of `contract`.
pub fn client_module(contract: &ContractDescriptor) -> String {
    contract.generated_class_name.to_snake_case()
}

/// Module holding the handlers of `contract` inside the route table.
pub fn routes_module(contract: &ContractDescriptor) -> String {
    format!("{}_routes", client_module(contract))
}

/// Strings travel as `text/plain`; `Option<String>` does not, it is JSON.
fn is_plain_text(ty: &TypeDescriptor) -> bool {
    ty.is_string && !ty.is_optional
}
