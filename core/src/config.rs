#![deny(missing_docs)]

//! # Generator Configuration
//!
//! Settings shared by the modeling and rendering passes. Loaded from YAML; every
//! key is optional and falls back to the defaults below.

use crate::error::{AppError, AppResult};
use crate::oracle::DenyList;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name written into the generated-code header.
pub const GENERATOR_NAME: &str = "svcgen";

/// Version written into the generated-code header.
pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// First path segment of every endpoint (`/<route_root>/<contract>/<endpoint>`).
    pub route_root: String,
    /// Marker supertrait that flags a trait as a contract.
    pub marker: String,
    /// Generator name stamped into the `@generated` header.
    pub generator_name: String,
    /// Generator version stamped into the `@generated` header.
    pub generator_version: String,
    /// One level of indentation in emitted code.
    pub indent: String,
    /// Name fragments that make a type non-serializable.
    pub deny_list: Vec<String>,
    /// Extra type names treated as awaitable without an `impl Future` in sight.
    pub awaitable_types: Vec<String>,
    /// Reformat emitted units with `prettyplease`.
    pub pretty_print: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            route_root: "BlazorServices".to_string(),
            marker: "BlazorService".to_string(),
            generator_name: GENERATOR_NAME.to_string(),
            generator_version: GENERATOR_VERSION.to_string(),
            indent: "    ".to_string(),
            deny_list: DenyList::default_fragments(),
            awaitable_types: vec!["BoxFuture".to_string(), "LocalBoxFuture".to_string()],
            pretty_print: false,
        }
    }
}

impl GeneratorConfig {
    /// Parses a YAML document, then validates it.
    pub fn from_yaml(yaml: &str) -> AppResult<Self> {
        // An empty document means "all defaults".
        let config = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str::<Self>(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a YAML configuration file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Checks the values that end up inside generated identifiers and paths.
    pub fn validate(&self) -> AppResult<()> {
        if !is_identifier(&self.marker) {
            return Err(AppError::Config(format!(
                "marker `{}` is not a valid Rust identifier",
                self.marker
            )));
        }

        if self.route_root.is_empty()
            || self
                .route_root
                .chars()
                .any(|c| c == '/' || c == '"' || c.is_whitespace())
        {
            return Err(AppError::Config(format!(
                "route_root `{}` must be a single non-empty path segment",
                self.route_root
            )));
        }

        if self.indent.chars().any(|c| c != ' ' && c != '\t') {
            return Err(AppError::Config(
                "indent may only contain spaces or tabs".into(),
            ));
        }

        Ok(())
    }

    /// The serializability predicate configured by `deny_list`.
    pub fn serializability_policy(&self) -> DenyList {
        DenyList::new(self.deny_list.clone())
    }
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}
