#![deny(missing_docs)]

//! # Source Host
//!
//! Reads Rust files with `syn` and answers the pipeline's questions about them:
//! which traits are contracts (carry the marker supertrait), what their members
//! look like, which names are enums and which types are futures.

pub mod interfaces;
pub mod module_path;
pub mod oracle;
pub mod types;

use crate::config::GeneratorConfig;
use crate::error::{AppError, AppResult};
use crate::model::InterfaceSpec;
use crate::oracle::StaticOracle;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub use interfaces::collect_interfaces;
pub use module_path::module_path;
pub use oracle::OracleScanner;
pub use types::type_ref;

/// One parsed file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path as given by the caller; used in diagnostics.
    pub path: PathBuf,
    /// Module path of the file's top level (`crate::services`).
    pub module_path: String,
    /// Parsed syntax tree.
    pub syntax: syn::File,
}

/// The parsed files of one run.
#[derive(Debug, Default)]
pub struct SourceSet {
    files: Vec<SourceFile>,
    skipped: Vec<AppError>,
}

impl SourceSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads and parses `paths`, deriving module paths relative to `src_root`.
    ///
    /// A file that does not parse is skipped (see [`SourceSet::skipped`]) so that
    /// one broken file does not hide the contracts of the others.
    ///
    /// # Errors
    ///
    /// [`AppError::Io`] when a file cannot be read.
    pub fn load(src_root: &Path, paths: &[PathBuf]) -> AppResult<Self> {
        let mut set = Self::new();
        for path in paths {
            let code = fs::read_to_string(path)?;
            let module = module_path(src_root, path);
            if let Err(error) = set.add_source(path.clone(), module, &code) {
                warn!(%error, "skipping source file");
                set.skipped.push(error);
            }
        }
        debug!(
            files = set.files.len(),
            skipped = set.skipped.len(),
            "sources loaded"
        );
        Ok(set)
    }

    /// Parses `code` as the file `path` with top-level module `module_path`.
    ///
    /// # Errors
    ///
    /// [`AppError::Parse`] when `code` is not valid Rust; the set is unchanged.
    pub fn add_source(
        &mut self,
        path: impl Into<PathBuf>,
        module_path: impl Into<String>,
        code: &str,
    ) -> AppResult<()> {
        let path = path.into();
        let syntax = syn::parse_file(code).map_err(|error| {
            let start = error.span().start();
            AppError::Parse {
                message: format!("{}:{}: {}", start.line, start.column + 1, error),
                path: path.clone(),
            }
        })?;
        self.files.push(SourceFile {
            path,
            module_path: module_path.into(),
            syntax,
        });
        Ok(())
    }

    /// Parsed files, in load order.
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// Files that failed to parse.
    pub fn skipped(&self) -> &[AppError] {
        &self.skipped
    }

    /// Every trait carrying `marker` as a supertrait, in file order.
    pub fn interfaces(&self, marker: &str) -> Vec<InterfaceSpec> {
        self.files
            .iter()
            .flat_map(|file| {
                collect_interfaces(&file.syntax.items, &file.module_path, &file.path, marker)
            })
            .collect()
    }

    /// A type oracle knowing the enums and future implementations of every file,
    /// plus the configured awaitable names.
    pub fn oracle(&self, config: &GeneratorConfig) -> StaticOracle {
        let mut oracle = StaticOracle::new();
        for name in &config.awaitable_types {
            oracle.add_awaitable(name.clone());
        }
        let mut scanner = OracleScanner::new(&mut oracle);
        for file in &self.files {
            scanner.scan(&file.syntax);
        }
        oracle
    }
}
