#![deny(missing_docs)]

//! # Input Model
//!
//! What the host hands to the pipeline: interface declarations, their members,
//! and type references. Hosts build these from whatever syntax they read; the
//! `source` module builds them from Rust files.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// A position in a source file. Lines and columns are 1-based.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SourceLocation {
    /// File the construct was read from.
    pub file: PathBuf,
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
}

impl SourceLocation {
    /// Creates a location.
    pub fn new(file: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// Path of the inline future shape produced by `async fn` and `impl Future<Output = T>`.
pub const IMPL_FUTURE: &str = "impl Future";

/// Path of the unit type.
pub const UNIT: &str = "()";

/// A structural reference to a type as written in a signature.
///
/// `path` is the type constructor with references stripped (`Option`, `str`,
/// `std::string::String`); `args` are its generic type arguments, lifetimes
/// omitted. `display` keeps the text the author wrote so emitted signatures
/// match the contract exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    /// The type as written, e.g. `&'a str` or `Option<Vec<Todo>>`.
    pub display: String,
    /// Constructor path without references or generic arguments.
    pub path: String,
    /// Generic type arguments in declaration order.
    pub args: Vec<TypeRef>,
    /// Whether the outermost layer is a `&` or `&mut`.
    pub is_reference: bool,
}

impl TypeRef {
    /// A non-generic type such as `i32` or `Todo`.
    pub fn named(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            display: path.clone(),
            path,
            args: Vec::new(),
            is_reference: false,
        }
    }

    /// A generic type such as `Vec<Todo>`; `display` is derived from the arguments.
    pub fn generic(path: impl Into<String>, args: Vec<TypeRef>) -> Self {
        let path = path.into();
        let display = if args.is_empty() {
            path.clone()
        } else {
            let rendered: Vec<&str> = args.iter().map(|a| a.display.as_str()).collect();
            format!("{}<{}>", path, rendered.join(", "))
        };
        Self {
            display,
            path,
            args,
            is_reference: false,
        }
    }

    /// A shared reference to `inner`.
    pub fn reference(inner: TypeRef) -> Self {
        Self {
            display: format!("&{}", inner.display),
            is_reference: true,
            ..inner
        }
    }

    /// The unit type `()`.
    pub fn unit() -> Self {
        Self::named(UNIT)
    }

    /// The `impl Future<Output = T>` shape of an `async fn` returning `output`.
    pub fn future(output: TypeRef) -> Self {
        Self {
            display: format!("{}<Output = {}>", IMPL_FUTURE, output.display),
            path: IMPL_FUTURE.to_string(),
            args: vec![output],
            is_reference: false,
        }
    }

    /// Last `::` segment of the constructor path.
    pub fn last_segment(&self) -> &str {
        self.path.rsplit("::").next().unwrap_or(&self.path)
    }

    /// The owned counterpart, used for fields that are deserialized on the server:
    /// `&str` → `String`, `&[T]` → `Vec<T>`, `&T` → `T`, recursively through arguments.
    pub fn owned_display(&self) -> String {
        if self.path == "str" {
            return "String".to_string();
        }
        if self.path == "[]" {
            let elem = self
                .args
                .first()
                .map(TypeRef::owned_display)
                .unwrap_or_else(|| UNIT.to_string());
            return format!("Vec<{}>", elem);
        }
        if self.args.is_empty() {
            // Opaque shapes keep their text; only the borrow is dropped.
            return strip_reference(&self.display).to_string();
        }
        let args: Vec<String> = self.args.iter().map(TypeRef::owned_display).collect();
        format!("{}<{}>", self.path, args.join(", "))
    }
}

fn strip_reference(display: &str) -> &str {
    let Some(rest) = display.strip_prefix('&') else {
        return display;
    };
    let rest = rest.trim_start();
    let rest = match rest.strip_prefix('\'') {
        // Skip the lifetime name.
        Some(lifetime) => lifetime
            .split_once(char::is_whitespace)
            .map(|(_, tail)| tail)
            .unwrap_or(lifetime),
        None => rest,
    };
    let rest = rest.trim_start();
    rest.strip_prefix("mut ").unwrap_or(rest).trim_start()
}

/// Kind of a member declared inside an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberKind {
    /// A function taking a `self` receiver.
    Method,
    /// Anything else; the label names the construct (e.g. `associated const`).
    Other(String),
}

/// One parameter of a method signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    /// Parameter name.
    pub name: String,
    /// Declared type.
    pub ty: TypeRef,
    /// Where the parameter is declared.
    pub location: SourceLocation,
}

/// One member of an interface declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSpec {
    /// Method or something else.
    pub kind: MemberKind,
    /// Member name.
    pub name: String,
    /// Receiver as written (`&self`); `None` for non-methods.
    pub receiver: Option<String>,
    /// Generic parameter list as written (`<'a>`), empty when absent.
    pub generics: String,
    /// Whether the member declares type or const generic parameters.
    pub is_generic: bool,
    /// Declared return type; `async fn` is recorded as [`TypeRef::future`].
    pub return_type: TypeRef,
    /// Parameters after the receiver, in declaration order.
    pub parameters: Vec<ParameterSpec>,
    /// Location of the member name.
    pub location: SourceLocation,
    /// Location of the return type (the name when no return type is written).
    pub return_location: SourceLocation,
    /// Location of the generic parameter list (the name when absent).
    pub generics_location: SourceLocation,
}

impl MemberSpec {
    /// A method with a `&self` receiver; locations default to the start of an unnamed file.
    pub fn method(name: impl Into<String>, return_type: TypeRef, parameters: Vec<ParameterSpec>) -> Self {
        Self {
            kind: MemberKind::Method,
            name: name.into(),
            receiver: Some("&self".to_string()),
            generics: String::new(),
            is_generic: false,
            return_type,
            parameters,
            location: SourceLocation::default(),
            return_location: SourceLocation::default(),
            generics_location: SourceLocation::default(),
        }
    }

    /// The signature as shown in diagnostics, e.g. `fetch(&self, id: u64)`.
    pub fn signature(&self) -> String {
        let mut parts: Vec<String> = self.receiver.iter().cloned().collect();
        parts.extend(
            self.parameters
                .iter()
                .map(|p| format!("{}: {}", p.name, p.ty.display)),
        );
        format!("{}{}({})", self.name, self.generics, parts.join(", "))
    }
}

impl ParameterSpec {
    /// A parameter without a meaningful location.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            location: SourceLocation::default(),
        }
    }
}

/// An interface declaration carrying the service marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceSpec {
    /// Declared name, e.g. `ITodoService`.
    pub name: String,
    /// Enclosing module path, e.g. `crate::services`.
    pub namespace: String,
    /// Members in declaration order.
    pub members: Vec<MemberSpec>,
    /// Location of the declaration name.
    pub location: SourceLocation,
}

impl InterfaceSpec {
    /// Fully qualified name (`namespace::name`), or the bare name without a namespace.
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.namespace, self.name)
        }
    }
}
