#![deny(missing_docs)]

//! # Type Oracle
//!
//! The questions the classifier asks about a type it cannot answer from the
//! type reference alone, and the pluggable serializability predicate.
//!
//! Awaitability is a capability test, not a name lookup: a type is an
//! asynchronous result when it can report completion, accept a continuation
//! and hand back its output. Third-party future-like types qualify as soon as
//! the oracle reports the three capabilities for them.

use crate::model::{TypeRef, IMPL_FUTURE};
use std::collections::{BTreeSet, HashMap, HashSet};

/// One capability of the asynchronous-result protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    /// Can report whether the computation has completed (`Future::poll`).
    PollCompletion,
    /// Can register a continuation to be woken on completion (the `Context` waker).
    RegisterContinuation,
    /// Can hand back the result once completed (`Future::Output`).
    FetchResult,
}

/// The complete asynchronous-result protocol.
pub const ASYNC_RESULT_PROTOCOL: [Capability; 3] = [
    Capability::PollCompletion,
    Capability::RegisterContinuation,
    Capability::FetchResult,
];

/// Type-resolution questions answered by the host.
pub trait TypeOracle {
    /// Whether `ty` exposes `capability`.
    fn has_capability(&self, ty: &TypeRef, capability: Capability) -> bool;

    /// Whether `ty` names an enumeration.
    fn is_enum(&self, ty: &TypeRef) -> bool;

    /// The name used for serializability and diagnostics.
    fn display_name(&self, ty: &TypeRef) -> String {
        ty.display.clone()
    }
}

/// Whether `ty` satisfies every capability of the asynchronous-result protocol.
pub fn is_awaitable(oracle: &dyn TypeOracle, ty: &TypeRef) -> bool {
    ASYNC_RESULT_PROTOCOL
        .iter()
        .all(|capability| oracle.has_capability(ty, *capability))
}

/// Decides whether a type can travel as JSON.
pub trait SerializabilityPolicy {
    /// Whether a value of `type_name` can be serialized.
    fn is_serializable(&self, type_name: &str) -> bool;
}

/// Name-based serializability: a type is serializable unless its name contains
/// one of the denied fragments.
///
/// This is a substring heuristic. A user type whose name happens to contain a
/// fragment is reported as non-serializable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenyList {
    fragments: Vec<String>,
}

impl DenyList {
    /// A deny-list with the given fragments.
    pub fn new(fragments: Vec<String>) -> Self {
        Self { fragments }
    }

    /// Runtime reflection, type identity and token-tree types.
    pub fn default_fragments() -> Vec<String> {
        ["std::any::", "core::any::", "TypeId", "dyn Any", "proc_macro"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

impl Default for DenyList {
    fn default() -> Self {
        Self::new(Self::default_fragments())
    }
}

impl SerializabilityPolicy for DenyList {
    fn is_serializable(&self, type_name: &str) -> bool {
        !self
            .fragments
            .iter()
            .any(|fragment| type_name.contains(fragment.as_str()))
    }
}

/// Paths that always satisfy the protocol: inline and boxed future shapes.
const FUTURE_SHAPES: [&str; 3] = [IMPL_FUTURE, "dyn Future", "impl IntoFuture"];

/// An oracle backed by explicit tables keyed by the last path segment.
#[derive(Debug, Clone, Default)]
pub struct StaticOracle {
    enums: HashSet<String>,
    capabilities: HashMap<String, BTreeSet<Capability>>,
}

impl StaticOracle {
    /// An oracle that only knows the built-in future shapes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`StaticOracle::add_enum`].
    pub fn with_enum(mut self, name: impl Into<String>) -> Self {
        self.add_enum(name);
        self
    }

    /// Builder form of [`StaticOracle::add_awaitable`].
    pub fn with_awaitable(mut self, name: impl Into<String>) -> Self {
        self.add_awaitable(name);
        self
    }

    /// Records an enumeration.
    pub fn add_enum(&mut self, name: impl Into<String>) {
        self.enums.insert(name.into());
    }

    /// Records a type exposing the whole protocol.
    pub fn add_awaitable(&mut self, name: impl Into<String>) {
        let name = name.into();
        for capability in ASYNC_RESULT_PROTOCOL {
            self.add_capability(name.clone(), capability);
        }
    }

    /// Records a single capability of a type.
    pub fn add_capability(&mut self, name: impl Into<String>, capability: Capability) {
        self.capabilities
            .entry(name.into())
            .or_default()
            .insert(capability);
    }
}

impl TypeOracle for StaticOracle {
    fn has_capability(&self, ty: &TypeRef, capability: Capability) -> bool {
        if ty.is_reference {
            return false;
        }
        if FUTURE_SHAPES.contains(&ty.path.as_str()) {
            return true;
        }
        self.capabilities
            .get(ty.last_segment())
            .is_some_and(|caps| caps.contains(&capability))
    }

    fn is_enum(&self, ty: &TypeRef) -> bool {
        self.enums.contains(ty.last_segment())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_future_is_awaitable() {
        let oracle = StaticOracle::new();
        let ty = TypeRef::future(TypeRef::named("i32"));
        assert!(is_awaitable(&oracle, &ty));
    }

    #[test]
    fn test_plain_type_is_not_awaitable() {
        let oracle = StaticOracle::new();
        assert!(!is_awaitable(&oracle, &TypeRef::named("i32")));
    }

    #[test]
    fn test_partial_protocol_is_not_awaitable() {
        let mut oracle = StaticOracle::new();
        oracle.add_capability("Pending", Capability::PollCompletion);
        oracle.add_capability("Pending", Capability::FetchResult);
        let ty = TypeRef::generic("Pending", vec![TypeRef::named("u8")]);
        assert!(!is_awaitable(&oracle, &ty));

        oracle.add_capability("Pending", Capability::RegisterContinuation);
        assert!(is_awaitable(&oracle, &ty));
    }

    #[test]
    fn test_registered_awaitable_matches_last_segment() {
        let oracle = StaticOracle::new().with_awaitable("BoxFuture");
        let ty = TypeRef::generic("futures::future::BoxFuture", vec![TypeRef::named("u8")]);
        assert!(is_awaitable(&oracle, &ty));
    }

    #[test]
    fn test_enum_lookup() {
        let oracle = StaticOracle::new().with_enum("Status");
        assert!(oracle.is_enum(&TypeRef::named("crate::model::Status")));
        assert!(!oracle.is_enum(&TypeRef::named("Todo")));
    }

    #[test]
    fn test_deny_list() {
        let policy = DenyList::default();
        assert!(policy.is_serializable("Vec<Todo>"));
        assert!(!policy.is_serializable("std::any::TypeId"));
        assert!(!policy.is_serializable("Box<dyn Any>"));
        assert!(!policy.is_serializable("proc_macro2::TokenStream"));
    }

    #[test]
    fn test_deny_list_false_positive_is_kept() {
        // Substring matching also rejects innocent names.
        let policy = DenyList::default();
        assert!(!policy.is_serializable("MyTypeIdentifier"));
    }
}
