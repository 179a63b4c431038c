#![deny(missing_docs)]

//! # Type Classifier
//!
//! Answers, for one type reference: is it query-string safe, is it an enum, is
//! it an asynchronous result (and of what), and can it travel as JSON.
//! Nothing here fails; anything unrecognised is non-primitive and non-awaitable.

use crate::model::{Passing, TypeDescriptor, TypeRef, UNIT};
use crate::oracle::{is_awaitable, SerializabilityPolicy, TypeOracle};

/// Scalar types that render to and parse from a single query-string value.
const PRIMITIVES: [&str; 17] = [
    "bool", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128",
    "usize", "f32", "f64", "char", "String",
];

/// Classifies type references against a host oracle and a serializability policy.
#[derive(Clone, Copy)]
pub struct TypeClassifier<'a> {
    oracle: &'a dyn TypeOracle,
    policy: &'a dyn SerializabilityPolicy,
}

impl<'a> TypeClassifier<'a> {
    /// Creates a classifier.
    pub fn new(oracle: &'a dyn TypeOracle, policy: &'a dyn SerializabilityPolicy) -> Self {
        Self { oracle, policy }
    }

    /// Whether `ty` satisfies the asynchronous-result protocol.
    pub fn is_awaitable(&self, ty: &TypeRef) -> bool {
        is_awaitable(self.oracle, ty)
    }

    /// Whether a type name passes the serializability policy.
    pub fn is_serializable(&self, type_name: &str) -> bool {
        self.policy.is_serializable(type_name)
    }

    /// The payload of an awaitable: its single generic argument, or `()` when it
    /// has zero or several. Non-awaitables are their own payload.
    pub fn payload(&self, ty: &TypeRef) -> TypeRef {
        if !self.is_awaitable(ty) {
            return ty.clone();
        }
        match ty.args.as_slice() {
            [single] => single.clone(),
            _ => TypeRef::unit(),
        }
    }

    /// Builds the full descriptor for `ty`.
    pub fn classify(&self, ty: &TypeRef) -> TypeDescriptor {
        let display_name = self.oracle.display_name(ty);
        let is_async_result = self.is_awaitable(ty);
        let payload = self.payload(ty);

        let inner_payload_type_name = if is_async_result {
            self.oracle.display_name(&payload)
        } else {
            display_name.clone()
        };

        let is_enum = self.oracle.is_enum(&payload);
        let is_primitive = is_enum || self.is_primitive(&payload);
        let unwrapped = unwrap_option(&payload);

        TypeDescriptor {
            display_name,
            is_primitive,
            is_enum,
            is_async_result,
            is_void: inner_payload_type_name == UNIT,
            is_serializable: self.is_serializable(&inner_payload_type_name),
            is_string: is_string(unwrapped),
            is_optional: unwrapped != &payload,
            passing: passing_of(&payload),
            owned_type_name: payload.owned_display(),
            inner_payload_type_name,
        }
    }

    /// Scalars and strings, plus `Option` of one (including enums).
    fn is_primitive(&self, ty: &TypeRef) -> bool {
        if is_scalar(ty) {
            return true;
        }
        let inner = unwrap_option(ty);
        inner != ty && (is_scalar(inner) || self.oracle.is_enum(inner))
    }
}

fn is_scalar(ty: &TypeRef) -> bool {
    let name = ty.last_segment();
    ty.args.is_empty() && (PRIMITIVES.contains(&name) || name == "str")
}

fn is_string(ty: &TypeRef) -> bool {
    matches!(ty.last_segment(), "String" | "str") && ty.args.is_empty()
}

/// Strips one `Option` layer, if present.
fn unwrap_option(ty: &TypeRef) -> &TypeRef {
    match ty.args.as_slice() {
        [inner] if ty.last_segment() == "Option" && !ty.is_reference => inner,
        _ => ty,
    }
}

fn passing_of(ty: &TypeRef) -> Passing {
    if ty.is_reference {
        return Passing::Borrowed;
    }
    let inner = unwrap_option(ty);
    if inner != ty && inner.is_reference {
        Passing::OptionalBorrowed
    } else {
        Passing::Owned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{DenyList, StaticOracle};

    fn classify(oracle: &StaticOracle, ty: &TypeRef) -> TypeDescriptor {
        let policy = DenyList::default();
        TypeClassifier::new(oracle, &policy).classify(ty)
    }

    #[test]
    fn test_scalars_are_primitive() {
        let oracle = StaticOracle::new();
        for name in ["bool", "i64", "u128", "f32", "char", "String", "std::string::String"] {
            let desc = classify(&oracle, &TypeRef::named(name));
            assert!(desc.is_primitive, "{} should be primitive", name);
            assert!(!desc.is_async_result);
        }
    }

    #[test]
    fn test_borrowed_str_is_primitive_string() {
        let oracle = StaticOracle::new();
        let desc = classify(&oracle, &TypeRef::reference(TypeRef::named("str")));
        assert!(desc.is_primitive);
        assert!(desc.is_string);
        assert_eq!(desc.passing, Passing::Borrowed);
        assert_eq!(desc.owned_type_name, "String");
    }

    #[test]
    fn test_option_unwraps_one_level() {
        let oracle = StaticOracle::new();
        let opt = TypeRef::generic("Option", vec![TypeRef::named("u32")]);
        assert!(classify(&oracle, &opt).is_primitive);

        let nested = TypeRef::generic("Option", vec![opt]);
        assert!(!classify(&oracle, &nested).is_primitive);

        let opt_str = TypeRef::generic("Option", vec![TypeRef::reference(TypeRef::named("str"))]);
        let desc = classify(&oracle, &opt_str);
        assert!(desc.is_primitive);
        assert!(desc.is_optional);
        assert!(desc.is_string);
        assert_eq!(desc.passing, Passing::OptionalBorrowed);
    }

    #[test]
    fn test_collections_and_structs_are_not_primitive() {
        let oracle = StaticOracle::new();
        assert!(!classify(&oracle, &TypeRef::named("Todo")).is_primitive);
        let vec = TypeRef::generic("Vec", vec![TypeRef::named("i32")]);
        assert!(!classify(&oracle, &vec).is_primitive);
    }

    #[test]
    fn test_enum_is_primitive() {
        let oracle = StaticOracle::new().with_enum("Status");
        let desc = classify(&oracle, &TypeRef::named("Status"));
        assert!(desc.is_enum);
        assert!(desc.is_primitive);
    }

    #[test]
    fn test_async_result_unwraps_payload() {
        let oracle = StaticOracle::new();
        let desc = classify(&oracle, &TypeRef::future(TypeRef::named("i32")));
        assert!(desc.is_async_result);
        assert_eq!(desc.display_name, "impl Future<Output = i32>");
        assert_eq!(desc.inner_payload_type_name, "i32");
        assert!(desc.is_primitive);
        assert!(!desc.is_void);
    }

    #[test]
    fn test_async_unit_is_void() {
        let oracle = StaticOracle::new();
        let desc = classify(&oracle, &TypeRef::future(TypeRef::unit()));
        assert!(desc.is_void);
        assert_eq!(desc.inner_payload_type_name, "()");
    }

    #[test]
    fn test_awaitable_with_two_arguments_degrades_to_void() {
        let oracle = StaticOracle::new().with_awaitable("Pair");
        let ty = TypeRef::generic("Pair", vec![TypeRef::named("u8"), TypeRef::named("u16")]);
        let desc = classify(&oracle, &ty);
        assert!(desc.is_async_result);
        assert!(desc.is_void);
        assert!(!desc.is_primitive);
    }

    #[test]
    fn test_non_awaitable_keeps_display_as_payload() {
        let oracle = StaticOracle::new();
        let desc = classify(&oracle, &TypeRef::named("Todo"));
        assert!(!desc.is_async_result);
        assert_eq!(desc.inner_payload_type_name, "Todo");
    }

    #[test]
    fn test_serializability_checks_payload() {
        let oracle = StaticOracle::new();
        let ty = TypeRef::future(TypeRef::named("std::any::TypeId"));
        assert!(!classify(&oracle, &ty).is_serializable);
        assert!(classify(&oracle, &TypeRef::future(TypeRef::named("Todo"))).is_serializable);
    }
}
