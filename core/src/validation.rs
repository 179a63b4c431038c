#![deny(missing_docs)]

//! # Validation
//!
//! The five contract-shape rules. [`Validator::check_interface`] is consumed
//! twice: by the live diagnostics path, which reports every violation, and by
//! the generation gate, which drops any contract with a violation.

use crate::classifier::TypeClassifier;
use crate::model::{InterfaceSpec, MemberKind, MemberSpec, SourceLocation};
use serde::Serialize;
use std::fmt;

/// A contract-shape rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Rule {
    /// The return type must satisfy the asynchronous-result protocol.
    MethodNotAwaitable,
    /// Only methods may be declared in a contract.
    MemberNotAllowed,
    /// The return payload must be serializable.
    ReturnTypeNotSerializable,
    /// Every parameter type must be serializable.
    ParameterNotSerializable,
    /// Methods must not be generic.
    MethodGeneric,
}

impl Rule {
    /// Stable diagnostic code.
    pub fn code(self) -> &'static str {
        match self {
            Rule::MethodNotAwaitable => "BS0001",
            Rule::MemberNotAllowed => "BS0002",
            Rule::ReturnTypeNotSerializable => "BS0003",
            Rule::ParameterNotSerializable => "BS0004",
            Rule::MethodGeneric => "BS0005",
        }
    }

    /// Short title of the rule.
    pub fn title(self) -> &'static str {
        match self {
            Rule::MethodNotAwaitable => "Methods not awaitable",
            Rule::MemberNotAllowed => "Member not allowed",
            Rule::ReturnTypeNotSerializable => "Return type must be serializable",
            Rule::ParameterNotSerializable => "Method parameter must be serializable",
            Rule::MethodGeneric => "Method may not be generic",
        }
    }
}

/// Diagnostic severity. Every rule violation is a hard error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks generation of the owning contract.
    Error,
}

/// One rule violation at a source location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Stable code, e.g. `BS0001`.
    pub code: &'static str,
    /// The violated rule.
    #[serde(skip)]
    pub rule: Rule,
    /// Always [`Severity::Error`].
    pub severity: Severity,
    /// Human readable message.
    pub message: String,
    /// Offending construct.
    pub location: SourceLocation,
}

impl Diagnostic {
    fn new(rule: Rule, message: String, location: &SourceLocation) -> Self {
        Self {
            code: rule.code(),
            rule,
            severity: Severity::Error,
            message,
            location: location.clone(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: error[{}]: {}", self.location, self.code, self.message)
    }
}

/// Evaluates the contract rules against interface declarations.
pub struct Validator<'a> {
    classifier: TypeClassifier<'a>,
    marker: &'a str,
}

impl<'a> Validator<'a> {
    /// Creates a validator; `marker` is only used in messages.
    pub fn new(classifier: TypeClassifier<'a>, marker: &'a str) -> Self {
        Self { classifier, marker }
    }

    /// Every violation of one member, in rule-check order.
    pub fn check_member(&self, member: &MemberSpec) -> Vec<Diagnostic> {
        let marker = self.marker;
        let mut diagnostics = Vec::new();

        if let MemberKind::Other(kind) = &member.kind {
            diagnostics.push(Diagnostic::new(
                Rule::MemberNotAllowed,
                format!(
                    "The {} `{}` is not allowed here. Only methods are allowed in a `{}` contract.",
                    kind, member.name, marker
                ),
                &member.location,
            ));
            return diagnostics;
        }

        let signature = member.signature();
        let return_display = &member.return_type.display;

        if member.is_generic {
            diagnostics.push(Diagnostic::new(
                Rule::MethodGeneric,
                format!(
                    "The method `{}` must not be generic. All `{}` methods must not be generic.",
                    signature, marker
                ),
                &member.generics_location,
            ));
        }

        if !self.classifier.is_awaitable(&member.return_type) {
            diagnostics.push(Diagnostic::new(
                Rule::MethodNotAwaitable,
                format!(
                    "The method `{}` returning `{}` must be awaitable. All `{}` methods must be awaitable.",
                    signature, return_display, marker
                ),
                &member.return_location,
            ));
        }

        let payload = self.classifier.payload(&member.return_type);
        if !self.classifier.is_serializable(&payload.display) {
            diagnostics.push(Diagnostic::new(
                Rule::ReturnTypeNotSerializable,
                format!(
                    "The return type `{}` of method `{}` is not serializable. All `{}` methods must return a JSON serializable type.",
                    payload.display, member.name, marker
                ),
                &member.return_location,
            ));
        }

        for parameter in &member.parameters {
            if !self.classifier.is_serializable(&parameter.ty.display) {
                diagnostics.push(Diagnostic::new(
                    Rule::ParameterNotSerializable,
                    format!(
                        "The parameter `{}` of method `{}` is not serializable. All `{}` method parameters must be of a JSON serializable type.",
                        parameter.name, member.name, marker
                    ),
                    &parameter.location,
                ));
            }
        }

        diagnostics
    }

    /// Every violation of one interface, in member order.
    pub fn check_interface(&self, spec: &InterfaceSpec) -> Vec<Diagnostic> {
        spec.members
            .iter()
            .flat_map(|member| self.check_member(member))
            .collect()
    }
}
