#![deny(missing_docs)]

//! # Contract Modeler
//!
//! Aggregates the methods of one interface into a [`ContractDescriptor`],
//! derives the generated naming, and makes endpoint names unique.
//!
//! Overloads are legal in a contract but an HTTP endpoint is identified by its
//! path alone. Methods are grouped by `(needs_serialization, name)`; two methods
//! that differ in serialization need become GET and POST and do not collide.
//! Within a group the first method keeps its name and later ones get `2`, `3`, ...

use crate::classifier::TypeClassifier;
use crate::method::model_method;
use crate::model::{ContractDescriptor, InterfaceSpec, MemberKind, MethodDescriptor};
use indexmap::IndexMap;
use tracing::debug;

/// Strips the namespace and a conventional leading `I` (`crate::svc::ITodoService` → `TodoService`).
pub fn simple_name(interface_name: &str) -> String {
    let name = interface_name.rsplit("::").next().unwrap_or(interface_name);
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some('I'), Some(second)) if second.is_uppercase() => name[1..].to_string(),
        _ => name.to_string(),
    }
}

/// `...Service` → `...BlazorService`, `...Manager` → `...BlazorManager`, else `Blazor<simple>`.
pub fn generated_class_name(simple_name: &str) -> String {
    for suffix in ["Service", "Manager"] {
        if let Some(stem) = simple_name.strip_suffix(suffix) {
            return format!("{}Blazor{}", stem, suffix);
        }
    }
    format!("Blazor{}", simple_name)
}

/// Models every method of `spec` and resolves endpoint collisions.
///
/// Non-method members are not modeled; validation reports them.
pub fn model_contract(spec: &InterfaceSpec, classifier: &TypeClassifier<'_>) -> ContractDescriptor {
    let interface_name = spec.qualified_name();
    let simple_name = simple_name(&interface_name);
    let generated_class_name = generated_class_name(&simple_name);

    let methods = spec
        .members
        .iter()
        .filter(|m| m.kind == MemberKind::Method)
        .map(|m| model_method(m, &generated_class_name, classifier))
        .collect();

    resolve_collisions(ContractDescriptor {
        interface_name,
        namespace: spec.namespace.clone(),
        simple_name,
        generated_class_name,
        methods,
    })
}

/// Re-derives `contract` with unique endpoint names.
///
/// Pure: the input is consumed and a new contract returned; renamed methods get
/// a freshly synthesized transfer object.
pub fn resolve_collisions(contract: ContractDescriptor) -> ContractDescriptor {
    let mut occurrences: IndexMap<(bool, &str), usize> = IndexMap::new();
    let mut methods: Vec<MethodDescriptor> = Vec::with_capacity(contract.methods.len());

    for method in &contract.methods {
        let seen = occurrences
            .entry((method.needs_serialization, method.name.as_str()))
            .or_insert(0);
        *seen += 1;

        if *seen == 1 {
            methods.push(method.clone());
            continue;
        }

        let endpoint_name = format!("{}{}", method.name, seen);
        debug!(
            contract = %contract.simple_name,
            method = %method.name,
            endpoint = %endpoint_name,
            "renamed colliding endpoint"
        );
        methods.push(method.with_endpoint_name(endpoint_name, &contract.generated_class_name));
    }

    ContractDescriptor {
        methods,
        ..contract
    }
}
