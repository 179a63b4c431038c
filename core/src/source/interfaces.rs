//! Extraction of contract traits from a parsed file.

use super::types::{render_generics, render_type, return_type_ref, type_ref};
use crate::model::{InterfaceSpec, MemberKind, MemberSpec, ParameterSpec, SourceLocation, TypeRef};
use proc_macro2::Span;
use std::path::Path;
use syn::spanned::Spanned;
use syn::{FnArg, GenericParam, Item, ItemTrait, Pat, TraitItem, TypeParamBound};

/// Collects every trait in `items` that names `marker` as a supertrait.
///
/// # Arguments
///
/// * `items` - Top-level items of one file.
/// * `namespace` - Module path of the file (`crate::services`).
/// * `file` - Path recorded in source locations.
/// * `marker` - Name of the marker trait.
pub fn collect_interfaces(
    items: &[Item],
    namespace: &str,
    file: &Path,
    marker: &str,
) -> Vec<InterfaceSpec> {
    let mut found = Vec::new();
    walk(items, namespace, file, marker, &mut found);
    found
}

fn walk(items: &[Item], namespace: &str, file: &Path, marker: &str, found: &mut Vec<InterfaceSpec>) {
    for item in items {
        match item {
            Item::Trait(item_trait) if is_contract(item_trait, marker) => {
                found.push(interface(item_trait, namespace, file));
            }
            // Inline modules extend the namespace; `mod x;` declarations live in other files.
            Item::Mod(module) => {
                if let Some((_, nested)) = &module.content {
                    let namespace = format!("{}::{}", namespace, module.ident);
                    walk(nested, &namespace, file, marker, found);
                }
            }
            _ => {}
        }
    }
}

fn is_contract(item_trait: &ItemTrait, marker: &str) -> bool {
    item_trait.supertraits.iter().any(|bound| match bound {
        TypeParamBound::Trait(t) => t
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == marker),
        _ => false,
    })
}

fn interface(item_trait: &ItemTrait, namespace: &str, file: &Path) -> InterfaceSpec {
    InterfaceSpec {
        name: item_trait.ident.to_string(),
        namespace: namespace.to_string(),
        members: item_trait
            .items
            .iter()
            .map(|item| member(item, file))
            .collect(),
        location: location(file, item_trait.ident.span()),
    }
}

fn location(file: &Path, span: Span) -> SourceLocation {
    let start = span.start();
    SourceLocation::new(file, start.line, start.column + 1)
}

fn member(item: &TraitItem, file: &Path) -> MemberSpec {
    let (kind, name, span) = match item {
        TraitItem::Fn(function) => return function_member(function, file),
        TraitItem::Const(constant) => ("associated const", constant.ident.to_string(), constant.ident.span()),
        TraitItem::Type(ty) => ("associated type", ty.ident.to_string(), ty.ident.span()),
        TraitItem::Macro(mac) => {
            let path: Vec<String> = mac.mac.path.segments.iter().map(|s| s.ident.to_string()).collect();
            ("macro invocation", format!("{}!", path.join("::")), mac.span())
        }
        other => ("item", "<unknown>".to_string(), other.span()),
    };

    let at = location(file, span);
    MemberSpec {
        kind: MemberKind::Other(kind.to_string()),
        name,
        receiver: None,
        generics: String::new(),
        is_generic: false,
        return_type: TypeRef::unit(),
        parameters: Vec::new(),
        location: at.clone(),
        return_location: at.clone(),
        generics_location: at,
    }
}

fn function_member(function: &syn::TraitItemFn, file: &Path) -> MemberSpec {
    let sig = &function.sig;
    let name_location = location(file, sig.ident.span());

    let receiver = sig.receiver().map(render_receiver);
    let kind = if receiver.is_some() {
        MemberKind::Method
    } else {
        MemberKind::Other("associated function".to_string())
    };

    let parameters = sig
        .inputs
        .iter()
        .filter_map(|arg| match arg {
            FnArg::Typed(pat_type) => Some(pat_type),
            FnArg::Receiver(_) => None,
        })
        .enumerate()
        .map(|(index, pat_type)| ParameterSpec {
            name: match pat_type.pat.as_ref() {
                Pat::Ident(ident) => ident.ident.to_string(),
                _ => format!("arg{}", index),
            },
            ty: type_ref(&pat_type.ty),
            location: location(file, pat_type.span()),
        })
        .collect();

    let return_location = match &sig.output {
        syn::ReturnType::Type(_, ty) => location(file, ty.span()),
        syn::ReturnType::Default => name_location.clone(),
    };

    let generics_location = match &sig.generics.lt_token {
        Some(lt) => location(file, lt.span()),
        None => name_location.clone(),
    };

    MemberSpec {
        kind,
        name: sig.ident.to_string(),
        receiver,
        generics: render_generics(&sig.generics),
        is_generic: sig
            .generics
            .params
            .iter()
            .any(|p| !matches!(p, GenericParam::Lifetime(_))),
        return_type: return_type_ref(sig.asyncness.is_some(), &sig.output),
        parameters,
        location: name_location,
        return_location,
        generics_location,
    }
}

fn render_receiver(receiver: &syn::Receiver) -> String {
    if let Some((_, lifetime)) = &receiver.reference {
        let mut out = String::from("&");
        if let Some(lifetime) = lifetime {
            out.push_str(&lifetime.to_string());
            out.push(' ');
        }
        if receiver.mutability.is_some() {
            out.push_str("mut ");
        }
        out.push_str("self");
        return out;
    }
    if receiver.colon_token.is_some() {
        return format!("self: {}", render_type(&receiver.ty));
    }
    if receiver.mutability.is_some() {
        "mut self".to_string()
    } else {
        "self".to_string()
    }
}
