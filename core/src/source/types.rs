//! `syn` types to [`TypeRef`]s, and compact source-like rendering of types.

use crate::model::{TypeRef, IMPL_FUTURE};
use quote::ToTokens;
use syn::{
    GenericArgument, GenericParam, Generics, PathArguments, ReturnType, Type, TypeParamBound,
};

/// Trait names that mark an `impl`/`dyn` bound as a future shape.
const FUTURE_TRAITS: [&str; 2] = ["Future", "IntoFuture"];

/// Converts a parsed type into the structural reference used by the classifier.
pub fn type_ref(ty: &Type) -> TypeRef {
    let display = render_type(ty);
    match ty {
        Type::Reference(reference) => TypeRef {
            display,
            is_reference: true,
            ..type_ref(&reference.elem)
        },
        Type::Paren(paren) => type_ref(&paren.elem),
        Type::Group(group) => type_ref(&group.elem),
        Type::Tuple(tuple) if tuple.elems.is_empty() => TypeRef::unit(),
        Type::Slice(slice) => TypeRef {
            display,
            path: "[]".to_string(),
            args: vec![type_ref(&slice.elem)],
            is_reference: false,
        },
        Type::Path(type_path) if type_path.qself.is_none() => path_ref(type_path, display),
        Type::ImplTrait(bounds) => bound_ref("impl", bounds.bounds.iter(), display),
        Type::TraitObject(bounds) => bound_ref("dyn", bounds.bounds.iter(), display),
        _ => TypeRef::named(display),
    }
}

/// The declared return type, with `async fn` folded into `impl Future<Output = T>`.
pub fn return_type_ref(asyncness: bool, output: &ReturnType) -> TypeRef {
    let declared = match output {
        ReturnType::Default => TypeRef::unit(),
        ReturnType::Type(_, ty) => type_ref(ty),
    };
    if asyncness {
        TypeRef::future(declared)
    } else {
        declared
    }
}

fn path_ref(type_path: &syn::TypePath, display: String) -> TypeRef {
    let path = type_path
        .path
        .segments
        .iter()
        .map(|s| s.ident.to_string())
        .collect::<Vec<_>>()
        .join("::");

    let args: Vec<TypeRef> = match type_path.path.segments.last().map(|s| &s.arguments) {
        Some(PathArguments::AngleBracketed(angle)) => angle
            .args
            .iter()
            .filter_map(|arg| match arg {
                GenericArgument::Type(ty) => Some(type_ref(ty)),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };

    // `Pin<Box<dyn Future<Output = T>>>` is the boxed form of the future shape.
    let last = path.rsplit("::").next().unwrap_or(&path);
    if matches!(last, "Pin" | "Box") {
        if let [inner] = args.as_slice() {
            if is_future_shape(&inner.path) {
                return TypeRef {
                    display,
                    ..inner.clone()
                };
            }
        }
    }

    TypeRef {
        display,
        path,
        args,
        is_reference: false,
    }
}

/// `impl Future`, `dyn Future`, `impl IntoFuture` and `dyn IntoFuture`.
fn is_future_shape(path: &str) -> bool {
    match path.split_once(' ') {
        Some(("impl" | "dyn", name)) => FUTURE_TRAITS.contains(&name),
        _ => false,
    }
}

/// `impl`/`dyn` types: the future bound, if any, decides the shape.
fn bound_ref<'a>(
    keyword: &str,
    bounds: impl Iterator<Item = &'a TypeParamBound>,
    display: String,
) -> TypeRef {
    let traits: Vec<&syn::TraitBound> = bounds
        .filter_map(|b| match b {
            TypeParamBound::Trait(t) => Some(t),
            _ => None,
        })
        .collect();

    let future = traits.iter().find_map(|t| {
        let segment = t.path.segments.last()?;
        let name = segment.ident.to_string();
        FUTURE_TRAITS.contains(&name.as_str()).then_some((name, segment))
    });

    let Some((name, segment)) = future else {
        let first = traits
            .first()
            .and_then(|t| t.path.segments.last())
            .map(|s| s.ident.to_string())
            .unwrap_or_default();
        return TypeRef {
            display,
            path: format!("{} {}", keyword, first),
            args: Vec::new(),
            is_reference: false,
        };
    };

    let output = match &segment.arguments {
        PathArguments::AngleBracketed(angle) => angle.args.iter().find_map(|arg| match arg {
            GenericArgument::AssocType(assoc) if assoc.ident == "Output" => Some(type_ref(&assoc.ty)),
            _ => None,
        }),
        _ => None,
    };

    let path = if keyword == "impl" && name == "Future" {
        IMPL_FUTURE.to_string()
    } else {
        format!("{} {}", keyword, name)
    };

    TypeRef {
        display,
        path,
        args: output.into_iter().collect(),
        is_reference: false,
    }
}

/// Renders a type the way it is usually written (`&'a str`, `Vec<Todo>`).
pub fn render_type(ty: &Type) -> String {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => render_path(&type_path.path),
        Type::Reference(reference) => {
            let mut out = String::from("&");
            if let Some(lifetime) = &reference.lifetime {
                out.push_str(&lifetime.to_string());
                out.push(' ');
            }
            if reference.mutability.is_some() {
                out.push_str("mut ");
            }
            out.push_str(&render_type(&reference.elem));
            out
        }
        Type::Slice(slice) => format!("[{}]", render_type(&slice.elem)),
        Type::Array(array) => format!(
            "[{}; {}]",
            render_type(&array.elem),
            tidy(&array.len.to_token_stream().to_string())
        ),
        Type::Tuple(tuple) => {
            let elems: Vec<String> = tuple.elems.iter().map(render_type).collect();
            if elems.len() == 1 {
                format!("({},)", elems[0])
            } else {
                format!("({})", elems.join(", "))
            }
        }
        Type::ImplTrait(bounds) => format!("impl {}", render_bounds(bounds.bounds.iter())),
        Type::TraitObject(bounds) => format!("dyn {}", render_bounds(bounds.bounds.iter())),
        Type::Paren(paren) => format!("({})", render_type(&paren.elem)),
        Type::Group(group) => render_type(&group.elem),
        Type::Never(_) => "!".to_string(),
        other => tidy(&other.to_token_stream().to_string()),
    }
}

fn render_path(path: &syn::Path) -> String {
    let mut out = String::new();
    if path.leading_colon.is_some() {
        out.push_str("::");
    }
    let segments: Vec<String> = path
        .segments
        .iter()
        .map(|segment| {
            let ident = segment.ident.to_string();
            match &segment.arguments {
                PathArguments::None => ident,
                PathArguments::AngleBracketed(angle) => {
                    let args: Vec<String> = angle.args.iter().map(render_generic_argument).collect();
                    format!("{}<{}>", ident, args.join(", "))
                }
                PathArguments::Parenthesized(parens) => {
                    let inputs: Vec<String> = parens.inputs.iter().map(render_type).collect();
                    match &parens.output {
                        ReturnType::Default => format!("{}({})", ident, inputs.join(", ")),
                        ReturnType::Type(_, ty) => {
                            format!("{}({}) -> {}", ident, inputs.join(", "), render_type(ty))
                        }
                    }
                }
            }
        })
        .collect();
    out.push_str(&segments.join("::"));
    out
}

fn render_generic_argument(arg: &GenericArgument) -> String {
    match arg {
        GenericArgument::Lifetime(lifetime) => lifetime.to_string(),
        GenericArgument::Type(ty) => render_type(ty),
        GenericArgument::AssocType(assoc) => format!("{} = {}", assoc.ident, render_type(&assoc.ty)),
        GenericArgument::Constraint(constraint) => format!(
            "{}: {}",
            constraint.ident,
            render_bounds(constraint.bounds.iter())
        ),
        other => tidy(&other.to_token_stream().to_string()),
    }
}

fn render_bounds<'a>(bounds: impl Iterator<Item = &'a TypeParamBound>) -> String {
    bounds
        .map(|bound| match bound {
            TypeParamBound::Trait(t) => {
                let maybe = if matches!(t.modifier, syn::TraitBoundModifier::Maybe(_)) {
                    "?"
                } else {
                    ""
                };
                format!("{}{}", maybe, render_path(&t.path))
            }
            TypeParamBound::Lifetime(lifetime) => lifetime.to_string(),
            other => tidy(&other.to_token_stream().to_string()),
        })
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Renders a generic parameter list (`<'a, T: Clone>`), empty when there is none.
pub fn render_generics(generics: &Generics) -> String {
    if generics.params.is_empty() {
        return String::new();
    }
    let params: Vec<String> = generics
        .params
        .iter()
        .map(|param| match param {
            GenericParam::Lifetime(def) => {
                let bounds: Vec<String> = def.bounds.iter().map(|l| l.to_string()).collect();
                if bounds.is_empty() {
                    def.lifetime.to_string()
                } else {
                    format!("{}: {}", def.lifetime, bounds.join(" + "))
                }
            }
            GenericParam::Type(def) => {
                if def.bounds.is_empty() {
                    def.ident.to_string()
                } else {
                    format!("{}: {}", def.ident, render_bounds(def.bounds.iter()))
                }
            }
            GenericParam::Const(def) => format!("const {}: {}", def.ident, render_type(&def.ty)),
        })
        .collect();
    format!("<{}>", params.join(", "))
}

/// Collapses the spacing `proc_macro2` puts between every token.
fn tidy(tokens: &str) -> String {
    tokens
        .replace(" :: ", "::")
        .replace(" < ", "<")
        .replace("< ", "<")
        .replace(" >", ">")
        .replace(" ,", ",")
        .replace("& ", "&")
        .replace(" ;", ";")
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_render_common_types() {
        let cases: Vec<(Type, &str)> = vec![
            (parse_quote!(&'a str), "&'a str"),
            (parse_quote!(&mut Vec<Todo>), "&mut Vec<Todo>"),
            (parse_quote!(std::collections::HashMap<String, u32>), "std::collections::HashMap<String, u32>"),
            (parse_quote!(BoxFuture<'_, Option<Todo>>), "BoxFuture<'_, Option<Todo>>"),
            (parse_quote!(impl Future<Output = i32> + Send), "impl Future<Output = i32> + Send"),
            (parse_quote!([u8; 4]), "[u8; 4]"),
            (parse_quote!((u8, String)), "(u8, String)"),
            (parse_quote!(()), "()"),
        ];
        for (ty, expected) in cases {
            assert_eq!(render_type(&ty), expected);
        }
    }

    #[test]
    fn test_reference_keeps_inner_shape() {
        let r = type_ref(&parse_quote!(&'a [Todo]));
        assert!(r.is_reference);
        assert_eq!(r.path, "[]");
        assert_eq!(r.display, "&'a [Todo]");
        assert_eq!(r.owned_display(), "Vec<Todo>");
    }

    #[test]
    fn test_generic_arguments_skip_lifetimes() {
        let r = type_ref(&parse_quote!(futures::future::BoxFuture<'static, Vec<Todo>>));
        assert_eq!(r.path, "futures::future::BoxFuture");
        assert_eq!(r.args.len(), 1);
        assert_eq!(r.args[0].display, "Vec<Todo>");
    }

    #[test]
    fn test_impl_future_shape() {
        let r = type_ref(&parse_quote!(impl Future<Output = Todo> + Send + '_));
        assert_eq!(r.path, IMPL_FUTURE);
        assert_eq!(r.args[0].path, "Todo");
    }

    #[test]
    fn test_pinned_boxed_dyn_future() {
        let r = type_ref(&parse_quote!(Pin<Box<dyn Future<Output = u8> + Send>>));
        assert_eq!(r.path, "dyn Future");
        assert_eq!(r.args[0].path, "u8");
        assert_eq!(r.display, "Pin<Box<dyn Future<Output = u8> + Send>>");
    }

    #[test]
    fn test_boxed_trait_object_keeps_box() {
        let r = type_ref(&parse_quote!(Box<dyn Any + Send>));
        assert_eq!(r.path, "Box");
        assert_eq!(r.args[0].path, "dyn Any");
        assert_eq!(r.display, "Box<dyn Any + Send>");
    }

    #[test]
    fn test_other_impl_trait_is_not_a_future() {
        let r = type_ref(&parse_quote!(impl Iterator<Item = u8>));
        assert_eq!(r.path, "impl Iterator");
        assert!(r.args.is_empty());
    }

    #[test]
    fn test_async_return() {
        let output: ReturnType = parse_quote!(-> Todo);
        let r = return_type_ref(true, &output);
        assert_eq!(r.display, "impl Future<Output = Todo>");
        let r = return_type_ref(true, &ReturnType::Default);
        assert_eq!(r.args[0].path, "()");
        assert_eq!(return_type_ref(false, &ReturnType::Default), TypeRef::unit());
    }

    #[test]
    fn test_render_generics() {
        let g: Generics = parse_quote!(<'a, T: Clone + Send, const N: usize>);
        assert_eq!(render_generics(&g), "<'a, T: Clone + Send, const N: usize>");
        assert_eq!(render_generics(&Generics::default()), "");
    }
}
