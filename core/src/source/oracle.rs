//! Populates a [`StaticOracle`] from the scanned sources.

use super::types::render_type;
use crate::oracle::{Capability, StaticOracle};
use syn::visit::{self, Visit};
use syn::{FnArg, ImplItem, ItemEnum, ItemImpl, Type};
use tracing::debug;

/// Records enums and hand-written future implementations.
pub struct OracleScanner<'o> {
    oracle: &'o mut StaticOracle,
}

impl<'o> OracleScanner<'o> {
    /// A scanner writing into `oracle`.
    pub fn new(oracle: &'o mut StaticOracle) -> Self {
        Self { oracle }
    }

    /// Scans one parsed file.
    pub fn scan(&mut self, file: &syn::File) {
        self.visit_file(file);
    }

    fn record_future_impl(&mut self, name: &str, item_impl: &ItemImpl) {
        for item in &item_impl.items {
            match item {
                ImplItem::Type(ty) if ty.ident == "Output" => {
                    self.oracle.add_capability(name, Capability::FetchResult);
                }
                ImplItem::Fn(function) if function.sig.ident == "poll" => {
                    self.oracle.add_capability(name, Capability::PollCompletion);
                    let takes_context = function.sig.inputs.iter().any(|arg| match arg {
                        FnArg::Typed(pat_type) => render_type(&pat_type.ty).contains("Context"),
                        FnArg::Receiver(_) => false,
                    });
                    if takes_context {
                        self.oracle
                            .add_capability(name, Capability::RegisterContinuation);
                    }
                }
                _ => {}
            }
        }
        debug!(future = name, "scanned Future impl");
    }
}

/// Last path segment of the implementing type, if it is a plain path.
fn self_type_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string()),
        _ => None,
    }
}

impl<'ast> Visit<'ast> for OracleScanner<'_> {
    fn visit_item_enum(&mut self, item_enum: &'ast ItemEnum) {
        self.oracle.add_enum(item_enum.ident.to_string());
        visit::visit_item_enum(self, item_enum);
    }

    fn visit_item_impl(&mut self, item_impl: &'ast ItemImpl) {
        let implemented = item_impl
            .trait_
            .as_ref()
            .and_then(|(_, path, _)| path.segments.last())
            .map(|segment| segment.ident.to_string());

        if let (Some(trait_name), Some(name)) = (implemented, self_type_name(&item_impl.self_ty)) {
            match trait_name.as_str() {
                "Future" => self.record_future_impl(&name, item_impl),
                "IntoFuture" => self.oracle.add_awaitable(name),
                _ => {}
            }
        }
        visit::visit_item_impl(self, item_impl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeRef;
    use crate::oracle::{is_awaitable, TypeOracle};

    fn scan(code: &str) -> StaticOracle {
        let mut oracle = StaticOracle::new();
        OracleScanner::new(&mut oracle).scan(&syn::parse_file(code).unwrap());
        oracle
    }

    #[test]
    fn test_enums_are_recorded() {
        let oracle = scan("pub enum Status { Open, Done } mod inner { enum Level { Low } }");
        assert!(oracle.is_enum(&TypeRef::named("Status")));
        assert!(oracle.is_enum(&TypeRef::named("Level")));
        assert!(!oracle.is_enum(&TypeRef::named("Todo")));
    }

    #[test]
    fn test_full_future_impl_is_awaitable() {
        let oracle = scan(
            r#"
impl<T> Future for Pending<T> {
    type Output = T;
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<T> { todo!() }
}
"#,
        );
        let ty = TypeRef::generic("Pending", vec![TypeRef::named("u8")]);
        assert!(is_awaitable(&oracle, &ty));
    }

    #[test]
    fn test_incomplete_future_impl_is_not_awaitable() {
        // No continuation registration: `poll` never sees a `Context`.
        let oracle = scan(
            r#"
impl Future for Half {
    type Output = u8;
    fn poll(self: Pin<&mut Self>) -> Poll<u8> { todo!() }
}
"#,
        );
        assert!(oracle.has_capability(&TypeRef::named("Half"), Capability::FetchResult));
        assert!(!is_awaitable(&oracle, &TypeRef::named("Half")));
    }

    #[test]
    fn test_into_future_impl_is_awaitable() {
        let oracle = scan("impl IntoFuture for Request { type Output = u8; type IntoFuture = X; fn into_future(self) -> X { todo!() } }");
        assert!(is_awaitable(&oracle, &TypeRef::named("Request")));
    }
}
