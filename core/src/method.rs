#![deny(missing_docs)]

//! # Method Modeler
//!
//! Wraps the classification of a method's return type and parameters into a
//! [`MethodDescriptor`], and decides whether a request body is needed at all.

use crate::classifier::TypeClassifier;
use crate::model::{
    AsyncStyle, MemberSpec, MethodDescriptor, ParameterDescriptor, ParameterSpec,
    TransferObjectDescriptor,
};
use tracing::debug;

impl ParameterDescriptor {
    /// Classifies one declared parameter.
    pub fn model(spec: &ParameterSpec, classifier: &TypeClassifier<'_>) -> Self {
        Self {
            ty: classifier.classify(&spec.ty),
            name: spec.name.clone(),
        }
    }
}

/// Builds the descriptor of one method.
///
/// # Arguments
///
/// * `member` - The method declaration.
/// * `class_name` - Generated proxy name, used to name a transfer object.
/// * `classifier` - Type classification for return and parameter types.
pub fn model_method(
    member: &MemberSpec,
    class_name: &str,
    classifier: &TypeClassifier<'_>,
) -> MethodDescriptor {
    let parameters: Vec<ParameterDescriptor> = member
        .parameters
        .iter()
        .map(|p| ParameterDescriptor::model(p, classifier))
        .collect();

    let non_primitive = parameters.iter().filter(|p| !p.ty.is_primitive).count();
    let endpoint_name = member.name.clone();

    let transfer_object = (non_primitive > 1)
        .then(|| TransferObjectDescriptor::synthesize(class_name, &endpoint_name, &parameters));

    // `async fn` and `impl Future` contracts are satisfied by an `async fn` impl.
    let async_style = if member.return_type.path.starts_with("impl ") {
        AsyncStyle::AsyncFn
    } else {
        AsyncStyle::Boxed
    };

    debug!(
        method = %member.name,
        non_primitive,
        transfer_object = transfer_object.as_ref().map(|t| t.name.as_str()),
        "modeled method"
    );

    MethodDescriptor {
        return_type: classifier.classify(&member.return_type),
        name: member.name.clone(),
        endpoint_name,
        parameters,
        needs_serialization: non_primitive > 0,
        transfer_object,
        receiver: member
            .receiver
            .clone()
            .unwrap_or_else(|| "&self".to_string()),
        generics: member.generics.clone(),
        async_style,
    }
}

impl MethodDescriptor {
    /// A copy bound to a new endpoint name, with its transfer object re-synthesized.
    pub fn with_endpoint_name(&self, endpoint_name: String, class_name: &str) -> Self {
        let transfer_object = self.transfer_object.as_ref().map(|_| {
            TransferObjectDescriptor::synthesize(class_name, &endpoint_name, &self.parameters)
        });
        Self {
            endpoint_name,
            transfer_object,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Transport, TypeRef};
    use crate::oracle::{DenyList, StaticOracle};

    fn model(member: &MemberSpec) -> MethodDescriptor {
        let oracle = StaticOracle::new().with_awaitable("BoxFuture");
        let policy = DenyList::default();
        let classifier = TypeClassifier::new(&oracle, &policy);
        model_method(member, "TodoBlazorService", &classifier)
    }

    #[test]
    fn test_primitive_only_method() {
        let member = MemberSpec::method(
            "add",
            TypeRef::future(TypeRef::named("i32")),
            vec![
                ParameterSpec::new("a", TypeRef::named("i32")),
                ParameterSpec::new("b", TypeRef::named("i32")),
            ],
        );
        let method = model(&member);

        assert_eq!(method.endpoint_name, "add");
        assert!(!method.needs_serialization);
        assert!(method.transfer_object.is_none());
        assert_eq!(method.transport(), Transport::Get);
        assert_eq!(method.async_style, AsyncStyle::AsyncFn);
        assert!(method.request_body().is_none());
    }

    #[test]
    fn test_single_complex_parameter_has_no_transfer_object() {
        let member = MemberSpec::method(
            "save",
            TypeRef::future(TypeRef::unit()),
            vec![ParameterSpec::new("todo", TypeRef::named("Todo"))],
        );
        let method = model(&member);

        assert!(method.needs_serialization);
        assert!(method.transfer_object.is_none());
        assert_eq!(method.transport(), Transport::Post);
        assert!(matches!(
            method.request_body(),
            Some(crate::model::RequestBody::Parameter(p)) if p.name == "todo"
        ));
    }

    #[test]
    fn test_two_complex_parameters_get_transfer_object() {
        let member = MemberSpec::method(
            "assign",
            TypeRef::future(TypeRef::named("Todo")),
            vec![
                ParameterSpec::new("todo", TypeRef::named("Todo")),
                ParameterSpec::new("priority", TypeRef::named("u8")),
                ParameterSpec::new("owner", TypeRef::named("User")),
            ],
        );
        let method = model(&member);

        let dto = method.transfer_object.as_ref().unwrap();
        assert_eq!(dto.name, "TodoBlazorServiceAssignDto");
        assert_eq!(dto.fields.len(), 2);
        assert_eq!(method.query_parameters().count(), 1);
        assert!(method.has_query());
    }

    #[test]
    fn test_boxed_future_style() {
        let member = MemberSpec::method(
            "count",
            TypeRef::generic("BoxFuture", vec![TypeRef::named("u64")]),
            vec![],
        );
        let method = model(&member);
        assert_eq!(method.async_style, AsyncStyle::Boxed);
        assert_eq!(method.return_type.inner_payload_type_name, "u64");
    }

    #[test]
    fn test_renaming_rebuilds_transfer_object() {
        let member = MemberSpec::method(
            "fetch",
            TypeRef::future(TypeRef::named("Todo")),
            vec![
                ParameterSpec::new("a", TypeRef::named("Query")),
                ParameterSpec::new("b", TypeRef::named("Paging")),
            ],
        );
        let before = model(&member);
        let renamed = before.with_endpoint_name("fetch2".into(), "TodoBlazorService");

        assert_eq!(renamed.name, "fetch");
        assert_eq!(renamed.endpoint_name, "fetch2");
        assert_eq!(
            renamed.transfer_object.as_ref().unwrap().name,
            "TodoBlazorServiceFetch2Dto"
        );
        // The source descriptor is untouched.
        assert_eq!(
            before.transfer_object.as_ref().unwrap().name,
            "TodoBlazorServiceFetchDto"
        );
    }
}
