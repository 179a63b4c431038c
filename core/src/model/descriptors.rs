#![deny(missing_docs)]

//! # Descriptors
//!
//! The intermediate representation shared by validation and both renderers.
//! Descriptors are built once and never mutated; collision resolution produces
//! new values instead of patching old ones.

use serde::Serialize;

/// How a value of a classified type is handed to the contract method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Passing {
    /// Taken by value (`i32`, `Todo`, `Option<String>`).
    Owned,
    /// Taken by reference (`&str`, `&Todo`).
    Borrowed,
    /// An `Option` of a reference (`Option<&str>`).
    OptionalBorrowed,
}

/// Classification of one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    /// The type as written.
    pub display_name: String,
    /// Safe to carry on a query string.
    pub is_primitive: bool,
    /// Declared as an `enum`.
    pub is_enum: bool,
    /// Satisfies the asynchronous-result protocol.
    pub is_async_result: bool,
    /// Unwrapped payload when `is_async_result`, else `display_name`.
    pub inner_payload_type_name: String,
    /// `inner_payload_type_name == "()"`.
    pub is_void: bool,
    /// Passes the serializability policy.
    pub is_serializable: bool,
    /// The payload is `String` or `str` (plain text on the wire).
    pub is_string: bool,
    /// The payload is an `Option<..>`.
    pub is_optional: bool,
    /// How arguments of this type are passed.
    pub passing: Passing,
    /// Owned spelling of the payload, for fields deserialized on the server.
    pub owned_type_name: String,
}

/// A method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterDescriptor {
    /// Classified parameter type.
    pub ty: TypeDescriptor,
    /// Parameter name.
    pub name: String,
}

/// A synthesized request body carrying two or more non-primitive parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferObjectDescriptor {
    /// `<Class><Endpoint>Dto`.
    pub name: String,
    /// Non-primitive parameters in declaration order.
    pub fields: Vec<ParameterDescriptor>,
}

/// How a proxy method is implemented for the declared return shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AsyncStyle {
    /// `async fn` in the implementation (for `async fn` / `impl Future` contracts).
    AsyncFn,
    /// A plain `fn` returning `Box::pin(async move { .. })` as the declared type.
    Boxed,
}

/// One contract method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDescriptor {
    /// Classified return type.
    pub return_type: TypeDescriptor,
    /// Declared method name.
    pub name: String,
    /// Path segment of the HTTP binding; unique within the contract.
    pub endpoint_name: String,
    /// Parameters in declaration order.
    pub parameters: Vec<ParameterDescriptor>,
    /// At least one parameter is non-primitive.
    pub needs_serialization: bool,
    /// Present when two or more parameters are non-primitive.
    pub transfer_object: Option<TransferObjectDescriptor>,
    /// Receiver as written.
    pub receiver: String,
    /// Generic parameter list as written (lifetimes only, for valid contracts).
    pub generics: String,
    /// Implementation shape of the proxy method.
    pub async_style: AsyncStyle,
}

/// HTTP verb chosen for a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Transport {
    /// No non-primitive parameters; everything rides on the query string.
    Get,
    /// A JSON body is sent.
    Post,
}

/// The JSON body of a POST method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestBody<'a> {
    /// The synthesized transfer object.
    TransferObject(&'a TransferObjectDescriptor),
    /// The single non-primitive parameter, sent as is.
    Parameter(&'a ParameterDescriptor),
}

impl MethodDescriptor {
    /// GET iff no parameter needs serialization.
    pub fn transport(&self) -> Transport {
        if self.needs_serialization {
            Transport::Post
        } else {
            Transport::Get
        }
    }

    /// The request body, if the transport is POST.
    pub fn request_body(&self) -> Option<RequestBody<'_>> {
        if let Some(dto) = &self.transfer_object {
            return Some(RequestBody::TransferObject(dto));
        }
        self.parameters
            .iter()
            .find(|p| !p.ty.is_primitive)
            .map(RequestBody::Parameter)
    }

    /// Parameters carried on the query string.
    pub fn query_parameters(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.parameters.iter().filter(|p| p.ty.is_primitive)
    }

    /// Whether any parameter rides on the query string.
    pub fn has_query(&self) -> bool {
        self.query_parameters().next().is_some()
    }
}

/// One contract after modeling and collision resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractDescriptor {
    /// Fully qualified trait path.
    pub interface_name: String,
    /// Module the trait lives in.
    pub namespace: String,
    /// Trait name without namespace or leading `I` prefix.
    pub simple_name: String,
    /// Name of the generated proxy struct.
    pub generated_class_name: String,
    /// Methods in declaration order.
    pub methods: Vec<MethodDescriptor>,
}
