//! Client proxy renderer: one struct implementing the contract over HTTP.

use super::{client_module, header, is_plain_text, GeneratedUnit, MARKER_MODULE};
use crate::code_writer::CodeWriter;
use crate::config::GeneratorConfig;
use crate::model::{
    AsyncStyle, ContractDescriptor, MethodDescriptor, ParameterDescriptor, Passing, RequestBody,
    Transport, TypeDescriptor,
};

/// Renders the proxy unit of `contract`.
pub fn render_client(contract: &ContractDescriptor, config: &GeneratorConfig) -> GeneratedUnit {
    let class = &contract.generated_class_name;
    let mut w = CodeWriter::new(config.indent.as_str());

    w.line(&header(config));
    w.blank_line();
    w.line("#[allow(unused_imports)]");
    w.line(&format!("use {}::*;", contract.namespace));
    w.blank_line();

    w.line(&format!("/// HTTP client for [`{}`].", contract.interface_name));
    w.line("#[derive(Debug, Clone)]");
    w.block(&format!("pub struct {}", class), |w| {
        w.line("http_client: reqwest::Client,");
        w.line("base_url: String,");
    });
    w.blank_line();

    w.block(&format!("impl {}", class), |w| {
        w.line("/// Sends every call to `base_url` through `http_client`.");
        w.block(
            "pub fn new(http_client: reqwest::Client, base_url: impl Into<String>) -> Self",
            |w| {
                w.block("Self", |w| {
                    w.line("http_client,");
                    w.line("base_url: base_url.into(),");
                });
            },
        );
    });
    w.blank_line();

    w.line(&format!(
        "impl super::{}::{} for {} {{}}",
        MARKER_MODULE, config.marker, class
    ));
    w.blank_line();

    w.block(
        &format!("impl {} for {}", contract.interface_name, class),
        |w| {
            for (i, method) in contract.methods.iter().enumerate() {
                if i > 0 {
                    w.blank_line();
                }
                write_method(w, method, contract, config);
            }
        },
    );

    for method in &contract.methods {
        let Some(dto) = &method.transfer_object else {
            continue;
        };
        w.blank_line();
        w.line(&format!(
            "/// Request body of the `{}` endpoint.",
            method.endpoint_name
        ));
        w.line("#[derive(serde::Serialize, serde::Deserialize)]");
        w.block(&format!("pub struct {}", dto.name), |w| {
            for field in &dto.fields {
                w.line(&format!("pub {}: {},", field.name, field.ty.owned_type_name));
            }
        });
    }

    GeneratedUnit::module(&client_module(contract), w.finish())
}

fn signature(method: &MethodDescriptor) -> String {
    let mut parts = vec![method.receiver.clone()];
    parts.extend(
        method
            .parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, p.ty.display_name)),
    );
    format!("{}{}({})", method.name, method.generics, parts.join(", "))
}

fn write_method(
    w: &mut CodeWriter,
    method: &MethodDescriptor,
    contract: &ContractDescriptor,
    config: &GeneratorConfig,
) {
    let ret = &method.return_type;
    match method.async_style {
        AsyncStyle::AsyncFn => {
            let header = if ret.is_void {
                format!("async fn {}", signature(method))
            } else {
                format!(
                    "async fn {} -> {}",
                    signature(method),
                    ret.inner_payload_type_name
                )
            };
            w.block(&header, |w| write_body(w, method, contract, config));
        }
        AsyncStyle::Boxed => {
            let header = format!("fn {} -> {}", signature(method), ret.display_name);
            w.block(&header, |w| {
                w.scoped("Box::pin(async move {", "})", |w| {
                    write_body(w, method, contract, config)
                });
            });
        }
    }
}

fn write_body(
    w: &mut CodeWriter,
    method: &MethodDescriptor,
    contract: &ContractDescriptor,
    config: &GeneratorConfig,
) {
    // 1. Path
    w.line(&format!(
        "let __path = format!(\"{{}}/{}/{}/{}\", self.base_url);",
        config.route_root, contract.simple_name, method.endpoint_name
    ));

    // 2. Query string
    if method.has_query() {
        w.line("let mut __query: Vec<(&str, String)> = Vec::new();");
        for param in method.query_parameters() {
            write_query_push(w, param);
        }
    }

    // 3. Body
    let transport = method.transport();
    let body = match method.request_body() {
        Some(RequestBody::TransferObject(dto)) => {
            write_borrowed_body(w, &dto.fields);
            Some("&__body".to_string())
        }
        Some(RequestBody::Parameter(param)) => Some(format!("&{}", param.name)),
        None => None,
    };

    // 4. Request
    let verb = match transport {
        Transport::Get => "GET",
        Transport::Post => "POST",
    };
    let failure = format!(
        ".unwrap_or_else(|__error| panic!(\"{} {{}} failed: {{}}\", __path, __error))",
        verb
    );
    let ret = &method.return_type;

    w.line("self.http_client");
    w.indented(|w| {
        w.line(&format!(".{}(&__path)", verb.to_lowercase()));
        if method.has_query() {
            w.line(".query(&__query)");
        }
        if let Some(body) = &body {
            w.line(&format!(".json({})", body));
        }
        w.line(".send()");
        if ret.is_void {
            w.line(".await");
            w.line(&format!("{};", failure));
            return;
        }
        w.line(".await");
        w.line(".and_then(reqwest::Response::error_for_status)");
        w.line(&failure);
        if is_plain_text(ret) {
            w.line(".text()");
        } else {
            w.line(&format!(".json::<{}>()", ret.owned_type_name));
        }
        w.line(".await");
        w.line(&failure);
    });
}

/// `Option` parameters are only sent when present.
fn write_query_push(w: &mut CodeWriter, param: &ParameterDescriptor) {
    let ty = &param.ty;
    if ty.is_optional {
        w.block(&format!("if let Some(__value) = {}", param.name), |w| {
            w.line(&format!(
                "__query.push((\"{}\", {}));",
                param.name,
                query_value("__value", ty)
            ));
        });
    } else {
        w.line(&format!(
            "__query.push((\"{}\", {}));",
            param.name,
            query_value(&param.name, ty)
        ));
    }
}

/// Owned `String`s are moved, borrowed strings copied, everything else uses `Display`.
fn query_value(expr: &str, ty: &TypeDescriptor) -> String {
    match (ty.is_string, ty.passing) {
        (true, Passing::Owned) => expr.to_string(),
        (true, _) => format!("{}.to_owned()", expr),
        (false, _) => format!("{}.to_string()", expr),
    }
}

/// Serializes to the same JSON as the transfer object without cloning any argument.
fn write_borrowed_body(w: &mut CodeWriter, fields: &[ParameterDescriptor]) {
    let generics: Vec<String> = (0..fields.len()).map(|i| format!("__T{}", i)).collect();
    w.line("#[derive(serde::Serialize)]");
    w.block(&format!("struct __Body<{}>", generics.join(", ")), |w| {
        for (field, generic) in fields.iter().zip(&generics) {
            w.line(&format!("{}: {},", field.name, generic));
        }
    });
    w.scoped("let __body = __Body {", "};", |w| {
        for field in fields {
            w.line(&body_field_init(field));
        }
    });
}

fn body_field_init(field: &ParameterDescriptor) -> String {
    match field.ty.passing {
        Passing::Owned => format!("{}: &{},", field.name, field.name),
        Passing::Borrowed | Passing::OptionalBorrowed => format!("{},", field.name),
    }
}
