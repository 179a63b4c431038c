//! Route table renderer: actix-web handlers for every contract, the aggregate
//! `map_blazor_services` registration and the client registry.

use super::{client_module, header, is_plain_text, routes_module, GeneratedUnit, ROUTES_MODULE};
use crate::code_writer::CodeWriter;
use crate::config::GeneratorConfig;
use crate::model::{
    ContractDescriptor, MethodDescriptor, ParameterDescriptor, Passing, RequestBody, Transport,
};
use heck::ToUpperCamelCase;

/// Renders the route table for every valid contract.
pub fn render_routes(contracts: &[ContractDescriptor], config: &GeneratorConfig) -> GeneratedUnit {
    let mut w = CodeWriter::new(config.indent.as_str());

    w.line(&header(config));

    for contract in contracts {
        w.blank_line();
        write_contract_routes(&mut w, contract);
    }

    w.blank_line();
    write_registry(&mut w, contracts);
    w.blank_line();
    write_map(&mut w, contracts, config);

    GeneratedUnit::module(ROUTES_MODULE, w.finish())
}

/// Generic parameter standing for the implementation of `contract`.
fn impl_param(contract: &ContractDescriptor) -> String {
    format!("{}Impl", contract.simple_name)
}

fn verb(method: &MethodDescriptor) -> &'static str {
    match method.transport() {
        Transport::Get => "get",
        Transport::Post => "post",
    }
}

/// A GET and a POST endpoint may share a name, so the verb is part of the handler name.
fn handler_name(method: &MethodDescriptor) -> String {
    format!("{}_{}", verb(method), method.endpoint_name)
}

fn query_struct_name(method: &MethodDescriptor) -> String {
    format!(
        "{}{}Query",
        verb(method).to_upper_camel_case(),
        method.endpoint_name.to_upper_camel_case()
    )
}

fn write_contract_routes(w: &mut CodeWriter, contract: &ContractDescriptor) {
    w.line(&format!(
        "/// Endpoints of [`{}`] under `/{}`.",
        contract.interface_name, contract.simple_name
    ));
    w.line("#[doc(hidden)]");
    w.block(&format!("pub mod {}", routes_module(contract)), |w| {
        w.line("#[allow(unused_imports)]");
        w.line(&format!("use {}::*;", contract.namespace));

        for method in contract.methods.iter().filter(|m| m.has_query()) {
            w.blank_line();
            w.line("#[derive(serde::Deserialize)]");
            w.block(&format!("pub struct {}", query_struct_name(method)), |w| {
                for param in method.query_parameters() {
                    w.line(&format!("pub {}: {},", param.name, param.ty.owned_type_name));
                }
            });
        }

        for method in &contract.methods {
            w.blank_line();
            write_handler(w, method, contract);
        }

        w.blank_line();
        w.line("pub fn configure<S>(cfg: &mut actix_web::web::ServiceConfig)");
        w.line("where");
        w.indented(|w| {
            w.line(&format!("S: {} + 'static,", contract.interface_name));
        });
        w.scoped("{", "}", |w| {
            w.scoped("cfg.service(", ");", |w| {
                w.line(&format!(
                    "actix_web::web::scope(\"/{}\")",
                    contract.simple_name
                ));
                w.indented(|w| {
                    for method in &contract.methods {
                        w.line(&format!(
                            ".route(\"/{}\", actix_web::web::{}().to({}::<S>))",
                            method.endpoint_name,
                            verb(method),
                            handler_name(method)
                        ));
                    }
                });
            });
        });
    });
}

fn write_handler(w: &mut CodeWriter, method: &MethodDescriptor, contract: &ContractDescriptor) {
    let mut inputs = vec!["service: actix_web::web::Data<S>".to_string()];
    if method.has_query() {
        inputs.push(format!(
            "query: actix_web::web::Query<{}>",
            query_struct_name(method)
        ));
    }
    let body = method.request_body();
    match body {
        Some(RequestBody::TransferObject(dto)) => inputs.push(format!(
            "body: actix_web::web::Json<super::super::{}::{}>",
            client_module(contract),
            dto.name
        )),
        Some(RequestBody::Parameter(param)) => inputs.push(format!(
            "body: actix_web::web::Json<{}>",
            param.ty.owned_type_name
        )),
        None => {}
    }

    let arguments: Vec<String> = method
        .parameters
        .iter()
        .map(|param| argument(param, body))
        .collect();

    w.line(&format!(
        "pub async fn {}<S>({}) -> actix_web::HttpResponse",
        handler_name(method),
        inputs.join(", ")
    ));
    w.line("where");
    w.indented(|w| {
        w.line(&format!("S: {} + 'static,", contract.interface_name));
    });
    w.scoped("{", "}", |w| {
        if method.has_query() {
            w.line("let query = query.into_inner();");
        }
        if body.is_some() {
            w.line("let body = body.into_inner();");
        }

        let call = format!("service.{}({}).await", method.name, arguments.join(", "));
        let ret = &method.return_type;
        if ret.is_void {
            w.line(&format!("{};", call));
            w.line("actix_web::HttpResponse::Ok().finish()");
        } else if is_plain_text(ret) {
            w.line(&format!("let result = {};", call));
            w.line("actix_web::HttpResponse::Ok()");
            w.indented(|w| {
                w.line(".content_type(\"text/plain; charset=utf-8\")");
                w.line(".body(result)");
            });
        } else {
            w.line(&format!("let result = {};", call));
            w.line("actix_web::HttpResponse::Ok().json(result)");
        }
    });
}

/// The expression handing `param` to the contract method, in declaration order.
fn argument(param: &ParameterDescriptor, body: Option<RequestBody<'_>>) -> String {
    let source = if param.ty.is_primitive {
        format!("query.{}", param.name)
    } else {
        match body {
            Some(RequestBody::TransferObject(_)) => format!("body.{}", param.name),
            _ => "body".to_string(),
        }
    };
    match param.ty.passing {
        Passing::Owned => source,
        Passing::Borrowed => format!("&{}", source),
        Passing::OptionalBorrowed if param.ty.is_string => format!("{}.as_deref()", source),
        Passing::OptionalBorrowed => format!("{}.as_ref()", source),
    }
}

fn write_registry(w: &mut CodeWriter, contracts: &[ContractDescriptor]) {
    w.line("/// One HTTP client per service contract.");
    w.line("#[derive(Debug, Clone)]");
    w.block("pub struct BlazorServices", |w| {
        for contract in contracts {
            w.line(&format!(
                "pub {}: super::{}::{},",
                client_module(contract),
                client_module(contract),
                contract.generated_class_name
            ));
        }
    });
    w.blank_line();

    w.line("/// Builds every generated client on top of one shared `reqwest::Client`.");
    w.block(
        "pub fn add_blazor_services(http_client: reqwest::Client, base_url: impl Into<String>) -> BlazorServices",
        |w| {
            w.line("let base_url: String = base_url.into();");
            w.block("BlazorServices", |w| {
                for contract in contracts {
                    w.line(&format!(
                        "{}: super::{}::{}::new(http_client.clone(), base_url.clone()),",
                        client_module(contract),
                        client_module(contract),
                        contract.generated_class_name
                    ));
                }
            });
        },
    );
}

fn write_map(w: &mut CodeWriter, contracts: &[ContractDescriptor], config: &GeneratorConfig) {
    let params: Vec<String> = contracts.iter().map(impl_param).collect();

    w.line(&format!(
        "/// Mounts every service contract under `/{}`.",
        config.route_root
    ));
    w.line(&format!(
        "pub fn map_blazor_services<{}>(cfg: &mut actix_web::web::ServiceConfig)",
        params.join(", ")
    ));
    w.line("where");
    w.indented(|w| {
        for (contract, param) in contracts.iter().zip(&params) {
            w.line(&format!("{}: {} + 'static,", param, contract.interface_name));
        }
    });
    w.scoped("{", "}", |w| {
        w.scoped("cfg.service(", ");", |w| {
            w.line(&format!(
                "actix_web::web::scope(\"/{}\")",
                config.route_root
            ));
            w.indented(|w| {
                for (contract, param) in contracts.iter().zip(&params) {
                    w.line(&format!(
                        ".configure({}::configure::<{}>)",
                        routes_module(contract),
                        param
                    ));
                }
            });
        });
    });
}
