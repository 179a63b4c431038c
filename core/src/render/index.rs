//! The `mod.rs` of the generated directory.

use super::{client_module, header, GeneratedUnit, MARKER_MODULE, ROUTES_MODULE};
use crate::code_writer::CodeWriter;
use crate::config::GeneratorConfig;
use crate::model::ContractDescriptor;

/// Declares the marker, every proxy and, when there is one, the route table.
pub fn render_index(contracts: &[ContractDescriptor], config: &GeneratorConfig) -> GeneratedUnit {
    let mut w = CodeWriter::new(config.indent.as_str());
    w.line(&header(config));
    w.blank_line();

    w.line(&format!("pub mod {};", MARKER_MODULE));
    for contract in contracts {
        w.line(&format!("pub mod {};", client_module(contract)));
    }
    if !contracts.is_empty() {
        w.line(&format!("pub mod {};", ROUTES_MODULE));
    }

    w.blank_line();
    w.line(&format!("pub use {}::{};", MARKER_MODULE, config.marker));
    if !contracts.is_empty() {
        w.line(&format!(
            "pub use {}::{{add_blazor_services, map_blazor_services, BlazorServices}};",
            ROUTES_MODULE
        ));
    }

    GeneratedUnit::module("mod", w.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MemberSpec;
    use crate::render::fixtures::contract;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_marker_only() {
        let unit = render_index(&[], &GeneratorConfig::default());
        let body = unit.content.split_once('\n').map(|(_, rest)| rest).unwrap();
        assert_eq!(body, "\npub mod blazor_service;\n\npub use blazor_service::BlazorService;\n");
    }

    #[test]
    fn test_with_contracts() {
        let contracts = vec![
            contract("ITodoService", Vec::<MemberSpec>::new()),
            contract("Inventory", Vec::<MemberSpec>::new()),
        ];
        let unit = render_index(&contracts, &GeneratorConfig::default());
        assert_eq!(unit.name, "mod.rs");
        let body = unit.content.split_once('\n').map(|(_, rest)| rest).unwrap();
        assert_eq!(
            body,
            "\npub mod blazor_service;\npub mod todo_blazor_service;\npub mod blazor_inventory;\npub mod blazor_services;\n\npub use blazor_service::BlazorService;\npub use blazor_services::{add_blazor_services, map_blazor_services, BlazorServices};\n"
        );
    }
}
