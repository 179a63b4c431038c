//! The marker trait unit.

use super::{header, GeneratedUnit, MARKER_MODULE};
use crate::code_writer::CodeWriter;
use crate::config::GeneratorConfig;

/// Renders the marker trait. Emitted on every run, whatever the input.
pub fn render_marker(config: &GeneratorConfig) -> GeneratedUnit {
    let mut w = CodeWriter::new(config.indent.as_str());
    w.line(&header(config));
    w.blank_line();
    w.line("/// Marks a trait as a service contract served over HTTP.");
    w.line("///");
    w.line("/// Every method must be awaitable, non-generic, and take and return");
    w.line("/// serializable types.");
    w.line(&format!("pub trait {} {{}}", config.marker));
    GeneratedUnit::module(MARKER_MODULE, w.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_uses_configured_name() {
        let config = GeneratorConfig {
            marker: "RemoteService".into(),
            ..GeneratorConfig::default()
        };
        let unit = render_marker(&config);
        assert_eq!(unit.name, "blazor_service.rs");
        assert!(unit.content.starts_with("// @generated by svcgen "));
        assert!(unit.content.ends_with("pub trait RemoteService {}\n"));
    }
}
