#![deny(missing_docs)]

//! # Pipeline
//!
//! Single pass from interface declarations to generated units:
//!
//! 1. De-duplicate the declarations.
//! 2. Validate each one; a contract with any violation is dropped.
//! 3. Model and resolve the survivors.
//! 4. Render the marker, one proxy per contract, the route table and the index.
//!
//! No I/O happens here; the host writes the units wherever it likes.

use crate::classifier::TypeClassifier;
use crate::config::GeneratorConfig;
use crate::contract::model_contract;
use crate::error::{AppError, AppResult};
use crate::model::{ContractDescriptor, InterfaceSpec, SourceLocation};
use crate::oracle::TypeOracle;
use crate::render::{
    client_module, header, render_client, render_index, render_marker, render_routes,
    GeneratedUnit,
};
use crate::validation::{Diagnostic, Validator};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Cooperative cancellation, polled before each contract.
pub trait CancellationSignal {
    /// Whether the host asked to stop.
    fn is_cancelled(&self) -> bool;
}

impl CancellationSignal for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

/// A signal that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancelled;

impl CancellationSignal for NeverCancelled {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Everything one generation run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationOutput {
    /// Units in emission order: marker, proxies, route table, index.
    pub units: Vec<GeneratedUnit>,
    /// Every rule violation found, valid contracts or not.
    pub diagnostics: Vec<Diagnostic>,
    /// The contracts that were generated.
    pub contracts: Vec<ContractDescriptor>,
}

/// Runs the generation path.
///
/// # Arguments
///
/// * `specs` - Interface declarations carrying the marker.
/// * `oracle` - Answers enum and awaitability questions.
/// * `config` - Naming, policy and formatting settings.
/// * `cancel` - Polled before each contract.
///
/// # Errors
///
/// [`AppError::Config`] for an invalid configuration, [`AppError::Cancelled`]
/// when `cancel` fires. Contract-shape violations are not errors; they are
/// returned as diagnostics.
pub fn generate(
    specs: &[InterfaceSpec],
    oracle: &dyn TypeOracle,
    config: &GeneratorConfig,
    cancel: &dyn CancellationSignal,
) -> AppResult<GenerationOutput> {
    config.validate()?;

    let policy = config.serializability_policy();
    let classifier = TypeClassifier::new(oracle, &policy);
    let validator = Validator::new(classifier, &config.marker);

    let mut diagnostics = Vec::new();
    let mut contracts: Vec<ContractDescriptor> = Vec::new();
    let mut module_owners: HashMap<String, String> = HashMap::new();

    for spec in distinct(specs) {
        if cancel.is_cancelled() {
            info!(
                generated = contracts.len(),
                "generation cancelled; discarding partial output"
            );
            return Err(AppError::Cancelled);
        }

        // 1. Gate
        let found = validator.check_interface(spec);
        if !found.is_empty() {
            debug!(
                contract = %spec.qualified_name(),
                diagnostics = found.len(),
                "contract skipped: invalid"
            );
            diagnostics.extend(found);
            continue;
        }

        // 2. Model
        let contract = model_contract(spec, &classifier);

        // 3. Generated module names must be unique
        let module = client_module(&contract);
        if let Some(owner) = module_owners.get(&module) {
            warn!(
                contract = %contract.interface_name,
                module = %module,
                first = %owner,
                "contract skipped: generated module name already taken"
            );
            continue;
        }
        module_owners.insert(module, contract.interface_name.clone());

        debug!(
            contract = %contract.interface_name,
            class = %contract.generated_class_name,
            methods = contract.methods.len(),
            "contract modeled"
        );
        contracts.push(contract);
    }

    // 4. Render
    let mut units = vec![render_marker(config)];
    units.extend(contracts.iter().map(|c| render_client(c, config)));
    if !contracts.is_empty() {
        units.push(render_routes(&contracts, config));
    }
    units.push(render_index(&contracts, config));

    if config.pretty_print {
        units = units.into_iter().map(|u| pretty_print(u, config)).collect();
    }

    info!(
        contracts = contracts.len(),
        units = units.len(),
        diagnostics = diagnostics.len(),
        "generation finished"
    );

    Ok(GenerationOutput {
        units,
        diagnostics,
        contracts,
    })
}

/// Runs the live-diagnostics path: every violation of every declaration,
/// without modeling or rendering anything.
pub fn diagnose(
    specs: &[InterfaceSpec],
    oracle: &dyn TypeOracle,
    config: &GeneratorConfig,
) -> AppResult<Vec<Diagnostic>> {
    config.validate()?;

    let policy = config.serializability_policy();
    let validator = Validator::new(TypeClassifier::new(oracle, &policy), &config.marker);

    let diagnostics: Vec<Diagnostic> = distinct(specs)
        .flat_map(|spec| validator.check_interface(spec))
        .collect();

    debug!(diagnostics = diagnostics.len(), "diagnostics collected");
    Ok(diagnostics)
}

/// Drops repeated declarations (same name at the same location), keeping order.
fn distinct(specs: &[InterfaceSpec]) -> impl Iterator<Item = &InterfaceSpec> {
    let mut seen: HashSet<(String, SourceLocation)> = HashSet::new();
    specs
        .iter()
        .filter(move |spec| seen.insert((spec.qualified_name(), spec.location.clone())))
}

/// Re-formats a unit with `prettyplease`; a unit that does not parse is kept as is.
fn pretty_print(unit: GeneratedUnit, config: &GeneratorConfig) -> GeneratedUnit {
    match syn::parse_file(&unit.content) {
        Ok(file) => GeneratedUnit {
            content: format!("{}\n\n{}", header(config), prettyplease::unparse(&file)),
            name: unit.name,
        },
        Err(error) => {
            warn!(unit = %unit.name, %error, "generated unit does not parse; kept verbatim");
            unit
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MemberSpec, ParameterSpec, TypeRef};
    use crate::oracle::StaticOracle;

    fn spec(name: &str, members: Vec<MemberSpec>) -> InterfaceSpec {
        InterfaceSpec {
            name: name.to_string(),
            namespace: "crate::services".to_string(),
            members,
            location: SourceLocation::new("src/services.rs", 3, 11),
        }
    }

    fn ok_method(name: &str) -> MemberSpec {
        MemberSpec::method(
            name,
            TypeRef::future(TypeRef::named("i32")),
            vec![ParameterSpec::new("a", TypeRef::named("i32"))],
        )
    }

    fn run(specs: &[InterfaceSpec]) -> GenerationOutput {
        generate(specs, &StaticOracle::new(), &GeneratorConfig::default(), &NeverCancelled).unwrap()
    }

    fn names(output: &GenerationOutput) -> Vec<&str> {
        output.units.iter().map(|u| u.name.as_str()).collect()
    }

    #[test]
    fn test_empty_input_emits_marker_and_index_only() {
        let output = run(&[]);
        assert_eq!(names(&output), vec!["blazor_service.rs", "mod.rs"]);
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn test_valid_contract_units() {
        let output = run(&[spec("ICalculatorService", vec![ok_method("add")])]);
        assert_eq!(
            names(&output),
            vec![
                "blazor_service.rs",
                "calculator_blazor_service.rs",
                "blazor_services.rs",
                "mod.rs"
            ]
        );
        assert_eq!(output.contracts.len(), 1);
    }

    #[test]
    fn test_invalid_contract_is_dropped_but_reported() {
        let bad = spec(
            "IBrokenService",
            vec![ok_method("fine"), MemberSpec::method("sync", TypeRef::named("i32"), vec![])],
        );
        let output = run(&[bad, spec("ICalculatorService", vec![ok_method("add")])]);

        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.diagnostics[0].code, "BS0001");
        assert_eq!(output.contracts.len(), 1);
        assert!(!names(&output).contains(&"broken_blazor_service.rs"));
    }

    #[test]
    fn test_routes_omitted_without_valid_contract() {
        let bad = spec("IBrokenService", vec![MemberSpec::method("sync", TypeRef::unit(), vec![])]);
        let output = run(&[bad]);
        assert_eq!(names(&output), vec!["blazor_service.rs", "mod.rs"]);
    }

    #[test]
    fn test_duplicate_declarations_are_merged() {
        let s = spec("ICalculatorService", vec![ok_method("add")]);
        let output = run(&[s.clone(), s]);
        assert_eq!(output.contracts.len(), 1);
    }

    #[test]
    fn test_generated_name_clash_keeps_first() {
        let first = spec("ICalculatorService", vec![ok_method("add")]);
        let mut second = spec("CalculatorService", vec![ok_method("sub")]);
        second.location = SourceLocation::new("src/other.rs", 1, 11);

        let output = run(&[first, second]);
        assert_eq!(output.contracts.len(), 1);
        assert_eq!(output.contracts[0].interface_name, "crate::services::ICalculatorService");
    }

    #[test]
    fn test_module_name_clash_keeps_first() {
        let mut first = spec("IHTTPService", vec![ok_method("get")]);
        first.namespace = "crate::a".to_string();
        let mut second = spec("IHttpService", vec![ok_method("put")]);
        second.namespace = "crate::b".to_string();
        second.location = SourceLocation::new("src/b.rs", 1, 11);

        let output = run(&[first, second]);
        assert_eq!(output.contracts.len(), 1);
        assert_eq!(output.contracts[0].interface_name, "crate::a::IHTTPService");

        let mut unit_names = names(&output);
        let total = unit_names.len();
        unit_names.sort_unstable();
        unit_names.dedup();
        assert_eq!(unit_names.len(), total);
        assert_eq!(
            output.units.iter().filter(|u| u.name == "http_blazor_service.rs").count(),
            1
        );

        let index = output.units.iter().find(|u| u.name == "mod.rs").unwrap();
        assert_eq!(index.content.matches("pub mod http_blazor_service;").count(), 1);
    }

    /// Fires once the pipeline polls it more than `after` times.
    struct CancelAfter {
        after: usize,
        polls: std::cell::Cell<usize>,
    }

    impl CancellationSignal for CancelAfter {
        fn is_cancelled(&self) -> bool {
            self.polls.set(self.polls.get() + 1);
            self.polls.get() > self.after
        }
    }

    #[test]
    fn test_cancellation_after_first_contract() {
        let signal = CancelAfter {
            after: 1,
            polls: std::cell::Cell::new(0),
        };
        let res = generate(
            &[
                spec("ICalculatorService", vec![ok_method("add")]),
                spec("ITodoService", vec![ok_method("fetch")]),
            ],
            &StaticOracle::new(),
            &GeneratorConfig::default(),
            &signal,
        );
        assert!(matches!(res, Err(AppError::Cancelled)));
        assert_eq!(signal.polls.get(), 2);
    }

    #[test]
    fn test_cancellation() {
        let cancelled = AtomicBool::new(true);
        let res = generate(
            &[spec("ICalculatorService", vec![ok_method("add")])],
            &StaticOracle::new(),
            &GeneratorConfig::default(),
            &cancelled,
        );
        assert!(matches!(res, Err(AppError::Cancelled)));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let config = GeneratorConfig {
            marker: "1nvalid".into(),
            ..GeneratorConfig::default()
        };
        let res = generate(&[], &StaticOracle::new(), &config, &NeverCancelled);
        assert!(matches!(res, Err(AppError::Config(_))));
    }

    #[test]
    fn test_diagnose_reports_all() {
        let specs = [
            spec("IBrokenService", vec![MemberSpec::method("sync", TypeRef::unit(), vec![])]),
            spec("ICalculatorService", vec![ok_method("add")]),
        ];
        let found = diagnose(&specs, &StaticOracle::new(), &GeneratorConfig::default()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].code, "BS0001");
        assert!(found[0].message.contains("`sync(&self)`"));
    }

    #[test]
    fn test_pretty_print_keeps_header() {
        let config = GeneratorConfig {
            pretty_print: true,
            ..GeneratorConfig::default()
        };
        let output = generate(
            &[spec("ICalculatorService", vec![ok_method("add")])],
            &StaticOracle::new(),
            &config,
            &NeverCancelled,
        )
        .unwrap();

        for unit in &output.units {
            assert!(unit.content.starts_with(&header(&config)), "{}", unit.name);
            assert!(syn::parse_file(&unit.content).is_ok(), "{}", unit.name);
        }
    }
}
