//! End-to-end generation tests against JSON descriptions.

use mockgen_codegen::{generate, synthesize, GenerateOptions, SynthError};
use mockgen_core::{CoreError, DescriptionFile, TypeProvider};

const EXAMPLES: &str = r#"{
    "namespace": "crate::examples",
    "declarations": [
        { "kind": "type", "name": "Str", "type_kind": "struct" },
        { "kind": "contract", "name": "Example", "methods": [
            { "name": "other",
              "inputs": [ { "ty": { "basic": "i64" } } ],
              "outputs": [ { "ty": { "named": { "name": "Result", "args": [
                  { "basic": "unit" },
                  { "named": { "name": "Failure", "namespace": "crate::examples" } }
              ] } } } ] },
            { "name": "fetch",
              "inputs": [
                  { "name": "id", "ty": { "basic": "u32" } },
                  { "name": "token", "ty": { "named": {
                      "name": "CancellationToken", "namespace": "tokio_util::sync" } } }
              ],
              "outputs": [ { "ty": { "basic": "string" } } ] },
            { "name": "describe", "exported": false },
            { "name": "load",
              "inputs": [ { "name": "key", "ty": { "named": {
                  "name": "Key", "namespace": "crate::storage::models" } } } ],
              "outputs": [ { "ty": { "pointer": { "named": {
                  "name": "Str", "namespace": "crate::examples" } } } } ] },
            { "name": "store",
              "inputs": [ { "name": "record", "ty": { "sequence": { "named": {
                  "name": "Record", "namespace": "crate::storage::models" } } } } ] }
        ] },
        { "kind": "contract", "name": "Borrowing", "methods": [
            { "name": "peek",
              "inputs": [ { "name": "s", "ty": { "reference": {
                  "pointee": { "basic": "string" }, "mutable": false } } } ] }
        ] }
    ]
}"#;

fn provider() -> DescriptionFile {
    DescriptionFile::from_json(EXAMPLES).unwrap()
}

#[test]
fn one_signature_set_per_exported_method_in_order() {
    let file = provider();
    let contract = file.contract("Example").unwrap();
    let model = synthesize(contract, &file, &GenerateOptions::default()).unwrap();

    let names: Vec<&str> = model.signatures.iter().map(|s| s.impl_name.as_str()).collect();
    assert_eq!(names, vec!["other", "fetch", "load", "store"]);
    assert_eq!(model.mock_name, "ExampleMock");
}

#[test]
fn excluded_parameter_is_kept_in_override_only() {
    let generated = generate(&provider(), "Example", &GenerateOptions::default()).unwrap();
    let source = &generated.source;

    assert!(source.contains("    pub fn assert_fetch_call(&self, id: u32, out001: String) {\n"));
    assert!(source.contains(
        "    fn fetch(&self, id: u32, token: sync::CancellationToken) -> String {\n"
    ));
    assert!(source.contains("&id, \"id\", __call.index());\n"));
    assert!(!source.contains("&token, \"token\""));
    assert!(source.contains("        mockgen_ledger::cast::<String>(__call.take(1))\n"));
}

#[test]
fn foreign_namespace_is_imported_once_and_reused() {
    let generated = generate(&provider(), "Example", &GenerateOptions::default()).unwrap();
    let deps = &generated.model.dependencies;

    let models: Vec<_> = deps
        .iter()
        .filter(|d| d.path == "crate::storage::models")
        .collect();
    assert_eq!(models.len(), 1);
    assert_eq!(models[0].alias, "models");

    let source = &generated.source;
    assert_eq!(source.matches("use crate::storage::models;\n").count(), 1);
    assert!(source.contains("    fn load(&self, key: models::Key) -> Box<examples::Str> {\n"));
    assert!(source.contains("    fn store(&self, record: Vec<models::Record>) {\n"));
}

#[test]
fn dependencies_keep_first_reference_order() {
    let generated = generate(&provider(), "Example", &GenerateOptions::default()).unwrap();
    let paths: Vec<&str> = generated
        .model
        .dependencies
        .iter()
        .map(|d| d.path.as_str())
        .collect();
    assert_eq!(
        paths,
        vec![
            "crate::examples",
            "tokio_util::sync",
            "crate::storage::models",
            "mockgen_ledger",
            "mockgen_ledger::assert",
        ]
    );

    let use_lines = generated
        .source
        .lines()
        .filter(|l| l.starts_with("use "))
        .count();
    assert_eq!(use_lines, paths.len());
}

#[test]
fn no_self_import_drops_the_contract_namespace() {
    let options = GenerateOptions {
        no_self_import: true,
        ..GenerateOptions::default()
    };
    let generated = generate(&provider(), "Example", &options).unwrap();
    let source = &generated.source;

    assert!(!source.contains("use crate::examples;"));
    assert!(generated.model.dependencies.get("crate::examples").is_none());
    assert!(source.contains("impl Example for ExampleMock {\n"));
    assert!(source.contains("-> Result<(), Failure> {\n"));
}

#[test]
fn custom_helper_format_and_runtime_path() {
    let options = GenerateOptions {
        assert_name: "expect_%s".to_string(),
        runtime_path: "crate::support::ledger".to_string(),
        ..GenerateOptions::default()
    };
    let generated = generate(&provider(), "Example", &options).unwrap();
    let source = &generated.source;

    assert!(source.contains("    pub fn expect_other(&self, _001: i64,"));
    assert!(source.contains("use crate::support::ledger;\n"));
    assert!(source.contains("use crate::support::ledger::assert;\n"));
    assert!(source.contains("    handle: ledger::TestHandle,\n"));
}

#[test]
fn helper_format_without_placeholder_is_rejected() {
    let options = GenerateOptions {
        assert_name: "expect".to_string(),
        ..GenerateOptions::default()
    };
    assert!(matches!(
        generate(&provider(), "Example", &options),
        Err(SynthError::InvalidHelperFormat { .. })
    ));
}

#[test]
fn unsupported_kind_aborts_generation() {
    match generate(&provider(), "Borrowing", &GenerateOptions::default()) {
        Err(SynthError::UnsupportedType { method, param, ty }) => {
            assert_eq!(method, "peek");
            assert_eq!(param, "s");
            assert_eq!(ty, "&String");
        }
        other => panic!("expected UnsupportedType, got {:?}", other.map(|g| g.source)),
    }
}

#[test]
fn lookup_failures_surface_as_core_errors() {
    let file = provider();
    assert!(matches!(
        generate(&file, "Missing", &GenerateOptions::default()),
        Err(SynthError::Core(CoreError::DeclarationNotFound { .. }))
    ));
    assert!(matches!(
        generate(&file, "Str", &GenerateOptions::default()),
        Err(SynthError::Core(CoreError::NotAContract { .. }))
    ));
}

/// Contract behind `mockgen-ledger/tests/generated/example_mock.rs`.
const LEDGER_EXAMPLE: &str = r#"{
    "namespace": "crate::examples",
    "declarations": [
        { "kind": "type", "name": "Str", "type_kind": "struct" },
        { "kind": "contract", "name": "Example", "methods": [
            { "name": "other",
              "inputs": [ { "name": "value", "ty": { "basic": "i64" } } ],
              "outputs": [ { "ty": { "named": { "name": "Result", "args": [
                  { "basic": "unit" },
                  { "named": { "name": "Failure", "namespace": "crate::examples" } }
              ] } } } ] },
            { "name": "fetch",
              "inputs": [
                  { "name": "id", "ty": { "basic": "u32" } },
                  { "name": "token", "ty": { "named": {
                      "name": "CancellationToken", "namespace": "crate::sync" } } }
              ],
              "outputs": [ { "ty": { "basic": "string" } } ] },
            { "name": "lookup",
              "inputs": [ { "name": "key", "ty": { "basic": "string" } } ],
              "outputs": [ { "ty": { "named": { "name": "Option", "args": [
                  { "basic": "u32" } ] } } } ] },
            { "name": "load",
              "outputs": [ { "ty": { "pointer": { "named": {
                  "name": "Str", "namespace": "crate::examples" } } } } ] },
            { "name": "interface",
              "inputs": [ { "name": "o", "ty": { "contract": {
                  "name": "OInterface", "namespace": "crate::examples" } } } ] },
            { "name": "many",
              "inputs": [ { "name": "os", "ty": { "sequence": { "contract": {
                  "name": "OInterface", "namespace": "crate::examples" } } } } ] }
        ] }
    ]
}"#;

#[test]
fn rendered_example_matches_checked_in_mock() {
    let file = DescriptionFile::from_json(LEDGER_EXAMPLE).unwrap();
    let options = GenerateOptions {
        excluded_types: vec!["crate::sync::CancellationToken".to_string()],
        ..GenerateOptions::default()
    };
    let generated = generate(&file, "Example", &options).unwrap();
    let checked_in = include_str!("../../mockgen-ledger/tests/generated/example_mock.rs");
    assert_eq!(generated.source, checked_in);
}

fn contract_with_input(ty: &str) -> DescriptionFile {
    let json = format!(
        r#"{{
            "namespace": "crate::examples",
            "declarations": [
                {{ "kind": "contract", "name": "Holder", "methods": [
                    {{ "name": "hold", "inputs": [ {{ "name": "o", "ty": {} }} ] }}
                ] }}
            ]
        }}"#,
        ty
    );
    DescriptionFile::from_json(&json).unwrap()
}

const O_INTERFACE: &str =
    r#"{ "contract": { "name": "OInterface", "namespace": "crate::examples" } }"#;

#[test]
fn every_wrapping_of_a_contract_compares_identities() {
    let shapes = [
        (format!(r#"{{ "sequence": {} }}"#, O_INTERFACE), "Vec<"),
        (format!(r#"{{ "pointer": {} }}"#, O_INTERFACE), "Box<"),
        (
            format!(r#"{{ "array": {{ "element": {}, "length": 3 }} }}"#, O_INTERFACE),
            "[std::sync::Arc<",
        ),
        (
            format!(r#"{{ "named": {{ "name": "Option", "args": [ {} ] }} }}"#, O_INTERFACE),
            "Option<",
        ),
    ];
    for (ty, spelling) in shapes {
        let file = contract_with_input(&ty);
        let generated = generate(&file, "Holder", &GenerateOptions::default()).unwrap();
        let source = &generated.source;
        assert!(
            source.contains(&format!("    fn hold(&self, o: {}", spelling)),
            "unexpected parameter type for {}",
            ty
        );
        assert!(
            source.contains("        assert::same_objects(&self.handle, __call.get(0), &o, \"o\","),
            "no identity check for {}",
            ty
        );
        assert!(!source.contains("equal_values"), "value check emitted for {}", ty);
    }
}

#[test]
fn contract_inside_other_generics_is_rejected_as_input() {
    let ty = format!(
        r#"{{ "named": {{ "name": "Result", "args": [ {}, {{ "basic": "string" }} ] }} }}"#,
        O_INTERFACE
    );
    match generate(&contract_with_input(&ty), "Holder", &GenerateOptions::default()) {
        Err(SynthError::UnsupportedType { method, param, ty }) => {
            assert_eq!(method, "hold");
            assert_eq!(param, "o");
            assert!(ty.starts_with("Result<std::sync::Arc<dyn crate::examples::OInterface"));
        }
        other => panic!("expected UnsupportedType, got {:?}", other.map(|g| g.source)),
    }
}
