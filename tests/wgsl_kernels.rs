//! Rendered WGSL kernels must survive naga's parser and validator.

use kernelgen::validate::{validate_wgsl_kernel, validate_wgsl_module, wrap_wgsl_kernel};
use kernelgen::{
    ConditionalSetTemplate, Dialect, KernelFragments, RenderConfig, RenderError, TripCount,
};

const BINDINGS: &str = r#"
@group(0) @binding(0) var<storage, read_write> x: array<f32>;
@group(0) @binding(1) var<storage, read_write> hits: array<u32>;
"#;

const ENTRY: &str = "    let N = arrayLength(&x);";

fn wgsl_template() -> ConditionalSetTemplate {
    ConditionalSetTemplate::new(RenderConfig::new(Dialect::Wgsl)).unwrap()
}

fn threshold_fragments() -> KernelFragments {
    KernelFragments::new()
        .with_support_code(["fn clamp01(v: f32) -> f32 {\n    return clamp(v, 0.0, 1.0);\n}"])
        .with_hashdefines(["let threshold: f32 = 0.5;"])
        .with_condition(["let _cond = x[_idx] > threshold;"])
        .with_statement(["x[_idx] = clamp01(x[_idx]);", "hits[_vectorisation_idx] = 1u;"])
}

#[test]
fn test_wgsl_kernel_validates() {
    let template = wgsl_template();
    let fragments = threshold_fragments();
    let n = TripCount::expr("N").unwrap();

    let module_prelude = format!("{}\n{}", BINDINGS, template.support_code(&fragments));
    let kernel = template.main(&fragments, &n);

    if let Err(e) = validate_wgsl_kernel(&module_prelude, ENTRY, &kernel) {
        panic!("{}\n\n{}", e, wrap_wgsl_kernel(&module_prelude, ENTRY, &kernel));
    }
}

#[test]
fn test_wgsl_zero_trip_count_validates() {
    let template = wgsl_template();
    let fragments = KernelFragments::new()
        .with_condition(["let _cond = x[_idx] < 0.0;"])
        .with_statement(["x[_idx] = 0.0;"]);
    let kernel = template.main(&fragments, &TripCount::literal(0).unwrap());

    assert!(kernel.contains("_idx < 0u;"));
    validate_wgsl_kernel(BINDINGS, "", &kernel).unwrap();
}

#[test]
fn test_wgsl_largest_literal_validates() {
    let template = wgsl_template();
    let fragments = KernelFragments::new()
        .with_condition(["let _cond = _idx % 2u == 0u;"])
        .with_statement(["hits[_idx] = 1u;"]);
    let n = TripCount::literal(TripCount::MAX_LITERAL).unwrap();
    let kernel = template.main(&fragments, &n);

    assert!(kernel.contains("_idx < 2147483647u;"));
    validate_wgsl_kernel(BINDINGS, "", &kernel).unwrap();
}

#[test]
fn test_wgsl_assigned_condition_validates() {
    let template = wgsl_template();
    let fragments = KernelFragments::new()
        .with_condition(["var _cond = false;", "if x[_idx] > 1.0 {\n    _cond = true;\n}"])
        .with_statement(["x[_idx] = 1.0;"]);
    let kernel = template.main(&fragments, &TripCount::literal(64).unwrap());

    validate_wgsl_kernel(BINDINGS, "", &kernel).unwrap();
}

#[test]
fn test_wgsl_support_code_is_a_valid_module() {
    let support = wgsl_template().support_code(&threshold_fragments());
    validate_wgsl_module(&support).unwrap();
    assert!(!support.contains("for (var _idx"));
}

#[test]
fn test_missing_cond_fails_downstream() {
    let template = wgsl_template();
    let fragments = KernelFragments::new().with_statement(["x[_idx] = 0.0;"]);
    let kernel = template.main(&fragments, &TripCount::expr("N").unwrap());

    let err = validate_wgsl_kernel(BINDINGS, ENTRY, &kernel).unwrap_err();
    assert!(matches!(err, RenderError::Validation { .. }));
}
