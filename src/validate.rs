//! WGSL validation using naga.
//!
//! Rendered WGSL kernels are statement lists, not modules. Wrap them with
//! [`wrap_wgsl_kernel`] (or call [`validate_wgsl_kernel`]) to check them the
//! way the build step will see them.

use naga::front::wgsl;
use naga::valid::{Capabilities, ValidationFlags, Validator};

use crate::error::{RenderError, Result};

/// Validate a complete WGSL module.
pub fn validate_wgsl_module(source: &str) -> Result<()> {
    validate_wgsl(source, "Module")
}

/// Validate a rendered kernel body inside a compute entry point.
///
/// `module_prelude` holds module-scope declarations (bindings, support
/// functions). `entry_prelude` runs at the top of the entry point before the
/// kernel, typically binding `N`.
pub fn validate_wgsl_kernel(module_prelude: &str, entry_prelude: &str, kernel: &str) -> Result<()> {
    let source = wrap_wgsl_kernel(module_prelude, entry_prelude, kernel);
    validate_wgsl(&source, "Kernel")
}

/// Place a kernel body inside a single-invocation compute entry point.
pub fn wrap_wgsl_kernel(module_prelude: &str, entry_prelude: &str, kernel: &str) -> String {
    format!(
        r#"{module_prelude}

@compute @workgroup_size(1)
fn main() {{
{entry_prelude}
{kernel}
}}
"#,
        module_prelude = module_prelude,
        entry_prelude = entry_prelude,
        kernel = kernel,
    )
}

fn validate_wgsl(source: &str, stage: &'static str) -> Result<()> {
    let module = wgsl::parse_str(source).map_err(|err| RenderError::Validation {
        stage,
        message: err.emit_to_string(source),
    })?;

    Validator::new(ValidationFlags::all(), Capabilities::all())
        .validate(&module)
        .map(|_| ())
        .map_err(|err| RenderError::Validation {
            stage,
            message: err.to_string(),
        })
}
