//! # kernelgen - conditional-set kernel templates
//!
//! Turns the code fragments produced by an expression compiler into a
//! per-element update loop: for every index in `[0, N)`, evaluate a condition
//! and, when it holds, apply a statement.
//!
//! kernelgen does not decide what the condition or the statement compute. It
//! owns the shape of the generated code: where each fragment goes, in which
//! order, and under which marker.
//!
//! ## Quick Start
//!
//! ```
//! use kernelgen::{ConditionalSetTemplate, KernelFragments, TripCount};
//!
//! let fragments = KernelFragments::new()
//!     .with_pointers(["double* const x = _ptr_array_x;"])
//!     .with_condition(["const bool _cond = x[_idx] > 0;"])
//!     .with_statement(["x[_idx] = 0;"]);
//!
//! let template = ConditionalSetTemplate::default();
//! let kernel = template.main(&fragments, &TripCount::expr("N").unwrap());
//!
//! assert!(kernel.contains("for(int _idx=0; _idx<N; _idx++)"));
//! assert!(kernel.contains("    if(_cond) {\n        //// STATEMENT ///////////\n"));
//! assert!(kernel.contains("        x[_idx] = 0;\n    }\n}\n"));
//! ```
//!
//! ## Block Order
//!
//! | # | Block | Rendered as |
//! |---|-------|-------------|
//! | 1 | SUPPORT CODE | comments |
//! | 2 | HANDLE DENORMALS | code |
//! | 3 | HASH DEFINES | code |
//! | 4 | POINTERS | code |
//! | 5 | loop over `_idx`, `_vectorisation_idx` binding | template |
//! | 6 | CONDITION | code, must define `_cond` |
//! | 7 | `if (_cond)` + STATEMENT | code |
//!
//! [`ConditionalSetTemplate::support_code`] renders block 1 alone, as active
//! code, for a shared compilation unit.
//!
//! ## Dialects
//!
//! [`Dialect::Cpp`] emits a C++ loop body for the native build step.
//! [`Dialect::Wgsl`] emits WGSL statements for a compute entry point; the
//! [`validate`] module checks them with naga.

pub mod config;
pub mod dialect;
pub mod error;
pub mod fragments;
pub mod insert;
pub mod template;
pub mod validate;

pub use config::{EmptyBlocks, RenderConfig};
pub use dialect::Dialect;
pub use error::{RenderError, Result};
pub use fragments::{Block, CodeLines, KernelFragments, TripCount};
pub use insert::CodeWriter;
pub use template::{ConditionalSetTemplate, Stage, MAIN_STAGES};
