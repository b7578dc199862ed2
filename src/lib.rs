//! Declaration-only Python stub generation.
//!
//! This crate renders an already-parsed Python module into a `.pyi`-style
//! stub: a reduced view of the same source that preserves public API shape
//! (classes, functions, imports, signatures, decorators) while erasing
//! implementation bodies, private members, and literal default values.
//!
//! Parsing is not part of this crate. The upstream analysis pipeline
//! produces the node types in [`nodes`] and hands them to a [`StubEmitter`],
//! which walks the tree once, applies the visibility and nesting rules, and
//! returns the finished text for a single write.
//!
//! # Overview
//!
//! - **Emission**: [`StubEmitter::generate`] drives the traversal;
//!   [`generate_stub`] is the convenience form with default collaborators.
//! - **Collaborators**: visibility classification ([`NameVisibility`]) and
//!   expression rendering ([`RenderExpression`]) are narrow stateless trait
//!   seams injected at construction, so the engine is testable in isolation
//!   with stand-ins.
//! - **Formatting**: output follows the originating file's conventions via
//!   [`FormatStyle`] rather than a fixed internal standard.
//!
//! # Quick Start
//!
//! ```
//! use pystubgen::nodes::{FunctionDef, Module, Statement};
//! use pystubgen::{generate_stub, FormatStyle};
//!
//! let module = Module::new(vec![
//!     Statement::FunctionDef(FunctionDef::new("connect")),
//!     Statement::FunctionDef(FunctionDef::new("_internal")),
//! ]);
//!
//! let stub = generate_stub(&module, &FormatStyle::default()).expect("render error");
//! assert!(stub.contains("def connect():"));
//! assert!(!stub.contains("_internal"));
//! ```

use std::path::Path;

// ============================================================================
// Public modules and re-exports
// ============================================================================

/// Output buffer and indentation bookkeeping.
pub mod codegen;
/// Formatting preferences inherited from the originating file.
pub mod config;
/// Error types.
pub mod error;
/// Node types for the parsed syntax tree.
pub mod nodes;
/// The expression-rendering seam.
pub mod render;
/// The traversal-and-emission engine.
pub mod stubgen;
/// Identifier visibility classification.
pub mod visibility;
/// Final artifact write.
pub mod writer;

pub use codegen::CodegenState;
pub use config::FormatStyle;
pub use error::StubError;
pub use render::{RenderError, RenderExpression, SourceRenderer};
pub use stubgen::StubEmitter;
pub use visibility::{NameVisibility, UnderscoreVisibility};
pub use writer::write_stub_file;

// ============================================================================
// Convenience API
// ============================================================================

/// Render `module` with the default collaborators.
///
/// Equivalent to building a [`StubEmitter`] over [`UnderscoreVisibility`]
/// and [`SourceRenderer`]. Use [`StubEmitter::new`] directly to supply
/// custom collaborators.
///
/// # Errors
///
/// Propagates any failure the expression renderer reports.
pub fn generate_stub(
    module: &nodes::Module<'_>,
    style: &FormatStyle,
) -> Result<String, StubError> {
    StubEmitter::new(UnderscoreVisibility, SourceRenderer).generate(module, style)
}

/// Render `module` with the default collaborators and write the result to
/// `path`, replacing any existing content.
///
/// # Errors
///
/// Propagates renderer failures and the final I/O failure; nothing is
/// written unless generation succeeded in full.
pub fn generate_stub_to(
    module: &nodes::Module<'_>,
    style: &FormatStyle,
    path: &Path,
) -> Result<(), StubError> {
    let text = generate_stub(module, style)?;
    write_stub_file(path, &text)
}
