//! contas-error - Diagnostics for the contas evaluator
//!
//! This crate renders evaluation failures in a clear and detailed way,
//! similar to the Rust compiler style.
//!
//! # Example
//!
//! ```rust
//! use contas_error::{Diagnostic, ErrorCode, SourceCache, DiagnosticRenderer};
//! use contas_error::span::{Span, Position};
//!
//! let mut cache = SourceCache::new();
//! let file_id = cache.add("<stdin>", "1+");
//!
//! let span = Span::char_at(Position::new(1, 3, 2), None, file_id);
//!
//! let diagnostic = Diagnostic::error("expected a number")
//!     .with_code(ErrorCode::EXPECTED_NUMBER)
//!     .with_label(span, "found end of input");
//!
//! let renderer = DiagnosticRenderer::new(&cache);
//! println!("{}", renderer.render(&diagnostic));
//! ```

pub mod diagnostic;
pub mod span;

pub use diagnostic::{
    Diagnostic, DiagnosticRenderer, ErrorCode, Label, Level, SourceCache, SourceFile,
};
pub use span::{Position, Span};
