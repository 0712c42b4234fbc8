//! Unnamed-returns analysis over tree-sitter-go syntax trees.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────┐     ┌───────────────┐
//! │ Package         │────▶│ FileFilter   │────▶│ TreeWalker    │
//! │ (ParsedFiles)   │     │ (is_excluded)│     │ (walk_file)   │
//! └─────────────────┘     └──────────────┘     └───────────────┘
//!                                                      │
//!                                                      ▼
//!                         ┌──────────────┐     ┌───────────────┐
//!                         │ Report       │◀────│ Signature     │
//!                         │ (Findings)   │     │ Inspector     │
//!                         └──────────────┘     └───────────────┘
//!                                                      │
//!                                                      ▼
//!                                              DiagnosticSink
//! ```
//!
//! [`run_analysis`] is the entry point: one call per package. It owns no
//! shared state, so packages can be analyzed concurrently with a shared
//! [`Config`](crate::config::Config).

mod filter;
mod findings;
mod inspect;
mod loader;
mod runner;
mod traits;
mod walk;

pub use filter::is_excluded;
pub use findings::{Diagnostic, Finding, FunctionKind, Position, Report};
pub use inspect::{first_unnamed_result, inspect_function, Inspection};
pub use loader::{GoParser, LoadError, Package};
pub use runner::run_analysis;
pub use traits::{DiagnosticSink, Discard, ParsedFile};
pub use walk::walk_file;
