//! namedreturns - report Go functions with unnamed return parameters.
//!
//! Every function declaration, method and function literal in a Go package is
//! inspected; the first return parameter declared without a name produces one
//! finding and one diagnostic (`function F has unnamed returns` or
//! `anonymous function has unnamed returns`).
//!
//! # Architecture
//!
//! - `analysis`: tree-sitter-go loading, file filtering, signature inspection
//!   and the per-package entry point [`run_analysis`]
//! - `config`: the two analysis switches and the optional YAML config file
//! - `cli`: file discovery, package grouping and the `check`/`init` commands
//! - `report`: output formatting (pretty, JSON, SARIF)
//!
//! # Example
//!
//! ```no_run
//! use namedreturns::{run_analysis, Config, Diagnostic, Package};
//!
//! let package = Package::from_sources(
//!     "demo",
//!     &[("demo/f.go", "package demo\n\nfunc F() (int, error) { return 1, nil }\n")],
//! )?;
//! let mut diagnostics: Vec<Diagnostic> = Vec::new();
//! let report = run_analysis(&package, &Config::default(), &mut diagnostics);
//! assert_eq!(report.len(), 1);
//! # Ok::<(), namedreturns::LoadError>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod report;

pub use analysis::{
    is_excluded, run_analysis, Diagnostic, DiagnosticSink, Finding, LoadError, Package, Report,
};
pub use config::{Config, ConfigFile};

/// Analyzer name, used as the SARIF rule id.
pub const NAME: &str = "namedreturns";
