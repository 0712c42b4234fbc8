//! Per-package analysis entry point.

use super::{is_excluded, walk_file, DiagnosticSink, Package, Report};
use crate::config::Config;

/// Run the unnamed-returns check over every file of `package`.
///
/// Excluded files are skipped entirely. Findings from the remaining files are
/// appended in file order. This never fails on a loaded package.
pub fn run_analysis(package: &Package, config: &Config, sink: &mut dyn DiagnosticSink) -> Report {
    let mut findings = Vec::new();

    for file in package.files() {
        if is_excluded(&file.path, config.skip_tests) {
            if std::env::var("NAMEDRETURNS_DEBUG").is_ok() {
                eprintln!("[debug] skipping excluded file {}", file.path);
            }
            continue;
        }
        findings.extend(walk_file(file, config, sink));
    }

    Report::new(findings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Diagnostic, Discard};

    const UNNAMED: &str = "package p\n\nfunc F() (int, error) { return 1, nil }\n";

    #[test]
    fn test_findings_follow_file_order() {
        let package = Package::from_sources(
            "p",
            &[
                ("p/b.go", "package p\n\nfunc B() error { return nil }\n"),
                ("p/a.go", "package p\n\nfunc A() error { return nil }\n"),
            ],
        )
        .unwrap();

        let report = run_analysis(&package, &Config::default(), &mut Discard);
        let names: Vec<_> = report.findings().iter().map(|f| f.func_name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_generated_files_skipped() {
        let package = Package::from_sources(
            "p",
            &[
                ("p/api.pb.go", UNNAMED),
                ("p/enum_gen.go", UNNAMED),
                ("p/f.go", UNNAMED),
            ],
        )
        .unwrap();

        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let report = run_analysis(&package, &Config::default(), &mut diagnostics);
        assert_eq!(report.len(), 1);
        assert_eq!(report.findings()[0].file_name, "p/f.go");
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_test_files_follow_switch() {
        let package = Package::from_sources("p", &[("p/f_test.go", UNNAMED)]).unwrap();

        let inspected = run_analysis(&package, &Config::new(false, false), &mut Discard);
        assert_eq!(inspected.len(), 1);

        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let skipped = run_analysis(&package, &Config::new(false, true), &mut diagnostics);
        assert!(skipped.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_empty_package() {
        let package = Package::from_sources("p", &[]).unwrap();
        let report = run_analysis(&package, &Config::default(), &mut Discard);
        assert!(report.is_empty());
    }
}
