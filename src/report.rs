//! Output formatting for namedreturns results.
//!
//! Supports three output formats:
//! - Pretty: colored terminal output, one `file:line:col: message` per diagnostic
//! - JSON: structured output for programmatic consumption
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use colored::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::analysis::{Diagnostic, Report};

/// Analysis output of one package.
#[derive(Debug, Clone)]
pub struct PackageResult {
    /// Package directory.
    pub dir: String,
    /// Files inspected (excluded files are not counted).
    pub files_scanned: usize,
    /// Diagnostics in emission order.
    pub diagnostics: Vec<Diagnostic>,
    /// Findings, aligned one-to-one with `diagnostics`.
    pub report: Report,
}

/// Output of a whole `check` run, packages in sorted directory order.
#[derive(Debug, Clone, Default)]
pub struct CheckResult {
    pub packages: Vec<PackageResult>,
}

impl CheckResult {
    pub fn finding_count(&self) -> usize {
        self.packages.iter().map(|p| p.report.len()).sum()
    }

    pub fn anonymous_count(&self) -> usize {
        self.packages.iter().map(|p| p.report.anonymous_count()).sum()
    }

    pub fn files_scanned(&self) -> usize {
        self.packages.iter().map(|p| p.files_scanned).sum()
    }

    pub fn has_findings(&self) -> bool {
        self.finding_count() > 0
    }

    /// All diagnostics, package by package.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.packages.iter().flat_map(|p| p.diagnostics.iter())
    }
}

// =============================================================================
// JSON Format
// =============================================================================

/// JSON report structure.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    pub files_scanned: usize,
    pub count: usize,
    pub findings: Vec<JsonFinding>,
}

/// One unnamed return in JSON output.
#[derive(Serialize, Deserialize)]
pub struct JsonFinding {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub function: String,
    #[serde(rename = "type")]
    pub type_text: String,
    pub anonymous: bool,
    pub message: String,
}

/// Build the JSON report for a run.
pub fn to_json_report(path: &str, result: &CheckResult) -> JsonReport {
    let findings: Vec<JsonFinding> = result
        .packages
        .iter()
        .flat_map(|p| p.report.findings().iter().zip(p.diagnostics.iter()))
        .map(|(f, d)| JsonFinding {
            file: f.file_name.clone(),
            line: f.line,
            column: d.position.column,
            function: f.func_name.clone(),
            type_text: f.type_text.clone(),
            anonymous: f.is_anonymous,
            message: d.message.clone(),
        })
        .collect();

    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        path: path.to_string(),
        files_scanned: result.files_scanned(),
        count: findings.len(),
        findings,
    }
}

/// Write results in JSON format.
pub fn write_json(path: &str, result: &CheckResult) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&to_json_report(path, result))?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// SARIF Format
// =============================================================================

const SARIF_VERSION: &str = "2.1.0";
const SARIF_SCHEMA: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const TOOL_NAME: &str = crate::NAME;
const RULE_ID: &str = crate::NAME;

#[derive(Serialize, Deserialize)]
pub struct SarifReport {
    pub version: String,
    #[serde(rename = "$schema")]
    pub schema: String,
    pub runs: Vec<SarifRun>,
}

#[derive(Serialize, Deserialize)]
pub struct SarifRun {
    pub tool: SarifTool,
    pub results: Vec<SarifResult>,
}

#[derive(Serialize, Deserialize)]
pub struct SarifTool {
    pub driver: SarifDriver,
}

#[derive(Serialize, Deserialize)]
pub struct SarifDriver {
    pub name: String,
    pub version: String,
    pub rules: Vec<SarifRule>,
}

#[derive(Serialize, Deserialize)]
pub struct SarifRule {
    pub id: String,
    pub name: String,
    #[serde(rename = "shortDescription")]
    pub short_description: SarifMessage,
    #[serde(rename = "fullDescription")]
    pub full_description: SarifMessage,
    #[serde(rename = "defaultConfiguration")]
    pub default_config: SarifRuleConfig,
}

#[derive(Serialize, Deserialize)]
pub struct SarifRuleConfig {
    pub level: String,
}

#[derive(Serialize, Deserialize)]
pub struct SarifResult {
    #[serde(rename = "ruleId")]
    pub rule_id: String,
    pub level: String,
    pub message: SarifMessage,
    pub locations: Vec<SarifLocation>,
}

#[derive(Serialize, Deserialize)]
pub struct SarifMessage {
    pub text: String,
}

#[derive(Serialize, Deserialize)]
pub struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    pub physical_location: SarifPhysicalLocation,
}

#[derive(Serialize, Deserialize)]
pub struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    pub artifact_location: SarifArtifact,
    pub region: SarifRegion,
}

#[derive(Serialize, Deserialize)]
pub struct SarifArtifact {
    pub uri: String,
}

#[derive(Serialize, Deserialize)]
pub struct SarifRegion {
    #[serde(rename = "startLine")]
    pub start_line: usize,
    #[serde(rename = "startColumn")]
    pub start_column: usize,
}

fn make_relative_path(file_path: &str, base_path: &Path) -> String {
    if base_path.as_os_str().is_empty() {
        return file_path.to_string();
    }

    let file = Path::new(file_path);

    // Single file scan: report just the file name
    if file == base_path {
        return file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.to_string());
    }

    file.strip_prefix(base_path)
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_else(|_| file_path.to_string())
}

/// Build the SARIF log for a run. File URIs are made relative to `base_path`.
pub fn to_sarif_report(base_path: &Path, result: &CheckResult) -> SarifReport {
    let results: Vec<SarifResult> = result
        .diagnostics()
        .map(|d| SarifResult {
            rule_id: RULE_ID.to_string(),
            level: "warning".to_string(),
            message: SarifMessage {
                text: d.message.clone(),
            },
            locations: vec![SarifLocation {
                physical_location: SarifPhysicalLocation {
                    artifact_location: SarifArtifact {
                        uri: make_relative_path(&d.position.file, base_path),
                    },
                    region: SarifRegion {
                        start_line: d.position.line,
                        start_column: d.position.column,
                    },
                },
            }],
        })
        .collect();

    let rule = SarifRule {
        id: RULE_ID.to_string(),
        name: "UnnamedReturns".to_string(),
        short_description: SarifMessage {
            text: "Detects functions with unnamed return parameters".to_string(),
        },
        full_description: SarifMessage {
            text: "Reports the first unnamed return parameter of every function declaration, method and function literal.".to_string(),
        },
        default_config: SarifRuleConfig {
            level: "warning".to_string(),
        },
    };

    SarifReport {
        version: SARIF_VERSION.to_string(),
        schema: SARIF_SCHEMA.to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: TOOL_NAME.to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    rules: vec![rule],
                },
            },
            results,
        }],
    }
}

/// Write results in SARIF format.
pub fn write_sarif(base_path: &Path, result: &CheckResult) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&to_sarif_report(base_path, result))?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format.
pub fn write_pretty(path: &str, result: &CheckResult) {
    // Header
    println!();
    print!("  ");
    print!("{}", "namedreturns".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Scanning: ".dimmed());
    println!("{}", path);
    println!();

    let diagnostics: Vec<&Diagnostic> = result.diagnostics().collect();
    if !diagnostics.is_empty() {
        for d in &diagnostics {
            write_diagnostic(d);
        }
        println!();
    }

    write_summary(result);
    println!();
}

fn write_diagnostic(d: &Diagnostic) {
    print!("    {}", d.position.file.blue());
    print!(
        "{}",
        format!(":{}:{}:", d.position.line, d.position.column).dimmed()
    );
    println!(" {}", d.message);
}

fn write_summary(result: &CheckResult) {
    let files = result.files_scanned();
    let file_word = if files == 1 { "file" } else { "files" };

    if !result.has_findings() {
        println!(
            "  {}  no unnamed returns in {} {}",
            "✓ PASS".green(),
            files,
            file_word
        );
        return;
    }

    let count = result.finding_count();
    let plural = if count != 1 { "s" } else { "" };
    print!(
        "  {}  {} function{} with unnamed returns in {} {}",
        "✗ FAIL".red(),
        count,
        plural,
        files,
        file_word
    );

    let anonymous = result.anonymous_count();
    if anonymous > 0 {
        print!("  {}", format!("({} anonymous)", anonymous).dimmed());
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{run_analysis, Package};
    use crate::config::Config;

    fn sample_result() -> CheckResult {
        let package = Package::from_sources(
            "svc",
            &[(
                "/repo/svc/handler.go",
                "package svc\n\nfunc Load() (int, error) {\n\tf := func() error { return nil }\n\t_ = f\n\treturn 0, nil\n}\n",
            )],
        )
        .unwrap();

        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let report = run_analysis(&package, &Config::default(), &mut diagnostics);
        CheckResult {
            packages: vec![PackageResult {
                dir: package.dir().to_string(),
                files_scanned: 1,
                diagnostics,
                report,
            }],
        }
    }

    #[test]
    fn test_counts() {
        let result = sample_result();
        assert_eq!(result.finding_count(), 2);
        assert_eq!(result.anonymous_count(), 1);
        assert_eq!(result.files_scanned(), 1);
        assert!(result.has_findings());
        assert!(!CheckResult::default().has_findings());
    }

    #[test]
    fn test_json_report() {
        let report = to_json_report("/repo", &sample_result());
        assert_eq!(report.count, 2);
        assert_eq!(report.findings[0].function, "Load");
        assert_eq!(report.findings[0].type_text, "int");
        assert_eq!(report.findings[0].column, 14);
        assert_eq!(report.findings[1].function, "");
        assert!(report.findings[1].anonymous);
        assert_eq!(report.findings[1].message, "anonymous function has unnamed returns");

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["findings"][0]["type"], "int");
        assert_eq!(value["files_scanned"], 1);
    }

    #[test]
    fn test_sarif_report() {
        let sarif = to_sarif_report(Path::new("/repo"), &sample_result());
        assert_eq!(sarif.version, "2.1.0");
        assert_eq!(sarif.runs[0].tool.driver.rules.len(), 1);

        let results = &sarif.runs[0].results;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].rule_id, "namedreturns");
        assert_eq!(
            results[0].locations[0].physical_location.artifact_location.uri,
            "svc/handler.go"
        );
        assert_eq!(results[1].locations[0].physical_location.region.start_line, 4);
    }

    #[test]
    fn test_sarif_report_single_file_scan() {
        let sarif = to_sarif_report(Path::new("/repo/svc/handler.go"), &sample_result());
        let uri = &sarif.runs[0].results[0].locations[0]
            .physical_location
            .artifact_location
            .uri;
        assert_eq!(uri, "handler.go");
    }

    #[test]
    fn test_make_relative_path() {
        assert_eq!(make_relative_path("/a/b/c.go", Path::new("/a")), "b/c.go");
        assert_eq!(make_relative_path("/a/b/c.go", Path::new("/a/b/c.go")), "c.go");
        assert_eq!(make_relative_path("/x/c.go", Path::new("/a")), "/x/c.go");
        assert_eq!(make_relative_path("c.go", Path::new("")), "c.go");
    }
}
