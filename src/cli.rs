//! Command-line interface for namedreturns.

use clap::{Parser, Subcommand};
use globset::GlobSet;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::analysis::{is_excluded, run_analysis, Diagnostic, LoadError, Package};
use crate::config::{Config, ConfigFile};
use crate::report::{self, CheckResult, PackageResult};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Default config file names to search for.
const DEFAULT_CONFIG_NAMES: &[&str] = &[".namedreturns.yaml", "namedreturns.yaml"];

/// Environment variable that turns on `[debug]` output on stderr.
const DEBUG_ENV: &str = "NAMEDRETURNS_DEBUG";

/// Report Go functions whose return parameters have no names.
///
/// Every function declaration, method and function literal is checked; the
/// first unnamed return parameter of each signature is reported. Generated
/// files (`*gen.go`, `*pb.go`) are never checked.
#[derive(Parser)]
#[command(name = "namedreturns")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check Go sources for unnamed return parameters
    #[command(visible_alias = "lint")]
    Check(CheckArgs),
    /// Write a default namedreturns config file
    Init(InitArgs),
}

/// Arguments for the check command.
#[derive(Parser)]
pub struct CheckArgs {
    /// Path to check (file or directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Skip anonymous functions
    #[arg(short = 'a', long)]
    pub skip_anonymous: bool,

    /// Skip test files
    #[arg(short = 't', long)]
    pub skip_tests: bool,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Ignore any config file
    #[arg(long, conflicts_with = "config")]
    pub no_config: bool,

    /// Output format: pretty, json, or sarif
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = ".namedreturns.yaml")]
    pub output: PathBuf,
}

const CONFIG_TEMPLATE: &str = include_str!("templates/namedreturns.yaml");

fn debug_enabled() -> bool {
    std::env::var(DEBUG_ENV).is_ok()
}

/// Discover a config file in the current directory.
fn discover_config() -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
}

/// Load the config file selected by `args`, or defaults when there is none.
fn load_config_file(args: &CheckArgs) -> anyhow::Result<ConfigFile> {
    if args.no_config {
        return Ok(ConfigFile::default());
    }

    let path = match &args.config {
        Some(p) => p.clone(),
        None => match discover_config() {
            Some(p) => p,
            None => return Ok(ConfigFile::default()),
        },
    };

    if debug_enabled() {
        eprintln!("[debug] Using config file {}", path.display());
    }
    ConfigFile::parse_file(&path)
        .map_err(|e| anyhow::anyhow!("parsing config {}: {}", path.display(), e))
}

/// Collect `.go` files under `root`, following Go tool directory conventions.
///
/// Hidden directories, directories starting with `_`, `vendor` and `testdata`
/// are skipped. Paths matching `excluded` (relative to `root`) are left out.
/// Test files are kept; whether they are checked is decided per run.
pub fn collect_files(root: &Path, excluded: &GlobSet) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            !(name.starts_with('.')
                || name.starts_with('_')
                || name == "vendor"
                || name == "testdata")
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("go") {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        if excluded.is_match(relative) {
            if debug_enabled() {
                eprintln!("[debug] excluded by config: {}", path.display());
            }
            continue;
        }

        files.push(path.to_path_buf());
    }

    Ok(files)
}

/// Group files into packages: one per parent directory, sorted by directory.
pub fn group_packages(files: &[PathBuf]) -> Vec<(PathBuf, Vec<PathBuf>)> {
    let mut packages: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
    for file in files {
        let dir = file.parent().map(Path::to_path_buf).unwrap_or_default();
        packages.entry(dir).or_default().push(file.clone());
    }
    packages.into_iter().collect()
}

/// Load and check one package.
fn check_package(dir: &Path, files: &[PathBuf], config: &Config) -> Result<PackageResult, LoadError> {
    let package = Package::load(dir, files)?;
    let files_scanned = package
        .files()
        .iter()
        .filter(|f| !is_excluded(&f.path, config.skip_tests))
        .count();

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let report = run_analysis(&package, config, &mut diagnostics);

    Ok(PackageResult {
        dir: package.dir().to_string(),
        files_scanned,
        diagnostics,
        report,
    })
}

/// Check `files`, one analysis run per package, packages in parallel.
///
/// The result lists the packages that loaded, in sorted directory order.
/// A package that fails to load is returned as an error and does not stop
/// the others from being checked.
pub fn check_files(files: &[PathBuf], config: &Config) -> (CheckResult, Vec<LoadError>) {
    let packages = group_packages(files);
    if debug_enabled() {
        eprintln!(
            "[debug] {} files in {} packages (skip_anonymous={}, skip_tests={})",
            files.len(),
            packages.len(),
            config.skip_anonymous,
            config.skip_tests
        );
    }

    let outcomes: Vec<Result<PackageResult, LoadError>> = packages
        .par_iter()
        .map(|(dir, files)| check_package(dir, files, config))
        .collect();

    let mut result = CheckResult::default();
    let mut errors = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(package) => result.packages.push(package),
            Err(e) => errors.push(e),
        }
    }

    (result, errors)
}

/// Run the check command.
pub fn run_check(args: &CheckArgs) -> anyhow::Result<i32> {
    // Validate format
    if args.format != "pretty" && args.format != "json" && args.format != "sarif" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty', 'json', or 'sarif'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let config_file = match load_config_file(args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    let excluded = match config_file.excluded_set() {
        Ok(set) => set,
        Err(e) => {
            eprintln!("Error: invalid config: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    let config = config_file.resolve(args.skip_anonymous, args.skip_tests);

    let metadata = match std::fs::metadata(&args.path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    let files = if metadata.is_dir() {
        collect_files(&args.path, &excluded)?
    } else {
        vec![args.path.clone()]
    };

    if files.is_empty() {
        eprintln!("Warning: no Go files to check");
        return Ok(EXIT_SUCCESS);
    }

    let (result, errors) = check_files(&files, &config);
    for e in &errors {
        eprintln!("Error: {}", e);
    }

    let path_str = args.path.to_string_lossy().to_string();
    match args.format.as_str() {
        "json" => report::write_json(&path_str, &result)?,
        "sarif" => {
            report::write_sarif(&args.path, &result)?;
        }
        _ => report::write_pretty(&path_str, &result),
    }

    if !errors.is_empty() {
        Ok(EXIT_ERROR)
    } else if result.has_findings() {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, CONFIG_TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to set your defaults", args.output.display());
    println!("  2. Run: namedreturns check .");

    Ok(EXIT_SUCCESS)
}
