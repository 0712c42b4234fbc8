//! Checker configuration.
//!
//! [`Config`] holds the two switches the analysis reads. It is built once at
//! startup and passed by reference into every run. [`ConfigFile`] is the
//! optional YAML file that supplies defaults for those switches plus path
//! exclusions applied during file discovery.

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Analysis switches. Read-only once constructed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// Do not inspect function literals.
    pub skip_anonymous: bool,
    /// Also exclude files whose path ends in `test.go`.
    pub skip_tests: bool,
}

impl Config {
    pub fn new(skip_anonymous: bool, skip_tests: bool) -> Self {
        Self {
            skip_anonymous,
            skip_tests,
        }
    }
}

/// On-disk configuration (`.namedreturns.yaml`).
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Default for `--skip-anonymous`.
    #[serde(default)]
    pub skip_anonymous: Option<bool>,
    /// Default for `--skip-tests`.
    #[serde(default)]
    pub skip_tests: Option<bool>,
    /// Glob patterns for paths to leave out of discovery (e.g. "**/mocks/**").
    #[serde(default)]
    pub excluded_paths: Vec<String>,
}

impl ConfigFile {
    /// Parse a config file from YAML on disk.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    /// Parse a config file from a YAML string. An empty document yields defaults.
    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: ConfigFile = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Combine file defaults with command-line switches.
    ///
    /// A switch given on the command line always turns the setting on.
    pub fn resolve(&self, skip_anonymous: bool, skip_tests: bool) -> Config {
        Config {
            skip_anonymous: skip_anonymous || self.skip_anonymous.unwrap_or(false),
            skip_tests: skip_tests || self.skip_tests.unwrap_or(false),
        }
    }

    /// Compile `excluded_paths` into a matcher. Fails on an invalid pattern.
    pub fn excluded_set(&self) -> anyhow::Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.excluded_paths {
            let glob = Glob::new(pattern)
                .map_err(|e| anyhow::anyhow!("invalid excluded_paths pattern {:?}: {}", pattern, e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }
}
