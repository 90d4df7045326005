use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::cli::Cli;
use crate::engine::{default_workers, EngineOptions, DEFAULT_FILE_TIMEOUT};
use crate::models::Dialect;

/// Root configuration structure, deserialized from `.license-harvest/config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Scan behaviour.
    #[serde(default)]
    pub scan: ScanConfig,
    /// License keyword extensions.
    #[serde(default)]
    pub patterns: PatternConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// Concurrent file scans. Defaults to the CPU-derived count.
    pub workers: Option<usize>,
    /// Per-file limit in seconds.
    #[serde(default = "default_file_timeout_secs")]
    pub file_timeout_secs: u64,
    /// Whole-run limit in seconds; unlimited when absent.
    pub run_timeout_secs: Option<u64>,
    /// Comment dialects to extract.
    #[serde(default = "default_dialects")]
    pub dialects: Vec<Dialect>,
    /// Treat a file without any comment as one big comment.
    #[serde(default)]
    pub whole_file_fallback: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            workers: None,
            file_timeout_secs: default_file_timeout_secs(),
            run_timeout_secs: None,
            dialects: default_dialects(),
            whole_file_fallback: false,
        }
    }
}

fn default_file_timeout_secs() -> u64 {
    DEFAULT_FILE_TIMEOUT.as_secs()
}

fn default_dialects() -> Vec<Dialect> {
    Dialect::ALL.to_vec()
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternConfig {
    /// Additional case-insensitive regular expressions that mark a comment as
    /// license text.
    #[serde(default)]
    pub extra: Vec<String>,
}

/// Settings for one run after command-line overrides are applied.
#[derive(Debug)]
pub struct Settings {
    pub engine: EngineOptions,
    pub dialects: Vec<Dialect>,
    pub whole_file_fallback: bool,
    pub extra_patterns: Vec<String>,
}

impl Config {
    /// Combine file values with command-line flags. Flags win.
    pub fn resolve(self, cli: &Cli) -> Result<Settings> {
        let workers = cli
            .workers
            .or(self.scan.workers)
            .unwrap_or_else(default_workers);
        if workers == 0 {
            bail!("worker count must be at least 1");
        }

        let dialects = if cli.dialect.is_empty() {
            self.scan.dialects
        } else {
            cli.dialect.clone()
        };
        if dialects.is_empty() {
            bail!("at least one comment dialect must be enabled");
        }

        let file_timeout_secs = cli.timeout.unwrap_or(self.scan.file_timeout_secs);

        Ok(Settings {
            engine: EngineOptions {
                workers,
                file_timeout: Duration::from_secs(file_timeout_secs),
                run_timeout: self.scan.run_timeout_secs.map(Duration::from_secs),
            },
            dialects,
            whole_file_fallback: cli.whole_file_fallback || self.scan.whole_file_fallback,
            extra_patterns: self.patterns.extra,
        })
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<cwd>/.license-harvest/config.toml`
/// 3. `~/.config/license-harvest/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(cwd: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = cwd.join(".license-harvest").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("license-harvest")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["license-harvest", "src/**/*.js"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let settings = Config::default().resolve(&cli(&[])).unwrap();
        assert_eq!(settings.engine.workers, default_workers());
        assert_eq!(settings.engine.file_timeout, DEFAULT_FILE_TIMEOUT);
        assert_eq!(settings.engine.run_timeout, None);
        assert_eq!(settings.dialects, Dialect::ALL.to_vec());
        assert!(!settings.whole_file_fallback);
        assert!(settings.extra_patterns.is_empty());
    }

    #[test]
    fn test_parse_file() {
        let content = r#"
[scan]
workers = 3
file_timeout_secs = 5
run_timeout_secs = 120
dialects = ["c-family", "legacy"]
whole_file_fallback = true

[patterns]
extra = ["Proprietary", "Confidential"]
"#;
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "{}", content).unwrap();

        let config = load_config(Path::new("."), Some(f.path())).unwrap();
        let settings = config.resolve(&cli(&[])).unwrap();
        assert_eq!(settings.engine.workers, 3);
        assert_eq!(settings.engine.file_timeout, Duration::from_secs(5));
        assert_eq!(settings.engine.run_timeout, Some(Duration::from_secs(120)));
        assert_eq!(settings.dialects, vec![Dialect::CFamily, Dialect::Legacy]);
        assert!(settings.whole_file_fallback);
        assert_eq!(settings.extra_patterns, vec!["Proprietary", "Confidential"]);
    }

    #[test]
    fn test_flags_override_file() {
        let config: Config = toml::from_str("[scan]\nworkers = 3\ndialects = [\"legacy\"]").unwrap();
        let settings = config
            .resolve(&cli(&["--workers", "7", "--dialect", "markup", "--timeout", "9"]))
            .unwrap();
        assert_eq!(settings.engine.workers, 7);
        assert_eq!(settings.dialects, vec![Dialect::Markup]);
        assert_eq!(settings.engine.file_timeout, Duration::from_secs(9));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let config: Config = toml::from_str("[scan]\nworkers = 0").unwrap();
        assert!(config.resolve(&cli(&[])).is_err());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(toml::from_str::<Config>("[scan]\nthreads = 2").is_err());
    }

    #[test]
    fn test_missing_override_is_an_error() {
        assert!(load_config(Path::new("."), Some(Path::new("/nonexistent/config.toml"))).is_err());
    }
}
