use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::Deserialize;
use std::{fs, path::PathBuf};

#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute path of the pipe-delimited transaction file.
    pub ledger_file: PathBuf,
    /// Display format for dates in CLI output. Persisted lines always use `%Y-%m-%d`.
    pub date_format: String,
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    ledger_file: Option<PathBuf>,
    date_format: Option<String>,
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native)
    /// and apply defaults for anything left unset.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config().unwrap_or(FileConfig {
            ledger_file: None,
            date_format: None,
        });

        let ledger_file = file_config.ledger_file.unwrap_or_else(Self::default_ledger_file);
        let date_format = file_config.date_format.unwrap_or_else(|| "%Y-%m-%d".to_string());

        Ok(Self {
            ledger_file,
            date_format,
        })
    }

    /// Default ledger file: `{data_dir}/tally/transactions.csv`
    /// - macOS:   `~/Library/Application Support/tally/transactions.csv`
    /// - Linux:   `$XDG_DATA_HOME/tally/...` or `~/.local/share/tally/...`
    /// - Windows: `%APPDATA%\tally\...`
    fn default_ledger_file() -> PathBuf {
        let mut p = if let Some(base) = BaseDirs::new() {
            base.data_dir().to_path_buf()
        } else {
            PathBuf::from(".")
        };
        p.push("tally");
        p.push("transactions.csv");
        p
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b.home_dir().join(".config").join("tally").join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("tally").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig {
            ledger_file: None,
            date_format: None,
        })
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }
}

/// Test helper to create a default `Config` for testing purposes.
///
/// This is the single source of truth for test configuration.
/// If you add a field to `Config`, you only need to update it here.
#[cfg(test)]
pub(crate) fn mk_config(ledger_file: PathBuf) -> Config {
    Config {
        ledger_file,
        date_format: "%Y-%m-%d".to_string(),
    }
}
