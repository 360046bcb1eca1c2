use std::path::PathBuf;

use thiserror::Error;

use super::EnvironmentReader;

pub const DEFAULT_CONSOLE_URL: &str = "https://twistlock.tools.mspenv.io";
pub const DEFAULT_REPORT_DIR: &str = "/tmp";

pub const CONSOLE_URL_ENV_VAR: &str = "TWISTLOCK_CONSOLE";
pub const SCANNER_PATH_ENV_VAR: &str = "TWISTCLI_PATH";
pub const REPORT_DIR_ENV_VAR: &str = "TWISTSCAN_REPORT_DIR";
pub const INSECURE_TLS_ENV_VAR: &str = "TWISTLOCK_INSECURE_TLS";
pub const KEEP_REPORT_ENV_VAR: &str = "TWISTSCAN_KEEP_REPORT";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the scan console, used for the twistcli download and as
    /// the `--address` of the scan.
    pub console_url: String,
    pub scanner_path: PathBuf,
    pub report_dir: PathBuf,
    /// Skip TLS certificate verification when downloading twistcli.
    pub accept_invalid_certs: bool,
    pub keep_report: bool,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid boolean value for {key}: {value:?}")]
    InvalidBoolean { key: &'static str, value: String },

    #[error("env var {0} is set but empty")]
    EmptyValue(&'static str),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            console_url: DEFAULT_CONSOLE_URL.to_string(),
            scanner_path: default_scanner_path(),
            report_dir: PathBuf::from(DEFAULT_REPORT_DIR),
            accept_invalid_certs: false,
            keep_report: false,
        }
    }
}

fn default_scanner_path() -> PathBuf {
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("bin");
    path.push("twistcli");
    path
}

impl Config {
    pub fn from_env(environment: &dyn EnvironmentReader) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(console_url) = non_empty(environment, CONSOLE_URL_ENV_VAR)? {
            config.console_url = console_url;
        }
        if let Some(scanner_path) = non_empty(environment, SCANNER_PATH_ENV_VAR)? {
            config.scanner_path = PathBuf::from(scanner_path);
        }
        if let Some(report_dir) = non_empty(environment, REPORT_DIR_ENV_VAR)? {
            config.report_dir = PathBuf::from(report_dir);
        }
        if let Some(value) = environment.read(INSECURE_TLS_ENV_VAR) {
            config.accept_invalid_certs = parse_bool(INSECURE_TLS_ENV_VAR, &value)?;
        }
        if let Some(value) = environment.read(KEEP_REPORT_ENV_VAR) {
            config.keep_report = parse_bool(KEEP_REPORT_ENV_VAR, &value)?;
        }

        Ok(config)
    }
}

fn non_empty(
    environment: &dyn EnvironmentReader,
    key: &'static str,
) -> Result<Option<String>, ConfigError> {
    match environment.read(key) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::EmptyValue(key)),
        other => Ok(other),
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBoolean {
            key,
            value: value.to_string(),
        }),
    }
}
