//! Layered probe configuration.
//!
//! Values are merged in this order, later layers winning:
//!
//! 1. built-in defaults
//! 2. an optional settings file (`--config`, any format the `config` crate
//!    infers from the extension)
//! 3. environment variables prefixed with `TXWATCH_` (e.g. `TXWATCH_WARNING`)
//! 4. command-line flags
//!
//! ```toml
//! warning = 30
//! critical = 60
//! time_period = 300
//! application = "europa"
//! default_log_file = "/var/log/messages"
//! ```

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::{Thresholds, TimeWindow, DEFAULT_APPLICATION};
use crate::error::ProbeError;

/// Log read when neither `--log-file` nor `log_file` is given.
pub const DEFAULT_LOG_FILE: &str = "/var/log/syslog";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "TXWATCH";

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub warning: Option<f64>,
    pub critical: Option<f64>,
    pub time_period: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub application: Option<String>,
}

/// Merged settings before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub warning: Option<f64>,
    pub critical: Option<f64>,
    pub time_period: Option<u64>,
    /// Explicit log path; wins over `default_log_file`.
    pub log_file: Option<PathBuf>,
    /// Platform default log path, resolved once at startup.
    pub default_log_file: PathBuf,
    pub application: String,
}

/// Validated settings ready to build a probe from.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeSettings {
    pub thresholds: Thresholds,
    pub window: TimeWindow,
    pub log_file: PathBuf,
    pub application: String,
}

impl Settings {
    /// Merge every configuration layer.
    pub fn load(config_path: Option<&Path>, overrides: &Overrides) -> Result<Self, ProbeError> {
        let mut builder = Config::builder()
            .set_default("default_log_file", DEFAULT_LOG_FILE)?
            .set_default("application", DEFAULT_APPLICATION)?;

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .set_override_option("warning", overrides.warning)?
            .set_override_option("critical", overrides.critical)?
            .set_override_option("time_period", overrides.time_period.map(|secs| secs as i64))?
            .set_override_option(
                "log_file",
                overrides
                    .log_file
                    .as_ref()
                    .map(|path| path.to_string_lossy().into_owned()),
            )?
            .set_override_option("application", overrides.application.clone())?
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check that every required value is present and consistent.
    pub fn resolve(self) -> Result<ProbeSettings, ProbeError> {
        let warning = self.warning.ok_or_else(|| missing("warning"))?;
        let critical = self.critical.ok_or_else(|| missing("critical"))?;
        let time_period = self.time_period.ok_or_else(|| missing("time-period"))?;

        Ok(ProbeSettings {
            thresholds: Thresholds::new(warning, critical)?,
            window: TimeWindow::from_secs(time_period),
            log_file: self.log_file.unwrap_or(self.default_log_file),
            application: self.application,
        })
    }
}

fn missing(flag: &str) -> ProbeError {
    ProbeError::Usage(format!("--{} is required", flag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn full_overrides() -> Overrides {
        Overrides {
            warning: Some(30.0),
            critical: Some(60.0),
            time_period: Some(300),
            ..Default::default()
        }
    }

    fn toml_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_defaults_from_flags_only() {
        let settings = Settings::load(None, &full_overrides()).unwrap().resolve().unwrap();
        assert_eq!(settings.thresholds, Thresholds::new(30.0, 60.0).unwrap());
        assert_eq!(settings.window, TimeWindow::from_secs(300));
        assert_eq!(settings.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert_eq!(settings.application, DEFAULT_APPLICATION);
    }

    #[test]
    fn test_missing_required_is_usage_error() {
        let overrides = Overrides {
            warning: Some(30.0),
            critical: Some(60.0),
            ..Default::default()
        };
        let err = Settings::load(None, &overrides).unwrap().resolve().unwrap_err();
        assert!(matches!(err, ProbeError::Usage(ref msg) if msg.contains("time-period")));
    }

    #[test]
    fn test_inverted_thresholds_is_usage_error() {
        let overrides = Overrides {
            warning: Some(90.0),
            ..full_overrides()
        };
        let err = Settings::load(None, &overrides).unwrap().resolve().unwrap_err();
        assert!(err.is_usage());
    }

    #[test]
    fn test_file_supplies_values() {
        let file = toml_file(
            r#"
            warning = 5
            critical = 10
            time_period = 120
            application = "payments"
            default_log_file = "/var/log/messages"
            "#,
        );
        let settings = Settings::load(Some(file.path()), &Overrides::default())
            .unwrap()
            .resolve()
            .unwrap();
        assert_eq!(settings.thresholds, Thresholds::new(5.0, 10.0).unwrap());
        assert_eq!(settings.window.as_secs(), 120);
        assert_eq!(settings.application, "payments");
        assert_eq!(settings.log_file, PathBuf::from("/var/log/messages"));
    }

    #[test]
    fn test_flags_override_file() {
        let file = toml_file(
            r#"
            warning = 5
            critical = 10
            time_period = 120
            log_file = "/srv/europa/tx.log"
            "#,
        );
        let overrides = Overrides {
            critical: Some(20.0),
            log_file: Some(PathBuf::from("/tmp/tx.log")),
            ..Default::default()
        };
        let settings = Settings::load(Some(file.path()), &overrides)
            .unwrap()
            .resolve()
            .unwrap();
        assert_eq!(settings.thresholds, Thresholds::new(5.0, 20.0).unwrap());
        assert_eq!(settings.log_file, PathBuf::from("/tmp/tx.log"));
    }

    #[test]
    fn test_missing_config_file_is_config_error() {
        let err = Settings::load(Some(Path::new("/nonexistent/txwatch.toml")), &full_overrides())
            .unwrap_err();
        assert!(matches!(err, ProbeError::Config(_)));
    }
}
