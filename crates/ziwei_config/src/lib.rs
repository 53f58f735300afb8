//! Loading [`ChartConfig`] from TOML.
//!
//! A config file holds one optional `[chart]` table:
//!
//! ```toml
//! [chart]
//! leap_month = "split_at_mid_month"   # or "nominal", "following"
//! late_zi = "split_day"               # or "next_day", "same_day"
//! period_span = "decade"              # or "bureau_number"
//! ```
//!
//! Missing keys fall back to the defaults.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error as ThisError;
use tracing::debug;
use ziwei_base::ChartConfig;

/// Environment variable naming a config file when no path is given.
pub const CONFIG_ENV_VAR: &str = "ZIWEI_CONFIG";

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("cannot read config {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    #[error("toml error: {0}")]
    Parse(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    chart: ChartConfig,
}

/// Parse a config from TOML text.
pub fn parse_config(text: &str) -> Result<ChartConfig, ConfigError> {
    let file: ConfigFile = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
    Ok(file.chart)
}

/// Read and parse a config file.
pub fn load_config(path: &Path) -> Result<ChartConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let config = parse_config(&text)?;
    debug!(path = %path.display(), ?config, "loaded chart config");
    Ok(config)
}

/// Config from `path`, else from the file named by `ZIWEI_CONFIG`, else defaults.
pub fn resolve_config(path: Option<&Path>) -> Result<ChartConfig, ConfigError> {
    resolve_config_from(path, std::env::var_os(CONFIG_ENV_VAR))
}

fn resolve_config_from(
    path: Option<&Path>,
    env_path: Option<OsString>,
) -> Result<ChartConfig, ConfigError> {
    match (path, env_path) {
        (Some(p), _) => load_config(p),
        (None, Some(p)) if !p.is_empty() => load_config(Path::new(&p)),
        _ => {
            debug!("no chart config given, using defaults");
            Ok(ChartConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ziwei_base::{LateZiRule, LeapMonthRule, PeriodSpanRule};

    fn temp_config(name: &str, text: &str) -> PathBuf {
        let file = format!("ziwei_config_{}_{name}.toml", std::process::id());
        let path = std::env::temp_dir().join(file);
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn empty_text_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), ChartConfig::default());
    }

    #[test]
    fn full_chart_table() {
        let cfg = parse_config(
            r#"
            [chart]
            leap_month = "following"
            late_zi = "next_day"
            period_span = "bureau_number"
            "#,
        )
        .unwrap();
        assert_eq!(
            cfg,
            ChartConfig {
                leap_month: LeapMonthRule::Following,
                late_zi: LateZiRule::NextDay,
                period_span: PeriodSpanRule::BureauNumber,
            }
        );
    }

    #[test]
    fn partial_table_keeps_other_defaults() {
        let cfg = parse_config("[chart]\nlate_zi = \"same_day\"\n").unwrap();
        assert_eq!(cfg.late_zi, LateZiRule::SameDay);
        assert_eq!(cfg.leap_month, LeapMonthRule::SplitAtMidMonth);
    }

    #[test]
    fn unknown_value_is_parse_error() {
        let err = parse_config("[chart]\nlate_zi = \"tomorrow\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_section_is_parse_error() {
        assert!(matches!(parse_config("[display]\n"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/ziwei.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/ziwei.toml"));
    }

    #[test]
    fn explicit_path_wins_over_env() {
        let explicit = temp_config("explicit", "[chart]\nperiod_span = \"bureau_number\"\n");
        let env = temp_config("env", "[chart]\nlate_zi = \"next_day\"\n");
        let env_var = Some(env.clone().into_os_string());
        let cfg = resolve_config_from(Some(explicit.as_path()), env_var.clone()).unwrap();
        assert_eq!(cfg.period_span, PeriodSpanRule::BureauNumber);
        assert_eq!(cfg.late_zi, LateZiRule::SplitDay);

        let cfg = resolve_config_from(None, env_var).unwrap();
        assert_eq!(cfg.late_zi, LateZiRule::NextDay);

        std::fs::remove_file(explicit).unwrap();
        std::fs::remove_file(env).unwrap();
    }

    #[test]
    fn nothing_given_is_default() {
        assert_eq!(resolve_config_from(None, None).unwrap(), ChartConfig::default());
        assert_eq!(
            resolve_config_from(None, Some(OsString::new())).unwrap(),
            ChartConfig::default()
        );
    }
}
