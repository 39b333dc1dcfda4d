//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the application works out of the box.
//! Bindings are validated up front; a bad value is a hard startup error, not a
//! silently skipped widget.

use crate::calendar::store::EventColor;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown event color {0:?} (expected one of green, blue, red, orange, purple)")]
    UnknownColor(String),
    #[error("{0} must be at least 1 ms")]
    ZeroInterval(&'static str),
}

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
    #[serde(default)]
    pub animator: AnimatorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Fail fast on bindings the widgets cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if EventColor::from_name(&self.calendar.default_color).is_none() {
            return Err(ConfigError::UnknownColor(self.calendar.default_color.clone()));
        }
        if self.ui.refresh_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("ui.refresh_interval_ms"));
        }
        if self.animator.spin_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("animator.spin_interval_ms"));
        }
        if self.animator.pulse_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("animator.pulse_interval_ms"));
        }
        Ok(())
    }

    pub fn default_event_color(&self) -> EventColor {
        EventColor::from_name(&self.calendar.default_color).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Interval of the background refresh tick.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: default_refresh_interval(),
        }
    }
}

fn default_refresh_interval() -> u64 {
    250
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Color given to events saved without an explicit choice.
    #[serde(default = "default_event_color")]
    pub default_color: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            default_color: default_event_color(),
        }
    }
}

fn default_event_color() -> String {
    "green".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    /// Instances created at startup.
    #[serde(default = "default_progress_items")]
    pub items: Vec<ProgressItemConfig>,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            items: default_progress_items(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressItemConfig {
    pub label: String,
    #[serde(default)]
    pub numerator: i64,
    #[serde(default = "default_denominator")]
    pub denominator: i64,
}

fn default_denominator() -> i64 {
    1
}

fn default_progress_items() -> Vec<ProgressItemConfig> {
    vec![ProgressItemConfig {
        label: "Progress Item 1".into(),
        numerator: 0,
        denominator: 1,
    }]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimatorConfig {
    #[serde(default = "default_spin_interval")]
    pub spin_interval_ms: u64,
    #[serde(default = "default_pulse_interval")]
    pub pulse_interval_ms: u64,
    /// Start the animation at launch instead of waiting for the first input.
    #[serde(default)]
    pub autostart: bool,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            spin_interval_ms: default_spin_interval(),
            pulse_interval_ms: default_pulse_interval(),
            autostart: false,
        }
    }
}

fn default_spin_interval() -> u64 {
    50
}

fn default_pulse_interval() -> u64 {
    1000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Log file path; `~` expands to the home directory.
    #[serde(default = "default_log_file")]
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            file: default_log_file(),
        }
    }
}

fn default_log_file() -> String {
    "~/.local/share/daydeck/daydeck.log".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = AppConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.default_event_color(), EventColor::Green);
        assert_eq!(config.animator.spin_interval_ms, 50);
        assert_eq!(config.animator.pulse_interval_ms, 1000);
    }

    #[test]
    fn test_unknown_color_rejected() {
        let mut config = AppConfig::default();
        config.calendar.default_color = "chartreuse".into();
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnknownColor("chartreuse".into()))
        );
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut config = AppConfig::default();
        config.animator.spin_interval_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroInterval(_))));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [animator]
            autostart = true

            [[progress.items]]
            label = "reading"
            numerator = 3
            denominator = 12
            "#,
        )
        .unwrap();
        assert!(config.animator.autostart);
        assert_eq!(config.animator.spin_interval_ms, 50);
        assert_eq!(config.progress.items.len(), 1);
        assert_eq!(config.progress.items[0].denominator, 12);
        assert_eq!(config.calendar.default_color, "green");
    }
}
