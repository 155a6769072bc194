use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Settings that `config set` accepts, in display order.
pub const KEYS: [&str; 8] = [
    "locale",
    "currency",
    "schedule_year_span",
    "payments_per_page",
    "ui_color_enabled",
    "currency_precision",
    "last_opened_portfolio",
    "default_data_root",
];

/// User preferences for the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    /// Years shown by `calendar` when no year is given, counted from the current one.
    #[serde(default = "Config::default_schedule_year_span")]
    pub schedule_year_span: u8,
    #[serde(default = "Config::default_payments_per_page")]
    pub payments_per_page: usize,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default = "Config::default_currency_precision")]
    pub currency_precision: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_opened_portfolio: Option<PathBuf>,
    /// Directory for portfolio files. Defaults to `~/Documents/Rentbook`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "EUR".into(),
            schedule_year_span: Self::default_schedule_year_span(),
            payments_per_page: Self::default_payments_per_page(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            currency_precision: Self::default_currency_precision(),
            last_opened_portfolio: None,
            default_data_root: None,
        }
    }
}

impl Config {
    pub fn default_schedule_year_span() -> u8 {
        1
    }

    pub fn default_payments_per_page() -> usize {
        20
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_currency_precision() -> u8 {
        2
    }

    pub fn resolve_data_root(&self) -> PathBuf {
        if let Some(path) = &self.default_data_root {
            return path.clone();
        }

        let base = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("Rentbook")
    }

    /// Current value of a setting, rendered for display.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "locale" => self.locale.clone(),
            "currency" => self.currency.clone(),
            "schedule_year_span" => self.schedule_year_span.to_string(),
            "payments_per_page" => self.payments_per_page.to_string(),
            "ui_color_enabled" => self.ui_color_enabled.to_string(),
            "currency_precision" => self.currency_precision.to_string(),
            "last_opened_portfolio" => display_path(self.last_opened_portfolio.as_ref()),
            "default_data_root" => display_path(self.default_data_root.as_ref()),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        };
        Ok(value)
    }

    /// Parses `value` and assigns it to `key`. `none` clears optional paths.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match key {
            "locale" => self.locale = non_empty(key, value)?,
            "currency" => {
                let code = non_empty(key, value)?.to_ascii_uppercase();
                if code.len() != 3 || !code.chars().all(|ch| ch.is_ascii_alphabetic()) {
                    return Err(invalid(key, "expected a three-letter currency code"));
                }
                self.currency = code;
            }
            "schedule_year_span" => {
                let span: u8 = parse(key, value)?;
                if !(1..=10).contains(&span) {
                    return Err(invalid(key, "must be between 1 and 10"));
                }
                self.schedule_year_span = span;
            }
            "payments_per_page" => {
                let per_page: usize = parse(key, value)?;
                if per_page == 0 {
                    return Err(invalid(key, "must be at least 1"));
                }
                self.payments_per_page = per_page;
            }
            "ui_color_enabled" => {
                self.ui_color_enabled = match value.to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" | "1" => true,
                    "false" | "off" | "no" | "0" => false,
                    _ => return Err(invalid(key, "expected on/off")),
                }
            }
            "currency_precision" => {
                let precision: u8 = parse(key, value)?;
                if precision > 6 {
                    return Err(invalid(key, "must be between 0 and 6"));
                }
                self.currency_precision = precision;
            }
            "last_opened_portfolio" => self.last_opened_portfolio = optional_path(value),
            "default_data_root" => self.default_data_root = optional_path(value),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

fn display_path(path: Option<&PathBuf>) -> String {
    path.map(|path| path.display().to_string())
        .unwrap_or_else(|| "(none)".into())
}

fn optional_path(value: &str) -> Option<PathBuf> {
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

fn non_empty(key: &str, value: &str) -> Result<String, ConfigError> {
    if value.is_empty() {
        Err(invalid(key, "cannot be empty"))
    } else {
        Ok(value.to_string())
    }
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| invalid(key, &format!("`{value}` is not a number")))
}

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_validates_values() {
        let mut cfg = Config::default();
        cfg.set("currency", "dkk").unwrap();
        assert_eq!(cfg.currency, "DKK");
        assert!(cfg.set("currency", "kroner").is_err());
        assert!(cfg.set("payments_per_page", "0").is_err());
        cfg.set("ui_color_enabled", "off").unwrap();
        assert!(!cfg.ui_color_enabled);
        assert!(matches!(cfg.set("theme", "dark"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn every_key_is_readable() {
        let cfg = Config::default();
        for key in KEYS {
            assert!(cfg.get(key).is_ok(), "{key}");
        }
        assert_eq!(cfg.get("default_data_root").unwrap(), "(none)");
    }

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: Config =
            serde_json::from_str(r#"{"locale":"da-DK","currency":"DKK"}"#).expect("parse");
        assert_eq!(cfg.payments_per_page, 20);
        assert_eq!(cfg.currency_precision, 2);
        assert!(cfg.ui_color_enabled);
    }
}
