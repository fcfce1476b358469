//! User settings for Simple Bank
//!
//! Display preferences and the limits applied to newly opened checking
//! accounts.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::BankPaths;
use crate::error::BankError;
use crate::models::{CheckingPolicy, Money};

/// User settings for Simple Bank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol shown in statements and messages
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Timestamp format for statements (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Whether the menu uses colors and clears the screen
    #[serde(default = "default_color")]
    pub color: bool,

    /// Limits for newly opened checking accounts
    #[serde(default)]
    pub checking: CheckingPolicy,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "R$".to_string()
}

fn default_date_format() -> String {
    "%d/%m/%Y %H:%M".to_string()
}

fn default_color() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            color: default_color(),
            checking: CheckingPolicy::default(),
        }
    }
}

impl Settings {
    /// Format an amount with the configured currency symbol
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// Check the settings for values the bank cannot operate with
    pub fn validate(&self) -> Result<(), BankError> {
        if !self.checking.per_operation_limit.is_positive() {
            return Err(BankError::Config(
                "checking.per_operation_limit must be greater than zero".into(),
            ));
        }
        if self.checking.daily_withdrawal_limit == 0 {
            return Err(BankError::Config(
                "checking.daily_withdrawal_limit must be greater than zero".into(),
            ));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(BankError::Config(format!(
                "date_format '{}' is not a valid strftime format",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &BankPaths) -> Result<Self, BankError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| BankError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| BankError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BankPaths) -> Result<(), BankError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BankError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BankError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "R$");
        assert!(settings.color);
        assert_eq!(settings.checking.per_operation_limit.cents(), 50000);
        assert_eq!(settings.checking.daily_withdrawal_limit, 3);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BankPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.color = false;
        settings.checking.daily_withdrawal_limit = 5;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"color": false}"#).unwrap();
        assert!(!settings.color);
        assert_eq!(settings.date_format, "%d/%m/%Y %H:%M");
        assert_eq!(settings.checking, CheckingPolicy::default());
    }

    #[test]
    fn test_invalid_limits_rejected_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BankPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(
            paths.settings_file(),
            r#"{"checking": {"per_operation_limit": 0, "daily_withdrawal_limit": 3}}"#,
        )
        .unwrap();

        let result = Settings::load_or_create(&paths);
        assert!(matches!(result, Err(BankError::Config(_))));
    }

    #[test]
    fn test_invalid_date_format() {
        let mut settings = Settings::default();
        settings.date_format = "%Y-%m-%d %Q".into();
        assert!(matches!(settings.validate(), Err(BankError::Config(_))));
    }

    #[test]
    fn test_format_money() {
        let mut settings = Settings::default();
        assert_eq!(settings.format_money(Money::from_cents(150000)), "R$ 1500.00");
        settings.currency_symbol = "$".into();
        assert_eq!(settings.format_money(Money::from_cents(5)), "$ 0.05");
    }
}
