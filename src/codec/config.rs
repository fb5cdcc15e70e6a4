use serde::{Deserialize, Serialize};

use crate::core::{BasicSettings, Locale, LocaleSnapshot, RuleSet};
use crate::error::{RuleError, RuleResult};

/// Codec and editor configuration.
///
/// Serializable so hosts can persist it next to their own settings; every
/// field has a default, so partial documents load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodecConfig {
    #[serde(default = "default_max_settings_per_side")]
    pub max_settings_per_side: usize,
    #[serde(default = "default_constant")]
    pub default_constant: f64,
    #[serde(default)]
    pub locale: Locale,
    #[serde(default = "default_interval")]
    pub default_interval: String,
    #[serde(default = "default_symbol")]
    pub default_symbol: String,
    #[serde(default)]
    pub default_quantity: f64,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_settings_per_side: default_max_settings_per_side(),
            default_constant: default_constant(),
            locale: Locale::default(),
            default_interval: default_interval(),
            default_symbol: default_symbol(),
            default_quantity: 0.0,
        }
    }
}

impl CodecConfig {
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    #[must_use]
    pub fn with_max_settings_per_side(mut self, max_settings_per_side: usize) -> Self {
        self.max_settings_per_side = max_settings_per_side;
        self
    }

    #[must_use]
    pub fn with_default_constant(mut self, default_constant: f64) -> Self {
        self.default_constant = default_constant;
        self
    }

    #[must_use]
    pub fn with_default_basic(
        mut self,
        interval: impl Into<String>,
        quantity: f64,
        symbol: impl Into<String>,
    ) -> Self {
        self.default_interval = interval.into();
        self.default_quantity = quantity;
        self.default_symbol = symbol.into();
        self
    }

    pub fn validate(self) -> RuleResult<Self> {
        if self.max_settings_per_side == 0 {
            return Err(RuleError::InvalidData(
                "max_settings_per_side must be >= 1".to_owned(),
            ));
        }
        if !self.default_constant.is_finite() {
            return Err(RuleError::InvalidData(
                "default_constant must be finite".to_owned(),
            ));
        }
        if !self.default_quantity.is_finite() || self.default_quantity < 0.0 {
            return Err(RuleError::InvalidData(
                "default_quantity must be finite and >= 0".to_owned(),
            ));
        }
        if self.default_interval.trim().is_empty() {
            return Err(RuleError::InvalidData(
                "default_interval must not be empty".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn default_basic(&self) -> BasicSettings {
        BasicSettings::new(
            self.default_interval.clone(),
            self.default_quantity,
            self.default_symbol.clone(),
        )
    }

    /// Fallback rule set used when nothing valid was stored.
    #[must_use]
    pub fn default_rule_set(&self, snapshot: &LocaleSnapshot) -> RuleSet {
        RuleSet::default_for(snapshot, self.default_basic(), self.default_constant)
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> RuleResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| RuleError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> RuleResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| RuleError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()
    }
}

fn default_max_settings_per_side() -> usize {
    4
}

fn default_constant() -> f64 {
    20.0
}

fn default_interval() -> String {
    "15m".to_owned()
}

fn default_symbol() -> String {
    "BTCUSDT".to_owned()
}
