//! # Storefront Configuration
//!
//! Pricing and store settings loaded once at startup, read-only afterwards.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PLATTER_RESTAURANT_ID=7                                            │
//! │     PLATTER_TAX_RATE=8.25          (percent)                           │
//! │     PLATTER_DELIVERY_FEE=3.50      (currency units)                    │
//! │     PLATTER_ORDER_TYPE=takeaway                                        │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/platter/platter.toml (Linux)                             │
//! │     ~/Library/Application Support/com.platter.storefront/... (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     restaurant 1, 10% tax, $5.00 delivery, stock ×10 / ×1              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! restaurant_id = 1
//! currency_symbol = "$"
//!
//! [pricing]
//! tax_rate_bps = 1000       # 10%
//! delivery_fee_cents = 500  # $5.00
//!
//! [stock]
//! ample_multiplier = 10
//! sufficient_multiplier = 1
//!
//! [checkout]
//! default_order_type = "delivery"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use platter_core::totals::{DEFAULT_DELIVERY_FEE_CENTS, DEFAULT_TAX_RATE_BPS};
use platter_core::{Money, OrderType, PricingConfig, StockThresholds, TaxRate};

use crate::error::{ConfigError, ConfigResult};

pub const ENV_RESTAURANT_ID: &str = "PLATTER_RESTAURANT_ID";
pub const ENV_TAX_RATE: &str = "PLATTER_TAX_RATE";
pub const ENV_DELIVERY_FEE: &str = "PLATTER_DELIVERY_FEE";
pub const ENV_ORDER_TYPE: &str = "PLATTER_ORDER_TYPE";

// =============================================================================
// Store Settings
// =============================================================================

/// Which restaurant this storefront sells for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Restaurant the orders are placed against.
    #[serde(default = "default_restaurant_id")]
    pub restaurant_id: i64,

    /// Symbol used by `format_currency`.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_restaurant_id() -> i64 {
    1
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            restaurant_id: default_restaurant_id(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

// =============================================================================
// Pricing Settings
// =============================================================================

/// Checkout pricing, stored in integer units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSettings {
    /// Tax rate in basis points (1000 = 10%).
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,

    /// Flat delivery fee in cents.
    #[serde(default = "default_delivery_fee_cents")]
    pub delivery_fee_cents: i64,
}

fn default_tax_rate_bps() -> u32 {
    DEFAULT_TAX_RATE_BPS
}

fn default_delivery_fee_cents() -> i64 {
    DEFAULT_DELIVERY_FEE_CENTS
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            tax_rate_bps: default_tax_rate_bps(),
            delivery_fee_cents: default_delivery_fee_cents(),
        }
    }
}

// =============================================================================
// Stock Settings
// =============================================================================

/// Multipliers used to classify stock in the dish-mapping preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSettings {
    #[serde(default = "default_ample_multiplier")]
    pub ample_multiplier: u32,

    #[serde(default = "default_sufficient_multiplier")]
    pub sufficient_multiplier: u32,
}

fn default_ample_multiplier() -> u32 {
    StockThresholds::DEFAULT_AMPLE_MULTIPLIER
}

fn default_sufficient_multiplier() -> u32 {
    StockThresholds::DEFAULT_SUFFICIENT_MULTIPLIER
}

impl Default for StockSettings {
    fn default() -> Self {
        StockSettings {
            ample_multiplier: default_ample_multiplier(),
            sufficient_multiplier: default_sufficient_multiplier(),
        }
    }
}

// =============================================================================
// Checkout Settings
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CheckoutSettings {
    /// Order type used when the checkout request does not name one.
    #[serde(default)]
    pub default_order_type: OrderType,
}

// =============================================================================
// Main Storefront Configuration
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub pricing: PricingSettings,

    #[serde(default)]
    pub stock: StockSettings,

    #[serde(default)]
    pub checkout: CheckoutSettings,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (platter.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a config document. Missing sections and keys take defaults.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Storefront config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store.restaurant_id <= 0 {
            return Err(ConfigError::Invalid(
                "restaurant_id must be greater than 0".into(),
            ));
        }

        if self.store.currency_symbol.trim().is_empty() {
            return Err(ConfigError::Invalid("currency_symbol must not be empty".into()));
        }

        self.pricing_config()?;
        self.stock_thresholds()?;

        Ok(())
    }

    /// Applies `PLATTER_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any variable source.
    ///
    /// Unparseable values are logged and skipped; the file or default value
    /// stays in place.
    pub fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(id) = var(ENV_RESTAURANT_ID) {
            match id.trim().parse::<i64>() {
                Ok(parsed) => {
                    debug!(restaurant_id = parsed, "Overriding restaurant ID from environment");
                    self.store.restaurant_id = parsed;
                }
                Err(_) => warn!(value = %id, "Ignoring invalid {}", ENV_RESTAURANT_ID),
            }
        }

        if let Some(rate) = var(ENV_TAX_RATE) {
            match TaxRate::parse_percentage(&rate) {
                Ok(parsed) => {
                    debug!(tax_rate_bps = parsed.bps(), "Overriding tax rate from environment");
                    self.pricing.tax_rate_bps = parsed.bps();
                }
                Err(e) => warn!(value = %rate, "Ignoring invalid {}: {}", ENV_TAX_RATE, e),
            }
        }

        if let Some(fee) = var(ENV_DELIVERY_FEE) {
            match Money::parse(&fee) {
                Ok(parsed) => {
                    debug!(delivery_fee = %parsed, "Overriding delivery fee from environment");
                    self.pricing.delivery_fee_cents = parsed.cents();
                }
                Err(e) => warn!(value = %fee, "Ignoring invalid {}: {}", ENV_DELIVERY_FEE, e),
            }
        }

        if let Some(order_type) = var(ENV_ORDER_TYPE) {
            match order_type.parse::<OrderType>() {
                Ok(parsed) => {
                    debug!(order_type = %parsed, "Overriding order type from environment");
                    self.checkout.default_order_type = parsed;
                }
                Err(e) => warn!("Ignoring invalid {}: {}", ENV_ORDER_TYPE, e),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "platter", "storefront")
            .map(|dirs| dirs.config_dir().join("platter.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Tax rate and delivery fee as the core calculator expects them.
    pub fn pricing_config(&self) -> ConfigResult<PricingConfig> {
        PricingConfig::new(
            TaxRate::from_bps(self.pricing.tax_rate_bps),
            Money::from_cents(self.pricing.delivery_fee_cents),
        )
        .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Stock multipliers as the mapping previewer expects them.
    pub fn stock_thresholds(&self) -> ConfigResult<StockThresholds> {
        StockThresholds::new(self.stock.ample_multiplier, self.stock.sufficient_multiplier)
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn restaurant_id(&self) -> i64 {
        self.store.restaurant_id
    }

    /// Formats an amount with the configured currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use platter_core::Money;
    /// use platter_storefront::StorefrontConfig;
    ///
    /// let config = StorefrontConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// assert_eq!(config.format_currency(Money::from_cents(-5)), "-$0.05");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        format!(
            "{}{}{}.{:02}",
            if amount.is_negative() { "-" } else { "" },
            self.store.currency_symbol,
            amount.dollars().abs(),
            amount.cents_part().abs()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn overrides(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config_matches_checkout_rules() {
        let config = StorefrontConfig::default();
        assert_eq!(config.restaurant_id(), 1);
        assert_eq!(config.pricing.tax_rate_bps, 1000);
        assert_eq!(config.pricing.delivery_fee_cents, 500);
        assert_eq!(config.checkout.default_order_type, OrderType::Delivery);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = StorefrontConfig::from_toml(
            r#"
            [pricing]
            tax_rate_bps = 825
            "#,
        )
        .unwrap();

        assert_eq!(config.pricing.tax_rate_bps, 825);
        assert_eq!(config.pricing.delivery_fee_cents, 500);
        assert_eq!(config.store.currency_symbol, "$");
        assert_eq!(config.stock.ample_multiplier, 10);
    }

    #[test]
    fn test_full_toml() {
        let config = StorefrontConfig::from_toml(
            r#"
            [store]
            restaurant_id = 7
            currency_symbol = "€"

            [pricing]
            tax_rate_bps = 2000
            delivery_fee_cents = 0

            [stock]
            ample_multiplier = 5
            sufficient_multiplier = 2

            [checkout]
            default_order_type = "takeaway"
            "#,
        )
        .unwrap();

        assert_eq!(config.restaurant_id(), 7);
        assert_eq!(config.checkout.default_order_type, OrderType::Takeaway);
        assert_eq!(config.stock_thresholds().unwrap(), StockThresholds::new(5, 2).unwrap());
        assert_eq!(config.format_currency(Money::from_cents(250)), "€2.50");
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = StorefrontConfig::default();
        config.store.restaurant_id = 42;
        config.pricing.delivery_fee_cents = 350;

        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(StorefrontConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = StorefrontConfig::from_toml("[pricing\ntax_rate_bps = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = StorefrontConfig::default();
        config.apply_overrides(overrides(&[
            (ENV_RESTAURANT_ID, "12"),
            (ENV_TAX_RATE, "8.25"),
            (ENV_DELIVERY_FEE, "3.5"),
            (ENV_ORDER_TYPE, "dine-in"),
        ]));

        assert_eq!(config.restaurant_id(), 12);
        assert_eq!(config.pricing.tax_rate_bps, 825);
        assert_eq!(config.pricing.delivery_fee_cents, 350);
        assert_eq!(config.checkout.default_order_type, OrderType::DineIn);
    }

    #[test]
    fn test_invalid_env_values_are_skipped() {
        let mut config = StorefrontConfig::default();
        config.apply_overrides(overrides(&[
            (ENV_RESTAURANT_ID, "abc"),
            (ENV_TAX_RATE, "101"),
            (ENV_DELIVERY_FEE, "5.001"),
            (ENV_ORDER_TYPE, "drone"),
        ]));

        assert_eq!(config, StorefrontConfig::default());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = StorefrontConfig::default();
        config.store.restaurant_id = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = StorefrontConfig::default();
        config.pricing.tax_rate_bps = 10_001;
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.pricing.delivery_fee_cents = -1;
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.stock.sufficient_multiplier = 0;
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.store.currency_symbol = " ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_format_currency() {
        let config = StorefrontConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::from_cents(100)), "$1.00");
        assert_eq!(config.format_currency(Money::from_cents(1)), "$0.01");
        assert_eq!(config.format_currency(Money::zero()), "$0.00");
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");
    }
}
