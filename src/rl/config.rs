//! RL Configuration
//!
//! Configuration structs for the broker and the forex environment.

use serde::{Deserialize, Serialize};

use crate::domain::PriceField;

/// Broker and account parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerConfig {
    /// Starting balance, held fully in the base currency
    #[serde(default = "default_starting_balance")]
    pub starting_balance: f64,
    /// Fraction of the position deducted on each executed trade
    #[serde(default = "default_transaction_fee")]
    pub transaction_fee: f64,
}

fn default_starting_balance() -> f64 {
    2000.0
}

fn default_transaction_fee() -> f64 {
    0.01 // 1% per trade
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            starting_balance: default_starting_balance(),
            transaction_fee: default_transaction_fee(),
        }
    }
}

impl BrokerConfig {
    /// Collect every problem with the values instead of stopping at the first
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !self.starting_balance.is_finite() || self.starting_balance <= 0.0 {
            errors.push(format!(
                "starting_balance must be finite and positive, got {}",
                self.starting_balance
            ));
        }

        if !(0.0..1.0).contains(&self.transaction_fee) {
            errors.push(format!(
                "transaction_fee must be in [0, 1), got {}",
                self.transaction_fee
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Environment driver parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Lookback window lengths, one observation input per window
    #[serde(default = "default_windows")]
    pub windows: Vec<usize>,
    /// Candle price used as the exchange rate of a step
    #[serde(default)]
    pub price_field: PriceField,
}

fn default_windows() -> Vec<usize> {
    vec![64]
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            windows: default_windows(),
            price_field: PriceField::default(),
        }
    }
}

impl EnvConfig {
    /// Largest configured window, which is also the first tradable index
    pub fn max_window(&self) -> usize {
        self.windows.iter().copied().max().unwrap_or(0)
    }

    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.windows.is_empty() {
            errors.push("windows must contain at least one window".to_string());
        }

        if self.windows.iter().any(|w| *w == 0) {
            errors.push("windows must all be positive".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
