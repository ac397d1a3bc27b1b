//! Two-currency account
//!
//! Holds the position either fully in the base currency (`currency1`) or
//! fully in the quote currency (`currency2`).

use serde::Serialize;

use crate::error::{FxError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Account {
    currency1: f64,
    currency2: f64,
    balance: f64,
    last_exchange_rate: f64,
}

impl Account {
    /// Create an account with the whole starting balance in the base currency
    pub fn new(starting_balance: f64) -> Self {
        Self {
            currency1: starting_balance,
            currency2: 0.0,
            balance: starting_balance,
            last_exchange_rate: 1.0,
        }
    }

    /// Create an account from raw balances. Not validated; see [`Account::validate`].
    ///
    /// The balance is valued at the initial rate of 1.0.
    pub fn from_balances(currency1: f64, currency2: f64) -> Self {
        let mut account = Self {
            currency1,
            currency2,
            balance: 0.0,
            last_exchange_rate: 1.0,
        };
        account.calculate_balance(1.0);
        account
    }

    /// Amount held in the base currency
    pub fn currency1(&self) -> f64 {
        self.currency1
    }

    /// Amount held in the quote currency
    pub fn currency2(&self) -> f64 {
        self.currency2
    }

    /// Balance as of the last `calculate_balance` call
    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn last_exchange_rate(&self) -> f64 {
        self.last_exchange_rate
    }

    /// Value the account in base-currency terms at `exchange_rate`
    pub fn calculate_balance(&mut self, exchange_rate: f64) -> f64 {
        self.balance = if self.currency1 == 0.0 {
            self.currency2 / exchange_rate
        } else {
            self.currency1
        };
        self.last_exchange_rate = exchange_rate;
        self.balance
    }

    /// Convert the whole base holding into the quote currency
    pub fn transfer_to_quote(&mut self, exchange_rate: f64) {
        self.currency2 = self.currency1 * exchange_rate;
        self.currency1 = 0.0;
        self.last_exchange_rate = exchange_rate;
    }

    /// Convert the whole quote holding into the base currency
    pub fn transfer_to_base(&mut self, exchange_rate: f64) {
        self.currency1 = self.currency2 / exchange_rate;
        self.currency2 = 0.0;
        self.last_exchange_rate = exchange_rate;
    }

    pub(crate) fn charge_base(&mut self, fee: f64) {
        self.currency1 *= 1.0 - fee;
    }

    pub(crate) fn charge_quote(&mut self, fee: f64) {
        self.currency2 *= 1.0 - fee;
    }

    /// Check the single-position invariant
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("currency1", self.currency1), ("currency2", self.currency2)] {
            if !value.is_finite() || value < 0.0 {
                return Err(FxError::InvalidState(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }

        match (self.currency1 == 0.0, self.currency2 == 0.0) {
            (false, false) => Err(FxError::InvalidState(format!(
                "both currencies held at once (currency1={}, currency2={})",
                self.currency1, self.currency2
            ))),
            (true, true) => Err(FxError::InvalidState(
                "account holds nothing in either currency".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

impl Default for Account {
    fn default() -> Self {
        Self::new(2000.0)
    }
}
