//! Broker
//!
//! Executes fee-charged transfers on an owned [`Account`] and turns the
//! resulting balance change into a reward.

use tracing::{debug, warn};

use super::account::Account;
use super::action::ForexAction;
use super::reward::symmetric_return;
use crate::error::{FxError, Result};
use crate::rl::config::BrokerConfig;

#[derive(Debug, Clone)]
pub struct Broker {
    account: Account,
    transaction_fee: f64,
    previous_balance: f64,
    order_number: usize,
}

impl Broker {
    /// Create a broker with a fresh account from config
    pub fn new(config: &BrokerConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|errors| FxError::Validation(errors.join("; ")))?;
        Self::with_account(Account::new(config.starting_balance), config.transaction_fee)
    }

    /// Create a broker around an existing account
    pub fn with_account(account: Account, transaction_fee: f64) -> Result<Self> {
        if !(0.0..1.0).contains(&transaction_fee) {
            return Err(FxError::Validation(format!(
                "transaction_fee must be in [0, 1), got {transaction_fee}"
            )));
        }
        account.validate()?;

        Ok(Self {
            previous_balance: account.currency1(),
            account,
            transaction_fee,
            order_number: 0,
        })
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn transaction_fee(&self) -> f64 {
        self.transaction_fee
    }

    pub fn previous_balance(&self) -> f64 {
        self.previous_balance
    }

    /// Number of trades actually executed
    pub fn order_number(&self) -> usize {
        self.order_number
    }

    /// Move the position into the quote currency and return the reward.
    ///
    /// The trade fires only while nothing is held in the quote currency;
    /// otherwise only the balance and reward are refreshed.
    pub fn buy(&mut self, exchange_rate: f64) -> Result<f64> {
        self.execute(ForexAction::Buy, exchange_rate)
    }

    /// Move the position into the base currency and return the reward.
    ///
    /// The trade fires only while nothing is held in the base currency.
    pub fn sell(&mut self, exchange_rate: f64) -> Result<f64> {
        self.execute(ForexAction::Sell, exchange_rate)
    }

    /// Apply an action at `exchange_rate`.
    ///
    /// The next state is built on a copy and committed only once the reward
    /// is known to be finite, so a failed call leaves the broker untouched.
    pub fn execute(&mut self, action: ForexAction, exchange_rate: f64) -> Result<f64> {
        if !exchange_rate.is_finite() || exchange_rate <= 0.0 {
            warn!("Rejected {} at invalid rate {}", action, exchange_rate);
            return Err(FxError::InvalidRate(exchange_rate));
        }
        self.account.validate()?;

        let mut account = self.account;
        let mut order_number = self.order_number;

        let triggered = match action {
            ForexAction::Buy => account.currency2() == 0.0,
            ForexAction::Sell => account.currency1() == 0.0,
        };

        if triggered {
            order_number += 1;
            match action {
                ForexAction::Buy => {
                    account.charge_base(self.transaction_fee);
                    account.transfer_to_quote(exchange_rate);
                }
                ForexAction::Sell => {
                    account.charge_quote(self.transaction_fee);
                    account.transfer_to_base(exchange_rate);
                }
            }
        }

        let current_balance = account.calculate_balance(exchange_rate);
        let reward = symmetric_return(self.previous_balance, current_balance)?;

        if triggered {
            debug!(
                "Order #{} {} @ {} | c1={} c2={} | balance {} -> {} | reward {:.6}",
                order_number,
                action,
                exchange_rate,
                account.currency1(),
                account.currency2(),
                self.previous_balance,
                current_balance,
                reward
            );
        }

        self.account = account;
        self.order_number = order_number;
        self.previous_balance = current_balance;

        Ok(reward)
    }

    /// Value the account at `exchange_rate` without trading
    pub fn calculate_balance(&mut self, exchange_rate: f64) -> Result<f64> {
        if !exchange_rate.is_finite() || exchange_rate <= 0.0 {
            return Err(FxError::InvalidRate(exchange_rate));
        }
        Ok(self.account.calculate_balance(exchange_rate))
    }
}
