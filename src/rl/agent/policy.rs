//! Baseline Policies
//!
//! Fixed and random policies used to exercise the environment from the CLI
//! and in tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::rl::core::ForexAction;
use crate::rl::environment::{Observation, StepInfo};

/// Chooses an action for each step
pub trait Policy {
    fn name(&self) -> &str;

    /// `last` is None on the first step after reset
    fn act(&mut self, observation: &Observation, last: Option<&StepInfo>) -> ForexAction;
}

/// Buy once and keep the quote position
#[derive(Debug, Default)]
pub struct BuyAndHoldPolicy;

impl Policy for BuyAndHoldPolicy {
    fn name(&self) -> &str {
        "buy-and-hold"
    }

    fn act(&mut self, _observation: &Observation, _last: Option<&StepInfo>) -> ForexAction {
        ForexAction::Buy
    }
}

/// Stay in the base currency
#[derive(Debug, Default)]
pub struct AlwaysSellPolicy;

impl Policy for AlwaysSellPolicy {
    fn name(&self) -> &str {
        "always-sell"
    }

    fn act(&mut self, _observation: &Observation, _last: Option<&StepInfo>) -> ForexAction {
        ForexAction::Sell
    }
}

/// Flip between buy and sell every step, starting with buy
#[derive(Debug, Default)]
pub struct AlternatePolicy {
    steps: usize,
}

impl Policy for AlternatePolicy {
    fn name(&self) -> &str {
        "alternate"
    }

    fn act(&mut self, _observation: &Observation, _last: Option<&StepInfo>) -> ForexAction {
        let action = if self.steps % 2 == 0 {
            ForexAction::Buy
        } else {
            ForexAction::Sell
        };
        self.steps += 1;
        action
    }
}

/// Uniform random actions from a seeded generator
#[derive(Debug)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &str {
        "random"
    }

    fn act(&mut self, _observation: &Observation, _last: Option<&StepInfo>) -> ForexAction {
        if self.rng.gen_bool(0.5) {
            ForexAction::Buy
        } else {
            ForexAction::Sell
        }
    }
}
