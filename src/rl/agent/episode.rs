//! Episode Runner
//!
//! Plays one full episode of a policy against the environment.

use serde::Serialize;
use tracing::debug;

use super::policy::Policy;
use crate::error::Result;
use crate::rl::environment::ForexEnvironment;

/// Episode statistics
#[derive(Debug, Clone, Serialize)]
pub struct EpisodeSummary {
    pub policy: String,
    /// Steps taken after the reset step
    pub steps: usize,
    pub total_reward: f64,
    pub number_of_trades: usize,
    pub starting_balance: f64,
    pub final_balance: f64,
    /// Final balance relative to the start, in percent
    pub return_pct: f64,
    pub min_balance: f64,
    pub max_balance: f64,
}

/// Reset the environment and step the policy until the series is exhausted
pub fn run_episode(env: &mut ForexEnvironment, policy: &mut dyn Policy) -> Result<EpisodeSummary> {
    let mut observation = env.reset()?;
    let starting_balance = env.broker().previous_balance();

    let mut summary = EpisodeSummary {
        policy: policy.name().to_string(),
        steps: 0,
        total_reward: 0.0,
        number_of_trades: 0,
        starting_balance,
        final_balance: starting_balance,
        return_pct: 0.0,
        min_balance: starting_balance,
        max_balance: starting_balance,
    };

    let mut last = None;
    while !env.is_done() {
        let action = policy.act(&observation, last.as_ref());
        let result = env.step(action)?;

        summary.steps += 1;
        summary.total_reward += result.reward;
        summary.number_of_trades = result.info.number_of_trades;
        summary.final_balance = result.info.account_balance;
        summary.min_balance = summary.min_balance.min(result.info.account_balance);
        summary.max_balance = summary.max_balance.max(result.info.account_balance);

        debug!(
            "Step {} | {} | reward {:.6} | balance {:.4}",
            summary.steps, action, result.reward, result.info.account_balance
        );

        observation = result.observation;
        last = Some(result.info);
    }

    summary.return_pct = (summary.final_balance / starting_balance - 1.0) * 100.0;
    Ok(summary)
}
