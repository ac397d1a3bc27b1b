//! Forex Environment for RL Training
//!
//! Replays a price series through the broker with a gym-like reset/step
//! interface. The rate of each step is read from the row at the current
//! index, while the observation covers the windows ending just before it.

use serde::Serialize;
use tracing::info;

use super::observation::{encode_window, Observation, ObservationSpace};
use crate::domain::PriceSeries;
use crate::error::{FxError, Result};
use crate::rl::config::{BrokerConfig, EnvConfig};
use crate::rl::core::{Broker, ForexAction, NUM_ACTIONS};

/// Result of taking a step in the environment
#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    /// Observation of the windows the action was taken on
    pub observation: Observation,
    /// Reward signal from the broker
    pub reward: f64,
    /// True once the index reaches the end of the series
    pub done: bool,
    /// Additional info
    pub info: StepInfo,
}

/// Additional step information
#[derive(Debug, Clone, Default, Serialize)]
pub struct StepInfo {
    pub reward: f64,
    /// Trades executed so far this episode
    pub number_of_trades: usize,
    /// Account balance in base currency at this step's rate
    pub account_balance: f64,
    /// Exchange rate used for this step
    pub exchange_rate: f64,
}

/// Forex trading environment
pub struct ForexEnvironment {
    series: PriceSeries,
    env_config: EnvConfig,
    broker_config: BrokerConfig,
    space: ObservationSpace,
    broker: Broker,
    index: usize,
    done: bool,
}

impl ForexEnvironment {
    /// Create a new environment positioned at the first tradable row
    pub fn new(
        series: PriceSeries,
        env_config: EnvConfig,
        broker_config: BrokerConfig,
    ) -> Result<Self> {
        env_config
            .validate()
            .map_err(|errors| FxError::Validation(errors.join("; ")))?;

        let start = env_config.max_window();
        if series.len() <= start {
            return Err(FxError::InvalidMarketData(format!(
                "series has {} rows, need more than the largest window ({start})",
                series.len()
            )));
        }

        let broker = Broker::new(&broker_config)?;
        let space = ObservationSpace::from_windows(&env_config.windows);

        Ok(Self {
            series,
            env_config,
            broker_config,
            space,
            broker,
            index: start,
            done: false,
        })
    }

    /// Reset the environment for a new episode.
    ///
    /// A fresh broker is created and one `Sell` step is taken, which never
    /// trades on a new account; its observation is returned.
    pub fn reset(&mut self) -> Result<Observation> {
        self.broker = Broker::new(&self.broker_config)?;
        self.index = self.env_config.max_window();
        self.done = false;

        info!(
            "Episode reset | rows={} start_index={} balance={}",
            self.series.len(),
            self.index,
            self.broker_config.starting_balance
        );

        let result = self.step(ForexAction::Sell)?;
        Ok(result.observation)
    }

    /// Take a step in the environment
    pub fn step(&mut self, action: ForexAction) -> Result<StepResult> {
        if self.done {
            return Err(FxError::EpisodeFinished);
        }

        let observation = self.observe()?;

        let exchange_rate = self
            .series
            .rate_at(self.index, self.env_config.price_field)
            .ok_or_else(|| {
                FxError::InvalidState(format!("index {} outside price series", self.index))
            })?;

        let reward = self.broker.execute(action, exchange_rate)?;

        self.index += 1;
        self.done = self.index >= self.series.len();

        let info = StepInfo {
            reward,
            number_of_trades: self.broker.order_number(),
            account_balance: self.broker.calculate_balance(exchange_rate)?,
            exchange_rate,
        };

        if self.done {
            info!(
                "Episode finished | trades={} balance={:.4}",
                info.number_of_trades, info.account_balance
            );
        }

        Ok(StepResult {
            observation,
            reward,
            done: self.done,
            info,
        })
    }

    /// Take a step from a raw discrete action index
    pub fn step_index(&mut self, action: usize) -> Result<StepResult> {
        let action = ForexAction::from_index(action).ok_or(FxError::InvalidAction(action))?;
        self.step(action)
    }

    fn observe(&self) -> Result<Observation> {
        let inputs = self
            .space
            .inputs
            .iter()
            .map(|spec| {
                self.series
                    .window(self.index, spec.window)
                    .map(|candles| encode_window(spec, candles))
                    .ok_or_else(|| {
                        FxError::InvalidState(format!(
                            "window {} ending at {} outside price series",
                            spec.window, self.index
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Observation { inputs })
    }

    pub fn observation_space(&self) -> &ObservationSpace {
        &self.space
    }

    pub fn action_space_size(&self) -> usize {
        NUM_ACTIONS
    }

    pub fn broker(&self) -> &Broker {
        &self.broker
    }

    /// Row the next step will trade on
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn series(&self) -> &PriceSeries {
        &self.series
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Candle;

    fn series(n: usize) -> PriceSeries {
        let candles = (0..n)
            .map(|i| {
                let p = 1.0 + (i % 7) as f64 * 0.01;
                Candle::new(p, p + 0.02, p - 0.02, p + 0.005)
            })
            .collect();
        PriceSeries::new(candles).unwrap()
    }

    fn env(rows: usize, windows: Vec<usize>) -> ForexEnvironment {
        let env_config = EnvConfig {
            windows,
            ..Default::default()
        };
        ForexEnvironment::new(series(rows), env_config, BrokerConfig::default()).unwrap()
    }

    #[test]
    fn test_env_creation() {
        let env = env(20, vec![8, 4]);

        assert_eq!(env.index(), 8);
        assert_eq!(env.action_space_size(), 2);
        assert_eq!(env.observation_space().len(), 2);
        assert!(!env.is_done());
    }

    #[test]
    fn test_series_too_short() {
        let result = ForexEnvironment::new(
            series(8),
            EnvConfig {
                windows: vec![8],
                ..Default::default()
            },
            BrokerConfig::default(),
        );
        assert!(matches!(result, Err(FxError::InvalidMarketData(_))));
    }

    #[test]
    fn test_reset_consumes_one_row() {
        let mut env = env(20, vec![8, 4]);

        let obs = env.reset().unwrap();

        assert_eq!(env.index(), 9);
        assert_eq!(env.broker().order_number(), 0);
        assert_eq!(obs.inputs.len(), 2);
        assert_eq!(obs.get("Input_0").unwrap().values.len(), 8);
        assert_eq!(obs.get("Input_1").unwrap().values[0].len(), 1);
    }

    #[test]
    fn test_step_info() {
        let mut env = env(20, vec![4]);
        env.reset().unwrap();

        let result = env.step(ForexAction::Buy).unwrap();

        assert!(!result.done);
        assert_eq!(result.info.number_of_trades, 1);
        assert_eq!(result.info.reward, result.reward);
        assert!(result.reward < 0.0); // fee paid, same rate
        assert!(result.info.account_balance < 2000.0);
    }

    #[test]
    fn test_episode_completion() {
        let mut env = env(10, vec![4]);
        env.reset().unwrap();

        let mut steps = 0;
        loop {
            let result = env.step(ForexAction::Buy).unwrap();
            steps += 1;
            if result.done {
                break;
            }
        }

        // rows 5..10 remain after the reset step
        assert_eq!(steps, 5);
        assert!(matches!(
            env.step(ForexAction::Sell),
            Err(FxError::EpisodeFinished)
        ));
    }

    #[test]
    fn test_step_index_rejects_unknown_action() {
        let mut env = env(10, vec![4]);
        assert!(matches!(env.step_index(2), Err(FxError::InvalidAction(2))));
        assert_eq!(env.index(), 4);
        assert!(env.step_index(0).is_ok());
    }

    #[test]
    fn test_reset_restores_broker() {
        let mut env = env(12, vec![4]);
        env.reset().unwrap();
        env.step(ForexAction::Buy).unwrap();
        assert_eq!(env.broker().order_number(), 1);

        env.reset().unwrap();
        assert_eq!(env.broker().order_number(), 0);
        assert_eq!(env.broker().account().currency1(), 2000.0);
        assert_eq!(env.index(), 5);
    }
}
