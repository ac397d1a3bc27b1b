pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod rl;

pub use config::AppConfig;
pub use domain::{Candle, PriceField, PriceSeries};
pub use error::{FxError, Result};
pub use rl::{Account, Broker, BrokerConfig, EnvConfig, ForexAction, ForexEnvironment};
