//! Reinforcement Learning Module
//!
//! Simulated forex trading environment for RL agents.
//!
//! # Features
//!
//! - **Account**: two-currency position, fully in base or fully in quote
//! - **Broker**: fee-charged transfers and symmetric percentage-change reward
//! - **Environment**: gym-like reset/step over a historical price series
//! - **Observation Space**: typed, named price-window inputs
//! - **Agents**: baseline policies and an episode runner

pub mod agent;
pub mod config;
pub mod core;
pub mod environment;

// Agent exports
pub use agent::{run_episode, EpisodeSummary, Policy};

// Config exports
pub use config::{BrokerConfig, EnvConfig};

// Core exports
pub use core::{symmetric_return, Account, Broker, ForexAction, NUM_ACTIONS};

// Environment exports
pub use environment::{
    ChartKind, ForexEnvironment, InputSpec, InputValue, Observation, ObservationSpace,
    StepInfo, StepResult,
};
