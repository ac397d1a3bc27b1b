//! Core RL abstractions
//!
//! Account bookkeeping, broker transitions, actions and rewards.

pub mod account;
pub mod action;
pub mod broker;
pub mod reward;

pub use account::Account;
pub use action::{ForexAction, NUM_ACTIONS};
pub use broker::Broker;
pub use reward::symmetric_return;
