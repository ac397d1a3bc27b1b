//! Baseline policies and the episode runner

mod episode;
mod policy;

pub use episode::{run_episode, EpisodeSummary};
pub use policy::{AlternatePolicy, AlwaysSellPolicy, BuyAndHoldPolicy, Policy, RandomPolicy};
