//! Simulated Forex Environment for RL Training
//!
//! This module provides a gym-like environment that replays a price series
//! through the broker.

mod forex;
mod observation;

pub use forex::{ForexEnvironment, StepInfo, StepResult};
pub use observation::{
    encode_window, ChartKind, InputSpec, InputValue, Observation, ObservationSpace,
};
