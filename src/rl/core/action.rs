//! Action Space
//!
//! Discrete action space of the forex environment.

use serde::{Deserialize, Serialize};

/// Number of discrete actions
pub const NUM_ACTIONS: usize = 2;

/// Discrete trading action
///
/// `Buy` moves the position into the quote currency, `Sell` moves it back
/// into the base currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ForexAction {
    Buy = 0,
    Sell = 1,
}

impl ForexAction {
    /// Convert from action index
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Buy),
            1 => Some(Self::Sell),
            _ => None,
        }
    }

    /// Convert to action index
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Get all possible actions
    pub fn all() -> &'static [ForexAction] {
        &[Self::Buy, Self::Sell]
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Buy => "Move position into the quote currency",
            Self::Sell => "Move position into the base currency",
        }
    }
}

impl std::fmt::Display for ForexAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}
