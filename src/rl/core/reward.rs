//! Reward Functions
//!
//! The broker's reward is the symmetric percentage change between two
//! consecutive balance snapshots.

use crate::error::{FxError, Result};

/// Symmetric percentage change `2 * (current - previous) / (current + previous)`
///
/// For non-negative balances the result is bounded in `[-2, 2]` and is `0`
/// when the balance did not move. Swapping the arguments negates the result.
pub fn symmetric_return(previous: f64, current: f64) -> Result<f64> {
    if !previous.is_finite() || !current.is_finite() || previous < 0.0 || current < 0.0 {
        return Err(FxError::InvalidState(format!(
            "balances must be finite and non-negative (previous={previous}, current={current})"
        )));
    }

    let total = current + previous;
    if total <= 0.0 {
        return Err(FxError::InvalidState(
            "reward undefined for two zero balances".to_string(),
        ));
    }

    Ok(2.0 * (current - previous) / total)
}
