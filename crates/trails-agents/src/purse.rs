//! Checked coin accounting over a [`CoinBundle`].
//!
//! A purse is just a `CoinBundle`: a map from color to a non-negative
//! count. These free functions keep two invariants: counts never go
//! negative (a debit validates every color before touching anything) and
//! zero counts are removed rather than stored.

use trails_types::{CoinBundle, Color};

use crate::error::AgentError;

/// Coins of `color` held in `purse`. Absent keys count as zero.
#[must_use]
pub fn count(purse: &CoinBundle, color: Color) -> u32 {
    purse.get(&color).copied().unwrap_or(0)
}

/// Total coins held across all colors.
#[must_use]
pub fn total_coins(purse: &CoinBundle) -> u64 {
    purse.values().map(|n| u64::from(*n)).sum()
}

/// Whether `purse` covers every color in `cost`.
#[must_use]
pub fn can_afford(purse: &CoinBundle, cost: &CoinBundle) -> bool {
    cost.iter()
        .all(|(color, amount)| count(purse, *color) >= *amount)
}

/// Remove `cost` from `purse`.
///
/// Validates the whole cost first; on failure the purse is untouched.
/// Colors that reach zero are removed from the map.
///
/// # Errors
///
/// Returns [`AgentError::InsufficientFunds`] naming the first short color
/// in color order.
pub fn debit(purse: &mut CoinBundle, cost: &CoinBundle) -> Result<(), AgentError> {
    for (color, amount) in cost {
        let available = count(purse, *color);
        if available < *amount {
            return Err(AgentError::InsufficientFunds {
                color: *color,
                requested: *amount,
                available,
            });
        }
    }
    for (color, amount) in cost {
        let remaining = count(purse, *color).saturating_sub(*amount);
        if remaining == 0 {
            purse.remove(color);
        } else {
            purse.insert(*color, remaining);
        }
    }
    Ok(())
}

/// Add `coins` to `purse` with checked arithmetic.
///
/// # Errors
///
/// Returns [`AgentError::ArithmeticOverflow`] if any per-color count would
/// exceed `u32::MAX`. Colors already applied stay applied; callers treat
/// this as a fatal engine error, not a recoverable one.
pub fn credit(purse: &mut CoinBundle, coins: &CoinBundle) -> Result<(), AgentError> {
    for (color, amount) in coins {
        if *amount == 0 {
            continue;
        }
        let updated = count(purse, *color)
            .checked_add(*amount)
            .ok_or(AgentError::ArithmeticOverflow {
                context: "purse credit",
            })?;
        purse.insert(*color, updated);
    }
    Ok(())
}
