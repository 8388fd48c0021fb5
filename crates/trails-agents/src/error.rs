//! Error types for the `trails-agents` crate.

use trails_types::Color;
use trails_world::WorldError;

/// Errors that can occur during purse and movement operations.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// A debit was attempted against a purse that cannot cover it. The
    /// purse is unchanged when this is raised.
    #[error("insufficient funds: need {requested} {color} coins, have {available}")]
    InsufficientFunds {
        /// The color that came up short.
        color: Color,
        /// Coins of that color the operation needed.
        requested: u32,
        /// Coins of that color actually held.
        available: u32,
    },

    /// Arithmetic overflow during a checked purse calculation.
    #[error("arithmetic overflow in {context}")]
    ArithmeticOverflow {
        /// Which operation overflowed.
        context: &'static str,
    },

    /// A grid or registry operation failed.
    #[error(transparent)]
    World(#[from] WorldError),
}
