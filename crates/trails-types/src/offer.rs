//! Trade offers exchanged between agents.
//!
//! An offer is a proposal from one agent to another: "I surrender `give`,
//! you surrender `want`." Offers are ephemeral -- they are created during a
//! turn, collected into the step engine's pool, and settled or dropped
//! before the turn ends. Nothing persists an offer across turns.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::ids::{AgentId, OfferId};

/// A quantity of coins per color. Absent keys mean zero.
pub type CoinBundle = BTreeMap<Color, u32>;

/// A trade proposal between two agents.
///
/// Settlement transfers `give` from the proposer to the counterparty and
/// `want` from the counterparty to the proposer -- or nothing at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeOffer {
    /// Unique identifier for this offer.
    pub offer_id: OfferId,
    /// The proposing agent.
    pub from: AgentId,
    /// The counterparty the offer is addressed to.
    pub to: AgentId,
    /// Coins the proposer surrenders if the trade executes.
    pub give: CoinBundle,
    /// Coins the proposer receives if the trade executes.
    pub want: CoinBundle,
    /// The turn the offer was created in. Offers never outlive their turn.
    pub created_turn: u64,
}

impl TradeOffer {
    /// Build an offer of a single `give` coin for a single `want` coin.
    ///
    /// Both strategies only ever propose one-for-one swaps, so this is the
    /// common constructor.
    pub fn one_for_one(
        from: AgentId,
        to: AgentId,
        give: Color,
        want: Color,
        created_turn: u64,
    ) -> Self {
        let mut give_bundle = CoinBundle::new();
        give_bundle.insert(give, 1);
        let mut want_bundle = CoinBundle::new();
        want_bundle.insert(want, 1);
        Self {
            offer_id: OfferId::new(),
            from,
            to,
            give: give_bundle,
            want: want_bundle,
            created_turn,
        }
    }
}
