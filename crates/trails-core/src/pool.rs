//! The per-turn offer pool and its settlement pass.
//!
//! Offers accumulate in the pool during the offer phase and are settled in
//! submission order at the end of the turn. Settlement runs against live
//! balances: an earlier trade can fund or unfund a later one. Each offer
//! either executes atomically (both purses change together) or is dropped
//! with a reason; a dropped offer changes nothing.

use std::collections::BTreeMap;

use rand::Rng;
use trails_agents::{AgentError, purse, strategy};
use trails_types::{AgentId, AgentState, OfferId, TradeOffer};
use trails_world::{GridColoring, WorldError, path};

/// Errors that can occur while settling the pool.
///
/// These are engine faults, not normal drop outcomes: settlement validates
/// before mutating, so a purse failure here means state corruption.
#[derive(Debug, thiserror::Error)]
pub enum SettlementError {
    /// A purse mutation failed after validation passed.
    #[error("purse operation failed during settlement: {source}")]
    Purse {
        /// The underlying purse error.
        #[from]
        source: AgentError,
    },

    /// Route costing failed while computing a counterparty's shortfall.
    #[error("route costing failed during settlement: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },
}

/// Why an offer was dropped instead of executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The proposer or counterparty is not a known agent.
    UnknownAgent,
    /// The proposer no longer holds the coins it promised to give.
    ProposerCannotFund,
    /// The counterparty does not hold the coins being asked of it.
    CounterpartyCannotFund,
    /// The counterparty's strategy declined the offer.
    Declined,
}

/// One dropped offer and the reason it was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DroppedOffer {
    /// The offer that was dropped.
    pub offer_id: OfferId,
    /// Why it was dropped.
    pub reason: DropReason,
}

/// The outcome of one settlement pass.
#[derive(Debug, Clone, Default)]
pub struct SettlementReport {
    /// Offers that executed, in execution order.
    pub executed: Vec<OfferId>,
    /// Offers that were dropped, with reasons.
    pub dropped: Vec<DroppedOffer>,
}

/// Offers submitted during the current turn, in submission order.
#[derive(Debug, Clone, Default)]
pub struct OfferPool {
    offers: Vec<TradeOffer>,
}

impl OfferPool {
    /// Create an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an offer to the pool.
    pub fn submit(&mut self, offer: TradeOffer) {
        tracing::trace!(
            offer_id = %offer.offer_id,
            from = %offer.from,
            to = %offer.to,
            "offer submitted"
        );
        self.offers.push(offer);
    }

    /// Number of pending offers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offers.len()
    }

    /// Whether the pool is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    /// Settle every pending offer in submission order and empty the pool.
    ///
    /// For each offer: both parties must be known agents, the proposer must
    /// still hold its `give` bundle, the counterparty must hold the `want`
    /// bundle, and the counterparty's strategy must accept -- evaluated
    /// against its live purse and the shortfall of its current route. Only
    /// then do coins move, so later offers see the updated balances.
    ///
    /// # Errors
    ///
    /// Returns [`SettlementError`] only on engine faults (overflow or a
    /// post-validation purse failure), never for ordinary drops.
    pub fn settle<R: Rng + ?Sized>(
        &mut self,
        agents: &mut BTreeMap<AgentId, AgentState>,
        grid: &GridColoring,
        rng: &mut R,
    ) -> Result<SettlementReport, SettlementError> {
        let mut report = SettlementReport::default();

        for offer in self.offers.drain(..) {
            let Some(proposer) = agents.get(&offer.from) else {
                report.dropped.push(DroppedOffer {
                    offer_id: offer.offer_id,
                    reason: DropReason::UnknownAgent,
                });
                continue;
            };
            let Some(counterparty) = agents.get(&offer.to) else {
                report.dropped.push(DroppedOffer {
                    offer_id: offer.offer_id,
                    reason: DropReason::UnknownAgent,
                });
                continue;
            };

            if !purse::can_afford(&proposer.purse, &offer.give) {
                report.dropped.push(DroppedOffer {
                    offer_id: offer.offer_id,
                    reason: DropReason::ProposerCannotFund,
                });
                continue;
            }
            if !purse::can_afford(&counterparty.purse, &offer.want) {
                report.dropped.push(DroppedOffer {
                    offer_id: offer.offer_id,
                    reason: DropReason::CounterpartyCannotFund,
                });
                continue;
            }

            // A counterparty whose route cannot be costed (off-board
            // goal) evaluates with an empty shortfall.
            let route = path::route(counterparty.position, counterparty.goal);
            let needs = match path::coins_required(grid, &route) {
                Ok(required) => strategy::shortfall(&counterparty.purse, &required),
                Err(WorldError::InvalidCoordinate { .. }) => Vec::new(),
                Err(other) => return Err(other.into()),
            };
            let accepted = strategy::evaluate_offer(
                counterparty.strategy,
                &counterparty.purse,
                &needs,
                &offer,
                rng,
            );
            if !accepted {
                report.dropped.push(DroppedOffer {
                    offer_id: offer.offer_id,
                    reason: DropReason::Declined,
                });
                continue;
            }

            // Validation is done; move the coins. Each side's debit and
            // credit happen together so purses stay consistent.
            if let Some(proposer) = agents.get_mut(&offer.from) {
                purse::debit(&mut proposer.purse, &offer.give)?;
                purse::credit(&mut proposer.purse, &offer.want)?;
            }
            if let Some(counterparty) = agents.get_mut(&offer.to) {
                purse::debit(&mut counterparty.purse, &offer.want)?;
                purse::credit(&mut counterparty.purse, &offer.give)?;
            }

            tracing::debug!(
                offer_id = %offer.offer_id,
                from = %offer.from,
                to = %offer.to,
                "trade executed"
            );
            report.executed.push(offer.offer_id);
        }

        Ok(report)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use trails_types::{CoinBundle, Color, Coord, Strategy};

    use super::*;

    fn make_agent(strategy: Strategy, coins: &[(Color, u32)]) -> AgentState {
        let mut agent = AgentState::new("trader", strategy, Coord::new(0, 0), Coord::new(2, 0));
        agent.purse = coins.iter().copied().collect();
        agent
    }

    fn insert(agents: &mut BTreeMap<AgentId, AgentState>, agent: AgentState) -> AgentId {
        let id = agent.agent_id;
        agents.insert(id, agent);
        id
    }

    // Board is all green, so a route shortfall is always green coins.
    fn make_grid() -> GridColoring {
        GridColoring::uniform(3, 1, Color::Green).unwrap()
    }

    #[test]
    fn funded_accepted_offer_moves_coins_both_ways() {
        let mut agents = BTreeMap::new();
        let proposer = insert(&mut agents, make_agent(Strategy::SelfInterested, &[(Color::Red, 1)]));
        // Counterparty needs green for its route and holds none, so a
        // self-interested evaluator accepts an offer asking for... nothing
        // it needs. Use a cooperative evaluator with a spare red instead.
        let counterparty = insert(
            &mut agents,
            make_agent(Strategy::Cooperative, &[(Color::Red, 2), (Color::Blue, 1)]),
        );

        let mut pool = OfferPool::new();
        pool.submit(TradeOffer::one_for_one(
            proposer,
            counterparty,
            Color::Red,
            Color::Blue,
            1,
        ));

        let mut rng = StdRng::seed_from_u64(5);
        let report = pool.settle(&mut agents, &make_grid(), &mut rng).unwrap();
        assert_eq!(report.executed.len(), 1);
        assert!(report.dropped.is_empty());
        assert!(pool.is_empty());

        let p = agents.get(&proposer).unwrap();
        assert_eq!(p.purse.get(&Color::Red), None);
        assert_eq!(p.purse.get(&Color::Blue), Some(&1));
        let c = agents.get(&counterparty).unwrap();
        assert_eq!(c.purse.get(&Color::Red), Some(&3));
        assert_eq!(c.purse.get(&Color::Blue), None);
    }

    #[test]
    fn unfunded_proposer_drops_offer_and_touches_nothing() {
        let mut agents = BTreeMap::new();
        let proposer = insert(&mut agents, make_agent(Strategy::SelfInterested, &[]));
        let counterparty = insert(
            &mut agents,
            make_agent(Strategy::Cooperative, &[(Color::Blue, 2)]),
        );
        let before = agents.clone();

        let mut pool = OfferPool::new();
        pool.submit(TradeOffer::one_for_one(
            proposer,
            counterparty,
            Color::Red,
            Color::Blue,
            1,
        ));

        let mut rng = StdRng::seed_from_u64(5);
        let report = pool.settle(&mut agents, &make_grid(), &mut rng).unwrap();
        assert!(report.executed.is_empty());
        assert_eq!(report.dropped.len(), 1);
        assert_eq!(report.dropped[0].reason, DropReason::ProposerCannotFund);
        for (id, agent) in &agents {
            assert_eq!(agent.purse, before.get(id).unwrap().purse);
        }
    }

    #[test]
    fn unfunded_counterparty_drops_offer() {
        let mut agents = BTreeMap::new();
        let proposer = insert(
            &mut agents,
            make_agent(Strategy::SelfInterested, &[(Color::Red, 1)]),
        );
        let counterparty = insert(&mut agents, make_agent(Strategy::Cooperative, &[]));

        let mut pool = OfferPool::new();
        pool.submit(TradeOffer::one_for_one(
            proposer,
            counterparty,
            Color::Red,
            Color::Blue,
            1,
        ));

        let mut rng = StdRng::seed_from_u64(5);
        let report = pool.settle(&mut agents, &make_grid(), &mut rng).unwrap();
        assert_eq!(report.dropped.len(), 1);
        assert_eq!(report.dropped[0].reason, DropReason::CounterpartyCannotFund);
    }

    #[test]
    fn unknown_counterparty_drops_offer() {
        let mut agents = BTreeMap::new();
        let proposer = insert(
            &mut agents,
            make_agent(Strategy::SelfInterested, &[(Color::Red, 1)]),
        );

        let mut pool = OfferPool::new();
        pool.submit(TradeOffer::one_for_one(
            proposer,
            AgentId::new(),
            Color::Red,
            Color::Blue,
            1,
        ));

        let mut rng = StdRng::seed_from_u64(5);
        let report = pool.settle(&mut agents, &make_grid(), &mut rng).unwrap();
        assert_eq!(report.dropped.len(), 1);
        assert_eq!(report.dropped[0].reason, DropReason::UnknownAgent);
    }

    #[test]
    fn declined_offer_is_dropped() {
        let mut agents = BTreeMap::new();
        let proposer = insert(
            &mut agents,
            make_agent(Strategy::SelfInterested, &[(Color::Red, 1)]),
        );
        // Self-interested counterparty with a fully funded route declines
        // an offer asking for a color it does not need.
        let counterparty = insert(
            &mut agents,
            make_agent(Strategy::SelfInterested, &[(Color::Green, 5), (Color::Blue, 1)]),
        );

        let mut pool = OfferPool::new();
        pool.submit(TradeOffer::one_for_one(
            proposer,
            counterparty,
            Color::Red,
            Color::Blue,
            1,
        ));

        let mut rng = StdRng::seed_from_u64(5);
        let report = pool.settle(&mut agents, &make_grid(), &mut rng).unwrap();
        assert_eq!(report.dropped.len(), 1);
        assert_eq!(report.dropped[0].reason, DropReason::Declined);
    }

    #[test]
    fn settlement_runs_against_live_balances() {
        let mut agents = BTreeMap::new();
        // Proposer holds a single red coin but promises it twice.
        let proposer = insert(
            &mut agents,
            make_agent(Strategy::SelfInterested, &[(Color::Red, 1)]),
        );
        let counterparty = insert(
            &mut agents,
            make_agent(Strategy::Cooperative, &[(Color::Red, 2), (Color::Blue, 2)]),
        );

        let mut pool = OfferPool::new();
        pool.submit(TradeOffer::one_for_one(
            proposer,
            counterparty,
            Color::Red,
            Color::Blue,
            1,
        ));
        pool.submit(TradeOffer::one_for_one(
            proposer,
            counterparty,
            Color::Red,
            Color::Blue,
            1,
        ));

        let mut rng = StdRng::seed_from_u64(5);
        let report = pool.settle(&mut agents, &make_grid(), &mut rng).unwrap();
        // First trade swaps red for blue; the proposer then holds blue,
        // not red, so the second is unfunded.
        assert_eq!(report.executed.len(), 1);
        assert_eq!(report.dropped.len(), 1);
        assert_eq!(report.dropped[0].reason, DropReason::ProposerCannotFund);
    }

    #[test]
    fn settlement_conserves_total_coins() {
        let mut agents = BTreeMap::new();
        let proposer = insert(
            &mut agents,
            make_agent(Strategy::SelfInterested, &[(Color::Red, 3), (Color::Green, 1)]),
        );
        let counterparty = insert(
            &mut agents,
            make_agent(Strategy::Cooperative, &[(Color::Blue, 4)]),
        );
        let total_before: u64 = agents.values().map(|a| purse::total_coins(&a.purse)).sum();

        let mut pool = OfferPool::new();
        pool.submit(TradeOffer::one_for_one(
            proposer,
            counterparty,
            Color::Red,
            Color::Blue,
            1,
        ));

        let mut rng = StdRng::seed_from_u64(11);
        pool.settle(&mut agents, &make_grid(), &mut rng).unwrap();
        let total_after: u64 = agents.values().map(|a| purse::total_coins(&a.purse)).sum();
        assert_eq!(total_before, total_after);
    }
}
