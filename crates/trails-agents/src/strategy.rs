//! Offer generation and evaluation per strategy.
//!
//! Both strategies reason in terms of a shortfall: the multiset of colors
//! an agent still needs to pay its greedy route but does not hold. The
//! engine computes shortfalls for everyone each turn and hands each agent
//! a view of its peers' needs; agents never read each other's purses
//! directly.
//!
//! Self-interested agents propose up to two swaps per turn, asking for
//! their own shortfall colors. Cooperative agents propose at most one swap
//! per turn, offering a color the peer needs, and occasionally accept
//! offers that do nothing for them.

use rand::Rng;
use trails_types::{AgentId, CoinBundle, Color, Strategy, TradeOffer};

use crate::purse;

/// Most offers a self-interested agent proposes in one turn.
pub const SELF_INTERESTED_OFFER_CAP: usize = 2;

/// Most offers a cooperative agent proposes in one turn.
pub const COOPERATIVE_OFFER_CAP: usize = 1;

/// Chance (percent) a cooperative agent accepts an offer it has no
/// particular reason to accept.
pub const GOODWILL_ACCEPT_PERCENT: u32 = 30;

/// One peer's trading needs as visible to other agents.
#[derive(Debug, Clone)]
pub struct PeerNeeds {
    /// The peer in question.
    pub agent_id: AgentId,
    /// Colors the peer lacks for its route, with multiplicity.
    pub shortfall: Vec<Color>,
}

/// The colors missing from `purse` relative to `required`, with
/// multiplicity: a color short by three appears three times.
#[must_use]
pub fn shortfall(purse: &CoinBundle, required: &CoinBundle) -> Vec<Color> {
    let mut missing = Vec::new();
    for (color, needed) in required {
        let held = purse::count(purse, *color);
        let gap = needed.saturating_sub(held);
        for _ in 0..gap {
            missing.push(*color);
        }
    }
    missing
}

/// The first color held in `purse`, in color order.
fn first_held(purse: &CoinBundle) -> Option<Color> {
    purse
        .iter()
        .find(|(_, amount)| **amount > 0)
        .map(|(color, _)| *color)
}

/// Compose this turn's outgoing offers.
///
/// Self-interested: for each shortfall color and each peer, offer the
/// first held color in exchange for the needed one, up to the cap.
/// Cooperative: for each color a peer needs that this agent holds spare
/// (more than one), offer that color in exchange for the first held
/// color, up to the cap.
#[must_use]
pub fn generate_offers(
    strategy: Strategy,
    self_id: AgentId,
    purse: &CoinBundle,
    own_shortfall: &[Color],
    peers: &[PeerNeeds],
    turn: u64,
) -> Vec<TradeOffer> {
    let mut offers = Vec::new();
    match strategy {
        Strategy::SelfInterested => {
            for want in own_shortfall {
                for peer in peers {
                    if let Some(give) = first_held(purse) {
                        offers.push(TradeOffer::one_for_one(
                            self_id,
                            peer.agent_id,
                            give,
                            *want,
                            turn,
                        ));
                    }
                }
            }
            offers.truncate(SELF_INTERESTED_OFFER_CAP);
        }
        Strategy::Cooperative => {
            for peer in peers {
                for needed in &peer.shortfall {
                    if purse::count(purse, *needed) > 1 {
                        if let Some(want) = first_held(purse) {
                            offers.push(TradeOffer::one_for_one(
                                self_id,
                                peer.agent_id,
                                *needed,
                                want,
                                turn,
                            ));
                        }
                    }
                }
            }
            offers.truncate(COOPERATIVE_OFFER_CAP);
        }
    }
    tracing::trace!(
        agent_id = %self_id,
        strategy = %strategy,
        offer_count = offers.len(),
        "offers composed"
    );
    offers
}

/// Decide whether to accept an incoming offer.
///
/// Self-interested agents accept only when a color the proposer asks for
/// sits on their own shortfall. Cooperative agents also accept when they
/// hold a spare of a color being given to them, and otherwise accept with
/// [`GOODWILL_ACCEPT_PERCENT`] probability.
pub fn evaluate_offer<R: Rng + ?Sized>(
    strategy: Strategy,
    purse: &CoinBundle,
    own_shortfall: &[Color],
    offer: &TradeOffer,
    rng: &mut R,
) -> bool {
    let wants_needed_color = offer
        .want
        .keys()
        .any(|color| own_shortfall.contains(color));
    match strategy {
        Strategy::SelfInterested => wants_needed_color,
        Strategy::Cooperative => {
            let has_spare_of_given = offer
                .give
                .keys()
                .any(|color| purse::count(purse, *color) > 1);
            if has_spare_of_given || wants_needed_color {
                true
            } else {
                rng.random_range(0..100) < GOODWILL_ACCEPT_PERCENT
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn bundle(pairs: &[(Color, u32)]) -> CoinBundle {
        pairs.iter().copied().collect()
    }

    fn peer(shortfall: &[Color]) -> PeerNeeds {
        PeerNeeds {
            agent_id: AgentId::new(),
            shortfall: shortfall.to_vec(),
        }
    }

    #[test]
    fn shortfall_counts_multiplicity() {
        let purse = bundle(&[(Color::Red, 1)]);
        let required = bundle(&[(Color::Red, 3), (Color::Blue, 1)]);
        let missing = shortfall(&purse, &required);
        assert_eq!(missing, vec![Color::Red, Color::Red, Color::Blue]);
    }

    #[test]
    fn shortfall_is_empty_when_funded() {
        let purse = bundle(&[(Color::Red, 3), (Color::Blue, 2)]);
        let required = bundle(&[(Color::Red, 2), (Color::Blue, 2)]);
        assert!(shortfall(&purse, &required).is_empty());
    }

    #[test]
    fn self_interested_caps_at_two_offers() {
        let me = AgentId::new();
        let purse = bundle(&[(Color::Yellow, 4)]);
        let needs = vec![Color::Red, Color::Blue, Color::Green];
        let peers = vec![peer(&[]), peer(&[])];
        let offers = generate_offers(
            Strategy::SelfInterested,
            me,
            &purse,
            &needs,
            &peers,
            1,
        );
        assert_eq!(offers.len(), SELF_INTERESTED_OFFER_CAP);
        for offer in &offers {
            assert_eq!(offer.from, me);
            assert_eq!(offer.give.get(&Color::Yellow), Some(&1));
        }
        // First offers ask for the first shortfall color.
        assert!(offers[0].want.contains_key(&Color::Red));
    }

    #[test]
    fn self_interested_with_empty_purse_offers_nothing() {
        let offers = generate_offers(
            Strategy::SelfInterested,
            AgentId::new(),
            &CoinBundle::new(),
            &[Color::Red],
            &[peer(&[])],
            1,
        );
        assert!(offers.is_empty());
    }

    #[test]
    fn cooperative_offers_only_spare_colors() {
        let me = AgentId::new();
        // Holds two red (spare) and one blue (not spare).
        let purse = bundle(&[(Color::Red, 2), (Color::Blue, 1)]);
        let peers = vec![peer(&[Color::Blue]), peer(&[Color::Red])];
        let offers = generate_offers(Strategy::Cooperative, me, &purse, &[], &peers, 1);
        // Blue is needed by the first peer but not spare; red is spare.
        assert_eq!(offers.len(), COOPERATIVE_OFFER_CAP);
        assert!(offers[0].give.contains_key(&Color::Red));
        assert_eq!(offers[0].to, peers[1].agent_id);
    }

    #[test]
    fn cooperative_with_no_spares_offers_nothing() {
        let purse = bundle(&[(Color::Red, 1)]);
        let offers = generate_offers(
            Strategy::Cooperative,
            AgentId::new(),
            &purse,
            &[],
            &[peer(&[Color::Red])],
            1,
        );
        assert!(offers.is_empty());
    }

    #[test]
    fn self_interested_accepts_only_shortfall_asks() {
        let mut rng = StdRng::seed_from_u64(0);
        let purse = bundle(&[(Color::Red, 5)]);
        let needs = vec![Color::Blue];
        let hit = TradeOffer::one_for_one(
            AgentId::new(),
            AgentId::new(),
            Color::Green,
            Color::Blue,
            1,
        );
        let miss = TradeOffer::one_for_one(
            AgentId::new(),
            AgentId::new(),
            Color::Green,
            Color::Yellow,
            1,
        );
        assert!(evaluate_offer(
            Strategy::SelfInterested,
            &purse,
            &needs,
            &hit,
            &mut rng
        ));
        assert!(!evaluate_offer(
            Strategy::SelfInterested,
            &purse,
            &needs,
            &miss,
            &mut rng
        ));
    }

    #[test]
    fn cooperative_accepts_when_spare_of_given_color() {
        let mut rng = StdRng::seed_from_u64(0);
        let purse = bundle(&[(Color::Red, 2)]);
        let offer = TradeOffer::one_for_one(
            AgentId::new(),
            AgentId::new(),
            Color::Red,
            Color::Yellow,
            1,
        );
        assert!(evaluate_offer(
            Strategy::Cooperative,
            &purse,
            &[],
            &offer,
            &mut rng
        ));
    }

    #[test]
    fn cooperative_goodwill_rate_is_roughly_thirty_percent() {
        let mut rng = StdRng::seed_from_u64(99);
        let purse = bundle(&[(Color::Red, 1)]);
        let offer = TradeOffer::one_for_one(
            AgentId::new(),
            AgentId::new(),
            Color::Blue,
            Color::Yellow,
            1,
        );
        let accepted = (0..1000)
            .filter(|_| {
                evaluate_offer(Strategy::Cooperative, &purse, &[], &offer, &mut rng)
            })
            .count();
        assert!((200..400).contains(&accepted), "accepted {accepted} of 1000");
    }
}
