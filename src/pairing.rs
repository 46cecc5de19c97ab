use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Ordering;

use crate::types::{Pairing, Player};

/// Pair the field for one round.
///
/// Round 1 pairs a uniformly shuffled field; later rounds sort by current
/// standing (wins minus losses, rating breaking ties) and pair consecutive
/// entries, the usual Swiss scheme. With an odd field the last ordered
/// player sits the round out. The shuffle is the only randomness here.
pub fn create_pairings(players: &[Player], round_number: u32, rng: &mut impl Rng) -> Vec<Pairing> {
    let mut order: Vec<usize> = (0..players.len()).collect();

    if round_number <= 1 {
        order.shuffle(rng);
    } else {
        // Stable sort: equal standing and rating keeps roster order
        order.sort_by(|&i, &j| standings_order(&players[i], &players[j]));
    }

    // chunks_exact drops the odd remainder, which is exactly the sit-out
    order.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect()
}

/// Best player first: win-loss differential descending, rating descending
fn standings_order(a: &Player, b: &Player) -> Ordering {
    let diff_a = a.wins as i64 - a.losses as i64;
    let diff_b = b.wins as i64 - b.losses as i64;
    diff_b
        .cmp(&diff_a)
        .then_with(|| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal))
}
