use soroban_sdk::{Map, String, Vec};

use crate::pool::{pool_len, pool_slot};
use crate::rng::{pick_index, RandomSource};
use crate::types::Prize;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Selection {
    /// Every ticket belongs to an excluded participant, or there are none.
    NoneEligible,
    Winner(String),
    /// `winner` was drawn but already holds `existing_prize_id`.
    Conflict {
        winner: String,
        existing_prize_id: u32,
    },
}

/// Draws one candidate for `prize` and checks it against the other prizes'
/// winners. Never mutates state and never retries.
pub fn select_winner<R: RandomSource + ?Sized>(
    prize: &Prize,
    current_winners: &Map<u32, Vec<String>>,
    excluded: &Vec<String>,
    rng: &mut R,
) -> Selection {
    let len = pool_len(prize, excluded);
    if len == 0 {
        return Selection::NoneEligible;
    }

    let candidate = match pool_slot(prize, excluded, pick_index(rng, len)) {
        Some(id) => id,
        None => return Selection::NoneEligible,
    };

    match held_prize(current_winners, &candidate, prize.id) {
        Some(existing_prize_id) => Selection::Conflict {
            winner: candidate,
            existing_prize_id,
        },
        None => Selection::Winner(candidate),
    }
}

/// First prize other than `drawing` that lists `participant_id`.
pub fn held_prize(winners: &Map<u32, Vec<String>>, participant_id: &String, drawing: u32) -> Option<u32> {
    for (prize_id, list) in winners.iter() {
        if prize_id != drawing && list.contains(participant_id) {
            return Some(prize_id);
        }
    }
    None
}
