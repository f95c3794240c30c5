use soroban_sdk::{Env, String, Vec};

use crate::types::Prize;

/// Flattens a prize's entries into one slot per ticket.
///
/// Participants appear in entry order, each repeated `tickets` times.
/// Excluded participants and zero-count entries contribute nothing.
pub fn build_pool(env: &Env, prize: &Prize, excluded: &Vec<String>) -> Vec<String> {
    let mut pool = Vec::new(env);

    for entry in prize.entries.iter() {
        if entry.tickets == 0 || excluded.contains(&entry.participant_id) {
            continue;
        }
        for _ in 0..entry.tickets {
            pool.push_back(entry.participant_id.clone());
        }
    }

    pool
}

/// Length of the pool [`build_pool`] would return.
pub fn pool_len(prize: &Prize, excluded: &Vec<String>) -> u32 {
    let mut total: u32 = 0;
    for entry in prize.entries.iter() {
        if !excluded.contains(&entry.participant_id) {
            total += entry.tickets;
        }
    }
    total
}

/// The participant at `slot` of the pool [`build_pool`] would return,
/// found by walking the entries instead of materializing every ticket.
pub fn pool_slot(prize: &Prize, excluded: &Vec<String>, slot: u32) -> Option<String> {
    let mut rest = slot;
    for entry in prize.entries.iter() {
        if entry.tickets == 0 || excluded.contains(&entry.participant_id) {
            continue;
        }
        if rest < entry.tickets {
            return Some(entry.participant_id);
        }
        rest -= entry.tickets;
    }
    None
}
