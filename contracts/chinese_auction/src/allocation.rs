use soroban_sdk::{Env, Map, String, Vec};

use crate::error::Error;
use crate::types::{Entry, Participant, Prize};

/// Tickets a participant has placed across the whole catalog.
pub fn committed_tickets(prizes: &Map<u32, Prize>, participant_id: &String) -> u32 {
    committed_except(prizes, participant_id, None)
}

pub fn remaining_tickets(prizes: &Map<u32, Prize>, participant: &Participant) -> u32 {
    participant
        .ticket_budget
        .saturating_sub(committed_tickets(prizes, &participant.id))
}

fn committed_except(prizes: &Map<u32, Prize>, participant_id: &String, skip: Option<u32>) -> u32 {
    let mut total: u32 = 0;
    for (prize_id, prize) in prizes.iter() {
        if Some(prize_id) == skip {
            continue;
        }
        for entry in prize.entries.iter() {
            if entry.participant_id == *participant_id {
                total = total.saturating_add(entry.tickets);
            }
        }
    }
    total
}

/// Sets the participant's ticket count on one prize, replacing any earlier
/// count there. Zero removes the entry. An updated entry keeps its position.
pub fn set_allocation(
    env: &Env,
    prizes: &mut Map<u32, Prize>,
    participant: &Participant,
    prize_id: u32,
    tickets: u32,
) -> Result<(), Error> {
    let mut prize = prizes.get(prize_id).ok_or(Error::PrizeNotFound)?;

    let elsewhere = committed_except(prizes, &participant.id, Some(prize_id));
    if elsewhere.saturating_add(tickets) > participant.ticket_budget {
        return Err(Error::BudgetExceeded);
    }

    let mut entries: Vec<Entry> = Vec::new(env);
    let mut found = false;
    for entry in prize.entries.iter() {
        if entry.participant_id == participant.id {
            found = true;
            if tickets > 0 {
                entries.push_back(Entry {
                    participant_id: entry.participant_id,
                    tickets,
                });
            }
        } else {
            entries.push_back(entry);
        }
    }
    if !found && tickets > 0 {
        entries.push_back(Entry {
            participant_id: participant.id.clone(),
            tickets,
        });
    }

    prize.entries = entries;
    prizes.set(prize_id, prize);
    Ok(())
}
