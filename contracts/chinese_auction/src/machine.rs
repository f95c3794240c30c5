//! Drawing state machine.
//!
//! Every operation takes the full [`AuctionState`] by value and hands back the
//! next state together with exactly one [`Outcome`]. Precondition failures
//! return the input state untouched. The only partial results ever kept are
//! the defined save-points: a catalog or tier pass that stops at its first
//! conflict.

use soroban_sdk::{Env, String, Vec};

use crate::rng::{shuffle, RandomSource};
use crate::selector::{select_winner, Selection};
use crate::types::{
    AuctionState, ConflictDecision, DrawReport, DrawScope, Operation, Outcome, PendingConflict,
    RedrawReport, Replacement, ResolutionReport,
};

pub struct Transition {
    pub state: AuctionState,
    pub outcome: Outcome,
}

impl Transition {
    fn new(state: AuctionState, outcome: Outcome) -> Self {
        Transition { state, outcome }
    }

    /// False when the operation was refused and `state` is the input state.
    pub fn is_applied(&self) -> bool {
        matches!(
            self.outcome,
            Outcome::WinnersDrawn(_)
                | Outcome::PrizeRedrawn(_)
                | Outcome::ConflictDetected(_)
                | Outcome::ConflictResolved(_)
        )
    }
}

pub fn apply<R: RandomSource + ?Sized>(
    env: &Env,
    state: AuctionState,
    operation: &Operation,
    is_admin: bool,
    rng: &mut R,
) -> Transition {
    if !is_admin {
        return Transition::new(state, Outcome::AccessDenied);
    }

    match operation {
        Operation::DrawAll => draw_scope(env, state, DrawScope::Catalog, rng),
        Operation::DrawTier(tier_id) => draw_scope(env, state, DrawScope::Tier(*tier_id), rng),
        Operation::DrawSingle(prize_id) => draw_single(env, state, *prize_id, rng),
        Operation::RedrawPrize(prize_id) => redraw_prize(env, state, *prize_id, rng),
        Operation::ResolveConflict(decision) => resolve_conflict(env, state, decision, rng),
    }
}

/// Every participant currently listed as a winner of any prize.
pub fn all_winners(env: &Env, state: &AuctionState) -> Vec<String> {
    let mut out = Vec::new(env);
    for (_, list) in state.winners.iter() {
        out.append(&list);
    }
    out
}

// ───────────── CATALOG & TIER ─────────────

fn draw_scope<R: RandomSource + ?Sized>(
    env: &Env,
    mut state: AuctionState,
    scope: DrawScope,
    rng: &mut R,
) -> Transition {
    if let Some(id) = state.pending_conflict.id() {
        return Transition::new(state, Outcome::ConflictPending(id));
    }

    let tier_filter = match scope {
        DrawScope::Tier(tier_id) => {
            if !state.tiers.contains_key(tier_id) {
                return Transition::new(state, Outcome::UnknownTier(tier_id));
            }
            Some(tier_id)
        }
        _ => None,
    };

    let mut order: Vec<u32> = Vec::new(env);
    for (prize_id, prize) in state.prizes.iter() {
        if tier_filter.is_none() || prize.tier_id == tier_filter {
            order.push_back(prize_id);
        }
    }
    shuffle(&mut order, rng);

    let mut assigned = all_winners(env, &state);
    let mut drawn = Vec::new(env);

    for prize_id in order.iter() {
        let prize = match state.prizes.get(prize_id) {
            Some(p) => p,
            None => continue,
        };
        if !prize.has_entries() {
            continue;
        }

        let mut list = state.winners_of(env, prize_id);
        while list.len() < prize.number_of_winners {
            match select_winner(&prize, &state.winners, &assigned, rng) {
                Selection::NoneEligible => break,
                Selection::Winner(winner) => {
                    list.push_back(winner.clone());
                    state.set_winners_of(prize_id, list.clone());
                    assigned.push_back(winner.clone());
                    drawn.push_back(state.winner_notice(env, prize_id, &winner));
                }
                Selection::Conflict {
                    winner,
                    existing_prize_id,
                } => {
                    let notice = state.open_conflict(env, winner, existing_prize_id, prize_id);
                    return Transition::new(state, Outcome::ConflictDetected(notice));
                }
            }
        }
    }

    let closed_auction = scope == DrawScope::Catalog;
    if closed_auction {
        state.is_auction_open = false;
    }

    Transition::new(
        state,
        Outcome::WinnersDrawn(DrawReport {
            scope,
            winners: drawn,
            closed_auction,
        }),
    )
}

// ───────────── SINGLE PRIZE ─────────────

fn draw_single<R: RandomSource + ?Sized>(
    env: &Env,
    mut state: AuctionState,
    prize_id: u32,
    rng: &mut R,
) -> Transition {
    if let Some(id) = state.pending_conflict.id() {
        return Transition::new(state, Outcome::ConflictPending(id));
    }

    let prize = match state.prizes.get(prize_id) {
        Some(p) => p,
        None => return Transition::new(state, Outcome::UnknownPrize(prize_id)),
    };

    let mut list = state.winners_of(env, prize_id);
    if list.len() >= prize.number_of_winners {
        return Transition::new(state, Outcome::PrizeAlreadyComplete(prize_id));
    }
    if !prize.has_entries() {
        return Transition::new(state, Outcome::NoEntries(prize_id));
    }

    let excluded = all_winners(env, &state);
    match select_winner(&prize, &state.winners, &excluded, rng) {
        Selection::NoneEligible => Transition::new(state, Outcome::NoEligibleParticipant(prize_id)),
        Selection::Conflict {
            winner,
            existing_prize_id,
        } => {
            let notice = state.open_conflict(env, winner, existing_prize_id, prize_id);
            Transition::new(state, Outcome::ConflictDetected(notice))
        }
        Selection::Winner(winner) => {
            list.push_back(winner.clone());
            state.set_winners_of(prize_id, list);

            let mut winners = Vec::new(env);
            winners.push_back(state.winner_notice(env, prize_id, &winner));
            Transition::new(
                state,
                Outcome::WinnersDrawn(DrawReport {
                    scope: DrawScope::Prize(prize_id),
                    winners,
                    closed_auction: false,
                }),
            )
        }
    }
}

// ───────────── REDRAW ─────────────

fn redraw_prize<R: RandomSource + ?Sized>(
    env: &Env,
    mut state: AuctionState,
    prize_id: u32,
    rng: &mut R,
) -> Transition {
    if let Some(id) = state.pending_conflict.id() {
        return Transition::new(state, Outcome::ConflictPending(id));
    }
    if state.is_auction_open {
        return Transition::new(state, Outcome::AuctionStillOpen);
    }

    let prize = match state.prizes.get(prize_id) {
        Some(p) => p,
        None => return Transition::new(state, Outcome::UnknownPrize(prize_id)),
    };
    if !prize.has_entries() {
        return Transition::new(state, Outcome::NoEntries(prize_id));
    }

    // Old winners of this prize are replaced, not excluded.
    state.winners.remove(prize_id);
    let mut excluded = all_winners(env, &state);
    let mut fresh: Vec<String> = Vec::new(env);
    let mut notices = Vec::new(env);

    while fresh.len() < prize.number_of_winners {
        match select_winner(&prize, &state.winners, &excluded, rng) {
            Selection::NoneEligible => break,
            Selection::Winner(winner) => {
                fresh.push_back(winner.clone());
                excluded.push_back(winner.clone());
                state.set_winners_of(prize_id, fresh.clone());
                notices.push_back(state.winner_notice(env, prize_id, &winner));
            }
            Selection::Conflict {
                winner,
                existing_prize_id,
            } => {
                let notice = state.open_conflict(env, winner, existing_prize_id, prize_id);
                return Transition::new(state, Outcome::ConflictDetected(notice));
            }
        }
    }

    let report = RedrawReport {
        prize_id,
        prize_name: prize.name.clone(),
        winners: notices,
        winner_count: fresh.len(),
    };
    Transition::new(state, Outcome::PrizeRedrawn(report))
}

// ───────────── CONFLICT RESOLUTION ─────────────

fn resolve_conflict<R: RandomSource + ?Sized>(
    env: &Env,
    mut state: AuctionState,
    decision: &ConflictDecision,
    rng: &mut R,
) -> Transition {
    let conflict = match state.pending_conflict.conflict() {
        Some(c) if c.id == decision.conflict_id => c,
        _ => {
            return Transition::new(state, Outcome::NoMatchingConflict(decision.conflict_id));
        }
    };

    let keep = decision.keep_prize_id;
    let drop = decision.drop_prize_id;
    let same_pair = (keep == conflict.existing_prize_id && drop == conflict.new_prize_id)
        || (keep == conflict.new_prize_id && drop == conflict.existing_prize_id);
    if !same_pair || decision.participant_id != conflict.participant_id {
        return Transition::new(state, Outcome::InvalidResolution(conflict.id));
    }

    let participant = conflict.participant_id.clone();

    let keep_quota = state
        .prizes
        .get(keep)
        .map(|p| p.number_of_winners)
        .unwrap_or(1);
    let mut keep_list = state.winners_of(env, keep);
    if !keep_list.contains(&participant) {
        if keep_quota > 0 && keep_list.len() >= keep_quota {
            keep_list.pop_back();
        }
        keep_list.push_back(participant.clone());
    }
    state.set_winners_of(keep, keep_list);

    let mut drop_list: Vec<String> = Vec::new(env);
    for id in state.winners_of(env, drop).iter() {
        if id != participant {
            drop_list.push_back(id);
        }
    }
    state.set_winners_of(drop, drop_list.clone());

    state.pending_conflict = PendingConflict::None;
    let kept = state.winner_notice(env, keep, &participant);

    let mut replacement = Replacement::None;
    if let Some(drop_prize) = state.prizes.get(drop) {
        if drop_prize.has_entries() && drop_list.len() < drop_prize.number_of_winners {
            let mut excluded = drop_list.clone();
            excluded.push_back(participant.clone());

            match select_winner(&drop_prize, &state.winners, &excluded, rng) {
                Selection::NoneEligible => {}
                Selection::Winner(winner) => {
                    drop_list.push_back(winner.clone());
                    state.set_winners_of(drop, drop_list);
                    replacement = Replacement::Drawn(state.winner_notice(env, drop, &winner));
                }
                Selection::Conflict {
                    winner,
                    existing_prize_id,
                } => {
                    let notice = state.open_conflict(env, winner, existing_prize_id, drop);
                    return Transition::new(state, Outcome::ConflictDetected(notice));
                }
            }
        }
    }

    let report = ResolutionReport {
        conflict_id: conflict.id,
        kept,
        dropped_prize_id: drop,
        dropped_prize_name: state.prize_name(env, drop),
        replacement,
    };
    Transition::new(state, Outcome::ConflictResolved(report))
}
