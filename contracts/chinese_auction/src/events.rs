use soroban_sdk::{symbol_short, Env, String, Symbol};

use crate::types::{DrawScope, Outcome};

const DRAWN: Symbol = symbol_short!("drawn");
const REDRAWN: Symbol = symbol_short!("redrawn");
const CONFLICT: Symbol = symbol_short!("conflict");
const RESOLVED: Symbol = symbol_short!("resolved");
const REJECTED: Symbol = symbol_short!("rejected");

pub const PRIZE: Symbol = symbol_short!("prize");
pub const TIER: Symbol = symbol_short!("tier");
pub const ROSTER: Symbol = symbol_short!("roster");
pub const IMPORT: Symbol = symbol_short!("import");
pub const ALLOC: Symbol = symbol_short!("alloc");
pub const RESET: Symbol = symbol_short!("reset");
pub const ADMIN: Symbol = symbol_short!("admin");
pub const AUCTION: Symbol = symbol_short!("auction");

/// Publishes one event describing the outcome of a drawing transition.
pub fn publish_outcome(env: &Env, outcome: &Outcome) {
    match outcome {
        Outcome::WinnersDrawn(report) => {
            let scope = match report.scope {
                DrawScope::Catalog => symbol_short!("catalog"),
                DrawScope::Tier(_) => symbol_short!("tier"),
                DrawScope::Prize(_) => symbol_short!("prize"),
            };
            env.events()
                .publish((DRAWN, scope), (report.winners.len(), report.closed_auction));
        }
        Outcome::PrizeRedrawn(report) => {
            env.events()
                .publish((REDRAWN, report.prize_id), report.winner_count);
        }
        Outcome::ConflictDetected(notice) => {
            let c = &notice.conflict;
            env.events().publish(
                (CONFLICT, c.id),
                (c.participant_id.clone(), c.existing_prize_id, c.new_prize_id),
            );
        }
        Outcome::ConflictResolved(report) => {
            let replacement: Option<String> = report.replacement.winner().map(|r| r.participant_id);
            env.events().publish(
                (RESOLVED, report.conflict_id),
                (report.kept.prize_id, report.dropped_prize_id, replacement),
            );
        }
        rejected => {
            env.events().publish((REJECTED,), rejected.clone());
        }
    }
}
