#![no_std]

use soroban_sdk::{contract, contractimpl, Address, Env, Map, String, Vec};

pub mod allocation;
pub mod error;
pub mod events;
pub mod machine;
pub mod pool;
pub mod rng;
pub mod selector;
pub mod storage;
pub mod types;


pub use error::Error;
pub use types::*;

use rng::LedgerRandom;
use storage::{AuctionStore, ContractStore};

/// Chinese Auction Contract
///
/// Participants spread a fixed ticket budget over a catalog of prizes.
/// Administrators then draw ticket-weighted winners, with at most one prize
/// per participant across the whole catalog.
///
/// # Drawing
/// - `draw_all` fills every prize in random order and closes the auction
/// - `draw_tier` fills one tier's prizes and leaves the auction open
/// - `draw_single` adds one winner to one prize
/// - `redraw_prize` replaces a prize's winners once the auction is closed
/// - A participant drawn for a second prize pauses all draws until
///   `resolve_conflict` decides which prize they keep
#[contract]
pub struct ChineseAuctionContract;

#[contractimpl]
impl ChineseAuctionContract {
    // ───────────── INITIALIZATION ─────────────

    /// Initialize the auction with an empty, open catalog
    ///
    /// # Arguments
    /// * `admin` - Auction administrator; cannot be removed later
    /// * `default_ticket_budget` - Budget given to participants registered without one
    pub fn initialize(env: Env, admin: Address, default_ticket_budget: u32) -> Result<(), Error> {
        let store = ContractStore::new(&env);
        if store.is_initialized() {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        store.set_config(&AuctionConfig {
            admin,
            default_ticket_budget,
        });

        store.save_transition(&AuctionState::new(&env));

        Ok(())
    }

    // ───────────── ADMIN FUNCTIONS ─────────────

    pub fn add_admin(env: Env, caller: Address, admin: Address) -> Result<(), Error> {
        caller.require_auth();
        Self::assert_admin(&env, &caller)?;

        ContractStore::new(&env).set_extra_admin(&admin, true);
        env.events().publish((events::ADMIN, admin), true);
        Ok(())
    }

    pub fn remove_admin(env: Env, caller: Address, admin: Address) -> Result<(), Error> {
        caller.require_auth();
        let config = Self::assert_admin(&env, &caller)?;

        if config.admin == admin {
            return Err(Error::CannotRemoveOwner);
        }

        ContractStore::new(&env).set_extra_admin(&admin, false);
        env.events().publish((events::ADMIN, admin), false);
        Ok(())
    }

    /// Open or close the auction by hand (admin only)
    pub fn set_auction_open(env: Env, caller: Address, open: bool) -> Result<(), Error> {
        caller.require_auth();
        Self::assert_admin(&env, &caller)?;

        let store = ContractStore::new(&env);
        let state = store.load_state();
        store.save_draw_flags(&state.pending_conflict, open, state.conflict_counter);

        env.events().publish((events::AUCTION,), open);
        Ok(())
    }

    /// Clear every winner and any pending conflict, and reopen the auction (admin only)
    pub fn reset_winners(env: Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        Self::assert_admin(&env, &caller)?;

        let store = ContractStore::new(&env);
        let mut state = store.load_state();
        state.winners = Map::new(&env);
        state.pending_conflict = PendingConflict::None;
        state.is_auction_open = true;
        store.save_transition(&state);

        env.events().publish((events::RESET,), env.ledger().timestamp());
        Ok(())
    }

    // ───────────── ROSTER ─────────────

    /// Create or update a participant (admin only)
    ///
    /// A zero `ticket_budget` takes the configured default.
    pub fn register_participant(
        env: Env,
        caller: Address,
        id: String,
        name: String,
        facility: String,
        ticket_budget: u32,
        status: ParticipantStatus,
    ) -> Result<(), Error> {
        caller.require_auth();
        let config = Self::assert_admin(&env, &caller)?;

        let store = ContractStore::new(&env);
        let mut state = store.load_state();
        let participant = Participant {
            id: id.clone(),
            name,
            facility,
            ticket_budget,
            status,
        };
        let stored = Self::upsert_participant(&config, &mut state, participant)?;
        store.save_participant(&stored);

        env.events().publish((events::ROSTER, id), stored.ticket_budget);
        Ok(())
    }

    /// Upsert a batch of participants, e.g. a roster export (admin only)
    ///
    /// Either every participant is stored or none is.
    pub fn import_participants(
        env: Env,
        caller: Address,
        participants: Vec<Participant>,
    ) -> Result<u32, Error> {
        caller.require_auth();
        let config = Self::assert_admin(&env, &caller)?;

        let store = ContractStore::new(&env);
        let mut state = store.load_state();
        let mut stored = Vec::new(&env);
        for participant in participants.iter() {
            stored.push_back(Self::upsert_participant(&config, &mut state, participant)?);
        }
        for participant in stored.iter() {
            store.save_participant(&participant);
        }

        env.events()
            .publish((events::ROSTER, events::IMPORT), participants.len());
        Ok(participants.len())
    }

    pub fn set_participant_status(
        env: Env,
        caller: Address,
        id: String,
        status: ParticipantStatus,
    ) -> Result<(), Error> {
        caller.require_auth();
        Self::assert_admin(&env, &caller)?;

        let store = ContractStore::new(&env);
        let mut participant = store
            .load_state()
            .participants
            .get(id.clone())
            .ok_or(Error::ParticipantNotFound)?;
        participant.status = status;
        store.save_participant(&participant);

        env.events().publish((events::ROSTER, id), status);
        Ok(())
    }

    // ───────────── CATALOG ─────────────

    pub fn add_tier(
        env: Env,
        caller: Address,
        name: String,
        display_order: u32,
        color: String,
    ) -> Result<u32, Error> {
        caller.require_auth();
        Self::assert_admin(&env, &caller)?;

        let store = ContractStore::new(&env);
        let id = store.next_id(DataKey::TierCounter);
        store.save_tier(&PrizeTier {
            id,
            name,
            display_order,
            color,
        });

        env.events().publish((events::TIER, id), display_order);
        Ok(id)
    }

    /// Add a prize to the catalog (admin only)
    ///
    /// # Arguments
    /// * `tier_id` - Optional tier; must already exist
    /// * `number_of_winners` - How many distinct winners the prize gets, at least 1
    pub fn add_prize(
        env: Env,
        caller: Address,
        name: String,
        description: String,
        image: String,
        tier_id: Option<u32>,
        number_of_winners: u32,
    ) -> Result<u32, Error> {
        caller.require_auth();
        Self::assert_admin(&env, &caller)?;

        if number_of_winners == 0 {
            return Err(Error::InvalidWinnerCount);
        }

        let store = ContractStore::new(&env);
        if let Some(tier) = tier_id {
            if !store.load_state().tiers.contains_key(tier) {
                return Err(Error::TierNotFound);
            }
        }

        let id = store.next_id(DataKey::PrizeCounter);
        store.save_prize(&Prize {
            id,
            name,
            description,
            image,
            tier_id,
            entries: Vec::new(&env),
            number_of_winners,
        });

        env.events().publish((events::PRIZE, id), number_of_winners);
        Ok(id)
    }

    /// Change how many winners a prize gets (admin only)
    ///
    /// # Errors
    /// - `InvalidWinnerCount`: Zero winners
    /// - `DrawsPaused`: A conflict is waiting to be resolved
    /// - `PrizeNotFound`: Unknown prize
    pub fn set_prize_winner_count(
        env: Env,
        caller: Address,
        prize_id: u32,
        number_of_winners: u32,
    ) -> Result<(), Error> {
        caller.require_auth();
        Self::assert_admin(&env, &caller)?;

        if number_of_winners == 0 {
            return Err(Error::InvalidWinnerCount);
        }

        let store = ContractStore::new(&env);
        let state = store.load_state();
        if state.pending_conflict.is_pending() {
            return Err(Error::DrawsPaused);
        }

        let mut prize = state.prizes.get(prize_id).ok_or(Error::PrizeNotFound)?;
        prize.number_of_winners = number_of_winners;
        store.save_prize(&prize);

        env.events().publish((events::PRIZE, prize_id), number_of_winners);
        Ok(())
    }

    // ───────────── ALLOCATION ─────────────

    /// Set a participant's tickets on a prize (admin only)
    ///
    /// Replaces any earlier count on that prize; zero withdraws the entry.
    /// Returns the participant's remaining tickets.
    ///
    /// # Errors
    /// - `AuctionClosed`: Drawing has closed the auction
    /// - `ParticipantNotFound` / `PrizeNotFound`: Unknown ids
    /// - `BudgetExceeded`: Allocations would exceed the participant's budget
    pub fn allocate(
        env: Env,
        caller: Address,
        participant_id: String,
        prize_id: u32,
        tickets: u32,
    ) -> Result<u32, Error> {
        caller.require_auth();
        Self::assert_admin(&env, &caller)?;

        let store = ContractStore::new(&env);
        let mut state = store.load_state();
        if !state.is_auction_open {
            return Err(Error::AuctionClosed);
        }

        let participant = state
            .participants
            .get(participant_id.clone())
            .ok_or(Error::ParticipantNotFound)?;
        allocation::set_allocation(&env, &mut state.prizes, &participant, prize_id, tickets)?;
        let prize = state.prizes.get(prize_id).ok_or(Error::PrizeNotFound)?;
        store.save_prize(&prize);

        env.events()
            .publish((events::ALLOC, participant_id, prize_id), tickets);
        Ok(allocation::remaining_tickets(&state.prizes, &participant))
    }

    // ───────────── DRAWING ─────────────

    /// Run one drawing operation and persist its result
    ///
    /// Never fails: refusals such as `AccessDenied` or `ConflictPending` come
    /// back as the returned outcome with nothing changed.
    pub fn apply_operation(env: Env, caller: Address, operation: Operation) -> Outcome {
        caller.require_auth();
        let is_admin = Self::assert_admin(&env, &caller).is_ok();

        let store = ContractStore::new(&env);
        let state = store.load_state();
        let mut rng = LedgerRandom::new(&env);

        let transition = machine::apply(&env, state, &operation, is_admin, &mut rng);
        if transition.is_applied() {
            store.save_transition(&transition.state);
        }

        events::publish_outcome(&env, &transition.outcome);
        transition.outcome
    }

    pub fn draw_all(env: Env, caller: Address) -> Outcome {
        Self::apply_operation(env, caller, Operation::DrawAll)
    }

    pub fn draw_tier(env: Env, caller: Address, tier_id: u32) -> Outcome {
        Self::apply_operation(env, caller, Operation::DrawTier(tier_id))
    }

    pub fn draw_single(env: Env, caller: Address, prize_id: u32) -> Outcome {
        Self::apply_operation(env, caller, Operation::DrawSingle(prize_id))
    }

    pub fn redraw_prize(env: Env, caller: Address, prize_id: u32) -> Outcome {
        Self::apply_operation(env, caller, Operation::RedrawPrize(prize_id))
    }

    pub fn resolve_conflict(env: Env, caller: Address, decision: ConflictDecision) -> Outcome {
        Self::apply_operation(env, caller, Operation::ResolveConflict(decision))
    }

    // ───────────── VIEW FUNCTIONS ─────────────

    pub fn get_config(env: Env) -> Result<AuctionConfig, Error> {
        ContractStore::new(&env).config()
    }

    pub fn is_admin(env: Env, address: Address) -> bool {
        Self::assert_admin(&env, &address).is_ok()
    }

    pub fn get_state(env: Env) -> AuctionState {
        ContractStore::new(&env).load_state()
    }

    pub fn get_flags(env: Env) -> AuctionFlags {
        ContractStore::new(&env).load_state().flags()
    }

    pub fn get_winners(env: Env) -> Map<u32, Vec<String>> {
        ContractStore::new(&env).load_state().winners
    }

    pub fn get_prize_winners(env: Env, prize_id: u32) -> Vec<String> {
        ContractStore::new(&env)
            .load_state()
            .winners_of(&env, prize_id)
    }

    pub fn get_pending_conflict(env: Env) -> Option<Conflict> {
        ContractStore::new(&env).load_state().pending_conflict.conflict()
    }

    pub fn get_prize(env: Env, prize_id: u32) -> Option<Prize> {
        ContractStore::new(&env).load_state().prizes.get(prize_id)
    }

    /// Prizes in catalog order
    pub fn get_prizes(env: Env) -> Vec<Prize> {
        ContractStore::new(&env).load_state().prizes.values()
    }

    /// Tiers sorted by display order
    pub fn get_tiers(env: Env) -> Vec<PrizeTier> {
        let tiers = ContractStore::new(&env).load_state().tiers;

        let mut sorted: Vec<PrizeTier> = Vec::new(&env);
        for tier in tiers.values().iter() {
            let mut at = sorted.len();
            for i in 0..sorted.len() {
                if tier.display_order < sorted.get_unchecked(i).display_order {
                    at = i;
                    break;
                }
            }
            sorted.insert(at, tier);
        }
        sorted
    }

    pub fn get_participant(env: Env, participant_id: String) -> Option<Participant> {
        ContractStore::new(&env)
            .load_state()
            .participants
            .get(participant_id)
    }

    pub fn remaining_tickets(env: Env, participant_id: String) -> Result<u32, Error> {
        let state = ContractStore::new(&env).load_state();
        let participant = state
            .participants
            .get(participant_id)
            .ok_or(Error::ParticipantNotFound)?;
        Ok(allocation::remaining_tickets(&state.prizes, &participant))
    }

    // ───────────── INTERNAL HELPERS ─────────────

    fn assert_admin(env: &Env, user: &Address) -> Result<AuctionConfig, Error> {
        let store = ContractStore::new(env);
        let config = store.config()?;
        if config.admin != *user && !store.is_extra_admin(user) {
            return Err(Error::NotAuthorized);
        }
        Ok(config)
    }

    fn upsert_participant(
        config: &AuctionConfig,
        state: &mut AuctionState,
        mut participant: Participant,
    ) -> Result<Participant, Error> {
        if participant.ticket_budget == 0 {
            participant.ticket_budget = config.default_ticket_budget;
        }
        if allocation::committed_tickets(&state.prizes, &participant.id) > participant.ticket_budget {
            return Err(Error::BudgetBelowCommitted);
        }
        state.participants.set(participant.id.clone(), participant.clone());
        Ok(participant)
    }
}
