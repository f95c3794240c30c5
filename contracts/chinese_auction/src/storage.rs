use soroban_sdk::{Address, Env, IntoVal, Map, String, Val, Vec};

use crate::error::Error;
use crate::types::{
    AuctionConfig, AuctionState, Conflict, DataKey, Participant, PendingConflict, Prize, PrizeTier,
};

const LEDGER_THRESHOLD_SHARED: u32 = 518_400; // ~30 days @ 5s/ledger
const LEDGER_BUMP_SHARED: u32 = 1_036_800; // ~60 days @ 5s/ledger

/// Where drawing results go once a transition has produced them.
pub trait AuctionStore {
    fn load_state(&self) -> AuctionState;
    fn save_winners(&self, winners: &Map<u32, Vec<String>>);
    fn save_draw_flags(&self, pending: &PendingConflict, is_auction_open: bool, conflict_counter: u32);

    /// Persists everything a drawing transition may change.
    fn save_transition(&self, state: &AuctionState) {
        self.save_winners(&state.winners);
        self.save_draw_flags(&state.pending_conflict, state.is_auction_open, state.conflict_counter);
    }
}

/// Contract storage: config and flags in instance storage, winners in
/// persistent storage, and one persistent entry per participant, prize and
/// tier.
pub struct ContractStore<'a> {
    env: &'a Env,
}

impl<'a> ContractStore<'a> {
    pub fn new(env: &'a Env) -> Self {
        ContractStore { env }
    }

    pub fn config(&self) -> Result<AuctionConfig, Error> {
        self.env
            .storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(Error::NotInitialized)
    }

    pub fn set_config(&self, config: &AuctionConfig) {
        self.env.storage().instance().set(&DataKey::Config, config);
    }

    pub fn is_initialized(&self) -> bool {
        self.env.storage().instance().has(&DataKey::Config)
    }

    pub fn set_extra_admin(&self, admin: &Address, enabled: bool) {
        let key = DataKey::Admin(admin.clone());
        if enabled {
            self.env.storage().persistent().set(&key, &true);
            self.bump(&key);
        } else {
            self.env.storage().persistent().remove(&key);
        }
    }

    pub fn is_extra_admin(&self, admin: &Address) -> bool {
        self.env
            .storage()
            .persistent()
            .get(&DataKey::Admin(admin.clone()))
            .unwrap_or(false)
    }

    /// Stores one participant, indexing the id on first registration.
    pub fn save_participant(&self, participant: &Participant) {
        let key = DataKey::Participant(participant.id.clone());
        if !self.env.storage().persistent().has(&key) {
            let mut ids = self.participant_ids();
            ids.push_back(participant.id.clone());
            self.put(&DataKey::ParticipantIds, &ids);
        }
        self.put(&key, participant);
    }

    pub fn save_prize(&self, prize: &Prize) {
        self.put(&DataKey::Prize(prize.id), prize);
    }

    pub fn save_tier(&self, tier: &PrizeTier) {
        self.put(&DataKey::Tier(tier.id), tier);
    }

    /// Returns the next id from a monotonic counter, starting at 1.
    pub fn next_id(&self, counter: DataKey) -> u32 {
        let id = self.counter(&counter) + 1;
        self.env.storage().instance().set(&counter, &id);
        id
    }

    pub fn extend_instance(&self) {
        self.env
            .storage()
            .instance()
            .extend_ttl(LEDGER_THRESHOLD_SHARED, LEDGER_BUMP_SHARED);
    }

    fn participant_ids(&self) -> Vec<String> {
        self.env
            .storage()
            .persistent()
            .get(&DataKey::ParticipantIds)
            .unwrap_or(Vec::new(self.env))
    }

    fn counter(&self, counter: &DataKey) -> u32 {
        self.env.storage().instance().get(counter).unwrap_or(0)
    }

    fn put<V>(&self, key: &DataKey, value: &V)
    where
        V: IntoVal<Env, Val>,
    {
        self.env.storage().persistent().set(key, value);
        self.bump(key);
    }

    fn bump(&self, key: &DataKey) {
        self.env
            .storage()
            .persistent()
            .extend_ttl(key, LEDGER_THRESHOLD_SHARED, LEDGER_BUMP_SHARED);
    }
}

impl<'a> AuctionStore for ContractStore<'a> {
    fn load_state(&self) -> AuctionState {
        let persistent = self.env.storage().persistent();
        let instance = self.env.storage().instance();

        let mut participants = Map::new(self.env);
        for id in self.participant_ids().iter() {
            let key = DataKey::Participant(id.clone());
            if let Some(participant) = persistent.get::<DataKey, Participant>(&key) {
                participants.set(id, participant);
            }
        }

        let mut prizes = Map::new(self.env);
        for id in 1..=self.counter(&DataKey::PrizeCounter) {
            if let Some(prize) = persistent.get::<DataKey, Prize>(&DataKey::Prize(id)) {
                prizes.set(id, prize);
            }
        }

        let mut tiers = Map::new(self.env);
        for id in 1..=self.counter(&DataKey::TierCounter) {
            if let Some(tier) = persistent.get::<DataKey, PrizeTier>(&DataKey::Tier(id)) {
                tiers.set(id, tier);
            }
        }

        let pending_conflict = match instance.get::<DataKey, Conflict>(&DataKey::PendingConflict) {
            Some(conflict) => PendingConflict::Pending(conflict),
            None => PendingConflict::None,
        };

        AuctionState {
            participants,
            prizes,
            tiers,
            winners: persistent.get(&DataKey::Winners).unwrap_or(Map::new(self.env)),
            pending_conflict,
            is_auction_open: instance.get(&DataKey::AuctionOpen).unwrap_or(true),
            conflict_counter: instance.get(&DataKey::ConflictCounter).unwrap_or(0),
        }
    }

    fn save_winners(&self, winners: &Map<u32, Vec<String>>) {
        self.put(&DataKey::Winners, winners);
    }

    fn save_draw_flags(&self, pending: &PendingConflict, is_auction_open: bool, conflict_counter: u32) {
        let instance = self.env.storage().instance();
        match pending {
            PendingConflict::Pending(conflict) => instance.set(&DataKey::PendingConflict, conflict),
            PendingConflict::None => instance.remove(&DataKey::PendingConflict),
        }
        instance.set(&DataKey::AuctionOpen, &is_auction_open);
        instance.set(&DataKey::ConflictCounter, &conflict_counter);
        self.extend_instance();
    }
}
