use soroban_sdk::{contracttype, Address, Env, Map, String, Vec};

//
// ──────────────────────────────────────────────────────────
// ROSTER
// ──────────────────────────────────────────────────────────
//

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParticipantStatus {
    Working = 0,
    Inactive = 1,
    AtParty = 2,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub facility: String,
    pub ticket_budget: u32,
    pub status: ParticipantStatus,
}

//
// ──────────────────────────────────────────────────────────
// CATALOG
// ──────────────────────────────────────────────────────────
//

/// One participant's tickets on one prize.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry {
    pub participant_id: String,
    pub tickets: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Prize {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub image: String,
    pub tier_id: Option<u32>,
    /// Insertion ordered, at most one entry per participant, never a zero count.
    pub entries: Vec<Entry>,
    pub number_of_winners: u32,
}

impl Prize {
    pub fn total_tickets(&self) -> u32 {
        self.entries.iter().map(|e| e.tickets).sum()
    }

    pub fn has_entries(&self) -> bool {
        self.entries.iter().any(|e| e.tickets > 0)
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrizeTier {
    pub id: u32,
    pub name: String,
    pub display_order: u32,
    pub color: String,
}

//
// ──────────────────────────────────────────────────────────
// DRAWING STATE
// ──────────────────────────────────────────────────────────
//

/// A participant who just won `new_prize_id` while already holding
/// `existing_prize_id`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Conflict {
    pub id: u32,
    pub participant_id: String,
    pub existing_prize_id: u32,
    pub new_prize_id: u32,
}

/// The conflict draws are waiting on, if any.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PendingConflict {
    None,
    Pending(Conflict),
}

impl PendingConflict {
    pub fn conflict(&self) -> Option<Conflict> {
        match self {
            PendingConflict::Pending(conflict) => Some(conflict.clone()),
            PendingConflict::None => None,
        }
    }

    pub fn id(&self) -> Option<u32> {
        match self {
            PendingConflict::Pending(conflict) => Some(conflict.id),
            PendingConflict::None => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, PendingConflict::Pending(_))
    }
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AuctionFlags {
    pub is_auction_open: bool,
    pub draws_paused: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionState {
    pub participants: Map<String, Participant>,
    /// Keyed by prize id; id order is catalog order.
    pub prizes: Map<u32, Prize>,
    pub tiers: Map<u32, PrizeTier>,
    /// Prize id to winners in draw order. Empty lists are never stored.
    pub winners: Map<u32, Vec<String>>,
    pub pending_conflict: PendingConflict,
    pub is_auction_open: bool,
    pub conflict_counter: u32,
}

impl AuctionState {
    pub fn new(env: &Env) -> Self {
        AuctionState {
            participants: Map::new(env),
            prizes: Map::new(env),
            tiers: Map::new(env),
            winners: Map::new(env),
            pending_conflict: PendingConflict::None,
            is_auction_open: true,
            conflict_counter: 0,
        }
    }

    pub fn flags(&self) -> AuctionFlags {
        AuctionFlags {
            is_auction_open: self.is_auction_open,
            draws_paused: self.pending_conflict.is_pending(),
        }
    }

    pub fn winners_of(&self, env: &Env, prize_id: u32) -> Vec<String> {
        self.winners.get(prize_id).unwrap_or(Vec::new(env))
    }

    pub fn set_winners_of(&mut self, prize_id: u32, list: Vec<String>) {
        if list.is_empty() {
            self.winners.remove(prize_id);
        } else {
            self.winners.set(prize_id, list);
        }
    }

    /// Display name for messages, falling back to the raw id.
    pub fn participant_name(&self, participant_id: &String) -> String {
        match self.participants.get(participant_id.clone()) {
            Some(p) => p.name,
            None => participant_id.clone(),
        }
    }

    pub fn prize_name(&self, env: &Env, prize_id: u32) -> String {
        match self.prizes.get(prize_id) {
            Some(p) => p.name,
            None => String::from_str(env, ""),
        }
    }

    pub fn winner_notice(&self, env: &Env, prize_id: u32, participant_id: &String) -> WinnerNotice {
        WinnerNotice {
            prize_id,
            prize_name: self.prize_name(env, prize_id),
            participant_id: participant_id.clone(),
            participant_name: self.participant_name(participant_id),
        }
    }

    /// Records a fresh pending conflict and returns its notice.
    pub fn open_conflict(
        &mut self,
        env: &Env,
        participant_id: String,
        existing_prize_id: u32,
        new_prize_id: u32,
    ) -> ConflictNotice {
        self.conflict_counter += 1;
        let conflict = Conflict {
            id: self.conflict_counter,
            participant_id: participant_id.clone(),
            existing_prize_id,
            new_prize_id,
        };
        self.pending_conflict = PendingConflict::Pending(conflict.clone());

        ConflictNotice {
            conflict,
            participant_name: self.participant_name(&participant_id),
            existing_prize_name: self.prize_name(env, existing_prize_id),
            new_prize_name: self.prize_name(env, new_prize_id),
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// OPERATIONS & OUTCOMES
// ──────────────────────────────────────────────────────────
//

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConflictDecision {
    pub conflict_id: u32,
    pub keep_prize_id: u32,
    pub drop_prize_id: u32,
    pub participant_id: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Operation {
    DrawAll,
    DrawTier(u32),
    DrawSingle(u32),
    RedrawPrize(u32),
    ResolveConflict(ConflictDecision),
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DrawScope {
    Catalog,
    Tier(u32),
    Prize(u32),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WinnerNotice {
    pub prize_id: u32,
    pub prize_name: String,
    pub participant_id: String,
    pub participant_name: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DrawReport {
    pub scope: DrawScope,
    /// Winners added by this draw, in draw order.
    pub winners: Vec<WinnerNotice>,
    pub closed_auction: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RedrawReport {
    pub prize_id: u32,
    pub prize_name: String,
    pub winners: Vec<WinnerNotice>,
    pub winner_count: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConflictNotice {
    pub conflict: Conflict,
    pub participant_name: String,
    pub existing_prize_name: String,
    pub new_prize_name: String,
}

/// Who, if anyone, took the dropped prize's freed slot.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Replacement {
    None,
    Drawn(WinnerNotice),
}

impl Replacement {
    pub fn winner(&self) -> Option<WinnerNotice> {
        match self {
            Replacement::Drawn(notice) => Some(notice.clone()),
            Replacement::None => None,
        }
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolutionReport {
    pub conflict_id: u32,
    pub kept: WinnerNotice,
    pub dropped_prize_id: u32,
    pub dropped_prize_name: String,
    pub replacement: Replacement,
}

/// Result of one drawing transition. Failures are values, not panics.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    WinnersDrawn(DrawReport),
    PrizeRedrawn(RedrawReport),
    ConflictDetected(ConflictNotice),
    ConflictResolved(ResolutionReport),
    AccessDenied,
    ConflictPending(u32),
    NoEntries(u32),
    NoEligibleParticipant(u32),
    PrizeAlreadyComplete(u32),
    UnknownPrize(u32),
    UnknownTier(u32),
    AuctionStillOpen,
    NoMatchingConflict(u32),
    InvalidResolution(u32),
}

//
// ──────────────────────────────────────────────────────────
// CONFIG & STORAGE KEYS
// ──────────────────────────────────────────────────────────
//

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionConfig {
    pub admin: Address,
    pub default_ticket_budget: u32,
}

#[contracttype]
pub enum DataKey {
    Config,              // AuctionConfig
    Admin(Address),      // bool - additional administrators
    Participant(String), // Participant
    ParticipantIds,      // Vec<String> - registration order
    Prize(u32),          // Prize
    Tier(u32),           // PrizeTier
    Winners,             // Map<u32, Vec<String>>
    PendingConflict,     // Conflict
    AuctionOpen,         // bool
    ConflictCounter,     // u32
    PrizeCounter,        // u32
    TierCounter,         // u32
}
