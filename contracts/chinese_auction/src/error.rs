use soroban_sdk::contracterror;

/// Error codes for the catalog, roster and allocation entry points.
///
/// Drawing entry points never fail with these; they report an
/// [`Outcome`](crate::types::Outcome) instead.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAuthorized = 3,
    ParticipantNotFound = 4,
    PrizeNotFound = 5,
    TierNotFound = 6,
    BudgetExceeded = 7,
    AuctionClosed = 8,
    InvalidWinnerCount = 9,
    BudgetBelowCommitted = 10,
    CannotRemoveOwner = 11,
    DrawsPaused = 12,
}
