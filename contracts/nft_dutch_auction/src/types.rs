use soroban_sdk::{contracttype, Address, Env};

/// Lifecycle of the sale. Transitions are one-directional:
/// Closed -> Open (once) -> Revealed (once). Minting is allowed in both
/// Open and Revealed; reveal only affects metadata visibility.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SaleStatus {
    Closed,
    Open,
    Revealed,
}

/// One contiguous window of the price schedule.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PricePhase {
    pub duration: u64, // seconds; 0 marks the open-ended terminal phase
    pub start_price: i128,
    pub step_interval: u64, // seconds between price steps
    pub step_delta: i128,   // amount the price drops per step
    pub floor_price: i128,  // price never goes below this within the phase
    pub max_per_call: u32,  // mint quantity cap for a single call
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleConfig {
    pub payment_token: Address, // token contract payments are settled in
    pub max_supply: u64,
}

#[contracttype]
pub enum DataKey {
    Admin,
    Config,
    Phases,
    Status,
    OpenedAt,
    BaseUri,
    NextTokenId,
    TotalRaised,
    TokenOwner(u64),
    OwnerCount(Address),
    Approved(u64),
}

pub fn get_ledger_timestamp(env: &Env) -> u64 {
    env.ledger().timestamp()
}
