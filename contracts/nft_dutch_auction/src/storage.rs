use crate::types::*;
use soroban_sdk::{Address, Env, String, Vec};

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn get_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Admin)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
}

pub fn get_config(env: &Env) -> Option<SaleConfig> {
    env.storage().instance().get(&DataKey::Config)
}

pub fn set_config(env: &Env, config: &SaleConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_phases(env: &Env) -> Option<Vec<PricePhase>> {
    env.storage().instance().get(&DataKey::Phases)
}

pub fn set_phases(env: &Env, phases: &Vec<PricePhase>) {
    env.storage().instance().set(&DataKey::Phases, phases);
}

pub fn get_status(env: &Env) -> SaleStatus {
    env.storage()
        .instance()
        .get(&DataKey::Status)
        .unwrap_or(SaleStatus::Closed)
}

pub fn set_status(env: &Env, status: &SaleStatus) {
    env.storage().instance().set(&DataKey::Status, status);
}

pub fn get_opened_at(env: &Env) -> Option<u64> {
    env.storage().instance().get(&DataKey::OpenedAt)
}

pub fn set_opened_at(env: &Env, timestamp: u64) {
    env.storage().instance().set(&DataKey::OpenedAt, &timestamp);
}

pub fn get_base_uri(env: &Env) -> Option<String> {
    env.storage().instance().get(&DataKey::BaseUri)
}

pub fn set_base_uri(env: &Env, uri: &String) {
    env.storage().instance().set(&DataKey::BaseUri, uri);
}

pub fn get_next_token_id(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::NextTokenId)
        .unwrap_or(0)
}

pub fn set_next_token_id(env: &Env, next: u64) {
    env.storage().instance().set(&DataKey::NextTokenId, &next);
}

pub fn get_total_raised(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalRaised)
        .unwrap_or(0)
}

pub fn set_total_raised(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::TotalRaised, &amount);
}

pub fn get_token_owner(env: &Env, token_id: u64) -> Option<Address> {
    env.storage().persistent().get(&DataKey::TokenOwner(token_id))
}

pub fn set_token_owner(env: &Env, token_id: u64, owner: &Address) {
    env.storage()
        .persistent()
        .set(&DataKey::TokenOwner(token_id), owner);
}

pub fn get_owner_count(env: &Env, owner: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::OwnerCount(owner.clone()))
        .unwrap_or(0)
}

pub fn set_owner_count(env: &Env, owner: &Address, count: u32) {
    env.storage()
        .persistent()
        .set(&DataKey::OwnerCount(owner.clone()), &count);
}

pub fn get_approved(env: &Env, token_id: u64) -> Option<Address> {
    env.storage().persistent().get(&DataKey::Approved(token_id))
}

pub fn set_approved(env: &Env, token_id: u64, spender: &Address) {
    env.storage()
        .persistent()
        .set(&DataKey::Approved(token_id), spender);
}

pub fn clear_approved(env: &Env, token_id: u64) {
    env.storage().persistent().remove(&DataKey::Approved(token_id));
}
