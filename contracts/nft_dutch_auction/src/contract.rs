use crate::errors::Error;
use crate::pricing;
use crate::storage::*;
use crate::types::*;
use soroban_sdk::{contract, contractimpl, contractmeta, token, Address, Env, String, Vec};

// Metadata that is added on to every WASM custom section
contractmeta!(
    key = "Description",
    val = "Fixed-supply collectible with time-phased Dutch auction sale"
);

#[contract]
pub struct DutchAuctionContract;

fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    let admin = get_admin(env).ok_or(Error::NotInitialized)?;
    if *caller != admin {
        return Err(Error::NotAuthorized);
    }
    Ok(())
}

fn sale_elapsed(env: &Env) -> Result<u64, Error> {
    if get_status(env) == SaleStatus::Closed {
        return Err(Error::SaleNotOpen);
    }
    let opened_at = get_opened_at(env).ok_or(Error::SaleNotOpen)?;
    Ok(get_ledger_timestamp(env).saturating_sub(opened_at))
}

#[contractimpl]
impl DutchAuctionContract {
    /// Initialize the collectible sale contract
    pub fn initialize(
        env: Env,
        admin: Address,
        payment_token: Address,
        base_uri: String,
        max_supply: u64,
        phases: Vec<PricePhase>,
    ) -> Result<(), Error> {
        if has_admin(&env) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        if max_supply == 0 {
            return Err(Error::InvalidConfig);
        }
        pricing::validate(&phases)?;

        set_admin(&env, &admin);
        set_config(
            &env,
            &SaleConfig {
                payment_token: payment_token.clone(),
                max_supply,
            },
        );
        set_phases(&env, &phases);
        set_status(&env, &SaleStatus::Closed);
        set_base_uri(&env, &base_uri);
        set_next_token_id(&env, 0);
        set_total_raised(&env, 0);

        env.events()
            .publish(("initialized",), (admin, payment_token, max_supply));

        Ok(())
    }

    /// Open the sale and start the price clock. One-way, callable once.
    pub fn open_sale(env: Env, caller: Address) -> Result<(), Error> {
        require_admin(&env, &caller)?;

        if get_status(&env) != SaleStatus::Closed {
            return Err(Error::SaleAlreadyOpen);
        }

        let now = get_ledger_timestamp(&env);
        set_status(&env, &SaleStatus::Open);
        set_opened_at(&env, now);

        env.events().publish(("sale_opened",), (caller, now));

        Ok(())
    }

    /// Flip the metadata reveal flag. Minting is unaffected.
    pub fn reveal(env: Env, caller: Address) -> Result<(), Error> {
        require_admin(&env, &caller)?;

        match get_status(&env) {
            SaleStatus::Closed => Err(Error::SaleNotOpen),
            SaleStatus::Revealed => Err(Error::AlreadyRevealed),
            SaleStatus::Open => {
                set_status(&env, &SaleStatus::Revealed);
                env.events().publish(("revealed",), (caller,));
                Ok(())
            }
        }
    }

    /// Update the metadata base URI. Frozen once the sale is revealed.
    pub fn set_base_uri(env: Env, caller: Address, uri: String) -> Result<(), Error> {
        require_admin(&env, &caller)?;

        if get_status(&env) == SaleStatus::Revealed {
            return Err(Error::MetadataFrozen);
        }

        set_base_uri(&env, &uri);
        env.events().publish(("base_uri_changed",), (uri,));

        Ok(())
    }

    /// Mint `quantity` units to `minter` against an exactly matching payment.
    ///
    /// The required payment is `quantity * price_at(now - opened_at)`; any
    /// other amount, over or under, is rejected. Returns the first minted
    /// token id; the batch occupies consecutive ids.
    pub fn mint(env: Env, minter: Address, quantity: u32, payment: i128) -> Result<u64, Error> {
        minter.require_auth();

        // Validation pass: no state is touched until every check passes.
        let elapsed = sale_elapsed(&env)?;
        if quantity == 0 {
            return Err(Error::InvalidQuantity);
        }

        let phases = get_phases(&env).ok_or(Error::NotInitialized)?;
        let (_, phase) = pricing::phase_at(&phases, elapsed);
        if quantity > phase.max_per_call {
            return Err(Error::QuantityCapExceeded);
        }

        let config = get_config(&env).ok_or(Error::NotInitialized)?;
        let first_id = get_next_token_id(&env);
        if first_id + quantity as u64 > config.max_supply {
            return Err(Error::SupplyExhausted);
        }

        let required = pricing::price_at(&phases, elapsed) * quantity as i128;
        if payment != required {
            return Err(Error::IncorrectPayment);
        }

        // Commit pass. The host rolls everything back if the transfer traps.
        let token_client = token::Client::new(&env, &config.payment_token);
        token_client.transfer(&minter, &env.current_contract_address(), &payment);

        for token_id in first_id..first_id + quantity as u64 {
            set_token_owner(&env, token_id, &minter);
        }
        set_owner_count(&env, &minter, get_owner_count(&env, &minter) + quantity);
        set_next_token_id(&env, first_id + quantity as u64);
        set_total_raised(&env, get_total_raised(&env) + payment);

        env.events()
            .publish(("mint",), (minter, first_id, quantity, payment));

        Ok(first_id)
    }

    /// Approve `spender` to transfer a single owned unit.
    pub fn approve(env: Env, owner: Address, spender: Address, token_id: u64) -> Result<(), Error> {
        owner.require_auth();

        let holder = get_token_owner(&env, token_id).ok_or(Error::TokenNotFound)?;
        if holder != owner {
            return Err(Error::NotTokenOwner);
        }

        set_approved(&env, token_id, &spender);
        env.events().publish(("approval",), (owner, spender, token_id));

        Ok(())
    }

    /// Reassign ownership of one unit. `spender` must be the owner or the
    /// approved address for the unit; any approval is cleared on transfer.
    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        token_id: u64,
    ) -> Result<(), Error> {
        spender.require_auth();

        let owner = get_token_owner(&env, token_id).ok_or(Error::TokenNotFound)?;
        if owner != from {
            return Err(Error::NotTokenOwner);
        }
        if spender != from && get_approved(&env, token_id) != Some(spender.clone()) {
            return Err(Error::NotApproved);
        }
        if to == from {
            return Err(Error::InvalidRecipient);
        }

        set_token_owner(&env, token_id, &to);
        clear_approved(&env, token_id);
        set_owner_count(&env, &from, get_owner_count(&env, &from) - 1);
        set_owner_count(&env, &to, get_owner_count(&env, &to) + 1);

        env.events().publish(("transfer",), (from, to, token_id));

        Ok(())
    }

    /// Drain the full accumulated payment balance to the administrator.
    pub fn withdraw(env: Env, caller: Address) -> Result<i128, Error> {
        require_admin(&env, &caller)?;

        let config = get_config(&env).ok_or(Error::NotInitialized)?;
        let token_client = token::Client::new(&env, &config.payment_token);
        let balance = token_client.balance(&env.current_contract_address());
        if balance <= 0 {
            return Err(Error::NothingToWithdraw);
        }

        token_client.transfer(&env.current_contract_address(), &caller, &balance);
        env.events().publish(("withdraw",), (caller, balance));

        Ok(balance)
    }

    // View functions

    pub fn balance_of(env: Env, owner: Address) -> u32 {
        get_owner_count(&env, &owner)
    }

    pub fn owner_of(env: Env, token_id: u64) -> Result<Address, Error> {
        get_token_owner(&env, token_id).ok_or(Error::TokenNotFound)
    }

    pub fn get_approved(env: Env, token_id: u64) -> Result<Option<Address>, Error> {
        if get_token_owner(&env, token_id).is_none() {
            return Err(Error::TokenNotFound);
        }
        Ok(get_approved(&env, token_id))
    }

    /// Price per unit right now. Fails while the sale is closed.
    pub fn current_price(env: Env) -> Result<i128, Error> {
        let elapsed = sale_elapsed(&env)?;
        let phases = get_phases(&env).ok_or(Error::NotInitialized)?;
        Ok(pricing::price_at(&phases, elapsed))
    }

    /// Price per unit at a given elapsed time, for off-chain planning.
    pub fn price_at(env: Env, elapsed: u64) -> Result<i128, Error> {
        let phases = get_phases(&env).ok_or(Error::NotInitialized)?;
        Ok(pricing::price_at(&phases, elapsed))
    }

    /// Index of the phase the sale is currently in.
    pub fn current_phase(env: Env) -> Result<u32, Error> {
        let elapsed = sale_elapsed(&env)?;
        let phases = get_phases(&env).ok_or(Error::NotInitialized)?;
        Ok(pricing::phase_at(&phases, elapsed).0)
    }

    pub fn get_phases(env: Env) -> Result<Vec<PricePhase>, Error> {
        get_phases(&env).ok_or(Error::NotInitialized)
    }

    pub fn get_config(env: Env) -> Result<SaleConfig, Error> {
        get_config(&env).ok_or(Error::NotInitialized)
    }

    pub fn admin(env: Env) -> Result<Address, Error> {
        get_admin(&env).ok_or(Error::NotInitialized)
    }

    pub fn sale_status(env: Env) -> SaleStatus {
        get_status(&env)
    }

    pub fn opened_at(env: Env) -> Result<u64, Error> {
        get_opened_at(&env).ok_or(Error::SaleNotOpen)
    }

    pub fn is_revealed(env: Env) -> bool {
        get_status(&env) == SaleStatus::Revealed
    }

    pub fn base_uri(env: Env) -> Result<String, Error> {
        get_base_uri(&env).ok_or(Error::NotInitialized)
    }

    pub fn total_minted(env: Env) -> u64 {
        get_next_token_id(&env)
    }

    pub fn total_raised(env: Env) -> i128 {
        get_total_raised(&env)
    }
}
