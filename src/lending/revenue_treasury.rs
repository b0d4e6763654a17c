//! Revenue Treasury - Fund custody and proportional distribution
//!
//! Holds every pool's liquidity in one place and splits incoming funds
//! across a weighted payee table. Distribution uses floor division per
//! payee; whatever rounding dust remains is credited to the destination
//! pool, so the sum of payouts and the pool credit always equals the
//! incoming amount exactly. A payee entry carrying the pool's own address
//! is credited to the pool's balance instead of being transferred out.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use super::errors::LendingError;
use super::events::{ContractPausedEvent, ContractUnpausedEvent, FundsRequested, RevenueDistributed, RevenueSharesChanged};
use crate::token::Cep18TokenContractRef;

/// One row of the revenue share table
#[odra::odra_type]
pub struct RevenueShare {
    /// Recipient of this slice
    pub payee: Address,
    /// Weight relative to the table's total
    pub weight: U256,
}

/// Revenue Treasury contract
#[odra::module]
pub struct RevenueTreasury {
    /// Contract owner
    owner: Var<Address>,
    /// Loan ledger allowed to route repayments and disbursements
    loan_ledger: Var<Address>,
    /// Pools allowed to deposit and request funds
    pools: Mapping<Address, bool>,
    /// Asset held in custody
    asset_token: Var<Address>,

    /// Custodied balance per pool
    balances: Mapping<Address, U256>,
    /// Ordered payee table with stable indices
    shares: Var<Vec<RevenueShare>>,
    /// Sum of all weights
    total_shares: Var<U256>,
    /// Paused state
    paused: Var<bool>,
}

#[odra::module]
impl RevenueTreasury {
    /// Initialize the treasury for one custody asset
    pub fn init(&mut self, asset_token: Address) {
        let caller = self.env().caller();
        self.owner.set(caller);
        self.asset_token.set(asset_token);
        self.shares.set(Vec::new());
        self.total_shares.set(U256::zero());
        self.paused.set(false);
    }

    /// Set the loan ledger address (owner only)
    pub fn set_loan_ledger(&mut self, ledger: Address) {
        self.only_owner();
        self.loan_ledger.set(ledger);
    }

    /// Allow a pool to use the treasury (owner only)
    pub fn register_pool(&mut self, pool: Address) {
        self.only_owner();
        self.pools.set(&pool, true);
    }

    // ========================================
    // Share table
    // ========================================

    /// Append payees to the share table (owner only)
    pub fn add_shares(&mut self, payees: Vec<Address>, weights: Vec<U256>) {
        self.only_owner();
        if payees.len() != weights.len() {
            self.env().revert(LendingError::LengthMismatch);
        }
        let mut table = self.shares.get_or_default();
        let mut total = self.total_shares.get_or_default();
        for (payee, weight) in payees.into_iter().zip(weights.into_iter()) {
            total += weight;
            table.push(RevenueShare { payee, weight });
        }
        let payee_count = table.len() as u32;
        self.shares.set(table);
        self.total_shares.set(total);

        self.env().emit_event(RevenueSharesChanged {
            payee_count,
            total_shares: total,
            timestamp: self.env().get_block_time(),
        });
    }

    /// Remove payees by index (owner only). Indices refer to the table as
    /// it stands when the call is made and must be unique within one call.
    pub fn remove_shares(&mut self, indices: Vec<u32>) {
        self.only_owner();
        let mut table = self.shares.get_or_default();
        let mut total = self.total_shares.get_or_default();

        for (i, a) in indices.iter().enumerate() {
            if *a as usize >= table.len() {
                self.env().revert(LendingError::ShareIndexOutOfBounds);
            }
            for b in &indices[i + 1..] {
                if a == b {
                    self.env().revert(LendingError::UniqueIndexes);
                }
            }
        }

        // Remove back-to-front so earlier indices stay valid
        let mut sorted = indices;
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        for index in sorted {
            let removed = table.remove(index as usize);
            total -= removed.weight;
        }
        let payee_count = table.len() as u32;
        self.shares.set(table);
        self.total_shares.set(total);

        self.env().emit_event(RevenueSharesChanged {
            payee_count,
            total_shares: total,
            timestamp: self.env().get_block_time(),
        });
    }

    /// The current payee table
    pub fn get_shares(&self) -> Vec<RevenueShare> {
        self.shares.get_or_default()
    }

    /// Sum of all registered weights
    pub fn total_shares(&self) -> U256 {
        self.total_shares.get_or_default()
    }

    // ========================================
    // Fund flow
    // ========================================

    /// Record an incoming pool deposit and run the waterfall over it
    /// (registered pools only). The pool moves the tokens into custody
    /// before calling.
    pub fn deposit(&mut self, from: Address, amount: U256) {
        self.ensure_not_paused();
        let pool = self.env().caller();
        self.only_pool(pool);
        self.distribute(pool, from, amount);
    }

    /// Record an incoming loan repayment for `pool` and run the waterfall
    /// over it (loan ledger only).
    pub fn payment(&mut self, pool: Address, payer: Address, amount: U256) {
        self.ensure_not_paused();
        self.only_loan_ledger();
        self.distribute(pool, payer, amount);
    }

    /// Credit funds to the calling pool without distribution (registered
    /// pools only). Used to return liquidation proceeds.
    pub fn credit(&mut self, amount: U256) {
        self.ensure_not_paused();
        let pool = self.env().caller();
        self.only_pool(pool);
        let balance = self.balances.get(&pool).unwrap_or_default();
        self.balances.set(&pool, balance + amount);
    }

    /// Pay out custodied funds for a pool. Callable by that pool itself or
    /// by the loan ledger disbursing a loan.
    pub fn request_funds(&mut self, pool: Address, amount: U256, to: Address) {
        self.ensure_not_paused();
        let caller = self.env().caller();
        let is_ledger = self
            .loan_ledger
            .get()
            .map(|l| l == caller)
            .unwrap_or_default();
        let is_pool = caller == pool && self.pools.get(&pool).unwrap_or_default();
        if !is_ledger && !is_pool {
            self.env().revert(LendingError::Unauthorized);
        }

        let balance = self.balances.get(&pool).unwrap_or_default();
        if amount > balance {
            self.env().revert(LendingError::NotEnoughFunds);
        }
        self.balances.set(&pool, balance - amount);

        let asset = self.asset_token.get_or_revert_with(LendingError::Unauthorized);
        let mut token = Cep18TokenContractRef::new(self.env(), asset);
        token.transfer(to, amount);

        self.env().emit_event(FundsRequested {
            pool,
            to,
            amount,
            timestamp: self.env().get_block_time(),
        });
    }

    /// Custodied balance attributable to a pool
    pub fn balance_available(&self, pool: Address) -> U256 {
        self.balances.get(&pool).unwrap_or_default()
    }

    /// Sweep the treasury's entire balance of `asset` to `to` (owner only)
    pub fn withdraw_token(&mut self, asset: Address, to: Address) {
        self.only_owner();
        let mut token = Cep18TokenContractRef::new(self.env(), asset);
        let balance = token.balance_of(Address::from(self.env().self_address()));
        if !balance.is_zero() {
            token.transfer(to, balance);
        }
    }

    // ========================================
    // Pausing
    // ========================================

    /// Pause fund movement (owner only)
    pub fn pause(&mut self) {
        self.only_owner();
        self.paused.set(true);
        self.env().emit_event(ContractPausedEvent {
            account: self.env().caller(),
            timestamp: self.env().get_block_time(),
        });
    }

    /// Resume fund movement (owner only)
    pub fn unpause(&mut self) {
        self.only_owner();
        self.paused.set(false);
        self.env().emit_event(ContractUnpausedEvent {
            account: self.env().caller(),
            timestamp: self.env().get_block_time(),
        });
    }

    /// Whether the treasury is paused
    pub fn is_paused(&self) -> bool {
        self.paused.get_or_default()
    }

    // ========================================
    // Internal
    // ========================================

    /// Split `amount` across the payee table and credit the rest to the
    /// pool. Floor division per payee; the residual goes to the pool, so
    /// the split conserves the input exactly.
    fn distribute(&mut self, pool: Address, source: Address, amount: U256) {
        let table = self.shares.get_or_default();
        let total = self.total_shares.get_or_default();

        // With no payees registered the pool keeps everything. Otherwise
        // each payee takes floor(amount * weight / total); slices addressed
        // to the pool itself and the rounding residual stay with the pool.
        let mut pool_amount = amount;
        if !total.is_zero() {
            let asset = self.asset_token.get_or_revert_with(LendingError::Unauthorized);
            let mut token = Cep18TokenContractRef::new(self.env(), asset);
            let mut paid_out = U256::zero();
            for share in &table {
                let slice = amount * share.weight / total;
                if share.payee != pool && !slice.is_zero() {
                    token.transfer(share.payee, slice);
                    paid_out += slice;
                }
            }
            pool_amount = amount - paid_out;
        }

        let balance = self.balances.get(&pool).unwrap_or_default();
        self.balances.set(&pool, balance + pool_amount);

        self.env().emit_event(RevenueDistributed {
            pool,
            source,
            amount,
            pool_amount,
            timestamp: self.env().get_block_time(),
        });
    }

    fn ensure_not_paused(&self) {
        if self.paused.get_or_default() {
            self.env().revert(LendingError::ContractPaused);
        }
    }

    fn only_owner(&self) {
        let caller = self.env().caller();
        let owner = self.owner.get_or_revert_with(LendingError::Unauthorized);
        if caller != owner {
            self.env().revert(LendingError::Unauthorized);
        }
    }

    fn only_pool(&self, pool: Address) {
        if !self.pools.get(&pool).unwrap_or_default() {
            self.env().revert(LendingError::CallerNotPool);
        }
    }

    fn only_loan_ledger(&self) {
        let caller = self.env().caller();
        let ledger = self
            .loan_ledger
            .get_or_revert_with(LendingError::CallerNotLoanLedger);
        if caller != ledger {
            self.env().revert(LendingError::CallerNotLoanLedger);
        }
    }
}
