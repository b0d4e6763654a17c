//! Lending Pool - Share-priced liquidity vault and borrow entry point
//!
//! Lenders deposit the principal asset and receive pool shares priced
//! against the pool's value: its treasury balance plus everything
//! currently out on loan (principal and accrued interest). Borrowers
//! enter through `borrow`, which forwards to the loan ledger with this
//! pool as the funding source.
//!
//! The reserve rate controls what fraction of incoming value is retained
//! by the pool versus earmarked for revenue payees; at the default 100%
//! deposits and withdrawals are plain pro-rata.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use super::errors::LendingError;
use super::events::*;
use super::loan_ledger::LoanLedgerContractRef;
use super::math::{one_hundred_percent, LoanMath};
use super::revenue_treasury::RevenueTreasuryContractRef;
use crate::token::Cep18TokenContractRef;

/// Lending Pool contract
#[odra::module]
pub struct LendingPool {
    /// Pool admin
    admin: Var<Address>,
    /// Loan ledger address
    loan_ledger: Var<Address>,
    /// Revenue treasury address
    treasury: Var<Address>,
    /// Principal asset address
    asset_token: Var<Address>,

    /// Fraction of incoming value retained by the pool (100e18 = 100%)
    reserve_rate: Var<U256>,
    /// Annual interest rate charged on loans from this pool (100e18 = 100%)
    interest_rate_annual: Var<U256>,
    /// Credit scores this pool lends to
    allowed_scores: Var<Vec<u8>>,

    /// Share balance per holder
    balances: Mapping<Address, U256>,
    /// Total shares outstanding
    total_shares: Var<U256>,
    /// Paused state
    paused: Var<bool>,
}

#[odra::module]
impl LendingPool {
    /// Initialize the pool
    pub fn init(
        &mut self,
        loan_ledger: Address,
        treasury: Address,
        asset_token: Address,
        interest_rate_annual: U256,
        allowed_scores: Vec<u8>,
    ) {
        if interest_rate_annual.is_zero() {
            self.env().revert(LendingError::ZeroAmount);
        }
        let caller = self.env().caller();
        self.admin.set(caller);
        self.loan_ledger.set(loan_ledger);
        self.treasury.set(treasury);
        self.asset_token.set(asset_token);
        self.interest_rate_annual.set(interest_rate_annual);
        self.reserve_rate.set(one_hundred_percent());
        self.allowed_scores.set(allowed_scores);
        self.total_shares.set(U256::zero());
        self.paused.set(false);
    }

    // ========================================
    // Vault
    // ========================================

    /// Deposit principal asset, receive pool shares. The first deposit
    /// mints 1:1; afterwards shares are priced against pool value.
    pub fn deposit_pool(&mut self, amount: U256) -> U256 {
        self.ensure_not_paused();
        if amount.is_zero() {
            self.env().revert(LendingError::ZeroAmount);
        }
        let caller = self.env().caller();
        let supply = self.total_shares.get_or_default();

        // Price against the pool value before this deposit lands
        let shares = if supply.is_zero() {
            amount
        } else {
            LoanMath::deposit_shares(
                amount,
                self.pool_value(),
                supply,
                self.reserve_rate.get_or_default(),
            )
            .unwrap_or_revert(&self.env())
        };

        let treasury_addr = self.treasury.get_or_revert_with(LendingError::Unauthorized);
        let asset = self.asset_token.get_or_revert_with(LendingError::Unauthorized);
        let mut token = Cep18TokenContractRef::new(self.env(), asset);
        token.transfer_from(caller, treasury_addr, amount);
        let mut treasury = RevenueTreasuryContractRef::new(self.env(), treasury_addr);
        treasury.deposit(caller, amount);

        self.balances
            .set(&caller, self.balances.get(&caller).unwrap_or_default() + shares);
        self.total_shares.set(supply + shares);

        self.env().emit_event(PoolDeposited {
            user: caller,
            amount,
            shares,
            timestamp: self.env().get_block_time(),
        });
        shares
    }

    /// Burn pool shares, receive principal asset from the treasury
    pub fn withdrawal_pool(&mut self, shares: U256) -> U256 {
        self.ensure_not_paused();
        if shares.is_zero() {
            self.env().revert(LendingError::ZeroAmount);
        }
        let caller = self.env().caller();
        let balance = self.balances.get(&caller).unwrap_or_default();
        if shares > balance {
            self.env().revert(LendingError::NotEnoughFunds);
        }
        let supply = self.total_shares.get_or_default();

        let amount = LoanMath::withdrawal_amount(
            shares,
            self.pool_value(),
            supply,
            self.reserve_rate.get_or_default(),
        )
        .unwrap_or_revert(&self.env());

        let treasury_addr = self.treasury.get_or_revert_with(LendingError::Unauthorized);
        let mut treasury = RevenueTreasuryContractRef::new(self.env(), treasury_addr);
        let self_addr = Address::from(self.env().self_address());
        if amount > treasury.balance_available(self_addr) {
            self.env().revert(LendingError::NotEnoughFunds);
        }

        self.balances.set(&caller, balance - shares);
        self.total_shares.set(supply - shares);
        treasury.request_funds(self_addr, amount, caller);

        self.env().emit_event(PoolWithdrawn {
            user: caller,
            amount,
            shares,
            timestamp: self.env().get_block_time(),
        });
        amount
    }

    /// Add liquidity without minting shares, raising the share price for
    /// existing holders (admin only). Used to return liquidation proceeds.
    pub fn deposit_without_mint(&mut self, amount: U256) {
        self.only_admin();
        if amount.is_zero() {
            self.env().revert(LendingError::ZeroAmount);
        }
        let caller = self.env().caller();
        let treasury_addr = self.treasury.get_or_revert_with(LendingError::Unauthorized);
        let asset = self.asset_token.get_or_revert_with(LendingError::Unauthorized);
        let mut token = Cep18TokenContractRef::new(self.env(), asset);
        token.transfer_from(caller, treasury_addr, amount);
        let mut treasury = RevenueTreasuryContractRef::new(self.env(), treasury_addr);
        treasury.credit(amount);

        self.env().emit_event(DepositedWithoutMint {
            user: caller,
            amount,
            timestamp: self.env().get_block_time(),
        });
    }

    // ========================================
    // Lending
    // ========================================

    /// Borrow from this pool against collateral already posted with the
    /// loan ledger. Returns the new loan id.
    pub fn borrow(&mut self, amount: U256, collateral_asset: Address) -> u64 {
        self.ensure_not_paused();
        let caller = self.env().caller();
        let ledger_addr = self.loan_ledger.get_or_revert_with(LendingError::Unauthorized);
        let mut ledger = LoanLedgerContractRef::new(self.env(), ledger_addr);
        ledger.configure_new(caller, amount, collateral_asset)
    }

    /// Drive interest accrual on loans funded by this pool
    pub fn collect(&mut self, loan_ids: Vec<u64>) -> Vec<U256> {
        self.ensure_not_paused();
        let ledger_addr = self.loan_ledger.get_or_revert_with(LendingError::Unauthorized);
        let mut ledger = LoanLedgerContractRef::new(self.env(), ledger_addr);
        ledger.collect(loan_ids)
    }

    /// Send pool funds held by the treasury to a recipient (admin only)
    pub fn send_funds(&mut self, to: Address, amount: U256) {
        self.only_admin();
        let treasury_addr = self.treasury.get_or_revert_with(LendingError::Unauthorized);
        let mut treasury = RevenueTreasuryContractRef::new(self.env(), treasury_addr);
        treasury.request_funds(Address::from(self.env().self_address()), amount, to);
    }

    // ========================================
    // Views
    // ========================================

    /// Treasury balance plus everything out on loan from this pool
    pub fn pool_value(&self) -> U256 {
        let self_addr = Address::from(self.env().self_address());
        let treasury_addr = self.treasury.get_or_revert_with(LendingError::Unauthorized);
        let treasury = RevenueTreasuryContractRef::new(self.env(), treasury_addr);
        let ledger_addr = self.loan_ledger.get_or_revert_with(LendingError::Unauthorized);
        let ledger = LoanLedgerContractRef::new(self.env(), ledger_addr);
        treasury.balance_available(self_addr) + ledger.pool_outstanding(self_addr)
    }

    /// Share balance of a holder
    pub fn balance_of(&self, holder: Address) -> U256 {
        self.balances.get(&holder).unwrap_or_default()
    }

    /// Total shares outstanding
    pub fn total_shares(&self) -> U256 {
        self.total_shares.get_or_default()
    }

    /// Annual interest rate charged on loans from this pool
    pub fn interest_rate_annual(&self) -> U256 {
        self.interest_rate_annual.get_or_default()
    }

    /// Fraction of incoming value retained by the pool
    pub fn reserve_rate(&self) -> U256 {
        self.reserve_rate.get_or_default()
    }

    /// Whether this pool lends to a given credit score
    pub fn is_score_allowed(&self, score: u8) -> bool {
        self.allowed_scores.get_or_default().contains(&score)
    }

    // ========================================
    // Administration
    // ========================================

    /// Set the reserve rate (admin only)
    pub fn set_reserve_rate(&mut self, reserve_rate: U256) {
        self.only_admin();
        if reserve_rate.is_zero() || reserve_rate > one_hundred_percent() {
            self.env().revert(LendingError::ZeroAmount);
        }
        self.reserve_rate.set(reserve_rate);
    }

    /// Set the annual interest rate for new loans (admin only)
    pub fn set_interest_rate_annual(&mut self, rate: U256) {
        self.only_admin();
        if rate.is_zero() {
            self.env().revert(LendingError::ZeroAmount);
        }
        self.interest_rate_annual.set(rate);
    }

    /// Replace the allowed score set (admin only)
    pub fn set_allowed_scores(&mut self, scores: Vec<u8>) {
        self.only_admin();
        self.allowed_scores.set(scores);
    }

    /// Pause the pool's entry points (admin only)
    pub fn pause(&mut self) {
        self.only_admin();
        self.paused.set(true);
        self.env().emit_event(ContractPausedEvent {
            account: self.env().caller(),
            timestamp: self.env().get_block_time(),
        });
    }

    /// Unpause the pool (admin only)
    pub fn unpause(&mut self) {
        self.only_admin();
        self.paused.set(false);
        self.env().emit_event(ContractUnpausedEvent {
            account: self.env().caller(),
            timestamp: self.env().get_block_time(),
        });
    }

    /// Whether the pool is paused
    pub fn is_paused(&self) -> bool {
        self.paused.get_or_default()
    }

    /// Get the pool admin
    pub fn get_admin(&self) -> Address {
        self.admin.get_or_revert_with(LendingError::Unauthorized)
    }

    fn ensure_not_paused(&self) {
        if self.paused.get_or_default() {
            self.env().revert(LendingError::ContractPaused);
        }
    }

    fn only_admin(&self) {
        let caller = self.env().caller();
        let admin = self.admin.get_or_revert_with(LendingError::Unauthorized);
        if caller != admin {
            self.env().revert(LendingError::Unauthorized);
        }
    }
}
