//! Protocol Config - Loan terms, score validity and borrowing limits
//!
//! Holds the parameters shared by the loan ledger and the pools, plus the
//! rolling borrow-limit counters. Daily counters are keyed by the
//! wall-clock day index and reset implicitly when the day changes.
//! Lifetime counters track outstanding principal and are released when a
//! loan reaches a terminal status. A limit of zero means unlimited.

use odra::prelude::*;
use odra::casper_types::U256;
use super::errors::LendingError;
use super::math::{ACCRUAL_PERIOD_MS, DAY_MS};

/// One day-window counter
#[odra::odra_type]
pub struct DailyUsage {
    /// Day index the counter belongs to (`now / DAY_MS`)
    pub day: u64,
    /// Amount borrowed within that day
    pub amount: U256,
}

/// Borrow limits, grouped in a sub-module to stay within the
/// 15-field cap `#[odra::module]` imposes on a single struct
#[odra::module]
pub struct BorrowLimits {
    /// Global daily borrow limit
    daily_limit: Var<U256>,
    /// Per-user daily borrow limit
    user_daily_limit: Var<U256>,
    /// Per-identity daily borrow limit
    nfcs_daily_limit: Var<U256>,
    /// Global outstanding principal limit
    total_limit: Var<U256>,
    /// Per-user outstanding principal limit
    user_total_limit: Var<U256>,
    /// Per-identity outstanding principal limit
    nfcs_total_limit: Var<U256>,
}

/// Protocol Config contract
#[odra::module]
pub struct ProtocolConfig {
    /// Contract owner
    owner: Var<Address>,
    /// Loan ledger allowed to move the counters
    loan_ledger: Var<Address>,

    /// Loan term in milliseconds
    loan_duration: Var<u64>,
    /// Post-maturity window before a loan becomes liquidatable
    grace_period: Var<u64>,
    /// Plain-integer factor applied to the per-period rate past maturity
    penalty_multiplier: Var<U256>,
    /// Maximum age of a credit score at origination
    score_validity: Var<u64>,
    /// Interest accrual cadence in milliseconds
    accrual_period: Var<u64>,

    /// Borrow limits
    limits: SubModule<BorrowLimits>,

    /// Global daily counter
    global_daily: Var<DailyUsage>,
    /// Per-user daily counters
    user_daily: Mapping<Address, DailyUsage>,
    /// Per-identity daily counters
    nfcs_daily: Mapping<u64, DailyUsage>,
    /// Global outstanding principal
    global_total: Var<U256>,
    /// Per-user outstanding principal
    user_total: Mapping<Address, U256>,
    /// Per-identity outstanding principal
    nfcs_total: Mapping<u64, U256>,
}

#[odra::module]
impl ProtocolConfig {
    /// Initialize with 30-day term, 20-day grace and no borrow limits
    pub fn init(&mut self) {
        let caller = self.env().caller();
        self.owner.set(caller);
        self.loan_duration.set(30 * DAY_MS);
        self.grace_period.set(20 * DAY_MS);
        self.penalty_multiplier.set(U256::from(2u64));
        self.score_validity.set(30 * DAY_MS);
        self.accrual_period.set(ACCRUAL_PERIOD_MS);
        self.global_total.set(U256::zero());
    }

    // ========================================
    // Parameters
    // ========================================

    pub fn loan_duration(&self) -> u64 {
        self.loan_duration.get_or_default()
    }

    pub fn grace_period(&self) -> u64 {
        self.grace_period.get_or_default()
    }

    pub fn penalty_multiplier(&self) -> U256 {
        self.penalty_multiplier.get_or_default()
    }

    pub fn score_validity(&self) -> u64 {
        self.score_validity.get_or_default()
    }

    pub fn accrual_period(&self) -> u64 {
        self.accrual_period.get_or_default()
    }

    /// Set the loan term (owner only)
    pub fn set_loan_duration(&mut self, duration: u64) {
        self.only_owner();
        self.loan_duration.set(duration);
    }

    /// Set the grace period (owner only)
    pub fn set_grace_period(&mut self, period: u64) {
        self.only_owner();
        self.grace_period.set(period);
    }

    /// Set the late-penalty multiplier (owner only)
    pub fn set_penalty_multiplier(&mut self, multiplier: U256) {
        self.only_owner();
        self.penalty_multiplier.set(multiplier);
    }

    /// Set the score validity window (owner only)
    pub fn set_score_validity(&mut self, validity: u64) {
        self.only_owner();
        self.score_validity.set(validity);
    }

    /// Set all borrow limits at once (owner only); zero disables a limit
    pub fn set_limits(
        &mut self,
        daily: U256,
        user_daily: U256,
        nfcs_daily: U256,
        total: U256,
        user_total: U256,
        nfcs_total: U256,
    ) {
        self.only_owner();
        self.limits.daily_limit.set(daily);
        self.limits.user_daily_limit.set(user_daily);
        self.limits.nfcs_daily_limit.set(nfcs_daily);
        self.limits.total_limit.set(total);
        self.limits.user_total_limit.set(user_total);
        self.limits.nfcs_total_limit.set(nfcs_total);
    }

    /// Set the loan ledger allowed to move counters (owner only)
    pub fn set_loan_ledger(&mut self, ledger: Address) {
        self.only_owner();
        self.loan_ledger.set(ledger);
    }

    // ========================================
    // Limit counters
    // ========================================

    /// Validate a borrow against every limit and record it (loan ledger only).
    ///
    /// The whole check runs before any counter moves, so a failed borrow
    /// leaves all counters untouched.
    pub fn register_borrow(&mut self, borrower: Address, nfcs_id: u64, amount: U256) {
        self.only_loan_ledger();

        let today = self.env().get_block_time() / DAY_MS;

        let global_day = Self::current(self.global_daily.get(), today) + amount;
        let user_day = Self::current(self.user_daily.get(&borrower), today) + amount;
        let nfcs_day = Self::current(self.nfcs_daily.get(&nfcs_id), today) + amount;
        let global_total = self.global_total.get_or_default() + amount;
        let user_total = self.user_total.get(&borrower).unwrap_or_default() + amount;
        let nfcs_total = self.nfcs_total.get(&nfcs_id).unwrap_or_default() + amount;

        self.ensure_within(user_day, self.limits.user_daily_limit.get_or_default(), LendingError::UserDailyLimitExceeded);
        self.ensure_within(nfcs_day, self.limits.nfcs_daily_limit.get_or_default(), LendingError::NfcsDailyLimitExceeded);
        self.ensure_within(global_day, self.limits.daily_limit.get_or_default(), LendingError::DailyLimitExceeded);
        self.ensure_within(user_total, self.limits.user_total_limit.get_or_default(), LendingError::UserTotalLimitExceeded);
        self.ensure_within(nfcs_total, self.limits.nfcs_total_limit.get_or_default(), LendingError::NfcsTotalLimitExceeded);
        self.ensure_within(global_total, self.limits.total_limit.get_or_default(), LendingError::TotalLimitExceeded);

        self.global_daily.set(DailyUsage { day: today, amount: global_day });
        self.user_daily.set(&borrower, DailyUsage { day: today, amount: user_day });
        self.nfcs_daily.set(&nfcs_id, DailyUsage { day: today, amount: nfcs_day });
        self.global_total.set(global_total);
        self.user_total.set(&borrower, user_total);
        self.nfcs_total.set(&nfcs_id, nfcs_total);
    }

    /// Release outstanding principal when a loan reaches a terminal status
    /// (loan ledger only). Daily counters are left alone; they measure
    /// origination volume, not live exposure.
    pub fn register_settlement(&mut self, borrower: Address, nfcs_id: u64, principal: U256) {
        self.only_loan_ledger();

        let global = self.global_total.get_or_default();
        self.global_total.set(global.saturating_sub(principal));

        let user = self.user_total.get(&borrower).unwrap_or_default();
        self.user_total.set(&borrower, user.saturating_sub(principal));

        let nfcs = self.nfcs_total.get(&nfcs_id).unwrap_or_default();
        self.nfcs_total.set(&nfcs_id, nfcs.saturating_sub(principal));
    }

    /// Amount borrowed protocol-wide within the current day window
    pub fn get_global_daily_borrowed_amount(&self) -> U256 {
        let today = self.env().get_block_time() / DAY_MS;
        Self::current(self.global_daily.get(), today)
    }

    /// Amount borrowed by a user within the current day window
    pub fn get_user_daily_borrowed_amount(&self, user: Address) -> U256 {
        let today = self.env().get_block_time() / DAY_MS;
        Self::current(self.user_daily.get(&user), today)
    }

    /// Outstanding principal for a user
    pub fn get_user_total_borrowed_amount(&self, user: Address) -> U256 {
        self.user_total.get(&user).unwrap_or_default()
    }

    /// Outstanding principal protocol-wide
    pub fn get_global_total_borrowed_amount(&self) -> U256 {
        self.global_total.get_or_default()
    }

    fn current(usage: Option<DailyUsage>, today: u64) -> U256 {
        match usage {
            Some(u) if u.day == today => u.amount,
            _ => U256::zero(),
        }
    }

    fn ensure_within(&self, value: U256, limit: U256, error: LendingError) {
        if !limit.is_zero() && value > limit {
            self.env().revert(error);
        }
    }

    fn only_owner(&self) {
        let caller = self.env().caller();
        let owner = self.owner.get_or_revert_with(LendingError::Unauthorized);
        if caller != owner {
            self.env().revert(LendingError::Unauthorized);
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
