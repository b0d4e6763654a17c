//! Loan Ledger - Loan lifecycle, interest accrual and liquidation
//!
//! Owns every loan record and is the sole mutator of loan status. Pools
//! originate loans through `configure_new`; borrowers service them through
//! `payment` and manage collateral through `add_collateral` /
//! `claim_collateral`; anyone may drive accrual with `collect`; a
//! designated liquidator settles delinquent loans with `liquidate_loans`.
//!
//! Collaborators are injected as addresses at init: the collateral ledger
//! (custody), the price and score oracles, the identity registry, the
//! protocol config (terms and borrow limits) and the revenue treasury
//! (fund custody and waterfall).

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use super::errors::LendingError;
use super::events::*;
use super::math::{LoanMath, SafeMath, DAY_MS, ONE_HUNDRED_PERCENT};
use super::collateral_ledger::CollateralLedgerContractRef;
use super::config::ProtocolConfigContractRef;
use super::identity::CreditIdentityContractRef;
use super::lending_pool::LendingPoolContractRef;
use super::price_oracle::PriceOracleContractRef;
use super::revenue_treasury::RevenueTreasuryContractRef;
use super::score_oracle::ScoreOracleContractRef;
use crate::token::Cep18TokenContractRef;

/// Loan lifecycle states. `Late` is never persisted; it is reported by
/// `current_status` for open loans past maturity.
#[odra::odra_type]
pub enum LoanStatus {
    Unissued,
    New,
    Approved,
    PaidPart,
    PaidLate,
    Closed,
    Default,
    Late,
}

/// A loan record
#[odra::odra_type]
pub struct Loan {
    /// Loan id
    pub id: u64,
    /// Borrower address
    pub borrower: Address,
    /// Pool the principal was drawn from
    pub pool: Address,
    /// Collateral asset backing the loan
    pub collateral_asset: Address,
    /// Principal disbursed at issuance
    pub principal: U256,
    /// Annual interest rate snapshot (100e18 = 100%)
    pub interest_rate_annual: U256,
    /// Accrual cadence in milliseconds
    pub accrual_period: u64,
    /// Issuance timestamp
    pub issue_date: u64,
    /// Maturity timestamp
    pub maturity_date: u64,
    /// Last accrual grid point, advances in whole periods
    pub last_accrual_time: u64,
    /// Principal plus all accrued interest
    pub total_payments_value: U256,
    /// Amount repaid or recovered so far
    pub payment_complete: U256,
    /// Loan-to-value snapshot at issuance
    pub ltv: U256,
    /// Liquidation threshold snapshot at issuance
    pub lt: U256,
    /// Persisted status
    pub status: LoanStatus,
    /// Credit score the loan was issued under
    pub score: u8,
}

impl Loan {
    /// Unpaid balance
    pub fn outstanding(&self) -> U256 {
        self.total_payments_value - self.payment_complete
    }

    /// Whether the loan can still accrue and be repaid
    pub fn is_open(&self) -> bool {
        matches!(self.status, LoanStatus::Approved | LoanStatus::PaidPart)
    }
}

/// Per-loan result of a liquidation batch
#[odra::odra_type]
pub enum LiquidationOutcome {
    /// Collateral was seized against the loan; `success` is true when the
    /// seizure covered the full outstanding debt
    Seized {
        loan_id: u64,
        amount: U256,
        success: bool,
    },
    /// An earlier seizure in the batch restored the borrower's solvency,
    /// so this loan no longer required collateral
    Skipped { loan_id: u64 },
}

/// Loan Ledger contract
#[odra::module]
pub struct LoanLedger {
    /// Contract owner
    owner: Var<Address>,
    /// Account allowed to run liquidations
    liquidator: Var<Address>,
    /// Collateral ledger address
    collateral_ledger: Var<Address>,
    /// Price oracle address
    price_oracle: Var<Address>,
    /// Score oracle address
    score_oracle: Var<Address>,
    /// Credit identity registry address
    identity: Var<Address>,
    /// Protocol config address
    config: Var<Address>,
    /// Revenue treasury address
    treasury: Var<Address>,
    /// Principal asset (stablecoin) address
    asset_token: Var<Address>,

    /// Loan records by id
    loans: Mapping<u64, Loan>,
    /// Loan id by (borrower, sequence)
    loan_ids: Mapping<(Address, u64), u64>,
    /// Number of loans ever issued to a borrower
    loan_counts: Mapping<Address, u64>,
    /// Next loan id
    next_loan_id: Var<u64>,

    /// Outstanding principal plus accrued interest per pool
    pool_outstanding: Mapping<Address, U256>,
    /// Pools allowed to originate loans
    pools: Mapping<Address, bool>,
}

#[odra::module]
impl LoanLedger {
    /// Initialize the ledger with its collaborator addresses
    pub fn init(
        &mut self,
        collateral_ledger: Address,
        price_oracle: Address,
        score_oracle: Address,
        identity: Address,
        config: Address,
        treasury: Address,
        asset_token: Address,
    ) {
        let caller = self.env().caller();
        self.owner.set(caller);
        self.liquidator.set(caller);
        self.collateral_ledger.set(collateral_ledger);
        self.price_oracle.set(price_oracle);
        self.score_oracle.set(score_oracle);
        self.identity.set(identity);
        self.config.set(config);
        self.treasury.set(treasury);
        self.asset_token.set(asset_token);
        self.next_loan_id.set(1);
    }

    /// Allow a pool to originate loans (owner only)
    pub fn register_pool(&mut self, pool: Address) {
        self.only_owner();
        self.pools.set(&pool, true);
    }

    /// Set the liquidator account (owner only)
    pub fn set_liquidator(&mut self, liquidator: Address) {
        self.only_owner();
        self.liquidator.set(liquidator);
    }

    // ========================================
    // Collateral
    // ========================================

    /// Deposit collateral for the caller. Tokens move into the collateral
    /// ledger's custody; the caller must have approved this contract.
    pub fn add_collateral(&mut self, asset: Address, amount: U256) {
        if amount.is_zero() {
            self.env().revert(LendingError::ZeroAmount);
        }
        let caller = self.env().caller();
        let custody = self
            .collateral_ledger
            .get_or_revert_with(LendingError::Unauthorized);

        let mut token = Cep18TokenContractRef::new(self.env(), asset);
        token.transfer_from(caller, custody, amount);

        let mut ledger = CollateralLedgerContractRef::new(self.env(), custody);
        ledger.deposit(caller, asset, amount);

        self.env().emit_event(CollateralDeposited {
            borrower: caller,
            asset,
            amount,
            timestamp: self.env().get_block_time(),
        });
    }

    /// Withdraw collateral not locked behind open loans
    pub fn claim_collateral(&mut self, amount: U256) {
        if amount.is_zero() {
            self.env().revert(LendingError::ZeroAmount);
        }
        let caller = self.env().caller();
        let withdrawable = self.get_max_withdrawable_collateral(caller);
        if amount > withdrawable {
            self.env().revert(LendingError::ClaimExceedsWithdrawable);
        }

        let custody = self
            .collateral_ledger
            .get_or_revert_with(LendingError::Unauthorized);
        let mut ledger = CollateralLedgerContractRef::new(self.env(), custody);
        let asset = ledger
            .lookup(caller)
            .asset
            .unwrap_or_revert_with(&self.env(), LendingError::NotEnoughCollateral);
        ledger.withdraw(caller, amount, caller);

        self.env().emit_event(CollateralClaimed {
            borrower: caller,
            asset,
            amount,
            timestamp: self.env().get_block_time(),
        });
    }

    /// Collateral a borrower could withdraw right now: deposited balance
    /// minus what must stay locked so every open loan's outstanding debt
    /// remains at or below its own liquidation threshold at spot price.
    pub fn get_max_withdrawable_collateral(&self, borrower: Address) -> U256 {
        let custody = self
            .collateral_ledger
            .get_or_revert_with(LendingError::Unauthorized);
        let ledger = CollateralLedgerContractRef::new(self.env(), custody);
        let account = ledger.lookup(borrower);
        if account.balance.is_zero() {
            return U256::zero();
        }
        let asset = match account.asset {
            Some(asset) => asset,
            None => return account.balance,
        };
        let required = self.required_locked_total(borrower, asset);
        account.balance.saturating_sub(required)
    }

    // ========================================
    // Origination
    // ========================================

    /// Issue a new loan (registered pools only). Validates score freshness
    /// and consistency, borrow limits, collateral sufficiency and pool
    /// liquidity, then disburses the principal from the treasury to the
    /// borrower. Returns the new loan id.
    pub fn configure_new(
        &mut self,
        borrower: Address,
        amount: U256,
        collateral_asset: Address,
    ) -> u64 {
        let pool = self.env().caller();
        if !self.pools.get(&pool).unwrap_or_default() {
            self.env().revert(LendingError::CallerNotPool);
        }
        if amount.is_zero() {
            self.env().revert(LendingError::ZeroAmount);
        }

        let now = self.env().get_block_time();
        let config_addr = self.config.get_or_revert_with(LendingError::Unauthorized);
        let mut config = ProtocolConfigContractRef::new(self.env(), config_addr);

        // Credit identity and score freshness
        let identity_addr = self.identity.get_or_revert_with(LendingError::Unauthorized);
        let identity = CreditIdentityContractRef::new(self.env(), identity_addr);
        let nfcs_id = identity.id_of(borrower);

        let score_addr = self.score_oracle.get_or_revert_with(LendingError::Unauthorized);
        let score_oracle = ScoreOracleContractRef::new(self.env(), score_addr);
        let record = score_oracle.get_score(nfcs_id);
        if now.saturating_sub(record.timestamp) > config.score_validity() {
            self.env().revert(LendingError::ScoreOutdated);
        }

        // One score across all concurrently open loans
        let count = self.loan_counts.get(&borrower).unwrap_or_default();
        for seq in 0..count {
            let id = self.loan_ids.get(&(borrower, seq)).unwrap_or_default();
            if let Some(existing) = self.loans.get(&id) {
                if existing.is_open() && existing.score != record.score {
                    self.env().revert(LendingError::BorrowWithAnotherScore);
                }
            }
        }

        // Pool-side terms
        let pool_ref = LendingPoolContractRef::new(self.env(), pool);
        if !pool_ref.is_score_allowed(record.score) {
            self.env().revert(LendingError::ScoreNotAllowed);
        }
        let rate = pool_ref.interest_rate_annual();

        // Borrow limits; counters roll back with the transaction on any
        // later revert
        config.register_borrow(borrower, nfcs_id, amount);

        // Collateral sufficiency at the score's LTV
        let tier = score_oracle.get_tier(record.score);
        let oracle_addr = self.price_oracle.get_or_revert_with(LendingError::Unauthorized);
        let oracle = PriceOracleContractRef::new(self.env(), oracle_addr);
        let price = oracle.get_price(collateral_asset);

        let custody = self
            .collateral_ledger
            .get_or_revert_with(LendingError::Unauthorized);
        let ledger = CollateralLedgerContractRef::new(self.env(), custody);
        let account = ledger.lookup(borrower);
        match account.asset {
            Some(asset) if asset == collateral_asset => {}
            _ => self.env().revert(LendingError::NotEnoughCollateral),
        }
        let required = LoanMath::required_collateral(amount, tier.ltv, price)
            .unwrap_or_revert(&self.env());
        if required > self.get_max_withdrawable_collateral(borrower) {
            self.env().revert(LendingError::NotEnoughCollateral);
        }

        // Pool liquidity
        let treasury_addr = self.treasury.get_or_revert_with(LendingError::Unauthorized);
        let mut treasury = RevenueTreasuryContractRef::new(self.env(), treasury_addr);
        if treasury.balance_available(pool) < amount {
            self.env().revert(LendingError::PoolNotEnoughFunds);
        }

        // Record the loan
        let id = self.next_loan_id.get_or_default();
        self.next_loan_id.set(id + 1);
        let maturity_date = now + config.loan_duration();
        let accrual_period = config.accrual_period();
        let loan = Loan {
            id,
            borrower,
            pool,
            collateral_asset,
            principal: amount,
            interest_rate_annual: rate,
            accrual_period,
            issue_date: now,
            maturity_date,
            last_accrual_time: now,
            total_payments_value: amount,
            payment_complete: U256::zero(),
            ltv: tier.ltv,
            lt: tier.lt,
            status: LoanStatus::Approved,
            score: record.score,
        };
        self.loans.set(&id, loan);
        self.loan_ids.set(&(borrower, count), id);
        self.loan_counts.set(&borrower, count + 1);

        let outstanding = self.pool_outstanding.get(&pool).unwrap_or_default();
        self.pool_outstanding.set(&pool, outstanding + amount);

        // Disburse principal
        treasury.request_funds(pool, amount, borrower);

        self.env().emit_event(BorrowSuccessful {
            timestamp: now,
            borrower,
            loan_id: id,
            amount,
            maturity_date,
            collateral_asset,
            collateral_amount: required,
            ltv: tier.ltv,
            lt: tier.lt,
            rate,
            accrual_period,
        });

        id
    }

    // ========================================
    // Accrual
    // ========================================

    /// Accrue interest on the given loans. Idempotent within an accrual
    /// period; repeat calls add nothing until the next grid point passes.
    /// Returns the interest added per loan, in input order.
    pub fn collect(&mut self, loan_ids: Vec<u64>) -> Vec<U256> {
        let now = self.env().get_block_time();
        let mut accrued = Vec::with_capacity(loan_ids.len());
        for id in loan_ids {
            let mut loan = self
                .loans
                .get(&id)
                .unwrap_or_revert_with(&self.env(), LendingError::LoanNotFound);
            let interest = self.accrue_loan(&mut loan, now);
            if !interest.is_zero() {
                self.loans.set(&id, loan);
            }
            accrued.push(interest);
        }
        accrued
    }

    // ========================================
    // Repayment
    // ========================================

    /// Apply a payment to a loan. The caller pays; the borrower need not.
    /// Funds flow to the treasury, which runs its waterfall before
    /// crediting the pool. Returns the loan's new status.
    pub fn payment(&mut self, loan_id: u64, amount: U256) -> LoanStatus {
        if amount.is_zero() {
            self.env().revert(LendingError::ZeroAmount);
        }
        let payer = self.env().caller();
        let now = self.env().get_block_time();

        let mut loan = self
            .loans
            .get(&loan_id)
            .unwrap_or_revert_with(&self.env(), LendingError::LoanNotFound);
        if !loan.is_open() {
            self.env().revert(LendingError::LoanAlreadySettled);
        }

        self.accrue_loan(&mut loan, now);
        if amount > loan.outstanding() {
            self.env().revert(LendingError::AmountTooLarge);
        }

        // Move the funds and run the waterfall
        let treasury_addr = self.treasury.get_or_revert_with(LendingError::Unauthorized);
        let asset = self.asset_token.get_or_revert_with(LendingError::Unauthorized);
        let mut token = Cep18TokenContractRef::new(self.env(), asset);
        token.transfer_from(payer, treasury_addr, amount);
        let mut treasury = RevenueTreasuryContractRef::new(self.env(), treasury_addr);
        treasury.payment(loan.pool, payer, amount);

        loan.payment_complete += amount;
        let outstanding = self.pool_outstanding.get(&loan.pool).unwrap_or_default();
        self.pool_outstanding
            .set(&loan.pool, outstanding.saturating_sub(amount));

        let fully_repaid = loan.payment_complete == loan.total_payments_value;
        loan.status = if fully_repaid {
            if now > loan.maturity_date {
                LoanStatus::PaidLate
            } else {
                LoanStatus::Closed
            }
        } else {
            LoanStatus::PaidPart
        };
        if fully_repaid {
            self.release_limits(&loan);
        }

        let days_late = if now > loan.maturity_date {
            (now - loan.maturity_date) / DAY_MS
        } else {
            0
        };
        let status = loan.status.clone();
        let borrower = loan.borrower;
        let principal = loan.principal;
        self.loans.set(&loan_id, loan);

        self.env().emit_event(LoanRepaid {
            timestamp: now,
            payer,
            borrower,
            loan_id,
            principal,
            amount_paid: amount,
            days_late,
        });

        status
    }

    // ========================================
    // Delinquency and liquidation
    // ========================================

    /// Whether a loan is currently liquidatable: past maturity plus grace
    /// with debt outstanding, or, for loans issued with a sub-100%
    /// threshold, undercollateralized at spot price.
    pub fn is_delinquent(&self, loan_id: u64) -> bool {
        let loan = self
            .loans
            .get(&loan_id)
            .unwrap_or_revert_with(&self.env(), LendingError::LoanNotFound);
        self.is_delinquent_loan(&loan)
    }

    /// Liquidate a batch of delinquent loans in order (liquidator only).
    ///
    /// The whole call reverts if any id is not delinquent on entry. The
    /// ordered pass then re-checks each loan: seizing collateral for an
    /// earlier id can restore a later loan's solvency, in which case that
    /// loan is reported `Skipped` instead of seized against. Seized
    /// collateral goes to the caller; the unrecovered shortfall of a
    /// `Default` loan is written off, not retried.
    pub fn liquidate_loans(&mut self, loan_ids: Vec<u64>) -> Vec<LiquidationOutcome> {
        self.only_liquidator();
        let caller = self.env().caller();
        let now = self.env().get_block_time();

        for id in &loan_ids {
            if !self.is_delinquent(*id) {
                self.env().revert(LendingError::LoanNotDelinquent);
            }
        }

        let custody = self
            .collateral_ledger
            .get_or_revert_with(LendingError::Unauthorized);
        let oracle_addr = self.price_oracle.get_or_revert_with(LendingError::Unauthorized);

        let mut outcomes = Vec::with_capacity(loan_ids.len());
        for id in loan_ids {
            let mut loan = self
                .loans
                .get(&id)
                .unwrap_or_revert_with(&self.env(), LendingError::LoanNotFound);
            if !self.is_delinquent_loan(&loan) {
                outcomes.push(LiquidationOutcome::Skipped { loan_id: id });
                continue;
            }

            self.accrue_loan(&mut loan, now);
            let outstanding = loan.outstanding();
            let oracle = PriceOracleContractRef::new(self.env(), oracle_addr);
            let price = oracle.get_price(loan.collateral_asset);
            let required = LoanMath::collateral_for_debt(outstanding, price)
                .unwrap_or_revert(&self.env());

            let mut ledger = CollateralLedgerContractRef::new(self.env(), custody);
            let seized = ledger.seize(loan.borrower, required, caller);
            let recovered = LoanMath::collateral_value(seized, price)
                .unwrap_or_revert(&self.env());
            let success = seized == required;

            // Credit what was recovered, write off the rest
            loan.payment_complete += recovered;
            loan.total_payments_value = loan.payment_complete;
            loan.status = if success {
                LoanStatus::Closed
            } else {
                LoanStatus::Default
            };

            let pool_outstanding = self.pool_outstanding.get(&loan.pool).unwrap_or_default();
            self.pool_outstanding
                .set(&loan.pool, pool_outstanding.saturating_sub(outstanding));

            self.release_limits(&loan);

            let borrower = loan.borrower;
            self.loans.set(&id, loan);

            self.env().emit_event(Liquidated {
                timestamp: now,
                loan_id: id,
                borrower,
                success,
            });
            outcomes.push(LiquidationOutcome::Seized {
                loan_id: id,
                amount: seized,
                success,
            });
        }
        outcomes
    }

    // ========================================
    // Views
    // ========================================

    /// Stored loan record
    pub fn get_loan(&self, loan_id: u64) -> Loan {
        self.loans
            .get(&loan_id)
            .unwrap_or_revert_with(&self.env(), LendingError::LoanNotFound)
    }

    /// Status with the transient `Late` read applied: an open loan past
    /// maturity reports `Late` without being persisted as such
    pub fn current_status(&self, loan_id: u64) -> LoanStatus {
        let loan = self.get_loan(loan_id);
        if loan.is_open() && self.env().get_block_time() > loan.maturity_date {
            return LoanStatus::Late;
        }
        loan.status
    }

    /// Ids of every loan issued to a borrower, in issuance order
    pub fn loans_of(&self, borrower: Address) -> Vec<u64> {
        let count = self.loan_counts.get(&borrower).unwrap_or_default();
        let mut ids = Vec::with_capacity(count as usize);
        for seq in 0..count {
            ids.push(self.loan_ids.get(&(borrower, seq)).unwrap_or_default());
        }
        ids
    }

    /// Outstanding principal plus accrued interest drawn from a pool
    pub fn pool_outstanding(&self, pool: Address) -> U256 {
        self.pool_outstanding.get(&pool).unwrap_or_default()
    }

    // ========================================
    // Internal
    // ========================================

    /// Advance a loan's accrual to the last grid point at or before `now`.
    /// Adds plain interest for every elapsed period and penalty interest
    /// for periods past maturity. Returns the interest added.
    fn accrue_loan(&mut self, loan: &mut Loan, now: u64) -> U256 {
        if !loan.is_open() || now <= loan.last_accrual_time {
            return U256::zero();
        }
        let periods = (now - loan.last_accrual_time) / loan.accrual_period;
        if periods == 0 {
            return U256::zero();
        }

        let per_period = LoanMath::period_interest(loan.principal, loan.interest_rate_annual)
            .unwrap_or_revert(&self.env());
        let base = per_period * U256::from(periods);

        let new_last = loan.last_accrual_time + periods * loan.accrual_period;
        let late_periods = Self::periods_past_maturity(loan, new_last)
            - Self::periods_past_maturity(loan, loan.last_accrual_time);
        let late = if late_periods > 0 {
            let config_addr = self.config.get_or_revert_with(LendingError::Unauthorized);
            let config = ProtocolConfigContractRef::new(self.env(), config_addr);
            let per_late = LoanMath::late_period_interest(
                loan.principal,
                loan.interest_rate_annual,
                config.penalty_multiplier(),
            )
            .unwrap_or_revert(&self.env());
            per_late * U256::from(late_periods)
        } else {
            U256::zero()
        };

        let interest = base + late;
        loan.total_payments_value = SafeMath::add(loan.total_payments_value, interest)
            .unwrap_or_revert(&self.env());
        loan.last_accrual_time = new_last;

        let outstanding = self.pool_outstanding.get(&loan.pool).unwrap_or_default();
        self.pool_outstanding.set(&loan.pool, outstanding + interest);

        self.env().emit_event(LoanCollected {
            timestamp: now,
            loan_id: loan.id,
            interest_accrued: interest,
            borrower: loan.borrower,
        });
        interest
    }

    /// Whole accrual periods between maturity and `t`, zero before maturity
    fn periods_past_maturity(loan: &Loan, t: u64) -> u64 {
        if t > loan.maturity_date {
            (t - loan.maturity_date) / loan.accrual_period
        } else {
            0
        }
    }

    fn is_delinquent_loan(&self, loan: &Loan) -> bool {
        if !loan.is_open() || loan.outstanding().is_zero() {
            return false;
        }
        let now = self.env().get_block_time();
        let config_addr = self.config.get_or_revert_with(LendingError::Unauthorized);
        let config = ProtocolConfigContractRef::new(self.env(), config_addr);
        if now > loan.maturity_date + config.grace_period() {
            return true;
        }
        // Over-collateralized products become liquidatable on price alone
        if loan.lt < U256::from(ONE_HUNDRED_PERCENT) {
            let custody = self
                .collateral_ledger
                .get_or_revert_with(LendingError::Unauthorized);
            let ledger = CollateralLedgerContractRef::new(self.env(), custody);
            let account = ledger.lookup(loan.borrower);
            let required = self.required_locked_total(loan.borrower, loan.collateral_asset);
            return required > account.balance;
        }
        false
    }

    /// Collateral that must stay locked across all of a borrower's open
    /// loans, each weighed against its own liquidation threshold
    fn required_locked_total(&self, borrower: Address, asset: Address) -> U256 {
        let oracle_addr = self.price_oracle.get_or_revert_with(LendingError::Unauthorized);
        let oracle = PriceOracleContractRef::new(self.env(), oracle_addr);
        let price = oracle.get_price(asset);

        let count = self.loan_counts.get(&borrower).unwrap_or_default();
        let mut required = U256::zero();
        for seq in 0..count {
            let id = self.loan_ids.get(&(borrower, seq)).unwrap_or_default();
            if let Some(loan) = self.loans.get(&id) {
                if loan.is_open() && loan.collateral_asset == asset {
                    let locked = LoanMath::required_locked(loan.outstanding(), loan.lt, price)
                        .unwrap_or_revert(&self.env());
                    required += locked;
                }
            }
        }
        required
    }

    /// Release the loan's principal from the outstanding-limit counters
    fn release_limits(&mut self, loan: &Loan) {
        let identity_addr = self.identity.get_or_revert_with(LendingError::Unauthorized);
        let identity = CreditIdentityContractRef::new(self.env(), identity_addr);
        let nfcs_id = identity.id_of(loan.borrower);
        let config_addr = self.config.get_or_revert_with(LendingError::Unauthorized);
        let mut config = ProtocolConfigContractRef::new(self.env(), config_addr);
        config.register_settlement(loan.borrower, nfcs_id, loan.principal);
    }

    fn only_owner(&self) {
        let caller = self.env().caller();
        let owner = self.owner.get_or_revert_with(LendingError::Unauthorized);
        if caller != owner {
            self.env().revert(LendingError::Unauthorized);
        }
    }

    fn only_liquidator(&self) {
        let caller = self.env().caller();
        let owner = self.owner.get_or_revert_with(LendingError::Unauthorized);
        let liquidator = self
            .liquidator
            .get_or_revert_with(LendingError::Unauthorized);
        if caller != liquidator && caller != owner {
            self.env().revert(LendingError::Unauthorized);
        }
    }
}
