//! Events for the credit line protocol

use odra::prelude::*;
use odra::casper_types::U256;

// ============================================================================
// Loan Lifecycle Events
// ============================================================================

/// Event emitted when a loan is issued
#[odra::event]
pub struct BorrowSuccessful {
    /// Timestamp of issuance
    pub timestamp: u64,
    /// Borrower address
    pub borrower: Address,
    /// Id of the new loan
    pub loan_id: u64,
    /// Principal disbursed
    pub amount: U256,
    /// Timestamp at which the loan matures
    pub maturity_date: u64,
    /// Collateral asset backing the loan
    pub collateral_asset: Address,
    /// Collateral locked against the principal
    pub collateral_amount: U256,
    /// Loan-to-value at issuance (100e18 = 100%)
    pub ltv: U256,
    /// Liquidation threshold at issuance (100e18 = 100%)
    pub lt: U256,
    /// Annual interest rate snapshot (100e18 = 100%)
    pub rate: U256,
    /// Accrual cadence in milliseconds
    pub accrual_period: u64,
}

/// Event emitted when a payment is applied to a loan
#[odra::event]
pub struct LoanRepaid {
    /// Timestamp of payment
    pub timestamp: u64,
    /// Address that paid
    pub payer: Address,
    /// Borrower on the loan
    pub borrower: Address,
    /// Loan id
    pub loan_id: u64,
    /// Loan principal
    pub principal: U256,
    /// Amount applied to the outstanding balance
    pub amount_paid: U256,
    /// Whole days past maturity at payment time, zero if on time
    pub days_late: u64,
}

/// Event emitted when interest is accrued onto a loan
#[odra::event]
pub struct LoanCollected {
    /// Timestamp of accrual
    pub timestamp: u64,
    /// Loan id
    pub loan_id: u64,
    /// Interest added this call
    pub interest_accrued: U256,
    /// Borrower on the loan
    pub borrower: Address,
}

/// Event emitted when a delinquent loan is liquidated
#[odra::event]
pub struct Liquidated {
    /// Timestamp of liquidation
    pub timestamp: u64,
    /// Loan id
    pub loan_id: u64,
    /// Borrower on the loan
    pub borrower: Address,
    /// True when the seized collateral covered the full outstanding debt
    pub success: bool,
}

// ============================================================================
// Collateral Events
// ============================================================================

/// Event emitted when collateral is deposited
#[odra::event]
pub struct CollateralDeposited {
    /// Borrower the collateral is credited to
    pub borrower: Address,
    /// Collateral asset address
    pub asset: Address,
    /// Amount deposited
    pub amount: U256,
    /// Timestamp of deposit
    pub timestamp: u64,
}

/// Event emitted when free collateral is claimed back
#[odra::event]
pub struct CollateralClaimed {
    /// Borrower claiming
    pub borrower: Address,
    /// Collateral asset address
    pub asset: Address,
    /// Amount withdrawn
    pub amount: U256,
    /// Timestamp of claim
    pub timestamp: u64,
}

// ============================================================================
// Pool Events
// ============================================================================

/// Event emitted when liquidity is deposited into a pool
#[odra::event]
pub struct PoolDeposited {
    /// Depositor
    pub user: Address,
    /// Asset amount deposited
    pub amount: U256,
    /// Pool shares minted
    pub shares: U256,
    /// Timestamp of deposit
    pub timestamp: u64,
}

/// Event emitted when pool shares are redeemed
#[odra::event]
pub struct PoolWithdrawn {
    /// Redeemer
    pub user: Address,
    /// Asset amount returned
    pub amount: U256,
    /// Pool shares burned
    pub shares: U256,
    /// Timestamp of withdrawal
    pub timestamp: u64,
}

/// Event emitted when value is added to a pool without minting shares
#[odra::event]
pub struct DepositedWithoutMint {
    /// Admin that supplied the funds
    pub user: Address,
    /// Asset amount added
    pub amount: U256,
    /// Timestamp
    pub timestamp: u64,
}

// ============================================================================
// Treasury Events
// ============================================================================

/// Event emitted when the revenue share table changes
#[odra::event]
pub struct RevenueSharesChanged {
    /// Number of registered payees after the change
    pub payee_count: u32,
    /// Sum of all weights after the change
    pub total_shares: U256,
    /// Timestamp of change
    pub timestamp: u64,
}

/// Event emitted for every waterfall run over incoming funds
#[odra::event]
pub struct RevenueDistributed {
    /// Pool the funds were destined for
    pub pool: Address,
    /// Account the funds came from
    pub source: Address,
    /// Incoming amount
    pub amount: U256,
    /// Portion credited to the pool (residual plus the pool's own slot)
    pub pool_amount: U256,
    /// Timestamp of distribution
    pub timestamp: u64,
}

/// Event emitted when funds leave treasury custody
#[odra::event]
pub struct FundsRequested {
    /// Pool account debited
    pub pool: Address,
    /// Recipient of the funds
    pub to: Address,
    /// Amount transferred out
    pub amount: U256,
    /// Timestamp
    pub timestamp: u64,
}

// ============================================================================
// Administration Events
// ============================================================================

/// Event emitted when a contract is paused
#[odra::event]
pub struct ContractPausedEvent {
    /// Account that paused
    pub account: Address,
    /// Timestamp
    pub timestamp: u64,
}

/// Event emitted when a contract is unpaused
#[odra::event]
pub struct ContractUnpausedEvent {
    /// Account that unpaused
    pub account: Address,
    /// Timestamp
    pub timestamp: u64,
}

/// Event emitted when a collateral price is updated
#[odra::event]
pub struct PriceUpdated {
    /// Collateral asset
    pub asset: Address,
    /// New spot price (USD smallest units per 1e18 of the asset)
    pub price: U256,
    /// Timestamp
    pub timestamp: u64,
}

/// Event emitted when a credit score is recorded
#[odra::event]
pub struct ScoreUpdated {
    /// Credit identity id
    pub token_id: u64,
    /// New score
    pub score: u8,
    /// Timestamp the score was recorded at
    pub timestamp: u64,
}
