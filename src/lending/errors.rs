//! Error types for the credit line protocol

use odra::prelude::*;

/// Errors that can occur across the lending contracts.
///
/// Codes are grouped by kind: validation errors are recoverable by the
/// caller with corrected input, state errors signal a caller logic error,
/// authorization errors a missing role, and arithmetic errors a fatal
/// configuration defect (zero price or threshold).
#[odra::odra_error]
pub enum LendingError {
    // Validation Errors
    /// Deposited collateral does not cover the requested principal at the score's LTV
    NotEnoughCollateral = 1,
    /// Payment exceeds the loan's outstanding balance
    AmountTooLarge = 2,
    /// Credit score is older than the configured validity window
    ScoreOutdated = 3,
    /// Borrower already has open loans issued under a different score
    BorrowWithAnotherScore = 4,
    /// Score is outside the pool's allowed set
    ScoreNotAllowed = 5,
    /// A different collateral asset is already deposited with nonzero balance
    CollateralAssetMismatch = 6,
    /// Claim would leave open loans undercollateralized
    ClaimExceedsWithdrawable = 7,
    /// Zero amount not allowed
    ZeroAmount = 8,
    /// No LTV/LT tier configured for this score
    UnknownScore = 9,
    /// Borrower holds no credit identity
    NoCreditIdentity = 10,
    /// Address already holds a credit identity
    IdentityAlreadyMinted = 11,
    /// Payee and weight lists differ in length
    LengthMismatch = 12,

    // Borrowing Limit Errors
    /// Global daily borrow limit exceeded
    DailyLimitExceeded = 20,
    /// Per-user daily borrow limit exceeded
    UserDailyLimitExceeded = 21,
    /// Per-identity daily borrow limit exceeded
    NfcsDailyLimitExceeded = 22,
    /// Global outstanding borrow limit exceeded
    TotalLimitExceeded = 23,
    /// Per-user outstanding borrow limit exceeded
    UserTotalLimitExceeded = 24,
    /// Per-identity outstanding borrow limit exceeded
    NfcsTotalLimitExceeded = 25,

    // State Errors
    /// Loan is not past maturity plus grace and not undercollateralized
    LoanNotDelinquent = 30,
    /// No loan stored under this id
    LoanNotFound = 31,
    /// Loan already reached a terminal status
    LoanAlreadySettled = 32,
    /// Contract is paused
    ContractPaused = 33,
    /// Duplicate indices supplied to a share removal
    UniqueIndexes = 34,
    /// Pool lacks free liquidity for the requested principal
    PoolNotEnoughFunds = 35,
    /// Treasury balance for the pool cannot cover the withdrawal
    NotEnoughFunds = 36,
    /// No price stored for this collateral asset
    PriceNotSet = 37,
    /// Share index past the end of the payee table
    ShareIndexOutOfBounds = 38,
    /// No score recorded for this identity
    ScoreNotSet = 39,

    // Access Control Errors
    /// Caller is not authorized for this operation
    Unauthorized = 40,
    /// Entry point reserved for the loan ledger
    CallerNotLoanLedger = 41,
    /// Entry point reserved for a registered pool
    CallerNotPool = 42,

    // Arithmetic Errors
    /// Division by zero from a misconfigured threshold or price
    DivisionByZero = 50,
    /// Math overflow occurred
    MathOverflow = 51,
}
