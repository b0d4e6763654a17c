//! Credit Line Protocol - collateralized lending against scored credit
//!
//! The core quartet: the loan ledger (loan state machine, accrual,
//! delinquency, liquidation), the collateral ledger (custody and
//! cross-loan withdrawable computation), the lending pool (share-priced
//! vault and borrow entry point) and the revenue treasury (custody and
//! weighted waterfall). Collaborators live alongside them: price and
//! score oracles, the credit identity registry and the protocol config.

pub mod collateral_ledger;
pub mod config;
pub mod identity;
pub mod lending_pool;
pub mod loan_ledger;
pub mod math;
pub mod price_oracle;
pub mod revenue_treasury;
pub mod score_oracle;
pub mod errors;
pub mod events;


pub use collateral_ledger::CollateralLedger;
pub use config::ProtocolConfig;
pub use identity::CreditIdentity;
pub use lending_pool::LendingPool;
pub use loan_ledger::{LiquidationOutcome, Loan, LoanLedger, LoanStatus};
pub use price_oracle::PriceOracle;
pub use revenue_treasury::RevenueTreasury;
pub use score_oracle::ScoreOracle;
pub use errors::LendingError;
pub use events::*;
