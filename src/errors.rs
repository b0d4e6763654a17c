//! Error definitions for the asset token
use odra::prelude::*;

/// Custom errors for the CEP-18 asset token
#[odra::odra_error]
pub enum TokenError {
    /// Insufficient allowance for transfer
    InsufficientAllowance = 100,

    /// Insufficient balance for operation
    InsufficientBalance = 101,
}
