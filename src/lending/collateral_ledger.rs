//! Collateral Ledger - Custody and bookkeeping of posted collateral
//!
//! One collateral asset per borrower at a time. All mutations are gated to
//! the loan ledger, which performs the solvency checks; this module only
//! guarantees that balances never go negative and that the asset cannot be
//! switched while a nonzero balance exists. Tokens are held by this
//! contract and transferred out on withdrawal or seizure.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use super::errors::LendingError;
use super::math::SafeMath;
use crate::token::Cep18TokenContractRef;

/// A borrower's collateral position
#[odra::odra_type]
pub struct CollateralAccount {
    /// Asset currently backing the borrower's loans, if any was deposited
    pub asset: Option<Address>,
    /// Units of that asset held in custody
    pub balance: U256,
}

/// Collateral Ledger contract
#[odra::module]
pub struct CollateralLedger {
    /// Collateral account per borrower
    accounts: Mapping<Address, CollateralAccount>,
    /// Contract owner
    owner: Var<Address>,
    /// Loan ledger allowed to mutate balances
    loan_ledger: Var<Address>,
}

#[odra::module]
impl CollateralLedger {
    /// Initialize the ledger
    pub fn init(&mut self) {
        let caller = self.env().caller();
        self.owner.set(caller);
    }

    /// Set the loan ledger address (owner only)
    pub fn set_loan_ledger(&mut self, ledger: Address) {
        let caller = self.env().caller();
        let owner = self.owner.get_or_revert_with(LendingError::Unauthorized);
        if caller != owner {
            self.env().revert(LendingError::Unauthorized);
        }
        self.loan_ledger.set(ledger);
    }

    /// Credit a deposit to a borrower (loan ledger only).
    ///
    /// The loan ledger moves the tokens into this contract's custody before
    /// calling; this entry point is pure bookkeeping.
    pub fn deposit(&mut self, borrower: Address, asset: Address, amount: U256) {
        self.only_loan_ledger();

        let mut account = self.account_of(borrower);
        if let Some(existing) = account.asset {
            if existing != asset && !account.balance.is_zero() {
                self.env().revert(LendingError::CollateralAssetMismatch);
            }
        }
        account.asset = Some(asset);
        account.balance = SafeMath::add(account.balance, amount)
            .unwrap_or_revert(&self.env());
        self.accounts.set(&borrower, account);
    }

    /// Release collateral back to `to` (loan ledger only). The withdrawable
    /// bound is enforced by the loan ledger before calling.
    pub fn withdraw(&mut self, borrower: Address, amount: U256, to: Address) {
        self.only_loan_ledger();

        let mut account = self.account_of(borrower);
        if amount > account.balance {
            self.env().revert(LendingError::NotEnoughCollateral);
        }
        let asset = account
            .asset
            .unwrap_or_revert_with(&self.env(), LendingError::NotEnoughCollateral);

        account.balance -= amount;
        self.accounts.set(&borrower, account);

        let mut token = Cep18TokenContractRef::new(self.env(), asset);
        token.transfer(to, amount);
    }

    /// Seize up to `amount` of a borrower's collateral for a liquidator
    /// (loan ledger only). Returns the units actually seized.
    pub fn seize(&mut self, borrower: Address, amount: U256, to: Address) -> U256 {
        self.only_loan_ledger();

        let mut account = self.account_of(borrower);
        let seized = SafeMath::min(amount, account.balance);
        if seized.is_zero() {
            return U256::zero();
        }
        let asset = account
            .asset
            .unwrap_or_revert_with(&self.env(), LendingError::NotEnoughCollateral);

        account.balance -= seized;
        self.accounts.set(&borrower, account);

        let mut token = Cep18TokenContractRef::new(self.env(), asset);
        token.transfer(to, seized);
        seized
    }

    /// The borrower's current asset and balance
    pub fn lookup(&self, borrower: Address) -> CollateralAccount {
        self.account_of(borrower)
    }

    /// Units of collateral a borrower has in custody
    pub fn balance_of(&self, borrower: Address) -> U256 {
        self.account_of(borrower).balance
    }

    fn account_of(&self, borrower: Address) -> CollateralAccount {
        self.accounts.get(&borrower).unwrap_or(CollateralAccount {
            asset: None,
            balance: U256::zero(),
        })
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

#[cfg(test)]
mod tests {
    use super::*;
    use odra::host::{Deployer, HostRef, NoArgs};
    use crate::token::{AssetToken, AssetTokenInitArgs};

    #[test]
    fn test_deposit_and_asset_mismatch() {
        let env = odra_test::env();
        let mut ledger = CollateralLedger::deploy(&env, NoArgs);
        let operator = env.get_account(1);
        let borrower = env.get_account(2);
        let asset_a = env.get_account(8);
        let asset_b = env.get_account(9);

        ledger.set_loan_ledger(operator);

        env.set_caller(operator);
        ledger.deposit(borrower, asset_a, U256::from(100u64));
        assert_eq!(ledger.balance_of(borrower), U256::from(100u64));

        let result = ledger.try_deposit(borrower, asset_b, U256::from(50u64));
        assert_eq!(result, Err(LendingError::CollateralAssetMismatch.into()));
    }

    #[test]
    fn test_only_loan_ledger_mutates() {
        let env = odra_test::env();
        let mut ledger = CollateralLedger::deploy(&env, NoArgs);
        let borrower = env.get_account(2);
        let asset = env.get_account(8);

        ledger.set_loan_ledger(env.get_account(1));

        env.set_caller(env.get_account(3));
        let result = ledger.try_deposit(borrower, asset, U256::from(1u64));
        assert_eq!(result, Err(LendingError::CallerNotLoanLedger.into()));
    }

    #[test]
    fn test_seize_caps_at_balance() {
        let env = odra_test::env();
        let mut token = AssetToken::deploy(
            &env,
            AssetTokenInitArgs {
                name: String::from("Test WETH"),
                symbol: String::from("WETH"),
                decimals: 18,
            },
        );
        let mut ledger = CollateralLedger::deploy(&env, NoArgs);
        let operator = env.get_account(1);
        let borrower = env.get_account(2);
        let liquidator = env.get_account(3);

        ledger.set_loan_ledger(operator);
        token.mint(*ledger.address(), U256::from(100u64));

        env.set_caller(operator);
        ledger.deposit(borrower, *token.address(), U256::from(100u64));

        let seized = ledger.seize(borrower, U256::from(250u64), liquidator);
        assert_eq!(seized, U256::from(100u64));
        assert_eq!(ledger.balance_of(borrower), U256::zero());
        assert_eq!(token.balance_of(liquidator), U256::from(100u64));
    }
}
