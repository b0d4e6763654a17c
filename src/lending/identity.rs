//! Credit Identity - One credit identity per borrower address
//!
//! A minimal mint-once registry. The id is what the score oracle keys
//! scores by; limits can also be enforced per identity so a borrower
//! cannot reset their counters by switching wallets.

use odra::prelude::*;
use super::errors::LendingError;

/// Credit Identity registry contract
#[odra::module]
pub struct CreditIdentity {
    /// Identity id per holder
    ids: Mapping<Address, u64>,
    /// Whether an address has minted
    minted: Mapping<Address, bool>,
    /// Next id to assign
    next_id: Var<u64>,
}

#[odra::module]
impl CreditIdentity {
    /// Initialize the registry
    pub fn init(&mut self) {
        self.next_id.set(1);
    }

    /// Mint a credit identity for the caller, once per address
    pub fn mint(&mut self) -> u64 {
        let caller = self.env().caller();
        if self.minted.get(&caller).unwrap_or_default() {
            self.env().revert(LendingError::IdentityAlreadyMinted);
        }
        let id = self.next_id.get_or_default();
        self.next_id.set(id + 1);
        self.ids.set(&caller, id);
        self.minted.set(&caller, true);
        id
    }

    /// Identity id of a holder
    pub fn id_of(&self, holder: Address) -> u64 {
        if !self.minted.get(&holder).unwrap_or_default() {
            self.env().revert(LendingError::NoCreditIdentity);
        }
        self.ids.get(&holder).unwrap_or_default()
    }

    /// Whether a holder has an identity
    pub fn has_identity(&self, holder: Address) -> bool {
        self.minted.get(&holder).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odra::host::{Deployer, NoArgs};

    #[test]
    fn test_mint_once() {
        let env = odra_test::env();
        let mut registry = CreditIdentity::deploy(&env, NoArgs);
        let user = env.get_account(1);

        env.set_caller(user);
        let id = registry.mint();
        assert_eq!(id, 1);
        assert_eq!(registry.id_of(user), 1);

        assert_eq!(
            registry.try_mint(),
            Err(LendingError::IdentityAlreadyMinted.into())
        );
    }

    #[test]
    fn test_unknown_holder_reverts() {
        let env = odra_test::env();
        let registry = CreditIdentity::deploy(&env, NoArgs);
        assert_eq!(
            registry.try_id_of(env.get_account(2)),
            Err(LendingError::NoCreditIdentity.into())
        );
    }
}
