//! Score Oracle - Credit scores and their LTV/LT tiers
//!
//! Scores are pushed per credit identity by an admin feed, together with
//! the timestamp they were generated at. Loan origination rejects scores
//! older than the configured validity window. The tier table maps a score
//! to the loan-to-value and liquidation-threshold percentages captured on
//! each new loan.

use odra::prelude::*;
use odra::casper_types::U256;
use super::errors::LendingError;
use super::events::ScoreUpdated;
use super::math::WAD;

/// A recorded credit score for an identity
#[odra::odra_type]
pub struct ScoreRecord {
    /// Credit score, lower is better
    pub score: u8,
    /// Timestamp the score was generated at
    pub timestamp: u64,
}

/// LTV/LT pair for one score, both on the 100e18 = 100% scale
#[odra::odra_type]
pub struct ScoreTier {
    /// Maximum loan-to-value at origination
    pub ltv: U256,
    /// Liquidation threshold
    pub lt: U256,
}

/// Score Oracle contract
#[odra::module]
pub struct ScoreOracle {
    /// Latest score per credit identity id
    scores: Mapping<u64, ScoreRecord>,
    /// Score tier table
    tiers: Mapping<u8, ScoreTier>,
    /// Admin address
    admin: Var<Address>,
}

#[odra::module]
impl ScoreOracle {
    /// Initialize the oracle and seed the default tier table
    pub fn init(&mut self) {
        let caller = self.env().caller();
        self.admin.set(caller);

        // Default tiers: (score, ltv%, lt%). Scores 8..=10 carry
        // sub-100% thresholds, so those loans stay over-collateralized.
        let defaults: [(u8, u128, u128); 10] = [
            (1, 205, 225),
            (2, 195, 215),
            (3, 185, 205),
            (4, 145, 165),
            (5, 135, 155),
            (6, 125, 145),
            (7, 115, 135),
            (8, 85, 95),
            (9, 80, 90),
            (10, 75, 85),
        ];
        for (score, ltv, lt) in defaults {
            self.tiers.set(
                &score,
                ScoreTier {
                    ltv: U256::from(ltv) * U256::from(WAD),
                    lt: U256::from(lt) * U256::from(WAD),
                },
            );
        }
    }

    /// Record a score for an identity (admin only)
    pub fn set_score(&mut self, token_id: u64, score: u8) {
        self.only_admin();
        let timestamp = self.env().get_block_time();
        self.scores.set(&token_id, ScoreRecord { score, timestamp });
        self.env().emit_event(ScoreUpdated {
            token_id,
            score,
            timestamp,
        });
    }

    /// Latest score and its generation timestamp for an identity
    pub fn get_score(&self, token_id: u64) -> ScoreRecord {
        self.scores
            .get(&token_id)
            .unwrap_or_revert_with(&self.env(), LendingError::ScoreNotSet)
    }

    /// Override a tier (admin only)
    pub fn set_tier(&mut self, score: u8, ltv: U256, lt: U256) {
        self.only_admin();
        if lt.is_zero() {
            self.env().revert(LendingError::DivisionByZero);
        }
        self.tiers.set(&score, ScoreTier { ltv, lt });
    }

    /// LTV/LT tier for a score
    pub fn get_tier(&self, score: u8) -> ScoreTier {
        self.tiers
            .get(&score)
            .unwrap_or_revert_with(&self.env(), LendingError::UnknownScore)
    }

    /// Get admin address
    pub fn get_admin(&self) -> Address {
        self.admin.get_or_revert_with(LendingError::Unauthorized)
    }

    fn only_admin(&self) {
        let caller = self.env().caller();
        let admin = self.admin.get_or_revert_with(LendingError::Unauthorized);
        if caller != admin {
            self.env().revert(LendingError::Unauthorized);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odra::host::{Deployer, NoArgs};

    #[test]
    fn test_default_tier_table() {
        let env = odra_test::env();
        let oracle = ScoreOracle::deploy(&env, NoArgs);

        let tier = oracle.get_tier(3);
        assert_eq!(tier.ltv, U256::from(185u64) * U256::from(WAD));
        assert_eq!(tier.lt, U256::from(205u64) * U256::from(WAD));
    }

    #[test]
    fn test_set_and_get_score() {
        let env = odra_test::env();
        let mut oracle = ScoreOracle::deploy(&env, NoArgs);

        oracle.set_score(7, 3);
        let record = oracle.get_score(7);
        assert_eq!(record.score, 3);
    }

    #[test]
    fn test_unknown_score_reverts() {
        let env = odra_test::env();
        let oracle = ScoreOracle::deploy(&env, NoArgs);
        assert_eq!(
            oracle.try_get_tier(42),
            Err(LendingError::UnknownScore.into())
        );
    }
}
