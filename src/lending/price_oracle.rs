//! Price Oracle - Spot USD prices for collateral assets
//!
//! Prices are pushed by an admin feed. A price is quoted in the principal
//! asset's smallest units per 1e18 units of the collateral asset, so with a
//! 6-decimal principal token, ETH at 3700 USD is stored as 3_700_000_000.

use odra::prelude::*;
use odra::casper_types::U256;
use super::errors::LendingError;
use super::events::PriceUpdated;
use super::math::wad;

/// Price feed data for a collateral asset
#[odra::odra_type]
pub struct PriceFeed {
    /// Asset address
    pub asset: Address,
    /// Spot price (principal smallest units per 1e18 collateral units)
    pub price: U256,
    /// Timestamp of last update
    pub last_update: u64,
}

/// Price Oracle contract
#[odra::module]
pub struct PriceOracle {
    /// Price feeds for each asset
    price_feeds: Mapping<Address, PriceFeed>,
    /// Admin address
    admin: Var<Address>,
}

#[odra::module]
impl PriceOracle {
    /// Initialize the price oracle
    pub fn init(&mut self) {
        let caller = self.env().caller();
        self.admin.set(caller);
    }

    /// Set the spot price for an asset (admin only)
    pub fn set_price(&mut self, asset: Address, price: U256) {
        self.only_admin();

        if price == U256::zero() {
            self.env().revert(LendingError::ZeroAmount);
        }

        let timestamp = self.env().get_block_time();
        let feed = PriceFeed {
            asset,
            price,
            last_update: timestamp,
        };
        self.price_feeds.set(&asset, feed);

        self.env().emit_event(PriceUpdated {
            asset,
            price,
            timestamp,
        });
    }

    /// Get the spot price for an asset
    pub fn get_price(&self, asset: Address) -> U256 {
        let feed = self
            .price_feeds
            .get(&asset)
            .unwrap_or_revert_with(&self.env(), LendingError::PriceNotSet);
        feed.price
    }

    /// Value of `amount` collateral units in principal smallest units
    pub fn get_asset_value(&self, asset: Address, amount: U256) -> U256 {
        let price = self.get_price(asset);
        (amount * price) / wad()
    }

    /// Get admin address
    pub fn get_admin(&self) -> Address {
        self.admin.get_or_revert_with(LendingError::Unauthorized)
    }

    /// Check if caller is admin
    fn only_admin(&self) {
        let caller = self.env().caller();
        let admin = self.admin.get_or_revert_with(LendingError::Unauthorized);
        if caller != admin {
            self.env().revert(LendingError::Unauthorized);
        }
    }
}
