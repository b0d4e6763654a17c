//! Fixed-point math for the credit line protocol
//! Implements share pricing, interest accrual and collateral requirements
use odra::casper_types::U256;
use super::errors::LendingError;

/// Percentage scale: 100e18 equals 100%, so 1e18 is one percentage point
pub const ONE_HUNDRED_PERCENT: u128 = 100_000_000_000_000_000_000;

/// Collateral token precision (18 decimals)
pub const WAD: u128 = 1_000_000_000_000_000_000;

/// Interest accrual cadence in milliseconds (one hour)
pub const ACCRUAL_PERIOD_MS: u64 = 3_600_000;

/// Accrual periods in a 360-day year of hourly periods
pub const PERIODS_PER_YEAR: u64 = 12 * 24 * 30;

/// Milliseconds in a wall-clock day, used for limit windows
pub const DAY_MS: u64 = 86_400_000;

pub fn one_hundred_percent() -> U256 {
    U256::from(ONE_HUNDRED_PERCENT)
}

pub fn wad() -> U256 {
    U256::from(WAD)
}

/// Safe math operations shared by the lending contracts
pub struct SafeMath;

impl SafeMath {
    /// Safe addition with overflow check
    pub fn add(a: U256, b: U256) -> Result<U256, LendingError> {
        a.checked_add(b).ok_or(LendingError::MathOverflow)
    }

    /// Safe subtraction with underflow check
    pub fn sub(a: U256, b: U256) -> Result<U256, LendingError> {
        a.checked_sub(b).ok_or(LendingError::MathOverflow)
    }

    /// Safe multiplication with overflow check
    pub fn mul(a: U256, b: U256) -> Result<U256, LendingError> {
        a.checked_mul(b).ok_or(LendingError::MathOverflow)
    }

    /// Safe division with zero check
    pub fn div(a: U256, b: U256) -> Result<U256, LendingError> {
        if b.is_zero() {
            return Err(LendingError::DivisionByZero);
        }
        Ok(a / b)
    }

    /// `a * b / denominator` with overflow and zero checks
    pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, LendingError> {
        Self::div(Self::mul(a, b)?, denominator)
    }

    /// Returns the minimum of two U256 values
    pub fn min(a: U256, b: U256) -> U256 {
        if a < b { a } else { b }
    }
}

/// Vault share pricing and loan accrual formulas
pub struct LoanMath;

impl LoanMath {
    /// Shares minted for a deposit into a pool with existing supply.
    ///
    /// `shares = amount * supply * r / ((liquidity + amount * (100% - r)) * 100%)`
    ///
    /// At the default reserve rate of 100% this is plain pro-rata
    /// `amount * supply / liquidity`.
    pub fn deposit_shares(
        amount: U256,
        liquidity: U256,
        supply: U256,
        reserve_rate: U256,
    ) -> Result<U256, LendingError> {
        let hundred = one_hundred_percent();
        let numerator = SafeMath::mul(SafeMath::mul(amount, supply)?, reserve_rate)?;
        let denominator = SafeMath::add(
            liquidity,
            SafeMath::mul(amount, SafeMath::sub(hundred, reserve_rate)?)?,
        )?;
        SafeMath::div(numerator, SafeMath::mul(denominator, hundred)?)
    }

    /// Asset amount returned for redeeming pool shares, mirror of
    /// `deposit_shares`. Reduces to `shares * liquidity / supply` at a
    /// reserve rate of 100%.
    pub fn withdrawal_amount(
        shares: U256,
        liquidity: U256,
        supply: U256,
        reserve_rate: U256,
    ) -> Result<U256, LendingError> {
        let hundred = one_hundred_percent();
        let numerator = SafeMath::mul(SafeMath::mul(shares, liquidity)?, hundred)?;
        let denominator = SafeMath::add(
            supply,
            SafeMath::mul(shares, SafeMath::sub(hundred, reserve_rate)?)?,
        )?;
        SafeMath::div(numerator, SafeMath::mul(denominator, reserve_rate)?)
    }

    /// Interest added per accrual period: `principal * (rate / periods_per_year) / 100%`.
    ///
    /// The per-period rate is floored first, matching how the rate snapshot
    /// is applied on-ledger.
    pub fn period_interest(principal: U256, rate_annual: U256) -> Result<U256, LendingError> {
        let rate_per_period = SafeMath::div(rate_annual, U256::from(PERIODS_PER_YEAR))?;
        SafeMath::mul_div(principal, rate_per_period, one_hundred_percent())
    }

    /// Late-penalty interest per period past maturity: the per-period rate
    /// scaled by the penalty multiplier.
    pub fn late_period_interest(
        principal: U256,
        rate_annual: U256,
        penalty_multiplier: U256,
    ) -> Result<U256, LendingError> {
        let rate_per_period = SafeMath::div(rate_annual, U256::from(PERIODS_PER_YEAR))?;
        let penalty_rate = SafeMath::mul(rate_per_period, penalty_multiplier)?;
        SafeMath::mul_div(principal, penalty_rate, one_hundred_percent())
    }

    /// Collateral units needed to back `amount` of principal at a given LTV
    /// and spot price. Price is quoted in principal-asset smallest units per
    /// 1e18 collateral units.
    pub fn required_collateral(
        amount: U256,
        ltv: U256,
        price: U256,
    ) -> Result<U256, LendingError> {
        let numerator = SafeMath::mul(SafeMath::mul(amount, one_hundred_percent())?, wad())?;
        SafeMath::div(numerator, SafeMath::mul(ltv, price)?)
    }

    /// Collateral units that must remain locked so that `outstanding` debt
    /// stays at or below the loan's own liquidation threshold.
    pub fn required_locked(
        outstanding: U256,
        lt: U256,
        price: U256,
    ) -> Result<U256, LendingError> {
        let numerator = SafeMath::mul(SafeMath::mul(outstanding, one_hundred_percent())?, wad())?;
        SafeMath::div(numerator, SafeMath::mul(lt, price)?)
    }

    /// Collateral units equivalent to `debt` at spot price, with no
    /// threshold haircut. Used by liquidation.
    pub fn collateral_for_debt(debt: U256, price: U256) -> Result<U256, LendingError> {
        SafeMath::mul_div(debt, wad(), price)
    }

    /// Principal-asset value of `collateral` units at spot price.
    pub fn collateral_value(collateral: U256, price: U256) -> Result<U256, LendingError> {
        SafeMath::mul_div(collateral, price, wad())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wei(n: u64) -> U256 {
        U256::from(n) * U256::from(WAD)
    }

    #[test]
    fn test_deposit_shares_full_reserve_is_pro_rata() {
        // 100% reserve rate: shares = amount * supply / liquidity
        let shares = LoanMath::deposit_shares(
            U256::from(500u64),
            U256::from(2_000u64),
            U256::from(1_000u64),
            one_hundred_percent(),
        )
        .unwrap_or_default();
        assert_eq!(shares, U256::from(250u64));
    }

    #[test]
    fn test_withdrawal_inverts_deposit_at_full_reserve() {
        let liquidity = U256::from(10_000u64);
        let supply = U256::from(4_000u64);
        let amount = LoanMath::withdrawal_amount(
            U256::from(1_000u64),
            liquidity,
            supply,
            one_hundred_percent(),
        )
        .unwrap_or_default();
        assert_eq!(amount, U256::from(2_500u64));
    }

    #[test]
    fn test_period_interest() {
        // 10% APR on 1_000e6, hourly periods over a 360-day year
        let principal = U256::from(1_000_000_000u64);
        let rate = wei(10);
        let per_period = LoanMath::period_interest(principal, rate).unwrap_or_default();
        let rate_per_period = rate / U256::from(PERIODS_PER_YEAR);
        assert_eq!(per_period, principal * rate_per_period / one_hundred_percent());
    }

    #[test]
    fn test_required_collateral_scenario() {
        // 1000 USDC at 185% LTV, ETH at 3700 USD
        let amount = U256::from(1_000_000_000u64);
        let ltv = wei(185);
        let price = U256::from(3_700_000_000u64);
        let required = LoanMath::required_collateral(amount, ltv, price).unwrap_or_default();
        // roughly 0.1461 ETH
        assert!(required > U256::from(146_000_000_000_000_000u128));
        assert!(required < U256::from(147_000_000_000_000_000u128));
    }

    #[test]
    fn test_zero_threshold_is_division_by_zero() {
        let res = LoanMath::required_locked(
            U256::from(100u64),
            U256::zero(),
            U256::from(1u64),
        );
        assert!(matches!(res, Err(LendingError::DivisionByZero)));
    }
}
