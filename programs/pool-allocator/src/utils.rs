use anchor_lang::prelude::*;
use crate::errors::AllocatorErrorCode;
use crate::state::portfolio::PoolAllocation;
use crate::state::protocol::BPS_DENOMINATOR;

pub const DAYS_PER_YEAR: u64 = 365;
pub const DAYS_PER_WEEK: u64 = 7;
pub const DAYS_PER_MONTH: u64 = 30;

/// Derived portfolio-level metrics. Never stored on an account: always
/// recomputed from the full allocation list so the figures cannot drift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioPerformance {
    pub total_value: u64,           // Sum of allocated principal (USDC micro-units)
    pub total_earnings: u64,        // Sum of cumulative earnings credited so far
    pub average_apy_bps: u64,       // Value-weighted mean APY across allocations
    pub daily_change: u64,          // Projected daily earnings at the blended APY
    pub daily_change_bps: u64,      // Projected daily growth rate (basis points)
    pub weekly_change: u64,         // daily_change * 7
    pub monthly_change: u64,        // daily_change * 30
}

impl PortfolioPerformance {
    pub const ZERO: PortfolioPerformance = PortfolioPerformance {
        total_value: 0,
        total_earnings: 0,
        average_apy_bps: 0,
        daily_change: 0,
        daily_change_bps: 0,
        weekly_change: 0,
        monthly_change: 0,
    };
}

/// Projected daily earnings for a principal at a given APY
///
/// Computes `amount * apy_bps / 10_000 / 365` with u128 intermediates,
/// truncating toward zero. Used both when an allocation record is created
/// and when portfolio-level projections are derived.
///
/// # Arguments
/// * `amount` - Principal in USDC micro-units
/// * `apy_bps` - Yearly APY in basis points
///
/// # Returns
/// * `Result<u64>` - Daily earnings in USDC micro-units, or `BalanceOverflow`
///   if the result does not fit in u64
pub fn daily_earnings(amount: u64, apy_bps: u64) -> Result<u64> {
    let yearly = (amount as u128)
        .checked_mul(apy_bps as u128)
        .ok_or(AllocatorErrorCode::BalanceOverflow)?
        / BPS_DENOMINATOR as u128;
    let daily = yearly / DAYS_PER_YEAR as u128;

    u64::try_from(daily).map_err(|_| AllocatorErrorCode::BalanceOverflow.into())
}

/// Recompute portfolio performance from the current allocation list
///
/// The blended APY is the value-weighted mean across allocations:
/// `sum(amount * apy_bps) / total_value`. A weighted mean cannot leave the
/// [min, max] APY range of its inputs, and an empty list yields the all-zero
/// performance (no division by zero).
///
/// Daily/weekly/monthly figures are projections at the blended APY, not
/// realized changes; no day-over-day compounding is simulated.
///
/// # Arguments
/// * `allocations` - The portfolio's full allocation list
///
/// # Returns
/// * `Result<PortfolioPerformance>` - Derived metrics, or `BalanceOverflow`
///   on arithmetic overflow
pub fn calculate_performance(allocations: &[PoolAllocation]) -> Result<PortfolioPerformance> {
    let mut total_value = 0u64;
    let mut total_earnings = 0u64;
    let mut weighted_apy_sum = 0u128;

    for allocation in allocations {
        total_value = total_value
            .checked_add(allocation.amount_allocated)
            .ok_or(AllocatorErrorCode::BalanceOverflow)?;
        total_earnings = total_earnings
            .checked_add(allocation.total_earnings)
            .ok_or(AllocatorErrorCode::BalanceOverflow)?;
        weighted_apy_sum = weighted_apy_sum
            .checked_add(allocation.amount_allocated as u128 * allocation.apy_bps as u128)
            .ok_or(AllocatorErrorCode::BalanceOverflow)?;
    }

    if total_value == 0 {
        return Ok(PortfolioPerformance::ZERO);
    }

    let average_apy_bps = (weighted_apy_sum / total_value as u128) as u64;
    let daily_change = daily_earnings(total_value, average_apy_bps)?;
    let weekly_change = daily_change
        .checked_mul(DAYS_PER_WEEK)
        .ok_or(AllocatorErrorCode::BalanceOverflow)?;
    let monthly_change = daily_change
        .checked_mul(DAYS_PER_MONTH)
        .ok_or(AllocatorErrorCode::BalanceOverflow)?;

    Ok(PortfolioPerformance {
        total_value,
        total_earnings,
        average_apy_bps,
        daily_change,
        daily_change_bps: average_apy_bps / DAYS_PER_YEAR,
        weekly_change,
        monthly_change,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::protocol::PoolType;

    fn allocation(protocol_id: &str, pool_type: PoolType, amount: u64, apy_bps: u64) -> PoolAllocation {
        PoolAllocation {
            pool_type,
            protocol_id: protocol_id.to_string(),
            protocol_name: protocol_id.to_string(),
            amount_allocated: amount,
            target_bps: 0,
            apy_bps,
            daily_earnings: daily_earnings(amount, apy_bps).unwrap(),
            total_earnings: 0,
            allocated_at: 0,
            last_updated: 0,
        }
    }

    #[test]
    fn test_daily_earnings_matches_formula() {
        // 1000 USDC at 8.5%: 1000 * 0.085 / 365 = 0.232876... USDC
        let daily = daily_earnings(1_000_000_000, 850).unwrap();
        assert_eq!(daily, 232_876);
    }

    #[test]
    fn test_daily_earnings_zero_amount() {
        assert_eq!(daily_earnings(0, 850).unwrap(), 0);
        assert_eq!(daily_earnings(1_000_000_000, 0).unwrap(), 0);
    }

    #[test]
    fn test_zero_state_performance() {
        let performance = calculate_performance(&[]).unwrap();
        assert_eq!(performance, PortfolioPerformance::ZERO);
    }

    #[test]
    fn test_single_allocation_apy_passes_through() {
        let allocations = vec![allocation("aave-v3-usdc", PoolType::Stablecoin, 1_000_000_000, 850)];
        let performance = calculate_performance(&allocations).unwrap();

        assert_eq!(performance.total_value, 1_000_000_000);
        assert_eq!(performance.average_apy_bps, 850);
        assert_eq!(performance.daily_change, 232_876);
        assert_eq!(performance.weekly_change, 232_876 * 7);
        assert_eq!(performance.monthly_change, 232_876 * 30);
    }

    #[test]
    fn test_weighted_average_apy() {
        // 300 at 8.5% and 100 at 7.2%: (300*850 + 100*720) / 400 = 817.5 -> 817
        let allocations = vec![
            allocation("aave-v3-usdc", PoolType::Stablecoin, 300_000_000, 850),
            allocation("compound-v3-usdc", PoolType::Stablecoin, 100_000_000, 720),
        ];
        let performance = calculate_performance(&allocations).unwrap();
        assert_eq!(performance.average_apy_bps, 817);
    }

    #[test]
    fn test_weighted_apy_stays_within_extremes() {
        let allocations = vec![
            allocation("aave-v3-usdc", PoolType::Stablecoin, 300_000_000, 850),
            allocation("beefy-volatile", PoolType::YieldAggregator, 300_000_000, 5_230),
            allocation("uniswap-v3", PoolType::Dex, 250_000_000, 7_520),
            allocation("moonwell-multi", PoolType::Staking, 150_000_000, 4_560),
        ];
        let performance = calculate_performance(&allocations).unwrap();

        let min_apy = allocations.iter().map(|a| a.apy_bps).min().unwrap();
        let max_apy = allocations.iter().map(|a| a.apy_bps).max().unwrap();
        assert!(performance.average_apy_bps >= min_apy);
        assert!(performance.average_apy_bps <= max_apy);
    }

    #[test]
    fn test_total_earnings_sums_whatever_is_present() {
        let mut first = allocation("aave-v3-usdc", PoolType::Stablecoin, 500_000_000, 850);
        let mut second = allocation("uniswap-v3", PoolType::Dex, 500_000_000, 7_520);
        first.total_earnings = 1_250_000;
        second.total_earnings = 3_750_000;

        let performance = calculate_performance(&[first, second]).unwrap();
        assert_eq!(performance.total_earnings, 5_000_000);
    }

    #[test]
    fn test_daily_change_bps_is_yearly_over_365() {
        let allocations = vec![allocation("uniswap-v3", PoolType::Dex, 1_000_000_000, 7_520)];
        let performance = calculate_performance(&allocations).unwrap();
        assert_eq!(performance.daily_change_bps, 7_520 / 365);
    }
}
