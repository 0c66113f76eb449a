use anchor_lang::prelude::*;
use crate::state::protocol::{PoolType, MAX_PROTOCOL_ID_LEN, MAX_PROTOCOL_NAME_LEN};
use crate::state::strategy::{AllocationStrategy, AppMode, MAX_STRATEGY_ENTRIES};

pub const MAX_POOL_ALLOCATIONS: usize = 12;
pub const MAX_HISTORY_ENTRIES: usize = 32;

/// Principal placed with one protocol under one pool type. One record exists
/// per (protocol, pool type) pair; repeat deposits merge into it.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct PoolAllocation {
    pub pool_type: PoolType,                // 1 byte - Pool category
    pub protocol_id: String,                // 4 + 32 bytes - Resolved protocol id
    pub protocol_name: String,              // 4 + 48 bytes - Resolved protocol display name
    pub amount_allocated: u64,              // 8 bytes - Principal (USDC micro-units)
    pub target_bps: u16,                    // 2 bytes - Strategy target at allocation time
    pub apy_bps: u64,                       // 8 bytes - APY snapshot at first allocation
    pub daily_earnings: u64,                // 8 bytes - Projected daily earnings at first allocation
    pub total_earnings: u64,                // 8 bytes - Cumulative earnings credited so far
    pub allocated_at: i64,                  // 8 bytes - First allocation timestamp
    pub last_updated: i64,                  // 8 bytes - Last merge timestamp
}

impl PoolAllocation {
    pub const MAX_SIZE: usize = 1 // pool_type
    + 4 + MAX_PROTOCOL_ID_LEN // protocol_id
    + 4 + MAX_PROTOCOL_NAME_LEN // protocol_name
    + 8 // amount_allocated
    + 2 // target_bps
    + 8 // apy_bps
    + 8 // daily_earnings
    + 8 // total_earnings
    + 8 // allocated_at
    + 8; // last_updated
    // 139 bytes
}

/// One pool-type line of a history entry.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct AllocationRecord {
    pub pool_type: PoolType,                // 1 byte
    pub protocol_id: String,                // 4 + 32 bytes
    pub protocol_name: String,              // 4 + 48 bytes
    pub amount: u64,                        // 8 bytes - Sub-amount placed with this protocol
    pub target_bps: u16,                    // 2 bytes - Strategy target applied
    pub apy_bps: u64,                       // 8 bytes - Protocol APY at allocation time
}

impl AllocationRecord {
    pub const MAX_SIZE: usize = 1 // pool_type
    + 4 + MAX_PROTOCOL_ID_LEN // protocol_id
    + 4 + MAX_PROTOCOL_NAME_LEN // protocol_name
    + 8 // amount
    + 2 // target_bps
    + 8; // apy_bps
    // 107 bytes
}

/// Append-only audit record of one deposit allocation. Only pool types that
/// actually produced an allocation appear in the breakdown.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct AllocationHistoryEntry {
    pub deposit_seq: u64,                   // 8 bytes - Monotonic deposit counter
    pub deposit_amount: u64,                // 8 bytes - Full deposit (USDC micro-units)
    pub mode: AppMode,                      // 1 byte - Mode active at allocation time
    pub allocations: Vec<AllocationRecord>, // 4 + n * 107 bytes - Per-pool-type breakdown
    pub created_at: i64,                    // 8 bytes - Allocation timestamp
}

impl AllocationHistoryEntry {
    pub const MAX_SIZE: usize = 8 // deposit_seq
    + 8 // deposit_amount
    + 1 // mode
    + 4 + MAX_STRATEGY_ENTRIES * AllocationRecord::MAX_SIZE // allocations
    + 8; // created_at
    // 564 bytes
}

/// Per-owner portfolio: active mode, optional custom Pro strategy, the merged
/// allocation list, and the deposit audit trail. All writes go through the
/// program's instructions; clients read it as-is.
#[account]
#[derive(Debug)]
pub struct Portfolio {
    pub owner: Pubkey,                      // 32 bytes - Portfolio owner authority
    pub mode: AppMode,                      // 1 byte - Active risk mode
    pub custom_pro_strategy: Option<AllocationStrategy>, // 1 + 1042 bytes - Pro override, if set
    pub pool_allocations: Vec<PoolAllocation>, // 4 + n * 139 bytes - Merged allocation records
    pub allocation_history: Vec<AllocationHistoryEntry>, // 4 + n * 564 bytes - Deposit audit trail
    pub total_deposited: u64,               // 8 bytes - Lifetime deposits (USDC micro-units)
    pub deposit_count: u64,                 // 8 bytes - Deposits processed
    pub created_at: i64,                    // 8 bytes - Portfolio creation timestamp
    pub bump: u8,                           // 1 byte - PDA bump seed
}

impl Portfolio {
    pub const MAX_SIZE: usize = 8
    + 32 // owner
    + 1 // mode
    + 1 + AllocationStrategy::MAX_SIZE // custom_pro_strategy
    + 4 + MAX_POOL_ALLOCATIONS * PoolAllocation::MAX_SIZE // pool_allocations
    + 4 + MAX_HISTORY_ENTRIES * AllocationHistoryEntry::MAX_SIZE // allocation_history
    + 8 // total_deposited
    + 8 // deposit_count
    + 8 // created_at
    + 1; // bump
    // 20833 bytes

    /// Strategy a deposit will be split with: the custom Pro strategy when the
    /// mode is Pro and one has been set, the built-in table otherwise.
    pub fn active_strategy(&self) -> AllocationStrategy {
        if self.mode == AppMode::Pro {
            if let Some(custom) = &self.custom_pro_strategy {
                return custom.clone();
            }
        }
        AllocationStrategy::builtin(self.mode)
    }

    /// Allocation records for one pool type, in list order.
    pub fn pools_by_type(&self, pool_type: PoolType) -> Vec<&PoolAllocation> {
        self.pool_allocations
            .iter()
            .filter(|pool| pool.pool_type == pool_type)
            .collect()
    }

    /// Total principal placed under one pool type.
    pub fn total_by_pool_type(&self, pool_type: PoolType) -> u64 {
        self.pool_allocations
            .iter()
            .filter(|pool| pool.pool_type == pool_type)
            .map(|pool| pool.amount_allocated)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::strategy::pro_strategy_templates;

    fn empty_portfolio(mode: AppMode) -> Portfolio {
        Portfolio {
            owner: Pubkey::new_unique(),
            mode,
            custom_pro_strategy: None,
            pool_allocations: vec![],
            allocation_history: vec![],
            total_deposited: 0,
            deposit_count: 0,
            created_at: 0,
            bump: 255,
        }
    }

    fn allocation(pool_type: PoolType, protocol_id: &str, amount: u64) -> PoolAllocation {
        PoolAllocation {
            pool_type,
            protocol_id: protocol_id.to_string(),
            protocol_name: protocol_id.to_string(),
            amount_allocated: amount,
            target_bps: 5_000,
            apy_bps: 850,
            daily_earnings: 0,
            total_earnings: 0,
            allocated_at: 0,
            last_updated: 0,
        }
    }

    #[test]
    fn test_active_strategy_uses_builtin_per_mode() {
        for mode in [AppMode::Lite, AppMode::Balanced, AppMode::Pro] {
            let portfolio = empty_portfolio(mode);
            assert_eq!(portfolio.active_strategy(), AllocationStrategy::builtin(mode));
        }
    }

    #[test]
    fn test_active_strategy_custom_applies_only_in_pro() {
        let custom = pro_strategy_templates().remove(0);

        let mut portfolio = empty_portfolio(AppMode::Pro);
        portfolio.custom_pro_strategy = Some(custom.clone());
        assert_eq!(portfolio.active_strategy(), custom);

        // The override is ignored while another mode is active.
        portfolio.mode = AppMode::Lite;
        assert_eq!(
            portfolio.active_strategy(),
            AllocationStrategy::builtin(AppMode::Lite)
        );
    }

    #[test]
    fn test_pool_type_views() {
        let mut portfolio = empty_portfolio(AppMode::Pro);
        portfolio.pool_allocations = vec![
            allocation(PoolType::Stablecoin, "aave-v3-usdc", 300_000_000),
            allocation(PoolType::Dex, "uniswap-v3", 250_000_000),
            allocation(PoolType::Stablecoin, "compound-v3-usdc", 100_000_000),
        ];

        let stables = portfolio.pools_by_type(PoolType::Stablecoin);
        assert_eq!(stables.len(), 2);
        assert_eq!(stables[0].protocol_id, "aave-v3-usdc");

        assert_eq!(portfolio.total_by_pool_type(PoolType::Stablecoin), 400_000_000);
        assert_eq!(portfolio.total_by_pool_type(PoolType::Dex), 250_000_000);
        assert_eq!(portfolio.total_by_pool_type(PoolType::Staking), 0);
    }
}
