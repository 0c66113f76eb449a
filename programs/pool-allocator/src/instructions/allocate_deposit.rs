use anchor_lang::prelude::*;
use crate::errors::AllocatorErrorCode;
use crate::state::*;
use crate::utils::{calculate_performance, daily_earnings};

#[derive(Accounts)]
pub struct AllocateDeposit<'info> {
    #[account(
        mut,
        seeds = [b"portfolio", portfolio.owner.as_ref()],
        bump = portfolio.bump,
        has_one = owner @ AllocatorErrorCode::UnauthorizedOwner
    )]
    pub portfolio: Account<'info, Portfolio>,

    #[account(
        seeds = [b"registry", registry.authority.as_ref()],
        bump = registry.bump
    )]
    pub registry: Account<'info, ProtocolRegistry>,

    pub owner: Signer<'info>,
}

/// Split a deposit across pool types per the active strategy, resolve one
/// protocol per pool type, merge into the running allocation list, and record
/// an audit entry. Atomic: capacity is checked before any state is touched,
/// so the instruction either applies fully or changes nothing.
pub fn allocate_deposit(ctx: Context<AllocateDeposit>, amount: u64) -> Result<()> {
    let portfolio = &mut ctx.accounts.portfolio;
    let registry = &ctx.accounts.registry;
    let current_time = Clock::get()?.unix_timestamp;

    require!(amount > 0, AllocatorErrorCode::InvalidAmount);

    let strategy = portfolio.active_strategy();
    let new_allocations = build_allocations(amount, &strategy, registry, current_time)?;

    ensure_capacity(
        &portfolio.pool_allocations,
        portfolio.allocation_history.len(),
        &new_allocations,
    )?;

    merge_allocations(&mut portfolio.pool_allocations, &new_allocations, current_time)?;

    let deposit_seq = portfolio
        .deposit_count
        .checked_add(1)
        .ok_or(AllocatorErrorCode::BalanceOverflow)?;
    let history_entry = build_history_entry(
        deposit_seq,
        amount,
        portfolio.mode,
        &new_allocations,
        current_time,
    );
    portfolio.allocation_history.push(history_entry);
    portfolio.deposit_count = deposit_seq;
    portfolio.total_deposited = portfolio
        .total_deposited
        .checked_add(amount)
        .ok_or(AllocatorErrorCode::BalanceOverflow)?;

    let performance = calculate_performance(&portfolio.pool_allocations)?;
    msg!(
        "Deposit {} allocated across {} pool types in {}: total_value={}, average_apy_bps={}",
        amount,
        new_allocations.len(),
        portfolio.mode.label(),
        performance.total_value,
        performance.average_apy_bps
    );

    Ok(())
}

/// Sub-amount a strategy entry receives: `amount * target_bps / 10_000`,
/// truncating toward zero.
pub fn sub_amount(amount: u64, target_bps: u16) -> Result<u64> {
    let scaled = (amount as u128)
        .checked_mul(target_bps as u128)
        .ok_or(AllocatorErrorCode::BalanceOverflow)?
        / BPS_DENOMINATOR as u128;

    u64::try_from(scaled).map_err(|_| AllocatorErrorCode::BalanceOverflow.into())
}

/// Resolve the protocol a strategy entry allocates to.
///
/// Best APY among the entry's preferred protocols when any are registered
/// under the entry's pool type; otherwise the FIRST available protocol of
/// that pool type, regardless of APY (deliberate fallback asymmetry);
/// otherwise `None` and the entry is skipped.
pub fn select_protocol<'a>(
    registry: &'a ProtocolRegistry,
    entry: &StrategyAllocation,
) -> Option<&'a Protocol> {
    let available = registry.protocols_by_pool_type(entry.pool_type);
    let preferred: Vec<&Protocol> = available
        .iter()
        .copied()
        .filter(|p| entry.preferred_protocols.iter().any(|id| id == &p.id))
        .collect();

    if !preferred.is_empty() {
        best_apy(&preferred)
    } else {
        available.first().copied()
    }
}

// CORE SPLIT-AND-SELECT STEP
//
// One candidate record per strategy entry that yields a positive sub-amount
// and resolves to a protocol; entries that resolve nothing are skipped
// silently (non-fatal by design).
pub fn build_allocations(
    amount: u64,
    strategy: &AllocationStrategy,
    registry: &ProtocolRegistry,
    now: i64,
) -> Result<Vec<PoolAllocation>> {
    let mut allocations = Vec::new();

    for entry in &strategy.allocations {
        let alloc_amount = sub_amount(amount, entry.target_bps)?;

        let Some(protocol) = select_protocol(registry, entry) else {
            msg!("No protocol available for {}, skipping", entry.pool_type.label());
            continue;
        };

        if alloc_amount == 0 {
            continue;
        }

        allocations.push(PoolAllocation {
            pool_type: entry.pool_type,
            protocol_id: protocol.id.clone(),
            protocol_name: protocol.display_name.clone(),
            amount_allocated: alloc_amount,
            target_bps: entry.target_bps,
            apy_bps: protocol.apy_bps,
            daily_earnings: daily_earnings(alloc_amount, protocol.apy_bps)?,
            total_earnings: 0,
            allocated_at: now,
            last_updated: now,
        });
    }

    Ok(allocations)
}

// CAPACITY PRE-CHECK (before any mutation)
//
// Counts the distinct (protocol, pool type) keys the merge step would append
// and rejects the deposit when either list would overflow, keeping the
// instruction atomic. Candidates sharing one key merge into a single record,
// so duplicates count once.
pub fn ensure_capacity(
    existing: &[PoolAllocation],
    history_len: usize,
    incoming: &[PoolAllocation],
) -> Result<()> {
    let mut appended: Vec<(&str, PoolType)> = Vec::new();
    for candidate in incoming {
        if find_matching(existing, candidate).is_some() {
            continue;
        }
        let key = (candidate.protocol_id.as_str(), candidate.pool_type);
        if !appended.contains(&key) {
            appended.push(key);
        }
    }

    require!(
        existing.len() + appended.len() <= MAX_POOL_ALLOCATIONS,
        AllocatorErrorCode::AllocationCapacityExceeded
    );
    require!(
        history_len < MAX_HISTORY_ENTRIES,
        AllocatorErrorCode::HistoryCapacityExceeded
    );

    Ok(())
}

fn find_matching(existing: &[PoolAllocation], candidate: &PoolAllocation) -> Option<usize> {
    existing.iter().position(|pool| {
        pool.protocol_id == candidate.protocol_id && pool.pool_type == candidate.pool_type
    })
}

// MERGE STEP
//
// A candidate matching an existing (protocol, pool type) record adds its
// principal into that record and refreshes last_updated. The stored APY and
// earnings fields keep their first-allocation snapshot; merging sums
// principal only. Unmatched candidates are appended.
pub fn merge_allocations(
    existing: &mut Vec<PoolAllocation>,
    incoming: &[PoolAllocation],
    now: i64,
) -> Result<()> {
    for candidate in incoming {
        match find_matching(existing, candidate) {
            Some(index) => {
                let record = &mut existing[index];
                record.amount_allocated = record
                    .amount_allocated
                    .checked_add(candidate.amount_allocated)
                    .ok_or(AllocatorErrorCode::BalanceOverflow)?;
                record.last_updated = now;
            }
            None => existing.push(candidate.clone()),
        }
    }

    Ok(())
}

// AUDIT TRAIL
pub fn build_history_entry(
    deposit_seq: u64,
    deposit_amount: u64,
    mode: AppMode,
    allocations: &[PoolAllocation],
    now: i64,
) -> AllocationHistoryEntry {
    AllocationHistoryEntry {
        deposit_seq,
        deposit_amount,
        mode,
        allocations: allocations
            .iter()
            .map(|alloc| AllocationRecord {
                pool_type: alloc.pool_type,
                protocol_id: alloc.protocol_id.clone(),
                protocol_name: alloc.protocol_name.clone(),
                amount: alloc.amount_allocated,
                target_bps: alloc.target_bps,
                apy_bps: alloc.apy_bps,
            })
            .collect(),
        created_at: now,
    }
}
