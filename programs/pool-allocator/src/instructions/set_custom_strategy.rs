use anchor_lang::prelude::*;
use crate::errors::AllocatorErrorCode;
use crate::state::*;

#[derive(Accounts)]
pub struct SetCustomStrategy<'info> {
    #[account(
        mut,
        seeds = [b"portfolio", portfolio.owner.as_ref()],
        bump = portfolio.bump,
        has_one = owner @ AllocatorErrorCode::UnauthorizedOwner
    )]
    pub portfolio: Account<'info, Portfolio>,

    pub owner: Signer<'info>,
}

/// Replace the Pro-mode strategy with a user-built one. Percentage sums and
/// per-entry sanity are enforced here, at the boundary; the allocation engine
/// trusts whatever strategy is active. Existing allocations are untouched,
/// only new deposits follow the custom split.
pub fn set_custom_strategy(
    ctx: Context<SetCustomStrategy>,
    strategy: AllocationStrategy,
) -> Result<()> {
    let portfolio = &mut ctx.accounts.portfolio;

    validate_custom_strategy(&strategy)?;

    msg!(
        "Custom Pro strategy set: {} entries, template '{}'",
        strategy.allocations.len(),
        strategy.template_name
    );

    portfolio.custom_pro_strategy = Some(strategy);

    Ok(())
}

// BOUNDARY VALIDATION FOR USER-BUILT STRATEGIES
pub fn validate_custom_strategy(strategy: &AllocationStrategy) -> Result<()> {
    require!(
        strategy.mode == AppMode::Pro,
        AllocatorErrorCode::WrongStrategyMode
    );
    strategy.validate()
}
