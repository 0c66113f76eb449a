use anchor_lang::prelude::*;
use crate::state::*;

#[derive(Accounts)]
pub struct InitializePortfolio<'info> {
    #[account(
        init,
        payer = owner,
        space = Portfolio::MAX_SIZE,
        seeds = [b"portfolio", owner.key().as_ref()],
        bump
    )]
    pub portfolio: Account<'info, Portfolio>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_portfolio(ctx: Context<InitializePortfolio>, mode: AppMode) -> Result<()> {
    let portfolio = &mut ctx.accounts.portfolio;
    let current_time = Clock::get()?.unix_timestamp;

    portfolio.owner = ctx.accounts.owner.key();
    portfolio.mode = mode;
    portfolio.custom_pro_strategy = None;
    portfolio.pool_allocations = Vec::new();
    portfolio.allocation_history = Vec::new();
    portfolio.total_deposited = 0;
    portfolio.deposit_count = 0;
    portfolio.created_at = current_time;
    portfolio.bump = ctx.bumps.portfolio;

    msg!(
        "Portfolio initialized: owner={}, mode={}",
        portfolio.owner,
        portfolio.mode.label()
    );

    Ok(())
}
