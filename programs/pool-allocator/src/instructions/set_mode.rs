use anchor_lang::prelude::*;
use crate::errors::AllocatorErrorCode;
use crate::state::*;

#[derive(Accounts)]
pub struct UpdateMode<'info> {
    #[account(
        mut,
        seeds = [b"portfolio", portfolio.owner.as_ref()],
        bump = portfolio.bump,
        has_one = owner @ AllocatorErrorCode::UnauthorizedOwner
    )]
    pub portfolio: Account<'info, Portfolio>,

    pub owner: Signer<'info>,
}

pub fn set_mode(ctx: Context<UpdateMode>, mode: AppMode) -> Result<()> {
    let portfolio = &mut ctx.accounts.portfolio;
    portfolio.mode = mode;

    msg!("Mode set to {}", portfolio.mode.label());

    Ok(())
}

pub fn toggle_mode(ctx: Context<UpdateMode>) -> Result<()> {
    let portfolio = &mut ctx.accounts.portfolio;
    portfolio.mode = portfolio.mode.next();

    msg!("Mode toggled to {}", portfolio.mode.label());

    Ok(())
}
