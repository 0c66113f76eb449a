use anchor_lang::prelude::*;
use crate::state::{AllocationStrategy, AppMode, Protocol};

declare_id!("ALLocv7dauzDYVFkhYkAmAtH7aMUGYqNqnk6kS1LgXWM");

pub mod errors;
pub mod instructions;
pub mod state;
pub mod utils;

use instructions::*;

#[program]
pub mod pool_allocator {

    use super::*;

    pub fn initialize_registry(
        ctx: Context<InitializeRegistry>,
        protocols: Vec<Protocol>,
    ) -> Result<()> {
        instructions::initialize_registry(ctx, protocols)
    }

    pub fn initialize_portfolio(ctx: Context<InitializePortfolio>, mode: AppMode) -> Result<()> {
        instructions::initialize_portfolio(ctx, mode)
    }

    pub fn set_mode(ctx: Context<UpdateMode>, mode: AppMode) -> Result<()> {
        instructions::set_mode(ctx, mode)
    }

    pub fn toggle_mode(ctx: Context<UpdateMode>) -> Result<()> {
        instructions::toggle_mode(ctx)
    }

    pub fn set_custom_strategy(
        ctx: Context<SetCustomStrategy>,
        strategy: AllocationStrategy,
    ) -> Result<()> {
        instructions::set_custom_strategy(ctx, strategy)
    }

    pub fn allocate_deposit(ctx: Context<AllocateDeposit>, amount: u64) -> Result<()> {
        instructions::allocate_deposit(ctx, amount)
    }
}
