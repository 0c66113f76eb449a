use anchor_lang::prelude::*;
use std::collections::HashSet;
use crate::errors::AllocatorErrorCode;
use crate::state::*;

#[derive(Accounts)]
pub struct InitializeRegistry<'info> {
    #[account(
        init,
        payer = authority,
        space = ProtocolRegistry::MAX_SIZE,
        seeds = [b"registry", authority.key().as_ref()],
        bump
    )]
    pub registry: Account<'info, ProtocolRegistry>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_registry(
    ctx: Context<InitializeRegistry>,
    protocols: Vec<Protocol>,
) -> Result<()> {
    let registry = &mut ctx.accounts.registry;

    validate_catalog(&protocols)?;

    registry.authority = ctx.accounts.authority.key();
    registry.protocols = protocols;
    registry.bump = ctx.bumps.registry;

    msg!(
        "Protocol registry seeded with {} protocols",
        registry.protocols.len()
    );

    Ok(())
}

// CATALOG VALIDATION
pub fn validate_catalog(protocols: &[Protocol]) -> Result<()> {
    require!(!protocols.is_empty(), AllocatorErrorCode::EmptyRegistry);
    require!(
        protocols.len() <= MAX_REGISTRY_PROTOCOLS,
        AllocatorErrorCode::RegistryFull
    );

    let mut seen = HashSet::new();
    for protocol in protocols {
        protocol.validate()?;
        require!(
            seen.insert(protocol.id.as_str()),
            AllocatorErrorCode::DuplicateProtocol
        );
    }

    Ok(())
}
