use anchor_lang::prelude::*;

#[error_code]
pub enum AllocatorErrorCode {
    #[msg("Deposit amount must be greater than zero")]
    InvalidAmount,

    #[msg("Arithmetic overflow in allocation math")]
    BalanceOverflow,

    #[msg("Protocol id must be 1-32 characters")]
    InvalidProtocolId,

    #[msg("Protocol display name exceeds 48 characters")]
    ProtocolNameTooLong,

    #[msg("Protocol APY exceeds maximum allowed (500%)")]
    ExcessiveApy,

    #[msg("Volatility must be 0-10000 basis points")]
    InvalidVolatility,

    #[msg("Duplicate protocol id in registry")]
    DuplicateProtocol,

    #[msg("Registry holds at most 16 protocols")]
    RegistryFull,

    #[msg("Registry must be seeded with at least one protocol")]
    EmptyRegistry,

    #[msg("Strategy must contain at least one allocation entry")]
    EmptyStrategy,

    #[msg("Strategy holds at most 5 allocation entries")]
    TooManyStrategyEntries,

    #[msg("Strategy entry holds at most 4 preferred protocols")]
    TooManyPreferredProtocols,

    #[msg("Strategy entry APY band is invalid")]
    InvalidApyBand,

    #[msg("Strategy entry target percentage must be greater than zero")]
    ZeroTargetPercentage,

    #[msg("Strategy target percentages must sum to exactly 100%")]
    StrategyPercentageMismatch,

    #[msg("Strategy description or template name is too long")]
    DescriptionTooLong,

    #[msg("Custom strategies are supported in Pro mode only")]
    WrongStrategyMode,

    #[msg("Portfolio holds at most 12 allocation records")]
    AllocationCapacityExceeded,

    #[msg("Allocation history holds at most 32 entries")]
    HistoryCapacityExceeded,

    #[msg("Unauthorized: caller is not the portfolio owner")]
    UnauthorizedOwner,
}
