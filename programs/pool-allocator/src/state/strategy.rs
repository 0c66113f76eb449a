use anchor_lang::prelude::*;
use crate::errors::AllocatorErrorCode;
use crate::state::protocol::{PoolType, RiskLevel, BPS_DENOMINATOR, MAX_APY_BPS, MAX_PROTOCOL_ID_LEN};

pub const MAX_STRATEGY_ENTRIES: usize = 5;
pub const MAX_PREFERRED_PROTOCOLS: usize = 4;
pub const MAX_DESCRIPTION_LEN: usize = 128;
pub const MAX_TEMPLATE_NAME_LEN: usize = 32;

/// Risk profile selected by the user. The active mode decides which allocation
/// strategy a deposit is split with; only Pro supports customization.
#[repr(u8)]
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppMode {
    Lite,
    Balanced,
    Pro,
}

impl AppMode {
    /// Cycle order used by the mode toggle: Lite -> Balanced -> Pro -> Lite.
    pub fn next(self) -> Self {
        match self {
            AppMode::Lite => AppMode::Balanced,
            AppMode::Balanced => AppMode::Pro,
            AppMode::Pro => AppMode::Lite,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AppMode::Lite => "Lite Mode",
            AppMode::Balanced => "Balanced Mode",
            AppMode::Pro => "Pro Mode",
        }
    }
}

/// One pool-type line of a strategy: target share of the deposit plus the APY
/// band and preferred venues for that pool type.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct StrategyAllocation {
    pub pool_type: PoolType,                // 1 byte - Pool category this line targets
    pub target_bps: u16,                    // 2 bytes - Share of the deposit (basis points)
    pub min_apy_bps: u64,                   // 8 bytes - Lower bound of the expected APY band
    pub max_apy_bps: u64,                   // 8 bytes - Upper bound of the expected APY band
    pub preferred_protocols: Vec<String>,   // 4 + n * 36 bytes - Preferred protocol ids, best APY wins
}

impl StrategyAllocation {
    pub const MAX_SIZE: usize = 1 // pool_type
    + 2 // target_bps
    + 8 // min_apy_bps
    + 8 // max_apy_bps
    + 4 + MAX_PREFERRED_PROTOCOLS * (4 + MAX_PROTOCOL_ID_LEN); // preferred_protocols
    // 167 bytes
}

/// A named target distribution for one mode. Built-in tables are fixed per
/// mode; a Pro user may replace theirs with a validated custom strategy.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct AllocationStrategy {
    pub mode: AppMode,                      // 1 byte - Mode this strategy belongs to
    pub allocations: Vec<StrategyAllocation>, // 4 + n * 167 bytes - Ordered pool-type lines
    pub expected_daily_apy_min_bps: u64,    // 8 bytes - Expected daily yield band, low end
    pub expected_daily_apy_max_bps: u64,    // 8 bytes - Expected daily yield band, high end
    pub expected_yearly_apy_min_bps: u64,   // 8 bytes - Expected yearly APY band, low end
    pub expected_yearly_apy_max_bps: u64,   // 8 bytes - Expected yearly APY band, high end
    pub risk_level: RiskLevel,              // 1 byte - Overall risk classification
    pub description: String,                // 4 + 128 bytes - Human-readable summary
    pub is_custom: bool,                    // 1 byte - True for user-built Pro strategies
    pub template_name: String,              // 4 + 32 bytes - Source template ("" for built-ins)
}

impl AllocationStrategy {
    pub const MAX_SIZE: usize = 1 // mode
    + 4 + MAX_STRATEGY_ENTRIES * StrategyAllocation::MAX_SIZE // allocations
    + 8 // expected_daily_apy_min_bps
    + 8 // expected_daily_apy_max_bps
    + 8 // expected_yearly_apy_min_bps
    + 8 // expected_yearly_apy_max_bps
    + 1 // risk_level
    + 4 + MAX_DESCRIPTION_LEN // description
    + 1 // is_custom
    + 4 + MAX_TEMPLATE_NAME_LEN; // template_name
    // 1042 bytes

    /// Built-in strategy table for a mode.
    pub fn builtin(mode: AppMode) -> Self {
        match mode {
            AppMode::Lite => AllocationStrategy {
                mode,
                allocations: vec![StrategyAllocation {
                    pool_type: PoolType::Stablecoin,
                    target_bps: 10_000,
                    min_apy_bps: 700,
                    max_apy_bps: 1_500,
                    preferred_protocols: vec![
                        "aave-v3-usdc".to_string(),
                        "compound-v3-usdc".to_string(),
                    ],
                }],
                expected_daily_apy_min_bps: 2,
                expected_daily_apy_max_bps: 5,
                expected_yearly_apy_min_bps: 700,
                expected_yearly_apy_max_bps: 1_500,
                risk_level: RiskLevel::Low,
                description: "100% in stable, low-risk lending pools for steady returns"
                    .to_string(),
                is_custom: false,
                template_name: String::new(),
            },
            AppMode::Balanced => AllocationStrategy {
                mode,
                allocations: vec![
                    StrategyAllocation {
                        pool_type: PoolType::Stablecoin,
                        target_bps: 6_000,
                        min_apy_bps: 700,
                        max_apy_bps: 1_500,
                        preferred_protocols: vec![
                            "aave-v3-usdc".to_string(),
                            "compound-v3-usdc".to_string(),
                        ],
                    },
                    StrategyAllocation {
                        pool_type: PoolType::YieldAggregator,
                        target_bps: 2_500,
                        min_apy_bps: 1_500,
                        max_apy_bps: 3_500,
                        preferred_protocols: vec![
                            "beefy-stable".to_string(),
                            "yearn-usdc".to_string(),
                        ],
                    },
                    StrategyAllocation {
                        pool_type: PoolType::Staking,
                        target_bps: 1_500,
                        min_apy_bps: 2_000,
                        max_apy_bps: 5_000,
                        // These ids resolve to Lending-type venues, so the
                        // preferred filter comes up empty and the engine falls
                        // back to the first available staking protocol.
                        preferred_protocols: vec![
                            "moonwell-usdc".to_string(),
                            "seamless-usdc".to_string(),
                        ],
                    },
                ],
                expected_daily_apy_min_bps: 5,
                expected_daily_apy_max_bps: 15,
                expected_yearly_apy_min_bps: 1_500,
                expected_yearly_apy_max_bps: 4_000,
                risk_level: RiskLevel::Medium,
                description:
                    "Balanced mix of stable pools (60%), yield aggregators (25%), and staking (15%)"
                        .to_string(),
                is_custom: false,
                template_name: String::new(),
            },
            AppMode::Pro => AllocationStrategy {
                mode,
                allocations: vec![
                    StrategyAllocation {
                        pool_type: PoolType::Stablecoin,
                        target_bps: 3_000,
                        min_apy_bps: 700,
                        max_apy_bps: 1_500,
                        preferred_protocols: vec![
                            "aave-v3-usdc".to_string(),
                            "compound-v3-usdc".to_string(),
                        ],
                    },
                    StrategyAllocation {
                        pool_type: PoolType::YieldAggregator,
                        target_bps: 3_000,
                        min_apy_bps: 2_000,
                        max_apy_bps: 6_000,
                        preferred_protocols: vec![
                            "beefy-volatile".to_string(),
                            "yearn-multi".to_string(),
                        ],
                    },
                    StrategyAllocation {
                        pool_type: PoolType::Dex,
                        target_bps: 2_500,
                        min_apy_bps: 3_000,
                        max_apy_bps: 10_000,
                        preferred_protocols: vec![
                            "aerodrome-usdc".to_string(),
                            "uniswap-v3".to_string(),
                        ],
                    },
                    StrategyAllocation {
                        pool_type: PoolType::Staking,
                        target_bps: 1_500,
                        min_apy_bps: 2_500,
                        max_apy_bps: 8_000,
                        preferred_protocols: vec![
                            "moonwell-multi".to_string(),
                            "seamless-multi".to_string(),
                        ],
                    },
                ],
                expected_daily_apy_min_bps: 10,
                expected_daily_apy_max_bps: 30,
                expected_yearly_apy_min_bps: 3_000,
                expected_yearly_apy_max_bps: 10_000,
                risk_level: RiskLevel::High,
                description: "High-risk portfolio with DEX pools (25%), yield aggregators (30%), staking (15%), and stable base (30%)"
                    .to_string(),
                is_custom: false,
                template_name: String::new(),
            },
        }
    }

    pub fn total_target_bps(&self) -> u64 {
        self.allocations
            .iter()
            .map(|a| a.target_bps as u64)
            .sum()
    }

    /// Structural validation applied where a custom strategy enters the
    /// program. The allocation engine itself trusts validated input.
    pub fn validate(&self) -> Result<()> {
        require!(!self.allocations.is_empty(), AllocatorErrorCode::EmptyStrategy);
        require!(
            self.allocations.len() <= MAX_STRATEGY_ENTRIES,
            AllocatorErrorCode::TooManyStrategyEntries
        );
        require!(
            self.description.len() <= MAX_DESCRIPTION_LEN,
            AllocatorErrorCode::DescriptionTooLong
        );
        require!(
            self.template_name.len() <= MAX_TEMPLATE_NAME_LEN,
            AllocatorErrorCode::DescriptionTooLong
        );

        for allocation in &self.allocations {
            require!(allocation.target_bps > 0, AllocatorErrorCode::ZeroTargetPercentage);
            require!(
                allocation.min_apy_bps <= allocation.max_apy_bps
                    && allocation.max_apy_bps <= MAX_APY_BPS,
                AllocatorErrorCode::InvalidApyBand
            );
            require!(
                allocation.preferred_protocols.len() <= MAX_PREFERRED_PROTOCOLS,
                AllocatorErrorCode::TooManyPreferredProtocols
            );
            for id in &allocation.preferred_protocols {
                require!(
                    !id.is_empty() && id.len() <= MAX_PROTOCOL_ID_LEN,
                    AllocatorErrorCode::InvalidProtocolId
                );
            }
        }

        require!(
            self.total_target_bps() == BPS_DENOMINATOR,
            AllocatorErrorCode::StrategyPercentageMismatch
        );
        Ok(())
    }
}

/// Preset Pro strategies users start customization from. Each keeps the Pro
/// APY bands and preferred venues but shifts the pool-type weights.
pub fn pro_strategy_templates() -> Vec<AllocationStrategy> {
    let base = AllocationStrategy::builtin(AppMode::Pro);

    let with_weights = |name: &str, description: &str, weights: [u16; 4]| {
        let mut strategy = base.clone();
        for (allocation, target_bps) in strategy.allocations.iter_mut().zip(weights) {
            allocation.target_bps = target_bps;
        }
        strategy.description = description.to_string();
        strategy.template_name = name.to_string();
        strategy
    };

    vec![
        with_weights(
            "Aggressive Growth",
            "DEX-heavy split chasing high variable yield",
            [2_000, 3_000, 3_500, 1_500],
        ),
        with_weights(
            "Yield Hunter",
            "Aggregator-first split with a thin stable base",
            [1_000, 4_500, 3_000, 1_500],
        ),
        with_weights(
            "Steady Climb",
            "Stable-anchored split with moderate variable exposure",
            [4_000, 3_000, 1_500, 1_500],
        ),
    ]
}
