use anchor_lang::prelude::*;
use crate::errors::AllocatorErrorCode;

/// Basis point denominator used for every rate in the program (APY, targets, volatility).
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Maximum yearly APY accepted for a catalog entry: 500% in basis points.
pub const MAX_APY_BPS: u64 = 50_000;

pub const MAX_PROTOCOL_ID_LEN: usize = 32;
pub const MAX_PROTOCOL_NAME_LEN: usize = 48;
pub const MAX_REGISTRY_PROTOCOLS: usize = 16;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolType {
    Stablecoin,
    Lending,
    YieldAggregator,
    Dex,
    Staking,
}

impl PoolType {
    pub fn label(&self) -> &'static str {
        match self {
            PoolType::Stablecoin => "Stablecoin",
            PoolType::Lending => "Lending",
            PoolType::YieldAggregator => "Yield Aggregator",
            PoolType::Dex => "DEX",
            PoolType::Staking => "Staking",
        }
    }
}

#[repr(u8)]
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// One yield-bearing venue in the catalog. Every protocol belongs to exactly
/// one pool type; APY is a session snapshot and never changes after seeding.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct Protocol {
    pub id: String,                         // 4 + 32 bytes - Catalog identifier, e.g. "aave-v3-usdc"
    pub display_name: String,               // 4 + 48 bytes - Human-readable name
    pub pool_type: PoolType,                // 1 byte - Pool category
    pub apy_bps: u64,                       // 8 bytes - Current yearly APY (basis points)
    pub tvl: u64,                           // 8 bytes - Total value locked (USDC micro-units)
    pub risk_level: RiskLevel,              // 1 byte - Risk classification
    pub volatility_bps: u32,                // 4 bytes - Volatility (basis points, 0 = not tracked)
}

impl Protocol {
    pub const MAX_SIZE: usize = 4 + MAX_PROTOCOL_ID_LEN // id
    + 4 + MAX_PROTOCOL_NAME_LEN // display_name
    + 1 // pool_type
    + 8 // apy_bps
    + 8 // tvl
    + 1 // risk_level
    + 4; // volatility_bps
    // 110 bytes

    pub fn validate(&self) -> Result<()> {
        require!(
            !self.id.is_empty() && self.id.len() <= MAX_PROTOCOL_ID_LEN,
            AllocatorErrorCode::InvalidProtocolId
        );
        require!(
            self.display_name.len() <= MAX_PROTOCOL_NAME_LEN,
            AllocatorErrorCode::ProtocolNameTooLong
        );
        require!(self.apy_bps <= MAX_APY_BPS, AllocatorErrorCode::ExcessiveApy);
        require!(
            self.volatility_bps as u64 <= BPS_DENOMINATOR,
            AllocatorErrorCode::InvalidVolatility
        );
        Ok(())
    }
}

/// Read-only catalog of yield protocols. Seeded once at initialization and
/// never mutated afterwards; no instruction writes to it post-seeding.
#[account]
#[derive(Debug)]
pub struct ProtocolRegistry {
    pub authority: Pubkey,                  // 32 bytes - Seeding authority
    pub protocols: Vec<Protocol>,           // 4 + n * 110 bytes - Catalog entries, in seeding order
    pub bump: u8,                           // 1 byte - PDA bump seed
}

impl ProtocolRegistry {
    pub const MAX_SIZE: usize = 8
    + 32 // authority
    + 4 + MAX_REGISTRY_PROTOCOLS * Protocol::MAX_SIZE // protocols
    + 1; // bump
    // 1805 bytes

    /// All protocols tagged with the given pool type, in registry order.
    pub fn protocols_by_pool_type(&self, pool_type: PoolType) -> Vec<&Protocol> {
        self.protocols
            .iter()
            .filter(|p| p.pool_type == pool_type)
            .collect()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Protocol> {
        self.protocols.iter().find(|p| p.id == id)
    }

    /// Highest-APY protocol whose TVL exceeds 10x the amount being placed.
    pub fn best_protocol_for_amount(&self, amount: u64) -> Option<&Protocol> {
        let threshold = (amount as u128).checked_mul(10)?;
        let suitable: Vec<&Protocol> = self
            .protocols
            .iter()
            .filter(|p| p.tvl as u128 > threshold)
            .collect();
        best_apy(&suitable)
    }
}

/// Protocol with the strictly highest APY; ties keep the first in iteration order.
pub fn best_apy<'a>(candidates: &[&'a Protocol]) -> Option<&'a Protocol> {
    let mut best: Option<&Protocol> = None;
    for &candidate in candidates {
        match best {
            Some(current) if candidate.apy_bps <= current.apy_bps => {}
            _ => best = Some(candidate),
        }
    }
    best
}

/// Default protocol catalog (Base chain venues, APY snapshots in basis points).
pub fn default_protocols() -> Vec<Protocol> {
    vec![
        // Stablecoin pools (low risk)
        Protocol {
            id: "aave-v3-usdc".to_string(),
            display_name: "Aave V3 USDC".to_string(),
            pool_type: PoolType::Stablecoin,
            apy_bps: 850,
            tvl: 1_250_000_000_000_000,
            risk_level: RiskLevel::Low,
            volatility_bps: 50,
        },
        Protocol {
            id: "compound-v3-usdc".to_string(),
            display_name: "Compound V3 USDC".to_string(),
            pool_type: PoolType::Stablecoin,
            apy_bps: 720,
            tvl: 980_000_000_000_000,
            risk_level: RiskLevel::Low,
            volatility_bps: 50,
        },
        // Lending pools
        Protocol {
            id: "moonwell-usdc".to_string(),
            display_name: "Moonwell USDC".to_string(),
            pool_type: PoolType::Lending,
            apy_bps: 2_250,
            tvl: 450_000_000_000_000,
            risk_level: RiskLevel::Medium,
            volatility_bps: 1_500,
        },
        Protocol {
            id: "seamless-usdc".to_string(),
            display_name: "Seamless USDC".to_string(),
            pool_type: PoolType::Lending,
            apy_bps: 1_890,
            tvl: 180_000_000_000_000,
            risk_level: RiskLevel::Medium,
            volatility_bps: 1_200,
        },
        // Yield aggregators
        Protocol {
            id: "beefy-stable".to_string(),
            display_name: "Beefy Stable Vault".to_string(),
            pool_type: PoolType::YieldAggregator,
            apy_bps: 2_850,
            tvl: 320_000_000_000_000,
            risk_level: RiskLevel::Medium,
            volatility_bps: 1_800,
        },
        Protocol {
            id: "beefy-volatile".to_string(),
            display_name: "Beefy Volatile Vault".to_string(),
            pool_type: PoolType::YieldAggregator,
            apy_bps: 5_230,
            tvl: 150_000_000_000_000,
            risk_level: RiskLevel::High,
            volatility_bps: 3_500,
        },
        Protocol {
            id: "yearn-usdc".to_string(),
            display_name: "Yearn USDC Vault".to_string(),
            pool_type: PoolType::YieldAggregator,
            apy_bps: 2_580,
            tvl: 420_000_000_000_000,
            risk_level: RiskLevel::Medium,
            volatility_bps: 2_000,
        },
        // DEX pools (liquidity provision)
        Protocol {
            id: "aerodrome-usdc".to_string(),
            display_name: "Aerodrome USDC/ETH".to_string(),
            pool_type: PoolType::Dex,
            apy_bps: 6_870,
            tvl: 280_000_000_000_000,
            risk_level: RiskLevel::High,
            volatility_bps: 4_500,
        },
        Protocol {
            id: "uniswap-v3".to_string(),
            display_name: "Uniswap V3 USDC/ETH".to_string(),
            pool_type: PoolType::Dex,
            apy_bps: 7_520,
            tvl: 650_000_000_000_000,
            risk_level: RiskLevel::High,
            volatility_bps: 5_000,
        },
        // Staking pools
        Protocol {
            id: "moonwell-multi".to_string(),
            display_name: "Moonwell Multi-Asset".to_string(),
            pool_type: PoolType::Staking,
            apy_bps: 4_560,
            tvl: 200_000_000_000_000,
            risk_level: RiskLevel::High,
            volatility_bps: 3_000,
        },
        Protocol {
            id: "seamless-multi".to_string(),
            display_name: "Seamless Multi-Strategy".to_string(),
            pool_type: PoolType::Staking,
            apy_bps: 3_840,
            tvl: 120_000_000_000_000,
            risk_level: RiskLevel::Medium,
            volatility_bps: 2_500,
        },
    ]
}
