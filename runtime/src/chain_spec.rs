//! Genesis-config builders for the economic core.
//!
//! With no node in this workspace there is no bootnode list or telemetry
//! endpoint to describe — just the one thing a chain spec's genesis section is
//! actually for: assembling a [`RuntimeGenesisConfig`] that passes every
//! pallet's `assert!`-gated genesis validation. `development_genesis` is the
//! config the integration tests in `tests/` build storage from.

use omni_core_primitives::Ratio;
use pallet_poc::{FeeParamsData, QuorumParamsData};

use crate::{
    AccountId, Balance, BalancesConfig, FeePipelineConfig, GovernanceTimelockConfig, PocConfig,
    RuntimeGenesisConfig, SystemConfig, TokenomicsConfig, TreasuryRedirectConfig, FEE_COLLECTOR_ACCOUNT,
};

/// The four treasury-redirect sub-fund accounts, distinct from the emission
/// sink accounts defined alongside `construct_runtime!`.
pub const REDIRECT_TARGET_A: AccountId = 40;
pub const REDIRECT_TARGET_B: AccountId = 41;
pub const REDIRECT_TARGET_C: AccountId = 42;
pub const REDIRECT_TARGET_D: AccountId = 43;

/// Genesis suitable for integration tests and local development: the spec's
/// worked-example split (40/30/20/10), a 1-3% inflation band, adaptive fee
/// burning enabled with a 5-day smoothing window, and treasury redirect armed
/// every 1000 blocks at the protocol's 5% default ratio.
pub fn development_genesis(endowed: &[(AccountId, Balance)]) -> RuntimeGenesisConfig {
    RuntimeGenesisConfig {
        system: SystemConfig::default(),
        balances: BalancesConfig { balances: endowed.to_vec(), dev_accounts: None },
        tokenomics: TokenomicsConfig {
            inflation_min: Ratio::from_percent(1),
            inflation_max: Ratio::from_percent(3),
            staking_split: Ratio::from_percent(40),
            poc_split: Ratio::from_percent(30),
            sequencer_split: Ratio::from_percent(20),
            treasury_split: Ratio::from_percent(10),
            supply_cap: 1_000_000_000_000_000,
            initial_supply: 100_000_000_000_000,
            _phantom: Default::default(),
        },
        fee_pipeline: FeePipelineConfig {
            adaptive_enabled: true,
            min_burn_ratio: Ratio::from_percent(10),
            default_burn_ratio: Ratio::from_percent(50),
            max_burn_ratio: Ratio::from_percent(90),
            treasury_floor_pct: Ratio::from_percent(5),
            congestion_threshold: Ratio::from_percent(90),
            tx_per_day_target: 1_000,
            smoothing_blocks: 10,
            fee_burn_ratio: Ratio::from_percent(70),
            treasury_fee_ratio: Ratio::from_percent(30),
            _phantom: Default::default(),
        },
        treasury_redirect: TreasuryRedirectConfig {
            enabled: true,
            interval: 1_000,
            redirect_ratio: Ratio::from_percent(5),
            target_ratios: [Ratio::from_percent(25); 4],
            targets: [
                Some(REDIRECT_TARGET_A),
                Some(REDIRECT_TARGET_B),
                Some(REDIRECT_TARGET_C),
                Some(REDIRECT_TARGET_D),
            ],
        },
        poc: PocConfig {
            fee_params: Some(FeeParamsData {
                submission_fee: 100,
                submission_burn_ratio: Ratio::from_percent(10),
                min_submission_fee: 50,
                max_submission_fee: 200,
                min_burn_ratio: Ratio::from_percent(5),
                max_burn_ratio: Ratio::from_percent(50),
            }),
            quorum_params: Some(QuorumParamsData {
                quorum_pct: Ratio::from_percent(50),
                base_reward_unit: 1_000,
            }),
            exempt_addresses: Default::default(),
            cscore_requirements: Default::default(),
            identity_requirements: Default::default(),
        },
        governance_timelock: GovernanceTimelockConfig { min_delay_seconds: 172_800, guardian: None },
    }
}

/// Named so a reader can see at a glance which account the fee pipeline drains
/// every block; production fee collection (crediting this account as
/// transactions land) is out of this crate's scope.
pub const fn fee_collector() -> AccountId {
    FEE_COLLECTOR_ACCOUNT
}
