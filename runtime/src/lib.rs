//! Wires the five OMNI economic-core pallets into a single runtime.
//!
//! There is no node, no RPC surface, and no WASM build behind this crate — that
//! whole outer layer is explicitly out of scope for the economic core (see
//! `SPEC_FULL.md` §8). What this crate *does* own is the one thing that can't be
//! tested at the pallet level: the `construct_runtime!` pallet order, which is
//! load-bearing. `frame_executive` runs every pallet's `on_initialize`/
//! `on_finalize` in declaration order, so `Tokenomics` must mint before
//! `FeePipeline` partitions fees, which must run before `TreasuryRedirect` sweeps
//! the treasury's accumulated inflows, which must happen before
//! `GovernanceTimelock`'s own `on_finalize` queues any proposal the governance
//! collaborator reported passed this block and sweeps expired operations —
//! strictly before `GovernanceStub`'s own execution pass, which this pallet order
//! and `GovernanceTimelock::integrity_test` both enforce. Reordering these
//! pallets here is the one mistake the spec calls a fatal wiring bug.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod chain_spec;
pub mod governance_stub;

use alloc::vec::Vec;
use frame_support::traits::{ConstU32, ConstU64, Get};
use frame_support::{construct_runtime, derive_impl, parameter_types};
use frame_system::EnsureRoot;
use omni_core_primitives::{Amount, Ratio};
use sp_runtime::traits::IdentityLookup;

pub type AccountId = u64;
pub type Balance = Amount;
pub type BlockNumber = u64;
pub type ProposalId = u64;

type Block = frame_system::mocking::MockBlock<Runtime>;

/// The four emission/treasury sink accounts, fixed for this runtime rather than
/// resolved through an address-derivation scheme — a deliberate simplification
/// matching the "accounts, not a PalletId-derived sovereign account" shape the
/// pallets themselves expect from `T::StakingAccount` et al.
pub const STAKING_ACCOUNT: AccountId = 10;
pub const CONTRIBUTION_REWARD_ACCOUNT: AccountId = 11;
pub const SEQUENCER_ACCOUNT: AccountId = 12;
pub const TREASURY_ACCOUNT: AccountId = 13;
pub const FEE_COLLECTOR_ACCOUNT: AccountId = 20;
pub const POC_MODULE_ACCOUNT: AccountId = 30;

parameter_types! {
    pub const GenesisHeight: BlockNumber = 1;
    // ~7 second block time -> 365 * 86_400 / 7 blocks per year.
    pub const BlocksPerYear: u128 = 4_507_680;
    pub const BlocksPerDay: u64 = 12_343;
    pub const ExpiryWindowSeconds: u64 = 604_800;
    pub const MaxGovMessagesLen: u32 = 2_048;
    pub const MaxCancelReasonLen: u32 = 256;
    // `GovernanceStub`'s own index in `construct_runtime!` below -- the
    // governance module's execution pass this pallet's queueing must run
    // strictly before within the same block.
    pub const GovernanceExecutionPalletIndex: u32 = 8;
}

/// Protocol-wide floor/ceiling on the adaptive burn ratio — wider than any
/// genesis-configured `min_burn_ratio`/`max_burn_ratio`, which must nest inside
/// this band (checked at genesis build time).
pub struct ProtocolBurnFloor;
impl Get<Ratio> for ProtocolBurnFloor {
    fn get() -> Ratio {
        Ratio::from_percent(5)
    }
}

pub struct ProtocolBurnCeiling;
impl Get<Ratio> for ProtocolBurnCeiling {
    fn get() -> Ratio {
        Ratio::from_percent(95)
    }
}

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Runtime {
    type BaseCallFilter = frame_support::traits::Everything;
    type Block = Block;
    type AccountId = AccountId;
    type Lookup = IdentityLookup<AccountId>;
    type AccountData = pallet_balances::AccountData<Balance>;
}

impl pallet_timestamp::Config for Runtime {
    type Moment = u64;
    type OnTimestampSet = ();
    type MinimumPeriod = ConstU64<1>;
    type WeightInfo = ();
}

impl pallet_balances::Config for Runtime {
    type Balance = Balance;
    type DustRemoval = ();
    type RuntimeEvent = RuntimeEvent;
    type ExistentialDeposit = frame_support::traits::ConstU128<1>;
    type AccountStore = System;
    type WeightInfo = ();
    type MaxLocks = ConstU32<16>;
    type MaxReserves = ConstU32<16>;
    type ReserveIdentifier = [u8; 8];
    type RuntimeHoldReason = ();
    type RuntimeFreezeReason = ();
    type FreezeIdentifier = ();
    type MaxFreezes = ConstU32<0>;
}

parameter_types! {
    pub const StakingAccountId: AccountId = STAKING_ACCOUNT;
    pub const ContributionRewardAccountId: AccountId = CONTRIBUTION_REWARD_ACCOUNT;
    pub const SequencerAccountId: AccountId = SEQUENCER_ACCOUNT;
    pub const TreasuryAccountId: AccountId = TREASURY_ACCOUNT;
    pub const FeeCollectorAccountId: AccountId = FEE_COLLECTOR_ACCOUNT;
    pub const PocModuleAccountId: AccountId = POC_MODULE_ACCOUNT;
}

impl pallet_tokenomics::Config for Runtime {
    type RuntimeEvent = RuntimeEvent;
    type Currency = Balances;
    type AdminOrigin = EnsureRoot<AccountId>;
    type WeightInfo = pallet_tokenomics::DefaultWeightInfo;
    type GenesisHeight = GenesisHeight;
    type BlocksPerYear = BlocksPerYear;
    type StakingAccount = StakingAccountId;
    type ContributionRewardAccount = ContributionRewardAccountId;
    type SequencerAccount = SequencerAccountId;
    type TreasuryAccount = TreasuryAccountId;
    type TreasuryInflow = TreasuryRedirect;
}

impl pallet_fee_pipeline::Config for Runtime {
    type RuntimeEvent = RuntimeEvent;
    type Currency = Balances;
    type SupplyLedger = Tokenomics;
    type TreasuryInflow = TreasuryRedirect;
    type AdminOrigin = EnsureRoot<AccountId>;
    type WeightInfo = pallet_fee_pipeline::DefaultWeightInfo;
    type BlockUtilization = pallet_fee_pipeline::FrameSystemBlockUtilization<Runtime>;
    type FeeCollectorAccount = FeeCollectorAccountId;
    type TreasuryAccount = TreasuryAccountId;
    type BlocksPerDay = BlocksPerDay;
    type ProtocolBurnFloor = ProtocolBurnFloor;
    type ProtocolBurnCeiling = ProtocolBurnCeiling;
}

impl pallet_treasury_redirect::Config for Runtime {
    type RuntimeEvent = RuntimeEvent;
    type Currency = Balances;
    type TreasuryAccount = TreasuryAccountId;
    type AdminOrigin = EnsureRoot<AccountId>;
    type WeightInfo = pallet_treasury_redirect::DefaultWeightInfo;
}

/// Backs bonded-token accounting with `pallet_balances`' reserve mechanism, since
/// real staking bookkeeping is an external collaborator this crate never owns
/// (`SPEC_FULL.md` §1). `canonical_validator` is the identity map: this runtime
/// has no separate validator-key/controller-account split to resolve.
pub struct RuntimeStaking;

impl pallet_poc::StakingProvider<AccountId> for RuntimeStaking {
    fn canonical_validator(who: &AccountId) -> Option<AccountId> {
        Some(*who)
    }

    fn bonded_tokens(validator: &AccountId) -> Amount {
        pallet_balances::Pallet::<Runtime>::reserved_balance(validator)
    }

    fn total_bonded_tokens() -> Amount {
        frame_system::Account::<Runtime>::iter()
            .map(|(_, info)| info.data.reserved)
            .fold(0u128, |acc, reserved| acc.saturating_add(reserved))
    }
}

impl pallet_poc::Config for Runtime {
    type RuntimeEvent = RuntimeEvent;
    type Currency = Balances;
    type SupplyLedger = Tokenomics;
    type Staking = RuntimeStaking;
    type Identity = pallet_poc::NoIdentityProvider;
    type AdminOrigin = EnsureRoot<AccountId>;
    type WeightInfo = pallet_poc::DefaultWeightInfo;
    type ModuleAccount = PocModuleAccountId;
    type MaxSubmissionsPerBlock = ConstU32<50>;
    type MaxEndorsersPerContribution = ConstU32<100>;
    type PruneHorizon = ConstU64<100>;
    type MaxExemptAddresses = ConstU32<64>;
    type MaxValidatorCacheEntries = ConstU32<256>;
}

/// Adapts [`governance_stub`], the in-runtime stand-in for the external
/// governance collaborator, to [`pallet_governance_timelock::GovernanceProvider`].
/// Real proposal storage, voting and tallying live entirely in the external
/// governance module this crate never implements — `governance_stub` exists only
/// so this runtime has something behind the trait to exercise the timelock
/// pallet's queue/execute/cancel/expiry flow end to end.
pub struct RuntimeGovernance;

impl pallet_governance_timelock::GovernanceProvider<ProposalId, AccountId> for RuntimeGovernance {
    fn proposal_messages(proposal: ProposalId) -> Option<Vec<u8>> {
        governance_stub::Messages::<Runtime>::get(proposal).map(|bounded| bounded.into_inner())
    }

    fn suppress_direct_execution(proposal: ProposalId) -> Result<(), ()> {
        governance_stub::Pallet::<Runtime>::mark_suppressed(proposal);
        Ok(())
    }

    fn dispatch_messages(messages: &[u8]) -> frame_support::dispatch::DispatchResult {
        log::info!(
            target: "governance-timelock",
            "dispatching {} bytes of queued governance messages",
            messages.len()
        );
        Ok(())
    }
}

impl pallet_governance_timelock::Config for Runtime {
    type RuntimeEvent = RuntimeEvent;
    type ProposalId = ProposalId;
    type TimeProvider = Timestamp;
    type Governance = RuntimeGovernance;
    type AdminOrigin = EnsureRoot<AccountId>;
    type WeightInfo = pallet_governance_timelock::DefaultWeightInfo;
    type ExpiryWindowSeconds = ExpiryWindowSeconds;
    type MaxMessagesLen = MaxGovMessagesLen;
    type MaxPendingProposals = ConstU32<64>;
    type MaxCancelReasonLen = MaxCancelReasonLen;
    type GovernanceExecutionPalletIndex = GovernanceExecutionPalletIndex;
}

impl governance_stub::Config for Runtime {
    type RuntimeEvent = RuntimeEvent;
    type TimelockHook = GovernanceTimelock;
    type MaxMessagesLen = MaxGovMessagesLen;
}

// Declaration order is the EndBlock pipeline order: System and Timestamp first
// (they have no economic hooks), then Balances, then Tokenomics (mint) ->
// FeePipeline (partition fees) -> TreasuryRedirect (sweep accumulated inflows),
// then Poc (no block hooks of its own beyond pruning) and GovernanceTimelock
// (queue newly-passed proposals and sweep expired ones, both in on_finalize).
// GovernanceStub is declared last and stands in for the governance module's own
// execution pass; GovernanceExecutionPalletIndex above must match its index here,
// and GovernanceTimelock::integrity_test asserts it is declared earlier.
construct_runtime!(
    pub enum Runtime {
        System: frame_system,
        Timestamp: pallet_timestamp,
        Balances: pallet_balances,
        Tokenomics: pallet_tokenomics,
        FeePipeline: pallet_fee_pipeline,
        TreasuryRedirect: pallet_treasury_redirect,
        Poc: pallet_poc,
        GovernanceTimelock: pallet_governance_timelock,
        GovernanceStub: governance_stub,
    }
);
