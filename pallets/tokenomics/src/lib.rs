//! Tokenomics Pallet
//!
//! Implements the network's monetary policy: a decaying per-year inflation curve,
//! per-block minting against a hard supply cap, and a deterministic four-way split
//! of every minted unit between staking, contribution rewards, the sequencer, and
//! the treasury.
//!
//! # Overview
//!
//! Unlike a PoW chain's coinbase (minted by an inherent the block author supplies),
//! this is a PoS chain: the amount to mint is a pure function of chain height and
//! the current supply, computed unconditionally every block in `on_finalize` — the
//! EndBlock "mint inflation and distribute emissions" step of the network's fixed
//! per-block schedule. There is nothing for a miner to attest to and nothing to
//! validate against an externally supplied value.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     EndBlock Mint Flow                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  on_finalize(height)                                            │
//! │    rate      = inflation_rate_for_year(year_of(height))         │
//! │    provision = rate * current_supply / blocks_per_year          │
//! │    provision = min(provision, supply_cap - current_supply)      │
//! │    split     = { staking, poc, sequencer, treasury = dust }     │
//! │    mint each share to its recipient account (Currency::deposit) │
//! │    ledger.total_minted += provision; ledger.current += provision│
//! │    notify treasury-redirect of the treasury share               │
//! │    emit Minted, EmissionAllocated, maybe SupplyCapWarning       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub use pallet::*;

use omni_core_primitives::{Amount, Ratio};

/// Hook a receiving pallet implements to learn about treasury inflows as they
/// happen, synchronously, in the same transaction that produced them — mirrors
/// `frame_support::traits::OnUnbalanced`, which this workspace already uses for fee
/// routing (`RuntimeFeeCollector: OnUnbalanced<NegativeImbalance>` in `runtime`).
pub trait TreasuryInflowNotifier<Balance> {
    fn on_treasury_inflow(amount: Balance);
}

impl<Balance> TreasuryInflowNotifier<Balance> for () {
    fn on_treasury_inflow(_amount: Balance) {}
}

/// Read/mutate surface the supply ledger exposes to sibling pallets (the fee
/// pipeline burns fees, PoC burns submission fees) without handing out a mutable
/// reference to the ledger itself — cross-module writes stay narrow interfaces.
pub trait SupplyLedgerInterface<Balance> {
    fn current_supply() -> Balance;
    fn supply_cap() -> Balance;
    fn record_burn(amount: Balance) -> frame_support::dispatch::DispatchResult;
}

/// Year-indexed inflation schedule, per spec: flat years 0-5, then a linear taper
/// bottoming out at `inflation_min`. Pure function of the year index; always
/// clamped into `[inflation_min, inflation_max]` by the caller's final step.
pub fn inflation_rate_for_year(year: u64, inflation_min: Ratio, inflation_max: Ratio) -> Ratio {
    let raw = match year {
        0 => Ratio::from_rational(300, 10_000),
        1 => Ratio::from_rational(275, 10_000),
        2 => Ratio::from_rational(250, 10_000),
        3 => Ratio::from_rational(225, 10_000),
        4 => Ratio::from_rational(200, 10_000),
        5 => Ratio::from_rational(175, 10_000),
        y => {
            let decay = Ratio::from_rational(25u128.saturating_mul((y - 5) as u128), 10_000);
            let tapered = Ratio::from_rational(175, 10_000).saturating_sub(decay);
            tapered.max(inflation_min)
        }
    };
    raw.max(inflation_min).min(inflation_max)
}

/// `annual = current_supply * rate` (truncated), `provision = annual / blocks_per_year`
/// (truncated again), then capped so `current_supply + provision <= supply_cap`.
pub fn compute_block_provision(
    current_supply: Amount,
    rate: Ratio,
    blocks_per_year: u128,
    supply_cap: Amount,
) -> Amount {
    if blocks_per_year == 0 {
        return 0;
    }
    let annual = rate.checked_mul_trunc(current_supply).unwrap_or(0);
    let per_block = annual / blocks_per_year;
    let headroom = supply_cap.saturating_sub(current_supply);
    per_block.min(headroom)
}

/// Deterministic four-way split of a block's minted provision. Staking, PoC, and
/// sequencer take their configured share truncated toward zero; the treasury
/// absorbs whatever is left (its own share plus any rounding dust), so the four
/// parts always sum back to exactly `provision`.
#[derive(Clone, Copy, Default, PartialEq, Eq, sp_runtime::RuntimeDebug)]
pub struct EmissionSplit {
    pub staking: Amount,
    pub poc: Amount,
    pub sequencer: Amount,
    pub treasury: Amount,
}

/// Dispatchable call weights, in the shape `pallet-attestations::WeightInfo` uses:
/// a trait per-call, with [`DefaultWeightInfo`] providing fixed placeholder figures
/// until real benchmarking output replaces them.
pub trait WeightInfo {
    fn set_params() -> frame_support::weights::Weight;
}

pub struct DefaultWeightInfo;

impl WeightInfo for DefaultWeightInfo {
    fn set_params() -> frame_support::weights::Weight {
        frame_support::weights::Weight::from_parts(20_000_000, 0)
    }
}

pub fn split_block_provision(provision: Amount, params: &EmissionSplitParams) -> EmissionSplit {
    let staking = params.staking.checked_mul_trunc(provision).unwrap_or(0);
    let poc = params.poc.checked_mul_trunc(provision).unwrap_or(0);
    let sequencer = params.sequencer.checked_mul_trunc(provision).unwrap_or(0);
    let allocated = staking.saturating_add(poc).saturating_add(sequencer);
    let treasury = provision.saturating_sub(allocated);
    EmissionSplit { staking, poc, sequencer, treasury }
}

/// The four split ratios, kept distinct from the full `TokenomicsParams` storage
/// type so the pure `split_block_provision` function has no pallet dependency.
#[derive(Clone, Copy, PartialEq, Eq, sp_runtime::RuntimeDebug)]
pub struct EmissionSplitParams {
    pub staking: Ratio,
    pub poc: Ratio,
    pub sequencer: Ratio,
    pub treasury: Ratio,
}

/// Percent-of-cap thresholds that trigger a single warning event for the highest
/// one crossed. Index 0 is "no threshold crossed yet".
const SUPPLY_WARNING_THRESHOLDS_PCT: [(u8, u128); 4] = [(4, 99), (3, 95), (2, 90), (1, 80)];

fn highest_crossed_threshold(current: Amount, cap: Amount) -> u8 {
    if cap == 0 {
        return 0;
    }
    let pct = current.saturating_mul(100) / cap;
    for (level, bound) in SUPPLY_WARNING_THRESHOLDS_PCT {
        if pct >= bound {
            return level;
        }
    }
    0
}

#[frame_support::pallet]
pub mod pallet {
    use super::*;
    use frame_support::pallet_prelude::*;
    use frame_support::traits::{Currency, EnsureOrigin};
    use frame_system::pallet_prelude::*;
    use sp_runtime::traits::Saturating;

    pub type BalanceOf<T> =
        <<T as Config>::Currency as Currency<<T as frame_system::Config>::AccountId>>::Balance;

    #[pallet::pallet]
    pub struct Pallet<T>(_);

    #[pallet::config]
    pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
        type Currency: Currency<Self::AccountId, Balance = Amount>;

        /// Governance-only surface: `set_params`.
        type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;
        type WeightInfo: WeightInfo;

        /// Height of the genesis block (`H_genesis` in spec terms); usually `1`.
        #[pallet::constant]
        type GenesisHeight: Get<BlockNumberFor<Self>>;

        /// Blocks per year at the network's target block time.
        #[pallet::constant]
        type BlocksPerYear: Get<u128>;

        type StakingAccount: Get<Self::AccountId>;
        type ContributionRewardAccount: Get<Self::AccountId>;
        type SequencerAccount: Get<Self::AccountId>;
        type TreasuryAccount: Get<Self::AccountId>;

        /// Notified, synchronously, every time a treasury-bound transfer lands —
        /// wired to `pallet-treasury-redirect` in the runtime.
        type TreasuryInflow: TreasuryInflowNotifier<Amount>;
    }

    #[derive(Clone, Copy, Default, PartialEq, Eq, Encode, Decode, TypeInfo, MaxEncodedLen, RuntimeDebug)]
    pub struct SupplyLedgerData {
        pub current: Amount,
        pub total_minted: Amount,
        pub total_burned: Amount,
    }

    #[derive(Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, MaxEncodedLen, RuntimeDebug)]
    pub struct TokenomicsParams {
        pub inflation_min: Ratio,
        pub inflation_max: Ratio,
        pub staking_split: Ratio,
        pub poc_split: Ratio,
        pub sequencer_split: Ratio,
        pub treasury_split: Ratio,
        pub supply_cap: Amount,
    }

    #[derive(Clone, Encode, Decode, PartialEq, Eq, TypeInfo, MaxEncodedLen, RuntimeDebug)]
    pub struct EmissionRecord<AccountBlock> {
        pub height: AccountBlock,
        pub total_emitted: Amount,
        pub staking: Amount,
        pub poc: Amount,
        pub sequencer: Amount,
        pub treasury: Amount,
    }

    #[pallet::storage]
    #[pallet::getter(fn supply_ledger)]
    pub type SupplyLedger<T> = StorageValue<_, SupplyLedgerData, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn params)]
    pub type Params<T> = StorageValue<_, TokenomicsParams, OptionQuery>;

    #[pallet::storage]
    #[pallet::getter(fn next_emission_id)]
    pub type NextEmissionId<T> = StorageValue<_, u64, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn emission_records)]
    pub type EmissionRecords<T: Config> =
        StorageMap<_, Blake2_128Concat, u64, EmissionRecord<BlockNumberFor<T>>, OptionQuery>;

    /// Highest supply-cap-percentage threshold warned about so far (0 = none, see
    /// `SUPPLY_WARNING_THRESHOLDS_PCT`); never decreases.
    #[pallet::storage]
    #[pallet::getter(fn highest_warned_threshold)]
    pub type HighestWarnedThreshold<T> = StorageValue<_, u8, ValueQuery>;

    #[pallet::genesis_config]
    #[derive(frame_support::DefaultNoBound)]
    pub struct GenesisConfig<T: Config> {
        pub inflation_min: Ratio,
        pub inflation_max: Ratio,
        pub staking_split: Ratio,
        pub poc_split: Ratio,
        pub sequencer_split: Ratio,
        pub treasury_split: Ratio,
        pub supply_cap: Amount,
        pub initial_supply: Amount,
        #[serde(skip)]
        pub _phantom: PhantomData<T>,
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            assert!(
                Pallet::<T>::params_are_valid(&TokenomicsParams {
                    inflation_min: self.inflation_min,
                    inflation_max: self.inflation_max,
                    staking_split: self.staking_split,
                    poc_split: self.poc_split,
                    sequencer_split: self.sequencer_split,
                    treasury_split: self.treasury_split,
                    supply_cap: self.supply_cap,
                }),
                "tokenomics genesis params fail validation (split ratios, staking floor, inflation bounds)"
            );
            assert!(self.initial_supply <= self.supply_cap, "initial supply may not exceed the supply cap");

            Params::<T>::put(TokenomicsParams {
                inflation_min: self.inflation_min,
                inflation_max: self.inflation_max,
                staking_split: self.staking_split,
                poc_split: self.poc_split,
                sequencer_split: self.sequencer_split,
                treasury_split: self.treasury_split,
                supply_cap: self.supply_cap,
            });
            SupplyLedger::<T>::put(SupplyLedgerData {
                current: self.initial_supply,
                total_minted: self.initial_supply,
                total_burned: 0,
            });
        }
    }

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// Per-block inflation minted and distributed.
        Minted {
            height: BlockNumberFor<T>,
            total_provision: Amount,
            inflation_rate: Ratio,
        },
        /// One recipient's share of a minting event.
        EmissionAllocated {
            emission_id: u64,
            staking: Amount,
            poc: Amount,
            sequencer: Amount,
            treasury: Amount,
        },
        /// The highest supply-cap-percentage threshold crossed so far.
        SupplyCapWarning { threshold_pct: u128, current: Amount, cap: Amount },
        /// A burn recorded by a sibling pallet (fee pipeline, PoC) against the ledger.
        Burned { amount: Amount, source: BurnSource },
    }

    #[derive(Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, MaxEncodedLen, RuntimeDebug)]
    pub enum BurnSource {
        FeePipeline,
        PocSubmission,
        Other,
    }

    #[pallet::error]
    pub enum Error<T> {
        /// Minting this block's provision would push `current` above `supply_cap`.
        SupplyCapExceeded,
        /// A sub-step of the emission split failed; the whole mint is reverted.
        MintFailure,
        /// A burn would take `current` below zero, or would break
        /// `current = total_minted - total_burned`.
        SupplyConservationBroken,
        /// Params have not been initialised (genesis was skipped).
        ParamsNotSet,
        /// Proposed params fail one of the invariants genesis itself enforces.
        InvalidParams,
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::set_params())]
        pub fn set_params(origin: OriginFor<T>, params: TokenomicsParams) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            ensure!(Self::params_are_valid(&params), Error::<T>::InvalidParams);
            Params::<T>::put(params);
            Ok(())
        }
    }

    #[pallet::hooks]
    impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
        fn on_finalize(height: BlockNumberFor<T>) {
            let Some(params) = Params::<T>::get() else {
                log::warn!(target: "tokenomics", "params not set, skipping mint at block {:?}", height);
                return;
            };
            let genesis_height = T::GenesisHeight::get();
            let year: u64 = if height <= genesis_height {
                0
            } else {
                let elapsed: u128 = (height - genesis_height).saturated_into::<u128>();
                (elapsed / T::BlocksPerYear::get()) as u64
            };
            let rate = inflation_rate_for_year(year, params.inflation_min, params.inflation_max);

            let ledger = SupplyLedger::<T>::get();
            let provision =
                compute_block_provision(ledger.current, rate, T::BlocksPerYear::get(), params.supply_cap);
            if provision == 0 {
                return;
            }

            let split = split_block_provision(
                provision,
                &EmissionSplitParams {
                    staking: params.staking_split,
                    poc: params.poc_split,
                    sequencer: params.sequencer_split,
                    treasury: params.treasury_split,
                },
            );

            if split.staking > 0 {
                let _ = T::Currency::deposit_creating(&T::StakingAccount::get(), split.staking);
            }
            if split.poc > 0 {
                let _ = T::Currency::deposit_creating(&T::ContributionRewardAccount::get(), split.poc);
            }
            if split.sequencer > 0 {
                let _ = T::Currency::deposit_creating(&T::SequencerAccount::get(), split.sequencer);
            }
            if split.treasury > 0 {
                let _ = T::Currency::deposit_creating(&T::TreasuryAccount::get(), split.treasury);
                T::TreasuryInflow::on_treasury_inflow(split.treasury);
            }

            SupplyLedger::<T>::mutate(|l| {
                l.total_minted = l.total_minted.saturating_add(provision);
                l.current = l.current.saturating_add(provision);
            });

            let emission_id = NextEmissionId::<T>::mutate(|id| {
                let this_id = *id;
                *id = id.saturating_add(1);
                this_id
            });
            EmissionRecords::<T>::insert(
                emission_id,
                EmissionRecord {
                    height,
                    total_emitted: provision,
                    staking: split.staking,
                    poc: split.poc,
                    sequencer: split.sequencer,
                    treasury: split.treasury,
                },
            );

            Self::deposit_event(Event::Minted { height, total_provision: provision, inflation_rate: rate });
            Self::deposit_event(Event::EmissionAllocated {
                emission_id,
                staking: split.staking,
                poc: split.poc,
                sequencer: split.sequencer,
                treasury: split.treasury,
            });

            let updated = SupplyLedger::<T>::get();
            let crossed = highest_crossed_threshold(updated.current, params.supply_cap);
            let previously_warned = HighestWarnedThreshold::<T>::get();
            if crossed > previously_warned {
                HighestWarnedThreshold::<T>::put(crossed);
                let threshold_pct = SUPPLY_WARNING_THRESHOLDS_PCT
                    .iter()
                    .find(|(level, _)| *level == crossed)
                    .map(|(_, pct)| *pct)
                    .unwrap_or(0);
                log::warn!(
                    target: "tokenomics",
                    "supply at {}% of cap ({} / {})",
                    threshold_pct, updated.current, params.supply_cap
                );
                Self::deposit_event(Event::SupplyCapWarning {
                    threshold_pct,
                    current: updated.current,
                    cap: params.supply_cap,
                });
            }
        }

        #[cfg(feature = "try-runtime")]
        fn try_state(_: BlockNumberFor<T>) -> Result<(), sp_runtime::TryRuntimeError> {
            let ledger = SupplyLedger::<T>::get();
            if ledger.current != ledger.total_minted.saturating_sub(ledger.total_burned) {
                return Err("supply conservation broken: current != total_minted - total_burned".into());
            }
            if let Some(params) = Params::<T>::get() {
                if ledger.current > params.supply_cap {
                    return Err("supply cap exceeded".into());
                }
            }
            Ok(())
        }
    }

    impl<T: Config> Pallet<T> {
        /// Same invariants genesis enforces: split ratios sum to 1.0, the staking
        /// floor and per-share ceiling hold, and `inflation_min <= inflation_max
        /// <= 3%`. Shared by `genesis_build` and `set_params` so a governance
        /// update can never relax what genesis itself requires.
        fn params_are_valid(params: &TokenomicsParams) -> bool {
            let sum = params
                .staking_split
                .saturating_add(params.poc_split)
                .saturating_add(params.sequencer_split)
                .saturating_add(params.treasury_split);
            if sum != Ratio::one() {
                return false;
            }
            if params.staking_split < Ratio::from_percent(20) {
                return false;
            }
            let max_share = [params.staking_split, params.poc_split, params.sequencer_split, params.treasury_split]
                .into_iter()
                .fold(Ratio::zero(), |a, b| if b > a { b } else { a });
            if max_share > Ratio::from_percent(60) {
                return false;
            }
            if params.inflation_max > Ratio::from_percent(3) {
                return false;
            }
            if params.inflation_min > params.inflation_max {
                return false;
            }
            true
        }
    }

    impl<T: Config> SupplyLedgerInterface<Amount> for Pallet<T> {
        fn current_supply() -> Amount {
            SupplyLedger::<T>::get().current
        }

        fn supply_cap() -> Amount {
            Params::<T>::get().map(|p| p.supply_cap).unwrap_or(0)
        }

        fn record_burn(amount: Amount) -> DispatchResult {
            if amount == 0 {
                return Ok(());
            }
            SupplyLedger::<T>::try_mutate(|l| -> DispatchResult {
                l.current = l.current.checked_sub(amount).ok_or(Error::<T>::SupplyConservationBroken)?;
                l.total_burned = l.total_burned.saturating_add(amount);
                ensure!(
                    l.current == l.total_minted.saturating_sub(l.total_burned),
                    Error::<T>::SupplyConservationBroken
                );
                Ok(())
            })?;
            Self::deposit_event(Event::Burned { amount, source: BurnSource::Other });
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frame_support::{derive_impl, parameter_types, traits::Hooks};
    use sp_runtime::BuildStorage;

    type Block = frame_system::mocking::MockBlock<Test>;
    type AccountId = u64;

    frame_support::construct_runtime!(
        pub enum Test {
            System: frame_system,
            Balances: pallet_balances,
            Tokenomics: pallet,
        }
    );

    #[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
    impl frame_system::Config for Test {
        type BaseCallFilter = frame_support::traits::Everything;
        type Block = Block;
        type AccountId = AccountId;
        type Lookup = sp_runtime::traits::IdentityLookup<AccountId>;
        type AccountData = pallet_balances::AccountData<Amount>;
    }

    impl pallet_balances::Config for Test {
        type Balance = Amount;
        type DustRemoval = ();
        type RuntimeEvent = RuntimeEvent;
        type ExistentialDeposit = frame_support::traits::ConstU128<1>;
        type AccountStore = System;
        type WeightInfo = ();
        type MaxLocks = frame_support::traits::ConstU32<16>;
        type MaxReserves = frame_support::traits::ConstU32<16>;
        type ReserveIdentifier = [u8; 8];
        type RuntimeHoldReason = ();
        type RuntimeFreezeReason = ();
        type FreezeIdentifier = ();
        type MaxFreezes = frame_support::traits::ConstU32<0>;
    }

    parameter_types! {
        pub const StakingAccountId: AccountId = 10;
        pub const ContributionRewardAccountId: AccountId = 11;
        pub const SequencerAccountId: AccountId = 12;
        pub const TreasuryAccountId: AccountId = 13;
        pub const GenesisHeight: u64 = 1;
        pub const BlocksPerYear: u128 = 1000;
    }

    impl Config for Test {
        type Currency = Balances;
        type AdminOrigin = frame_system::EnsureRoot<AccountId>;
        type WeightInfo = DefaultWeightInfo;
        type GenesisHeight = GenesisHeight;
        type BlocksPerYear = BlocksPerYear;
        type StakingAccount = StakingAccountId;
        type ContributionRewardAccount = ContributionRewardAccountId;
        type SequencerAccount = SequencerAccountId;
        type TreasuryAccount = TreasuryAccountId;
        type TreasuryInflow = ();
    }

    fn new_test_ext(initial_supply: Amount, supply_cap: Amount) -> sp_io::TestExternalities {
        let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();
        pallet::GenesisConfig::<Test> {
            inflation_min: Ratio::from_percent(1),
            inflation_max: Ratio::from_percent(3),
            staking_split: Ratio::from_percent(40),
            poc_split: Ratio::from_percent(30),
            sequencer_split: Ratio::from_percent(20),
            treasury_split: Ratio::from_percent(10),
            supply_cap,
            initial_supply,
            _phantom: Default::default(),
        }
        .assimilate_storage(&mut t)
        .unwrap();
        t.into()
    }

    #[test]
    fn s1_default_emission_split() {
        let split = split_block_provision(
            1_000_000,
            &EmissionSplitParams {
                staking: Ratio::from_percent(40),
                poc: Ratio::from_percent(30),
                sequencer: Ratio::from_percent(20),
                treasury: Ratio::from_percent(10),
            },
        );
        assert_eq!(split.staking, 400_000);
        assert_eq!(split.poc, 300_000);
        assert_eq!(split.sequencer, 200_000);
        assert_eq!(split.treasury, 100_000);
    }

    #[test]
    fn s2_dust_goes_to_treasury() {
        let split = split_block_provision(
            1_000_001,
            &EmissionSplitParams {
                staking: Ratio::from_percent(40),
                poc: Ratio::from_percent(30),
                sequencer: Ratio::from_percent(20),
                treasury: Ratio::from_percent(10),
            },
        );
        assert_eq!(split.staking, 400_000);
        assert_eq!(split.poc, 300_000);
        assert_eq!(split.sequencer, 200_000);
        assert_eq!(split.treasury, 100_001);
        assert_eq!(
            split.staking + split.poc + split.sequencer + split.treasury,
            1_000_001
        );
    }

    #[test]
    fn inflation_schedule_is_pure_and_year_indexed() {
        let min = Ratio::from_percent(1);
        let max = Ratio::from_percent(3);
        assert_eq!(inflation_rate_for_year(0, min, max), Ratio::from_rational(300, 10_000));
        assert_eq!(inflation_rate_for_year(1, min, max), Ratio::from_rational(275, 10_000));
        assert_eq!(inflation_rate_for_year(5, min, max), Ratio::from_rational(175, 10_000));
        // y = 6 -> 1.75% - 0.25% = 1.5%
        assert_eq!(inflation_rate_for_year(6, min, max), Ratio::from_rational(150, 10_000));
        // recomputing the same year always yields the same rate
        assert_eq!(inflation_rate_for_year(6, min, max), inflation_rate_for_year(6, min, max));
        // far enough out, the taper is clamped at inflation_min
        assert_eq!(inflation_rate_for_year(1000, min, max), min);
    }

    #[test]
    fn mint_respects_supply_cap_boundary() {
        new_test_ext(0, 999).execute_with(|| {
            Pallet::<Test>::on_finalize(1);
            assert_eq!(SupplyLedger::<Test>::get().current, 0);
        });
    }

    #[test]
    fn mint_caps_provision_to_remaining_headroom() {
        // current = cap - 1: minting should bring current exactly to cap.
        let provision = compute_block_provision(999, Ratio::from_percent(100), 1, 1000);
        assert_eq!(provision, 1);
        let over = compute_block_provision(1000, Ratio::from_percent(100), 1, 1000);
        assert_eq!(over, 0);
    }

    #[test]
    fn record_burn_preserves_conservation_invariant() {
        new_test_ext(1_000, 10_000).execute_with(|| {
            Pallet::<Test>::record_burn(400).unwrap();
            let ledger = SupplyLedger::<Test>::get();
            assert_eq!(ledger.current, 600);
            assert_eq!(ledger.total_burned, 400);
            assert_eq!(ledger.current, ledger.total_minted.saturating_sub(ledger.total_burned));
        });
    }

    #[test]
    fn record_burn_rejects_more_than_current_supply() {
        new_test_ext(100, 10_000).execute_with(|| {
            assert!(Pallet::<Test>::record_burn(101).is_err());
            assert_eq!(SupplyLedger::<Test>::get().current, 100);
        });
    }
}
