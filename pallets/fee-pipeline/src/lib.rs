//! Fee Pipeline Pallet
//!
//! At EndBlock, partitions the block's accumulated transaction fees among burn,
//! validators, and treasury, driven by a six-priority adaptive burn-ratio selector
//! and a seven-day rolling transaction-count window.
//!
//! # Overview
//!
//! Grounded on `pallet-fee-model`'s burn/collect vocabulary (`TotalBurned`,
//! `TotalCollected`, a `FeeBurned`-style event), but restructured the way
//! `pallet-coinbase` structures its minting pass: this pallet has no
//! `OnChargeTransaction` hook and intercepts nothing at signing time. Instead the
//! fee-collector account accumulates the block's fees (deposited there by the
//! runtime's transaction-payment wiring, out of this pallet's scope) and
//! `on_finalize` drains it in one deterministic pass.

#![cfg_attr(not(feature = "std"), no_std)]

pub use pallet::*;

use omni_core_primitives::{Amount, Ratio};
use pallet_tokenomics::{SupplyLedgerInterface, TreasuryInflowNotifier};

/// Reports this block's resource consumption against its limit, so the congestion
/// priority can compare `used / limit` to a threshold. `frame_system::Config`
/// already tracks consumed weight; the default implementation below reads it
/// directly rather than inventing a parallel gas meter.
pub trait BlockUtilization {
    fn used() -> u64;
    fn limit() -> u64;
}

impl BlockUtilization for () {
    fn used() -> u64 {
        0
    }
    fn limit() -> u64 {
        1
    }
}

/// Default [`BlockUtilization`] reading `frame_system`'s own weight accounting.
pub struct FrameSystemBlockUtilization<T>(core::marker::PhantomData<T>);

impl<T: frame_system::Config> BlockUtilization for FrameSystemBlockUtilization<T> {
    fn used() -> u64 {
        frame_system::Pallet::<T>::block_weight().total().ref_time()
    }

    fn limit() -> u64 {
        T::BlockWeights::get().max_block.ref_time()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, codec::Encode, codec::Decode, scale_info::TypeInfo, codec::MaxEncodedLen, sp_runtime::RuntimeDebug)]
pub enum FeeTriggerLabel {
    EmergencyOverride,
    AdaptiveDisabled,
    TreasuryProtection,
    CongestionControl,
    AdoptionIncentive,
    Normal,
}

impl Default for FeeTriggerLabel {
    fn default() -> Self {
        FeeTriggerLabel::Normal
    }
}

/// Snapshot of the inputs the six-priority selector reads; kept separate from
/// storage so the selector itself stays a pure, independently testable function.
pub struct BurnSelectorInputs {
    pub emergency_override: bool,
    pub adaptive_enabled: bool,
    pub treasury_balance: Amount,
    pub current_supply: Amount,
    pub treasury_floor_pct: Ratio,
    pub gas_used: u64,
    pub gas_limit: u64,
    pub congestion_threshold: Ratio,
    pub rolling_avg_tx_per_day: u128,
    pub tx_per_day_target: u128,
}

/// First-match-wins six-priority selector from spec §4.2.
pub fn select_burn_trigger(
    inputs: &BurnSelectorInputs,
    min_burn_ratio: Ratio,
    default_burn_ratio: Ratio,
    max_burn_ratio: Ratio,
    fee_burn_ratio: Ratio,
) -> (FeeTriggerLabel, Ratio) {
    if inputs.emergency_override {
        return (FeeTriggerLabel::EmergencyOverride, fee_burn_ratio);
    }
    if !inputs.adaptive_enabled {
        return (FeeTriggerLabel::AdaptiveDisabled, fee_burn_ratio);
    }
    if inputs.current_supply > 0 {
        let treasury_pct = Ratio::from_rational(inputs.treasury_balance, inputs.current_supply);
        if treasury_pct < inputs.treasury_floor_pct {
            return (FeeTriggerLabel::TreasuryProtection, min_burn_ratio);
        }
    }
    if inputs.gas_limit > 0 {
        let utilization = Ratio::from_rational(inputs.gas_used as u128, inputs.gas_limit as u128);
        if utilization >= inputs.congestion_threshold {
            return (FeeTriggerLabel::CongestionControl, max_burn_ratio);
        }
    }
    if inputs.rolling_avg_tx_per_day < inputs.tx_per_day_target {
        return (FeeTriggerLabel::AdoptionIncentive, min_burn_ratio);
    }
    (FeeTriggerLabel::Normal, default_burn_ratio)
}

/// `(1 - alpha) * last + alpha * target`, `alpha = 1 / smoothing_blocks`, unless
/// `last` is still zero (nothing applied yet) or `smoothing_blocks <= 1`, in which
/// case the target is used directly, per spec §4.2.
pub fn smooth_burn_ratio(last: Ratio, target: Ratio, smoothing_blocks: u32) -> Ratio {
    if last.is_zero() || smoothing_blocks <= 1 {
        return target;
    }
    let alpha = Ratio::from_rational(1, smoothing_blocks as u128);
    last.smoothed_towards(target, alpha)
}

#[derive(Clone, Copy, Default, PartialEq, Eq, sp_runtime::RuntimeDebug)]
pub struct FeePartition {
    pub burn: Amount,
    pub treasury: Amount,
    pub validators: Amount,
}

/// `treasury = 10% of total`; `burn = burn_ratio * remaining`; `validators = remaining - burn`.
pub fn partition_adaptive(total: Amount, burn_ratio: Ratio) -> FeePartition {
    let treasury = Ratio::from_percent(10).checked_mul_trunc(total).unwrap_or(0);
    let remaining = total.saturating_sub(treasury);
    let burn = burn_ratio.checked_mul_trunc(remaining).unwrap_or(0);
    let validators = remaining.saturating_sub(burn);
    FeePartition { burn, treasury, validators }
}

/// `burn = fee_burn_ratio * total`, `treasury = treasury_fee_ratio * total`, with
/// truncation dust folded into `burn`, no validator share.
pub fn partition_fixed(total: Amount, fee_burn_ratio: Ratio, treasury_fee_ratio: Ratio) -> FeePartition {
    let burn_trunc = fee_burn_ratio.checked_mul_trunc(total).unwrap_or(0);
    let treasury = treasury_fee_ratio.checked_mul_trunc(total).unwrap_or(0);
    let allocated = burn_trunc.saturating_add(treasury);
    let dust = total.saturating_sub(allocated);
    FeePartition { burn: burn_trunc.saturating_add(dust), treasury, validators: 0 }
}

/// 7 daily slots of transaction counts plus the in-progress accumulator, rotated
/// every `blocks_per_day` blocks. `filled_slots` tracks how many of the 7 slots
/// actually hold data yet (capped at 7), so the average is zero until at least one
/// full day has elapsed, per spec §4.2.
#[derive(Clone, Copy, PartialEq, Eq, codec::Encode, codec::Decode, Default, scale_info::TypeInfo, codec::MaxEncodedLen, sp_runtime::RuntimeDebug)]
pub struct RollingTxWindow {
    pub slots: [i64; 7],
    pub current_day_index: u8,
    pub current_accumulator: i64,
    pub last_rotation_height: u64,
    pub filled_slots: u8,
}

pub fn record_block_tx_count(window: &mut RollingTxWindow, height: u64, blocks_per_day: u64, tx_count: u64) {
    window.current_accumulator = window.current_accumulator.saturating_add(tx_count as i64);
    if blocks_per_day == 0 {
        return;
    }
    if height.saturating_sub(window.last_rotation_height) >= blocks_per_day {
        let idx = (window.current_day_index % 7) as usize;
        window.slots[idx] = window.current_accumulator;
        window.current_day_index = (window.current_day_index + 1) % 7;
        window.current_accumulator = 0;
        window.last_rotation_height = height;
        window.filled_slots = (window.filled_slots + 1).min(7);
    }
}

/// Dispatchable call weights, in the shape `pallet-attestations::WeightInfo` uses:
/// a trait per-call, with [`DefaultWeightInfo`] providing fixed placeholder figures
/// until real benchmarking output replaces them.
pub trait WeightInfo {
    fn set_params() -> frame_support::weights::Weight;
    fn set_emergency_override() -> frame_support::weights::Weight;
}

pub struct DefaultWeightInfo;

impl WeightInfo for DefaultWeightInfo {
    fn set_params() -> frame_support::weights::Weight {
        frame_support::weights::Weight::from_parts(20_000_000, 0)
    }

    fn set_emergency_override() -> frame_support::weights::Weight {
        frame_support::weights::Weight::from_parts(10_000_000, 0)
    }
}

pub fn rolling_average(window: &RollingTxWindow) -> u128 {
    if window.filled_slots == 0 {
        return 0;
    }
    let sum: i128 = window.slots.iter().take(window.filled_slots as usize).map(|&s| s as i128).sum();
    (sum / window.filled_slots as i128).max(0) as u128
}

#[frame_support::pallet]
pub mod pallet {
    use super::*;
    use frame_support::pallet_prelude::*;
    use frame_support::traits::{Currency, EnsureOrigin, ExistenceRequirement, WithdrawReasons};
    use frame_system::pallet_prelude::*;
    use sp_runtime::traits::Saturating;

    #[pallet::pallet]
    pub struct Pallet<T>(_);

    #[pallet::config]
    pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
        type Currency: Currency<Self::AccountId, Balance = Amount>;
        type SupplyLedger: SupplyLedgerInterface<Amount>;
        type TreasuryInflow: TreasuryInflowNotifier<Amount>;
        type BlockUtilization: BlockUtilization;

        /// Governance-only surface: `set_params`, `set_emergency_override`.
        type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;
        type WeightInfo: WeightInfo;

        type FeeCollectorAccount: Get<Self::AccountId>;
        type TreasuryAccount: Get<Self::AccountId>;

        #[pallet::constant]
        type BlocksPerDay: Get<u64>;
        #[pallet::constant]
        type ProtocolBurnFloor: Get<Ratio>;
        #[pallet::constant]
        type ProtocolBurnCeiling: Get<Ratio>;
    }

    #[derive(Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, MaxEncodedLen, RuntimeDebug)]
    pub struct AdaptiveBurnParams {
        pub adaptive_enabled: bool,
        pub emergency_override: bool,
        pub min_burn_ratio: Ratio,
        pub default_burn_ratio: Ratio,
        pub max_burn_ratio: Ratio,
        pub treasury_floor_pct: Ratio,
        pub congestion_threshold: Ratio,
        pub tx_per_day_target: u128,
        pub smoothing_blocks: u32,
        pub fee_burn_ratio: Ratio,
        pub treasury_fee_ratio: Ratio,
    }

    #[derive(Clone, Copy, Default, PartialEq, Eq, Encode, Decode, TypeInfo, MaxEncodedLen, RuntimeDebug)]
    pub struct FeeMetricsData {
        pub cumulative_collected: Amount,
        pub cumulative_burned: Amount,
        pub cumulative_to_treasury: Amount,
        pub last_update_height: u64,
    }

    #[pallet::storage]
    #[pallet::getter(fn params)]
    pub type Params<T> = StorageValue<_, AdaptiveBurnParams, OptionQuery>;

    #[pallet::storage]
    #[pallet::getter(fn last_applied_burn_ratio)]
    pub type LastAppliedBurnRatio<T> = StorageValue<_, Ratio, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn last_trigger)]
    pub type LastTrigger<T> = StorageValue<_, FeeTriggerLabel, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn window)]
    pub type Window<T> = StorageValue<_, RollingTxWindow, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn metrics)]
    pub type Metrics<T> = StorageValue<_, FeeMetricsData, ValueQuery>;

    #[pallet::genesis_config]
    #[derive(frame_support::DefaultNoBound)]
    pub struct GenesisConfig<T: Config> {
        pub adaptive_enabled: bool,
        pub min_burn_ratio: Ratio,
        pub default_burn_ratio: Ratio,
        pub max_burn_ratio: Ratio,
        pub treasury_floor_pct: Ratio,
        pub congestion_threshold: Ratio,
        pub tx_per_day_target: u128,
        pub smoothing_blocks: u32,
        pub fee_burn_ratio: Ratio,
        pub treasury_fee_ratio: Ratio,
        #[serde(skip)]
        pub _phantom: PhantomData<T>,
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            assert!(self.min_burn_ratio <= self.default_burn_ratio, "min_burn_ratio must not exceed default_burn_ratio");
            assert!(self.default_burn_ratio <= self.max_burn_ratio, "default_burn_ratio must not exceed max_burn_ratio");
            assert!(self.min_burn_ratio >= T::ProtocolBurnFloor::get(), "min_burn_ratio below protocol floor");
            assert!(self.max_burn_ratio <= T::ProtocolBurnCeiling::get(), "max_burn_ratio above protocol ceiling");
            // Fixed-mode partitioning is whatever the runtime falls back to when
            // adaptive partitioning is off (see `use_adaptive_partition` in
            // `on_finalize`), so the conservation check must gate on the same flag.
            if !self.adaptive_enabled {
                assert_eq!(
                    self.fee_burn_ratio.saturating_add(self.treasury_fee_ratio),
                    Ratio::one(),
                    "fixed-mode fee_burn_ratio + treasury_fee_ratio must equal exactly 1.0"
                );
            }
            Params::<T>::put(AdaptiveBurnParams {
                adaptive_enabled: self.adaptive_enabled,
                emergency_override: false,
                min_burn_ratio: self.min_burn_ratio,
                default_burn_ratio: self.default_burn_ratio,
                max_burn_ratio: self.max_burn_ratio,
                treasury_floor_pct: self.treasury_floor_pct,
                congestion_threshold: self.congestion_threshold,
                tx_per_day_target: self.tx_per_day_target,
                smoothing_blocks: self.smoothing_blocks,
                fee_burn_ratio: self.fee_burn_ratio,
                treasury_fee_ratio: self.treasury_fee_ratio,
            });
        }
    }

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        TransactionFeesProcessed {
            total_fees: Amount,
            burned: Amount,
            to_treasury: Amount,
            to_validators: Amount,
            trigger: FeeTriggerLabel,
            effective_burn_ratio: Ratio,
        },
        AdaptiveBurnUpdate { previous: Ratio, current: Ratio, trigger: FeeTriggerLabel },
        EmergencyOverrideSet { enabled: bool },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// Genesis-time bound violation on the burn-ratio configuration.
        ProtocolCapViolation,
        /// A withdrawal or transfer step of the partition failed.
        InsufficientFunds,
        /// Proposed params fail one of the invariants genesis itself enforces.
        InvalidParams,
        /// Params have not been initialised (genesis was skipped).
        ParamsNotSet,
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Updates every burn-selector parameter except `emergency_override`,
        /// which only [`Self::set_emergency_override`] may flip — keeping the one
        /// priority-1 switch on its own narrow, auditable call.
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::set_params())]
        pub fn set_params(origin: OriginFor<T>, params: AdaptiveBurnParams) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            Self::ensure_params_valid(&params)?;
            let existing = Params::<T>::get().ok_or(Error::<T>::ParamsNotSet)?;
            Params::<T>::put(AdaptiveBurnParams { emergency_override: existing.emergency_override, ..params });
            Ok(())
        }

        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::set_emergency_override())]
        pub fn set_emergency_override(origin: OriginFor<T>, enabled: bool) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            Params::<T>::try_mutate(|maybe_params| -> DispatchResult {
                let params = maybe_params.as_mut().ok_or(Error::<T>::ParamsNotSet)?;
                params.emergency_override = enabled;
                Ok(())
            })?;
            Self::deposit_event(Event::EmergencyOverrideSet { enabled });
            Ok(())
        }
    }

    #[pallet::hooks]
    impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
        fn on_finalize(height: BlockNumberFor<T>) {
            let Some(params) = Params::<T>::get() else {
                return;
            };

            let height_u64 = height.saturated_into::<u64>();
            let tx_count = frame_system::Pallet::<T>::extrinsic_count() as u64;
            Window::<T>::mutate(|w| record_block_tx_count(w, height_u64, T::BlocksPerDay::get(), tx_count));
            let avg_tx_per_day = rolling_average(&Window::<T>::get());

            let fee_collector = T::FeeCollectorAccount::get();
            let total = T::Currency::free_balance(&fee_collector);
            if total == 0 {
                return;
            }

            let inputs = BurnSelectorInputs {
                emergency_override: params.emergency_override,
                adaptive_enabled: params.adaptive_enabled,
                treasury_balance: T::Currency::free_balance(&T::TreasuryAccount::get()),
                current_supply: T::SupplyLedger::current_supply(),
                treasury_floor_pct: params.treasury_floor_pct,
                gas_used: T::BlockUtilization::used(),
                gas_limit: T::BlockUtilization::limit(),
                congestion_threshold: params.congestion_threshold,
                rolling_avg_tx_per_day: avg_tx_per_day,
                tx_per_day_target: params.tx_per_day_target,
            };
            let (trigger, target) = select_burn_trigger(
                &inputs,
                params.min_burn_ratio,
                params.default_burn_ratio,
                params.max_burn_ratio,
                params.fee_burn_ratio,
            );

            let previous = LastAppliedBurnRatio::<T>::get();
            let effective = smooth_burn_ratio(previous, target, params.smoothing_blocks);

            let use_adaptive_partition = params.adaptive_enabled && !params.emergency_override;
            let partition = if use_adaptive_partition {
                partition_adaptive(total, effective)
            } else {
                partition_fixed(total, params.fee_burn_ratio, params.treasury_fee_ratio)
            };

            if partition.burn > 0 {
                if T::Currency::withdraw(
                    &fee_collector,
                    partition.burn,
                    WithdrawReasons::all(),
                    ExistenceRequirement::AllowDeath,
                )
                .is_err()
                {
                    log::error!(target: "fee-pipeline", "burn withdrawal failed at block {:?}", height);
                    return;
                }
                if T::SupplyLedger::record_burn(partition.burn).is_err() {
                    log::error!(target: "fee-pipeline", "supply ledger burn recording failed at block {:?}", height);
                    return;
                }
            }
            if partition.treasury > 0 {
                if T::Currency::transfer(
                    &fee_collector,
                    &T::TreasuryAccount::get(),
                    partition.treasury,
                    ExistenceRequirement::AllowDeath,
                )
                .is_err()
                {
                    log::error!(target: "fee-pipeline", "treasury transfer failed at block {:?}", height);
                    return;
                }
                T::TreasuryInflow::on_treasury_inflow(partition.treasury);
            }

            LastAppliedBurnRatio::<T>::put(effective);
            LastTrigger::<T>::put(trigger);
            Metrics::<T>::mutate(|m| {
                m.cumulative_collected = m.cumulative_collected.saturating_add(total);
                m.cumulative_burned = m.cumulative_burned.saturating_add(partition.burn);
                m.cumulative_to_treasury = m.cumulative_to_treasury.saturating_add(partition.treasury);
                m.last_update_height = height_u64;
            });

            if trigger != LastTrigger::<T>::get() || previous != effective {
                log::warn!(target: "fee-pipeline", "adaptive burn trigger={:?} ratio={:?}", trigger, effective.into_fixed());
            }
            Self::deposit_event(Event::AdaptiveBurnUpdate { previous, current: effective, trigger });
            Self::deposit_event(Event::TransactionFeesProcessed {
                total_fees: total,
                burned: partition.burn,
                to_treasury: partition.treasury,
                to_validators: partition.validators,
                trigger,
                effective_burn_ratio: effective,
            });
        }
    }

    impl<T: Config> Pallet<T> {
        /// Same invariants `genesis_build` enforces, reused so a governance
        /// update can never relax what genesis itself requires.
        fn ensure_params_valid(params: &AdaptiveBurnParams) -> DispatchResult {
            ensure!(params.min_burn_ratio <= params.default_burn_ratio, Error::<T>::InvalidParams);
            ensure!(params.default_burn_ratio <= params.max_burn_ratio, Error::<T>::InvalidParams);
            ensure!(params.min_burn_ratio >= T::ProtocolBurnFloor::get(), Error::<T>::InvalidParams);
            ensure!(params.max_burn_ratio <= T::ProtocolBurnCeiling::get(), Error::<T>::InvalidParams);
            if !params.adaptive_enabled {
                ensure!(
                    params.fee_burn_ratio.saturating_add(params.treasury_fee_ratio) == Ratio::one(),
                    Error::<T>::InvalidParams
                );
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s3_fee_split_adaptive() {
        let p = partition_adaptive(1_000_000, Ratio::from_percent(90));
        assert_eq!(p.treasury, 100_000);
        assert_eq!(p.burn, 810_000);
        assert_eq!(p.validators, 90_000);
    }

    #[test]
    fn s4_fee_split_fixed_with_dust() {
        let p = partition_fixed(1_000_003, Ratio::from_percent(80), Ratio::from_percent(20));
        assert_eq!(p.treasury, 200_000);
        assert_eq!(p.burn, 800_003);
        assert_eq!(p.validators, 0);
        assert_eq!(p.burn + p.treasury + p.validators, 1_000_003);
    }

    #[test]
    fn selector_priority_order_first_match_wins() {
        let min = Ratio::from_percent(10);
        let default = Ratio::from_percent(50);
        let max = Ratio::from_percent(90);
        let fee_burn = Ratio::from_percent(70);

        let emergency = BurnSelectorInputs {
            emergency_override: true,
            adaptive_enabled: true,
            treasury_balance: 1_000,
            current_supply: 10_000,
            treasury_floor_pct: Ratio::from_percent(1),
            gas_used: 0,
            gas_limit: 100,
            congestion_threshold: Ratio::from_percent(90),
            rolling_avg_tx_per_day: 1_000,
            tx_per_day_target: 10,
        };
        assert_eq!(
            select_burn_trigger(&emergency, min, default, max, fee_burn),
            (FeeTriggerLabel::EmergencyOverride, fee_burn)
        );

        let treasury_low = BurnSelectorInputs {
            emergency_override: false,
            adaptive_enabled: true,
            treasury_balance: 1,
            current_supply: 10_000,
            ..emergency
        };
        assert_eq!(
            select_burn_trigger(&treasury_low, min, default, max, fee_burn),
            (FeeTriggerLabel::TreasuryProtection, min)
        );

        let congested = BurnSelectorInputs {
            emergency_override: false,
            adaptive_enabled: true,
            treasury_balance: 1_000,
            current_supply: 10_000,
            gas_used: 95,
            gas_limit: 100,
            ..emergency
        };
        assert_eq!(
            select_burn_trigger(&congested, min, default, max, fee_burn),
            (FeeTriggerLabel::CongestionControl, max)
        );

        let normal = BurnSelectorInputs {
            emergency_override: false,
            adaptive_enabled: true,
            treasury_balance: 1_000,
            current_supply: 10_000,
            gas_used: 1,
            gas_limit: 100,
            rolling_avg_tx_per_day: 1_000,
            tx_per_day_target: 10,
            ..emergency
        };
        assert_eq!(select_burn_trigger(&normal, min, default, max, fee_burn), (FeeTriggerLabel::Normal, default));
    }

    #[test]
    fn smoothing_uses_target_directly_when_last_is_zero() {
        let effective = smooth_burn_ratio(Ratio::zero(), Ratio::from_percent(80), 10);
        assert_eq!(effective, Ratio::from_percent(80));
    }

    #[test]
    fn rolling_window_rotates_modulo_seven() {
        let mut w = RollingTxWindow::default();
        for day in 0..10u64 {
            record_block_tx_count(&mut w, day * 100, 100, 50);
        }
        assert_eq!(w.filled_slots, 7);
        assert_eq!(w.current_day_index, 3);
    }

    #[test]
    fn rolling_average_is_zero_before_any_slot_fills() {
        let w = RollingTxWindow::default();
        assert_eq!(rolling_average(&w), 0);
    }
}
