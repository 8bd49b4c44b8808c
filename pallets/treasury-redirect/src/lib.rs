//! Treasury Redirect Pallet
//!
//! Every `interval` blocks, moves a bounded fraction of treasury *inflows* — never
//! the treasury's principal balance — to four whitelisted sub-funds.
//!
//! # Overview
//!
//! Grounded on `pallet-coinbase`'s once-per-interval gate (there: implicitly every
//! block; here, explicitly `height - last_execution_height >= interval`, the same
//! block-count gate `pallet-difficulty` uses for its retarget window) and on
//! `pallet-treasury`'s `PalletId`-derived sovereign-account convention for the
//! target sub-fund addresses. Unlike `pallet-treasury`, which has no notion of
//! "inflow vs principal", this pallet tracks accumulated inflows itself via the
//! [`TreasuryInflowNotifier`] hook — `pallet-tokenomics` and `pallet-fee-pipeline`
//! call `on_treasury_inflow` the moment they credit the treasury account, and this
//! pallet never looks at the treasury's total balance to decide how much to move.

#![cfg_attr(not(feature = "std"), no_std)]

pub use pallet::*;

use omni_core_primitives::{Amount, Ratio};
use pallet_tokenomics::TreasuryInflowNotifier;

/// `redirect = min(redirect_ratio, 10%) * accumulated`, split across the first
/// three targets truncated, with the fourth absorbing the remainder so the four
/// parts always sum back to exactly `redirect`.
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

pub fn compute_redirect_allocation(
    accumulated: Amount,
    redirect_ratio: Ratio,
    target_ratios: [Ratio; 4],
) -> (Amount, [Amount; 4]) {
    let capped_ratio = redirect_ratio.min(Ratio::from_percent(10));
    let redirect = capped_ratio.checked_mul_trunc(accumulated).unwrap_or(0);
    let mut amounts = [0u128; 4];
    let mut allocated = 0u128;
    for i in 0..3 {
        amounts[i] = target_ratios[i].checked_mul_trunc(redirect).unwrap_or(0);
        allocated = allocated.saturating_add(amounts[i]);
    }
    amounts[3] = redirect.saturating_sub(allocated);
    (redirect, amounts)
}

#[frame_support::pallet]
pub mod pallet {
    use super::*;
    use frame_support::pallet_prelude::*;
    use frame_support::storage::{with_transaction, TransactionOutcome};
    use frame_support::traits::{Currency, EnsureOrigin, ExistenceRequirement};
    use frame_system::pallet_prelude::*;
    use sp_runtime::traits::Saturating;

    #[pallet::pallet]
    pub struct Pallet<T>(_);

    #[pallet::config]
    pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
        type Currency: Currency<Self::AccountId, Balance = Amount>;
        type TreasuryAccount: Get<Self::AccountId>;

        /// Governance-only surface: `set_params`.
        type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;
        type WeightInfo: WeightInfo;
    }

    #[derive(Clone, PartialEq, Eq, Encode, Decode, TypeInfo, MaxEncodedLen, RuntimeDebug)]
    pub struct RedirectParamsData<AccountId> {
        pub enabled: bool,
        pub interval: u64,
        pub redirect_ratio: Ratio,
        pub target_ratios: [Ratio; 4],
        pub targets: [Option<AccountId>; 4],
    }

    #[derive(Clone, Copy, Default, PartialEq, Eq, Encode, Decode, TypeInfo, MaxEncodedLen, RuntimeDebug)]
    pub struct RedirectStateData {
        pub accumulated_inflows: Amount,
        pub last_execution_height: u64,
        pub total_redirected: Amount,
    }

    #[pallet::storage]
    #[pallet::getter(fn redirect_params)]
    pub type RedirectParams<T: Config> = StorageValue<_, RedirectParamsData<T::AccountId>, OptionQuery>;

    #[pallet::storage]
    #[pallet::getter(fn redirect_state)]
    pub type RedirectState<T> = StorageValue<_, RedirectStateData, ValueQuery>;

    #[pallet::genesis_config]
    #[derive(frame_support::DefaultNoBound)]
    pub struct GenesisConfig<T: Config> {
        pub enabled: bool,
        pub interval: u64,
        pub redirect_ratio: Ratio,
        pub target_ratios: [Ratio; 4],
        pub targets: [Option<T::AccountId>; 4],
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            let params = RedirectParamsData {
                enabled: self.enabled,
                interval: self.interval,
                redirect_ratio: self.redirect_ratio,
                target_ratios: self.target_ratios,
                targets: self.targets.clone(),
            };
            assert!(
                Pallet::<T>::params_are_valid(&params),
                "treasury-redirect genesis params fail validation (interval bound, redirect-ratio cap, target-ratio sum)"
            );
            RedirectParams::<T>::put(params);
        }
    }

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        TreasuryRedirectExecuted { height: BlockNumberFor<T>, redirected: Amount },
        TreasuryAllocation { height: BlockNumberFor<T>, target_index: u8, amount: Amount },
        TreasuryRedirectSkipped { height: BlockNumberFor<T>, reason: SkipReason },
    }

    #[derive(Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, MaxEncodedLen, RuntimeDebug)]
    pub enum SkipReason {
        ZeroInflows,
        MissingTarget,
        TransferFailed,
    }

    #[pallet::error]
    pub enum Error<T> {
        /// One of the four redirect transfers failed; the whole group was reverted.
        TransferFailed,
        /// A configured target ratio is paired with no target account.
        MissingTarget,
        /// Proposed params fail one of the invariants genesis itself enforces.
        InvalidParams,
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::set_params())]
        pub fn set_params(origin: OriginFor<T>, params: RedirectParamsData<T::AccountId>) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            ensure!(Self::params_are_valid(&params), Error::<T>::InvalidParams);
            RedirectParams::<T>::put(params);
            Ok(())
        }
    }

    #[pallet::hooks]
    impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
        fn on_finalize(height: BlockNumberFor<T>) {
            let Some(params) = RedirectParams::<T>::get() else {
                return;
            };
            if !params.enabled {
                return;
            }
            let height_u64 = height.saturated_into::<u64>();
            let state = RedirectState::<T>::get();
            if height_u64.saturating_sub(state.last_execution_height) < params.interval {
                return;
            }

            if state.accumulated_inflows == 0 {
                RedirectState::<T>::mutate(|s| s.last_execution_height = height_u64);
                Self::deposit_event(Event::TreasuryRedirectSkipped { height, reason: SkipReason::ZeroInflows });
                return;
            }

            if params.targets.iter().any(Option::is_none) {
                log::warn!(target: "treasury-redirect", "redirect aborted at block {:?}: missing target account", height);
                Self::deposit_event(Event::TreasuryRedirectSkipped { height, reason: SkipReason::MissingTarget });
                return;
            }

            let (redirect, amounts) =
                compute_redirect_allocation(state.accumulated_inflows, params.redirect_ratio, params.target_ratios);
            if redirect == 0 {
                RedirectState::<T>::mutate(|s| s.last_execution_height = height_u64);
                return;
            }

            let treasury = T::TreasuryAccount::get();
            let result: DispatchResult = with_transaction(|| {
                for (i, amount) in amounts.iter().enumerate() {
                    if *amount == 0 {
                        continue;
                    }
                    let target = params.targets[i].as_ref().expect("checked non-None above");
                    if T::Currency::transfer(&treasury, target, *amount, ExistenceRequirement::AllowDeath).is_err() {
                        return TransactionOutcome::Rollback(Err(Error::<T>::TransferFailed.into()));
                    }
                }
                TransactionOutcome::Commit(Ok(()))
            });

            if result.is_err() {
                log::error!(target: "treasury-redirect", "redirect transfer group failed at block {:?}", height);
                Self::deposit_event(Event::TreasuryRedirectSkipped { height, reason: SkipReason::TransferFailed });
                return;
            }

            RedirectState::<T>::mutate(|s| {
                s.accumulated_inflows = 0;
                s.last_execution_height = height_u64;
                s.total_redirected = s.total_redirected.saturating_add(redirect);
            });

            for (i, amount) in amounts.iter().enumerate() {
                if *amount > 0 {
                    Self::deposit_event(Event::TreasuryAllocation { height, target_index: i as u8, amount: *amount });
                }
            }
            Self::deposit_event(Event::TreasuryRedirectExecuted { height, redirected: redirect });
        }
    }

    impl<T: Config> Pallet<T> {
        /// Same invariants genesis enforces: interval bound, redirect-ratio
        /// protocol cap, and (when enabled) target ratios summing to 1.0. Shared
        /// by `genesis_build` and `set_params` so a governance update can never
        /// relax what genesis itself requires.
        fn params_are_valid(params: &RedirectParamsData<T::AccountId>) -> bool {
            if params.interval > 10_000 {
                return false;
            }
            if params.redirect_ratio > Ratio::from_percent(10) {
                return false;
            }
            if params.enabled {
                let sum = params.target_ratios.iter().fold(Ratio::zero(), |a, b| a.saturating_add(*b));
                if sum != Ratio::one() {
                    return false;
                }
            }
            true
        }
    }

    impl<T: Config> TreasuryInflowNotifier<Amount> for Pallet<T> {
        fn on_treasury_inflow(amount: Amount) {
            if amount == 0 {
                return;
            }
            RedirectState::<T>::mutate(|s| s.accumulated_inflows = s.accumulated_inflows.saturating_add(amount));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_caps_ratio_at_ten_percent() {
        let target_ratios = [Ratio::from_percent(25); 4];
        let (redirect, amounts) = compute_redirect_allocation(1_000_000, Ratio::from_percent(50), target_ratios);
        // capped at 10%, not 50%
        assert_eq!(redirect, 100_000);
        assert_eq!(amounts.iter().sum::<Amount>(), redirect);
    }

    #[test]
    fn allocation_last_target_absorbs_dust() {
        // thirds truncate to 3 each; the fourth target absorbs the leftover 1.
        let target_ratios = [Ratio::from_rational(1, 3), Ratio::from_rational(1, 3), Ratio::from_rational(1, 3), Ratio::zero()];
        let (redirect, amounts) = compute_redirect_allocation(100, Ratio::from_percent(10), target_ratios);
        assert_eq!(redirect, 10);
        assert_eq!(amounts[0], 3);
        assert_eq!(amounts[1], 3);
        assert_eq!(amounts[2], 3);
        assert_eq!(amounts[3], 1);
        assert_eq!(amounts.iter().sum::<Amount>(), 10);
    }

    #[test]
    fn zero_accumulated_inflows_yields_zero_redirect() {
        let (redirect, amounts) = compute_redirect_allocation(0, Ratio::from_percent(10), [Ratio::from_percent(25); 4]);
        assert_eq!(redirect, 0);
        assert_eq!(amounts, [0, 0, 0, 0]);
    }
}
