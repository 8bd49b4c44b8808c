//! Proof-of-Contribution Pallet
//!
//! Submission (rate limit → hash validation → access control → fee collection →
//! store), a five-tier access-control ladder, validator endorsement with canonical
//! identity and bonded-power quorum, credit award, and check-zero-send withdrawal.
//!
//! # Overview
//!
//! Grounded on two teacher pallets: `pallet-attestations` for the
//! commitment/record lifecycle and its one-way status-transition discipline
//! (`DisputeStatus` there, the `verified` flag here), and `pallet-identity` for the
//! collaborator-trait shape of access control (`IdentityProvider::has_role` there,
//! `IdentityProvider::is_verified` here) — except this pallet's absent-collaborator
//! default is a deliberate divergence from the teacher's permissive `Ok(())`
//! default: it fails safe and rejects, never allows, per the submission policy.

#![cfg_attr(not(feature = "std"), no_std)]

pub use pallet::*;

use omni_core_primitives::{fixed_key, Amount, Ratio};
use pallet_tokenomics::SupplyLedgerInterface;

/// Resolves an endorser's account-form address to its canonical validator form and
/// reports bonded tokens (not consensus power), per spec. `()` recognises nobody —
/// used only in tests and as the type-level "no staking collaborator wired" state.
pub trait StakingProvider<AccountId> {
    fn canonical_validator(who: &AccountId) -> Option<AccountId>;
    fn bonded_tokens(validator: &AccountId) -> Amount;
    fn total_bonded_tokens() -> Amount;
}

impl<AccountId> StakingProvider<AccountId> for () {
    fn canonical_validator(_: &AccountId) -> Option<AccountId> {
        None
    }
    fn bonded_tokens(_: &AccountId) -> Amount {
        0
    }
    fn total_bonded_tokens() -> Amount {
        0
    }
}

/// Optional identity collaborator. `None` means "the collaborator itself is
/// absent" (distinct from `Some(false)`, "present and says not verified") — the
/// access-control layer treats these two cases differently (`IdentityCheckFailed`
/// vs `IdentityNotVerified`), per spec §4.4.1.
pub trait IdentityProvider<AccountId> {
    fn is_verified(who: &AccountId) -> Option<bool>;
}

/// Fail-safe-reject default: always reports the collaborator absent. This is the
/// deliberate divergence from `pallet_identity`'s permissive `impl ... for ()`
/// default — see module docs.
pub struct NoIdentityProvider;

impl<AccountId> IdentityProvider<AccountId> for NoIdentityProvider {
    fn is_verified(_: &AccountId) -> Option<bool> {
        None
    }
}

/// Short opaque contribution-type tag, fixed-width so it can be a plain map key
/// without an extra length-prefix, per spec's "fixed-width ... no variable-width
/// encodings in the key."
pub type CtypeTag = [u8; 16];

pub fn encode_ctype(raw: &[u8]) -> CtypeTag {
    let mut tag = [0u8; 16];
    let n = raw.len().min(16);
    tag[..n].copy_from_slice(&raw[..n]);
    tag
}

/// `length ∈ {32, 64}`, not all-zero, not all-`0xFF`.
pub fn hash_well_formed(hash: &[u8]) -> bool {
    if hash.len() != 32 && hash.len() != 64 {
        return false;
    }
    !hash.iter().all(|b| *b == 0) && !hash.iter().all(|b| *b == 0xFF)
}

/// Dense big-endian block-number key for the transient rate-limit counter.
#[derive(Clone, Copy, PartialEq, Eq, codec::Encode, codec::Decode, scale_info::TypeInfo, codec::MaxEncodedLen, sp_runtime::RuntimeDebug)]
pub struct BlockKey(pub [u8; 8]);

impl BlockKey {
    pub fn from_height(height: u64) -> Self {
        Self(fixed_key::encode_u64_be(height))
    }
}

/// Dispatchable call weights, in the shape `pallet-attestations::WeightInfo` uses:
/// a trait per-call, with [`DefaultWeightInfo`] providing fixed placeholder
/// figures until real benchmarking output replaces them.
pub trait WeightInfo {
    fn submit_contribution() -> frame_support::weights::Weight;
    fn endorse() -> frame_support::weights::Weight;
    fn withdraw() -> frame_support::weights::Weight;
    fn set_exempt() -> frame_support::weights::Weight;
    fn set_fee_params() -> frame_support::weights::Weight;
    fn set_quorum_params() -> frame_support::weights::Weight;
    fn set_cscore_requirement() -> frame_support::weights::Weight;
    fn set_identity_requirement() -> frame_support::weights::Weight;
}

pub struct DefaultWeightInfo;

impl WeightInfo for DefaultWeightInfo {
    fn submit_contribution() -> frame_support::weights::Weight {
        frame_support::weights::Weight::from_parts(50_000_000, 0)
    }

    fn endorse() -> frame_support::weights::Weight {
        frame_support::weights::Weight::from_parts(50_000_000, 0)
    }

    fn withdraw() -> frame_support::weights::Weight {
        frame_support::weights::Weight::from_parts(30_000_000, 0)
    }

    fn set_exempt() -> frame_support::weights::Weight {
        frame_support::weights::Weight::from_parts(20_000_000, 0)
    }

    fn set_fee_params() -> frame_support::weights::Weight {
        frame_support::weights::Weight::from_parts(20_000_000, 0)
    }

    fn set_quorum_params() -> frame_support::weights::Weight {
        frame_support::weights::Weight::from_parts(20_000_000, 0)
    }

    fn set_cscore_requirement() -> frame_support::weights::Weight {
        frame_support::weights::Weight::from_parts(20_000_000, 0)
    }

    fn set_identity_requirement() -> frame_support::weights::Weight {
        frame_support::weights::Weight::from_parts(20_000_000, 0)
    }
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
        type Staking: StakingProvider<Self::AccountId>;
        type Identity: IdentityProvider<Self::AccountId>;
        type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;
        type WeightInfo: WeightInfo;

        /// Holds retained submission fees; pays out credit withdrawals.
        type ModuleAccount: Get<Self::AccountId>;

        #[pallet::constant]
        type MaxSubmissionsPerBlock: Get<u32>;
        #[pallet::constant]
        type MaxEndorsersPerContribution: Get<u32>;
        #[pallet::constant]
        type PruneHorizon: Get<BlockNumberFor<Self>>;
        #[pallet::constant]
        type MaxExemptAddresses: Get<u32>;
        #[pallet::constant]
        type MaxValidatorCacheEntries: Get<u32>;
    }

    #[derive(Clone, PartialEq, Eq, Encode, Decode, TypeInfo, MaxEncodedLen, RuntimeDebug)]
    pub struct Endorsement<AccountId, BlockNumber> {
        pub validator: AccountId,
        pub decision: bool,
        pub power: Amount,
        pub at_block: BlockNumber,
    }

    #[derive(Clone, PartialEq, Eq, Encode, Decode, TypeInfo, MaxEncodedLen, RuntimeDebug)]
    pub struct Contribution<T: Config> {
        pub id: u64,
        pub contributor: T::AccountId,
        pub ctype: CtypeTag,
        pub uri: BoundedVec<u8, ConstU32<256>>,
        pub hash: BoundedVec<u8, ConstU32<64>>,
        pub endorsements: BoundedVec<Endorsement<T::AccountId, BlockNumberFor<T>>, T::MaxEndorsersPerContribution>,
        pub verified: bool,
        pub created_at: BlockNumberFor<T>,
    }

    #[derive(Clone, Copy, Default, PartialEq, Eq, Encode, Decode, TypeInfo, MaxEncodedLen, RuntimeDebug)]
    pub struct ContributorFeeStatsData<BlockNumber> {
        pub cumulative_fees: Amount,
        pub cumulative_burned: Amount,
        pub submission_count: u64,
        pub first_height: Option<BlockNumber>,
        pub last_height: Option<BlockNumber>,
    }

    #[derive(Clone, Copy, Default, PartialEq, Eq, Encode, Decode, TypeInfo, MaxEncodedLen, RuntimeDebug)]
    pub struct PocFeeMetricsData {
        pub cumulative_fees_collected: Amount,
        pub cumulative_burned: Amount,
        pub cumulative_to_reward_pool: Amount,
    }

    #[derive(Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, MaxEncodedLen, RuntimeDebug)]
    pub struct FeeParamsData {
        pub submission_fee: Amount,
        pub submission_burn_ratio: Ratio,
        pub min_submission_fee: Amount,
        pub max_submission_fee: Amount,
        pub min_burn_ratio: Ratio,
        pub max_burn_ratio: Ratio,
    }

    #[derive(Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, MaxEncodedLen, RuntimeDebug)]
    pub struct QuorumParamsData {
        pub quorum_pct: Ratio,
        pub base_reward_unit: Amount,
    }

    #[pallet::storage]
    #[pallet::getter(fn next_contribution_id)]
    pub type NextContributionId<T> = StorageValue<_, u64, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn contributions)]
    pub type Contributions<T: Config> = StorageMap<_, Blake2_128Concat, u64, Contribution<T>, OptionQuery>;

    #[pallet::storage]
    pub type ContributionsByContributor<T: Config> =
        StorageDoubleMap<_, Blake2_128Concat, T::AccountId, Blake2_128Concat, u64, (), ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn credits)]
    pub type Credits<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, Amount, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn contributor_fee_stats)]
    pub type ContributorFeeStats<T: Config> =
        StorageMap<_, Blake2_128Concat, T::AccountId, ContributorFeeStatsData<BlockNumberFor<T>>, OptionQuery>;

    #[pallet::storage]
    #[pallet::getter(fn fee_metrics)]
    pub type FeeMetrics<T> = StorageValue<_, PocFeeMetricsData, ValueQuery>;

    #[pallet::storage]
    pub type FeeParams<T> = StorageValue<_, FeeParamsData, OptionQuery>;

    #[pallet::storage]
    pub type QuorumParams<T> = StorageValue<_, QuorumParamsData, OptionQuery>;

    #[pallet::storage]
    pub type CscoreRequirements<T> = StorageMap<_, Blake2_128Concat, CtypeTag, Amount, OptionQuery>;

    #[pallet::storage]
    pub type IdentityRequirements<T> = StorageMap<_, Blake2_128Concat, CtypeTag, (), OptionQuery>;

    #[pallet::storage]
    pub type ExemptAddresses<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, (), OptionQuery>;

    #[pallet::storage]
    pub type SubmissionsThisBlock<T> = StorageMap<_, Blake2_128Concat, BlockKey, u32, ValueQuery>;

    #[pallet::storage]
    pub type ValidatorPowerCache<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, Amount, OptionQuery>;

    #[pallet::storage]
    pub type ValidatorCacheKeys<T: Config> =
        StorageValue<_, BoundedVec<T::AccountId, T::MaxValidatorCacheEntries>, ValueQuery>;

    #[pallet::genesis_config]
    #[derive(frame_support::DefaultNoBound)]
    pub struct GenesisConfig<T: Config> {
        pub fee_params: Option<FeeParamsData>,
        pub quorum_params: Option<QuorumParamsData>,
        pub exempt_addresses: sp_std::vec::Vec<T::AccountId>,
        pub cscore_requirements: sp_std::vec::Vec<(CtypeTag, Amount)>,
        pub identity_requirements: sp_std::vec::Vec<CtypeTag>,
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            if let Some(fp) = &self.fee_params {
                assert!(fp.min_submission_fee <= fp.submission_fee && fp.submission_fee <= fp.max_submission_fee);
                assert!(fp.min_burn_ratio <= fp.submission_burn_ratio && fp.submission_burn_ratio <= fp.max_burn_ratio);
                FeeParams::<T>::put(*fp);
            }
            if let Some(qp) = &self.quorum_params {
                assert!(qp.base_reward_unit > 0, "base_reward_unit must be positive");
                QuorumParams::<T>::put(*qp);
            }
            let mut seen = sp_std::vec::Vec::new();
            for addr in &self.exempt_addresses {
                assert!(!seen.contains(addr), "duplicate exempt address in genesis");
                seen.push(addr.clone());
                ExemptAddresses::<T>::insert(addr, ());
            }
            for (ctype, required) in &self.cscore_requirements {
                assert!(*ctype != [0u8; 16], "cscore requirement key must not be empty");
                CscoreRequirements::<T>::insert(ctype, required);
            }
            for ctype in &self.identity_requirements {
                assert!(*ctype != [0u8; 16], "identity requirement key must not be empty");
                IdentityRequirements::<T>::insert(ctype, ());
            }
        }
    }

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        SubmissionFeeCollected { id: u64, contributor: T::AccountId, fee: Amount, burned: Amount },
        Endorsed { id: u64, validator: T::AccountId, decision: bool, power: Amount },
        Verified { id: u64, credits_awarded: Amount },
        WithdrawSuccess { who: T::AccountId, amount: Amount },
        Burned { amount: Amount },
    }

    #[pallet::error]
    pub enum Error<T> {
        RateLimitExceeded,
        MalformedHash,
        InsufficientCScore,
        IdentityNotVerified,
        IdentityCheckFailed,
        InsufficientFee,
        AlreadyEndorsed,
        ContributionNotFound,
        NotValidator,
        ZeroPower,
        NoCredits,
        InsufficientModuleBalance,
        CreditOverflow,
        ParamsNotSet,
        TooManyEndorsers,
        ExemptAddressListFull,
        InvalidFeeParams,
        InvalidQuorumParams,
        InvalidCtype,
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::submit_contribution())]
        pub fn submit_contribution(
            origin: OriginFor<T>,
            ctype: CtypeTag,
            uri: BoundedVec<u8, ConstU32<256>>,
            hash: BoundedVec<u8, ConstU32<64>>,
        ) -> DispatchResult {
            let contributor = ensure_signed(origin)?;
            let height = frame_system::Pallet::<T>::block_number();
            let key = BlockKey::from_height(height.saturated_into::<u64>());

            let count = SubmissionsThisBlock::<T>::get(key);
            ensure!(count < T::MaxSubmissionsPerBlock::get(), Error::<T>::RateLimitExceeded);

            ensure!(hash_well_formed(&hash), Error::<T>::MalformedHash);

            Self::check_access_control(&contributor, &ctype)?;

            let (fee, burned) = Self::collect_submission_fee(&contributor)?;

            let id = NextContributionId::<T>::mutate(|n| {
                let this = *n;
                *n = n.saturating_add(1);
                this
            });
            let contribution = Contribution::<T> {
                id,
                contributor: contributor.clone(),
                ctype,
                uri,
                hash,
                endorsements: BoundedVec::default(),
                verified: false,
                created_at: height,
            };
            Contributions::<T>::insert(id, contribution);
            ContributionsByContributor::<T>::insert(&contributor, id, ());
            SubmissionsThisBlock::<T>::insert(key, count.saturating_add(1));

            ContributorFeeStats::<T>::mutate(&contributor, |stats| {
                let s = stats.get_or_insert_with(Default::default);
                s.cumulative_fees = s.cumulative_fees.saturating_add(fee);
                s.cumulative_burned = s.cumulative_burned.saturating_add(burned);
                s.submission_count = s.submission_count.saturating_add(1);
                if s.first_height.is_none() {
                    s.first_height = Some(height);
                }
                s.last_height = Some(height);
            });
            FeeMetrics::<T>::mutate(|m| {
                m.cumulative_fees_collected = m.cumulative_fees_collected.saturating_add(fee);
                m.cumulative_burned = m.cumulative_burned.saturating_add(burned);
                m.cumulative_to_reward_pool = m.cumulative_to_reward_pool.saturating_add(fee.saturating_sub(burned));
            });

            Self::deposit_event(Event::SubmissionFeeCollected { id, contributor, fee, burned });
            Ok(())
        }

        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::endorse())]
        pub fn endorse(origin: OriginFor<T>, id: u64, decision: bool) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let canonical = T::Staking::canonical_validator(&who).ok_or(Error::<T>::NotValidator)?;

            let mut contribution = Contributions::<T>::get(id).ok_or(Error::<T>::ContributionNotFound)?;
            ensure!(
                !contribution.endorsements.iter().any(|e| e.validator == canonical),
                Error::<T>::AlreadyEndorsed
            );

            let power = Self::cached_bonded_tokens(&canonical);
            ensure!(power > 0, Error::<T>::ZeroPower);

            let at_block = frame_system::Pallet::<T>::block_number();
            contribution
                .endorsements
                .try_push(Endorsement { validator: canonical.clone(), decision, power, at_block })
                .map_err(|_| Error::<T>::TooManyEndorsers)?;

            let mut credits_awarded = 0u128;
            if decision && !contribution.verified {
                let approval_power: Amount = contribution
                    .endorsements
                    .iter()
                    .filter(|e| e.decision)
                    .fold(0u128, |acc, e| acc.saturating_add(e.power));
                let total = T::Staking::total_bonded_tokens();
                if total > 0 {
                    let quorum = QuorumParams::<T>::get().ok_or(Error::<T>::ParamsNotSet)?;
                    let threshold = quorum.quorum_pct.checked_mul_trunc(total).unwrap_or(u128::MAX);
                    if approval_power >= threshold {
                        contribution.verified = true;
                        credits_awarded = quorum.base_reward_unit;
                        Self::add_credits(&contribution.contributor, credits_awarded)?;
                    }
                }
            }

            Contributions::<T>::insert(id, contribution);
            Self::deposit_event(Event::Endorsed { id, validator: canonical, decision, power });
            if credits_awarded > 0 {
                Self::deposit_event(Event::Verified { id, credits_awarded });
            }
            Ok(())
        }

        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::withdraw())]
        pub fn withdraw(origin: OriginFor<T>) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let amount = Credits::<T>::get(&who);
            ensure!(amount > 0, Error::<T>::NoCredits);

            Credits::<T>::insert(&who, 0u128);

            let module = T::ModuleAccount::get();
            if T::Currency::free_balance(&module) < amount {
                Credits::<T>::insert(&who, amount);
                return Err(Error::<T>::InsufficientModuleBalance.into());
            }
            if T::Currency::transfer(&module, &who, amount, ExistenceRequirement::AllowDeath).is_err() {
                Credits::<T>::insert(&who, amount);
                return Err(Error::<T>::InsufficientModuleBalance.into());
            }

            Self::deposit_event(Event::WithdrawSuccess { who, amount });
            Ok(())
        }

        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::set_exempt())]
        pub fn set_exempt(origin: OriginFor<T>, who: T::AccountId, exempt: bool) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            if exempt {
                ensure!(
                    ExemptAddresses::<T>::iter().count() < T::MaxExemptAddresses::get() as usize,
                    Error::<T>::ExemptAddressListFull
                );
                ExemptAddresses::<T>::insert(&who, ());
            } else {
                ExemptAddresses::<T>::remove(&who);
            }
            Ok(())
        }

        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::set_fee_params())]
        pub fn set_fee_params(origin: OriginFor<T>, params: FeeParamsData) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            ensure!(
                params.min_submission_fee <= params.submission_fee
                    && params.submission_fee <= params.max_submission_fee,
                Error::<T>::InvalidFeeParams
            );
            ensure!(
                params.min_burn_ratio <= params.submission_burn_ratio
                    && params.submission_burn_ratio <= params.max_burn_ratio,
                Error::<T>::InvalidFeeParams
            );
            FeeParams::<T>::put(params);
            Ok(())
        }

        #[pallet::call_index(5)]
        #[pallet::weight(T::WeightInfo::set_quorum_params())]
        pub fn set_quorum_params(origin: OriginFor<T>, params: QuorumParamsData) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            ensure!(params.base_reward_unit > 0, Error::<T>::InvalidQuorumParams);
            QuorumParams::<T>::put(params);
            Ok(())
        }

        #[pallet::call_index(6)]
        #[pallet::weight(T::WeightInfo::set_cscore_requirement())]
        pub fn set_cscore_requirement(
            origin: OriginFor<T>,
            ctype: CtypeTag,
            required: Option<Amount>,
        ) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            ensure!(ctype != [0u8; 16], Error::<T>::InvalidCtype);
            match required {
                Some(amount) => CscoreRequirements::<T>::insert(ctype, amount),
                None => CscoreRequirements::<T>::remove(ctype),
            }
            Ok(())
        }

        #[pallet::call_index(7)]
        #[pallet::weight(T::WeightInfo::set_identity_requirement())]
        pub fn set_identity_requirement(
            origin: OriginFor<T>,
            ctype: CtypeTag,
            required: bool,
        ) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            ensure!(ctype != [0u8; 16], Error::<T>::InvalidCtype);
            if required {
                IdentityRequirements::<T>::insert(ctype, ());
            } else {
                IdentityRequirements::<T>::remove(ctype);
            }
            Ok(())
        }
    }

    #[pallet::hooks]
    impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
        fn on_finalize(height: BlockNumberFor<T>) {
            let height_u64 = height.saturated_into::<u64>();
            let horizon: u64 = T::PruneHorizon::get().saturated_into::<u64>();
            if height_u64 >= horizon {
                SubmissionsThisBlock::<T>::remove(BlockKey::from_height(height_u64 - horizon));
            }

            for key in ValidatorCacheKeys::<T>::get().into_iter() {
                ValidatorPowerCache::<T>::remove(key);
            }
            ValidatorCacheKeys::<T>::kill();
        }
    }

    impl<T: Config> Pallet<T> {
        /// Five-tier access-control ladder from spec §4.4.1; first unmet tier rejects.
        fn check_access_control(who: &T::AccountId, ctype: &CtypeTag) -> DispatchResult {
            if ExemptAddresses::<T>::contains_key(who) {
                return Ok(());
            }
            if let Some(required) = CscoreRequirements::<T>::get(ctype) {
                let have = Credits::<T>::get(who);
                ensure!(have >= required, Error::<T>::InsufficientCScore);
            }
            if IdentityRequirements::<T>::contains_key(ctype) {
                match T::Identity::is_verified(who) {
                    None => return Err(Error::<T>::IdentityCheckFailed.into()),
                    Some(false) => return Err(Error::<T>::IdentityNotVerified.into()),
                    Some(true) => {}
                }
            }
            Ok(())
        }

        /// Read-only query mirroring [`Self::check_access_control`] with no side effects.
        pub fn can_submit(who: &T::AccountId, ctype: &CtypeTag) -> Result<(), &'static str> {
            if ExemptAddresses::<T>::contains_key(who) {
                return Ok(());
            }
            if let Some(required) = CscoreRequirements::<T>::get(ctype) {
                let have = Credits::<T>::get(who);
                if have < required {
                    return Err("insufficient c-score for this contribution type");
                }
            }
            if IdentityRequirements::<T>::contains_key(ctype) {
                match T::Identity::is_verified(who) {
                    None => return Err("identity collaborator unavailable, failing safe"),
                    Some(false) => return Err("identity not verified"),
                    Some(true) => {}
                }
            }
            Ok(())
        }

        fn collect_submission_fee(who: &T::AccountId) -> Result<(Amount, Amount), DispatchError> {
            let params = FeeParams::<T>::get().ok_or(Error::<T>::ParamsNotSet)?;
            let fee = params.submission_fee;
            T::Currency::withdraw(who, fee, WithdrawReasons::all(), ExistenceRequirement::KeepAlive)
                .map_err(|_| Error::<T>::InsufficientFee)?;

            let burn_amount = params.submission_burn_ratio.checked_mul_trunc(fee).unwrap_or(0);
            let reward_amount = fee.saturating_sub(burn_amount);
            if burn_amount > 0 {
                T::SupplyLedger::record_burn(burn_amount)?;
                Self::deposit_event(Event::Burned { amount: burn_amount });
            }
            if reward_amount > 0 {
                let _ = T::Currency::deposit_creating(&T::ModuleAccount::get(), reward_amount);
            }
            Ok((fee, burn_amount))
        }

        fn add_credits(who: &T::AccountId, amount: Amount) -> DispatchResult {
            Credits::<T>::try_mutate(who, |c| -> DispatchResult {
                let new_total = c.checked_add(amount).ok_or(Error::<T>::CreditOverflow)?;
                ensure!(new_total < (1u128 << 63) - 1, Error::<T>::CreditOverflow);
                *c = new_total;
                Ok(())
            })
        }

        /// Bonded-power lookup cached for the remainder of the block, cleared at
        /// `on_finalize`, per spec §4.4.3's "cache is cleared at EndBlock."
        fn cached_bonded_tokens(validator: &T::AccountId) -> Amount {
            if let Some(power) = ValidatorPowerCache::<T>::get(validator) {
                return power;
            }
            let power = T::Staking::bonded_tokens(validator);
            ValidatorPowerCache::<T>::insert(validator, power);
            let _ = ValidatorCacheKeys::<T>::try_mutate(|keys| keys.try_push(validator.clone()));
            power
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_validation_rejects_wrong_length_and_degenerate_values() {
        assert!(!hash_well_formed(&[1u8; 31]));
        assert!(hash_well_formed(&[1u8; 32]));
        assert!(hash_well_formed(&[1u8; 64]));
        assert!(!hash_well_formed(&[0u8; 32]));
        assert!(!hash_well_formed(&[0xFFu8; 32]));
    }

    #[test]
    fn ctype_tag_truncates_and_pads() {
        let tag = encode_ctype(b"code");
        assert_eq!(&tag[..4], b"code");
        assert_eq!(&tag[4..], &[0u8; 12]);
    }

    #[test]
    fn s6_quorum_exact_boundary() {
        // total bonded = 100_000, quorum_pct = 0.50 -> threshold 50_000.
        let total = 100_000u128;
        let quorum_pct = Ratio::from_percent(50);
        let threshold = quorum_pct.checked_mul_trunc(total).unwrap();
        assert_eq!(threshold, 50_000);
        assert!(50_000 >= threshold);
        assert!(49_999 < threshold);
    }

    #[test]
    fn s5_fee_collection_split() {
        let fee = 2_000u128;
        let burn_ratio = Ratio::from_percent(50);
        let burned = burn_ratio.checked_mul_trunc(fee).unwrap();
        assert_eq!(burned, 1_000);
        assert_eq!(fee - burned, 1_000);
    }
}
