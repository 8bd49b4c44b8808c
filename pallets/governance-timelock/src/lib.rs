//! Governance Timelock Pallet
//!
//! Guarantees that any proposal the governance collaborator reports as passed
//! waits at least `min_delay_seconds` before its messages execute, with a bounded
//! guardian override and an expiry sweep for operations nobody ever executes.
//!
//! # Overview
//!
//! Grounded on `pallet-attestations`'s one-way status-transition discipline
//! (`DisputeStatus::{None,Pending,Escalated,RolledBack}` there, `TimelockStatus`
//! here) and `pallet-identity`'s `AdminOrigin: EnsureOrigin<..>` pattern for
//! governance-only dispatchables.
//!
//! Resolves the open question of how a queued proposal is kept from executing
//! twice: **status mutation through the [`GovernanceProvider`] collaborator**,
//! not executor interception. `suppress_direct_execution` is called as part of
//! queueing, and if it fails the whole queue step for that proposal is aborted —
//! fail closed, per spec. See `DESIGN.md` for the full rationale.

#![cfg_attr(not(feature = "std"), no_std)]

pub use pallet::*;

/// External governance module's interface, consumed read-only plus the one
/// write this pallet is allowed: suppressing direct execution of a proposal it
/// has taken over. Proposal storage, voting, and tallying stay entirely outside
/// this crate.
pub trait GovernanceProvider<ProposalId, AccountId> {
    /// Opaque, SCALE-encoded sequence of dispatchable calls attached to the
    /// proposal. This pallet never decodes them; it only hashes and re-dispatches
    /// them verbatim through the governance collaborator at execution time.
    fn proposal_messages(proposal: ProposalId) -> Option<sp_std::vec::Vec<u8>>;

    /// Marks the proposal so the governance module's own executor will not run
    /// it directly. `Err` means the core cannot guarantee suppression, and the
    /// caller must abort queueing for this proposal rather than proceed unsafely.
    fn suppress_direct_execution(proposal: ProposalId) -> Result<(), ()>;

    /// Dispatches the opaque message sequence through the normal execution path.
    fn dispatch_messages(messages: &[u8]) -> frame_support::dispatch::DispatchResult;
}

/// Inbound hook the governance collaborator calls the instant a proposal's voting
/// period ends with PASSED — mirrors the `TreasuryInflowNotifier` /
/// `OnUnbalanced`-style hook shape used elsewhere in this workspace: defined
/// alongside its implementation, consumed by the external collaborator.
pub trait PassedProposalHook<ProposalId> {
    fn on_proposal_passed(proposal: ProposalId);
}

/// Dispatchable call weights, in the shape `pallet-attestations::WeightInfo` uses:
/// a trait per-call, with [`DefaultWeightInfo`] providing fixed placeholder
/// figures until real benchmarking output replaces them.
pub trait WeightInfo {
    fn execute() -> frame_support::weights::Weight;
    fn cancel() -> frame_support::weights::Weight;
    fn emergency_execute() -> frame_support::weights::Weight;
    fn set_guardian() -> frame_support::weights::Weight;
}

pub struct DefaultWeightInfo;

impl WeightInfo for DefaultWeightInfo {
    fn execute() -> frame_support::weights::Weight {
        frame_support::weights::Weight::from_parts(40_000_000, 0)
    }

    fn cancel() -> frame_support::weights::Weight {
        frame_support::weights::Weight::from_parts(20_000_000, 0)
    }

    fn emergency_execute() -> frame_support::weights::Weight {
        frame_support::weights::Weight::from_parts(40_000_000, 0)
    }

    fn set_guardian() -> frame_support::weights::Weight {
        frame_support::weights::Weight::from_parts(10_000_000, 0)
    }
}

#[frame_support::pallet]
pub mod pallet {
    use super::*;
    use frame_support::pallet_prelude::*;
    use frame_support::traits::{EnsureOrigin, UnixTime};
    use frame_system::pallet_prelude::*;

    #[pallet::pallet]
    pub struct Pallet<T>(_);

    #[pallet::config]
    pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
        type ProposalId: Parameter + MaxEncodedLen + Copy;
        type TimeProvider: UnixTime;
        type Governance: GovernanceProvider<Self::ProposalId, Self::AccountId>;
        /// Governance-only surface: `set_guardian`, `cancel` via the normal path.
        type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;
        type WeightInfo: WeightInfo;

        #[pallet::constant]
        type ExpiryWindowSeconds: Get<u64>;
        #[pallet::constant]
        type MaxMessagesLen: Get<u32>;
        #[pallet::constant]
        type MaxPendingProposals: Get<u32>;
        #[pallet::constant]
        type MaxCancelReasonLen: Get<u32>;

        /// `construct_runtime!` declaration index of the external governance
        /// module's own execution pass. `integrity_test` asserts this pallet is
        /// declared earlier, since getting that wrong lets a proposal queued this
        /// block still be executed directly by the governance collaborator the
        /// same block -- the ordering spec.md calls a fatal wiring bug.
        #[pallet::constant]
        type GovernanceExecutionPalletIndex: Get<u32>;
    }

    #[derive(Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, MaxEncodedLen, RuntimeDebug)]
    pub enum TimelockStatus {
        Queued,
        Executed,
        Cancelled,
        Expired,
    }

    #[derive(Clone, PartialEq, Eq, Encode, Decode, TypeInfo, MaxEncodedLen, RuntimeDebug)]
    pub struct TimelockOperation<T: Config> {
        pub id: u64,
        pub proposal_id: T::ProposalId,
        pub queued_at: BlockNumberFor<T>,
        pub executable_at: u64,
        pub status: TimelockStatus,
        pub messages: BoundedVec<u8, T::MaxMessagesLen>,
        pub content_hash: [u8; 32],
        pub cancel_reason: Option<BoundedVec<u8, T::MaxCancelReasonLen>>,
    }

    #[pallet::storage]
    #[pallet::getter(fn min_delay_seconds)]
    pub type MinDelaySeconds<T> = StorageValue<_, u64, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn guardian)]
    pub type Guardian<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

    #[pallet::storage]
    #[pallet::getter(fn next_operation_id)]
    pub type NextOperationId<T> = StorageValue<_, u64, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn pending_proposals)]
    pub type PendingProposals<T: Config> =
        StorageValue<_, BoundedVec<T::ProposalId, T::MaxPendingProposals>, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn timelock_operations)]
    pub type TimelockOperations<T: Config> = StorageMap<_, Blake2_128Concat, u64, TimelockOperation<T>, OptionQuery>;

    #[pallet::storage]
    pub type ProposalToOperation<T: Config> = StorageMap<_, Blake2_128Concat, T::ProposalId, u64, OptionQuery>;

    #[pallet::genesis_config]
    #[derive(frame_support::DefaultNoBound)]
    pub struct GenesisConfig<T: Config> {
        pub min_delay_seconds: u64,
        pub guardian: Option<T::AccountId>,
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            MinDelaySeconds::<T>::put(self.min_delay_seconds);
            if let Some(g) = &self.guardian {
                Guardian::<T>::put(g);
            }
        }
    }

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        TimelockQueued { operation_id: u64, proposal_id: T::ProposalId, executable_at: u64 },
        TimelockExecuted { operation_id: u64 },
        TimelockCancelled { operation_id: u64, reason: BoundedVec<u8, T::MaxCancelReasonLen> },
        TimelockExpired { operation_id: u64 },
        TimelockEmergencyExecuted { operation_id: u64 },
        TimelockGuardianUpdated { guardian: Option<T::AccountId> },
        ProposalQueueingAborted { proposal_id: T::ProposalId },
    }

    #[pallet::error]
    pub enum Error<T> {
        OperationNotExecutable,
        OperationNotQueued,
        Unauthorized,
        NoGuardianSet,
        NotFound,
        CancelReasonTooLong,
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::execute())]
        pub fn execute(origin: OriginFor<T>, id: u64) -> DispatchResult {
            ensure_signed(origin)?;
            let mut op = TimelockOperations::<T>::get(id).ok_or(Error::<T>::NotFound)?;
            ensure!(op.status == TimelockStatus::Queued, Error::<T>::OperationNotQueued);
            let now = T::TimeProvider::now().as_secs();
            ensure!(now >= op.executable_at, Error::<T>::OperationNotExecutable);

            op.status = TimelockStatus::Executed;
            TimelockOperations::<T>::insert(id, op.clone());
            T::Governance::dispatch_messages(&op.messages)?;
            Self::deposit_event(Event::TimelockExecuted { operation_id: id });
            Ok(())
        }

        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::cancel())]
        pub fn cancel(origin: OriginFor<T>, id: u64, reason: sp_std::vec::Vec<u8>) -> DispatchResult {
            Self::ensure_admin_or_guardian(origin)?;
            let mut op = TimelockOperations::<T>::get(id).ok_or(Error::<T>::NotFound)?;
            ensure!(op.status == TimelockStatus::Queued, Error::<T>::OperationNotQueued);
            let reason: BoundedVec<u8, T::MaxCancelReasonLen> =
                reason.try_into().map_err(|_| Error::<T>::CancelReasonTooLong)?;
            op.status = TimelockStatus::Cancelled;
            op.cancel_reason = Some(reason.clone());
            TimelockOperations::<T>::insert(id, op);
            Self::deposit_event(Event::TimelockCancelled { operation_id: id, reason });
            Ok(())
        }

        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::emergency_execute())]
        pub fn emergency_execute(origin: OriginFor<T>, id: u64) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let guardian = Guardian::<T>::get().ok_or(Error::<T>::NoGuardianSet)?;
            ensure!(who == guardian, Error::<T>::Unauthorized);

            let mut op = TimelockOperations::<T>::get(id).ok_or(Error::<T>::NotFound)?;
            ensure!(op.status == TimelockStatus::Queued, Error::<T>::OperationNotQueued);

            op.status = TimelockStatus::Executed;
            TimelockOperations::<T>::insert(id, op.clone());
            T::Governance::dispatch_messages(&op.messages)?;
            Self::deposit_event(Event::TimelockEmergencyExecuted { operation_id: id });
            Ok(())
        }

        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::set_guardian())]
        pub fn set_guardian(origin: OriginFor<T>, guardian: Option<T::AccountId>) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            match &guardian {
                Some(g) => Guardian::<T>::put(g),
                None => Guardian::<T>::kill(),
            }
            Self::deposit_event(Event::TimelockGuardianUpdated { guardian });
            Ok(())
        }
    }

    #[pallet::hooks]
    impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
        /// Queueing runs in `on_finalize` of the *same* block whose voting period
        /// just closed, strictly before any pallet declared later in
        /// `construct_runtime!` (the governance module's own execution pass) gets
        /// its own `on_finalize`. Running this in `on_initialize` would defer
        /// suppression to the *next* block's start, leaving a one-block window
        /// where a proposal marked PASSED this block could still be executed
        /// directly -- exactly the race spec.md calls a fatal wiring bug.
        /// `integrity_test` below checks the declaration-order half of that
        /// requirement; this hook placement is the other half.
        fn on_finalize(height: BlockNumberFor<T>) {
            Self::process_pending_proposals(height);

            let now = T::TimeProvider::now().as_secs();
            let expiry_window = T::ExpiryWindowSeconds::get();
            for (id, mut op) in TimelockOperations::<T>::iter() {
                if op.status == TimelockStatus::Queued && now.saturating_sub(op.executable_at) >= expiry_window {
                    op.status = TimelockStatus::Expired;
                    TimelockOperations::<T>::insert(id, op);
                    Self::deposit_event(Event::TimelockExpired { operation_id: id });
                }
            }
        }

        /// Rejects a misconfigured runtime at init: this pallet must be declared
        /// before the governance module's execution pass in `construct_runtime!`,
        /// or the `on_finalize` ordering above can't deliver the same-block
        /// suppression spec.md requires.
        fn integrity_test() {
            let own_index = <Self as frame_support::traits::PalletInfoAccess>::index() as u32;
            assert!(
                own_index < T::GovernanceExecutionPalletIndex::get(),
                "pallet-governance-timelock must be declared in construct_runtime! before the \
                 governance module's execution pass, or a proposal queued this block could still \
                 be executed directly the same block"
            );
        }
    }

    impl<T: Config> Pallet<T> {
        fn ensure_admin_or_guardian(origin: OriginFor<T>) -> Result<(), DispatchError> {
            if let Ok(who) = ensure_signed(origin.clone()) {
                if Guardian::<T>::get().as_ref() == Some(&who) {
                    return Ok(());
                }
            }
            T::AdminOrigin::ensure_origin(origin).map(|_| ()).map_err(|_| Error::<T>::Unauthorized.into())
        }

        fn process_pending_proposals(height: BlockNumberFor<T>) {
            let pending = PendingProposals::<T>::take();
            if pending.is_empty() {
                return;
            }
            let now = T::TimeProvider::now().as_secs();
            let min_delay = MinDelaySeconds::<T>::get();

            for proposal_id in pending.into_iter() {
                match Self::queue_one(proposal_id, height, now, min_delay) {
                    Ok(()) => {}
                    Err(()) => Self::deposit_event(Event::ProposalQueueingAborted { proposal_id }),
                }
            }
        }

        fn queue_one(
            proposal_id: T::ProposalId,
            height: BlockNumberFor<T>,
            now: u64,
            min_delay: u64,
        ) -> Result<(), ()> {
            let messages = T::Governance::proposal_messages(proposal_id).ok_or(())?;
            let bounded: BoundedVec<u8, T::MaxMessagesLen> = messages.clone().try_into().map_err(|_| ())?;
            let content_hash = content_hash(proposal_id, &messages);

            // Fail closed: if the collaborator cannot guarantee suppression of
            // direct execution, the whole queue step for this proposal aborts
            // and nothing is stored.
            T::Governance::suppress_direct_execution(proposal_id)?;

            let id = NextOperationId::<T>::mutate(|n| {
                let this = *n;
                *n = n.saturating_add(1);
                this
            });
            let executable_at = now.saturating_add(min_delay);
            TimelockOperations::<T>::insert(
                id,
                TimelockOperation {
                    id,
                    proposal_id,
                    queued_at: height,
                    executable_at,
                    status: TimelockStatus::Queued,
                    messages: bounded,
                    content_hash,
                    cancel_reason: None,
                },
            );
            ProposalToOperation::<T>::insert(proposal_id, id);
            Self::deposit_event(Event::TimelockQueued { operation_id: id, proposal_id, executable_at });
            Ok(())
        }
    }

    impl<T: Config> PassedProposalHook<T::ProposalId> for Pallet<T> {
        fn on_proposal_passed(proposal: T::ProposalId) {
            let _ = PendingProposals::<T>::try_mutate(|set| set.try_push(proposal));
        }
    }

    pub(crate) fn content_hash<ProposalId: codec::Encode>(proposal_id: ProposalId, messages: &[u8]) -> [u8; 32] {
        let mut buf = sp_std::vec::Vec::with_capacity(messages.len() + 16);
        buf.extend_from_slice(&proposal_id.encode());
        buf.extend_from_slice(messages);
        sp_io::hashing::blake2_256(&buf)
    }
}

#[cfg(test)]
mod tests {
    use super::pallet::content_hash;

    #[test]
    fn content_hash_is_deterministic() {
        let a = content_hash(7u64, b"messages-a");
        let b = content_hash(7u64, b"messages-a");
        let c = content_hash(7u64, b"messages-b");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn content_hash_distinguishes_proposal_id() {
        let a = content_hash(1u64, b"same");
        let b = content_hash(2u64, b"same");
        assert_ne!(a, b);
    }
}
