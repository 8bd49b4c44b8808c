//! Minimal stand-in for the external governance module this workspace never
//! implements (`SPEC_FULL.md` §1: proposal storage, voting and tallying are out
//! of scope). Exists only so `runtime` has a concrete
//! [`pallet_governance_timelock::GovernanceProvider`] to exercise in its
//! integration tests — `note_proposal_passed` plays the role of "a proposal's
//! voting period just ended with PASSED", which in a real governance pallet
//! would be an internal transition, not a root-only extrinsic.

pub use pallet::*;

#[frame_support::pallet]
pub mod pallet {
    use frame_support::pallet_prelude::*;
    use frame_system::pallet_prelude::*;
    use pallet_governance_timelock::PassedProposalHook;
    use sp_std::vec::Vec;

    #[pallet::pallet]
    pub struct Pallet<T>(_);

    #[pallet::config]
    pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
        type TimelockHook: PassedProposalHook<u64>;

        #[pallet::constant]
        type MaxMessagesLen: Get<u32>;
    }

    #[pallet::storage]
    pub type Messages<T: Config> = StorageMap<_, Blake2_128Concat, u64, BoundedVec<u8, T::MaxMessagesLen>, OptionQuery>;

    #[pallet::storage]
    pub type Suppressed<T: Config> = StorageMap<_, Blake2_128Concat, u64, (), ValueQuery>;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        ProposalPassed { proposal_id: u64 },
    }

    #[pallet::error]
    pub enum Error<T> {
        MessagesTooLong,
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Root-only because there is no real voting module behind it in this
        /// workspace; a genuine governance pallet would call
        /// `PassedProposalHook::on_proposal_passed` from its own tally logic,
        /// never from a dispatchable.
        #[pallet::call_index(0)]
        #[pallet::weight(Weight::from_parts(10_000_000, 0))]
        pub fn note_proposal_passed(origin: OriginFor<T>, proposal_id: u64, messages: Vec<u8>) -> DispatchResult {
            ensure_root(origin)?;
            let bounded: BoundedVec<u8, T::MaxMessagesLen> =
                messages.try_into().map_err(|_| Error::<T>::MessagesTooLong)?;
            Messages::<T>::insert(proposal_id, bounded);
            Self::deposit_event(Event::ProposalPassed { proposal_id });
            T::TimelockHook::on_proposal_passed(proposal_id);
            Ok(())
        }
    }

    impl<T: Config> Pallet<T> {
        pub fn mark_suppressed(proposal_id: u64) {
            Suppressed::<T>::insert(proposal_id, ());
        }

        pub fn is_suppressed(proposal_id: u64) -> bool {
            Suppressed::<T>::contains_key(proposal_id)
        }
    }
}
