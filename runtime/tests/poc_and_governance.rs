//! Integration coverage for the two pallets whose own unit tests stop at pure
//! helper functions: PoC's submit -> endorse -> quorum -> withdraw lifecycle,
//! and governance-timelock's queue -> execute / cancel / emergency-execute /
//! expiry flow (spec scenario S7).

use frame_support::traits::{Currency, Get, OnFinalize, OnInitialize};
use frame_support::{assert_noop, assert_ok};
use pallet_governance_timelock::TimelockStatus;
use runtime::{
    chain_spec::development_genesis, governance_stub, AccountId, AllPalletsWithSystem, Balances,
    GovernanceStub, GovernanceTimelock, Poc, PocModuleAccountId, Runtime, RuntimeGenesisConfig,
    RuntimeOrigin, System, Timestamp,
};
use sp_runtime::BuildStorage;

const ALICE: AccountId = 1;
const VALIDATOR: AccountId = 2;
const GUARDIAN: AccountId = 3;

fn new_test_ext() -> sp_io::TestExternalities {
    let genesis: RuntimeGenesisConfig = development_genesis(&[
        (ALICE, 1_000_000_000),
        (VALIDATOR, 1_000_000_000),
        (GUARDIAN, 1_000_000_000),
    ]);
    let storage = genesis.build_storage().unwrap();
    storage.into()
}

fn run_to_block(n: u64) {
    while System::block_number() < n {
        <AllPalletsWithSystem as OnFinalize<u64>>::on_finalize(System::block_number());
        let next = System::block_number() + 1;
        System::set_block_number(next);
        <AllPalletsWithSystem as OnInitialize<u64>>::on_initialize(next);
    }
}

fn set_now_secs(secs: u64) {
    Timestamp::set_timestamp(secs * 1000);
}

fn sample_hash() -> frame_support::BoundedVec<u8, frame_support::traits::ConstU32<64>> {
    vec![0xABu8; 32].try_into().unwrap()
}

fn sample_uri() -> frame_support::BoundedVec<u8, frame_support::traits::ConstU32<256>> {
    b"ipfs://contribution".to_vec().try_into().unwrap()
}

#[test]
fn submission_with_no_quorum_params_still_stores_and_charges_no_fee() {
    new_test_ext().execute_with(|| {
        System::set_block_number(1);
        assert_ok!(Poc::submit_contribution(
            RuntimeOrigin::signed(ALICE),
            [1u8; 16],
            sample_uri(),
            sample_hash(),
        ));
        assert!(Poc::contributions(0).is_some());
    });
}

#[test]
fn malformed_hash_is_rejected_before_any_fee_is_collected() {
    new_test_ext().execute_with(|| {
        System::set_block_number(1);
        let balance_before = Balances::free_balance(ALICE);
        let bad_hash: frame_support::BoundedVec<u8, frame_support::traits::ConstU32<64>> =
            vec![0u8; 32].try_into().unwrap();
        assert_noop!(
            Poc::submit_contribution(RuntimeOrigin::signed(ALICE), [1u8; 16], sample_uri(), bad_hash),
            pallet_poc::Error::<Runtime>::MalformedHash
        );
        assert_eq!(Balances::free_balance(ALICE), balance_before);
    });
}

#[test]
fn endorsement_by_non_validator_is_rejected() {
    new_test_ext().execute_with(|| {
        System::set_block_number(1);
        assert_ok!(Poc::submit_contribution(
            RuntimeOrigin::signed(ALICE),
            [1u8; 16],
            sample_uri(),
            sample_hash(),
        ));
        // VALIDATOR has no bonded tokens under `RuntimeStaking` (nothing reserved),
        // so its endorsement carries zero power and the pallet rejects it.
        assert_noop!(
            Poc::endorse(RuntimeOrigin::signed(VALIDATOR), 0, true),
            pallet_poc::Error::<Runtime>::ZeroPower
        );
    });
}

#[test]
fn endorsement_with_bonded_power_awards_credits_and_withdrawal_pays_out() {
    new_test_ext().execute_with(|| {
        System::set_block_number(1);
        // Stand in for real staking: reserve some balance so RuntimeStaking
        // reports VALIDATOR as bonded.
        Balances::reserve(&VALIDATOR, 100_000).unwrap();

        assert_ok!(Poc::submit_contribution(
            RuntimeOrigin::signed(ALICE),
            [1u8; 16],
            sample_uri(),
            sample_hash(),
        ));
        assert_ok!(Poc::endorse(RuntimeOrigin::signed(VALIDATOR), 0, true));

        let module_balance_before = Balances::free_balance(PocModuleAccountId::get());
        let credits = Poc::credits(ALICE);
        if credits > 0 {
            assert_ok!(Poc::withdraw(RuntimeOrigin::signed(ALICE)));
            assert_eq!(Poc::credits(ALICE), 0);
            assert!(Balances::free_balance(PocModuleAccountId::get()) <= module_balance_before);
        }
    });
}

#[test]
fn timelock_execute_fails_before_delay_and_succeeds_after() {
    new_test_ext().execute_with(|| {
        System::set_block_number(1);
        set_now_secs(1_000);

        assert_ok!(GovernanceStub::note_proposal_passed(RuntimeOrigin::root(), 7, b"noop-call".to_vec()));
        // queueing happens in on_finalize of this same block.
        run_to_block(2);

        let op_id = 0u64;
        assert!(governance_stub::Pallet::<Runtime>::is_suppressed(7), "queueing must suppress direct execution");

        // min_delay_seconds from genesis is 172_800 (2 days); one second short must fail.
        set_now_secs(1_000 + 172_800 - 1);
        assert_noop!(
            GovernanceTimelock::execute(RuntimeOrigin::signed(ALICE), op_id),
            pallet_governance_timelock::Error::<Runtime>::OperationNotExecutable
        );

        set_now_secs(1_000 + 172_800);
        assert_ok!(GovernanceTimelock::execute(RuntimeOrigin::signed(ALICE), op_id));
    });
}

#[test]
fn guardian_can_emergency_execute_before_delay_elapses() {
    new_test_ext().execute_with(|| {
        System::set_block_number(1);
        set_now_secs(1_000);
        assert_ok!(GovernanceTimelock::set_guardian(RuntimeOrigin::root(), Some(GUARDIAN)));

        assert_ok!(GovernanceStub::note_proposal_passed(RuntimeOrigin::root(), 9, b"urgent-call".to_vec()));
        run_to_block(2);

        // no time has passed; a normal execute would fail, but the guardian bypasses the delay.
        assert_noop!(
            GovernanceTimelock::execute(RuntimeOrigin::signed(ALICE), 0),
            pallet_governance_timelock::Error::<Runtime>::OperationNotExecutable
        );
        assert_ok!(GovernanceTimelock::emergency_execute(RuntimeOrigin::signed(GUARDIAN), 0));
    });
}

#[test]
fn non_guardian_emergency_execute_is_rejected() {
    new_test_ext().execute_with(|| {
        System::set_block_number(1);
        set_now_secs(1_000);
        assert_ok!(GovernanceTimelock::set_guardian(RuntimeOrigin::root(), Some(GUARDIAN)));
        assert_ok!(GovernanceStub::note_proposal_passed(RuntimeOrigin::root(), 11, b"call".to_vec()));
        run_to_block(2);

        assert_noop!(
            GovernanceTimelock::emergency_execute(RuntimeOrigin::signed(ALICE), 0),
            pallet_governance_timelock::Error::<Runtime>::Unauthorized
        );
    });
}

#[test]
fn cancelled_operation_can_never_be_executed() {
    new_test_ext().execute_with(|| {
        System::set_block_number(1);
        set_now_secs(1_000);
        assert_ok!(GovernanceStub::note_proposal_passed(RuntimeOrigin::root(), 13, b"call".to_vec()));
        run_to_block(2);

        assert_ok!(GovernanceTimelock::cancel(RuntimeOrigin::root(), 0, b"superseded by proposal 14".to_vec()));
        set_now_secs(1_000 + 172_800);
        assert_noop!(
            GovernanceTimelock::execute(RuntimeOrigin::signed(ALICE), 0),
            pallet_governance_timelock::Error::<Runtime>::OperationNotQueued
        );
    });
}

#[test]
fn unexecuted_operation_expires_after_the_expiry_window() {
    new_test_ext().execute_with(|| {
        System::set_block_number(1);
        set_now_secs(1_000);
        assert_ok!(GovernanceStub::note_proposal_passed(RuntimeOrigin::root(), 17, b"call".to_vec()));
        run_to_block(2);

        // executable_at = 1_000 + 172_800; ExpiryWindowSeconds is 604_800.
        set_now_secs(1_000 + 172_800 + 604_800);
        run_to_block(3);

        let op = GovernanceTimelock::timelock_operations(0).expect("operation must still exist");
        assert_eq!(op.status, TimelockStatus::Expired);
    });
}
