//! Exercises the EndBlock pipeline ordering that can only be tested once all
//! five pallets are wired into one runtime: mint (`Tokenomics`) must land before
//! `FeePipeline` reads the treasury balance, and the treasury share both pallets
//! credit must show up as `TreasuryRedirect`'s accumulated inflow before its own
//! interval gate fires.

use frame_support::traits::{Currency, Get, OnFinalize, OnInitialize};
use runtime::{
    chain_spec::development_genesis, AccountId, AllPalletsWithSystem, Balances, FeePipeline,
    FeeCollectorAccountId, Runtime, RuntimeGenesisConfig, System, Tokenomics, TreasuryAccountId,
    TreasuryRedirect,
};
use sp_runtime::BuildStorage;

const ALICE: AccountId = 1;

fn new_test_ext() -> sp_io::TestExternalities {
    let genesis: RuntimeGenesisConfig = development_genesis(&[(ALICE, 1_000_000_000)]);
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

#[test]
fn mint_runs_before_fee_pipeline_reads_treasury_balance() {
    new_test_ext().execute_with(|| {
        System::set_block_number(1);
        run_to_block(2);

        let ledger = Tokenomics::supply_ledger();
        assert!(ledger.total_minted > 0, "tokenomics must mint before block 2 finalizes");
        assert!(
            Balances::free_balance(TreasuryAccountId::get()) > 0,
            "the treasury share of the first mint must already be credited"
        );
    });
}

#[test]
fn treasury_redirect_sees_inflows_from_both_mint_and_fees() {
    new_test_ext().execute_with(|| {
        System::set_block_number(1);

        // Simulate collected transaction fees landing in the fee-collector account,
        // the way transaction-payment wiring would in a full node -- out of this
        // pallet's scope, so the test plays that role directly.
        let _ = Balances::deposit_creating(&FeeCollectorAccountId::get(), 10_000);

        run_to_block(2);

        let redirect_state = TreasuryRedirect::redirect_state();
        assert!(
            redirect_state.accumulated_inflows > 0,
            "both tokenomics' mint and fee-pipeline's treasury share must notify treasury-redirect"
        );
    });
}

#[test]
fn treasury_redirect_executes_once_its_interval_elapses() {
    new_test_ext().execute_with(|| {
        System::set_block_number(1);
        let _ = Balances::deposit_creating(&FeeCollectorAccountId::get(), 1_000_000);

        // genesis interval is 1_000 blocks.
        run_to_block(1_002);

        let state = TreasuryRedirect::redirect_state();
        assert!(state.total_redirected > 0, "redirect should have fired at least once by block 1002");
    });
}

#[test]
fn supply_ledger_conserves_mint_minus_burn_across_many_blocks() {
    new_test_ext().execute_with(|| {
        System::set_block_number(1);
        let _ = Balances::deposit_creating(&FeeCollectorAccountId::get(), 50_000);
        run_to_block(50);

        let ledger = Tokenomics::supply_ledger();
        assert_eq!(ledger.current, ledger.total_minted - ledger.total_burned);
        assert!(ledger.current <= 1_000_000_000_000_000, "supply cap must never be exceeded");
    });
}
