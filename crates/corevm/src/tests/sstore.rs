//! SSTORE regimes beyond the headline cases.

use super::{Frame, CONTRACT};
use crate::{
    primitives::U256,
    result::ExecutionStatus,
    spec::SpecId,
    test_utils::MockHost,
};

fn store(value: u8, key: u8) -> Vec<u8> {
    vec![0x60, value, 0x60, key, 0x55, 0x00]
}

#[test]
fn noop_write_costs_the_warm_rate() {
    let host = MockHost::new().with_storage(CONTRACT, U256::ZERO, U256::ONE);
    // Istanbul: no-op writes cost the EIP-2200 SLOAD rate.
    let outcome = Frame::new(SpecId::ISTANBUL, store(1, 0)).host(host.clone()).run();
    assert_eq!(outcome.result.gas_used, 6 + 800);
    assert_eq!(outcome.refunded, 0);
    // Berlin folds the warm-read price in, plus the cold-slot touch.
    let outcome = Frame::new(SpecId::BERLIN, store(1, 0)).host(host).run();
    assert_eq!(outcome.result.gas_used, 6 + 100 + 2_100);
    assert_eq!(outcome.refunded, 0);
}

#[test]
fn legacy_regime_has_no_net_metering() {
    // Homestead: zero -> non-zero is SET, everything else RESET, and the
    // stipend gate does not exist yet.
    let outcome = Frame::new(SpecId::HOMESTEAD, store(1, 0)).run();
    assert_eq!(outcome.result.gas_used, 6 + 20_000);

    let host = MockHost::new().with_storage(CONTRACT, U256::ZERO, U256::ONE);
    let outcome = Frame::new(SpecId::HOMESTEAD, store(2, 0)).host(host.clone()).run();
    assert_eq!(outcome.result.gas_used, 6 + 5_000);
    assert_eq!(outcome.refunded, 0);

    // Clearing refunds the full clears schedule.
    let outcome = Frame::new(SpecId::HOMESTEAD, store(0, 0)).host(host).run();
    assert_eq!(outcome.result.gas_used, 6 + 5_000);
    assert_eq!(outcome.refunded, 15_000);
}

#[test]
fn stipend_gate_rejects_bare_sstore() {
    // EIP-1706: remaining gas equals the stipend when SSTORE executes.
    let outcome = Frame::new(SpecId::ISTANBUL, store(1, 0)).gas_limit(6 + 2_300).run();
    assert_eq!(outcome.result.status, ExecutionStatus::OutOfGas);
    assert_eq!(outcome.result.gas_used, 6 + 2_300);
}

#[test]
fn dirty_writes_cost_the_cheap_rate() {
    // original = 0: write 1, then 2, then 3. First write is SET, the
    // rest are dirty.
    let code = vec![
        0x60, 0x01, 0x60, 0x00, 0x55, // SSTORE(0, 1)
        0x60, 0x02, 0x60, 0x00, 0x55, // SSTORE(0, 2)
        0x60, 0x03, 0x60, 0x00, 0x55, // SSTORE(0, 3)
        0x00,
    ];
    let outcome =
        Frame::new(SpecId::CANCUN, code).warm_slot(CONTRACT, U256::ZERO).run();
    assert_eq!(outcome.result.gas_used, 18 + 20_000 + 100 + 100);
    assert_eq!(outcome.refunded, 0);
    assert_eq!(outcome.host.storage(CONTRACT, U256::ZERO), U256::from(3u64));
}

#[test]
fn unclearing_takes_the_credit_back() {
    // original = 1: clear it (credit), then write 2 (credit revoked).
    let code = vec![
        0x60, 0x00, 0x60, 0x00, 0x55, // SSTORE(0, 0)
        0x60, 0x02, 0x60, 0x00, 0x55, // SSTORE(0, 2)
        0x00,
    ];
    let host = MockHost::new().with_storage(CONTRACT, U256::ZERO, U256::ONE);
    let outcome = Frame::new(SpecId::LONDON, code)
        .host(host)
        .warm_slot(CONTRACT, U256::ZERO)
        .run();
    assert_eq!(outcome.result.gas_used, 12 + 2_900 + 100);
    assert_eq!(outcome.refunded, 0);
}
