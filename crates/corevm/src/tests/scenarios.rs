//! Literal bytecode scenarios with exact gas expectations.

use super::{u, Frame, CONTRACT};
use crate::{
    result::ExecutionStatus,
    spec::SpecId,
    test_utils::MockHost,
    primitives::U256,
};

#[test]
fn lt_of_two_pushes() {
    // PUSH1 10; PUSH1 5; LT; STOP
    let outcome = Frame::new(SpecId::BERLIN, vec![0x60, 0x0A, 0x60, 0x05, 0x10, 0x00])
        .gas_limit(100)
        .run();
    assert_eq!(outcome.result.status, ExecutionStatus::Success);
    assert_eq!(outcome.result.gas_used, 9);
    assert_eq!(outcome.stack, vec![U256::ONE]);
}

#[test]
fn push0_is_fork_gated() {
    // PUSH0; STOP
    let outcome = Frame::new(SpecId::SHANGHAI, vec![0x5F, 0x00]).gas_limit(100).run();
    assert_eq!(outcome.result.status, ExecutionStatus::Success);
    assert_eq!(outcome.result.gas_used, 2);
    assert_eq!(outcome.stack, vec![U256::ZERO]);

    let outcome = Frame::new(SpecId::BERLIN, vec![0x5F, 0x00]).gas_limit(100).run();
    assert_eq!(outcome.result.status, ExecutionStatus::InvalidOpcode);
    assert_eq!(outcome.result.gas_used, 0);
}

#[test]
fn dup_duplicates_the_top() {
    // PUSH1 0xFF; DUP1; STOP
    let outcome =
        Frame::new(SpecId::BERLIN, vec![0x60, 0xFF, 0x80, 0x00]).gas_limit(100).run();
    assert_eq!(outcome.result.status, ExecutionStatus::Success);
    assert_eq!(outcome.result.gas_used, 6);
    assert_eq!(outcome.stack, vec![u(0xFF), u(0xFF)]);
}

#[test]
fn add_of_two_pushes() {
    // PUSH1 10; PUSH1 5; ADD; STOP
    let outcome = Frame::new(SpecId::BERLIN, vec![0x60, 0x0A, 0x60, 0x05, 0x01, 0x00])
        .gas_limit(100)
        .run();
    assert_eq!(outcome.result.status, ExecutionStatus::Success);
    assert_eq!(outcome.result.gas_used, 9);
    assert_eq!(outcome.stack, vec![u(15)]);
}

#[test]
fn sstore_set_warm_and_cold() {
    // PUSH1 1; PUSH1 0; SSTORE; STOP
    let code = vec![0x60, 0x01, 0x60, 0x00, 0x55, 0x00];

    let outcome = Frame::new(SpecId::CANCUN, code.clone())
        .warm_slot(CONTRACT, U256::ZERO)
        .run();
    assert_eq!(outcome.result.status, ExecutionStatus::Success);
    assert_eq!(outcome.result.gas_used, 6 + 20_000);
    assert_eq!(outcome.refunded, 0);

    let outcome = Frame::new(SpecId::CANCUN, code).run();
    assert_eq!(outcome.result.gas_used, 6 + 22_100);
    assert_eq!(outcome.refunded, 0);
}

#[test]
fn sstore_restore_bonus_on_istanbul() {
    // Slot starts at 1; write 2, then write 1 back.
    // PUSH1 2; PUSH1 0; SSTORE; PUSH1 1; PUSH1 0; SSTORE; STOP
    let code = vec![0x60, 0x02, 0x60, 0x00, 0x55, 0x60, 0x01, 0x60, 0x00, 0x55, 0x00];
    let host = MockHost::new().with_storage(CONTRACT, U256::ZERO, U256::ONE);
    let outcome = Frame::new(SpecId::ISTANBUL, code).host(host).run();
    assert_eq!(outcome.result.status, ExecutionStatus::Success);
    // Reset (5000) for the first write, the dirty rate (800) for the
    // second, plus 4 pushes.
    assert_eq!(outcome.result.gas_used, 12 + 5_000 + 800);
    assert_eq!(outcome.refunded, 4_200);
    assert_eq!(outcome.host.storage(CONTRACT, U256::ZERO), U256::ONE);
}

#[test]
fn sstore_clear_refund_on_london() {
    // Slot starts at 1; clear it from a cold slot.
    // PUSH1 0; PUSH1 0; SSTORE; STOP
    let code = vec![0x60, 0x00, 0x60, 0x00, 0x55, 0x00];
    let host = MockHost::new().with_storage(CONTRACT, U256::ZERO, U256::ONE);
    let outcome = Frame::new(SpecId::LONDON, code).host(host).run();
    assert_eq!(outcome.result.status, ExecutionStatus::Success);
    assert_eq!(outcome.result.gas_used, 6 + 5_000);
    assert_eq!(outcome.refunded, 4_800);
    assert_eq!(outcome.host.storage(CONTRACT, U256::ZERO), U256::ZERO);
}

#[test]
fn jump_into_push_immediate_is_invalid() {
    // PUSH1 0x5B; PUSH1 1; JUMP - the byte at index 1 is 0x5B but sits
    // inside the first PUSH's immediate window.
    let outcome =
        Frame::new(SpecId::BERLIN, vec![0x60, 0x5B, 0x60, 0x01, 0x56]).gas_limit(100).run();
    assert_eq!(outcome.result.status, ExecutionStatus::InvalidJump);
}
