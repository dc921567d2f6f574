//! Fork gating and miscellaneous opcode semantics.

use super::{u, Frame, CONTRACT};
use crate::{
    env::Env,
    primitives::{keccak256, B256, U256},
    result::ExecutionStatus,
    spec::SpecId,
    test_utils::MockHost,
};

#[test]
fn mcopy_is_cancun_only() {
    // Store a word at 0, copy it to 32, load it back.
    // PUSH1 0x42; PUSH1 0; MSTORE; PUSH1 32 (len); PUSH1 0 (src);
    // PUSH1 32 (dst); MCOPY; PUSH1 32; MLOAD; STOP
    let code = vec![
        0x60, 0x42, 0x60, 0x00, 0x52, 0x60, 0x20, 0x60, 0x00, 0x60, 0x20, 0x5E, 0x60, 0x20,
        0x51, 0x00,
    ];
    let outcome = Frame::new(SpecId::CANCUN, code.clone()).run();
    assert_eq!(outcome.result.status, ExecutionStatus::Success);
    assert_eq!(outcome.stack, vec![u(0x42)]);

    let outcome = Frame::new(SpecId::SHANGHAI, code).run();
    assert_eq!(outcome.result.status, ExecutionStatus::InvalidOpcode);
}

#[test]
fn transient_storage_is_cancun_only() {
    // PUSH1 7; PUSH1 0; TSTORE; PUSH1 0; TLOAD; STOP
    let code = vec![0x60, 0x07, 0x60, 0x00, 0x5D, 0x60, 0x00, 0x5C, 0x00];
    let outcome = Frame::new(SpecId::CANCUN, code.clone()).run();
    assert_eq!(outcome.result.status, ExecutionStatus::Success);
    assert_eq!(outcome.stack, vec![u(7)]);
    assert_eq!(outcome.host.transient_storage(CONTRACT, U256::ZERO), u(7));
    // 3 pushes plus two warm-rate accesses.
    assert_eq!(outcome.result.gas_used, 9 + 100 + 100);

    let outcome = Frame::new(SpecId::SHANGHAI, code).run();
    assert_eq!(outcome.result.status, ExecutionStatus::InvalidOpcode);
}

#[test]
fn basefee_is_london_only() {
    let mut env = Env::default();
    env.block.basefee = u(1_000);
    let code = vec![0x48, 0x00];
    let outcome = Frame::new(SpecId::LONDON, code.clone()).env(env.clone()).run();
    assert_eq!(outcome.stack, vec![u(1_000)]);
    let outcome = Frame::new(SpecId::BERLIN, code).env(env).run();
    assert_eq!(outcome.result.status, ExecutionStatus::InvalidOpcode);
}

#[test]
fn blobhash_indexes_the_tx_list() {
    let mut env = Env::default();
    env.tx.blob_hashes = vec![B256([0x11; 32])];
    // PUSH1 0; BLOBHASH; PUSH1 1; BLOBHASH; STOP
    let code = vec![0x60, 0x00, 0x49, 0x60, 0x01, 0x49, 0x00];
    let outcome = Frame::new(SpecId::CANCUN, code.clone()).env(env.clone()).run();
    assert_eq!(outcome.result.status, ExecutionStatus::Success);
    assert_eq!(outcome.stack, vec![U256::from(B256([0x11; 32])), U256::ZERO]);

    let outcome = Frame::new(SpecId::SHANGHAI, code).env(env).run();
    assert_eq!(outcome.result.status, ExecutionStatus::InvalidOpcode);
}

#[test]
fn blobbasefee_is_cancun_only() {
    let mut env = Env::default();
    env.block.blob_basefee = u(77);
    let code = vec![0x4A, 0x00];
    let outcome = Frame::new(SpecId::CANCUN, code.clone()).env(env.clone()).run();
    assert_eq!(outcome.stack, vec![u(77)]);
    let outcome = Frame::new(SpecId::SHANGHAI, code).env(env).run();
    assert_eq!(outcome.result.status, ExecutionStatus::InvalidOpcode);
}

#[test]
fn mstore8_writes_the_low_byte() {
    // PUSH2 0x1234; PUSH1 0; MSTORE8; PUSH1 0; MLOAD; STOP
    let code = vec![0x61, 0x12, 0x34, 0x60, 0x00, 0x53, 0x60, 0x00, 0x51, 0x00];
    let outcome = Frame::new(SpecId::BERLIN, code).run();
    assert_eq!(outcome.result.status, ExecutionStatus::Success);
    // 0x34 lands in the most significant byte of the first word.
    assert_eq!(outcome.stack, vec![u(0x34).shl(248)]);
}

#[test]
fn shifts_are_constantinople_only() {
    // PUSH1 1; PUSH1 4; SHL; STOP
    let code = vec![0x60, 0x01, 0x60, 0x04, 0x1B, 0x00];
    let outcome = Frame::new(SpecId::CONSTANTINOPLE, code.clone()).run();
    assert_eq!(outcome.stack, vec![u(16)]);
    let outcome = Frame::new(SpecId::BYZANTIUM, code).run();
    assert_eq!(outcome.result.status, ExecutionStatus::InvalidOpcode);
}

#[test]
fn difficulty_becomes_prevrandao_at_the_merge() {
    let mut env = Env::default();
    env.block.difficulty = u(12_345);
    env.block.prevrandao = B256([0xAB; 32]);
    let code = vec![0x44, 0x00];
    let outcome = Frame::new(SpecId::LONDON, code.clone()).env(env.clone()).run();
    assert_eq!(outcome.stack, vec![u(12_345)]);
    let outcome = Frame::new(SpecId::MERGE, code).env(env).run();
    assert_eq!(outcome.stack, vec![U256::from(B256([0xAB; 32]))]);
}

#[test]
fn chainid_is_istanbul_only() {
    let code = vec![0x46, 0x00];
    let outcome = Frame::new(SpecId::ISTANBUL, code.clone()).run();
    assert_eq!(outcome.stack, vec![U256::ONE]);
    let outcome = Frame::new(SpecId::PETERSBURG, code).run();
    assert_eq!(outcome.result.status, ExecutionStatus::InvalidOpcode);
}

#[test]
fn exp_byte_pricing_changes_at_spurious_dragon() {
    // PUSH1 10; PUSH1 2; EXP; STOP - a one-byte exponent.
    let code = vec![0x60, 0x0A, 0x60, 0x02, 0x0A, 0x00];
    let outcome = Frame::new(SpecId::HOMESTEAD, code.clone()).run();
    assert_eq!(outcome.result.gas_used, 6 + 10 + 10);
    assert_eq!(outcome.stack, vec![u(1_024)]);
    let outcome = Frame::new(SpecId::SPURIOUS_DRAGON, code).run();
    assert_eq!(outcome.result.gas_used, 6 + 10 + 50);
}

#[test]
fn memory_expansion_is_charged_once_per_size() {
    // PUSH1 1; PUSH1 0; MSTORE
    let once = vec![0x60, 0x01, 0x60, 0x00, 0x52, 0x00];
    // The same store twice.
    let twice = vec![0x60, 0x01, 0x60, 0x00, 0x52, 0x60, 0x01, 0x60, 0x00, 0x52, 0x00];
    let first = Frame::new(SpecId::BERLIN, once).run();
    let second = Frame::new(SpecId::BERLIN, twice).run();
    // The second store pays its pushes and base cost but no expansion.
    assert_eq!(second.result.gas_used - first.result.gas_used, 9);
}

#[test]
fn jump_to_a_real_jumpdest() {
    // PUSH1 4; JUMP; INVALID; JUMPDEST; STOP
    let code = vec![0x60, 0x04, 0x56, 0xFE, 0x5B, 0x00];
    let outcome = Frame::new(SpecId::BERLIN, code).gas_limit(100).run();
    assert_eq!(outcome.result.status, ExecutionStatus::Success);
    assert_eq!(outcome.result.gas_used, 3 + 8 + 1);
}

#[test]
fn jumpi_falls_through_on_zero() {
    // PUSH1 0 (cond); PUSH1 6 (target); JUMPI; PUSH1 1; STOP
    // The zero condition falls through without validating the target.
    let code = vec![0x60, 0x00, 0x60, 0x06, 0x57, 0x60, 0x01, 0x00];
    let outcome = Frame::new(SpecId::BERLIN, code).run();
    assert_eq!(outcome.result.status, ExecutionStatus::Success);
    assert_eq!(outcome.stack, vec![U256::ONE]);
}

#[test]
fn jump_to_arbitrary_byte_is_invalid() {
    // PUSH1 3; JUMP; STOP - index 3 is STOP, not JUMPDEST.
    let outcome = Frame::new(SpecId::BERLIN, vec![0x60, 0x03, 0x56, 0x00]).run();
    assert_eq!(outcome.result.status, ExecutionStatus::InvalidJump);
}

#[test]
fn returndatacopy_past_the_buffer_fails() {
    // No call was made, so the buffer is empty.
    // PUSH1 1 (len); PUSH1 0 (offset); PUSH1 0 (dest); RETURNDATACOPY
    let code = vec![0x60, 0x01, 0x60, 0x00, 0x60, 0x00, 0x3E];
    let outcome = Frame::new(SpecId::BERLIN, code).run();
    assert_eq!(outcome.result.status, ExecutionStatus::InvalidOpcode);
}

#[test]
fn keccak256_of_empty_memory() {
    // PUSH1 0; PUSH1 0; KECCAK256; STOP
    let code = vec![0x60, 0x00, 0x60, 0x00, 0x20, 0x00];
    let outcome = Frame::new(SpecId::BERLIN, code).run();
    assert_eq!(outcome.result.gas_used, 6 + 30);
    assert_eq!(outcome.stack, vec![U256::from(keccak256([]))]);
}

#[test]
fn gas_opcode_reports_remaining() {
    let outcome = Frame::new(SpecId::BERLIN, vec![0x5A, 0x00]).gas_limit(100).run();
    assert_eq!(outcome.stack, vec![u(98)]);
}

#[test]
fn blockhash_goes_through_the_host() {
    let hash = B256([0x77; 32]);
    let host = MockHost::new().with_block_hash(41, hash);
    // PUSH1 41; BLOCKHASH; PUSH1 42; BLOCKHASH; STOP
    let code = vec![0x60, 41, 0x40, 0x60, 42, 0x40, 0x00];
    let outcome = Frame::new(SpecId::BERLIN, code).host(host).run();
    assert_eq!(outcome.stack, vec![U256::from(hash), U256::ZERO]);
}

#[test]
fn selfdestruct_halts_and_reports() {
    // PUSH1 0xBB; SELFDESTRUCT; INVALID (never reached)
    let code = vec![0x60, 0xBB, 0xFF, 0xFE];
    let outcome = Frame::new(SpecId::BERLIN, code.clone()).run();
    assert_eq!(outcome.result.status, ExecutionStatus::Success);
    // Push, base 5000, cold beneficiary 2600; pre-London refund.
    assert_eq!(outcome.result.gas_used, 3 + 5_000 + 2_600);
    assert_eq!(outcome.refunded, 24_000);
    assert_eq!(outcome.host.destroyed(), &[(CONTRACT, crate::primitives::Address::from_word(u(0xBB)))]);

    let outcome = Frame::new(SpecId::LONDON, code).run();
    assert_eq!(outcome.refunded, 0);
}

#[test]
fn balance_cold_warm_pricing() {
    // BALANCE twice on the same address: cold then warm.
    // PUSH1 0xEE; BALANCE; POP; PUSH1 0xEE; BALANCE; STOP
    let code = vec![0x60, 0xEE, 0x31, 0x50, 0x60, 0xEE, 0x31, 0x00];
    let outcome = Frame::new(SpecId::BERLIN, code.clone()).run();
    assert_eq!(outcome.result.gas_used, 6 + 2 + 2_600 + 100);
    // Pre-Berlin the touch is flat.
    let outcome = Frame::new(SpecId::ISTANBUL, code).run();
    assert_eq!(outcome.result.gas_used, 6 + 2 + 700 + 700);
}

#[test]
fn logs_reach_the_sink_with_topics() {
    // PUSH1 7; PUSH1 0; MSTORE; then LOG2 over memory [31, 1) with two
    // topics: PUSH1 0xAA (t2); PUSH1 0xBB (t1); PUSH1 1 (len);
    // PUSH1 31 (offset); LOG2
    let code = vec![
        0x60, 0x07, 0x60, 0x00, 0x52, 0x60, 0xAA, 0x60, 0xBB, 0x60, 0x01, 0x60, 0x1F, 0xA2,
        0x00,
    ];
    let outcome = Frame::new(SpecId::BERLIN, code).run();
    assert_eq!(outcome.result.status, ExecutionStatus::Success);
    let logs = outcome.host.logs();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].address, CONTRACT);
    assert_eq!(logs[0].topics, vec![B256::from(u(0xBB)), B256::from(u(0xAA))]);
    assert_eq!(logs[0].data, vec![0x07]);
    // Base 375, two topics at 375, one data byte at 8, 6 pushes, the
    // MSTORE and its expansion.
    assert_eq!(outcome.result.gas_used, 18 + 3 + 3 + 375 + 2 * 375 + 8);
}
