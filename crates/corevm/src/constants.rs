//! Gas schedule and machine limit constants.
//!
//! Fork-varying values appear here once per revision; the [`Spec`]
//! record picks the applicable one at construction time.
//!
//! [`Spec`]: crate::Spec

/// Maximum number of stack slots per frame.
pub const STACK_LIMIT: usize = 1024;
/// Maximum call depth, inclusive.
pub const CALL_DEPTH_LIMIT: u32 = 1024;
/// EVM word size in bytes.
pub const WORD_SIZE: usize = 32;

/// Gas tier for STOP and arithmetic identities.
pub const ZERO: u64 = 0;
/// Gas tier for environment reads (ADDRESS, CALLER, PC, ...).
pub const BASE: u64 = 2;
/// Gas tier for the cheapest computation (ADD, PUSH, DUP, ...).
pub const VERYLOW: u64 = 3;
/// Gas tier for MUL, DIV and friends.
pub const LOW: u64 = 5;
/// Gas tier for ADDMOD, MULMOD and JUMP.
pub const MID: u64 = 8;
/// Gas tier for JUMPI and the EXP base.
pub const HIGH: u64 = 10;
/// Gas for marking a jump destination.
pub const JUMPDEST: u64 = 1;

/// Base gas for KECCAK256.
pub const KECCAK256: u64 = 30;
/// Per-word gas for KECCAK256 input.
pub const KECCAK256WORD: u64 = 6;
/// Per-word gas for the copy family.
pub const COPY: u64 = 3;
/// Linear coefficient of the memory expansion formula.
pub const MEMORY: u64 = 3;
/// Divisor of the quadratic memory expansion term.
pub const QUAD_COEFF_DIV: u64 = 512;

/// Base gas for LOG0-LOG4.
pub const LOG: u64 = 375;
/// Per-byte gas for log data.
pub const LOGDATA: u64 = 8;
/// Per-topic gas for logs.
pub const LOGTOPIC: u64 = 375;

/// Base gas for CREATE and CREATE2.
pub const CREATE: u64 = 32_000;
/// Gas charged for a value-bearing CALL.
pub const CALLVALUE: u64 = 9_000;
/// Gas charged when a value-bearing CALL targets a nonexistent account.
pub const NEWACCOUNT: u64 = 25_000;
/// Gas granted on top of the forwarded gas for a value-bearing CALL.
pub const CALL_STIPEND: u64 = 2_300;
/// Base gas for BLOCKHASH.
pub const BLOCKHASH: u64 = 20;
/// SELFDESTRUCT gas from the Tangerine Whistle repricing onwards.
pub const SELFDESTRUCT: u64 = 5_000;
/// SELFDESTRUCT refund before London removed it.
pub const SELFDESTRUCT_REFUND: u64 = 24_000;

/// Per-byte EXP exponent gas before Spurious Dragon.
pub const EXP_BYTE: u64 = 10;
/// Per-byte EXP exponent gas from Spurious Dragon (EIP-160).
pub const EXP_BYTE_EIP160: u64 = 50;

/// Flat SLOAD gas at Frontier.
pub const SLOAD: u64 = 50;
/// Flat SLOAD gas from Tangerine Whistle (EIP-150).
pub const SLOAD_EIP150: u64 = 200;
/// Flat SLOAD gas from Istanbul (EIP-1884), also the EIP-2200 no-op cost.
pub const SLOAD_EIP1884: u64 = 800;
/// Flat account-touch gas at Frontier (BALANCE, EXTCODE*, CALL family).
pub const ACCOUNT_ACCESS: u64 = 40;
/// Flat account-touch gas from Tangerine Whistle (EIP-150).
pub const ACCOUNT_ACCESS_EIP150: u64 = 700;

/// Cold storage-slot access surcharge (EIP-2929).
pub const COLD_SLOAD_COST: u64 = 2_100;
/// Cold account access cost (EIP-2929).
pub const COLD_ACCOUNT_ACCESS_COST: u64 = 2_600;
/// Warm storage/account read cost (EIP-2929), also TLOAD/TSTORE gas.
pub const WARM_STORAGE_READ_COST: u64 = 100;

/// SSTORE gas for a zero to non-zero transition.
pub const SSTORE_SET: u64 = 20_000;
/// SSTORE gas for other first transitions.
pub const SSTORE_RESET: u64 = 5_000;
/// Refund for clearing a slot, before London.
pub const SSTORE_CLEARS_SCHEDULE: u64 = 15_000;
/// Refund for clearing a slot from London (EIP-3529).
pub const SSTORE_CLEARS_SCHEDULE_EIP3529: u64 = 4_800;
/// Refund cap divisor before London.
pub const MAX_REFUND_QUOTIENT: u64 = 2;
/// Refund cap divisor from London (EIP-3529).
pub const MAX_REFUND_QUOTIENT_EIP3529: u64 = 5;

/// Per-byte gas for zero calldata bytes.
pub const TX_DATA_ZERO: u64 = 4;
/// Per-byte gas for non-zero calldata bytes, before Istanbul.
pub const TX_DATA_NON_ZERO: u64 = 68;
/// Per-byte gas for non-zero calldata bytes from Istanbul (EIP-2028).
pub const TX_DATA_NON_ZERO_EIP2028: u64 = 16;

/// Deployed code size cap from Spurious Dragon (EIP-170).
pub const MAX_CODE_SIZE: usize = 24_576;
/// Initcode size cap from Shanghai (EIP-3860).
pub const MAX_INITCODE_SIZE: usize = 2 * MAX_CODE_SIZE;
/// Per-word initcode gas from Shanghai (EIP-3860).
pub const INITCODE_WORD_COST: u64 = 2;

/// Blob schedule for Cancun (EIP-4844).
pub const TARGET_BLOBS_PER_BLOCK_CANCUN: u64 = 3;
/// Blob cap for Cancun (EIP-4844).
pub const MAX_BLOBS_PER_BLOCK_CANCUN: u64 = 6;
/// Blob schedule for Prague (EIP-7691).
pub const TARGET_BLOBS_PER_BLOCK_PRAGUE: u64 = 6;
/// Blob cap for Prague (EIP-7691).
pub const MAX_BLOBS_PER_BLOCK_PRAGUE: u64 = 9;

/// Byte length of an EIP-7702 delegation designator.
pub const DELEGATION_CODE_LEN: usize = 23;
/// Prefix of an EIP-7702 delegation designator.
pub const DELEGATION_PREFIX: [u8; 3] = [0xEF, 0x01, 0x00];
