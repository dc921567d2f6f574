use auto_impl::auto_impl;

use crate::{
    access_list::AccessList,
    env::Env,
    instructions::InstructionTable,
    primitives::{Address, B256, U256},
    result::ExecutionStatus,
    spec::Spec,
};

/// Result of a storage write as reported by the host.
///
/// `original_value` is the slot value at transaction start;
/// `current_value` is the value the slot held immediately before this
/// write. The write itself has already happened when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SStoreResult {
    /// Slot value at the start of the transaction.
    pub original_value: U256,
    /// Slot value just before this SSTORE.
    pub current_value: U256,
}

/// The sole boundary between the interpreter and persistent state.
///
/// Implementations own snapshot/revert semantics: storage gas is charged
/// after the write on the assumption that a failing frame is rolled back
/// wholesale through [`snapshot`](Self::snapshot) /
/// [`revert_to`](Self::revert_to).
#[auto_impl(&mut, Box)]
pub trait Host: core::fmt::Debug {
    /// Balance of `address`; zero for nonexistent accounts.
    fn balance(&mut self, address: Address) -> U256;

    /// Code of `address`; empty for EOAs and nonexistent accounts.
    fn code(&mut self, address: Address) -> Vec<u8>;

    /// Code hash of `address`; zero for nonexistent or empty accounts.
    fn code_hash(&mut self, address: Address) -> B256;

    /// Code size of `address`.
    fn code_size(&mut self, address: Address) -> usize;

    /// Whether `address` exists (EIP-161: has nonce, balance or code).
    fn account_exists(&mut self, address: Address) -> bool;

    /// Hash of block `number`; zero outside the servable window.
    fn block_hash(&mut self, number: u64) -> B256;

    /// Reads a storage slot.
    fn sload(&mut self, address: Address, key: U256) -> U256;

    /// Writes a storage slot and reports the original and prior values.
    fn sstore(&mut self, address: Address, key: U256, value: U256) -> SStoreResult;

    /// Reads a transient storage slot (EIP-1153).
    fn tload(&mut self, address: Address, key: U256) -> U256;

    /// Writes a transient storage slot (EIP-1153). The host clears all
    /// transient storage at the end of the transaction.
    fn tstore(&mut self, address: Address, key: U256, value: U256);

    /// Emits a log record.
    fn log(&mut self, address: Address, topics: &[B256], data: &[u8]);

    /// Marks `address` for destruction with `beneficiary` receiving its
    /// balance. Whether destruction actually happens (EIP-6780) is host
    /// policy.
    fn selfdestruct(&mut self, address: Address, beneficiary: Address);

    /// Takes a state snapshot and returns its id.
    fn snapshot(&mut self) -> u64;

    /// Rolls state back to a snapshot taken with
    /// [`snapshot`](Self::snapshot).
    fn revert_to(&mut self, snapshot: u64);
}

/// The kind of frame a call-family opcode requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// Plain CALL.
    Call,
    /// CALLCODE: callee code, caller storage, caller as target.
    CallCode,
    /// DELEGATECALL: callee code, caller storage, caller's caller and
    /// value preserved.
    DelegateCall,
    /// STATICCALL: plain call with state writes forbidden.
    StaticCall,
    /// CREATE.
    Create,
    /// CREATE2 with its salt.
    Create2 {
        /// The address-derivation salt.
        salt: U256,
    },
}

impl CallKind {
    /// Whether this is CREATE or CREATE2.
    pub const fn is_create(&self) -> bool {
        matches!(self, Self::Create | Self::Create2 { .. })
    }
}

/// A fully metered frame request, assembled by a call-family handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallInputs {
    /// Requested frame kind.
    pub kind: CallKind,
    /// Address the frame executes as (where storage applies). Unused for
    /// creates.
    pub target: Address,
    /// Address the bytecode is loaded from. Differs from `target` for
    /// DELEGATECALL and CALLCODE.
    pub bytecode_address: Address,
    /// Caller visible to the frame.
    pub caller: Address,
    /// Value visible to the frame.
    pub value: U256,
    /// Input data (initcode for creates).
    pub input: Vec<u8>,
    /// Gas available to the frame, stipend included.
    pub gas_limit: u64,
    /// Whether the frame is static.
    pub is_static: bool,
    /// Whether `value` actually moves between accounts.
    pub transfer_value: bool,
}

/// Outcome of a nested frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallResult {
    /// Terminal status of the frame.
    pub status: ExecutionStatus,
    /// Gas the frame consumed out of its limit.
    pub gas_used: u64,
    /// Refund counter accrued by the frame (uncapped; the cap applies
    /// once at transaction end).
    pub gas_refund: u64,
    /// Frame output. For successful creates this is the 20-byte created
    /// address.
    pub output: Vec<u8>,
}

impl CallResult {
    /// A frame failure that consumed `gas_used` and produced no output.
    pub fn failure(status: ExecutionStatus, gas_used: u64) -> Self {
        Self { status, gas_used, gas_refund: 0, output: Vec::new() }
    }
}

/// Everything a [`CallExecutor`] needs to build and run a child frame,
/// re-lent from the parent interpreter for the duration of the call.
#[derive(Debug)]
pub struct CallScope<'a> {
    /// Host state access.
    pub host: &'a mut dyn Host,
    /// The transaction-wide warm/cold list.
    pub access_list: &'a mut AccessList,
    /// Fork rule table.
    pub spec: &'a Spec,
    /// Environment snapshot.
    pub env: &'a Env,
    /// The fork's instruction table.
    pub table: &'a InstructionTable,
    /// Depth of the child frame (parent depth + 1).
    pub depth: u32,
}

/// Callback invoked by the CALL/DELEGATECALL/STATICCALL/CALLCODE/CREATE/
/// CREATE2 handlers to run a nested frame. The parent is blocked until
/// the child returns.
#[auto_impl(&mut, Box)]
pub trait CallExecutor: core::fmt::Debug {
    /// Runs the requested frame to completion.
    fn call(&mut self, scope: CallScope<'_>, inputs: CallInputs) -> CallResult;
}
