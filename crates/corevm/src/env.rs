use crate::primitives::{Address, B256, U256};

/// Block-level environment snapshot, read-only during a call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockEnv {
    /// Number of the block being executed.
    pub number: u64,
    /// Timestamp of the block.
    pub timestamp: u64,
    /// Beneficiary of the block reward.
    pub coinbase: Address,
    /// Block gas limit.
    pub gas_limit: u64,
    /// Base fee per gas (EIP-1559), zero before London.
    pub basefee: U256,
    /// Proof-of-work difficulty, used by DIFFICULTY before the Merge.
    pub difficulty: U256,
    /// Randomness beacon output (EIP-4399), used by DIFFICULTY after the
    /// Merge.
    pub prevrandao: B256,
    /// Blob base fee (EIP-7516), zero before Cancun.
    pub blob_basefee: U256,
}

/// Transaction-level environment snapshot, read-only during a call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxEnv {
    /// Sender of the transaction (ORIGIN).
    pub origin: Address,
    /// Caller of the outermost frame.
    pub caller: Address,
    /// Value carried into the outermost frame.
    pub value: U256,
    /// Input data of the outermost frame.
    pub data: Vec<u8>,
    /// Effective gas price (GASPRICE).
    pub gas_price: U256,
    /// Versioned blob hashes (EIP-4844).
    pub blob_hashes: Vec<B256>,
}

/// The combined environment snapshot handed to the interpreter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Env {
    /// Block environment.
    pub block: BlockEnv,
    /// Transaction environment.
    pub tx: TxEnv,
}
