use std::collections::HashMap;

use crate::{
    host::{Host, SStoreResult},
    primitives::{keccak256, Address, B256, U256},
};

/// One emitted log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Emitting address.
    pub address: Address,
    /// Log topics, most significant first.
    pub topics: Vec<B256>,
    /// Log payload.
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct MockAccount {
    balance: U256,
    code: Vec<u8>,
    storage: HashMap<U256, U256>,
}

/// An in-memory [`Host`] with journaling snapshots, for tests.
///
/// Original storage values are tracked lazily: the first write to a slot
/// records the pre-write value as the transaction-start value. Call
/// [`begin_transaction`](Self::begin_transaction) between transactions on
/// the same host.
#[derive(Debug, Clone, Default)]
pub struct MockHost {
    accounts: HashMap<Address, MockAccount>,
    originals: HashMap<(Address, U256), U256>,
    transient: HashMap<(Address, U256), U256>,
    block_hashes: HashMap<u64, B256>,
    logs: Vec<LogRecord>,
    destroyed: Vec<(Address, Address)>,
    snapshots: Vec<(HashMap<Address, MockAccount>, usize)>,
}

impl MockHost {
    /// Creates an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an account balance.
    pub fn with_balance(mut self, address: Address, balance: U256) -> Self {
        self.accounts.entry(address).or_default().balance = balance;
        self
    }

    /// Sets an account's code.
    pub fn with_code(mut self, address: Address, code: Vec<u8>) -> Self {
        self.accounts.entry(address).or_default().code = code;
        self
    }

    /// Sets a storage slot.
    pub fn with_storage(mut self, address: Address, key: U256, value: U256) -> Self {
        self.accounts.entry(address).or_default().storage.insert(key, value);
        self
    }

    /// Registers a block hash.
    pub fn with_block_hash(mut self, number: u64, hash: B256) -> Self {
        self.block_hashes.insert(number, hash);
        self
    }

    /// Clears per-transaction state: original-value tracking and
    /// transient storage.
    pub fn begin_transaction(&mut self) {
        self.originals.clear();
        self.transient.clear();
    }

    /// Reads a storage slot without touching original-value tracking.
    pub fn storage(&self, address: Address, key: U256) -> U256 {
        self.accounts
            .get(&address)
            .and_then(|account| account.storage.get(&key))
            .copied()
            .unwrap_or_default()
    }

    /// Reads a transient slot.
    pub fn transient_storage(&self, address: Address, key: U256) -> U256 {
        self.transient.get(&(address, key)).copied().unwrap_or_default()
    }

    /// All logs emitted so far.
    pub fn logs(&self) -> &[LogRecord] {
        &self.logs
    }

    /// All `(address, beneficiary)` destruction reports so far.
    pub fn destroyed(&self) -> &[(Address, Address)] {
        &self.destroyed
    }
}

impl Host for MockHost {
    fn balance(&mut self, address: Address) -> U256 {
        self.accounts.get(&address).map(|account| account.balance).unwrap_or_default()
    }

    fn code(&mut self, address: Address) -> Vec<u8> {
        self.accounts.get(&address).map(|account| account.code.clone()).unwrap_or_default()
    }

    fn code_hash(&mut self, address: Address) -> B256 {
        match self.accounts.get(&address) {
            Some(account) if !account.code.is_empty() => keccak256(&account.code),
            _ => B256::ZERO,
        }
    }

    fn code_size(&mut self, address: Address) -> usize {
        self.accounts.get(&address).map(|account| account.code.len()).unwrap_or_default()
    }

    fn account_exists(&mut self, address: Address) -> bool {
        self.accounts.contains_key(&address)
    }

    fn block_hash(&mut self, number: u64) -> B256 {
        self.block_hashes.get(&number).copied().unwrap_or_default()
    }

    fn sload(&mut self, address: Address, key: U256) -> U256 {
        self.storage(address, key)
    }

    fn sstore(&mut self, address: Address, key: U256, value: U256) -> SStoreResult {
        let account = self.accounts.entry(address).or_default();
        let current_value = account.storage.get(&key).copied().unwrap_or_default();
        let original_value =
            *self.originals.entry((address, key)).or_insert(current_value);
        account.storage.insert(key, value);
        SStoreResult { original_value, current_value }
    }

    fn tload(&mut self, address: Address, key: U256) -> U256 {
        self.transient_storage(address, key)
    }

    fn tstore(&mut self, address: Address, key: U256, value: U256) {
        self.transient.insert((address, key), value);
    }

    fn log(&mut self, address: Address, topics: &[B256], data: &[u8]) {
        self.logs.push(LogRecord { address, topics: topics.to_vec(), data: data.to_vec() });
    }

    fn selfdestruct(&mut self, address: Address, beneficiary: Address) {
        self.destroyed.push((address, beneficiary));
    }

    fn snapshot(&mut self) -> u64 {
        self.snapshots.push((self.accounts.clone(), self.logs.len()));
        self.snapshots.len() as u64 - 1
    }

    fn revert_to(&mut self, snapshot: u64) {
        let (accounts, log_count) = self.snapshots[snapshot as usize].clone();
        self.accounts = accounts;
        self.logs.truncate(log_count);
        self.snapshots.truncate(snapshot as usize);
    }
}
