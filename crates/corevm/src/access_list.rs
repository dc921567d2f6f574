use std::collections::HashSet;

use crate::primitives::{Address, U256};

/// Per-transaction warm/cold tracking for accounts and storage slots
/// (EIP-2929).
///
/// One list exists per transaction and is shared by every nested frame.
/// A first touch is cold; the touch itself marks the key warm.
#[derive(Debug, Clone, Default)]
pub struct AccessList {
    addresses: HashSet<Address>,
    slots: HashSet<(Address, U256)>,
}

impl AccessList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Touches `address`, returning whether it was cold before this call.
    pub fn warm_account(&mut self, address: Address) -> bool {
        self.addresses.insert(address)
    }

    /// Touches `(address, key)`, returning whether the slot was cold
    /// before this call.
    pub fn warm_slot(&mut self, address: Address, key: U256) -> bool {
        self.slots.insert((address, key))
    }

    /// Whether `address` is already warm.
    pub fn is_account_warm(&self, address: Address) -> bool {
        self.addresses.contains(&address)
    }

    /// Whether the slot is already warm.
    pub fn is_slot_warm(&self, address: Address, key: U256) -> bool {
        self.slots.contains(&(address, key))
    }

    /// Drops all warm entries (start of a new transaction).
    pub fn clear(&mut self) {
        self.addresses.clear();
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_touch_is_cold() {
        let mut list = AccessList::new();
        let addr = Address([1; 20]);
        assert!(list.warm_account(addr));
        assert!(!list.warm_account(addr));
        assert!(list.is_account_warm(addr));

        let key = U256::from(7u64);
        assert!(list.warm_slot(addr, key));
        assert!(!list.warm_slot(addr, key));
        // A different key on the same account is still cold.
        assert!(list.warm_slot(addr, U256::from(8u64)));
    }

    #[test]
    fn clear_resets_warmth() {
        let mut list = AccessList::new();
        let addr = Address([1; 20]);
        list.warm_account(addr);
        list.clear();
        assert!(!list.is_account_warm(addr));
    }
}
