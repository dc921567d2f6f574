//! Gas accounting and the dynamic cost formulas.

use crate::{
    constants,
    primitives::U256,
    result::InstructionError,
    spec::{Features, Spec},
};

/// Per-frame gas state.
///
/// `used` never exceeds `limit` at any observable point: a charge that
/// would break the invariant fails with `OutOfGas` and leaves the counter
/// untouched. The incremental memory price lives here (not on the memory
/// buffer) so that frame-local memory resets cannot desynchronise the
/// accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gas {
    limit: u64,
    used: u64,
    refunded: i64,
    last_memory_cost: u64,
}

impl Gas {
    /// Creates a fresh counter for `limit` gas.
    pub const fn new(limit: u64) -> Self {
        Self { limit, used: 0, refunded: 0, last_memory_cost: 0 }
    }

    /// The frame's gas limit.
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Gas consumed so far.
    pub const fn used(&self) -> u64 {
        self.used
    }

    /// Gas still available.
    pub const fn remaining(&self) -> u64 {
        self.limit - self.used
    }

    /// Cumulative refund counter (may be negative mid-transaction).
    pub const fn refunded(&self) -> i64 {
        self.refunded
    }

    /// The memory cost charged so far, used for delta pricing.
    pub const fn last_memory_cost(&self) -> u64 {
        self.last_memory_cost
    }

    /// Charges `amount` gas.
    pub fn consume(&mut self, amount: u64) -> Result<(), InstructionError> {
        let total = self.used.checked_add(amount).ok_or(InstructionError::OutOfGas)?;
        if total > self.limit {
            return Err(InstructionError::OutOfGas);
        }
        self.used = total;
        Ok(())
    }

    /// Returns gas a subcall did not spend.
    pub fn erase_cost(&mut self, returned: u64) {
        self.used = self.used.saturating_sub(returned);
    }

    /// Marks the entire limit as spent (terminal out-of-gas).
    pub fn spend_all(&mut self) {
        self.used = self.limit;
    }

    /// Adjusts the refund counter; SSTORE applies negative deltas when a
    /// dirty slot is written back.
    pub fn adjust_refund(&mut self, delta: i64) {
        self.refunded += delta;
    }

    /// Folds a child frame's refund counter into this one.
    pub fn absorb_refund(&mut self, refund: u64) {
        self.refunded += refund as i64;
    }

    /// The expansion cost still to charge for growing memory to
    /// `new_byte_len`, as a delta against what was already paid.
    pub fn memory_expansion_cost(&self, new_byte_len: usize) -> Result<u64, InstructionError> {
        let cost = memory_gas(new_byte_len).ok_or(InstructionError::OutOfGas)?;
        Ok(cost.saturating_sub(self.last_memory_cost))
    }

    /// Records the memory cost for `byte_len`; the dispatch loop calls
    /// this after any handler that may have grown memory.
    pub fn update_memory_cost(&mut self, byte_len: usize) {
        if let Some(cost) = memory_gas(byte_len) {
            if cost > self.last_memory_cost {
                self.last_memory_cost = cost;
            }
        }
    }

    /// The refund granted at frame end, capped by the fork's quotient.
    pub fn final_refund(&self, max_refund_quotient: u64) -> u64 {
        let refunded = self.refunded.max(0) as u64;
        refunded.min(self.used / max_refund_quotient)
    }
}

/// Number of 32-byte words covering `byte_len` bytes.
pub const fn num_words(byte_len: usize) -> u64 {
    (byte_len as u64).div_ceil(constants::WORD_SIZE as u64)
}

/// Word-granular cost: `num_words(len) * multiple`.
pub fn cost_per_word(byte_len: usize, multiple: u64) -> Option<u64> {
    num_words(byte_len).checked_mul(multiple)
}

/// Total memory price for a buffer of `byte_len` bytes:
/// `words^2 / 512 + 3 * words`.
pub fn memory_gas(byte_len: usize) -> Option<u64> {
    let words = num_words(byte_len);
    words
        .checked_mul(words)
        .map(|quad| quad / constants::QUAD_COEFF_DIV)
        .and_then(|quad| quad.checked_add(words.checked_mul(constants::MEMORY)?))
}

/// Dynamic EXP cost: per-byte price on the minimal big-endian length of
/// the exponent.
pub fn exp_cost(spec: &Spec, exponent: &U256) -> Option<u64> {
    spec.exp_byte_gas.checked_mul(exponent.byte_len() as u64)
}

/// Dynamic cost of the copy family: three gas per copied word.
pub fn copy_cost(byte_len: usize) -> Option<u64> {
    cost_per_word(byte_len, constants::COPY)
}

/// Dynamic KECCAK256 cost: six gas per hashed word.
pub fn keccak256_word_cost(byte_len: usize) -> Option<u64> {
    cost_per_word(byte_len, constants::KECCAK256WORD)
}

/// Dynamic LOG cost: per-topic plus per-byte pricing (the 375 base is in
/// the instruction table).
pub fn log_cost(topics: u64, byte_len: usize) -> Option<u64> {
    constants::LOGTOPIC
        .checked_mul(topics)?
        .checked_add(constants::LOGDATA.checked_mul(byte_len as u64)?)
}

/// EIP-3860 initcode metering: two gas per word.
pub fn initcode_cost(byte_len: usize) -> Option<u64> {
    cost_per_word(byte_len, constants::INITCODE_WORD_COST)
}

/// Per-byte calldata pricing for intrinsic-gas computation: 4 per zero
/// byte, 68 (16 from Istanbul) per non-zero byte.
pub fn calldata_cost(spec: &Spec, data: &[u8]) -> u64 {
    let zero_bytes = data.iter().filter(|&&b| b == 0).count() as u64;
    let nonzero_bytes = data.len() as u64 - zero_bytes;
    zero_bytes * constants::TX_DATA_ZERO + nonzero_bytes * spec.nonzero_calldata_gas
}

/// Account-touch cost for BALANCE, EXTCODE* and the CALL family: flat
/// before the cold/warm split, 2600/100 after.
pub fn account_access_cost(spec: &Spec, is_cold: bool) -> u64 {
    if spec.cold_account_access_cost != 0 {
        if is_cold {
            spec.cold_account_access_cost
        } else {
            spec.warm_storage_read_cost
        }
    } else {
        spec.account_access_gas
    }
}

/// SLOAD cost: flat before the cold/warm split, 2100/100 after.
pub fn sload_cost(spec: &Spec, is_cold: bool) -> u64 {
    if spec.cold_sload_cost != 0 {
        if is_cold {
            spec.cold_sload_cost
        } else {
            spec.warm_storage_read_cost
        }
    } else {
        spec.sload_gas
    }
}

/// SSTORE cost keyed on the `(original, current, new)` triple the host
/// reports, plus the cold surcharge once per cold slot.
pub fn sstore_cost(spec: &Spec, original: U256, current: U256, new: U256, is_cold: bool) -> u64 {
    let mut gas = if !spec.has(Features::NET_METERED_SSTORE) {
        if current.is_zero() && !new.is_zero() {
            spec.sstore_set_gas
        } else {
            spec.sstore_reset_gas
        }
    } else if new == current {
        spec.sload_gas
    } else if original == current {
        if original.is_zero() {
            spec.sstore_set_gas
        } else {
            spec.sstore_reset_gas
        }
    } else {
        spec.sload_gas
    };
    if is_cold {
        gas += spec.cold_sload_cost;
    }
    gas
}

/// SSTORE refund delta. Net metering reconciles clear and restore
/// bonuses, which can make the delta negative for dirty writes.
pub fn sstore_refund(spec: &Spec, original: U256, current: U256, new: U256) -> i64 {
    let clears = spec.sstore_clears_schedule as i64;
    if !spec.has(Features::NET_METERED_SSTORE) {
        return if !current.is_zero() && new.is_zero() { clears } else { 0 };
    }
    if current == new {
        return 0;
    }
    let mut refund = 0i64;
    if original == current {
        if !original.is_zero() && new.is_zero() {
            refund += clears;
        }
    } else {
        if !original.is_zero() {
            if current.is_zero() {
                refund -= clears;
            }
            if new.is_zero() {
                refund += clears;
            }
        }
        if original == new {
            refund += if original.is_zero() {
                (spec.sstore_set_gas - spec.sload_gas) as i64
            } else {
                (spec.sstore_reset_gas - spec.sload_gas) as i64
            };
        }
    }
    refund
}
