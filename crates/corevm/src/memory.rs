use crate::{constants::WORD_SIZE, primitives::U256, result::InstructionError};

/// Byte-addressable linear memory of a call frame.
///
/// The buffer grows in 32-byte words and new bytes are always zero. Growth
/// is charged by the gas layer before any operation mutates state; the
/// methods here only move bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// Creates an empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current logical size in bytes (always a multiple of 32).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether nothing has been written or reserved yet.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Grows the buffer so that `offset + size` bytes are addressable,
    /// rounded up to a whole word. A zero `size` never grows. Fails with
    /// `InvalidOffset` when the range does not fit a machine word.
    pub fn ensure(&mut self, offset: usize, size: usize) -> Result<(), InstructionError> {
        if size == 0 {
            return Ok(());
        }
        let end = offset.checked_add(size).ok_or(InstructionError::InvalidOffset)?;
        let target = end
            .checked_next_multiple_of(WORD_SIZE)
            .ok_or(InstructionError::InvalidOffset)?;
        if target > self.data.len() {
            self.data.resize(target, 0);
        }
        Ok(())
    }

    /// Reads the 32-byte big-endian word at `offset`.
    ///
    /// The caller must have reserved the range with [`ensure`](Self::ensure).
    pub fn load_word(&self, offset: usize) -> U256 {
        let mut word = [0u8; 32];
        word.copy_from_slice(&self.data[offset..offset + 32]);
        U256::from_be_bytes(word)
    }

    /// Writes `value` as a 32-byte big-endian word at `offset`.
    pub fn store_word(&mut self, offset: usize, value: U256) {
        self.data[offset..offset + 32].copy_from_slice(&value.to_be_bytes());
    }

    /// Writes the low byte of `value` at `offset`.
    pub fn store_byte(&mut self, offset: usize, value: U256) {
        self.data[offset] = value.to_be_bytes()[31];
    }

    /// The bytes at `[offset, offset + size)`.
    pub fn slice(&self, offset: usize, size: usize) -> &[u8] {
        &self.data[offset..offset + size]
    }

    /// Copies `data` to `offset` verbatim.
    pub fn set(&mut self, offset: usize, data: &[u8]) {
        self.data[offset..offset + data.len()].copy_from_slice(data);
    }

    /// Copies `len` bytes of `data` starting at `data_offset` into memory
    /// at `offset`, zero-filling the part of the range that lies past the
    /// end of `data`. This is the shared semantics of the *COPY opcodes.
    pub fn set_data(&mut self, offset: usize, data_offset: usize, len: usize, data: &[u8]) {
        if len == 0 {
            return;
        }
        let available = data.len().saturating_sub(data_offset.min(data.len()));
        let copy_len = len.min(available);
        if copy_len > 0 {
            self.data[offset..offset + copy_len]
                .copy_from_slice(&data[data_offset..data_offset + copy_len]);
        }
        self.data[offset + copy_len..offset + len].fill(0);
    }

    /// `MCOPY`: copies `len` bytes from `src` to `dst` within memory,
    /// handling overlap.
    pub fn copy(&mut self, dst: usize, src: usize, len: usize) {
        if len == 0 {
            return;
        }
        self.data.copy_within(src..src + len, dst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_in_words_and_zero_fills() {
        let mut memory = Memory::new();
        memory.ensure(0, 1).unwrap();
        assert_eq!(memory.len(), 32);
        memory.ensure(30, 3).unwrap();
        assert_eq!(memory.len(), 64);
        assert!(memory.slice(0, 64).iter().all(|&b| b == 0));
    }

    #[test]
    fn zero_size_never_grows() {
        let mut memory = Memory::new();
        memory.ensure(usize::MAX - 1, 0).unwrap();
        assert_eq!(memory.len(), 0);
    }

    #[test]
    fn overflowing_range_is_rejected() {
        let mut memory = Memory::new();
        assert_eq!(memory.ensure(usize::MAX, 2), Err(InstructionError::InvalidOffset));
    }

    #[test]
    fn word_round_trip() {
        let mut memory = Memory::new();
        memory.ensure(32, 32).unwrap();
        let value = U256::from(0xDEAD_BEEFu64);
        memory.store_word(32, value);
        assert_eq!(memory.load_word(32), value);
        // Big-endian layout: the low byte lands at the high offset.
        assert_eq!(memory.slice(63, 1), &[0xEF]);
    }

    #[test]
    fn store_byte_takes_low_byte() {
        let mut memory = Memory::new();
        memory.ensure(0, 1).unwrap();
        memory.store_byte(0, U256::from(0x1234u64));
        assert_eq!(memory.slice(0, 1), &[0x34]);
    }

    #[test]
    fn set_data_zero_pads_past_source() {
        let mut memory = Memory::new();
        memory.ensure(0, 32).unwrap();
        memory.set(0, &[0xFF; 32]);
        memory.set_data(0, 2, 8, &[1, 2, 3, 4]);
        assert_eq!(memory.slice(0, 8), &[3, 4, 0, 0, 0, 0, 0, 0]);
        // Source offset entirely past the data: all zeroes.
        memory.set_data(8, 10, 4, &[1, 2, 3, 4]);
        assert_eq!(memory.slice(8, 4), &[0, 0, 0, 0]);
    }

    #[test]
    fn copy_handles_overlap() {
        let mut memory = Memory::new();
        memory.ensure(0, 32).unwrap();
        memory.set(0, &[1, 2, 3, 4, 5, 6, 7, 8]);
        memory.copy(2, 0, 6);
        assert_eq!(memory.slice(0, 8), &[1, 2, 1, 2, 3, 4, 5, 6]);
    }
}
