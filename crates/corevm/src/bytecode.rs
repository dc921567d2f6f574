use crate::{
    constants::{DELEGATION_CODE_LEN, DELEGATION_PREFIX},
    opcode,
    primitives::Address,
};

/// Bitset over code byte indices marking valid JUMPDEST positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpTable {
    bits: Box<[u64]>,
    len: usize,
}

impl JumpTable {
    fn with_len(len: usize) -> Self {
        Self { bits: vec![0u64; len.div_ceil(64)].into_boxed_slice(), len }
    }

    fn mark(&mut self, index: usize) {
        self.bits[index / 64] |= 1 << (index % 64);
    }

    /// Whether `index` is a valid jump destination.
    pub fn is_valid(&self, index: usize) -> bool {
        index < self.len && self.bits[index / 64] >> (index % 64) & 1 == 1
    }
}

/// Bytecode that has been scanned for jump destinations.
///
/// An index is a valid destination iff the byte there is JUMPDEST and it
/// is not inside a PUSH immediate window.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Deref)]
pub struct AnalyzedBytecode {
    #[deref]
    raw: Vec<u8>,
    jump_table: JumpTable,
}

impl AnalyzedBytecode {
    /// Scans `raw` in one pass, skipping PUSH immediates (clamped at the
    /// end of code) and marking every reachable JUMPDEST byte.
    pub fn analyze(raw: Vec<u8>) -> Self {
        let mut jump_table = JumpTable::with_len(raw.len());
        let mut i = 0;
        while i < raw.len() {
            let op = raw[i];
            if op == opcode::JUMPDEST {
                jump_table.mark(i);
            }
            i += 1 + opcode::immediate_len(op);
        }
        Self { raw, jump_table }
    }

    /// Empty bytecode (nonexistent accounts, plain transfers).
    pub fn empty() -> Self {
        Self::analyze(Vec::new())
    }

    /// The raw bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Code length in bytes.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Whether the code is empty.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Whether `index` is a valid jump destination.
    pub fn is_valid_jump(&self, index: usize) -> bool {
        self.jump_table.is_valid(index)
    }
}

/// Classified account code: executable bytecode, or an EIP-7702
/// delegation designator that must be resolved before execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bytecode {
    /// Directly executable, analyzed bytecode.
    Legacy(AnalyzedBytecode),
    /// A delegation designator; execution must load the delegate's code
    /// while keeping the designator account's storage. Never becomes a
    /// call frame by itself.
    Delegation(Address),
}

impl Bytecode {
    /// Analyzes `raw`, detecting delegation designators when the fork
    /// supports them.
    pub fn analyze(raw: Vec<u8>, allow_delegation: bool) -> Self {
        if allow_delegation
            && raw.len() == DELEGATION_CODE_LEN
            && raw[..3] == DELEGATION_PREFIX
        {
            let mut target = [0u8; 20];
            target.copy_from_slice(&raw[3..]);
            return Self::Delegation(Address(target));
        }
        Self::Legacy(AnalyzedBytecode::analyze(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_plain_jumpdests() {
        // JUMPDEST; STOP; JUMPDEST
        let code = AnalyzedBytecode::analyze(vec![0x5B, 0x00, 0x5B]);
        assert!(code.is_valid_jump(0));
        assert!(!code.is_valid_jump(1));
        assert!(code.is_valid_jump(2));
        assert!(!code.is_valid_jump(3));
    }

    #[test]
    fn jumpdest_inside_push_immediate_is_invalid() {
        // PUSH1 0x5B; JUMPDEST
        let code = AnalyzedBytecode::analyze(vec![0x60, 0x5B, 0x5B]);
        assert!(!code.is_valid_jump(1));
        assert!(code.is_valid_jump(2));
    }

    #[test]
    fn truncated_push_immediate_is_clamped() {
        // PUSH32 with only two immediate bytes present.
        let code = AnalyzedBytecode::analyze(vec![0x7F, 0x5B, 0x5B]);
        assert!(!code.is_valid_jump(1));
        assert!(!code.is_valid_jump(2));
    }

    #[test]
    fn delegation_designator_is_detected() {
        let mut raw = DELEGATION_PREFIX.to_vec();
        raw.extend([0xAA; 20]);
        match Bytecode::analyze(raw.clone(), true) {
            Bytecode::Delegation(target) => assert_eq!(target, Address([0xAA; 20])),
            Bytecode::Legacy(_) => panic!("expected delegation designator"),
        }
        // The same bytes are plain code when the fork predates delegation.
        assert!(matches!(Bytecode::analyze(raw, false), Bytecode::Legacy(_)));
        // Wrong length is plain code.
        let mut short = DELEGATION_PREFIX.to_vec();
        short.extend([0xAA; 19]);
        assert!(matches!(Bytecode::analyze(short, true), Bytecode::Legacy(_)));
    }
}
