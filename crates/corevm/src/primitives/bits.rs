use core::fmt;

use sha3::{Digest, Keccak256};

use crate::primitives::U256;

/// A 20-byte account address.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    PartialOrd,
    Ord,
    derive_more::Deref,
    derive_more::From,
)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The zero address.
    pub const ZERO: Self = Self([0; 20]);

    /// Number of bytes in an address.
    pub const fn len_bytes() -> usize {
        20
    }

    /// The address as a byte slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// The low 20 bytes of a 256-bit word, as an address.
    pub fn from_word(word: U256) -> Self {
        let bytes = word.to_be_bytes();
        let mut out = [0u8; 20];
        out.copy_from_slice(&bytes[12..]);
        Self(out)
    }

    /// The address zero-extended into a 256-bit word.
    pub fn into_word(self) -> U256 {
        U256::from_be_slice(&self.0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A 32-byte word, used for hashes, log topics and storage keys.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    PartialOrd,
    Ord,
    derive_more::Deref,
    derive_more::From,
)]
pub struct B256(pub [u8; 32]);

impl B256 {
    /// The zero word.
    pub const ZERO: Self = Self([0; 32]);

    /// Number of bytes in the word.
    pub const fn len_bytes() -> usize {
        32
    }

    /// The word as a byte slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Whether every byte is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == [0; 32]
    }
}

impl From<U256> for B256 {
    fn from(value: U256) -> Self {
        Self(value.to_be_bytes())
    }
}

impl From<B256> for U256 {
    fn from(value: B256) -> Self {
        Self::from_be_bytes(value.0)
    }
}

impl fmt::Debug for B256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Display for B256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// KECCAK-256 of `data`.
pub fn keccak256(data: impl AsRef<[u8]>) -> B256 {
    let mut hasher = Keccak256::new();
    hasher.update(data.as_ref());
    B256(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_word_round_trip() {
        let addr = Address([0xAB; 20]);
        assert_eq!(Address::from_word(addr.into_word()), addr);
        // High 12 bytes of the word are dropped.
        let word = U256::MAX;
        assert_eq!(Address::from_word(word), Address([0xFF; 20]));
    }

    #[test]
    fn keccak_empty_input() {
        // keccak256("") is the well-known empty hash.
        let hash = keccak256([]);
        assert_eq!(
            hex::encode(hash.as_slice()),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn b256_word_round_trip() {
        let word = U256::from_limbs([1, 2, 3, 4]);
        assert_eq!(U256::from(B256::from(word)), word);
    }
}
