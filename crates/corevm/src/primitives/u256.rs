use core::{
    cmp::Ordering,
    fmt,
    ops::{BitAnd, BitOr, BitXor, Not},
};

/// A 256-bit unsigned integer stored as four little-endian 64-bit limbs.
///
/// All arithmetic wraps modulo 2^256. Division by zero follows the EVM
/// convention and yields zero instead of trapping. Signed operations
/// reinterpret the value as two's complement.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct U256([u64; 4]);

impl U256 {
    /// The value `0`.
    pub const ZERO: Self = Self([0; 4]);
    /// The value `1`.
    pub const ONE: Self = Self([1, 0, 0, 0]);
    /// The value `2^256 - 1`.
    pub const MAX: Self = Self([u64::MAX; 4]);

    /// Creates a value from little-endian limbs (limb 0 is least significant).
    pub const fn from_limbs(limbs: [u64; 4]) -> Self {
        Self(limbs)
    }

    /// Returns the little-endian limbs.
    pub const fn into_limbs(self) -> [u64; 4] {
        self.0
    }

    /// Whether the value is zero.
    pub const fn is_zero(&self) -> bool {
        self.0[0] == 0 && self.0[1] == 0 && self.0[2] == 0 && self.0[3] == 0
    }

    /// Whether the high bit is set under a two's complement reading.
    pub const fn is_negative(&self) -> bool {
        self.0[3] >> 63 == 1
    }

    /// Returns bit `index` (0 = least significant). Bits past 255 are zero.
    pub const fn bit(&self, index: usize) -> bool {
        if index >= 256 {
            return false;
        }
        self.0[index / 64] >> (index % 64) & 1 == 1
    }

    fn set_bit(&mut self, index: usize) {
        self.0[index / 64] |= 1 << (index % 64);
    }

    /// Number of leading zero bits.
    pub const fn leading_zeros(&self) -> u32 {
        let mut zeros = 0;
        let mut i = 4;
        while i > 0 {
            i -= 1;
            if self.0[i] != 0 {
                return zeros + self.0[i].leading_zeros();
            }
            zeros += 64;
        }
        zeros
    }

    /// Minimal number of bits needed to represent the value.
    pub const fn bit_len(&self) -> u32 {
        256 - self.leading_zeros()
    }

    /// Minimal number of bytes needed to represent the value.
    pub const fn byte_len(&self) -> u32 {
        self.bit_len().div_ceil(8)
    }

    /// Addition with a carry-out flag.
    pub const fn overflowing_add(self, rhs: Self) -> (Self, bool) {
        let mut limbs = [0u64; 4];
        let mut carry = false;
        let mut i = 0;
        while i < 4 {
            let (sum, c1) = self.0[i].overflowing_add(rhs.0[i]);
            let (sum, c2) = sum.overflowing_add(carry as u64);
            limbs[i] = sum;
            carry = c1 | c2;
            i += 1;
        }
        (Self(limbs), carry)
    }

    /// Wrapping addition modulo 2^256.
    pub const fn wrapping_add(self, rhs: Self) -> Self {
        self.overflowing_add(rhs).0
    }

    /// Subtraction with a borrow-out flag.
    pub const fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
        let mut limbs = [0u64; 4];
        let mut borrow = false;
        let mut i = 0;
        while i < 4 {
            let (diff, b1) = self.0[i].overflowing_sub(rhs.0[i]);
            let (diff, b2) = diff.overflowing_sub(borrow as u64);
            limbs[i] = diff;
            borrow = b1 | b2;
            i += 1;
        }
        (Self(limbs), borrow)
    }

    /// Wrapping subtraction modulo 2^256.
    pub const fn wrapping_sub(self, rhs: Self) -> Self {
        self.overflowing_sub(rhs).0
    }

    /// Two's complement negation.
    pub const fn wrapping_neg(self) -> Self {
        Self::ZERO.wrapping_sub(self)
    }

    /// Wrapping schoolbook multiplication, keeping the low 256 bits.
    pub fn wrapping_mul(self, rhs: Self) -> Self {
        let mut acc = [0u64; 4];
        for i in 0..4 {
            let mut carry = 0u64;
            for j in 0..4 - i {
                let t = self.0[i] as u128 * rhs.0[j] as u128
                    + acc[i + j] as u128
                    + carry as u128;
                acc[i + j] = t as u64;
                carry = (t >> 64) as u64;
            }
        }
        Self(acc)
    }

    /// Full 256x256 -> 512-bit product as eight little-endian limbs.
    fn full_mul(self, rhs: Self) -> [u64; 8] {
        let mut acc = [0u64; 8];
        for i in 0..4 {
            let mut carry = 0u64;
            for j in 0..4 {
                let t = self.0[i] as u128 * rhs.0[j] as u128
                    + acc[i + j] as u128
                    + carry as u128;
                acc[i + j] = t as u64;
                carry = (t >> 64) as u64;
            }
            acc[i + 4] = carry;
        }
        acc
    }

    /// Euclidean quotient and remainder. A zero divisor yields `(0, 0)`.
    pub fn div_rem(self, divisor: Self) -> (Self, Self) {
        if divisor.is_zero() {
            return (Self::ZERO, Self::ZERO);
        }
        if self < divisor {
            return (Self::ZERO, self);
        }
        // Restoring binary long division. The remainder stays below the
        // divisor, so the shifted value fits in 257 bits; the overflow bit
        // forces a subtraction because 2^256 > divisor.
        let mut quotient = Self::ZERO;
        let mut rem = Self::ZERO;
        let mut i = self.bit_len() as usize;
        while i > 0 {
            i -= 1;
            let overflow = rem.bit(255);
            rem = rem.shl(1);
            if self.bit(i) {
                rem.0[0] |= 1;
            }
            if overflow || rem >= divisor {
                rem = rem.wrapping_sub(divisor);
                quotient.set_bit(i);
            }
        }
        (quotient, rem)
    }

    /// Unsigned division; zero divisor yields zero.
    pub fn div(self, rhs: Self) -> Self {
        self.div_rem(rhs).0
    }

    /// Unsigned remainder; zero divisor yields zero.
    pub fn rem(self, rhs: Self) -> Self {
        self.div_rem(rhs).1
    }

    /// Two's complement absolute value (the identity for `2^255`).
    const fn twos_abs(self) -> Self {
        if self.is_negative() {
            self.wrapping_neg()
        } else {
            self
        }
    }

    /// Signed division. Zero divisor yields zero; `MIN / -1` wraps to `MIN`.
    pub fn sdiv(self, rhs: Self) -> Self {
        if rhs.is_zero() {
            return Self::ZERO;
        }
        let quotient = self.twos_abs().div_rem(rhs.twos_abs()).0;
        if self.is_negative() != rhs.is_negative() {
            quotient.wrapping_neg()
        } else {
            quotient
        }
    }

    /// Signed remainder; the sign follows the dividend.
    pub fn smod(self, rhs: Self) -> Self {
        if rhs.is_zero() {
            return Self::ZERO;
        }
        let rem = self.twos_abs().div_rem(rhs.twos_abs()).1;
        if self.is_negative() {
            rem.wrapping_neg()
        } else {
            rem
        }
    }

    /// `(self + rhs) % modulus` over a 257-bit intermediate; zero modulus
    /// yields zero.
    pub fn add_mod(self, rhs: Self, modulus: Self) -> Self {
        if modulus.is_zero() {
            return Self::ZERO;
        }
        let a = self.div_rem(modulus).1;
        let b = rhs.div_rem(modulus).1;
        let (sum, carry) = a.overflowing_add(b);
        if carry || sum >= modulus {
            sum.wrapping_sub(modulus)
        } else {
            sum
        }
    }

    /// `(self * rhs) % modulus` over a 512-bit intermediate; zero modulus
    /// yields zero.
    pub fn mul_mod(self, rhs: Self, modulus: Self) -> Self {
        if modulus.is_zero() {
            return Self::ZERO;
        }
        let wide = self.full_mul(rhs);
        let mut rem = Self::ZERO;
        let mut i = 512;
        while i > 0 {
            i -= 1;
            let overflow = rem.bit(255);
            rem = rem.shl(1);
            if wide[i / 64] >> (i % 64) & 1 == 1 {
                rem.0[0] |= 1;
            }
            if overflow || rem >= modulus {
                rem = rem.wrapping_sub(modulus);
            }
        }
        rem
    }

    /// Wrapping exponentiation by squaring.
    pub fn exp(self, exponent: Self) -> Self {
        let mut result = Self::ONE;
        let mut base = self;
        let bits = exponent.bit_len() as usize;
        for i in 0..bits {
            if exponent.bit(i) {
                result = result.wrapping_mul(base);
            }
            base = base.wrapping_mul(base);
        }
        result
    }

    /// Logical left shift; shifts of 256 or more yield zero.
    pub fn shl(self, shift: usize) -> Self {
        if shift >= 256 {
            return Self::ZERO;
        }
        let words = shift / 64;
        let bits = shift % 64;
        let mut out = [0u64; 4];
        for i in 0..4 - words {
            out[i + words] |= self.0[i] << bits;
            if bits != 0 && i + words + 1 < 4 {
                out[i + words + 1] |= self.0[i] >> (64 - bits);
            }
        }
        Self(out)
    }

    /// Logical right shift; shifts of 256 or more yield zero.
    pub fn shr(self, shift: usize) -> Self {
        if shift >= 256 {
            return Self::ZERO;
        }
        let words = shift / 64;
        let bits = shift % 64;
        let mut out = [0u64; 4];
        for i in words..4 {
            out[i - words] = self.0[i] >> bits;
            if bits != 0 && i + 1 < 4 {
                out[i - words] |= self.0[i + 1] << (64 - bits);
            }
        }
        Self(out)
    }

    /// Arithmetic right shift; shifts of 256 or more yield 0 or all-ones
    /// depending on the sign bit.
    pub fn sar(self, shift: usize) -> Self {
        if !self.is_negative() {
            return self.shr(shift);
        }
        if shift >= 256 {
            return Self::MAX;
        }
        self.shr(shift) | Self::MAX.shl(256 - shift)
    }

    /// Converts a shift operand into a machine shift amount, saturating at
    /// 256 (which every shift treats as "shifted out entirely").
    pub fn to_shift_amount(&self) -> usize {
        if self.0[1] != 0 || self.0[2] != 0 || self.0[3] != 0 || self.0[0] > 255 {
            256
        } else {
            self.0[0] as usize
        }
    }

    /// `SIGNEXTEND`: extends the sign bit of the byte at `byte_index`
    /// (0 = least significant) through the high bytes. Indices of 31 or
    /// more leave the value unchanged.
    pub fn sign_extend(byte_index: Self, value: Self) -> Self {
        if byte_index >= Self::from(31u64) {
            return value;
        }
        let sign_bit = byte_index.0[0] as usize * 8 + 7;
        let mask = Self::MAX.shl(sign_bit + 1);
        if value.bit(sign_bit) {
            value | mask
        } else {
            value & !mask
        }
    }

    /// `BYTE`: byte `index` of the value counted from the most significant
    /// end; indices of 32 or more yield zero.
    pub fn byte(index: Self, value: Self) -> Self {
        if index >= Self::from(32u64) {
            return Self::ZERO;
        }
        Self::from(value.to_be_bytes()[index.0[0] as usize] as u64)
    }

    /// Big-endian serialisation.
    pub fn to_be_bytes(self) -> [u8; 32] {
        let mut out = [0u8; 32];
        for i in 0..4 {
            out[32 - 8 * (i + 1)..32 - 8 * i].copy_from_slice(&self.0[i].to_be_bytes());
        }
        out
    }

    /// Big-endian deserialisation of exactly 32 bytes.
    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        let mut limbs = [0u64; 4];
        for (i, limb) in limbs.iter_mut().enumerate() {
            let mut word = [0u8; 8];
            word.copy_from_slice(&bytes[32 - 8 * (i + 1)..32 - 8 * i]);
            *limb = u64::from_be_bytes(word);
        }
        Self(limbs)
    }

    /// Big-endian deserialisation of up to 32 bytes, left-padded with
    /// zeroes. This is how PUSH immediates become words.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is longer than 32 bytes.
    pub fn from_be_slice(bytes: &[u8]) -> Self {
        assert!(bytes.len() <= 32, "slice does not fit a 256-bit value");
        let mut padded = [0u8; 32];
        padded[32 - bytes.len()..].copy_from_slice(bytes);
        Self::from_be_bytes(padded)
    }

    /// The value as `usize`, or `None` if it does not fit.
    pub fn try_to_usize(&self) -> Option<usize> {
        if self.0[1] != 0 || self.0[2] != 0 || self.0[3] != 0 {
            return None;
        }
        usize::try_from(self.0[0]).ok()
    }

    /// The value as `u64`, or `None` if it does not fit.
    pub fn try_to_u64(&self) -> Option<u64> {
        if self.0[1] != 0 || self.0[2] != 0 || self.0[3] != 0 {
            return None;
        }
        Some(self.0[0])
    }

    /// The value as `u64`, saturating at `u64::MAX`.
    pub fn to_u64_saturating(&self) -> u64 {
        self.try_to_u64().unwrap_or(u64::MAX)
    }
}

impl From<u64> for U256 {
    fn from(value: u64) -> Self {
        Self([value, 0, 0, 0])
    }
}

impl From<u128> for U256 {
    fn from(value: u128) -> Self {
        Self([value as u64, (value >> 64) as u64, 0, 0])
    }
}

impl From<usize> for U256 {
    fn from(value: usize) -> Self {
        Self::from(value as u64)
    }
}

impl From<bool> for U256 {
    fn from(value: bool) -> Self {
        if value {
            Self::ONE
        } else {
            Self::ZERO
        }
    }
}

impl Ord for U256 {
    fn cmp(&self, other: &Self) -> Ordering {
        for i in (0..4).rev() {
            match self.0[i].cmp(&other.0[i]) {
                Ordering::Equal => continue,
                ordering => return ordering,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for U256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl U256 {
    /// Signed (two's complement) less-than.
    pub fn slt(&self, rhs: &Self) -> bool {
        match (self.is_negative(), rhs.is_negative()) {
            (true, false) => true,
            (false, true) => false,
            _ => self < rhs,
        }
    }

    /// Signed (two's complement) greater-than.
    pub fn sgt(&self, rhs: &Self) -> bool {
        rhs.slt(self)
    }
}

impl BitAnd for U256 {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self([
            self.0[0] & rhs.0[0],
            self.0[1] & rhs.0[1],
            self.0[2] & rhs.0[2],
            self.0[3] & rhs.0[3],
        ])
    }
}

impl BitOr for U256 {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self([
            self.0[0] | rhs.0[0],
            self.0[1] | rhs.0[1],
            self.0[2] | rhs.0[2],
            self.0[3] | rhs.0[3],
        ])
    }
}

impl BitXor for U256 {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Self([
            self.0[0] ^ rhs.0[0],
            self.0[1] ^ rhs.0[1],
            self.0[2] ^ rhs.0[2],
            self.0[3] ^ rhs.0[3],
        ])
    }
}

impl Not for U256 {
    type Output = Self;

    fn not(self) -> Self {
        Self([!self.0[0], !self.0[1], !self.0[2], !self.0[3]])
    }
}

impl fmt::Debug for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:#x}")
    }
}

impl fmt::LowerHex for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        let mut seen_nonzero = false;
        for i in (0..4).rev() {
            if seen_nonzero {
                write!(f, "{:016x}", self.0[i])?;
            } else if self.0[i] != 0 || i == 0 {
                write!(f, "{:x}", self.0[i])?;
                seen_nonzero = true;
            }
        }
        Ok(())
    }
}

impl fmt::Display for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}
