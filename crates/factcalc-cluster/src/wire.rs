//! Serialization of partial products for cross-node transport.
//!
//! The wire format mirrors a GMP export with word order −1: the magnitude as
//! fixed-width unsigned words, least-significant word first, plus the word
//! count. Sign is not transmitted; factorial sections are never negative.

use num_bigint::{BigInt, BigUint, Sign};

/// Flat wire representation of a partial product's magnitude.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferBuffer {
    words: Vec<u64>,
}

impl TransferBuffer {
    /// Wrap words received from a peer.
    #[must_use]
    pub fn from_words(words: Vec<u64>) -> Self {
        Self { words }
    }

    /// Number of words in the buffer.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// The raw words, least-significant first.
    #[must_use]
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Consume the buffer, yielding its words.
    #[must_use]
    pub fn into_words(self) -> Vec<u64> {
        self.words
    }
}

/// Encode a non-negative partial product as transfer words.
#[must_use]
pub fn encode(value: &BigInt) -> TransferBuffer {
    debug_assert_ne!(
        value.sign(),
        Sign::Minus,
        "section products are non-negative"
    );
    TransferBuffer {
        words: value.magnitude().to_u64_digits(),
    }
}

/// Decode transfer words back into the original magnitude.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn decode(buffer: &TransferBuffer) -> BigInt {
    let mut digits = Vec::with_capacity(buffer.words.len() * 2);
    for word in &buffer.words {
        digits.push(*word as u32);
        digits.push((word >> 32) as u32);
    }
    BigInt::from(BigUint::from_slice(&digits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;
    use proptest::prelude::*;

    #[test]
    fn encode_zero_is_empty() {
        let buf = encode(&BigInt::ZERO);
        assert_eq!(buf.word_count(), 0);
        assert_eq!(decode(&buf), BigInt::ZERO);
    }

    #[test]
    fn encode_one_word() {
        let buf = encode(&BigInt::from(42u64));
        assert_eq!(buf.word_count(), 1);
        assert_eq!(buf.words(), &[42]);
    }

    #[test]
    fn least_significant_word_first() {
        // 2^64 + 7 = words [7, 1]
        let value = (BigInt::one() << 64u32) + 7;
        let buf = encode(&value);
        assert_eq!(buf.words(), &[7, 1]);
        assert_eq!(decode(&buf), value);
    }

    #[test]
    fn roundtrip_factorial() {
        let value = factcalc_core::factorial(100);
        let buf = encode(&value);
        assert!(buf.word_count() > 1);
        assert_eq!(decode(&buf), value);
    }

    #[test]
    fn word_boundary_values() {
        for value in [
            BigInt::from(u64::MAX),
            BigInt::from(u64::MAX) + 1,
            (BigInt::one() << 128u32) - 1,
            BigInt::one() << 128u32,
        ] {
            let buf = encode(&value);
            assert_eq!(decode(&buf), value, "value={value}");
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(30))]

        /// decode(encode(x)) == x bit-for-bit for random multi-word
        /// magnitudes.
        #[test]
        fn roundtrip_random_magnitudes(bytes in proptest::collection::vec(any::<u8>(), 0..200)) {
            let value = BigInt::from(BigUint::from_bytes_le(&bytes));
            let buf = encode(&value);
            prop_assert_eq!(decode(&buf), value);
        }
    }
}
