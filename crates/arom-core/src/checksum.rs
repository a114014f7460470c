//! End-around-carry checksum over 32 bit words.
//!
//! The Amiga boot ROM checksum is additive with a one's-complement modulus:
//! whenever the running sum reaches 2^32 it is reduced by 2^32 - 1. A valid
//! image sums to `CHECKSUM_TARGET` across all of its words.

/// The sum of every word in a valid image.
pub const CHECKSUM_TARGET: u32 = 0xFFFF_FFFF;

const CARRY_MODULUS: u64 = 1 << 32;

/// Running checksum state.
///
/// The carry is folded back after every single addition, not once at the
/// end. One fold per addition suffices: each word is below 2^32 and the
/// accumulator is kept below 2^32 between additions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Checksum {
    sum: u64,
}

impl Checksum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, word: u32) {
        self.sum += u64::from(word);
        if self.sum >= CARRY_MODULUS {
            self.sum -= CARRY_MODULUS - 1;
        }
    }

    pub fn value(&self) -> u32 {
        self.sum as u32
    }
}

/// Folds a word slice through the accumulator.
pub fn sum_words(words: &[u32]) -> u32 {
    let mut sum = Checksum::new();
    for &word in words {
        sum.add(word);
    }
    sum.value()
}

/// The value that, added anywhere into the image, makes it sum to
/// `CHECKSUM_TARGET`. Zero means the image is already valid.
pub fn correction(sum: u32) -> u32 {
    CHECKSUM_TARGET - sum
}

/// Adds a correction into a stored word, folding the carry back in.
pub fn add_carry(word: u32, err: u32) -> u32 {
    let mut sum = u64::from(word) + u64::from(err);
    if sum >= CARRY_MODULUS {
        sum -= CARRY_MODULUS - 1;
    }
    sum as u32
}
