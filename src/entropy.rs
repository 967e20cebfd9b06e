//! Entropy sizing per mnemonic length and secure generation.
//!
//! | Words | Entropy | Checksum bits | Mask | Shift |
//! |-------|---------|---------------|------|-------|
//! | 12    | 16      | 4             | 15   | 16    |
//! | 15    | 20      | 5             | 31   | 8     |
//! | 18    | 24      | 6             | 63   | 4     |
//! | 21    | 28      | 7             | 127  | 2     |
//! | 24    | 32      | 8             | 255  | 0     |

use crate::error::{Error, Result};
use rand::{rngs::OsRng, CryptoRng, RngCore};
use sha2::{Digest, Sha256};
use tracing::trace;
use zeroize::Zeroizing;

/// Static parameters for one supported mnemonic length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntropyConfig {
    /// Entropy length in bytes
    pub byte_length: usize,
    /// Mask over the last word index selecting its checksum bits
    pub checksum_mask: u8,
    /// Divisor aligning the first hash byte with the checksum width (0 = unshifted)
    pub checksum_shift: u8,
}

pub const MNEMONIC_12: EntropyConfig = EntropyConfig { byte_length: 16, checksum_mask: 15, checksum_shift: 16 };
pub const MNEMONIC_15: EntropyConfig = EntropyConfig { byte_length: 20, checksum_mask: 31, checksum_shift: 8 };
pub const MNEMONIC_18: EntropyConfig = EntropyConfig { byte_length: 24, checksum_mask: 63, checksum_shift: 4 };
pub const MNEMONIC_21: EntropyConfig = EntropyConfig { byte_length: 28, checksum_mask: 127, checksum_shift: 2 };
pub const MNEMONIC_24: EntropyConfig = EntropyConfig { byte_length: 32, checksum_mask: 255, checksum_shift: 0 };

pub const SUPPORTED_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

impl EntropyConfig {
    /// Look up the configuration for a mnemonic word count.
    pub fn for_word_count(words: usize) -> Result<Self> {
        match words {
            12 => Ok(MNEMONIC_12),
            15 => Ok(MNEMONIC_15),
            18 => Ok(MNEMONIC_18),
            21 => Ok(MNEMONIC_21),
            24 => Ok(MNEMONIC_24),
            _ => Err(Error::UnsupportedWordCount(words)),
        }
    }

    pub fn checksum_bits(&self) -> usize {
        self.byte_length / 4
    }

    /// Number of words a mnemonic of this size has.
    pub fn word_count(&self) -> usize {
        (self.byte_length * 8 + self.checksum_bits()) / 11
    }

    /// Checksum of `entropy`, aligned to the width of `checksum_mask`.
    ///
    /// The first SHA-256 byte is divided by `checksum_shift`; the 24-word size
    /// keeps the whole byte.
    pub fn checksum(&self, entropy: &[u8]) -> u8 {
        let first = Sha256::digest(entropy)[0];
        match self.checksum_shift {
            0 => first,
            shift => first / shift,
        }
    }
}

/// Fill `config.byte_length` bytes from the operating system RNG.
pub fn generate(config: EntropyConfig) -> Result<Zeroizing<Vec<u8>>> {
    generate_with(config, &mut OsRng)
}

/// Fill `config.byte_length` bytes from a caller-supplied secure RNG.
pub fn generate_with<R: RngCore + CryptoRng>(
    config: EntropyConfig,
    rng: &mut R,
) -> Result<Zeroizing<Vec<u8>>> {
    let mut entropy = Zeroizing::new(vec![0u8; config.byte_length]);
    rng.try_fill_bytes(entropy.as_mut_slice())
        .map_err(|e| Error::RandomSource(e.to_string()))?;
    trace!(bytes = config.byte_length, "generated entropy");
    Ok(entropy)
}

/// Fresh entropy sized for a mnemonic of `words` words.
pub fn generate_for_word_count(words: usize) -> Result<Zeroizing<Vec<u8>>> {
    generate(EntropyConfig::for_word_count(words)?)
}
