//! Mnemonic codec: entropy ⇄ words with an embedded checksum, words → seed.
//!
//! ```text
//! entropy (16..32 bytes) ─┬─ SHA-256[0] ──→ checksum (bytes/4 bits)
//!                         │
//!                         └─ entropy ‖ checksum ──→ 11-bit chunks ──→ words
//!
//! words + passphrase ──→ PBKDF2-HMAC-SHA512 (2048, "mnemonic" ‖ passphrase) ──→ 64-byte seed
//! ```

mod bits;
mod dictionary;

pub use dictionary::{Dictionary, DICTIONARY_SIZE};

use crate::entropy::EntropyConfig;
use crate::error::{Error, Result};
use bits::{read_bits, write_bits};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

const WORD_BITS: usize = 11;
const PBKDF2_ROUNDS: u32 = 2048;
const SEED_SALT_PREFIX: &str = "mnemonic";

/// 64-byte seed stretched from a mnemonic. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; 64]);

impl Seed {
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; 64]> for Seed {
    fn from(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(..)")
    }
}

/// Converts between entropy, words and seeds against one shared dictionary.
#[derive(Debug, Clone)]
pub struct MnemonicCodec {
    dictionary: Arc<Dictionary>,
}

impl MnemonicCodec {
    pub fn new(dictionary: Arc<Dictionary>) -> Self {
        Self { dictionary }
    }

    /// Codec over the built-in English list.
    pub fn english() -> Self {
        Self::new(Arc::new(Dictionary::english()))
    }

    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dictionary
    }

    /// Encode entropy as words, checksum appended after the entropy bits.
    pub fn encode(&self, entropy: &[u8]) -> Result<Vec<String>> {
        let entropy_bits = entropy.len() * 8;
        let checksum_bits = entropy_bits / 32;
        let sentence_len = (entropy_bits + checksum_bits) / WORD_BITS;

        let config = EntropyConfig::for_word_count(sentence_len)
            .ok()
            .filter(|cfg| cfg.byte_length == entropy.len())
            .ok_or(Error::InvalidEntropyLength(entropy_bits))?;

        let mut packed = Zeroizing::new(vec![0u8; entropy.len() + 1]);
        packed[..entropy.len()].copy_from_slice(entropy);
        write_bits(
            &mut packed,
            entropy_bits,
            checksum_bits,
            u16::from(config.checksum(entropy)),
        );

        let words = (0..sentence_len)
            .map(|i| {
                let index = read_bits(&packed, i * WORD_BITS, WORD_BITS) as usize;
                self.dictionary
                    .word_at(index)
                    .map(str::to_owned)
                    .ok_or(Error::MissingWordIndex(index))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(words = sentence_len, "encoded mnemonic");
        Ok(words)
    }

    /// Recover the entropy behind `words`, verifying the embedded checksum.
    pub fn decode<S: AsRef<str>>(&self, words: &[S]) -> Result<Zeroizing<Vec<u8>>> {
        let config = EntropyConfig::for_word_count(words.len())?;
        let indices = self.resolve(words)?;

        let mut packed = Zeroizing::new(vec![0u8; config.byte_length + 1]);
        for (i, index) in indices.iter().enumerate() {
            write_bits(&mut packed, i * WORD_BITS, WORD_BITS, *index);
        }

        // Checksum bits are the low bits of the last word.
        let last = indices.last().copied().unwrap_or_default();
        let expected = last & u16::from(config.checksum_mask);
        let entropy = Zeroizing::new(packed[..config.byte_length].to_vec());

        if u16::from(config.checksum(&entropy)) != expected {
            return Err(Error::ChecksumMismatch);
        }

        debug!(words = words.len(), "decoded mnemonic");
        Ok(entropy)
    }

    /// True when `words` decode cleanly.
    pub fn validate<S: AsRef<str>>(&self, words: &[S]) -> Result<()> {
        self.decode(words).map(|_| ())
    }

    /// Stretch `words` and `passphrase` into a 64-byte seed.
    ///
    /// Word count and dictionary membership are checked; the checksum is not.
    pub fn derive_seed<S: AsRef<str>>(&self, words: &[S], passphrase: &str) -> Result<Seed> {
        EntropyConfig::for_word_count(words.len())?;
        self.resolve(words)?;

        let password = Zeroizing::new(
            words
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .join(" "),
        );
        let salt = Zeroizing::new(format!("{}{}", SEED_SALT_PREFIX, passphrase));

        let mut seed = Seed([0u8; 64]);
        pbkdf2_hmac::<Sha512>(password.as_bytes(), salt.as_bytes(), PBKDF2_ROUNDS, &mut seed.0);

        debug!(words = words.len(), "derived seed");
        Ok(seed)
    }

    fn resolve<S: AsRef<str>>(&self, words: &[S]) -> Result<Vec<u16>> {
        words
            .iter()
            .map(|w| {
                let word = w.as_ref();
                self.dictionary
                    .index_of(word)
                    .ok_or_else(|| Error::UnknownWord(word.to_owned()))
            })
            .collect()
    }
}

/// Split a phrase on whitespace.
pub fn split_phrase(phrase: &str) -> Vec<&str> {
    phrase.split_whitespace().collect()
}
