//! Deterministic Key Tree - hardened, path-indexed keys from a 64-byte seed.
//!
//! ## Derivation
//!
//! ```text
//! seed (64 bytes)
//!     │  HKDF-SHA512(ikm = seed, salt = "key derivation", info = "hardened HDKF")
//!     ▼
//! master key ─── [ low: salt | high: ikm ]            (2 × key_entropy_size)
//!     │  HKDF-SHA512(ikm = high, salt = low, info = "44")
//!     ▼
//! level 1    ─── [ low | high ]
//!     │  ... one step per path index ...
//!     ▼
//! level n    ─── [ low ] ──→ derived key            (high half discarded)
//! ```
//!
//! Each step consumes the full parent buffer, and only a low half ever leaves
//! the tree, so a derived key reveals nothing about its parent's chaining
//! material.

use crate::config::KeyTreeConfig;
use crate::error::{Error, Result};
use crate::path::Path;
use hkdf::Hkdf;
use sha2::Sha512;
use std::fmt;
use subtle::{Choice, ConstantTimeEq};
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Lower bound on derived key length, in bytes
pub const MIN_KEY_ENTROPY_SIZE: u16 = 32;

const MASTER_KEY_SALT: &[u8] = b"key derivation";
const MASTER_KEY_INFO: &[u8] = b"hardened HDKF";

/// Key material returned by `jump`. Zeroized on drop, compared in constant time.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey(Vec<u8>);

impl ConstantTimeEq for DerivedKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.as_slice().ct_eq(other.0.as_slice())
    }
}

impl PartialEq for DerivedKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for DerivedKey {}

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DerivedKey({} bytes)", self.0.len())
    }
}

/// Owns the master key; `jump` only reads it, so a tree can be shared
/// across threads as-is.
pub struct KeyTree {
    master_key: Option<Zeroizing<Vec<u8>>>,
    key_entropy_size: u16,
    max_level: u8,
}

impl KeyTree {
    /// Tree with 32-byte keys and paths up to 4 levels deep.
    pub fn new(seed: &[u8; 64]) -> Result<Self> {
        Self::with_config(seed, KeyTreeConfig::default())
    }

    pub fn with_config(seed: &[u8; 64], config: KeyTreeConfig) -> Result<Self> {
        if seed.iter().all(|&b| b == 0) {
            return Err(Error::EmptySeed);
        }
        if config.key_entropy_size < MIN_KEY_ENTROPY_SIZE {
            return Err(Error::InvalidKeyEntropySize(config.key_entropy_size));
        }
        if config.max_level < 1 {
            return Err(Error::InvalidMaxLevel(config.max_level));
        }

        let chain_len = 2 * usize::from(config.key_entropy_size);
        let master_key = hkdf_sha512(seed, MASTER_KEY_SALT, MASTER_KEY_INFO, chain_len)
            .map_err(|e| Error::KeyDerivation(format!("master key: {}", e)))?;

        debug!(
            key_entropy_size = config.key_entropy_size,
            max_level = config.max_level,
            "key tree initialized"
        );
        Ok(Self {
            master_key: Some(master_key),
            key_entropy_size: config.key_entropy_size,
            max_level: config.max_level,
        })
    }

    pub fn key_entropy_size(&self) -> u16 {
        self.key_entropy_size
    }

    pub fn max_level(&self) -> u8 {
        self.max_level
    }

    pub fn is_initialized(&self) -> bool {
        self.master_key.is_some()
    }

    /// Derive the key at `path`, one HKDF step per index.
    pub fn jump(&self, path: &[u32]) -> Result<DerivedKey> {
        let master_key = self.master_key.as_ref().ok_or(Error::UninitializedKey)?;

        if path.is_empty() || path.len() > usize::from(self.max_level) {
            return Err(Error::InvalidPathLength(path.len()));
        }

        let half = usize::from(self.key_entropy_size);
        let mut working = Zeroizing::new(master_key.to_vec());

        for index in path {
            let (salt, ikm) = working.split_at(half);
            working = hkdf_sha512(ikm, salt, index.to_string().as_bytes(), 2 * half)?;
        }

        debug!(depth = path.len(), "derived key");
        Ok(DerivedKey(working[..half].to_vec()))
    }

    pub fn jump_path(&self, path: &Path) -> Result<DerivedKey> {
        self.jump(path.components())
    }

    /// Zeroize the master key now. Later `jump` calls fail with `UninitializedKey`.
    pub fn wipe(&mut self) {
        self.master_key = None;
    }
}

impl fmt::Debug for KeyTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyTree")
            .field("initialized", &self.is_initialized())
            .field("key_entropy_size", &self.key_entropy_size)
            .field("max_level", &self.max_level)
            .finish()
    }
}

fn hkdf_sha512(ikm: &[u8], salt: &[u8], info: &[u8], len: usize) -> Result<Zeroizing<Vec<u8>>> {
    let hk = Hkdf::<Sha512>::new(Some(salt), ikm);
    let mut okm = Zeroizing::new(vec![0u8; len]);
    hk.expand(info, okm.as_mut_slice())
        .map_err(|e| Error::KeyDerivation(format!("{} bytes requested: {}", len, e)))?;
    Ok(okm)
}
