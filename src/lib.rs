//! Seedtree: mnemonic phrases → seeds → a hardened, path-indexed key tree.
//!
//! # Architecture
//!
//! ```text
//! entropy::generate ──→ MnemonicCodec::encode ──→ words (backed up by the user)
//!                                                   │
//!                    MnemonicCodec::decode / derive_seed(words, passphrase)
//!                                                   │
//!                                                   ▼
//!                                             Seed (64 bytes)
//!                                                   │
//!                                     KeyTree::new ─┴─→ jump([44, 0, 0, 1]) ──→ DerivedKey
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `entropy` | Sizing table per word count, secure entropy |
//! | `mnemonic` | Dictionary, checksum codec, PBKDF2 seed |
//! | `keytree` | HKDF master key and chained derivation |
//! | `path` | `x/a/b/c/d` path text form |
//! | `config` | Key tree parameters, `.env` loading |
//!
//! # Features
//!
//! - `cli` (default) - `seedtree` binary, log subscriber setup
//!
//! # Usage
//!
//! ```
//! use seedtree::{KeyTree, MnemonicCodec, Path};
//!
//! let codec = MnemonicCodec::english();
//! let entropy = seedtree::entropy::generate_for_word_count(24)?;
//! let words = codec.encode(&entropy)?;
//!
//! let seed = codec.derive_seed(&words, "passphrase")?;
//! let tree = KeyTree::new(seed.as_bytes())?;
//! let key = tree.jump_path(&"x/44/1/1/1".parse::<Path>()?)?;
//! assert_eq!(key.len(), 32);
//! # Ok::<(), seedtree::Error>(())
//! ```

pub mod config;
pub mod entropy;
pub mod error;
pub mod keytree;
pub mod mnemonic;
pub mod path;

#[cfg(feature = "cli")]
pub mod logging;

pub use config::KeyTreeConfig;
pub use entropy::EntropyConfig;
pub use error::{Error, Result};
pub use keytree::{DerivedKey, KeyTree};
pub use mnemonic::{Dictionary, MnemonicCodec, Seed};
pub use path::Path;
