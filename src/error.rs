//! Errors surfaced by the codec, the key tree and the path parser.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unsupported word count: {0}")]
    UnsupportedWordCount(usize),

    #[error("Invalid entropy bit length: {0}")]
    InvalidEntropyLength(usize),

    #[error("Word `{0}` not found in dictionary")]
    UnknownWord(String),

    #[error("Dictionary has no word at index {0}")]
    MissingWordIndex(usize),

    #[error("Checksum mismatch")]
    ChecksumMismatch,

    #[error("Random source failed: {0}")]
    RandomSource(String),

    #[error("Empty seed")]
    EmptySeed,

    #[error("Invalid key entropy size: {0} (minimum 32)")]
    InvalidKeyEntropySize(u16),

    #[error("Invalid max level: {0} (minimum 1)")]
    InvalidMaxLevel(u8),

    #[error("Master key is not initialized")]
    UninitializedKey,

    #[error("Invalid path length: {0}")]
    InvalidPathLength(usize),

    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("Invalid path format: {0}")]
    InvalidPathFormat(String),

    #[error("Invalid path component {0}")]
    InvalidPathComponent(String),

    #[error("Path component cannot be zero")]
    ZeroPathComponent,

    #[error("Invalid configuration: {0}")]
    Config(String),
}
