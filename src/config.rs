//! Key tree configuration - built in code or read from the environment

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

pub const ENV_KEY_ENTROPY_SIZE: &str = "SEEDTREE_KEY_ENTROPY_SIZE";
pub const ENV_MAX_LEVEL: &str = "SEEDTREE_MAX_LEVEL";

pub const DEFAULT_KEY_ENTROPY_SIZE: u16 = 32;
pub const DEFAULT_MAX_LEVEL: u8 = 4;

/// Parameters of a key tree. Validated when the tree is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyTreeConfig {
    /// Bytes per derived key; the chaining buffer is twice this
    pub key_entropy_size: u16,
    /// Longest path accepted by `jump`
    pub max_level: u8,
}

impl Default for KeyTreeConfig {
    fn default() -> Self {
        Self { key_entropy_size: DEFAULT_KEY_ENTROPY_SIZE, max_level: DEFAULT_MAX_LEVEL }
    }
}

impl KeyTreeConfig {
    pub fn new() -> Self { Self::default() }
    pub fn with_key_entropy_size(mut self, size: u16) -> Self { self.key_entropy_size = size; self }
    pub fn with_max_level(mut self, level: u8) -> Self { self.max_level = level; self }

    /// Defaults overridden by `SEEDTREE_KEY_ENTROPY_SIZE` / `SEEDTREE_MAX_LEVEL`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup(ENV_KEY_ENTROPY_SIZE) {
            config.key_entropy_size = parse_var(ENV_KEY_ENTROPY_SIZE, &value)?;
        }
        if let Some(value) = lookup(ENV_MAX_LEVEL) {
            config.max_level = parse_var(ENV_MAX_LEVEL, &value)?;
        }
        Ok(config)
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("{}={}: {}", name, value, e)))
}

/// Load `KEY=value` lines into the process environment.
///
/// Variables that are already set win. Returns how many were set.
pub fn load_env_file(path: impl AsRef<std::path::Path>) -> std::io::Result<usize> {
    let contents = std::fs::read_to_string(path)?;
    let mut loaded = 0;
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim().trim_matches('"');
            if !value.is_empty() && std::env::var(key).is_err() {
                std::env::set_var(key, value);
                loaded += 1;
            }
        }
    }
    Ok(loaded)
}
