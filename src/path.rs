//! Textual key paths: `x/<coin>/<wallet>/<kind>/<index>`
//!
//! Every component is a non-zero `u32` when parsed from text. `Path::new`
//! accepts any value; the key tree itself only checks the path length.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const PATH_DEPTH: usize = 4;

static PATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^x/(\d+)/(\d+)/(\d+)/(\d+)$").expect("path regex compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Path([u32; PATH_DEPTH]);

impl Path {
    pub fn new(coin: u32, wallet: u32, kind: u32, index: u32) -> Self {
        Self([coin, wallet, kind, index])
    }

    pub fn coin(&self) -> u32 { self.0[0] }
    pub fn wallet(&self) -> u32 { self.0[1] }
    pub fn kind(&self) -> u32 { self.0[2] }
    pub fn index(&self) -> u32 { self.0[3] }

    pub fn set_kind(&mut self, value: u32) { self.0[2] = value; }
    pub fn set_index(&mut self, value: u32) { self.0[3] = value; }

    /// Components in derivation order, as fed to `KeyTree::jump`.
    pub fn components(&self) -> &[u32; PATH_DEPTH] {
        &self.0
    }
}

impl FromStr for Path {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let caps = PATH_RE
            .captures(s)
            .ok_or_else(|| Error::InvalidPathFormat(s.to_owned()))?;

        let mut parts = [0u32; PATH_DEPTH];
        for (i, part) in parts.iter_mut().enumerate() {
            let raw = &caps[i + 1];
            let value: u32 = raw
                .parse()
                .map_err(|e| Error::InvalidPathComponent(format!("{}: {}", raw, e)))?;
            if value == 0 {
                return Err(Error::ZeroPathComponent);
            }
            *part = value;
        }
        Ok(Self(parts))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x/{}/{}/{}/{}", self.0[0], self.0[1], self.0[2], self.0[3])
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
