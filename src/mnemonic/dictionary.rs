//! Ordered word list with its reverse index.

use std::collections::HashMap;

/// Words addressable by an 11-bit index.
pub const DICTIONARY_SIZE: usize = 2048;

const ENGLISH_WORDS: &str = include_str!("../../assets/words_english.txt");

/// Read-only after construction; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Dictionary {
    words: Vec<String>,
    index: HashMap<String, usize>,
}

impl Dictionary {
    /// Build from a newline-separated word list. Length is not checked here.
    pub fn load(raw: &str) -> Self {
        let words: Vec<String> = raw.trim().lines().map(str::to_owned).collect();
        let index = words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i))
            .collect();
        Self { words, index }
    }

    /// The BIP-0039 English list.
    pub fn english() -> Self {
        Self::load(ENGLISH_WORDS)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Position of `word`, if it is addressable by an 11-bit index.
    pub fn index_of(&self, word: &str) -> Option<u16> {
        self.index
            .get(word)
            .filter(|&&i| i < DICTIONARY_SIZE)
            .map(|&i| i as u16)
    }

    pub fn word_at(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }
}
