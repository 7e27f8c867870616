// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Token vocabulary tracking.
//!
//! The token alphabet is open, so the automaton root is only total over the
//! set of tokens it was compiled with. [`Vocabulary`] is that set.

use fnv::FnvBuildHasher;
use hashbrown::HashSet;

use crate::tokenizer::Token;

/// A set of distinct token texts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    tokens: HashSet<String, FnvBuildHasher>,
}

impl Vocabulary {
    /// Creates an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a token, returning `true` if it was not yet known.
    pub fn insert(&mut self, token: &str) -> bool {
        if self.tokens.contains(token) {
            return false;
        }
        self.tokens.insert(token.to_owned())
    }

    /// Adds every token, returning how many were new.
    pub fn extend_from<I, S>(&mut self, tokens: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .filter(|token| self.insert(token.as_ref()))
            .count()
    }

    /// Whether the token is known.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether no token is known.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterates over the tokens in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.tokens.iter().map(String::as_str)
    }

    /// Whether every token of the stream is known.
    pub fn covers(&self, tokens: &[Token]) -> bool {
        tokens.iter().all(|token| self.contains(&token.text))
    }

    /// Distinct unknown tokens of the stream, in stream order.
    pub fn missing<'a>(&self, tokens: &'a [Token]) -> Vec<&'a str> {
        let mut seen: HashSet<&str, FnvBuildHasher> = HashSet::default();
        tokens
            .iter()
            .map(|token| token.text.as_str())
            .filter(|text| !self.contains(text) && seen.insert(*text))
            .collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut vocabulary = Vocabulary::new();
        vocabulary.extend_from(iter);
        vocabulary
    }
}

impl<S: AsRef<str>> Extend<S> for Vocabulary {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.extend_from(iter);
    }
}
