// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the Kauai Phrase Trie.

/// Errors that can occur in Kauai Phrase Trie operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum PhraseTrieError {
    /// No phrase is stored under the given token sequence.
    #[error("No phrase stored for tokens: {0}")]
    PhraseNotFound(String),

    /// A token stream contains tokens the automaton was not compiled for.
    #[error("{missing} token(s) outside the compiled vocabulary, first: '{first}'")]
    VocabularyNotCovered {
        /// Number of distinct uncovered tokens.
        missing: usize,
        /// First uncovered token in stream order.
        first: String,
    },
}

/// Result type for Kauai Phrase Trie operations
pub type PhraseTrieResult<T> = std::result::Result<T, PhraseTrieError>;
