// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Kauai Phrase Trie: multi-token phrase matching.
//!
//! This module indexes phrases made of tokens (each phrase carrying a payload)
//! and reports every occurrence of every phrase in a token stream, including
//! overlapping and nested occurrences, as offsets into the source text. It is
//! Aho-Corasick with tokens instead of bytes as the alphabet.
//!
//! # Lifecycle
//!
//! 1. Insert phrases into a [`KauaiPhraseTrie`].
//! 2. Tokenize the text to scan and [`compile`](KauaiPhraseTrie::compile) the
//!    trie with the text's tokens as extra vocabulary. The token alphabet is
//!    open, so the automaton root is only total over the tokens it knows.
//! 3. Run [`find_all_occurrences`](PhraseAutomaton::find_all_occurrences).
//!
//! New texts can bring new tokens: grow the automaton with
//! [`extend_vocabulary`](PhraseAutomaton::extend_vocabulary) before scanning
//! them. Tokens the automaton does not know take no transition and produce no
//! match, so an uncovered stream never yields a wrong match, only a log event.
//!
//! # Example
//!
//! ```
//! use mauka_phrase_lib::data_structures::kauai_phrase_trie::KauaiPhraseTrie;
//! use mauka_phrase_lib::tokenizer::{Tokenizer, UnicodeWordTokenizer};
//!
//! let tokenizer = UnicodeWordTokenizer::new();
//! let mut trie = KauaiPhraseTrie::new();
//! for phrase in ["Sanctions", "Anti-Corruption Laws", "Laws"] {
//!     let tokens = tokenizer.tokenize(phrase).unwrap();
//!     trie.insert(tokens.iter().map(|token| token.text.as_str()), phrase);
//! }
//!
//! let text = "Sanctions, and Anti-Corruption Laws.";
//! let tokens = tokenizer.tokenize(text).unwrap();
//! let automaton = trie.compile(tokens.iter().map(|token| token.text.as_str()));
//!
//! let found: Vec<&str> = automaton
//!     .find_all_occurrences(&tokens)
//!     .map(|hit| &text[hit.span()])
//!     .collect();
//! assert_eq!(found, vec!["Sanctions", "Anti-Corruption Laws", "Laws"]);
//! ```
//!
//! # Performance Characteristics
//!
//! - Insertion: O(m) for a phrase of m tokens
//! - Compilation: O(n + v) for n nodes and v vocabulary tokens
//! - Scan: O(t + k) for t input tokens and k reported matches, with each
//!   failure chain walk bounded by the longest phrase

mod automaton;
mod error;
mod matcher;
mod node;
mod trie;
mod vocabulary;

// Re-exports
pub use automaton::PhraseAutomaton;
pub use error::{PhraseTrieError, PhraseTrieResult};
pub use matcher::{PhraseMatch, PhraseMatches};
pub use node::{NodeId, PhraseNode};
pub use trie::{Entries, KauaiPhraseTrie};
pub use vocabulary::Vocabulary;

#[cfg(test)]
mod tests;
