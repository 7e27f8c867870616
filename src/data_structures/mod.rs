//! Data structures for Mauka Phrase.
//!
//! This module contains the phrase index and its token-level Aho-Corasick
//! automaton. All implementations adhere to the project requirements:
//! - No unsafe code
//! - Arena storage with index links instead of shared ownership
//! - Read-only scans that can run from any number of threads

pub mod kauai_phrase_trie;

// Re-export common data structures
pub use kauai_phrase_trie::{
    KauaiPhraseTrie, PhraseAutomaton, PhraseMatch, PhraseTrieError, PhraseTrieResult,
};
