//! Mauka Phrase Library
//!
//! Token-level Aho-Corasick phrase matching: store multi-token phrases with
//! payloads, then report every occurrence of every phrase in a tokenized text
//! as offsets into the source string, overlapping and nested ones included.
//!
//! # Architecture
//!
//! - [`tokenizer`]: splits text into tokens with source offsets
//! - [`data_structures::kauai_phrase_trie`]: the phrase trie, its automaton and the scan
//! - [`search`]: text-level facade with compile policies and batch loading
//! - [`config`], [`error`], [`logging`]: the ambient stack shared with the binary

pub mod config;
pub mod data_structures;
pub mod error;
pub mod logging;
pub mod search;
pub mod tokenizer;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for Mauka Phrase.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
