//! Thread-safe searcher handle.
//!
//! Scans run concurrently under a read lock. A scan that needs the automaton
//! updated first takes the write lock, updates it, and downgrades to a read
//! lock for the scan itself.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockWriteGuard};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{matched_text, PhraseSearcher};
use crate::error::MaukaResult;
use crate::tokenizer::{CharOffsets, Token};

/// A phrase occurrence that owns its text and payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedMatch<P> {
    /// The matched slice of the searched text
    pub text: String,

    /// Payload of the matched phrase
    pub payload: P,

    /// Character offset where the match starts
    pub start: usize,

    /// Character offset where the match ends
    pub end: usize,

    /// Byte offset where the match starts
    pub byte_start: usize,

    /// Byte offset where the match ends
    pub byte_end: usize,
}

/// A [`PhraseSearcher`] shared between threads.
#[derive(Debug)]
pub struct SharedPhraseSearcher<P> {
    inner: Arc<RwLock<PhraseSearcher<P>>>,
}

impl<P> Clone for SharedPhraseSearcher<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: Clone> SharedPhraseSearcher<P> {
    /// Wraps a searcher for shared use.
    pub fn new(searcher: PhraseSearcher<P>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(searcher)),
        }
    }

    /// Tokenizes `text` and stores it as a phrase.
    pub fn add_phrase(&self, text: &str, payload: P) -> MaukaResult<Option<P>> {
        self.inner.write().add_phrase(text, payload)
    }

    /// Compiles the automaton.
    pub fn compile(&self) {
        self.inner.write().compile();
    }

    /// Drops vocabulary tokens that belong to no stored phrase.
    pub fn reset_vocabulary(&self) -> usize {
        self.inner.write().reset_vocabulary()
    }

    /// Number of distinct stored phrases.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether no phrase is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Finds every occurrence of every stored phrase in `text`.
    pub fn find_all(&self, text: &str) -> MaukaResult<Vec<OwnedMatch<P>>> {
        let searcher = self.inner.read();
        let tokens = searcher.tokenize(text)?;
        if searcher.is_ready_for(&tokens) {
            return collect_owned(&searcher, text, &tokens);
        }
        drop(searcher);

        let mut searcher = self.inner.write();
        // another writer may have prepared it meanwhile
        if !searcher.is_ready_for(&tokens) {
            trace!(tokens = tokens.len(), "Preparing automaton under write lock");
            searcher.prepare(&tokens);
        }
        let searcher = RwLockWriteGuard::downgrade(searcher);
        collect_owned(&searcher, text, &tokens)
    }
}

fn collect_owned<P: Clone>(
    searcher: &PhraseSearcher<P>,
    text: &str,
    tokens: &[Token],
) -> MaukaResult<Vec<OwnedMatch<P>>> {
    let offsets = CharOffsets::new(text);
    searcher
        .scan_prepared(tokens)?
        .into_iter()
        .map(|found| {
            let (start, end) = offsets.char_span(found.start, found.end);
            Ok(OwnedMatch {
                text: matched_text(text, &found)?.to_owned(),
                payload: found.payload.clone(),
                start,
                end,
                byte_start: found.start,
                byte_end: found.end,
            })
        })
        .collect()
}
