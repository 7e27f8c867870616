//! Batch tokenization of phrase lists.
//!
//! Phrase lists are tokenized in batches of
//! `min(len / workers + 1, batch_size_limit)` spread over a rayon pool. The
//! result keeps first-seen order and holds one entry per distinct token
//! sequence.

use fnv::FnvBuildHasher;
use hashbrown::HashMap;
use rayon::prelude::*;
use tracing::debug;

use crate::config::MatcherConfig;
use crate::tokenizer::{Tokenizer, TokenizerError, TokenizerResult};

/// A phrase text and the token texts it splits into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPhrase {
    /// Token texts of the phrase
    pub tokens: Vec<String>,

    /// Source text of the phrase
    pub text: String,
}

/// Tokenizes phrase lists in parallel batches.
pub struct PhraseLoader<'a> {
    tokenizer: &'a dyn Tokenizer,
    workers: usize,
    batch_size_limit: usize,
}

impl<'a> PhraseLoader<'a> {
    /// Creates a loader using the worker and batch settings of `config`.
    pub fn new(tokenizer: &'a dyn Tokenizer, config: &MatcherConfig) -> Self {
        Self {
            tokenizer,
            workers: config.worker_count(),
            batch_size_limit: config.batch_size_limit.max(1),
        }
    }

    /// Number of worker threads.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Batch size used for a list of `len` phrases.
    pub fn batch_size(&self, len: usize) -> usize {
        (len / self.workers + 1).min(self.batch_size_limit)
    }

    /// Tokenizes `texts`.
    ///
    /// Texts that tokenize to nothing are skipped. When several texts produce
    /// the same token sequence, the entry keeps the position of the first and
    /// the text of the last.
    ///
    /// # Errors
    ///
    /// Returns a tokenizer error if any phrase fails to tokenize, or
    /// [`TokenizerError::Worker`] if the worker pool cannot be started.
    pub fn load<S>(&self, texts: &[S]) -> TokenizerResult<Vec<LoadedPhrase>>
    where
        S: AsRef<str> + Sync,
    {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let batch_size = self.batch_size(texts.len());
        let batches: Vec<&[S]> = texts.chunks(batch_size).collect();
        let tokenized = if self.workers == 1 || batches.len() == 1 {
            batches
                .iter()
                .map(|batch| self.tokenize_batch(batch))
                .collect::<TokenizerResult<Vec<_>>>()?
        } else {
            self.tokenize_parallel(&batches)?
        };

        debug!(
            phrases = texts.len(),
            batches = batches.len(),
            batch_size,
            workers = self.workers,
            tokenizer = self.tokenizer.name(),
            "Tokenized phrase list"
        );

        let texts = texts.iter().map(S::as_ref);
        Ok(dedup(texts.zip(tokenized.into_iter().flatten())))
    }

    fn tokenize_batch<S: AsRef<str>>(&self, batch: &[S]) -> TokenizerResult<Vec<Vec<String>>> {
        batch
            .iter()
            .map(|text| {
                let tokens = self.tokenizer.tokenize(text.as_ref())?;
                Ok(tokens.into_iter().map(|token| token.text).collect())
            })
            .collect()
    }

    /// Runs the batches on a dedicated pool of `workers` threads, keeping
    /// batch order.
    fn tokenize_parallel<S>(&self, batches: &[&[S]]) -> TokenizerResult<Vec<Vec<Vec<String>>>>
    where
        S: AsRef<str> + Sync,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers.min(batches.len()))
            .build()
            .map_err(|e| TokenizerError::Worker(e.to_string()))?;

        pool.install(|| {
            batches
                .par_iter()
                .map(|batch| self.tokenize_batch(batch))
                .collect::<TokenizerResult<Vec<_>>>()
        })
    }
}

fn dedup<'t>(tokenized: impl Iterator<Item = (&'t str, Vec<String>)>) -> Vec<LoadedPhrase> {
    let mut index: HashMap<Vec<String>, usize, FnvBuildHasher> = HashMap::default();
    let mut phrases: Vec<LoadedPhrase> = Vec::new();
    let mut empty = 0usize;

    for (text, tokens) in tokenized {
        if tokens.is_empty() {
            empty += 1;
            continue;
        }
        match index.get(&tokens) {
            Some(&slot) => phrases[slot].text = text.to_owned(),
            None => {
                index.insert(tokens.clone(), phrases.len());
                phrases.push(LoadedPhrase {
                    tokens,
                    text: text.to_owned(),
                });
            }
        }
    }

    if empty > 0 {
        debug!(empty, "Skipped phrases without tokens");
    }
    phrases
}
