//! Matcher configuration module.
//!
//! Controls when the phrase automaton is recompiled, how out-of-vocabulary
//! tokens are treated, and how phrase lists are tokenized in batches.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// When a searcher (re)compiles its automaton before a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CompilePolicy {
    /// Recompile with the text's vocabulary on every scan
    PerCall,

    /// Compile once; recompile only when a text brings unseen tokens
    #[default]
    OnNewVocabulary,

    /// Never recompile during a scan
    Frozen,
}

/// Matcher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Recompilation policy
    pub compile_policy: CompilePolicy,

    /// Reject texts with tokens outside a frozen automaton's vocabulary
    pub strict_vocabulary: bool,

    /// Check tokenizer output offsets before scanning
    pub validate_offsets: bool,

    /// Upper bound on phrases per tokenization batch
    pub batch_size_limit: usize,

    /// Worker threads for batch tokenization (None for one per CPU)
    pub workers: Option<usize>,

    /// Vocabulary size above which an `on_new_vocabulary` searcher drops the
    /// tokens it learned from scanned texts (None for no limit)
    pub max_vocabulary: Option<usize>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            compile_policy: CompilePolicy::default(),
            strict_vocabulary: false,
            validate_offsets: true,
            batch_size_limit: 10,
            workers: None,
            max_vocabulary: None,
        }
    }
}

impl MatcherConfig {
    /// Number of tokenization workers to run.
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get).max(1)
    }
}

impl Validate for MatcherConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.batch_size_limit == 0 {
            return Err(ConfigError::ValidationError(
                "batch_size_limit must be greater than 0".to_string(),
            ));
        }

        if self.workers == Some(0) {
            return Err(ConfigError::ValidationError(
                "workers must be greater than 0".to_string(),
            ));
        }

        if self.max_vocabulary == Some(0) {
            return Err(ConfigError::ValidationError(
                "max_vocabulary must be greater than 0".to_string(),
            ));
        }

        if self.strict_vocabulary && self.compile_policy == CompilePolicy::PerCall {
            tracing::warn!("strict_vocabulary has no effect with the per_call compile policy");
        }

        Ok(())
    }
}
