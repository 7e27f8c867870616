//! Text-level phrase search.
//!
//! [`PhraseSearcher`] ties a [`Tokenizer`] to a phrase trie and decides when
//! the automaton is (re)compiled, following the configured
//! [`CompilePolicy`]. Results are reported as [`SearchHit`]s carrying the
//! matched slice of the searched text and its character span.
//! Byte offsets are kept alongside for slicing.
//!
//! # Example
//!
//! ```
//! use mauka_phrase_lib::config::MatcherConfig;
//! use mauka_phrase_lib::search::{group_by_text, PhraseSearcher};
//! use mauka_phrase_lib::tokenizer::UnicodeWordTokenizer;
//!
//! let mut searcher: PhraseSearcher<String> = PhraseSearcher::new(
//!     Box::new(UnicodeWordTokenizer::new()),
//!     MatcherConfig::default(),
//! );
//! searcher.load_texts(&["Project", "Material Project Party"]).unwrap();
//!
//! let text = "each Material Project Party in relation to the Project";
//! let hits = searcher.find_all(text).unwrap();
//! let groups = group_by_text(&hits);
//!
//! assert_eq!(groups[0].text, "Project");
//! assert_eq!(groups[0].spans, vec![(14, 21), (47, 54)]);
//! assert_eq!(groups[1].text, "Material Project Party");
//! ```

mod loader;
mod shared;

use std::fmt;

use fnv::FnvBuildHasher;
use hashbrown::HashMap;
use serde::Serialize;
use tracing::debug;

use crate::config::{CompilePolicy, MatcherConfig, MaukaPhraseConfig};
use crate::data_structures::kauai_phrase_trie::{
    KauaiPhraseTrie, PhraseAutomaton, PhraseMatch, PhraseTrieError, Vocabulary,
};
use crate::error::{MaukaError, MaukaResult};
use crate::tokenizer::{
    build_tokenizer, validate_tokens, CharOffsets, Token, Tokenizer, TokenizerError,
};

pub use self::loader::{LoadedPhrase, PhraseLoader};
pub use self::shared::{OwnedMatch, SharedPhraseSearcher};

/// Lifecycle stage of a searcher's phrase index.
#[derive(Debug, Clone)]
pub enum Stage<P> {
    /// Accepting insertions
    Building(KauaiPhraseTrie<P>),

    /// Compiled and ready to scan
    Compiled(PhraseAutomaton<P>),
}

impl<P> Default for Stage<P> {
    fn default() -> Self {
        Stage::Building(KauaiPhraseTrie::new())
    }
}

/// One phrase occurrence in a searched text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit<'t, 'p, P> {
    /// The matched slice of the searched text
    pub text: &'t str,

    /// Payload of the matched phrase
    pub payload: &'p P,

    /// Character offset where the match starts
    pub start: usize,

    /// Character offset where the match ends
    pub end: usize,

    /// Byte offset where the match starts
    pub byte_start: usize,

    /// Byte offset where the match ends
    pub byte_end: usize,
}

/// All spans at which one matched text occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchGroup<'t> {
    /// The matched text
    pub text: &'t str,

    /// `(start, end)` character offsets of every occurrence, in scan order
    pub spans: Vec<(usize, usize)>,
}

/// Groups hits by matched text, in order of first occurrence.
pub fn group_by_text<'t, P>(hits: &[SearchHit<'t, '_, P>]) -> Vec<MatchGroup<'t>> {
    let mut index: HashMap<&'t str, usize, FnvBuildHasher> = HashMap::default();
    let mut groups: Vec<MatchGroup<'t>> = Vec::new();

    for hit in hits {
        let slot = *index.entry(hit.text).or_insert_with(|| {
            groups.push(MatchGroup {
                text: hit.text,
                spans: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].spans.push((hit.start, hit.end));
    }
    groups
}

/// Slice of `text` covered by `found`.
pub(crate) fn matched_text<'t, P>(text: &'t str, found: &PhraseMatch<'_, P>) -> MaukaResult<&'t str> {
    found.text(text).ok_or_else(|| {
        MaukaError::Tokenizer(TokenizerError::InvalidOffsets {
            index: found.first_token,
            start: found.start,
            end: found.end,
            len: text.len(),
        })
    })
}

/// Phrase index bound to a tokenizer and a compile policy.
pub struct PhraseSearcher<P> {
    tokenizer: Box<dyn Tokenizer>,
    config: MatcherConfig,
    stage: Stage<P>,

    /// Tokens to fold into the vocabulary at the next compile
    pending: Vocabulary,
}

impl<P> PhraseSearcher<P> {
    /// Creates an empty searcher.
    pub fn new(tokenizer: Box<dyn Tokenizer>, config: MatcherConfig) -> Self {
        Self {
            tokenizer,
            config,
            stage: Stage::default(),
            pending: Vocabulary::new(),
        }
    }

    /// Creates an empty searcher with the configured tokenizer and matcher settings.
    pub fn from_config(config: &MaukaPhraseConfig) -> MaukaResult<Self> {
        let tokenizer = build_tokenizer(&config.tokenizer)?;
        Ok(Self::new(tokenizer, config.matcher.clone()))
    }

    /// The tokenizer used for phrases and texts.
    pub fn tokenizer(&self) -> &dyn Tokenizer {
        self.tokenizer.as_ref()
    }

    /// Matcher settings.
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Current lifecycle stage.
    pub fn stage(&self) -> &Stage<P> {
        &self.stage
    }

    /// Whether the automaton is compiled.
    pub fn is_compiled(&self) -> bool {
        matches!(self.stage, Stage::Compiled(_))
    }

    /// Read-only view of the stored phrases.
    pub fn trie(&self) -> &KauaiPhraseTrie<P> {
        match &self.stage {
            Stage::Building(trie) => trie,
            Stage::Compiled(automaton) => automaton.trie(),
        }
    }

    /// The compiled automaton, if any.
    pub fn automaton(&self) -> Option<&PhraseAutomaton<P>> {
        match &self.stage {
            Stage::Building(_) => None,
            Stage::Compiled(automaton) => Some(automaton),
        }
    }

    /// Number of distinct stored phrases.
    pub fn len(&self) -> usize {
        self.trie().len()
    }

    /// Whether no phrase is stored.
    pub fn is_empty(&self) -> bool {
        self.trie().is_empty()
    }

    /// Tokenizes `text`, checking offsets when `validate_offsets` is set.
    pub fn tokenize(&self, text: &str) -> MaukaResult<Vec<Token>> {
        let tokens = self.tokenizer.tokenize(text)?;
        if self.config.validate_offsets {
            validate_tokens(text, &tokens)?;
        }
        Ok(tokens)
    }

    /// Tokenizes `text` and stores it as a phrase.
    ///
    /// A text without tokens is not stored.
    ///
    /// # Returns
    ///
    /// The payload previously stored for the same token sequence, if any.
    pub fn add_phrase(&mut self, text: &str, payload: P) -> MaukaResult<Option<P>> {
        let tokens = self.tokenize(text)?;
        if tokens.is_empty() {
            debug!(phrase = text, "Phrase has no tokens, skipping");
            return Ok(None);
        }
        Ok(self.add_tokens(tokens.iter().map(|token| token.text.as_str()), payload))
    }

    /// Stores an already tokenized phrase.
    pub fn add_tokens<I, S>(&mut self, tokens: I, payload: P) -> Option<P>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.building().insert(tokens, payload)
    }

    /// Payload of the phrase spelled by `text`.
    pub fn get(&self, text: &str) -> MaukaResult<Option<&P>> {
        let tokens = self.tokenize(text)?;
        Ok(self.trie().get(tokens.iter().map(|token| token.text.as_str())))
    }

    /// Whether `text` is a stored phrase.
    pub fn contains(&self, text: &str) -> MaukaResult<bool> {
        Ok(self.get(text)?.is_some())
    }

    /// Whether `text` is a prefix of a stored phrase.
    pub fn starts_with(&self, text: &str) -> MaukaResult<bool> {
        let tokens = self.tokenize(text)?;
        Ok(self
            .trie()
            .starts_with(tokens.iter().map(|token| token.text.as_str())))
    }

    /// Adds the tokens of `text` to the vocabulary.
    ///
    /// # Returns
    ///
    /// The number of tokens that were not known yet.
    pub fn observe(&mut self, text: &str) -> MaukaResult<usize> {
        let tokens = self.tokenize(text)?;
        let texts = tokens.iter().map(|token| token.text.as_str());
        Ok(match &mut self.stage {
            Stage::Compiled(automaton) => automaton.extend_vocabulary(texts),
            Stage::Building(_) => self.pending.extend_from(texts),
        })
    }

    /// Compiles the automaton, rebuilding it if it is already compiled.
    pub fn compile(&mut self) -> &PhraseAutomaton<P> {
        self.compile_pending()
    }

    /// Drops every vocabulary token that is not part of a stored phrase,
    /// including observed and pending ones.
    ///
    /// # Returns
    ///
    /// The number of tokens dropped.
    pub fn reset_vocabulary(&mut self) -> usize {
        let pending = std::mem::take(&mut self.pending).len();
        match &mut self.stage {
            Stage::Compiled(automaton) => pending + automaton.reset_vocabulary(),
            Stage::Building(_) => pending,
        }
    }

    /// Whether `tokens` can be scanned without touching the automaton.
    pub fn is_ready_for(&self, tokens: &[Token]) -> bool {
        match (&self.stage, self.config.compile_policy) {
            (Stage::Building(_), _) | (_, CompilePolicy::PerCall) => false,
            (Stage::Compiled(automaton), CompilePolicy::OnNewVocabulary) => {
                automaton.covers(tokens)
            }
            (Stage::Compiled(_), CompilePolicy::Frozen) => true,
        }
    }

    /// Brings the automaton up to date for scanning `tokens`.
    pub fn prepare(&mut self, tokens: &[Token]) {
        let policy = self.config.compile_policy;
        let texts = tokens.iter().map(|token| token.text.as_str());

        if let Stage::Building(_) = self.stage {
            let automaton = self.compile_pending();
            if policy != CompilePolicy::Frozen {
                automaton.extend_vocabulary(texts);
            }
            return;
        }

        if let Stage::Compiled(automaton) = &mut self.stage {
            match policy {
                CompilePolicy::PerCall => {
                    automaton.recompile(texts);
                    debug!(tokens = tokens.len(), "Recompiled automaton for scan");
                }
                CompilePolicy::OnNewVocabulary => {
                    let added = automaton.extend_vocabulary(texts);
                    if added > 0 {
                        debug!(added, "Scan brought new vocabulary");
                    }
                    if let Some(limit) = self.config.max_vocabulary {
                        if automaton.vocabulary().len() > limit {
                            let dropped = automaton.reset_vocabulary();
                            automaton
                                .extend_vocabulary(tokens.iter().map(|token| token.text.as_str()));
                            debug!(
                                dropped,
                                limit, "Vocabulary over limit, reset to phrase tokens"
                            );
                        }
                    }
                }
                CompilePolicy::Frozen => {}
            }
        }
    }

    /// Scans `tokens` with the automaton as it is.
    ///
    /// # Errors
    ///
    /// [`PhraseTrieError::VocabularyNotCovered`] under the frozen policy with
    /// `strict_vocabulary` when a token is unknown, or [`MaukaError::Custom`]
    /// if the searcher was never compiled.
    pub fn scan_prepared(&self, tokens: &[Token]) -> MaukaResult<Vec<PhraseMatch<'_, P>>> {
        let automaton = self
            .automaton()
            .ok_or_else(|| MaukaError::Custom("phrase searcher is not compiled".to_string()))?;

        if self.config.strict_vocabulary && self.config.compile_policy == CompilePolicy::Frozen {
            let missing = automaton.vocabulary().missing(tokens);
            if let Some(first) = missing.first() {
                return Err(PhraseTrieError::VocabularyNotCovered {
                    missing: missing.len(),
                    first: (*first).to_string(),
                }
                .into());
            }
        }

        Ok(automaton.find_all_occurrences(tokens).collect())
    }

    /// Scans an already tokenized text.
    pub fn scan_tokens(&mut self, tokens: &[Token]) -> MaukaResult<Vec<PhraseMatch<'_, P>>> {
        self.prepare(tokens);
        self.scan_prepared(tokens)
    }

    /// Finds every occurrence of every stored phrase in `text`.
    pub fn find_all<'t>(&mut self, text: &'t str) -> MaukaResult<Vec<SearchHit<'t, '_, P>>> {
        let tokens = self.tokenize(text)?;
        self.prepare(&tokens);
        let offsets = CharOffsets::new(text);

        self.scan_prepared(&tokens)?
            .into_iter()
            .map(|found| {
                let (start, end) = offsets.char_span(found.start, found.end);
                Ok(SearchHit {
                    text: matched_text(text, &found)?,
                    payload: found.payload,
                    start,
                    end,
                    byte_start: found.start,
                    byte_end: found.end,
                })
            })
            .collect()
    }

    /// Compiles the index with the pending vocabulary.
    fn compile_pending(&mut self) -> &mut PhraseAutomaton<P> {
        let pending = std::mem::take(&mut self.pending);
        let automaton = match std::mem::take(&mut self.stage) {
            Stage::Building(trie) => trie.compile(pending.iter()),
            Stage::Compiled(mut automaton) => {
                automaton.recompile(pending.iter());
                automaton
            }
        };
        debug!(
            phrases = automaton.trie().len(),
            vocabulary = automaton.vocabulary().len(),
            policy = ?self.config.compile_policy,
            "Phrase searcher compiled"
        );

        self.stage = Stage::Compiled(automaton);
        match &mut self.stage {
            Stage::Compiled(automaton) => automaton,
            Stage::Building(_) => unreachable!("stage was just compiled"),
        }
    }

    /// Returns the insertable trie, reopening a compiled automaton.
    ///
    /// The automaton's vocabulary is kept for the next compile.
    fn building(&mut self) -> &mut KauaiPhraseTrie<P> {
        let trie = match std::mem::take(&mut self.stage) {
            Stage::Building(trie) => trie,
            Stage::Compiled(automaton) => {
                self.pending.extend_from(automaton.vocabulary().iter());
                debug!("Reopening compiled automaton for insertion");
                automaton.into_trie()
            }
        };

        self.stage = Stage::Building(trie);
        match &mut self.stage {
            Stage::Building(trie) => trie,
            Stage::Compiled(_) => unreachable!("stage was just reopened"),
        }
    }
}

impl PhraseSearcher<String> {
    /// Tokenizes `texts` with the [`PhraseLoader`] and stores each as a
    /// phrase whose payload is its text.
    ///
    /// # Returns
    ///
    /// The number of distinct phrases loaded.
    pub fn load_texts<S>(&mut self, texts: &[S]) -> MaukaResult<usize>
    where
        S: AsRef<str> + Sync,
    {
        let phrases = PhraseLoader::new(self.tokenizer.as_ref(), &self.config).load(texts)?;
        let loaded = phrases.len();
        for phrase in phrases {
            self.add_tokens(phrase.tokens, phrase.text);
        }
        debug!(loaded, total = self.len(), "Loaded phrase texts");
        Ok(loaded)
    }
}

impl<P> fmt::Debug for PhraseSearcher<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhraseSearcher")
            .field("tokenizer", &self.tokenizer.name())
            .field("config", &self.config)
            .field("compiled", &self.is_compiled())
            .field("phrases", &self.len())
            .field("pending", &self.pending.len())
            .finish()
    }
}
