// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Aho-Corasick construction over a token alphabet.
//!
//! Compilation consumes a [`KauaiPhraseTrie`] and returns a
//! [`PhraseAutomaton`]. The automaton cannot accept insertions; call
//! [`PhraseAutomaton::into_trie`] to get an insertable trie back and compile
//! again afterwards.

use std::collections::VecDeque;

use tracing::debug;

use super::matcher::PhraseMatches;
use super::node::{NodeId, PhraseNode, ROOT};
use super::trie::KauaiPhraseTrie;
use super::vocabulary::Vocabulary;
use crate::tokenizer::Token;

impl<P> KauaiPhraseTrie<P> {
    /// Converts the trie into a token-level Aho-Corasick automaton.
    ///
    /// The vocabulary of the automaton is the union of the inserted tokens and
    /// `extra_vocabulary`, which should hold every token of the text about to
    /// be matched. Compiling an empty trie succeeds and yields an automaton
    /// that never matches.
    ///
    /// # Arguments
    ///
    /// * `extra_vocabulary` - Tokens that will be queried besides the inserted ones.
    pub fn compile<I, S>(self, extra_vocabulary: I) -> PhraseAutomaton<P>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocabulary = self.inserted_tokens.clone();
        vocabulary.extend_from(extra_vocabulary);

        let mut automaton = PhraseAutomaton {
            trie: self,
            vocabulary,
        };
        automaton.link();
        automaton
    }

    /// Finds the failure target of the child of `parent` reached via `token`.
    fn fail_target(&self, parent: NodeId, token: &str) -> NodeId {
        let mut state = self.nodes[parent].fail.unwrap_or(ROOT);
        loop {
            if let Some(&next) = self.nodes[state].children.get(token) {
                return next;
            }
            if state == ROOT {
                return ROOT;
            }
            state = self.nodes[state].fail.unwrap_or(ROOT);
        }
    }

    /// Removes root self-loops and failure links.
    fn unlink(&mut self) {
        self.nodes[ROOT].children.retain(|_, child| *child != ROOT);
        for node in &mut self.nodes {
            node.fail = None;
        }
    }
}

/// A compiled token-level Aho-Corasick automaton.
///
/// The root is total over [`vocabulary`](Self::vocabulary): every vocabulary
/// token has either a real child edge or a self-loop at the root. Tokens
/// outside the vocabulary take no transition during a scan and leave the
/// state at the root.
///
/// Scans only borrow the automaton, so any number of them may run at once.
///
/// # Examples
///
/// ```
/// use mauka_phrase_lib::data_structures::kauai_phrase_trie::KauaiPhraseTrie;
/// use mauka_phrase_lib::tokenizer::{Tokenizer, WhitespaceTokenizer};
///
/// let tokens = WhitespaceTokenizer::new().tokenize("x = A B y").unwrap();
///
/// let mut trie = KauaiPhraseTrie::new();
/// trie.insert(["A"], "a");
/// trie.insert(["A", "B"], "ab");
///
/// let automaton = trie.compile(tokens.iter().map(|token| token.text.as_str()));
/// let spans: Vec<_> = automaton
///     .find_all_occurrences(&tokens)
///     .map(|found| (*found.payload, found.start, found.end))
///     .collect();
///
/// assert_eq!(spans, vec![("a", 4, 5), ("ab", 4, 7)]);
/// ```
#[derive(Debug, Clone)]
pub struct PhraseAutomaton<P> {
    /// Trie with failure links and root self-loops in place
    trie: KauaiPhraseTrie<P>,

    /// Tokens the root is total over
    vocabulary: Vocabulary,
}

impl<P> PhraseAutomaton<P> {
    /// Computes failure links breadth-first and makes the root total.
    fn link(&mut self) {
        let trie = &mut self.trie;
        let mut queue = VecDeque::new();
        let mut loops = 0usize;

        for token in self.vocabulary.iter() {
            match trie.nodes[ROOT].children.get(token).copied() {
                Some(child) if child != ROOT => {
                    trie.nodes[child].fail = Some(ROOT);
                    queue.push_back(child);
                }
                Some(_) => {}
                None => {
                    trie.nodes[ROOT].children.insert(token.to_owned(), ROOT);
                    loops += 1;
                }
            }
        }

        while let Some(parent) = queue.pop_front() {
            let children: Vec<NodeId> = trie.nodes[parent].children.values().copied().collect();
            for child in children {
                queue.push_back(child);
                let target = trie.fail_target(parent, &trie.nodes[child].token);
                trie.nodes[child].fail = Some(target);
            }
        }

        debug!(
            nodes = trie.nodes.len(),
            vocabulary = self.vocabulary.len(),
            root_loops = loops,
            max_depth = trie.max_depth,
            "Compiled phrase automaton"
        );
    }

    /// Adds tokens to the vocabulary without rebuilding failure links.
    ///
    /// Failure links depend only on the trie structure, so new tokens only
    /// need a root self-loop each.
    ///
    /// # Returns
    ///
    /// The number of tokens that were not part of the vocabulary yet.
    pub fn extend_vocabulary<I, S>(&mut self, tokens: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = 0;
        for token in tokens {
            let token = token.as_ref();
            if self.vocabulary.insert(token) {
                self.trie.nodes[ROOT]
                    .children
                    .entry(token.to_owned())
                    .or_insert(ROOT);
                added += 1;
            }
        }
        if added > 0 {
            debug!(added, vocabulary = self.vocabulary.len(), "Extended automaton vocabulary");
        }
        added
    }

    /// Rebuilds the automaton from scratch with the current vocabulary plus
    /// `extra_vocabulary`.
    ///
    /// Recompiling with an unchanged vocabulary gives identical match results.
    pub fn recompile<I, S>(&mut self, extra_vocabulary: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.vocabulary.extend_from(extra_vocabulary);
        self.trie.unlink();
        self.link();
    }

    /// Shrinks the vocabulary back to the inserted tokens.
    ///
    /// Root self-loops for other tokens never change a match, so this only
    /// frees memory; texts scanned later may need their tokens added again.
    ///
    /// # Returns
    ///
    /// The number of tokens dropped from the vocabulary.
    pub fn reset_vocabulary(&mut self) -> usize {
        let dropped = self.vocabulary.len() - self.trie.inserted_tokens.len();
        self.vocabulary = self.trie.inserted_tokens.clone();
        self.trie.unlink();
        self.link();
        dropped
    }

    /// Strips the automaton structure and returns the insertable trie.
    pub fn into_trie(mut self) -> KauaiPhraseTrie<P> {
        self.trie.unlink();
        self.trie
    }

    /// Read-only view of the underlying trie.
    pub fn trie(&self) -> &KauaiPhraseTrie<P> {
        &self.trie
    }

    /// Tokens the root is total over.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Whether every token of the stream is in the vocabulary.
    pub fn covers(&self, tokens: &[Token]) -> bool {
        self.vocabulary.covers(tokens)
    }

    /// Goto function: the state reached from `state` on `token`.
    ///
    /// Follows failure links until an edge is found. At the root a token
    /// outside the vocabulary has no edge, which leaves the state at the root.
    pub fn step(&self, mut state: NodeId, token: &str) -> NodeId {
        let nodes = &self.trie.nodes;
        loop {
            if let Some(&next) = nodes[state].children.get(token) {
                return next;
            }
            if state == ROOT {
                return ROOT;
            }
            state = nodes[state].fail.unwrap_or(ROOT);
        }
    }

    /// Lazily reports every occurrence of every stored phrase in the stream.
    ///
    /// Matches are produced in input order; phrases ending at the same token
    /// are produced longest first. The iterator borrows both the automaton and
    /// the tokens and can be dropped at any point; the matches it yields only
    /// borrow the automaton.
    pub fn find_all_occurrences<'t>(&self, tokens: &'t [Token]) -> PhraseMatches<'_, 't, P> {
        PhraseMatches::new(self, tokens)
    }

    pub(crate) fn nodes(&self) -> &[PhraseNode<P>] {
        &self.trie.nodes
    }
}
