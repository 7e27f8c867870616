// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Streaming scan of a token sequence through a compiled automaton.

use std::iter::FusedIterator;
use std::ops::Range;

use serde::Serialize;
use tracing::{debug, trace};

use super::automaton::PhraseAutomaton;
use super::node::{NodeId, ROOT};
use crate::tokenizer::Token;

/// One occurrence of a stored phrase in a token stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhraseMatch<'a, P> {
    /// Payload of the matched phrase
    pub payload: &'a P,

    /// Offset where the first matched token starts in the source text
    pub start: usize,

    /// Offset where the last matched token ends in the source text
    pub end: usize,

    /// Index of the first matched token in the stream
    pub first_token: usize,

    /// Index of the last matched token in the stream
    pub last_token: usize,
}

impl<'a, P> PhraseMatch<'a, P> {
    /// Offsets of the match in the source text.
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of tokens in the matched phrase.
    pub fn token_len(&self) -> usize {
        self.last_token - self.first_token + 1
    }

    /// Slice of `text` covered by the match, if the offsets fit it.
    pub fn text<'t>(&self, text: &'t str) -> Option<&'t str> {
        text.get(self.span())
    }
}

/// Lazy iterator over all phrase occurrences in a token stream.
///
/// Advances the automaton one token at a time and, after each transition,
/// walks the failure chain of the new state reporting every terminal node.
/// The scan is a single forward pass over the tokens.
#[derive(Debug)]
pub struct PhraseMatches<'a, 't, P> {
    /// The automaton being run
    automaton: &'a PhraseAutomaton<P>,

    /// The token stream being scanned
    tokens: &'t [Token],

    /// Index of the next token to consume
    next_token: usize,

    /// Current automaton state
    state: NodeId,

    /// Next node on the failure chain still to report, for the last consumed token
    chain: Option<NodeId>,

    /// Tokens that were outside the vocabulary
    out_of_vocabulary: usize,

    /// Matches produced so far
    produced: usize,

    /// Whether the end of the stream was reached
    finished: bool,
}

impl<'a, 't, P> PhraseMatches<'a, 't, P> {
    pub(crate) fn new(automaton: &'a PhraseAutomaton<P>, tokens: &'t [Token]) -> Self {
        Self {
            automaton,
            tokens,
            next_token: 0,
            state: ROOT,
            chain: None,
            out_of_vocabulary: 0,
            produced: 0,
            finished: false,
        }
    }

    /// Number of consumed tokens that were outside the compiled vocabulary.
    pub fn out_of_vocabulary(&self) -> usize {
        self.out_of_vocabulary
    }

    /// Consumes the next token; returns `false` once the stream is exhausted.
    fn advance(&mut self) -> bool {
        let Some(token) = self.tokens.get(self.next_token) else {
            return false;
        };

        if !self.automaton.vocabulary().contains(&token.text) {
            self.out_of_vocabulary += 1;
            trace!(
                token = %token.text,
                index = self.next_token,
                "Token outside vocabulary, resetting to root"
            );
        }

        self.state = self.automaton.step(self.state, &token.text);
        self.chain = Some(self.state);
        self.next_token += 1;
        true
    }
}

impl<'a, 't, P> Iterator for PhraseMatches<'a, 't, P> {
    type Item = PhraseMatch<'a, P>;

    fn next(&mut self) -> Option<Self::Item> {
        let automaton = self.automaton;
        let nodes = automaton.nodes();
        loop {
            while let Some(id) = self.chain {
                let node = &nodes[id];
                self.chain = node.fail;

                if let Some(payload) = node.payload.as_ref() {
                    let last_token = self.next_token - 1;
                    let first_token = last_token + 1 - node.depth;
                    self.produced += 1;
                    return Some(PhraseMatch {
                        payload,
                        start: self.tokens[first_token].start_offset,
                        end: self.tokens[last_token].end_offset,
                        first_token,
                        last_token,
                    });
                }
            }

            if !self.advance() {
                if !self.finished {
                    self.finished = true;
                    debug!(
                        tokens = self.tokens.len(),
                        matches = self.produced,
                        out_of_vocabulary = self.out_of_vocabulary,
                        "Phrase scan finished"
                    );
                }
                return None;
            }
        }
    }
}

impl<'a, 't, P> FusedIterator for PhraseMatches<'a, 't, P> {}
