// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Phrase storage and the read-only associative view.

use super::error::{PhraseTrieError, PhraseTrieResult};
use super::node::{NodeId, PhraseNode, ROOT};
use super::vocabulary::Vocabulary;

/// Kauai Phrase Trie is a prefix tree over token sequences.
///
/// Every inserted phrase is a sequence of token texts carrying a payload of
/// type `P`. Nodes are stored in an arena and addressed by index, which keeps
/// the failure links added by [`compile`](Self::compile) non-owning.
///
/// # Examples
///
/// ```
/// use mauka_phrase_lib::data_structures::kauai_phrase_trie::KauaiPhraseTrie;
///
/// let mut trie = KauaiPhraseTrie::new();
/// trie.insert(["Material", "Project", "Party"], "MPP");
///
/// assert!(trie.contains(["Material", "Project", "Party"]));
/// assert!(trie.starts_with(["Material", "Project"]));
/// assert!(!trie.contains(["Material", "Project"]));
/// assert_eq!(trie.get(["Material", "Project", "Party"]), Some(&"MPP"));
/// ```
#[derive(Debug, Clone)]
pub struct KauaiPhraseTrie<P> {
    /// Node arena, the root lives at index 0
    pub(crate) nodes: Vec<PhraseNode<P>>,

    /// Longest inserted phrase, in tokens
    pub(crate) max_depth: usize,

    /// Every distinct token of every inserted phrase
    pub(crate) inserted_tokens: Vocabulary,
}

impl<P> KauaiPhraseTrie<P> {
    /// Creates a new empty trie.
    pub fn new() -> Self {
        Self {
            nodes: vec![PhraseNode::root()],
            max_depth: 0,
            inserted_tokens: Vocabulary::new(),
        }
    }

    /// Inserts a phrase with its payload.
    ///
    /// Existing prefix nodes are reused and their occurrence count incremented;
    /// missing ones are created. Re-inserting a phrase replaces its payload.
    /// An empty token sequence is a no-op.
    ///
    /// # Returns
    ///
    /// The payload previously stored for this phrase, if any.
    pub fn insert<I, S>(&mut self, phrase: I, payload: P) -> Option<P>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut current = ROOT;
        let mut length = 0;

        for token in phrase {
            let token = token.as_ref();
            length += 1;
            self.inserted_tokens.insert(token);

            current = match self.child(current, token) {
                Some(child) => {
                    self.nodes[child].count += 1;
                    child
                }
                None => {
                    let depth = self.nodes[current].depth + 1;
                    let id = self.nodes.len();
                    self.nodes.push(PhraseNode::new(token.to_owned(), depth));
                    self.nodes[current].children.insert(token.to_owned(), id);
                    id
                }
            };
        }

        if length == 0 {
            return None;
        }

        self.max_depth = self.max_depth.max(length);
        self.nodes[current].payload.replace(payload)
    }

    /// Follows a real child edge, ignoring root self-loops.
    pub(crate) fn child(&self, node: NodeId, token: &str) -> Option<NodeId> {
        self.nodes[node]
            .children
            .get(token)
            .copied()
            .filter(|&child| child != node)
    }

    /// Walks the path spelled by `sequence` from the root.
    fn find_node<I, S>(&self, sequence: I) -> Option<NodeId>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        sequence
            .into_iter()
            .try_fold(ROOT, |node, token| self.child(node, token.as_ref()))
    }

    /// Returns the node with the given id, if it exists.
    pub fn node(&self, id: NodeId) -> Option<&PhraseNode<P>> {
        self.nodes.get(id)
    }

    /// Returns the root node.
    pub fn root(&self) -> &PhraseNode<P> {
        &self.nodes[ROOT]
    }

    /// Checks whether exactly this phrase was inserted.
    pub fn contains<I, S>(&self, phrase: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.get(phrase).is_some()
    }

    /// Checks whether some inserted phrase starts with `prefix`.
    ///
    /// The empty prefix is a prefix of everything, including an empty trie.
    pub fn starts_with<I, S>(&self, prefix: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.find_node(prefix).is_some()
    }

    /// Retrieves the payload stored for a phrase.
    pub fn get<I, S>(&self, phrase: I) -> Option<&P>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.find_node(phrase)
            .and_then(|id| self.nodes[id].payload.as_ref())
    }

    /// Retrieves the payload stored for a phrase, or reports it missing.
    ///
    /// # Returns
    ///
    /// * `Ok(&P)` - The stored payload.
    /// * `Err(PhraseTrieError::PhraseNotFound)` - If no phrase ends on this path.
    pub fn lookup<S: AsRef<str>>(&self, phrase: &[S]) -> PhraseTrieResult<&P> {
        self.get(phrase).ok_or_else(|| {
            PhraseTrieError::PhraseNotFound(
                phrase
                    .iter()
                    .map(|token| token.as_ref())
                    .collect::<Vec<&str>>()
                    .join(" "),
            )
        })
    }

    /// Occurrence count of the node at the end of `sequence`, 0 if absent.
    pub fn count<I, S>(&self, sequence: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.find_node(sequence)
            .filter(|&id| id != ROOT)
            .map_or(0, |id| self.nodes[id].count)
    }

    /// Iterates over all stored `(phrase, payload)` pairs depth-first.
    pub fn iter(&self) -> Entries<'_, P> {
        Entries {
            nodes: &self.nodes,
            stack: vec![ROOT],
            path: Vec::with_capacity(self.max_depth),
        }
    }

    /// Iterates over all stored phrases.
    pub fn keys(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        self.iter().map(|(phrase, _)| phrase)
    }

    /// Iterates over all stored payloads.
    pub fn values(&self) -> impl Iterator<Item = &P> + '_ {
        self.iter().map(|(_, payload)| payload)
    }

    /// Number of distinct stored phrases.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_terminal()).count()
    }

    /// Whether no phrase is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of occurrence counts over terminal nodes.
    ///
    /// Counts duplicates, and counts a terminal node again for every longer
    /// phrase that passes through it.
    pub fn occurrence_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.is_terminal())
            .map(|node| node.count)
            .sum()
    }

    /// Total number of stored tokens, duplicates included.
    pub fn token_count(&self) -> usize {
        self.nodes.iter().skip(1).map(|node| node.count).sum()
    }

    /// Distinct tokens labelling real trie nodes.
    pub fn unique_tokens(&self) -> Vocabulary {
        self.nodes.iter().skip(1).map(|node| node.token.as_str()).collect()
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Length in tokens of the longest stored phrase.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Every distinct token seen by [`insert`](Self::insert).
    pub fn inserted_tokens(&self) -> &Vocabulary {
        &self.inserted_tokens
    }

    /// Removes every phrase.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl<P> Default for KauaiPhraseTrie<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, S> FromIterator<(Vec<S>, P)> for KauaiPhraseTrie<P>
where
    S: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (Vec<S>, P)>>(iter: I) -> Self {
        let mut trie = Self::new();
        trie.extend(iter);
        trie
    }
}

impl<P, S> Extend<(Vec<S>, P)> for KauaiPhraseTrie<P>
where
    S: AsRef<str>,
{
    fn extend<I: IntoIterator<Item = (Vec<S>, P)>>(&mut self, iter: I) {
        for (phrase, payload) in iter {
            self.insert(phrase, payload);
        }
    }
}

/// Depth-first iterator over stored phrases and their payloads.
#[derive(Debug)]
pub struct Entries<'a, P> {
    nodes: &'a [PhraseNode<P>],
    stack: Vec<NodeId>,
    path: Vec<&'a str>,
}

impl<'a, P> Iterator for Entries<'a, P> {
    type Item = (Vec<&'a str>, &'a P);

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        while let Some(id) = self.stack.pop() {
            let node = &nodes[id];
            if id != ROOT {
                // Ancestors of a popped node are always the first depth - 1 path entries
                self.path.truncate(node.depth - 1);
                self.path.push(&node.token);
            }

            self.stack
                .extend(node.children.values().copied().filter(|&child| child != id));

            if let Some(payload) = node.payload.as_ref() {
                return Some((self.path.clone(), payload));
            }
        }
        None
    }
}
