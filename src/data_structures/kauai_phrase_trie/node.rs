// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Node implementation for the Kauai Phrase Trie.
//!
//! Nodes live in a single arena owned by the trie and address each other by
//! [`NodeId`]. Child edges are the ownership relation; failure links are plain
//! indices and never own their target.

use fnv::FnvBuildHasher;
use hashbrown::HashMap;

/// Index of a node inside the trie arena.
pub type NodeId = usize;

/// The root always occupies the first arena slot.
pub(crate) const ROOT: NodeId = 0;

/// Edge map keyed by token text.
pub(crate) type TokenMap<V> = HashMap<String, V, FnvBuildHasher>;

/// A node in the Kauai Phrase Trie.
///
/// Each node represents one token position on a unique path from the root.
/// Terminal nodes carry the payload of the phrase ending there.
#[derive(Debug, Clone)]
pub struct PhraseNode<P> {
    /// Label of the incoming edge (empty for the root)
    pub(crate) token: String,

    /// Map of token texts to child nodes. After compilation the root also
    /// holds self-loops for vocabulary tokens it has no real child for.
    pub(crate) children: TokenMap<NodeId>,

    /// Path length from the root
    pub(crate) depth: usize,

    /// Payload of the phrase ending at this node, if any
    pub(crate) payload: Option<P>,

    /// Number of insertions whose path passed through this node
    pub(crate) count: usize,

    /// Longest proper suffix state; `None` before compilation and for the root
    pub(crate) fail: Option<NodeId>,
}

impl<P> PhraseNode<P> {
    /// Creates the root node.
    pub(crate) fn root() -> Self {
        Self {
            count: 0,
            ..Self::new(String::new(), 0)
        }
    }

    /// Creates a fresh node reached through `token` at the given depth.
    pub(crate) fn new(token: String, depth: usize) -> Self {
        Self {
            token,
            children: TokenMap::default(),
            depth,
            payload: None,
            count: 1,
            fail: None,
        }
    }

    /// Label of the incoming edge.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Path length from the root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Payload stored at this node, if a phrase ends here.
    pub fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    /// Number of insertions that passed through this node.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Failure link target, once compiled.
    pub fn fail(&self) -> Option<NodeId> {
        self.fail
    }

    /// Whether an inserted phrase ends at this node.
    pub fn is_terminal(&self) -> bool {
        self.payload.is_some()
    }
}
