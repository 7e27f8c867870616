// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Behavioural and property-based tests for the Kauai Phrase Trie automaton.


use test_case::test_case;

use super::*;
use crate::tokenizer::{Token, Tokenizer, WhitespaceTokenizer};

fn tokens(text: &str) -> Vec<Token> {
    WhitespaceTokenizer::new().tokenize(text).unwrap()
}

fn texts(tokens: &[Token]) -> impl Iterator<Item = &str> + '_ {
    tokens.iter().map(|token| token.text.as_str())
}

fn trie_of(phrases: &[&str]) -> KauaiPhraseTrie<String> {
    let mut trie = KauaiPhraseTrie::new();
    for phrase in phrases {
        trie.insert(phrase.split_whitespace(), phrase.to_string());
    }
    trie
}

fn scan(automaton: &PhraseAutomaton<String>, stream: &[Token]) -> Vec<(String, usize, usize)> {
    automaton
        .find_all_occurrences(stream)
        .map(|hit| (hit.payload.clone(), hit.start, hit.end))
        .collect()
}

#[test]
fn test_span_correctness() {
    let stream = tokens("x = A B y");
    let mut trie = KauaiPhraseTrie::new();
    trie.insert(["A", "B"], "P");

    let automaton = trie.compile(texts(&stream));
    let hits: Vec<_> = automaton.find_all_occurrences(&stream).collect();

    assert_eq!(hits.len(), 1);
    assert_eq!(*hits[0].payload, "P");
    assert_eq!(hits[0].start, stream[2].start_offset);
    assert_eq!(hits[0].end, stream[3].end_offset);
    assert_eq!((hits[0].first_token, hits[0].last_token), (2, 3));
    assert_eq!(hits[0].token_len(), 2);
    assert_eq!(hits[0].text("x = A B y"), Some("A B"));
}

#[test]
fn test_overlap_and_nesting() {
    let stream = tokens("A B");
    let automaton = trie_of(&["A", "A B"]).compile(texts(&stream));

    assert_eq!(
        scan(&automaton, &stream),
        vec![("A".to_string(), 0, 1), ("A B".to_string(), 0, 3)]
    );
}

#[test]
fn test_suffix_matches_through_failure_links() {
    // "B C" and "C" are proper suffixes of "A B C" and must be reported at the same position
    let stream = tokens("A B C D");
    let automaton = trie_of(&["A B C", "B C", "C", "C D", "B"]).compile(texts(&stream));

    assert_eq!(
        scan(&automaton, &stream),
        vec![
            ("B".to_string(), 2, 3),
            ("A B C".to_string(), 0, 5),
            ("B C".to_string(), 2, 5),
            ("C".to_string(), 4, 5),
            ("C D".to_string(), 4, 7),
        ]
    );
}

#[test]
fn test_failure_after_partial_match() {
    // The scan falls back from the "A B" prefix of "A B D" into "B C"
    let stream = tokens("A B C");
    let automaton = trie_of(&["A B D", "B C"]).compile(texts(&stream));

    assert_eq!(scan(&automaton, &stream), vec![("B C".to_string(), 2, 5)]);
}

#[test]
fn test_repeated_tokens() {
    let stream = tokens("a a a");
    let automaton = trie_of(&["a a"]).compile(texts(&stream));

    assert_eq!(
        scan(&automaton, &stream),
        vec![("a a".to_string(), 0, 3), ("a a".to_string(), 2, 5)]
    );
}

#[test]
fn test_failure_links_decrease_depth() {
    let automaton = trie_of(&["a b c", "b c", "c", "a a b", "b"]).compile(Vec::<&str>::new());
    let trie = automaton.trie();

    for id in 1..trie.node_count() {
        let node = trie.node(id).unwrap();
        let fail = node.fail().expect("every non-root node is linked");
        assert!(trie.node(fail).unwrap().depth() < node.depth());
    }
    assert_eq!(trie.root().fail(), None);
}

#[test_case(&[], "A B" ; "empty trie")]
#[test_case(&["A B"], "" ; "empty input")]
#[test_case(&["A B"], "B A" ; "reversed order")]
#[test_case(&["A B C"], "A B" ; "truncated phrase")]
fn test_no_matches(phrases: &[&str], text: &str) {
    let stream = tokens(text);
    let automaton = trie_of(phrases).compile(texts(&stream));
    assert!(scan(&automaton, &stream).is_empty());
}

#[test]
fn test_out_of_vocabulary_tokens_reset_to_root() {
    let mut trie = KauaiPhraseTrie::new();
    trie.insert(["A", "B"], "ab".to_string());
    trie.insert(["B"], "b".to_string());
    let automaton = trie.compile(Vec::<&str>::new());

    // "Z" is unknown: "A Z B" must not produce "A B"
    let stream = tokens("A Z B A B");
    let mut hits = automaton.find_all_occurrences(&stream);
    let collected: Vec<_> = hits
        .by_ref()
        .map(|hit| (hit.payload.clone(), hit.first_token, hit.last_token))
        .collect();

    assert_eq!(
        collected,
        vec![
            ("b".to_string(), 2, 2),
            ("ab".to_string(), 3, 4),
            ("b".to_string(), 4, 4),
        ]
    );
    assert_eq!(hits.out_of_vocabulary(), 1);
    assert!(!automaton.covers(&stream));
}

#[test]
fn test_extend_vocabulary_adds_root_loops_only() {
    let stream = tokens("x A B");
    let mut automaton = trie_of(&["A B"]).compile(Vec::<&str>::new());
    let nodes = automaton.trie().node_count();

    assert_eq!(automaton.extend_vocabulary(texts(&stream)), 1);
    assert_eq!(automaton.extend_vocabulary(texts(&stream)), 0);
    assert!(automaton.covers(&stream));
    assert_eq!(automaton.trie().node_count(), nodes);
    assert_eq!(scan(&automaton, &stream), vec![("A B".to_string(), 2, 5)]);
}

#[test]
fn test_reset_vocabulary_keeps_matches() {
    let stream = tokens("the Project Manager of the Material Project Party");
    let mut automaton = trie_of(&["Project", "Project Manager", "Material Project Party"])
        .compile(texts(&stream));
    let before = scan(&automaton, &stream);
    let root_edges = automaton.trie().root().children.len();

    assert_eq!(automaton.reset_vocabulary(), 2);
    assert_eq!(automaton.vocabulary().len(), 4);
    assert!(!automaton.covers(&stream));
    assert!(automaton.trie().root().children.len() < root_edges);
    assert_eq!(scan(&automaton, &stream), before);
    assert_eq!(automaton.reset_vocabulary(), 0);
}

#[test]
fn test_recompile_is_idempotent() {
    let stream = tokens("the Project Manager of the Material Project Party");
    let mut automaton = trie_of(&["Project", "Project Manager", "Material Project Party"])
        .compile(texts(&stream));
    let before = scan(&automaton, &stream);

    automaton.recompile(Vec::<&str>::new());
    assert_eq!(scan(&automaton, &stream), before);

    automaton.recompile(texts(&stream));
    assert_eq!(scan(&automaton, &stream), before);
    assert_eq!(before.len(), 4);
}

#[test]
fn test_view_ignores_root_loops() {
    let stream = tokens("q A B");
    let automaton = trie_of(&["A B"]).compile(texts(&stream));
    let trie = automaton.trie();

    assert!(!trie.starts_with(["q"]));
    assert!(!trie.contains(["B"]));
    assert_eq!(trie.count(["B"]), 0);
    assert_eq!(trie.len(), 1);
    assert_eq!(trie.keys().collect::<Vec<_>>(), vec![vec!["A", "B"]]);
    assert_eq!(trie.unique_tokens().len(), 2);
}

#[test]
fn test_into_trie_allows_new_insertions() {
    let stream = tokens("A B C");
    let automaton = trie_of(&["A B"]).compile(texts(&stream));

    let mut trie = automaton.into_trie();
    assert_eq!(trie.root().fail(), None);
    assert!(!trie.starts_with(["C"]));
    trie.insert(["B", "C"], "B C".to_string());

    let automaton = trie.compile(texts(&stream));
    assert_eq!(
        scan(&automaton, &stream),
        vec![("A B".to_string(), 0, 3), ("B C".to_string(), 2, 5)]
    );
}

#[test]
fn test_partial_consumption_has_no_side_effects() {
    let stream = tokens("A A A A");
    let automaton = trie_of(&["A"]).compile(texts(&stream));

    let first: Vec<_> = automaton.find_all_occurrences(&stream).take(2).collect();
    assert_eq!(first.len(), 2);
    assert_eq!(automaton.find_all_occurrences(&stream).count(), 4);
}

#[test]
fn test_concurrent_scans_share_automaton() {
    let stream = tokens("Borrower and Subsidiaries of the Borrower");
    let automaton = trie_of(&["Borrower", "Subsidiaries", "Subsidiaries of the Borrower"])
        .compile(texts(&stream));
    let expected = scan(&automaton, &stream);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| scan(&automaton, &stream)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
    assert_eq!(expected.len(), 4);
}
