// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Integration tests for phrase search over a full paragraph.
//! Covers the searcher facade, the shared searcher and the command line tool.

use std::fs;
use std::process::Command;
use std::thread;

use mauka_phrase_lib::config::{CompilePolicy, MatcherConfig, MaukaPhraseConfig, TokenizerKind};
use mauka_phrase_lib::search::{group_by_text, PhraseSearcher, SharedPhraseSearcher};
use mauka_phrase_lib::tokenizer::{RegexTokenizer, UnicodeWordTokenizer};

const DEFINED_TERMS: [&str; 15] = [
    "Borrower",
    "Subsidiaries",
    "Material Project Party",
    "Project",
    "Project Manager",
    "Anti-Money Laundering Laws",
    "Sanctions",
    "Anti-Corruption Laws",
    "Affiliates",
    "Sanctioned Person",
    "Sanctioned Country",
    "Person",
    "Officer",
    "Director",
    "Agents",
];

const AGREEMENT: &str = "The operations of each Borrower, and the activities of the officers and directors \
    and, to the knowledge of each Borrower, any Subsidiaries of the Borrowers, \
    employees, agents and representatives of each Borrower, while acting on behalf of \
    such Borrower, and to the knowledge of each Borrower the operations of each Material \
    Project Party in relation to the Project, have been conducted at all times in \
    compliance with all applicable Anti-Money Laundering Laws, Sanctions, and \
    Anti-Corruption Laws. Neither Borrower, nor any Subsidiaries of the Borrowers, nor \
    any officer or director or, to the knowledge of any Borrower, Affiliates, employee, \
    agent or representative of either Borrower has engaged, directly or indirectly, in \
    any activity or conduct which would violate any Anti-Corruption Laws or Anti-Money \
    Laundering Laws. Neither Borrower nor any Subsidiaries of the Borrowers, nor any \
    officer or director or, to the knowledge of any Borrower, Affiliates, employee, \
    agent or representative of either Borrower has engaged, directly or indirectly, in \
    any dealings or transactions with, involving or for the benefit of a Sanctioned \
    Person,or in or involving a Sanctioned Country, where such dealings or transactions \
    would violate Sanctions, in the five (5) year period immediately preceding the date \
    hereof.";

fn expected_groups() -> Vec<(&'static str, Vec<(usize, usize)>)> {
    vec![
        (
            "Borrower",
            vec![
                (23, 31),
                (112, 120),
                (203, 211),
                (244, 252),
                (283, 291),
                (506, 514),
                (611, 619),
                (677, 685),
                (834, 842),
                (938, 946),
                (1004, 1012),
            ],
        ),
        ("Subsidiaries", vec![(126, 138), (524, 536), (851, 863)]),
        ("Project", vec![(324, 331), (357, 364)]),
        ("Material Project Party", vec![(315, 337)]),
        ("Anti-Money Laundering Laws", vec![(433, 459), (798, 824)]),
        ("Sanctions", vec![(461, 470), (1231, 1240)]),
        ("Anti-Corruption Laws", vec![(476, 496), (774, 794)]),
        ("Affiliates", vec![(621, 631), (948, 958)]),
        ("Sanctioned Person", vec![(1122, 1139)]),
        ("Person", vec![(1133, 1139)]),
        ("Sanctioned Country", vec![(1161, 1179)]),
    ]
}

fn scan_groups(searcher: &mut PhraseSearcher<String>) -> Vec<(String, Vec<(usize, usize)>)> {
    let hits = searcher.find_all(AGREEMENT).unwrap();
    group_by_text(&hits)
        .into_iter()
        .map(|group| (group.text.to_string(), group.spans))
        .collect()
}

fn owned(expected: Vec<(&'static str, Vec<(usize, usize)>)>) -> Vec<(String, Vec<(usize, usize)>)> {
    expected
        .into_iter()
        .map(|(text, spans)| (text.to_string(), spans))
        .collect()
}

#[test]
fn test_defined_terms_in_agreement() {
    let mut searcher: PhraseSearcher<String> =
        PhraseSearcher::new(Box::new(UnicodeWordTokenizer::new()), MatcherConfig::default());
    assert_eq!(searcher.load_texts(&DEFINED_TERMS).unwrap(), 15);

    assert_eq!(scan_groups(&mut searcher), owned(expected_groups()));

    let hits = searcher.find_all(AGREEMENT).unwrap();
    assert_eq!(hits.len(), 28);
    for hit in &hits {
        assert_eq!(&AGREEMENT[hit.byte_start..hit.byte_end], hit.text);
        assert_eq!(hit.payload, hit.text);
    }
}

#[test]
fn test_tokenizers_and_policies_agree() {
    for policy in [
        CompilePolicy::PerCall,
        CompilePolicy::OnNewVocabulary,
        CompilePolicy::Frozen,
    ] {
        let config = MatcherConfig {
            compile_policy: policy,
            ..MatcherConfig::default()
        };

        let mut word: PhraseSearcher<String> =
            PhraseSearcher::new(Box::new(UnicodeWordTokenizer::new()), config.clone());
        word.load_texts(&DEFINED_TERMS).unwrap();

        let mut regex: PhraseSearcher<String> =
            PhraseSearcher::new(Box::new(RegexTokenizer::new()), config);
        regex.load_texts(&DEFINED_TERMS).unwrap();

        assert_eq!(scan_groups(&mut word), scan_groups(&mut regex));
        assert_eq!(scan_groups(&mut word), owned(expected_groups()));
    }
}

#[test]
fn test_searcher_from_config() {
    let mut config = MaukaPhraseConfig::default();
    config.tokenizer.kind = TokenizerKind::Whitespace;

    let mut searcher = PhraseSearcher::<String>::from_config(&config).unwrap();
    searcher.load_texts(&["Sanctioned Country,", "Borrower"]).unwrap();

    // whitespace tokens keep punctuation attached
    let hits = searcher.find_all(AGREEMENT).unwrap();
    let texts: Vec<&str> = hits.iter().map(|hit| hit.text).collect();
    assert_eq!(
        texts,
        vec!["Borrower", "Borrower", "Borrower", "Borrower", "Sanctioned Country,"]
    );
}

#[test]
fn test_shared_searcher_across_threads() {
    let mut searcher: PhraseSearcher<String> =
        PhraseSearcher::new(Box::new(UnicodeWordTokenizer::new()), MatcherConfig::default());
    searcher.load_texts(&DEFINED_TERMS).unwrap();
    let shared = SharedPhraseSearcher::new(searcher);

    let sentences: Vec<&str> = AGREEMENT.split(". ").collect();
    let expected: Vec<usize> = sentences
        .iter()
        .map(|sentence| shared.find_all(sentence).unwrap().len())
        .collect();
    assert_eq!(expected.iter().sum::<usize>(), 28);

    thread::scope(|scope| {
        for _ in 0..4 {
            let shared = shared.clone();
            let sentences = &sentences;
            let expected = &expected;
            scope.spawn(move || {
                for (sentence, count) in sentences.iter().zip(expected) {
                    assert_eq!(shared.find_all(sentence).unwrap().len(), *count);
                }
            });
        }
    });
}

#[test]
fn test_cli_scan_json() {
    let dir = tempfile::tempdir().unwrap();
    let phrases = dir.path().join("phrases.txt");
    let text = dir.path().join("agreement.txt");
    fs::write(&phrases, DEFINED_TERMS.join("\n")).unwrap();
    fs::write(&text, AGREEMENT).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_mauka_phrase"))
        .current_dir(dir.path())
        .env("RUST_LOG", "error")
        .arg("scan")
        .arg("--phrases")
        .arg(&phrases)
        .arg("--text")
        .arg(&text)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let groups: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let groups = groups.as_array().unwrap();
    assert_eq!(groups.len(), 11);
    assert_eq!(groups[0]["text"], "Borrower");
    assert_eq!(groups[3]["text"], "Material Project Party");
    assert_eq!(groups[3]["spans"], serde_json::json!([[315, 337]]));
}

#[test]
fn test_cli_scan_text_reports_char_spans() {
    let dir = tempfile::tempdir().unwrap();
    let phrases = dir.path().join("phrases.txt");
    let text = dir.path().join("memo.txt");
    fs::write(&phrases, "Project\nMaterial Project Party\n").unwrap();
    fs::write(&text, "Überblick: café Project and the Material Project Party").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_mauka_phrase"))
        .current_dir(dir.path())
        .env("RUST_LOG", "error")
        .arg("scan")
        .arg("--phrases")
        .arg(&phrases)
        .arg("--text")
        .arg(&text)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec!["Project: (16, 23), (41, 48)", "Material Project Party: (32, 54)"]
    );
}

#[test]
fn test_cli_gen_config_then_validate() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conf").join("mauka_phrase.toml");

    let status = Command::new(env!("CARGO_BIN_EXE_mauka_phrase"))
        .current_dir(dir.path())
        .args(["gen-config", "--output"])
        .arg(&path)
        .status()
        .unwrap();
    assert!(status.success());
    assert!(path.exists());

    let status = Command::new(env!("CARGO_BIN_EXE_mauka_phrase"))
        .current_dir(dir.path())
        .arg("--config")
        .arg(&path)
        .arg("validate")
        .status()
        .unwrap();
    assert!(status.success());

    let status = Command::new(env!("CARGO_BIN_EXE_mauka_phrase"))
        .current_dir(dir.path())
        .arg("--config")
        .arg(dir.path().join("missing.toml"))
        .arg("validate")
        .status()
        .unwrap();
    assert!(!status.success());
}
