//! Mauka Phrase Benchmarks
//!
//! Benchmarks for phrase insertion, automaton compilation, and scanning,
//! implemented with the Criterion framework.
//!
//! To run the benchmarks:
//! ```bash
//! cargo bench --features benchmarking
//! ```

use criterion::{
    black_box, criterion_group, criterion_main, measurement::WallTime, BenchmarkId, Criterion,
    SamplingMode, Throughput,
};
use std::time::Duration;

use mauka_phrase_lib::config::{CompilePolicy, MatcherConfig};
use mauka_phrase_lib::data_structures::kauai_phrase_trie::KauaiPhraseTrie;
use mauka_phrase_lib::search::PhraseSearcher;
use mauka_phrase_lib::tokenizer::{Token, Tokenizer, WhitespaceTokenizer};

const WORDS: [&str; 16] = [
    "borrower", "project", "party", "material", "sanctioned", "person", "country", "laws",
    "anti", "money", "laundering", "corruption", "officer", "director", "agent", "affiliate",
];

/// Deterministic phrase of 1 to 4 words.
fn phrase(seed: usize) -> Vec<&'static str> {
    let len = seed % 4 + 1;
    (0..len)
        .map(|i| WORDS[(seed * 7 + i * 13) % WORDS.len()])
        .collect()
}

/// Deterministic text of `len` whitespace separated words.
fn text(len: usize) -> String {
    (0..len)
        .map(|i| WORDS[(i * 5 + i / 3) % WORDS.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

fn trie(phrases: usize) -> KauaiPhraseTrie<usize> {
    let mut trie = KauaiPhraseTrie::new();
    for i in 0..phrases {
        trie.insert(phrase(i), i);
    }
    trie
}

fn vocabulary(tokens: &[Token]) -> impl Iterator<Item = &str> + '_ {
    tokens.iter().map(|token| token.text.as_str())
}

/// Benchmark the Kauai Phrase Trie and its automaton
fn bench_kauai_phrase_trie(c: &mut Criterion) {
    let mut group = c.benchmark_group("kauai_phrase_trie");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));

    for size in [100, 1000, 10_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("insert", size), size, |b, &size| {
            b.iter(|| black_box(trie(size)));
        });
    }

    let tokens = WhitespaceTokenizer::new().tokenize(&text(2_000)).unwrap_or_default();
    for size in [100, 1000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::new("compile", size), size, |b, &size| {
            b.iter_batched(
                || trie(size),
                |trie| black_box(trie.compile(vocabulary(&tokens))),
                criterion::BatchSize::SmallInput,
            );
        });
    }

    for len in [1_000, 10_000, 100_000].iter() {
        let tokens = WhitespaceTokenizer::new().tokenize(&text(*len)).unwrap_or_default();
        let automaton = trie(1000).compile(vocabulary(&tokens));
        group.throughput(Throughput::Elements(*len as u64));
        group.bench_with_input(BenchmarkId::new("scan", len), &tokens, |b, tokens| {
            b.iter(|| black_box(automaton.find_all_occurrences(tokens).count()));
        });
    }

    group.finish();
}

/// Benchmark text-level search under each compile policy
fn bench_phrase_searcher(c: &mut Criterion) {
    let mut group = c.benchmark_group("phrase_searcher");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(2));

    let body = text(5_000);
    for policy in [
        CompilePolicy::PerCall,
        CompilePolicy::OnNewVocabulary,
        CompilePolicy::Frozen,
    ] {
        let config = MatcherConfig {
            compile_policy: policy,
            ..MatcherConfig::default()
        };
        let mut searcher: PhraseSearcher<usize> =
            PhraseSearcher::new(Box::new(WhitespaceTokenizer::new()), config);
        for i in 0..1000 {
            searcher.add_tokens(phrase(i), i);
        }

        group.throughput(Throughput::Bytes(body.len() as u64));
        group.bench_function(BenchmarkId::new("find_all", format!("{policy:?}")), |b| {
            b.iter(|| black_box(searcher.find_all(&body).map(|hits| hits.len())));
        });
    }

    group.finish();
}

// Group all benchmarks together
criterion_group! {
    name = benches;
    config = Criterion::default()
        .with_measurement(WallTime)
        .significance_level(0.01)
        .noise_threshold(0.02)
        .confidence_level(0.99);
    targets = bench_kauai_phrase_trie, bench_phrase_searcher
}

criterion_main!(benches);
