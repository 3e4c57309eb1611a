//! Hot-path benchmarks: counters on every keystroke and request building

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use humanizer::client::SubmissionController;
use humanizer::services::{CompletionClient, Rewriter};
use humanizer::utils::text::word_count;
use humanizer::Settings;
use std::sync::Arc;

fn draft(words: usize) -> String {
    (0..words)
        .map(|i| if i % 7 == 0 { "sentence.\n" } else { "word " })
        .collect()
}

fn bench_word_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("word_count");
    for size in [300, 500, 2000] {
        let text = draft(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| word_count(black_box(text)))
        });
    }
    group.finish();
}

fn bench_keystroke(c: &mut Criterion) {
    let text = draft(2000);
    c.bench_function("controller_input_and_view", |b| {
        let mut controller = SubmissionController::new();
        b.iter(|| {
            controller.input(black_box(text.as_str()));
            black_box(controller.view())
        })
    });
}

fn bench_build_request(c: &mut Criterion) {
    let settings = Settings::default();
    let client = CompletionClient::new(&settings.provider).expect("client");
    let rewriter = Rewriter::new(&settings, Arc::new(client));
    let text = draft(2000);

    c.bench_function("build_completion_request", |b| {
        b.iter(|| rewriter.build_request(black_box(&text)))
    });
}

criterion_group!(benches, bench_word_count, bench_keystroke, bench_build_request);
criterion_main!(benches);
