// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Criterion benchmarks for the redaction pipeline

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use redactor::redaction::masking::{apply_masks, MaskSpan, MaskStyle};
use redactor::redaction::{
    Categories, Category, ConceptKeywordSet, EntityAnnotator, RedactionConfig, RedactionEngine,
    RuleAnnotator, Thesaurus,
};

const LETTER: &str = "Dear John Doe,\n\
    On March 3, 2021 we met at 1234 Elm Street, Apt 56, Springfield 62704.\n\
    Call me at (555) 123-4567 or write to john.doe@example.com.\n\
    The merger was a fraud. Lunch is at noon on Friday.\n";

fn config(categories: Categories, concepts: &[&str]) -> RedactionConfig {
    RedactionConfig {
        categories,
        concepts: concepts.iter().map(|c| c.to_string()).collect(),
        ..Default::default()
    }
}

fn all_categories() -> Categories {
    Categories {
        names: true,
        dates: true,
        phones: true,
        address: true,
        emails: true,
    }
}

fn only(category: Category) -> Categories {
    let mut categories = Categories::default();
    match category {
        Category::Name => categories.names = true,
        Category::Date => categories.dates = true,
        Category::Phone => categories.phones = true,
        Category::Address => categories.address = true,
        Category::Email => categories.emails = true,
        Category::Concept => {}
    }
    categories
}

fn bench_annotate(c: &mut Criterion) {
    let annotator = RuleAnnotator::new();
    c.bench_function("annotate_letter", |b| {
        b.iter(|| annotator.annotate(black_box(LETTER)))
    });
}

fn bench_engine_build(c: &mut Criterion) {
    let config = config(all_categories(), &["merger", "fraud"]);
    c.bench_function("engine_build", |b| {
        b.iter(|| RedactionEngine::new(black_box(&config)))
    });
}

fn bench_per_category(c: &mut Criterion) {
    let mut group = c.benchmark_group("per_category");

    for category in Category::ALL {
        let concepts: &[&str] = if category == Category::Concept {
            &["merger"]
        } else {
            &[]
        };
        let engine = RedactionEngine::new(&config(only(category), concepts)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(category), &engine, |b, engine| {
            b.iter(|| engine.redact(black_box(LETTER)))
        });
    }

    group.finish();
}

fn bench_large_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_document");
    let engine = RedactionEngine::new(&config(all_categories(), &["fraud"])).unwrap();

    for size in [10, 100, 500].iter() {
        let text = LETTER.repeat(*size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| engine.redact(black_box(text)))
        });
    }

    group.finish();
}

fn bench_concept_expansion(c: &mut Criterion) {
    let thesaurus = Thesaurus::builtin().unwrap();
    let seeds = ["fraud", "merger", "money", "energy", "lawsuit"];
    c.bench_function("concept_expansion", |b| {
        b.iter(|| ConceptKeywordSet::expand(black_box(&seeds), Some(&thesaurus)))
    });
}

fn bench_apply_masks(c: &mut Criterion) {
    let text = LETTER.repeat(50);
    let spans: Vec<MaskSpan> = (0..text.len())
        .step_by(17)
        .filter(|i| text.is_char_boundary(*i) && text.is_char_boundary(*i + 5))
        .map(|i| MaskSpan::new(i, i + 5, MaskStyle::Shape))
        .collect();

    c.bench_function("apply_masks", |b| {
        b.iter(|| apply_masks(black_box(&text), black_box(spans.clone())))
    });
}

criterion_group!(
    benches,
    bench_annotate,
    bench_engine_build,
    bench_per_category,
    bench_large_document,
    bench_concept_expansion,
    bench_apply_masks,
);

criterion_main!(benches);
