//! Benchmarks for catalog build performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks test the pipeline stages at various source sizes.

use airban::ingest::{AuthorityRow, TermRow};
use airban::reconcile::BuildOptions;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const LABELS: &[&str] = &[
    "액체/겔(gel)류 물질",
    "끝이 뾰족한 무기및 날카로운 물체",
    "둔기",
    "화기류, 총기류,무기류",
    "화학물질 및 유독성 물질",
    "폭발물과 인화성 물질",
];

/// Creates synthetic authority rows cycling through the label set.
fn create_authority_rows(count: usize) -> Vec<AuthorityRow> {
    (0..count)
        .map(|i| AuthorityRow {
            category_label: LABELS[i % LABELS.len()].to_string(),
            name_ko: format!("물품 {}", i),
            cabin: if i % 2 == 0 { "○" } else { "×" }.to_string(),
            checked: if i % 3 == 0 { "×" } else { "○" }.to_string(),
        })
        .collect()
}

/// Creates synthetic term rows, half of them matching authority names.
fn create_term_rows(count: usize) -> Vec<TermRow> {
    (0..count)
        .map(|i| TermRow {
            term_ko: if i % 2 == 0 {
                format!("물품 {}", i)
            } else {
                format!("검색어 {}", i)
            },
            term_en: format!("item {}", i),
            broad_category: "생활용품류".to_string(),
            search_count: (i % 100).to_string(),
        })
        .collect()
}

/// Benchmark join-key normalization.
fn bench_normalize_key(c: &mut Criterion) {
    c.bench_function("normalize_key", |b| {
        b.iter(|| airban::normalize_key(black_box("  \"액체/겔(Gel)류  물질\"  ")));
    });
}

/// Benchmark label classification.
fn bench_classify_primary(c: &mut Criterion) {
    c.bench_function("classify_primary", |b| {
        b.iter(|| airban::classify_primary(black_box("화학물질 및 유독성 물질")));
    });
}

/// Benchmark reconciliation at various source sizes.
fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");
    let options = BuildOptions::default();

    for row_count in [100, 500, 1000].iter() {
        let authority = create_authority_rows(*row_count);
        let terms = create_term_rows(*row_count);

        group.bench_with_input(
            BenchmarkId::new("rows", row_count),
            &(authority, terms),
            |b, (authority, terms)| {
                b.iter(|| {
                    let _ = airban::reconcile(black_box(authority), black_box(terms), &options);
                });
            },
        );
    }

    group.finish();
}

/// Benchmark autocomplete index construction.
fn bench_autocomplete(c: &mut Criterion) {
    let mut group = c.benchmark_group("autocomplete");
    let options = BuildOptions::default();

    for row_count in [100, 1000].iter() {
        let authority = create_authority_rows(*row_count);
        let terms = create_term_rows(*row_count);
        let catalog = airban::reconcile(&authority, &terms, &options).unwrap();

        group.bench_with_input(
            BenchmarkId::new("rows", row_count),
            &(terms, catalog),
            |b, (terms, catalog)| {
                b.iter(|| {
                    let _ = airban::build_autocomplete(
                        black_box(terms),
                        black_box(catalog),
                        &options,
                    );
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_normalize_key,
    bench_classify_primary,
    bench_reconcile,
    bench_autocomplete,
);
criterion_main!(benches);
