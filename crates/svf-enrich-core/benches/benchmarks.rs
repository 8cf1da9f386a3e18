//! Criterion benchmarks for the svf-enrich-core pipeline.
//!
//! The source index and report are built outside the benchmark loop so the
//! lexical filter and resolution are measured without the tree walk.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::fs;
use std::path::Path;

use svf_enrich_core::{Enricher, EnrichOptions, Lexicon, Query, Report, SourceIndex};

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../tests");

fn load_report() -> Report {
    let path = Path::new(FIXTURES_DIR).join("reports/sample.json");
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

fn fixture_options() -> EnrichOptions {
    EnrichOptions {
        root_dir: Path::new(FIXTURES_DIR).join("sources"),
        ..EnrichOptions::default()
    }
}

fn bench_filter_names(c: &mut Criterion) {
    let lexicon = Lexicon::c_family();
    let line = r#"    node->items[idx].data = (struct entry *)malloc(sizeof(struct entry) * MAX_ITEMS + "pad");"#;

    c.bench_function("lexicon/filter_names", |b| {
        b.iter(|| lexicon.filter_names(black_box(line), black_box(true)))
    });
}

fn bench_resolve_duplicate(c: &mut Criterion) {
    let index = SourceIndex::build(&fixture_options().root_dir).unwrap();
    let query = Query {
        file: "list.c",
        line: 6,
        column: Some(22),
        function_hint: Some("list_push"),
    };

    c.bench_function("source_index/resolve_duplicate", |b| {
        b.iter(|| index.resolve(black_box(&query)))
    });
}

fn bench_enrich_report(c: &mut Criterion) {
    let report = load_report();
    let enricher = Enricher::new(fixture_options()).unwrap();

    c.bench_function("enricher/sample_report", |b| {
        b.iter(|| enricher.enrich_all(black_box(report.clone())))
    });
}

criterion_group!(
    benches,
    bench_filter_names,
    bench_resolve_duplicate,
    bench_enrich_report
);
criterion_main!(benches);
