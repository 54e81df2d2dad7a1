//! Benchmarks for the usage tracking engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use factlink_usage::prelude::*;

const LANGUAGES: [&str; 8] = ["de", "en", "fr", "es", "it", "nl", "pt", "sv"];

/// Helper to build a page that used several aspects of `entities` entities
fn setup_page(entities: usize) -> PageEntityUsages {
    let mut accumulator = HashUsageAccumulator::new();

    for n in 0..entities {
        let id = EntityId::new(format!("Q{n}"));
        accumulator.add_label_usage(id.clone(), Some(LANGUAGES[n % LANGUAGES.len()]));
        accumulator.add_title_usage(id.clone());
        accumulator.add_sitelink_usage(id);
    }

    PageEntityUsages::new(PageId(1), accumulator.usages().into_values())
}

/// Helper to build a transformer that considers labels and sitelinks
/// relevant for every entity of `page`
fn setup_transformer(page: &PageEntityUsages) -> UsageAspectTransformer {
    let mut transformer = UsageAspectTransformer::new();

    for entity_id in page.entity_ids() {
        transformer.set_relevant_aspects(
            entity_id,
            [
                AspectKey::new(Aspect::Label),
                AspectKey::new(Aspect::Sitelink),
            ],
        );
    }

    transformer
}

fn bench_accumulator(c: &mut Criterion) {
    c.bench_function("accumulator_add_usage", |b| {
        let mut accumulator = HashUsageAccumulator::new();
        b.iter(|| {
            accumulator.add_label_usage(black_box(EntityId::new("Q42")), Some("de"));
        })
    });

    let mut accumulator = HashUsageAccumulator::new();
    for n in 0..100 {
        accumulator.add_title_usage(EntityId::new(format!("Q{n}")));
    }

    c.bench_function("accumulator_snapshot_100", |b| {
        b.iter(|| {
            let usages = accumulator.usages();
            black_box(usages);
        })
    });
}

fn bench_filtered_usages(c: &mut Criterion) {
    let page = setup_page(1);
    let transformer = setup_transformer(&page);
    let q0 = EntityId::new("Q0");
    let aspects = page.usage_aspect_keys(&q0);

    c.bench_function("filtered_usages_single_entity", |b| {
        b.iter(|| {
            let usages = transformer.filtered_usages(black_box(&q0), black_box(&aspects));
            black_box(usages);
        })
    });

    let wildcard = [AspectKey::new(Aspect::All)];
    c.bench_function("filtered_usages_wildcard", |b| {
        b.iter(|| {
            let usages = transformer.filtered_usages(black_box(&q0), black_box(&wildcard));
            black_box(usages);
        })
    });
}

fn bench_transform_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform_page_entity_usages");

    for entities in [10, 100, 500] {
        let page = setup_page(entities);
        let transformer = setup_transformer(&page);

        group.bench_with_input(
            BenchmarkId::from_parameter(entities),
            &page,
            |b, page| {
                b.iter(|| {
                    let transformed = transformer.transform_page_entity_usages(black_box(page));
                    black_box(transformed);
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_accumulator,
    bench_filtered_usages,
    bench_transform_page
);
criterion_main!(benches);
