// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Standoff-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Standoff and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use standoff::query::named_entity;
use standoff::{semantic_unit, DependencyTree, Document, Pipeline};

mod fixtures;
mod settings;

// Benchmark identity (keep stable):
// - Group names in this file: `query.semantic_unit`, `query.named_entity`,
//   `query.dependency_tree`, `pipeline.run_batch`
// - Case IDs are the fixture case ids (`small`, `medium`, `large_long_chains`).
fn benches_resolve(c: &mut Criterion) {
    let docs: Vec<(&'static str, Document)> = fixtures::CASES
        .into_iter()
        .map(|case| (case.id(), fixtures::fixture(case)))
        .collect();

    {
        let mut group = c.benchmark_group("query.semantic_unit");

        for (case_id, doc) in &docs {
            let pronouns = fixtures::pronouns(doc);
            group.throughput(Throughput::Elements(pronouns.len() as u64));
            group.bench_function(*case_id, |b| {
                b.iter(|| {
                    let mut acc = 0usize;
                    for id in &pronouns {
                        let token = doc.token(id.as_str()).expect("token");
                        let unit = semantic_unit(black_box(token)).expect("semantic_unit");
                        acc += unit.tokens().len();
                    }
                    black_box(acc)
                })
            });
        }

        group.finish();
    }

    {
        let mut group = c.benchmark_group("query.named_entity");

        for (case_id, doc) in &docs {
            let tokens = doc.tokens().count();
            group.throughput(Throughput::Elements(tokens as u64));
            group.bench_function(*case_id, |b| {
                b.iter(|| {
                    let mut acc = 0usize;
                    for token in doc.tokens() {
                        if let Some(span) = named_entity(black_box(token)).expect("named_entity") {
                            acc += span.len();
                        }
                    }
                    black_box(acc)
                })
            });
        }

        group.finish();
    }

    {
        let mut group = c.benchmark_group("query.dependency_tree");

        for (case_id, doc) in &docs {
            let layer = doc.layers().dep_parsing().expect("depparsing");
            group.throughput(Throughput::Elements(layer.len() as u64));
            group.bench_function(*case_id, |b| {
                b.iter(|| {
                    let mut acc = 0usize;
                    for parse in layer {
                        let tree = DependencyTree::new(doc, black_box(parse)).expect("tree");
                        let root = tree.root().expect("root");
                        acc += tree.subtree(root).expect("subtree").len();
                    }
                    black_box(acc)
                })
            });
        }

        group.finish();
    }

    {
        let mut group = c.benchmark_group("pipeline.run_batch");
        let pipeline = Pipeline::new();

        for (case_id, doc) in &docs {
            let batch: Vec<Document> = (0..8).map(|_| doc.clone()).collect();
            group.throughput(Throughput::Elements(batch.len() as u64));
            group.bench_function(*case_id, |b| {
                b.iter(|| {
                    let results = pipeline.run_batch(black_box(batch.clone()));
                    black_box(results.len())
                })
            });
        }

        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = settings::criterion();
    targets = benches_resolve
}
criterion_main!(benches);
