// Copyright 2025 the Mirador Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mirador_canvas::{Canvas, CanvasGroupings, PaginationHint, ViewType};

/// A manuscript-like sequence: every tenth canvas is a foldout.
fn canvases(len: usize) -> Vec<Canvas> {
    (0..len)
        .map(|i| {
            let canvas = Canvas::new(format!("https://iiif.example/canvas/{i}"), 1000, 1500);
            if i % 10 == 9 {
                canvas.with_hint(PaginationHint::NonPaged)
            } else {
                canvas
            }
        })
        .collect()
}

fn bench_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("groupings/partition");

    for len in [100usize, 1_000, 10_000] {
        let canvases = canvases(len);
        group.throughput(Throughput::Elements(len as u64));

        for view_type in [ViewType::Single, ViewType::Book, ViewType::Scroll] {
            group.bench_with_input(
                BenchmarkId::new(view_type.as_str(), len),
                &canvases,
                |b, canvases| {
                    b.iter(|| {
                        // A fresh engine each time, so the partition is not cached.
                        let groupings = CanvasGroupings::new(canvases, view_type);
                        black_box(groupings.groupings().len());
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_book_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("groupings/book_lookup");

    for len in [1_000usize, 10_000] {
        let canvases = canvases(len);
        let groupings = CanvasGroupings::new(&canvases, ViewType::Book);
        // Warm the cache; only the lookups are measured.
        black_box(groupings.groupings());
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("get_canvases", len), &len, |b, &len| {
            b.iter(|| {
                for index in 0..len {
                    black_box(groupings.get_canvases(index));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_partition, bench_book_lookup);
criterion_main!(benches);
