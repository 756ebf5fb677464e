// Copyright 2025 the Mirador Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::Point;
use mirador_canvas::{Canvas, ImageResource};
use mirador_world::{CanvasWorld, LayerSettings, Layers, ViewingDirection};

/// Canvases of mixed aspect ratios, each with `layers` tiled images.
fn canvases(len: usize, layers: usize) -> Vec<Canvas> {
    (0..len)
        .map(|i| {
            let width = 800 + (i as u32 % 5) * 100;
            let mut canvas = Canvas::new(format!("c{i}"), width, 1200);
            for layer in 0..layers {
                canvas = canvas.with_image(ImageResource::tiled(
                    format!("c{i}/l{layer}"),
                    format!("https://iiif.example/c{i}-l{layer}"),
                    width,
                    1200,
                ));
            }
            canvas
        })
        .collect()
}

fn reversed_layers(len: usize, layers: usize) -> Layers {
    (0..len)
        .flat_map(|i| {
            (0..layers).map(move |layer| {
                (
                    format!("c{i}/l{layer}"),
                    LayerSettings::default()
                        .with_index(layers - layer - 1)
                        .with_opacity(0.5),
                )
            })
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("world/build");

    for (len, layers) in [(2usize, 1usize), (2, 8), (64, 1), (64, 4)] {
        let canvases = canvases(len, layers);
        let overrides = reversed_layers(len, layers);
        group.throughput(Throughput::Elements((len * layers) as u64));

        group.bench_with_input(
            BenchmarkId::new("ltr", format!("{len}x{layers}")),
            &canvases,
            |b, canvases| {
                b.iter_batched(
                    || (canvases.clone(), overrides.clone()),
                    |(canvases, overrides)| {
                        black_box(CanvasWorld::new(
                            canvases,
                            overrides,
                            ViewingDirection::LeftToRight,
                        ));
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("world/queries");
    let (len, layers) = (64usize, 4usize);
    let world = CanvasWorld::new(
        canvases(len, layers),
        reversed_layers(len, layers),
        ViewingDirection::RightToLeft,
    );
    let service_ids: Vec<String> = (0..len)
        .flat_map(|i| (0..layers).map(move |layer| format!("https://iiif.example/c{i}-l{layer}/info.json")))
        .collect();
    group.throughput(Throughput::Elements(service_ids.len() as u64));

    group.bench_function("placement_by_service_id", |b| {
        b.iter(|| {
            for id in &service_ids {
                black_box(world.layer_index_of_image_resource(id));
                black_box(world.layer_opacity_of_image_resource(id));
            }
        });
    });

    let bounds = world.bounds();
    group.bench_function("canvas_at_point", |b| {
        b.iter(|| {
            for step in 0..256 {
                let x = bounds.x0 + bounds.width() * f64::from(step) / 256.0;
                black_box(world.canvas_at_point(Point::new(x, bounds.center().y)));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_queries);
criterion_main!(benches);
