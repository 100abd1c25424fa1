//! Render bucket benchmarks: sorting and batched drawing.
//!
//! Run with: cargo bench --bench bucket_sort_bench

use std::hint::black_box;
use std::ops::Range;
use std::rc::Rc;
use std::sync::Arc;

use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use glam::{Affine3A, Vec3};
use prism::prelude::*;

struct BenchRenderable {
    materials: MaterialDefinition,
    transform: Affine3A,
    properties: RenderPropertyCollection,
}

impl Renderable for BenchRenderable {
    fn material_definition(&self) -> &MaterialDefinition {
        &self.materials
    }

    fn world_transform(&self) -> Affine3A {
        self.transform
    }

    fn render_properties(&self) -> &RenderPropertyCollection {
        &self.properties
    }

    fn is_valid_for_draw(&self) -> bool {
        true
    }

    fn setup_draw_call(
        &self,
        ctx: &mut dyn RenderContext,
        _bucket: RenderBucketId,
        _pass: Option<&MaterialPass>,
    ) {
        let vertices: Range<u32> = 0..36;
        ctx.draw(vertices, 0..1);
    }
}

/// Scattered objects sharing a handful of materials.
fn scene(count: usize, bucket: RenderBucketId) -> Vec<RenderableRef> {
    let materials: Vec<MaterialRef> = (0..8)
        .map(|i| Arc::new(StandardMaterial::with_shader(format!("mat{i}"), ShaderId(i))) as MaterialRef)
        .collect();

    (0..count)
        .map(|i| {
            // Deterministic scatter without pulling in an RNG.
            let depth = ((i * 7919) % 1000) as f32 * 0.1 + 1.0;
            let x = ((i * 104_729) % 200) as f32 - 100.0;
            let renderable = BenchRenderable {
                materials: MaterialDefinition::new().with(bucket, Arc::clone(&materials[i % materials.len()])),
                transform: Affine3A::from_translation(Vec3::new(x, 0.0, -depth)),
                properties: RenderPropertyCollection::new(),
            };
            Rc::new(renderable) as RenderableRef
        })
        .collect()
}

fn filled_bucket(
    renderables: &[RenderableRef],
    id: RenderBucketId,
    comparer: Box<dyn RenderBucketComparer>,
) -> RenderBucket {
    let mut bucket = RenderBucket::new(id, comparer, renderables.len().max(1)).unwrap();
    for r in renderables {
        let material = r.material_definition().get(id).cloned();
        bucket.add(r, material);
    }
    bucket
}

fn bench_sort(c: &mut Criterion) {
    let camera = Camera::new(Vec3::ZERO, Vec3::NEG_Z);
    let mut group = c.benchmark_group("bucket_sort");

    for count in [64usize, 1024, 8192] {
        group.throughput(Throughput::Elements(count as u64));

        let opaque = scene(count, RenderBucketId::OPAQUE);
        group.bench_function(format!("opaque_{count}"), |b| {
            b.iter_batched(
                || filled_bucket(&opaque, RenderBucketId::OPAQUE, Box::new(OpaqueComparer::new())),
                |mut bucket| {
                    bucket.sort_with_camera(Some(&camera));
                    black_box(bucket)
                },
                BatchSize::SmallInput,
            );
        });

        let transparent = scene(count, RenderBucketId::TRANSPARENT);
        group.bench_function(format!("transparent_{count}"), |b| {
            b.iter_batched(
                || {
                    filled_bucket(
                        &transparent,
                        RenderBucketId::TRANSPARENT,
                        Box::new(TransparentComparer::new()),
                    )
                },
                |mut bucket| {
                    bucket.sort_with_camera(Some(&camera));
                    black_box(bucket)
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_draw(c: &mut Criterion) {
    let camera = Camera::new(Vec3::ZERO, Vec3::NEG_Z);
    let renderables = scene(4096, RenderBucketId::OPAQUE);
    let mut bucket = filled_bucket(&renderables, RenderBucketId::OPAQUE, Box::new(OpaqueComparer::new()));
    bucket.sort_with_camera(Some(&camera));

    let mut group = c.benchmark_group("bucket_draw");
    group.throughput(Throughput::Elements(4096));

    group.bench_function("batched_4096", |b| {
        b.iter(|| {
            let mut ctx = StateContext::new();
            bucket.draw_all(&mut ctx, true);
            black_box(*ctx.stats())
        });
    });

    group.bench_function("no_materials_4096", |b| {
        b.iter(|| {
            let mut ctx = StateContext::new();
            bucket.draw_all(&mut ctx, false);
            black_box(*ctx.stats())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_sort, bench_draw);
criterion_main!(benches);
