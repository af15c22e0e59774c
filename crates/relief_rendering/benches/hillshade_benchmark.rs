//! Benchmark for the CPU side of hillshade rendering.
//!
//! TARGET: uniform derivation well under 1us per tile
//!
//! Run with: cargo bench --package relief_rendering --bench hillshade_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use relief_rendering::hillshade::{derive_lat_range, derive_light, HillshadeUniforms};
use relief_rendering::{EvaluatedPaintProperties, HillshadeBucket, IlluminationAnchor};
use relief_shared::{CanonicalTileId, Mat4, TileMask, UnwrappedTileId};

fn benchmark_uniforms(c: &mut Criterion) {
    let evaluated = EvaluatedPaintProperties {
        illumination_anchor: IlluminationAnchor::Viewport,
        ..Default::default()
    };

    c.bench_function("derive_light", |b| {
        let mut bearing = 0.0f64;
        b.iter(|| {
            bearing += 0.01;
            black_box(derive_light(black_box(&evaluated), black_box(bearing)))
        });
    });

    let mut group = c.benchmark_group("tile_uniforms");

    // A 16x16 screen of z14 tiles
    group.throughput(Throughput::Elements(16 * 16));
    group.bench_function("16x16_tiles", |b| {
        b.iter(|| {
            for y in 0..16u32 {
                for x in 0..16i64 {
                    let tile = UnwrappedTileId::new(14, 8000 + x, 5000 + y);
                    let light = derive_light(&evaluated, 0.3);
                    let geo = derive_lat_range(&tile);
                    black_box(HillshadeUniforms::new(&Mat4::IDENTITY, &evaluated, light, geo));
                }
            }
        });
    });

    group.finish();
}

fn benchmark_partial_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_mask");

    // Every z4 sub-tile but one: the worst case for a single parent
    let mut mask: TileMask = (0..16u32)
        .flat_map(|y| (0..16u32).map(move |x| CanonicalTileId::new(4, x, y)))
        .collect();
    mask.remove(&CanonicalTileId::new(4, 0, 0));

    group.throughput(Throughput::Elements(mask.len() as u64));
    group.bench_function("255_subtiles", |b| {
        b.iter(|| {
            let mut bucket = HillshadeBucket::new(None);
            bucket.set_mask(black_box(mask.clone()));
            black_box(bucket.vertices().len())
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_uniforms, benchmark_partial_geometry);
criterion_main!(benches);
