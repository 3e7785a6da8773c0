use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use part_sieve::prelude::*;

/// Structured `n x n` quad sheet split round-robin over `parts` shell parts.
fn quad_sheet(n: usize, parts: usize) -> (PartCollection, Points) {
    let num_points = (n + 1) * (n + 1);
    let mut meta = PartMetadata::new(num_points, 4).with_cells(PartType::Shell, n * n);
    for m in 1..=parts {
        meta = meta.with_part(m, PartType::Shell, format!("sheet-{m}"), true);
    }
    let mut collection = PartCollection::new(meta, None).expect("valid metadata");
    let id = |i: usize, j: usize| (j * (n + 1) + i + 1) as i64;
    for j in 0..n {
        for i in 0..n {
            let cell = j * n + i;
            collection
                .insert_cell(
                    PartType::Shell,
                    cell,
                    cell % parts + 1,
                    CellType::Quadrilateral,
                    &[id(i, j), id(i + 1, j), id(i + 1, j + 1), id(i, j + 1)],
                )
                .expect("valid cell");
        }
    }
    let xyz: Vec<[f32; 3]> = (0..num_points)
        .map(|p| [(p % (n + 1)) as f32, (p / (n + 1)) as f32, 0.0])
        .collect();
    (collection, Points::from_xyz(&xyz))
}

fn bench_finalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("finalize");

    for &n in &[64usize, 256] {
        group.bench_with_input(BenchmarkId::new("topology", n), &n, |b, &n| {
            b.iter_batched(
                || quad_sheet(n, 8).0,
                |mut collection| {
                    collection.finalize_topology().expect("finalize topology");
                    black_box(collection);
                },
                criterion::BatchSize::LargeInput,
            );
        });

        let (mut collection, pool) = quad_sheet(n, 8);
        collection.finalize_topology().expect("finalize topology");
        let cells = n * n;
        let flags: Vec<i32> = (0..cells).map(|c| i32::from(c % 7 == 0)).collect();
        let results: Vec<f32> = (0..cells * 4).map(|v| v as f32).collect();

        group.bench_with_input(BenchmarkId::new("timestep_excise", n), &n, |b, _| {
            b.iter(|| {
                collection.reset_time_step_info();
                collection
                    .add_property(PartType::Shell, "stress", 1, 3)
                    .expect("declare");
                collection
                    .fill_cell_properties(&results, PartType::Shell, cells, 4)
                    .expect("fill");
                collection
                    .set_cell_dead_flags(PartType::Shell, &flags)
                    .expect("flags");
                collection.finalize(&pool, true).expect("finalize");
                black_box(collection.grid_for_part(0).expect("finalized"));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_finalize);
criterion_main!(benches);
