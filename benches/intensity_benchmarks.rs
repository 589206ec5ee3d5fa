use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use geo::{Point, polygon};
use morpho::progress::NoProgress;
use morpho::{Dataset, Intensity, NeighborFinder, Record};

fn grid_plots(side: u64) -> Dataset {
    Dataset::from_records(
        "plots",
        (0..side * side).map(|i| {
            let x = (i % side) as f64 * 20.0;
            let y = (i / side) as f64 * 20.0;
            Record::new(
                i,
                polygon![
                    (x: x, y: y),
                    (x: x + 18.0, y: y),
                    (x: x + 18.0, y: y + 18.0),
                    (x: x, y: y + 18.0),
                    (x: x, y: y),
                ],
            )
            .with("uID", i as i64)
            .with("bID", (i / 25) as i64)
            .with("area", 324.0)
            .with("fl_area", 324.0 * (1 + i % 4) as f64)
        }),
    )
    .unwrap()
}

fn blocks(count: u64) -> Dataset {
    Dataset::from_records(
        "blocks",
        (0..count).map(|b| {
            let x = b as f64 * 100.0;
            Record::new(
                b,
                polygon![
                    (x: x, y: 0.0),
                    (x: x + 100.0, y: 0.0),
                    (x: x + 100.0, y: 100.0),
                    (x: x, y: 100.0),
                    (x: x, y: 0.0),
                ],
            )
            .with("bID", b as i64)
        }),
    )
    .unwrap()
}

fn benchmark_radius_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("radius_queries");

    for side in [50u64, 100, 200] {
        let plots = grid_plots(side).to_centroids();
        let finder = NeighborFinder::new(&plots);
        let center = Point::new(side as f64 * 10.0, side as f64 * 10.0);

        group.bench_with_input(BenchmarkId::new("find_within_400", side * side), &side, |b, _| {
            b.iter(|| finder.find_within_radius(black_box(&center), black_box(400.0)))
        });
    }

    group.finish();
}

fn benchmark_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics");
    group.sample_size(20);

    let engine = Intensity::builder().progress(NoProgress).build().unwrap();
    let plots = grid_plots(60);
    let block_layer = blocks(plots.len() as u64 / 25 + 1);

    group.bench_function("frequency_3600", |b| {
        b.iter(|| engine.frequency(black_box(&plots), black_box(&plots), "freq").unwrap())
    });

    group.bench_function("floor_area_ratio_3600", |b| {
        b.iter(|| {
            engine
                .floor_area_ratio(black_box(&plots), black_box(&plots), "far", "area", "fl_area")
                .unwrap()
        })
    });

    group.bench_function("block_density_3600", |b| {
        b.iter(|| {
            engine
                .block_density(black_box(&plots), "dens", &block_layer, "bID", "uID")
                .unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_radius_queries, benchmark_statistics);
criterion_main!(benches);
