//! Benchmarks for centroid tracking and box consolidation

use centroidtrack::trackers::{distance_matrix, greedy_assignment};
use centroidtrack::{merge_boxes, BoundingBox, Centroid, CentroidTracker, TrajectoryStore};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use std::hint::black_box;

fn create_test_frames(n_objects: usize, n_frames: usize) -> Vec<Vec<BoundingBox>> {
    (0..n_frames)
        .map(|frame| {
            (0..n_objects)
                .map(|i| {
                    let x = (i * 80 + frame * 3) as i32;
                    let y = (i * 40 + frame * 5) as i32;
                    BoundingBox::new(x, y, x + 40, y + 90)
                })
                .collect()
        })
        .collect()
}

fn random_centroids(count: usize) -> Vec<Centroid> {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| Centroid::new(rng.random_range(0..1920), rng.random_range(0..1080)))
        .collect()
}

fn bench_tracker_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("centroid_update");

    for &n_objects in &[5, 20, 50, 100] {
        let frames = create_test_frames(n_objects, 10);

        group.bench_with_input(
            BenchmarkId::new("objects", n_objects),
            &frames,
            |b, frames| {
                b.iter_batched(
                    CentroidTracker::default,
                    |mut tracker| {
                        for boxes in frames {
                            let _objects = tracker.update(black_box(boxes));
                        }
                    },
                    criterion::BatchSize::SmallInput,
                )
            },
        );
    }
    group.finish();
}

fn bench_greedy_assignment(c: &mut Criterion) {
    let tracked = random_centroids(50);
    let incoming = random_centroids(50);
    let distances = distance_matrix(&tracked, &incoming);

    c.bench_function("distance_matrix_50x50", |b| {
        b.iter(|| distance_matrix(black_box(&tracked), black_box(&incoming)))
    });

    c.bench_function("greedy_assignment_50x50", |b| {
        b.iter(|| greedy_assignment(black_box(distances.view()), black_box(50.0)))
    });
}

fn bench_merge_boxes(c: &mut Criterion) {
    // every second box is a near-duplicate of its predecessor
    let boxes: Vec<BoundingBox> = (0..60)
        .map(|i| {
            let base = (i / 2) * 70;
            let jitter = (i % 2) * 4;
            BoundingBox::new(base + jitter, jitter, base + 50 + jitter, 100 + jitter)
        })
        .collect();

    c.bench_function("merge_boxes_60", |b| {
        b.iter(|| merge_boxes(black_box(&boxes), black_box(0.3)))
    });
}

fn bench_counting(c: &mut Criterion) {
    let frames = create_test_frames(20, 30);

    c.bench_function("track_and_count_20x30", |b| {
        b.iter_batched(
            || (CentroidTracker::default(), TrajectoryStore::default()),
            |(mut tracker, mut store)| {
                for boxes in &frames {
                    let objects = tracker.update(boxes);
                    store.count(black_box(&objects), 1080);
                }
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_tracker_update,
    bench_greedy_assignment,
    bench_merge_boxes,
    bench_counting
);
criterion_main!(benches);
