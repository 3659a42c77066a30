use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::RgbImage;
use rand::Rng;
use safety_monitor::{
    image_utils::crop_region, AttributeLabel, Detection, FixedClassifier, FixedClock,
    FramePipeline, MonitorConfig, NullWriter,
};
use std::hint::black_box;

/// Create test frame data
fn create_test_image(width: u32, height: u32) -> RgbImage {
    let mut image = RgbImage::new(width, height);

    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let r = (x % 255) as u8;
        let g = (y % 255) as u8;
        let b = (x.wrapping_mul(y) % 255) as u8;
        *pixel = image::Rgb([r, g, b]);
    }

    image
}

/// Random person detections, some below the confidence threshold
fn generate_test_detections(count: usize) -> Vec<Detection> {
    let mut rng = rand::rng();

    (0..count)
        .map(|_| {
            let x = rng.random_range(0.0..1200.0);
            let y = rng.random_range(0.0..600.0);
            Detection::person(
                x,
                y,
                x + rng.random_range(30.0..80.0),
                y + rng.random_range(60.0..120.0),
                rng.random_range(0.3..0.99),
            )
        })
        .collect()
}

fn night_clock() -> FixedClock {
    FixedClock(
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(22, 0, 0))
            .unwrap(),
    )
}

/// Benchmark a full pass over one frame
fn bench_process_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("process_frame");
    let frame = create_test_image(1280, 720);
    let clock = night_clock();

    for count in [1, 10, 30, 60] {
        let detections = generate_test_detections(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(count),
            &detections,
            |b, detections| {
                let mut pipeline = FramePipeline::with_writers(
                    MonitorConfig::default(),
                    Box::new(NullWriter),
                    Box::new(NullWriter),
                )
                .unwrap();
                let mut classifier = FixedClassifier(AttributeLabel::Woman);
                b.iter(|| {
                    black_box(pipeline.process_frame(
                        &frame,
                        black_box(detections),
                        &mut classifier,
                        &clock,
                    ))
                });
            },
        );
    }

    group.finish();
}

/// Benchmark cropping person regions out of a frame
fn bench_crop_region(c: &mut Criterion) {
    let mut group = c.benchmark_group("crop_region");
    let frame = create_test_image(1920, 1080);

    for size in [64, 128, 256] {
        let bbox = centroidtrack::BoundingBox::new(400, 300, 400 + size / 2, 300 + size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &bbox, |b, bbox| {
            b.iter(|| black_box(crop_region(&frame, black_box(bbox))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_process_frame, bench_crop_region);
criterion_main!(benches);
