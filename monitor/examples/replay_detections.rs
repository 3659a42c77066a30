/// Replay recorded detections through the monitoring pipeline
///
/// A single person walks down a 640x480 frame at night, a second person joins
/// halfway through, and one frame comes back from the detector as an error.
///
/// Usage:
///   cargo run --example replay_detections [config.json]
use chrono::NaiveDate;
use image::RgbImage;
use safety_monitor::{
    AttributeLabel, Detection, FixedClock, FramePipeline, MonitorConfig, ReplayDetector,
};
use std::env;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("🎯 Safety Monitor - Detection Replay\n");

    let args: Vec<String> = env::args().collect();
    let config = match args.get(1) {
        Some(path) => MonitorConfig::from_file(path)?,
        None => {
            let out_dir = env::temp_dir().join("safety-monitor-replay");
            std::fs::create_dir_all(&out_dir)?;
            MonitorConfig {
                snapshot_dir: out_dir.clone(),
                record_path: out_dir.join("people_count.json"),
                ..MonitorConfig::default()
            }
        }
    };
    println!("📁 Records: {}", config.record_path.display());
    println!("📁 Snapshots: {}\n", config.snapshot_dir.display());

    let mut frames = Vec::new();
    for step in 0..10 {
        let y = 120.0 + step as f32 * 20.0;
        let mut detections = vec![
            Detection::person(300.0, y - 60.0, 340.0, y + 60.0, 0.91),
            // low confidence, ignored
            Detection::person(50.0, 50.0, 90.0, 150.0, 0.41),
        ];
        if step >= 5 {
            detections.push(Detection::person(500.0, 200.0, 540.0, 320.0, 0.88));
        }
        frames.push(if step == 3 {
            Err("camera stream stalled".to_string())
        } else {
            Ok(detections)
        });
    }
    let mut detector = ReplayDetector::new(frames);

    // stand-in classifier: wide crops are men, narrow ones women
    let mut classifier = |region: &RgbImage| -> Result<AttributeLabel, String> {
        if region.width() > region.height() {
            Ok(AttributeLabel::Man)
        } else {
            Ok(AttributeLabel::Woman)
        }
    };

    let night = NaiveDate::from_ymd_opt(2024, 10, 12)
        .and_then(|d| d.and_hms_opt(23, 30, 0))
        .ok_or_else(|| anyhow::anyhow!("invalid replay timestamp"))?;
    let clock = FixedClock(night);

    let frame = RgbImage::new(640, 480);
    let mut pipeline = FramePipeline::new(config)?;

    while detector.remaining() > 0 {
        let record = pipeline.process_with_detector(&frame, &mut detector, &mut classifier, &clock);
        println!(
            "Frame {:2}: people={} men={} women={} lone_women={}{}",
            pipeline.frames_processed(),
            record.people_count,
            record.men,
            record.women,
            record.lone_women,
            record
                .error
                .as_deref()
                .map(|e| format!(" error={}", e))
                .unwrap_or_default()
        );
    }

    println!(
        "\n✓ Crossings: up={}, down={}",
        pipeline.total_up(),
        pipeline.total_down()
    );
    Ok(())
}
