use centroidtrack::{merge_boxes, BoundingBox, CentroidTracker, CentroidTrackerConfig, TrajectoryStore};

fn main() -> anyhow::Result<()> {
    println!("Tracking two walkers through a 480px high frame...");

    let mut tracker = CentroidTracker::new(CentroidTrackerConfig {
        max_disappeared: 40,
        ..Default::default()
    });
    let mut trajectories = TrajectoryStore::default();
    let frame_height = 480;

    for frame in 0..12 {
        let down_y = 150 + frame * 12; // walking down the frame
        let up_y = 330 - frame * 12; // walking up, on the other side

        let raw = [
            BoundingBox::new(80, down_y - 40, 120, down_y + 40),
            BoundingBox::new(82, down_y - 38, 121, down_y + 41), // duplicate detection
            BoundingBox::new(400, up_y - 40, 440, up_y + 40),
        ];
        let boxes = merge_boxes(&raw, 0.3);
        let objects = tracker.update(&boxes);
        let crossings = trajectories.count(&objects, frame_height);

        println!("Frame {:2}: {} boxes -> {} identities", frame, boxes.len(), objects.len());
        for (id, centroid) in &objects {
            println!("  Id {}: {}", id, centroid);
        }
        for (id, crossing) in crossings {
            println!("  Id {} crossed {:?}", id, crossing);
        }
    }

    println!(
        "\nTotals: up={}, down={}",
        trajectories.total_up(),
        trajectories.total_down()
    );

    Ok(())
}
