/// Image helpers for the frame pipeline
use centroidtrack::BoundingBox;
use image::RgbImage;

/// Copy the `[x1, x2) x [y1, y2)` region of `frame`, clamped to the frame.
///
/// Returns `None` when nothing of the box lies inside the frame.
pub fn crop_region(frame: &RgbImage, bbox: &BoundingBox) -> Option<RgbImage> {
    let (width, height) = frame.dimensions();
    let clamp_x = |v: i32| v.clamp(0, width as i32) as u32;
    let clamp_y = |v: i32| v.clamp(0, height as i32) as u32;

    let (x1, x2) = (clamp_x(bbox.x1), clamp_x(bbox.x2));
    let (y1, y2) = (clamp_y(bbox.y1), clamp_y(bbox.y2));
    if x2 <= x1 || y2 <= y1 {
        return None;
    }

    Some(image::imageops::crop_imm(frame, x1, y1, x2 - x1, y2 - y1).to_image())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_crop_inside_frame() {
        let mut frame = RgbImage::new(20, 10);
        frame.put_pixel(5, 2, Rgb([255, 0, 0]));

        let crop = crop_region(&frame, &BoundingBox::new(5, 2, 9, 8)).unwrap();
        assert_eq!(crop.dimensions(), (4, 6));
        assert_eq!(crop.get_pixel(0, 0), &Rgb([255, 0, 0]));
    }

    #[test]
    fn test_crop_clamped_to_frame() {
        let frame = RgbImage::new(20, 10);
        let crop = crop_region(&frame, &BoundingBox::new(-5, 4, 30, 40)).unwrap();
        assert_eq!(crop.dimensions(), (20, 6));
    }

    #[test]
    fn test_crop_outside_frame_is_empty() {
        let frame = RgbImage::new(20, 10);
        assert!(crop_region(&frame, &BoundingBox::new(25, 0, 40, 5)).is_none());
        assert!(crop_region(&frame, &BoundingBox::new(3, 3, 3, 8)).is_none());
    }
}
