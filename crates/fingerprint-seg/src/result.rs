use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Oriented bounding box of one detected fingerprint, in source-image
/// pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentInfo {
    /// Box extent across the finger. Always `width <= height`.
    pub width: i32,
    /// Box extent along the finger (the long axis).
    pub height: i32,
    /// Box center.
    pub center: Point2<i32>,
    /// Angle of the long axis measured from the image x-axis, degrees,
    /// in (-90, 90]. An upright finger reports 90.
    pub rotation_deg: f32,
}

impl SegmentInfo {
    /// Axis-aligned extent of the oriented box in source coordinates,
    /// as `(x_min, y_min, x_max, y_max)`. Useful for clipping a crop
    /// window against the source rectangle.
    pub fn bounds_in_source(&self) -> (f32, f32, f32, f32) {
        let theta = (self.rotation_deg as f64).to_radians();
        let (sin, cos) = theta.sin_cos();
        let hw = self.width as f64 * 0.5;
        let hh = self.height as f64 * 0.5;
        // Long axis along theta, short axis across it.
        let ext_x = hh * cos.abs() + hw * sin.abs();
        let ext_y = hh * sin.abs() + hw * cos.abs();
        let cx = self.center.x as f64;
        let cy = self.center.y as f64;
        (
            (cx - ext_x) as f32,
            (cy - ext_y) as f32,
            (cx + ext_x) as f32,
            (cy + ext_y) as f32,
        )
    }
}
