use serde::{Deserialize, Serialize};

/// Configuration for the segmentation pipeline.
///
/// The defaults reproduce the tuning the pipeline was calibrated with on
/// inked tenprint cards; they are exposed so callers can re-tune for other
/// capture conditions (live scans, latent lifts).
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SegmenterParams {
    /// Target for the short side of the working image, in pixels. The
    /// source is downscaled by the largest integer factor that keeps the
    /// short side at or above this value.
    pub working_size_hint: usize,
    /// Number of 8-neighbor averaging iterations after the erosion pass.
    pub denoise_steps: u32,
    /// Keep a region only if its pixel count is at least this fraction of
    /// the largest region's pixel count. Clamped below at 0.
    pub area_threshold: f64,
    /// Keep a region only if both bounding-box sides are at least this
    /// fraction of the largest sides seen in the image. Clamped below at 0.
    pub size_threshold: f64,
    /// Multiplier applied to the Otsu level before thresholding. Values
    /// above 1 pull light ridge regions into the foreground.
    pub threshold_bias: f64,
    /// Inflation of the minimum oriented box, recovering ridge area eaten
    /// by the erosion and denoise passes.
    pub box_padding: f64,
    /// Step of the angular refinement sweep, degrees.
    pub angle_step_deg: f64,
    /// Width of the refinement window past the principal axis, degrees.
    pub angle_range_deg: f64,
}

impl Default for SegmenterParams {
    fn default() -> Self {
        Self {
            working_size_hint: 200,
            denoise_steps: 3,
            area_threshold: 0.4,
            size_threshold: 0.4,
            threshold_bias: 1.2,
            box_padding: 1.12,
            angle_step_deg: 5.0,
            angle_range_deg: 45.0,
        }
    }
}
