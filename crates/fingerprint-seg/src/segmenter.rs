//! Pipeline driver.

use log::debug;
use nalgebra::Point2;

use fingerprint_seg_core::{downscale_box, GrayImageView};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::binarize::binarize;
use crate::components::{collect_components, filter_components};
use crate::error::SegmentError;
use crate::filters::{denoise_pass, min_filter};
use crate::label::label_components;
use crate::orientation::estimate_box;
use crate::params::SegmenterParams;
use crate::result::SegmentInfo;

/// Extracts oriented fingerprint boxes from scans of a fixed source size.
///
/// A segmenter is configured once for the source dimensions and reused
/// across scans; each extraction reuses the same working buffer pair, so
/// no per-image allocation happens on the image path. Extraction takes
/// `&mut self` and is therefore not re-entrant on one instance; create
/// one segmenter per thread for parallel work.
pub struct Segmenter {
    source_width: usize,
    source_height: usize,
    scale: usize,
    width: usize,
    height: usize,
    radius: usize,
    params: SegmenterParams,
    work: Vec<u8>,
    scratch: Vec<u8>,
}

impl Segmenter {
    /// Segmenter with default parameters (working size 200).
    pub fn new(source_width: usize, source_height: usize) -> Self {
        Self::with_params(source_width, source_height, SegmenterParams::default())
    }

    pub fn with_params(
        source_width: usize,
        source_height: usize,
        mut params: SegmenterParams,
    ) -> Self {
        params.working_size_hint = params.working_size_hint.max(1);
        params.area_threshold = params.area_threshold.max(0.0);
        params.size_threshold = params.size_threshold.max(0.0);

        let short_side = source_width.min(source_height);
        let scale = (short_side / params.working_size_hint).max(1);
        let width = source_width / scale;
        let height = source_height / scale;
        let radius = ((0.005 * params.working_size_hint as f64).ceil() as usize).max(1);

        Self {
            source_width,
            source_height,
            scale,
            width,
            height,
            radius,
            params,
            work: vec![0; width * height],
            scratch: vec![0; width * height],
        }
    }

    /// Number of averaging iterations for the next extractions.
    pub fn set_denoise_steps(&mut self, steps: u32) {
        self.params.denoise_steps = steps;
    }

    /// Relative area threshold; clamped below at 0.
    pub fn set_area_threshold(&mut self, threshold: f64) {
        self.params.area_threshold = threshold.max(0.0);
    }

    /// Relative side-length threshold; clamped below at 0.
    pub fn set_size_threshold(&mut self, threshold: f64) {
        self.params.size_threshold = threshold.max(0.0);
    }

    #[inline]
    pub fn params(&self) -> &SegmenterParams {
        &self.params
    }

    /// Source-to-working integer scale factor.
    #[inline]
    pub fn scale(&self) -> usize {
        self.scale
    }

    #[inline]
    pub fn working_width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn working_height(&self) -> usize {
        self.height
    }

    /// Run the pipeline on a working-resolution grayscale buffer of
    /// exactly `working_width() * working_height()` bytes.
    ///
    /// An empty result is a valid outcome (blank scan). Errors cover a
    /// mis-sized input and pathological scans with more than 255
    /// foreground regions; the segmenter stays usable after either.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, gray), fields(width = self.width, height = self.height))
    )]
    pub fn extract(&mut self, gray: &[u8]) -> Result<Vec<SegmentInfo>, SegmentError> {
        let expected = self.width * self.height;
        if gray.len() != expected {
            return Err(SegmentError::InputSize {
                got: gray.len(),
                expected,
                width: self.width,
                height: self.height,
            });
        }

        self.work.copy_from_slice(gray);
        self.scratch.copy_from_slice(gray);

        // Erosion reads the pristine copy and writes the working buffer.
        min_filter(
            &self.scratch,
            &mut self.work,
            self.width,
            self.height,
            self.radius,
        );
        self.scratch.copy_from_slice(&self.work);

        for _ in 0..self.params.denoise_steps {
            denoise_pass(&self.scratch, &mut self.work, self.width, self.height);
            self.scratch.copy_from_slice(&self.work);
        }

        let threshold = binarize(&mut self.work, self.params.threshold_bias);
        debug!("binarized at {threshold:.1}");

        // The scratch half becomes the label map from here on.
        let regions = label_components(&self.work, &mut self.scratch, self.width, self.height)?;
        debug!("{regions} foreground regions");
        if regions == 0 {
            return Ok(Vec::new());
        }

        let comps = collect_components(&self.scratch, self.width, self.height, regions);
        let kept = filter_components(
            &comps,
            self.params.area_threshold,
            self.params.size_threshold,
        );
        debug!("{} regions kept after relative-size filters", kept.len());

        let scale = self.scale as f64;
        let mut segments = Vec::with_capacity(kept.len());
        for comp in &kept {
            let Some(obox) = estimate_box(
                &self.scratch,
                self.width,
                comp,
                self.params.angle_step_deg,
                self.params.angle_range_deg,
            ) else {
                debug!("region {}: orientation estimate failed, dropped", comp.label);
                continue;
            };

            let (cx, cy) = comp.centroid();
            let pad = self.params.box_padding;
            segments.push(SegmentInfo {
                width: (pad * scale * obox.width).floor() as i32,
                height: (pad * scale * obox.height).floor() as i32,
                center: Point2::new(
                    (scale * cx).floor() as i32,
                    (scale * cy).floor() as i32,
                ),
                rotation_deg: obox.theta.to_degrees() as f32,
            });
        }

        Ok(segments)
    }

    /// Downscale a full-resolution source by the segmenter's scale factor
    /// and extract. The view must have the source dimensions the
    /// segmenter was created with.
    pub fn extract_image(
        &mut self,
        src: &GrayImageView<'_>,
    ) -> Result<Vec<SegmentInfo>, SegmentError> {
        if src.width != self.source_width || src.height != self.source_height {
            return Err(SegmentError::InputSize {
                got: src.data.len(),
                expected: self.source_width * self.source_height,
                width: self.source_width,
                height: self.source_height,
            });
        }
        let scaled = downscale_box(src, self.scale);
        self.extract(&scaled.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn working_resolution_follows_the_hint() {
        let seg = Segmenter::new(800, 1000);
        assert_eq!(seg.scale(), 4);
        assert_eq!(seg.working_width(), 200);
        assert_eq!(seg.working_height(), 250);
    }

    #[test]
    fn small_sources_are_not_upscaled() {
        let seg = Segmenter::new(120, 90);
        assert_eq!(seg.scale(), 1);
        assert_eq!((seg.working_width(), seg.working_height()), (120, 90));
    }

    #[test]
    fn thresholds_clamp_below_zero() {
        let mut seg = Segmenter::new(200, 200);
        seg.set_area_threshold(-1.0);
        seg.set_size_threshold(-0.5);
        assert_eq!(seg.params().area_threshold, 0.0);
        assert_eq!(seg.params().size_threshold, 0.0);
    }

    #[test]
    fn mis_sized_input_is_rejected() {
        let mut seg = Segmenter::new(200, 200);
        let err = seg.extract(&[0u8; 17]).unwrap_err();
        assert!(matches!(err, SegmentError::InputSize { got: 17, .. }));
    }

    #[test]
    fn min_filter_radius_scales_with_hint() {
        let seg = Segmenter::new(4000, 4000);
        assert_eq!(seg.radius, 1);
        let params = SegmenterParams {
            working_size_hint: 600,
            ..SegmenterParams::default()
        };
        let seg = Segmenter::with_params(4000, 4000, params);
        assert_eq!(seg.radius, 3);
    }
}
