//! Working-resolution helpers.
//!
//! The segmentation pipeline runs on a downscaled copy of the scan. For
//! integer scale factors a box mean is a good-enough reduction filter;
//! callers that want bicubic quality can substitute their own resampler
//! and feed the result straight to the pipeline.

use crate::image::{GrayImage, GrayImageView};

/// Downscale by an integer factor using a box mean over `factor` x `factor`
/// blocks. Output dimensions are `(width / factor, height / factor)`; right
/// and bottom remainder rows/columns are dropped. A factor of 0 or 1 copies
/// the source.
pub fn downscale_box(src: &GrayImageView<'_>, factor: usize) -> GrayImage {
    if factor <= 1 {
        return GrayImage {
            width: src.width,
            height: src.height,
            data: src.data.to_vec(),
        };
    }

    let out_w = src.width / factor;
    let out_h = src.height / factor;
    let mut out = GrayImage::new(out_w, out_h, 0);
    let norm = (factor * factor) as u32;

    for oy in 0..out_h {
        for ox in 0..out_w {
            let mut acc = 0u32;
            for dy in 0..factor {
                let row = (oy * factor + dy) * src.width + ox * factor;
                for dx in 0..factor {
                    acc += src.data[row + dx] as u32;
                }
            }
            out.set(ox, oy, (acc / norm) as u8);
        }
    }

    out
}

/// Reduce interleaved 8-bit RGB to luminance with the 0.30/0.59/0.11
/// weights. Returns `None` when the buffer length does not match
/// `width * height * 3`.
pub fn luma_from_rgb8(rgb: &[u8], width: usize, height: usize) -> Option<GrayImage> {
    if rgb.len() != width * height * 3 {
        return None;
    }

    let data = rgb
        .chunks_exact(3)
        .map(|px| {
            let acc = 30 * px[0] as u32 + 59 * px[1] as u32 + 11 * px[2] as u32;
            ((acc + 50) / 100) as u8
        })
        .collect();

    GrayImage::from_raw(width, height, data)
}
