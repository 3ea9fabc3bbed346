//! Image-side primitives for fingerprint segmentation.
//!
//! This crate is intentionally small. It owns the 8-bit grayscale grid
//! types the pipeline operates on, plus the helpers a caller needs to meet
//! the pipeline's input contract: luminance reduction of interleaved RGB
//! and integer-factor downscaling to working resolution. It does *not*
//! decode images and does not depend on any decoder crate.

mod image;
mod logger;
mod resample;

pub use image::{sample_bilinear, sample_bilinear_u8, GrayImage, GrayImageView};
pub use logger::init_with_level;
#[cfg(feature = "tracing")]
pub use logger::init_tracing;
pub use resample::{downscale_box, luma_from_rgb8};
