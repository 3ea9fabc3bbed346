//! Fingerprint region extraction from scanned multi-impression images.
//!
//! Given a scan holding several inked impressions (a tenprint card, a
//! four-finger slap), the segmenter returns an oriented bounding box per
//! detected fingerprint: center, size and rotation in source-image
//! coordinates. Callers that need the actual sub-images crop and
//! de-rotate the full-resolution source themselves from the returned
//! boxes.
//!
//! ## Quickstart
//!
//! ```
//! use fingerprint_seg::Segmenter;
//!
//! let mut segmenter = Segmenter::new(200, 200);
//! let blank = vec![255u8; 200 * 200];
//! let segments = segmenter.extract(&blank).unwrap();
//! assert!(segments.is_empty());
//! ```
//!
//! Pipeline, in order:
//! 1. Downscale the source to working resolution (integer box filter).
//! 2. Square-minimum erosion to consolidate ridge structure.
//! 3. Iterated 8-neighbor averaging against a white border.
//! 4. Otsu binarization with a bias pulling light ridges into the
//!    foreground.
//! 5. Two-scan 8-connected labeling with union-find equivalences.
//! 6. Relative-size filtering of the labeled regions.
//! 7. Principal-axis orientation per region, refined by a rotating
//!    bounding-box sweep, back-scaled to source coordinates.

mod binarize;
mod components;
mod error;
mod filters;
mod jacobi;
mod label;
mod orientation;
mod params;
mod result;
mod segmenter;

pub use error::SegmentError;
pub use params::SegmenterParams;
pub use result::SegmentInfo;
pub use segmenter::Segmenter;

pub use fingerprint_seg_core::{GrayImage, GrayImageView};
