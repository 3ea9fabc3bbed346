//! Grayscale filter passes run before binarization.
//!
//! Both passes read from one buffer and write into another; the segmenter
//! owns the buffer pair and re-synchronizes it between passes. Note the
//! border asymmetry: the minimum filter restricts its window to the valid
//! domain (a plain morphological erosion), while the denoiser treats
//! out-of-image neighbors as white, continuing the page background.

/// Square-neighborhood minimum (grayscale erosion) with the given radius.
/// Out-of-range samples are skipped, not substituted.
pub(crate) fn min_filter(src: &[u8], dst: &mut [u8], width: usize, height: usize, radius: usize) {
    for y in 0..height {
        let y0 = y.saturating_sub(radius);
        let y1 = (y + radius).min(height - 1);
        for x in 0..width {
            let x0 = x.saturating_sub(radius);
            let x1 = (x + radius).min(width - 1);
            let mut m = u8::MAX;
            for yy in y0..=y1 {
                let row = yy * width;
                for xx in x0..=x1 {
                    m = m.min(src[row + xx]);
                }
            }
            dst[y * width + x] = m;
        }
    }
}

const NEIGHBORS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// One 8-neighbor averaging pass. The center pixel has weight 0, each
/// neighbor 1/8; neighbors outside the image contribute 255. The result
/// is the ceiling of the weighted sum.
pub(crate) fn denoise_pass(src: &[u8], dst: &mut [u8], width: usize, height: usize) {
    for y in 0..height {
        for x in 0..width {
            let mut sum = 0u32;
            for (dx, dy) in NEIGHBORS {
                let nx = x as i32 + dx;
                let ny = y as i32 + dy;
                if nx < 0 || ny < 0 || nx >= width as i32 || ny >= height as i32 {
                    sum += 255;
                } else {
                    sum += src[ny as usize * width + nx as usize] as u32;
                }
            }
            dst[y * width + x] = ((sum + 7) / 8) as u8;
        }
    }
}
