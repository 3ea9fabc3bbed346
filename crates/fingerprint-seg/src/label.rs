//! Two-scan 8-connected component labeling.
//!
//! Labels are packed into one byte, which caps an image at 255 provisional
//! regions; inked cards hold a handful of prints, so the cap is generous,
//! and blowing through it means the binarization produced noise rather
//! than fingerprints. The label map is written into the caller's byte
//! buffer (label 0 = background), and provisional labels are remapped to a
//! dense 1..=M range before returning.

use crate::error::SegmentError;

pub(crate) const MAX_LABELS: usize = 255;

/// Union-find over provisional labels 1..=count.
///
/// `parent` is kept fully path-compressed: after every union each entry
/// points directly at its canonical root, so lookups are a single index.
/// The O(K) re-compression sweep per union is bounded by K <= 255.
struct Equivalences {
    parent: [u8; MAX_LABELS + 1],
    count: usize,
}

impl Equivalences {
    fn new() -> Self {
        Self {
            parent: std::array::from_fn(|i| i as u8),
            count: 0,
        }
    }

    fn alloc(&mut self) -> Option<u8> {
        if self.count == MAX_LABELS {
            return None;
        }
        self.count += 1;
        Some(self.count as u8)
    }

    fn union(&mut self, a: u8, b: u8) {
        let ra = self.parent[a as usize];
        let rb = self.parent[b as usize];
        if ra == rb {
            return;
        }
        let (keep, merge) = if ra < rb { (ra, rb) } else { (rb, ra) };
        self.parent[merge as usize] = keep;

        for i in 1..=self.count {
            let mut r = self.parent[i];
            while self.parent[r as usize] != r {
                r = self.parent[r as usize];
            }
            self.parent[i] = r;
        }
    }
}

/// Label 8-connected foreground (value 0) regions of `binary` into
/// `labels`. Both slices are `width * height` long. Returns the number of
/// distinct regions after remapping labels to a dense 1..=M range.
pub(crate) fn label_components(
    binary: &[u8],
    labels: &mut [u8],
    width: usize,
    height: usize,
) -> Result<usize, SegmentError> {
    labels.fill(0);
    let mut eq = Equivalences::new();

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            if binary[idx] != 0 {
                continue;
            }

            let left = if x > 0 { labels[idx - 1] } else { 0 };
            let (ul, up, ur) = if y > 0 {
                let up_idx = idx - width;
                (
                    if x > 0 { labels[up_idx - 1] } else { 0 },
                    labels[up_idx],
                    if x + 1 < width { labels[up_idx + 1] } else { 0 },
                )
            } else {
                (0, 0, 0)
            };

            let seed = if left != 0 {
                left
            } else if ul != 0 {
                ul
            } else {
                up
            };

            labels[idx] = if seed != 0 {
                if ur != 0 && ur != seed {
                    eq.union(seed, ur);
                }
                seed
            } else if ur != 0 {
                ur
            } else {
                eq.alloc()
                    .ok_or(SegmentError::LabelOverflow { max: MAX_LABELS })?
            };
        }
    }

    // Closure: number the canonical roots densely, then route every
    // provisional label through its root.
    let mut dense = [0u8; MAX_LABELS + 1];
    let mut regions = 0usize;
    for i in 1..=eq.count {
        if eq.parent[i] as usize == i {
            regions += 1;
            dense[i] = regions as u8;
        }
    }
    for i in 1..=eq.count {
        let root = eq.parent[i] as usize;
        if root != i {
            dense[i] = dense[root];
        }
    }

    for l in labels.iter_mut() {
        if *l != 0 {
            *l = dense[*l as usize];
        }
    }

    Ok(regions)
}
