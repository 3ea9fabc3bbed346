//! Per-region statistics and relative-size filtering.

/// Accumulated statistics for one labeled region.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Component {
    pub label: u8,
    pub x_min: usize,
    pub x_max: usize,
    pub y_min: usize,
    pub y_max: usize,
    pub sum_x: u64,
    pub sum_y: u64,
    pub area: u64,
}

impl Component {
    pub fn centroid(&self) -> (f64, f64) {
        (
            self.sum_x as f64 / self.area as f64,
            self.sum_y as f64 / self.area as f64,
        )
    }

    pub fn box_width(&self) -> usize {
        self.x_max - self.x_min
    }

    pub fn box_height(&self) -> usize {
        self.y_max - self.y_min
    }
}

/// One pass over a dense label map, accumulating bbox, centroid sums and
/// area for labels 1..=count.
pub(crate) fn collect_components(
    labels: &[u8],
    width: usize,
    height: usize,
    count: usize,
) -> Vec<Component> {
    let mut comps: Vec<Component> = (1..=count)
        .map(|label| Component {
            label: label as u8,
            x_min: usize::MAX,
            x_max: 0,
            y_min: usize::MAX,
            y_max: 0,
            sum_x: 0,
            sum_y: 0,
            area: 0,
        })
        .collect();

    for y in 0..height {
        for x in 0..width {
            let l = labels[y * width + x];
            if l == 0 {
                continue;
            }
            let c = &mut comps[l as usize - 1];
            c.x_min = c.x_min.min(x);
            c.x_max = c.x_max.max(x);
            c.y_min = c.y_min.min(y);
            c.y_max = c.y_max.max(y);
            c.sum_x += x as u64;
            c.sum_y += y as u64;
            c.area += 1;
        }
    }

    comps.retain(|c| c.area > 0);
    comps
}

/// Drop regions that are small relative to the largest one: a kept region
/// needs `area >= area_threshold * max_area` and both bbox sides at least
/// `size_threshold` times the largest sides seen in the image.
pub(crate) fn filter_components(
    comps: &[Component],
    area_threshold: f64,
    size_threshold: f64,
) -> Vec<Component> {
    let Some(max_area) = comps.iter().map(|c| c.area).max() else {
        return Vec::new();
    };
    let max_w = comps.iter().map(|c| c.box_width()).max().unwrap_or(0);
    let max_h = comps.iter().map(|c| c.box_height()).max().unwrap_or(0);

    let min_area = area_threshold * max_area as f64;
    let min_w = size_threshold * max_w as f64;
    let min_h = size_threshold * max_h as f64;

    comps
        .iter()
        .filter(|c| {
            c.area as f64 >= min_area
                && c.box_width() as f64 >= min_w
                && c.box_height() as f64 >= min_h
        })
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_accumulates_bbox_and_centroid() {
        // Label 1 is a 2x2 block at (1..=2, 0..=1); label 2 a lone pixel.
        #[rustfmt::skip]
        let labels = [
            0, 1, 1, 0,
            0, 1, 1, 0,
            2, 0, 0, 0,
        ];
        let comps = collect_components(&labels, 4, 3, 2);
        assert_eq!(comps.len(), 2);

        let a = comps[0];
        assert_eq!((a.x_min, a.x_max, a.y_min, a.y_max), (1, 2, 0, 1));
        assert_eq!(a.area, 4);
        assert_eq!(a.centroid(), (1.5, 0.5));

        let b = comps[1];
        assert_eq!(b.area, 1);
        assert_eq!(b.centroid(), (0.0, 2.0));
    }

    fn comp(area: u64, w: usize, h: usize) -> Component {
        Component {
            label: 1,
            x_min: 0,
            x_max: w,
            y_min: 0,
            y_max: h,
            sum_x: 0,
            sum_y: 0,
            area,
        }
    }

    #[test]
    fn filter_drops_relatively_small_regions() {
        let comps = vec![comp(1000, 40, 40), comp(100, 38, 38), comp(900, 39, 40)];
        let kept = filter_components(&comps, 0.4, 0.4);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|c| c.area >= 400));
    }

    #[test]
    fn filter_applies_both_side_thresholds() {
        // Big enough area but a sliver in width.
        let comps = vec![comp(1000, 40, 40), comp(500, 10, 40)];
        let kept = filter_components(&comps, 0.4, 0.4);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].area, 1000);
    }

    #[test]
    fn zero_thresholds_keep_everything() {
        let comps = vec![comp(1000, 40, 40), comp(1, 0, 0)];
        let kept = filter_components(&comps, 0.0, 0.0);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn filter_of_empty_set_is_empty() {
        assert!(filter_components(&[], 0.4, 0.4).is_empty());
    }
}
