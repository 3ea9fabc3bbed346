//! Biased Otsu binarization.

/// Otsu level over a normalized 256-bin histogram: the level maximizing
/// the between-class variance
/// `(mu1*p2 - mu2*p1)^2 / (p1*p2)`,
/// where `p`/`mu` are the zeroth and first moments of the two classes.
/// A zero denominator is replaced by 1, so degenerate single-class
/// histograms resolve to the lowest candidate level.
pub(crate) fn otsu_level(hist: &[f64; 256]) -> usize {
    let mut mu_total = 0.0;
    for (i, &h) in hist.iter().enumerate() {
        mu_total += i as f64 * h;
    }

    let mut p1 = hist[0];
    let mut mu1 = 0.0;
    let mut best_k = 1;
    let mut best_var = -1.0;

    for (k, &h) in hist.iter().enumerate().skip(1) {
        p1 += h;
        mu1 += k as f64 * h;
        let p2 = 1.0 - p1;
        let mu2 = mu_total - mu1;

        let num = mu1 * p2 - mu2 * p1;
        let mut denom = p1 * p2;
        if denom == 0.0 {
            denom = 1.0;
        }
        let var = num * num / denom;
        if var > best_var {
            best_var = var;
            best_k = k;
        }
    }

    best_k
}

/// Threshold `buf` in place at `bias` times the Otsu level. Pixels at or
/// above the threshold become 255 (background), the rest 0 (foreground).
/// Returns the applied threshold.
pub(crate) fn binarize(buf: &mut [u8], bias: f64) -> f64 {
    let mut hist = [0.0f64; 256];
    for &v in buf.iter() {
        hist[v as usize] += 1.0;
    }
    let n = buf.len() as f64;
    if n > 0.0 {
        for h in &mut hist {
            *h /= n;
        }
    }

    let threshold = bias * otsu_level(&hist) as f64;
    for v in buf.iter_mut() {
        *v = if *v as f64 >= threshold { 255 } else { 0 };
    }
    threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(counts: &[(usize, f64)]) -> [f64; 256] {
        let total: f64 = counts.iter().map(|&(_, c)| c).sum();
        let mut hist = [0.0; 256];
        for &(i, c) in counts {
            hist[i] += c / total;
        }
        hist
    }

    #[test]
    fn otsu_separates_two_modes() {
        let hist = normalized(&[(40, 50.0), (50, 50.0), (200, 80.0), (210, 80.0)]);
        let k = otsu_level(&hist);
        assert!((50..200).contains(&k), "k = {k}");
    }

    #[test]
    fn otsu_single_bin_picks_lowest_level() {
        let hist = normalized(&[(255, 1.0)]);
        assert_eq!(otsu_level(&hist), 1);
    }

    #[test]
    fn blank_white_binarizes_to_background() {
        let mut buf = vec![255u8; 64];
        binarize(&mut buf, 1.2);
        assert!(buf.iter().all(|&v| v == 255));
    }

    #[test]
    fn solid_black_binarizes_to_foreground() {
        let mut buf = vec![0u8; 64];
        let t = binarize(&mut buf, 1.2);
        assert!(t > 0.0);
        assert!(buf.iter().all(|&v| v == 0));
    }

    #[test]
    fn bias_widens_the_foreground_class() {
        // Values just above the unbiased level are foreground only with bias.
        let mut plain = vec![0u8; 32];
        plain.extend(std::iter::repeat(255u8).take(32));
        plain.extend(std::iter::repeat(110u8).take(4));

        let mut biased = plain.clone();
        let t1 = binarize(&mut plain, 1.0);
        let t2 = binarize(&mut biased, 1.2);
        assert!(t2 > t1);
        let fg_plain = plain.iter().filter(|&&v| v == 0).count();
        let fg_biased = biased.iter().filter(|&&v| v == 0).count();
        assert!(fg_biased >= fg_plain);
    }
}
