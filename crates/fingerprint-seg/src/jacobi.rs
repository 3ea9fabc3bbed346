//! Cyclic Jacobi eigendecomposition of a symmetric 3x3 matrix.
//!
//! The border covariance is embedded in a 3x3 matrix (third row and
//! column zero), so a fixed-size solver is all the orientation estimate
//! needs. The floating-point equality shortcuts below are deliberate
//! convergence tests on f64 magnitudes, not bugs; keep the arithmetic in
//! f64 or results stop being reproducible.

use nalgebra::{Matrix3, Vector3};

const MAX_SWEEPS: usize = 50;

/// Eigenvalues in descending order with matching eigenvector columns.
/// Returns `None` when the off-diagonal mass has not vanished after 50
/// sweeps.
pub(crate) fn jacobi_eigen(m: &Matrix3<f64>) -> Option<(Vector3<f64>, Matrix3<f64>)> {
    let mut a = *m;
    let mut v = Matrix3::identity();
    let mut d = Vector3::new(a[(0, 0)], a[(1, 1)], a[(2, 2)]);

    for sweep in 0..MAX_SWEEPS {
        let sm = a[(0, 1)].abs() + a[(0, 2)].abs() + a[(1, 2)].abs();
        if sm == 0.0 {
            sort_descending(&mut d, &mut v);
            canonicalize_signs(&mut v);
            return Some((d, v));
        }

        let tresh = if sweep < 3 { 0.2 * sm / 9.0 } else { 0.0 };

        for ip in 0..2 {
            for iq in (ip + 1)..3 {
                let g = 100.0 * a[(ip, iq)].abs();

                // Once iteration has settled, an off-diagonal entry that no
                // longer affects either eigenvalue is simply zeroed.
                if sweep > 3 && d[ip].abs() + g == d[ip].abs() && d[iq].abs() + g == d[iq].abs() {
                    a[(ip, iq)] = 0.0;
                } else if a[(ip, iq)].abs() > tresh {
                    let h = d[iq] - d[ip];
                    let t = if h.abs() + g == h.abs() {
                        a[(ip, iq)] / h
                    } else {
                        let theta = 0.5 * h / a[(ip, iq)];
                        let t = 1.0 / (theta.abs() + (1.0 + theta * theta).sqrt());
                        if theta < 0.0 {
                            -t
                        } else {
                            t
                        }
                    };

                    let c = 1.0 / (1.0 + t * t).sqrt();
                    let s = t * c;
                    let tau = s / (1.0 + c);
                    let h = t * a[(ip, iq)];

                    d[ip] -= h;
                    d[iq] += h;
                    a[(ip, iq)] = 0.0;

                    for j in 0..ip {
                        rotate(&mut a, (j, ip), (j, iq), s, tau);
                    }
                    for j in (ip + 1)..iq {
                        rotate(&mut a, (ip, j), (j, iq), s, tau);
                    }
                    for j in (iq + 1)..3 {
                        rotate(&mut a, (ip, j), (iq, j), s, tau);
                    }
                    for j in 0..3 {
                        rotate(&mut v, (j, ip), (j, iq), s, tau);
                    }
                }
            }
        }
    }

    None
}

#[inline]
fn rotate(m: &mut Matrix3<f64>, ij: (usize, usize), kl: (usize, usize), s: f64, tau: f64) {
    let g = m[ij];
    let h = m[kl];
    m[ij] = g - s * (h + g * tau);
    m[kl] = h + s * (g - h * tau);
}

fn sort_descending(d: &mut Vector3<f64>, v: &mut Matrix3<f64>) {
    for i in 0..2 {
        let mut k = i;
        for j in (i + 1)..3 {
            if d[j] > d[k] {
                k = j;
            }
        }
        if k != i {
            d.swap_rows(i, k);
            v.swap_columns(i, k);
        }
    }
}

/// Flip any eigenvector with a majority of negative components.
fn canonicalize_signs(v: &mut Matrix3<f64>) {
    for col in 0..3 {
        let nonneg = (0..3).filter(|&row| v[(row, col)] >= 0.0).count();
        if nonneg < 2 {
            for row in 0..3 {
                v[(row, col)] = -v[(row, col)];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn diagonal_matrix_is_already_solved() {
        let m = Matrix3::from_diagonal(&Vector3::new(2.0, 5.0, 1.0));
        let (d, v) = jacobi_eigen(&m).expect("converges");
        assert_relative_eq!(d[0], 5.0);
        assert_relative_eq!(d[1], 2.0);
        assert_relative_eq!(d[2], 1.0);
        // Principal eigenvector is the y axis.
        assert_relative_eq!(v[(1, 0)].abs(), 1.0);
        assert_relative_eq!(v[(0, 0)], 0.0);
    }

    #[test]
    fn symmetric_pair_splits_into_diagonal_axes() {
        // [[2,1,0],[1,2,0],[0,0,0]]: eigenvalues 3, 1, 0 with the
        // principal axis along (1,1)/sqrt(2).
        let m = Matrix3::new(2.0, 1.0, 0.0, 1.0, 2.0, 0.0, 0.0, 0.0, 0.0);
        let (d, v) = jacobi_eigen(&m).expect("converges");
        assert_relative_eq!(d[0], 3.0, epsilon = 1e-12);
        assert_relative_eq!(d[1], 1.0, epsilon = 1e-12);
        assert_relative_eq!(d[2], 0.0, epsilon = 1e-12);

        let inv_sqrt2 = std::f64::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(v[(0, 0)], inv_sqrt2, epsilon = 1e-12);
        assert_relative_eq!(v[(1, 0)], inv_sqrt2, epsilon = 1e-12);
    }

    #[test]
    fn eigenvectors_stay_orthonormal() {
        let m = Matrix3::new(4.0, 1.5, 0.5, 1.5, 3.0, 0.25, 0.5, 0.25, 2.0);
        let (d, v) = jacobi_eigen(&m).expect("converges");
        assert!(d[0] >= d[1] && d[1] >= d[2]);

        for i in 0..3 {
            for j in 0..3 {
                let dot: f64 = (0..3).map(|r| v[(r, i)] * v[(r, j)]).sum();
                let expect = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(dot, expect, epsilon = 1e-10);
            }
        }

        // Reconstruction: M v_i = d_i v_i.
        for i in 0..3 {
            let col = v.column(i).into_owned();
            let mv = m * col;
            for r in 0..3 {
                assert_relative_eq!(mv[r], d[i] * col[r], epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn majority_negative_columns_are_flipped() {
        let m = Matrix3::from_diagonal(&Vector3::new(1.0, 2.0, 3.0));
        let (_, v) = jacobi_eigen(&m).expect("converges");
        for col in 0..3 {
            let nonneg = (0..3).filter(|&row| v[(row, col)] >= 0.0).count();
            assert!(nonneg >= 2);
        }
    }
}
