//! Straight-line helpers shared by resampling and boundary extrapolation.

/// Evaluate the line through `a` and `b` at `x`.
///
/// Also valid outside `[a.0, b.0]`, where it extrapolates along the same line.
pub fn linear_interp(a: (f64, f64), b: (f64, f64), x: f64) -> f64 {
    let (x0, y0) = a;
    let (x1, y1) = b;
    if (x1 - x0).abs() < 1e-12 {
        return y0;
    }
    let u = (x - x0) / (x1 - x0);
    y0 + u * (y1 - y0)
}

/// `n` evenly spaced values from `start` to `end` inclusive.
pub fn lin_space(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n as f64 - 1.0);
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            // Pin the last point so the upper bound is exact.
            out[n - 1] = end;
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint() {
        let y = linear_interp((6.5, -2.0), (7.0, -3.0), 6.75);
        assert!((y + 2.5).abs() < 1e-12);
    }

    #[test]
    fn extends_beyond_segment() {
        let y = linear_interp((1.0, -2.0), (1.1, -1.8), 1.11);
        assert!((y + 1.78).abs() < 1e-12);
    }

    #[test]
    fn lin_space_includes_endpoints() {
        let v = lin_space(6.1, 9.8, 500);
        assert_eq!(v.len(), 500);
        assert_eq!(v[0], 6.1);
        assert_eq!(v[499], 9.8);
        assert!(v.windows(2).all(|w| w[1] > w[0]));
    }
}
