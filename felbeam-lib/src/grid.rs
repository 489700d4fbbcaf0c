/// `n` evenly spaced samples from `start` to `stop` inclusive (numpy.linspace).
///
/// `n == 0` gives an empty vector and `n == 1` gives `[start]`.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let x = linspace(0.0, 2.0, 5);
        assert_eq!(x.len(), 5);
        assert_eq!(x[0], 0.0);
        assert_eq!(x[4], 2.0);
        assert!((x[1] - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_linspace_degenerate() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 1.0, 1), vec![3.0]);
    }
}
