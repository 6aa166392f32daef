//! Vector Math
//!
//! Dot product, magnitude, Euclidean distance, and unit normalization.

/// Compute dot product of two vectors
///
/// Uses unrolled loop for better CPU performance.
#[inline]
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "Vector dimensions must match");

    let len = a.len();
    let mut sum = 0.0f32;

    // Process 4 elements at a time (manual unrolling)
    let chunks = len / 4;
    let remainder = len % 4;

    for i in 0..chunks {
        let idx = i * 4;
        sum += a[idx] * b[idx];
        sum += a[idx + 1] * b[idx + 1];
        sum += a[idx + 2] * b[idx + 2];
        sum += a[idx + 3] * b[idx + 3];
    }

    // Handle remainder
    for i in (len - remainder)..len {
        sum += a[i] * b[i];
    }

    sum
}

/// Euclidean norm of a vector
#[inline]
pub fn magnitude(v: &[f32]) -> f32 {
    dot_product(v, v).sqrt()
}

/// Compute Euclidean distance between two vectors
#[inline]
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "Vector dimensions must match");

    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f32>()
        .sqrt()
}

/// Rescale a vector to Euclidean norm 1.
///
/// Returns `None` for a zero-norm input; stored vectors and query vectors
/// must never carry NaN components from a division by zero.
pub fn unit(v: &[f32]) -> Option<Vec<f32>> {
    let mag = magnitude(v);
    if mag > 0.0 && mag.is_finite() {
        Some(v.iter().map(|x| x / mag).collect())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_product() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![4.0, 5.0, 6.0];
        assert!((dot_product(&a, &b) - 32.0).abs() < 1e-6);
    }

    #[test]
    fn test_dot_product_unroll_remainder() {
        // 6 elements exercises both the unrolled chunk and the tail
        let a = vec![1.0, 1.0, 1.0, 1.0, 2.0, 3.0];
        let b = vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0];
        assert!((dot_product(&a, &b) - 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_magnitude() {
        let v = vec![3.0, 4.0, 0.0];
        assert!((magnitude(&v) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_euclidean_distance() {
        let a = vec![0.0, 0.0, 0.0];
        let b = vec![3.0, 4.0, 0.0];
        assert!((euclidean_distance(&a, &b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_unit() {
        let n = unit(&[3.0, 4.0, 0.0]).unwrap();
        assert!((n[0] - 0.6).abs() < 1e-6);
        assert!((n[1] - 0.8).abs() < 1e-6);
        assert!(n[2].abs() < 1e-6);
        assert!((magnitude(&n) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_unit_zero_norm() {
        assert!(unit(&[0.0, 0.0, 0.0]).is_none());
    }
}
