use crate::error::FilterError;

/// Compare a result buffer against a reference buffer.
///
/// Returns the maximum absolute error over all elements and the maximum
/// relative error over the elements whose reference value is nonzero.
/// Comparing a buffer with itself yields `(0.0, 0.0)`.
///
/// # Arguments
///
/// * `reference` - The ground-truth values.
/// * `result` - The values under test; must have the same length.
///
/// # Example
///
/// ```
/// use recfilter::metrics::max_error;
///
/// let reference = [1.0f32, 2.0, 0.0];
/// let result = [1.0f32, 2.1, 0.5];
///
/// let (max_abs, max_rel) = max_error(&reference, &result).unwrap();
///
/// assert!((max_abs - 0.5).abs() < 1e-6);
/// assert!((max_rel - 0.05).abs() < 1e-6);
/// ```
pub fn max_error(reference: &[f32], result: &[f32]) -> Result<(f32, f32), FilterError> {
    if reference.len() != result.len() {
        return Err(FilterError::LengthMismatch(reference.len(), result.len()));
    }

    let mut max_abs = 0.0f32;
    let mut max_rel = 0.0f32;
    for (&r, &v) in reference.iter().zip(result.iter()) {
        let abs = (v - r).abs();
        max_abs = max_abs.max(abs);
        if r != 0.0 {
            max_rel = max_rel.max(abs / r.abs());
        }
    }

    Ok((max_abs, max_rel))
}
