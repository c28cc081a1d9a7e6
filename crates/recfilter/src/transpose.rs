use rayon::prelude::*;
use recfilter_image::Image;

use crate::error::FilterError;

/// Transpose an image, turning columns into contiguous rows.
///
/// The orchestrator uses this between the row and column directions of the
/// separable filter so that every pass scans contiguous memory.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `dst` - The destination image with shape (W, H).
///
/// # Errors
///
/// Returns an error if `dst` does not have the transposed size of `src`.
///
/// # Example
///
/// ```
/// use recfilter::transpose::transpose;
/// use recfilter_image::{Image, ImageSize};
///
/// let src = Image::<f32, 1>::new(
///     ImageSize { width: 3, height: 2 },
///     vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
/// ).unwrap();
/// let mut dst = Image::<f32, 1>::zeros(src.size().transposed()).unwrap();
///
/// transpose(&src, &mut dst).unwrap();
///
/// assert_eq!(dst.as_slice(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
/// ```
pub fn transpose(src: &Image<f32, 1>, dst: &mut Image<f32, 1>) -> Result<(), FilterError> {
    if dst.size() != src.size().transposed() {
        return Err(FilterError::ImageSizeMismatch(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let src_cols = src.cols();
    let src_rows = src.rows();
    let src_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(src_rows)
        .enumerate()
        .for_each(|(c, out_row)| {
            for (r, v) in out_row.iter_mut().enumerate() {
                *v = src_data[r * src_cols + c];
            }
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use recfilter_image::ImageSize;

    #[test]
    fn test_transpose_non_square() -> Result<(), FilterError> {
        #[rustfmt::skip]
        let src = Image::<f32, 1>::new(
            ImageSize {
                width: 4,
                height: 2,
            },
            vec![
                0.0, 1.0, 2.0, 3.0,
                4.0, 5.0, 6.0, 7.0,
            ],
        )?;
        let mut dst = Image::<f32, 1>::zeros(src.size().transposed())?;

        transpose(&src, &mut dst)?;

        #[rustfmt::skip]
        assert_eq!(
            dst.as_slice(),
            &[
                0.0, 4.0,
                1.0, 5.0,
                2.0, 6.0,
                3.0, 7.0,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_transpose_round_trip() -> Result<(), FilterError> {
        let size = ImageSize {
            width: 5,
            height: 3,
        };
        let data: Vec<f32> = (0..15).map(|i| i as f32).collect();
        let src = Image::<f32, 1>::new(size, data)?;

        let mut once = Image::<f32, 1>::zeros(size.transposed())?;
        let mut twice = Image::<f32, 1>::zeros(size)?;
        transpose(&src, &mut once)?;
        transpose(&once, &mut twice)?;

        assert_eq!(twice.as_slice(), src.as_slice());
        Ok(())
    }

    #[test]
    fn test_transpose_size_mismatch() -> Result<(), FilterError> {
        let src = Image::<f32, 1>::zeros(ImageSize {
            width: 4,
            height: 2,
        })?;
        let mut dst = Image::<f32, 1>::zeros(ImageSize {
            width: 4,
            height: 2,
        })?;

        let res = transpose(&src, &mut dst);
        assert_eq!(res, Err(FilterError::ImageSizeMismatch(4, 2, 4, 2)));
        Ok(())
    }
}
