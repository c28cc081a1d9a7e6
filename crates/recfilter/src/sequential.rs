use recfilter_image::Image;

use crate::recurrence::{PassDirection, RecursiveFilter};

/// Apply the recurrence to every row of the image, in strict index order.
///
/// Each row starts from a zero border condition. This is the reference scan
/// the blocked pipeline is validated against.
///
/// # Arguments
///
/// * `img` - The image to filter in place, with shape (H, W).
/// * `filter` - The recursive filter coefficients.
/// * `direction` - Whether rows are scanned left-to-right or right-to-left.
pub fn filter_rows_inplace<F: RecursiveFilter>(
    img: &mut Image<f32, 1>,
    filter: &F,
    direction: PassDirection,
) {
    let cols = img.cols();
    for row in img.as_slice_mut().chunks_exact_mut(cols) {
        let mut carry = filter.zero_carry();
        match direction {
            PassDirection::Forward => {
                for x in row.iter_mut() {
                    *x = filter.step(*x, &mut carry);
                }
            }
            PassDirection::Backward => {
                for x in row.iter_mut().rev() {
                    *x = filter.step(*x, &mut carry);
                }
            }
        }
    }
}

/// Apply the recurrence to every column of the image, in strict index order.
///
/// Each column starts from a zero border condition.
///
/// # Arguments
///
/// * `img` - The image to filter in place, with shape (H, W).
/// * `filter` - The recursive filter coefficients.
/// * `direction` - Whether columns are scanned top-to-bottom or bottom-to-top.
pub fn filter_cols_inplace<F: RecursiveFilter>(
    img: &mut Image<f32, 1>,
    filter: &F,
    direction: PassDirection,
) {
    let cols = img.cols();
    let rows = img.rows();
    let data = img.as_slice_mut();
    for c in 0..cols {
        let mut carry = filter.zero_carry();
        match direction {
            PassDirection::Forward => {
                for r in 0..rows {
                    let i = r * cols + c;
                    data[i] = filter.step(data[i], &mut carry);
                }
            }
            PassDirection::Backward => {
                for r in (0..rows).rev() {
                    let i = r * cols + c;
                    data[i] = filter.step(data[i], &mut carry);
                }
            }
        }
    }
}

/// Apply the full zero-border 2-D recursive filter sequentially.
///
/// Composes forward and reverse passes on rows, then forward and reverse
/// passes on columns, producing the two-sided separable response.
///
/// # Arguments
///
/// * `img` - The image to filter in place, with shape (H, W).
/// * `filter` - The recursive filter coefficients.
pub fn filter_2d_inplace<F: RecursiveFilter>(img: &mut Image<f32, 1>, filter: &F) {
    filter_rows_inplace(img, filter, PassDirection::Forward);
    filter_rows_inplace(img, filter, PassDirection::Backward);
    filter_cols_inplace(img, filter, PassDirection::Forward);
    filter_cols_inplace(img, filter, PassDirection::Backward);
}
