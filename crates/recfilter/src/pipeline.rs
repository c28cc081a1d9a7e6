use rayon::prelude::*;
use recfilter_image::Image;

use crate::blocked::{fixup_row, local_pass_row, num_tiles, propagate_row, CarryEntry};
use crate::error::FilterError;
use crate::parallel::ExecutionStrategy;
use crate::recurrence::{PassDirection, RecursiveFilter};
use crate::transpose::transpose;

/// Default tile length along the scan dimension.
///
/// A tuning parameter trading parallelism granularity against per-tile fixed
/// overhead, not a correctness parameter; any value in `1..=dimension` gives
/// the same result up to floating point rounding.
pub const DEFAULT_BLOCK_SIZE: usize = 32;

/// A blocked recursive filter runner.
///
/// Evaluates the recurrence as three phases per direction: a data-parallel
/// local pass over independent tiles, a short sequential carry-propagation
/// scan along the tile axis (still parallel across rows), and a
/// data-parallel fixup pass that produces the final values. The result
/// matches the strictly sequential scans in [`crate::sequential`] up to
/// floating point rounding.
///
/// # Examples
///
/// ```
/// use recfilter::pipeline::BlockedFilter;
/// use recfilter::recurrence::{FirstOrder, PassDirection};
/// use recfilter_image::{Image, ImageSize};
///
/// let size = ImageSize { width: 8, height: 1 };
/// let mut img = Image::<f32, 1>::new(
///     size,
///     vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
/// ).unwrap();
///
/// let filter = FirstOrder { b0: 1.26795, a1: -0.26795 };
/// let blocked = BlockedFilter::new(4);
/// blocked.filter_rows_inplace(&mut img, &filter, PassDirection::Forward).unwrap();
///
/// assert!((img.as_slice()[0] - 1.26795).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BlockedFilter {
    block_size: usize,
    strategy: ExecutionStrategy,
}

impl Default for BlockedFilter {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_SIZE)
    }
}

impl BlockedFilter {
    /// Create a runner with the given tile length and the default
    /// [`ExecutionStrategy::Auto`] strategy.
    ///
    /// The block size is validated against the image on every call, since
    /// it must not exceed the filtered dimension.
    pub fn new(block_size: usize) -> Self {
        Self {
            block_size,
            strategy: ExecutionStrategy::default(),
        }
    }

    /// Replace the execution strategy.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// The configured tile length.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Apply one filtering pass along the rows of the image, in place.
    ///
    /// # Arguments
    ///
    /// * `img` - The image to filter, with shape (H, W).
    /// * `filter` - The recursive filter coefficients.
    /// * `direction` - The traversal direction along the rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the block size is zero or larger than the image
    /// width. No data is modified in that case.
    pub fn filter_rows_inplace<F: RecursiveFilter>(
        &self,
        img: &mut Image<f32, 1>,
        filter: &F,
        direction: PassDirection,
    ) -> Result<(), FilterError> {
        let cols = img.cols();
        let rows = img.rows();
        self.check_block_size(cols)?;

        let nt = num_tiles(cols, self.block_size);
        let mut table = vec![CarryEntry::new(filter); rows * nt];

        if self.strategy.is_parallel(img.numel()) {
            self.run_parallel(img, filter, direction, &mut table, nt);
        } else {
            self.run_serial(img, filter, direction, &mut table, nt);
        }
        Ok(())
    }

    /// Apply one filtering pass along the rows, out of place.
    ///
    /// # Arguments
    ///
    /// * `src` - The source image with shape (H, W).
    /// * `dst` - The destination image with shape (H, W).
    /// * `filter` - The recursive filter coefficients.
    /// * `direction` - The traversal direction along the rows.
    pub fn filter_rows<F: RecursiveFilter>(
        &self,
        src: &Image<f32, 1>,
        dst: &mut Image<f32, 1>,
        filter: &F,
        direction: PassDirection,
    ) -> Result<(), FilterError> {
        check_same_size(src, dst)?;
        self.check_block_size(src.cols())?;

        dst.as_slice_mut().copy_from_slice(src.as_slice());
        self.filter_rows_inplace(dst, filter, direction)
    }

    /// Apply the full zero-border 2-D recursive filter.
    ///
    /// Runs forward and reverse passes along the rows, transposes the
    /// working buffer, runs forward and reverse passes again (the original
    /// columns), and transposes back. Equivalent to
    /// [`crate::sequential::filter_2d_inplace`] up to floating point
    /// rounding. Each invocation starts from `src`; no state is carried
    /// between repeated runs.
    ///
    /// # Arguments
    ///
    /// * `src` - The source image with shape (H, W).
    /// * `dst` - The destination image with shape (H, W).
    /// * `filter` - The recursive filter coefficients.
    pub fn filter_2d<F: RecursiveFilter>(
        &self,
        src: &Image<f32, 1>,
        dst: &mut Image<f32, 1>,
        filter: &F,
    ) -> Result<(), FilterError> {
        check_same_size(src, dst)?;
        // both dimensions get filtered, so validate both before any work
        self.check_block_size(src.cols())?;
        self.check_block_size(src.rows())?;

        dst.as_slice_mut().copy_from_slice(src.as_slice());
        self.filter_rows_inplace(dst, filter, PassDirection::Forward)?;
        self.filter_rows_inplace(dst, filter, PassDirection::Backward)?;

        let mut work = Image::<f32, 1>::zeros(src.size().transposed())?;
        transpose(dst, &mut work)?;
        self.filter_rows_inplace(&mut work, filter, PassDirection::Forward)?;
        self.filter_rows_inplace(&mut work, filter, PassDirection::Backward)?;
        transpose(&work, dst)?;

        Ok(())
    }

    fn check_block_size(&self, dim: usize) -> Result<(), FilterError> {
        if self.block_size == 0 || self.block_size > dim {
            return Err(FilterError::InvalidBlockSize(self.block_size, dim));
        }
        Ok(())
    }

    /// The three phases on the global Rayon pool. Each phase is a separate
    /// fork-join, which is the synchronization barrier: every tile's writes
    /// in phase N are visible before any tile reads them in phase N+1.
    fn run_parallel<F: RecursiveFilter>(
        &self,
        img: &mut Image<f32, 1>,
        filter: &F,
        direction: PassDirection,
        table: &mut [CarryEntry<F>],
        nt: usize,
    ) {
        let cols = img.cols();
        let block_size = self.block_size;

        // phase 1: per-tile zero-state carries, independent across tiles
        table
            .par_chunks_exact_mut(nt)
            .zip(img.as_slice().par_chunks_exact(cols))
            .for_each(|(entries, row)| {
                local_pass_row(filter, row, block_size, direction, entries);
            });

        // phase 2: sequential along the tile axis, parallel across rows
        table.par_chunks_exact_mut(nt).for_each(|entries| {
            propagate_row(filter, entries, direction);
        });

        // phase 3: final values, independent across tiles again
        img.as_slice_mut()
            .par_chunks_exact_mut(cols)
            .zip(table.par_chunks_exact(nt))
            .for_each(|(row, entries)| {
                fixup_row(filter, row, block_size, direction, entries);
            });
    }

    fn run_serial<F: RecursiveFilter>(
        &self,
        img: &mut Image<f32, 1>,
        filter: &F,
        direction: PassDirection,
        table: &mut [CarryEntry<F>],
        nt: usize,
    ) {
        let cols = img.cols();
        let block_size = self.block_size;

        table
            .chunks_exact_mut(nt)
            .zip(img.as_slice().chunks_exact(cols))
            .for_each(|(entries, row)| {
                local_pass_row(filter, row, block_size, direction, entries);
            });

        table.chunks_exact_mut(nt).for_each(|entries| {
            propagate_row(filter, entries, direction);
        });

        img.as_slice_mut()
            .chunks_exact_mut(cols)
            .zip(table.chunks_exact(nt))
            .for_each(|(row, entries)| {
                fixup_row(filter, row, block_size, direction, entries);
            });
    }
}

fn check_same_size(src: &Image<f32, 1>, dst: &Image<f32, 1>) -> Result<(), FilterError> {
    if src.size() != dst.size() {
        return Err(FilterError::ImageSizeMismatch(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }
    Ok(())
}
