use recfilter_image::ImageError;

/// Errors that can occur during recursive filtering.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FilterError {
    /// Error coming from the image container.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// The block size is zero or larger than the filtered dimension.
    #[error("Invalid block size ({0}) for dimension of length {1}")]
    InvalidBlockSize(usize, usize),

    /// Source and destination images do not have the expected sizes.
    #[error("Source size ({0}x{1}) does not match destination size ({2}x{3})")]
    ImageSizeMismatch(usize, usize, usize, usize),

    /// Two buffers that must have equal length do not.
    #[error("Buffer lengths differ ({0} vs {1})")]
    LengthMismatch(usize, usize),
}
