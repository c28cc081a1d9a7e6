/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the image dimensions are zero.
    #[error("Invalid image size ({0}x{1}), both dimensions must be non-zero")]
    InvalidImageSize(usize, usize),

    /// Error when the data length does not match the image shape.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidDataLength(usize, usize),
}
