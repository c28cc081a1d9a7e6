use num_traits::Zero;

use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use recfilter_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

impl ImageSize {
    /// The same size with width and height exchanged.
    pub fn transposed(&self) -> Self {
        ImageSize {
            width: self.height,
            height: self.width,
        }
    }
}

/// Represents an image with pixel data.
///
/// The image is a dense row-major grid with shape (H, W, C), where H is the
/// height, W the width and C the number of channels.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const C: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const C: usize> Image<T, C> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Returns
    ///
    /// A new image with the given pixel data.
    ///
    /// # Errors
    ///
    /// If either dimension is zero, or the length of the pixel data does not
    /// match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use recfilter_image::{Image, ImageSize};
    ///
    /// let image = Image::<f32, 1>::new(
    ///    ImageSize {
    ///       width: 10,
    ///       height: 20,
    ///  },
    /// vec![0f32; 10 * 20],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        if size.width == 0 || size.height == 0 {
            return Err(ImageError::InvalidImageSize(size.width, size.height));
        }

        if data.len() != size.width * size.height * C {
            return Err(ImageError::InvalidDataLength(
                data.len(),
                size.width * size.height * C,
            ));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size and a constant pixel value.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `val` - The value of every pixel.
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let data = vec![val; size.width * size.height * C];
        Image::new(size, data)
    }

    /// Create a new zero-filled image with the given size.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    pub fn zeros(size: ImageSize) -> Result<Self, ImageError>
    where
        T: Zero + Clone,
    {
        Image::from_size_val(size, T::zero())
    }

    /// The size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// The number of columns (width) of the image.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// The number of rows (height) of the image.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// The number of channels of the image.
    pub fn num_channels(&self) -> usize {
        C
    }

    /// The total number of elements (pixels times channels) in the image.
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// The pixel data as a flat slice.
    pub fn as_slice(&self) -> &[T] {
        self.data.as_slice()
    }

    /// The pixel data as a flat mutable slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        self.data.as_mut_slice()
    }

    /// Consume the image and return the pixel data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImageError;

    #[test]
    fn test_image_new() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::new(
            ImageSize {
                width: 4,
                height: 3,
            },
            vec![0.0; 12],
        )?;
        assert_eq!(image.cols(), 4);
        assert_eq!(image.rows(), 3);
        assert_eq!(image.numel(), 12);
        assert_eq!(image.num_channels(), 1);
        Ok(())
    }

    #[test]
    fn test_image_invalid_length() {
        let res = Image::<f32, 1>::new(
            ImageSize {
                width: 4,
                height: 3,
            },
            vec![0.0; 11],
        );
        assert_eq!(res.err(), Some(ImageError::InvalidDataLength(11, 12)));
    }

    #[test]
    fn test_image_zero_dimension() {
        let res = Image::<f32, 1>::new(
            ImageSize {
                width: 0,
                height: 3,
            },
            vec![],
        );
        assert_eq!(res.err(), Some(ImageError::InvalidImageSize(0, 3)));
    }

    #[test]
    fn test_image_zeros() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::zeros(ImageSize {
            width: 2,
            height: 2,
        })?;
        assert_eq!(image.as_slice(), &[0.0, 0.0, 0.0, 0.0]);
        Ok(())
    }

    #[test]
    fn test_size_transposed() {
        let size = ImageSize {
            width: 7,
            height: 3,
        };
        let t = size.transposed();
        assert_eq!(t.width, 3);
        assert_eq!(t.height, 7);
    }
}
