use crate::error::ImageError;
use crate::image::{Image, ImageSize};

/// A dense n-dimensional array holding image-like data in row-major order.
///
/// This is the array-like value handed over by callers before it has been
/// checked to be an image: its rank is arbitrary until [`ImageArray::into_image`]
/// interprets it as (row, column[, channel]).
///
/// # Examples
///
/// ```
/// use colormatch_image::ImageArray;
///
/// let gray = ImageArray::new(vec![2, 3], vec![0.0f64; 6]).unwrap();
/// let image = gray.into_image().unwrap();
///
/// assert_eq!(image.num_channels(), 1);
/// assert_eq!(image.shape(), [2, 3, 1]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ImageArray<T> {
    shape: Vec<usize>,
    data: Vec<T>,
}

impl<T> ImageArray<T> {
    /// Create a new array from its shape and row-major data.
    ///
    /// # Errors
    ///
    /// Returns an error if the product of the shape does not match the data length.
    pub fn new(shape: Vec<usize>, data: Vec<T>) -> Result<Self, ImageError> {
        if shape.iter().product::<usize>() != data.len() {
            return Err(ImageError::InvalidArrayShape(shape, data.len()));
        }
        Ok(Self { shape, data })
    }

    /// The shape of the array.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// The number of axes of the array.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// The flat data of the array.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Interpret the array as an image.
    ///
    /// A two axes array is treated as a single channel image by appending a trailing
    /// channel axis of size one. Three axes are read as (row, column, channel).
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidRank`] for any other number of axes.
    pub fn into_image(self) -> Result<Image<T>, ImageError> {
        let (height, width, channels) = match self.shape.as_slice() {
            [h, w] => (*h, *w, 1),
            [h, w, c] => (*h, *w, *c),
            other => return Err(ImageError::InvalidRank(other.len())),
        };

        Image::new(ImageSize { width, height }, channels, self.data)
    }
}

impl<T> From<Image<T>> for ImageArray<T> {
    fn from(image: Image<T>) -> Self {
        let shape = image.shape().to_vec();
        Self {
            shape,
            data: image.into_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ImageArray;
    use crate::error::ImageError;

    #[test]
    fn array_shape_mismatch() {
        let res = ImageArray::new(vec![2, 2, 3], vec![0u8; 10]);
        assert_eq!(res, Err(ImageError::InvalidArrayShape(vec![2, 2, 3], 10)));
    }

    #[test]
    fn array_rank_two_adds_channel_axis() -> Result<(), ImageError> {
        let image = ImageArray::new(vec![5, 4], vec![1.0f64; 20])?.into_image()?;
        assert_eq!(image.shape(), [5, 4, 1]);
        Ok(())
    }

    #[test]
    fn array_wrong_rank() -> Result<(), ImageError> {
        let four = ImageArray::new(vec![5, 5, 3, 1], vec![0.0f64; 75])?;
        assert_eq!(four.rank(), 4);
        assert_eq!(four.into_image(), Err(ImageError::InvalidRank(4)));

        let one = ImageArray::new(vec![5], vec![0.0f64; 5])?;
        assert_eq!(one.into_image(), Err(ImageError::InvalidRank(1)));

        Ok(())
    }

    #[test]
    fn array_from_image_roundtrip() -> Result<(), ImageError> {
        let array = ImageArray::new(vec![2, 1, 3], vec![0u8, 1, 2, 3, 4, 5])?;
        let image = array.clone().into_image()?;
        assert_eq!(ImageArray::from(image), array);
        Ok(())
    }
}
