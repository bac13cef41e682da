//! Value range normalization between numeric representations.
//!
//! Images enter and leave the color transfer core as unit range `f64` data. This
//! module rescales pixel values between the range they were observed in and the
//! range of a target representation:
//!
//! * **Unit float** ([`Normalizer::norm_unit`]) - scale into `[0, 1]`
//! * **8-bit / 16-bit** ([`Normalizer::to_u8`], [`Normalizer::to_u16`]) - scale and round
//!   into the full unsigned integer range
//! * **Any representation** ([`Normalizer::type_norm`]) - integer targets use their full
//!   range, float targets use `[0, 1]`
//!
//! # Example
//!
//! ```
//! use colormatch_image::{Image, ImageSize};
//! use colormatch_imgproc::normalize::Normalizer;
//!
//! let image = Image::<f64>::new(
//!     ImageSize { width: 3, height: 1 },
//!     1,
//!     vec![-1.0, 0.0, 1.0],
//! ).unwrap();
//!
//! let normalizer = Normalizer::from_image(&image).unwrap();
//! let image_u8 = normalizer.to_u8(&image);
//!
//! assert_eq!(image_u8.as_slice(), &[0, 128, 255]);
//! ```

use colormatch_image::{Image, ImageError};

/// Find the minimum and maximum values in an image.
///
/// # Arguments
///
/// * `image` - The input image of shape (height, width, channels).
///
/// # Returns
///
/// A tuple containing the minimum and maximum values in the image.
///
/// # Errors
///
/// If the image data is empty, an error is returned.
///
/// # Example
///
/// ```
/// use colormatch_image::{Image, ImageSize};
/// use colormatch_imgproc::normalize::find_min_max;
///
/// let image_data = vec![0u8, 1, 0, 1, 2, 3, 0, 1, 0, 1, 2, 3];
/// let image = Image::<u8>::new(
///   ImageSize {
///     width: 2,
///     height: 2,
///   },
///   3,
///   image_data,
/// )
/// .unwrap();
///
/// let (min, max) = find_min_max(&image).unwrap();
/// assert_eq!(min, 0);
/// assert_eq!(max, 3);
/// ```
pub fn find_min_max<T>(image: &Image<T>) -> Result<(T, T), ImageError>
where
    T: Clone + Copy + PartialOrd,
{
    // get the first element in the image
    let first_element = match image.as_slice().iter().next() {
        Some(x) => x,
        None => return Err(ImageError::ImageDataNotInitialized),
    };

    let mut min = first_element;
    let mut max = first_element;

    for x in image.as_slice().iter() {
        if x < min {
            min = x;
        }
        if x > max {
            max = x;
        }
    }

    Ok((*min, *max))
}

/// A numeric representation images can be normalized into.
pub trait NormTarget: Copy {
    /// Lower bound of the default output range.
    const MIN: f64;
    /// Upper bound of the default output range.
    const MAX: f64;
    /// Whether values are rounded before conversion.
    const INTEGER: bool;

    /// Convert an in-range `f64` value into the representation.
    fn from_f64(x: f64) -> Self;
}

impl NormTarget for u8 {
    const MIN: f64 = u8::MIN as f64;
    const MAX: f64 = u8::MAX as f64;
    const INTEGER: bool = true;

    fn from_f64(x: f64) -> Self {
        x.round().clamp(0.0, 255.0) as u8
    }
}

impl NormTarget for u16 {
    const MIN: f64 = u16::MIN as f64;
    const MAX: f64 = u16::MAX as f64;
    const INTEGER: bool = true;

    fn from_f64(x: f64) -> Self {
        x.round().clamp(0.0, 65535.0) as u16
    }
}

impl NormTarget for f32 {
    const MIN: f64 = 0.0;
    const MAX: f64 = 1.0;
    const INTEGER: bool = false;

    fn from_f64(x: f64) -> Self {
        x as f32
    }
}

impl NormTarget for f64 {
    const MIN: f64 = 0.0;
    const MAX: f64 = 1.0;
    const INTEGER: bool = false;

    fn from_f64(x: f64) -> Self {
        x
    }
}

/// Rescales values from a source range into the range of a target representation.
///
/// Values are first mapped to `[0, 1]` with `(v - min) / (max - min)` and clipped to
/// that interval, then stretched to the target range. A degenerate source range
/// (`max <= min`) leaves the values unscaled before clipping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    min: f64,
    max: f64,
}

impl Normalizer {
    /// Create a normalizer with a fixed source range.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Create a normalizer whose source range is the extent of `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if `data` is empty.
    pub fn from_data(data: &[f64]) -> Result<Self, ImageError> {
        let mut iter = data.iter().copied();
        let first = iter.next().ok_or(ImageError::ImageDataNotInitialized)?;
        let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Ok(Self::new(min, max))
    }

    /// Create a normalizer whose source range is the extent of the image values.
    ///
    /// # Errors
    ///
    /// Returns an error if the image is empty.
    pub fn from_image(image: &Image<f64>) -> Result<Self, ImageError> {
        let (min, max) = find_min_max(image)?;
        Ok(Self::new(min, max))
    }

    /// The source range as `(min, max)`.
    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Map a value to the unit interval.
    pub fn norm_unit(&self, value: f64) -> f64 {
        let norm = if self.max > self.min {
            (value - self.min) / (self.max - self.min)
        } else {
            value
        };

        // prevent wrap-around
        norm.clamp(0.0, 1.0)
    }

    /// Normalize an image to 8-bit unsigned integers.
    pub fn to_u8(&self, image: &Image<f64>) -> Image<u8> {
        self.type_norm(image)
    }

    /// Normalize an image to 16-bit unsigned integers.
    pub fn to_u16(&self, image: &Image<f64>) -> Image<u16> {
        self.type_norm(image)
    }

    /// Normalize an image into the default range of the target representation.
    ///
    /// Integer targets span their full range, float targets span `[0, 1]`.
    pub fn type_norm<T: NormTarget>(&self, image: &Image<f64>) -> Image<T> {
        self.type_norm_range(image, T::MIN, T::MAX)
    }

    /// Normalize an image into `[new_min, new_max]` of the target representation.
    pub fn type_norm_range<T: NormTarget>(
        &self,
        image: &Image<f64>,
        new_min: f64,
        new_max: f64,
    ) -> Image<T> {
        image.map(|&v| {
            let scaled = self.norm_unit(v) * (new_max - new_min) + new_min;
            if T::INTEGER {
                T::from_f64(scaled.round())
            } else {
                T::from_f64(scaled)
            }
        })
    }
}

/// Convert integer image samples to unit range `f64` by dividing by the type maximum.
///
/// # Example
///
/// ```
/// use colormatch_image::{Image, ImageSize};
/// use colormatch_imgproc::normalize::unit_from_integer;
///
/// let image = Image::<u16>::new(ImageSize { width: 2, height: 1 }, 1, vec![0, 65535]).unwrap();
/// let unit = unit_from_integer(&image, u16::MAX as f64).unwrap();
///
/// assert_eq!(unit.as_slice(), &[0.0, 1.0]);
/// ```
pub fn unit_from_integer<T>(image: &Image<T>, type_max: f64) -> Result<Image<f64>, ImageError>
where
    T: Copy + num_traits::NumCast,
{
    Ok(image.cast::<f64>()?.map(|&v| v / type_max))
}

#[cfg(test)]
mod tests {
    use super::Normalizer;
    use colormatch_image::{Image, ImageError, ImageSize};

    fn ramp() -> Result<Image<f64>, ImageError> {
        Image::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            1,
            vec![0.0, 1.0, 2.0, 3.0],
        )
    }

    #[test]
    fn find_min_max() -> Result<(), ImageError> {
        let image_data = vec![0u8, 1, 0, 1, 2, 3, 0, 1, 0, 1, 2, 3];
        let image = Image::<u8>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            3,
            image_data,
        )?;

        let (min, max) = super::find_min_max(&image)?;

        assert_eq!(min, 0);
        assert_eq!(max, 3);

        Ok(())
    }

    #[test]
    fn norm_unit_from_data() -> Result<(), ImageError> {
        let image = ramp()?;
        let normalizer = Normalizer::from_image(&image)?;
        assert_eq!(normalizer.range(), (0.0, 3.0));

        let unit = normalizer.type_norm::<f64>(&image);
        let expected = [0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0];
        unit.as_slice()
            .iter()
            .zip(expected.iter())
            .for_each(|(a, b)| approx::assert_relative_eq!(*a, *b, epsilon = 1e-12));

        Ok(())
    }

    #[test]
    fn norm_integer_targets() -> Result<(), ImageError> {
        let image = ramp()?;
        let normalizer = Normalizer::from_image(&image)?;

        assert_eq!(normalizer.to_u8(&image).as_slice(), &[0, 85, 170, 255]);
        assert_eq!(
            normalizer.to_u16(&image).as_slice(),
            &[0, 21845, 43690, 65535]
        );

        Ok(())
    }

    #[test]
    fn norm_clips_out_of_range() -> Result<(), ImageError> {
        let image = ramp()?;
        let normalizer = Normalizer::new(1.0, 2.0);

        assert_eq!(normalizer.to_u8(&image).as_slice(), &[0, 0, 255, 255]);

        Ok(())
    }

    #[test]
    fn norm_degenerate_range() -> Result<(), ImageError> {
        let image = Image::<f64>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            1,
            0.8,
        )?;
        let normalizer = Normalizer::from_image(&image)?;

        // values pass through unscaled and only get clipped
        let unit = normalizer.type_norm::<f64>(&image);
        assert!(unit.as_slice().iter().all(|&v| v == 0.8));
        assert_eq!(normalizer.to_u8(&image).as_slice(), &[204; 4]);

        Ok(())
    }

    #[test]
    fn norm_custom_range() -> Result<(), ImageError> {
        let image = ramp()?;
        let normalizer = Normalizer::from_data(image.as_slice())?;

        let out = normalizer.type_norm_range::<u8>(&image, 10.0, 40.0);
        assert_eq!(out.as_slice(), &[10, 20, 30, 40]);

        assert!(Normalizer::from_data(&[]).is_err());

        Ok(())
    }
}
