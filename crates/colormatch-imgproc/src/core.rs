use colormatch_image::{Image, ImageError};

/// Compute the mean and standard deviation of an image.
///
/// The mean and the population standard deviation are computed for each
/// channel of the image in two passes.
///
/// # Arguments
///
/// * `image` - The input image to compute the mean and standard deviation.
///
/// # Returns
///
/// A tuple containing the standard deviation and the mean of each channel,
/// in that order.
///
/// # Errors
///
/// Returns an error if the image has no pixels.
///
/// # Example
///
/// ```
/// use colormatch_image::{Image, ImageSize};
/// use colormatch_imgproc::core::std_mean;
///
/// let image = Image::<f64>::new(
///    ImageSize {
///      width: 2,
///      height: 2,
///    },
///    3,
///    vec![0., 1., 2., 253., 254., 255., 128., 129., 130., 64., 65., 66.],
/// ).unwrap();
///
/// let (std, mean) = std_mean(&image).unwrap();
///
/// assert_eq!(mean, [111.25, 112.25, 113.25]);
/// assert!((std[0] - 93.5183805462862).abs() < 1e-9);
/// ```
pub fn std_mean(image: &Image<f64>) -> Result<(Vec<f64>, Vec<f64>), ImageError> {
    let num_channels = image.num_channels();
    let n = image.num_pixels();
    if n == 0 {
        return Err(ImageError::ImageDataNotInitialized);
    }

    let sum = image.pixels().fold(vec![0f64; num_channels], |mut sum, px| {
        sum.iter_mut().zip(px).for_each(|(s, v)| *s += v);
        sum
    });
    let mean = sum.iter().map(|s| s / n as f64).collect::<Vec<_>>();

    let sq_sum = image.pixels().fold(vec![0f64; num_channels], |mut sq, px| {
        sq.iter_mut()
            .zip(px)
            .zip(&mean)
            .for_each(|((s, v), m)| *s += (v - m).powi(2));
        sq
    });
    let std = sq_sum.iter().map(|s| (s / n as f64).sqrt()).collect();

    Ok((std, mean))
}
