use colormatch_image::Image;
use faer::Mat;

use crate::error::LinalgError;

/// Mean vector and covariance matrix of the pixel colors of an image.
///
/// Every pixel is treated as one sample of a multivariate distribution with
/// one dimension per channel.
///
/// # Example
///
/// ```
/// use colormatch_image::{Image, ImageSize};
/// use colormatch_linalg::GaussianStats;
///
/// let image = Image::<f64>::new(
///     ImageSize { width: 2, height: 1 },
///     2,
///     vec![0.0, 1.0, 1.0, 3.0],
/// ).unwrap();
///
/// let stats = GaussianStats::from_image(&image).unwrap();
///
/// assert_eq!(stats.mean, vec![0.5, 2.0]);
/// assert_eq!(stats.cov.read(0, 1), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct GaussianStats {
    /// Per channel mean.
    pub mean: Vec<f64>,
    /// Channel covariance matrix.
    pub cov: Mat<f64>,
}

impl GaussianStats {
    /// Estimate the statistics of the pixels of an image.
    ///
    /// The covariance uses the unbiased estimator, dividing by `N - 1`. A
    /// single pixel image divides by `N` and yields a zero covariance.
    ///
    /// # Errors
    ///
    /// Returns an error if the image has no pixels.
    pub fn from_image(image: &Image<f64>) -> Result<Self, LinalgError> {
        let mean = channel_mean(image)?;
        let cov = cross_covariance(image, &mean, image, &mean)?;
        Ok(Self { mean, cov })
    }

    /// Number of dimensions of the distribution.
    pub fn num_channels(&self) -> usize {
        self.mean.len()
    }
}

/// Per channel mean of an image.
///
/// # Errors
///
/// Returns an error if the image has no pixels.
pub fn channel_mean(image: &Image<f64>) -> Result<Vec<f64>, LinalgError> {
    let n = image.num_pixels();
    if n == 0 {
        return Err(LinalgError::EmptyData);
    }

    let mut mean = vec![0f64; image.num_channels()];
    for px in image.pixels() {
        mean.iter_mut().zip(px).for_each(|(m, v)| *m += v);
    }
    mean.iter_mut().for_each(|m| *m /= n as f64);

    Ok(mean)
}

/// Cross covariance between the channels of two images with the same pixel count.
///
/// Entry `(i, j)` is the covariance between channel `i` of `a` and channel `j`
/// of `b`, pairing the pixels of both images by position. Passing the same
/// image twice gives its covariance matrix.
///
/// # Errors
///
/// Returns an error if the images are empty, their pixel counts differ or the
/// means do not match the channel counts.
pub fn cross_covariance(
    a: &Image<f64>,
    mean_a: &[f64],
    b: &Image<f64>,
    mean_b: &[f64],
) -> Result<Mat<f64>, LinalgError> {
    let (ca, cb) = (a.num_channels(), b.num_channels());
    let n = a.num_pixels();

    if b.num_pixels() != n {
        return Err(LinalgError::ShapeMismatch(b.num_pixels(), cb, n, cb));
    }
    if mean_a.len() != ca {
        return Err(LinalgError::ShapeMismatch(mean_a.len(), 1, ca, 1));
    }
    if mean_b.len() != cb {
        return Err(LinalgError::ShapeMismatch(mean_b.len(), 1, cb, 1));
    }
    if n == 0 {
        return Err(LinalgError::EmptyData);
    }

    let mut acc = vec![0f64; ca * cb];
    let mut da = vec![0f64; ca];
    for (pa, pb) in a.pixels().zip(b.pixels()) {
        da.iter_mut()
            .zip(pa.iter().zip(mean_a))
            .for_each(|(d, (v, m))| *d = v - m);
        for (i, &di) in da.iter().enumerate() {
            let row = &mut acc[i * cb..(i + 1) * cb];
            row.iter_mut()
                .zip(pb.iter().zip(mean_b))
                .for_each(|(r, (v, m))| *r += di * (v - m));
        }
    }

    let ddof = if n > 1 { (n - 1) as f64 } else { 1.0 };
    Ok(Mat::from_fn(ca, cb, |i, j| acc[i * cb + j] / ddof))
}
