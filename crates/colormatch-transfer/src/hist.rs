use colormatch_image::Image;
use colormatch_imgproc::histogram::EmpiricalCdf;

use crate::error::TransferError;
use crate::method::TransferStage;

/// Channel-wise histogram matching.
///
/// Every source value is replaced by the reference value found at the same
/// cumulative frequency. Channels are processed independently.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistogramMatcher;

impl TransferStage for HistogramMatcher {
    fn apply(&self, src: &Image<f64>, reference: &Image<f64>) -> Result<Image<f64>, TransferError> {
        let mut dst = Image::from_size_val(src.size(), src.num_channels(), 0.0)?;
        hist_match(src, reference, &mut dst)?;
        Ok(dst)
    }
}

/// Match the histogram of each source channel to the matching reference channel.
///
/// Source channel `i` is paired with reference channel `i`, so extra reference
/// channels such as alpha are ignored.
///
/// For each channel the empirical CDF of the source and of the reference are
/// built from their distinct values. Each source value is looked up in the
/// source CDF and the resulting quantile is mapped back through the reference
/// CDF with linear interpolation. The output never leaves the value range of
/// the reference channel.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `reference` - The reference image. Its spatial size may differ from the source.
/// * `dst` - The output image with the size and channels of `src`.
///
/// # Errors
///
/// Returns [`TransferError::Channel`] if the reference has fewer channels and
/// [`TransferError::Dimension`] if an image is empty or `dst` does not match `src`.
///
/// # Example
///
/// ```
/// use colormatch_image::{Image, ImageSize};
/// use colormatch_transfer::hist::hist_match;
///
/// let size = ImageSize { width: 4, height: 1 };
/// let src = Image::<f64>::new(size, 1, vec![0.0, 0.1, 0.2, 0.3]).unwrap();
/// let reference = Image::<f64>::new(size, 1, vec![0.5, 0.6, 0.7, 0.8]).unwrap();
/// let mut dst = Image::<f64>::from_size_val(size, 1, 0.0).unwrap();
///
/// hist_match(&src, &reference, &mut dst).unwrap();
///
/// assert_eq!(dst.as_slice(), reference.as_slice());
/// ```
pub fn hist_match(
    src: &Image<f64>,
    reference: &Image<f64>,
    dst: &mut Image<f64>,
) -> Result<(), TransferError> {
    let num_channels = src.num_channels();
    if reference.num_channels() < num_channels {
        return Err(TransferError::Channel(format!(
            "reference has fewer channels than the source, got {} and {}",
            num_channels,
            reference.num_channels()
        )));
    }

    if src.num_pixels() == 0 || reference.num_pixels() == 0 {
        return Err(TransferError::Dimension(
            "histogram matching of an empty image".to_string(),
        ));
    }

    if dst.size() != src.size() || dst.num_channels() != num_channels {
        return Err(TransferError::Dimension(format!(
            "output image {} x {} does not match source {} x {}",
            dst.size(),
            dst.num_channels(),
            src.size(),
            num_channels
        )));
    }

    for ch in 0..num_channels {
        let src_cdf = EmpiricalCdf::new(src.channel_iter(ch)?.copied());
        let ref_cdf = EmpiricalCdf::new(reference.channel_iter(ch)?.copied());

        // new value for every distinct source value
        let mapped = src_cdf
            .quantiles()
            .iter()
            .map(|&q| ref_cdf.inverse(q))
            .collect::<Vec<_>>();

        dst.as_slice_mut()
            .iter_mut()
            .skip(ch)
            .step_by(num_channels)
            .zip(src.channel_iter(ch)?)
            .for_each(|(out, &v)| *out = mapped[src_cdf.index_of(v)]);
    }

    Ok(())
}
