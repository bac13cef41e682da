use colormatch_image::Image;
use colormatch_imgproc::color::{lalphabeta_from_rgb, rgb_from_lalphabeta};
use colormatch_imgproc::core::std_mean;

use crate::error::TransferError;
use crate::method::TransferStage;

/// Color transfer of Reinhard et al. by matching the mean and standard
/// deviation of every axis of the lαβ color space.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReinhardMatcher;

impl TransferStage for ReinhardMatcher {
    fn apply(&self, src: &Image<f64>, reference: &Image<f64>) -> Result<Image<f64>, TransferError> {
        let mut dst = Image::from_size_val(src.size(), src.num_channels(), 0.0)?;
        reinhard(src, reference, &mut dst)?;
        Ok(dst)
    }
}

/// Lower bound of the source standard deviation in the ratio `std_ref / std_src`,
/// the square root of `f64::EPSILON`.
pub const STD_FLOOR: f64 = 1.4901161193847656e-8;

/// Transfer the lαβ statistics of `reference` onto `src`.
///
/// Both images are converted to lαβ, every source axis is shifted and scaled
/// to the mean and standard deviation of the reference axis and the result is
/// converted back to RGB:
///
/// `out = (src - mean_src) * std_ref / max(std_src, STD_FLOOR) + mean_ref`
///
/// # Arguments
///
/// * `src` - The source RGB image.
/// * `reference` - The reference RGB image.
/// * `dst` - The output RGB image with the size of `src`.
///
/// # Errors
///
/// Returns [`TransferError::Channel`] unless both images have 3 channels.
pub fn reinhard(
    src: &Image<f64>,
    reference: &Image<f64>,
    dst: &mut Image<f64>,
) -> Result<(), TransferError> {
    if src.num_channels() != 3 || reference.num_channels() != 3 {
        return Err(TransferError::Channel(format!(
            "each image must have 3 color channels, got {} and {}",
            src.num_channels(),
            reference.num_channels()
        )));
    }

    let mut lab_src = Image::from_size_val(src.size(), 3, 0.0)?;
    let mut lab_ref = Image::from_size_val(reference.size(), 3, 0.0)?;
    lalphabeta_from_rgb(src, &mut lab_src)?;
    lalphabeta_from_rgb(reference, &mut lab_ref)?;

    let (std_src, mean_src) = std_mean(&lab_src)?;
    let (std_ref, mean_ref) = std_mean(&lab_ref)?;

    let ratio = std_ref
        .iter()
        .zip(&std_src)
        .map(|(r, s)| r / s.max(STD_FLOOR))
        .collect::<Vec<_>>();
    log::trace!("reinhard std ratios: {ratio:?}");

    lab_src.as_slice_mut().chunks_exact_mut(3).for_each(|px| {
        for (i, v) in px.iter_mut().enumerate() {
            *v = (*v - mean_src[i]) * ratio[i] + mean_ref[i];
        }
    });

    rgb_from_lalphabeta(&lab_src, dst)?;

    Ok(())
}
