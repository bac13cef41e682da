//! Reconciliation of a source and reference image pair.
//!
//! Every pipeline runs on a pair of images that went through [`validate`]:
//!
//! * arrays with two axes gain a trailing channel axis of size one
//! * arrays with any other number of axes than two or three are rejected
//! * the channel counts of known image layouts are made compatible
//!
//! Channel reconciliation:
//!
//! | source | reference | outcome                                        |
//! |--------|-----------|------------------------------------------------|
//! | > 4    | any       | [`TransferError::Channel`] (*)                 |
//! | 3      | 4         | alpha dropped from the reference               |
//! | 4      | 1         | alpha dropped, then reduced to luma            |
//! | 1      | 3         | reference reduced to luma                      |
//! | 1      | 1         | pipeline restricted to histogram matching (*)  |
//! | n      | n         | unchanged                                      |
//! | other  | other     | [`TransferError::Channel`] (*)                 |
//!
//! The table is symmetric in source and reference. Rows marked (*) only apply
//! when `check_channels` is set, that is when a color stage will run. Without
//! a color stage those pairs are passed through unchanged.

use colormatch_image::{Image, ImageArray, ImageError};
use colormatch_imgproc::color::gray_from_rgb;

use crate::error::TransferError;

/// Largest channel count accepted by the color stages.
pub const MAX_CHANNELS: usize = 4;

/// A source and reference pair ready to be processed.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated {
    /// The source image after reconciliation.
    pub src: Image<f64>,
    /// The reference image after reconciliation.
    pub reference: Image<f64>,
    /// Set when both images ended up single channel, so only histogram
    /// matching can be applied.
    pub histogram_only: bool,
}

/// Validate a pair of array-like images.
///
/// # Arguments
///
/// * `src` - The source array of shape (H, W) or (H, W, C).
/// * `reference` - The reference array of shape (H, W) or (H, W, C).
/// * `check_channels` - Whether a color stage will run, which enables the strict channel checks.
///
/// # Errors
///
/// Returns [`TransferError::Dimension`] if an array does not have 2 or 3 axes or
/// is empty, and [`TransferError::Channel`] if the channel counts cannot be
/// reconciled.
///
/// # Example
///
/// ```
/// use colormatch_image::ImageArray;
/// use colormatch_transfer::validate;
///
/// let src = ImageArray::new(vec![2, 2, 3], vec![0.5f64; 12]).unwrap();
/// let reference = ImageArray::new(vec![2, 2, 4], vec![0.5f64; 16]).unwrap();
///
/// let pair = validate(src, reference, true).unwrap();
///
/// assert_eq!(pair.reference.num_channels(), 3);
/// assert!(!pair.histogram_only);
/// ```
pub fn validate(
    src: ImageArray<f64>,
    reference: ImageArray<f64>,
    check_channels: bool,
) -> Result<Validated, TransferError> {
    let src = array_to_image(src, "source")?;
    let reference = array_to_image(reference, "reference")?;
    validate_images(src, reference, check_channels)
}

/// Validate a pair of images that already have a channel axis.
///
/// See [`validate`] for the rules.
pub fn validate_images(
    src: Image<f64>,
    reference: Image<f64>,
    check_channels: bool,
) -> Result<Validated, TransferError> {
    for (name, image) in [("source", &src), ("reference", &reference)] {
        if image.num_pixels() == 0 {
            return Err(TransferError::Dimension(format!(
                "{name} image is empty: {}",
                image.size()
            )));
        }
    }

    let (src, reference) = reconcile_channels(src, reference, check_channels)?;
    let histogram_only =
        check_channels && src.num_channels() == 1 && reference.num_channels() == 1;
    if histogram_only {
        log::warn!("both images are single channel, restricting to histogram matching");
    }

    Ok(Validated {
        src,
        reference,
        histogram_only,
    })
}

fn array_to_image(array: ImageArray<f64>, name: &str) -> Result<Image<f64>, TransferError> {
    let shape = array.shape().to_vec();
    array.into_image().map_err(|e| match e {
        ImageError::InvalidRank(rank) => TransferError::Dimension(format!(
            "wrong {name} image dimensions: expected 2 or 3 axes, got {rank} {shape:?}"
        )),
        ImageError::ZeroChannels => {
            TransferError::Channel(format!("{name} image has no channels {shape:?}"))
        }
        other => TransferError::Image(other),
    })
}

fn reconcile_channels(
    src: Image<f64>,
    reference: Image<f64>,
    strict: bool,
) -> Result<(Image<f64>, Image<f64>), TransferError> {
    let (cs, cr) = (src.num_channels(), reference.num_channels());

    if strict && (cs > MAX_CHANNELS || cr > MAX_CHANNELS) {
        return Err(TransferError::Channel(format!(
            "unsupported channel count: source has {cs}, reference has {cr}, at most {MAX_CHANNELS} allowed"
        )));
    }

    match (cs, cr) {
        (3, 4) | (4, 3) | (4, 1) | (1, 4) => {
            log::warn!("dropping alpha channel of the 4-channel image");
            let src = drop_alpha(src)?;
            let reference = drop_alpha(reference)?;
            reconcile_channels(src, reference, strict)
        }
        (1, 3) | (3, 1) => {
            log::warn!("reducing the 3-channel image to luma to match the single channel image");
            Ok((to_luma(src)?, to_luma(reference)?))
        }
        (a, b) if a == b || !strict => Ok((src, reference)),
        (a, b) => Err(TransferError::Channel(format!(
            "incompatible channel counts: source has {a}, reference has {b}"
        ))),
    }
}

fn drop_alpha(image: Image<f64>) -> Result<Image<f64>, TransferError> {
    if image.num_channels() == 4 {
        Ok(image.select_channels(3)?)
    } else {
        Ok(image)
    }
}

fn to_luma(image: Image<f64>) -> Result<Image<f64>, TransferError> {
    if image.num_channels() != 3 {
        return Ok(image);
    }
    let mut gray = Image::from_size_val(image.size(), 1, 0.0)?;
    gray_from_rgb(&image, &mut gray)?;
    Ok(gray)
}
