use colormatch_image::{Image, ImageArray};

use crate::error::TransferError;
use crate::method::{Method, Stage, TransferStage};
use crate::validate::validate;

/// Runs a color transfer pipeline on a source and reference image pair.
///
/// The pipeline is an ordered list of [`Stage`]s. Each stage receives the
/// output of the previous one as its source together with the unchanged
/// reference.
///
/// # Example
///
/// ```
/// use colormatch_image::{Image, ImageSize};
/// use colormatch_transfer::{ColorMatcher, Method};
///
/// let size = ImageSize { width: 5, height: 5 };
/// let src = Image::<f64>::from_size_val(size, 3, 0.2).unwrap();
/// let reference = Image::<f64>::from_size_val(size, 3, 0.8).unwrap();
///
/// let out = ColorMatcher::new(Method::Mvgd).transfer(src, reference).unwrap();
///
/// assert_eq!(out.shape(), [5, 5, 3]);
/// assert!(out.as_slice().iter().all(|v| (v - 0.8).abs() < 1e-9));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMatcher {
    stages: Vec<Stage>,
}

impl Default for ColorMatcher {
    fn default() -> Self {
        Self::new(Method::Default)
    }
}

impl ColorMatcher {
    /// Create a matcher running the stages of a named method.
    pub fn new(method: Method) -> Self {
        let stages = method.stages();
        log::debug!("method {method} resolved to {stages:?}");
        Self { stages }
    }

    /// Create a matcher from a method name.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::Method`] if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, TransferError> {
        Ok(Self::new(name.parse()?))
    }

    /// Create a matcher running a custom sequence of stages.
    pub fn with_stages(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    /// The stages of the pipeline.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Run the pipeline.
    ///
    /// The images are validated first. When both of them end up with a single
    /// channel the pipeline is reduced to histogram matching.
    ///
    /// # Arguments
    ///
    /// * `src` - The source image or array of shape (H, W) or (H, W, C).
    /// * `reference` - The reference image or array of shape (H, W) or (H, W, C).
    ///
    /// # Returns
    ///
    /// The source image with the colors of the reference, with the channel count
    /// set by validation.
    pub fn transfer(
        &self,
        src: impl Into<ImageArray<f64>>,
        reference: impl Into<ImageArray<f64>>,
    ) -> Result<Image<f64>, TransferError> {
        let check_channels = self.stages.iter().any(Stage::is_color);
        let pair = validate(src.into(), reference.into(), check_channels)?;

        let restricted = [Stage::HistogramMatch];
        let stages = if pair.histogram_only && self.stages != restricted {
            log::warn!("pipeline {:?} restricted to histogram matching", self.stages);
            &restricted[..]
        } else {
            &self.stages[..]
        };

        let reference = &pair.reference;
        stages.iter().try_fold(pair.src, |acc, stage| {
            log::debug!("applying stage {stage:?}");
            stage.apply(&acc, reference)
        })
    }
}

/// Transfer the colors of `reference` onto `src` with a named method.
///
/// # Errors
///
/// Returns [`TransferError::Method`] for an unknown method name and any error of
/// the validation or of the stages.
pub fn color_match(
    src: impl Into<ImageArray<f64>>,
    reference: impl Into<ImageArray<f64>>,
    method: &str,
) -> Result<Image<f64>, TransferError> {
    ColorMatcher::from_name(method)?.transfer(src, reference)
}
