use std::fmt;
use std::str::FromStr;

use colormatch_image::Image;

use crate::error::TransferError;
use crate::hist::HistogramMatcher;
use crate::mvgd::{MvgdMatcher, Solver};
use crate::reinhard::ReinhardMatcher;

/// A single step of a color transfer pipeline.
pub trait TransferStage {
    /// Map the colors of `src` towards the distribution of `reference`.
    ///
    /// The returned image has the spatial size and channel count of `src`.
    fn apply(&self, src: &Image<f64>, reference: &Image<f64>) -> Result<Image<f64>, TransferError>;
}

/// The stages a pipeline is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Channel-wise histogram matching.
    HistogramMatch,
    /// Multivariate Gaussian transfer with the given solver.
    Mvgd(Solver),
    /// Reinhard et al. statistics transfer.
    Reinhard,
}

impl Stage {
    /// Whether the stage treats the channels jointly as a color and thus needs
    /// reconciled channel counts.
    pub fn is_color(&self) -> bool {
        !matches!(self, Stage::HistogramMatch)
    }
}

impl TransferStage for Stage {
    fn apply(&self, src: &Image<f64>, reference: &Image<f64>) -> Result<Image<f64>, TransferError> {
        match self {
            Stage::HistogramMatch => HistogramMatcher.apply(src, reference),
            Stage::Mvgd(solver) => MvgdMatcher::new(*solver).apply(src, reference),
            Stage::Reinhard => ReinhardMatcher.apply(src, reference),
        }
    }
}

/// The named color transfer methods.
///
/// # Example
///
/// ```
/// use colormatch_transfer::{Method, Stage, Solver};
///
/// let method: Method = "HM-MKL-HM".parse().unwrap();
///
/// assert_eq!(method, Method::HmMklHm);
/// assert_eq!(method.to_string(), "hm-mkl-hm");
/// assert_eq!(method.stages()[1], Stage::Mvgd(Solver::Mkl));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    /// Multivariate Gaussian transfer with the MKL solver.
    #[default]
    Default,
    /// Channel-wise histogram matching.
    HistogramMatch,
    /// Reinhard et al. statistics transfer.
    Reinhard,
    /// Multivariate Gaussian transfer with the analytical solver.
    Mvgd,
    /// Multivariate Gaussian transfer with the MKL solver.
    Mkl,
    /// Histogram matching around an analytical Gaussian transfer.
    HmMvgdHm,
    /// Histogram matching around an MKL Gaussian transfer.
    HmMklHm,
}

impl Method {
    /// Every available method.
    pub const ALL: [Method; 7] = [
        Method::Default,
        Method::HistogramMatch,
        Method::Reinhard,
        Method::Mvgd,
        Method::Mkl,
        Method::HmMvgdHm,
        Method::HmMklHm,
    ];

    /// The canonical name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Default => "default",
            Method::HistogramMatch => "hm",
            Method::Reinhard => "reinhard",
            Method::Mvgd => "mvgd",
            Method::Mkl => "mkl",
            Method::HmMvgdHm => "hm-mvgd-hm",
            Method::HmMklHm => "hm-mkl-hm",
        }
    }

    /// The ordered stages the method runs.
    pub fn stages(&self) -> Vec<Stage> {
        match self {
            Method::Default | Method::Mkl => vec![Stage::Mvgd(Solver::Mkl)],
            Method::Mvgd => vec![Stage::Mvgd(Solver::Analytical)],
            Method::HistogramMatch => vec![Stage::HistogramMatch],
            Method::Reinhard => vec![Stage::Reinhard],
            Method::HmMvgdHm => vec![
                Stage::HistogramMatch,
                Stage::Mvgd(Solver::Analytical),
                Stage::HistogramMatch,
            ],
            Method::HmMklHm => vec![
                Stage::HistogramMatch,
                Stage::Mvgd(Solver::Mkl),
                Stage::HistogramMatch,
            ],
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = TransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(Method::Default),
            "hm" | "hist" => Ok(Method::HistogramMatch),
            "reinhard" => Ok(Method::Reinhard),
            "mvgd" => Ok(Method::Mvgd),
            "mkl" => Ok(Method::Mkl),
            "hm-mvgd-hm" => Ok(Method::HmMvgdHm),
            "hm-mkl-hm" => Ok(Method::HmMklHm),
            _ => Err(TransferError::Method(s.to_string())),
        }
    }
}
