#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the transfer module.
pub mod error;

/// Channel-wise histogram matching.
pub mod hist;

/// The `ColorMatcher` pipeline orchestrator.
pub mod matcher;

/// Named transfer methods and their stages.
pub mod method;

/// Multivariate Gaussian transfer with the MKL and analytical solvers.
pub mod mvgd;

/// Reinhard et al. statistics transfer in lαβ space.
pub mod reinhard;

/// Shape and channel reconciliation of image pairs.
pub mod validate;

pub use crate::error::{ErrorKind, TransferError};
pub use crate::hist::HistogramMatcher;
pub use crate::matcher::{color_match, ColorMatcher};
pub use crate::method::{Method, Stage, TransferStage};
pub use crate::mvgd::{MvgdMatcher, Solver};
pub use crate::reinhard::ReinhardMatcher;
pub use crate::validate::{validate, validate_images, Validated};
