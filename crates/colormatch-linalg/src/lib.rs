#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Wasserstein-2 distance between Gaussian distributions.
pub mod distance;

/// Symmetric eigendecomposition and derived matrix functions.
pub mod eigen;

/// Error types for the linalg module.
pub mod error;

/// Mean and covariance of image channels.
pub mod stats;

pub use crate::distance::w2_dist;
pub use crate::eigen::{diag, pinv_sym, psd_sqrt, sym_eigen_clipped, SymEigen};
pub use crate::error::LinalgError;
pub use crate::stats::{channel_mean, cross_covariance, GaussianStats};
