#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// image basic statistics module.
pub mod core;

/// empirical distributions of pixel intensities.
pub mod histogram;

/// operations to normalize images.
pub mod normalize;
