#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// n-dimensional array-like input accepted at the crate boundary.
pub mod array;

/// Error types for the image module.
pub mod error;

/// image representation for color transfer purposes.
pub mod image;

pub use crate::array::ImageArray;
pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
