#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the io module.
pub mod error;

/// High-level functions to read and write image files.
pub mod functional;

pub use crate::error::IoError;
pub use crate::functional::{read_image, read_image_any, write_image, GenericImage};
