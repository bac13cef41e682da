/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the array shape does not describe the data.
    #[error("Array shape {0:?} does not match the data length ({1})")]
    InvalidArrayShape(Vec<usize>, usize),

    /// Error when the array rank cannot be interpreted as an image.
    #[error("Wrong image dimensions: expected 2 or 3 axes, got {0}")]
    InvalidRank(usize),

    /// Error when the image has no channels.
    #[error("Image must have at least one channel")]
    ZeroChannels,

    /// Error when the image sizes are not compatible.
    #[error("Invalid image size. Got: {0}x{1}, expected: {2}x{3}")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index {0} is out of bounds {1}")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when the number of channels is not the expected one.
    #[error("Invalid number of channels. Got: {0}, expected: {1}")]
    InvalidChannelCount(usize, usize),

    /// Error when the image data is empty.
    #[error("Image data is not initialized")]
    ImageDataNotInitialized,

    /// Error when a value cannot be cast to the target type.
    #[error("Failed to cast image data to {0}")]
    CastError(String),
}
