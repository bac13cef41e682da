use colormatch_image::ImageError;
use colormatch_linalg::LinalgError;

/// An error type for the transfer module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TransferError {
    /// Error when an image has the wrong number of axes or incompatible spatial size.
    #[error("Dimension error: {0}")]
    Dimension(String),

    /// Error when the channel count is not supported by a method.
    #[error("Channel error: {0}")]
    Channel(String),

    /// Error when a method name is not recognized.
    #[error("Method type '{0}' not recognized")]
    Method(String),

    /// Error from the image layer.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error from the linear algebra layer.
    #[error(transparent)]
    Linalg(#[from] LinalgError),
}

/// The category of a [`TransferError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong array rank or spatial size mismatch.
    Dimension,
    /// Unsupported channel count.
    Channel,
    /// Unrecognized method name.
    Method,
    /// Any error raised by a lower layer.
    Other,
}

impl TransferError {
    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransferError::Dimension(_) => ErrorKind::Dimension,
            TransferError::Channel(_) => ErrorKind::Channel,
            TransferError::Method(_) => ErrorKind::Method,
            TransferError::Image(_) | TransferError::Linalg(_) => ErrorKind::Other,
        }
    }
}
