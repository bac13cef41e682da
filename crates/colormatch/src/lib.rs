#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use colormatch_image as image;

#[doc(inline)]
pub use colormatch_imgproc as imgproc;

#[doc(inline)]
pub use colormatch_io as io;

#[doc(inline)]
pub use colormatch_linalg as linalg;

#[doc(inline)]
pub use colormatch_transfer as transfer;
