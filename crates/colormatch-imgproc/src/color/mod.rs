mod gray;
mod lalphabeta;

pub use gray::{gray_from_rgb, HDTV_LUMA_WEIGHTS};
pub use lalphabeta::{lalphabeta_from_rgb, rgb_from_lalphabeta, LOG_EPSILON};
