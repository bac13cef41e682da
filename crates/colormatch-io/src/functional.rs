use std::path::Path;

use colormatch_image::{Image, ImageSize};
use colormatch_imgproc::normalize::{unit_from_integer, Normalizer};

use crate::error::IoError;

/// File extensions that can be read and written, in lower case.
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["bmp", "png", "tif", "tiff", "jpg", "jpeg"];

/// Returns true if the path has one of the [`SUPPORTED_EXTENSIONS`], ignoring case.
pub fn has_supported_extension(file_path: impl AsRef<Path>) -> bool {
    file_path
        .as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

fn is_tiff(file_path: &Path) -> bool {
    file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "tif" | "tiff"))
}

fn is_jpeg(file_path: &Path) -> bool {
    file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "jpg" | "jpeg"))
}

/// An image decoded from a file, keeping the sample type of the file.
#[derive(Debug, Clone, PartialEq)]
pub enum GenericImage {
    /// 8-bit samples with 1 to 4 channels.
    U8(Image<u8>),
    /// 16-bit samples with 1 to 4 channels.
    U16(Image<u16>),
    /// 32-bit float samples with 3 or 4 channels.
    F32(Image<f32>),
}

impl GenericImage {
    /// The size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        match self {
            GenericImage::U8(img) => img.size(),
            GenericImage::U16(img) => img.size(),
            GenericImage::F32(img) => img.size(),
        }
    }

    /// The number of channels of the image.
    pub fn num_channels(&self) -> usize {
        match self {
            GenericImage::U8(img) => img.num_channels(),
            GenericImage::U16(img) => img.num_channels(),
            GenericImage::F32(img) => img.num_channels(),
        }
    }

    /// Convert the samples to `f64` in the unit range.
    ///
    /// Integer samples are divided by the maximum of their type, float samples
    /// are passed through.
    pub fn into_unit(self) -> Result<Image<f64>, IoError> {
        let image = match self {
            GenericImage::U8(img) => unit_from_integer(&img, u8::MAX as f64)?,
            GenericImage::U16(img) => unit_from_integer(&img, u16::MAX as f64)?,
            GenericImage::F32(img) => img.cast::<f64>()?,
        };
        Ok(image)
    }
}

/// Reads an image from the given file path.
///
/// The format is guessed from the file content. Grayscale, grayscale with
/// alpha, RGB and RGBA layouts with 8-bit, 16-bit or float samples are supported.
///
/// # Arguments
///
/// * `file_path` - The path to a bmp, png, tiff or jpeg file.
///
/// # Returns
///
/// The decoded image with the sample type of the file.
pub fn read_image_any(file_path: impl AsRef<Path>) -> Result<GenericImage, IoError> {
    let file_path = file_path.as_ref().to_owned();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    if !has_supported_extension(&file_path) {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(&file_path)?
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    let image = match img.color() {
        image::ColorType::L8 => GenericImage::U8(Image::new(size, 1, img.into_luma8().into_raw())?),
        image::ColorType::La8 => {
            GenericImage::U8(Image::new(size, 2, img.into_luma_alpha8().into_raw())?)
        }
        image::ColorType::Rgb8 => GenericImage::U8(Image::new(size, 3, img.into_rgb8().into_raw())?),
        image::ColorType::Rgba8 => {
            GenericImage::U8(Image::new(size, 4, img.into_rgba8().into_raw())?)
        }
        image::ColorType::L16 => {
            GenericImage::U16(Image::new(size, 1, img.into_luma16().into_raw())?)
        }
        image::ColorType::La16 => {
            GenericImage::U16(Image::new(size, 2, img.into_luma_alpha16().into_raw())?)
        }
        image::ColorType::Rgb16 => {
            GenericImage::U16(Image::new(size, 3, img.into_rgb16().into_raw())?)
        }
        image::ColorType::Rgba16 => {
            GenericImage::U16(Image::new(size, 4, img.into_rgba16().into_raw())?)
        }
        image::ColorType::Rgb32F => {
            GenericImage::F32(Image::new(size, 3, img.into_rgb32f().into_raw())?)
        }
        image::ColorType::Rgba32F => {
            GenericImage::F32(Image::new(size, 4, img.into_rgba32f().into_raw())?)
        }
        other => return Err(IoError::UnsupportedImageFormat(format!("{other:?}"))),
    };

    Ok(image)
}

/// Reads an image and converts its samples to `f64` in the unit range.
///
/// # Example
///
/// ```no_run
/// use colormatch_io::read_image;
///
/// let image = read_image("scene.png").unwrap();
/// assert!(image.as_slice().iter().all(|v| (0.0..=1.0).contains(v)));
/// ```
pub fn read_image(file_path: impl AsRef<Path>) -> Result<Image<f64>, IoError> {
    read_image_any(file_path)?.into_unit()
}

/// Writes an image to the given file path.
///
/// The values are stretched from their own minimum and maximum to the full
/// range of the output samples. Tiff files are written with 16-bit samples and
/// every other format with 8-bit samples. Images with 1, 2, 3 or 4 channels are
/// written as grayscale, grayscale with alpha, RGB or RGBA. Jpeg has no alpha
/// channel, so it is dropped from 2 and 4 channel images.
///
/// # Arguments
///
/// * `file_path` - The path to a bmp, png, tiff or jpeg file.
/// * `image` - The image to write.
pub fn write_image(file_path: impl AsRef<Path>, image: &Image<f64>) -> Result<(), IoError> {
    let file_path = file_path.as_ref();

    if !has_supported_extension(file_path) {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    let opaque;
    let image = match image.num_channels() {
        n @ (2 | 4) if is_jpeg(file_path) => {
            log::warn!("dropping alpha channel to write {}", file_path.display());
            opaque = image.select_channels(n - 1)?;
            &opaque
        }
        _ => image,
    };

    let normalizer = Normalizer::from_image(image)?;
    let (min, max) = normalizer.range();
    log::debug!("writing {} with value range [{min}, {max}]", file_path.display());

    let size = image.size();
    if is_tiff(file_path) {
        let data = normalizer.to_u16(image).into_vec();
        match image.num_channels() {
            1 => save_buffer::<image::Luma<u16>>(file_path, size, data),
            2 => save_buffer::<image::LumaA<u16>>(file_path, size, data),
            3 => save_buffer::<image::Rgb<u16>>(file_path, size, data),
            4 => save_buffer::<image::Rgba<u16>>(file_path, size, data),
            n => Err(IoError::UnsupportedChannelCount(n)),
        }
    } else {
        let data = normalizer.to_u8(image).into_vec();
        match image.num_channels() {
            1 => save_buffer::<image::Luma<u8>>(file_path, size, data),
            2 => save_buffer::<image::LumaA<u8>>(file_path, size, data),
            3 => save_buffer::<image::Rgb<u8>>(file_path, size, data),
            4 => save_buffer::<image::Rgba<u8>>(file_path, size, data),
            n => Err(IoError::UnsupportedChannelCount(n)),
        }
    }
}

fn save_buffer<P>(file_path: &Path, size: ImageSize, data: Vec<P::Subpixel>) -> Result<(), IoError>
where
    P: image::Pixel + image::PixelWithColorType,
    [P::Subpixel]: image::EncodableLayout,
{
    let buffer =
        image::ImageBuffer::<P, Vec<P::Subpixel>>::from_raw(size.width as u32, size.height as u32, data)
            .ok_or(IoError::UnsupportedChannelCount(P::CHANNEL_COUNT as usize))?;
    buffer.save(file_path)?;
    Ok(())
}
