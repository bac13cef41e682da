use colormatch_image::{Image, ImageError};

/// The luma weights of ITU-R BT.709 (HDTV) for the R, G and B channels.
pub const HDTV_LUMA_WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// Convert an RGB image to grayscale using the formula:
///
/// Y = 0.2126 * R + 0.7152 * G + 0.0722 * B
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `dst` - The output grayscale image.
///
/// Precondition: the input image must have 3 channels.
/// Precondition: the output image must have 1 channel.
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use colormatch_image::{Image, ImageSize};
/// use colormatch_imgproc::color::gray_from_rgb;
///
/// let image = Image::<f64>::new(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     3,
///     vec![0f64; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let mut gray = Image::<f64>::from_size_val(image.size(), 1, 0.0).unwrap();
///
/// gray_from_rgb(&image, &mut gray).unwrap();
/// assert_eq!(gray.num_channels(), 1);
/// assert_eq!(gray.size().width, 4);
/// assert_eq!(gray.size().height, 5);
/// ```
pub fn gray_from_rgb(src: &Image<f64>, dst: &mut Image<f64>) -> Result<(), ImageError> {
    if src.num_channels() != 3 {
        return Err(ImageError::InvalidChannelCount(src.num_channels(), 3));
    }

    if dst.num_channels() != 1 {
        return Err(ImageError::InvalidChannelCount(dst.num_channels(), 1));
    }

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let [rw, gw, bw] = HDTV_LUMA_WEIGHTS;

    src.as_slice()
        .chunks_exact(3)
        .zip(dst.as_slice_mut().iter_mut())
        .for_each(|(src_pixel, dst_pixel)| {
            *dst_pixel = rw * src_pixel[0] + gw * src_pixel[1] + bw * src_pixel[2];
        });

    Ok(())
}
