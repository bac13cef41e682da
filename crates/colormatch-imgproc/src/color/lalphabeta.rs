use colormatch_image::{Image, ImageError};

/// Value substituted for non-positive samples before taking the logarithm.
pub const LOG_EPSILON: f64 = 1.0 / 255.0;

// RGB to LMS cone response, Reinhard et al. 2001.
const RGB_TO_LMS: [[f64; 3]; 3] = [
    [0.3811, 0.5783, 0.0402],
    [0.1967, 0.7244, 0.0782],
    [0.0241, 0.1288, 0.8444],
];

fn mat3_vec3(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

fn inverse3(m: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let c00 = m[1][1] * m[2][2] - m[1][2] * m[2][1];
    let c01 = m[1][2] * m[2][0] - m[1][0] * m[2][2];
    let c02 = m[1][0] * m[2][1] - m[1][1] * m[2][0];
    let det = m[0][0] * c00 + m[0][1] * c01 + m[0][2] * c02;
    let inv_det = 1.0 / det;

    [
        [
            c00 * inv_det,
            (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv_det,
            (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv_det,
        ],
        [
            c01 * inv_det,
            (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv_det,
            (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv_det,
        ],
        [
            c02 * inv_det,
            (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv_det,
            (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv_det,
        ],
    ]
}

fn check_rgb_pair(src: &Image<f64>, dst: &Image<f64>) -> Result<(), ImageError> {
    if src.num_channels() != 3 {
        return Err(ImageError::InvalidChannelCount(src.num_channels(), 3));
    }

    if dst.num_channels() != 3 {
        return Err(ImageError::InvalidChannelCount(dst.num_channels(), 3));
    }

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    Ok(())
}

/// Convert an RGB image to the decorrelated lαβ space of Ruderman et al.
///
/// The pixels go through the LMS cone response, a base 10 logarithm and the
/// opponent rotation:
///
/// l = (L + M + S) / √3, α = (L + M - 2S) / √6, β = (L - M) / √2
///
/// Non-positive samples are replaced with [`LOG_EPSILON`] so the logarithm stays finite.
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `dst` - The output lαβ image.
///
/// Precondition: both images must have 3 channels and the same size.
pub fn lalphabeta_from_rgb(src: &Image<f64>, dst: &mut Image<f64>) -> Result<(), ImageError> {
    check_rgb_pair(src, dst)?;

    let (s3, s6, s2) = (3f64.sqrt(), 6f64.sqrt(), 2f64.sqrt());

    src.as_slice()
        .chunks_exact(3)
        .zip(dst.as_slice_mut().chunks_exact_mut(3))
        .for_each(|(src_pixel, dst_pixel)| {
            let rgb = [0, 1, 2].map(|i| {
                if src_pixel[i] > 0.0 {
                    src_pixel[i]
                } else {
                    LOG_EPSILON
                }
            });
            let [l, m, s] = mat3_vec3(&RGB_TO_LMS, rgb).map(f64::log10);
            dst_pixel[0] = (l + m + s) / s3;
            dst_pixel[1] = (l + m - 2.0 * s) / s6;
            dst_pixel[2] = (l - m) / s2;
        });

    Ok(())
}

/// Convert an lαβ image back to RGB.
///
/// Inverse of [`lalphabeta_from_rgb`] for positive inputs.
///
/// # Arguments
///
/// * `src` - The input lαβ image.
/// * `dst` - The output RGB image.
///
/// Precondition: both images must have 3 channels and the same size.
pub fn rgb_from_lalphabeta(src: &Image<f64>, dst: &mut Image<f64>) -> Result<(), ImageError> {
    check_rgb_pair(src, dst)?;

    let lms_to_rgb = inverse3(&RGB_TO_LMS);
    let (s3, s6, s2) = (3f64.sqrt(), 6f64.sqrt(), 2f64.sqrt());

    src.as_slice()
        .chunks_exact(3)
        .zip(dst.as_slice_mut().chunks_exact_mut(3))
        .for_each(|(src_pixel, dst_pixel)| {
            let (l, a, b) = (src_pixel[0] / s3, src_pixel[1] / s6, src_pixel[2] / s2);
            let lms = [l + a + b, l + a - b, l - 2.0 * a].map(|v| 10f64.powf(v));
            dst_pixel.copy_from_slice(&mat3_vec3(&lms_to_rgb, lms));
        });

    Ok(())
}
