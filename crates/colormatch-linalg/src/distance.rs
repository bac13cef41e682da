use faer::Mat;

use crate::eigen::psd_sqrt;
use crate::error::LinalgError;
use crate::stats::GaussianStats;

/// Squared Wasserstein-2 distance between two Gaussian distributions.
///
/// Uses the closed form
///
/// `|μa - μb|² + tr(Σa + Σb - 2 (Σb^½ Σa Σb^½)^½)`
///
/// with square roots computed from clipped eigendecompositions. The result is
/// zero for identical distributions and never negative.
///
/// # Errors
///
/// Returns an error if the distributions have a different number of dimensions.
pub fn w2_dist(a: &GaussianStats, b: &GaussianStats) -> Result<f64, LinalgError> {
    let n = a.num_channels();
    if b.num_channels() != n || a.cov.nrows() != n || b.cov.nrows() != n {
        return Err(LinalgError::ShapeMismatch(
            b.cov.nrows(),
            b.cov.ncols(),
            n,
            n,
        ));
    }

    let mean_term = a
        .mean
        .iter()
        .zip(&b.mean)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>();

    let root_b = psd_sqrt(b.cov.as_ref())?;
    let tmp = root_b.as_ref() * a.cov.as_ref();
    let inner = tmp.as_ref() * root_b.as_ref();

    // symmetrize against rounding before the second square root
    let inner = Mat::from_fn(n, n, |i, j| 0.5 * (inner.read(i, j) + inner.read(j, i)));
    let cross = psd_sqrt(inner.as_ref())?;

    let trace = (0..n)
        .map(|i| a.cov.read(i, i) + b.cov.read(i, i) - 2.0 * cross.read(i, i))
        .sum::<f64>();

    Ok((mean_term + trace).max(0.0))
}
