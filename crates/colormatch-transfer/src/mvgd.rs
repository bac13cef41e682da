//! Multivariate Gaussian distribution (MVGD) color transfer.
//!
//! The colors of each image are modelled as a Gaussian with mean `μ` and
//! covariance `Σ`. A linear transfer matrix `T` is solved for so that the
//! centered source colors mapped through `T` take on the reference covariance:
//!
//! `result = (src - μs) · T + μr`
//!
//! Two solvers are provided:
//!
//! * [`Solver::Mkl`] - the Monge-Kantorovich linearization, the closed-form
//!   optimal transport map between two Gaussians.
//! * [`Solver::Analytical`] - a least squares fit between the whitened pixels of
//!   both images. It pairs pixels by position, so both images need the same
//!   number of pixels.

use colormatch_image::Image;
use colormatch_linalg::{
    cross_covariance, diag, pinv_sym, sym_eigen_clipped, GaussianStats,
};
use faer::{Mat, MatRef};

use crate::error::TransferError;
use crate::method::TransferStage;

/// The solver used to compute the MVGD transfer matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Solver {
    /// Monge-Kantorovich linearization.
    #[default]
    Mkl,
    /// Least squares solution through pseudo-inverses of the covariances.
    Analytical,
}

/// Color transfer by aligning multivariate Gaussian statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct MvgdMatcher {
    solver: Solver,
}

impl MvgdMatcher {
    /// Create a matcher using the given solver.
    pub fn new(solver: Solver) -> Self {
        Self { solver }
    }

    /// The solver of the matcher.
    pub fn solver(&self) -> Solver {
        self.solver
    }
}

impl TransferStage for MvgdMatcher {
    fn apply(&self, src: &Image<f64>, reference: &Image<f64>) -> Result<Image<f64>, TransferError> {
        let mut dst = Image::from_size_val(src.size(), src.num_channels(), 0.0)?;
        transfer(src, reference, self.solver, &mut dst)?;
        Ok(dst)
    }
}

/// Compute the MKL transfer matrix between two covariance matrices.
///
/// With `Σs = Ua · Da² · Uaᵀ` and `C = Da · Uaᵀ · Σr · Ua · Da`, the transfer
/// matrix is
///
/// `T = Ua · Da⁻¹ · C^½ · Da⁻¹ · Uaᵀ`
///
/// where negative eigenvalues are clipped to zero and `Da⁻¹` is regularized by
/// adding machine epsilon to the diagonal before inverting. The result does
/// not depend on the order or sign of the eigenvectors.
///
/// # Arguments
///
/// * `cov_src` - The source covariance matrix.
/// * `cov_ref` - The reference covariance matrix.
pub fn mkl(cov_src: MatRef<'_, f64>, cov_ref: MatRef<'_, f64>) -> Result<Mat<f64>, TransferError> {
    let n = cov_src.nrows();
    if cov_ref.nrows() != n || cov_ref.ncols() != n || cov_src.ncols() != n {
        return Err(TransferError::Channel(
            "wrong channel dimensionality".to_string(),
        ));
    }

    let eig_a = sym_eigen_clipped(cov_src)?;
    let da = eig_a.values.iter().map(|v| v.sqrt()).collect::<Vec<_>>();
    let ua = eig_a.vectors.as_ref();

    // C = (Ua Da)ᵀ Σr (Ua Da)
    let ua_da = ua * diag(&da).as_ref();
    let tmp = ua_da.transpose() * cov_ref;
    let c = tmp.as_ref() * ua_da.as_ref();
    let c = Mat::from_fn(n, n, |i, j| 0.5 * (c.read(i, j) + c.read(j, i)));

    // Uc Dc Ucᵀ
    let c_sqrt = sym_eigen_clipped(c.as_ref())?.reconstruct(f64::sqrt);

    let da_inv = da
        .iter()
        .map(|d| 1.0 / (d + f64::EPSILON))
        .collect::<Vec<_>>();
    let ua_da_inv = ua * diag(&da_inv).as_ref();

    let tmp = ua_da_inv.as_ref() * c_sqrt.as_ref();
    Ok(tmp.as_ref() * ua_da_inv.transpose())
}

/// Compute the analytical transfer matrix.
///
/// With `Zr`, `Zs` the centered pixels of reference and source as rows, the
/// transfer matrix is `T = (Zr · Σr⁺)⁺ · (Zs · Σs⁺)`. It is evaluated through
/// the normal equations, so only channel sized matrices are formed:
///
/// `T = (Σr⁺ · Σr · Σr⁺)⁺ · Σr⁺ · Σrs · Σs⁺`
///
/// where `Σrs` is the cross covariance between reference and source channels.
///
/// # Errors
///
/// Returns [`TransferError::Dimension`] if the images have a different number
/// of pixels.
pub fn analytical(
    src: &Image<f64>,
    src_stats: &GaussianStats,
    reference: &Image<f64>,
    ref_stats: &GaussianStats,
) -> Result<Mat<f64>, TransferError> {
    if src.num_pixels() != reference.num_pixels() {
        return Err(TransferError::Dimension(format!(
            "analytical solver needs equal pixel counts, got {} and {}",
            src.size(),
            reference.size()
        )));
    }

    let cov_src_inv = pinv_sym(src_stats.cov.as_ref())?;
    let cov_ref_inv = pinv_sym(ref_stats.cov.as_ref())?;
    let cross = cross_covariance(reference, &ref_stats.mean, src, &src_stats.mean)?;

    let tmp = cov_ref_inv.as_ref() * ref_stats.cov.as_ref();
    let gram = tmp.as_ref() * cov_ref_inv.as_ref();
    let gram_inv = pinv_sym(gram.as_ref())?;

    let tmp = gram_inv.as_ref() * cov_ref_inv.as_ref();
    let tmp = tmp.as_ref() * cross.as_ref();
    Ok(tmp.as_ref() * cov_src_inv.as_ref())
}

/// Transfer the color distribution of `reference` onto `src`.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `reference` - The reference image.
/// * `solver` - The solver for the transfer matrix.
/// * `dst` - The output image with the size and channels of `src`.
///
/// # Errors
///
/// Returns [`TransferError::Channel`] with "wrong channel dimensionality" if the
/// images do not share a channel count of at least two.
///
/// # Example
///
/// ```
/// use colormatch_image::{Image, ImageSize};
/// use colormatch_transfer::mvgd::transfer;
/// use colormatch_transfer::Solver;
///
/// let size = ImageSize { width: 5, height: 5 };
/// let src = Image::<f64>::from_size_val(size, 3, 0.2).unwrap();
/// let reference = Image::<f64>::from_size_val(size, 3, 0.8).unwrap();
/// let mut dst = Image::<f64>::from_size_val(size, 3, 0.0).unwrap();
///
/// transfer(&src, &reference, Solver::Mkl, &mut dst).unwrap();
///
/// assert!(dst.as_slice().iter().all(|v| (v - 0.8).abs() < 1e-9));
/// ```
pub fn transfer(
    src: &Image<f64>,
    reference: &Image<f64>,
    solver: Solver,
    dst: &mut Image<f64>,
) -> Result<(), TransferError> {
    let num_channels = src.num_channels();
    if num_channels < 2 || reference.num_channels() != num_channels {
        return Err(TransferError::Channel(
            "wrong channel dimensionality".to_string(),
        ));
    }

    if dst.size() != src.size() || dst.num_channels() != num_channels {
        return Err(TransferError::Dimension(format!(
            "output image {} x {} does not match source {} x {}",
            dst.size(),
            dst.num_channels(),
            src.size(),
            num_channels
        )));
    }

    let src_stats = GaussianStats::from_image(src)?;
    let ref_stats = GaussianStats::from_image(reference)?;

    let t = match solver {
        Solver::Mkl => mkl(src_stats.cov.as_ref(), ref_stats.cov.as_ref())?,
        Solver::Analytical => analytical(src, &src_stats, reference, &ref_stats)?,
    };
    log::debug!("mvgd transfer matrix ({solver:?}): {t:?}");

    let mut centered = vec![0f64; num_channels];
    dst.as_slice_mut()
        .chunks_exact_mut(num_channels)
        .zip(src.pixels())
        .for_each(|(out, px)| {
            centered
                .iter_mut()
                .zip(px.iter().zip(&src_stats.mean))
                .for_each(|(c, (v, m))| *c = v - m);
            for (j, o) in out.iter_mut().enumerate() {
                *o = ref_stats.mean[j]
                    + centered
                        .iter()
                        .enumerate()
                        .map(|(i, c)| c * t.read(i, j))
                        .sum::<f64>();
            }
        });

    Ok(())
}
