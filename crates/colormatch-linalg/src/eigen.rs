use faer::{Mat, MatRef, Side};

use crate::error::LinalgError;

/// Eigenpairs of a symmetric matrix.
///
/// The eigenvalues are sorted in ascending order and the eigenvectors are
/// stored column-wise in the same order.
#[derive(Debug, Clone)]
pub struct SymEigen {
    /// Eigenvalues in ascending order.
    pub values: Vec<f64>,
    /// Unit eigenvectors, one per column.
    pub vectors: Mat<f64>,
}

impl SymEigen {
    /// Decompose a symmetric matrix. Only the lower triangle is read.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is not square or empty.
    pub fn new(m: MatRef<'_, f64>) -> Result<Self, LinalgError> {
        let n = check_square(m)?;

        let evd = m.selfadjoint_eigendecomposition(Side::Lower);
        let (u, s) = (evd.u(), evd.s().column_vector());

        let mut order = (0..n).collect::<Vec<_>>();
        order.sort_by(|&a, &b| s.read(a).total_cmp(&s.read(b)));

        let values = order.iter().map(|&k| s.read(k)).collect();
        let vectors = Mat::from_fn(n, n, |i, j| u.read(i, order[j]));

        Ok(Self { values, vectors })
    }

    /// Rebuild `V · diag(f(λ)) · Vᵀ` for a scalar function `f` of the eigenvalues.
    pub fn reconstruct(&self, f: impl Fn(f64) -> f64) -> Mat<f64> {
        let n = self.values.len();
        let weights = self.values.iter().map(|&v| f(v)).collect::<Vec<_>>();
        let scaled = Mat::from_fn(n, n, |i, k| self.vectors.read(i, k) * weights[k]);
        scaled.as_ref() * self.vectors.transpose()
    }
}

fn check_square(m: MatRef<'_, f64>) -> Result<usize, LinalgError> {
    if m.nrows() != m.ncols() {
        return Err(LinalgError::NotSquare(m.nrows(), m.ncols()));
    }
    if m.nrows() == 0 {
        return Err(LinalgError::EmptyData);
    }
    Ok(m.nrows())
}

/// Decompose a symmetric positive semi-definite matrix, clipping negative
/// eigenvalues to zero.
///
/// Covariance matrices are positive semi-definite in exact arithmetic, but
/// rounding can leave tiny negative eigenvalues which would turn square roots
/// complex.
///
/// # Example
///
/// ```
/// use colormatch_linalg::sym_eigen_clipped;
///
/// let m = faer::Mat::<f64>::from_fn(2, 2, |i, j| if i == j { [4.0, -1e-14][i] } else { 0.0 });
/// let eig = sym_eigen_clipped(m.as_ref()).unwrap();
///
/// assert_eq!(eig.values[0], 0.0);
/// assert!((eig.values[1] - 4.0).abs() < 1e-12);
/// ```
pub fn sym_eigen_clipped(m: MatRef<'_, f64>) -> Result<SymEigen, LinalgError> {
    let mut eig = SymEigen::new(m)?;
    eig.values.iter_mut().for_each(|v| *v = v.max(0.0));
    log::trace!("clipped eigenvalues: {:?}", eig.values);
    Ok(eig)
}

/// Principal square root of a symmetric positive semi-definite matrix.
pub fn psd_sqrt(m: MatRef<'_, f64>) -> Result<Mat<f64>, LinalgError> {
    Ok(sym_eigen_clipped(m)?.reconstruct(f64::sqrt))
}

/// Moore-Penrose pseudo-inverse of a symmetric matrix.
///
/// Eigenvalues with a magnitude below `n · ε · max|λ|` are treated as zero,
/// so the pseudo-inverse of a zero matrix is the zero matrix.
pub fn pinv_sym(m: MatRef<'_, f64>) -> Result<Mat<f64>, LinalgError> {
    let eig = SymEigen::new(m)?;
    let max_abs = eig.values.iter().fold(0f64, |acc, v| acc.max(v.abs()));
    let tol = eig.values.len() as f64 * f64::EPSILON * max_abs;

    Ok(eig.reconstruct(|v| if v.abs() > tol { 1.0 / v } else { 0.0 }))
}

/// Build a square diagonal matrix.
pub fn diag(values: &[f64]) -> Mat<f64> {
    let n = values.len();
    Mat::from_fn(n, n, |i, j| if i == j { values[i] } else { 0.0 })
}
