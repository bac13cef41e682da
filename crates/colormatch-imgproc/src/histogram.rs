use std::cmp::Ordering;

/// Empirical cumulative distribution function of a set of samples.
///
/// Holds the distinct sample values in ascending order together with the
/// fraction of samples less than or equal to each of them.
///
/// # Example
///
/// ```
/// use colormatch_imgproc::histogram::EmpiricalCdf;
///
/// let cdf = EmpiricalCdf::new([0.5, 0.1, 0.5, 0.9].iter().copied());
///
/// assert_eq!(cdf.values(), &[0.1, 0.5, 0.9]);
/// assert_eq!(cdf.quantiles(), &[0.25, 0.75, 1.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EmpiricalCdf {
    values: Vec<f64>,
    quantiles: Vec<f64>,
}

impl EmpiricalCdf {
    /// Build the distribution from the given samples.
    pub fn new(samples: impl IntoIterator<Item = f64>) -> Self {
        let mut sorted = samples.into_iter().collect::<Vec<_>>();
        sorted.sort_unstable_by(f64::total_cmp);

        let total = sorted.len() as f64;
        let mut values: Vec<f64> = Vec::new();
        let mut quantiles: Vec<f64> = Vec::new();

        for (i, &v) in sorted.iter().enumerate() {
            let cumulative = (i + 1) as f64 / total;
            match values.last() {
                Some(last) if last.total_cmp(&v) == Ordering::Equal => {
                    if let Some(q) = quantiles.last_mut() {
                        *q = cumulative;
                    }
                }
                _ => {
                    values.push(v);
                    quantiles.push(cumulative);
                }
            }
        }

        Self { values, quantiles }
    }

    /// The distinct sample values in ascending order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The cumulative fraction of samples up to each distinct value.
    pub fn quantiles(&self) -> &[f64] {
        &self.quantiles
    }

    /// Returns true if the distribution has no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Index of the first distinct value not less than `value`.
    pub fn index_of(&self, value: f64) -> usize {
        self.values
            .partition_point(|v| v.total_cmp(&value) == Ordering::Less)
    }

    /// The cumulative fraction of samples less than or equal to `value`.
    ///
    /// `value` is expected to be one of the samples the distribution was built from.
    pub fn quantile_of(&self, value: f64) -> f64 {
        match self.quantiles.get(self.index_of(value)) {
            Some(&q) => q,
            None => 1.0,
        }
    }

    /// Map a cumulative fraction back to a sample value by linear interpolation.
    pub fn inverse(&self, quantile: f64) -> f64 {
        interp(quantile, &self.quantiles, &self.values)
    }
}

/// One-dimensional monotone linear interpolation.
///
/// Evaluates the piecewise linear function through the points `(xp[i], fp[i])`
/// at `x`. `xp` must be increasing. Values of `x` outside of the range of `xp`
/// are clamped to the first or last value of `fp`.
///
/// # Example
///
/// ```
/// use colormatch_imgproc::histogram::interp;
///
/// let xp = [0.0, 1.0, 2.0];
/// let fp = [10.0, 20.0, 40.0];
///
/// assert_eq!(interp(1.5, &xp, &fp), 30.0);
/// assert_eq!(interp(-1.0, &xp, &fp), 10.0);
/// assert_eq!(interp(3.0, &xp, &fp), 40.0);
/// ```
pub fn interp(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    let n = xp.len().min(fp.len());
    if n == 0 {
        return f64::NAN;
    }

    if x <= xp[0] {
        return fp[0];
    }

    if x >= xp[n - 1] {
        return fp[n - 1];
    }

    // first index with xp[hi] > x, guaranteed to be in 1..n
    let hi = xp[..n].partition_point(|&v| v <= x);
    let lo = hi - 1;

    let t = (x - xp[lo]) / (xp[hi] - xp[lo]);
    fp[lo] + t * (fp[hi] - fp[lo])
}
