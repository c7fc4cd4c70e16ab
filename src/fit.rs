//! Least-squares fitting of parametric models to a line scan.
//!
//! Samples are treated as `y` values observed at `x = 0, 1, 2, ...`. Models
//! are plain closures `f(x, params) -> y`, fitted with a Levenberg-Marquardt
//! iteration using a forward-difference Jacobian.
//!
//! # Example
//!
//! ```
//! use linescan::Signal;
//!
//! let line = |x: f64, p: &[f64]| p[0] * x + p[1];
//! let s: Signal = (0..10).map(|i| 3.0 * i as f64 - 2.0).collect();
//!
//! let params = s.model_parameters(line, &[1.0, 0.0]).unwrap();
//! assert!((params[0] - 3.0).abs() < 1e-6);
//! assert!((params[1] + 2.0).abs() < 1e-6);
//! ```

use nalgebra::{DMatrix, DVector};

use crate::error::{Result, SignalError};
use crate::helpers::DEFAULT_CONVERGENCE_TOL;
use crate::signal::Signal;

/// Tolerances and limits for [`curve_fit`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitOptions {
    /// Maximum number of Levenberg-Marquardt iterations
    pub max_iter: usize,
    /// Relative reduction of the residual sum of squares considered converged
    pub f_tol: f64,
    /// Relative parameter step considered converged
    pub x_tol: f64,
    /// Gradient max-norm considered converged
    pub g_tol: f64,
    /// Relative step for the finite-difference Jacobian
    pub eps: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            f_tol: DEFAULT_CONVERGENCE_TOL,
            x_tol: DEFAULT_CONVERGENCE_TOL,
            g_tol: 1e-10,
            eps: f64::EPSILON.sqrt(),
        }
    }
}

impl FitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the iteration budget.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the relative cost-reduction tolerance.
    pub fn with_f_tol(mut self, f_tol: f64) -> Self {
        self.f_tol = f_tol;
        self
    }

    /// Set the relative step tolerance.
    pub fn with_x_tol(mut self, x_tol: f64) -> Self {
        self.x_tol = x_tol;
        self
    }

    /// Set the gradient tolerance.
    pub fn with_g_tol(mut self, g_tol: f64) -> Self {
        self.g_tol = g_tol;
        self
    }
}

/// Outcome of a converged fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    /// Fitted parameters
    pub parameters: Vec<f64>,
    /// Residual sum of squares at the solution
    pub cost: f64,
    /// Iterations used
    pub iterations: usize,
}

fn residuals<F>(model: &F, x: &[f64], y: &[f64], p: &[f64]) -> DVector<f64>
where
    F: Fn(f64, &[f64]) -> f64,
{
    DVector::from_iterator(
        x.len(),
        x.iter().zip(y).map(|(&xi, &yi)| model(xi, p) - yi),
    )
}

/// Forward-difference Jacobian of the residuals, m x n.
fn jacobian<F>(
    model: &F,
    x: &[f64],
    y: &[f64],
    p: &[f64],
    r: &DVector<f64>,
    eps: f64,
) -> DMatrix<f64>
where
    F: Fn(f64, &[f64]) -> f64,
{
    let m = x.len();
    let n = p.len();
    let mut jac = DMatrix::zeros(m, n);
    let mut shifted = p.to_vec();

    for j in 0..n {
        let h = eps * p[j].abs().max(1.0);
        shifted[j] = p[j] + h;
        let r_h = residuals(model, x, y, &shifted);
        for i in 0..m {
            jac[(i, j)] = (r_h[i] - r[i]) / h;
        }
        shifted[j] = p[j];
    }
    jac
}

/// Fit `model` to the points `(x[i], y[i])` by nonlinear least squares.
///
/// # Arguments
/// * `model` - Model function `f(x, params)`
/// * `x` - Independent variable
/// * `y` - Observations (same length as `x`)
/// * `p0` - Initial parameter guess; fixes the number of parameters
/// * `options` - Tolerances and iteration budget
///
/// # Errors
/// * [`SignalError::InvalidParameter`] for an empty guess, mismatched
///   lengths, fewer points than parameters, or a model that is not finite at
///   the initial guess
/// * [`SignalError::DidNotConverge`] when the iteration budget runs out
/// * [`SignalError::SingularSystem`] when no damped step can be solved
pub fn curve_fit<F>(
    model: F,
    x: &[f64],
    y: &[f64],
    p0: &[f64],
    options: &FitOptions,
) -> Result<FitResult>
where
    F: Fn(f64, &[f64]) -> f64,
{
    let n = p0.len();
    let m = x.len();
    if n == 0 {
        return Err(SignalError::invalid("p0", "initial guess is empty"));
    }
    if y.len() != m {
        return Err(SignalError::invalid(
            "y",
            format!("{} observations for {} x values", y.len(), m),
        ));
    }
    if m < n {
        return Err(SignalError::invalid(
            "p0",
            format!("{} parameters cannot be fitted to {} points", n, m),
        ));
    }

    let mut p = p0.to_vec();
    let mut r = residuals(&model, x, y, &p);
    if r.iter().any(|v| !v.is_finite()) {
        return Err(SignalError::invalid(
            "p0",
            "model is not finite at the initial guess",
        ));
    }
    let mut cost = r.norm_squared();
    let mut lambda = 1e-3;

    for iter in 0..options.max_iter {
        let jac = jacobian(&model, x, y, &p, &r, options.eps);
        let jtj = jac.transpose() * &jac;
        let grad = jac.transpose() * &r;

        if grad.amax() <= options.g_tol {
            tracing::debug!(iterations = iter + 1, cost, "fit converged on gradient");
            return Ok(FitResult {
                parameters: p,
                cost,
                iterations: iter + 1,
            });
        }

        let mut damped = jtj.clone();
        for j in 0..n {
            damped[(j, j)] += lambda * jtj[(j, j)].max(1e-12);
        }

        let step = match damped.lu().solve(&(-&grad)) {
            Some(step) => step,
            None => {
                lambda *= 10.0;
                if lambda > 1e20 {
                    return Err(SignalError::SingularSystem);
                }
                continue;
            }
        };

        let p_norm = p.iter().map(|v| v * v).sum::<f64>().sqrt();
        let small_step = step.norm() <= options.x_tol * (p_norm + options.x_tol);

        let predicted = (&r + &jac * &step).norm_squared();
        let candidate: Vec<f64> = p.iter().zip(step.iter()).map(|(a, b)| a + b).collect();
        let r_new = residuals(&model, x, y, &candidate);
        let cost_new = r_new.norm_squared();

        if cost_new.is_finite() && cost_new < cost {
            let actual = (cost - cost_new) / cost;
            let expected = (cost - predicted) / cost;
            p = candidate;
            r = r_new;
            cost = cost_new;
            lambda = (lambda * 0.1).max(1e-12);

            if (actual <= options.f_tol && expected <= options.f_tol) || small_step {
                tracing::debug!(iterations = iter + 1, cost, "fit converged");
                return Ok(FitResult {
                    parameters: p,
                    cost,
                    iterations: iter + 1,
                });
            }
        } else {
            if small_step {
                tracing::debug!(iterations = iter + 1, cost, "fit converged on step size");
                return Ok(FitResult {
                    parameters: p,
                    cost,
                    iterations: iter + 1,
                });
            }
            lambda = (lambda * 10.0).min(1e20);
        }
    }

    tracing::warn!(
        iterations = options.max_iter,
        cost,
        "fit exhausted its iteration budget"
    );
    Err(SignalError::DidNotConverge {
        iterations: options.max_iter,
        cost,
    })
}

impl Signal {
    fn index_axis(&self) -> Vec<f64> {
        (0..self.len()).map(|i| i as f64).collect()
    }

    /// Fit `model` to the samples with explicit options.
    pub fn fit_with<F>(&self, model: F, p0: &[f64], options: &FitOptions) -> Result<FitResult>
    where
        F: Fn(f64, &[f64]) -> f64,
    {
        if self.is_empty() {
            return Err(SignalError::EmptySignal { operation: "fit" });
        }
        curve_fit(model, &self.index_axis(), self.as_slice(), p0, options)
    }

    /// Fit `model` and return the fitted curve evaluated at every index.
    pub fn fit_to_model<F>(&self, model: F, p0: &[f64]) -> Result<Signal>
    where
        F: Fn(f64, &[f64]) -> f64,
    {
        let fit = self.fit_with(&model, p0, &FitOptions::default())?;
        let curve = self
            .index_axis()
            .into_iter()
            .map(|x| model(x, &fit.parameters))
            .collect();
        Ok(self.with_samples(curve))
    }

    /// Fit `model` and return only the fitted parameters.
    pub fn model_parameters<F>(&self, model: F, p0: &[f64]) -> Result<Vec<f64>>
    where
        F: Fn(f64, &[f64]) -> f64,
    {
        self.fit_with(model, p0, &FitOptions::default())
            .map(|fit| fit.parameters)
    }
}
