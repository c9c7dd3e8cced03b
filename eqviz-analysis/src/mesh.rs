//! Sampling an expression over a grid, for plotting.

use crate::bindings;
use eqviz_compute::{evaluate, ParsedExpression};
use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

/// A grid of samples of an expression over a rectangular domain.
///
/// All three matrices have `n` rows (one per `y` value, increasing) of `n` columns (one per `x`
/// value, increasing). A sample where the expression is not a finite real number is `None`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshGrid {
    pub x: Vec<Vec<f64>>,
    pub y: Vec<Vec<f64>>,
    pub z: Vec<Vec<Option<f64>>>,
}

impl MeshGrid {
    /// Returns the number of samples along each axis.
    pub fn resolution(&self) -> usize {
        self.z.len()
    }

    /// Returns the number of samples that are `None`.
    pub fn undefined_count(&self) -> usize {
        self.z.iter().flatten().filter(|z| z.is_none()).count()
    }
}

/// The grid could not be built.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum MeshError {
    /// Fewer than two samples per axis were requested.
    #[error("resolution must be at least 2, got {0}")]
    Resolution(usize),

    /// One of the bounds is infinite or `NaN`.
    #[error("domain bounds must be finite numbers")]
    Bounds,
}

/// Returns `n` evenly spaced values from `min` to `max`, both included. The last value is exactly
/// `max`.
fn linspace(min: f64, max: f64, n: usize) -> impl Iterator<Item = f64> {
    let step = (max - min) / (n - 1) as f64;
    (0..n).map(move |k| if k + 1 == n { max } else { min + k as f64 * step })
}

/// Checks the resolution and bounds shared by the samplers.
fn check(resolution: usize, bounds: &[f64]) -> Result<(), MeshError> {
    if resolution < 2 {
        return Err(MeshError::Resolution(resolution));
    }
    if bounds.iter().any(|bound| !bound.is_finite()) {
        return Err(MeshError::Bounds);
    }
    Ok(())
}

/// Keeps finite values only.
fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Samples the expression on an `n` by `n` grid spanning the given domain.
///
/// With `x_step = (x_max - x_min) / (n - 1)` and `y_step = (y_max - y_min) / (n - 1)`, the sample
/// at row `i` and column `j` is taken at `(x_min + j * x_step, y_min + i * y_step)`. Rows are
/// evaluated in parallel.
pub fn sample(
    expr: &ParsedExpression,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    n: usize,
) -> Result<MeshGrid, MeshError> {
    check(n, &[x_min, x_max, y_min, y_max])?;

    let xs = linspace(x_min, x_max, n).collect::<Vec<_>>();
    let ys = linspace(y_min, y_max, n).collect::<Vec<_>>();

    let rows = ys.par_iter()
        .map(|&y| {
            let mut vars = bindings(0.0, y);
            let z_row = xs.iter()
                .map(|&x| {
                    vars.insert("x".to_string(), x);
                    finite(evaluate(expr, &vars))
                })
                .collect::<Vec<_>>();
            (xs.clone(), vec![y; n], z_row)
        })
        .collect::<Vec<_>>();

    let mut mesh = MeshGrid {
        x: Vec::with_capacity(n),
        y: Vec::with_capacity(n),
        z: Vec::with_capacity(n),
    };
    for (x_row, y_row, z_row) in rows {
        mesh.x.push(x_row);
        mesh.y.push(y_row);
        mesh.z.push(z_row);
    }

    debug!(resolution = n, undefined = mesh.undefined_count(), "sampled mesh");
    Ok(mesh)
}

/// Samples of an expression along a line in the `(x, y)` plane.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Curve {
    pub x: Vec<f64>,
    pub y: Vec<f64>,

    /// The value of the expression at each `(x, y)`, `None` where it is not a finite real number.
    pub z: Vec<Option<f64>>,
}

/// Evaluates the expression at each point of the path.
fn sample_path(expr: &ParsedExpression, x: Vec<f64>, y: Vec<f64>) -> Curve {
    let z = x.iter()
        .zip(&y)
        .map(|(&x, &y)| finite(evaluate(expr, &bindings(x, y))))
        .collect();
    Curve { x, y, z }
}

/// Samples the expression along the `x` axis with `2 * resolution` points from `x_min` to `x_max`,
/// with `y` bound to `0`.
pub fn sample_curve(
    expr: &ParsedExpression,
    x_min: f64,
    x_max: f64,
    resolution: usize,
) -> Result<Curve, MeshError> {
    let points = resolution.saturating_mul(2);
    check(points, &[x_min, x_max])?;

    let xs = linspace(x_min, x_max, points).collect::<Vec<_>>();
    Ok(sample_path(expr, xs, vec![0.0; points]))
}

/// Samples the expression along the path `x = t`, `y = sin(t)` for `resolution` values of `t`
/// from `0` to `2 * pi`.
pub fn sample_parametric(expr: &ParsedExpression, resolution: usize) -> Result<Curve, MeshError> {
    check(resolution, &[])?;

    let ts = linspace(0.0, std::f64::consts::TAU, resolution).collect::<Vec<_>>();
    let ys = ts.iter().map(|t| t.sin()).collect();
    let curve = sample_path(expr, ts, ys);

    debug!(resolution, undefined = curve.z.iter().filter(|z| z.is_none()).count(), "sampled path");
    Ok(curve)
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use eqviz_compute::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn layout() {
        let expr = parse("x + 10y");
        let mesh = sample(&expr, 0.0, 2.0, -1.0, 1.0, 3).unwrap();
        assert_eq!(mesh.x, vec![vec![0.0, 1.0, 2.0]; 3]);
        assert_eq!(mesh.y, vec![vec![-1.0; 3], vec![0.0; 3], vec![1.0; 3]]);
        assert_eq!(mesh.z, vec![
            vec![Some(-10.0), Some(-9.0), Some(-8.0)],
            vec![Some(0.0), Some(1.0), Some(2.0)],
            vec![Some(10.0), Some(11.0), Some(12.0)],
        ]);
    }

    #[test]
    fn shape() {
        let expr = parse("sin(x)*cos(y)");
        let mesh = sample(&expr, -5.0, 5.0, -5.0, 5.0, 50).unwrap();
        assert_eq!(mesh.resolution(), 50);
        for rows in [mesh.x.len(), mesh.y.len(), mesh.z.len()] {
            assert_eq!(rows, 50);
        }
        assert!(mesh.x.iter().chain(&mesh.y).all(|row| row.len() == 50));
        assert!(mesh.z.iter().all(|row| row.len() == 50));

        assert_eq!(mesh.x[0][0], -5.0);
        assert_eq!(mesh.x[0][49], 5.0);
        assert_eq!(mesh.y[49][0], 5.0);
    }

    #[test]
    fn samples_stay_in_bounds() {
        let expr = parse("sqrt(5 - x)");
        for n in [2, 3, 50, 147, 148, 188] {
            let mesh = sample(&expr, -5.0, 5.0, -5.0, 5.0, n).unwrap();
            for (x_row, y_row) in mesh.x.iter().zip(&mesh.y) {
                assert_eq!(x_row, &mesh.x[0]);
                assert!(x_row.windows(2).all(|pair| pair[0] <= pair[1]));
                assert!(x_row.iter().chain(y_row).all(|v| (-5.0..=5.0).contains(v)));
            }
            assert_eq!(mesh.x[0][n - 1], 5.0);
            assert_eq!(mesh.y[n - 1][0], 5.0);
            assert!(mesh.z.iter().all(|row| row[n - 1] == Some(0.0)));
        }

        let pi = std::f64::consts::PI;
        for n in [156, 170] {
            let xs = linspace(-pi, pi, n).collect::<Vec<_>>();
            assert_eq!(xs[n - 1], pi);
            assert!(xs.iter().all(|x| (-pi..=pi).contains(x)));
        }
    }

    #[test]
    fn undefined_samples_are_none() {
        let expr = parse("log(x)");
        let mesh = sample(&expr, -1.0, 1.0, 0.0, 1.0, 3).unwrap();
        for row in &mesh.z {
            assert_eq!(row[0], None);
            assert_eq!(row[1], None);
            assert_eq!(row[2], Some(0.0));
        }
        assert_eq!(mesh.undefined_count(), 6);

        let mesh = sample(&expr, 0.0, 1.0, 0.0, 1.0, 2).unwrap();
        assert_eq!(mesh.z[0][0], None);
    }

    #[test]
    fn invalid_expression_is_all_none() {
        let mesh = sample(&parse("x + ("), -1.0, 1.0, -1.0, 1.0, 4).unwrap();
        assert_eq!(mesh.undefined_count(), 16);
    }

    #[test]
    fn rejects_bad_input() {
        let expr = parse("x");
        assert_eq!(sample(&expr, 0.0, 1.0, 0.0, 1.0, 1), Err(MeshError::Resolution(1)));
        assert_eq!(sample(&expr, 0.0, 1.0, 0.0, 1.0, 0), Err(MeshError::Resolution(0)));
        assert_eq!(sample(&expr, 0.0, f64::INFINITY, 0.0, 1.0, 4), Err(MeshError::Bounds));
        assert_eq!(sample(&expr, f64::NAN, 1.0, 0.0, 1.0, 4), Err(MeshError::Bounds));
    }

    #[test]
    fn curve() {
        let curve = sample_curve(&parse("x^2 + y"), -1.0, 1.0, 2).unwrap();
        assert_eq!(curve.x.len(), 4);
        assert_eq!(curve.y, vec![0.0; 4]);
        assert_eq!(curve.z.len(), 4);
        assert_eq!(curve.x[0], -1.0);
        assert_eq!(curve.x[3], 1.0);
        assert_eq!(curve.z[0], Some(1.0));
        assert_eq!(curve.z[3], Some(1.0));

        assert_eq!(sample_curve(&parse("x"), 0.0, 1.0, 0), Err(MeshError::Resolution(0)));
        assert_eq!(sample_curve(&parse("x"), 0.0, f64::NAN, 4), Err(MeshError::Bounds));
    }

    #[test]
    fn parametric_path() {
        let curve = sample_parametric(&parse("x + 2y"), 5).unwrap();
        assert_eq!(curve.x.len(), 5);
        assert_eq!(curve.x[0], 0.0);
        assert_eq!(curve.x[4], std::f64::consts::TAU);
        for ((x, y), z) in curve.x.iter().zip(&curve.y).zip(&curve.z) {
            assert_float_absolute_eq!(*y, x.sin(), 1e-15);
            assert_float_absolute_eq!(z.unwrap(), x + 2.0 * x.sin(), 1e-12);
        }

        let curve = sample_parametric(&parse("log(y)"), 5).unwrap();
        assert_eq!(curve.z[0], None);
        assert_eq!(curve.z[1], Some(0.0));

        assert_eq!(sample_parametric(&parse("x"), 1), Err(MeshError::Resolution(1)));
    }
}
