//! Locating critical points, where both first partial derivatives vanish.

use crate::{
    bindings,
    classify::{Classifier, PointKind},
    derivatives::DerivativeSet,
    diagnostic::{report, DiagnosticSink, Severity, Stage},
    opts::{AnalysisOptions, Domain},
};
use eqviz_compute::{evaluate, ParsedExpression};
use tracing::debug;

/// A point where both first partial derivatives are approximately zero.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CriticalPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub kind: PointKind,
}

/// A strategy for locating the critical points of an expression.
pub trait CriticalPointFinder {
    /// Returns the critical points of the expression found in the domain.
    fn locate(
        &self,
        expr: &ParsedExpression,
        derivatives: &DerivativeSet,
        domain: &Domain,
    ) -> Vec<CriticalPoint>;

    /// Like [`CriticalPointFinder::locate`], reporting problems that prevent the search to the
    /// given sink. By default, nothing is reported.
    fn locate_with(
        &self,
        expr: &ParsedExpression,
        derivatives: &DerivativeSet,
        domain: &Domain,
        sink: &mut dyn DiagnosticSink,
    ) -> Vec<CriticalPoint> {
        let _ = sink;
        self.locate(expr, derivatives, domain)
    }
}

/// Scans a regular grid of candidates, keeping those where both `|fx|` and `|fy|` are below a
/// tolerance.
///
/// Candidates are visited with `x` in the outer loop and `y` in the inner loop, both increasing
/// from the lower bound by `step` until the upper bound is passed. The scan stops after
/// `max_points` points are found.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridScan {
    pub step: f64,
    pub tolerance: f64,
    pub max_points: usize,
}

impl Default for GridScan {
    fn default() -> Self {
        Self { step: 0.5, tolerance: 0.1, max_points: 10 }
    }
}

impl From<&AnalysisOptions> for GridScan {
    fn from(opts: &AnalysisOptions) -> Self {
        Self {
            step: opts.scan_step,
            tolerance: opts.tolerance,
            max_points: opts.max_critical_points,
        }
    }
}

impl GridScan {
    /// Returns the candidate coordinates from `min` to `max`, computed as `min + k * step`.
    fn axis(&self, min: f64, max: f64) -> impl Iterator<Item = f64> {
        let step = self.step;
        (0u64..)
            .map(move |k| min + k as f64 * step)
            .take_while(move |&v| v <= max)
    }

    /// Parses a first derivative for the scan, warning if it is present but unreadable.
    fn reparse(label: &str, field: &Option<String>, sink: &mut dyn DiagnosticSink) -> Option<ParsedExpression> {
        let text = field.as_deref()?;
        let parsed = DerivativeSet::parse(field);
        if parsed.is_none() {
            report(sink, Severity::Warning, Stage::Locate, format!("could not read {} back from `{}`", label, text));
        }
        parsed
    }
}

impl CriticalPointFinder for GridScan {
    fn locate(
        &self,
        expr: &ParsedExpression,
        derivatives: &DerivativeSet,
        domain: &Domain,
    ) -> Vec<CriticalPoint> {
        self.locate_with(expr, derivatives, domain, &mut ())
    }

    fn locate_with(
        &self,
        expr: &ParsedExpression,
        derivatives: &DerivativeSet,
        domain: &Domain,
        sink: &mut dyn DiagnosticSink,
    ) -> Vec<CriticalPoint> {
        let mut points = Vec::new();

        // a non-positive step would never leave the lower bound
        if !(self.step > 0.0 && self.step.is_finite()) {
            report(sink, Severity::Warning, Stage::Locate, format!("scan step must be a positive number, got {}", self.step));
            return points;
        }
        // nor would the scan reach an infinite upper bound
        if !domain.is_finite() {
            report(sink, Severity::Warning, Stage::Locate, "domain bounds must be finite; no critical points were searched for");
            return points;
        }
        if self.max_points == 0 {
            return points;
        }
        let (Some(fx), Some(fy)) = (
            Self::reparse("fx", &derivatives.fx, sink),
            Self::reparse("fy", &derivatives.fy, sink),
        ) else {
            return points;
        };
        let classifier = Classifier::new(derivatives);

        'scan: for x in self.axis(domain.x_min, domain.x_max) {
            for y in self.axis(domain.y_min, domain.y_max) {
                let vars = bindings(x, y);
                let dx = evaluate(&fx, &vars);
                let dy = evaluate(&fy, &vars);

                // NaN fails both comparisons
                if !(dx.abs() < self.tolerance && dy.abs() < self.tolerance) {
                    continue;
                }

                let z = evaluate(expr, &vars);
                if !z.is_finite() {
                    continue;
                }

                points.push(CriticalPoint { x, y, z, kind: classifier.classify(x, y) });
                if points.len() >= self.max_points {
                    break 'scan;
                }
            }
        }

        debug!(expression = %expr.normalized, found = points.len(), "located critical points");
        points
    }
}

#[cfg(test)]
mod tests {
    use crate::{derivatives::derive, diagnostic::Diagnostic};
    use eqviz_compute::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn locate(expr: &str) -> Vec<CriticalPoint> {
        let expr = parse(expr);
        GridScan::default().locate(&expr, &derive(&expr), &Domain::default())
    }

    #[test]
    fn paraboloid_minimum() {
        assert_eq!(locate("x^2 + y^2"), vec![
            CriticalPoint { x: 0.0, y: 0.0, z: 0.0, kind: PointKind::Minimum },
        ]);
    }

    #[test]
    fn saddle() {
        assert_eq!(locate("x^2 - y^2"), vec![
            CriticalPoint { x: 0.0, y: 0.0, z: 0.0, kind: PointKind::Saddle },
        ]);
    }

    #[test]
    fn shifted_maximum() {
        let points = locate("-(x - 1)^2 - (y + 2)^2 + 3");
        assert_eq!(points, vec![
            CriticalPoint { x: 1.0, y: -2.0, z: 3.0, kind: PointKind::Maximum },
        ]);
    }

    #[test]
    fn scan_order_and_cap() {
        // fx = fy = 0 everywhere, so every candidate is a critical point
        let expr = parse("0*x + 0*y");
        let derivatives = DerivativeSet {
            fx: Some("0".to_string()),
            fy: Some("0".to_string()),
            ..Default::default()
        };
        let points = GridScan::default().locate(&expr, &derivatives, &Domain::default());
        assert_eq!(points.len(), 10);
        assert!(points.iter().all(|p| p.x == -5.0 && p.kind == PointKind::Unknown));
        let ys = points.iter().map(|p| p.y).collect::<Vec<_>>();
        assert_eq!(ys, vec![-5.0, -4.5, -4.0, -3.5, -3.0, -2.5, -2.0, -1.5, -1.0, -0.5]);
    }

    #[test]
    fn needs_both_first_derivatives() {
        assert!(locate("x^2").is_empty());
        assert!(locate("y^2").is_empty());
        assert!(locate("x + (").is_empty());
    }

    #[test]
    fn no_critical_points() {
        assert!(locate("x + y").is_empty());
    }

    #[test]
    fn undefined_derivative_skipped() {
        // fx = 2/x is never small inside the domain and undefined at x = 0
        assert!(locate("log(x^2) + y^2").is_empty());
    }

    #[test]
    fn rejects_bad_step() {
        let expr = parse("x^2 + y^2");
        let derivatives = derive(&expr);
        let scan = GridScan { step: 0.0, ..Default::default() };
        let mut diagnostics = Vec::new();
        assert!(scan.locate_with(&expr, &derivatives, &Domain::default(), &mut diagnostics).is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
    }

    #[test]
    fn infinite_domain() {
        let expr = parse("x + y");
        let derivatives = derive(&expr);
        for domain in [
            Domain::new(0.0, f64::INFINITY, 0.0, 1.0),
            Domain::new(f64::NEG_INFINITY, 1.0, 0.0, 1.0),
            Domain::new(0.0, 1.0, 0.0, f64::NAN),
        ] {
            let mut diagnostics = Vec::new();
            assert!(GridScan::default().locate_with(&expr, &derivatives, &domain, &mut diagnostics).is_empty());
            assert_eq!(diagnostics.len(), 1);
            assert_eq!(diagnostics[0].context, Stage::Locate);
            assert!(GridScan::default().locate(&expr, &derivatives, &domain).is_empty());
        }
    }

    #[test]
    fn unreadable_derivative() {
        let expr = parse("x^2 + y^2");
        let derivatives = DerivativeSet {
            fx: Some("2 * x +".to_string()),
            fy: Some("2 * y".to_string()),
            ..Default::default()
        };
        let mut diagnostics = Vec::new();
        let points = GridScan::default().locate_with(&expr, &derivatives, &Domain::default(), &mut diagnostics);
        assert!(points.is_empty());
        assert_eq!(diagnostics, vec![Diagnostic::new(
            Severity::Warning,
            Stage::Locate,
            "could not read fx back from `2 * x +`",
        )]);
    }
}
