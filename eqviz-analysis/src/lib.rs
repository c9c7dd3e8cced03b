//! Analysis of functions of two variables, `z = f(x, y)`.
//!
//! [`analyze`] runs every stage of the analysis on a [`ParsedExpression`] and collects the
//! results into an [`AnalysisResult`]:
//!
//! 1. [`validate`] flags suspicious expressions,
//! 2. [`derivatives`] computes the first and second partial derivatives symbolically,
//! 3. [`critical`] scans the domain for critical points and [`classify`] decides their kind,
//! 4. [`properties`], [`limits`], and [`surface`] describe the function qualitatively,
//! 5. [`extrema`] groups the critical points.
//!
//! No stage fails: problems are reported as [`Diagnostic`]s and leave the affected parts of the
//! result empty. [`mesh`] samples the expression for plotting, independently of the rest.
//!
//! ```
//! use eqviz_analysis::{analyze, classify::PointKind, AnalysisOptions};
//! use eqviz_compute::parse;
//!
//! let result = analyze(&parse("z = x^2 + y^2"), &AnalysisOptions::default());
//! assert_eq!(result.critical_points.len(), 1);
//! assert_eq!(result.critical_points[0].kind, PointKind::Minimum);
//! ```

pub mod classify;
pub mod critical;
pub mod derivatives;
pub mod diagnostic;
pub mod extrema;
pub mod limits;
pub mod mesh;
pub mod opts;
pub mod properties;
pub mod report;
pub mod surface;
pub mod validate;

pub use critical::{CriticalPoint, CriticalPointFinder, GridScan};
pub use derivatives::DerivativeSet;
pub use diagnostic::{Diagnostic, DiagnosticSink, Severity, Stage};
pub use mesh::{sample, sample_curve, sample_parametric, Curve, MeshError, MeshGrid};
pub use opts::{AnalysisOptions, Domain};
pub use report::Report;

use eqviz_compute::ParsedExpression;
use extrema::ExtremaSummary;
use limits::LimitSummary;
use properties::FunctionProperties;
use std::collections::HashMap;
use surface::SurfaceProperties;
use tracing::debug;

/// Binds `x` and `y` for evaluation.
pub(crate) fn bindings(x: f64, y: f64) -> HashMap<String, f64> {
    HashMap::from([("x".to_string(), x), ("y".to_string(), y)])
}

/// The results of every analysis stage.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisResult {
    pub derivatives: DerivativeSet,

    /// The critical points found, in scan order.
    pub critical_points: Vec<CriticalPoint>,

    pub limits: LimitSummary,
    pub properties: FunctionProperties,
    pub surface: SurfaceProperties,
    pub extrema: ExtremaSummary,

    /// Everything the stages reported, in the order it was reported.
    pub diagnostics: Vec<Diagnostic>,
}

/// Analyzes the expression with the given options, scanning for critical points with a
/// [`GridScan`] configured from them.
pub fn analyze(expr: &ParsedExpression, opts: &AnalysisOptions) -> AnalysisResult {
    analyze_with(expr, opts, &GridScan::from(opts))
}

/// Analyzes the expression over the given domain with the default options.
pub fn analyze_domain(expr: &ParsedExpression, x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> AnalysisResult {
    analyze(expr, &AnalysisOptions::default().domain(x_min, x_max, y_min, y_max))
}

/// Analyzes the expression, locating critical points with the given finder.
pub fn analyze_with(
    expr: &ParsedExpression,
    opts: &AnalysisOptions,
    finder: &dyn CriticalPointFinder,
) -> AnalysisResult {
    let mut diagnostics = Vec::new();

    validate::validate_with(expr, &mut diagnostics);
    let derivatives = derivatives::derive_with(expr, &mut diagnostics);

    if expr.is_valid && (derivatives.fx.is_none() || derivatives.fy.is_none()) {
        diagnostic::report(
            &mut diagnostics,
            Severity::Info,
            Stage::Locate,
            "critical points need both fx and fy; none were searched for",
        );
    }
    let critical_points = if opts.domain.is_finite() {
        finder.locate_with(expr, &derivatives, &opts.domain, &mut diagnostics)
    } else {
        diagnostic::report(
            &mut diagnostics,
            Severity::Warning,
            Stage::Locate,
            "domain bounds must be finite; no critical points were searched for",
        );
        Vec::new()
    };

    let properties = properties::analyze_properties(expr);
    let limits = limits::calculate_limits(expr);
    let surface = surface::analyze_surface(expr, &derivatives);
    let extrema = extrema::summarize(&critical_points);

    debug!(
        expression = %expr.normalized,
        critical_points = critical_points.len(),
        diagnostics = diagnostics.len(),
        "analysis complete",
    );

    AnalysisResult {
        derivatives,
        critical_points,
        limits,
        properties,
        surface,
        extrema,
        diagnostics,
    }
}
