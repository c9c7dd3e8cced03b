//! Geometric quantities of the surface `z = f(x, y)`, built symbolically from its derivatives.

use crate::derivatives::DerivativeSet;
use eqviz_compute::{symbolic::{simplify, SymExpr}, ParsedExpression};

/// Symbolic surface quantities in display form. A field is `None` if a derivative it needs is
/// absent.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceProperties {
    /// `(-fx, -fy, 1)`, up to scaling.
    pub normal_vector: Option<String>,

    /// `sqrt(1 + fx^2 + fy^2)`
    pub area_element: Option<String>,

    /// `sqrt(fx^2 + fy^2)`
    pub gradient_magnitude: Option<String>,

    /// `(fxx + fyy) / 2`
    pub mean_curvature: Option<String>,

    /// `fxx * fyy - fxy^2`, the discriminant of the second derivative test.
    pub gaussian_curvature: Option<String>,

    /// Describes the level curves `f(x, y) = c`. `None` for an invalid expression.
    pub level_curves: Option<String>,
}

fn tree(field: &Option<String>) -> Option<SymExpr> {
    DerivativeSet::parse(field).map(|parsed| parsed.tree)
}

fn square(expr: &SymExpr) -> SymExpr {
    SymExpr::pow(expr.clone(), SymExpr::number(2.0))
}

/// Simplifies the expression and returns its display form.
fn show(expr: SymExpr) -> String {
    simplify(&expr).to_string()
}

/// Computes the surface quantities of `f` from its derivatives.
pub fn analyze_surface(expr: &ParsedExpression, derivatives: &DerivativeSet) -> SurfaceProperties {
    let mut props = SurfaceProperties::default();

    if expr.is_valid {
        props.level_curves = Some(format!("Curves where {} = constant", expr.tree));
    }

    if let (Some(fx), Some(fy)) = (tree(&derivatives.fx), tree(&derivatives.fy)) {
        props.normal_vector = Some(format!("({}, {}, 1)", show(-fx.clone()), show(-fy.clone())));
        props.area_element = Some(show(SymExpr::call(
            "sqrt",
            SymExpr::number(1.0) + square(&fx) + square(&fy),
        )));
        props.gradient_magnitude = Some(show(SymExpr::call("sqrt", square(&fx) + square(&fy))));
    }

    if let (Some(fxx), Some(fyy), Some(fxy)) = (
        tree(&derivatives.fxx),
        tree(&derivatives.fyy),
        tree(&derivatives.fxy),
    ) {
        props.mean_curvature = Some(show((fxx.clone() + fyy.clone()) * SymExpr::number(0.5)));
        props.gaussian_curvature = Some(show(fxx * fyy + -square(&fxy)));
    }

    props
}

#[cfg(test)]
mod tests {
    use crate::derivatives::derive;
    use eqviz_compute::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    fn surface(expr: &str) -> SurfaceProperties {
        let expr = parse(expr);
        analyze_surface(&expr, &derive(&expr))
    }

    #[test]
    fn paraboloid() {
        let props = surface("x^2 + y^2");
        assert_eq!(props, SurfaceProperties {
            normal_vector: some("(-2 * x, -2 * y, 1)"),
            area_element: some("sqrt(1 + (2 * x)^2 + (2 * y)^2)"),
            gradient_magnitude: some("sqrt((2 * x)^2 + (2 * y)^2)"),
            mean_curvature: some("2"),
            gaussian_curvature: some("4"),
            level_curves: some("Curves where x^2 + y^2 = constant"),
        });
    }

    #[test]
    fn saddle_curvature() {
        let props = surface("x*y");
        assert_eq!(props.mean_curvature, some("0"));
        assert_eq!(props.gaussian_curvature, some("-1"));
    }

    #[test]
    fn missing_derivatives() {
        assert_eq!(surface("x^2"), SurfaceProperties {
            level_curves: some("Curves where x^2 = constant"),
            ..Default::default()
        });
        assert_eq!(surface("x + ("), SurfaceProperties::default());
    }

    #[test]
    fn level_curves() {
        assert_eq!(surface("z = sin(x) * cos(y)").level_curves, some("Curves where sin(x) * cos(y) = constant"));
    }
}
