//! First and second partial derivatives.

use crate::diagnostic::{report, DiagnosticSink, Severity, Stage};
use eqviz_compute::{
    parsed::ParsedExpression,
    symbolic::{derivative::derivative, simplify_with_steps, SymExpr},
};
use tracing::{debug, trace};

/// The partial derivatives of an expression with respect to `x` and `y`, in display form.
///
/// A field is `None` if the variable it differentiates with respect to is not free in the
/// expression, or if differentiation failed. Each field can be turned back into an expression with
/// [`DerivativeSet::parse`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivativeSet {
    pub fx: Option<String>,
    pub fy: Option<String>,
    pub fxx: Option<String>,
    pub fyy: Option<String>,
    pub fxy: Option<String>,
}

impl DerivativeSet {
    /// Parses the given derivative back into an expression. Returns `None` if it is absent or, in
    /// the unlikely case its display form does not parse, invalid.
    pub fn parse(field: &Option<String>) -> Option<ParsedExpression> {
        let parsed = ParsedExpression::parse(field.as_deref()?);
        parsed.is_valid.then_some(parsed)
    }

    /// Returns the derivatives that are present, labeled.
    pub fn labeled(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("fx", &self.fx),
            ("fy", &self.fy),
            ("fxx", &self.fxx),
            ("fyy", &self.fyy),
            ("fxy", &self.fxy),
        ]
            .into_iter()
            .filter_map(|(label, field)| Some((label, field.as_deref()?)))
    }
}

/// Differentiates the tree and simplifies the result. On failure, reports a warning naming the
/// derivative and returns `None`.
fn differentiate(
    tree: &SymExpr,
    with: &str,
    label: &str,
    sink: &mut dyn DiagnosticSink,
) -> Option<SymExpr> {
    match derivative(tree, with) {
        Ok(result) => {
            let (simplified, steps) = simplify_with_steps(&result);
            trace!(derivative = label, steps = ?steps, "simplified {}", simplified);
            Some(simplified)
        },
        Err(err) => {
            report(sink, Severity::Warning, Stage::Derive, format!("could not compute {}: {}", label, err));
            None
        },
    }
}

/// Computes the partial derivatives of the expression. See [`derive_with`].
pub fn derive(expr: &ParsedExpression) -> DerivativeSet {
    derive_with(expr, &mut ())
}

/// Computes the partial derivatives of the expression, reporting failures to the given sink.
///
/// If `x` is free, `fx` is computed, then `fxx` from `fx`, and `fxy` from `fx` if `y` is also
/// free. If `y` is free, `fy` is computed, then `fyy` from `fy`. A derivative that fails is left
/// out along with the derivatives computed from it; the others are unaffected.
pub fn derive_with(expr: &ParsedExpression, sink: &mut dyn DiagnosticSink) -> DerivativeSet {
    let mut set = DerivativeSet::default();
    if !expr.is_valid {
        return set;
    }

    let has_y = expr.has_variable("y");

    if expr.has_variable("x") {
        if let Some(fx) = differentiate(&expr.tree, "x", "fx", sink) {
            set.fxx = differentiate(&fx, "x", "fxx", sink).map(|fxx| fxx.to_string());
            if has_y {
                set.fxy = differentiate(&fx, "y", "fxy", sink).map(|fxy| fxy.to_string());
            }
            set.fx = Some(fx.to_string());
        }
    }

    if has_y {
        if let Some(fy) = differentiate(&expr.tree, "y", "fy", sink) {
            set.fyy = differentiate(&fy, "y", "fyy", sink).map(|fyy| fyy.to_string());
            set.fy = Some(fy.to_string());
        }
    }

    debug!(expression = %expr.normalized, derivatives = set.labeled().count(), "computed derivatives");
    set
}
