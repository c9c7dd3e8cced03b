use eqviz_compute::ParsedExpression;

const NOT_CALCULATED: &str = "Not calculated";

/// Limits of an expression along the axes and at the origin.
///
/// Limits are not computed; every field holds a placeholder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LimitSummary {
    pub x_to_inf: String,
    pub x_to_neg_inf: String,
    pub y_to_inf: String,
    pub y_to_neg_inf: String,
    pub origin: String,
}

impl LimitSummary {
    /// Returns the limits, labeled.
    pub fn labeled(&self) -> [(&'static str, &str); 5] {
        [
            ("x -> inf", self.x_to_inf.as_str()),
            ("x -> -inf", self.x_to_neg_inf.as_str()),
            ("y -> inf", self.y_to_inf.as_str()),
            ("y -> -inf", self.y_to_neg_inf.as_str()),
            ("(x, y) -> (0, 0)", self.origin.as_str()),
        ]
    }
}

impl Default for LimitSummary {
    fn default() -> Self {
        Self {
            x_to_inf: NOT_CALCULATED.to_string(),
            x_to_neg_inf: NOT_CALCULATED.to_string(),
            y_to_inf: NOT_CALCULATED.to_string(),
            y_to_neg_inf: NOT_CALCULATED.to_string(),
            origin: NOT_CALCULATED.to_string(),
        }
    }
}

/// Returns the limit summary of the expression.
pub fn calculate_limits(_expr: &ParsedExpression) -> LimitSummary {
    LimitSummary::default()
}

#[cfg(test)]
mod tests {
    use eqviz_compute::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn placeholders() {
        for text in ["x^2 + y^2", "1 / x", "x + ("] {
            let limits = calculate_limits(&parse(text));
            assert!(limits.labeled().iter().all(|(_, value)| *value == "Not calculated"));
        }
    }

    #[test]
    fn labels() {
        let labels = LimitSummary::default().labeled().map(|(label, _)| label);
        assert_eq!(labels, ["x -> inf", "x -> -inf", "y -> inf", "y -> -inf", "(x, y) -> (0, 0)"]);
    }
}
