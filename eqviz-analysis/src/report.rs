use crate::AnalysisResult;
use std::fmt;

/// The number of critical points listed in a report.
const MAX_LISTED_POINTS: usize = 5;

/// A plain text report of an analysis, written with [`Display`](fmt::Display).
#[derive(Debug)]
pub struct Report<'a> {
    /// The expression as it was entered.
    pub input: &'a str,
    pub result: &'a AnalysisResult,
}

impl<'a> Report<'a> {
    pub fn new(input: &'a str, result: &'a AnalysisResult) -> Self {
        Self { input, result }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let result = self.result;
        let props = &result.properties;

        writeln!(f, "FUNCTION ANALYSIS REPORT")?;
        writeln!(f, "{}", "=".repeat(50))?;
        writeln!(f)?;
        writeln!(f, "Function: f(x, y) = {}", self.input.trim())?;
        writeln!(f)?;
        writeln!(f, "Function Type: {}", props.family)?;
        writeln!(f, "Variables: {}", props.variables.join(", "))?;
        writeln!(f, "Dimension: {}", props.dimension)?;

        let mut derivatives = result.derivatives.labeled().peekable();
        if derivatives.peek().is_some() {
            writeln!(f)?;
            for (label, derivative) in derivatives {
                writeln!(f, "{} = {}", label, derivative)?;
            }
        }

        writeln!(f)?;
        if result.critical_points.is_empty() {
            writeln!(f, "No critical points found in the analyzed domain.")?;
        } else {
            writeln!(f, "Critical Points: {} found", result.critical_points.len())?;
            for (i, point) in result.critical_points.iter().take(MAX_LISTED_POINTS).enumerate() {
                writeln!(
                    f,
                    "  Point {}: ({:.4}, {:.4}, {:.4}) {}",
                    i + 1,
                    point.x,
                    point.y,
                    point.z,
                    point.kind,
                )?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Limit Analysis:")?;
        for (direction, value) in result.limits.labeled() {
            writeln!(f, "  {}: {}", direction, value)?;
        }

        writeln!(f)?;
        writeln!(f, "Symmetry: {}", props.symmetry)?;
        write!(f, "Continuity: {}", props.continuity)?;

        for diagnostic in &result.diagnostics {
            write!(f, "\n{}", diagnostic)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{analyze, AnalysisOptions};
    use eqviz_compute::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn paraboloid() {
        let input = "z = x^2 + y^2";
        let result = analyze(&parse(input), &AnalysisOptions::default());
        let text = Report::new(input, &result).to_string();

        assert!(text.starts_with("FUNCTION ANALYSIS REPORT\n"));
        assert!(text.contains("Function: f(x, y) = z = x^2 + y^2\n"));
        assert!(text.contains("Function Type: Polynomial\n"));
        assert!(text.contains("Variables: x, y\n"));
        assert!(text.contains("fx = 2 * x\n"));
        assert!(text.contains("Critical Points: 1 found\n  Point 1: (0.0000, 0.0000, 0.0000) minimum\n"));
        assert!(text.contains("  x -> inf: Not calculated\n"));
        assert!(text.ends_with("Continuity: Continuous everywhere"));
    }

    #[test]
    fn lists_at_most_five_points() {
        let input = "sin(x) * sin(y)";
        let result = analyze(&parse(input), &AnalysisOptions::default().tolerance(10.0));
        assert_eq!(result.critical_points.len(), 10);

        let text = Report::new(input, &result).to_string();
        assert!(text.contains("Critical Points: 10 found"));
        assert!(text.contains("  Point 5: "));
        assert!(!text.contains("  Point 6: "));
    }

    #[test]
    fn invalid() {
        let result = analyze(&parse("x + ("), &AnalysisOptions::default());
        let text = Report::new("x + (", &result).to_string();
        assert!(text.contains("No critical points found in the analyzed domain."));
        assert!(text.contains("error [validate]: invalid expression: "));
    }
}
