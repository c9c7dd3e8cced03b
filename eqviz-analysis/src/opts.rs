/// A rectangular region of the `(x, y)` plane, bounds inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Domain {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Domain {
    /// Creates a domain from its bounds.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self { x_min, x_max, y_min, y_max }
    }

    /// Returns true if every bound is a finite number.
    pub fn is_finite(&self) -> bool {
        [self.x_min, self.x_max, self.y_min, self.y_max].iter().all(|bound| bound.is_finite())
    }
}

/// The domain `[-5, 5] x [-5, 5]`.
impl Default for Domain {
    fn default() -> Self {
        Self::new(-5.0, 5.0, -5.0, 5.0)
    }
}

/// Options to use when analyzing an expression.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisOptions {
    /// The region to scan for critical points and to sample the mesh over.
    ///
    /// The default value is `[-5, 5] x [-5, 5]`.
    pub domain: Domain,

    /// The number of samples along each axis of the mesh. Must be at least `2`.
    ///
    /// The default value is `50`.
    pub resolution: usize,

    /// The distance between two neighboring candidates of the critical point scan, on both axes.
    ///
    /// The step is not scaled with the size of the domain, so a large domain produces many
    /// candidates.
    ///
    /// The default value is `0.5`.
    pub scan_step: f64,

    /// The largest absolute value both first partial derivatives may have at a candidate for it to
    /// be reported as a critical point.
    ///
    /// The default value is `0.1`.
    pub tolerance: f64,

    /// The maximum number of critical points reported. The scan stops once this many are found.
    ///
    /// The default value is `10`.
    pub max_critical_points: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            domain: Domain::default(),
            resolution: 50,
            scan_step: 0.5,
            tolerance: 0.1,
            max_critical_points: 10,
        }
    }
}

impl AnalysisOptions {
    /// Set the region to analyze.
    pub fn domain(mut self, x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        self.domain = Domain::new(x_min, x_max, y_min, y_max);
        self
    }

    /// Set the number of mesh samples along each axis.
    pub fn resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set the step of the critical point scan.
    pub fn scan_step(mut self, scan_step: f64) -> Self {
        self.scan_step = scan_step;
        self
    }

    /// Set the tolerance of the critical point scan.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the maximum number of critical points reported.
    pub fn max_critical_points(mut self, max_critical_points: usize) -> Self {
        self.max_critical_points = max_critical_points;
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn defaults() {
        let opts = AnalysisOptions::default();
        assert_eq!(opts.domain, Domain::new(-5.0, 5.0, -5.0, 5.0));
        assert_eq!(opts.resolution, 50);
        assert_eq!(opts.scan_step, 0.5);
        assert_eq!(opts.tolerance, 0.1);
        assert_eq!(opts.max_critical_points, 10);
    }

    #[test]
    fn builder() {
        let opts = AnalysisOptions::default()
            .domain(-1.0, 2.0, -3.0, 4.0)
            .resolution(8)
            .scan_step(0.25);
        assert_eq!(opts.domain, Domain::new(-1.0, 2.0, -3.0, 4.0));
        assert_eq!(opts.resolution, 8);
        assert_eq!(opts.scan_step, 0.25);
        assert_eq!(opts.tolerance, 0.1);
    }

    #[test]
    fn finite_domain() {
        assert!(Domain::default().is_finite());
        assert!(!Domain::new(0.0, f64::INFINITY, 0.0, 1.0).is_finite());
        assert!(!Domain::new(f64::NEG_INFINITY, 1.0, 0.0, 1.0).is_finite());
        assert!(!Domain::new(0.0, 1.0, f64::NAN, 1.0).is_finite());
    }
}
