use crate::{classify::PointKind, critical::CriticalPoint};

/// Two `z` values closer than this are considered equal when picking the global extrema.
const TOLERANCE: f64 = 1e-10;

/// The critical points of an expression grouped by kind, with the highest and lowest among them.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtremaSummary {
    pub local_minima: Vec<CriticalPoint>,
    pub local_maxima: Vec<CriticalPoint>,
    pub saddle_points: Vec<CriticalPoint>,

    /// The critical point with the largest `z`, of any kind. Among points within the tolerance of
    /// each other, the one found last wins.
    pub global_maximum: Option<CriticalPoint>,

    /// The critical point with the smallest `z`, of any kind.
    pub global_minimum: Option<CriticalPoint>,
}

/// Groups the critical points and finds the global extrema among them.
pub fn summarize(points: &[CriticalPoint]) -> ExtremaSummary {
    let mut summary = ExtremaSummary::default();

    for point in points {
        match point.kind {
            PointKind::Minimum => summary.local_minima.push(*point),
            PointKind::Maximum => summary.local_maxima.push(*point),
            PointKind::Saddle => summary.saddle_points.push(*point),
            PointKind::Unknown => (),
        }
    }

    let max_z = points.iter().map(|p| p.z).fold(f64::NEG_INFINITY, f64::max);
    let min_z = points.iter().map(|p| p.z).fold(f64::INFINITY, f64::min);
    summary.global_maximum = points.iter().rev().find(|p| (p.z - max_z).abs() < TOLERANCE).copied();
    summary.global_minimum = points.iter().rev().find(|p| (p.z - min_z).abs() < TOLERANCE).copied();

    summary
}
