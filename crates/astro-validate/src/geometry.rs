//! Line fitting shared by the spacing and collinearity rules

use astro_core::Vec3;

/// Two points closer than this do not define a line
const MIN_AXIS_LENGTH: f64 = 1e-9;

/// An infinite line through `origin` along the unit vector `direction`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Axis {
    /// The line from `a` towards `b`, or `None` if the points coincide
    pub fn through(a: Vec3, b: Vec3) -> Option<Self> {
        let delta = b - a;
        if delta.length() < MIN_AXIS_LENGTH {
            return None;
        }
        Some(Self {
            origin: a,
            direction: delta.normalized(),
        })
    }

    /// Signed position of `p` along the line
    pub fn project(&self, p: Vec3) -> f64 {
        (p - self.origin).dot(&self.direction)
    }

    /// Perpendicular distance of `p` from the line
    pub fn deviation(&self, p: Vec3) -> f64 {
        (p - self.origin).cross(&self.direction).length()
    }
}

/// Find the line that the most points lie on.
///
/// Every pair of distinct points is a candidate; the candidate with the
/// most points within `tolerance` wins, earliest pair on ties. Returns
/// `None` when all points coincide.
pub fn detect_axis(points: &[Vec3], tolerance: f64) -> Option<Axis> {
    let mut best: Option<(usize, Axis)> = None;

    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            let axis = match Axis::through(*a, *b) {
                Some(axis) => axis,
                None => continue,
            };
            let inliers = points
                .iter()
                .filter(|p| axis.deviation(**p) <= tolerance)
                .count();

            if best.map_or(true, |(count, _)| inliers > count) {
                best = Some((inliers, axis));
                if inliers == points.len() {
                    return Some(axis);
                }
            }
        }
    }

    best.map(|(_, axis)| axis)
}
