//! Axis-aligned bounding boxes.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box given by its two extreme corners.
///
/// The [`Aabb::empty`] box is inverted (`min = +inf`, `max = -inf`) so that
/// folding points into it with [`Aabb::include`] needs no special first case.
///
/// ```
/// use mesh_types::{Aabb, Point3, Vector3};
///
/// let corners = [Point3::new(-1.0, 0.0, 2.0), Point3::new(3.0, 4.0, 8.0)];
/// let bounds = Aabb::from_points(&corners);
///
/// assert_eq!(bounds.center(), Point3::new(1.0, 2.0, 5.0));
/// assert_eq!(bounds.size(), Vector3::new(4.0, 4.0, 6.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Corner with the smallest coordinates.
    pub min: Point3<f64>,
    /// Corner with the largest coordinates.
    pub max: Point3<f64>,
}

impl Aabb {
    /// The inverted box that contains nothing.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Smallest box around `points`; empty if there are none.
    #[must_use]
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point3<f64>>,
    {
        points.into_iter().fold(Self::empty(), |mut acc, p| {
            acc.include(p);
            acc
        })
    }

    /// Grow the box to cover `point`.
    ///
    /// A NaN coordinate leaves that axis untouched, since `f64::min` and
    /// `f64::max` return the non-NaN operand.
    pub fn include(&mut self, point: &Point3<f64>) {
        for axis in 0..3 {
            self.min[axis] = self.min[axis].min(point[axis]);
            self.max[axis] = self.max[axis].max(point[axis]);
        }
    }

    /// True while no point has been included on some axis.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        (0..3).any(|axis| self.min[axis] > self.max[axis])
    }

    /// Per-axis extents (`max - min`).
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Midpoint of the two corners.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Longest of the three extents.
    #[inline]
    #[must_use]
    pub fn max_extent(&self) -> f64 {
        let s = self.size();
        s.x.max(s.y).max(s.z)
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}
