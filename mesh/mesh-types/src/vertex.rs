//! Mesh vertices.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-vertex data besides the position.
///
/// STL facet normals are discarded on load, so a fresh mesh has no normals.
/// The normal-recomputation cleanup pass fills them in and the OBJ writer
/// emits them as `vn` records.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexAttributes {
    /// Area-weighted unit normal, or zero where no direction could be derived.
    pub normal: Option<Vector3<f64>>,
}

/// A mesh vertex: position plus optional attributes.
///
/// ```
/// use mesh_types::{Point3, Vertex, Vector3};
///
/// let v = Vertex::from_coords(1.0, 2.0, 3.0);
/// assert_eq!(v.position, Point3::new(1.0, 2.0, 3.0));
/// assert!(v.normal().is_none());
///
/// let lit = Vertex::with_normal(v.position, Vector3::z());
/// assert_eq!(lit.normal(), Some(Vector3::z()));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// Position; STL's `f32` coordinates are widened on load.
    pub position: Point3<f64>,
    /// Optional attributes.
    pub attributes: VertexAttributes,
}

impl Vertex {
    /// Vertex at `position` with no attributes.
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            attributes: VertexAttributes { normal: None },
        }
    }

    /// Vertex at `(x, y, z)`.
    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// Vertex carrying a normal.
    #[inline]
    #[must_use]
    pub const fn with_normal(position: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self {
            position,
            attributes: VertexAttributes {
                normal: Some(normal),
            },
        }
    }

    /// The normal, if one has been computed.
    #[inline]
    #[must_use]
    pub const fn normal(&self) -> Option<Vector3<f64>> {
        self.attributes.normal
    }

    /// False if any coordinate is NaN or infinite.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.coords.iter().all(|c| c.is_finite())
    }
}

impl From<[f64; 3]> for Vertex {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::from_coords(x, y, z)
    }
}
