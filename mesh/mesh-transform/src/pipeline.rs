//! Fixed-order geometric normalization.

use mesh_types::{Aabb, IndexedMesh, Vector3};
use tracing::debug;

use crate::error::{TransformError, TransformResult};

/// Which normalization steps to run.
///
/// All steps default to off and the scale to `1.0`, which is the identity.
///
/// # Example
///
/// ```
/// use mesh_transform::NormalizeParams;
///
/// let params = NormalizeParams::default()
///     .with_swap_yz(true)
///     .with_scale(25.4)
///     .with_center(true);
/// assert!(!params.is_identity());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizeParams {
    /// Exchange the Y and Z columns.
    pub swap_yz: bool,
    /// Negate X.
    pub flip_x: bool,
    /// Negate Y.
    pub flip_y: bool,
    /// Negate Z.
    pub flip_z: bool,
    /// Uniform scale factor.
    pub scale: f64,
    /// Move the bounding box midpoint to the origin.
    pub center: bool,
}

impl Default for NormalizeParams {
    fn default() -> Self {
        Self {
            swap_yz: false,
            flip_x: false,
            flip_y: false,
            flip_z: false,
            scale: 1.0,
            center: false,
        }
    }
}

impl NormalizeParams {
    /// Set the Y/Z swap.
    #[must_use]
    pub const fn with_swap_yz(mut self, swap: bool) -> Self {
        self.swap_yz = swap;
        self
    }

    /// Set the per-axis sign flips.
    #[must_use]
    pub const fn with_flips(mut self, x: bool, y: bool, z: bool) -> Self {
        self.flip_x = x;
        self.flip_y = y;
        self.flip_z = z;
        self
    }

    /// Set the uniform scale factor.
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set centering.
    #[must_use]
    pub const fn with_center(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    /// Whether these parameters leave every mesh unchanged.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_identity(&self) -> bool {
        !(self.swap_yz || self.flip_x || self.flip_y || self.flip_z || self.center)
            && self.scale == 1.0
    }

    /// Per-axis signs applied by the flip step.
    fn signs(&self) -> Vector3<f64> {
        let sign = |flip: bool| if flip { -1.0 } else { 1.0 };
        Vector3::new(sign(self.flip_x), sign(self.flip_y), sign(self.flip_z))
    }
}

/// Applies swap, flips, scale and centering, always in that order.
///
/// Each step works per component, so swaps and flips are exact and a stray
/// non-finite coordinate stays confined to its own vertex.
///
/// # Example
///
/// ```
/// use mesh_transform::{NormalizeParams, TransformPipeline};
/// use mesh_types::IndexedMesh;
///
/// let mesh = IndexedMesh::from_raw(&[0.0, 0.0, 0.0, 2.0, 4.0, 6.0, 0.0, 4.0, 0.0], &[0, 1, 2]);
/// let pipeline = TransformPipeline::new(NormalizeParams::default().with_center(true)).unwrap();
///
/// let centered = pipeline.apply(&mesh);
/// assert_eq!(centered.vertices[0].position.x, -1.0);
/// assert_eq!(centered.vertices[1].position.z, 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformPipeline {
    params: NormalizeParams,
}

impl TransformPipeline {
    /// Validate the parameters and build a pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidScale`] if the scale factor is not a
    /// positive finite number.
    pub fn new(params: NormalizeParams) -> TransformResult<Self> {
        if !(params.scale.is_finite() && params.scale > 0.0) {
            return Err(TransformError::InvalidScale {
                factor: params.scale,
            });
        }
        Ok(Self { params })
    }

    /// A pipeline that changes nothing.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            params: NormalizeParams::default(),
        }
    }

    /// Transform a copy of `mesh`.
    ///
    /// Normals receive the swap and flips only. Centering uses the bounding
    /// box of the finite vertices after the first three steps; a mesh without
    /// finite vertices is left uncentred.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn apply(&self, mesh: &IndexedMesh) -> IndexedMesh {
        let mut out = mesh.clone();
        if self.params.is_identity() {
            return out;
        }

        let signs = self.params.signs();
        let swap = self.params.swap_yz;
        let orient = |v: Vector3<f64>| {
            let v = if swap { Vector3::new(v.x, v.z, v.y) } else { v };
            v.component_mul(&signs)
        };

        for vertex in &mut out.vertices {
            let mut p = orient(vertex.position.coords);
            if self.params.scale != 1.0 {
                p *= self.params.scale;
            }
            vertex.position.coords = p;

            if let Some(n) = vertex.attributes.normal {
                vertex.attributes.normal = Some(orient(n));
            }
        }

        if self.params.center {
            let finite = out
                .vertices
                .iter()
                .filter(|v| v.is_finite())
                .map(|v| &v.position);
            let bounds = Aabb::from_points(finite);
            if bounds.is_empty() {
                debug!("no finite vertices, skipping centering");
            } else {
                out.translate(-bounds.center().coords);
            }
        }

        out
    }
}

impl Default for TransformPipeline {
    fn default() -> Self {
        Self::identity()
    }
}
