//! Property-based tests for the transform pipeline.
//!
//! Run with: cargo test -p mesh-transform -- proptest

#![allow(clippy::unwrap_used)]

use mesh_transform::{NormalizeParams, TransformPipeline};
use mesh_types::{IndexedMesh, MeshBounds, Vertex};
use proptest::prelude::*;

fn arb_mesh() -> impl Strategy<Value = IndexedMesh> {
    prop::collection::vec(prop::array::uniform3(-500.0..500.0f64), 1..40).prop_map(|points| {
        IndexedMesh::from_parts(
            points
                .into_iter()
                .map(|[x, y, z]| Vertex::from_coords(x, y, z))
                .collect(),
            Vec::new(),
        )
    })
}

fn arb_params() -> impl Strategy<Value = NormalizeParams> {
    (
        any::<bool>(),
        any::<[bool; 3]>(),
        prop_oneof![Just(1.0), Just(0.001), Just(25.4), 0.01..100.0f64],
        any::<bool>(),
    )
        .prop_map(|(swap, [fx, fy, fz], scale, center)| {
            NormalizeParams::default()
                .with_swap_yz(swap)
                .with_flips(fx, fy, fz)
                .with_scale(scale)
                .with_center(center)
        })
}

proptest! {
    /// Centering puts the bbox midpoint on the origin whatever else is enabled.
    #[test]
    fn centering_hits_origin(mesh in arb_mesh(), params in arb_params()) {
        let pipeline = TransformPipeline::new(params.with_center(true)).unwrap();
        let out = pipeline.apply(&mesh);

        let bounds = out.bounds();
        let tol = 1e-9 * (1.0 + bounds.max_extent());
        let c = bounds.center();
        prop_assert!(c.x.abs() <= tol && c.y.abs() <= tol && c.z.abs() <= tol, "center {:?}", c);
    }

    /// Extents follow the scale factor, permuted by the swap.
    #[test]
    fn extents_scale_linearly(mesh in arb_mesh(), params in arb_params()) {
        let before = mesh.bounds().size();
        let out = TransformPipeline::new(params).unwrap().apply(&mesh);
        let after = out.bounds().size();

        let expected = if params.swap_yz {
            [before.x, before.z, before.y]
        } else {
            [before.x, before.y, before.z]
        };
        for (e, a) in expected.iter().zip([after.x, after.y, after.z]) {
            let want = e * params.scale;
            prop_assert!((want - a).abs() <= 1e-9 * (1.0 + want.abs()));
        }
    }

    /// Vertex and face counts never change.
    #[test]
    fn topology_is_preserved(mesh in arb_mesh(), params in arb_params()) {
        let out = TransformPipeline::new(params).unwrap().apply(&mesh);
        prop_assert_eq!(out.vertices.len(), mesh.vertices.len());
        prop_assert_eq!(out.faces, mesh.faces);
    }
}
