//! Cleanup passes built on boolean masks and prefix-sum remap tables.
//!
//! These spell out each step as a mask over the vertex or face array followed
//! by a remap, without any hashing. Their results match [`crate::indexed`]
//! exactly, face order and floating-point normals included.

use mesh_types::{IndexedMesh, Vector3};

use crate::error::{check_indices, RepairError, RepairResult};
use crate::pass::{
    area_vector, canonical_face, is_proper_face, unit_or_zero, CleanupPass, PassOutcome,
    DEGENERATE_FACES, DUPLICATE_FACES, FINITE_FILTER, UNREFERENCED_VERTICES, VERTEX_NORMALS,
};

/// Drops vertices with a non-finite coordinate and every face touching one.
#[derive(Debug, Clone, Copy, Default)]
pub struct FiniteFilter;

/// Drops faces whose indices are not pairwise distinct.
#[derive(Debug, Clone, Copy, Default)]
pub struct DegenerateFaces;

/// Keeps the first face of every set sharing the same vertex indices.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateFaces;

/// Drops vertices no face refers to.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnreferencedVertices;

/// Recomputes area-weighted per-vertex normals.
#[derive(Debug, Clone, Copy, Default)]
pub struct VertexNormals;

impl CleanupPass for FiniteFilter {
    fn name(&self) -> &'static str {
        FINITE_FILTER
    }

    fn apply(&self, mesh: &IndexedMesh) -> RepairResult<PassOutcome> {
        check_indices(mesh)?;

        let keep: Vec<bool> = mesh.vertices.iter().map(|v| v.is_finite()).collect();
        let (out, removed) = compact(mesh, &keep);
        Ok(PassOutcome::applied(out, removed))
    }
}

impl CleanupPass for DegenerateFaces {
    fn name(&self) -> &'static str {
        DEGENERATE_FACES
    }

    fn apply(&self, mesh: &IndexedMesh) -> RepairResult<PassOutcome> {
        check_indices(mesh)?;

        let keep: Vec<bool> = mesh.faces.iter().map(|&f| is_proper_face(f)).collect();
        Ok(filter_faces(mesh, &keep))
    }
}

impl CleanupPass for DuplicateFaces {
    fn name(&self) -> &'static str {
        DUPLICATE_FACES
    }

    fn apply(&self, mesh: &IndexedMesh) -> RepairResult<PassOutcome> {
        check_indices(mesh)?;

        // Stable sort by canonical form: within a group of equal faces the
        // original order survives, so the group head is the first occurrence.
        let canonical: Vec<[u32; 3]> = mesh.faces.iter().map(|&f| canonical_face(f)).collect();
        let mut order: Vec<usize> = (0..canonical.len()).collect();
        order.sort_by_key(|&i| canonical[i]);

        let mut keep = vec![false; canonical.len()];
        let mut previous: Option<[u32; 3]> = None;
        for i in order {
            if previous != Some(canonical[i]) {
                keep[i] = true;
                previous = Some(canonical[i]);
            }
        }

        Ok(filter_faces(mesh, &keep))
    }
}

impl CleanupPass for UnreferencedVertices {
    fn name(&self) -> &'static str {
        UNREFERENCED_VERTICES
    }

    fn apply(&self, mesh: &IndexedMesh) -> RepairResult<PassOutcome> {
        check_indices(mesh)?;

        let mut keep = vec![false; mesh.vertices.len()];
        for &i in mesh.faces.iter().flatten() {
            keep[i as usize] = true;
        }

        let (out, removed) = compact(mesh, &keep);
        Ok(PassOutcome::applied(out, removed))
    }
}

impl CleanupPass for VertexNormals {
    fn name(&self) -> &'static str {
        VERTEX_NORMALS
    }

    fn apply(&self, mesh: &IndexedMesh) -> RepairResult<PassOutcome> {
        check_indices(mesh)?;
        if mesh.faces.is_empty() {
            return Err(RepairError::NoFaces);
        }

        let face_normals: Vec<Vector3<f64>> =
            mesh.faces.iter().map(|&f| area_vector(mesh, f)).collect();

        // Vertex → incident faces in compressed rows; each row lists faces in
        // ascending order so the sums below add in face order.
        let mut row_start = vec![0usize; mesh.vertices.len() + 1];
        for &i in mesh.faces.iter().flatten() {
            row_start[i as usize + 1] += 1;
        }
        for v in 0..mesh.vertices.len() {
            row_start[v + 1] += row_start[v];
        }
        let mut cursor = row_start.clone();
        let mut incident = vec![0usize; row_start[mesh.vertices.len()]];
        for (face_idx, face) in mesh.faces.iter().enumerate() {
            for &i in face {
                incident[cursor[i as usize]] = face_idx;
                cursor[i as usize] += 1;
            }
        }

        let mut out = mesh.clone();
        for (v, vertex) in out.vertices.iter_mut().enumerate() {
            let sum = incident[row_start[v]..row_start[v + 1]]
                .iter()
                .fold(Vector3::zeros(), |acc, &f| acc + face_normals[f]);
            vertex.attributes.normal = Some(unit_or_zero(sum));
        }

        Ok(PassOutcome::applied(out, 0))
    }
}

/// Prefix-sum remap: kept vertex `i` moves to the number of kept vertices before it.
#[allow(clippy::cast_possible_truncation)]
fn remap_table(keep: &[bool]) -> Vec<Option<u32>> {
    let mut next = 0u32;
    keep.iter()
        .map(|&k| {
            k.then(|| {
                let idx = next;
                next += 1;
                idx
            })
        })
        .collect()
}

/// Drop masked-out vertices and every face touching one, then remap.
fn compact(mesh: &IndexedMesh, keep: &[bool]) -> (IndexedMesh, usize) {
    let remap = remap_table(keep);

    let faces = mesh
        .faces
        .iter()
        .filter_map(|&[a, b, c]| {
            Some([
                remap[a as usize]?,
                remap[b as usize]?,
                remap[c as usize]?,
            ])
        })
        .collect();

    let vertices: Vec<_> = mesh
        .vertices
        .iter()
        .zip(keep)
        .filter(|(_, k)| **k)
        .map(|(v, _)| v.clone())
        .collect();

    let removed = mesh.vertices.len() - vertices.len();
    (IndexedMesh::from_parts(vertices, faces), removed)
}

fn filter_faces(mesh: &IndexedMesh, keep: &[bool]) -> PassOutcome {
    let faces: Vec<[u32; 3]> = mesh
        .faces
        .iter()
        .zip(keep)
        .filter(|(_, k)| **k)
        .map(|(&f, _)| f)
        .collect();

    let removed = mesh.faces.len() - faces.len();
    PassOutcome::applied(IndexedMesh::from_parts(mesh.vertices.clone(), faces), removed)
}
