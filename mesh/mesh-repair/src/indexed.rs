//! Cleanup passes built on hash sets and in-place `retain`.

use hashbrown::{HashMap, HashSet};
use mesh_types::{IndexedMesh, Vector3};
use tracing::debug;

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

    #[allow(clippy::cast_possible_truncation)]
    fn apply(&self, mesh: &IndexedMesh) -> RepairResult<PassOutcome> {
        check_indices(mesh)?;

        let bad: HashSet<u32> = mesh
            .vertices
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_finite())
            .map(|(i, _)| i as u32)
            .collect();

        let mut out = mesh.clone();
        if bad.is_empty() {
            return Ok(PassOutcome::applied(out, 0));
        }

        out.faces.retain(|face| !face.iter().any(|i| bad.contains(i)));
        let removed = retain_vertices(&mut out, |i| !bad.contains(&i));
        debug!(removed, "dropped non-finite vertices");

        Ok(PassOutcome::applied(out, removed))
    }
}

impl CleanupPass for DegenerateFaces {
    fn name(&self) -> &'static str {
        DEGENERATE_FACES
    }

    fn apply(&self, mesh: &IndexedMesh) -> RepairResult<PassOutcome> {
        check_indices(mesh)?;

        let mut out = mesh.clone();
        out.faces.retain(|&face| is_proper_face(face));
        let removed = mesh.faces.len() - out.faces.len();

        Ok(PassOutcome::applied(out, removed))
    }
}

impl CleanupPass for DuplicateFaces {
    fn name(&self) -> &'static str {
        DUPLICATE_FACES
    }

    fn apply(&self, mesh: &IndexedMesh) -> RepairResult<PassOutcome> {
        check_indices(mesh)?;

        let mut seen: HashSet<[u32; 3]> = HashSet::with_capacity(mesh.faces.len());
        let mut out = mesh.clone();
        out.faces.retain(|&face| seen.insert(canonical_face(face)));
        let removed = mesh.faces.len() - out.faces.len();

        Ok(PassOutcome::applied(out, removed))
    }
}

impl CleanupPass for UnreferencedVertices {
    fn name(&self) -> &'static str {
        UNREFERENCED_VERTICES
    }

    fn apply(&self, mesh: &IndexedMesh) -> RepairResult<PassOutcome> {
        check_indices(mesh)?;

        let referenced: HashSet<u32> = mesh.faces.iter().flatten().copied().collect();

        let mut out = mesh.clone();
        if referenced.len() == out.vertices.len() {
            return Ok(PassOutcome::applied(out, 0));
        }

        let removed = retain_vertices(&mut out, |i| referenced.contains(&i));
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

        let mut accum = vec![Vector3::zeros(); mesh.vertices.len()];
        for &face in &mesh.faces {
            let n = area_vector(mesh, face);
            for i in face {
                accum[i as usize] += n;
            }
        }

        let mut out = mesh.clone();
        for (vertex, n) in out.vertices.iter_mut().zip(accum) {
            vertex.attributes.normal = Some(unit_or_zero(n));
        }

        Ok(PassOutcome::applied(out, 0))
    }
}

/// Keep only vertices for which `keep` holds and remap faces onto them.
///
/// Every face must already reference kept vertices only. Returns the number
/// of vertices removed.
#[allow(clippy::cast_possible_truncation)]
fn retain_vertices(mesh: &mut IndexedMesh, keep: impl Fn(u32) -> bool) -> usize {
    let original_count = mesh.vertices.len();

    let mut new_vertices = Vec::with_capacity(original_count);
    let mut remap: HashMap<u32, u32> = HashMap::new();

    for (old_idx, vertex) in mesh.vertices.drain(..).enumerate() {
        let old_idx = old_idx as u32;
        if keep(old_idx) {
            remap.insert(old_idx, new_vertices.len() as u32);
            new_vertices.push(vertex);
        }
    }

    for face in &mut mesh.faces {
        for index in face.iter_mut() {
            if let Some(&new_idx) = remap.get(index) {
                *index = new_idx;
            }
        }
    }

    let removed = original_count - new_vertices.len();
    mesh.vertices = new_vertices;
    removed
}
