//! Vertex merging (welding) by spatial hashing.

use hashbrown::HashMap;
use mesh_types::{IndexedMesh, Point3};
use tracing::debug;

/// Default merge tolerance, in mesh units.
pub const DEFAULT_MERGE_TOLERANCE: f64 = 1e-8;

/// Smallest hash cell edge; keeps cell coordinates in `i64` range for zero tolerance.
const MIN_CELL_SIZE: f64 = 1e-12;

/// Merge vertices that lie within `tolerance` of each other.
///
/// Each vertex is merged into the earliest vertex within reach, faces are
/// remapped, and the vertex array is compacted with the relative order of
/// the surviving vertices preserved. Faces are never removed here, even if
/// merging collapses them; that is the cleaner's job. Vertices with a
/// non-finite coordinate are never merged.
///
/// A non-finite or negative tolerance is treated as zero, which merges exact
/// duplicates only.
///
/// Returns the merged mesh and the number of vertices removed. Merging is
/// idempotent: surviving vertices are pairwise farther apart than the
/// tolerance.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, Vertex};
/// use mesh_repair::merge_vertices;
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0001, 0.0, 0.0)); // Near-duplicate of vertex 1
/// mesh.faces.push([0, 1, 2]);
/// mesh.faces.push([0, 3, 2]);
///
/// let (merged, removed) = merge_vertices(&mesh, 0.001);
/// assert_eq!(removed, 1);
/// assert_eq!(merged.faces[1], [0, 1, 2]);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn merge_vertices(mesh: &IndexedMesh, tolerance: f64) -> (IndexedMesh, usize) {
    let original_count = mesh.vertices.len();
    if original_count == 0 {
        return (mesh.clone(), 0);
    }

    let tolerance = if tolerance.is_finite() { tolerance.max(0.0) } else { 0.0 };
    let cell_size = (tolerance * 2.0).max(MIN_CELL_SIZE);

    // Build spatial hash over finite vertices only
    let mut spatial_hash: HashMap<(i64, i64, i64), Vec<u32>> = HashMap::new();
    for (idx, vertex) in mesh.vertices.iter().enumerate() {
        if vertex.is_finite() {
            let cell = pos_to_cell(&vertex.position, cell_size);
            spatial_hash.entry(cell).or_default().push(idx as u32);
        }
    }

    // Each vertex points at its representative; roots point at themselves
    let mut vertex_remap: Vec<u32> = (0..original_count as u32).collect();
    let mut merged_count = 0usize;

    for (idx, vertex) in mesh.vertices.iter().enumerate() {
        let idx = idx as u32;
        if vertex_remap[idx as usize] != idx || !vertex.is_finite() {
            continue;
        }

        let cell = pos_to_cell(&vertex.position, cell_size);

        // Check 3x3x3 neighborhood; cells clamped at the i64 range may repeat
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let neighbor_cell = (
                        cell.0.saturating_add(dx),
                        cell.1.saturating_add(dy),
                        cell.2.saturating_add(dz),
                    );
                    let Some(candidates) = spatial_hash.get(&neighbor_cell) else {
                        continue;
                    };

                    for &other_idx in candidates {
                        if other_idx <= idx || vertex_remap[other_idx as usize] != other_idx {
                            continue;
                        }

                        let other_pos = &mesh.vertices[other_idx as usize].position;
                        if (vertex.position - other_pos).norm() <= tolerance {
                            vertex_remap[other_idx as usize] = idx;
                            merged_count += 1;
                        }
                    }
                }
            }
        }
    }

    if merged_count == 0 {
        return (mesh.clone(), 0);
    }

    // Compact: roots get consecutive new indices in their original order
    let mut new_index = vec![0u32; original_count];
    let mut vertices = Vec::with_capacity(original_count - merged_count);
    for (idx, vertex) in mesh.vertices.iter().enumerate() {
        let root = vertex_remap[idx] as usize;
        if root == idx {
            new_index[idx] = vertices.len() as u32;
            vertices.push(vertex.clone());
        } else {
            // Roots always precede the vertices merged into them
            new_index[idx] = new_index[root];
        }
    }

    let faces = mesh
        .faces
        .iter()
        .map(|&face| face.map(|i| new_index.get(i as usize).copied().unwrap_or(i)))
        .collect();

    debug!(merged = merged_count, tolerance, "merged vertices");
    (IndexedMesh::from_parts(vertices, faces), merged_count)
}

/// Convert position to spatial hash cell.
///
/// The float-to-int cast saturates, so very distant positions share the
/// outermost cells and are told apart by the distance check alone.
#[allow(clippy::cast_possible_truncation)]
fn pos_to_cell(pos: &Point3<f64>, cell_size: f64) -> (i64, i64, i64) {
    (
        (pos.x / cell_size).floor() as i64,
        (pos.y / cell_size).floor() as i64,
        (pos.z / cell_size).floor() as i64,
    )
}
