//! STL (Stereolithography) file loading.
//!
//! Supports both ASCII and binary STL formats.
//!
//! # Format Detection
//!
//! A file is read as binary when any of these hold:
//! - its size is exactly `84 + 50 × face_count` (face count read at byte 80)
//! - it does not start with `solid` (after optional whitespace)
//! - its 80-byte header contains a NUL byte
//!
//! Everything else is read as ASCII.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (ignored, often contains file info)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector (ignored, recomputed by cleanup)
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (usually 0)
//! end
//! ```
//!
//! # ASCII Format
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//!   ...
//! endsolid name
//! ```
//!
//! An ASCII file may hold several `solid … endsolid` blocks. Each block is a
//! separate [`StlSolid`] in the [`StlScene`]; [`load_stl`] flattens them into
//! one mesh.

use std::io::BufRead;
use std::path::Path;

use mesh_types::{IndexedMesh, Vertex};
use tracing::{debug, warn};

use crate::error::{LoadError, LoadResult};

/// STL binary header size in bytes.
const HEADER_SIZE: usize = 80;

/// Size of one triangle in binary STL (normal + 3 vertices + attribute).
const TRIANGLE_SIZE: usize = 50;

/// One named sub-geometry of an STL file.
#[derive(Debug, Clone, Default)]
pub struct StlSolid {
    /// Name following the `solid` keyword (empty for binary files).
    pub name: String,
    /// Triangles of this solid; every facet contributes three fresh vertices.
    pub mesh: IndexedMesh,
}

/// Every sub-geometry found in an STL file, in encounter order.
#[derive(Debug, Clone, Default)]
pub struct StlScene {
    /// The solids, in file order.
    pub solids: Vec<StlSolid>,
}

impl StlScene {
    /// Flatten the scene into a single mesh.
    ///
    /// Vertex arrays are appended in encounter order and each solid's face
    /// indices are offset by the running vertex count.
    ///
    /// # Errors
    ///
    /// - [`LoadError::NoGeometry`] if the scene has no solids
    /// - [`LoadError::NotAMesh`] if no solid contains a triangle
    pub fn into_mesh(self) -> LoadResult<IndexedMesh> {
        if self.solids.is_empty() {
            return Err(LoadError::NoGeometry);
        }
        if self.solids.iter().all(|s| s.mesh.faces.is_empty()) {
            return Err(LoadError::NotAMesh);
        }

        let vertex_total = self.solids.iter().map(|s| s.mesh.vertices.len()).sum();
        let face_total = self.solids.iter().map(|s| s.mesh.faces.len()).sum();
        let mut mesh = IndexedMesh::with_capacity(vertex_total, face_total);
        for solid in &self.solids {
            mesh.merge(&solid.mesh);
        }

        Ok(mesh)
    }
}

/// Load a mesh from an STL file.
///
/// Automatically detects ASCII vs binary format. Multi-solid ASCII files are
/// concatenated into one mesh.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The file content is not valid STL
/// - The file contains no triangles
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_stl;
///
/// let mesh = load_stl("model.stl").unwrap();
/// println!("Loaded {} faces", mesh.faces.len());
/// ```
pub fn load_stl<P: AsRef<Path>>(path: P) -> LoadResult<IndexedMesh> {
    load_scene(path)?.into_mesh()
}

/// Load every solid of an STL file without flattening.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid STL.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<StlScene> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LoadError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io(e)
        }
    })?;

    let scene = read_stl(&bytes)?;
    debug!(
        path = %path.display(),
        solids = scene.solids.len(),
        "loaded STL"
    );
    Ok(scene)
}

/// Parse STL data already held in memory.
///
/// # Errors
///
/// Returns an error if the data is not valid STL.
pub fn read_stl(bytes: &[u8]) -> LoadResult<StlScene> {
    if bytes.len() < 6 {
        return Err(LoadError::invalid_content("file too small to be valid STL"));
    }

    let header_str = String::from_utf8_lossy(&bytes[..bytes.len().min(HEADER_SIZE)]);
    let starts_with_solid = header_str
        .trim_start()
        .get(..5)
        .is_some_and(|s| s.eq_ignore_ascii_case("solid"));

    if starts_with_solid && !looks_binary(bytes) {
        read_stl_ascii(bytes)
    } else {
        read_stl_binary(bytes)
    }
}

/// Check whether data that starts with "solid" is nevertheless binary.
///
/// Some exporters write "solid" into the binary header. Such files are
/// recognised by an exact size match or by NUL bytes in the header.
fn looks_binary(bytes: &[u8]) -> bool {
    if bytes.len() < HEADER_SIZE + 4 {
        return false;
    }

    let face_count = read_face_count(bytes);
    let expected_len = (HEADER_SIZE + 4) as u64 + u64::from(face_count) * TRIANGLE_SIZE as u64;
    expected_len == bytes.len() as u64 || bytes[..HEADER_SIZE].contains(&0)
}

fn read_face_count(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([
        bytes[HEADER_SIZE],
        bytes[HEADER_SIZE + 1],
        bytes[HEADER_SIZE + 2],
        bytes[HEADER_SIZE + 3],
    ])
}

/// Parse a binary STL.
fn read_stl_binary(bytes: &[u8]) -> LoadResult<StlScene> {
    if bytes.len() < HEADER_SIZE + 4 {
        return Err(LoadError::InvalidHeader {
            expected: HEADER_SIZE + 4,
            got: bytes.len(),
        });
    }

    let face_count = read_face_count(bytes);
    let body = &bytes[HEADER_SIZE + 4..];

    #[allow(clippy::cast_possible_truncation)]
    // Truncation: the count of complete triangles is bounded by face_count (u32)
    let available = (body.len() / TRIANGLE_SIZE).min(face_count as usize) as u32;
    if available < face_count {
        return Err(LoadError::InvalidFaceCount {
            expected: face_count,
            got: available,
        });
    }

    let mut mesh = IndexedMesh::with_capacity((face_count as usize) * 3, face_count as usize);

    for triangle in body.chunks_exact(TRIANGLE_SIZE).take(face_count as usize) {
        // Skip normal (12 bytes), read 3 vertices (36 bytes total)
        let v0 = read_vertex(&triangle[12..24]);
        let v1 = read_vertex(&triangle[24..36]);
        let v2 = read_vertex(&triangle[36..48]);
        push_facet(&mut mesh, [v0, v1, v2]);
    }

    Ok(StlScene {
        solids: vec![StlSolid {
            name: String::new(),
            mesh,
        }],
    })
}

/// Read a vertex from 12 bytes (3 f32s).
fn read_vertex(buf: &[u8]) -> Vertex {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Vertex::from_coords(f64::from(x), f64::from(y), f64::from(z))
}

#[allow(clippy::cast_possible_truncation)]
// Truncation: mesh indices are u32, meshes with >4B vertices are unsupported
fn push_facet(mesh: &mut IndexedMesh, [v0, v1, v2]: [Vertex; 3]) {
    let base_idx = mesh.vertices.len() as u32;
    mesh.vertices.push(v0);
    mesh.vertices.push(v1);
    mesh.vertices.push(v2);
    mesh.faces.push([base_idx, base_idx + 1, base_idx + 2]);
}

/// Parse an ASCII STL, one [`StlSolid`] per `solid … endsolid` block.
fn read_stl_ascii<R: BufRead>(reader: R) -> LoadResult<StlScene> {
    let mut scene = StlScene::default();
    let mut current: Option<StlSolid> = None;
    let mut in_loop = false;
    let mut vertices_in_face: Vec<Vertex> = Vec::with_capacity(3);

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };

        match keyword.to_ascii_lowercase().as_str() {
            "solid" => {
                if let Some(open) = current.take() {
                    warn!(solid = %open.name, "solid without endsolid, closing it");
                    scene.solids.push(open);
                }
                current = Some(StlSolid {
                    name: parts.collect::<Vec<_>>().join(" "),
                    mesh: IndexedMesh::new(),
                });
            }
            "facet" => {
                vertices_in_face.clear();
            }
            "outer" => {
                if parts.next().is_some_and(|p| p.eq_ignore_ascii_case("loop")) {
                    in_loop = true;
                    vertices_in_face.clear();
                }
            }
            "vertex" => {
                if !in_loop {
                    continue;
                }
                let coords: Vec<&str> = parts.take(3).collect();
                if coords.len() < 3 {
                    return Err(LoadError::invalid_content(format!(
                        "line {}: vertex needs three coordinates",
                        line_no + 1
                    )));
                }
                let x: f64 = coords[0].parse()?;
                let y: f64 = coords[1].parse()?;
                let z: f64 = coords[2].parse()?;
                vertices_in_face.push(Vertex::from_coords(x, y, z));
            }
            "endloop" => {
                in_loop = false;
            }
            "endfacet" => {
                let found = vertices_in_face.len();
                match <[Vertex; 3]>::try_from(std::mem::take(&mut vertices_in_face)) {
                    Ok(face) => {
                        let solid = current.get_or_insert_with(StlSolid::default);
                        push_facet(&mut solid.mesh, face);
                    }
                    Err(_) => {
                        warn!(
                            line = line_no + 1,
                            vertices = found,
                            "skipping facet without exactly three vertices"
                        );
                    }
                }
            }
            "endsolid" => {
                if let Some(done) = current.take() {
                    scene.solids.push(done);
                }
            }
            _ => {}
        }
    }

    if let Some(open) = current.take() {
        scene.solids.push(open);
    }

    Ok(scene)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use mesh_types::MeshTopology;

    fn binary_stl(triangles: &[[[f32; 3]; 3]], header_text: &[u8]) -> Vec<u8> {
        let mut bytes = vec![b' '; HEADER_SIZE];
        bytes[..header_text.len()].copy_from_slice(header_text);
        bytes.extend_from_slice(&(triangles.len() as u32).to_le_bytes());
        for tri in triangles {
            bytes.extend_from_slice(&[0u8; 12]);
            for v in tri {
                for c in v {
                    bytes.extend_from_slice(&c.to_le_bytes());
                }
            }
            bytes.extend_from_slice(&0u16.to_le_bytes());
        }
        bytes
    }

    const TRI: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];

    #[test]
    fn ascii_stl_parsing() {
        let ascii_stl = b"solid test
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
endsolid test";

        let scene = read_stl(ascii_stl).unwrap();
        assert_eq!(scene.solids.len(), 1);
        assert_eq!(scene.solids[0].name, "test");

        let mesh = scene.into_mesh().unwrap();
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn ascii_keywords_are_case_insensitive() {
        let ascii_stl = b"SOLID upper
FACET NORMAL 0 0 1
OUTER LOOP
VERTEX 0 0 0
VERTEX 1 0 0
VERTEX 0 1 0
ENDLOOP
ENDFACET
ENDSOLID upper";

        let mesh = read_stl(ascii_stl).unwrap().into_mesh().unwrap();
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn multi_solid_ascii_is_concatenated_with_offsets() {
        let ascii_stl = b"solid a
facet normal 0 0 1
outer loop
vertex 0 0 0
vertex 1 0 0
vertex 0 1 0
endloop
endfacet
endsolid a
solid b
facet normal 0 0 1
outer loop
vertex 5 0 0
vertex 6 0 0
vertex 5 1 0
endloop
endfacet
facet normal 0 0 1
outer loop
vertex 6 0 0
vertex 6 1 0
vertex 5 1 0
endloop
endfacet
endsolid b";

        let scene = read_stl(ascii_stl).unwrap();
        assert_eq!(scene.solids.len(), 2);
        assert_eq!(scene.solids[1].name, "b");

        let mesh = scene.into_mesh().unwrap();
        assert_eq!(mesh.vertex_count(), 9);
        assert_eq!(mesh.faces, vec![[0, 1, 2], [3, 4, 5], [6, 7, 8]]);
        assert_eq!(mesh.vertices[3].position.x, 5.0);
    }

    #[test]
    fn facet_with_wrong_vertex_count_is_skipped() {
        let ascii_stl = b"solid s
facet normal 0 0 1
outer loop
vertex 0 0 0
vertex 1 0 0
endloop
endfacet
facet normal 0 0 1
outer loop
vertex 0 0 0
vertex 1 0 0
vertex 0 1 0
endloop
endfacet
endsolid s";

        let mesh = read_stl(ascii_stl).unwrap().into_mesh().unwrap();
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn malformed_vertex_is_an_error() {
        let ascii_stl = b"solid s
facet normal 0 0 1
outer loop
vertex 0 zero 0
endloop
endfacet
endsolid s";
        assert!(matches!(read_stl(ascii_stl), Err(LoadError::ParseFloat(_))));
    }

    #[test]
    fn empty_solid_is_not_a_mesh() {
        let result = read_stl(b"solid empty\nendsolid empty\n").unwrap().into_mesh();
        assert!(matches!(result, Err(LoadError::NotAMesh)));
    }

    #[test]
    fn scene_without_solids_has_no_geometry() {
        let result = StlScene::default().into_mesh();
        assert!(matches!(result, Err(LoadError::NoGeometry)));
    }

    #[test]
    fn binary_stl_parsing() {
        let bytes = binary_stl(&[TRI, TRI], b"binary test");
        let mesh = read_stl(&bytes).unwrap().into_mesh().unwrap();
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.faces[1], [3, 4, 5]);
        assert_eq!(mesh.vertices[1].position.x, 1.0);
    }

    #[test]
    fn binary_with_solid_header_is_detected_by_size() {
        let bytes = binary_stl(&[TRI], b"solid exported by some tool");
        let mesh = read_stl(&bytes).unwrap().into_mesh().unwrap();
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn binary_truncated_body_reports_face_count() {
        let mut bytes = binary_stl(&[TRI, TRI], b"");
        bytes.truncate(bytes.len() - 10);
        let result = read_stl(&bytes);
        assert!(matches!(
            result,
            Err(LoadError::InvalidFaceCount {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn binary_zero_faces_is_not_a_mesh() {
        let bytes = binary_stl(&[], b"");
        let result = read_stl(&bytes).unwrap().into_mesh();
        assert!(matches!(result, Err(LoadError::NotAMesh)));
    }

    #[test]
    fn tiny_file_is_rejected() {
        assert!(matches!(
            read_stl(b"abc"),
            Err(LoadError::InvalidContent { .. })
        ));
        assert!(matches!(
            read_stl(b"not an stl at all"),
            Err(LoadError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn load_nonexistent_file() {
        let result = load_stl("nonexistent_file_12345.stl");
        if let Err(LoadError::FileNotFound { path }) = result {
            assert!(path.to_string_lossy().contains("nonexistent"));
        } else {
            panic!("expected FileNotFound");
        }
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tri.stl");
        std::fs::write(&path, binary_stl(&[TRI], b"")).unwrap();

        let mesh = load_stl(&path).unwrap();
        assert_eq!(mesh.face_count(), 1);
    }
}
