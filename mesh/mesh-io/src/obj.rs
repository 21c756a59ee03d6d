//! Wavefront OBJ export.
//!
//! Output layout:
//!
//! ```text
//! # comment header
//! v x y z          – one per vertex
//! vn nx ny nz      – one per vertex, only when every vertex has a normal
//! f a b c          – 1-based vertex indices
//! f a//a b//b c//c – same, when normals were written
//! ```
//!
//! No materials, texture coordinates, or groups are written.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use mesh_types::IndexedMesh;

use crate::error::{ExportError, ExportResult};

/// Save a mesh as a Wavefront OBJ file.
///
/// Parent directories are created if they do not exist. Vertex normals are
/// written when every vertex carries one.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be
/// written.
///
/// # Example
///
/// ```no_run
/// use mesh_io::{load_stl, save_obj};
///
/// let mesh = load_stl("input.stl").unwrap();
/// save_obj(&mesh, "out/model.obj").unwrap();
/// ```
pub fn save_obj<P: AsRef<Path>>(mesh: &IndexedMesh, path: P) -> ExportResult<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ExportError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let file = File::create(path).map_err(|e| ExportError::write(path, e))?;
    let mut writer = BufWriter::new(file);
    write_obj(mesh, &mut writer).map_err(|e| ExportError::write(path, e))?;
    writer.flush().map_err(|e| ExportError::write(path, e))
}

/// Write a mesh in OBJ text form to any writer.
///
/// # Errors
///
/// Returns any I/O error raised by the writer.
pub fn write_obj<W: Write>(mesh: &IndexedMesh, mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "# Wavefront OBJ")?;
    writeln!(
        writer,
        "# vertices: {} faces: {}",
        mesh.vertices.len(),
        mesh.faces.len()
    )?;

    for vertex in &mesh.vertices {
        let p = &vertex.position;
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }

    let with_normals = mesh.has_vertex_normals();
    if with_normals {
        for n in mesh.vertices.iter().filter_map(|v| v.normal()) {
            writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
        }
    }

    for &[a, b, c] in &mesh.faces {
        let (a, b, c) = (u64::from(a) + 1, u64::from(b) + 1, u64::from(c) + 1);
        if with_normals {
            writeln!(writer, "f {a}//{a} {b}//{b} {c}//{c}")?;
        } else {
            writeln!(writer, "f {a} {b} {c}")?;
        }
    }

    Ok(())
}
