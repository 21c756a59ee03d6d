//! Gathering STL inputs from files and folders.

use std::path::{Path, PathBuf};

use hashbrown::HashSet;
use mesh_io::is_stl_path;
use tracing::{debug, warn};

/// Expand a mix of files and folders into an ordered list of STL files.
///
/// Folders contribute their immediate `.stl` children (any extension case),
/// sorted by name; they are not searched recursively. Missing paths and
/// non-STL files are skipped. Each file appears once, keyed by its canonical
/// path, at the position it was first seen; the canonical path is what is
/// returned.
///
/// # Example
///
/// ```
/// use mesh_convert::collect_inputs;
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(dir.path().join("b.STL"), b"").unwrap();
/// std::fs::write(dir.path().join("a.stl"), b"").unwrap();
/// std::fs::write(dir.path().join("notes.txt"), b"").unwrap();
///
/// let inputs = collect_inputs([dir.path()]);
/// assert_eq!(inputs.len(), 2);
/// assert!(inputs[0].ends_with("a.stl"));
/// ```
pub fn collect_inputs<I, P>(paths: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut seen = HashSet::new();
    let mut inputs = Vec::new();

    let mut push = |path: &Path| {
        if !is_stl_file(path) {
            debug!(path = %path.display(), "skipping non-STL path");
            return;
        }
        let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if seen.insert(canonical.clone()) {
            inputs.push(canonical);
        }
    };

    for path in paths {
        let path = path.as_ref();
        if path.is_dir() {
            for child in stl_children(path) {
                push(&child);
            }
        } else if path.exists() {
            push(path);
        } else {
            warn!(path = %path.display(), "input does not exist");
        }
    }

    inputs
}

fn is_stl_file(path: &Path) -> bool {
    path.is_file() && is_stl_path(path)
}

fn stl_children(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "cannot list folder");
            return Vec::new();
        }
    };

    let mut children: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|p| is_stl_file(p))
        .collect();
    children.sort();
    children
}
