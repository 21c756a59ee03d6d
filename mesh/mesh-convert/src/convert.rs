//! Converting a single STL file to OBJ.

use std::path::Path;

use mesh_io::{load_stl, save_obj};
use mesh_measure::MeshStats;
use mesh_repair::{merge_vertices, CleanupReport, MeshCleaner};
use mesh_transform::TransformPipeline;
use mesh_types::IndexedMesh;
use tracing::{debug, info};

use crate::error::ConvertResult;
use crate::options::ConvertOptions;

/// What one conversion did.
#[derive(Debug, Clone)]
pub struct ConvertReport {
    /// Statistics of the mesh as written.
    pub stats: MeshStats,
    /// Vertices removed by merging (0 when merging is off).
    pub merged_vertices: usize,
    /// Cleanup report, when cleanup ran.
    pub cleanup: Option<CleanupReport>,
}

/// The per-job pipeline, built once from a set of options.
///
/// Stages run in a fixed order: load, merge, transform, clean, export. The
/// transform pipeline and cleaner are constructed up front so an invalid
/// option fails before any file is touched.
#[derive(Debug)]
pub struct Converter {
    merge_tolerance: Option<f64>,
    pipeline: TransformPipeline,
    cleaner: Option<MeshCleaner>,
}

impl Converter {
    /// Build a converter.
    ///
    /// # Errors
    ///
    /// Fails if the options do not validate.
    pub fn new(options: &ConvertOptions) -> ConvertResult<Self> {
        options.validate()?;
        Ok(Self {
            merge_tolerance: options.merge_vertices.then_some(options.merge_tolerance),
            pipeline: options.pipeline()?,
            cleaner: options.validate_cleanup.then(|| options.cleaner()),
        })
    }

    /// Run load, merge and transform, without cleanup or export.
    ///
    /// # Errors
    ///
    /// Returns a load error if the STL cannot be read.
    pub fn preview<P: AsRef<Path>>(&self, input: P) -> ConvertResult<IndexedMesh> {
        let (mesh, _) = self.prepare(input.as_ref())?;
        Ok(mesh)
    }

    /// Convert `input` to `output`, creating output directories as needed.
    ///
    /// # Errors
    ///
    /// Load and export failures, and cleanup failures under the strict policy.
    pub fn convert<P, Q>(&self, input: P, output: Q) -> ConvertResult<ConvertReport>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let (input, output) = (input.as_ref(), output.as_ref());
        let (mut mesh, merged_vertices) = self.prepare(input)?;

        let cleanup = match &self.cleaner {
            Some(cleaner) => {
                let (cleaned, report) = cleaner.clean(&mesh)?;
                debug!(%report, "cleanup finished");
                mesh = cleaned;
                Some(report)
            }
            None => None,
        };

        save_obj(&mesh, output)?;
        let stats = MeshStats::of(&mesh);
        info!(
            input = %input.display(),
            output = %output.display(),
            vertices = stats.vertex_count,
            faces = stats.face_count,
            "converted"
        );

        Ok(ConvertReport {
            stats,
            merged_vertices,
            cleanup,
        })
    }

    fn prepare(&self, input: &Path) -> ConvertResult<(IndexedMesh, usize)> {
        let mut mesh = load_stl(input)?;
        debug!(
            input = %input.display(),
            vertices = mesh.vertices.len(),
            faces = mesh.faces.len(),
            "loaded"
        );

        let mut merged = 0;
        if let Some(tolerance) = self.merge_tolerance {
            let (welded, removed) = merge_vertices(&mesh, tolerance);
            mesh = welded;
            merged = removed;
        }

        Ok((self.pipeline.apply(&mesh), merged))
    }
}

/// Convert one file with the given options.
///
/// # Errors
///
/// As [`Converter::new`] and [`Converter::convert`].
pub fn convert_one<P, Q>(input: P, output: Q, options: &ConvertOptions) -> ConvertResult<MeshStats>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    Ok(Converter::new(options)?.convert(input, output)?.stats)
}

/// Load, merge and transform one file for inspection.
///
/// # Errors
///
/// As [`Converter::new`] and [`Converter::preview`].
pub fn preview<P: AsRef<Path>>(input: P, options: &ConvertOptions) -> ConvertResult<MeshStats> {
    let mesh = Converter::new(options)?.preview(input)?;
    Ok(MeshStats::of(&mesh))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use mesh_repair::{CleanupPolicy, DEGENERATE_FACES};

    // Two triangles sharing an edge, plus a zero-area sliver.
    const QUAD_STL: &str = "solid quad
facet normal 0 0 1
 outer loop
  vertex 0 0 0
  vertex 2 0 0
  vertex 2 1 0
 endloop
endfacet
facet normal 0 0 1
 outer loop
  vertex 0 0 0
  vertex 2 1 0
  vertex 0 1 0
 endloop
endfacet
facet normal 0 0 1
 outer loop
  vertex 0 0 0
  vertex 0 0 0
  vertex 2 1 0
 endloop
endfacet
endsolid quad
";

    fn write_quad(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("quad.stl");
        std::fs::write(&path, QUAD_STL).unwrap();
        path
    }

    #[test]
    fn full_pipeline_merges_cleans_and_exports() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_quad(dir.path());
        let output = dir.path().join("out").join("quad.obj");

        let converter = Converter::new(&ConvertOptions::default()).unwrap();
        let report = converter.convert(&input, &output).unwrap();

        assert_eq!(report.merged_vertices, 5);
        assert_eq!(report.stats.vertex_count, 4);
        assert_eq!(report.stats.face_count, 2);
        assert!(report.cleanup.unwrap().applied(DEGENERATE_FACES));
        assert!(output.exists());
    }

    #[test]
    fn without_merge_or_cleanup_the_soup_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_quad(dir.path());
        let output = dir.path().join("raw.obj");

        let options = ConvertOptions {
            merge_vertices: false,
            validate_cleanup: false,
            ..ConvertOptions::default()
        };
        let stats = convert_one(&input, &output, &options).unwrap();
        assert_eq!(stats.vertex_count, 9);
        assert_eq!(stats.face_count, 3);
    }

    #[test]
    fn preview_applies_transform_but_not_cleanup() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_quad(dir.path());

        let options = ConvertOptions {
            scale_factor: 10.0,
            center_to_origin: true,
            ..ConvertOptions::default()
        };
        let stats = preview(&input, &options).unwrap();

        assert_eq!(stats.face_count, 3);
        let extents = stats.extents().unwrap();
        assert_eq!(extents.x, 20.0);
        assert_eq!(extents.y, 10.0);
        assert_eq!(stats.min().unwrap().x, -10.0);
        assert!(!dir.path().join("quad.obj").exists());
    }

    #[test]
    fn invalid_options_fail_before_loading() {
        let options = ConvertOptions {
            scale_factor: 0.0,
            ..ConvertOptions::default()
        };
        let err = Converter::new(&options).unwrap_err();
        assert!(matches!(err, ConvertError::Config(_)));
    }

    #[test]
    fn missing_input_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let converter = Converter::new(&ConvertOptions::default()).unwrap();
        let err = converter
            .convert(dir.path().join("missing.stl"), dir.path().join("x.obj"))
            .unwrap_err();
        assert!(matches!(err, ConvertError::Load(_)));
        assert!(!dir.path().join("x.obj").exists());
    }

    #[test]
    fn strict_policy_fails_on_empty_geometry() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sliver.stl");
        // A single degenerate facet: every face goes, then normals have nothing to work on.
        std::fs::write(
            &input,
            "solid s\nfacet normal 0 0 0\nouter loop\nvertex 0 0 0\nvertex 0 0 0\nvertex 1 0 0\nendloop\nendfacet\nendsolid s\n",
        )
        .unwrap();

        let strict = ConvertOptions {
            cleanup_policy: CleanupPolicy::Strict,
            ..ConvertOptions::default()
        };
        let err = convert_one(&input, dir.path().join("s.obj"), &strict).unwrap_err();
        assert!(matches!(err, ConvertError::Repair(_)));

        let lenient = convert_one(&input, dir.path().join("s.obj"), &ConvertOptions::default()).unwrap();
        assert_eq!(lenient.face_count, 0);
        assert!(lenient.bounds.is_none());
    }
}
