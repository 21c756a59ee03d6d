//! Output path resolution.

use std::path::{Path, PathBuf};

use hashbrown::HashSet;
use tracing::debug;

use crate::error::NamingError;

/// Suffix appended to the input stem in [`NamingMode::Suffix`].
pub const CONVERTED_SUFFIX: &str = "_converted";

/// Extension of every output file.
pub const OUTPUT_EXTENSION: &str = "obj";

/// How an output stem is derived from an input path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NamingMode {
    /// Same stem as the input.
    #[default]
    SameName,
    /// Input stem followed by `_converted`.
    Suffix,
    /// A fixed base name, numbered `_01`, `_02`, ... when there is more than one job.
    Custom(String),
}

/// One unit of work: read `input`, write `output`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    /// STL file to read.
    pub input: PathBuf,
    /// OBJ file to write.
    pub output: PathBuf,
}

impl ConversionJob {
    /// Pair an input with an explicit output.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

/// Computes collision-free output paths for an ordered list of inputs.
///
/// A candidate `stem.obj` is taken if a file of that name already exists in
/// the destination folder, or if an earlier job in the same run was given the
/// same file name (compared case-insensitively). Taken candidates are retried
/// as `stem_1.obj`, `stem_2.obj`, ... until one is free.
///
/// # Example
///
/// ```
/// use mesh_convert::{NamingMode, OutputNamer};
///
/// let dir = tempfile::tempdir().unwrap();
/// let namer = OutputNamer::new(NamingMode::Custom("export".into()), Some(dir.path().into()));
/// let jobs = namer.resolve(&["a.stl".into(), "b.stl".into()]).unwrap();
///
/// assert_eq!(jobs[0].output, dir.path().join("export_01.obj"));
/// assert_eq!(jobs[1].output, dir.path().join("export_02.obj"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct OutputNamer {
    mode: NamingMode,
    out_dir: Option<PathBuf>,
}

impl OutputNamer {
    /// Create a namer. With no `out_dir`, each output goes beside its input.
    #[must_use]
    pub const fn new(mode: NamingMode, out_dir: Option<PathBuf>) -> Self {
        Self { mode, out_dir }
    }

    /// The naming mode.
    #[must_use]
    pub const fn mode(&self) -> &NamingMode {
        &self.mode
    }

    /// Resolve one job per input, in input order.
    ///
    /// # Errors
    ///
    /// [`NamingError::EmptyCustomName`] if custom naming is selected with a
    /// blank name. Nothing is resolved in that case.
    pub fn resolve(&self, inputs: &[PathBuf]) -> Result<Vec<ConversionJob>, NamingError> {
        let custom = match &self.mode {
            NamingMode::Custom(name) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(NamingError::EmptyCustomName);
                }
                Some(name)
            }
            _ => None,
        };

        let numbered = inputs.len() > 1;
        let mut used: HashSet<String> = HashSet::with_capacity(inputs.len());
        let mut jobs = Vec::with_capacity(inputs.len());

        for (idx, input) in inputs.iter().enumerate() {
            let folder = self.folder_for(input);
            let stem = match custom {
                Some(name) if numbered => format!("{name}_{:02}", idx + 1),
                Some(name) => name.to_string(),
                None => {
                    let input_stem = input
                        .file_stem()
                        .map(|s| s.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    if self.mode == NamingMode::Suffix {
                        format!("{input_stem}{CONVERTED_SUFFIX}")
                    } else {
                        input_stem
                    }
                }
            };

            let file_name = free_file_name(&stem, &folder, &used);
            used.insert(file_name.to_lowercase());

            let output = folder.join(&file_name);
            debug!(input = %input.display(), output = %output.display(), "resolved output");
            jobs.push(ConversionJob::new(input.clone(), output));
        }

        Ok(jobs)
    }

    fn folder_for(&self, input: &Path) -> PathBuf {
        match &self.out_dir {
            Some(dir) => dir.clone(),
            None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
        }
    }
}

fn free_file_name(stem: &str, folder: &Path, used: &HashSet<String>) -> String {
    let taken = |name: &str| used.contains(&name.to_lowercase()) || folder.join(name).exists();

    let mut candidate = format!("{stem}.{OUTPUT_EXTENSION}");
    let mut counter = 1u32;
    while taken(&candidate) {
        candidate = format!("{stem}_{counter}.{OUTPUT_EXTENSION}");
        counter += 1;
    }
    candidate
}
