//! The cleanup sequence and its report.

use std::fmt;

use mesh_types::IndexedMesh;
use tracing::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{RepairError, RepairResult};
use crate::pass::{CleanupPass, PassStrategy};

/// What to do when a pass fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "kebab-case"))]
pub enum CleanupPolicy {
    /// Skip the failed pass, log a warning, and continue with its input.
    #[default]
    BestEffort,
    /// Abort cleanup with [`RepairError::PassFailed`].
    Strict,
}

/// How a single pass went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassRecord {
    /// Pass name.
    pub name: &'static str,
    /// Whether the pass ran to completion.
    pub applied: bool,
    /// Elements removed by the pass.
    pub removed: usize,
    /// Why the pass was skipped, if it was.
    pub skip_reason: Option<String>,
}

/// Summary of a cleanup run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Number of vertices before cleanup.
    pub initial_vertices: usize,
    /// Number of faces before cleanup.
    pub initial_faces: usize,
    /// Number of vertices after cleanup.
    pub final_vertices: usize,
    /// Number of faces after cleanup.
    pub final_faces: usize,
    /// One record per pass, in execution order.
    pub passes: Vec<PassRecord>,
}

impl CleanupReport {
    /// Look up the record of a pass by name.
    #[must_use]
    pub fn pass(&self, name: &str) -> Option<&PassRecord> {
        self.passes.iter().find(|p| p.name == name)
    }

    /// Whether the named pass ran to completion.
    #[must_use]
    pub fn applied(&self, name: &str) -> bool {
        self.pass(name).is_some_and(|p| p.applied)
    }

    /// Passes that were skipped.
    pub fn skipped(&self) -> impl Iterator<Item = &PassRecord> {
        self.passes.iter().filter(|p| !p.applied)
    }

    /// Check if any pass removed something.
    #[must_use]
    pub fn had_changes(&self) -> bool {
        self.passes.iter().any(|p| p.removed > 0)
    }
}

impl fmt::Display for CleanupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cleanup: {} -> {} verts, {} -> {} faces",
            self.initial_vertices, self.final_vertices, self.initial_faces, self.final_faces
        )?;
        for pass in &self.passes {
            match &pass.skip_reason {
                Some(reason) => write!(f, "; {} skipped ({reason})", pass.name)?,
                None if pass.removed > 0 => write!(f, "; {} removed {}", pass.name, pass.removed)?,
                None => {}
            }
        }
        Ok(())
    }
}

/// Runs the fixed cleanup sequence over a mesh.
///
/// Passes, in order: finite-value filter, degenerate-face removal,
/// duplicate-face removal, unreferenced-vertex removal, normal recomputation.
///
/// # Example
///
/// ```
/// use mesh_types::IndexedMesh;
/// use mesh_repair::{MeshCleaner, PassStrategy, CleanupPolicy};
///
/// let mesh = IndexedMesh::from_raw(
///     &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
///     &[0, 1, 2, 2, 1, 0, 0, 0, 1],
/// );
///
/// let cleaner = MeshCleaner::new(PassStrategy::Indexed, CleanupPolicy::BestEffort);
/// let (clean, report) = cleaner.clean(&mesh).unwrap();
/// assert_eq!(clean.faces.len(), 1);
/// assert!(report.applied("duplicate-faces"));
/// ```
pub struct MeshCleaner {
    strategy: PassStrategy,
    policy: CleanupPolicy,
    passes: Vec<Box<dyn CleanupPass>>,
}

impl MeshCleaner {
    /// Build a cleaner; the pass implementations are fixed from here on.
    #[must_use]
    pub fn new(strategy: PassStrategy, policy: CleanupPolicy) -> Self {
        Self {
            strategy,
            policy,
            passes: strategy.passes(),
        }
    }

    /// The strategy the passes were built with.
    #[must_use]
    pub const fn strategy(&self) -> PassStrategy {
        self.strategy
    }

    /// The failure policy.
    #[must_use]
    pub const fn policy(&self) -> CleanupPolicy {
        self.policy
    }

    /// Run every pass in order and return the cleaned mesh with a report.
    ///
    /// The input is never modified.
    ///
    /// # Errors
    ///
    /// Only under [`CleanupPolicy::Strict`]: returns
    /// [`RepairError::PassFailed`] for the first pass that fails.
    pub fn clean(&self, mesh: &IndexedMesh) -> RepairResult<(IndexedMesh, CleanupReport)> {
        let mut report = CleanupReport {
            initial_vertices: mesh.vertices.len(),
            initial_faces: mesh.faces.len(),
            ..CleanupReport::default()
        };
        let mut current = mesh.clone();

        for pass in &self.passes {
            let name = pass.name();
            match pass.apply(&current) {
                Ok(outcome) => {
                    debug!(pass = name, removed = outcome.removed, "cleanup pass applied");
                    report.passes.push(PassRecord {
                        name,
                        applied: outcome.applied,
                        removed: outcome.removed,
                        skip_reason: None,
                    });
                    current = outcome.mesh;
                }
                Err(err) if self.policy == CleanupPolicy::Strict => {
                    return Err(RepairError::pass_failed(name, err));
                }
                Err(err) => {
                    warn!(pass = name, error = %err, "cleanup pass skipped");
                    report.passes.push(PassRecord {
                        name,
                        applied: false,
                        removed: 0,
                        skip_reason: Some(err.to_string()),
                    });
                }
            }
        }

        report.final_vertices = current.vertices.len();
        report.final_faces = current.faces.len();
        Ok((current, report))
    }
}

impl Default for MeshCleaner {
    fn default() -> Self {
        Self::new(PassStrategy::default(), CleanupPolicy::default())
    }
}

impl fmt::Debug for MeshCleaner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeshCleaner")
            .field("strategy", &self.strategy)
            .field("policy", &self.policy)
            .field(
                "passes",
                &self.passes.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
