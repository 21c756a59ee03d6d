//! Command-line arguments shared by the subcommands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use mesh_convert::{ConvertConfig, ConvertOptions, NamingKind, ScalePreset};
use mesh_repair::{CleanupPolicy, PassStrategy};

/// Output naming mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NamingArg {
    /// Keep the input file name
    Same,
    /// Append `_converted` to the input name
    Suffix,
    /// Use `--name`, numbered when converting several files
    Custom,
}

impl From<NamingArg> for NamingKind {
    fn from(arg: NamingArg) -> Self {
        match arg {
            NamingArg::Same => Self::Same,
            NamingArg::Suffix => Self::Suffix,
            NamingArg::Custom => Self::Custom,
        }
    }
}

/// Cleanup pass implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Hash-set based passes
    Indexed,
    /// Mask and remap-table passes
    Explicit,
}

/// Pipeline flags common to `convert` and `stats`.
#[derive(Debug, Args)]
pub struct PipelineArgs {
    /// TOML config file with [options] and [naming] tables
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Uniform scale factor
    #[arg(long, conflicts_with = "preset")]
    pub scale: Option<f64>,

    /// Unit conversion preset (mm-to-m, cm-to-m, m-to-mm, inch-to-mm)
    #[arg(long)]
    pub preset: Option<ScalePreset>,

    /// Move the bounding box centre to the origin
    #[arg(long)]
    pub center: bool,

    /// Swap the Y and Z axes
    #[arg(long)]
    pub swap_yz: bool,

    /// Negate X
    #[arg(long)]
    pub flip_x: bool,

    /// Negate Y
    #[arg(long)]
    pub flip_y: bool,

    /// Negate Z
    #[arg(long)]
    pub flip_z: bool,

    /// Do not weld coincident vertices
    #[arg(long)]
    pub no_merge: bool,

    /// Vertex weld distance
    #[arg(long)]
    pub merge_tolerance: Option<f64>,
}

/// Arguments of `stl2obj convert`.
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// STL files or folders containing STL files
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Write every output here instead of beside its input
    #[arg(long, short)]
    pub out_dir: Option<PathBuf>,

    /// How output files are named
    #[arg(long, value_enum)]
    pub naming: Option<NamingArg>,

    /// Base name for --naming custom
    #[arg(long)]
    pub name: Option<String>,

    /// Skip the cleanup passes
    #[arg(long)]
    pub no_cleanup: bool,

    /// Fail a file when a cleanup pass fails instead of skipping the pass
    #[arg(long)]
    pub strict: bool,

    /// Cleanup pass implementation
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

/// Arguments of `stl2obj stats`.
#[derive(Debug, Args)]
pub struct StatsArgs {
    /// STL file to inspect
    pub input: PathBuf,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

impl PipelineArgs {
    /// Load the config file, if any, and apply flag overrides to its options.
    pub fn load_config(&self) -> Result<ConvertConfig> {
        let mut config = match &self.config {
            Some(path) => ConvertConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => ConvertConfig::default(),
        };
        self.apply(&mut config.options);
        config.options.validate().context("invalid options")?;
        Ok(config)
    }

    fn apply(&self, options: &mut ConvertOptions) {
        if let Some(preset) = self.preset {
            options.scale_factor = preset.factor();
        }
        if let Some(scale) = self.scale {
            options.scale_factor = scale;
        }
        if let Some(tolerance) = self.merge_tolerance {
            options.merge_tolerance = tolerance;
        }
        options.merge_vertices &= !self.no_merge;
        options.center_to_origin |= self.center;
        options.swap_yz |= self.swap_yz;
        options.flip_x |= self.flip_x;
        options.flip_y |= self.flip_y;
        options.flip_z |= self.flip_z;
    }
}

impl ConvertArgs {
    /// Build the full configuration for a conversion run.
    pub fn load_config(&self) -> Result<ConvertConfig> {
        let mut config = self.pipeline.load_config()?;

        let options = &mut config.options;
        options.validate_cleanup &= !self.no_cleanup;
        if self.strict {
            options.cleanup_policy = CleanupPolicy::Strict;
        }
        if let Some(strategy) = self.strategy {
            options.pass_strategy = match strategy {
                StrategyArg::Indexed => PassStrategy::Indexed,
                StrategyArg::Explicit => PassStrategy::Explicit,
            };
        }

        let naming = &mut config.naming;
        if let Some(kind) = self.naming {
            naming.mode = kind.into();
        }
        if let Some(name) = &self.name {
            naming.name = Some(name.clone());
            if self.naming.is_none() {
                naming.mode = NamingKind::Custom;
            }
        }
        if let Some(dir) = &self.out_dir {
            naming.out_dir = Some(dir.clone());
        }

        Ok(config)
    }
}
