//! Conversion options and scale presets.

use std::fmt;
use std::str::FromStr;

use mesh_repair::{CleanupPolicy, MeshCleaner, PassStrategy, DEFAULT_MERGE_TOLERANCE};
use mesh_transform::{NormalizeParams, TransformPipeline};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Everything that controls how one mesh is converted.
///
/// Built once per batch and shared read-only by every job. Missing keys in a
/// config file fall back to [`ConvertOptions::default`]: merge and cleanup on,
/// scale `1.0`, every orientation step off.
///
/// # Example
///
/// ```
/// use mesh_convert::{ConvertOptions, ScalePreset};
///
/// let options = ConvertOptions {
///     center_to_origin: true,
///     ..ConvertOptions::default()
/// }
/// .with_preset(ScalePreset::InchToMm);
///
/// assert_eq!(options.scale_factor, 25.4);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertOptions {
    /// Weld vertices closer than `merge_tolerance` before transforming.
    pub merge_vertices: bool,
    /// Weld distance, in input units.
    pub merge_tolerance: f64,
    /// Run the cleanup passes after transforming.
    pub validate_cleanup: bool,
    /// What a failed cleanup pass does to the job.
    pub cleanup_policy: CleanupPolicy,
    /// Which cleanup pass implementations to use.
    pub pass_strategy: PassStrategy,
    /// Uniform scale factor; must be positive and finite.
    pub scale_factor: f64,
    /// Move the bounding box midpoint to the origin.
    pub center_to_origin: bool,
    /// Exchange the Y and Z axes.
    pub swap_yz: bool,
    /// Negate X.
    pub flip_x: bool,
    /// Negate Y.
    pub flip_y: bool,
    /// Negate Z.
    pub flip_z: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            merge_vertices: true,
            merge_tolerance: DEFAULT_MERGE_TOLERANCE,
            validate_cleanup: true,
            cleanup_policy: CleanupPolicy::BestEffort,
            pass_strategy: PassStrategy::Indexed,
            scale_factor: 1.0,
            center_to_origin: false,
            swap_yz: false,
            flip_x: false,
            flip_y: false,
            flip_z: false,
        }
    }
}

impl ConvertOptions {
    /// Replace the scale factor with a preset's.
    #[must_use]
    pub fn with_preset(mut self, preset: ScalePreset) -> Self {
        self.scale_factor = preset.factor();
        self
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidScale`] unless the scale is positive and finite
    /// - [`ConfigError::InvalidTolerance`] unless the tolerance is finite and non-negative
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.scale_factor.is_finite() && self.scale_factor > 0.0) {
            return Err(ConfigError::InvalidScale {
                factor: self.scale_factor,
            });
        }
        if !(self.merge_tolerance.is_finite() && self.merge_tolerance >= 0.0) {
            return Err(ConfigError::InvalidTolerance {
                tolerance: self.merge_tolerance,
            });
        }
        Ok(())
    }

    /// Transform parameters selected by these options.
    #[must_use]
    pub fn normalize_params(&self) -> NormalizeParams {
        NormalizeParams::default()
            .with_swap_yz(self.swap_yz)
            .with_flips(self.flip_x, self.flip_y, self.flip_z)
            .with_scale(self.scale_factor)
            .with_center(self.center_to_origin)
    }

    /// Build the transform pipeline.
    ///
    /// # Errors
    ///
    /// Fails if the scale factor is invalid.
    pub fn pipeline(&self) -> mesh_transform::TransformResult<TransformPipeline> {
        TransformPipeline::new(self.normalize_params())
    }

    /// Build the mesh cleaner.
    #[must_use]
    pub fn cleaner(&self) -> MeshCleaner {
        MeshCleaner::new(self.pass_strategy, self.cleanup_policy)
    }
}

/// Common unit conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScalePreset {
    /// Millimetres to metres (`0.001`).
    MmToM,
    /// Centimetres to metres (`0.01`).
    CmToM,
    /// Metres to millimetres (`1000`).
    MToMm,
    /// Inches to millimetres (`25.4`).
    InchToMm,
}

impl ScalePreset {
    /// Every preset, in menu order.
    pub const ALL: [Self; 4] = [Self::MmToM, Self::CmToM, Self::MToMm, Self::InchToMm];

    /// The scale factor.
    #[must_use]
    pub const fn factor(self) -> f64 {
        match self {
            Self::MmToM => 0.001,
            Self::CmToM => 0.01,
            Self::MToMm => 1000.0,
            Self::InchToMm => 25.4,
        }
    }

    /// Kebab-case name used on the command line and in config files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MmToM => "mm-to-m",
            Self::CmToM => "cm-to-m",
            Self::MToMm => "m-to-mm",
            Self::InchToMm => "inch-to-mm",
        }
    }
}

impl fmt::Display for ScalePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::MmToM => "mm → m",
            Self::CmToM => "cm → m",
            Self::MToMm => "m → mm",
            Self::InchToMm => "inch → mm",
        };
        write!(f, "{label} ({})", self.factor())
    }
}

impl FromStr for ScalePreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownPreset { name: s.to_string() })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tool_defaults() {
        let o = ConvertOptions::default();
        assert!(o.merge_vertices);
        assert!(o.validate_cleanup);
        assert_eq!(o.scale_factor, 1.0);
        assert_eq!(o.merge_tolerance, 1e-8);
        assert!(!(o.center_to_origin || o.swap_yz || o.flip_x || o.flip_y || o.flip_z));
        assert!(o.normalize_params().is_identity());
    }

    #[test]
    fn preset_factors() {
        assert_eq!(ScalePreset::MmToM.factor(), 0.001);
        assert_eq!(ScalePreset::CmToM.factor(), 0.01);
        assert_eq!(ScalePreset::MToMm.factor(), 1000.0);
        assert_eq!(ScalePreset::InchToMm.factor(), 25.4);
        assert_eq!(ScalePreset::InchToMm.to_string(), "inch → mm (25.4)");
    }

    #[test]
    fn preset_parsing() {
        assert_eq!("cm-to-m".parse::<ScalePreset>().unwrap(), ScalePreset::CmToM);
        assert_eq!(" Inch-To-MM ".parse::<ScalePreset>().unwrap(), ScalePreset::InchToMm);
        assert!(matches!(
            "furlongs".parse::<ScalePreset>(),
            Err(ConfigError::UnknownPreset { .. })
        ));
    }

    #[test]
    fn validation_rejects_bad_values() {
        for factor in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let o = ConvertOptions {
                scale_factor: factor,
                ..ConvertOptions::default()
            };
            assert!(matches!(o.validate(), Err(ConfigError::InvalidScale { .. })));
        }

        let o = ConvertOptions {
            merge_tolerance: -1.0,
            ..ConvertOptions::default()
        };
        assert!(matches!(o.validate(), Err(ConfigError::InvalidTolerance { .. })));
    }

    #[test]
    fn cleaner_follows_options() {
        let o = ConvertOptions {
            cleanup_policy: CleanupPolicy::Strict,
            pass_strategy: PassStrategy::Explicit,
            ..ConvertOptions::default()
        };
        let cleaner = o.cleaner();
        assert_eq!(cleaner.policy(), CleanupPolicy::Strict);
        assert_eq!(cleaner.strategy(), PassStrategy::Explicit);
    }
}
