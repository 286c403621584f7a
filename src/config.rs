use std::fs::File;
use std::io::Read;
use std::path::Path;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use crate::error::ReconstructionError;
use crate::gapfilling::{FillStrategy, GapFiller};
use crate::model::{AxisScale, DimensionOracle, Dimensions};
use crate::surface::{SurfaceBuilder, DEFAULT_SCALAR_NAME};

/// What to do with a capture shorter than its declared dimensions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TruncationPolicy {
    /// Surface the truncation error.
    #[default]
    Reject,
    /// Decode what is there and let the gap filler repair the rest.
    BestEffort
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructionConfig {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub scale: AxisScale,
    pub truncation: TruncationPolicy,
    pub fill_strategy: FillStrategy,
    /// `null` disables the scalar attribute.
    pub scalar_name: Option<String>
}

impl Default for ReconstructionConfig {
    fn default() -> Self {
        ReconstructionConfig {
            width: None,
            height: None,
            scale: AxisScale::IDENTITY,
            truncation: TruncationPolicy::default(),
            fill_strategy: FillStrategy::default(),
            scalar_name: Some(DEFAULT_SCALAR_NAME.to_string())
        }
    }
}

impl ReconstructionConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut contents = String::new();
        File::open(path)
            .with_context(|| format!("opening config {}", path.display()))?
            .read_to_string(&mut contents)?;
        Self::from_json(&contents).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn gap_filler(&self) -> GapFiller {
        GapFiller::new().with_strategy(self.fill_strategy)
    }

    pub fn surface_builder(&self) -> SurfaceBuilder {
        SurfaceBuilder::new()
            .with_scale(self.scale)
            .with_scalar_name(self.scalar_name.clone())
    }
}

impl DimensionOracle for ReconstructionConfig {
    fn dimensions(&self) -> crate::error::Result<Dimensions> {
        match (self.width, self.height) {
            (Some(width), Some(height)) => Dimensions::new(width, height),
            (width, height) => Err(ReconstructionError::DimensionMismatch {
                width: width.unwrap_or(0),
                height: height.unwrap_or(0),
                reason: "width and height must both be declared".to_string()
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReconstructionConfig::from_json("{}").unwrap();
        assert_eq!(config, ReconstructionConfig::default());
        assert_eq!(config.scalar_name.as_deref(), Some("Elevation"));
        assert!(config.scale.is_identity());
        assert!(config.dimensions().is_err());
    }

    #[test]
    fn test_full_config() {
        let json = r#"{
            "width": 1224,
            "height": 1024,
            "scale": {"x": 1.0, "y": 1.0, "z": 5.0},
            "truncation": "best_effort",
            "fill_strategy": "nearest_only",
            "scalar_name": null
        }"#;
        let config = ReconstructionConfig::from_json(json).unwrap();
        assert_eq!(config.dimensions().unwrap(), Dimensions::new(1224, 1024).unwrap());
        assert_eq!(config.scale, AxisScale::new(1.0, 1.0, 5.0));
        assert_eq!(config.truncation, TruncationPolicy::BestEffort);
        assert_eq!(config.gap_filler().strategy(), FillStrategy::NearestOnly);
        assert!(config.scalar_name.is_none());
        assert_eq!(config.surface_builder().scale(), AxisScale::new(1.0, 1.0, 5.0));
    }

    #[test]
    fn test_missing_height() {
        let config = ReconstructionConfig::from_json(r#"{"width": 3}"#).unwrap();
        assert!(matches!(config.dimensions(), Err(ReconstructionError::DimensionMismatch { width: 3, height: 0, .. })));
    }

    #[test]
    fn test_rejects_unknown_policy() {
        assert!(ReconstructionConfig::from_json(r#"{"truncation": "sometimes"}"#).is_err());
    }
}
