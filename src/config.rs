use std::path::Path;

use anyhow::Context as _;

use crate::{
    animation::ease::Ease,
    foundation::{
        core::{Point, Viewbox},
        error::{GrowError, GrowResult},
    },
    model::{builtin, story::Story, tree::FileNode},
};

/// Stage geometry and timing; every field has a default reproducing the stock illustration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub viewbox: Viewbox,
    /// Distance from the bottom of the viewbox to the trunk base.
    pub base_inset: f64,
    /// Root child drawn as the trunk.
    pub trunk_id: String,
    pub trunk_length: f64,
    /// Length of the root's other children, drawn from the base.
    pub offshoot_length: f64,
    /// Absolute angle of the offshoots, alternating left then right.
    pub offshoot_angle: f64,
    /// Seed for the per-node wobble and root jitter.
    pub seed: u64,
    /// Disables wobble and jitter entirely.
    pub organic: bool,
    pub fps: u32,
    /// Host viewport the stage starts with, in CSS pixels.
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Viewports narrower than this render the stacked card fallback.
    pub narrow_breakpoint: f64,
    /// Easing of the info panel cross-fade.
    pub panel_ease: Ease,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            viewbox: Viewbox::default(),
            base_inset: 80.0,
            trunk_id: "src".to_string(),
            trunk_length: 140.0,
            offshoot_length: 50.0,
            offshoot_angle: 120.0,
            seed: 0,
            organic: true,
            fps: 60,
            viewport_width: 1440.0,
            viewport_height: 900.0,
            narrow_breakpoint: 1024.0,
            panel_ease: Ease::InOutQuad,
        }
    }
}

impl StageConfig {
    pub fn from_json_str(s: &str) -> GrowResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> GrowResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read stage config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> GrowResult<()> {
        self.viewbox.validate()?;
        if !(0.0..self.viewbox.height).contains(&self.base_inset) {
            return Err(GrowError::validation(
                "base_inset must lie inside the viewbox height",
            ));
        }
        if self.trunk_id.trim().is_empty() {
            return Err(GrowError::validation("trunk_id must be non-empty"));
        }
        for (name, v) in [
            ("trunk_length", self.trunk_length),
            ("offshoot_length", self.offshoot_length),
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(GrowError::validation(format!("{name} must be > 0")));
            }
        }
        if !self.offshoot_angle.is_finite() {
            return Err(GrowError::validation("offshoot_angle must be finite"));
        }
        if self.fps == 0 {
            return Err(GrowError::validation("fps must be > 0"));
        }
        Ok(())
    }

    /// Trunk base: horizontally centred, `base_inset` above the bottom edge.
    pub fn base_point(&self) -> Point {
        Point::new(
            self.viewbox.width / 2.0,
            self.viewbox.height - self.base_inset,
        )
    }

    pub fn frame_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / f64::from(self.fps.max(1)))
    }
}

/// Tree and story a stage is built from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneInputs {
    pub tree: FileNode,
    pub story: Story,
}

impl SceneInputs {
    /// The stock project tree and story.
    pub fn builtin() -> Self {
        Self {
            tree: builtin::file_tree().clone(),
            story: builtin::story().clone(),
        }
    }

    pub fn from_json_str(s: &str) -> GrowResult<Self> {
        let inputs: Self = serde_json::from_str(s)?;
        inputs.tree.validate()?;
        Ok(inputs)
    }

    pub fn load(path: &Path) -> GrowResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read scene inputs '{}'", path.display()))?;
        Self::from_json_str(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate_and_place_base() {
        let cfg = StageConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.base_point(), Point::new(400.0, 520.0));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = StageConfig::from_json_str(r#"{"seed": 9, "trunk_length": 200}"#).unwrap();
        assert_eq!(cfg.seed, 9);
        assert_eq!(cfg.trunk_length, 200.0);
        assert_eq!(cfg.trunk_id, "src");
        assert_eq!(cfg.fps, 60);
        assert_eq!((cfg.viewport_width, cfg.viewport_height), (1440.0, 900.0));
        assert_eq!(cfg.panel_ease, Ease::InOutQuad);
    }

    #[test]
    fn viewport_and_panel_ease_from_json() {
        let cfg = StageConfig::from_json_str(
            r#"{"viewport_width": 800, "viewport_height": 1200, "panel_ease": "linear"}"#,
        )
        .unwrap();
        assert_eq!((cfg.viewport_width, cfg.viewport_height), (800.0, 1200.0));
        assert_eq!(cfg.panel_ease, Ease::Linear);
        assert!(StageConfig::from_json_str(r#"{"viewport_height": 0}"#).is_err());
        assert!(StageConfig::from_json_str(r#"{"panel_ease": "bounce"}"#).is_err());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(StageConfig::from_json_str(r#"{"trunk_length": -1}"#).is_err());
        assert!(StageConfig::from_json_str(r#"{"fps": 0}"#).is_err());
        assert!(StageConfig::from_json_str(r#"{"base_inset": 900}"#).is_err());
        assert!(StageConfig::from_json_str(r#"{"trunk_id": ""}"#).is_err());
        assert!(StageConfig::from_json_str("not json").is_err());
    }

    #[test]
    fn scene_inputs_roundtrip_json() {
        let inputs = SceneInputs::builtin();
        let s = serde_json::to_string(&inputs).unwrap();
        let back = SceneInputs::from_json_str(&s).unwrap();
        assert_eq!(back, inputs);
    }
}
