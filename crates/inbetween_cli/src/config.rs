//! Demo configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level configuration (inbetween.toml)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct InbetweenConfig {
    #[serde(default)]
    pub demo: DemoConfig,
    #[serde(default)]
    pub canvas: CanvasConfig,
}

/// Console demo parameters
#[derive(Debug, Deserialize, Serialize)]
pub struct DemoConfig {
    /// Span of the easing and multi demos
    #[serde(default = "default_steps")]
    pub steps: u32,
    /// Span of the loop and yoyo demos
    #[serde(default = "default_cycle_steps")]
    pub cycle_steps: u32,
    /// Columns used by the easing plot
    #[serde(default = "default_plot_width")]
    pub plot_width: u32,
    /// End value of the single-segment demos
    #[serde(default = "default_target")]
    pub target: i32,
    /// Frames driven by the loop, yoyo and path demos
    #[serde(default = "default_frames")]
    pub frames: u32,
}

fn default_steps() -> u32 {
    100
}

fn default_cycle_steps() -> u32 {
    5
}

fn default_plot_width() -> u32 {
    100
}

fn default_target() -> i32 {
    100
}

fn default_frames() -> u32 {
    60
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            cycle_steps: default_cycle_steps(),
            plot_width: default_plot_width(),
            target: default_target(),
            frames: default_frames(),
        }
    }
}

/// Canvas the path demo moves across
#[derive(Debug, Deserialize, Serialize)]
pub struct CanvasConfig {
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
}

fn default_width() -> i32 {
    640
}

fn default_height() -> i32 {
    480
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl InbetweenConfig {
    /// Load configuration from a TOML file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: InbetweenConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        tracing::info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_path() {
        let config = InbetweenConfig::load(None).unwrap();
        assert_eq!(config.demo.steps, 100);
        assert_eq!(config.demo.cycle_steps, 5);
        assert_eq!(config.demo.frames, 60);
        assert_eq!(config.canvas.width, 640);
        assert_eq!(config.canvas.height, 480);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: InbetweenConfig = toml::from_str("[demo]\nsteps = 10\n").unwrap();
        assert_eq!(config.demo.steps, 10);
        assert_eq!(config.demo.target, 100);
        assert_eq!(config.canvas.width, 640);
    }

    #[test]
    fn test_load_round_trip_through_file() {
        let path = std::env::temp_dir()
            .join(format!("inbetween-config-{}.toml", std::process::id()));
        let mut config = InbetweenConfig::default();
        config.canvas.width = 320;
        fs::write(&path, config.to_toml().unwrap()).unwrap();

        let loaded = InbetweenConfig::load(Some(path.as_path())).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(loaded.canvas.width, 320);
    }

    #[test]
    fn test_missing_file_has_context() {
        let missing = Path::new("/nonexistent/inbetween.toml");
        let err = InbetweenConfig::load(Some(missing)).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_invalid_file_has_context() {
        let path = std::env::temp_dir().join(format!("inbetween-bad-{}.toml", std::process::id()));
        fs::write(&path, "[demo]\nsteps = \"many\"\n").unwrap();
        let err = InbetweenConfig::load(Some(path.as_path())).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
