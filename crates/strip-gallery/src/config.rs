use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::engine::{EngineSettings, InertiaConfig, Timing};
use crate::viewport::ViewportConfig;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "strip-gallery";

const VALID_KEYS: &str = "timing.gallery_animation_ms, timing.fade_ms, timing.close_start_delay_ms, \
    timing.navigate_fade_ms, timing.resize_debounce_ms, viewport.breakpoint, \
    inertia.swipe_threshold, inertia.velocity_threshold, inertia.friction, \
    inertia.min_velocity, inertia.strip_width, inertia.frame_ms, catalog";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timing: Timing,

    #[serde(default)]
    pub viewport: ViewportConfig,

    #[serde(default)]
    pub inertia: InertiaConfig,

    /// Catalog file to show instead of the built-in set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `strip-gallery config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(contents)?;
        config
            .inertia
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid inertia settings: {e}"))?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("Using default config: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# strip-gallery configuration\n{yaml}");
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn settings(&self) -> EngineSettings {
        EngineSettings {
            timing: self.timing,
            viewport: self.viewport,
            inertia: self.inertia,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "timing.gallery_animation_ms" => self.timing.gallery_animation_ms = parse_ms(key, value)?,
            "timing.fade_ms" => self.timing.fade_ms = parse_ms(key, value)?,
            "timing.close_start_delay_ms" => self.timing.close_start_delay_ms = parse_ms(key, value)?,
            "timing.navigate_fade_ms" => self.timing.navigate_fade_ms = parse_ms(key, value)?,
            "timing.resize_debounce_ms" => self.timing.resize_debounce_ms = parse_ms(key, value)?,
            "viewport.breakpoint" => self.viewport.breakpoint = parse_positive(key, value)? as f32,
            "inertia.swipe_threshold" => self.inertia.swipe_threshold = parse_positive(key, value)?,
            "inertia.velocity_threshold" => {
                self.inertia.velocity_threshold = parse_positive(key, value)?
            }
            "inertia.friction" => {
                let friction = parse_positive(key, value)?;
                if friction >= 1.0 {
                    anyhow::bail!("Invalid inertia.friction: {value}. Must be between 0 and 1.");
                }
                self.inertia.friction = friction;
            }
            "inertia.min_velocity" => self.inertia.min_velocity = parse_positive(key, value)?,
            "inertia.strip_width" => self.inertia.strip_width = parse_positive(key, value)?,
            "inertia.frame_ms" => {
                let frame = parse_ms(key, value)?;
                if frame == 0 {
                    anyhow::bail!("Invalid inertia.frame_ms: {value}. Must be at least 1.");
                }
                self.inertia.frame_ms = frame;
            }
            "catalog" => {
                self.catalog = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            _ => anyhow::bail!("Unknown config key: {key}. Valid keys: {VALID_KEYS}"),
        }
        Ok(())
    }
}

fn parse_ms(key: &str, value: &str) -> Result<u64> {
    value
        .parse::<u64>()
        .map_err(|_| anyhow::anyhow!("Invalid {key}: {value}. Must be a whole number of milliseconds."))
}

fn parse_positive(key: &str, value: &str) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => anyhow::bail!("Invalid {key}: {value}. Must be a positive number."),
    }
}
