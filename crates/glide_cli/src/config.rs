//! Glide configuration file handling

use anyhow::{Context, Result};
use glide_animation::{AnimatorConfig, Easing};
use glide_core::{ScrollView, Size};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "glide.toml";

/// Top-level Glide configuration (glide.toml)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GlideConfig {
    #[serde(default)]
    pub animation: AnimatorConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

/// The simulated list the demo scrolls
#[derive(Debug, Deserialize, Serialize)]
pub struct DemoConfig {
    #[serde(default = "default_rows")]
    pub rows: usize,
    #[serde(default = "default_row_height")]
    pub row_height: f32,
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f32,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f32,
    /// Vertical offset the demo scrolls to
    #[serde(default = "default_scroll_to")]
    pub scroll_to: f32,
}

fn default_rows() -> usize {
    100
}

fn default_row_height() -> f32 {
    44.0
}

fn default_viewport_width() -> f32 {
    375.0
}

fn default_viewport_height() -> f32 {
    667.0
}

fn default_scroll_to() -> f32 {
    500.0
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            row_height: default_row_height(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            scroll_to: default_scroll_to(),
        }
    }
}

impl DemoConfig {
    pub fn scroll_view(&self) -> ScrollView {
        ScrollView::new(
            Size::new(self.viewport_width, self.viewport_height),
            self.rows,
            self.row_height,
        )
    }
}

impl GlideConfig {
    /// Load configuration
    ///
    /// An explicit path must exist. Without one, `glide.toml` in the current
    /// directory is used if present, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) if path.is_dir() => path.join(CONFIG_FILE),
            Some(path) => path.to_path_buf(),
            None => {
                let local = PathBuf::from(CONFIG_FILE);
                if !local.exists() {
                    tracing::debug!("No {} found, using defaults", CONFIG_FILE);
                    return Ok(Self::default());
                }
                local
            }
        };

        if !config_path.exists() {
            anyhow::bail!(
                "No config found at {}. Run `glide init` to create one.",
                config_path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: GlideConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        config
            .animation
            .validate()
            .with_context(|| format!("Invalid [animation] in {}", config_path.display()))?;

        Ok(config)
    }

    /// Configuration written by `glide init`
    pub fn starter() -> Self {
        Self {
            animation: AnimatorConfig {
                default_easing: Easing::SineInOut,
                ..AnimatorConfig::default()
            },
            demo: DemoConfig::default(),
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
