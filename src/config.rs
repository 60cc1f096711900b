//! Renderer configuration
//!
//! Settings are persisted with `confy` in the OS-specific config directory and
//! describe which renderer to use and how it is set up.

use crate::constant::{
    APP_NAME, DEFAULT_DELETE_BRACKETS, DEFAULT_INSERT_BRACKETS, DEFAULT_SEPARATOR,
};
use crate::renderer::{InlineMarkedRenderer, LineStackedRenderer, Renderer, RendererKind};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Confy(#[from] confy::ConfyError),
}

pub struct Config {
    pub settings: Settings,
}

impl Config {
    /// Load configuration from disk, creating default if it doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        let settings: Settings = confy::load(APP_NAME, None)?;
        info!("Load config from {:?}", Self::config_path()?);
        Ok(Self { settings })
    }

    /// Save current configuration to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, None, &self.settings)?;
        info!("Save config to {:?}", Self::config_path()?);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(confy::get_configuration_file_path(APP_NAME, None)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Falling back to default settings: {}", e);
            Self {
                settings: Settings::default(),
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Rendering strategy
    pub renderer: RendererKind,

    /// Separator between the left and right columns
    pub separator: String,

    /// Show a replaced line without intraline cue as unchanged;
    /// when absent the renderer's own default applies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark_unchanged: Option<bool>,

    /// Brackets around inserted spans (inline-marked renderer only)
    pub insert_brackets: (String, String),

    /// Brackets around deleted spans (inline-marked renderer only)
    pub delete_brackets: (String, String),
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            renderer: RendererKind::default(),
            separator: DEFAULT_SEPARATOR.to_string(),
            mark_unchanged: None,
            insert_brackets: (
                DEFAULT_INSERT_BRACKETS.0.to_string(),
                DEFAULT_INSERT_BRACKETS.1.to_string(),
            ),
            delete_brackets: (
                DEFAULT_DELETE_BRACKETS.0.to_string(),
                DEFAULT_DELETE_BRACKETS.1.to_string(),
            ),
        }
    }
}

impl Settings {
    /// Build the configured renderer
    pub fn build_renderer(&self) -> Box<dyn Renderer> {
        self.build_renderer_of(self.renderer)
    }

    /// Build a renderer of the given kind, sharing the remaining settings
    pub fn build_renderer_of(&self, kind: RendererKind) -> Box<dyn Renderer> {
        let mark_unchanged = self
            .mark_unchanged
            .unwrap_or_else(|| kind.default_mark_unchanged());
        let sep = self.separator.clone();
        match kind {
            RendererKind::LineStacked => Box::new(LineStackedRenderer::new(sep, mark_unchanged)),
            RendererKind::InlineMarked => {
                let renderer = InlineMarkedRenderer::new(sep, mark_unchanged)
                    .with_brackets(self.insert_brackets.clone(), self.delete_brackets.clone());
                Box::new(renderer)
            }
        }
    }
}
