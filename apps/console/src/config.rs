use std::path::Path;

use serde::Deserialize;
use tracing::info;

use qd_client::DEFAULT_BASE_URL;
use qd_core::{UploadParams, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
use qd_error::{QdError, Result};

use crate::render::Renderer;
use crate::views::ViewSettings;

pub const DEFAULT_CONFIG_PATH: &str = "configs/default.yaml";
pub const BASE_URL_ENV: &str = "API_BASE_URL";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiCfg,
    pub upload: UploadCfg,
    pub ui: UiCfg,
    pub log: LogCfg,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiCfg {
    pub base_url: String,
}

impl Default for ApiCfg {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadCfg {
    pub default_chunk_size: u32,
    pub default_chunk_overlap: u32,
}

impl Default for UploadCfg {
    fn default() -> Self {
        Self {
            default_chunk_size: DEFAULT_CHUNK_SIZE,
            default_chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiCfg {
    pub exceptions_height: usize,
    pub wrap_width: usize,
    pub expand_all: bool,
}

impl Default for UiCfg {
    fn default() -> Self {
        Self {
            exceptions_height: 40,
            wrap_width: 100,
            expand_all: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogCfg {
    pub level: String,
}

impl Default for LogCfg {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(s)?)
    }

    /// Reads `path`. A missing file falls back to defaults unless the path was
    /// given explicitly.
    pub fn load(path: &Path, explicit: bool) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(s) => {
                let cfg = Self::from_yaml_str(&s)?;
                info!(path = %path.display(), "config loaded");
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !explicit => Ok(Self::default()),
            Err(e) => Err(QdError::Configuration {
                key: path.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Flag beats environment beats file.
    pub fn apply_overrides(&mut self, env_base_url: Option<String>, flag_base_url: Option<String>) {
        if let Some(url) = flag_base_url.or(env_base_url).filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
    }

    pub fn validate(&self) -> Result<()> {
        let url = &self.api.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(QdError::Configuration {
                key: "api.base_url".to_string(),
                reason: format!("expected an http(s) URL, got `{url}`"),
            });
        }
        UploadParams::new(
            self.upload.default_chunk_size,
            self.upload.default_chunk_overlap,
            "",
        )
        .map_err(|e| QdError::Configuration {
            key: "upload".to_string(),
            reason: e.to_string(),
        })?;
        if self.ui.exceptions_height == 0 {
            return Err(QdError::Configuration {
                key: "ui.exceptions_height".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn view_settings(&self) -> ViewSettings {
        ViewSettings {
            default_chunk_size: self.upload.default_chunk_size,
            default_chunk_overlap: self.upload.default_chunk_overlap,
            exceptions_height: self.ui.exceptions_height,
        }
    }

    pub fn renderer(&self) -> Renderer {
        Renderer {
            wrap_width: self.ui.wrap_width,
            expand_all: self.ui.expand_all,
        }
    }
}
