//! Registry configuration
//!
//! 同じ設定から構築したレジストリ同士は同じタグ割り当てになるため、
//! producer と consumer で 1 つの設定ファイルを共有します。
//!
//! ```json
//! {
//!   "allow_default_codec": true,
//!   "fallback_classes": ["demo.Color", "demo.shapes.Circle"]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// 明示 codec が無い型を fallback で扱うか
    #[serde(default = "default_allow")]
    pub allow_default_codec: bool,
    /// fallback codec の対象になる class 名
    #[serde(default)]
    pub fallback_classes: Vec<String>,
}

fn default_allow() -> bool {
    true
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            allow_default_codec: default_allow(),
            fallback_classes: Vec::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

impl RegistryConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}
