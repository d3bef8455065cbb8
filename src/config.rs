use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Delegate class every service task is routed through by default.
pub const DEFAULT_SERVICE_DELEGATE: &str = "com.brs.activiti.service.delegate.RpaTaskDelegate";

/// How service task implementations from the editor are treated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum ServiceDelegatePolicy {
    /// Every service task runs `class_name`, whatever the editor says.
    #[serde(rename_all = "camelCase")]
    Override { class_name: String },
    /// Keep the class or expression chosen in the editor.
    Preserve,
}

impl Default for ServiceDelegatePolicy {
    fn default() -> Self {
        ServiceDelegatePolicy::Override {
            class_name: DEFAULT_SERVICE_DELEGATE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConverterConfig {
    pub service_delegate: ServiceDelegatePolicy,
    /// Extra stencil ids routed through a built-in converter, as `custom -> built-in`.
    pub stencil_aliases: Vec<(String, String)>,
}

impl ConverterConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        log::debug!("Loaded converter config from {}", path.display());
        Self::from_json_str(&json)
    }
}
