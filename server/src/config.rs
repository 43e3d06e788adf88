//! Configuration loading and validation

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::NetuiError;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default, rename = "calibration")]
    pub calibration: Vec<CalibrationConfig>,
    #[serde(default, rename = "object")]
    pub objects: Vec<ObjectItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the HTTP server
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Directory holding the built dashboard (index.html, wasm, css)
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    /// SQLite calibration history. Defaults to the user data directory.
    #[serde(default)]
    pub database: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            static_dir: default_static_dir(),
            database: None,
        }
    }
}

impl ServerConfig {
    pub fn database_path(&self) -> PathBuf {
        match &self.database {
            Some(path) => path.clone(),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("netui")
                .join("calibration.db"),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("dist")
}

/// Storage type of a calibration entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    #[serde(rename = "i", alias = "int", alias = "integer")]
    Integer,
    #[serde(rename = "d", alias = "double")]
    Double,
}

impl ValueKind {
    pub fn code(self) -> char {
        match self {
            ValueKind::Integer => 'i',
            ValueKind::Double => 'd',
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "i" => Some(ValueKind::Integer),
            "d" => Some(ValueKind::Double),
            _ => None,
        }
    }
}

/// One tunable value exposed for calibration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationConfig {
    #[serde(default)]
    pub domain: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ValueKind,
    /// Value used until a calibration has been committed
    pub value: f64,
    /// Range constraint, e.g. `[0:0.1:10]`
    #[serde(default)]
    pub constraint: Option<String>,
    #[serde(default)]
    pub desc: String,
}

/// A kernel object shown in the object inspector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectItem {
    /// Object class, used for grouping
    pub name: String,
    #[serde(default)]
    pub subname: String,
    pub id: u32,
    #[serde(default)]
    pub parent: Option<u32>,
    /// JSON-encoded description
    #[serde(default)]
    pub desc: String,
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self, NetuiError> {
        let config: Config =
            toml::from_str(text).map_err(|e| NetuiError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), NetuiError> {
        let mut seen = HashSet::new();
        for entry in &self.calibration {
            if entry.name.is_empty() {
                return Err(NetuiError::Config(
                    "Calibration entry with empty name".to_string(),
                ));
            }
            if !seen.insert((entry.domain.as_str(), entry.name.as_str())) {
                return Err(NetuiError::Config(format!(
                    "Duplicate calibration entry {}/{}",
                    entry.domain, entry.name
                )));
            }
        }

        let mut ids = HashSet::new();
        for object in &self.objects {
            if !ids.insert(object.id) {
                return Err(NetuiError::Config(format!(
                    "Duplicate object id {} ({})",
                    object.id, object.name
                )));
            }
        }
        Ok(())
    }
}

/// Load configuration from a TOML file. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<Config, NetuiError> {
    if !path.exists() {
        info!("Config file {:?} not found, using defaults", path);
        return Ok(Config::default());
    }

    let text = std::fs::read_to_string(path)?;
    let config = Config::from_toml(&text)?;
    info!(
        "Loaded config from {:?}: {} calibration entries, {} objects",
        path,
        config.calibration.len(),
        config.objects.len()
    );
    Ok(config)
}
