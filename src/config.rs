use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

/// Production endpoint of the budget grid service on Senior Cloud.
pub const DEFAULT_ENDPOINT: &str = "https://web130.seniorcloud.com.br:30401/\
g5-senior-services/sapiens_Synccom_senior_g5_co_mfi_prj_gerarorcamentofinanceirogrid";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AccessConfig {
    #[serde(default = "default_user")]
    pub user: String,
    /// No default on purpose: comes from the config file or --password.
    #[serde(default)]
    pub password: Option<String>,
    /// codEmp on the wire
    #[serde(default = "default_company")]
    pub company: String,
}

impl Default for AccessConfig {
    fn default() -> Self {
        AccessConfig {
            user: default_user(),
            password: None,
            company: default_company(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ImportConfig {
    /// Rows per service call
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// tipOpe: "0" generates/appends budget entries
    #[serde(default = "default_operation_type")]
    pub operation_type: String,
    /// lctSup: "1" posts amounts to parent accounts as well
    #[serde(default = "default_post_to_parents")]
    pub post_to_parents: String,
    #[serde(default = "default_encryption")]
    pub encryption: String,
    /// recalculaTotalizadores: "S" or "N"
    #[serde(default = "default_recalculate_totals")]
    pub recalculate_totals: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        ImportConfig {
            batch_size: default_batch_size(),
            timeout_secs: default_timeout_secs(),
            operation_type: default_operation_type(),
            post_to_parents: default_post_to_parents(),
            encryption: default_encryption(),
            recalculate_totals: default_recalculate_totals(),
        }
    }
}

fn default_user() -> String {
    "webservice".to_string()
}

fn default_company() -> String {
    "70".to_string()
}

fn default_batch_size() -> usize {
    50
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_operation_type() -> String {
    "0".to_string()
}

fn default_post_to_parents() -> String {
    "1".to_string()
}

fn default_encryption() -> String {
    "0".to_string()
}

fn default_recalculate_totals() -> String {
    "S".to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub access: AccessConfig,
    #[serde(default)]
    pub import: ImportConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("br", "ebafin", "ebafin")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
