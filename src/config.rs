use crate::error::Result;
use dirs::config_dir;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::debug;

const SYSTEM_CONFIG_PATH: &str = "/etc/hostfacts/config.toml";

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct Config {
    pub dispatch: DispatchConfig,
    pub paths: PathsConfig,
    pub cpu: CpuConfig,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct DispatchConfig {
    /// Worker pool size, 0 means one worker per available core
    pub workers: usize,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PathsConfig {
    pub proc_root: String,
    pub sys_root: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            proc_root: "/proc".to_string(),
            sys_root: "/sys".to_string(),
        }
    }
}

impl PathsConfig {
    pub fn proc_root(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.proc_root).to_string())
    }

    pub fn sys_root(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.sys_root).to_string())
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct CpuConfig {
    pub sample_interval_ms: u64,
}

impl Default for CpuConfig {
    fn default() -> Self {
        CpuConfig { sample_interval_ms: 1000 }
    }
}

/// Locate the config file: user config dir first, then the system-wide one
pub fn config_path() -> Option<PathBuf> {
    let user_config_path = config_dir().map(|p| p.join("hostfacts/config.toml"));

    match user_config_path {
        Some(path) if path.exists() => Some(path),
        _ => {
            let system_path = PathBuf::from(SYSTEM_CONFIG_PATH);
            system_path.exists().then_some(system_path)
        }
    }
}

pub fn parse_config(data: &str) -> Result<Config> {
    Ok(toml::de::from_str(data)?)
}

/// Load the config, falling back to defaults when no file is present
pub fn load_config() -> Result<Config> {
    match config_path() {
        Some(path) => {
            debug!("loading config from {}", path.display());
            let config_data = fs::read_to_string(&path)?;
            parse_config(&config_data)
        }
        None => {
            debug!("no config file found, using defaults");
            Ok(Config::default())
        }
    }
}
