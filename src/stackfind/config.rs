use crate::error::{FindError, Result};
use crate::find::FindMode;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const HOME_ENV: &str = "STACKFIND_HOME";
const DEFAULT_STEP_BUDGET: usize = 1_000_000;
const DEFAULT_CONTEXT_WIDTH: usize = 60;

/// Configuration for stackfind, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FindConfig {
    /// Mode used when `find` is not given `--mode`
    #[serde(default)]
    pub default_mode: FindMode,

    /// Steps a single run may take before the search is reported as paused
    #[serde(default = "default_step_budget")]
    pub step_budget: usize,

    /// Display width of the context snippet printed around a match
    #[serde(default = "default_context_width")]
    pub context_width: usize,
}

fn default_step_budget() -> usize {
    DEFAULT_STEP_BUDGET
}

fn default_context_width() -> usize {
    DEFAULT_CONTEXT_WIDTH
}

impl Default for FindConfig {
    fn default() -> Self {
        Self {
            default_mode: FindMode::default(),
            step_budget: DEFAULT_STEP_BUDGET,
            context_width: DEFAULT_CONTEXT_WIDTH,
        }
    }
}

impl FindConfig {
    pub const KEYS: [&'static str; 3] = ["default-mode", "step-budget", "context-width"];

    /// `$STACKFIND_HOME` if set, else the platform data dir.
    pub fn default_dir() -> Result<PathBuf> {
        if let Some(home) = std::env::var_os(HOME_ENV) {
            return Ok(PathBuf::from(home));
        }
        ProjectDirs::from("com", "stackfind", "stackfind")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| FindError::Store("Could not determine config dir".to_string()))
    }

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: FindConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match normalize_key(key).as_str() {
            "default-mode" => Some(self.default_mode.to_string()),
            "step-budget" => Some(self.step_budget.to_string()),
            "context-width" => Some(self.context_width.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match normalize_key(key).as_str() {
            "default-mode" => self.default_mode = value.parse()?,
            "step-budget" => self.step_budget = parse_positive(key, value)?,
            "context-width" => self.context_width = parse_positive(key, value)?,
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    /// All keys with their current values, in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        Self::KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|v| (*key, v)))
            .collect()
    }
}

/// `step_budget` and `step-budget` name the same key.
fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase().replace('_', "-")
}

fn parse_positive(key: &str, value: &str) -> std::result::Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("{} must be a positive integer, got '{}'", key, value)),
    }
}
