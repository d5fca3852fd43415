//! Build profiles: which CSV to read, which map number to stamp, and where
//! the resulting world goes.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::{gravity::DEFAULT_EDGE_INTERACTIVITY, writer::DEFAULT_WORLDS_DIR};

fn default_worlds_dir() -> PathBuf {
    PathBuf::from(DEFAULT_WORLDS_DIR)
}

fn default_edge_interactivity() -> f64 {
    DEFAULT_EDGE_INTERACTIVITY
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildProfile {
    pub name: String,
    pub map: u32,
    pub input: PathBuf,
    #[serde(default = "default_worlds_dir")]
    pub worlds_dir: PathBuf,
    #[serde(default)]
    pub pretty: bool,
    #[serde(default = "default_edge_interactivity")]
    pub edge_interactivity: f64,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl BuildProfile {
    pub fn new(name: impl Into<String>, map: u32, input: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            map,
            input: input.into(),
            worlds_dir: default_worlds_dir(),
            pretty: false,
            edge_interactivity: default_edge_interactivity(),
            logging: LoggingConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("profile must define a non-empty name");
        }
        if self.name.contains(|c: char| c == '/' || c == '\\') {
            bail!("profile name '{}' must not contain path separators", self.name);
        }
        if !self.edge_interactivity.is_finite() || self.edge_interactivity < 0.0 {
            bail!(
                "edge_interactivity must be a non-negative number, got {}",
                self.edge_interactivity
            );
        }
        Ok(())
    }

    /// Resolve relative input and output paths against `base`.
    pub fn rooted_at(mut self, base: &Path) -> Self {
        if self.input.is_relative() {
            self.input = base.join(&self.input);
        }
        if self.worlds_dir.is_relative() {
            self.worlds_dir = base.join(&self.worlds_dir);
        }
        self
    }
}

pub struct ProfileLoader {
    base_dir: PathBuf,
}

impl ProfileLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<BuildProfile> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read profile {}", path.display()))?;
        let profile: BuildProfile = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        profile
            .validate()
            .with_context(|| format!("Invalid profile {}", path.display()))?;
        Ok(profile.rooted_at(&self.base_dir))
    }
}
