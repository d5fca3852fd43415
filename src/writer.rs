//! Writing world documents to disk and reading them back.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{
    error::{Result, WorldError},
    world::WorldDocument,
};

pub const DEFAULT_WORLDS_DIR: &str = "WorldFiles";

pub struct WorldWriter {
    worlds_dir: PathBuf,
    pretty: bool,
}

impl WorldWriter {
    pub fn new(worlds_dir: impl AsRef<Path>) -> Self {
        Self {
            worlds_dir: worlds_dir.as_ref().to_path_buf(),
            pretty: false,
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.worlds_dir.join(format!("{name}.json"))
    }

    /// Nothing is written unless serialization succeeds.
    pub fn write(&self, name: &str, world: &WorldDocument) -> Result<PathBuf> {
        let json = if self.pretty {
            serde_json::to_string_pretty(world)?
        } else {
            serde_json::to_string(world)?
        };
        fs::create_dir_all(&self.worlds_dir)
            .map_err(|err| WorldError::io(&self.worlds_dir, err))?;
        let path = self.path_for(name);
        fs::write(&path, json).map_err(|err| WorldError::io(&path, err))?;
        info!(path = %path.display(), "world written");
        Ok(path)
    }
}

pub fn load_world(path: impl AsRef<Path>) -> Result<WorldDocument> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|err| WorldError::io(path, err))?;
    Ok(serde_json::from_str(&data)?)
}
