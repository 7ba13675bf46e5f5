// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::Fallible;

pub const CONFIG_FILE: &str = "flashdeck.toml";

const DEFAULT_DATABASE: &str = "flashdeck.db";

/// Settings read from `flashdeck.toml`. Every key is optional.
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path to the SQLite database. Relative paths are resolved against the
    /// directory containing the config file.
    database: Option<PathBuf>,
    #[serde(skip)]
    base: PathBuf,
}

impl Config {
    /// Load the config file from `directory`, if there is one.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE);
        let mut config = if path.exists() {
            log::debug!("Reading config from {}", path.display());
            Self::parse(&read_to_string(&path)?)?
        } else {
            Self::default()
        };
        config.base = directory.to_path_buf();
        Ok(config)
    }

    fn parse(contents: &str) -> Fallible<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// The database to use. A path given on the command line wins.
    pub fn database_path(&self, cli_override: Option<PathBuf>) -> PathBuf {
        if let Some(path) = cli_override {
            return path;
        }
        match &self.database {
            Some(path) => self.base.join(path),
            None => self.base.join(DEFAULT_DATABASE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::write_tmp_file;

    #[test]
    fn test_no_config_file() -> Fallible<()> {
        let dir = tempfile::tempdir()?;
        let config = Config::load(dir.path())?;
        assert_eq!(config.database_path(None), dir.path().join("flashdeck.db"));
        Ok(())
    }

    #[test]
    fn test_database_from_file() -> Fallible<()> {
        let (dir, _) = write_tmp_file(CONFIG_FILE, "database = \"data/decks.db\"\n")?;
        let config = Config::load(dir.path())?;
        assert_eq!(config.database_path(None), dir.path().join("data/decks.db"));
        Ok(())
    }

    #[test]
    fn test_cli_override() -> Fallible<()> {
        let (dir, _) = write_tmp_file(CONFIG_FILE, "database = \"data/decks.db\"\n")?;
        let config = Config::load(dir.path())?;
        let path = config.database_path(Some(PathBuf::from("/tmp/other.db")));
        assert_eq!(path, PathBuf::from("/tmp/other.db"));
        Ok(())
    }

    #[test]
    fn test_unknown_key() {
        assert!(Config::parse("colour = \"blue\"\n").is_err());
    }
}
