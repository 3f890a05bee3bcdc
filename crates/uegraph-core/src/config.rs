//! `key=value` configuration file.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Settings read from `config.cfg`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub screen_width: i32,
    pub screen_height: i32,
    pub example_bool: bool,
    pub example_float: f32,
    pub example_int: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: 1920,
            screen_height: 1080,
            example_bool: false,
            example_float: 10.0,
            example_int: 2,
        }
    }
}

impl Config {
    /// Load from `path`. A missing file is an error; bad values are not.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Parse file content over the defaults.
    ///
    /// Lines without `=` and unknown keys are skipped. A value that does not
    /// parse leaves the default in place.
    pub fn parse(content: &str) -> Self {
        let mut config = Self::default();

        for line in content.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim());

            match key {
                "screenWidth" => set(&mut config.screen_width, key, value),
                "screenHeight" => set(&mut config.screen_height, key, value),
                "ExampleBool" => config.example_bool = value == "1",
                "ExampleFloat" => set(&mut config.example_float, key, value),
                "ExampleInt" => set(&mut config.example_int, key, value),
                _ => debug!("Ignoring unknown config key {}", key),
            }
        }

        config
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_string())?;
        Ok(())
    }
}

fn set<T: FromStr>(slot: &mut T, key: &str, value: &str) {
    match value.parse() {
        Ok(parsed) => *slot = parsed,
        Err(_) => {
            let err = Error::InvalidConfigValue {
                key: key.to_string(),
                value: value.to_string(),
            };
            warn!("{}, keeping default", err);
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "screenWidth={}", self.screen_width)?;
        writeln!(f, "screenHeight={}", self.screen_height)?;
        writeln!(f, "ExampleBool={}", u8::from(self.example_bool))?;
        writeln!(f, "ExampleFloat={}", self.example_float)?;
        writeln!(f, "ExampleInt={}", self.example_int)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.screen_width, 1920);
        assert_eq!(config.screen_height, 1080);
        assert!(!config.example_bool);
        assert_eq!(config.example_float, 10.0);
        assert_eq!(config.example_int, 2);
    }

    #[test]
    fn test_parse_overrides() {
        let config = Config::parse(
            "screenWidth=2560\nscreenHeight = 1440\nExampleBool=1\nExampleFloat=2.5\nExampleInt=7\n",
        );
        assert_eq!(config.screen_width, 2560);
        assert_eq!(config.screen_height, 1440);
        assert!(config.example_bool);
        assert_eq!(config.example_float, 2.5);
        assert_eq!(config.example_int, 7);
    }

    #[test]
    fn test_bool_only_one_is_true() {
        assert!(!Config::parse("ExampleBool=true").example_bool);
        assert!(!Config::parse("ExampleBool=0").example_bool);
    }

    #[test]
    fn test_bad_lines_are_skipped() {
        let config = Config::parse("# comment\nscreenWidth\nunknown=3\nscreenHeight=abc\n");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = Config::load(dir.path().join("config.cfg")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.cfg");

        let config = Config {
            screen_width: 1280,
            example_bool: true,
            example_float: 0.5,
            ..Config::default()
        };
        config.save(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("ExampleBool=1"));
        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
