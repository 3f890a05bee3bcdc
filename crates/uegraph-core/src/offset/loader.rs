use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::offset::{EngineLayout, RootOffsets};

fn load_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let content = fs::read_to_string(&path)?;
    let data = serde_json::from_str(&content)?;
    Ok(data)
}

fn save_json<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load root offsets. A file that leaves a root at zero is rejected.
pub fn load_offsets<P: AsRef<Path>>(path: P) -> Result<RootOffsets> {
    let offsets: RootOffsets = load_json(&path)?;
    if !offsets.is_valid() {
        return Err(Error::InvalidOffset(format!(
            "{} names no process or a zero root offset",
            path.as_ref().display()
        )));
    }
    Ok(offsets)
}

pub fn save_offsets<P: AsRef<Path>>(path: P, offsets: &RootOffsets) -> Result<()> {
    save_json(path, offsets)
}

pub fn load_layout<P: AsRef<Path>>(path: P) -> Result<EngineLayout> {
    load_json(path)
}

pub fn save_layout<P: AsRef<Path>>(path: P, layout: &EngineLayout) -> Result<()> {
    save_json(path, layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_offsets_round_trip_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("offsets.json");

        let offsets = RootOffsets {
            version: "2025-06".to_string(),
            world: 0x1234_5678,
            ..Default::default()
        };
        save_offsets(&path, &offsets).unwrap();
        assert_eq!(load_offsets(&path).unwrap(), offsets);
    }

    #[test]
    fn test_layout_file_with_partial_override() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("layout.json");
        fs::write(&path, r#"{ "level": { "actors": 160 } }"#).unwrap();

        let layout = load_layout(&path).unwrap();
        assert_eq!(layout.level.actors, 160);
        assert_eq!(layout.world, EngineLayout::default().world);
    }

    #[test]
    fn test_zero_root_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("offsets.json");
        fs::write(&path, r#"{ "world": 0 }"#).unwrap();

        let err = load_offsets(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidOffset(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_offsets(dir.path().join("nope.json")).unwrap_err();
        assert!(err.is_not_found());
    }
}
