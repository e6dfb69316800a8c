//! Map inventory.
//!
//! Maps are regular files named `<mapName>.bsp` inside the configured map
//! directory. Existence checks compare directory entries against the exact
//! expected filename, so lookalike names or path fragments never match.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use mockall::automock;

/// File extension of playable maps.
const MAP_EXTENSION: &str = ".bsp";

/// Answers existence and listing queries over the map directory.
#[automock]
pub trait MapInventory {
    /// Returns `true` if a map with this exact name exists.
    fn map_exists(&self, map_name: &str) -> bool;

    /// Returns the map filenames, sorted.
    fn list_maps(&self) -> Vec<String>;
}

/// Map inventory backed by a directory on disk.
pub struct MapDir {
    dir: PathBuf,
}

impl MapDir {
    /// Creates an inventory over the given directory.
    ///
    /// The directory is read on every query; an unreadable directory just
    /// behaves as an empty one.
    pub fn new(dir: &Path) -> Self {
        MapDir { dir: dir.to_owned() }
    }

    /// Runs `f` over the names of the regular files in the map directory.
    fn scan_files(&self, mut f: impl FnMut(&str)) {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("failed to read map directory {}: {}", self.dir.display(), e);
                return;
            }
        };

        for entry in entries.flatten() {
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if !is_file {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                f(name);
            }
        }
    }
}

impl MapInventory for MapDir {
    fn map_exists(&self, map_name: &str) -> bool {
        let expected = format!("{}{}", map_name, MAP_EXTENSION);
        let mut found = false;
        self.scan_files(|name| {
            if name == expected {
                found = true;
            }
        });
        found
    }

    fn list_maps(&self) -> Vec<String> {
        let mut maps = Vec::new();
        self.scan_files(|name| {
            if name.ends_with(MAP_EXTENSION) {
                maps.push(name.to_owned());
            }
        });
        maps.sort();
        maps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_map_dir(files: &[&str], subdirs: &[&str]) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        for file in files {
            fs::write(temp_dir.path().join(file), b"").unwrap();
        }
        for subdir in subdirs {
            fs::create_dir(temp_dir.path().join(subdir)).unwrap();
        }
        temp_dir
    }

    #[test]
    fn test_map_exists() {
        let temp_dir = create_map_dir(&["de_dust2.bsp", "cs_assault.bsp"], &[]);
        let maps = MapDir::new(temp_dir.path());

        assert!(maps.map_exists("de_dust2"));
        assert!(maps.map_exists("cs_assault"));
        assert!(!maps.map_exists("de_inferno"));
    }

    #[test]
    fn test_map_exists_is_case_sensitive() {
        let temp_dir = create_map_dir(&["de_dust2.bsp"], &[]);
        let maps = MapDir::new(temp_dir.path());

        assert!(!maps.map_exists("De_Dust2"));
        assert!(!maps.map_exists("DE_DUST2"));
    }

    #[test]
    fn test_map_exists_requires_bsp_file() {
        let temp_dir = create_map_dir(&["readme.txt", "de_dust2.bsp.bak"], &[]);
        let maps = MapDir::new(temp_dir.path());

        assert!(!maps.map_exists("readme"));
        assert!(!maps.map_exists("readme.txt"));
        assert!(!maps.map_exists("de_dust2"));
    }

    #[test]
    fn test_map_exists_ignores_directories() {
        let temp_dir = create_map_dir(&[], &["de_dust2.bsp"]);
        let maps = MapDir::new(temp_dir.path());

        assert!(!maps.map_exists("de_dust2"));
    }

    #[test]
    fn test_map_exists_rejects_path_fragments() {
        let temp_dir = create_map_dir(&["de_dust2.bsp"], &[]);
        let maps = MapDir::new(temp_dir.path());

        assert!(!maps.map_exists("../de_dust2"));
        assert!(!maps.map_exists("./de_dust2"));
    }

    #[test]
    fn test_map_exists_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let maps = MapDir::new(&temp_dir.path().join("nonexistent"));

        assert!(!maps.map_exists("de_dust2"));
    }

    #[test]
    fn test_list_maps_sorted() {
        let temp_dir = create_map_dir(&["de_dust2.bsp", "cs_assault.bsp", "de_aztec.bsp"], &[]);
        let maps = MapDir::new(temp_dir.path());

        assert_eq!(maps.list_maps(), vec!["cs_assault.bsp", "de_aztec.bsp", "de_dust2.bsp"]);
    }

    #[test]
    fn test_list_maps_skips_other_files_and_directories() {
        let temp_dir = create_map_dir(&["de_dust2.bsp", "server.cfg", "motd.txt"], &["backups"]);
        let maps = MapDir::new(temp_dir.path());

        assert_eq!(maps.list_maps(), vec!["de_dust2.bsp"]);
    }

    #[test]
    fn test_list_maps_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let maps = MapDir::new(temp_dir.path());

        assert!(maps.list_maps().is_empty());
    }

    #[test]
    fn test_list_maps_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let maps = MapDir::new(&temp_dir.path().join("nonexistent"));

        assert!(maps.list_maps().is_empty());
    }
}
