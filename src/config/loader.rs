use std::fs;
use std::path::{Path, PathBuf};

use super::TallycmpConfig;
use crate::errors::{Error, Result};

/// File name searched for in the working directory and its ancestors
pub const CONFIG_FILE_NAME: &str = ".tallycmp.toml";

/// Number of directories inspected, starting with the working directory
pub const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to parse a configuration from TOML text
pub fn parse_config(contents: &str) -> Result<TallycmpConfig> {
    toml::from_str::<TallycmpConfig>(contents)
        .map_err(|e| Error::Configuration(format!("Failed to parse {CONFIG_FILE_NAME}: {e}")))
}

/// Load an explicitly requested configuration file.
///
/// Unlike discovery, a missing or malformed file is an error here.
pub fn load_config_from(path: &Path) -> Result<TallycmpConfig> {
    let contents = fs::read_to_string(path)?;
    let config = parse_config(&contents)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

fn try_load_config_from_path(config_path: &Path) -> Option<TallycmpConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            // Only log actual errors, not "file not found"
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("Failed to read config file {}: {}", config_path.display(), e);
            }
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Discover the nearest `.tallycmp.toml` starting from `start`.
///
/// Unreadable or malformed files are logged and skipped; if nothing usable
/// is found the default configuration is returned.
pub fn load_config(start: PathBuf) -> TallycmpConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            TallycmpConfig::default()
        })
}
