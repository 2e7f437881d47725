use crate::config::{TallycmpConfig, CONFIG_FILE_NAME};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Write a default configuration file into `dir`, returning its path.
pub fn init_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let body = toml::to_string_pretty(&TallycmpConfig::with_defaults())
        .context("Failed to render default configuration")?;
    let contents = format!("# tallycmp configuration\n\n{body}");
    fs::write(&config_path, contents)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from;
    use tempfile::TempDir;

    #[test]
    fn test_init_round_trips_and_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = init_config(dir.path(), false).unwrap();

        assert_eq!(load_config_from(&path).unwrap(), TallycmpConfig::with_defaults());
        assert!(init_config(dir.path(), false).is_err());
        assert!(init_config(dir.path(), true).is_ok());
    }
}
