use anyhow::{Context, Result};
use dsearch::config::{Config, DEFAULT_CONFIG_FILE};
use std::path::{Path, PathBuf};

const HEADER: &str = "# dsearch configuration\n#\n# Delays are in seconds. Source URLs and result_selectors override the\n# built-in defaults when set.\n\n";

pub fn init_config(path: PathBuf) -> Result<()> {
    let config_path = write_default_config(&path)?;
    println!("Created configuration file: {}", config_path.display());
    Ok(())
}

/// Write the default configuration into `dir`, refusing to overwrite
pub fn write_default_config(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;

    let config_path = dir.join(DEFAULT_CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{} already exists", config_path.display());
    }

    let content = format!("{}{}", HEADER, Config::default().to_toml()?);
    std::fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}
