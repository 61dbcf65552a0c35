use std::path::Path;

use anyhow::{Context, Result};

use scrollto_core::ScrollConfig;

/// Effective defaults: the explicit file if given, else the default path.
/// A file that does not exist yet yields the built-in defaults.
pub fn load(explicit_path: Option<&Path>) -> Result<ScrollConfig> {
    let config = match explicit_path {
        Some(path) => ScrollConfig::load_or_default(path)?,
        None => ScrollConfig::load()?,
    };
    Ok(config)
}

pub fn run(config: &ScrollConfig, explicit_path: Option<&Path>, init: bool) -> Result<()> {
    let default_path = ScrollConfig::config_path();
    let path = explicit_path.unwrap_or(&default_path);

    if init {
        if path.exists() {
            println!("Config already exists: {}", path.display());
            return Ok(());
        }
        write_defaults(path)?;
        println!("Wrote defaults to {}", path.display());
        return Ok(());
    }

    let source = if path.exists() { "" } else { " (not found, using defaults)" };
    println!("Config: {}{}\n", path.display(), source);
    print!("{}", toml::to_string_pretty(config).context("Failed to render config")?);

    Ok(())
}

fn write_defaults(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let content = toml::to_string_pretty(&ScrollConfig::default())?;
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
