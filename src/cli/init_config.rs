use super::config::{default_config_path, SantaConfig};
use std::path::PathBuf;

/// Write the commented default configuration file
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn execute(output: Option<String>, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let path = output
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    if path.exists() && !force {
        return Err(format!(
            "Config file '{}' already exists (use --force to overwrite)",
            path.display()
        )
        .into());
    }

    SantaConfig::create_default(&path)?;
    println!("Created: {}", path.display());

    Ok(())
}
