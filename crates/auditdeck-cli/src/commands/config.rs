use anyhow::Result;

use auditdeck_core::AppConfig;

/// Print the configuration file path
pub fn path() -> Result<()> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}

/// Write the current (or default) configuration to disk
pub fn init(config: &AppConfig) -> Result<()> {
    config.save()?;
    println!("Wrote {}", AppConfig::config_path().display());
    Ok(())
}
