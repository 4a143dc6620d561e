use anyhow::Result;
use std::path::Path;
use ytgrab_core::config::Config;

pub async fn run(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;

    println!("ytgrab configuration\n");
    print!("{}", toml::to_string_pretty(&config)?);

    // Show config file locations
    println!("\nConfig file locations (in priority order):");
    if let Some(p) = config_path {
        println!("  1. {} (specified)", p.display());
    }
    if let Some(config_dir) = dirs::config_dir() {
        println!("  2. {}/ytgrab/config.toml", config_dir.display());
    }
    println!("  3. Environment variables (YTGRAB_*)");

    Ok(())
}
