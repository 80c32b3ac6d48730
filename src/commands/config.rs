//! Config subcommands handler

use anyhow::Result;

use postnorm::Config;

/// Show current configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

/// Print the config file path.
#[cfg(not(tarpaulin_include))]
pub fn handle_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}
