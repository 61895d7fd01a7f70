use relay53_domain::{CliOverrides, Config};

/// Loads the configuration file (or defaults), applies command-line
/// overrides and validates the result.
pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}
