use std::path::Path;

use anyhow::{Context, Result};
use looprail_config::{LoadedConfig, load_explicit, load_from_env};

pub fn run(path: Option<&Path>) -> Result<()> {
    let loaded = resolve(path)?;

    println!("# source: {}", loaded.source);
    let rendered = toml::to_string(&loaded.config)
        .context("failed to render effective config")?;
    print!("{rendered}");

    if loaded.warnings.is_empty() {
        println!("# ok");
    } else {
        for warning in &loaded.warnings.items {
            println!("# warning: {warning}");
        }
    }
    Ok(())
}

pub fn resolve(path: Option<&Path>) -> Result<LoadedConfig> {
    match path {
        Some(path) => load_explicit(path),
        None => load_from_env(),
    }
}
