use std::path::{Path, PathBuf};

use colored::Colorize;
use strip_gallery::catalog::GalleryCatalog;
use strip_gallery::config::Config;

/// Catalog to show: an explicit file, then the configured one, then the built-in set.
pub fn resolve(explicit: Option<&Path>, config: &Config) -> anyhow::Result<GalleryCatalog> {
    match explicit.or(config.catalog.as_deref()) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading catalog");
            Ok(GalleryCatalog::load_from(path)?)
        }
        None => Ok(GalleryCatalog::builtin()),
    }
}

pub fn run(file: Option<PathBuf>) -> anyhow::Result<()> {
    let config = Config::load_or_default();
    let source = match file.as_deref().or(config.catalog.as_deref()) {
        Some(path) => path.display().to_string(),
        None => "built-in".to_string(),
    };
    let catalog = resolve(file.as_deref(), &config)?;

    println!(
        "{} {} {}",
        "Catalog:".bold(),
        source,
        format!("({} items)", catalog.len()).dimmed()
    );
    println!();
    for item in catalog.items() {
        println!("{:>3}  {}", item.index.to_string().cyan(), item.caption_text);
        println!("     {} {}", "image:".dimmed(), item.image_ref);
        if item.strip_ref != item.image_ref {
            println!("     {} {}", "strip:".dimmed(), item.strip_ref);
        }
    }
    Ok(())
}
