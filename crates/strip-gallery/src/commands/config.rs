use colored::Colorize;
use strip_gallery::config::Config;

use crate::cli::ConfigCommands;

pub fn run(command: ConfigCommands) -> anyhow::Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> anyhow::Result<()> {
    let path = Config::path()?;
    let config = if path.exists() {
        println!("{} {}", "Config file:".bold(), path.display());
        Config::load_from(&path)?
    } else {
        println!(
            "{} {} {}",
            "Config file:".bold(),
            path.display(),
            "(not created, showing defaults)".dimmed()
        );
        Config::default()
    };
    println!();

    let t = &config.timing;
    println!("{}", "timing".cyan().bold());
    println!("  gallery_animation_ms: {}", t.gallery_animation_ms);
    println!("  fade_ms:              {}", t.fade_ms);
    println!("  close_start_delay_ms: {}", t.close_start_delay_ms);
    println!("  navigate_fade_ms:     {}", t.navigate_fade_ms);
    println!("  resize_debounce_ms:   {}", t.resize_debounce_ms);

    println!("{}", "viewport".cyan().bold());
    println!("  breakpoint:           {}", config.viewport.breakpoint);

    let i = &config.inertia;
    println!("{}", "inertia".cyan().bold());
    println!("  swipe_threshold:      {}", i.swipe_threshold);
    println!("  velocity_threshold:   {}", i.velocity_threshold);
    println!("  friction:             {}", i.friction);
    println!("  min_velocity:         {}", i.min_velocity);
    println!("  strip_width:          {}", i.strip_width);
    println!("  frame_ms:             {}", i.frame_ms);

    match &config.catalog {
        Some(catalog) => println!("{} {}", "catalog:".cyan().bold(), catalog.display()),
        None => println!("{} {}", "catalog:".cyan().bold(), "built-in".dimmed()),
    }
    Ok(())
}

fn set(key: &str, value: &str) -> anyhow::Result<()> {
    let path = Config::path()?;
    let mut config = if path.exists() {
        Config::load_from(&path)?
    } else {
        Config::default()
    };
    config.set(key, value)?;
    let saved = config.save()?;
    println!(
        "{} {key} = {value} {}",
        "Set".green(),
        format!("({})", saved.display()).dimmed()
    );
    Ok(())
}
