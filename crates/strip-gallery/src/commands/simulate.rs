use std::time::Duration;

use colored::Colorize;
use strip_gallery::config::Config;
use strip_gallery::engine::{GalleryEngine, InputEvent, TouchPoint};
use strip_gallery::surface::SurfaceModel;

use crate::cli::SimulateCommands;

/// Gesture start, leaving room after mount for the initial tap.
const SWIPE_AT: Duration = Duration::from_millis(1_000);
/// Inertia stops long before this; guards against a misconfigured run.
const MAX_TICKS: usize = 10_000;

pub fn run(command: SimulateCommands) -> anyhow::Result<()> {
    match command {
        SimulateCommands::Swipe {
            featured,
            dx,
            dy,
            duration_ms,
            catalog,
        } => swipe(featured, dx, dy, duration_ms, catalog.as_deref()),
    }
}

fn swipe(
    featured: usize,
    dx: f64,
    dy: f64,
    duration_ms: u64,
    catalog: Option<&std::path::Path>,
) -> anyhow::Result<()> {
    let config = Config::load_or_default();
    let catalog = super::catalog::resolve(catalog, &config)?;
    if featured >= catalog.len() {
        anyhow::bail!(
            "Featured index {featured} out of range (catalog has {} items, last is {})",
            catalog.len(),
            catalog.last_index()
        );
    }

    let settings = config.settings();
    let surface = SurfaceModel::for_strips(catalog.len());
    let width = settings.viewport.breakpoint;
    let mut engine = GalleryEngine::mount(catalog, surface, settings, width, Duration::ZERO)?;
    engine.handle(InputEvent::Click(featured), Duration::ZERO);

    let start = TouchPoint::new(0.0, 0.0, SWIPE_AT);
    let end_at = SWIPE_AT + Duration::from_millis(duration_ms);
    // Finger travel is opposite to carousel travel.
    let end = TouchPoint::new(-dx, -dy, end_at);

    println!(
        "{} dx={dx} dy={dy} over {duration_ms}ms from featured {}",
        "Swipe".bold(),
        featured.to_string().cyan()
    );
    engine.handle(InputEvent::TouchStart(start), SWIPE_AT);
    engine.handle(InputEvent::TouchEnd(end), end_at);

    if engine.inertia().is_none() {
        let after = engine.state().featured_index;
        let outcome = if after == featured {
            "no change".yellow()
        } else {
            "stepped".green()
        };
        println!("  {outcome}: featured {}", after.to_string().cyan());
        return Ok(());
    }

    let mut ticks = 0;
    while let Some(due) = engine.next_deadline() {
        if ticks >= MAX_TICKS {
            anyhow::bail!("Inertia did not settle after {MAX_TICKS} ticks");
        }
        let before = engine.state().featured_index;
        engine.advance(due);
        ticks += 1;

        let after = engine.state().featured_index;
        let elapsed = due.saturating_sub(end_at).as_millis();
        let velocity = engine
            .inertia()
            .map(|run| format!("{:>7.3} px/ms", run.velocity))
            .unwrap_or_else(|| "settled".to_string());
        let marker = if after != before {
            format!("-> {after}").green().to_string()
        } else {
            String::new()
        };
        println!(
            "  {:>5}ms  {velocity:>13}  featured {:>2} {marker}",
            elapsed,
            after.to_string().cyan()
        );
    }

    println!(
        "{} featured {} after {ticks} ticks",
        "Settled:".bold(),
        engine.state().featured_index.to_string().green()
    );
    Ok(())
}
