mod mobile;

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{EngineSettings, GalleryEngine, InputEvent, TouchPoint};
use crate::catalog::GalleryCatalog;
use crate::surface::SurfaceModel;

const WIDE: f32 = 1280.0;
const NARROW: f32 = 400.0;

/// Milliseconds as a `Duration`.
fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// Mount the built-in nine-item gallery at `width`, at time zero, with a fixed seed.
fn mount(width: f32) -> GalleryEngine<SurfaceModel> {
    let catalog = GalleryCatalog::builtin();
    let surface = SurfaceModel::for_strips(catalog.len());
    GalleryEngine::mount_with_rng(
        catalog,
        surface,
        EngineSettings::default(),
        width,
        ms(0),
        StdRng::seed_from_u64(7),
    )
    .expect("gallery mounts")
}

fn desktop() -> GalleryEngine<SurfaceModel> {
    mount(WIDE)
}

/// Desktop engine with `index` fully expanded at t=600ms.
fn expanded(index: usize) -> GalleryEngine<SurfaceModel> {
    let mut engine = desktop();
    engine.handle(InputEvent::Click(index), ms(0));
    engine.advance(ms(600));
    assert!(engine.state().expanded);
    engine
}

/// Mobile engine with `featured` selected by a tap at t=0.
fn mobile(featured: usize) -> GalleryEngine<SurfaceModel> {
    let mut engine = mount(NARROW);
    engine.handle(InputEvent::Click(featured), ms(0));
    assert_eq!(engine.state().featured_index, featured);
    engine
}

/// Horizontal swipe of `dx` px (positive = finger moves left) over `duration` ms,
/// starting at `at`.
fn swipe(engine: &mut GalleryEngine<SurfaceModel>, dx: f64, dy: f64, duration: u64, at: u64) {
    engine.handle(
        InputEvent::TouchStart(TouchPoint::new(200.0, 300.0, ms(at))),
        ms(at),
    );
    engine.handle(
        InputEvent::TouchEnd(TouchPoint::new(200.0 - dx, 300.0 - dy, ms(at + duration))),
        ms(at + duration),
    );
}
