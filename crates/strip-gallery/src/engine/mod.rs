//! The carousel interaction engine.
//!
//! One [`GalleryEngine`] owns the session state, the render surface and every
//! scheduled phase or inertia tick. It never reads a clock: inputs and
//! [`GalleryEngine::advance`] carry the current time, and scheduled work runs only
//! from `advance`.

mod expansion;
mod inertia;
mod mode;
mod router;
mod session;

#[cfg(test)]
mod tests;

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::GalleryCatalog;
use crate::debounce::Debounce;
use crate::surface::{RenderSurface, Target};
use crate::timeline::{TimerHandle, Timeline};
use crate::viewport::{ViewportConfig, ViewportMonitor};

pub use expansion::Timing;
pub use inertia::{Gesture, GestureOutcome, InertiaConfig, InertiaRun, InertiaTick, TouchPoint};
pub use router::{InputEvent, Key};
pub use session::{LightboxState, SessionState, Transition};

use expansion::Phase;

/// Tunables for one engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EngineSettings {
    pub timing: Timing,
    pub viewport: ViewportConfig,
    pub inertia: InertiaConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

impl Direction {
    /// Positive values move forward through the catalog.
    pub fn from_sign(value: f64) -> Self {
        if value > 0.0 {
            Self::Forward
        } else {
            Self::Backward
        }
    }

    pub fn sign(self) -> f64 {
        match self {
            Self::Backward => -1.0,
            Self::Forward => 1.0,
        }
    }

    /// Neighbouring index, or `None` past either end. Never wraps.
    pub fn step(self, index: usize, len: usize) -> Option<usize> {
        match self {
            Self::Backward => index.checked_sub(1),
            Self::Forward => (index + 1 < len).then_some(index + 1),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MountError {
    #[error("gallery catalog is empty")]
    EmptyCatalog,
    #[error("surface has no {0:?} element")]
    MissingTarget(Target),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Task {
    Phase(Phase),
    InertiaTick,
}

pub struct GalleryEngine<S: RenderSurface> {
    catalog: GalleryCatalog,
    settings: EngineSettings,
    surface: S,
    state: SessionState,
    timeline: Timeline<Task>,
    monitor: ViewportMonitor,
    resize: Debounce<f32>,
    inertia: Option<InertiaRun>,
    touch_start: Option<TouchPoint>,
    rng: StdRng,
}

impl<S: RenderSurface> GalleryEngine<S> {
    /// Bind the engine to `surface` and apply the initial viewport width.
    ///
    /// Fails when there is nothing to drive; the caller should then leave the
    /// static markup alone.
    pub fn mount(
        catalog: GalleryCatalog,
        surface: S,
        settings: EngineSettings,
        width: f32,
        now: Duration,
    ) -> Result<Self, MountError> {
        Self::mount_with_rng(catalog, surface, settings, width, now, StdRng::from_os_rng())
    }

    pub fn mount_with_rng(
        catalog: GalleryCatalog,
        mut surface: S,
        settings: EngineSettings,
        width: f32,
        now: Duration,
        rng: StdRng,
    ) -> Result<Self, MountError> {
        if catalog.is_empty() {
            warn!("Gallery catalog is empty; leaving markup static");
            return Err(MountError::EmptyCatalog);
        }
        let required = std::iter::once(Target::Strips).chain((0..catalog.len()).map(Target::Strip));
        for target in required {
            if !surface.has_target(target) {
                warn!(?target, "Gallery surface incomplete; leaving markup static");
                return Err(MountError::MissingTarget(target));
            }
        }

        for item in catalog.items() {
            surface.set_background_image(Target::Strip(item.index), &item.strip_ref);
        }
        surface.set_aria_hidden(Target::Lightbox, true);

        let mut engine = Self {
            catalog,
            settings,
            surface,
            state: SessionState::default(),
            timeline: Timeline::new(),
            monitor: ViewportMonitor::new(settings.viewport),
            resize: Debounce::new(settings.timing.resize_debounce()),
            inertia: None,
            touch_start: None,
            rng,
        };
        debug!(items = engine.catalog.len(), width, "Gallery mounted");
        engine.check_viewport(width, now);
        Ok(engine)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn catalog(&self) -> &GalleryCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn inertia(&self) -> Option<&InertiaRun> {
        self.inertia.as_ref()
    }

    /// When the next scheduled piece of work becomes due, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        match (self.timeline.next_deadline(), self.resize.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Run every phase, inertia tick and settled resize due at or before `now`,
    /// in due-time order.
    pub fn advance(&mut self, now: Duration) {
        loop {
            let timer_due = self.timeline.next_deadline().filter(|due| *due <= now);
            let resize_due = self.resize.deadline().filter(|due| *due <= now);
            match (timer_due, resize_due) {
                (None, None) => break,
                (Some(timer), Some(resize)) if resize < timer => self.settle_resize(resize),
                (Some(_), _) => {
                    if let Some((due, handle, task)) = self.timeline.pop_due(now) {
                        self.run_task(due, handle, task);
                    }
                }
                (None, Some(resize)) => self.settle_resize(resize),
            }
        }
    }

    fn settle_resize(&mut self, at: Duration) {
        if let Some(width) = self.resize.poll(at) {
            self.check_viewport(width, at);
        }
    }

    fn run_task(&mut self, due: Duration, handle: TimerHandle, task: Task) {
        match task {
            Task::Phase(phase) => {
                if self.state.take_phase(handle) {
                    self.run_phase(phase, due);
                }
            }
            Task::InertiaTick => {
                if self.state.pending_inertia == Some(handle) {
                    self.state.pending_inertia = None;
                    self.inertia_tick(due);
                }
            }
        }
    }

    fn schedule_phase(&mut self, due: Duration, phase: Phase) {
        let handle = self.timeline.schedule(due, Task::Phase(phase));
        self.state.pending_phases.push(handle);
    }

    /// Drop every outstanding lightbox phase so a newer transition owns the state.
    fn cancel_phases(&mut self) {
        for handle in self.state.pending_phases.drain(..) {
            self.timeline.cancel(handle);
        }
    }
}
