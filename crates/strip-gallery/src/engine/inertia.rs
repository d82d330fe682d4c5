use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{Direction, GalleryEngine, Task};
use crate::surface::RenderSurface;
use crate::viewport::Mode;

/// Swipe recognition and decay constants. Distances in px, velocities in px/ms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InertiaConfig {
    /// Minimum horizontal travel for a touch to count as a swipe.
    pub swipe_threshold: f64,
    /// Swipes at or below this speed move exactly one strip.
    pub velocity_threshold: f64,
    /// Per-tick velocity multiplier.
    pub friction: f64,
    /// The simulation stops once speed drops to this floor.
    pub min_velocity: f64,
    /// Virtual travel per strip. Not tied to any rendered width.
    pub strip_width: f64,
    /// Nominal frame length of one simulation tick.
    pub frame_ms: u64,
}

impl Default for InertiaConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: 30.0,
            velocity_threshold: 0.3,
            friction: 0.92,
            min_velocity: 0.5,
            strip_width: 100.0,
            frame_ms: 16,
        }
    }
}

impl InertiaConfig {
    pub fn frame(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    /// Reject constants for which a run could never settle.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.friction > 0.0 && self.friction < 1.0) {
            return Err(format!("friction must be within (0, 1), got {}", self.friction));
        }
        if !(self.min_velocity > 0.0) {
            return Err(format!("min_velocity must be positive, got {}", self.min_velocity));
        }
        if !(self.strip_width > 0.0) {
            return Err(format!("strip_width must be positive, got {}", self.strip_width));
        }
        if self.frame_ms == 0 {
            return Err("frame_ms must be positive".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
    pub time: Duration,
}

impl TouchPoint {
    pub fn new(x: f64, y: f64, time: Duration) -> Self {
        Self { x, y, time }
    }
}

/// A completed touch from start to end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    pub start: TouchPoint,
    pub end: TouchPoint,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// Too short, or more vertical than horizontal.
    Ignored,
    Step(Direction),
    Fling { velocity: f64 },
}

impl Gesture {
    /// Speed in px/ms; positive when the finger moved left, i.e. towards later items.
    ///
    /// A zero-length gesture is treated as lasting one millisecond.
    pub fn velocity(&self) -> f64 {
        let elapsed_ms = self
            .end
            .time
            .saturating_sub(self.start.time)
            .as_secs_f64()
            * 1000.0;
        (self.start.x - self.end.x) / elapsed_ms.max(1.0)
    }

    pub fn classify(&self, config: &InertiaConfig) -> GestureOutcome {
        let diff_x = (self.start.x - self.end.x).abs();
        let diff_y = (self.start.y - self.end.y).abs();
        if diff_x < config.swipe_threshold || diff_y > diff_x {
            return GestureOutcome::Ignored;
        }
        let velocity = self.velocity();
        if velocity.abs() <= config.velocity_threshold {
            GestureOutcome::Step(Direction::from_sign(velocity))
        } else {
            GestureOutcome::Fling { velocity }
        }
    }
}

/// Result of one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InertiaTick {
    pub featured: usize,
    pub steps: usize,
    pub finished: bool,
}

/// Decaying-velocity state of one fling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InertiaRun {
    pub velocity: f64,
    pub accumulated: f64,
    direction: Direction,
    moved: bool,
}

impl InertiaRun {
    pub fn new(velocity: f64) -> Self {
        Self {
            velocity,
            accumulated: 0.0,
            direction: Direction::from_sign(velocity),
            moved: false,
        }
    }

    /// Advance one frame from `featured` in a catalog of `len` items.
    ///
    /// Stops at either end instead of clamping, and finishes once speed hits the
    /// floor or the index reaches an end. A fling that settles without covering a
    /// whole strip still moves one item in its direction.
    pub fn tick(&mut self, featured: usize, len: usize, config: &InertiaConfig) -> InertiaTick {
        let mut featured = featured;
        let mut steps = 0;
        let mut hit_end = false;

        self.velocity *= config.friction;
        self.accumulated += self.velocity * config.frame_ms as f64;

        while self.accumulated.abs() >= config.strip_width {
            let direction = Direction::from_sign(self.accumulated);
            match direction.step(featured, len) {
                Some(next) => {
                    featured = next;
                    steps += 1;
                    self.moved = true;
                    self.accumulated -= direction.sign() * config.strip_width;
                }
                None => {
                    self.velocity = 0.0;
                    self.accumulated = 0.0;
                    hit_end = true;
                    break;
                }
            }
        }

        let interior = featured > 0 && featured + 1 < len;
        let finished = !(self.velocity.abs() > config.min_velocity && interior);

        if finished && !self.moved && !hit_end {
            if let Some(next) = self.direction.step(featured, len) {
                featured = next;
                steps += 1;
                self.moved = true;
            }
        }

        InertiaTick {
            featured,
            steps,
            finished,
        }
    }
}

impl<S: RenderSurface> GalleryEngine<S> {
    pub(super) fn begin_touch(&mut self, point: TouchPoint) {
        self.cancel_inertia();
        self.touch_start = Some(point);
    }

    pub(super) fn end_touch(&mut self, point: TouchPoint, now: Duration) {
        let Some(start) = self.touch_start.take() else {
            return;
        };
        if self.state.mode != Mode::Mobile {
            return;
        }
        let gesture = Gesture { start, end: point };
        match gesture.classify(&self.settings.inertia) {
            GestureOutcome::Ignored => {}
            GestureOutcome::Step(direction) => {
                self.step_featured(direction);
            }
            GestureOutcome::Fling { velocity } => {
                debug!(velocity, "Starting inertia");
                self.inertia = Some(InertiaRun::new(velocity));
                self.schedule_inertia_tick(now);
            }
        }
    }

    /// Move the featured strip one item, ignoring steps past either end.
    pub fn step_featured(&mut self, direction: Direction) -> bool {
        if self.state.mode != Mode::Mobile {
            return false;
        }
        match direction.step(self.state.featured_index, self.catalog.len()) {
            Some(next) => {
                self.state.featured_index = next;
                self.render_featured();
                true
            }
            None => false,
        }
    }

    pub(super) fn inertia_tick(&mut self, at: Duration) {
        let Some(mut run) = self.inertia.take() else {
            return;
        };
        let tick = run.tick(
            self.state.featured_index,
            self.catalog.len(),
            &self.settings.inertia,
        );
        trace!(
            velocity = run.velocity,
            accumulated = run.accumulated,
            featured = tick.featured,
            "Inertia tick"
        );
        if tick.steps > 0 {
            self.state.featured_index = tick.featured;
            self.render_featured();
        }
        if tick.finished {
            debug!(featured = tick.featured, "Inertia settled");
        } else {
            self.inertia = Some(run);
            self.schedule_inertia_tick(at);
        }
    }

    fn schedule_inertia_tick(&mut self, from: Duration) {
        let handle = self
            .timeline
            .schedule(from + self.settings.inertia.frame(), Task::InertiaTick);
        self.state.pending_inertia = Some(handle);
    }

    pub(super) fn cancel_inertia(&mut self) {
        if let Some(handle) = self.state.pending_inertia.take() {
            self.timeline.cancel(handle);
        }
        self.inertia = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn point(x: f64, y: f64, ms: u64) -> TouchPoint {
        TouchPoint::new(x, y, Duration::from_millis(ms))
    }

    fn gesture(dx: f64, dy: f64, duration_ms: u64) -> Gesture {
        Gesture {
            start: point(200.0, 300.0, 1_000),
            end: point(200.0 - dx, 300.0 - dy, 1_000 + duration_ms),
        }
    }

    /// Run a fling to completion, returning (final index, tick count).
    fn run_to_end(velocity: f64, featured: usize, len: usize) -> (usize, usize) {
        let config = InertiaConfig::default();
        let mut run = InertiaRun::new(velocity);
        let mut featured = featured;
        for ticks in 1..=1_000 {
            let tick = run.tick(featured, len, &config);
            assert!(tick.featured < len);
            featured = tick.featured;
            if tick.finished {
                return (featured, ticks);
            }
        }
        panic!("inertia did not settle");
    }

    #[test]
    fn test_short_swipe_ignored() {
        let config = InertiaConfig::default();
        assert_eq!(gesture(10.0, 0.0, 50).classify(&config), GestureOutcome::Ignored);
    }

    #[test]
    fn test_vertical_swipe_ignored() {
        let config = InertiaConfig::default();
        assert_eq!(gesture(40.0, 60.0, 50).classify(&config), GestureOutcome::Ignored);
    }

    #[test]
    fn test_slow_swipe_steps_once() {
        let config = InertiaConfig::default();
        assert_eq!(
            gesture(40.0, 0.0, 200).classify(&config),
            GestureOutcome::Step(Direction::Forward)
        );
        assert_eq!(
            gesture(-40.0, 0.0, 200).classify(&config),
            GestureOutcome::Step(Direction::Backward)
        );
    }

    #[test]
    fn test_fast_swipe_flings() {
        let config = InertiaConfig::default();
        match gesture(40.0, 0.0, 50).classify(&config) {
            GestureOutcome::Fling { velocity } => assert!((velocity - 0.8).abs() < 1e-9),
            other => panic!("expected fling, got {other:?}"),
        }
    }

    #[test]
    fn test_instant_gesture_has_finite_velocity() {
        let g = gesture(60.0, 0.0, 0);
        assert_eq!(g.velocity(), 60.0);
    }

    #[test]
    fn test_gentle_fling_still_moves_one() {
        // 0.8 px/ms decays below the floor before covering a full strip.
        let (featured, _) = run_to_end(0.8, 3, 9);
        assert_eq!(featured, 4);
    }

    #[test]
    fn test_strong_fling_moves_several() {
        let (featured, _) = run_to_end(4.0, 1, 9);
        assert!(featured > 2, "expected several steps, got {featured}");
    }

    #[test]
    fn test_fling_stops_at_end() {
        let (featured, _) = run_to_end(40.0, 6, 9);
        assert_eq!(featured, 8);
        let (featured, _) = run_to_end(-40.0, 2, 9);
        assert_eq!(featured, 0);
    }

    #[test]
    fn test_fling_outward_from_end_does_nothing() {
        let (featured, ticks) = run_to_end(2.0, 8, 9);
        assert_eq!((featured, ticks), (8, 1));
    }

    #[test]
    fn test_validate_rejects_unsettling_friction() {
        let mut config = InertiaConfig::default();
        assert!(config.validate().is_ok());
        config.friction = 1.0;
        assert!(config.validate().is_err());
    }

    proptest! {
        #[test]
        fn prop_fling_settles_within_bounds(
            speed in 0.31f64..60.0,
            forward in any::<bool>(),
            featured in 0usize..9,
        ) {
            let velocity = if forward { speed } else { -speed };
            let (end, ticks) = run_to_end(velocity, featured, 9);
            prop_assert!(end < 9);
            prop_assert!(ticks <= 80);
        }
    }
}
