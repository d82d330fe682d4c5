use std::time::Duration;

use tracing::trace;

use super::inertia::TouchPoint;
use super::{Direction, GalleryEngine};
use crate::surface::RenderSurface;
use crate::viewport::Mode;

/// Keys the lightbox listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
}

/// Raw input delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Click or tap on the strip at this index.
    Click(usize),
    /// The lightbox close button.
    CloseButton,
    KeyDown(Key),
    TouchStart(TouchPoint),
    TouchEnd(TouchPoint),
    /// Viewport width changed; acted on after the debounce period.
    Resize(f32),
}

impl<S: RenderSurface> GalleryEngine<S> {
    /// Dispatch one input. Work already due at `now` runs first, so the event sees
    /// the state it would have seen with real timers.
    pub fn handle(&mut self, event: InputEvent, now: Duration) {
        self.advance(now);
        trace!(?event, "Input");
        match event {
            InputEvent::Click(index) => self.on_activate(index, now),
            InputEvent::CloseButton => {
                self.close(now);
            }
            InputEvent::KeyDown(key) => self.on_key(key, now),
            InputEvent::TouchStart(point) => self.begin_touch(point),
            InputEvent::TouchEnd(point) => self.end_touch(point, now),
            InputEvent::Resize(width) => self.resize.trigger(now, width),
        }
    }

    fn on_activate(&mut self, index: usize, now: Duration) {
        if index >= self.catalog.len() {
            return;
        }
        match self.state.mode {
            Mode::Mobile => {
                if self.state.animating() || index == self.state.featured_index {
                    return;
                }
                self.state.featured_index = index;
                self.render_featured();
            }
            Mode::Desktop => {
                self.activate(index, now);
            }
        }
    }

    fn on_key(&mut self, key: Key, now: Duration) {
        if self.state.mode == Mode::Mobile || !self.state.expanded {
            return;
        }
        match key {
            Key::Escape => {
                self.close(now);
            }
            Key::ArrowLeft => {
                self.navigate(Direction::Backward, now);
            }
            Key::ArrowRight => {
                self.navigate(Direction::Forward, now);
            }
        }
    }
}
