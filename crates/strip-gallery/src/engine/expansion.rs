use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::session::{LightboxState, Transition};
use super::{Direction, GalleryEngine};
use crate::surface::{Class, RenderSurface, Target};
use crate::viewport::Mode;

/// Animation windows, in milliseconds. These mirror the style layer's transition
/// durations and must be kept in sync with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Strip collapse/expand flex animation.
    pub gallery_animation_ms: u64,
    /// Strip image fade-in at the end of a close.
    pub fade_ms: u64,
    /// Pause before the reverse strip animation starts.
    pub close_start_delay_ms: u64,
    /// Lightbox crossfade when navigating between items.
    pub navigate_fade_ms: u64,
    /// Quiet period before a resize is acted on.
    pub resize_debounce_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            gallery_animation_ms: 600,
            fade_ms: 300,
            close_start_delay_ms: 50,
            navigate_fade_ms: 200,
            resize_debounce_ms: 150,
        }
    }
}

impl Timing {
    pub fn gallery_animation(&self) -> Duration {
        Duration::from_millis(self.gallery_animation_ms)
    }

    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }

    pub fn close_start_delay(&self) -> Duration {
        Duration::from_millis(self.close_start_delay_ms)
    }

    pub fn navigate_fade(&self) -> Duration {
        Duration::from_millis(self.navigate_fade_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    /// Total time from `close()` until the lightbox is fully collapsed.
    pub fn close_total(&self) -> Duration {
        self.close_start_delay() + self.gallery_animation() + self.fade()
    }
}

/// Scheduled re-entry points of the lightbox state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Phase {
    /// Expand finished: bring the lightbox to the front.
    Reveal,
    /// Close step 1: start the reverse strip animation.
    BeginCollapse,
    /// Close step 2: strips are back, fade their images in.
    ClearActive,
    /// Close step 3: hide the lightbox and reset.
    Hide,
    /// Navigate: swap content while faded out, then fade back in.
    SwapContent,
}

impl<S: RenderSurface> GalleryEngine<S> {
    /// Expand `index` into the lightbox.
    ///
    /// Accepted from Collapsed, or while a previous expand is still running, in
    /// which case the newer target replaces it. Content is written at once; the
    /// lightbox is only declared visible once the strip animation has finished.
    pub fn activate(&mut self, index: usize, now: Duration) -> bool {
        if self.state.mode != Mode::Desktop {
            return false;
        }
        let Some(item) = self.catalog.get(index).cloned() else {
            return false;
        };

        match self.state.lightbox() {
            LightboxState::Collapsed => {}
            LightboxState::Expanding => {
                let previous = self.state.current_index;
                if previous == Some(index) {
                    return false;
                }
                if let Some(previous) = previous {
                    self.surface
                        .toggle_class(Target::Strip(previous), Class::Active, false);
                }
                debug!(?previous, index, "Expansion retargeted");
            }
            _ => return false,
        }

        self.cancel_phases();
        self.state.current_index = Some(index);
        self.state.transition = Some(Transition::Expanding);

        self.surface
            .set_background_image(Target::LightboxImage, &item.image_ref);
        self.surface
            .set_caption_text(Target::LightboxCaption, &item.caption_text);
        self.surface
            .toggle_class(Target::Lightbox, Class::Revealed, true);
        self.surface
            .toggle_class(Target::Strips, Class::Animating, true);
        self.surface
            .toggle_class(Target::Strip(index), Class::Active, true);

        let due = now + self.settings.timing.gallery_animation();
        self.schedule_phase(due, Phase::Reveal);
        debug!(index, "Expanding");
        true
    }

    /// Collapse the lightbox. Only accepted when fully expanded and idle.
    pub fn close(&mut self, now: Duration) -> bool {
        if !self.state.expanded || self.state.animating() {
            return false;
        }
        self.begin_close(now);
        true
    }

    /// Collapse regardless of the animation guard, pre-empting an expand or a
    /// crossfade in flight. A close already in progress is left to finish.
    pub fn force_close(&mut self, now: Duration) -> bool {
        match self.state.lightbox() {
            LightboxState::Collapsed | LightboxState::Closing => false,
            LightboxState::Navigating => {
                // The crossfade never finishes, so restore the content it would have shown.
                self.show_current_content();
                self.begin_close(now);
                true
            }
            LightboxState::Expanding | LightboxState::Expanded => {
                self.begin_close(now);
                true
            }
        }
    }

    /// Step the lightbox one item left or right. No wrap-around at either end.
    pub fn navigate(&mut self, direction: Direction, now: Duration) -> bool {
        if !self.state.expanded || self.state.animating() {
            return false;
        }
        let Some(current) = self.state.current_index else {
            return false;
        };
        let Some(next) = direction.step(current, self.catalog.len()) else {
            return false;
        };

        self.state.transition = Some(Transition::Navigating);
        self.state.current_index = Some(next);

        self.clear_active_strips();
        self.surface
            .toggle_class(Target::Strip(next), Class::Active, true);
        self.surface.set_opacity(Target::LightboxCaption, 0.0);
        self.surface.set_opacity(Target::LightboxImage, 0.0);

        let due = now + self.settings.timing.navigate_fade();
        self.schedule_phase(due, Phase::SwapContent);
        debug!(from = current, to = next, "Navigating");
        true
    }

    fn begin_close(&mut self, now: Duration) {
        self.cancel_phases();
        self.state.transition = Some(Transition::Closing);

        self.surface
            .toggle_class(Target::Lightbox, Class::Visible, false);
        self.surface
            .toggle_class(Target::Lightbox, Class::Revealed, true);

        let timing = self.settings.timing;
        self.schedule_phase(now + timing.close_start_delay(), Phase::BeginCollapse);
        self.schedule_phase(
            now + timing.close_start_delay() + timing.gallery_animation(),
            Phase::ClearActive,
        );
        debug!(index = ?self.state.current_index, "Closing");
    }

    pub(super) fn run_phase(&mut self, phase: Phase, at: Duration) {
        match phase {
            Phase::Reveal => {
                self.surface
                    .toggle_class(Target::Lightbox, Class::Revealed, false);
                self.surface
                    .toggle_class(Target::Lightbox, Class::Visible, true);
                self.surface.set_aria_hidden(Target::Lightbox, false);
                self.state.expanded = true;
                self.state.transition = None;
                debug!(index = ?self.state.current_index, "Expanded");
            }
            Phase::BeginCollapse => {
                self.surface
                    .toggle_class(Target::Strips, Class::Animating, false);
                self.surface
                    .toggle_class(Target::Strips, Class::Closing, true);
            }
            Phase::ClearActive => {
                self.surface
                    .toggle_class(Target::Strips, Class::Closing, false);
                self.clear_active_strips();
                let due = at + self.settings.timing.fade();
                self.schedule_phase(due, Phase::Hide);
            }
            Phase::Hide => {
                self.surface
                    .toggle_class(Target::Lightbox, Class::Revealed, false);
                self.surface.set_aria_hidden(Target::Lightbox, true);
                self.state.current_index = None;
                self.state.expanded = false;
                self.state.transition = None;
                debug!("Collapsed");
                // Closing can be forced by a switch to mobile.
                if self.state.mode == Mode::Mobile {
                    self.render_featured();
                }
            }
            Phase::SwapContent => {
                self.show_current_content();
                self.state.transition = None;
            }
        }
    }

    fn show_current_content(&mut self) {
        if let Some(item) = self
            .state
            .current_index
            .and_then(|i| self.catalog.get(i))
        {
            self.surface
                .set_background_image(Target::LightboxImage, &item.image_ref);
            self.surface
                .set_caption_text(Target::LightboxCaption, &item.caption_text);
        }
        self.surface.set_opacity(Target::LightboxImage, 1.0);
        self.surface.set_opacity(Target::LightboxCaption, 1.0);
    }

    fn clear_active_strips(&mut self) {
        for i in 0..self.catalog.len() {
            self.surface
                .toggle_class(Target::Strip(i), Class::Active, false);
        }
    }
}
