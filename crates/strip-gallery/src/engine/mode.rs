use std::time::Duration;

use rand::Rng;
use tracing::debug;

use super::GalleryEngine;
use crate::surface::{Class, RenderSurface, Target};
use crate::viewport::Mode;

impl<S: RenderSurface> GalleryEngine<S> {
    /// Apply a settled viewport width, switching modes only on a breakpoint crossing.
    pub(super) fn check_viewport(&mut self, width: f32, now: Duration) {
        match self.monitor.check(width) {
            Some(Mode::Mobile) => self.enter_mobile(now),
            Some(Mode::Desktop) => self.enter_desktop(),
            None => {}
        }
    }

    /// Switch to the touch picker. Any lightbox state is closed out first, and a
    /// random strip becomes featured.
    pub fn enter_mobile(&mut self, now: Duration) {
        if self.state.mode == Mode::Mobile {
            return;
        }
        self.state.mode = Mode::Mobile;
        if self.force_close(now) {
            debug!("Forced lightbox close on mode switch");
        }

        for item in self.catalog.items() {
            self.surface
                .set_background_image(Target::Strip(item.index), &item.image_ref);
        }

        self.state.featured_index = self.rng.random_range(0..self.catalog.len());
        self.render_featured();
        debug!(featured = self.state.featured_index, "Entered mobile mode");
    }

    /// Switch to the expanding strips, clearing every trace of the picker.
    pub fn enter_desktop(&mut self) {
        if self.state.mode == Mode::Desktop {
            return;
        }
        self.state.mode = Mode::Desktop;
        self.cancel_inertia();
        self.touch_start = None;

        for item in self.catalog.items() {
            let strip = Target::Strip(item.index);
            self.surface.toggle_class(strip, Class::Featured, false);
            self.surface.set_background_image(strip, &item.strip_ref);
        }
        self.surface
            .toggle_class(Target::MobileCaption, Class::Visible, false);
        self.surface.set_caption_text(Target::MobileCaption, "");
        self.state.featured_index = 0;
        debug!("Entered desktop mode");
    }

    pub(super) fn render_featured(&mut self) {
        let featured = self.state.featured_index;
        for i in 0..self.catalog.len() {
            self.surface
                .toggle_class(Target::Strip(i), Class::Featured, i == featured);
        }
        if let Some(item) = self.catalog.get(featured) {
            self.surface
                .set_caption_text(Target::MobileCaption, &item.caption_text);
            self.surface
                .toggle_class(Target::MobileCaption, Class::Visible, true);
        }
    }
}
