//! Strip gallery: a row of image strips that expands into a lightbox on wide
//! viewports and becomes a swipeable featured-strip carousel on narrow ones.
//!
//! The interaction logic lives in [`engine`] and talks to the screen only
//! through [`surface::RenderSurface`], so it runs the same headless and under
//! the egui host.

pub mod catalog;
pub mod config;
pub mod debounce;
pub mod engine;
pub mod surface;
pub mod timeline;
pub mod viewport;
