use eframe::egui;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use strip_gallery::catalog::GalleryCatalog;
use strip_gallery::config::Config;
use strip_gallery::engine::{EngineSettings, GalleryEngine, InputEvent, Key, TouchPoint};
use strip_gallery::surface::{Class, SurfaceModel, Target};
use strip_gallery::viewport::Mode;

use crate::image_cache::{ImageCache, cover_uv};

const DRAG_THRESHOLD: f32 = 5.0;
const STRIP_GAP: f32 = 4.0;
const ACTIVE_STRIP_WEIGHT: f32 = 6.0;
const FEATURED_STRIP_WEIGHT: f32 = 5.0;
const MOBILE_STRIP_WEIGHT: f32 = 0.6;
const CLOSE_BUTTON_SIZE: f32 = 40.0;

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(18, 18, 18);
const PLACEHOLDER: egui::Color32 = egui::Color32::from_rgb(48, 48, 48);

/// Where the primary button went down, for telling taps from swipes.
struct Press {
    origin: egui::Pos2,
}

struct GalleryApp {
    engine: Option<GalleryEngine<SurfaceModel>>,
    /// Drawn as-is when the engine could not mount.
    fallback: GalleryCatalog,
    settings: EngineSettings,
    image_cache: ImageCache,
    start: Instant,
    press: Option<Press>,
    last_width: Option<f32>,
    strip_rects: Vec<egui::Rect>,
    close_rect: Option<egui::Rect>,
}

impl GalleryApp {
    fn new(catalog: GalleryCatalog, settings: EngineSettings, width: f32) -> Self {
        let fallback = catalog.clone();
        let surface = SurfaceModel::for_strips(catalog.len());
        let engine = match GalleryEngine::mount(catalog, surface, settings, width, Duration::ZERO) {
            Ok(engine) => Some(engine),
            Err(e) => {
                tracing::warn!("Gallery disabled: {e}");
                None
            }
        };
        Self {
            engine,
            fallback,
            settings,
            image_cache: ImageCache::new(PathBuf::from(".")),
            start: Instant::now(),
            press: None,
            last_width: Some(width),
            strip_rects: Vec::new(),
            close_rect: None,
        }
    }

    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn strip_at(&self, pos: egui::Pos2) -> Option<usize> {
        self.strip_rects.iter().position(|r| r.contains(pos))
    }

    fn lightbox_open(&self) -> bool {
        self.engine.as_ref().is_some_and(|engine| {
            let surface = engine.surface();
            surface.has_class(Target::Lightbox, Class::Revealed)
                || surface.has_class(Target::Lightbox, Class::Visible)
        })
    }

    /// Translate this frame's raw input into engine events.
    fn collect_events(&mut self, ctx: &egui::Context, now: Duration) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|i| {
            if i.key_pressed(egui::Key::Escape) {
                events.push(InputEvent::KeyDown(Key::Escape));
            }
            if i.key_pressed(egui::Key::ArrowLeft) {
                events.push(InputEvent::KeyDown(Key::ArrowLeft));
            }
            if i.key_pressed(egui::Key::ArrowRight) {
                events.push(InputEvent::KeyDown(Key::ArrowRight));
            }

            let pos = i.pointer.interact_pos();
            if i.pointer.button_pressed(egui::PointerButton::Primary) {
                if let Some(origin) = pos {
                    self.press = Some(Press { origin });
                    events.push(InputEvent::TouchStart(touch_point(origin, now)));
                }
            }
            if i.pointer.button_released(egui::PointerButton::Primary) {
                if let (Some(press), Some(end)) = (self.press.take(), pos) {
                    events.push(InputEvent::TouchEnd(touch_point(end, now)));
                    if press.origin.distance(end) <= DRAG_THRESHOLD {
                        if self.close_rect.is_some_and(|r| r.contains(end)) {
                            events.push(InputEvent::CloseButton);
                        } else if !self.lightbox_open() {
                            if let Some(index) = self.strip_at(end) {
                                events.push(InputEvent::Click(index));
                            }
                        }
                    }
                }
            }
        });

        events
    }

    fn draw(&mut self, ctx: &egui::Context, ui: &mut egui::Ui, rect: egui::Rect) {
        ui.painter().rect_filled(rect, 0.0, BACKGROUND);

        let Some(engine) = self.engine.as_ref() else {
            let weights = vec![1.0; self.fallback.len()];
            let refs: Vec<&str> = self
                .fallback
                .items()
                .iter()
                .map(|item| item.strip_ref.as_str())
                .collect();
            self.strip_rects = layout_strips(rect, &weights);
            for (strip_rect, image_ref) in self.strip_rects.iter().zip(refs) {
                paint_image(ui, ctx, &self.image_cache, image_ref, *strip_rect, 1.0);
            }
            return;
        };

        let surface = engine.surface();
        let mode = engine.state().mode;
        let animation = self.settings.timing.gallery_animation().as_secs_f32();
        let fade = self.settings.timing.fade().as_secs_f32();

        let strip_area = if mode == Mode::Mobile {
            let caption_height = 64.0;
            egui::Rect::from_min_max(rect.min, egui::pos2(rect.max.x, rect.max.y - caption_height))
        } else {
            rect
        };

        let strips_animating = surface.has_class(Target::Strips, Class::Animating);
        let weights: Vec<f32> = (0..surface.strip_count())
            .map(|i| {
                let target = match mode {
                    Mode::Desktop if strips_animating && surface.has_class(Target::Strip(i), Class::Active) => {
                        ACTIVE_STRIP_WEIGHT
                    }
                    Mode::Desktop => 1.0,
                    Mode::Mobile if surface.has_class(Target::Strip(i), Class::Featured) => {
                        FEATURED_STRIP_WEIGHT
                    }
                    Mode::Mobile => MOBILE_STRIP_WEIGHT,
                };
                ctx.animate_value_with_time(egui::Id::new(("strip-flex", i)), target, animation)
            })
            .collect();
        self.strip_rects = layout_strips(strip_area, &weights);

        for (i, strip_rect) in self.strip_rects.iter().enumerate() {
            if let Some(image_ref) = surface.background(Target::Strip(i)) {
                paint_image(ui, ctx, &self.image_cache, image_ref, *strip_rect, 1.0);
            }
        }

        if mode == Mode::Mobile {
            let visible = surface.has_class(Target::MobileCaption, Class::Visible);
            let alpha = ctx.animate_bool_with_time(egui::Id::new("mobile-caption"), visible, fade);
            if alpha > 0.0 {
                let caption_rect =
                    egui::Rect::from_min_max(egui::pos2(rect.min.x, strip_area.max.y), rect.max);
                paint_caption(ui, surface.text(Target::MobileCaption), caption_rect, alpha, 18.0);
            }
        }

        let visible = surface.has_class(Target::Lightbox, Class::Visible);
        let revealed = surface.has_class(Target::Lightbox, Class::Revealed);
        let alpha = ctx.animate_bool_with_time(egui::Id::new("lightbox"), visible, fade);
        self.close_rect = None;
        if !(visible || revealed) || alpha <= 0.0 {
            return;
        }

        let scrim = egui::Color32::from_black_alpha((alpha * 230.0) as u8);
        ui.painter().rect_filled(rect, 0.0, scrim);

        let navigate_fade = self.settings.timing.navigate_fade().as_secs_f32();
        let content_alpha = alpha
            * ctx.animate_value_with_time(
                egui::Id::new("lightbox-content"),
                surface.opacity(Target::LightboxImage),
                navigate_fade,
            );
        let image_rect = rect.shrink2(egui::vec2(rect.width() * 0.1, rect.height() * 0.12));
        if let Some(image_ref) = surface.background(Target::LightboxImage) {
            paint_image(ui, ctx, &self.image_cache, image_ref, image_rect, content_alpha);
        }
        let caption_rect = egui::Rect::from_min_max(
            egui::pos2(rect.min.x, image_rect.max.y),
            egui::pos2(rect.max.x, rect.max.y),
        );
        paint_caption(
            ui,
            surface.text(Target::LightboxCaption),
            caption_rect,
            content_alpha,
            22.0,
        );

        let close_rect = egui::Rect::from_min_size(
            egui::pos2(rect.max.x - CLOSE_BUTTON_SIZE - 16.0, rect.min.y + 16.0),
            egui::vec2(CLOSE_BUTTON_SIZE, CLOSE_BUTTON_SIZE),
        );
        let color = egui::Color32::from_white_alpha((alpha * 220.0) as u8);
        ui.painter().text(
            close_rect.center(),
            egui::Align2::CENTER_CENTER,
            "\u{00d7}",
            egui::FontId::proportional(32.0),
            color,
        );
        if visible {
            self.close_rect = Some(close_rect);
        }
    }
}

impl eframe::App for GalleryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = self.now();

        if ctx.input(|i| i.key_pressed(egui::Key::Q)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        let events = self.collect_events(ctx, now);
        if let Some(engine) = self.engine.as_mut() {
            engine.advance(now);
            for event in events {
                engine.handle(event, now);
            }
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(BACKGROUND).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let width = rect.width();
                if self.last_width != Some(width) {
                    self.last_width = Some(width);
                    if let Some(engine) = self.engine.as_mut() {
                        engine.handle(InputEvent::Resize(width), now);
                    }
                }
                self.draw(ctx, ui, rect);
            });

        if let Some(due) = self.engine.as_ref().and_then(|e| e.next_deadline()) {
            ctx.request_repaint_after(due.saturating_sub(self.now()));
        }
    }
}

fn touch_point(pos: egui::Pos2, now: Duration) -> TouchPoint {
    TouchPoint::new(pos.x as f64, pos.y as f64, now)
}

/// Split `area` horizontally into strips proportional to `weights`.
fn layout_strips(area: egui::Rect, weights: &[f32]) -> Vec<egui::Rect> {
    let total: f32 = weights.iter().sum();
    if weights.is_empty() || total <= 0.0 {
        return Vec::new();
    }
    let gaps = STRIP_GAP * (weights.len() - 1) as f32;
    let usable = (area.width() - gaps).max(0.0);

    let mut x = area.min.x;
    weights
        .iter()
        .map(|w| {
            let width = usable * w / total;
            let rect = egui::Rect::from_min_size(egui::pos2(x, area.min.y), egui::vec2(width, area.height()));
            x += width + STRIP_GAP;
            rect
        })
        .collect()
}

fn paint_image(
    ui: &egui::Ui,
    ctx: &egui::Context,
    cache: &ImageCache,
    image_ref: &str,
    rect: egui::Rect,
    opacity: f32,
) {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0) as u8;
    match cache.get_or_load(ctx, image_ref) {
        Some(texture) => {
            let uv = cover_uv(texture.size_vec2(), rect.size());
            let tint = egui::Color32::from_rgba_unmultiplied(255, 255, 255, alpha);
            ui.painter().image(texture.id(), rect, uv, tint);
        }
        None => {
            let [r, g, b, _] = PLACEHOLDER.to_array();
            ui.painter()
                .rect_filled(rect, 0.0, egui::Color32::from_rgba_unmultiplied(r, g, b, alpha));
        }
    }
}

fn paint_caption(ui: &egui::Ui, text: &str, rect: egui::Rect, opacity: f32, size: f32) {
    if text.is_empty() {
        return;
    }
    let color = egui::Color32::from_rgba_unmultiplied(230, 230, 230, (opacity * 255.0) as u8);
    let galley = ui.painter().layout(
        text.to_string(),
        egui::FontId::proportional(size),
        color,
        rect.width() - 48.0,
    );
    let pos = egui::pos2(
        rect.center().x - galley.rect.width() / 2.0,
        rect.center().y - galley.rect.height() / 2.0,
    );
    ui.painter().galley(pos, galley, color);
}

pub fn run(catalog: Option<PathBuf>, windowed: bool, width: Option<f32>) -> anyhow::Result<()> {
    let config = Config::load_or_default();
    let catalog = crate::commands::catalog::resolve(catalog.as_deref(), &config)?;
    let settings = config.settings();

    let title = format!("strip-gallery \u{00b7} {} images", catalog.len());
    let initial_width = width.unwrap_or(1280.0);

    let viewport = if windowed || width.is_some() {
        egui::ViewportBuilder::default()
            .with_inner_size([initial_width, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    tracing::debug!(items = catalog.len(), windowed, initial_width, "Launching gallery window");
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(GalleryApp::new(catalog, settings, initial_width)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
