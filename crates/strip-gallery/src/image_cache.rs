use eframe::egui;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

/// Lazily decoded textures keyed by image reference.
///
/// Failed loads are remembered so a missing file is reported once and then
/// drawn as a placeholder.
pub struct ImageCache {
    base_path: PathBuf,
    textures: RefCell<HashMap<String, Option<egui::TextureHandle>>>,
}

impl ImageCache {
    pub fn new(base_path: PathBuf) -> Self {
        Self {
            base_path,
            textures: RefCell::new(HashMap::new()),
        }
    }

    pub fn get_or_load(&self, ctx: &egui::Context, image_ref: &str) -> Option<egui::TextureHandle> {
        if let Some(cached) = self.textures.borrow().get(image_ref) {
            return cached.clone();
        }

        let texture = self.load(ctx, image_ref);
        self.textures
            .borrow_mut()
            .insert(image_ref.to_string(), texture.clone());
        texture
    }

    fn load(&self, ctx: &egui::Context, image_ref: &str) -> Option<egui::TextureHandle> {
        let path = self.base_path.join(image_ref);
        let image = match image::open(&path) {
            Ok(image) => image.into_rgba8(),
            Err(e) => {
                tracing::warn!(path = %path.display(), "Failed to load image: {e}");
                return None;
            }
        };
        let size = [image.width() as usize, image.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
        tracing::debug!(image_ref, width = size[0], height = size[1], "Loaded texture");
        Some(ctx.load_texture(image_ref, color_image, egui::TextureOptions::LINEAR))
    }
}

/// UV sub-rectangle that crops a texture to fill `target` without distortion.
pub fn cover_uv(texture: egui::Vec2, target: egui::Vec2) -> egui::Rect {
    let full = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    if texture.x <= 0.0 || texture.y <= 0.0 || target.x <= 0.0 || target.y <= 0.0 {
        return full;
    }
    let texture_aspect = texture.x / texture.y;
    let target_aspect = target.x / target.y;
    if texture_aspect > target_aspect {
        let visible = target_aspect / texture_aspect;
        let inset = (1.0 - visible) / 2.0;
        egui::Rect::from_min_max(egui::pos2(inset, 0.0), egui::pos2(1.0 - inset, 1.0))
    } else {
        let visible = texture_aspect / target_aspect;
        let inset = (1.0 - visible) / 2.0;
        egui::Rect::from_min_max(egui::pos2(0.0, inset), egui::pos2(1.0, 1.0 - inset))
    }
}
