use std::collections::{BTreeMap, BTreeSet};

/// Addressable element of the gallery markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Target {
    /// The row holding every strip.
    Strips,
    Strip(usize),
    Lightbox,
    LightboxImage,
    LightboxCaption,
    MobileCaption,
}

/// Semantic state flags the style layer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Class {
    Active,
    Featured,
    Animating,
    Closing,
    Revealed,
    Visible,
}

impl Class {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "is-active",
            Self::Featured => "is-featured",
            Self::Animating => "is-animating",
            Self::Closing => "is-closing",
            Self::Revealed => "is-revealed",
            Self::Visible => "is-visible",
        }
    }
}

/// The declarative style collaborator.
///
/// The engine only flips semantic state here; geometry, crossfades and strip
/// collapse are the implementor's business.
pub trait RenderSurface {
    fn set_background_image(&mut self, target: Target, image_ref: &str);
    fn set_caption_text(&mut self, target: Target, text: &str);
    fn toggle_class(&mut self, target: Target, class: Class, on: bool);
    fn set_opacity(&mut self, target: Target, value: f32);
    fn set_aria_hidden(&mut self, target: Target, hidden: bool);

    /// Whether the element exists. Mounting refuses surfaces missing the strips.
    fn has_target(&self, _target: Target) -> bool {
        true
    }
}

/// Retained state of one element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementState {
    pub background_image: Option<String>,
    pub text: String,
    pub classes: BTreeSet<Class>,
    pub opacity: f32,
    pub aria_hidden: bool,
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            background_image: None,
            text: String::new(),
            classes: BTreeSet::new(),
            opacity: 1.0,
            aria_hidden: false,
        }
    }
}

impl ElementState {
    pub fn has(&self, class: Class) -> bool {
        self.classes.contains(&class)
    }
}

/// In-memory [`RenderSurface`] holding the full element tree.
///
/// The window host paints from it, and tests compare snapshots of it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SurfaceModel {
    elements: BTreeMap<Target, ElementState>,
}

impl SurfaceModel {
    /// Markup for a gallery of `strip_count` strips plus the lightbox and captions.
    pub fn for_strips(strip_count: usize) -> Self {
        let mut elements = BTreeMap::new();
        for target in [
            Target::Strips,
            Target::Lightbox,
            Target::LightboxImage,
            Target::LightboxCaption,
            Target::MobileCaption,
        ] {
            elements.insert(target, ElementState::default());
        }
        for i in 0..strip_count {
            elements.insert(Target::Strip(i), ElementState::default());
        }
        Self { elements }
    }

    /// Markup without the strip row, which mounting treats as "no gallery here".
    pub fn without_strips() -> Self {
        let mut model = Self::for_strips(0);
        model.elements.remove(&Target::Strips);
        model
    }

    pub fn element(&self, target: Target) -> Option<&ElementState> {
        self.elements.get(&target)
    }

    pub fn has_class(&self, target: Target, class: Class) -> bool {
        self.element(target).is_some_and(|e| e.has(class))
    }

    pub fn text(&self, target: Target) -> &str {
        self.element(target).map(|e| e.text.as_str()).unwrap_or("")
    }

    pub fn background(&self, target: Target) -> Option<&str> {
        self.element(target).and_then(|e| e.background_image.as_deref())
    }

    pub fn opacity(&self, target: Target) -> f32 {
        self.element(target).map(|e| e.opacity).unwrap_or(1.0)
    }

    pub fn strip_count(&self) -> usize {
        self.elements
            .keys()
            .filter(|t| matches!(t, Target::Strip(_)))
            .count()
    }

    /// Indices of strips currently carrying `class`.
    pub fn strips_with(&self, class: Class) -> Vec<usize> {
        self.elements
            .iter()
            .filter_map(|(target, state)| match target {
                Target::Strip(i) if state.has(class) => Some(*i),
                _ => None,
            })
            .collect()
    }

    // Writes to elements that do not exist are dropped, like writes to a missing node.
    fn element_mut(&mut self, target: Target) -> Option<&mut ElementState> {
        self.elements.get_mut(&target)
    }
}

impl RenderSurface for SurfaceModel {
    fn set_background_image(&mut self, target: Target, image_ref: &str) {
        if let Some(e) = self.element_mut(target) {
            e.background_image = Some(image_ref.to_string());
        }
    }

    fn set_caption_text(&mut self, target: Target, text: &str) {
        if let Some(e) = self.element_mut(target) {
            e.text = text.to_string();
        }
    }

    fn toggle_class(&mut self, target: Target, class: Class, on: bool) {
        if let Some(e) = self.element_mut(target) {
            if on {
                e.classes.insert(class);
            } else {
                e.classes.remove(&class);
            }
        }
    }

    fn set_opacity(&mut self, target: Target, value: f32) {
        if let Some(e) = self.element_mut(target) {
            e.opacity = value.clamp(0.0, 1.0);
        }
    }

    fn set_aria_hidden(&mut self, target: Target, hidden: bool) {
        if let Some(e) = self.element_mut(target) {
            e.aria_hidden = hidden;
        }
    }

    fn has_target(&self, target: Target) -> bool {
        self.elements.contains_key(&target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_class_on_and_off() {
        let mut surface = SurfaceModel::for_strips(3);
        surface.toggle_class(Target::Strip(1), Class::Active, true);
        assert_eq!(surface.strips_with(Class::Active), vec![1]);
        surface.toggle_class(Target::Strip(1), Class::Active, false);
        assert!(surface.strips_with(Class::Active).is_empty());
    }

    #[test]
    fn test_writes_to_missing_elements_are_dropped() {
        let mut surface = SurfaceModel::for_strips(2);
        let before = surface.clone();
        surface.toggle_class(Target::Strip(7), Class::Featured, true);
        surface.set_caption_text(Target::Strip(9), "nothing");
        assert_eq!(surface, before);
        assert!(!surface.has_target(Target::Strip(7)));
    }

    #[test]
    fn test_without_strips_lacks_container() {
        let surface = SurfaceModel::without_strips();
        assert!(!surface.has_target(Target::Strips));
        assert!(surface.has_target(Target::Lightbox));
        assert_eq!(surface.strip_count(), 0);
    }

    #[test]
    fn test_class_names() {
        assert_eq!(Class::Featured.as_str(), "is-featured");
        assert_eq!(Class::Revealed.as_str(), "is-revealed");
    }
}
