use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One gallery entry. Immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    pub index: usize,
    /// Full-size image, shown in the lightbox and on mobile strips.
    pub image_ref: String,
    /// Narrow crop shown on collapsed desktop strips.
    pub strip_ref: String,
    pub caption_text: String,
}

/// On-disk shape of a catalog entry. `strip` falls back to `image`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogEntry {
    image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    strip: Option<String>,
    caption: String,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("catalog {0} contains no items")]
    Empty(PathBuf),
}

/// Static, ordered list of gallery items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryCatalog {
    items: Vec<GalleryItem>,
}

const BUILTIN: [(&str, &str); 9] = [
    ("photo05", "White Temple Installation \u{2014} MONA, Hobart"),
    ("photo03", "White Temple Structure \u{2014} MONA, Hobart"),
    ("photo08", "Gallery Wall Arrangement \u{2014} Residential collection"),
    ("photo15", "Sidney Nolan Exhibition \u{2014} Ned Kelly series"),
    ("photo01", "Portrait Installation \u{2014} Residential"),
    ("photo12", "Geometric Tapestry \u{2014} National Gallery of Australia"),
    ("photo16", "Gallery Interior \u{2014} Residential"),
    ("photo21", "Lead Book Sculpture \u{2014} National Gallery of Australia"),
    ("photo04", "Green Screen Installation"),
];

impl GalleryCatalog {
    /// Build a catalog from `(image, strip, caption)` triples, assigning indices in order.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, S, S)>,
        S: Into<String>,
    {
        let items = entries
            .into_iter()
            .enumerate()
            .map(|(index, (image, strip, caption))| GalleryItem {
                index,
                image_ref: image.into(),
                strip_ref: strip.into(),
                caption_text: caption.into(),
            })
            .collect();
        Self { items }
    }

    /// The homepage set the widget ships with.
    pub fn builtin() -> Self {
        Self::new(BUILTIN.iter().map(|(name, caption)| {
            (
                format!("assets/images/homepage/{name}.jpg"),
                format!("assets/images/homepage/strips/{name}.jpg"),
                caption.to_string(),
            )
        }))
    }

    /// Parse a YAML list of `{ image, strip?, caption }` entries.
    ///
    /// Relative image paths are resolved against `base_path`.
    pub fn from_yaml(contents: &str, base_path: &Path, origin: &Path) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> =
            serde_yaml::from_str(contents).map_err(|source| CatalogError::Parse {
                path: origin.to_path_buf(),
                source,
            })?;
        if entries.is_empty() {
            return Err(CatalogError::Empty(origin.to_path_buf()));
        }

        let resolve = |r: &str| -> String {
            let p = Path::new(r);
            if p.is_absolute() || r.contains("://") {
                r.to_string()
            } else {
                base_path.join(p).to_string_lossy().into_owned()
            }
        };

        Ok(Self::new(entries.into_iter().map(|e| {
            let image = resolve(&e.image);
            let strip = e.strip.as_deref().map(&resolve).unwrap_or_else(|| image.clone());
            (image, strip, e.caption)
        })))
    }

    pub fn load_from(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let base_path = path.parent().unwrap_or(Path::new("."));
        Self::from_yaml(&contents, base_path, path)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&GalleryItem> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn last_index(&self) -> usize {
        self.items.len().saturating_sub(1)
    }
}
