//! Engine icons: reference classification, import, discard and caching.
//!
//! An icon reference is either a local file (`file:` URL or absolute path),
//! which belongs to the user and may be replaced or discarded, or a resource
//! identifier (`:google`, `xdg:google`, `https://...`) resolved elsewhere.
//! Discarded files are moved to a trash directory, never deleted.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};

use crate::error::{WebsearchError, WebsearchResult};

const FILE_SCHEME: &str = "file:";
const THEME_SCHEME: &str = "xdg:";

/// Imported icons are scaled to fit this square.
pub const ICON_SIZE: u32 = 256;

/// A classified icon reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconRef {
    LocalFile(PathBuf),
    Resource(String),
}

impl IconRef {
    pub fn parse(reference: &str) -> Self {
        if let Some(rest) = reference.strip_prefix(FILE_SCHEME) {
            let path = rest.strip_prefix("//").unwrap_or(rest);
            return IconRef::LocalFile(PathBuf::from(path));
        }

        if Path::new(reference).is_absolute() {
            return IconRef::LocalFile(PathBuf::from(reference));
        }

        IconRef::Resource(reference.to_string())
    }

    pub fn local_path(&self) -> Option<&Path> {
        match self {
            IconRef::LocalFile(path) => Some(path),
            IconRef::Resource(_) => None,
        }
    }

    /// Build the reference stored for an imported file.
    pub fn file_reference(path: &Path) -> String {
        format!("{}{}", FILE_SCHEME, path.display())
    }
}

/// Owns the directories for imported and discarded icons.
#[derive(Debug, Clone)]
pub struct IconStore {
    icons_dir: PathBuf,
    trash_dir: PathBuf,
}

impl IconStore {
    pub fn new(icons_dir: impl Into<PathBuf>, trash_dir: impl Into<PathBuf>) -> Self {
        Self {
            icons_dir: icons_dir.into(),
            trash_dir: trash_dir.into(),
        }
    }

    /// Decode `source` and scale it to fit [`ICON_SIZE`], keeping its
    /// aspect ratio.
    pub fn load(source: &Path) -> WebsearchResult<DynamicImage> {
        let image = ImageReader::open(source)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| e.to_string())
            .and_then(|reader| reader.decode().map_err(|e| e.to_string()))
            .map_err(|e| {
                WebsearchError::Icon(format!("Could not read image '{}': {}", source.display(), e))
            })?;

        Ok(image.resize(ICON_SIZE, ICON_SIZE, FilterType::Lanczos3))
    }

    /// Write `image` into the icon directory as `<engine_id>.png`.
    ///
    /// Returns the reference to store on the engine.
    pub fn save(&self, engine_id: &str, image: &DynamicImage) -> WebsearchResult<String> {
        let destination = self.icons_dir.join(format!("{}.png", engine_id));

        fs::create_dir_all(&self.icons_dir)?;
        image
            .save_with_format(&destination, ImageFormat::Png)
            .map_err(|e| {
                WebsearchError::Icon(format!(
                    "Could not save image to '{}': {}",
                    destination.display(),
                    e
                ))
            })?;

        Ok(IconRef::file_reference(&destination))
    }

    /// Move a user-supplied icon to the trash directory.
    ///
    /// Resource references are left alone. Returns the trashed location, if
    /// a file was moved. Failures are logged, never returned: a stale icon
    /// must not block the edit that replaced it.
    pub fn discard(&self, reference: &str) -> Option<PathBuf> {
        let icon = IconRef::parse(reference);
        let path = icon.local_path()?;

        if !path.exists() {
            tracing::debug!("Icon {} already gone, nothing to discard", path.display());
            return None;
        }

        match self.move_to_trash(path) {
            Ok(trashed) => {
                tracing::info!("Moved icon {} to {}", path.display(), trashed.display());
                Some(trashed)
            }
            Err(e) => {
                tracing::warn!("Could not move icon {} to trash: {}", path.display(), e);
                None
            }
        }
    }

    fn move_to_trash(&self, path: &Path) -> WebsearchResult<PathBuf> {
        fs::create_dir_all(&self.trash_dir)?;

        let file_name = path
            .file_name()
            .ok_or_else(|| WebsearchError::Icon(format!("'{}' has no file name", path.display())))?;
        let target = unique_target(&self.trash_dir, Path::new(file_name));

        // rename fails across filesystems
        if fs::rename(path, &target).is_err() {
            fs::copy(path, &target)?;
            fs::remove_file(path)?;
        }

        Ok(target)
    }
}

fn unique_target(dir: &Path, file_name: &Path) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let stem = file_name
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let extension = file_name
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    (1..)
        .map(|n| dir.join(format!("{}.{}{}", stem, n, extension)))
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}

/// What an icon reference resolves to for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedIcon {
    File(PathBuf),
    Missing(PathBuf),
    Themed(String),
    Resource(String),
}

/// Memoizes icon resolution per reference.
///
/// Clear it whenever the registry publishes a new snapshot.
#[derive(Debug, Default)]
pub struct IconCache {
    entries: HashMap<String, ResolvedIcon>,
}

impl IconCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&mut self, reference: &str) -> &ResolvedIcon {
        self.entries
            .entry(reference.to_string())
            .or_insert_with(|| resolve_icon(reference))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn resolve_icon(reference: &str) -> ResolvedIcon {
    match IconRef::parse(reference) {
        IconRef::LocalFile(path) if path.is_file() => ResolvedIcon::File(path),
        IconRef::LocalFile(path) => ResolvedIcon::Missing(path),
        IconRef::Resource(name) => match name.strip_prefix(THEME_SCHEME) {
            Some(theme_name) => ResolvedIcon::Themed(theme_name.to_string()),
            None => ResolvedIcon::Resource(name),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(root: &Path) -> IconStore {
        IconStore::new(root.join("icons"), root.join("trash"))
    }

    #[test]
    fn test_parse_references() {
        assert_eq!(
            IconRef::parse("file:/tmp/a.png"),
            IconRef::LocalFile(PathBuf::from("/tmp/a.png"))
        );
        assert_eq!(
            IconRef::parse("file:///tmp/a.png"),
            IconRef::LocalFile(PathBuf::from("/tmp/a.png"))
        );
        assert_eq!(
            IconRef::parse(":google"),
            IconRef::Resource(":google".into())
        );
        assert_eq!(
            IconRef::parse("https://example.com/i.png"),
            IconRef::Resource("https://example.com/i.png".into())
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_parse_absolute_path() {
        assert_eq!(
            IconRef::parse("/home/u/icon.svg"),
            IconRef::LocalFile(PathBuf::from("/home/u/icon.svg"))
        );
    }

    #[test]
    fn test_import_scales_to_png() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("Logo.PNG");
        image::RgbaImage::new(512, 128)
            .save_with_format(&source, ImageFormat::Png)
            .unwrap();

        let icon = IconStore::load(&source).unwrap();
        let reference = store(dir.path()).save("abc12345", &icon).unwrap();

        let expected = dir.path().join("icons").join("abc12345.png");
        assert_eq!(reference, IconRef::file_reference(&expected));
        assert_eq!(image::image_dimensions(&expected).unwrap(), (256, 64));
        let format = ImageReader::open(&expected)
            .unwrap()
            .with_guessed_format()
            .unwrap()
            .format();
        assert_eq!(format, Some(ImageFormat::Png));
        assert!(source.exists());
    }

    #[test]
    fn test_import_detects_format_from_content() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("icon.jpg");
        image::RgbaImage::new(16, 16)
            .save_with_format(&source, ImageFormat::Png)
            .unwrap();

        let icon = IconStore::load(&source).unwrap();
        assert_eq!((icon.width(), icon.height()), (256, 256));
    }

    #[test]
    fn test_import_rejects_non_image() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("notes.png");
        fs::write(&source, b"not an image").unwrap();

        let result = IconStore::load(&source);
        assert!(matches!(result, Err(WebsearchError::Icon(_))));
    }

    #[test]
    fn test_import_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let result = IconStore::load(&dir.path().join("nope.png"));
        assert!(matches!(result, Err(WebsearchError::Icon(_))));
    }

    #[test]
    fn test_discard_moves_local_file_to_trash() {
        let dir = tempfile::tempdir().unwrap();
        let icon = dir.path().join("icon.png");
        fs::write(&icon, b"x").unwrap();

        let icons = store(dir.path());
        let trashed = icons.discard(&IconRef::file_reference(&icon)).unwrap();

        assert!(!icon.exists());
        assert_eq!(trashed, dir.path().join("trash").join("icon.png"));
        assert_eq!(fs::read(trashed).unwrap(), b"x");
    }

    #[test]
    fn test_discard_keeps_earlier_trash() {
        let dir = tempfile::tempdir().unwrap();
        let icons = store(dir.path());
        let icon = dir.path().join("icon.png");

        fs::write(&icon, b"first").unwrap();
        let first = icons.discard(&IconRef::file_reference(&icon)).unwrap();
        fs::write(&icon, b"second").unwrap();
        let second = icons.discard(&IconRef::file_reference(&icon)).unwrap();

        assert_ne!(first, second);
        assert_eq!(second, dir.path().join("trash").join("icon.1.png"));
        assert_eq!(fs::read(first).unwrap(), b"first");
    }

    #[test]
    fn test_discard_ignores_resources_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let icons = store(dir.path());

        assert!(icons.discard(":google").is_none());
        assert!(icons.discard("xdg:firefox").is_none());
        let gone = dir.path().join("gone.png");
        assert!(icons.discard(&IconRef::file_reference(&gone)).is_none());
        assert!(!dir.path().join("trash").exists());
    }

    #[test]
    fn test_cache_resolves_and_memoizes() {
        let dir = tempfile::tempdir().unwrap();
        let icon = dir.path().join("icon.png");
        fs::write(&icon, b"x").unwrap();
        let reference = IconRef::file_reference(&icon);

        let mut cache = IconCache::new();
        assert_eq!(cache.resolve(&reference), &ResolvedIcon::File(icon.clone()));
        assert_eq!(
            cache.resolve("xdg:google"),
            &ResolvedIcon::Themed("google".into())
        );
        assert_eq!(
            cache.resolve(":google"),
            &ResolvedIcon::Resource(":google".into())
        );
        assert_eq!(cache.len(), 3);

        // Stale until cleared
        fs::remove_file(&icon).unwrap();
        assert_eq!(cache.resolve(&reference), &ResolvedIcon::File(icon.clone()));

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.resolve(&reference), &ResolvedIcon::Missing(icon));
    }
}
