//! Product photo loading.
//!
//! The [`AssetStore`] tracks which image paths have been requested and which
//! have settled (loaded or failed). A sheet renders only once every image it
//! references and the store has requested has settled. A failed image counts
//! as settled and leaves its stamp's image box blank, as does a path nobody
//! requested.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::error::{Result, StampError};

/// Source of decoded product photos.
pub trait ImageLoader {
    fn load(&self, path: &Path) -> Result<RgbaImage>;
}

/// Loads images from disk, resolving relative paths against `base_dir`.
#[derive(Debug, Clone, Default)]
pub struct FileLoader {
    base_dir: PathBuf,
}

impl FileLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

impl ImageLoader for FileLoader {
    fn load(&self, path: &Path) -> Result<RgbaImage> {
        let full = self.resolve(path);
        let img = image::open(&full)
            .map_err(|e| StampError::Image(format!("{}: {}", full.display(), e)))?;
        Ok(img.to_rgba8())
    }
}

/// Requested and settled image loads.
#[derive(Debug, Default)]
pub struct AssetStore {
    requested: BTreeSet<PathBuf>,
    images: HashMap<PathBuf, RgbaImage>,
    failed: BTreeSet<PathBuf>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a path as wanted. Requesting twice is a no-op.
    pub fn request(&mut self, path: &Path) {
        self.requested.insert(path.to_path_buf());
    }

    /// Record the outcome of a load.
    pub fn settle(&mut self, path: &Path, result: Result<RgbaImage>) {
        let key = path.to_path_buf();
        self.requested.insert(key.clone());
        match result {
            Ok(img) => {
                self.failed.remove(&key);
                self.images.insert(key, img);
            }
            Err(e) => {
                log::warn!("image {} failed to load: {}", path.display(), e);
                self.images.remove(&key);
                self.failed.insert(key);
            }
        }
    }

    /// Load every requested path that has not settled yet.
    pub fn load_pending(&mut self, loader: &dyn ImageLoader) {
        let pending: Vec<PathBuf> = self
            .requested
            .iter()
            .filter(|p| !self.is_path_settled(p))
            .cloned()
            .collect();
        for path in pending {
            let result = loader.load(&path);
            self.settle(&path, result);
        }
    }

    /// Request and load all of `paths`.
    pub fn load_all<'a, I>(&mut self, paths: I, loader: &dyn ImageLoader)
    where
        I: IntoIterator<Item = &'a Path>,
    {
        for path in paths {
            self.request(path);
        }
        self.load_pending(loader);
    }

    fn is_path_settled(&self, path: &Path) -> bool {
        self.images.contains_key(path) || self.failed.contains(path)
    }

    pub fn is_requested(&self, path: &Path) -> bool {
        self.requested.contains(path)
    }

    /// `(settled, requested)` counts over the requested subset of `paths`.
    pub fn progress<'a, I>(&self, paths: I) -> (usize, usize)
    where
        I: IntoIterator<Item = &'a Path>,
    {
        let wanted: BTreeSet<&Path> = paths
            .into_iter()
            .filter(|p| self.is_requested(p))
            .collect();
        let settled = wanted.iter().filter(|p| self.is_path_settled(p)).count();
        (settled, wanted.len())
    }

    /// True when every one of `paths` has settled.
    pub fn is_settled<'a, I>(&self, paths: I) -> bool
    where
        I: IntoIterator<Item = &'a Path>,
    {
        let (settled, requested) = self.progress(paths);
        settled == requested
    }

    /// The decoded image, if it loaded.
    pub fn get(&self, path: &Path) -> Option<&RgbaImage> {
        self.images.get(path)
    }

    pub fn failures(&self) -> usize {
        self.failed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::cell::RefCell;

    /// Loader that serves a fixed image for paths containing "ok".
    struct FakeLoader {
        calls: RefCell<Vec<PathBuf>>,
    }

    impl FakeLoader {
        fn new() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl ImageLoader for FakeLoader {
        fn load(&self, path: &Path) -> Result<RgbaImage> {
            self.calls.borrow_mut().push(path.to_path_buf());
            if path.to_string_lossy().contains("ok") {
                Ok(RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255])))
            } else {
                Err(StampError::Image("missing".into()))
            }
        }
    }

    #[test]
    fn test_pending_until_settled() {
        let mut store = AssetStore::new();
        let a = Path::new("ok/a.png");
        let b = Path::new("bad/b.png");
        store.request(a);
        store.request(b);
        assert_eq!(store.progress([a, b]), (0, 2));
        assert!(!store.is_settled([a, b]));

        store.load_pending(&FakeLoader::new());
        assert!(store.is_settled([a, b]));
        assert!(store.get(a).is_some());
        assert!(store.get(b).is_none());
        assert_eq!(store.failures(), 1);
    }

    #[test]
    fn test_loads_each_path_once() {
        let loader = FakeLoader::new();
        let mut store = AssetStore::new();
        let a = Path::new("ok/a.png");
        store.load_all([a, a], &loader);
        store.load_all([a], &loader);
        assert_eq!(loader.calls.borrow().len(), 1);
    }

    #[test]
    fn test_unrequested_paths_do_not_block() {
        let mut store = AssetStore::new();
        let a = Path::new("ok/a.png");
        let b = Path::new("ok/b.png");
        assert_eq!(store.progress([a, b]), (0, 0));
        assert!(store.is_settled([a, b]));

        store.request(a);
        assert_eq!(store.progress([a, b]), (0, 1));
        assert!(!store.is_requested(b));
    }

    #[test]
    fn test_empty_path_set_is_settled() {
        let store = AssetStore::new();
        assert!(store.is_settled(std::iter::empty::<&Path>()));
    }

    #[test]
    fn test_file_loader_resolves_relative() {
        let loader = FileLoader::new("/data/photos");
        assert_eq!(loader.resolve(Path::new("a.png")), PathBuf::from("/data/photos/a.png"));
        assert_eq!(loader.resolve(Path::new("/x/b.png")), PathBuf::from("/x/b.png"));
    }

    #[test]
    fn test_file_loader_missing_file_is_error() {
        let loader = FileLoader::new(std::env::temp_dir());
        assert!(loader.load(Path::new("stampsheet-does-not-exist.png")).is_err());
    }
}
