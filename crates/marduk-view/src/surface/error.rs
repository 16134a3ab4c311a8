use std::fmt;
use std::path::PathBuf;

/// Failure to load an image file into an [`super::ImageSurface`].
#[derive(Debug)]
pub struct LoadError {
    pub path: PathBuf,
    source: image::ImageError,
}

impl LoadError {
    pub(crate) fn new(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self { path: path.into(), source }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to load image {}: {}", self.path.display(), self.source)
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
