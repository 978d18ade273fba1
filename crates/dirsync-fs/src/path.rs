//! Root-relative path handling for cross-platform compatibility

use std::path::{Component, Path, PathBuf};

use serde::Serialize;

/// A path relative to a scan root, normalized to forward slashes.
///
/// Entries never store absolute paths. The empty path denotes the root
/// itself. Conversion to a platform-native path happens only at I/O
/// boundaries, through [`RelPath::under`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RelPath {
    /// Internal representation always uses forward slashes, with no
    /// leading, trailing or repeated separators
    inner: String,
}

impl RelPath {
    /// The root itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Create a new RelPath from any path-like input.
    ///
    /// Backslashes become forward slashes; empty and `.` segments are
    /// dropped.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        let normalized = path_str.replace('\\', "/");
        let inner = normalized
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .collect::<Vec<_>>()
            .join("/");
        Self { inner }
    }

    /// Build a RelPath from the normal components of a native path.
    ///
    /// Root, prefix, `.` and `..` components are skipped, so the result is
    /// always relative.
    pub fn from_components(path: &Path) -> Self {
        let segments: Vec<String> = path
            .components()
            .filter_map(|component| match component {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        Self {
            inner: segments.join("/"),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Whether this path denotes the root.
    pub fn is_root(&self) -> bool {
        self.inner.is_empty()
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment = Self::new(segment);
        if self.is_root() {
            return segment;
        }
        if segment.is_root() {
            return self.clone();
        }
        Self {
            inner: format!("{}/{}", self.inner, segment.inner),
        }
    }

    /// Get the parent path. The root has no parent.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        match self.inner.rfind('/') {
            Some(idx) => Some(Self {
                inner: self.inner[..idx].to_string(),
            }),
            None => Some(Self::root()),
        }
    }

    /// Get the last component.
    pub fn file_name(&self) -> Option<&str> {
        if self.is_root() {
            return None;
        }
        self.inner.rsplit('/').next()
    }

    /// Number of components below the root.
    pub fn depth(&self) -> usize {
        if self.is_root() {
            0
        } else {
            self.inner.split('/').count()
        }
    }

    /// Resolve this path under a native root directory.
    pub fn under(&self, root: &Path) -> PathBuf {
        self.inner
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(root.to_path_buf(), |acc, segment| acc.join(segment))
    }
}

impl std::fmt::Display for RelPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for RelPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RelPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&Path> for RelPath {
    fn from(p: &Path) -> Self {
        Self::from_components(p)
    }
}
