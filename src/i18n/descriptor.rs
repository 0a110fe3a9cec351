//! File descriptors: where a document lives and under which name its
//! translations are looked up.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, PoisonError};

use super::path;

/// Predicate telling whether a document is a page bundle.
pub trait PageBundleProbe {
    /// What: Check whether `file_path` is the index document of a page bundle.
    fn is_page_bundle(&self, file_path: &str) -> impl Future<Output = bool> + Send;
}

/// Derived location facts for one file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Normalized directory, always ending with `/`. For a page bundle this is
    /// the folder that owns the bundle directory.
    pub dir: String,
    /// Name translations are matched on: the base name, or for a page bundle
    /// the path below `dir` (e.g. `about/index.md`).
    pub filename: String,
    /// Whether the file is a page bundle document.
    pub is_page_bundle: bool,
}

/// What: Folder owning a page bundle, one level above the bundle directory.
///
/// Inputs:
/// - `file_path`: Path of a document inside the bundle directory
///
/// Output:
/// - Normalized parent of the bundle directory (without trailing slash)
#[must_use]
pub fn bundle_owning_dir(file_path: &str) -> String {
    path::parent(&path::parent(file_path))
}

/// Memoizing descriptor resolver.
///
/// Descriptors are cached per raw path until [`DescriptorResolver::clear`] is
/// called. The lock is never held across an await.
#[derive(Debug, Default)]
pub struct DescriptorResolver {
    /// Raw path -> descriptor.
    cache: Mutex<HashMap<String, FileDescriptor>>,
}

impl DescriptorResolver {
    /// What: Create an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// What: Describe a file, consulting the cache first.
    ///
    /// Inputs:
    /// - `probe`: Page-bundle predicate (only consulted on cache miss)
    /// - `file_path`: Raw file path
    ///
    /// Output:
    /// - Cached or freshly computed `FileDescriptor`
    ///
    /// Details:
    /// - For page bundles `dir` moves up to the bundle's owning folder and
    ///   `filename` keeps the nested sub-path
    pub async fn describe<P: PageBundleProbe>(
        &self,
        probe: &P,
        file_path: &str,
    ) -> FileDescriptor {
        if let Some(hit) = self.lookup(file_path) {
            return hit;
        }

        let cleaned = path::clean(file_path);
        let mut dir = path::parent(&cleaned);
        let mut filename = path::file_name(&cleaned);
        let is_page_bundle = probe.is_page_bundle(file_path).await;
        if is_page_bundle {
            dir = bundle_owning_dir(&cleaned);
            if let Some(sub_path) = path::strip_dir_prefix(&cleaned, &dir) {
                filename = sub_path;
            }
        }

        let descriptor = FileDescriptor {
            dir: path::with_trailing_slash(&dir),
            filename,
            is_page_bundle,
        };
        tracing::trace!(file = file_path, ?descriptor, "described file");
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(file_path.to_string(), descriptor.clone());
        descriptor
    }

    /// Cached descriptor for a raw path.
    fn lookup(&self, file_path: &str) -> Option<FileDescriptor> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(file_path)
            .cloned()
    }

    /// What: Drop every cached descriptor.
    pub fn clear(&self) {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        tracing::debug!(entries = cache.len(), "clearing file descriptor cache");
        cache.clear();
    }

    /// Number of cached descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
