//! Registry of configured content folders.

use crate::i18n::path;
use crate::models::ContentFolder;
use crate::settings::{SETTING_CONTENT_PAGE_FOLDERS, Settings};

/// Placeholder for the project root inside configured folder paths.
pub const WORKSPACE_PLACEHOLDER: &str = "[[workspace]]";

/// Content folders known to a project, with absolute normalized paths.
#[derive(Debug, Clone, Default)]
pub struct FolderRegistry {
    /// Registered folders in configuration order.
    folders: Vec<ContentFolder>,
}

impl FolderRegistry {
    /// What: Build a registry from already-absolute folders.
    ///
    /// Details:
    /// - Folder paths are normalized and cleaned; empty paths are dropped
    #[must_use]
    pub fn new(folders: Vec<ContentFolder>) -> Self {
        let folders = folders
            .into_iter()
            .filter(|folder| !folder.path.trim().is_empty())
            .map(|mut folder| {
                folder.path = path::clean(&folder.path);
                folder
            })
            .collect();
        Self { folders }
    }

    /// What: Build the registry from `frontMatter.content.pageFolders`.
    ///
    /// Inputs:
    /// - `settings`: Project settings
    ///
    /// Output:
    /// - Registry with every folder path made absolute
    ///
    /// Details:
    /// - `[[workspace]]` is replaced by the project root
    /// - Relative paths are resolved against the project root
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        let root = path::normalize(&settings.root().to_string_lossy());
        let folders: Vec<ContentFolder> = settings
            .get(SETTING_CONTENT_PAGE_FOLDERS)
            .unwrap_or_default();
        let resolved = folders
            .into_iter()
            .filter(|folder| !folder.path.trim().is_empty())
            .map(|mut folder| {
                let raw = folder.path.replace(WORKSPACE_PLACEHOLDER, &root);
                folder.path = if path::is_absolute(&raw) {
                    raw
                } else {
                    path::join(&[&root, &raw])
                };
                folder
            })
            .collect();
        let registry = Self::new(resolved);
        tracing::debug!(count = registry.folders.len(), "registered content folders");
        registry
    }

    /// All registered folders.
    #[must_use]
    pub fn list(&self) -> &[ContentFolder] {
        &self.folders
    }

    /// What: Find the folder that directly contains a file.
    ///
    /// Inputs:
    /// - `file_path`: Absolute file path
    ///
    /// Output:
    /// - The most specific (longest path) folder containing the file, if any
    ///
    /// Details:
    /// - Containment is case-insensitive and respects segment boundaries, so
    ///   `/site/content` does not contain `/site/contents/x.md`
    /// - Only direct containment; translations are found through the reverse
    ///   lookup in [`crate::i18n::ContentFolderLocator`]
    #[must_use]
    pub fn find_by_file_path(&self, file_path: &str) -> Option<&ContentFolder> {
        self.folders
            .iter()
            .filter(|folder| path::strip_dir_prefix(file_path, &folder.path).is_some())
            .max_by_key(|folder| folder.path.len())
    }
}
