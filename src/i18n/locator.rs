//! Reverse lookup of the content folder that owns a translation.

use crate::folders::FolderRegistry;
use crate::models::ContentFolder;
use crate::util;

use super::descriptor::FileDescriptor;
use super::path;

/// Finds the locale-enabled folder whose default-locale document corresponds
/// to a given file.
#[derive(Debug, Clone, Copy)]
pub struct ContentFolderLocator<'a> {
    /// Folders to probe.
    folders: &'a FolderRegistry,
}

impl<'a> ContentFolderLocator<'a> {
    /// What: Create a locator over a folder registry.
    #[must_use]
    pub const fn new(folders: &'a FolderRegistry) -> Self {
        Self { folders }
    }

    /// What: Find the folder owning the default-locale original of a file.
    ///
    /// Inputs:
    /// - `descriptor`: Descriptor of the file under inspection
    ///
    /// Output:
    /// - First folder with a `default_locale` for which
    ///   `folder.path + descriptor.filename` exists, or `None`
    ///
    /// Details:
    /// - Linear probe in configuration order, one existence check per
    ///   locale-enabled folder
    pub async fn find_owning_folder(&self, descriptor: &FileDescriptor) -> Option<&'a ContentFolder> {
        for folder in self
            .folders
            .list()
            .iter()
            .filter(|folder| folder.default_locale.is_some())
        {
            let default_file = path::join(&[&folder.path, &descriptor.filename]);
            if util::exists(&default_file).await {
                tracing::debug!(folder = %folder.path, file = %default_file, "found owning content folder");
                return Some(folder);
            }
        }
        tracing::debug!(filename = %descriptor.filename, "no content folder owns this file");
        None
    }
}
