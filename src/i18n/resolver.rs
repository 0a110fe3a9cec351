//! Locale resolution for content files.
//!
//! Answers which locale list applies to a file, whether the file is the
//! default-locale document, which locale it belongs to, and which of its
//! translations exist.

use crate::models::{ContentFolder, I18nConfig};
use crate::project::Project;
use crate::util;

use super::descriptor::{DescriptorResolver, FileDescriptor};
use super::locator::ContentFolderLocator;
use super::path;
use super::translations::{Translation, TranslationMap, translation_slot};

/// Locale resolver bound to one project.
///
/// Owns the descriptor cache; call [`LocaleResolver::clear_cache`] whenever
/// the project configuration or file layout may have changed.
#[derive(Debug)]
pub struct LocaleResolver<'p> {
    /// Project being resolved against.
    project: &'p Project,
    /// Descriptor cache.
    descriptors: DescriptorResolver,
}

impl<'p> LocaleResolver<'p> {
    /// What: Create a resolver with an empty descriptor cache.
    #[must_use]
    pub fn new(project: &'p Project) -> Self {
        Self {
            project,
            descriptors: DescriptorResolver::new(),
        }
    }

    /// Project this resolver reads.
    #[must_use]
    pub const fn project(&self) -> &'p Project {
        self.project
    }

    /// What: Forget every cached file descriptor.
    pub fn clear_cache(&self) {
        self.descriptors.clear();
    }

    /// What: Describe a file through the cache.
    pub async fn describe(&self, file_path: &str) -> FileDescriptor {
        self.descriptors.describe(self.project, file_path).await
    }

    /// What: Folder directly containing a file.
    #[must_use]
    pub fn direct_folder(&self, file_path: &str) -> Option<&'p ContentFolder> {
        self.project.folders().find_by_file_path(file_path)
    }

    /// What: Reverse lookup of the folder owning a file's default document.
    pub async fn find_owning_folder(&self, file_path: &str) -> Option<&'p ContentFolder> {
        let descriptor = self.describe(file_path).await;
        ContentFolderLocator::new(self.project.folders())
            .find_owning_folder(&descriptor)
            .await
    }

    /// What: Locale list that applies to a file.
    ///
    /// Inputs:
    /// - `file_path`: Raw file path
    ///
    /// Output:
    /// - The owning folder's `locales` when declared, otherwise the global
    ///   list, or `None` when neither exists
    ///
    /// Details:
    /// - The folder is found by direct containment; the reverse lookup is
    ///   only used when no folder contains the file
    pub async fn effective_locales(&self, file_path: &str) -> Option<Vec<I18nConfig>> {
        if file_path.trim().is_empty() {
            return None;
        }
        let folder = match self.direct_folder(file_path) {
            Some(folder) => Some(folder),
            None => self.find_owning_folder(file_path).await,
        };
        if let Some(locales) = folder.and_then(|f| f.locales.clone()) {
            return Some(locales);
        }
        self.project.global_locales()
    }

    /// What: Whether a file is the canonical default-locale document.
    ///
    /// Inputs:
    /// - `file_path`: Raw file path
    ///
    /// Output:
    /// - `true` only when a locale list applies, the containing folder names a
    ///   default locale, and the file sits directly in the folder root
    ///   (page bundles count by their owning folder)
    pub async fn is_default_locale_document(&self, file_path: &str) -> bool {
        if self.effective_locales(file_path).await.is_none() {
            return false;
        }
        let Some(folder) = self
            .direct_folder(file_path)
            .filter(|f| f.default_locale.is_some())
        else {
            return false;
        };
        let descriptor = self.describe(file_path).await;
        sits_in_root(&descriptor, folder)
    }

    /// What: Locale entry a file belongs to.
    ///
    /// Inputs:
    /// - `file_path`: Raw file path
    ///
    /// Output:
    /// - The default-locale entry for a document in a folder root, the
    ///   matching translation entry for a document in a locale sub-path, or
    ///   `None` when the file fits neither
    ///
    /// Details:
    /// - Paths compare case-insensitively, locale codes case-sensitively
    /// - Entries without `path`, and the folder's default locale, are never
    ///   matched as translations
    pub async fn resolve_locale(&self, file_path: &str) -> Option<I18nConfig> {
        let locales = self.effective_locales(file_path).await?;
        let descriptor = self.describe(file_path).await;

        if let Some(folder) = self.direct_folder(file_path)
            && let Some(default_locale) = folder.default_locale.as_deref()
            && sits_in_root(&descriptor, folder)
        {
            tracing::debug!(file = file_path, locale = default_locale, "file is the default locale document");
            return locales.into_iter().find(|l| l.locale == default_locale);
        }

        let folder = ContentFolderLocator::new(self.project.folders())
            .find_owning_folder(&descriptor)
            .await?;
        let default_locale = folder.default_locale.as_deref();
        let found = locales.into_iter().find(|locale| {
            Some(locale.locale.as_str()) != default_locale
                && locale.sub_path().is_some_and(|sub_path| {
                    let expected = path::join(&[&folder.path, sub_path, &descriptor.filename]);
                    path::paths_equal(&expected, &path::clean(file_path))
                })
        });
        tracing::debug!(file = file_path, locale = ?found.as_ref().map(|l| &l.locale), "resolved translation locale");
        found
    }

    /// What: Existing language versions of a document.
    ///
    /// Inputs:
    /// - `file_path`: Any language version of the document
    ///
    /// Output:
    /// - Map of locale code to existing file (possibly empty), or `None` when
    ///   no locale list or no owning folder can be established
    ///
    /// Details:
    /// - A directly-containing folder with a default locale is used as is;
    ///   otherwise the reverse lookup decides
    pub async fn list_translations(&self, file_path: &str) -> Option<TranslationMap> {
        let locales = self.effective_locales(file_path).await?;
        let descriptor = self.describe(file_path).await;

        let folder = match self
            .direct_folder(file_path)
            .filter(|f| f.default_locale.is_some())
        {
            Some(folder) => folder,
            None => {
                ContentFolderLocator::new(self.project.folders())
                    .find_owning_folder(&descriptor)
                    .await?
            }
        };

        let mut translations = TranslationMap::new();
        for locale in locales {
            let Some(slot) = translation_slot(folder, &locale, &descriptor) else {
                continue;
            };
            if util::exists(&slot).await {
                translations.insert(
                    locale.locale.clone(),
                    Translation {
                        locale,
                        path: slot,
                    },
                );
            }
        }
        tracing::debug!(file = file_path, count = translations.len(), "listed translations");
        Some(translations)
    }
}

/// Whether a descriptor's directory is exactly the folder root.
fn sits_in_root(descriptor: &FileDescriptor, folder: &ContentFolder) -> bool {
    path::paths_equal(&descriptor.dir, &path::with_trailing_slash(&folder.path))
}
