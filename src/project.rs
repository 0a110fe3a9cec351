//! A loaded content project: settings, content folders and content types.

use std::path::Path;

use crate::content_types::ContentTypes;
use crate::folders::FolderRegistry;
use crate::frontmatter::FrontMatter;
use crate::i18n::PageBundleProbe;
use crate::models::I18nConfig;
use crate::settings::{
    SETTING_CONTENT_I18N, SETTING_CONTENT_SUPPORTED_FILETYPES, Settings, SettingsError,
};

/// Content document extensions used when none are configured.
const DEFAULT_FILE_TYPES: [&str; 3] = ["md", "markdown", "mdx"];

/// Everything the i18n engine reads about a project.
#[derive(Debug, Clone)]
pub struct Project {
    /// Raw settings.
    settings: Settings,
    /// Content folder registry.
    folders: FolderRegistry,
    /// Content-type schemas.
    content_types: ContentTypes,
    /// Lower-cased document extensions.
    file_types: Vec<String>,
}

impl Project {
    /// What: Load a project from its root directory.
    ///
    /// # Errors
    /// - Propagates [`SettingsError`] when `frontmatter.json` cannot be loaded
    pub fn load(root: &Path) -> Result<Self, SettingsError> {
        Ok(Self::from_settings(Settings::load(root)?))
    }

    /// What: Build a project from loaded settings.
    #[must_use]
    pub fn from_settings(settings: Settings) -> Self {
        let folders = FolderRegistry::from_settings(&settings);
        let content_types = ContentTypes::from_settings(&settings);
        let file_types = settings
            .get::<Vec<String>>(SETTING_CONTENT_SUPPORTED_FILETYPES)
            .unwrap_or_else(|| DEFAULT_FILE_TYPES.iter().map(ToString::to_string).collect())
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_lowercase())
            .collect();
        Self {
            settings,
            folders,
            content_types,
            file_types,
        }
    }

    /// Content folder registry.
    #[must_use]
    pub const fn folders(&self) -> &FolderRegistry {
        &self.folders
    }

    /// Content-type schemas.
    #[must_use]
    pub const fn content_types(&self) -> &ContentTypes {
        &self.content_types
    }

    /// What: The global locale list (`frontMatter.content.i18n`).
    #[must_use]
    pub fn global_locales(&self) -> Option<Vec<I18nConfig>> {
        self.settings.get(SETTING_CONTENT_I18N)
    }

    /// What: Whether a path names a content document (by extension).
    #[must_use]
    pub fn is_content_file(&self, file_path: &str) -> bool {
        Path::new(file_path)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.file_types.iter().any(|t| t.eq_ignore_ascii_case(ext)))
    }
}

impl PageBundleProbe for Project {
    /// A document is a page bundle when its content type says so.
    async fn is_page_bundle(&self, file_path: &str) -> bool {
        match FrontMatter::parse_file(file_path).await {
            Ok(document) => self
                .content_types
                .schema_for(&document)
                .is_some_and(|ct| ct.page_bundle),
            Err(e) => {
                tracing::debug!(file = file_path, error = %e, "not a readable document, treating as single file");
                false
            }
        }
    }
}
