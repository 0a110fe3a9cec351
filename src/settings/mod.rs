//! Project settings for content-i18n.
//!
//! Settings are read from a `frontmatter.json` file at the project root. The
//! file is a JSON object keyed by dotted setting names
//! (`frontMatter.content.i18n`, ...); nested objects are accepted as well.

/// Project root discovery and state directories.
mod paths;
/// Typed settings store.
mod store;

pub use paths::{find_project_root, logs_dir};
pub use store::{
    SETTING_CONTENT_I18N, SETTING_CONTENT_PAGE_FOLDERS, SETTING_CONTENT_SUPPORTED_FILETYPES,
    SETTING_TAXONOMY_CONTENT_TYPES, SETTINGS_FILE, Settings, SettingsError,
};
