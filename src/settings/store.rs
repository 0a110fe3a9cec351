//! Typed access to `frontmatter.json`.
//!
//! Values are looked up by dotted key and deserialized on demand; a value of
//! the wrong shape is logged and treated as absent.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Name of the project settings file.
pub const SETTINGS_FILE: &str = "frontmatter.json";
/// Global locale list.
pub const SETTING_CONTENT_I18N: &str = "frontMatter.content.i18n";
/// Registered content folders.
pub const SETTING_CONTENT_PAGE_FOLDERS: &str = "frontMatter.content.pageFolders";
/// Content-type schemas.
pub const SETTING_TAXONOMY_CONTENT_TYPES: &str = "frontMatter.taxonomy.contentTypes";
/// Extensions treated as content documents.
pub const SETTING_CONTENT_SUPPORTED_FILETYPES: &str = "frontMatter.content.supportedFileTypes";

/// What: Failures while loading the project settings file.
///
/// Details:
/// - Individual keys with unexpected shapes are not errors; they are logged
///   and reported as absent by [`Settings::get`].
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Settings file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The settings file is not valid JSON.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// Settings file path.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// The settings file holds JSON that is not an object.
    #[error("{} must contain a JSON object", path.display())]
    NotAnObject {
        /// Settings file path.
        path: PathBuf,
    },
}

/// Read-only typed settings store for one project.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Project root directory.
    root: PathBuf,
    /// Raw settings object.
    values: Map<String, Value>,
}

impl Settings {
    /// What: Load `frontmatter.json` from a project root.
    ///
    /// Inputs:
    /// - `root`: Project root directory
    ///
    /// Output:
    /// - Loaded `Settings`
    ///
    /// # Errors
    /// - `SettingsError::Read` when the file cannot be read
    /// - `SettingsError::Parse` when the file is not valid JSON
    /// - `SettingsError::NotAnObject` when the top-level value is not an object
    pub fn load(root: &Path) -> Result<Self, SettingsError> {
        let path = root.join(SETTINGS_FILE);
        let contents = fs::read_to_string(&path).map_err(|source| SettingsError::Read {
            path: path.clone(),
            source,
        })?;
        let value: Value = serde_json::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: path.clone(),
            source,
        })?;
        let Value::Object(values) = value else {
            return Err(SettingsError::NotAnObject { path });
        };
        tracing::debug!(path = %path.display(), keys = values.len(), "loaded project settings");
        Ok(Self::from_map(root.to_path_buf(), values))
    }

    /// What: Build settings from an in-memory JSON object.
    #[must_use]
    pub const fn from_map(root: PathBuf, values: Map<String, Value>) -> Self {
        Self { root, values }
    }

    /// Project root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// What: Look up a setting and deserialize it.
    ///
    /// Inputs:
    /// - `key`: Dotted setting name (e.g. `frontMatter.content.i18n`)
    ///
    /// Output:
    /// - `Some(T)` when the key is present and has the expected shape
    ///
    /// Details:
    /// - Tries the flat dotted key first, then walks nested objects segment
    ///   by segment
    /// - `null` counts as absent
    /// - A present value of the wrong shape is logged and treated as absent
    #[must_use]
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.raw(key)?;
        if raw.is_null() {
            return None;
        }
        match serde_json::from_value(raw.clone()) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "ignoring malformed setting");
                None
            }
        }
    }

    /// Raw JSON value for a key, flat or nested.
    fn raw(&self, key: &str) -> Option<&Value> {
        if let Some(value) = self.values.get(key) {
            return Some(value);
        }
        let mut segments = key.split('.');
        let mut current = self.values.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }
}
