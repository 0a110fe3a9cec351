//! Configuration data model shared by the settings store and the i18n engine.

use serde::{Deserialize, Serialize};

/// One configured locale.
///
/// `path` is the sub-path (relative to a content folder root) where the
/// translations for this locale live. Whether an entry is the default locale
/// is decided by [`ContentFolder::default_locale`], never by `path` being
/// absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct I18nConfig {
    /// Locale code, unique within one list (e.g. `en`, `es`, `pt-BR`).
    pub locale: String,
    /// Human readable name shown in prompts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Folder-relative sub-path for this locale's translations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl I18nConfig {
    /// What: Name to show for this locale.
    ///
    /// Output:
    /// - `title` when set and non-empty, otherwise the locale code
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.locale)
    }

    /// What: Sub-path of this locale, treating an empty string as absent.
    #[must_use]
    pub fn sub_path(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.trim().is_empty())
    }
}

/// A configured content root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentFolder {
    /// Display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Absolute root directory (normalized once the registry is built).
    pub path: String,
    /// Locale code whose documents live directly in `path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<String>,
    /// Locale list overriding the global list for this folder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locales: Option<Vec<I18nConfig>>,
}

/// A field in a content-type schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Front-matter key.
    pub name: String,
    /// Field type (`string`, `image`, `fields`, `block`, ...).
    #[serde(rename = "type")]
    pub field_type: String,
    /// Display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Whether an image/choice field holds a list of values.
    #[serde(default)]
    pub multiple: bool,
    /// Nested fields of a group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<Field>>,
}

impl Field {
    /// Convenience constructor for a flat field.
    #[must_use]
    pub fn new(name: &str, field_type: &str) -> Self {
        Self {
            name: name.to_string(),
            field_type: field_type.to_string(),
            title: None,
            multiple: false,
            fields: None,
        }
    }
}

/// A content-type schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentType {
    /// Content-type name, matched against the document's `type` field.
    pub name: String,
    /// Declared fields.
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Whether documents of this type are page bundles.
    #[serde(default)]
    pub page_bundle: bool,
}
