//! Translation map and translation slot computation.

use std::collections::BTreeMap;

use crate::models::{ContentFolder, I18nConfig};

use super::descriptor::FileDescriptor;
use super::path;

/// An existing translation of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Locale the file belongs to.
    pub locale: I18nConfig,
    /// Path of the translated document.
    pub path: String,
}

/// Translation map: locale code -> existing translation.
pub type TranslationMap = BTreeMap<String, Translation>;

/// What: Where a locale's version of a document is expected to live.
///
/// Inputs:
/// - `folder`: Content folder owning the document
/// - `locale`: Locale entry
/// - `descriptor`: Descriptor of any language version of the document
///
/// Output:
/// - `Some(path)` of the expected document, `None` when the locale has no slot
///
/// Details:
/// - The folder's default locale always lives at the folder root, whatever
///   `path` its entry declares
/// - Any other locale needs a `path`; an entry without one has no slot
#[must_use]
pub fn translation_slot(
    folder: &ContentFolder,
    locale: &I18nConfig,
    descriptor: &FileDescriptor,
) -> Option<String> {
    if folder.default_locale.as_deref() == Some(locale.locale.as_str()) {
        return Some(path::join(&[&folder.path, &descriptor.filename]));
    }
    locale
        .sub_path()
        .map(|sub_path| path::join(&[&folder.path, sub_path, &descriptor.filename]))
}
