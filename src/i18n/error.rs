//! Failure modes of locale operations.

use crate::frontmatter::FrontMatterError;

/// What: Why a locale operation could not complete.
///
/// Details:
/// - Every variant is recoverable; the user can fix the cause and retry
/// - Precondition variants are raised before anything is written
#[derive(Debug, thiserror::Error)]
pub enum I18nError {
    /// No file given, or the given file does not exist.
    #[error("no file selected")]
    NoFileSelected,
    /// No locale configuration applies, or the chosen locale has no sub-path.
    #[error("no i18n configuration found for this file")]
    NoConfig,
    /// Translations can only be created from the default-locale document.
    #[error("the file is not the default locale document; open the original to create a translation")]
    NotDefaultLocale,
    /// The source document could not be read or parsed.
    #[error("unable to read front matter of {path}: {source}")]
    NoFile {
        /// Source document.
        path: String,
        /// Parse or read failure.
        #[source]
        source: FrontMatterError,
    },
    /// No content type matches the source document.
    #[error("no content type found for {path}")]
    NoContentType {
        /// Source document.
        path: String,
    },
    /// The translation already exists.
    #[error("{path} already exists")]
    FileExists {
        /// Destination document.
        path: String,
    },
    /// The translated front matter could not be encoded.
    #[error("failed to serialize front matter: {0}")]
    Serialize(#[source] FrontMatterError),
    /// A file-system operation failed while writing the translation.
    #[error("file system error: {0}")]
    Io(#[from] std::io::Error),
}
