//! Locale resolution and synchronization for content files.
//!
//! # Overview
//!
//! A content folder with a `defaultLocale` holds the default-locale documents
//! at its root; each other locale lives under its own sub-path:
//!
//! ```text
//! content/
//!   page.md          <- default locale (e.g. en)
//!   about/index.md   <- default locale page bundle
//!   es/page.md       <- Spanish translation
//!   es/about/index.md
//! ```
//!
//! - **Path normalization** ([`path`]): forward-slash, case-insensitive paths
//! - **File descriptors** ([`DescriptorResolver`]): cached directory/filename
//!   split, aware of page bundles
//! - **Folder location** ([`ContentFolderLocator`]): find the folder owning a
//!   translated file by probing for its default document
//! - **Locale queries** ([`LocaleResolver`]): effective locales, default
//!   document check, locale of a file, existing translations
//! - **Translation creation** ([`LocaleSynthesizer`]): copy a default document
//!   into another locale, rewriting image paths and copying bundle assets
//!
//! # Error Handling
//!
//! Queries answer with `Option`/`bool` and never fail. Creating a translation
//! returns [`I18nError`]; every precondition is checked before anything is
//! written, and an existing translation is never overwritten.

mod descriptor;
mod error;
mod locator;
pub mod path;
mod resolver;
mod synthesizer;
mod translations;

pub use descriptor::{DescriptorResolver, FileDescriptor, PageBundleProbe, bundle_owning_dir};
pub use error::I18nError;
pub use locator::ContentFolderLocator;
pub use resolver::LocaleResolver;
pub use synthesizer::{
    CreatedTranslation, Destination, LocalePrompt, LocaleSynthesizer, destination_for,
    rewrite_image_fields,
};
pub use translations::{Translation, TranslationMap, translation_slot};
