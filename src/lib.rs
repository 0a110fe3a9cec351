//! Library entry for content-i18n exposing the locale engine for the CLI and
//! integration tests.

pub mod content_types;
pub mod folders;
pub mod frontmatter;
pub mod i18n;
pub mod models;
pub mod project;
pub mod settings;
pub mod util;

pub use i18n::{I18nError, LocaleResolver, LocaleSynthesizer};
pub use project::Project;
