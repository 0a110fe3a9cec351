//! Integration tests for locale queries.
//!
//! Tests cover:
//! - Effective locale lists (global and folder overrides)
//! - Default-locale document detection
//! - Locale resolution for default documents, translations and page bundles
//! - Listing existing translations

#![cfg(test)]

use content_i18n::LocaleResolver;
use serde_json::json;

use super::fixture::{Site, default_settings};

const PAGE: &str = "---\ntitle: Hello\npreview: images/cover.png\n---\nBody\n";
const BUNDLE: &str = "---\ntitle: About\ntype: bundle\ncover: cover.png\n---\nAbout us\n";

fn codes(locales: &[content_i18n::models::I18nConfig]) -> Vec<&str> {
    locales.iter().map(|l| l.locale.as_str()).collect()
}

#[tokio::test]
/// What: The root document is the default-locale document.
///
/// Inputs:
/// - `content/page.md` in a folder with `defaultLocale: en`
///
/// Output:
/// - Global locale list applies, document is default, locale resolves to `en`
async fn root_document_is_default_locale() {
    let site = Site::new();
    let page = site.write("content/page.md", PAGE);
    let project = site.project();
    let resolver = LocaleResolver::new(&project);

    let locales = resolver.effective_locales(&page).await.expect("locales apply");
    assert_eq!(codes(&locales), vec!["en", "es", "fr"]);
    assert!(resolver.is_default_locale_document(&page).await);
    assert_eq!(
        resolver.resolve_locale(&page).await.map(|l| l.locale),
        Some("en".to_string())
    );
}

#[tokio::test]
/// What: A document under a locale sub-path resolves to that locale.
///
/// Inputs:
/// - `content/es/page.md` next to `content/page.md`
/// - The same path with different casing and backslashes
///
/// Output:
/// - Locale `es`, not the default document
///
/// Details:
/// - Path comparison ignores case and slash style
async fn translation_resolves_to_its_locale() {
    let site = Site::new();
    site.write("content/page.md", PAGE);
    let es = site.write("content/es/page.md", PAGE);
    let project = site.project();
    let resolver = LocaleResolver::new(&project);

    assert!(!resolver.is_default_locale_document(&es).await);
    assert_eq!(resolver.resolve_locale(&es).await.map(|l| l.locale), Some("es".to_string()));

    let shouted = format!("{}\\content\\ES\\page.md", site.root);
    assert_eq!(
        resolver.resolve_locale(&shouted).await.map(|l| l.locale),
        Some("es".to_string())
    );
}

#[tokio::test]
/// What: Files that fit no locale resolve to nothing.
///
/// Inputs:
/// - A translation-looking file without a default document
/// - A file outside every content folder
/// - A file in an unknown sub-directory
///
/// Output:
/// - `None` for all of them
async fn unmatched_files_have_no_locale() {
    let site = Site::new();
    let orphan = site.write("content/es/orphan.md", PAGE);
    let outside = site.write("notes/page.md", PAGE);
    site.write("content/page.md", PAGE);
    let unknown = site.write("content/de/page.md", PAGE);
    let project = site.project();
    let resolver = LocaleResolver::new(&project);

    assert_eq!(resolver.resolve_locale(&orphan).await, None);
    assert_eq!(resolver.resolve_locale(&outside).await, None);
    assert_eq!(resolver.resolve_locale(&unknown).await, None);
    assert!(!resolver.is_default_locale_document(&outside).await);
}

#[tokio::test]
/// What: Translations list every existing language version.
///
/// Inputs:
/// - `content/page.md` and `content/es/page.md`, no French version
///
/// Output:
/// - `en` and `es` entries with their paths, from either version
async fn translations_list_existing_versions() {
    let site = Site::new();
    let page = site.write("content/page.md", PAGE);
    let es = site.write("content/es/page.md", PAGE);
    let project = site.project();
    let resolver = LocaleResolver::new(&project);

    for start in [&page, &es] {
        let translations = resolver.list_translations(start).await.expect("folder found");
        assert_eq!(translations.keys().map(String::as_str).collect::<Vec<_>>(), vec!["en", "es"]);
        assert_eq!(translations["en"].path, page);
        assert_eq!(translations["es"].path, es);
    }

    let unrelated = site.write("notes/unrelated.md", PAGE);
    assert_eq!(resolver.list_translations(&unrelated).await, None);
}

#[tokio::test]
/// What: Page bundles resolve through their owning folder.
///
/// Inputs:
/// - `content/about/index.md` of a page-bundle content type
/// - `content/es/about/index.md`
///
/// Output:
/// - Bundle document is default (`en`), Spanish bundle resolves to `es`,
///   and both show up as translations
async fn page_bundles_resolve_by_owning_folder() {
    let site = Site::new();
    let about = site.write("content/about/index.md", BUNDLE);
    let es = site.write("content/es/about/index.md", BUNDLE);
    let project = site.project();
    let resolver = LocaleResolver::new(&project);

    let descriptor = resolver.describe(&about).await;
    assert!(descriptor.is_page_bundle);
    assert_eq!(descriptor.filename, "about/index.md");

    assert!(resolver.is_default_locale_document(&about).await);
    assert_eq!(resolver.resolve_locale(&about).await.map(|l| l.locale), Some("en".to_string()));
    assert_eq!(resolver.resolve_locale(&es).await.map(|l| l.locale), Some("es".to_string()));

    let translations = resolver.list_translations(&about).await.expect("folder found");
    assert_eq!(translations["es"].path, es);
}

#[tokio::test]
/// What: Folder locale lists override the global list.
///
/// Inputs:
/// - Folder `blog` with its own `locales`, folder `content` without
///
/// Output:
/// - Blog files get the folder list, content files the global list
async fn folder_locales_override_global_list() {
    let mut settings = default_settings();
    settings["frontMatter.content.pageFolders"] = json!([
        { "path": "[[workspace]]/content", "defaultLocale": "en" },
        {
            "path": "blog",
            "defaultLocale": "en",
            "locales": [
                { "locale": "en", "path": "en" },
                { "locale": "de", "title": "Deutsch", "path": "de" }
            ]
        }
    ]);
    let site = Site::with_settings(&settings);
    let post = site.write("blog/post.md", PAGE);
    let de = site.write("blog/de/post.md", PAGE);
    let page = site.write("content/page.md", PAGE);
    let project = site.project();
    let resolver = LocaleResolver::new(&project);

    let blog_locales = resolver.effective_locales(&post).await.expect("blog locales");
    assert_eq!(codes(&blog_locales), vec!["en", "de"]);
    let content_locales = resolver.effective_locales(&page).await.expect("global locales");
    assert_eq!(codes(&content_locales), vec!["en", "es", "fr"]);
    assert_eq!(resolver.resolve_locale(&de).await.map(|l| l.locale), Some("de".to_string()));
}

#[tokio::test]
/// What: Without any locale configuration nothing resolves.
///
/// Inputs:
/// - Settings without `frontMatter.content.i18n` and a folder without locales
///
/// Output:
/// - `None`/`false` from every query
async fn no_configuration_means_no_answers() {
    let site = Site::with_settings(&json!({
        "frontMatter.content.pageFolders": [ { "path": "content", "defaultLocale": "en" } ]
    }));
    let page = site.write("content/page.md", PAGE);
    let project = site.project();
    let resolver = LocaleResolver::new(&project);

    assert_eq!(resolver.effective_locales(&page).await, None);
    assert!(!resolver.is_default_locale_document(&page).await);
    assert_eq!(resolver.resolve_locale(&page).await, None);
    assert_eq!(resolver.list_translations(&page).await, None);
    assert_eq!(resolver.effective_locales("").await, None);
}

#[tokio::test]
/// What: Clearing the cache picks up a changed page-bundle flag.
///
/// Inputs:
/// - `content/about/index.md` first as a plain page, then as a bundle
///
/// Output:
/// - Cached descriptor until `clear_cache`, fresh one afterwards
async fn clear_cache_refreshes_descriptors() {
    let site = Site::new();
    let about = site.write("content/about/index.md", PAGE);
    let project = site.project();
    let resolver = LocaleResolver::new(&project);

    assert!(!resolver.describe(&about).await.is_page_bundle);
    site.write("content/about/index.md", BUNDLE);
    assert!(!resolver.describe(&about).await.is_page_bundle);
    resolver.clear_cache();
    assert!(resolver.describe(&about).await.is_page_bundle);
}
