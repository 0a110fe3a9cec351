//! Integration tests for creating translations.
//!
//! Tests cover:
//! - Single-file and page-bundle copies
//! - Image path rewriting
//! - Precondition failures leave the tree untouched
//! - TOML front matter

#![cfg(test)]

use content_i18n::{I18nError, LocaleResolver, LocaleSynthesizer};
use serde_json::json;

use super::fixture::{ScriptedPrompt, Site, default_settings};

const PAGE: &str = "---\ntitle: Hello\npreview: images/cover.png\n---\nBody\n";
const BUNDLE: &str = "---\ntitle: About\ntype: bundle\ncover: cover.png\n---\nAbout us\n";

#[tokio::test]
/// What: Create a Spanish copy of a single-file document.
///
/// Inputs:
/// - `content/page.md` with a relative `preview` image
///
/// Output:
/// - `content/es/page.md` with the image pointing one level up and the body kept
///
/// Details:
/// - The default locale and the prompt's refresh signal are checked too
async fn creates_translation_of_single_file() {
    let site = Site::new();
    let page = site.write("content/page.md", PAGE);
    let project = site.project();
    let resolver = LocaleResolver::new(&project);
    let prompt = ScriptedPrompt::answering(Some("Spanish"));

    let created = LocaleSynthesizer::new(&resolver)
        .create_localized_copy(Some(&page), &prompt)
        .await
        .expect("translation created")
        .expect("prompt answered");

    assert_eq!(created.path, site.path("content/es/page.md"));
    assert_eq!(created.locale.locale, "es");
    assert_eq!(created.display_name, "Spanish");
    assert!(created.copied_assets.is_empty());
    assert_eq!(*prompt.offered.lock().expect("offered lock"), vec!["es", "fr"]);
    assert_eq!(*prompt.refreshed.lock().expect("refreshed lock"), vec![created.path.clone()]);

    let written = site.read("content/es/page.md");
    assert!(written.starts_with("---\n"));
    assert!(written.contains("title: Hello"));
    assert!(written.contains("preview: ../images/cover.png"));
    assert!(written.ends_with("---\nBody\n"));

    assert_eq!(
        resolver.resolve_locale(&created.path).await.map(|l| l.locale),
        Some("es".to_string())
    );
}

#[tokio::test]
/// What: An existing translation is never overwritten.
///
/// Inputs:
/// - `content/fr/page.md` already present
///
/// Output:
/// - `FileExists` and the existing bytes unchanged
async fn existing_translation_is_kept() {
    let site = Site::new();
    let page = site.write("content/page.md", PAGE);
    site.write("content/fr/page.md", "hand written\n");
    let project = site.project();
    let resolver = LocaleResolver::new(&project);

    let result = LocaleSynthesizer::new(&resolver)
        .create_localized_copy(Some(&page), &ScriptedPrompt::answering(Some("fr")))
        .await;

    assert!(matches!(result, Err(I18nError::FileExists { ref path }) if *path == site.path("content/fr/page.md")));
    assert_eq!(site.read("content/fr/page.md"), "hand written\n");
}

#[tokio::test]
/// What: Create a translation of a page bundle.
///
/// Inputs:
/// - `content/about/index.md` with `cover.png` and `img/team.jpg` beside it
///
/// Output:
/// - `content/es/about/index.md`, both assets copied, `cover` unchanged
async fn creates_page_bundle_translation_with_assets() {
    let site = Site::new();
    let about = site.write("content/about/index.md", BUNDLE);
    site.write("content/about/cover.png", "png");
    site.write("content/about/img/team.jpg", "jpg");
    site.write("content/about/notes.md", "not copied\n");
    let project = site.project();
    let resolver = LocaleResolver::new(&project);

    let created = LocaleSynthesizer::new(&resolver)
        .create_localized_copy(Some(&about), &ScriptedPrompt::answering(Some("es")))
        .await
        .expect("translation created")
        .expect("prompt answered");

    assert_eq!(created.path, site.path("content/es/about/index.md"));
    let mut assets = created.copied_assets.clone();
    assets.sort();
    assert_eq!(
        assets,
        vec![site.path("content/es/about/cover.png"), site.path("content/es/about/img/team.jpg")]
    );
    assert_eq!(site.read("content/es/about/cover.png"), "png");
    assert!(!std::path::Path::new(&site.path("content/es/about/notes.md")).exists());

    let written = site.read("content/es/about/index.md");
    assert!(written.contains("cover: cover.png"));
    assert!(written.contains("type: bundle"));
}

#[tokio::test]
/// What: Translations can only start from the default document.
///
/// Inputs:
/// - `content/es/page.md` as the source
///
/// Output:
/// - `NotDefaultLocale` and no prompt shown
async fn translation_source_must_be_default_document() {
    let site = Site::new();
    site.write("content/page.md", PAGE);
    let es = site.write("content/es/page.md", PAGE);
    let project = site.project();
    let resolver = LocaleResolver::new(&project);
    let prompt = ScriptedPrompt::answering(Some("fr"));

    let result = LocaleSynthesizer::new(&resolver)
        .create_localized_copy(Some(&es), &prompt)
        .await;

    assert!(matches!(result, Err(I18nError::NotDefaultLocale)));
    assert!(prompt.offered.lock().expect("offered lock").is_empty());
    assert!(!std::path::Path::new(&site.path("content/es/fr/page.md")).exists());
}

#[tokio::test]
/// What: Missing or absent source files are rejected.
///
/// Inputs:
/// - `None`, an empty path and a path that does not exist
///
/// Output:
/// - `NoFileSelected` for each
async fn missing_source_is_rejected() {
    let site = Site::new();
    let project = site.project();
    let resolver = LocaleResolver::new(&project);
    let synthesizer = LocaleSynthesizer::new(&resolver);
    let prompt = ScriptedPrompt::answering(Some("es"));
    let missing = site.path("content/missing.md");

    for file in [None, Some(""), Some(missing.as_str())] {
        let result = synthesizer.create_localized_copy(file, &prompt).await;
        assert!(matches!(result, Err(I18nError::NoFileSelected)), "{file:?}");
    }
}

#[tokio::test]
/// What: Configuration problems stop creation before anything is written.
///
/// Inputs:
/// - A project without locales
/// - A locale answer that matches nothing
/// - A project whose content types lack `default`
/// - A document with broken front matter
///
/// Output:
/// - `NoConfig`, `NoConfig`, `NoContentType` and `NoFile` respectively
async fn configuration_errors_write_nothing() {
    let bare = Site::with_settings(&json!({
        "frontMatter.content.pageFolders": [ { "path": "content", "defaultLocale": "en" } ]
    }));
    let page = bare.write("content/page.md", PAGE);
    let project = bare.project();
    let resolver = LocaleResolver::new(&project);
    let result = LocaleSynthesizer::new(&resolver)
        .create_localized_copy(Some(&page), &ScriptedPrompt::answering(Some("es")))
        .await;
    assert!(matches!(result, Err(I18nError::NoConfig)));

    let site = Site::new();
    let page = site.write("content/page.md", PAGE);
    let site_project = site.project();
    let resolver = LocaleResolver::new(&site_project);
    let result = LocaleSynthesizer::new(&resolver)
        .create_localized_copy(Some(&page), &ScriptedPrompt::answering(Some("Klingon")))
        .await;
    assert!(matches!(result, Err(I18nError::NoConfig)));

    let mut settings = default_settings();
    settings["frontMatter.taxonomy.contentTypes"] = json!([ { "name": "post", "fields": [] } ]);
    let typed = Site::with_settings(&settings);
    let page = typed.write("content/page.md", PAGE);
    let project = typed.project();
    let resolver = LocaleResolver::new(&project);
    let result = LocaleSynthesizer::new(&resolver)
        .create_localized_copy(Some(&page), &ScriptedPrompt::answering(Some("es")))
        .await;
    assert!(matches!(result, Err(I18nError::NoContentType { .. })));

    let broken = site.write("content/broken.md", "---\ntitle: [unclosed\n---\n");
    let resolver = LocaleResolver::new(&site_project);
    let result = LocaleSynthesizer::new(&resolver)
        .create_localized_copy(Some(&broken), &ScriptedPrompt::answering(Some("es")))
        .await;
    assert!(matches!(result, Err(I18nError::NoFile { .. })));

    assert!(!std::path::Path::new(&site.path("content/es")).exists());
    assert!(!std::path::Path::new(&typed.path("content/es")).exists());
}

#[tokio::test]
/// What: Dismissing the prompt is not an error.
///
/// Inputs:
/// - Prompt answering `None`
///
/// Output:
/// - `Ok(None)`, no files created, no refresh signal
async fn dismissed_prompt_creates_nothing() {
    let site = Site::new();
    let page = site.write("content/page.md", PAGE);
    let project = site.project();
    let resolver = LocaleResolver::new(&project);
    let prompt = ScriptedPrompt::answering(None);

    let result = LocaleSynthesizer::new(&resolver)
        .create_localized_copy(Some(&page), &prompt)
        .await
        .expect("dismissal is not an error");

    assert!(result.is_none());
    assert!(prompt.refreshed.lock().expect("refreshed lock").is_empty());
    assert!(!std::path::Path::new(&site.path("content/es")).exists());
}

#[tokio::test]
/// What: TOML front matter stays TOML in the translation.
///
/// Inputs:
/// - `content/toml.md` fenced with `+++`
///
/// Output:
/// - `content/es/toml.md` fenced with `+++` and a rewritten image path
async fn toml_front_matter_round_trips() {
    let site = Site::new();
    let page = site.write(
        "content/toml.md",
        "+++\ntitle = \"Hola\"\npreview = \"images/a.png\"\n+++\nCuerpo\n",
    );
    let project = site.project();
    let resolver = LocaleResolver::new(&project);

    LocaleSynthesizer::new(&resolver)
        .create_localized_copy(Some(&page), &ScriptedPrompt::answering(Some("es")))
        .await
        .expect("translation created")
        .expect("prompt answered");

    let written = site.read("content/es/toml.md");
    assert!(written.starts_with("+++\n"));
    assert!(written.contains("title = \"Hola\""));
    assert!(written.contains("preview = \"../images/a.png\""));
    assert!(written.ends_with("+++\nCuerpo\n"));
}

#[tokio::test]
/// What: The default locale is never a translation target.
///
/// Inputs:
/// - Default locale `en` whose entry declares `path: "en"`
/// - Answer `en` (and its title `English`) although the prompt did not offer it
///
/// Output:
/// - `NoConfig`, no `content/en` copy, translations still map `en` to the root file
async fn default_locale_answer_is_rejected() {
    let site = Site::new();
    let page = site.write("content/page.md", PAGE);
    let project = site.project();
    let resolver = LocaleResolver::new(&project);

    for answer in ["en", "English"] {
        let prompt = ScriptedPrompt::answering(Some(answer));
        let result = LocaleSynthesizer::new(&resolver)
            .create_localized_copy(Some(&page), &prompt)
            .await;
        assert!(matches!(result, Err(I18nError::NoConfig)), "{answer}");
        assert_eq!(*prompt.offered.lock().expect("offered lock"), vec!["es", "fr"]);
    }

    assert!(!std::path::Path::new(&site.path("content/en")).exists());
    let translations = resolver.list_translations(&page).await.expect("folder found");
    assert_eq!(translations.keys().map(String::as_str).collect::<Vec<_>>(), vec!["en"]);
    assert_eq!(translations["en"].path, page);
}

#[tokio::test]
/// What: A configured locale without a sub-path cannot receive a copy.
///
/// Inputs:
/// - Locale entry `{ "locale": "de" }` without `path`, answer `de`
///
/// Output:
/// - `NoConfig`, `de` not offered, nothing written
async fn locale_without_path_is_rejected() {
    let mut settings = default_settings();
    settings["frontMatter.content.i18n"] = json!([
        { "locale": "en", "path": "en" },
        { "locale": "es", "path": "es" },
        { "locale": "de" }
    ]);
    let site = Site::with_settings(&settings);
    let page = site.write("content/page.md", PAGE);
    let project = site.project();
    let resolver = LocaleResolver::new(&project);
    let prompt = ScriptedPrompt::answering(Some("de"));

    let result = LocaleSynthesizer::new(&resolver)
        .create_localized_copy(Some(&page), &prompt)
        .await;

    assert!(matches!(result, Err(I18nError::NoConfig)));
    assert_eq!(*prompt.offered.lock().expect("offered lock"), vec!["es"]);
    let entries = std::fs::read_dir(site.path("content"))
        .expect("content dir readable")
        .count();
    assert_eq!(entries, 1);
}

#[cfg(unix)]
#[tokio::test]
/// What: Bundle assets are only copied once the document is written.
///
/// Inputs:
/// - Page bundle with `cover.png`
/// - A dangling symlink at `content/es/about/index.md`
///
/// Output:
/// - `FileExists` from the no-overwrite write and no copied `cover.png`
///
/// Details:
/// - The dangling link passes the existence check but blocks `create_new`
async fn failed_write_copies_no_assets() {
    let site = Site::new();
    let about = site.write("content/about/index.md", BUNDLE);
    site.write("content/about/cover.png", "png");
    std::fs::create_dir_all(site.path("content/es/about")).expect("Failed to create dest dir");
    std::os::unix::fs::symlink(
        site.path("content/es/about/missing.md"),
        site.path("content/es/about/index.md"),
    )
    .expect("Failed to create dangling symlink");
    let project = site.project();
    let resolver = LocaleResolver::new(&project);

    let result = LocaleSynthesizer::new(&resolver)
        .create_localized_copy(Some(&about), &ScriptedPrompt::answering(Some("es")))
        .await;

    assert!(matches!(result, Err(I18nError::FileExists { .. })));
    assert!(!std::path::Path::new(&site.path("content/es/about/cover.png")).exists());
}
