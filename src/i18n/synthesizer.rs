//! Creation of a new locale copy of a default-locale document.

use serde_norway::{Mapping, Value};
use tokio::io::AsyncWriteExt;
use walkdir::WalkDir;

use crate::content_types::{IMAGE_FIELD_TYPE, find_fields_by_type_deep};
use crate::frontmatter::FrontMatter;
use crate::models::{Field, I18nConfig};
use crate::util;

use super::descriptor::{FileDescriptor, bundle_owning_dir};
use super::error::I18nError;
use super::path;
use super::resolver::LocaleResolver;

/// User interaction needed while creating a translation.
pub trait LocalePrompt {
    /// What: Ask which locale to create.
    ///
    /// Inputs:
    /// - `choices`: Locales that can receive a translation
    ///
    /// Output:
    /// - The chosen locale's title or code, or `None` when dismissed
    fn choose_locale(&self, choices: &[&I18nConfig]) -> Option<String>;

    /// What: Called once a translation has been written so listings can refresh.
    fn refresh_listing(&self, _created: &CreatedTranslation) {}
}

/// Result of a successful locale copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedTranslation {
    /// Locale the copy was created for.
    pub locale: I18nConfig,
    /// Path of the new document.
    pub path: String,
    /// Locale title, or code when untitled.
    pub display_name: String,
    /// Bundle assets copied next to the new document.
    pub copied_assets: Vec<String>,
}

/// Where a translated copy goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// Directory of the new document.
    pub dir: String,
    /// Path of the new document.
    pub file: String,
    /// Bundle directory of the source when it is a page bundle.
    pub source_bundle_dir: Option<String>,
}

/// What: Compute the destination of a locale copy.
///
/// Inputs:
/// - `file_path`: Source document
/// - `descriptor`: Descriptor of the source
/// - `sub_path`: Target locale sub-path
///
/// Output:
/// - `Destination` with directory and file path
///
/// Details:
/// - Page bundle: `owning_dir/sub_path/bundle_dir/<name>`
/// - Single file: `source_dir/sub_path/<name>`
#[must_use]
pub fn destination_for(file_path: &str, descriptor: &FileDescriptor, sub_path: &str) -> Destination {
    let source = path::clean(file_path);
    let base = path::file_name(&source);
    let (dir, source_bundle_dir) = if descriptor.is_page_bundle {
        let bundle_sub_dir = path::parent(&descriptor.filename);
        (
            path::join(&[&bundle_owning_dir(&source), sub_path, &bundle_sub_dir]),
            Some(path::parent(&source)),
        )
    } else {
        (path::join(&[&path::parent(&source), sub_path]), None)
    };
    let file = path::join(&[&dir, &base]);
    Destination {
        dir,
        file,
        source_bundle_dir,
    }
}

/// What: Rewrite every image field so it stays valid from the destination.
///
/// Inputs:
/// - `data`: Front-matter data of the copy (mutated in place)
/// - `fields`: Content-type fields
/// - `source_file`: Path of the source document
/// - `destination`: Where the copy is written
///
/// Details:
/// - Nested groups are followed through mappings and lists of mappings
/// - Lists of images are rewritten element by element
/// - Empty values, URLs and absolute paths are left untouched
pub fn rewrite_image_fields(
    data: &mut Mapping,
    fields: &[Field],
    source_file: &str,
    destination: &Destination,
) {
    let relocate = |value: &str| relocate_image(value, source_file, destination);
    for chain in find_fields_by_type_deep(fields, IMAGE_FIELD_TYPE) {
        rewrite_in_mapping(data, &chain, &relocate);
    }
}

/// Follow a field chain into a mapping.
fn rewrite_in_mapping(data: &mut Mapping, chain: &[&Field], relocate: &dyn Fn(&str) -> Option<String>) {
    let Some((field, rest)) = chain.split_first() else {
        return;
    };
    if let Some(value) = data.get_mut(field.name.as_str()) {
        rewrite_value(value, rest, relocate);
    }
}

/// Rewrite a value reached through the chain.
fn rewrite_value(value: &mut Value, rest: &[&Field], relocate: &dyn Fn(&str) -> Option<String>) {
    match value {
        Value::Mapping(map) if !rest.is_empty() => rewrite_in_mapping(map, rest, relocate),
        Value::Sequence(items) => {
            for item in items {
                rewrite_value(item, rest, relocate);
            }
        }
        Value::String(s) if rest.is_empty() => {
            if let Some(updated) = relocate(s) {
                *s = updated;
            }
        }
        _ => {}
    }
}

/// New relative path for one image value, or `None` to keep it.
fn relocate_image(value: &str, source_file: &str, destination: &Destination) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.contains("://") || trimmed.starts_with("data:") || path::is_absolute(trimmed) {
        return None;
    }
    let mut absolute = path::absolute_from_file(trimmed, source_file);
    if let Some(bundle_dir) = &destination.source_bundle_dir
        && let Some(inside) = path::strip_dir_prefix(&absolute, bundle_dir)
    {
        absolute = path::join(&[&destination.dir, &inside]);
    }
    Some(path::relative_from_dir(&absolute, &destination.dir))
}

/// Creates locale copies of default-locale documents.
#[derive(Debug, Clone, Copy)]
pub struct LocaleSynthesizer<'r, 'p> {
    /// Resolver used for all locale queries.
    resolver: &'r LocaleResolver<'p>,
}

impl<'r, 'p> LocaleSynthesizer<'r, 'p> {
    /// What: Create a synthesizer over a resolver.
    #[must_use]
    pub const fn new(resolver: &'r LocaleResolver<'p>) -> Self {
        Self { resolver }
    }

    /// What: Create a localized copy of a default-locale document.
    ///
    /// Inputs:
    /// - `file_path`: Source document, `None` when nothing is selected
    /// - `prompt`: Asks for the target locale and receives the refresh signal
    ///
    /// Output:
    /// - `Ok(Some(created))` on success, `Ok(None)` when the prompt was dismissed
    ///
    /// # Errors
    /// - `NoFileSelected`, `NoConfig`, `NotDefaultLocale`, `NoFile`,
    ///   `NoContentType`, `FileExists` for failed preconditions (nothing written)
    /// - `Serialize` when the adjusted front matter cannot be encoded
    /// - `Io` when creating directories, copying assets or writing fails
    ///
    /// Details:
    /// - Never overwrites: the document is created with create-new semantics
    /// - Page bundle assets are copied into the new bundle directory
    pub async fn create_localized_copy(
        &self,
        file_path: Option<&str>,
        prompt: &dyn LocalePrompt,
    ) -> Result<Option<CreatedTranslation>, I18nError> {
        let file_path = file_path
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or(I18nError::NoFileSelected)?;
        if !util::exists(file_path).await {
            return Err(I18nError::NoFileSelected);
        }

        let locales = self
            .resolver
            .effective_locales(file_path)
            .await
            .ok_or(I18nError::NoConfig)?;
        if !self.resolver.is_default_locale_document(file_path).await {
            return Err(I18nError::NotDefaultLocale);
        }

        let mut document = FrontMatter::parse_file(file_path)
            .await
            .map_err(|source| I18nError::NoFile {
                path: file_path.to_string(),
                source,
            })?;
        let content_type = self
            .resolver
            .project()
            .content_types()
            .schema_for(&document)
            .ok_or_else(|| I18nError::NoContentType {
                path: file_path.to_string(),
            })?;

        let default_locale = self
            .resolver
            .direct_folder(file_path)
            .and_then(|f| f.default_locale.as_deref());
        let choices: Vec<&I18nConfig> = locales
            .iter()
            .filter(|l| l.sub_path().is_some() && Some(l.locale.as_str()) != default_locale)
            .collect();
        let Some(picked) = prompt.choose_locale(&choices) else {
            tracing::info!(file = file_path, "locale selection dismissed");
            return Ok(None);
        };
        // Only offered locales are valid targets; the default locale never is
        let target = choices
            .iter()
            .copied()
            .find(|l| l.title.as_deref() == Some(picked.as_str()) || l.locale == picked)
            .ok_or(I18nError::NoConfig)?;
        let sub_path = target.sub_path().ok_or(I18nError::NoConfig)?;

        let descriptor = self.resolver.describe(file_path).await;
        let destination = destination_for(file_path, &descriptor, sub_path);
        if util::exists(&destination.file).await {
            return Err(I18nError::FileExists {
                path: destination.file,
            });
        }

        rewrite_image_fields(&mut document.data, &content_type.fields, file_path, &destination);
        let serialized = document.serialize().map_err(I18nError::Serialize)?;

        tokio::fs::create_dir_all(&destination.dir).await?;
        write_new_file(&destination.file, serialized.as_bytes()).await?;
        let copied_assets = match &destination.source_bundle_dir {
            Some(bundle_dir) => self.copy_bundle_assets(bundle_dir, &destination.dir).await?,
            None => Vec::new(),
        };

        let created = CreatedTranslation {
            locale: target.clone(),
            path: destination.file,
            display_name: target.display_name().to_string(),
            copied_assets,
        };
        tracing::info!(
            source = file_path,
            created = %created.path,
            locale = %created.locale.locale,
            assets = created.copied_assets.len(),
            "created translation"
        );
        prompt.refresh_listing(&created);
        Ok(Some(created))
    }

    /// What: Copy non-document files of a page bundle into the new bundle.
    ///
    /// Inputs:
    /// - `bundle_dir`: Source bundle directory
    /// - `dest_dir`: Destination bundle directory
    ///
    /// Output:
    /// - Paths of the files that were copied
    ///
    /// # Errors
    /// - Propagates I/O errors from walking the bundle, creating directories or copying
    ///
    /// Details:
    /// - Walks sub-directories, skipping the destination itself
    /// - Existing files at the destination are kept
    async fn copy_bundle_assets(&self, bundle_dir: &str, dest_dir: &str) -> Result<Vec<String>, I18nError> {
        let project = self.resolver.project();
        let mut copied = Vec::new();
        for source in bundle_files(bundle_dir, dest_dir).await? {
            if project.is_content_file(&source) {
                continue;
            }
            let Some(relative) = path::strip_dir_prefix(&source, bundle_dir) else {
                continue;
            };
            let target = path::join(&[dest_dir, &relative]);
            if util::exists(&target).await {
                tracing::debug!(asset = %target, "asset already present, keeping it");
                continue;
            }
            tokio::fs::create_dir_all(path::parent(&target)).await?;
            tokio::fs::copy(&source, &target).await?;
            copied.push(target);
        }
        Ok(copied)
    }
}

/// What: List every file below a bundle directory.
///
/// Inputs:
/// - `bundle_dir`: Directory to walk
/// - `skip_dir`: Directory excluded from the walk (the new bundle)
///
/// Output:
/// - Forward-slash paths of regular files
///
/// # Errors
/// - I/O errors from the walk; a failed blocking task is reported as I/O
async fn bundle_files(bundle_dir: &str, skip_dir: &str) -> Result<Vec<String>, I18nError> {
    let root = bundle_dir.to_string();
    let skip = skip_dir.to_string();
    let walk = tokio::task::spawn_blocking(move || -> Result<Vec<String>, walkdir::Error> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !(e.file_type().is_dir() && path::paths_equal(&e.path().to_string_lossy(), &skip)))
        {
            let entry = entry?;
            if entry.file_type().is_file() {
                files.push(path::normalize(&entry.path().to_string_lossy()));
            }
        }
        Ok(files)
    })
    .await
    .map_err(std::io::Error::other)?;
    walk.map_err(|e| I18nError::Io(e.into()))
}

/// What: Write a new file, refusing to replace an existing one.
///
/// # Errors
/// - `FileExists` when the file appeared in the meantime
/// - `Io` for other failures; a partially written file is removed
async fn write_new_file(file_path: &str, bytes: &[u8]) -> Result<(), I18nError> {
    let mut file = match tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(file_path)
        .await
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            return Err(I18nError::FileExists {
                path: file_path.to_string(),
            });
        }
        Err(e) => return Err(e.into()),
    };
    let written = async {
        file.write_all(bytes).await?;
        file.flush().await
    }
    .await;
    if let Err(e) = written {
        drop(file);
        if let Err(cleanup) = tokio::fs::remove_file(file_path).await {
            tracing::warn!(file = file_path, error = %cleanup, "failed to remove partial translation");
        }
        return Err(e.into());
    }
    Ok(())
}
