//! Content-type schemas and field lookup.

use crate::frontmatter::FrontMatter;
use crate::models::{ContentType, Field};
use crate::settings::{SETTING_TAXONOMY_CONTENT_TYPES, Settings};

/// Name of the fallback content type.
pub const DEFAULT_CONTENT_TYPE: &str = "default";
/// Front-matter key naming a document's content type.
pub const CONTENT_TYPE_KEY: &str = "type";
/// Field type holding a path to an image.
pub const IMAGE_FIELD_TYPE: &str = "image";

/// Content types configured for a project.
#[derive(Debug, Clone)]
pub struct ContentTypes {
    /// Known schemas.
    types: Vec<ContentType>,
}

impl ContentTypes {
    /// What: Wrap a list of schemas.
    #[must_use]
    pub const fn new(types: Vec<ContentType>) -> Self {
        Self { types }
    }

    /// What: Load schemas from `frontMatter.taxonomy.contentTypes`.
    ///
    /// Details:
    /// - Without the setting the built-in `default` schema is used
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        let types = settings
            .get::<Vec<ContentType>>(SETTING_TAXONOMY_CONTENT_TYPES)
            .unwrap_or_else(|| {
                tracing::debug!("no content types configured, using built-in default");
                vec![builtin_default()]
            });
        Self::new(types)
    }

    /// What: Schema for a parsed document.
    ///
    /// Inputs:
    /// - `document`: Parsed front matter
    ///
    /// Output:
    /// - The schema named by the document's `type` field, falling back to the
    ///   `default` schema, or `None` when neither exists
    #[must_use]
    pub fn schema_for(&self, document: &FrontMatter) -> Option<&ContentType> {
        let wanted = document
            .get_str(CONTENT_TYPE_KEY)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE);
        self.find(wanted).or_else(|| {
            if wanted != DEFAULT_CONTENT_TYPE {
                tracing::debug!(content_type = wanted, "unknown content type, trying default");
            }
            self.find(DEFAULT_CONTENT_TYPE)
        })
    }

    /// Schema by exact name.
    fn find(&self, name: &str) -> Option<&ContentType> {
        self.types.iter().find(|ct| ct.name == name)
    }
}

/// What: Find every field of a given type, searching nested groups.
///
/// Inputs:
/// - `fields`: Fields to search
/// - `field_type`: Type name to look for (e.g. `image`)
///
/// Output:
/// - One chain per match, from the outermost group down to the matching field
///
/// Details:
/// - A group that itself matches is reported and still searched
#[must_use]
pub fn find_fields_by_type_deep<'a>(fields: &'a [Field], field_type: &str) -> Vec<Vec<&'a Field>> {
    let mut found = Vec::new();
    for field in fields {
        if field.field_type == field_type {
            found.push(vec![field]);
        }
        if let Some(children) = &field.fields {
            for mut chain in find_fields_by_type_deep(children, field_type) {
                chain.insert(0, field);
                found.push(chain);
            }
        }
    }
    found
}

/// The schema used when a project declares none.
fn builtin_default() -> ContentType {
    ContentType {
        name: DEFAULT_CONTENT_TYPE.to_string(),
        fields: vec![
            Field::new("title", "string"),
            Field::new("description", "string"),
            Field::new("date", "datetime"),
            Field::new("lastmod", "datetime"),
            Field::new("preview", IMAGE_FIELD_TYPE),
            Field::new("draft", "draft"),
            Field::new("tags", "tags"),
            Field::new("categories", "categories"),
        ],
        page_bundle: false,
    }
}
