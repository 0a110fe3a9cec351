//! Front-matter parsing and serialization for content documents.
//!
//! Two fence styles are understood: YAML between `---` lines and TOML between
//! `+++` lines. Parsed data is kept as an ordered YAML mapping regardless of
//! the source format, and the format is remembered so the document can be
//! written back the same way.

use serde_norway::value::{Tag, TaggedValue};
use serde_norway::{Mapping, Value};

/// YAML fence.
const YAML_FENCE: &str = "---";
/// TOML fence.
const TOML_FENCE: &str = "+++";
/// Tag marking values that were TOML datetimes in the source document.
const TOML_DATETIME_TAG: &str = "toml-datetime";

/// Serialization used by a document's front matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrontMatterFormat {
    /// `---` fenced YAML (also used for documents without front matter).
    #[default]
    Yaml,
    /// `+++` fenced TOML.
    Toml,
}

/// What: Failures while reading or writing front matter.
#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    /// The document could not be read.
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),
    /// Opening fence without a closing fence.
    #[error("front matter starting with '{0}' is never closed")]
    Unterminated(&'static str),
    /// Front matter is not a key/value mapping.
    #[error("front matter must be a mapping of fields")]
    NotAMapping,
    /// YAML front matter could not be parsed or written.
    #[error("invalid YAML front matter: {0}")]
    Yaml(#[from] serde_norway::Error),
    /// TOML front matter could not be parsed.
    #[error("invalid TOML front matter: {0}")]
    TomlParse(#[from] toml::de::Error),
    /// TOML front matter could not be written.
    #[error("failed to write TOML front matter: {0}")]
    TomlWrite(#[from] toml::ser::Error),
}

/// A parsed content document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrontMatter {
    /// Fence style the document was parsed with.
    pub format: FrontMatterFormat,
    /// Front-matter fields in document order.
    pub data: Mapping,
    /// Body after the closing fence.
    pub content: String,
}

impl FrontMatter {
    /// What: Parse a document into front matter and body.
    ///
    /// Inputs:
    /// - `text`: Full document text
    ///
    /// Output:
    /// - Parsed `FrontMatter`
    ///
    /// # Errors
    /// - `Unterminated` when the opening fence has no closing fence
    /// - `Yaml`/`TomlParse` when the fenced block does not parse
    /// - `NotAMapping` when YAML front matter is a scalar or list
    ///
    /// Details:
    /// - A document that does not start with a fence has empty data and the
    ///   whole text as body
    pub fn parse(text: &str) -> Result<Self, FrontMatterError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let (first_line, after_first) = split_line(text);
        let (format, fence) = match first_line.trim_end() {
            YAML_FENCE => (FrontMatterFormat::Yaml, YAML_FENCE),
            TOML_FENCE => (FrontMatterFormat::Toml, TOML_FENCE),
            _ => {
                return Ok(Self {
                    format: FrontMatterFormat::Yaml,
                    data: Mapping::new(),
                    content: text.to_string(),
                });
            }
        };

        let body_start = text.len() - after_first.len();
        let mut offset = body_start;
        let mut rest = after_first;
        while !rest.is_empty() {
            let (line, next) = split_line(rest);
            if line.trim_end() == fence {
                let raw = &text[body_start..offset];
                let content = next.to_string();
                let data = match format {
                    FrontMatterFormat::Yaml => parse_yaml(raw)?,
                    FrontMatterFormat::Toml => parse_toml(raw)?,
                };
                return Ok(Self {
                    format,
                    data,
                    content,
                });
            }
            offset += rest.len() - next.len();
            rest = next;
        }
        Err(FrontMatterError::Unterminated(fence))
    }

    /// What: Read and parse a document from disk.
    ///
    /// # Errors
    /// - `Io` when the file cannot be read; otherwise see [`FrontMatter::parse`]
    pub async fn parse_file(file_path: &str) -> Result<Self, FrontMatterError> {
        let text = tokio::fs::read_to_string(file_path).await?;
        Self::parse(&text)
    }

    /// What: Serialize the document back to text.
    ///
    /// Output:
    /// - Fenced front matter in the document's format followed by the body
    ///
    /// # Errors
    /// - `Yaml`/`TomlWrite` when the data cannot be encoded
    pub fn serialize(&self) -> Result<String, FrontMatterError> {
        let (fence, encoded) = match self.format {
            FrontMatterFormat::Yaml => {
                let encoded = if self.data.is_empty() {
                    String::new()
                } else {
                    serde_norway::to_string(&self.data)?
                };
                (YAML_FENCE, encoded)
            }
            FrontMatterFormat::Toml => (TOML_FENCE, toml::to_string(&yaml_to_toml_table(&self.data))?),
        };
        let mut out = String::with_capacity(encoded.len() + self.content.len() + 8);
        out.push_str(fence);
        out.push('\n');
        out.push_str(&encoded);
        if !encoded.is_empty() && !encoded.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(fence);
        out.push('\n');
        out.push_str(&self.content);
        Ok(out)
    }

    /// What: String value of a top-level field.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }
}

/// Split off the first line, returning it (with `\r`, without `\n`) and the rest.
fn split_line(text: &str) -> (&str, &str) {
    text.find('\n')
        .map_or((text, ""), |idx| (&text[..idx], &text[idx + 1..]))
}

/// Parse the YAML block; empty blocks and `null` yield an empty mapping.
fn parse_yaml(raw: &str) -> Result<Mapping, FrontMatterError> {
    if raw.trim().is_empty() {
        return Ok(Mapping::new());
    }
    match serde_norway::from_str::<Value>(raw)? {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(FrontMatterError::NotAMapping),
    }
}

/// Parse the TOML block into the shared YAML representation.
fn parse_toml(raw: &str) -> Result<Mapping, FrontMatterError> {
    let table: toml::Table = toml::from_str(raw)?;
    Ok(toml_table_to_yaml(&table))
}

/// Convert a TOML table into an ordered YAML mapping.
fn toml_table_to_yaml(table: &toml::Table) -> Mapping {
    table
        .iter()
        .map(|(key, value)| (Value::String(key.clone()), toml_to_yaml(value)))
        .collect()
}

/// Convert one TOML value; datetimes become tagged RFC 3339 text.
fn toml_to_yaml(value: &toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s.clone()),
        toml::Value::Integer(i) => Value::Number((*i).into()),
        toml::Value::Float(f) => Value::Number((*f).into()),
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Datetime(dt) => Value::Tagged(Box::new(TaggedValue {
            tag: Tag::new(TOML_DATETIME_TAG),
            value: Value::String(dt.to_string()),
        })),
        toml::Value::Array(items) => Value::Sequence(items.iter().map(toml_to_yaml).collect()),
        toml::Value::Table(table) => Value::Mapping(toml_table_to_yaml(table)),
    }
}

/// Convert the YAML mapping back into a TOML table, dropping `null` entries.
fn yaml_to_toml_table(map: &Mapping) -> toml::Table {
    map.iter()
        .filter_map(|(key, value)| Some((yaml_key(key)?, yaml_to_toml(value)?)))
        .collect()
}

/// TOML keys are strings; scalar YAML keys are stringified.
fn yaml_key(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Convert one YAML value; only values tagged at parse time become datetimes.
fn yaml_to_toml(value: &Value) -> Option<toml::Value> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(toml::Value::Boolean(*b)),
        Value::Number(n) => n
            .as_i64()
            .map(toml::Value::Integer)
            .or_else(|| n.as_f64().map(toml::Value::Float)),
        Value::String(s) => Some(toml::Value::String(s.clone())),
        Value::Sequence(items) => Some(toml::Value::Array(
            items.iter().filter_map(yaml_to_toml).collect(),
        )),
        Value::Mapping(map) => Some(toml::Value::Table(yaml_to_toml_table(map))),
        Value::Tagged(tagged) if tagged.tag == TOML_DATETIME_TAG => match &tagged.value {
            Value::String(s) => Some(
                s.parse::<toml::value::Datetime>()
                    .map_or_else(|_| toml::Value::String(s.clone()), toml::Value::Datetime),
            ),
            other => yaml_to_toml(other),
        },
        Value::Tagged(tagged) => yaml_to_toml(&tagged.value),
    }
}
