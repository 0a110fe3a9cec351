//! Path normalization and lexical path arithmetic for content paths.
//!
//! Content paths travel through the engine as forward-slash strings so that
//! Windows and Unix layouts compare the same way. Comparisons are always
//! case-insensitive because the underlying file system may be.

/// What: Convert a path into its slash-normalized form.
///
/// Inputs:
/// - `path`: Raw file-system path (may contain backslashes)
///
/// Output:
/// - Path with every `\` replaced by `/`
///
/// Details:
/// - Does not change case; callers lower-case both sides when comparing
/// - Idempotent: `normalize(&normalize(p)) == normalize(p)`
#[must_use]
pub fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

/// What: Compare two paths for equality, ignoring slash style and case.
///
/// Inputs:
/// - `a`, `b`: Paths to compare
///
/// Output:
/// - `true` when both normalize to the same lower-cased string
#[must_use]
pub fn paths_equal(a: &str, b: &str) -> bool {
    normalize(a).to_lowercase() == normalize(b).to_lowercase()
}

/// What: Normalize a directory path and make sure it ends with `/`.
///
/// Inputs:
/// - `path`: Directory path
///
/// Output:
/// - Normalized path terminated by exactly one trailing `/`
#[must_use]
pub fn with_trailing_slash(path: &str) -> String {
    let mut dir = normalize(path);
    if !dir.ends_with('/') {
        dir.push('/');
    }
    dir
}

/// Whether the path starts with a Windows drive prefix such as `C:`.
fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// What: Split a normalized path into its root and the remainder.
///
/// Output:
/// - `("/", rest)` for Unix absolute paths, `("C:/", rest)` for drive paths,
///   `("", path)` for relative paths
fn split_root(path: &str) -> (&str, &str) {
    if let Some(rest) = path.strip_prefix('/') {
        ("/", rest)
    } else if has_drive_prefix(path) && path[2..].starts_with('/') {
        (&path[..3], &path[3..])
    } else {
        ("", path)
    }
}

/// What: Check whether a path is absolute (Unix root or drive-letter root).
#[must_use]
pub fn is_absolute(path: &str) -> bool {
    !split_root(&normalize(path)).0.is_empty()
}

/// What: Lexically clean a path.
///
/// Inputs:
/// - `path`: Path to clean
///
/// Output:
/// - Normalized path with `.` segments, duplicate slashes and resolvable `..`
///   segments removed, and without a trailing slash
///
/// Details:
/// - `..` above an absolute root is dropped; above a relative path it is kept
/// - An empty relative result becomes `.`
#[must_use]
pub fn clean(path: &str) -> String {
    let normalized = normalize(path);
    let (root, rest) = split_root(&normalized);
    let mut parts: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if root.is_empty() {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }
    let joined = parts.join("/");
    if root.is_empty() && joined.is_empty() {
        ".".to_string()
    } else {
        format!("{root}{joined}")
    }
}

/// What: Join path segments and clean the result.
///
/// Inputs:
/// - `segments`: Path pieces; empty pieces are skipped
///
/// Output:
/// - Cleaned joined path
///
/// Details:
/// - Behaves like a lexical `path.join`: a later absolute segment does NOT
///   reset the path, it is appended (leading slash ignored)
#[must_use]
pub fn join(segments: &[&str]) -> String {
    let mut combined = String::new();
    for segment in segments.iter().filter(|s| !s.is_empty()) {
        if !combined.is_empty() && !combined.ends_with('/') {
            combined.push('/');
        }
        combined.push_str(segment);
    }
    clean(&combined)
}

/// What: Directory part of a path.
///
/// Output:
/// - Everything before the last `/` (the root itself for top-level entries),
///   or an empty string for a bare file name
#[must_use]
pub fn parent(path: &str) -> String {
    let cleaned = clean(path);
    let (root, rest) = split_root(&cleaned);
    match rest.rfind('/') {
        Some(idx) => format!("{root}{}", &rest[..idx]),
        None if !root.is_empty() => root.to_string(),
        None => String::new(),
    }
}

/// What: Last segment of a path.
#[must_use]
pub fn file_name(path: &str) -> String {
    let normalized = normalize(path);
    normalized
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// What: Remove a directory prefix from a path, comparing case-insensitively.
///
/// Inputs:
/// - `path`: Path to shorten
/// - `dir`: Directory that should contain `path`
///
/// Output:
/// - `Some(remainder)` without a leading `/` when `path` lies under `dir`
///   (the remainder keeps the original casing), `None` otherwise
#[must_use]
pub fn strip_dir_prefix(path: &str, dir: &str) -> Option<String> {
    let path = clean(path);
    let prefix = with_trailing_slash(&clean(dir));
    let head = path.get(..prefix.len())?;
    if head.to_lowercase() == prefix.to_lowercase() {
        Some(path[prefix.len()..].to_string())
    } else {
        None
    }
}

/// What: Express `target` relative to the directory `from_dir`.
///
/// Inputs:
/// - `from_dir`: Directory the result should be relative to
/// - `target`: Path to reach
///
/// Output:
/// - Relative path using `..` segments, `.` when both are the same, or
///   `target` unchanged when the two paths have different roots
///
/// Details:
/// - Common components are compared case-insensitively
#[must_use]
pub fn relative(from_dir: &str, target: &str) -> String {
    let from = clean(from_dir);
    let to = clean(target);
    let (from_root, from_rest) = split_root(&from);
    let (to_root, to_rest) = split_root(&to);
    if from_root.to_lowercase() != to_root.to_lowercase() {
        return to;
    }

    let from_parts: Vec<&str> = from_rest.split('/').filter(|s| !s.is_empty()).collect();
    let to_parts: Vec<&str> = to_rest.split('/').filter(|s| !s.is_empty()).collect();
    let common = from_parts
        .iter()
        .zip(&to_parts)
        .take_while(|(a, b)| a.to_lowercase() == b.to_lowercase())
        .count();

    let mut parts: Vec<&str> = vec![".."; from_parts.len() - common];
    parts.extend_from_slice(&to_parts[common..]);
    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

/// What: Resolve a value stored in a content file to an absolute path.
///
/// Inputs:
/// - `value`: Path as written in the document (relative to the document)
/// - `file_path`: Absolute path of the document holding the value
///
/// Output:
/// - Absolute cleaned path; absolute values are only cleaned
#[must_use]
pub fn absolute_from_file(value: &str, file_path: &str) -> String {
    if is_absolute(value) {
        clean(value)
    } else {
        join(&[&parent(file_path), value])
    }
}

/// What: Express an absolute path relative to a directory.
///
/// Inputs:
/// - `abs_path`: Absolute path of the referenced file
/// - `dir`: Directory of the document that will hold the reference
#[must_use]
pub fn relative_from_dir(abs_path: &str, dir: &str) -> String {
    relative(dir, abs_path)
}
