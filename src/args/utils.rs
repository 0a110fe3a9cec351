//! Shared utilities for argument processing.

use std::path::Path;

use content_i18n::i18n::path;

/// What: Determine the log level based on command-line arguments and environment variables.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides `log_level` argument.
/// - `CONTENT_I18N_TRACE=1` enables TRACE level.
pub fn determine_log_level(args: &crate::args::Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else if std::env::var("CONTENT_I18N_TRACE").ok().as_deref() == Some("1") {
        "trace".to_string()
    } else {
        args.log_level.clone()
    }
}

/// What: Turn a command-line file argument into an absolute normalized path.
///
/// Inputs:
/// - `file`: Path as typed by the user
/// - `cwd`: Current working directory
///
/// Output:
/// - Forward-slash absolute path
pub fn absolute_file_arg(file: &str, cwd: &Path) -> String {
    let file = file.trim();
    if file.is_empty() {
        return String::new();
    }
    if path::is_absolute(file) {
        return path::clean(file);
    }
    path::join(&[&path::normalize(&cwd.to_string_lossy()), file])
}
