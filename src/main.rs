//! content-i18n binary entrypoint. The locale engine lives in the library.

mod args;

use std::fmt;
use std::sync::OnceLock;

use content_i18n::Project;
use content_i18n::settings::{self, find_project_root};

/// Local timestamp for log lines.
struct ContentI18nTimer;

impl tracing_subscriber::fmt::time::FormatTime for ContentI18nTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S"); // "YYYY-MM-DD-T HH:MM:SS"
        write!(w, "{ts}")
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Initialize tracing to the log file, falling back to stderr.
///
/// Inputs:
/// - `level`: Default filter when `RUST_LOG` is not set
///
/// Details:
/// - Log file: `$XDG_STATE_HOME/content-i18n/content-i18n.log`
fn init_logging(level: &str) {
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    let mut log_path = settings::logs_dir();
    log_path.push("content-i18n.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(ContentI18nTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::debug!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            // Fallback: log to stderr so commands still run
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(ContentI18nTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() {
    use clap::Parser;

    let args = args::Args::parse();
    init_logging(&args::determine_log_level(&args));

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("error: cannot read the current directory: {e}");
            std::process::exit(1);
        }
    };
    let Some(root) = args.root.clone().or_else(|| find_project_root(&cwd)) else {
        eprintln!("error: no frontmatter.json found in {} or its parents", cwd.display());
        std::process::exit(1);
    };
    let project = match Project::load(&root) {
        Ok(project) => project,
        Err(e) => {
            tracing::error!(error = %e, "failed to load project settings");
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let file = args::utils::absolute_file_arg(args.command.file(), &cwd);
    tracing::info!(root = %root.display(), file = %file, command = ?args.command, "running command");
    if let Err(e) = args::run(&project, &args.command, &file).await {
        tracing::warn!(error = %e, file = %file, "command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
