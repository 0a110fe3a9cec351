//! Command-line argument definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// content-i18n - locale resolution and translation scaffolding for content files
#[derive(Parser, Debug)]
#[command(name = "content-i18n")]
#[command(version)]
#[command(about = "Resolve locales and create translations of content files", long_about = None)]
pub struct Args {
    /// Project root holding frontmatter.json (default: nearest ancestor of the current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Operations on a content file.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the locales that apply to a file
    Locales {
        /// Content file
        file: String,
    },
    /// Print the locale a file belongs to
    Locale {
        /// Content file
        file: String,
    },
    /// List the existing translations of a file
    Translations {
        /// Content file (any language version)
        file: String,
    },
    /// Create a translation of a default-locale document
    Create {
        /// Default-locale document
        file: String,
        /// Target locale code or title (prompted for when omitted)
        #[arg(short, long)]
        locale: Option<String>,
    },
}

impl Command {
    /// File the command operates on.
    #[must_use]
    pub fn file(&self) -> &str {
        match self {
            Self::Locales { file }
            | Self::Locale { file }
            | Self::Translations { file }
            | Self::Create { file, .. } => file,
        }
    }
}
