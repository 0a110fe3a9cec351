//! Subcommand handlers.

use std::io::{self, BufRead, Write};

use content_i18n::i18n::{CreatedTranslation, LocalePrompt};
use content_i18n::models::I18nConfig;
use content_i18n::{I18nError, LocaleResolver, LocaleSynthesizer, Project};

use super::Command;

/// What: Locale prompt backed by the terminal.
///
/// Details:
/// - A locale given with `--locale` is answered without asking
/// - Otherwise the choices are listed and one line is read from stdin; an
///   empty line or end of input dismisses the prompt
pub struct StdinPrompt {
    /// Preselected answer.
    preset: Option<String>,
}

impl StdinPrompt {
    /// What: Create a prompt, optionally preanswered.
    #[must_use]
    pub const fn new(preset: Option<String>) -> Self {
        Self { preset }
    }
}

impl LocalePrompt for StdinPrompt {
    fn choose_locale(&self, choices: &[&I18nConfig]) -> Option<String> {
        if let Some(preset) = &self.preset {
            return Some(preset.clone());
        }
        if choices.is_empty() {
            eprintln!("No locale can receive a translation of this file.");
            return None;
        }
        let mut stdout = io::stdout();
        for (idx, choice) in choices.iter().enumerate() {
            let _ = writeln!(stdout, "  {}) {} ({})", idx + 1, choice.display_name(), choice.locale);
        }
        let _ = write!(stdout, "Select the locale to create: ");
        stdout.flush().ok();

        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input).is_err() {
            return None;
        }
        pick_choice(input.trim(), choices)
    }

    fn refresh_listing(&self, created: &CreatedTranslation) {
        for asset in &created.copied_assets {
            println!("copied {asset}");
        }
    }
}

/// What: Map a typed answer to a locale title or code.
///
/// Output:
/// - The answer itself, or the display name of the numbered choice;
///   `None` for an empty answer
fn pick_choice(answer: &str, choices: &[&I18nConfig]) -> Option<String> {
    if answer.is_empty() {
        return None;
    }
    match answer.parse::<usize>() {
        Ok(n) if (1..=choices.len()).contains(&n) => Some(choices[n - 1].display_name().to_string()),
        _ => Some(answer.to_string()),
    }
}

/// What: Run one subcommand and print its result.
///
/// Inputs:
/// - `project`: Loaded project
/// - `command`: Parsed subcommand
/// - `file`: Absolute normalized path of the command's file argument
///
/// Output:
/// - `Ok(())` when the command completed (including "nothing found" answers)
///
/// # Errors
/// - Returns `I18nError` from translation creation
pub async fn run(project: &Project, command: &Command, file: &str) -> Result<(), I18nError> {
    let resolver = LocaleResolver::new(project);
    match command {
        Command::Locales { .. } => match resolver.effective_locales(file).await {
            Some(locales) => {
                for locale in locales {
                    println!("{}\t{}\t{}", locale.locale, locale.display_name(), locale.path.as_deref().unwrap_or("-"));
                }
            }
            None => println!("no i18n configuration applies to {file}"),
        },
        Command::Locale { .. } => {
            let default = resolver.is_default_locale_document(file).await;
            match resolver.resolve_locale(file).await {
                Some(locale) if default => println!("{} (default)", locale.locale),
                Some(locale) => println!("{}", locale.locale),
                None => println!("no locale found for {file}"),
            }
        }
        Command::Translations { .. } => match resolver.list_translations(file).await {
            Some(translations) => {
                for (code, translation) in &translations {
                    println!("{code}\t{}", translation.path);
                }
            }
            None => println!("no translations can be listed for {file}"),
        },
        Command::Create { locale, .. } => {
            let prompt = StdinPrompt::new(locale.clone());
            match LocaleSynthesizer::new(&resolver)
                .create_localized_copy(Some(file), &prompt)
                .await?
            {
                Some(created) => println!("created {} translation: {}", created.display_name, created.path),
                None => println!("no locale selected"),
            }
        }
    }
    Ok(())
}
