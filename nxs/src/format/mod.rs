use crate::context::{AppContext, VerbosityLevel};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;

/// Color output control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Color when writing to a terminal and NO_COLOR is unset
    #[default]
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

impl From<&str> for ColorChoice {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "always" => ColorChoice::Always,
            "never" => ColorChoice::Never,
            _ => ColorChoice::Auto,
        }
    }
}

impl std::fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorChoice::Auto => write!(f, "auto"),
            ColorChoice::Always => write!(f, "always"),
            ColorChoice::Never => write!(f, "never"),
        }
    }
}

/// Output format for results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented JSON
    #[default]
    Json,
    /// YAML
    Yaml,
    /// Human-readable table
    Pretty,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => OutputFormat::Yaml,
            "pretty" => OutputFormat::Pretty,
            _ => OutputFormat::Json,
        }
    }
}

/// Trait for types that can be formatted for CLI output
pub trait Formattable: Serialize {
    /// Format the type for pretty (human-readable) output
    fn format_pretty(&self) -> String;
}

/// Format a single item for output
pub fn format_output<T: Formattable>(item: &T, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Pretty => Ok(item.format_pretty()),
        OutputFormat::Json => serde_json::to_string_pretty(item)
            .map_err(|e| format!("Failed to serialize to JSON: {}", e)),
        OutputFormat::Yaml => {
            serde_yaml::to_string(item).map_err(|e| format!("Failed to serialize to YAML: {}", e))
        }
    }
}

/// Check if we should use colors in diagnostics (written to stderr)
pub fn should_color(ctx: &AppContext) -> bool {
    match ctx.config.style.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            std::io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err()
        }
    }
}

/// Print a diagnostic message to stderr if the context verbosity allows it
pub fn print(ctx: &AppContext, level: VerbosityLevel, message: &str) {
    if level == VerbosityLevel::Normal || ctx.verbosity < level {
        return;
    }
    if should_color(ctx) {
        eprintln!("{}", message.dimmed());
    } else {
        eprintln!("{}", message);
    }
}

/// Colorize a checkmark for success if colors are enabled
pub fn checkmark(ctx: &AppContext) -> String {
    if should_color(ctx) {
        format!("{}", "✓".green())
    } else {
        "✓".to_string()
    }
}

/// Colorize an X mark for errors if colors are enabled
pub fn error_mark(ctx: &AppContext) -> String {
    if should_color(ctx) {
        format!("{}", "✗".red())
    } else {
        "✗".to_string()
    }
}

/// Print a success message to stderr
pub fn success(ctx: &AppContext, message: &str) {
    eprintln!("{} {}", checkmark(ctx), message);
}

/// Print an error message to stderr
pub fn error(ctx: &AppContext, message: &str) {
    eprintln!("{} {}", error_mark(ctx), message);
}

/// Trait for progress reporting that can be TTY-aware or plain text
pub trait OutputFormatter {
    /// Create a spinner for indeterminate progress
    fn spinner(&self, message: &str) -> ProgressBar;

    /// Finish a progress operation with a message
    fn finish_progress(&self, pb: ProgressBar, message: &str);
}

/// TTY formatter with an animated spinner on stderr
pub struct TtyFormatter {
    color: bool,
}

impl OutputFormatter for TtyFormatter {
    fn spinner(&self, message: &str) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        spinner
    }

    fn finish_progress(&self, pb: ProgressBar, message: &str) {
        if self.color {
            pb.finish_with_message(format!("{} {}", "✓".green(), message));
        } else {
            pb.finish_with_message(format!("✓ {}", message));
        }
    }
}

/// Plain formatter for non-TTY output (piped, scripted); only reports at -v
pub struct PlainFormatter {
    verbose: bool,
}

impl OutputFormatter for PlainFormatter {
    fn spinner(&self, message: &str) -> ProgressBar {
        if self.verbose {
            eprintln!("{}", message);
        }
        ProgressBar::hidden()
    }

    fn finish_progress(&self, pb: ProgressBar, message: &str) {
        pb.finish();
        if self.verbose {
            eprintln!("✓ {}", message);
        }
    }
}

/// Create the appropriate progress formatter for the context
///
/// The spinner is only drawn when stderr is a terminal and no verbose
/// diagnostics are interleaved with it.
pub fn create_formatter(ctx: &AppContext) -> Box<dyn OutputFormatter> {
    if std::io::stderr().is_terminal() && ctx.verbosity == VerbosityLevel::Normal {
        Box::new(TtyFormatter {
            color: should_color(ctx),
        })
    } else {
        Box::new(PlainFormatter {
            verbose: ctx.verbosity >= VerbosityLevel::Verbose,
        })
    }
}
