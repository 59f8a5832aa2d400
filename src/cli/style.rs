//! Terminal styling helpers

use indicatif::ProgressStyle;
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use url::Url;

/// Semantic styles for CLI output
pub trait Stylize {
    /// Highlighted values (URLs, names)
    fn accent(&self) -> String;
    /// Secondary text
    fn muted(&self) -> String;
    /// Headings
    fn emphasis(&self) -> String;
    /// Warnings
    fn warning(&self) -> String;
}

impl<T: std::fmt::Display + ?Sized> Stylize for T {
    fn accent(&self) -> String {
        self.cyan().to_string()
    }

    fn muted(&self) -> String {
        self.dimmed().to_string()
    }

    fn emphasis(&self) -> String {
        self.bold().to_string()
    }

    fn warning(&self) -> String {
        self.yellow().to_string()
    }
}

/// Success marker
pub fn check() -> String {
    "✓".green().to_string()
}

/// Failure marker
pub fn cross() -> String {
    "✗".red().to_string()
}

/// Spinner style used while a submission is in flight
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Render `url` as a clickable link when the terminal supports it
pub fn link(url: &Url) -> String {
    if std::io::stdout().is_terminal() && supports_hyperlinks::supports_hyperlinks() {
        terminal_link::Link::new(url.as_str(), url.as_str()).to_string()
    } else {
        url.to_string()
    }
}
