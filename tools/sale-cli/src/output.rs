//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::DisplayConfig;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", truncate(col, *width), width = *width))
            .collect();
        println!("  {}", formatted.join("  ").trim_end());
    }

    /// Create a progress bar.
    pub fn progress(&self, len: u64, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        let bar_style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(bar_style);
        pb.set_message(msg.to_string());
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Shorten `text` to at most `width` characters, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width || width == 0 {
        return text.to_string();
    }
    let kept: String = text.chars().take(width - 1).collect();
    format!("{}…", kept)
}

/// Format a price for display, e.g. `R$ 1.234,56`.
pub fn format_price(value: f64, display: &DisplayConfig) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let units = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, digit) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(display.thousands_separator);
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{}{} {}{}{:02}",
        sign, display.currency_symbol, grouped, display.decimal_separator, fraction
    )
}

/// Format a margin percentage, e.g. `25,5%`.
pub fn format_percent(value: f64, display: &DisplayConfig) -> String {
    let text = format!("{:.1}", value);
    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("{}%", text.replace('.', &display.decimal_separator.to_string()))
}

/// Colour a margin: dim when unset, green when positive.
pub fn margin_badge(margin: f64, display: &DisplayConfig) -> String {
    let text = format_percent(margin, display);
    if margin > 0.0 {
        style(text).green().to_string()
    } else {
        style(text).dim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        let display = DisplayConfig::default();
        assert_eq!(format_price(0.0, &display), "R$ 0,00");
        assert_eq!(format_price(120.0, &display), "R$ 120,00");
        assert_eq!(format_price(1234.567, &display), "R$ 1.234,57");
        assert_eq!(format_price(1_000_000.0, &display), "R$ 1.000.000,00");
        assert_eq!(format_price(-5.5, &display), "-R$ 5,50");
    }

    #[test]
    fn test_format_price_custom_separators() {
        let display = DisplayConfig {
            currency_symbol: "$".to_string(),
            decimal_separator: '.',
            thousands_separator: ',',
        };
        assert_eq!(format_price(9876.5, &display), "$ 9,876.50");
    }

    #[test]
    fn test_format_percent() {
        let display = DisplayConfig::default();
        assert_eq!(format_percent(20.0, &display), "20%");
        assert_eq!(format_percent(12.5, &display), "12,5%");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Fone", 10), "Fone");
        assert_eq!(truncate("Fone Bluetooth", 6), "Fone …");
    }
}
