use std::fmt;

use colored::Colorize;

use crate::currency::Money;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Style {
    Header,
    Success,
    Warning,
    Error,
}

/// Styles CLI text. Plain mode drops colors and icons.
#[derive(Clone, Copy, Debug, Default)]
pub struct Formatter {
    plain: bool,
}

impl Formatter {
    pub fn new(plain: bool) -> Self {
        Self { plain }
    }

    pub fn is_plain(&self) -> bool {
        self.plain
    }

    pub fn print_header(&self, title: impl fmt::Display) {
        println!("{}", self.header_text(title));
    }

    pub fn header_text(&self, title: impl fmt::Display) -> String {
        self.colorize(format!("=== {} ===", title), Style::Header)
    }

    pub fn print_info(&self, message: impl fmt::Display) {
        println!("{}", message);
    }

    pub fn print_success(&self, message: impl fmt::Display) {
        println!("{}", self.decorate("✔", "OK:", message, Style::Success));
    }

    pub fn print_warning(&self, message: impl fmt::Display) {
        println!("{}", self.decorate("⚠", "WARNING:", message, Style::Warning));
    }

    pub fn error_text(&self, message: impl fmt::Display) -> String {
        self.decorate("✖", "ERROR:", message, Style::Error)
    }

    /// Expense figures are red.
    pub fn expense(&self, text: impl fmt::Display) -> String {
        self.paint(text, |s| s.red().to_string())
    }

    /// Income figures are green.
    pub fn income(&self, text: impl fmt::Display) -> String {
        self.paint(text, |s| s.green().to_string())
    }

    /// Net margin is blue, or red when the day lost money.
    pub fn margin(&self, amount: Money, text: impl fmt::Display) -> String {
        if amount.is_negative() {
            self.expense(text)
        } else {
            self.paint(text, |s| s.blue().to_string())
        }
    }

    pub fn bold(&self, text: impl fmt::Display) -> String {
        self.paint(text, |s| s.bold().to_string())
    }

    pub fn dimmed(&self, text: impl fmt::Display) -> String {
        self.paint(text, |s| s.dimmed().to_string())
    }

    fn paint(&self, text: impl fmt::Display, style: impl Fn(&str) -> String) -> String {
        let text = text.to_string();
        if self.plain {
            text
        } else {
            style(&text)
        }
    }

    fn decorate(
        &self,
        icon: &str,
        plain_label: &str,
        message: impl fmt::Display,
        style: Style,
    ) -> String {
        if self.plain {
            format!("{plain_label} {}", message)
        } else {
            self.colorize(format!("{icon} {}", message), style)
        }
    }

    fn colorize(&self, text: String, style: Style) -> String {
        if self.plain {
            return text;
        }
        match style {
            Style::Success => text.green().to_string(),
            Style::Warning => text.yellow().to_string(),
            Style::Error => text.red().to_string(),
            Style::Header => text.bold().to_string(),
        }
    }

    pub fn print_two_column(&self, entries: &[(&str, &str)]) {
        let label_width = entries
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(0);
        for (label, description) in entries {
            println!("  {:<width$}  {}", label, description, width = label_width);
        }
    }
}
