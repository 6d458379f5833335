use colored::*;

use crate::diagnostic::{Diagnostic, LabelStyle};
use crate::diagnostic_code::Severity;

/// Renders a [`Diagnostic`] the way `rustc` renders its own errors: a header
/// line with the code, then one source-line excerpt per label with a caret
/// underline.
pub struct DiagnosticFormatter<'a> {
  diagnostic: &'a Diagnostic,
  source_lines: Vec<&'a str>,
}

impl<'a> DiagnosticFormatter<'a> {
  pub fn new(diagnostic: &'a Diagnostic, source_code: &'a str) -> Self {
    Self {
      diagnostic,
      source_lines: source_code.lines().collect(),
    }
  }

  fn severity_text(&self) -> &'static str {
    match self.diagnostic.severity {
      Severity::Error => "error",
      Severity::Warning => "warning",
      Severity::Note => "note",
    }
  }

  fn underline_char(&self, style: LabelStyle) -> char {
    match style {
      LabelStyle::Primary => '^',
      LabelStyle::Secondary => '-',
    }
  }

  fn get_line_content(&self, line_num: usize) -> Option<&str> {
    if line_num == 0 {
      return self.source_lines.first().copied();
    }
    self.source_lines.get(line_num - 1).copied()
  }

  pub fn format(&self) -> String {
    let mut output = String::new();

    let header = match self.diagnostic.severity {
      Severity::Error => format!(
        "{}[{}]: {}",
        self.severity_text().red().bold(),
        self.diagnostic.code.code().red().bold(),
        self.diagnostic.message
      ),
      Severity::Warning => format!(
        "{}[{}]: {}",
        self.severity_text().yellow().bold(),
        self.diagnostic.code.code().yellow().bold(),
        self.diagnostic.message
      ),
      Severity::Note => format!(
        "{}[{}]: {}",
        self.severity_text().cyan().bold(),
        self.diagnostic.code.code().cyan().bold(),
        self.diagnostic.message
      ),
    };
    output.push_str(&header);
    output.push('\n');

    for label in &self.diagnostic.labels {
      output.push_str(&format!(
        "  {} {}:{}:{}\n",
        "-->".blue().bold(),
        label.span.file.white().bold(),
        label.span.line.to_string().white().bold(),
        label.span.column.to_string().white().bold()
      ));
      output.push_str(&format!("   {}\n", "|".blue().bold()));

      if let Some(line_content) = self.get_line_content(label.span.line) {
        output.push_str(&format!(
          " {} {} {}\n",
          label.span.line.to_string().blue().bold(),
          "|".blue().bold(),
          line_content
        ));

        let padding = " ".repeat(label.span.column);
        let underline = self
          .underline_char(label.style)
          .to_string()
          .repeat(label.span.length);

        let colored_underline = match (self.diagnostic.severity, label.style) {
          (Severity::Error, LabelStyle::Primary) => underline.red().bold(),
          (Severity::Warning, LabelStyle::Primary) => underline.yellow().bold(),
          (_, LabelStyle::Secondary) => underline.cyan().bold(),
          _ => underline.cyan().bold(),
        };

        output.push_str(&format!(
          "   {} {}{}\n",
          "|".blue().bold(),
          padding,
          colored_underline
        ));

        if let Some(msg) = &label.message {
          let colored_msg = match (self.diagnostic.severity, label.style) {
            (Severity::Error, LabelStyle::Primary) => msg.red().bold(),
            (Severity::Warning, LabelStyle::Primary) => msg.yellow().bold(),
            (_, LabelStyle::Secondary) => msg.cyan().bold(),
            _ => msg.cyan().bold(),
          };
          output.push_str(&format!("   {} {}{}\n", "|".blue().bold(), padding, colored_msg));
        }
      }

      output.push_str(&format!("   {}\n", "|".blue().bold()));
    }

    for note in &self.diagnostic.notes {
      output.push_str(&format!("   {} {}: {}\n", "=".blue().bold(), "note".cyan().bold(), note));
    }

    if let Some(help) = &self.diagnostic.help {
      output.push_str(&format!("   {} {}: {}\n", "=".blue().bold(), "help".cyan().bold(), help));
    }

    output
  }

  /// Same rendering without ANSI color, for log files and snapshot tests.
  pub fn format_plain(&self) -> String {
    let mut output = String::new();

    output.push_str(&format!(
      "{}[{}]: {}\n",
      self.severity_text(),
      self.diagnostic.code.code(),
      self.diagnostic.message
    ));

    for label in &self.diagnostic.labels {
      output.push_str(&format!(
        "  --> {}:{}:{}\n",
        label.span.file, label.span.line, label.span.column
      ));
      output.push_str("   |\n");

      if let Some(line_content) = self.get_line_content(label.span.line) {
        output.push_str(&format!(" {:>3} | {}\n", label.span.line, line_content));

        let padding = " ".repeat(label.span.column);
        let underline = self.underline_char(label.style).to_string().repeat(label.span.length);
        output.push_str(&format!("   | {}{}\n", padding, underline));

        if let Some(msg) = &label.message {
          output.push_str(&format!("   | {}{}\n", padding, msg));
        }
      }

      output.push_str("   |\n");
    }

    for note in &self.diagnostic.notes {
      output.push_str(&format!("   = note: {}\n", note));
    }

    if let Some(help) = &self.diagnostic.help {
      output.push_str(&format!("   = help: {}\n", help));
    }

    output
  }
}
