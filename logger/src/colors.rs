use colored::*;

pub enum ColorType {
  Error,
  Warn,
  Info,
  Debug,
}

pub trait Color {
  fn to_colored_str(&self, color_type: ColorType) -> colored::ColoredString;
}

impl Color for str {
  fn to_colored_str(&self, color_type: ColorType) -> colored::ColoredString {
    match color_type {
      ColorType::Error => self.red().bold(),
      ColorType::Warn => self.yellow().bold(),
      ColorType::Info => self.cyan().bold(),
      ColorType::Debug => self.normal(),
    }
  }
}
