use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 120, g: 200, b: 120 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 165, b: 0 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const ERROR: Color = Color::Red;
pub const SILENT: Color = Color::Yellow;
