use std::time::Duration;

use colored::*;

use crate::output::Summary;
use crate::terminal::colors;

pub const TOTAL_WIDTH: usize = 64;

pub fn banner(quiet: bool) {
    if quiet {
        return;
    }

    let text_content: String = format!("⟦ BANNERGRAB v{} ⟧", env!("CARGO_PKG_VERSION"));
    let text_width: usize = text_content.chars().count();
    let text: ColoredString = text_content.bright_green().bold();
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH.saturating_sub(text_width) / 2).bright_black();

    eprintln!("{}{}{}", sep, text, sep);
}

pub fn header(msg: &str, quiet: bool) {
    if quiet {
        return;
    }

    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    eprintln!("{}", line);
}

pub fn fat_separator() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).bright_black();
    eprintln!("{}", sep);
}

pub fn aligned_line<V: std::fmt::Display>(key: &str, value: V, width: usize) {
    let dots: String = ".".repeat((width + 1).saturating_sub(key.chars().count()));
    let prefix: ColoredString = ">".color(colors::SEPARATOR);
    eprintln!(
        "{} {}{}{} {}",
        prefix,
        key.color(colors::PRIMARY),
        dots.color(colors::SEPARATOR),
        ":".color(colors::SEPARATOR),
        value
    );
}

pub fn summary(summary: &Summary, total_time: Duration, quiet: bool) {
    if quiet {
        return;
    }

    let banners: ColoredString = format!("{} banners", summary.banners).bold().green();
    let silent: ColoredString = format!("{} silent", summary.silent).bold().color(colors::SILENT);
    let errors: ColoredString = format!("{} errors", summary.errors).bold().color(colors::ERROR);
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().color(colors::ACCENT);

    fat_separator();
    eprintln!(
        "{}",
        format!("Grab complete: {banners}, {silent}, {errors} in {total_time}").color(colors::TEXT_DEFAULT)
    );
}
