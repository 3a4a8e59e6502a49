//! Terminal output helpers

use colored::*;
use serde::Serialize;

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".bright_green().bold(), message);
}

/// Print a denial or failure
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".bright_red().bold(), message.bright_red());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".bright_blue().bold(), message);
}

pub fn print_heading(title: &str) {
    println!("{}", title.bright_cyan().bold());
}

pub fn print_json<T: Serialize>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

pub fn yes_no(value: bool) -> ColoredString {
    if value {
        "yes".bright_green()
    } else {
        "no".bright_red()
    }
}

/// Print a table with headers and rows
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        print_info("No data to display");
        return;
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    print_separator(&widths, '┌', '┬', '┐');
    print!("│");
    for (header, width) in headers.iter().zip(&widths) {
        print!(" {} │", pad(header, *width).bright_cyan().bold());
    }
    println!();
    print_separator(&widths, '├', '┼', '┤');

    for row in rows {
        print!("│");
        for (cell, width) in row.iter().zip(&widths) {
            print!(" {} │", pad(cell, *width));
        }
        println!();
    }
    print_separator(&widths, '└', '┴', '┘');
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn print_separator(widths: &[usize], left: char, middle: char, right: char) {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    println!("{}{}{}", left, segments.join(&middle.to_string()), right);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_counts_chars() {
        assert_eq!(pad("Addis Ababa", 13), "Addis Ababa  ");
        assert_eq!(pad("ሀሁ", 3), "ሀሁ ");
        assert_eq!(pad("too long", 3), "too long");
    }
}
