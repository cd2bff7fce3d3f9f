//! Terminal output utilities: notes, tables and urgency colouring.

use krishimitra_core::Urgency;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM")
                .map(|t| t != "dumb")
                .unwrap_or(false))
}

/// Strip ANSI escape codes from a string.
pub fn strip_ansi(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            result.push(c);
        }
    }
    result
}

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

pub fn note_info(msg: &str) {
    if supports_color() {
        eprintln!("{CYAN}{BOLD}ℹ{RESET} {msg}");
    } else {
        eprintln!("INFO: {msg}");
    }
}

pub fn note_warn(msg: &str) {
    if supports_color() {
        eprintln!("{YELLOW}{BOLD}⚠{RESET} {msg}");
    } else {
        eprintln!("WARN: {msg}");
    }
}

pub fn note_success(msg: &str) {
    if supports_color() {
        eprintln!("{GREEN}{BOLD}✓{RESET} {msg}");
    } else {
        eprintln!("OK: {msg}");
    }
}

/// Urgency name, coloured red/yellow/green when the terminal allows.
pub fn urgency_badge(urgency: Urgency) -> String {
    let name = urgency.as_str();
    if !supports_color() {
        return name.to_string();
    }
    let color = match urgency {
        Urgency::High => RED,
        Urgency::Medium => YELLOW,
        Urgency::None => GREEN,
    };
    format!("{color}{name}{RESET}")
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

pub enum Align {
    Left,
    Right,
}

pub struct Column {
    pub header: String,
    pub align: Align,
}

impl Column {
    pub fn left(header: impl Into<String>) -> Self {
        Self { header: header.into(), align: Align::Left }
    }
    pub fn right(header: impl Into<String>) -> Self {
        Self { header: header.into(), align: Align::Right }
    }
}

/// Render rows under the given columns, padded to the widest visible cell.
pub fn render_table(columns: &[Column], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = columns
        .iter()
        .map(|c| strip_ansi(&c.header).chars().count())
        .collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(strip_ansi(cell).chars().count());
        }
    }

    let render_row = |cells: Vec<String>| format!("  {}  \n", cells.join("  "));

    let mut out = String::new();
    let header = columns
        .iter()
        .zip(&widths)
        .map(|(col, &w)| pad_cell(&col.header, w, &col.align))
        .collect();
    out.push_str(&render_row(header));
    out.push_str(&render_row(widths.iter().map(|&w| "-".repeat(w)).collect()));

    for row in rows {
        let cells = columns
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (col, &w))| pad_cell(row.get(i).map_or("", String::as_str), w, &col.align))
            .collect();
        out.push_str(&render_row(cells));
    }
    out
}

fn pad_cell(s: &str, width: usize, align: &Align) -> String {
    let pad = " ".repeat(width.saturating_sub(strip_ansi(s).chars().count()));
    match align {
        Align::Left => format!("{s}{pad}"),
        Align::Right => format!("{pad}{s}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_ansi() {
        let colored = format!("{GREEN}healthy{RESET}");
        assert_eq!(strip_ansi(&colored), "healthy");
    }

    #[test]
    fn table_aligns_on_visible_width() {
        let cols = vec![Column::right("#"), Column::left("Label")];
        let rows = vec![
            vec!["0".to_string(), format!("{RED}Pepper Bacterial Spot{RESET}")],
            vec!["14".to_string(), "Tomato Healthy".to_string()],
        ];
        let table = strip_ansi(&render_table(&cols, &rows));
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("   0  Pepper Bacterial Spot"));
        assert!(lines[3].starts_with("  14  Tomato Healthy"));
    }
}
