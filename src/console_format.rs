/// Console formatting module - Pure rendering concerns
///
/// This module renders the export preview table:
/// - Column width allocation within the console width
/// - Box-drawing borders
/// - Text truncation and padding (unicode aware)
///
/// It writes to any `std::io::Write` destination, so the same table can be
/// sent to stderr or captured in a buffer.

use std::io::{self, Write};
use std::sync::OnceLock;
use terminal_size::{Width, terminal_size};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Narrowest a column is squeezed to before the table overflows
const MIN_COLUMN_WIDTH: usize = 6;

static CONSOLE_WIDTH: OnceLock<usize> = OnceLock::new();

/// Override the detected console width (ignored once set)
pub fn set_console_width(width: usize) {
    let _ = CONSOLE_WIDTH.set(width);
}

/// Console width: override, detected terminal width, or 120
pub fn get_console_width() -> usize {
    *CONSOLE_WIDTH.get_or_init(|| {
        if let Some((Width(w), _)) = terminal_size() {
            w as usize
        } else {
            120 // Default width
        }
    })
}

/// Writer for the preview table
pub struct TableWriter<W: Write> {
    writer: W,
}

impl<W: Write> TableWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a bordered table of `headers` over `rows`, fitted into `total_width`
    pub fn write_preview(
        &mut self,
        headers: &[String],
        rows: &[Vec<String>],
        total_rows: usize,
        total_width: usize,
    ) -> io::Result<()> {
        if headers.is_empty() {
            return Ok(());
        }

        // Embedded newlines would break the row
        let headers = flatten_cells(headers);
        let rows: Vec<Vec<String>> = rows.iter().map(|r| flatten_cells(r)).collect();
        let widths = column_widths(&headers, &rows, total_width);

        self.write_border('┌', '┬', '┐', &widths)?;
        self.write_cells(&headers, &widths)?;
        self.write_border('├', '┼', '┤', &widths)?;
        for row in &rows {
            self.write_cells(row, &widths)?;
        }
        self.write_border('└', '┴', '┘', &widths)?;

        if total_rows > rows.len() {
            writeln!(self.writer, "({} of {} rows shown)", rows.len(), total_rows)?;
        }
        Ok(())
    }

    fn write_border(&mut self, left: char, mid: char, right: char, widths: &[usize]) -> io::Result<()> {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        let mid = mid.to_string();
        writeln!(self.writer, "{}{}{}", left, segments.join(mid.as_str()), right)
    }

    fn write_cells(&mut self, cells: &[String], widths: &[usize]) -> io::Result<()> {
        let displays: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, width)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                truncate_with_padding(cell, *width)
            })
            .collect();
        writeln!(self.writer, "│ {} │", displays.join(" │ "))
    }
}

fn flatten_cells(cells: &[String]) -> Vec<String> {
    cells.iter().map(|c| c.replace(['\n', '\r'], " ")).collect()
}

/// Allocate content widths per column
///
/// Each column wants its widest cell. If the table does not fit, the widest
/// columns are shrunk first, never below `MIN_COLUMN_WIDTH`.
pub fn column_widths(headers: &[String], rows: &[Vec<String>], total_width: usize) -> Vec<usize> {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|c| display_width(c))
                .chain(std::iter::once(display_width(h)))
                .max()
                .unwrap_or(0)
                .max(1)
        })
        .collect();

    // "│ " before each column, " │" after the last, " │ " between
    let borders = 3 * widths.len() + 1;
    let available = total_width.saturating_sub(borders);

    while widths.iter().sum::<usize>() > available {
        let Some((idx, widest)) = widths.iter().copied().enumerate().max_by_key(|(_, w)| *w) else {
            break;
        };
        if widest <= MIN_COLUMN_WIDTH {
            break;
        }
        widths[idx] = widest - 1;
    }

    widths
}

/// Get display width of a string (accounting for unicode)
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate and pad string to exact width
pub fn truncate_with_padding(s: &str, width: usize) -> String {
    let display_w = display_width(s);

    if display_w <= width {
        return format!("{}{}", s, " ".repeat(width - display_w));
    }

    // Reserve space for "..."
    let target_width = if width >= 3 { width - 3 } else { width };
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let c_width = UnicodeWidthChar::width(c).unwrap_or(1);
        if current_width + c_width > target_width {
            break;
        }
        result.push(c);
        current_width += c_width;
    }

    if width >= 3 {
        result.push_str("...");
        current_width += 3;
    }

    if current_width < width {
        result.push_str(&" ".repeat(width - current_width));
    }

    result
}

/// Print the preview table to stderr
pub fn print_preview(headers: &[String], rows: &[Vec<String>], total_rows: usize) {
    let stderr = io::stderr();
    let mut writer = TableWriter::new(stderr.lock());
    if let Err(e) = writer.write_preview(headers, rows, total_rows, get_console_width()) {
        log::warn!("Failed to print preview: {}", e);
    }
}

#[cfg(test)]
#[path = "console_format_test.rs"]
mod console_format_test;
