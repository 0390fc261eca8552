//! Wrapping and cursor placement for the editor box.
//!
//! Pure functions over the buffer text; nothing here touches a `Frame`.
//! Logical lines (split on `\n`) are wrapped one at a time so an empty line,
//! including a trailing one, always occupies exactly one row.

use unicode_width::UnicodeWidthStr;

/// Border (2) + horizontal padding (2)
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// From the box edge to the first text column: border + padding
pub(super) const CONTENT_X_OFFSET: u16 = 2;
/// From the box edge to the first text row: border
pub(super) const CONTENT_Y_OFFSET: u16 = 1;

pub(super) fn wrap_options(inner_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(inner_width.max(1) as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Rows of one logical line once wrapped.
fn wrap_logical(line: &str, width: u16) -> Vec<String> {
    if line.is_empty() {
        return vec![String::new()];
    }
    let rows: Vec<String> = textwrap::wrap(line, wrap_options(width))
        .into_iter()
        .map(|row| row.into_owned())
        .collect();
    if rows.is_empty() {
        vec![String::new()]
    } else {
        rows
    }
}

/// Every screen row of `text` at `width` columns.
pub(super) fn visual_rows(text: &str, width: u16) -> Vec<String> {
    text.split('\n')
        .flat_map(|line| wrap_logical(line, width))
        .collect()
}

/// Byte offset in `line` where each wrapped row begins. Rows after the
/// first skip the spaces textwrap dropped at the break.
fn row_starts(line: &str, rows: &[String]) -> Vec<usize> {
    let mut starts = Vec::with_capacity(rows.len());
    let mut pos = 0;
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            let rest = &line[pos..];
            pos += rest.len() - rest.trim_start_matches(' ').len();
        }
        starts.push(pos);
        pos = (pos + row.len()).min(line.len());
    }
    starts
}

/// (column, row) of the byte offset `cursor`, counted in wrapped rows from
/// the top of the text.
pub(super) fn cursor_cell(text: &str, cursor: usize, width: u16) -> (u16, u16) {
    let cursor = cursor.min(text.len());
    let line_start = text[..cursor].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line_end = text[cursor..]
        .find('\n')
        .map(|i| cursor + i)
        .unwrap_or(text.len());

    let rows_above: usize = text[..line_start]
        .split_terminator('\n')
        .map(|line| wrap_logical(line, width).len())
        .sum();

    // Wrap the whole line, as the renderer does, then find the row holding
    // the cursor. Columns count from the row start so spaces left at a
    // break still advance the cursor.
    let line = &text[line_start..line_end];
    let offset = cursor - line_start;
    let starts = row_starts(line, &wrap_logical(line, width));
    let row_in_line = starts.iter().rposition(|&s| s <= offset).unwrap_or(0);
    let col = line[starts[row_in_line]..offset].width();

    let row = rows_above + row_in_line;
    (
        u16::try_from(col).unwrap_or(u16::MAX).min(width),
        u16::try_from(row).unwrap_or(u16::MAX),
    )
}

/// Smallest change to `scroll` that keeps `cursor_row` inside a window of
/// `visible` rows.
pub(super) fn scroll_to_cursor(scroll: u16, cursor_row: u16, visible: u16) -> u16 {
    let visible = visible.max(1);
    if cursor_row < scroll {
        cursor_row
    } else if cursor_row >= scroll + visible {
        cursor_row - (visible - 1)
    } else {
        scroll
    }
}
