//! Text buffer behind the editor view.
//!
//! `EditorBuffer` owns the text and a cursor stored as a byte offset
//! (always on a char boundary). Vertical movement works on logical lines
//! and keeps the character column where the target line allows it; wrapping
//! for display is the renderer's concern.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorBuffer {
    text: String,
    /// Byte offset in `text` (0..=text.len())
    cursor: usize,
}

impl EditorBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer preloaded with `text`, cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert a pasted block. `\r\n` and lone `\r` become `\n`.
    pub fn insert_str(&mut self, s: &str) {
        let normalized = s.replace("\r\n", "\n").replace('\r', "\n");
        self.text.insert_str(self.cursor, &normalized);
        self.cursor += normalized.len();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = prev_char_boundary(&self.text, self.cursor);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.text.len() {
            let next = next_char_boundary(&self.text, self.cursor);
            self.text.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = prev_char_boundary(&self.text, self.cursor);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = next_char_boundary(&self.text, self.cursor);
        }
    }

    pub fn move_word_left(&mut self) {
        self.cursor = prev_word_boundary(&self.text, self.cursor);
    }

    pub fn move_word_right(&mut self) {
        self.cursor = next_word_boundary(&self.text, self.cursor);
    }

    /// Start of the current logical line.
    pub fn move_home(&mut self) {
        self.cursor = self.line_start(self.cursor);
    }

    /// End of the current logical line.
    pub fn move_end(&mut self) {
        self.cursor = self.line_end(self.cursor);
    }

    pub fn move_up(&mut self) {
        let start = self.line_start(self.cursor);
        if start == 0 {
            self.cursor = 0;
            return;
        }
        let column = self.text[start..self.cursor].chars().count();
        let prev_start = self.line_start(start - 1);
        self.cursor = self.offset_at_column(prev_start, column);
    }

    pub fn move_down(&mut self) {
        let end = self.line_end(self.cursor);
        if end == self.text.len() {
            self.cursor = end;
            return;
        }
        let column = self.text[self.line_start(self.cursor)..self.cursor]
            .chars()
            .count();
        self.cursor = self.offset_at_column(end + 1, column);
    }

    fn line_start(&self, pos: usize) -> usize {
        self.text[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    fn line_end(&self, pos: usize) -> usize {
        self.text[pos..]
            .find('\n')
            .map(|i| pos + i)
            .unwrap_or(self.text.len())
    }

    /// Byte offset `column` chars into the line starting at `line_start`,
    /// clamped to that line's end.
    fn offset_at_column(&self, line_start: usize, column: usize) -> usize {
        let line_end = self.line_end(line_start);
        self.text[line_start..line_end]
            .char_indices()
            .nth(column)
            .map(|(i, _)| line_start + i)
            .unwrap_or(line_end)
    }
}

/// Byte offset of the character boundary before `pos`.
pub fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the character boundary after `pos`.
pub fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// readline `backward-word`: skip non-word chars, then the word.
fn prev_word_boundary(text: &str, pos: usize) -> usize {
    let mut chars = text[..pos].char_indices().rev().peekable();

    while chars.peek().is_some_and(|&(_, c)| !is_word_char(c)) {
        chars.next();
    }

    let mut boundary = 0;
    while let Some(&(i, c)) = chars.peek() {
        if !is_word_char(c) {
            boundary = i + c.len_utf8();
            break;
        }
        boundary = i;
        chars.next();
    }
    boundary
}

/// readline `forward-word`.
fn next_word_boundary(text: &str, pos: usize) -> usize {
    let mut chars = text[pos..].char_indices().peekable();

    while chars.peek().is_some_and(|&(_, c)| !is_word_char(c)) {
        chars.next();
    }
    while chars.peek().is_some_and(|&(_, c)| is_word_char(c)) {
        chars.next();
    }

    match chars.peek() {
        Some(&(i, _)) => pos + i,
        None => text.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> EditorBuffer {
        let mut buf = EditorBuffer::new();
        for c in s.chars() {
            buf.insert_char(c);
        }
        buf
    }

    #[test]
    fn test_typing_appends_at_cursor() {
        let buf = typed("Hello");
        assert_eq!(buf.text(), "Hello");
        assert_eq!(buf.cursor(), 5);
    }

    #[test]
    fn test_insert_in_middle() {
        let mut buf = typed("Hllo");
        buf.move_home();
        buf.move_right();
        buf.insert_char('e');
        assert_eq!(buf.text(), "Hello");
        assert_eq!(buf.cursor(), 2);
    }

    #[test]
    fn test_backspace_multibyte() {
        let mut buf = typed("café");
        buf.backspace();
        assert_eq!(buf.text(), "caf");
        assert_eq!(buf.cursor(), 3);
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut buf = EditorBuffer::with_text("abc");
        buf.move_home();
        buf.backspace();
        assert_eq!(buf.text(), "abc");
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn test_delete_forward_emoji() {
        let mut buf = EditorBuffer::with_text("a🔥b");
        buf.move_home();
        buf.move_right();
        buf.delete_forward();
        assert_eq!(buf.text(), "ab");
    }

    #[test]
    fn test_with_text_puts_cursor_at_end() {
        let buf = EditorBuffer::with_text("line one\nline two");
        assert_eq!(buf.cursor(), buf.text().len());
    }

    #[test]
    fn test_up_keeps_column_and_clamps() {
        let mut buf = EditorBuffer::with_text("ab\nlonger line");
        buf.move_up();
        assert_eq!(buf.cursor(), 2);
        buf.move_down();
        assert_eq!(&buf.text()[..buf.cursor()], "ab\nlo");
    }

    #[test]
    fn test_up_on_first_line_goes_to_start() {
        let mut buf = EditorBuffer::with_text("only line");
        buf.move_up();
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn test_down_on_last_line_goes_to_end() {
        let mut buf = EditorBuffer::with_text("first\nsecond");
        buf.move_up();
        buf.move_home();
        buf.move_down();
        buf.move_down();
        assert_eq!(buf.cursor(), buf.text().len());
    }

    #[test]
    fn test_vertical_move_counts_chars_not_bytes() {
        let mut buf = EditorBuffer::with_text("éé\nabc");
        buf.move_up();
        assert_eq!(buf.cursor(), 4);
    }

    #[test]
    fn test_paste_normalizes_line_endings() {
        let mut buf = EditorBuffer::new();
        buf.insert_str("a\r\nb\rc");
        assert_eq!(buf.text(), "a\nb\nc");
        assert_eq!(buf.cursor(), 5);
    }

    #[test]
    fn test_word_movement() {
        let mut buf = EditorBuffer::with_text("hello world");
        buf.move_word_left();
        assert_eq!(buf.cursor(), 6);
        buf.move_word_left();
        assert_eq!(buf.cursor(), 0);
        buf.move_word_right();
        assert_eq!(buf.cursor(), 5);
    }

    #[test]
    fn test_is_blank() {
        assert!(EditorBuffer::with_text(" \n\t").is_blank());
        assert!(!EditorBuffer::with_text(" x ").is_blank());
    }

    #[test]
    fn test_char_boundaries() {
        let s = "a🔥b";
        assert_eq!(prev_char_boundary(s, 5), 1);
        assert_eq!(next_char_boundary(s, 1), 5);
        assert_eq!(next_char_boundary(s, 5), 6);
    }
}
