/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The editable markdown text and a flat cursor.
///
/// The cursor is a byte offset into `text` that always lies on a char
/// boundary and never exceeds `text.len()`. Lines are derived by splitting on
/// `'\n'` every time they are needed; nothing line-shaped is cached because
/// the text can change between reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
    cursor: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: Option<usize>,
}

impl Document {
    /// Create a document with the cursor at the start.
    pub fn from_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: 0,
            col_memory: None,
        }
    }

    /// The full text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The cursor as a byte offset into the text.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the whole text.
    ///
    /// The cursor keeps its offset unless that offset no longer fits, in
    /// which case it is clamped into the new text.
    pub fn set_value(&mut self, text: &str) {
        text.clone_into(&mut self.text);
        self.cursor = floor_char_boundary(&self.text, self.cursor);
        self.col_memory = None;
    }

    /// Place the cursor at `offset`, clamped to the text.
    pub fn set_cursor(&mut self, offset: usize) {
        self.cursor = floor_char_boundary(&self.text, offset);
        self.col_memory = None;
    }

    /// Insert `fragment` at the cursor and move the cursor past it.
    pub fn insert_at(&mut self, fragment: &str) {
        if fragment.is_empty() {
            return;
        }
        self.text.insert_str(self.cursor, fragment);
        self.cursor += fragment.len();
        self.col_memory = None;
    }

    /// Insert a character at the cursor.
    pub fn insert_char(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
        self.col_memory = None;
    }

    /// Split the current line at the cursor (Enter key).
    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// Delete the character before the cursor (Backspace).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_back(&mut self) -> bool {
        let Some(prev) = self.text[..self.cursor].chars().next_back() else {
            return false;
        };
        self.cursor -= prev.len_utf8();
        self.text.remove(self.cursor);
        self.col_memory = None;
        true
    }

    /// Delete the character at the cursor (Delete key).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.text.len() {
            return false;
        }
        self.text.remove(self.cursor);
        self.col_memory = None;
        true
    }

    /// The line containing the cursor.
    pub fn current_line(&self) -> &str {
        current_line(&self.text, self.cursor)
    }

    /// Total number of lines (an empty document has one empty line).
    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    /// Iterate over the lines of the text.
    pub fn lines(&self) -> std::str::Split<'_, char> {
        self.text.split('\n')
    }

    /// Zero-based (line, byte column) of the cursor.
    pub fn cursor_position(&self) -> (usize, usize) {
        let before = &self.text[..self.cursor];
        let line = before.matches('\n').count();
        let col = before.rfind('\n').map_or(self.cursor, |nl| self.cursor - nl - 1);
        (line, col)
    }

    /// Move the cursor in the given direction.
    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up => self.move_vertical(false),
            Direction::Down => self.move_vertical(true),
        }
    }

    /// Move cursor to the beginning of the line (Home).
    pub fn move_home(&mut self) {
        self.cursor = self.line_start(self.cursor);
        self.col_memory = None;
    }

    /// Move cursor to the end of the line (End).
    pub fn move_end(&mut self) {
        self.cursor = self.line_end(self.cursor);
        self.col_memory = None;
    }

    /// Move cursor to the start of the text (Ctrl+Home).
    pub const fn move_to_start(&mut self) {
        self.cursor = 0;
        self.col_memory = None;
    }

    /// Move cursor to the end of the text (Ctrl+End).
    pub fn move_to_end(&mut self) {
        self.cursor = self.text.len();
        self.col_memory = None;
    }

    // --- Private helpers ---

    fn line_start(&self, offset: usize) -> usize {
        self.text[..offset].rfind('\n').map_or(0, |nl| nl + 1)
    }

    fn line_end(&self, offset: usize) -> usize {
        self.text[offset..]
            .find('\n')
            .map_or(self.text.len(), |nl| offset + nl)
    }

    fn move_left(&mut self) {
        if let Some(prev) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
        }
        self.col_memory = None;
    }

    fn move_right(&mut self) {
        if let Some(next) = self.text[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
        self.col_memory = None;
    }

    fn move_vertical(&mut self, down: bool) {
        let start = self.line_start(self.cursor);
        let col = *self.col_memory.get_or_insert(self.cursor - start);

        let target_start = if down {
            let end = self.line_end(self.cursor);
            if end >= self.text.len() {
                return;
            }
            end + 1
        } else {
            if start == 0 {
                return;
            }
            self.line_start(start - 1)
        };
        let target_end = self.line_end(target_start);
        let line = &self.text[target_start..target_end];
        self.cursor = target_start + floor_char_boundary(line, col);
    }
}

/// The line of `text` that contains `cursor`.
///
/// Walks the lines accumulating consumed length (each separator counts as
/// one) and returns the first line whose end reaches `cursor`. A cursor past
/// the last line's range yields the last line; empty text yields `""`.
pub fn current_line(text: &str, cursor: usize) -> &str {
    if text.is_empty() {
        return "";
    }
    let mut consumed = 0usize;
    let mut last = "";
    for line in text.split('\n') {
        if consumed + line.len() >= cursor {
            return line;
        }
        consumed += line.len() + 1;
        last = line;
    }
    last
}

/// Remove the first line whose content equals `target`.
///
/// Lines are matched by value, not by position: when the same content occurs
/// more than once the earliest occurrence is the one removed. Text without a
/// matching line is returned unchanged. Removing the last line drops its
/// separator with it, and removing the only line yields an empty string.
pub fn delete_line(text: &str, target: &str) -> String {
    let mut lines: Vec<&str> = text.split('\n').collect();
    let Some(idx) = lines.iter().position(|line| *line == target) else {
        return text.to_string();
    };
    lines.remove(idx);
    lines.join("\n")
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut idx = index;
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}
