/// The key that opens the snippet menu. While a menu session is live the
/// field displays this character appended to the text without committing it.
pub const TRIGGER_KEY: char = '/';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaretSpan {
    pub start: usize,
    pub end: usize,
}

impl CaretSpan {
    pub fn collapsed(position: usize) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// A flat multiline text buffer with an optional caret span. Spans are
/// measured in characters, `start <= end <= len`. A `None` caret means the
/// field has no selection to report and splices become no-ops.
pub struct FieldEditor {
    text: String,
    caret: Option<CaretSpan>,
    show_slash: bool,
}

impl FieldEditor {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            caret: Some(CaretSpan::collapsed(0)),
            show_slash: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> Option<CaretSpan> {
        self.caret
    }

    pub fn show_slash(&self) -> bool {
        self.show_slash
    }

    pub fn set_show_slash(&mut self, show: bool) {
        self.show_slash = show;
    }

    /// The value as shown to the user: the committed text, with the trigger
    /// character overlaid at the end while a menu session is live.
    pub fn display_text(&self) -> String {
        if self.show_slash {
            format!("{}{}", self.text, TRIGGER_KEY)
        } else {
            self.text.clone()
        }
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn set_caret(&mut self, caret: Option<CaretSpan>) {
        self.caret = caret.map(|span| {
            let len = self.char_len();
            let start = span.start.min(len);
            let end = span.end.min(len).max(start);
            CaretSpan { start, end }
        });
    }

    pub fn caret_to(&mut self, position: usize) {
        self.set_caret(Some(CaretSpan::collapsed(position)));
    }

    /// Replaces the caret span with `insert` in a single splice and turns
    /// the trailing-slash overlay off. Without a caret nothing changes.
    pub fn insert_at_caret(&mut self, insert: &str) -> bool {
        let Some(span) = self.caret else {
            return false;
        };
        self.splice(span, insert);
        self.show_slash = false;
        true
    }

    pub fn insert_char(&mut self, ch: char) -> bool {
        let Some(span) = self.caret else {
            return false;
        };
        let mut buf = [0u8; 4];
        self.splice(span, ch.encode_utf8(&mut buf));
        true
    }

    pub fn backspace(&mut self) -> bool {
        let Some(span) = self.caret else {
            return false;
        };
        if !span.is_collapsed() {
            self.splice(span, "");
            return true;
        }
        if span.start == 0 {
            return false;
        }
        self.splice(
            CaretSpan {
                start: span.start - 1,
                end: span.start,
            },
            "",
        );
        true
    }

    pub fn delete(&mut self) -> bool {
        let Some(span) = self.caret else {
            return false;
        };
        if !span.is_collapsed() {
            self.splice(span, "");
            return true;
        }
        if span.start >= self.char_len() {
            return false;
        }
        self.splice(
            CaretSpan {
                start: span.start,
                end: span.start + 1,
            },
            "",
        );
        true
    }

    pub fn move_left(&mut self) -> bool {
        let Some(span) = self.caret else {
            return false;
        };
        let target = if span.is_collapsed() {
            let Some(previous) = span.start.checked_sub(1) else {
                return false;
            };
            previous
        } else {
            span.start
        };
        self.caret = Some(CaretSpan::collapsed(target));
        true
    }

    pub fn move_right(&mut self) -> bool {
        let Some(span) = self.caret else {
            return false;
        };
        let target = if span.is_collapsed() {
            if span.end >= self.char_len() {
                return false;
            }
            span.end + 1
        } else {
            span.end
        };
        self.caret = Some(CaretSpan::collapsed(target));
        true
    }

    pub fn move_line_start(&mut self) -> bool {
        let Some(span) = self.caret else {
            return false;
        };
        let (start, _) = self.line_bounds(span.start);
        self.caret = Some(CaretSpan::collapsed(start));
        true
    }

    pub fn move_line_end(&mut self) -> bool {
        let Some(span) = self.caret else {
            return false;
        };
        let (_, end) = self.line_bounds(span.end);
        self.caret = Some(CaretSpan::collapsed(end));
        true
    }

    fn splice(&mut self, span: CaretSpan, insert: &str) {
        let start = char_to_byte_idx(&self.text, span.start);
        let end = char_to_byte_idx(&self.text, span.end);
        self.text.replace_range(start..end, insert);
        self.caret = Some(CaretSpan::collapsed(span.start + insert.chars().count()));
    }

    // Bounds of the line containing the character position, exclusive of
    // the newline on either side.
    fn line_bounds(&self, position: usize) -> (usize, usize) {
        let chars: Vec<char> = self.text.chars().collect();
        let position = position.min(chars.len());
        let start = chars[..position]
            .iter()
            .rposition(|&ch| ch == '\n')
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let end = chars[position..]
            .iter()
            .position(|&ch| ch == '\n')
            .map(|idx| position + idx)
            .unwrap_or(chars.len());
        (start, end)
    }
}

pub fn char_to_byte_idx(text: &str, char_idx: usize) -> usize {
    if char_idx == 0 {
        return 0;
    }
    for (count, (byte_idx, _)) in text.char_indices().enumerate() {
        if count == char_idx {
            return byte_idx;
        }
    }
    text.len()
}

#[cfg(test)]
#[path = "field_tests.rs"]
mod field_tests;
