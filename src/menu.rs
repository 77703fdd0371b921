#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnippetOption {
    pub shortcut: char,
    pub label: String,
}

impl SnippetOption {
    pub fn new(shortcut: char, label: impl Into<String>) -> Self {
        Self {
            shortcut,
            label: label.into(),
        }
    }
}

/// The built-in catalog. Order is presentation order in the popup.
pub fn default_catalog() -> Vec<SnippetOption> {
    vec![
        SnippetOption::new('W', "This is option 1"),
        SnippetOption::new('E', "This is option 2"),
        SnippetOption::new('R', "This is option 3"),
    ]
}

/// Popup state for the snippet menu: an anchor cell while open, plus the
/// highlighted row. The highlight survives closing and reopening; it is
/// clamped to the catalog and never wraps.
pub struct SnippetMenu {
    options: Vec<SnippetOption>,
    anchor: Option<(u16, u16)>,
    highlighted: usize,
}

impl SnippetMenu {
    pub fn new(options: Vec<SnippetOption>) -> Self {
        Self {
            options,
            anchor: None,
            highlighted: 0,
        }
    }

    pub fn options(&self) -> &[SnippetOption] {
        &self.options
    }

    pub fn is_open(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn anchor(&self) -> Option<(u16, u16)> {
        self.anchor
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn open_at(&mut self, column: u16, row: u16) {
        self.anchor = Some((column, row));
    }

    pub fn close(&mut self) {
        self.anchor = None;
    }

    pub fn move_highlight(&mut self, delta: i32) {
        if self.options.is_empty() {
            return;
        }
        let last = (self.options.len() - 1) as i32;
        let idx = self.highlighted as i32 + delta;
        self.highlighted = idx.clamp(0, last) as usize;
    }

    /// Case-insensitive lookup of an option by its shortcut key.
    pub fn option_matching(&self, key: char) -> Option<usize> {
        self.options
            .iter()
            .position(|option| option.shortcut.eq_ignore_ascii_case(&key))
    }
}

#[cfg(test)]
#[path = "menu_tests.rs"]
mod menu_tests;
