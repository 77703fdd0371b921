use std::io;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthChar;

mod field;
mod menu;

use field::{FieldEditor, TRIGGER_KEY};
use menu::{SnippetMenu, SnippetOption, default_catalog};

const FIELD_ROWS: u16 = 5;

fn main() -> Result<()> {
    run()
}

fn run() -> Result<()> {
    let mut app = App::new(default_catalog());

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal backend")?;
    terminal.clear().ok();

    let res = run_app(&mut terminal, &mut app).context("application error");

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while !app.should_quit() {
        terminal
            .draw(|frame| app.draw(frame))
            .context("failed to draw frame")?;

        let evt = event::read().context("failed to read event")?;
        app.handle_event(evt);
    }

    Ok(())
}

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
struct PointerPosition {
    column: u16,
    row: u16,
}

/// Regions of the last drawn frame, kept for mouse hit testing.
#[derive(Clone, Copy, Default)]
struct ScreenAreas {
    field: Rect,
    popup: Option<Rect>,
}

struct App {
    field: FieldEditor,
    menu: SnippetMenu,
    pointer: PointerPosition,
    areas: ScreenAreas,
    should_quit: bool,
}

impl App {
    fn new(options: Vec<SnippetOption>) -> Self {
        Self {
            field: FieldEditor::new(),
            menu: SnippetMenu::new(options),
            pointer: PointerPosition::default(),
            areas: ScreenAreas::default(),
            should_quit: false,
        }
    }

    fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => self.handle_key(code, modifiers),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    // Keyboard branches are ordered and mutually exclusive: trigger key,
    // Escape, highlight movement, shortcut selection, then field editing.
    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if matches!(code, KeyCode::Char('q') | KeyCode::Char('c'))
            && modifiers.contains(KeyModifiers::CONTROL)
        {
            self.should_quit = true;
            return;
        }

        match code {
            KeyCode::Char(TRIGGER_KEY)
                if !modifiers.contains(KeyModifiers::CONTROL)
                    && !modifiers.contains(KeyModifiers::ALT) =>
            {
                self.menu.open_at(self.pointer.column, self.pointer.row);
                self.field.set_show_slash(true);
            }
            KeyCode::Esc => {
                // the trailing slash stays visible after Escape
                self.menu.close();
                self.field.set_show_slash(true);
            }
            KeyCode::Down => self.menu.move_highlight(1),
            KeyCode::Up => self.menu.move_highlight(-1),
            KeyCode::Char(ch) if self.menu.is_open() => {
                if let Some(index) = self.menu.option_matching(ch) {
                    self.select_option(index);
                }
            }
            _ if self.menu.is_open() => {}
            KeyCode::Enter => {
                self.field.insert_char('\n');
            }
            KeyCode::Backspace => {
                self.field.backspace();
            }
            KeyCode::Delete => {
                self.field.delete();
            }
            KeyCode::Left => {
                self.field.move_left();
            }
            KeyCode::Right => {
                self.field.move_right();
            }
            KeyCode::Home => {
                self.field.move_line_start();
            }
            KeyCode::End => {
                self.field.move_line_end();
            }
            KeyCode::Char(ch)
                if !modifiers.contains(KeyModifiers::CONTROL)
                    && !modifiers.contains(KeyModifiers::ALT) =>
            {
                self.field.insert_char(ch);
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.pointer = PointerPosition {
                    column: mouse.column,
                    row: mouse.row,
                };
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_mouse_press(mouse.column, mouse.row);
            }
            _ => {}
        }
    }

    fn handle_mouse_press(&mut self, column: u16, row: u16) {
        if self.menu.is_open() {
            if let Some(popup) = self.areas.popup {
                if popup.contains(Position::new(column, row)) {
                    let first_row = popup.y + 1;
                    if row >= first_row {
                        let index = (row - first_row) as usize;
                        if index < self.menu.options().len() {
                            self.select_option(index);
                        }
                    }
                    return;
                }
            }
            self.menu.close();
            self.field.set_show_slash(false);
        }

        if self.areas.field.contains(Position::new(column, row)) {
            self.caret_from_click(column, row);
        }
    }

    fn select_option(&mut self, index: usize) {
        if let Some(option) = self.menu.options().get(index) {
            let label = option.label.clone();
            self.field.insert_at_caret(&label);
        }
        self.menu.close();
        self.field.set_show_slash(false);
    }

    fn caret_from_click(&mut self, column: u16, row: u16) {
        let inner = self.areas.field;
        let text = self.field.text().to_string();
        let lines: Vec<&str> = text.split('\n').collect();

        let line_idx = ((row - inner.y) as usize).min(lines.len() - 1);
        let mut position = 0usize;
        for line in lines.iter().take(line_idx) {
            position += line.chars().count() + 1;
        }

        let target = (column - inner.x) as usize;
        let mut width = 0usize;
        for ch in lines[line_idx].chars() {
            if width >= target {
                break;
            }
            width += UnicodeWidthChar::width(ch).unwrap_or(0);
            position += 1;
        }

        self.field.caret_to(position);
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if area.height == 0 || area.width == 0 {
            return;
        }

        let status_height = if area.height > 1 { 2 } else { 1 };
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(FIELD_ROWS + 2),
                Constraint::Min(0),
                Constraint::Length(status_height),
            ])
            .split(area);
        let field_area = vertical[0];
        let status_area = vertical[2];

        let field_block = Block::default().title("Enter text").borders(Borders::ALL);
        let inner = field_block.inner(field_area);
        self.areas.field = inner;
        self.areas.popup = None;

        let paragraph = Paragraph::new(self.field.display_text()).block(field_block);
        frame.render_widget(paragraph, field_area);

        if let Some(span) = self.field.caret() {
            let (line, column) = caret_visual_position(self.field.text(), span.end);
            if (line as u16) < inner.height && inner.width > 0 {
                let cursor_x = inner.x + (column as u16).min(inner.width - 1);
                let cursor_y = inner.y + line as u16;
                frame.set_cursor_position(Position::new(cursor_x, cursor_y));
            }
        }

        let status_widget = Paragraph::new(Line::from(Span::styled(
            self.status_line(),
            Style::default(),
        )))
        .block(Block::default().borders(Borders::TOP));
        frame.render_widget(status_widget, status_area);

        if self.menu.is_open() {
            self.render_menu(frame, area);
        }
    }

    fn render_menu(&mut self, frame: &mut Frame, area: Rect) {
        let Some((anchor_column, anchor_row)) = self.menu.anchor() else {
            return;
        };
        if area.width < 3 || area.height < 3 {
            return;
        }

        let options = self.menu.options();
        if options.is_empty() {
            return;
        }

        let max_label_width = options
            .iter()
            .map(|option| option.label.chars().count())
            .max()
            .unwrap_or(0);
        let content_width = (max_label_width + 2 + 1) as u16;
        let width = (content_width + 4).min(area.width);
        let height = (options.len() as u16 + 2).min(area.height);

        let x = anchor_column.min(area.right().saturating_sub(width));
        let y = anchor_row.min(area.bottom().saturating_sub(height));
        let popup_area = Rect::new(x, y, width, height);

        frame.render_widget(Clear, popup_area);

        let popup_style = Style::default().bg(Color::Black).fg(Color::White);
        let mut rows = Vec::new();
        for option in options {
            let content = format!(
                "{label:<label_width$}  {shortcut}",
                label = option.label,
                label_width = max_label_width,
                shortcut = option.shortcut,
            );
            rows.push(ListItem::new(Line::from(Span::styled(
                content,
                popup_style,
            ))));
        }

        let mut state = ListState::default();
        state.select(Some(self.menu.highlighted()));

        let list = List::new(rows)
            .highlight_style(Style::default().bg(Color::White).fg(Color::Black))
            .style(popup_style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .style(popup_style)
                    .border_style(Style::default().fg(Color::Gray)),
            );

        frame.render_stateful_widget(list, popup_area, &mut state);
        self.areas.popup = Some(popup_area);
    }

    fn status_line(&self) -> String {
        let caret_text = match self.field.caret() {
            Some(span) => {
                let (line, column) = caret_visual_position(self.field.text(), span.end);
                format!("[{},{}]", line + 1, column + 1)
            }
            None => "[?,?]".to_string(),
        };

        let hint = if self.menu.is_open() {
            let keys = self
                .menu
                .options()
                .iter()
                .map(|option| option.shortcut.to_string())
                .collect::<Vec<_>>()
                .join("/");
            format!("{keys} insert | Esc close")
        } else {
            format!("{TRIGGER_KEY} snippets")
        };

        format!("{caret_text} | {hint} | Ctrl-Q quit")
    }
}

fn caret_visual_position(text: &str, position: usize) -> (usize, usize) {
    let mut line = 0usize;
    let mut column = 0usize;
    for ch in text.chars().take(position) {
        if ch == '\n' {
            line += 1;
            column = 0;
        } else {
            column += UnicodeWidthChar::width(ch).unwrap_or(0);
        }
    }
    (line, column)
}
