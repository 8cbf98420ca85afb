use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;

use crate::config::DisplayOptions;
use crate::query::{TuneQuery, TuneSnapshot};

use super::forms::{PromptForm, PromptKind};
use super::helpers::{centered_rect, optional_cell, surface_error};
use super::screens::ResultsScreen;

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Rows skipped by PageUp/PageDown in the results table.
const PAGE_STEP: isize = 10;
/// Numbered entries of the main menu.
const MENU_ITEMS: &[(char, &str)] = &[
    ('1', "Show tunes by book"),
    ('2', "Show tunes by type"),
    ('3', "Search tunes by title"),
    ('4', "Show tunes by key"),
    ('5', "Show all tunes"),
    ('0', "Exit"),
];
const INVALID_OPTION: &str = "Invalid option. Try again.";

enum Screen {
    Menu,
    Results(ResultsScreen),
}

enum Mode {
    Normal,
    Prompting(PromptForm),
}

struct StatusMessage {
    text: String,
    kind: StatusKind,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Menu state over a frozen snapshot of the tune store.
pub struct App {
    snapshot: TuneSnapshot,
    display: DisplayOptions,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(snapshot: TuneSnapshot, display: DisplayOptions) -> Self {
        Self {
            snapshot,
            display,
            screen: Screen::Menu,
            mode: Mode::Normal,
            status: None,
        }
    }

    /// Apply one key press. Returns `true` once the user asked to exit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::Prompting(form) => self.handle_prompt(code, form)?,
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match self.screen {
            Screen::Menu => match code {
                KeyCode::Char('0') | KeyCode::Char('q') | KeyCode::Esc => {
                    *exit = true;
                }
                KeyCode::Char('1') => return Ok(self.open_prompt(PromptKind::Book)),
                KeyCode::Char('2') => return Ok(self.open_prompt(PromptKind::Type)),
                KeyCode::Char('3') => return Ok(self.open_prompt(PromptKind::Title)),
                KeyCode::Char('4') => return Ok(self.open_prompt(PromptKind::Key)),
                KeyCode::Char('5') => self.run_query(TuneQuery::All),
                KeyCode::Char(_) | KeyCode::Enter => {
                    self.set_status(INVALID_OPTION, StatusKind::Error);
                }
                _ => {}
            },
            Screen::Results(ref mut results) => {
                let mut back_to_menu = false;
                match code {
                    KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') | KeyCode::Char('m') => {
                        back_to_menu = true;
                    }
                    KeyCode::Up => results.move_selection(-1),
                    KeyCode::Down => results.move_selection(1),
                    KeyCode::PageUp => results.move_selection(-PAGE_STEP),
                    KeyCode::PageDown => results.move_selection(PAGE_STEP),
                    KeyCode::Home => results.select_first(),
                    KeyCode::End => results.select_last(),
                    _ => {}
                }

                if back_to_menu {
                    self.screen = Screen::Menu;
                    self.clear_status();
                }
            }
        }
        Ok(Mode::Normal)
    }

    fn handle_prompt(&mut self, code: KeyCode, mut form: PromptForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status("Query cancelled.", StatusKind::Info);
                return Ok(Mode::Normal);
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match form.to_query() {
                Ok(query) => {
                    self.run_query(query);
                    return Ok(Mode::Normal);
                }
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Ok(Mode::Prompting(form))
    }

    fn open_prompt(&mut self, kind: PromptKind) -> Mode {
        self.clear_status();
        Mode::Prompting(PromptForm::new(kind))
    }

    /// Run `query` against the snapshot and either open the results table or
    /// report that nothing matched.
    fn run_query(&mut self, query: TuneQuery) {
        let matches = query.apply(&self.snapshot);
        if matches.is_empty() {
            self.set_status(query.empty_message(), StatusKind::Info);
            self.screen = Screen::Menu;
            return;
        }

        let count = matches.len();
        let results = ResultsScreen::new(query, &matches, &self.display);
        let suffix = if count == 1 { "" } else { "s" };
        self.set_status(format!("{count} tune{suffix} found."), StatusKind::Info);
        self.screen = Screen::Results(results);
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Menu => self.draw_menu(frame, content_area),
            Screen::Results(results) => self.draw_results(frame, content_area, results),
        }

        // Too short for a separate footer; the content gets the whole area.
        if footer_area != content_area {
            self.draw_footer(frame, footer_area);
        }

        if let Mode::Prompting(form) = &self.mode {
            self.draw_prompt(frame, area, form);
        }
    }

    fn draw_menu(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("ABC Tune Database");
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);

        let mut lines = vec![
            Line::from(Span::styled(
                format!("{} tunes loaded", self.snapshot.len()),
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
        ];
        lines.extend(MENU_ITEMS.iter().map(|(key, label)| {
            Line::from(vec![
                Span::styled(format!("{key}."), key_style),
                Span::raw(format!(" {label}")),
            ])
        }));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn draw_results(&self, frame: &mut Frame, area: Rect, results: &ResultsScreen) {
        let title = if results.is_truncated() {
            format!(
                "{} (showing {} of {})",
                results.query.heading(),
                results.rows.len(),
                results.total
            )
        } else {
            format!("{} ({})", results.query.heading(), results.total)
        };

        let header_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let header = Row::new(["ID", "Title", "Type", "Meter", "Key", "Book"]).style(header_style);

        let display = &self.display;
        let rows = results.rows.iter().map(|tune| {
            Row::new(vec![
                Cell::from(tune.id.to_string()),
                Cell::from(display.fit_cell(optional_cell(tune.title.as_deref()))),
                Cell::from(display.fit_cell(optional_cell(tune.tune_type.as_deref()))),
                Cell::from(display.fit_cell(optional_cell(tune.meter.as_deref()))),
                Cell::from(display.fit_cell(optional_cell(tune.key.as_deref()))),
                Cell::from(tune.book_number.to_string()),
            ])
        });

        let widths = [
            Constraint::Length(6),
            Constraint::Min(20),
            Constraint::Length(14),
            Constraint::Length(7),
            Constraint::Length(8),
            Constraint::Length(5),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title))
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        let mut state = TableState::default().with_selected(Some(results.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match (&self.screen, &self.mode) {
            (_, Mode::Prompting(_)) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Search   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (Screen::Menu, Mode::Normal) => Line::from(vec![
                Span::styled("[1-5]", key_style),
                Span::raw(" Choose   "),
                Span::styled("[0/q]", key_style),
                Span::raw(" Exit"),
            ]),
            (Screen::Results(_), Mode::Normal) => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Scroll   "),
                Span::styled("[PgUp/PgDn]", key_style),
                Span::raw(" Page   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Menu"),
            ]),
        }
    }

    fn draw_prompt(&self, frame: &mut Frame, area: Rect, form: &PromptForm) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(form.kind.title()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![form.build_line(), Line::from("")];
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to search • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let prefix = form.prefix().chars().count() as u16;
        frame.set_cursor_position((inner.x + prefix + form.value_len() as u16, inner.y));
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}
