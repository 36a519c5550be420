//! Interactive staff directory screen using ratatui.
//!
//! Lists staff with a live search box, opens a profile view for the selected
//! record, and hosts the "Add New Staff" modal. Fetches run in the background
//! through [`DirectoryStore`]; the loop applies their results on every tick.

use std::io::{self, IsTerminal, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{
        self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use tracing::{debug, info};

use crate::api::DirectoryApi;
use crate::config::TuiConfig;
use crate::directory::{
    CREATE_FAILED_ALERT, CreationForm, DirectoryStore, FormField, NO_RESULTS, filter_staff,
};
use crate::error::{DirError, Result};
use crate::model::{RecordId, Staff};

const TITLE: &str = "Staff Directory";
const SEARCH_PLACEHOLDER: &str = "Search Anything...";
const ADD_BUTTON: &str = "+ Add Staff";
const FORM_TITLE: &str = " Add New Staff ";

/// Action to take after handling input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Leave the screen
    Quit,
    /// Keep running
    Continue,
}

/// TUI application state.
pub struct DirectoryScreen {
    store: DirectoryStore,
    /// Indices into the store's staff list after filtering
    filtered: Vec<usize>,
    list_state: ListState,
    search_query: String,
    search_focused: bool,
    creation: CreationForm,
    active_field: FormField,
    /// Blocking alert; swallows input until dismissed
    alert: Option<String>,
    /// Record shown in the profile view
    profile: Option<Staff>,
    last_profile: Option<RecordId>,
    show_help: bool,
    status_message: Option<String>,
    poll_interval: Duration,
    refresh_on_focus: bool,
}

impl DirectoryScreen {
    pub fn new(store: DirectoryStore, config: &TuiConfig) -> Self {
        let mut screen = Self {
            store,
            filtered: Vec::new(),
            list_state: ListState::default(),
            search_query: String::new(),
            search_focused: false,
            creation: CreationForm::new(),
            active_field: FormField::Name,
            alert: None,
            profile: None,
            last_profile: None,
            show_help: false,
            status_message: None,
            poll_interval: Duration::from_millis(config.poll_interval_ms.max(10)),
            refresh_on_focus: config.refresh_on_focus,
        };
        screen.apply_filter(true);
        screen
    }

    /// Run the TUI main loop. Returns the id of the last profile opened.
    pub fn run(
        mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<Option<RecordId>> {
        self.store.mount();

        loop {
            if self.store.poll() {
                self.apply_filter(false);
            }

            terminal.draw(|f| self.draw(f))?;

            if event::poll(self.poll_interval)? {
                let event = event::read()?;
                if self.handle_event(&event) == Action::Quit {
                    self.store.cancel();
                    return Ok(self.last_profile);
                }
            }
        }
    }

    fn handle_event(&mut self, event: &Event) -> Action {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.handle_key(key.code, key.modifiers)
            }
            Event::FocusGained if self.refresh_on_focus => {
                self.refresh();
                Action::Continue
            }
            _ => Action::Continue,
        }
    }

    fn draw(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title bar
                Constraint::Length(3), // Search bar
                Constraint::Length(1), // Add button
                Constraint::Min(5),    // Main content
                Constraint::Length(1), // Help bar
            ])
            .split(f.area());

        self.draw_title_bar(f, chunks[0]);
        self.draw_search_bar(f, chunks[1]);
        self.draw_add_button(f, chunks[2]);
        if self.profile.is_some() {
            self.draw_profile(f, chunks[3]);
        } else {
            self.draw_staff_list(f, chunks[3]);
        }
        self.draw_help_bar(f, chunks[4]);

        if self.creation.is_visible() {
            self.draw_form_modal(f);
        }
        if self.show_help {
            self.draw_help_overlay(f);
        }
        if self.alert.is_some() {
            self.draw_alert(f);
        }
    }

    fn draw_title_bar(&self, f: &mut Frame, area: Rect) {
        let freshness = if self.store.is_loading() {
            " | loading...".to_string()
        } else {
            self.store
                .staff_updated_at()
                .map(|at| format!(" | updated {}", at.format("%H:%M:%S")))
                .unwrap_or_default()
        };
        let status = self
            .status_message
            .as_ref()
            .map(|m| format!(" | {m}"))
            .unwrap_or_default();

        let title = Line::from(vec![
            Span::styled(TITLE, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(
                " | {} staff ({} shown){freshness}{status}",
                self.store.staff().len(),
                self.filtered.len(),
            )),
        ]);

        let paragraph = Paragraph::new(title).style(Style::default().fg(Color::Cyan));
        f.render_widget(paragraph, area);
    }

    fn draw_search_bar(&self, f: &mut Frame, area: Rect) {
        let border_style = if self.search_focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        let search_text = if self.search_focused {
            format!("{}_", self.search_query)
        } else if self.search_query.is_empty() {
            SEARCH_PLACEHOLDER.to_string()
        } else {
            self.search_query.clone()
        };

        let paragraph = Paragraph::new(search_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(" Search "),
            )
            .style(if self.search_query.is_empty() && !self.search_focused {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            });

        f.render_widget(paragraph, area);
    }

    fn draw_add_button(&self, f: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(
                format!(" {ADD_BUTTON} "),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" (a)", Style::default().fg(Color::DarkGray)),
        ]);
        f.render_widget(Paragraph::new(line), area);
    }

    fn draw_staff_list(&mut self, f: &mut Frame, area: Rect) {
        let is_focused = !self.search_focused && !self.creation.is_visible();
        let border_style = if is_focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Staff ");

        if self.filtered.is_empty() {
            let paragraph = Paragraph::new(NO_RESULTS)
                .block(block)
                .style(Style::default().fg(Color::DarkGray));
            f.render_widget(paragraph, area);
            return;
        }

        let staff = self.store.staff();
        let items: Vec<ListItem> = self
            .filtered
            .iter()
            .filter_map(|&idx| staff.get(idx))
            .map(|s| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:32}", truncate(&s.name, 32)),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        truncate(&s.department.name, 24),
                        Style::default().fg(Color::Blue),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn draw_profile(&self, f: &mut Frame, area: Rect) {
        let content = self
            .profile
            .as_ref()
            .map_or_else(|| Text::from("No staff selected"), profile_text);

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(" Profile "),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, area);
    }

    fn draw_help_bar(&self, f: &mut Frame, area: Rect) {
        let help_text = if self.alert.is_some() {
            "Enter/Esc: dismiss"
        } else if self.creation.is_visible() {
            "Tab/Down: next field  Shift-Tab/Up: previous  Enter: save  Esc: close"
        } else if self.search_focused {
            "Enter/Esc: done  Backspace: delete"
        } else if self.profile.is_some() {
            "Esc: back to list  q: quit"
        } else {
            "j/k: navigate  /: search  Enter: profile  a: add staff  r: refresh  ?: help  q: quit"
        };

        let paragraph = Paragraph::new(help_text).style(Style::default().fg(Color::DarkGray));
        f.render_widget(paragraph, area);
    }

    fn draw_form_modal(&self, f: &mut Frame) {
        let height = u16::try_from(FormField::ALL.len()).unwrap_or(8) + 4;
        let modal_area = centered_rect(56, height, f.area());
        f.render_widget(Clear, modal_area);

        let form = self.creation.form();
        let mut lines: Vec<Line> = FormField::ALL
            .iter()
            .map(|&field| {
                let active = field == self.active_field;
                let marker = if active { "> " } else { "  " };
                let value = form.get(field);
                let text = if value.is_empty() && !active {
                    Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray))
                } else if active {
                    Span::styled(format!("{value}_"), Style::default().fg(Color::Yellow))
                } else {
                    Span::raw(value.to_string())
                };
                Line::from(vec![Span::raw(marker), text])
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Enter: Save Staff   Esc: Close",
            Style::default().fg(Color::DarkGray),
        )));

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .title(FORM_TITLE),
        );
        f.render_widget(paragraph, modal_area);
    }

    fn draw_help_overlay(&self, f: &mut Frame) {
        let help_area = centered_rect(56, 18, f.area());
        f.render_widget(Clear, help_area);

        let help_text = vec![
            Line::from(Span::styled(
                "Keyboard Shortcuts",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Navigation:"),
            Line::from("  j / Down     Move down in list"),
            Line::from("  k / Up       Move up in list"),
            Line::from("  G / g        Jump to last / first"),
            Line::from("  Enter        Open profile"),
            Line::from("  Esc          Back / clear search"),
            Line::from(""),
            Line::from("Actions:"),
            Line::from("  /            Focus search box"),
            Line::from("  a            Add staff"),
            Line::from("  r            Reload staff and departments"),
            Line::from(""),
            Line::from("Press ? or Esc to close this help"),
        ];

        let paragraph = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(" Help "),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, help_area);
    }

    fn draw_alert(&self, f: &mut Frame) {
        let Some(message) = &self.alert else {
            return;
        };
        let alert_area = centered_rect(44, 5, f.area());
        f.render_widget(Clear, alert_area);

        let paragraph = Paragraph::new(vec![
            Line::from(Span::styled(
                message.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled("Press Enter", Style::default().fg(Color::DarkGray))),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error "),
        )
        .wrap(Wrap { trim: true });
        f.render_widget(paragraph, alert_area);
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> Action {
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        if self.alert.is_some() {
            if matches!(key, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.alert = None;
            }
            return Action::Continue;
        }

        if self.show_help {
            if matches!(key, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Enter) {
                self.show_help = false;
            }
            return Action::Continue;
        }

        if self.creation.is_visible() {
            self.handle_form_key(key, modifiers);
            return Action::Continue;
        }

        if self.search_focused {
            self.handle_search_key(key, modifiers);
            return Action::Continue;
        }

        if self.profile.is_some() {
            return self.handle_profile_key(key);
        }

        self.handle_list_key(key)
    }

    fn handle_search_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            KeyCode::Enter | KeyCode::Esc => {
                self.search_focused = false;
            }
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                self.search_query.push(c);
                self.apply_filter(true);
            }
            KeyCode::Backspace => {
                self.search_query.pop();
                self.apply_filter(true);
            }
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: KeyCode) -> Action {
        match key {
            KeyCode::Char('q') => return Action::Quit,
            KeyCode::Char('/') => {
                self.search_focused = true;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            KeyCode::Char('a') => {
                self.creation.open();
            }
            KeyCode::Char('r') => {
                self.refresh();
            }
            KeyCode::Esc => {
                if !self.search_query.is_empty() {
                    self.search_query.clear();
                    self.apply_filter(true);
                    self.status_message = Some("Search cleared".to_string());
                }
            }
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Char('G') => {
                if !self.filtered.is_empty() {
                    self.list_state.select(Some(self.filtered.len() - 1));
                }
            }
            KeyCode::Char('g') => {
                if !self.filtered.is_empty() {
                    self.list_state.select(Some(0));
                }
            }
            KeyCode::Enter => self.open_profile(),
            _ => {}
        }
        Action::Continue
    }

    fn handle_profile_key(&mut self, key: KeyCode) -> Action {
        match key {
            KeyCode::Char('q') => return Action::Quit,
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left => {
                self.profile = None;
                // Back on the directory counts as a focus event.
                self.refresh();
            }
            _ => {}
        }
        Action::Continue
    }

    fn handle_form_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            KeyCode::Esc => {
                self.creation.close();
            }
            KeyCode::Tab | KeyCode::Down => {
                self.active_field = self.active_field.next();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.active_field = self.active_field.prev();
            }
            KeyCode::Enter => self.submit_form(),
            KeyCode::Backspace => {
                self.creation.form_mut().field_mut(self.active_field).pop();
            }
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                self.creation.form_mut().field_mut(self.active_field).push(c);
            }
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        let result = self
            .creation
            .submit(self.store.api(), self.store.departments());

        match result {
            Ok(created) => {
                self.active_field = FormField::Name;
                self.status_message = Some(format!("Added {}", created.request.name));
                self.store.refresh_staff();
            }
            Err(err) => self.alert = Some(alert_message(&err)),
        }
    }

    fn refresh(&mut self) {
        debug!("Refresh requested");
        self.store.focus();
    }

    fn open_profile(&mut self) {
        let Some(staff) = self.selected_staff().cloned() else {
            return;
        };
        info!(id = %staff.id, name = %staff.name, "Opening profile");
        self.last_profile = Some(staff.id.clone());
        self.profile = Some(staff);
    }

    fn selected_staff(&self) -> Option<&Staff> {
        let selected = self.list_state.selected()?;
        let &idx = self.filtered.get(selected)?;
        self.store.staff().get(idx)
    }

    fn select_next(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < self.filtered.len() => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    fn select_prev(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.filtered.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    /// Recompute the filtered rows. A new query moves the cursor to the top;
    /// a data refresh keeps it where it was when possible.
    fn apply_filter(&mut self, reset_selection: bool) {
        self.filtered = filter_staff(self.store.staff(), &self.search_query);

        let selected = if self.filtered.is_empty() {
            None
        } else if reset_selection {
            Some(0)
        } else {
            Some(
                self.list_state
                    .selected()
                    .unwrap_or(0)
                    .min(self.filtered.len() - 1),
            )
        };
        self.list_state.select(selected);
    }

    /// Apply every pending fetch result, waiting for in-flight ones.
    #[cfg(test)]
    fn settle(&mut self) {
        assert!(self.store.wait_until_idle(Duration::from_secs(5)));
        self.apply_filter(false);
    }
}

/// Text of the blocking alert raised by a failed submit.
fn alert_message(err: &DirError) -> String {
    if err.is_form_error() {
        err.to_string()
    } else {
        CREATE_FAILED_ALERT.to_string()
    }
}

fn profile_text(staff: &Staff) -> Text<'static> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let row = |label: &str, value: &str| {
        Line::from(vec![
            Span::styled(format!("{label:12}"), bold),
            Span::raw(value.to_string()),
        ])
    };

    Text::from(vec![
        Line::from(Span::styled(
            staff.name.clone(),
            bold.fg(Color::Cyan),
        )),
        Line::from(format!("ID: {}", staff.id)),
        Line::from(""),
        row("Phone", &staff.phone),
        row("Department", &staff.department.name),
        Line::from(""),
        row("Street", &staff.street),
        row("City", &staff.city),
        row("State", &staff.state),
        row("ZIP Code", &staff.zip),
        row("Country", &staff.country),
    ])
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        format!("{}...", s.chars().take(max_len.saturating_sub(3)).collect::<String>())
    } else {
        s.to_string()
    }
}

/// RAII Guard to ensure terminal state is restored even on panic.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableFocusChange, LeaveAlternateScreen);
    }
}

/// Run the directory screen against `api` until the user quits.
pub fn run_directory_screen(
    api: Arc<dyn DirectoryApi>,
    config: &TuiConfig,
) -> Result<Option<RecordId>> {
    if !io::stdout().is_terminal() {
        return Err(DirError::ValidationFailed(
            "browse command requires an interactive terminal".to_string(),
        ));
    }

    let _guard = TerminalGuard::new()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let screen = DirectoryScreen::new(DirectoryStore::new(api), config);
    screen.run(&mut terminal)
}
