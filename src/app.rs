//! Demo application state and event loop.
//!
//! A small Elm-style application around the tag list: an input to add tags,
//! a mode switch, the tag list itself and a usage panel. The application owns
//! the tags; the tag list only reads them and reports deletions back.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::{debug, info, trace};

use crate::config::Settings;
use crate::events::{Event, KeyContext};
use crate::tag::{Tag, TagListMode};
use crate::ui::{render_context_help, TagList, TagListAction, TagListConfig, TextInput};

/// Shown in the display area when there are no tags.
const EMPTY_PLACEHOLDER: &str = "No tags yet, add some to see the widget in action";

/// Tags the demo starts with.
pub fn sample_tags() -> Vec<Tag> {
    [
        "This is a sample tag",
        "Expand and collapse",
        "Delete in edit mode",
        "This is a fairly long tag used to show truncation when collapsed",
        "short",
        "Another test tag",
    ]
    .iter()
    .enumerate()
    .map(|(i, content)| Tag::new((i + 1).to_string(), *content))
    .collect()
}

/// The main application struct that holds all state.
pub struct App {
    /// Tags shown by the list, owned here.
    tags: Vec<Tag>,
    mode: TagListMode,
    tag_list: TagList,
    input: TextInput,
    /// Whether keys go to the new-tag input.
    inserting: bool,
    /// Next candidate for a generated tag id.
    next_id: u64,
    should_quit: bool,
}

impl App {
    /// Create the demo with the sample tags.
    pub fn new(settings: &Settings) -> Self {
        Self::with_tags(settings, sample_tags())
    }

    /// Create the demo with the given tags.
    pub fn with_tags(settings: &Settings, tags: Vec<Tag>) -> Self {
        debug!(count = tags.len(), mode = %settings.default_mode, "Creating demo application");

        let next_id = tags
            .iter()
            .filter_map(|t| t.id.parse::<u64>().ok())
            .max()
            .map_or(1, |max| max.wrapping_add(1));

        Self {
            tags,
            mode: settings.default_mode,
            tag_list: TagList::new(TagListConfig::from_settings(settings)),
            input: TextInput::with_placeholder("Type a tag and press Enter..."),
            inserting: false,
            next_id,
            should_quit: false,
        }
    }

    /// Current tags.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Current display mode.
    pub fn mode(&self) -> TagListMode {
        self.mode
    }

    /// Switch the display mode.
    pub fn set_mode(&mut self, mode: TagListMode) {
        if mode != self.mode {
            debug!(from = %self.mode, to = %mode, "Switching mode");
            self.mode = mode;
        }
    }

    /// Whether keys currently go to the input.
    pub fn is_inserting(&self) -> bool {
        self.inserting
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Key context for the help bar.
    pub fn key_context(&self) -> KeyContext {
        if self.inserting {
            KeyContext::Insert
        } else if self.mode == TagListMode::Edit {
            KeyContext::Edit
        } else {
            KeyContext::Normal
        }
    }

    /// Append a tag with a fresh id. Blank content is ignored.
    ///
    /// Returns the new tag's id.
    pub fn add_tag(&mut self, content: &str) -> Option<String> {
        let content = content.trim();
        if content.is_empty() {
            return None;
        }

        let id = self.fresh_id();
        info!(tag_id = %id, "Adding tag");
        self.tags.push(Tag::new(id.clone(), content));
        Some(id)
    }

    /// Remove the tag with `id`. Returns whether one was removed.
    pub fn delete_tag(&mut self, id: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|tag| tag.id != id);
        let removed = self.tags.len() != before;
        info!(tag_id = id, removed, "Deleting tag");
        removed
    }

    /// The counter wraps at `u64::MAX`; ids already in use are skipped.
    fn fresh_id(&mut self) -> String {
        loop {
            let id = self.next_id.to_string();
            self.next_id = self.next_id.wrapping_add(1);
            if !self.tags.iter().any(|tag| tag.id == id) {
                return id;
            }
        }
    }

    /// Update the application state based on an event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                trace!(key = ?key.code, modifiers = ?key.modifiers, "Key event");
                self.handle_key_event(key);
            }
            Event::Resize(width, height) => {
                // The next draw lays the tags out again at the new width.
                debug!(width, height, "Terminal resized");
            }
            Event::Tick => {}
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.inserting {
            match key.code {
                KeyCode::Esc => self.inserting = false,
                KeyCode::Enter => {
                    if let Some(content) = self.input.submit() {
                        self.add_tag(&content);
                    }
                }
                _ => {
                    self.input.handle_input(key);
                }
            }
            return;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) | (KeyCode::Esc, _) => {
                info!("Quit requested");
                self.should_quit = true;
            }
            (KeyCode::Char('i' | 'a'), KeyModifiers::NONE) => self.inserting = true,
            (KeyCode::Char('1'), _) => self.set_mode(TagListMode::Expanded),
            (KeyCode::Char('2'), _) => self.set_mode(TagListMode::Collapsed),
            (KeyCode::Char('3'), _) => self.set_mode(TagListMode::Edit),
            (KeyCode::Tab, _) => self.set_mode(self.mode.next()),
            _ => {
                if let Some(TagListAction::Delete(id)) =
                    self.tag_list.handle_input(key, &self.tags, self.mode)
                {
                    self.delete_tag(&id);
                }
            }
        }
    }

    /// Render the application UI.
    pub fn view(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Length(3), // New tag input
                Constraint::Length(4), // Mode switch
                Constraint::Min(3),    // Tag list
                Constraint::Length(6), // Usage
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        self.render_title(frame, chunks[0]);
        self.input
            .render_with_label(frame, chunks[1], "Add tag", self.inserting);
        self.render_mode_switch(frame, chunks[2]);
        self.render_tags(frame, chunks[3]);
        self.render_usage(frame, chunks[4]);
        render_context_help(frame, chunks[5], self.key_context());
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let title = Paragraph::new("Tag List Demo")
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        frame.render_widget(title, area);
    }

    fn render_mode_switch(&self, frame: &mut Frame, area: Rect) {
        let mut buttons = Vec::new();
        for (i, mode) in TagListMode::ALL.iter().enumerate() {
            let style = if *mode == self.mode {
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White).bg(Color::DarkGray)
            };
            buttons.push(Span::styled(format!(" {} {} ", i + 1, mode), style));
            buttons.push(Span::raw(" "));
        }

        let mut current = vec![
            Span::styled("Current mode: ", Style::default().fg(Color::Gray)),
            Span::styled(
                self.mode.display_name(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ];
        if self.mode == TagListMode::Edit {
            current.push(Span::styled(
                " (select a tag and press d to delete it)",
                Style::default().fg(Color::Gray),
            ));
        }

        let block = Block::default()
            .title(" Mode ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let paragraph = Paragraph::new(vec![Line::from(buttons), Line::from(current)]).block(block);
        frame.render_widget(paragraph, area);
    }

    fn render_tags(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Tags ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.tags.is_empty() {
            let placeholder = Paragraph::new(EMPTY_PLACEHOLDER)
                .style(
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )
                .alignment(Alignment::Center);
            frame.render_widget(placeholder, inner);
            return;
        }

        self.tag_list.render(frame, inner, &self.tags, self.mode);
    }

    fn render_usage(&self, frame: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = TagListMode::ALL
            .iter()
            .map(|mode| {
                Line::from(vec![
                    Span::styled(
                        format!("{:<10}", mode.display_name()),
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::raw(mode.description()),
                ])
            })
            .collect();
        lines.push(Line::from(vec![
            Span::styled(format!("{:<10}", "Add"), Style::default().fg(Color::Yellow)),
            Span::raw("press i, type, then Enter; try different lengths in each mode"),
        ]));

        let block = Block::default()
            .title(" Usage ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
