//! Tag list component.
//!
//! Draws caller-owned tags as chips in one of three modes:
//!
//! - **Expanded**: every chip, flowing onto as many lines as needed
//! - **Collapsed**: one line, cut at the first chip that overflows
//! - **Edit**: every chip with a delete marker; the selected chip can be
//!   deleted from the keyboard
//!
//! The component never stores tags. Deleting reports the tag id through the
//! registered callback and a [`TagListAction`]; the caller removes the tag
//! from the slice it passes next time.

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::debug;

use crate::config::Settings;
use crate::layout::{layout_for_mode, ChipMeasurer, LayoutOptions, TextMeasurer};
use crate::tag::{Tag, TagListMode};

/// Callback invoked with the id of a tag the user asked to delete.
pub type DeleteCallback = Box<dyn FnMut(&str)>;

/// Action resulting from tag list input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagListAction {
    /// Delete the tag with this id.
    Delete(String),
}

/// Appearance and layout settings for the tag list.
#[derive(Debug, Clone)]
pub struct TagListConfig {
    /// Chip background.
    pub tag_color: Color,
    /// Chip text color.
    pub text_color: Color,
    /// Background of the selected chip in edit mode.
    pub selected_color: Color,
    /// Marker drawn inside each chip in edit mode.
    pub delete_marker: String,
    /// Chip chrome used both for measuring and drawing.
    pub measurer: ChipMeasurer,
    /// Truncation settings for collapsed mode.
    pub layout: LayoutOptions,
}

impl Default for TagListConfig {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl TagListConfig {
    /// Build the config from application settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            tag_color: Color::Blue,
            text_color: Color::White,
            selected_color: Color::Yellow,
            delete_marker: "×".to_string(),
            measurer: settings.measurer(),
            layout: settings.layout_options(),
        }
    }
}

/// Tag list component.
pub struct TagList {
    config: TagListConfig,
    /// Selected chip in edit mode.
    selected: usize,
    on_delete: Option<DeleteCallback>,
}

impl fmt::Debug for TagList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagList")
            .field("config", &self.config)
            .field("selected", &self.selected)
            .field("on_delete", &self.on_delete.is_some())
            .finish()
    }
}

impl Default for TagList {
    fn default() -> Self {
        Self::new(TagListConfig::default())
    }
}

impl TagList {
    /// Create a tag list with the given configuration.
    pub fn new(config: TagListConfig) -> Self {
        Self {
            config,
            selected: 0,
            on_delete: None,
        }
    }

    /// Register the delete callback, builder style.
    pub fn with_on_delete(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.set_on_delete(callback);
        self
    }

    /// Register or replace the delete callback.
    pub fn set_on_delete(&mut self, callback: impl FnMut(&str) + 'static) {
        self.on_delete = Some(Box::new(callback));
    }

    /// Remove the delete callback.
    pub fn clear_on_delete(&mut self) {
        self.on_delete = None;
    }

    /// Index of the selected chip, clamped to `tags`.
    pub fn selected(&self, tags: &[Tag]) -> Option<usize> {
        if tags.is_empty() {
            None
        } else {
            Some(self.selected.min(tags.len() - 1))
        }
    }

    /// Ask for the tag `id` to be deleted.
    ///
    /// Calls the registered callback once. Without a callback this does
    /// nothing.
    pub fn request_delete(&mut self, id: &str) {
        match self.on_delete.as_mut() {
            Some(callback) => {
                debug!(tag_id = id, "Delete requested");
                callback(id);
            }
            None => debug!(tag_id = id, "Delete requested without a callback"),
        }
    }

    /// Handle keyboard input.
    ///
    /// Only edit mode reacts to keys. Returns an action for the parent view
    /// when a tag should be deleted.
    pub fn handle_input(
        &mut self,
        key: KeyEvent,
        tags: &[Tag],
        mode: TagListMode,
    ) -> Option<TagListAction> {
        if mode != TagListMode::Edit {
            return None;
        }
        let selected = self.selected(tags)?;
        self.selected = selected;

        match (key.code, key.modifiers) {
            (KeyCode::Char('l'), KeyModifiers::NONE) | (KeyCode::Right, _) => {
                if selected + 1 < tags.len() {
                    self.selected += 1;
                }
                None
            }
            (KeyCode::Char('h'), KeyModifiers::NONE) | (KeyCode::Left, _) => {
                self.selected = selected.saturating_sub(1);
                None
            }
            (KeyCode::Home, _) => {
                self.selected = 0;
                None
            }
            (KeyCode::End, _) => {
                self.selected = tags.len() - 1;
                None
            }
            (KeyCode::Char('d' | 'x'), KeyModifiers::NONE) | (KeyCode::Delete, _) => {
                let id = tags[selected].id.clone();
                self.request_delete(&id);
                Some(TagListAction::Delete(id))
            }
            _ => None,
        }
    }

    /// Text drawn inside a chip, between the padding.
    fn chip_label(&self, tag: &Tag, mode: TagListMode) -> String {
        match mode {
            TagListMode::Edit => format!("{} {}", tag.content, self.config.delete_marker),
            TagListMode::Expanded | TagListMode::Collapsed => tag.content.clone(),
        }
    }

    /// Spans for one chip, trailing margin included.
    fn chip_spans(&self, tag: &Tag, mode: TagListMode, selected: bool) -> Vec<Span<'static>> {
        let chip_style = if selected {
            Style::default()
                .fg(Color::Black)
                .bg(self.config.selected_color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(self.config.text_color)
                .bg(self.config.tag_color)
        };
        let padding = " ".repeat(usize::from(self.config.measurer.padding));
        let margin = " ".repeat(usize::from(self.config.measurer.margin));

        let mut spans = vec![
            Span::styled(padding.clone(), chip_style),
            Span::styled(tag.content.clone(), chip_style),
        ];
        if mode == TagListMode::Edit {
            spans.push(Span::styled(" ", chip_style));
            spans.push(Span::styled(
                self.config.delete_marker.clone(),
                chip_style.fg(Color::Red),
            ));
        }
        spans.push(Span::styled(padding, chip_style));
        if !margin.is_empty() {
            spans.push(Span::raw(margin));
        }
        spans
    }

    /// Lines to draw for `tags` in an area `width` cells wide.
    ///
    /// Collapsed mode always gives at most one line. The other modes wrap
    /// between chips; a chip wider than the whole area gets a line of its
    /// own and is clipped when drawn.
    pub fn lines(&self, tags: &[Tag], mode: TagListMode, width: u16) -> Vec<Line<'static>> {
        let width = usize::from(width);

        if mode.is_single_line() {
            let layout = layout_for_mode(
                tags,
                mode,
                width,
                &self.config.measurer,
                &self.config.layout,
            );
            if layout.is_empty() {
                return Vec::new();
            }
            let spans = layout
                .chips()
                .flat_map(|tag| self.chip_spans(tag, mode, false))
                .collect::<Vec<_>>();
            return vec![Line::from(spans)];
        }

        let selected = match mode {
            TagListMode::Edit => self.selected(tags),
            _ => None,
        };

        let mut lines = Vec::new();
        let mut current: Vec<Span<'static>> = Vec::new();
        let mut used = 0usize;

        for (index, tag) in tags.iter().enumerate() {
            let chip_width = self.config.measurer.measure(&self.chip_label(tag, mode));
            if !current.is_empty() && used + chip_width > width {
                lines.push(Line::from(std::mem::take(&mut current)));
                used = 0;
            }
            current.extend(self.chip_spans(tag, mode, selected == Some(index)));
            used += chip_width;
        }
        if !current.is_empty() {
            lines.push(Line::from(current));
        }
        lines
    }

    /// Rows needed to draw `tags` at `width`.
    pub fn required_height(&self, tags: &[Tag], mode: TagListMode, width: u16) -> u16 {
        u16::try_from(self.lines(tags, mode, width).len()).unwrap_or(u16::MAX)
    }

    /// Render the tag list. An empty list draws nothing.
    pub fn render(&self, frame: &mut Frame, area: Rect, tags: &[Tag], mode: TagListMode) {
        if tags.is_empty() || area.width == 0 || area.height == 0 {
            return;
        }

        let lines = self.lines(tags, mode, area.width);
        frame.render_widget(Paragraph::new(lines), area);
    }
}
