//! Tag data and display modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single tag shown as a chip.
///
/// Tags are owned by the caller. The widget never mutates them; a truncated
/// chip is a new `Tag` carrying the same `id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    /// Identifier, unique within one list.
    pub id: String,
    /// Display text.
    pub content: String,
}

impl Tag {
    /// Create a new tag.
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
        }
    }

    /// Derive a copy of this tag with different content and the same id.
    pub fn with_content(&self, content: impl Into<String>) -> Self {
        Self {
            id: self.id.clone(),
            content: content.into(),
        }
    }
}

/// How the tag list is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagListMode {
    /// Every tag, wrapping onto as many lines as needed.
    Expanded,
    /// A single line; the first tag that overflows is cut with an ellipsis.
    #[default]
    Collapsed,
    /// Every tag, each with a delete marker.
    Edit,
}

impl TagListMode {
    /// All modes in switch order.
    pub const ALL: [TagListMode; 3] = [
        TagListMode::Expanded,
        TagListMode::Collapsed,
        TagListMode::Edit,
    ];

    /// Human readable name for the mode switch.
    pub fn display_name(&self) -> &'static str {
        match self {
            TagListMode::Expanded => "Expanded",
            TagListMode::Collapsed => "Collapsed",
            TagListMode::Edit => "Edit",
        }
    }

    /// One-line description used by the usage panel.
    pub fn description(&self) -> &'static str {
        match self {
            TagListMode::Expanded => "shows every tag and wraps onto new lines",
            TagListMode::Collapsed => "single line, the overflowing tag is cut with an ellipsis",
            TagListMode::Edit => "every tag gets a × marker, select one and press d to delete",
        }
    }

    /// The mode after this one, wrapping around.
    pub fn next(&self) -> Self {
        match self {
            TagListMode::Expanded => TagListMode::Collapsed,
            TagListMode::Collapsed => TagListMode::Edit,
            TagListMode::Edit => TagListMode::Expanded,
        }
    }

    /// Whether this mode packs tags onto a single line.
    pub fn is_single_line(&self) -> bool {
        matches!(self, TagListMode::Collapsed)
    }
}

impl fmt::Display for TagListMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Error returned when parsing an unknown mode name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tag list mode '{0}', expected expanded, collapsed or edit")]
pub struct ParseModeError(String);

impl FromStr for TagListMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expanded" => Ok(TagListMode::Expanded),
            "collapsed" => Ok(TagListMode::Collapsed),
            "edit" => Ok(TagListMode::Edit),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_new() {
        let tag = Tag::new("1", "bug");
        assert_eq!(tag.id, "1");
        assert_eq!(tag.content, "bug");
    }

    #[test]
    fn test_with_content_keeps_id() {
        let tag = Tag::new("7", "frontend");
        let short = tag.with_content("fro...");
        assert_eq!(short.id, "7");
        assert_eq!(short.content, "fro...");
        // Original untouched
        assert_eq!(tag.content, "frontend");
    }

    #[test]
    fn test_default_mode_is_collapsed() {
        assert_eq!(TagListMode::default(), TagListMode::Collapsed);
    }

    #[test]
    fn test_next_cycles_through_all_modes() {
        let mut mode = TagListMode::Expanded;
        for expected in [
            TagListMode::Collapsed,
            TagListMode::Edit,
            TagListMode::Expanded,
        ] {
            mode = mode.next();
            assert_eq!(mode, expected);
        }
    }

    #[test]
    fn test_only_collapsed_is_single_line() {
        assert!(TagListMode::Collapsed.is_single_line());
        assert!(!TagListMode::Expanded.is_single_line());
        assert!(!TagListMode::Edit.is_single_line());
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("edit".parse::<TagListMode>(), Ok(TagListMode::Edit));
        assert_eq!(" Expanded ".parse::<TagListMode>(), Ok(TagListMode::Expanded));
        assert!("folded".parse::<TagListMode>().is_err());
    }

    #[test]
    fn test_display_matches_display_name() {
        for mode in TagListMode::ALL {
            assert_eq!(mode.to_string(), mode.display_name());
        }
    }
}
