//! Context-sensitive key hints.

/// Which part of the demo currently receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyContext {
    /// Mode switching and navigation.
    #[default]
    Normal,
    /// Typing into the new-tag input.
    Insert,
    /// Edit mode, where a selected tag can be deleted.
    Edit,
}

/// Short key hints for the help bar. Keys are wrapped in brackets.
pub fn get_context_hints(context: KeyContext) -> &'static str {
    match context {
        KeyContext::Normal => "[i] add tag  [1/2/3] mode  [Tab] next mode  [q] quit",
        KeyContext::Insert => "[Enter] add  [Esc] cancel",
        KeyContext::Edit => "[h/l] select  [d] delete  [i] add tag  [1/2/3] mode  [q] quit",
    }
}
