//! Reusable UI components.

mod help_bar;
mod input;
mod tag_list;

pub use help_bar::render_context_help;
pub use input::TextInput;
pub use tag_list::{DeleteCallback, TagList, TagListAction, TagListConfig};
