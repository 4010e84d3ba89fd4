//! User interface components.
//!
//! Rendering for the tag list widget and the pieces of the demo around it.

mod components;

pub use components::{
    render_context_help, DeleteCallback, TagList, TagListAction, TagListConfig, TextInput,
};
