//! taglist - a terminal tag list widget.
//!
//! Tags are drawn as chips in one of three modes. In collapsed mode as many
//! whole tags as fit are drawn on one line and the first tag that does not
//! fit is cut down with an ellipsis; see [`layout::compute_layout`].
//!
//! ```
//! use taglist::layout::{compute_layout, FixedWidthMeasurer};
//! use taglist::Tag;
//!
//! let tags = vec![
//!     Tag::new("1", "short"),
//!     Tag::new("2", "this is a very long tag that cannot fit"),
//! ];
//! let layout = compute_layout(&tags, 200, &FixedWidthMeasurer::new(8, 0));
//!
//! assert_eq!(layout.visible, &tags[..1]);
//! assert_eq!(
//!     layout.truncated_overflow.map(|t| t.content),
//!     Some("this is a very lo...".to_string())
//! );
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod layout;
pub mod logging;
pub mod tag;
pub mod terminal;
pub mod ui;

pub use tag::{Tag, TagListMode};
