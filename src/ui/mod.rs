//! Terminal output.
//!
//! - [`mark`] - the single-glyph status mark written to stdout
//! - [`theme`] - color decisions and error styling for stderr

pub mod mark;
pub mod theme;

pub use mark::MarkRenderer;
pub use theme::{format_error, should_use_colors};
