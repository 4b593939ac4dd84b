/* src/server/injector/src/lib.rs */

//! Pure string transforms over page-template content: entry-script injection
//! before the closing body tag, and the variable-substitution pass. No file
//! I/O happens here; callers load template content and decide what to do
//! with the result.

mod inject;
mod render;

pub use inject::inject_entry;
pub use render::{render_template, render_vars};
