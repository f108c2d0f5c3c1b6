//! Rendering of decisions for terminals and Markdown surfaces.

#![forbid(unsafe_code)]

mod markdown;
mod text;

pub use markdown::render_markdown;
pub use text::{render_text, render_trace_line};
