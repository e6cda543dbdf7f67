//! HTML preview rendering for structured articles.

pub mod plain;
pub mod renderer;
pub mod styles;

pub use plain::plain_text;
pub use renderer::{render, render_page};
pub use styles::Styles;

pub use maud::{Markup, PreEscaped};
