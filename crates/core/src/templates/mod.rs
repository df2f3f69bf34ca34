//! Placeholder based template rendering used for static reports.

pub mod engine;

pub use engine::{RenderContext, TemplateRenderError, escape_html, render_string, render_to_file};
