//! Report renderers
//!
//! Turn a [`ResolutionDiff`] into human-readable text, HTML or Markdown.
//! Renderers are pure formatting; all classification happens in the diff
//! engine.

pub mod html;
pub mod markdown;
pub mod text;
mod utils;

use crate::diff::ResolutionDiff;

pub use html::HtmlReporter;
pub use markdown::MarkdownReporter;
pub use text::TextReporter;

pub trait Reporter {
    fn report(&self, diff: &ResolutionDiff) -> String;
}
