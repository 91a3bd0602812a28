//! Markdown processing: variable substitution, conversion, text extraction.

pub mod variables;

use crate::models::RenderedBody;
use pulldown_cmark::{html, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

pub use variables::{VariableContext, VariableRenderer};

/// Markdown processor
pub struct MarkdownProcessor {
    options: Options,
}

impl MarkdownProcessor {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

        Self { options }
    }

    /// Convert markdown to HTML, capturing the first heading and paragraph
    /// of the converted document along the way
    pub fn convert(&self, markdown: &str) -> RenderedBody {
        let events: Vec<Event> = Parser::new_ext(markdown, self.options).collect();

        let heading = first_heading_in(&events);
        let paragraph = first_paragraph_in(&events);

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        RenderedBody {
            html: html_output,
            heading,
            paragraph,
        }
    }

    /// Text of the first level-1 heading of a markdown document
    pub fn first_heading(&self, markdown: &str) -> Option<String> {
        let events: Vec<Event> = Parser::new_ext(markdown, self.options).collect();
        first_heading_in(&events)
    }
}

impl Default for MarkdownProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Text of the first level-1 heading of a markdown document
///
/// ```
/// use polyglot_core::markdown::first_heading;
///
/// assert_eq!(first_heading("## Sub\n\n# Main\n"), Some("Main".to_string()));
/// assert_eq!(first_heading("No heading"), None);
/// ```
pub fn first_heading(markdown: &str) -> Option<String> {
    MarkdownProcessor::new().first_heading(markdown)
}

/// Plain text of the first paragraph of a markdown document
pub fn first_paragraph(markdown: &str) -> Option<String> {
    MarkdownProcessor::new().convert(markdown).paragraph
}

fn first_heading_in(events: &[Event]) -> Option<String> {
    let mut current: Option<String> = None;

    for event in events {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => {
                current = Some(String::new());
            }
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                if let Some(title) = current.take() {
                    let title = title.trim();
                    if !title.is_empty() {
                        return Some(title.to_string());
                    }
                }
            }
            other => {
                if let Some(ref mut title) = current {
                    push_inline_text(title, other);
                }
            }
        }
    }

    None
}

fn first_paragraph_in(events: &[Event]) -> Option<String> {
    let mut current: Option<String> = None;

    for event in events {
        match event {
            Event::Start(Tag::Paragraph) => {
                current = Some(String::new());
            }
            Event::End(TagEnd::Paragraph) => {
                if let Some(text) = current.take() {
                    let text = collapse_whitespace(&text);
                    if !text.is_empty() {
                        return Some(text);
                    }
                }
            }
            other => {
                if let Some(ref mut text) = current {
                    push_inline_text(text, other);
                }
            }
        }
    }

    None
}

fn push_inline_text(buf: &mut String, event: &Event) {
    match event {
        Event::Text(text) | Event::Code(text) => buf.push_str(text),
        Event::SoftBreak | Event::HardBreak => buf.push(' '),
        _ => {}
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
