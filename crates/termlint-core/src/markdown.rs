//! Markdown input.
//!
//! Terminology checks work on space-separated words, so markdown is reduced
//! to its visible text with every block boundary turned into a single space.
//! Uses pulldown-cmark for proper CommonMark parsing rather than regex-based
//! stripping.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Strip markdown formatting, returning the visible text on one line.
///
/// Removes code blocks, inline code, HTML, link targets, and YAML
/// frontmatter. Keeps headings, list items, blockquotes, table cells, link
/// text, and emphasized text without markers. Words are separated by single
/// spaces.
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn strip_to_prose(text: &str) -> String {
    let text = strip_frontmatter(text);

    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(text, options);

    let mut result = String::with_capacity(text.len());
    let mut in_code_block = false;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                push_break(&mut result);
            }
            Event::Text(t) if !in_code_block => push_words(&mut result, &t),
            Event::SoftBreak
            | Event::HardBreak
            | Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::TableCell
                | TagEnd::BlockQuote(_),
            ) => push_break(&mut result),
            _ => {}
        }
    }

    result.trim_end().to_string()
}

/// Append text, folding any whitespace run into one space.
fn push_words(out: &mut String, text: &str) {
    let mut words = text.split_whitespace();
    if text.starts_with(char::is_whitespace) {
        push_break(out);
    }
    if let Some(first) = words.next() {
        out.push_str(first);
    }
    for word in words {
        out.push(' ');
        out.push_str(word);
    }
    if text.ends_with(char::is_whitespace) {
        push_break(out);
    }
}

fn push_break(out: &mut String) {
    if !out.is_empty() && !out.ends_with(' ') {
        out.push(' ');
    }
}

/// Strip YAML frontmatter delimited by `---` lines.
fn strip_frontmatter(text: &str) -> &str {
    let trimmed = text.trim_start();
    let Some(after_opening) = trimmed.strip_prefix("---") else {
        return text;
    };
    let Some(close_pos) = after_opening.find("\n---") else {
        return text;
    };
    let remainder = &after_opening[close_pos + 4..];
    remainder.strip_prefix('\n').unwrap_or(remainder)
}
