//! Markdown text statistics

use pulldown_cmark::{Event, Options, Parser, TagEnd};
use std::fmt;

/// Parser options shared by everything that walks a post body
pub(crate) fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Extract the readable text of a Markdown document.
///
/// Markup, raw HTML and MDX component tags are dropped. Inline and fenced
/// code is kept.
pub fn plain_text(markdown: &str) -> String {
    let mut text = String::with_capacity(markdown.len());

    for event in Parser::new_ext(markdown, parser_options()) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::CodeBlock
                | TagEnd::TableCell,
            ) => text.push(' '),
            _ => {}
        }
    }

    text
}

/// Count the words of a Markdown document
pub fn count_words(markdown: &str) -> usize {
    plain_text(markdown).split_whitespace().count()
}

/// Estimated time to read a post body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingTime {
    pub words: usize,
    pub minutes: usize,
}

impl ReadingTime {
    /// Whole minutes, rounded up, never less than one.
    pub fn estimate(markdown: &str, words_per_minute: usize) -> Self {
        let words = count_words(markdown);
        let wpm = words_per_minute.max(1);
        let minutes = words.div_ceil(wpm).max(1);
        Self { words, minutes }
    }
}

impl fmt::Display for ReadingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min read", self.minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_words_strips_markup() {
        let md = "# Grab Bars\n\nInstall **two** bars near the [toilet](/bath).\n\n<ProductCard id=\"x\" />\n";
        assert_eq!(count_words(md), 8);
    }

    #[test]
    fn test_count_words_lists_and_code() {
        let md = "- one\n- two\n\n```\nlet x\n```\n";
        assert_eq!(count_words(md), 4);
    }

    #[test]
    fn test_reading_time_rounds_up() {
        let body = "word ".repeat(201);
        let rt = ReadingTime::estimate(&body, 200);
        assert_eq!(rt.words, 201);
        assert_eq!(rt.minutes, 2);
        assert_eq!(rt.to_string(), "2 min read");
    }

    #[test]
    fn test_reading_time_exact_and_minimum() {
        let body = "word ".repeat(400);
        assert_eq!(ReadingTime::estimate(&body, 200).minutes, 2);
        assert_eq!(ReadingTime::estimate("", 200).to_string(), "1 min read");
    }

    #[test]
    fn test_reading_time_is_deterministic() {
        let body = "Walk-in tubs cost more than curbless showers.\n\n".repeat(90);
        assert_eq!(
            ReadingTime::estimate(&body, 200),
            ReadingTime::estimate(&body, 200)
        );
    }
}
