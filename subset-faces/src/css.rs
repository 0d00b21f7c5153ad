//! `@font-face` rules

use std::fmt;

use crate::coverage::UnicodeRange;

/// One `@font-face` rule pointing at a subset file that sits next to the
/// stylesheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontFace {
    pub file_name: String,
    pub description: String,
    pub family: String,
    pub unicode_range: UnicodeRange,
}

impl fmt::Display for FontFace {
    /// A face that covers nothing is written as a comment only; without a
    /// `unicode-range` the browser would use it for every character.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let note = comment_text(&format!("{} {}", self.file_name, self.description));
        if self.unicode_range.is_empty() {
            return writeln!(f, "/* {note}: maps no codepoints, rule omitted */");
        }
        writeln!(f, "/* {note} */")?;
        writeln!(f, "@font-face {{")?;
        writeln!(f, "  font-family: '{}';", escape_quoted(&self.family))?;
        writeln!(f, "  src: {};", url(&self.file_name))?;
        writeln!(f, "  unicode-range: {};", self.unicode_range)?;
        writeln!(f, "}}")
    }
}

/// A relative `url()`, quoted only when the bare form would not parse.
fn url(file_name: &str) -> String {
    let needs_quotes = file_name
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '\'' | '"' | '\\'));
    if needs_quotes {
        format!("url('./{}')", escape_quoted(file_name))
    } else {
        format!("url(./{file_name})")
    }
}

/// Escape for a single-quoted CSS string.
fn escape_quoted(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}

// `*/` would close the comment early
fn comment_text(text: &str) -> String {
    text.replace("*/", "* /")
}
