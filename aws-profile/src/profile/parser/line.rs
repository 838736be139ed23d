/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Line classification and text cleaning shared by the grammar rules
//!
//! Nothing here looks at parser state: every predicate answers from the literal text of a single
//! line.

pub(crate) const COMMENT: &[char] = &['#', ';'];

/// Characters allowed in a profile name besides ASCII letters and digits
const IDENTIFIER_PUNCTUATION: &[char] = &['_', '-', '.', '%', '@'];

/// One physical line of a profile file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FileLine<'a> {
    line_number: usize,
    content: &'a str,
}

impl<'a> FileLine<'a> {
    pub(crate) fn new(line_number: usize, content: &'a str) -> Self {
        Self {
            line_number,
            content,
        }
    }

    /// 0-based line number
    pub(crate) fn line_number(&self) -> usize {
        self.line_number
    }

    /// Raw, untrimmed content
    pub(crate) fn content(&self) -> &'a str {
        self.content
    }

    pub(crate) fn is_indented(&self) -> bool {
        self.content.starts_with(char::is_whitespace)
    }

    /// Blank lines and full-line comments never become tokens
    pub(crate) fn is_blank_or_comment(&self) -> bool {
        let trimmed = self.content.trim();
        trimmed.is_empty() || trimmed.starts_with(COMMENT)
    }

    /// `[ ... ]`, optionally followed by a comment
    pub(crate) fn is_profile(&self) -> bool {
        let header = strip_comments(self.content.trim());
        header.starts_with('[') && header.ends_with(']')
    }

    /// `key = value` starting in the first column
    pub(crate) fn is_property(&self) -> bool {
        !self.is_blank_or_comment()
            && !self.is_indented()
            && split_property(self.content).is_some()
    }

    pub(crate) fn is_continuation(&self) -> bool {
        self.is_indented() && !self.content.trim().is_empty()
    }

    pub(crate) fn is_sub_property(&self) -> bool {
        self.is_continuation() && split_property(self.content).is_some()
    }
}

/// Drops everything from the first comment character onwards.
///
/// Used for profile headers, where a comment may directly follow the closing bracket.
pub(crate) fn strip_comments(input: &str) -> &str {
    match input.find(COMMENT) {
        Some(idx) => input[..idx].trim_end(),
        None => input,
    }
}

/// Drops a trailing comment, which must be preceded by whitespace.
///
/// `a #b` becomes `a` while `a#b` is left untouched.
pub(crate) fn strip_inline_comments(input: &str) -> &str {
    match inline_comment_start(input) {
        Some(idx) => input[..idx].trim_end(),
        None => input,
    }
}

/// Index of the whitespace character that introduces an inline comment
pub(crate) fn inline_comment_start(input: &str) -> Option<usize> {
    let mut prev_whitespace = None;
    for (idx, chr) in input.char_indices() {
        if let Some(whitespace_idx) = prev_whitespace {
            if COMMENT.contains(&chr) {
                return Some(whitespace_idx);
            }
        }
        prev_whitespace = if chr.is_whitespace() { Some(idx) } else { None };
    }
    None
}

/// Splits on the first `=`, trimming the key and the value.
///
/// Returns `None` when there is no `=` or the key is empty.
pub(crate) fn split_property(input: &str) -> Option<(&str, &str)> {
    let (key, value) = input.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

/// Splits off the first whitespace-delimited word.
///
/// `profile  foo` becomes `("profile", Some("foo"))`.
pub(crate) fn split_first_word(input: &str) -> (&str, Option<&str>) {
    let input = input.trim();
    match input.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, Some(rest.trim())),
        None => (input, None),
    }
}

pub(crate) fn is_valid_identifier(input: &str) -> bool {
    !input.is_empty()
        && input
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || IDENTIFIER_PUNCTUATION.contains(&ch))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn classify_lines() {
        let line = |content| FileLine::new(0, content);

        assert!(line("[profile foo]").is_profile());
        assert!(line("  [default] # comment").is_profile());
        assert!(line("[default];comment").is_profile());
        assert!(!line("[profile foo").is_profile());
        assert!(!line("key = [value]").is_profile());

        assert!(line("key = value").is_property());
        assert!(line("key =").is_property());
        assert!(!line("  key = value").is_property());
        assert!(!line("# key = value").is_property());
        assert!(!line("= value").is_property());
        assert!(!line("no equals").is_property());

        assert!(line("  more text").is_continuation());
        assert!(line("\tsub = val").is_continuation());
        assert!(!line("   ").is_continuation());
        assert!(!line("text").is_continuation());

        assert!(line("  sub = val").is_sub_property());
        assert!(!line("  more text").is_sub_property());
        assert!(!line("sub = val").is_sub_property());
    }

    #[test]
    fn blank_and_comment_lines() {
        assert!(FileLine::new(0, "").is_blank_or_comment());
        assert!(FileLine::new(0, " \t ").is_blank_or_comment());
        assert!(FileLine::new(0, "# comment").is_blank_or_comment());
        assert!(FileLine::new(0, "   ; comment").is_blank_or_comment());
        assert!(!FileLine::new(0, "key = #value").is_blank_or_comment());
    }

    #[test]
    fn inline_comments_need_whitespace() {
        assert_eq!(strip_inline_comments("value # comment"), "value");
        assert_eq!(strip_inline_comments("value\t;comment"), "value");
        assert_eq!(strip_inline_comments("val#ue"), "val#ue");
        assert_eq!(strip_inline_comments("#value"), "#value");
        assert_eq!(strip_inline_comments("key = # comment"), "key =");
        assert_eq!(inline_comment_start("a b # c"), Some(3));
        assert_eq!(inline_comment_start("a b#c"), None);
    }

    #[test]
    fn header_comments_need_no_whitespace() {
        assert_eq!(strip_comments("[foo]#comment"), "[foo]");
        assert_eq!(strip_comments("[foo] ; comment"), "[foo]");
        assert_eq!(strip_comments("[foo]"), "[foo]");
    }

    #[test]
    fn split_properties() {
        assert_eq!(split_property("key = value"), Some(("key", "value")));
        assert_eq!(split_property("  key=value=more "), Some(("key", "value=more")));
        assert_eq!(split_property("key ="), Some(("key", "")));
        assert_eq!(split_property(" = value"), None);
        assert_eq!(split_property("no equals"), None);
    }

    #[test]
    fn split_words() {
        assert_eq!(split_first_word(" profile  foo "), ("profile", Some("foo")));
        assert_eq!(split_first_word("profile foo bar"), ("profile", Some("foo bar")));
        assert_eq!(split_first_word("default"), ("default", None));
    }

    #[test]
    fn identifiers() {
        assert!(is_valid_identifier("foo"));
        assert!(is_valid_identifier("Foo_bar-1.2%3@example"));
        assert!(is_valid_identifier("123"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("foo bar"));
        assert!(!is_valid_identifier("foo!"));
        assert!(!is_valid_identifier("foo/bar"));
    }
}
