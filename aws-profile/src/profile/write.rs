/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Writing profiles back out as file text

use crate::profile::parser::line::{inline_comment_start, FileLine, COMMENT};
use crate::profile::{FileKind, Profile, ProfileMap, Property};

const DEFAULT_PROFILE: &str = "default";

impl ProfileMap {
    /// Renders the profiles using the syntax of `kind`.
    ///
    /// Parsing the output with the same file kind yields an identical map. Sub-properties are
    /// only written for properties with an empty value, the only place the parser accepts them.
    pub fn to_file_string(&self, kind: FileKind) -> String {
        let mut out = String::new();
        for profile in self.profiles() {
            write_profile(&mut out, kind, profile);
        }
        out
    }
}

fn write_profile(out: &mut String, kind: FileKind, profile: &Profile) {
    match (kind, profile.name()) {
        (FileKind::Config, DEFAULT_PROFILE) => out.push_str("[default]\n"),
        (FileKind::Config, name) => {
            out.push_str("[profile ");
            out.push_str(name);
            out.push_str("]\n");
        }
        (FileKind::Credentials, name) => {
            out.push('[');
            out.push_str(name);
            out.push_str("]\n");
        }
    }
    for property in profile.properties() {
        write_property(out, property);
    }
}

fn write_property(out: &mut String, property: &Property) {
    if property.value().is_empty() {
        out.push_str(property.key());
        out.push_str(" =\n");
        for (key, value) in property.sub_properties() {
            out.push_str("  ");
            out.push_str(key);
            out.push_str(" = ");
            out.push_str(value);
            out.push('\n');
        }
        return;
    }
    let (head, tail) = split_value(property.key(), property.value());
    out.push_str(&property_line(property.key(), head));
    out.push('\n');
    if let Some(tail) = tail {
        out.push_str("  ");
        out.push_str(tail);
        out.push('\n');
    }
}

fn property_line(key: &str, value: &str) -> String {
    let mut line = format!("{} =", key);
    // `key = #x` would read as an empty value followed by a comment
    if !value.starts_with(COMMENT) {
        line.push(' ');
    }
    line.push_str(value);
    line
}

/// A key starting with `[` and a value ending with `]` form a profile header
fn reads_as_profile(key: &str, value: &str) -> bool {
    FileLine::new(0, &property_line(key, value)).is_profile()
}

/// Splits a value that cannot be written on a single property line into a property line and a
/// continuation line.
///
/// Comments are stripped from property lines but kept on continuation lines, so the text after the
/// last usable space before an inline comment moves to a continuation. The same applies when the
/// property line would otherwise read as a profile header. Continuations are joined back with a
/// single space, so the split point must be exactly one space.
fn split_value<'a>(key: &str, value: &'a str) -> (&'a str, Option<&'a str>) {
    let end = match inline_comment_start(value) {
        Some(comment) => comment,
        None if reads_as_profile(key, value) => value.len(),
        None => return (value, None),
    };
    let split = value[..end]
        .char_indices()
        .filter(|(_, chr)| *chr == ' ')
        .map(|(idx, _)| (&value[..idx], &value[idx + 1..]))
        .rfind(|(head, tail)| {
            let continuation = FileLine::new(0, tail);
            !head.is_empty()
                && !head.ends_with(char::is_whitespace)
                && !tail.starts_with(char::is_whitespace)
                && !continuation.is_blank_or_comment()
                && !continuation.is_profile()
                && !reads_as_profile(key, head)
        });
    match split {
        Some((head, tail)) => (head, Some(tail)),
        None => (value, None),
    }
}
