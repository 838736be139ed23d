/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Grammar rules
//!
//! Each rule attempts to turn a single line into a [`Token`]. Whether an otherwise well formed line
//! matches depends on the parser state: a property is only recognized once a profile has been
//! opened, and indented lines are read as continuations or sub-properties depending on the value
//! of the last property.

use super::line::{
    is_valid_identifier, split_first_word, split_property, strip_comments, strip_inline_comments,
    FileLine,
};

const DEFAULT_PROFILE: &str = "default";
const PROFILE_KEYWORD: &str = "profile";

/// A profile header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ProfileToken<'a> {
    /// Only set for the bare `[default]` header of a config file
    pub(super) is_default: bool,
    pub(super) name: &'a str,
    pub(super) is_valid: bool,
}

/// A top-level `key = value` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct PropertyToken<'a> {
    pub(super) key: &'a str,
    pub(super) value: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Token<'a> {
    Profile(ProfileToken<'a>),
    Property(PropertyToken<'a>),
    /// Extends the value of the last property; comments are kept
    Continuation { value: &'a str },
    /// Nests under the last property; comments are kept
    SubProperty { key: &'a str, value: &'a str },
}

impl Token<'_> {
    pub(super) fn kind(&self) -> &'static str {
        match self {
            Token::Profile(_) => "profile",
            Token::Property(_) => "property",
            Token::Continuation { .. } => "continuation",
            Token::SubProperty { .. } => "sub-property",
        }
    }
}

/// Attempts to parse a line given the current profile and last property.
pub(super) type ParseFn = for<'a> fn(
    &FileLine<'a>,
    Option<&ProfileToken<'a>>,
    Option<&PropertyToken<'a>>,
) -> Option<Token<'a>>;

/// The text between the brackets of a profile header, comments removed
fn profile_body<'a>(line: &FileLine<'a>) -> Option<&'a str> {
    if !line.is_profile() {
        return None;
    }
    let header = strip_comments(line.content().trim());
    Some(header[1..header.len() - 1].trim())
}

/// Format (config files): `[ Whitespace? profile Whitespace Identifier Whitespace? ]` or `[default]`
pub(super) fn config_profile<'a>(
    line: &FileLine<'a>,
    _current_profile: Option<&ProfileToken<'a>>,
    _last_property: Option<&PropertyToken<'a>>,
) -> Option<Token<'a>> {
    let body = profile_body(line)?;
    let token = match split_first_word(body) {
        (DEFAULT_PROFILE, None) => ProfileToken {
            is_default: true,
            name: DEFAULT_PROFILE,
            is_valid: true,
        },
        (PROFILE_KEYWORD, Some(name)) => ProfileToken {
            is_default: false,
            name,
            is_valid: is_valid_identifier(name),
        },
        _ => ProfileToken {
            is_default: false,
            name: body,
            is_valid: false,
        },
    };
    Some(Token::Profile(token))
}

/// Format (credentials files): `[ Whitespace? Identifier Whitespace? ]`
pub(super) fn credentials_profile<'a>(
    line: &FileLine<'a>,
    _current_profile: Option<&ProfileToken<'a>>,
    _last_property: Option<&PropertyToken<'a>>,
) -> Option<Token<'a>> {
    let name = profile_body(line)?;
    Some(Token::Profile(ProfileToken {
        is_default: false,
        name,
        is_valid: is_valid_identifier(name),
    }))
}

/// Format: `Identifier Whitespace? = Whitespace? Value? Whitespace? (Whitespace Comment)?`
///
/// Property values may be empty.
pub(super) fn property<'a>(
    line: &FileLine<'a>,
    current_profile: Option<&ProfileToken<'a>>,
    _last_property: Option<&PropertyToken<'a>>,
) -> Option<Token<'a>> {
    current_profile?;
    if !line.is_property() {
        return None;
    }
    let (key, value) = line.content().split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    // only the value can carry a comment; the whitespace after `=` counts as its separator
    let value = strip_inline_comments(value).trim();
    Some(Token::Property(PropertyToken { key, value }))
}

/// Format: `Whitespace Value Whitespace?`
///
/// Appends to a property with a non-empty value.
pub(super) fn continuation<'a>(
    line: &FileLine<'a>,
    _current_profile: Option<&ProfileToken<'a>>,
    last_property: Option<&PropertyToken<'a>>,
) -> Option<Token<'a>> {
    if !line.is_continuation() {
        return None;
    }
    match last_property {
        Some(property) if !property.value.is_empty() => Some(Token::Continuation {
            value: line.content().trim(),
        }),
        _ => None,
    }
}

/// Format: `Whitespace Identifier Whitespace? = Whitespace? Value Whitespace?`
///
/// An indented property following a property with an empty value. Anything resembling an inline
/// comment is part of the value.
pub(super) fn sub_property<'a>(
    line: &FileLine<'a>,
    _current_profile: Option<&ProfileToken<'a>>,
    last_property: Option<&PropertyToken<'a>>,
) -> Option<Token<'a>> {
    if !line.is_sub_property() {
        return None;
    }
    match last_property {
        Some(property) if property.value.is_empty() => {
            let (key, value) = split_property(line.content())?;
            Some(Token::SubProperty { key, value })
        }
        _ => None,
    }
}
