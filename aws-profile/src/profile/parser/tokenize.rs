/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Line-by-line tokenizer
//!
//! Blank lines and comments are dropped, then each remaining line is offered to the rules of the
//! active grammar in priority order. The first rule that produces a token wins.

use super::line::FileLine;
use super::rules::{
    config_profile, continuation, credentials_profile, property, sub_property, ParseFn,
    ProfileToken, PropertyToken, Token,
};
use super::ExpectedRule;
use crate::profile::FileKind;

const CONFIG_RULES: &[ParseFn] = &[config_profile, property, continuation, sub_property];
const CREDENTIALS_RULES: &[ParseFn] = &[credentials_profile, property, continuation, sub_property];

fn rules(kind: FileKind) -> &'static [ParseFn] {
    match kind {
        FileKind::Config => CONFIG_RULES,
        FileKind::Credentials => CREDENTIALS_RULES,
    }
}

/// The context the grammar depends on
///
/// State is threaded through [`ParserState::step`] by value so a single line can be tokenized in
/// isolation given any prior state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct ParserState<'a> {
    current_profile: Option<ProfileToken<'a>>,
    last_property: Option<PropertyToken<'a>>,
}

impl<'a> ParserState<'a> {
    /// Tokenizes `line`, returning the next state and either the token or the rule that the line
    /// was expected to satisfy.
    pub(super) fn step(
        self,
        line: &FileLine<'a>,
        rules: &[ParseFn],
    ) -> (Self, Result<Token<'a>, ExpectedRule>) {
        let token = rules.iter().find_map(|rule| {
            rule(
                line,
                self.current_profile.as_ref(),
                self.last_property.as_ref(),
            )
        });
        match token {
            Some(token) => (self.advance(token), Ok(token)),
            None => (self, Err(self.expected(line))),
        }
    }

    fn advance(self, token: Token<'a>) -> Self {
        match token {
            // invalid profiles still become the active context so their body isn't attributed
            // to the previous profile
            Token::Profile(profile) => ParserState {
                current_profile: Some(profile),
                last_property: None,
            },
            Token::Property(property) => ParserState {
                last_property: Some(property),
                ..self
            },
            Token::Continuation { .. } | Token::SubProperty { .. } => self,
        }
    }

    fn expected(&self, line: &FileLine<'a>) -> ExpectedRule {
        if self.current_profile.is_none() {
            return ExpectedRule::ProfileDefinition;
        }
        match self.last_property {
            Some(property) if line.is_indented() && property.value.is_empty() => {
                ExpectedRule::SubPropertyDefinition
            }
            _ => ExpectedRule::PropertyDefinition,
        }
    }
}

/// A tokenized line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct TokenLine<'a> {
    pub(super) line_number: usize,
    pub(super) token: Result<Token<'a>, ExpectedRule>,
}

/// Tokenizes the whole file with the grammar for `kind`.
pub(super) fn tokenize(kind: FileKind, contents: &str) -> Vec<TokenLine<'_>> {
    let rules = rules(kind);
    let mut state = ParserState::default();
    let mut tokens = Vec::new();
    for (line_number, content) in contents.lines().enumerate() {
        let line = FileLine::new(line_number, content);
        if line.is_blank_or_comment() {
            continue;
        }
        let (next, token) = state.step(&line, rules);
        // values may hold secrets, only the kind of token is logged
        match &token {
            Ok(token) => {
                tracing::trace!(line = line.line_number(), kind = token.kind(), "tokenized line")
            }
            Err(expected) => {
                tracing::trace!(line = line.line_number(), %expected, "unmatched line")
            }
        }
        tokens.push(TokenLine {
            line_number: line.line_number(),
            token,
        });
        state = next;
    }
    tokens
}

#[cfg(test)]
mod test {
    use super::*;

    fn tokens(kind: FileKind, contents: &str) -> Vec<(usize, Result<Token<'_>, ExpectedRule>)> {
        tokenize(kind, contents)
            .into_iter()
            .map(|line| (line.line_number, line.token))
            .collect()
    }

    #[test]
    fn blank_lines_and_comments_are_skipped() {
        let input = "# leading comment\n\n[default]\n   \n; another\nregion = us-east-1\n";
        assert_eq!(
            tokens(FileKind::Config, input),
            vec![
                (
                    2,
                    Ok(Token::Profile(ProfileToken {
                        is_default: true,
                        name: "default",
                        is_valid: true
                    }))
                ),
                (
                    5,
                    Ok(Token::Property(PropertyToken {
                        key: "region",
                        value: "us-east-1"
                    }))
                ),
            ]
        );
    }

    #[test]
    fn indented_lines_follow_last_property() {
        let input = "[foo]\nkey = partial\n  more text\ns3 =\n  sub = val # kept\n  other = x";
        assert_eq!(
            tokens(FileKind::Credentials, input)
                .into_iter()
                .map(|(_, token)| token)
                .collect::<Vec<_>>(),
            vec![
                Ok(Token::Profile(ProfileToken {
                    is_default: false,
                    name: "foo",
                    is_valid: true
                })),
                Ok(Token::Property(PropertyToken {
                    key: "key",
                    value: "partial"
                })),
                Ok(Token::Continuation { value: "more text" }),
                Ok(Token::Property(PropertyToken { key: "s3", value: "" })),
                Ok(Token::SubProperty {
                    key: "sub",
                    value: "val # kept"
                }),
                Ok(Token::SubProperty {
                    key: "other",
                    value: "x"
                }),
            ]
        );
    }

    #[test]
    fn unmatched_lines_report_expected_rule() {
        let input = "key = value\n[profile a]\n  orphan\nnot a property\ns3 =\n  not a sub property";
        let results = tokens(FileKind::Config, input)
            .into_iter()
            .filter_map(|(line, token)| token.err().map(|expected| (line, expected)))
            .collect::<Vec<_>>();
        assert_eq!(
            results,
            vec![
                (0, ExpectedRule::ProfileDefinition),
                (2, ExpectedRule::PropertyDefinition),
                (3, ExpectedRule::PropertyDefinition),
                (5, ExpectedRule::SubPropertyDefinition),
            ]
        );
    }

    #[test]
    fn profile_resets_last_property() {
        let state = ParserState::default();
        let (state, _) = state.step(&FileLine::new(0, "[profile a]"), CONFIG_RULES);
        let (state, _) = state.step(&FileLine::new(1, "key = value"), CONFIG_RULES);
        assert!(state.last_property.is_some());
        let (state, token) = state.step(&FileLine::new(2, "[profile b b]"), CONFIG_RULES);
        assert_eq!(
            token,
            Ok(Token::Profile(ProfileToken {
                is_default: false,
                name: "b b",
                is_valid: false
            }))
        );
        assert_eq!(state.last_property, None);
        let (_, token) = state.step(&FileLine::new(3, "  continued"), CONFIG_RULES);
        assert_eq!(token, Err(ExpectedRule::PropertyDefinition));
    }

    #[test]
    fn step_does_not_change_state_on_failure() {
        let state = ParserState::default();
        let (next, token) = state.step(&FileLine::new(0, "key = value"), CREDENTIALS_RULES);
        assert_eq!(next, state);
        assert_eq!(token, Err(ExpectedRule::ProfileDefinition));
    }
}
