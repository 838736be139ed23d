/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Profile file parser
//!
//! Parsing happens in two passes over an already loaded file:
//!
//! 1. Each line is classified and turned into a token. Which grammar rule a line matches depends
//!    on the active profile and the last property seen, so the tokenizer threads that state through
//!    the file line by line.
//! 2. Tokens are folded into a [`ProfileMap`], attaching continuation lines and sub-properties to
//!    the property they follow.
//!
//! A malformed line or profile header never prevents the rest of the file from being read. With
//! the default [`Strictness::Lenient`], problems are returned as [`ParseDiagnostic`]s alongside the
//! profiles that could be parsed.

use crate::profile::{FileKind, ProfileMap};
use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};

mod assemble;
pub(crate) mod line;
mod rules;
mod tokenize;

/// Parses the contents of a shared config file, collecting diagnostics for malformed lines.
pub fn parse_config(contents: &str) -> ParsedProfileFile {
    ProfileParser::builder()
        .file_kind(FileKind::Config)
        .build()
        .parse_lenient(contents)
}

/// Parses the contents of a shared credentials file, collecting diagnostics for malformed lines.
pub fn parse_credentials(contents: &str) -> ParsedProfileFile {
    ProfileParser::builder()
        .file_kind(FileKind::Credentials)
        .build()
        .parse_lenient(contents)
}

/// How the parser treats lines it cannot use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Skip the line, record a diagnostic, and keep parsing
    #[default]
    Lenient,
    /// Fail the parse on the first diagnostic
    Strict,
}

/// The grammar rule an unmatched line was expected to satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExpectedRule {
    /// Nothing but a profile header may appear before the first profile
    ProfileDefinition,
    /// A `key = value` property, including indented lines with no property to attach to
    PropertyDefinition,
    /// An indented `key = value` line following a property with an empty value
    SubPropertyDefinition,
}

impl Display for ExpectedRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedRule::ProfileDefinition => write!(f, "expected a profile definition"),
            ExpectedRule::PropertyDefinition => write!(f, "expected a property definition"),
            ExpectedRule::SubPropertyDefinition => {
                write!(f, "expected a sub-property definition (`key = value`)")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DiagnosticKind {
    /// The header was recognized but its name or keyword is invalid. The profile's properties
    /// were skipped.
    InvalidProfile { name: String },
    /// The line matched no grammar rule
    UnmatchedLine { expected: ExpectedRule },
}

/// A problem found on a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiagnostic {
    line_number: usize,
    kind: DiagnosticKind,
}

impl ParseDiagnostic {
    /// 0-based line number
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn kind(&self) -> &DiagnosticKind {
        &self.kind
    }
}

impl Display for ParseDiagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::InvalidProfile { name } => write!(
                f,
                "invalid profile `{}` on line {}, its properties were ignored",
                name,
                self.line_number + 1
            ),
            DiagnosticKind::UnmatchedLine { expected } => {
                write!(f, "{} on line {}", expected, self.line_number + 1)
            }
        }
    }
}

/// Error returned by a [`Strictness::Strict`] parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileParseError {
    source_name: Cow<'static, str>,
    diagnostic: ParseDiagnostic,
}

impl ProfileParseError {
    /// Name of the parsed file, as given to [`Builder::source_name`]
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn diagnostic(&self) -> &ParseDiagnostic {
        &self.diagnostic
    }
}

impl Display for ProfileParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "error parsing {}: {}", self.source_name, self.diagnostic)
    }
}

impl Error for ProfileParseError {}

/// The result of parsing one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedProfileFile {
    profiles: ProfileMap,
    diagnostics: Vec<ParseDiagnostic>,
}

impl ParsedProfileFile {
    /// The valid profiles
    pub fn profiles(&self) -> &ProfileMap {
        &self.profiles
    }

    /// Problems found while parsing, in line order
    pub fn diagnostics(&self) -> &[ParseDiagnostic] {
        &self.diagnostics
    }

    pub fn into_profiles(self) -> ProfileMap {
        self.profiles
    }

    pub fn into_parts(self) -> (ProfileMap, Vec<ParseDiagnostic>) {
        (self.profiles, self.diagnostics)
    }
}

/// Profile file parser
///
/// ## Example
/// ```rust
/// use aws_profile::profile::parser::Strictness;
/// use aws_profile::profile::{FileKind, ProfileParser};
///
/// let parser = ProfileParser::builder()
///     .file_kind(FileKind::Credentials)
///     .strictness(Strictness::Strict)
///     .build();
/// let parsed = parser
///     .parse("[dev]\naws_access_key_id = AKID\n")
///     .expect("valid file");
/// assert_eq!(
///     parsed.profiles().get_profile("dev").and_then(|p| p.get("aws_access_key_id")),
///     Some("AKID")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ProfileParser {
    file_kind: FileKind,
    strictness: Strictness,
    source_name: Cow<'static, str>,
}

impl ProfileParser {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn file_kind(&self) -> FileKind {
        self.file_kind
    }

    /// Parses `contents`.
    ///
    /// In [`Strictness::Strict`] mode the first diagnostic is returned as an error. Otherwise this
    /// never fails.
    pub fn parse(&self, contents: &str) -> Result<ParsedProfileFile, ProfileParseError> {
        let parsed = self.parse_lenient(contents);
        if self.strictness == Strictness::Strict {
            if let Some(diagnostic) = parsed.diagnostics.first() {
                return Err(ProfileParseError {
                    source_name: self.source_name.clone(),
                    diagnostic: diagnostic.clone(),
                });
            }
        }
        Ok(parsed)
    }

    fn parse_lenient(&self, contents: &str) -> ParsedProfileFile {
        let tokens = tokenize::tokenize(self.file_kind, contents);
        let (profiles, diagnostics) = assemble::assemble(tokens);
        if self.strictness == Strictness::Lenient {
            for diagnostic in &diagnostics {
                tracing::warn!(file = %self.source_name, "{}", diagnostic);
            }
        }
        tracing::debug!(
            file = %self.source_name,
            profiles = profiles.len(),
            diagnostics = diagnostics.len(),
            "parsed profile file"
        );
        ParsedProfileFile {
            profiles,
            diagnostics,
        }
    }
}

/// Builder for [`ProfileParser`]
#[derive(Debug, Default)]
pub struct Builder {
    file_kind: Option<FileKind>,
    strictness: Strictness,
    source_name: Option<Cow<'static, str>>,
}

impl Builder {
    /// Selects the grammar. Defaults to [`FileKind::Config`].
    pub fn file_kind(mut self, file_kind: FileKind) -> Self {
        self.file_kind = Some(file_kind);
        self
    }

    pub fn set_file_kind(&mut self, file_kind: Option<FileKind>) -> &mut Self {
        self.file_kind = file_kind;
        self
    }

    pub fn strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    pub fn set_strictness(&mut self, strictness: Strictness) -> &mut Self {
        self.strictness = strictness;
        self
    }

    /// Name used for the file in errors and logs, for example `~/.aws/config`
    ///
    /// Defaults to `config` or `credentials` depending on the file kind.
    pub fn source_name(mut self, source_name: impl Into<Cow<'static, str>>) -> Self {
        self.source_name = Some(source_name.into());
        self
    }

    pub fn build(self) -> ProfileParser {
        let file_kind = self.file_kind.unwrap_or(FileKind::Config);
        let source_name = self.source_name.unwrap_or(match file_kind {
            FileKind::Config => Cow::Borrowed("config"),
            FileKind::Credentials => Cow::Borrowed("credentials"),
        });
        ProfileParser {
            file_kind,
            strictness: self.strictness,
            source_name,
        }
    }
}
