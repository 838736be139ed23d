/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Folds tokens into a [`ProfileMap`]

use super::rules::Token;
use super::tokenize::TokenLine;
use super::{DiagnosticKind, ParseDiagnostic};
use crate::profile::{ProfileMap, Property};

#[derive(Debug, Default)]
struct Assembler {
    profiles: ProfileMap,
    diagnostics: Vec<ParseDiagnostic>,
    /// Name of the open profile. `None` before the first header and inside invalid profiles.
    section: Option<String>,
    /// Key of the property that continuation and sub-property lines attach to. The tokenizer only
    /// emits continuations for non-empty values and sub-properties for empty ones, so a target
    /// never receives both.
    target: Option<String>,
}

impl Assembler {
    fn push(&mut self, line_number: usize, token: Token<'_>) {
        match token {
            Token::Profile(profile) if profile.is_valid => {
                tracing::debug!(
                    profile = profile.name,
                    default = profile.is_default,
                    line = line_number,
                    "opening profile"
                );
                self.profiles.open(profile.name);
                self.section = Some(profile.name.to_string());
                self.target = None;
            }
            Token::Profile(profile) => {
                self.diagnose(
                    line_number,
                    DiagnosticKind::InvalidProfile {
                        name: profile.name.to_string(),
                    },
                );
                self.section = None;
                self.target = None;
            }
            Token::Property(property) => {
                let section = match &self.section {
                    Some(section) => section,
                    None => return,
                };
                if let Some(profile) = self.profiles.get_profile_mut(section) {
                    profile.insert(Property::new(property.key, property.value));
                    self.target = Some(property.key.to_string());
                }
            }
            Token::Continuation { value } => {
                if let Some(property) = self.target_mut() {
                    property.append(value);
                }
            }
            Token::SubProperty { key, value } => {
                if let Some(property) = self.target_mut() {
                    property.insert_sub_property(key, value);
                }
            }
        }
    }

    fn target_mut(&mut self) -> Option<&mut Property> {
        let section = self.section.as_ref()?;
        let target = self.target.as_ref()?;
        self.profiles
            .get_profile_mut(section)?
            .get_property_mut(target)
    }

    fn diagnose(&mut self, line_number: usize, kind: DiagnosticKind) {
        self.diagnostics.push(ParseDiagnostic { line_number, kind });
    }
}

/// Folds the tokenized lines of a file into profiles and the diagnostics for lines that could not
/// be used.
pub(super) fn assemble(lines: Vec<TokenLine<'_>>) -> (ProfileMap, Vec<ParseDiagnostic>) {
    let mut assembler = Assembler::default();
    for line in lines {
        match line.token {
            Ok(token) => assembler.push(line.line_number, token),
            Err(expected) => {
                assembler.diagnose(line.line_number, DiagnosticKind::UnmatchedLine { expected })
            }
        }
    }
    (assembler.profiles, assembler.diagnostics)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::profile::parser::tokenize::tokenize;
    use crate::profile::parser::ExpectedRule;
    use crate::profile::FileKind;

    fn assemble_config(input: &str) -> (ProfileMap, Vec<ParseDiagnostic>) {
        assemble(tokenize(FileKind::Config, input))
    }

    #[test]
    fn later_duplicate_keys_win() {
        let (profiles, diagnostics) = assemble_config(
            "[profile dev]\naws_access_key_id = AKIA...\naws_access_key_id = AKIA_OVERRIDE\nregion = us-west-2\n",
        );
        assert!(diagnostics.is_empty());
        assert_eq!(profiles.len(), 1);
        let dev = profiles.get_profile("dev").expect("dev profile");
        assert_eq!(dev.get("aws_access_key_id"), Some("AKIA_OVERRIDE"));
        assert_eq!(dev.get("region"), Some("us-west-2"));
        assert_eq!(
            dev.properties().map(|p| p.key()).collect::<Vec<_>>(),
            vec!["aws_access_key_id", "region"]
        );
    }

    #[test]
    fn continuations_and_sub_properties() {
        let (profiles, diagnostics) = assemble_config(
            "[default]\nkey = partial\n  more text\n  # a comment line\n  and more\ns3 =\n  sub = val\n  b = c # d\n",
        );
        assert!(diagnostics.is_empty());
        let default = profiles.get_profile("default").expect("default profile");
        assert_eq!(default.get("key"), Some("partial more text and more"));
        let s3 = default.get_property("s3").expect("s3 property");
        assert_eq!(s3.value(), "");
        assert_eq!(
            s3.sub_properties().collect::<Vec<_>>(),
            vec![("sub", "val"), ("b", "c # d")]
        );
        assert_eq!(default.get("sub"), None);
    }

    #[test]
    fn continued_property_never_gets_sub_properties() {
        let (profiles, diagnostics) =
            assemble_config("[default]\nkey = a\n  more\n  sub = val\n");
        assert!(diagnostics.is_empty());
        let key = profiles
            .get_profile("default")
            .and_then(|p| p.get_property("key"))
            .expect("key property");
        assert_eq!(key.value(), "a more sub = val");
        assert_eq!(key.sub_properties().count(), 0);
    }

    #[test]
    fn reopened_profiles_merge() {
        let (profiles, _) = assemble_config(
            "[profile a]\nx = 1\ny = 2\n[profile b]\nx = 3\n[profile a]\ny = 4\nz = 5\n",
        );
        assert_eq!(profiles.profile_names().collect::<Vec<_>>(), vec!["a", "b"]);
        let a = profiles.get_profile("a").expect("profile a");
        assert_eq!(a.get("x"), Some("1"));
        assert_eq!(a.get("y"), Some("4"));
        assert_eq!(a.get("z"), Some("5"));
    }

    #[test]
    fn redefined_property_drops_old_sub_properties() {
        let (profiles, _) = assemble_config("[default]\ns3 =\n  a = b\ns3 = flat\n");
        let s3 = profiles
            .get_profile("default")
            .and_then(|p| p.get_property("s3"))
            .expect("s3 property");
        assert_eq!(s3.value(), "flat");
        assert_eq!(s3.sub_properties().count(), 0);
    }

    #[test]
    fn invalid_profile_body_is_not_leaked() {
        let (profiles, diagnostics) = assemble_config(
            "[profile good]\nkey = good\n[profile bad name]\nkey = bad\n  more\n[profile other]\n",
        );
        assert_eq!(
            profiles.profile_names().collect::<Vec<_>>(),
            vec!["good", "other"]
        );
        assert_eq!(
            profiles.get_profile("good").and_then(|p| p.get("key")),
            Some("good")
        );
        assert_eq!(
            diagnostics,
            vec![ParseDiagnostic {
                line_number: 2,
                kind: DiagnosticKind::InvalidProfile {
                    name: "bad name".to_string()
                }
            }]
        );
    }

    #[test]
    fn unmatched_lines_are_reported_and_skipped() {
        let (profiles, diagnostics) =
            assemble_config("orphan = 1\n[default]\n  dangling\nregion = us-east-1\n");
        assert_eq!(
            profiles.get_profile("default").and_then(|p| p.get("region")),
            Some("us-east-1")
        );
        assert_eq!(
            diagnostics,
            vec![
                ParseDiagnostic {
                    line_number: 0,
                    kind: DiagnosticKind::UnmatchedLine {
                        expected: ExpectedRule::ProfileDefinition
                    }
                },
                ParseDiagnostic {
                    line_number: 2,
                    kind: DiagnosticKind::UnmatchedLine {
                        expected: ExpectedRule::PropertyDefinition
                    }
                },
            ]
        );
    }
}
