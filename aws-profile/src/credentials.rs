/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Profile File Based Credentials
//!
//! Loads the static keys of the selected profile:
//! ```ini
//! [default]
//! aws_access_key_id = AKIDEXAMPLE
//! aws_secret_access_key = SECRETEXAMPLE
//! aws_session_token = TOKEN # optional
//! ```
//!
//! Role assumption (`role_arn`, `source_profile`, `credential_source`) and SSO profiles require
//! network providers and are not handled here.

use crate::profile::parser::Strictness;
use crate::profile::{
    FileKind, Profile, ProfileMap, ProfileParseError, ProfileParser, ProfileSet,
};
use aws_credential_types::provider::{
    BoxFuture, CredentialsError, CredentialsResult, ProvideCredentials,
};
use aws_credential_types::StaticCredentialsProvider;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};

const DEFAULT_PROFILE: &str = "default";
const PROVIDER_NAME: &str = "ProfileFile";

const ACCESS_KEY_ID: &str = "aws_access_key_id";
const SECRET_ACCESS_KEY: &str = "aws_secret_access_key";
const SESSION_TOKEN: &str = "aws_session_token";

#[derive(Debug)]
#[non_exhaustive]
pub enum ProfileFileError {
    CouldNotParseProfile(ProfileParseError),
    MissingCredentialSource {
        profile: String,
        message: Cow<'static, str>,
    },
    MissingProfile {
        profile: String,
        message: Cow<'static, str>,
    },
}

impl Display for ProfileFileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ProfileFileError::CouldNotParseProfile(err) => {
                write!(f, "could not parse profile file: {}", err)
            }
            ProfileFileError::MissingCredentialSource { profile, message } => {
                write!(f, "profile `{}` did not contain credential information: {}", profile, message)
            }
            ProfileFileError::MissingProfile { profile, message } => {
                write!(f, "profile `{}` was not defined: {}", profile, message)
            }
        }
    }
}

impl Error for ProfileFileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ProfileFileError::CouldNotParseProfile(err) => Some(err),
            _ => None,
        }
    }
}

/// Loads static credentials from the selected profile of a [`ProfileSet`]
///
/// Each lookup reads the already parsed profiles and performs no I/O.
///
/// ## Example
/// ```rust
/// use aws_profile::credentials::ProfileFileCredentialsProvider;
/// let provider = ProfileFileCredentialsProvider::builder()
///     .credentials_contents("[dev]\naws_access_key_id = AKID\naws_secret_access_key = SECRET\n")
///     .profile_name("dev")
///     .build()
///     .expect("valid profile files");
/// ```
#[derive(Debug, Clone)]
pub struct ProfileFileCredentialsProvider {
    profiles: ProfileSet,
}

impl ProfileFileCredentialsProvider {
    pub fn new(profiles: ProfileSet) -> Self {
        Self { profiles }
    }

    pub fn builder() -> Builder {
        Builder::default()
    }

    fn credentials(&self) -> CredentialsResult {
        if self.profiles.is_empty() {
            return Err(CredentialsError::CredentialsNotLoaded);
        }
        let name = self.profiles.selected_profile_name();
        let profile = self.profiles.selected_profile().ok_or_else(|| {
            CredentialsError::InvalidConfiguration(
                ProfileFileError::MissingProfile {
                    profile: name.to_string(),
                    message: "the selected profile is not defined in the config or credentials file"
                        .into(),
                }
                .into(),
            )
        })?;
        let provider = static_provider(profile)
            .map_err(|err| CredentialsError::InvalidConfiguration(err.into()))?;
        tracing::debug!(profile = name, "loaded credentials from profile");
        Ok(provider.credentials().clone())
    }
}

/// Builds a [`StaticCredentialsProvider`] from the keys defined in `profile`.
pub fn static_provider(profile: &Profile) -> Result<StaticCredentialsProvider, ProfileFileError> {
    let mut builder = StaticCredentialsProvider::builder().provider_name(PROVIDER_NAME);
    builder
        .set_access_key_id(profile.get(ACCESS_KEY_ID).map(str::to_string))
        .set_secret_access_key(profile.get(SECRET_ACCESS_KEY).map(str::to_string))
        .set_session_token(profile.get(SESSION_TOKEN).map(str::to_string));
    builder
        .build()
        .map_err(|err| ProfileFileError::MissingCredentialSource {
            profile: profile.name().to_string(),
            message: format!("`{}` was not set", err.field()).into(),
        })
}

impl ProvideCredentials for ProfileFileCredentialsProvider {
    fn provide_credentials<'a>(&'a self) -> BoxFuture<'a, CredentialsResult>
    where
        Self: 'a,
    {
        Box::pin(std::future::ready(self.credentials()))
    }
}

/// Builder for [`ProfileFileCredentialsProvider`]
#[derive(Debug, Default)]
pub struct Builder {
    config_contents: Option<String>,
    credentials_contents: Option<String>,
    profile_name: Option<Cow<'static, str>>,
    strictness: Strictness,
}

impl Builder {
    /// Text of the shared config file
    pub fn config_contents(mut self, contents: impl Into<String>) -> Self {
        self.config_contents = Some(contents.into());
        self
    }

    pub fn set_config_contents(&mut self, contents: Option<String>) -> &mut Self {
        self.config_contents = contents;
        self
    }

    /// Text of the shared credentials file
    pub fn credentials_contents(mut self, contents: impl Into<String>) -> Self {
        self.credentials_contents = Some(contents.into());
        self
    }

    pub fn set_credentials_contents(&mut self, contents: Option<String>) -> &mut Self {
        self.credentials_contents = contents;
        self
    }

    /// Profile to load credentials from. Defaults to `default`.
    pub fn profile_name(mut self, profile_name: impl Into<Cow<'static, str>>) -> Self {
        self.profile_name = Some(profile_name.into());
        self
    }

    pub fn set_profile_name(&mut self, profile_name: Option<Cow<'static, str>>) -> &mut Self {
        self.profile_name = profile_name;
        self
    }

    /// How malformed lines in either file are handled. Defaults to [`Strictness::Lenient`].
    pub fn strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    pub fn build(self) -> Result<ProfileFileCredentialsProvider, ProfileFileError> {
        let config = parse(self.config_contents, FileKind::Config, self.strictness)?;
        let credentials = parse(self.credentials_contents, FileKind::Credentials, self.strictness)?;
        let profile_name = self
            .profile_name
            .unwrap_or(Cow::Borrowed(DEFAULT_PROFILE));
        Ok(ProfileFileCredentialsProvider::new(ProfileSet::new(
            config,
            credentials,
            profile_name,
        )))
    }
}

fn parse(
    contents: Option<String>,
    kind: FileKind,
    strictness: Strictness,
) -> Result<ProfileMap, ProfileFileError> {
    let contents = match contents {
        Some(contents) => contents,
        None => return Ok(ProfileMap::default()),
    };
    ProfileParser::builder()
        .file_kind(kind)
        .strictness(strictness)
        .build()
        .parse(&contents)
        .map(|parsed| parsed.into_profiles())
        .map_err(ProfileFileError::CouldNotParseProfile)
}
