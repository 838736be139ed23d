/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Static Credentials Provider
//!
//! Provides a fixed set of credentials. The provider performs no I/O and holds no resources,
//! so every lookup returns the same [`Credentials`].

use crate::provider::{BoxFuture, CredentialsResult, ProvideCredentials};
use crate::Credentials;
use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};

const PROVIDER_NAME: &str = "Static";

/// Credentials provider for a fixed set of credentials
///
/// ## Example
/// ```rust
/// use aws_credential_types::StaticCredentialsProvider;
/// let provider = StaticCredentialsProvider::builder()
///     .access_key_id("AKIDEXAMPLE")
///     .secret_access_key("SECRETEXAMPLE")
///     .build()
///     .expect("both keys were set");
/// ```
#[derive(Debug, Clone)]
pub struct StaticCredentialsProvider {
    credentials: Credentials,
}

impl StaticCredentialsProvider {
    /// Creates a provider that always returns `credentials`.
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Returns a builder for `StaticCredentialsProvider`.
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Returns the credentials held by this provider.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl ProvideCredentials for StaticCredentialsProvider {
    fn provide_credentials<'a>(&'a self) -> BoxFuture<'a, CredentialsResult>
    where
        Self: 'a,
    {
        tracing::debug!(provider = self.credentials.provider_name(), "loaded static credentials");
        Box::pin(std::future::ready(Ok(self.credentials.clone())))
    }
}

/// Builder for [`StaticCredentialsProvider`]
#[derive(Default)]
pub struct Builder {
    access_key_id: Option<String>,
    secret_access_key: Option<String>,
    session_token: Option<String>,
    provider_name: Option<&'static str>,
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("access_key_id", &self.access_key_id)
            .field("provider_name", &self.provider_name)
            .finish()
    }
}

impl Builder {
    /// Sets the access key ID. Required.
    pub fn access_key_id(mut self, access_key_id: impl Into<String>) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self
    }

    /// Sets the access key ID. Required.
    pub fn set_access_key_id(&mut self, access_key_id: Option<String>) -> &mut Self {
        self.access_key_id = access_key_id;
        self
    }

    /// Sets the secret access key. Required.
    pub fn secret_access_key(mut self, secret_access_key: impl Into<String>) -> Self {
        self.secret_access_key = Some(secret_access_key.into());
        self
    }

    /// Sets the secret access key. Required.
    pub fn set_secret_access_key(&mut self, secret_access_key: Option<String>) -> &mut Self {
        self.secret_access_key = secret_access_key;
        self
    }

    /// Sets the session token.
    pub fn session_token(mut self, session_token: impl Into<String>) -> Self {
        self.session_token = Some(session_token.into());
        self
    }

    /// Sets the session token.
    pub fn set_session_token(&mut self, session_token: Option<String>) -> &mut Self {
        self.session_token = session_token;
        self
    }

    /// Overrides the provider name attached to the built credentials (defaults to `Static`).
    pub fn provider_name(mut self, provider_name: &'static str) -> Self {
        self.provider_name = Some(provider_name);
        self
    }

    /// Builds the provider.
    ///
    /// Fails when either the access key ID or the secret access key is missing.
    pub fn build(self) -> Result<StaticCredentialsProvider, BuildError> {
        let access_key_id = self.access_key_id.ok_or(BuildError {
            field: "access_key_id",
        })?;
        let secret_access_key = self.secret_access_key.ok_or(BuildError {
            field: "secret_access_key",
        })?;
        Ok(StaticCredentialsProvider::new(Credentials::new(
            access_key_id,
            secret_access_key,
            self.session_token,
            self.provider_name.unwrap_or(PROVIDER_NAME),
        )))
    }
}

/// A required field was not set on [`Builder`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildError {
    field: &'static str,
}

impl BuildError {
    /// Name of the missing field.
    pub fn field(&self) -> &'static str {
        self.field
    }
}

impl Display for BuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StaticCredentialsProvider requires `{}` to be set",
            self.field
        )
    }
}

impl Error for BuildError {}
