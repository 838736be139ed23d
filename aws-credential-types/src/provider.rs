/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Credentials provider contract
//!
//! Every credentials source (static keys, profile files, and any network backed provider built on
//! top of them) implements [`ProvideCredentials`].

use crate::Credentials;
use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed error used by the credential error variants that wrap an underlying cause.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Boxed future returned by [`ProvideCredentials::provide_credentials`].
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Result of a credentials lookup.
pub type CredentialsResult = Result<Credentials, CredentialsError>;

/// Error returned when credentials could not be resolved.
#[derive(Debug)]
#[non_exhaustive]
pub enum CredentialsError {
    /// No credentials were available for this provider.
    ///
    /// Providers in a chain return this so that the next provider is consulted.
    CredentialsNotLoaded,

    /// The provider was given invalid configuration, for example a profile missing its keys.
    InvalidConfiguration(BoxError),

    /// The provider failed to load credentials from an underlying source.
    ProviderError(BoxError),

    /// An unexpected error occurred while loading credentials.
    Unhandled(BoxError),
}

impl Display for CredentialsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CredentialsError::CredentialsNotLoaded => {
                write!(f, "The provider could not provide credentials or required configuration was not set")
            }
            CredentialsError::InvalidConfiguration(err) => {
                write!(f, "The credentials provider was not properly configured: {}", err)
            }
            CredentialsError::ProviderError(err) => {
                write!(f, "An error occurred while loading credentials: {}", err)
            }
            CredentialsError::Unhandled(err) => {
                write!(f, "Unexpected credentials error: {}", err)
            }
        }
    }
}

impl Error for CredentialsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CredentialsError::InvalidConfiguration(err)
            | CredentialsError::ProviderError(err)
            | CredentialsError::Unhandled(err) => Some(err.as_ref() as &(dyn Error + 'static)),
            CredentialsError::CredentialsNotLoaded => None,
        }
    }
}

/// Asynchronous credentials provider
///
/// Lookups are side effect free from the caller's perspective and may be issued concurrently.
pub trait ProvideCredentials: Send + Sync + fmt::Debug {
    /// Returns a future that resolves to credentials or a [`CredentialsError`].
    fn provide_credentials<'a>(&'a self) -> BoxFuture<'a, CredentialsResult>
    where
        Self: 'a;
}

impl<T: ProvideCredentials + ?Sized> ProvideCredentials for Arc<T> {
    fn provide_credentials<'a>(&'a self) -> BoxFuture<'a, CredentialsResult>
    where
        Self: 'a,
    {
        self.as_ref().provide_credentials()
    }
}

impl<T: ProvideCredentials + ?Sized> ProvideCredentials for Box<T> {
    fn provide_credentials<'a>(&'a self) -> BoxFuture<'a, CredentialsResult>
    where
        Self: 'a,
    {
        self.as_ref().provide_credentials()
    }
}
