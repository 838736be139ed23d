/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! AWS SDK Credentials
//!
//! This crate provides the [`Credentials`] type along with the [`ProvideCredentials`] contract
//! that every credentials provider implements. A provider for a fixed, hardcoded set of keys
//! is available as [`StaticCredentialsProvider`].

#![warn(
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    unreachable_pub
)]

mod credentials;
pub mod provider;
pub mod static_provider;

pub use credentials::Credentials;
pub use provider::ProvideCredentials;
pub use static_provider::StaticCredentialsProvider;
