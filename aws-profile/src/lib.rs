/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! AWS shared config and credentials files
//!
//! - [`profile`] parses the text of `~/.aws/config` and `~/.aws/credentials` into profiles and
//!   merges the two files.
//! - [`credentials`] loads static access keys from the selected profile.
//!
//! Locating and reading the files is left to the caller.

#![warn(rust_2018_idioms, unreachable_pub)]

pub mod credentials;
pub mod profile;
