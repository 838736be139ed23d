/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Shared config and credentials profiles
//!
//! The `~/.aws/config` and `~/.aws/credentials` files hold named profiles of settings:
//! ```ini
//! [profile dev]
//! region = us-west-2
//! s3 =
//!   max_concurrent_requests = 20
//! ```
//!
//! [`parser`] turns the text of either file into a [`ProfileMap`]. Reading the files from disk is
//! left to the caller. Maps parsed from both files can be combined with [`ProfileSet`].

use indexmap::IndexMap;

pub mod parser;
mod set;
mod write;

pub use parser::{parse_config, parse_credentials, ProfileParseError, ProfileParser};
pub use set::ProfileSet;

/// Which of the two shared files is being parsed
///
/// The files only differ in the syntax of profile headers: config files use `[profile name]` (or
/// `[default]`) while credentials files use `[name]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// The shared config file, usually `~/.aws/config`
    Config,
    /// The shared credentials file, usually `~/.aws/credentials`
    Credentials,
}

/// Profiles parsed from a single file, in the order they were first declared
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileMap {
    profiles: IndexMap<String, Profile>,
}

impl ProfileMap {
    /// Returns the profile named `name`, if it was declared with a valid header.
    pub fn get_profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    /// Iterates over all valid profiles.
    pub fn profiles(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.values()
    }

    /// Iterates over the names of all valid profiles.
    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Returns the profile named `name`, creating an empty one if needed.
    pub(crate) fn open(&mut self, name: &str) -> &mut Profile {
        self.profiles
            .entry(name.to_string())
            .or_insert_with(|| Profile::new(name))
    }

    pub(crate) fn get_profile_mut(&mut self, name: &str) -> Option<&mut Profile> {
        self.profiles.get_mut(name)
    }
}

/// A named profile: an ordered set of properties
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    name: String,
    properties: IndexMap<String, Property>,
}

impl Profile {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value of property `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(Property::value)
    }

    pub fn get_property(&self, key: &str) -> Option<&Property> {
        self.properties.get(key)
    }

    /// Iterates over the properties in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.values()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Inserts `property`, replacing any earlier property with the same key in place.
    pub(crate) fn insert(&mut self, property: Property) {
        self.properties.insert(property.key.clone(), property);
    }

    pub(crate) fn get_property_mut(&mut self, key: &str) -> Option<&mut Property> {
        self.properties.get_mut(key)
    }
}

/// A property and any sub-properties nested under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    key: String,
    value: String,
    sub_properties: IndexMap<String, String>,
}

impl Property {
    pub(crate) fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            sub_properties: IndexMap::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The value, with any continuation lines joined by a single space
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the value of the sub-property `key`.
    pub fn get_sub_property(&self, key: &str) -> Option<&str> {
        self.sub_properties.get(key).map(String::as_str)
    }

    /// Iterates over `(key, value)` sub-property pairs in declaration order.
    pub fn sub_properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sub_properties
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub(crate) fn append(&mut self, continuation: &str) {
        self.value.push(' ');
        self.value.push_str(continuation);
    }

    pub(crate) fn insert_sub_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.sub_properties.insert(key.into(), value.into());
    }
}
