/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Merging the config and credentials files

use crate::profile::{Profile, ProfileMap};
use std::borrow::Cow;

/// Profiles merged from the shared config and credentials files, with one profile selected
///
/// When both files define the same profile, properties from the credentials file take precedence
/// over properties of the same name in the config file. Properties only present in one file are
/// kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSet {
    profiles: ProfileMap,
    selected_profile: Cow<'static, str>,
}

impl ProfileSet {
    pub fn new(
        config: ProfileMap,
        credentials: ProfileMap,
        selected_profile: impl Into<Cow<'static, str>>,
    ) -> Self {
        let mut profiles = config;
        for profile in credentials.profiles() {
            let merged = profiles.open(profile.name());
            for property in profile.properties() {
                merged.insert(property.clone());
            }
        }
        Self {
            profiles,
            selected_profile: selected_profile.into(),
        }
    }

    pub fn selected_profile_name(&self) -> &str {
        &self.selected_profile
    }

    /// Returns the selected profile, if either file defines it.
    pub fn selected_profile(&self) -> Option<&Profile> {
        self.profiles.get_profile(&self.selected_profile)
    }

    /// Returns property `key` of the selected profile.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.selected_profile()?.get(key)
    }

    pub fn get_profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get_profile(name)
    }

    /// Names of every profile defined in either file
    pub fn profiles(&self) -> impl Iterator<Item = &str> {
        self.profiles.profile_names()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod test {
    use crate::profile::{parse_config, parse_credentials, ProfileSet};

    fn profile_set(config: &str, credentials: &str, selected: &'static str) -> ProfileSet {
        ProfileSet::new(
            parse_config(config).into_profiles(),
            parse_credentials(credentials).into_profiles(),
            selected,
        )
    }

    #[test]
    fn credentials_take_precedence() {
        let set = profile_set(
            "[default]\nregion = us-east-1\naws_access_key_id = config_key\n[profile dev]\nregion = us-west-2\n",
            "[default]\naws_access_key_id = credentials_key\n[prod]\naws_access_key_id = prod_key\n",
            "default",
        );
        assert_eq!(set.get("region"), Some("us-east-1"));
        assert_eq!(set.get("aws_access_key_id"), Some("credentials_key"));
        assert_eq!(
            set.profiles().collect::<Vec<_>>(),
            vec!["default", "dev", "prod"]
        );
        assert_eq!(
            set.get_profile("prod")
                .and_then(|p| p.get("aws_access_key_id")),
            Some("prod_key")
        );
    }

    #[test]
    fn missing_selected_profile() {
        let set = profile_set("[profile dev]\nregion = us-west-2\n", "", "other");
        assert_eq!(set.selected_profile_name(), "other");
        assert!(set.selected_profile().is_none());
        assert_eq!(set.get("region"), None);
        assert!(!set.is_empty());
    }

    #[test]
    fn sub_properties_are_merged_with_their_property() {
        let set = profile_set(
            "[profile dev]\ns3 =\n  max_concurrent_requests = 10\n",
            "[dev]\ns3 =\n  addressing_style = path\n",
            "dev",
        );
        let s3 = set
            .selected_profile()
            .and_then(|p| p.get_property("s3"))
            .expect("s3 property");
        assert_eq!(
            s3.sub_properties().collect::<Vec<_>>(),
            vec![("addressing_style", "path")]
        );
    }
}
