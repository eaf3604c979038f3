use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;

/// Profiles keyed by section name; iteration order carries no meaning
pub type Profiles = HashMap<String, ProfileConfig>;

const PROFILE_PREFIX: &str = "profile ";

/// One `[name]` section of the AWS config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileConfig {
    pub name: String,
    /// Keys in the order they first appeared in the file
    pub attributes: IndexMap<String, String>,
}

impl ProfileConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
        }
    }

    /// Last write for a key wins; the key keeps its original position
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn region(&self) -> Option<&str> {
        self.get("region")
    }

    pub fn endpoint_url(&self) -> Option<&str> {
        self.get("endpoint_url")
    }

    /// Name as the AWS SDK knows it: `[profile dev]` is the `dev` profile
    pub fn sdk_profile_name(&self) -> &str {
        self.name
            .strip_prefix(PROFILE_PREFIX)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(self.name.as_str())
    }
}

/// An existing IAM group the new user can join
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IamGroup {
    pub name: String,
    pub arn: String,
}

/// Programmatic credentials returned by CreateAccessKey
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessKey {
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// Console login created for a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleAccess {
    pub user_name: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sdk_profile_name_strips_profile_prefix() {
        assert_eq!(ProfileConfig::new("profile dev").sdk_profile_name(), "dev");
        assert_eq!(ProfileConfig::new("default").sdk_profile_name(), "default");
        assert_eq!(ProfileConfig::new("profile ").sdk_profile_name(), "profile ");
    }

    #[test]
    fn duplicate_key_keeps_last_value() {
        let mut profile = ProfileConfig::new("dev");
        profile.set("region", "us-east-1");
        profile.set("region", "eu-west-1");
        assert_eq!(profile.region(), Some("eu-west-1"));
        assert_eq!(profile.endpoint_url(), None);
    }

    #[test]
    fn attributes_keep_file_order() {
        let mut profile = ProfileConfig::new("dev");
        profile.set("region", "us-east-1");
        profile.set("endpoint_url", "http://localhost:4566");
        profile.set("output", "json");
        profile.set("region", "us-west-2");

        let keys: Vec<_> = profile.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, ["region", "endpoint_url", "output"]);
        assert_eq!(profile.region(), Some("us-west-2"));
    }
}
