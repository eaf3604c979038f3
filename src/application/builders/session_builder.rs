use crate::domain::entities::ProfileConfig;
use crate::domain::value_objects::EndpointUrl;
use anyhow::Result;

/// Everything needed to open an AWS session for one profile
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Section name as shown to the operator and written to credential files
    pub profile: String,
    /// Name passed to the SDK's shared config loader
    pub sdk_profile: String,
    pub region: Option<String>,
    pub endpoint_url: Option<EndpointUrl>,
}

pub struct SessionBuilder {
    profile: String,
    sdk_profile: String,
    region: Option<String>,
    endpoint_url: Option<EndpointUrl>,
}

impl SessionBuilder {
    pub fn new(profile: &str) -> Self {
        Self {
            profile: profile.to_string(),
            sdk_profile: profile.to_string(),
            region: None,
            endpoint_url: None,
        }
    }

    /// Seeds the builder from a parsed profile section
    pub fn from_profile(config: &ProfileConfig) -> Result<Self> {
        Self::new(&config.name)
            .sdk_profile(config.sdk_profile_name())
            .region(config.region())
            .endpoint_url(config.endpoint_url())
    }

    pub fn sdk_profile(mut self, name: &str) -> Self {
        self.sdk_profile = name.to_string();
        self
    }

    pub fn region(mut self, region: Option<&str>) -> Self {
        self.region = region.map(str::to_string);
        self
    }

    pub fn endpoint_url(mut self, raw_url: Option<&str>) -> Result<Self> {
        self.endpoint_url = raw_url.map(EndpointUrl::new).transpose()?;
        Ok(self)
    }

    pub fn build(self) -> SessionSettings {
        SessionSettings {
            profile: self.profile,
            sdk_profile: self.sdk_profile,
            region: self.region,
            endpoint_url: self.endpoint_url,
        }
    }
}
