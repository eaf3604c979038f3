use crate::application::builders::session_builder::SessionSettings;
use crate::application::services::IamClient;
use crate::domain::entities::{AccessKey, IamGroup};

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_iam::Client;
use tracing::debug;

/// Infrastructure implementation of IamClient on top of the AWS SDK
pub struct AwsIamClient {
    client: Client,
    region: Option<String>,
    endpoint_url: Option<String>,
}

impl AwsIamClient {
    /// Loads shared config for the chosen profile and builds the IAM client
    pub async fn connect(settings: &SessionSettings) -> Self {
        let config = SdkConfigAdapter::load(settings).await;
        Self::from_config(&config)
    }

    pub fn from_config(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
            region: config.region().map(|region| region.to_string()),
            endpoint_url: config.endpoint_url().map(str::to_string),
        }
    }

    /// Region the session resolved to
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn endpoint_url(&self) -> Option<&str> {
        self.endpoint_url.as_deref()
    }
}

#[async_trait]
impl IamClient for AwsIamClient {
    async fn create_user(&self, user_name: &str) -> Result<()> {
        self.client
            .create_user()
            .user_name(user_name)
            .send()
            .await
            .with_context(|| format!("Failed to create user {user_name}"))?;
        Ok(())
    }

    async fn find_policy_arn(&self, policy_name: &str) -> Result<Option<String>> {
        let mut marker: Option<String> = None;

        loop {
            let page = self
                .client
                .list_policies()
                .set_marker(marker.take())
                .send()
                .await
                .context("Failed to list policies")?;

            let found = page
                .policies()
                .iter()
                .find(|policy| policy.policy_name() == Some(policy_name))
                .and_then(|policy| policy.arn());
            if let Some(arn) = found {
                debug!(policy_name = %policy_name, policy_arn = %arn, "Policy found");
                return Ok(Some(arn.to_string()));
            }

            match page.marker() {
                Some(next) if page.is_truncated() => marker = Some(next.to_string()),
                _ => return Ok(None),
            }
        }
    }

    async fn attach_user_policy(&self, user_name: &str, policy_arn: &str) -> Result<()> {
        self.client
            .attach_user_policy()
            .user_name(user_name)
            .policy_arn(policy_arn)
            .send()
            .await
            .with_context(|| format!("Failed to attach policy {policy_arn} to {user_name}"))?;
        Ok(())
    }

    async fn list_groups(&self) -> Result<Vec<IamGroup>> {
        let mut groups = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let page = self
                .client
                .list_groups()
                .set_marker(marker.take())
                .send()
                .await
                .context("Failed to list groups")?;

            groups.extend(page.groups().iter().map(GroupAdapter::to_domain_group));

            match page.marker() {
                Some(next) if page.is_truncated() => marker = Some(next.to_string()),
                _ => break,
            }
        }

        debug!(count = groups.len(), "Listed IAM groups");
        Ok(groups)
    }

    async fn add_user_to_group(&self, user_name: &str, group_name: &str) -> Result<()> {
        self.client
            .add_user_to_group()
            .group_name(group_name)
            .user_name(user_name)
            .send()
            .await
            .with_context(|| format!("Failed to add {user_name} to group {group_name}"))?;
        Ok(())
    }

    async fn create_login_profile(&self, user_name: &str, password: &str) -> Result<()> {
        self.client
            .create_login_profile()
            .user_name(user_name)
            .password(password)
            .password_reset_required(true)
            .send()
            .await
            .with_context(|| format!("Failed to create console access for {user_name}"))?;
        Ok(())
    }

    async fn create_access_key(&self, user_name: &str) -> Result<AccessKey> {
        let output = self
            .client
            .create_access_key()
            .user_name(user_name)
            .send()
            .await
            .with_context(|| format!("Failed to create access key for {user_name}"))?;

        let key = output
            .access_key()
            .context("CreateAccessKey returned no access key")?;
        Ok(AccessKey {
            access_key_id: key.access_key_id().to_string(),
            secret_access_key: key.secret_access_key().to_string(),
        })
    }
}

/// Adapter for turning session settings into SDK config
struct SdkConfigAdapter;

impl SdkConfigAdapter {
    async fn load(settings: &SessionSettings) -> SdkConfig {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).profile_name(&settings.sdk_profile);

        if let Some(region) = &settings.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(endpoint) = &settings.endpoint_url {
            loader = loader.endpoint_url(endpoint.as_str());
        }

        loader.load().await
    }
}

/// Adapter for converting SDK groups to domain groups
struct GroupAdapter;

impl GroupAdapter {
    fn to_domain_group(group: &aws_sdk_iam::types::Group) -> IamGroup {
        IamGroup {
            name: group.group_name().to_string(),
            arn: group.arn().to_string(),
        }
    }
}
