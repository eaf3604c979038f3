use crate::domain::entities::{AccessKey, ConsoleAccess, IamGroup};
use crate::domain::errors::OnboardingError;
use crate::domain::value_objects::{Password, UserName};
use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

/// Managed policy attached to every onboarded user
pub const DEFAULT_POLICY_NAME: &str = "SelfManageMFADevice";

/// Trait for IAM clients to enable mocking and dependency inversion
///
/// Every method is a single request/response call; nothing is retried.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IamClient: Send + Sync {
    async fn create_user(&self, user_name: &str) -> Result<()>;

    /// ARN of the first policy named `policy_name`, if any
    async fn find_policy_arn(&self, policy_name: &str) -> Result<Option<String>>;

    async fn attach_user_policy(&self, user_name: &str, policy_arn: &str) -> Result<()>;

    async fn list_groups(&self) -> Result<Vec<IamGroup>>;

    async fn add_user_to_group(&self, user_name: &str, group_name: &str) -> Result<()>;

    /// Console login that must be changed on first use
    async fn create_login_profile(&self, user_name: &str, password: &str) -> Result<()>;

    async fn create_access_key(&self, user_name: &str) -> Result<AccessKey>;
}

/// Application service for the onboarding use cases
pub struct OnboardingService {
    iam: Box<dyn IamClient>,
}

impl OnboardingService {
    pub fn new(iam: Box<dyn IamClient>) -> Self {
        Self { iam }
    }

    pub async fn create_user(&self, user_name: &UserName) -> Result<()> {
        self.iam.create_user(user_name.as_str()).await?;
        info!(user_name = %user_name, "IAM user created");
        Ok(())
    }

    /// Looks the policy up by name and attaches it; returns the policy ARN
    pub async fn attach_policy_by_name(
        &self,
        user_name: &UserName,
        policy_name: &str,
    ) -> Result<String> {
        let policy_arn = self
            .iam
            .find_policy_arn(policy_name)
            .await?
            .ok_or_else(|| OnboardingError::PolicyNotFound {
                policy_name: policy_name.to_string(),
            })?;

        self.iam
            .attach_user_policy(user_name.as_str(), &policy_arn)
            .await?;
        info!(user_name = %user_name, policy_arn = %policy_arn, "Policy attached");
        Ok(policy_arn)
    }

    pub async fn list_groups(&self) -> Result<Vec<IamGroup>> {
        self.iam.list_groups().await
    }

    /// Adds the user to each group in order, stopping at the first failure
    pub async fn add_user_to_groups(&self, user_name: &UserName, groups: &[IamGroup]) -> Result<()> {
        for group in groups {
            self.iam
                .add_user_to_group(user_name.as_str(), &group.name)
                .await?;
            info!(
                user_name = %user_name,
                group = %group.name,
                group_arn = %group.arn,
                "User added to group"
            );
        }
        Ok(())
    }

    pub async fn create_console_access(
        &self,
        user_name: &UserName,
        password: &Password,
    ) -> Result<ConsoleAccess> {
        self.iam
            .create_login_profile(user_name.as_str(), password.expose())
            .await?;
        info!(user_name = %user_name, "Console access created");
        Ok(ConsoleAccess {
            user_name: user_name.to_string(),
            password: password.expose().to_string(),
        })
    }

    pub async fn create_cli_access(&self, user_name: &UserName) -> Result<AccessKey> {
        let key = self.iam.create_access_key(user_name.as_str()).await?;
        info!(user_name = %user_name, access_key_id = %key.access_key_id, "Access key created");
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::Sequence;

    fn alice() -> UserName {
        UserName::new("alice").unwrap()
    }

    fn group(name: &str) -> IamGroup {
        IamGroup {
            name: name.to_string(),
            arn: format!("arn:aws:iam::123456789012:group/{name}"),
        }
    }

    #[tokio::test]
    async fn attach_policy_looks_up_arn_first() {
        let mut iam = MockIamClient::new();
        iam.expect_find_policy_arn()
            .withf(|name| name == "SelfManageMFADevice")
            .times(1)
            .returning(|_| Ok(Some("arn:aws:iam::aws:policy/SelfManageMFADevice".to_string())));
        iam.expect_attach_user_policy()
            .withf(|user, arn| user == "alice" && arn == "arn:aws:iam::aws:policy/SelfManageMFADevice")
            .times(1)
            .returning(|_, _| Ok(()));

        let service = OnboardingService::new(Box::new(iam));
        let arn = service
            .attach_policy_by_name(&alice(), DEFAULT_POLICY_NAME)
            .await
            .unwrap();
        assert_eq!(arn, "arn:aws:iam::aws:policy/SelfManageMFADevice");
    }

    #[tokio::test]
    async fn unknown_policy_is_not_attached() {
        let mut iam = MockIamClient::new();
        iam.expect_find_policy_arn().returning(|_| Ok(None));
        iam.expect_attach_user_policy().never();

        let service = OnboardingService::new(Box::new(iam));
        let err = service
            .attach_policy_by_name(&alice(), "NoSuchPolicy")
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OnboardingError>(),
            Some(OnboardingError::PolicyNotFound { policy_name }) if policy_name == "NoSuchPolicy"
        ));
    }

    #[tokio::test]
    async fn groups_are_joined_in_order() {
        let mut iam = MockIamClient::new();
        let mut seq = Sequence::new();
        iam.expect_add_user_to_group()
            .withf(|user, group| user == "alice" && group == "devs")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        iam.expect_add_user_to_group()
            .withf(|user, group| user == "alice" && group == "ops")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let service = OnboardingService::new(Box::new(iam));
        service
            .add_user_to_groups(&alice(), &[group("devs"), group("ops")])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn group_failure_stops_the_loop() {
        let mut iam = MockIamClient::new();
        iam.expect_add_user_to_group()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("NoSuchEntity")));

        let service = OnboardingService::new(Box::new(iam));
        assert!(
            service
                .add_user_to_groups(&alice(), &[group("devs"), group("ops")])
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn console_access_uses_given_password() {
        let mut iam = MockIamClient::new();
        iam.expect_create_login_profile()
            .withf(|user, password| user == "alice" && password == "s3cret")
            .times(1)
            .returning(|_, _| Ok(()));

        let service = OnboardingService::new(Box::new(iam));
        let access = service
            .create_console_access(&alice(), &Password::new("s3cret".to_string()))
            .await
            .unwrap();
        assert_eq!(
            access,
            ConsoleAccess {
                user_name: "alice".to_string(),
                password: "s3cret".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn cli_access_returns_key() {
        let mut iam = MockIamClient::new();
        iam.expect_create_access_key().times(1).returning(|_| {
            Ok(AccessKey {
                access_key_id: "AKIAEXAMPLE".to_string(),
                secret_access_key: "wJalrXUtnFEMI".to_string(),
            })
        });

        let service = OnboardingService::new(Box::new(iam));
        let key = service.create_cli_access(&alice()).await.unwrap();
        assert_eq!(key.access_key_id, "AKIAEXAMPLE");
    }
}
