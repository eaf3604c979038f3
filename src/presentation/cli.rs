use crate::application::builders::session_builder::SessionBuilder;
use crate::application::selector::ProfileSelector;
use crate::application::services::{DEFAULT_POLICY_NAME, OnboardingService};
use crate::infrastructure::config::ConfigStore;
use crate::infrastructure::iam_client::AwsIamClient;
use crate::infrastructure::output::{self, CredentialFiles};
use crate::presentation::terminal::Terminal;
use crate::presentation::wizard::Wizard;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// CLI configuration for iam-onboard
#[derive(Parser, Debug)]
#[command(name = "iam-onboard", version)]
#[command(
    about = "Onboard a new IAM user: create it, attach a policy, join groups and hand out console and CLI access",
    long_about = None
)]
pub struct Cli {
    /// AWS config file to read profiles from [default: ~/.aws/config]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Managed policy attached to the new user
    #[arg(short, long, default_value = DEFAULT_POLICY_NAME)]
    pub policy: String,

    /// Directory receiving the `console-access` and `credentials` files
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Print the profiles as JSON and exit
    #[arg(long)]
    pub list: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Ok(ConfigStore::default_path()?),
        }
    }

    pub async fn run(&self) -> Result<()> {
        let store = ConfigStore::load(self.config_path()?)?;

        if self.list {
            let names = ProfileSelector::ordered_names(store.profiles());
            println!("{}", output::profiles_to_json(&names, store.profiles())?);
            return Ok(());
        }

        let mut wizard = Wizard::new(Terminal::stdio());
        let profile = wizard.select_profile(&store)?;
        let config = store
            .get(&profile)
            .with_context(|| format!("Profile {profile} disappeared from the config"))?;

        let settings = SessionBuilder::from_profile(config)?.build();
        info!(profile = %settings.profile, sdk_profile = %settings.sdk_profile, "Opening AWS session");
        let client = AwsIamClient::connect(&settings).await;
        wizard.show_session(&settings, client.region(), client.endpoint_url())?;

        let service = OnboardingService::new(Box::new(client));
        let files = CredentialFiles::new(&self.output_dir);
        let report = wizard
            .onboard(&service, &settings.profile, &self.policy, &files)
            .await?;

        info!(
            user_name = %report.user_name,
            policy_arn = %report.policy_arn,
            groups = ?report.groups,
            console_access_file = %report.console_access_file.display(),
            credentials_file = %report.credentials_file.display(),
            "Onboarding finished"
        );
        Ok(())
    }
}
