use crate::application::builders::session_builder::SessionSettings;
use crate::application::selector::{GroupChoice, GroupSelection, ProfileSelector};
use crate::application::services::OnboardingService;
use crate::domain::entities::IamGroup;
use crate::domain::errors::OnboardingError;
use crate::domain::value_objects::UserName;
use crate::infrastructure::config::ConfigStore;
use crate::infrastructure::output::{self, CredentialFiles};
use crate::infrastructure::password::generate_password;
use crate::presentation::terminal::Terminal;

use anyhow::Result;
use colored::Colorize;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::warn;

/// What a finished onboarding produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingReport {
    pub user_name: String,
    pub policy_arn: String,
    pub groups: Vec<String>,
    pub console_access_file: PathBuf,
    pub credentials_file: PathBuf,
}

/// Interactive onboarding flow over any terminal
pub struct Wizard<R, W> {
    terminal: Terminal<R, W>,
}

impl<R: BufRead, W: Write> Wizard<R, W> {
    pub fn new(terminal: Terminal<R, W>) -> Self {
        Self { terminal }
    }

    /// Lists profiles in sorted order and resolves a single numeric choice.
    ///
    /// One shot: invalid input or closed input fails with `InvalidChoice`.
    pub fn select_profile(&mut self, store: &ConfigStore) -> Result<String> {
        if store.is_empty() {
            return Err(OnboardingError::NoProfiles {
                path: store.path().to_path_buf(),
            }
            .into());
        }
        let names = ProfileSelector::ordered_names(store.profiles());

        self.terminal.say(
            format!("Profiles available in {}:", store.path().display()).cyan(),
        )?;
        for line in output::render_profile_menu(&names, store.profiles()) {
            self.terminal.say(line)?;
        }

        let raw = self
            .terminal
            .ask("Choose the number of the AWS profile: ")?
            .unwrap_or_default();
        Ok(ProfileSelector::resolve(&names, &raw)?)
    }

    pub fn show_session(
        &mut self,
        settings: &SessionSettings,
        region: Option<&str>,
        endpoint: Option<&str>,
    ) -> Result<()> {
        self.terminal
            .say(output::render_session(settings, region, endpoint))
    }

    pub fn ask_user_name(&mut self) -> Result<UserName> {
        let raw = self
            .terminal
            .ask("Enter the name of the user to create: ")?
            .unwrap_or_default();
        Ok(UserName::new(&raw)?)
    }

    /// Menu loop: pick groups one number at a time, `0` (or closed input) to finish.
    ///
    /// Invalid numbers are reported and asked again.
    pub fn select_groups(&mut self, groups: &[IamGroup]) -> Result<Vec<IamGroup>> {
        self.terminal.say("Existing groups:".cyan())?;
        for line in output::render_group_menu(groups) {
            self.terminal.say(line)?;
        }

        let mut selection = GroupSelection::new();
        while let Some(raw) = self
            .terminal
            .ask("Choose a group number to add the user to (0 to finish): ")?
        {
            match GroupSelection::interpret(groups.len(), &raw) {
                Ok(GroupChoice::Done) => break,
                Ok(GroupChoice::Pick(index)) => {
                    if !selection.add(index) {
                        self.terminal
                            .say(format!("Group {} already selected", groups[index].name).yellow())?;
                    }
                }
                Err(err) => self.terminal.say(err.to_string().red())?,
            }
        }

        Ok(selection
            .picked()
            .iter()
            .map(|&index| groups[index].clone())
            .collect())
    }

    /// Runs every IAM step for one new user, writing access files along the way
    pub async fn onboard(
        &mut self,
        service: &OnboardingService,
        profile: &str,
        policy_name: &str,
        files: &CredentialFiles,
    ) -> Result<OnboardingReport> {
        let user_name = self.ask_user_name()?;
        service.create_user(&user_name).await?;
        self.terminal
            .say(format!("User created: {user_name}").green())?;

        let policy_arn = service.attach_policy_by_name(&user_name, policy_name).await?;
        self.terminal
            .say(format!("Policy {policy_name} attached to {user_name}").green())?;

        let available = service.list_groups().await?;
        let groups = if available.is_empty() {
            warn!("No IAM groups available");
            self.terminal
                .say("No IAM groups found, skipping group membership".yellow())?;
            Vec::new()
        } else {
            self.select_groups(&available)?
        };
        service.add_user_to_groups(&user_name, &groups).await?;
        for group in &groups {
            self.terminal
                .say(format!("User {user_name} added to group {}", group.name).green())?;
        }

        let access = service
            .create_console_access(&user_name, &generate_password())
            .await?;
        let console_access_file = files.append_console_access(profile, &access)?;
        self.terminal.say(
            format!(
                "Console access created for {user_name}, written to '{}'",
                console_access_file.display()
            )
            .green(),
        )?;

        let key = service.create_cli_access(&user_name).await?;
        let credentials_file = files.append_cli_credentials(profile, &key)?;
        self.terminal.say(
            format!(
                "CLI access created for {user_name}, written to '{}'",
                credentials_file.display()
            )
            .green(),
        )?;

        self.terminal.say("Onboarding completed successfully!".bold())?;

        Ok(OnboardingReport {
            user_name: user_name.to_string(),
            policy_arn,
            groups: groups.into_iter().map(|group| group.name).collect(),
            console_access_file,
            credentials_file,
        })
    }

    #[cfg(test)]
    pub fn into_terminal(self) -> Terminal<R, W> {
        self.terminal
    }
}
