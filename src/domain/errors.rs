use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures the onboarding flow reports to the operator
#[derive(Debug, Error)]
pub enum OnboardingError {
    #[error("AWS config file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to read AWS config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not determine the home directory; pass --config explicitly")]
    HomeDirUnavailable,

    #[error("No profiles found in {}", path.display())]
    NoProfiles { path: PathBuf },

    #[error("Invalid choice: '{input}' (expected a number between 1 and {max})")]
    InvalidChoice { input: String, max: usize },

    #[error("Invalid user name '{name}': {reason}")]
    InvalidUserName { name: String, reason: &'static str },

    #[error("Invalid endpoint URL '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("Policy not found: {policy_name}")]
    PolicyNotFound { policy_name: String },
}

impl OnboardingError {
    pub fn invalid_choice(input: &str, max: usize) -> Self {
        OnboardingError::InvalidChoice {
            input: input.trim().to_string(),
            max,
        }
    }
}
