use crate::application::builders::session_builder::SessionSettings;
use crate::domain::entities::{AccessKey, ConsoleAccess, IamGroup, Profiles};
use anyhow::{Context, Result, anyhow};
use colored::Colorize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONSOLE_ACCESS_FILE: &str = "console-access";
pub const CREDENTIALS_FILE: &str = "credentials";

/// Appends generated access details to local files
pub struct CredentialFiles {
    dir: PathBuf,
}

impl CredentialFiles {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn console_access_path(&self) -> PathBuf {
        self.dir.join(CONSOLE_ACCESS_FILE)
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.dir.join(CREDENTIALS_FILE)
    }

    pub fn append_console_access(&self, profile: &str, access: &ConsoleAccess) -> Result<PathBuf> {
        let entry = format!(
            "Link: [{}]\nUser: {}\nPassword: {}\n",
            profile, access.user_name, access.password
        );
        let path = self.console_access_path();
        append(&path, &entry)?;
        Ok(path)
    }

    /// Writes the key as a profile section in AWS credentials format
    pub fn append_cli_credentials(&self, profile: &str, key: &AccessKey) -> Result<PathBuf> {
        let entry = format!(
            "[{}]\naws_access_key_id = {}\naws_secret_access_key = {}\n",
            profile, key.access_key_id, key.secret_access_key
        );
        let path = self.credentials_path();
        append(&path, &entry)?;
        Ok(path)
    }
}

fn append(path: &Path, content: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open '{}'", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write '{}'", path.display()))?;
    debug!(path = %path.display(), "Appended entry");
    Ok(())
}

/// Numbered profile menu, one line per name in the given order
pub fn render_profile_menu(names: &[String], profiles: &Profiles) -> Vec<String> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let config = profiles.get(name);
            let region = config.and_then(|c| c.region()).unwrap_or("-");
            let endpoint = config.and_then(|c| c.endpoint_url()).unwrap_or("-");
            format!(
                "[{}]. Profile: {}, Region: {}, Endpoint URL: {}",
                i + 1,
                name,
                region,
                endpoint
            )
        })
        .collect()
}

pub fn render_group_menu(groups: &[IamGroup]) -> Vec<String> {
    groups
        .iter()
        .enumerate()
        .map(|(i, group)| format!("{}. {}", i + 1, group.name))
        .collect()
}

pub fn render_session(settings: &SessionSettings, region: Option<&str>, endpoint: Option<&str>) -> String {
    format!(
        "{}\nProfile: {}\nRegion: {}\nEndpoint URL: {}",
        "Session:".cyan(),
        settings.profile,
        region.unwrap_or("-"),
        endpoint.unwrap_or("default")
    )
}

/// Pretty JSON of all profiles, sorted by name
pub fn profiles_to_json(names: &[String], profiles: &Profiles) -> Result<String> {
    let ordered: Vec<_> = names.iter().filter_map(|name| profiles.get(name)).collect();
    serde_json::to_string_pretty(&ordered).map_err(|e| anyhow!("Failed to format JSON: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ProfileConfig;
    use std::fs;

    fn sample_profiles() -> Profiles {
        let mut dev = ProfileConfig::new("dev");
        dev.set("region", "us-east-1");
        let mut prod = ProfileConfig::new("prod");
        prod.set("region", "us-west-2");
        prod.set("endpoint_url", "http://x");
        [dev, prod].into_iter().map(|p| (p.name.clone(), p)).collect()
    }

    #[test]
    fn credentials_are_appended() {
        let dir = tempfile::tempdir().unwrap();
        let files = CredentialFiles::new(dir.path());
        let key = AccessKey {
            access_key_id: "AKIA1".to_string(),
            secret_access_key: "secret1".to_string(),
        };

        files.append_cli_credentials("dev", &key).unwrap();
        let path = files.append_cli_credentials("prod", &key).unwrap();

        assert_eq!(
            fs::read_to_string(path).unwrap(),
            "[dev]\naws_access_key_id = AKIA1\naws_secret_access_key = secret1\n\
             [prod]\naws_access_key_id = AKIA1\naws_secret_access_key = secret1\n"
        );
    }

    #[test]
    fn console_access_format() {
        let dir = tempfile::tempdir().unwrap();
        let files = CredentialFiles::new(dir.path());
        let access = ConsoleAccess {
            user_name: "alice".to_string(),
            password: "pw".to_string(),
        };

        let path = files.append_console_access("dev", &access).unwrap();
        assert_eq!(path, dir.path().join(CONSOLE_ACCESS_FILE));
        assert_eq!(
            fs::read_to_string(path).unwrap(),
            "Link: [dev]\nUser: alice\nPassword: pw\n"
        );
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let files = CredentialFiles::new(dir.path().join("nope"));
        let access = ConsoleAccess {
            user_name: "alice".to_string(),
            password: "pw".to_string(),
        };
        assert!(files.append_console_access("dev", &access).is_err());
    }

    #[test]
    fn profile_menu_is_numbered_from_one() {
        let profiles = sample_profiles();
        let names = vec!["dev".to_string(), "prod".to_string()];
        let menu = render_profile_menu(&names, &profiles);
        assert_eq!(
            menu,
            [
                "[1]. Profile: dev, Region: us-east-1, Endpoint URL: -",
                "[2]. Profile: prod, Region: us-west-2, Endpoint URL: http://x",
            ]
        );
    }

    #[test]
    fn json_follows_given_order() {
        let profiles = sample_profiles();
        let names = vec!["prod".to_string(), "dev".to_string()];
        let json: serde_json::Value =
            serde_json::from_str(&profiles_to_json(&names, &profiles).unwrap()).unwrap();
        assert_eq!(json[0]["name"], "prod");
        assert_eq!(json[0]["attributes"]["endpoint_url"], "http://x");
        assert_eq!(json[1]["name"], "dev");

        let text = profiles_to_json(&names, &profiles).unwrap();
        assert!(text.find("\"region\"").unwrap() < text.find("\"endpoint_url\"").unwrap());
    }
}
