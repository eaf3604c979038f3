use crate::domain::entities::{ProfileConfig, Profiles};
use crate::domain::errors::OnboardingError;
use regex::Regex;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

/// Location of the shared AWS config file relative to the home directory
const AWS_CONFIG_FILE: &str = ".aws/config";

static SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\[([^\]]+)\]\s*$").expect("section header regex"));

static KEY_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([^\s=#;\[]+)\s*=\s*(\S+)\s*$").expect("key/value regex")
});

/// Profiles parsed from an INI-like AWS config file.
///
/// Built once by [`ConfigStore::load`] and read-only afterwards.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    profiles: Profiles,
}

impl ConfigStore {
    /// `$HOME/.aws/config`
    pub fn default_path() -> Result<PathBuf, OnboardingError> {
        home::home_dir()
            .map(|home| home.join(AWS_CONFIG_FILE))
            .ok_or(OnboardingError::HomeDirUnavailable)
    }

    /// Reads and parses the config file at `path`.
    ///
    /// Any open or read failure is fatal: no partially parsed store is returned.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, OnboardingError> {
        let path = path.as_ref().to_path_buf();

        let file = File::open(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => OnboardingError::ConfigNotFound { path: path.clone() },
            _ => OnboardingError::ConfigRead {
                path: path.clone(),
                source,
            },
        })?;

        let profiles = Self::parse(BufReader::new(file)).map_err(|source| {
            OnboardingError::ConfigRead {
                path: path.clone(),
                source,
            }
        })?;

        debug!(path = %path.display(), profiles = profiles.len(), "Loaded AWS config");
        Ok(Self { path, profiles })
    }

    /// Scans `reader` line by line into profiles.
    ///
    /// Lines that are neither a section header nor a `key = value` pair are
    /// skipped, as are pairs that appear before the first header. Bytes that
    /// are not valid UTF-8 are replaced rather than failing the scan; only
    /// I/O errors are returned.
    pub fn parse(mut reader: impl BufRead) -> io::Result<Profiles> {
        let mut profiles = Profiles::new();
        let mut current: Option<String> = None;
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\r', '\n']);

            if let Some(caps) = SECTION_HEADER.captures(line) {
                let name = caps[1].trim().to_string();
                if name.is_empty() {
                    current = None;
                    continue;
                }
                profiles.insert(name.clone(), ProfileConfig::new(name.clone()));
                current = Some(name);
            } else if let Some(caps) = KEY_VALUE.captures(line) {
                let profile = current.as_ref().and_then(|name| profiles.get_mut(name));
                if let Some(profile) = profile {
                    profile.set(caps[1].trim(), caps[2].trim());
                }
            }
        }

        Ok(profiles)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn profiles(&self) -> &Profiles {
        &self.profiles
    }

    pub fn get(&self, name: &str) -> Option<&ProfileConfig> {
        self.profiles.get(name)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
