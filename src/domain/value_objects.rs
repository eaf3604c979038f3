use crate::domain::errors::OnboardingError;
use http::Uri;
use std::fmt;

const USER_NAME_MAX_LEN: usize = 64;

/// Represents a validated IAM user name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    /// Creates a new UserName with validation
    ///
    /// # Arguments
    /// * `raw` - The name as typed by the operator; surrounding whitespace is dropped
    ///
    /// # Returns
    /// * `Ok(UserName)` - Name IAM will accept
    /// * `Err(OnboardingError::InvalidUserName)` - If the name is empty, too long or has bad characters
    pub fn new(raw: &str) -> Result<Self, OnboardingError> {
        let name = raw.trim();
        let reject = |reason| OnboardingError::InvalidUserName {
            name: name.to_string(),
            reason,
        };

        if name.is_empty() {
            return Err(reject("name cannot be empty"));
        }
        if name.chars().count() > USER_NAME_MAX_LEN {
            return Err(reject("name is longer than 64 characters"));
        }
        if !name.chars().all(is_user_name_char) {
            return Err(reject("only letters, digits and +=,.@_- are allowed"));
        }
        Ok(UserName(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_user_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "+=,.@_-".contains(c)
}

/// Represents a validated custom endpoint for the IAM API
#[derive(Debug, Clone)]
pub struct EndpointUrl(String);

impl EndpointUrl {
    /// Creates a new EndpointUrl with validation
    ///
    /// # Arguments
    /// * `url` - The `endpoint_url` value from the profile
    ///
    /// # Returns
    /// * `Ok(EndpointUrl)` - Absolute http(s) URL
    /// * `Err(OnboardingError::InvalidEndpoint)` - If the URL does not parse or is not http(s)
    pub fn new(url: &str) -> Result<Self, OnboardingError> {
        let invalid = |reason: String| OnboardingError::InvalidEndpoint {
            url: url.to_string(),
            reason,
        };

        let uri = url.parse::<Uri>().map_err(|e| invalid(e.to_string()))?;
        match uri.scheme_str() {
            Some("http") | Some("https") => {}
            _ => return Err(invalid("scheme must be http or https".to_string())),
        }
        if uri.host().is_none() {
            return Err(invalid("missing host".to_string()));
        }
        Ok(EndpointUrl(url.to_string()))
    }

    /// Returns the URL as written in the profile
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Temporary console password, reset on first login
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(secret: String) -> Self {
        Password(secret)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_name_is_trimmed() {
        let name = UserName::new("  alice.smith@corp \n").unwrap();
        assert_eq!(name.as_str(), "alice.smith@corp");
    }

    #[test]
    fn user_name_rejects_bad_input() {
        let too_long = "a".repeat(65);
        for raw in ["", "   ", "two words", "semi;colon", too_long.as_str()] {
            assert!(
                matches!(UserName::new(raw), Err(OnboardingError::InvalidUserName { .. })),
                "accepted {raw:?}"
            );
        }
        assert!(UserName::new(&"a".repeat(64)).is_ok());
    }

    #[test]
    fn endpoint_requires_http_scheme_and_host() {
        let local = EndpointUrl::new("http://localhost:4566").unwrap();
        assert_eq!(local.as_str(), "http://localhost:4566");
        assert!(EndpointUrl::new("https://iam.amazonaws.com").is_ok());
        assert!(EndpointUrl::new("localhost:4566").is_err());
        assert!(EndpointUrl::new("ftp://example.com").is_err());
        assert!(EndpointUrl::new("not a url").is_err());
    }

    #[test]
    fn password_debug_hides_secret() {
        let password = Password::new("hunter2".to_string());
        assert_eq!(format!("{password:?}"), "Password(***)");
        assert_eq!(password.expose(), "hunter2");
    }
}
