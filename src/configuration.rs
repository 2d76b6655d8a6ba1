use config::{Config, File};
use serde::Deserialize;
use std::convert::{TryFrom, TryInto};
use std::env::var;
use std::fmt;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub remote: RemoteSettings,
}

/// Connection details for the hosted data/auth service.
#[derive(Debug, Deserialize, Clone)]
pub struct RemoteSettings {
    pub base_url: String,
    pub publishable_key: String,
    pub timeout_seconds: u64,
}

pub enum Environment {
    Local,
    CI,
    Production,
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let mut settings = Config::default();
    let base_path = std::env::current_dir().expect("failed to determine current directory");
    let configuration_directory = base_path.join("configuration");

    settings.merge(File::from(configuration_directory.join("base")).required(true))?;

    let environment: Environment = var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("failed to parse APP_ENVIRONMENT");

    settings
        .merge(File::from(configuration_directory.join(environment.as_str())).required(true))?;

    settings.merge(config::Environment::with_prefix("app").separator("__"))?;

    settings.try_into()
}

impl RemoteSettings {
    /// Root of the table API, eg. `https://x.example.co/rest/v1`.
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.base_url.trim_end_matches('/'))
    }

    /// Root of the auth API, eg. `https://x.example.co/auth/v1`.
    pub fn auth_url(&self) -> String {
        format!("{}/auth/v1", self.base_url.trim_end_matches('/'))
    }
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::CI => "ci",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "ci" => Ok(Self::CI),
            "production" => Ok(Self::Production),
            other => Err(format!("{} is not a supported environment", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_roots_tolerate_trailing_slash() {
        let settings = RemoteSettings {
            base_url: "https://store.example.co/".to_string(),
            publishable_key: "anon".to_string(),
            timeout_seconds: 10,
        };
        assert_eq!(settings.rest_url(), "https://store.example.co/rest/v1");
        assert_eq!(settings.auth_url(), "https://store.example.co/auth/v1");
    }

    #[test]
    fn unknown_environment_is_rejected() {
        assert!(Environment::try_from("staging".to_string()).is_err());
        assert!(Environment::try_from("Production".to_string()).is_ok());
    }
}
