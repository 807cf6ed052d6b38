//! src/configuration.rs
use crate::domain::SheetLayout;
use crate::form_client::RsvpClient;
use crate::sheets_client::SheetsClient;
use anyhow::Context;
use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub sheets: SheetsSettings,
    pub form: FormSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

#[derive(serde::Deserialize, Clone)]
pub struct SheetsSettings {
    pub base_url: String,
    pub spreadsheet_id: String,
    pub sheet_name: String,
    pub authorization_token: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
    pub layout: SheetLayout,
}

impl SheetsSettings {
    pub fn client(self) -> Result<SheetsClient, anyhow::Error> {
        let timeout = self.timeout();
        SheetsClient::new(
            &self.base_url,
            self.spreadsheet_id,
            self.sheet_name,
            self.authorization_token,
            timeout,
        )
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }
}

/// Settings for the RSVP form, both the landing page and [`RsvpClient`].
#[derive(serde::Deserialize, Clone)]
pub struct FormSettings {
    /// Where the form client posts submissions.
    pub endpoint: String,
    /// Marker the guest's email must contain, e.g. the company domain.
    pub required_email_domain: Option<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl FormSettings {
    pub fn client(self) -> Result<RsvpClient, anyhow::Error> {
        let endpoint = reqwest::Url::parse(&self.endpoint)
            .with_context(|| format!("{} is not a valid RSVP endpoint.", self.endpoint))?;
        let timeout = std::time::Duration::from_millis(self.timeout_milliseconds);
        RsvpClient::new(endpoint, self.required_email_domain, timeout)
            .context("Failed to build the RSVP form client.")
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment, default to `local` if unspecified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT.");
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.yaml"),
        ))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // E.g. `APP_APPLICATION__PORT=5001` would set `Settings.application.port`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
