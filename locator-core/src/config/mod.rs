use serde::Deserialize;
use tokio::fs;

use crate::platform::SimulatedConfig;

pub mod settings;

pub use settings::{LocationRequest, PollConf, PollConfig, RequestConf, SettingsError};

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Failed to read file: {0}")]
    ReadFileError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseJsonError(#[from] serde_json::Error),
    #[error("Invalid settings: {0}")]
    SettingsError(#[from] SettingsError),
}

#[derive(Debug, Default)]
pub struct Configuration {
    pub profile: Profile,
}

impl Configuration {
    pub async fn new(path: String) -> Result<Self, ConfigurationError> {
        let bytes = fs::read(path.as_str()).await?;
        Self::from_slice(bytes)
    }

    pub fn from_slice(mut bytes: Vec<u8>) -> Result<Self, ConfigurationError> {
        // strip UTF-8 BOM (EF BB BF)
        if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
            bytes.drain(..3);
        }
        while matches!(bytes.first(), Some(b' ' | b'\n' | b'\r' | b'\t')) {
            bytes.drain(..1);
        }
        let profile = serde_json::from_slice::<Profile>(&bytes)?;
        Ok(Self { profile })
    }

    pub fn id(&self) -> String {
        self.profile
            .id
            .clone()
            .unwrap_or_else(|| String::from("main"))
    }

    pub fn request(&self) -> Result<LocationRequest, ConfigurationError> {
        let conf = self.profile.request.clone().unwrap_or_default();
        Ok(LocationRequest::try_from(conf)?)
    }

    pub fn poll(&self) -> Result<PollConfig, ConfigurationError> {
        let conf = self.profile.poll.clone().unwrap_or_default();
        Ok(PollConfig::try_from(conf)?)
    }

    pub fn platform(&self) -> SimulatedConfig {
        self.profile.platform.clone().unwrap_or_default()
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Option<String>,
    pub desc: Option<String>,
    pub request: Option<RequestConf>,
    pub poll: Option<PollConf>,
    pub platform: Option<SimulatedConfig>,
}
