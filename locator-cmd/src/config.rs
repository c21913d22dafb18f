use locator_core::config::settings::millis;
use locator_core::config::{ConfigurationError, LocationRequest, PollConfig};
use locator_core::platform::SimulatedConfig;
use locator_core::{Accuracy, Configuration};

/// Settings the command runs with: the file (if any) plus command line overrides.
#[derive(Debug)]
pub struct ConfigCenter {
    pub id: String,
    pub request: LocationRequest,
    pub poll: PollConfig,
    pub platform: SimulatedConfig,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides {
    pub accuracy: Option<Accuracy>,
    /// 毫秒
    pub timeout: Option<u64>,
    /// 毫秒
    pub interval: Option<u64>,
}

impl ConfigCenter {
    pub async fn new(path: Option<String>, overrides: Overrides) -> Result<Self, ConfigurationError> {
        let configuration = match path {
            Some(path) => Configuration::new(path).await?,
            None => Configuration::default(),
        };
        Self::from_configuration(&configuration, overrides)
    }

    pub fn from_configuration(
        configuration: &Configuration,
        overrides: Overrides,
    ) -> Result<Self, ConfigurationError> {
        let mut request = configuration.request()?;
        let mut poll = configuration.poll()?;
        if let Some(accuracy) = overrides.accuracy {
            request.accuracy = accuracy;
        }
        request.timeout = millis(overrides.timeout, "超时时间", request.timeout)?;
        poll.interval = millis(overrides.interval, "间隔时间", poll.interval)?;
        Ok(ConfigCenter {
            id: configuration.id(),
            request,
            poll,
            platform: configuration.platform(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use locator_core::config::SettingsError;

    use super::*;

    #[test]
    fn overrides_win_over_file() {
        let configuration = Configuration::from_slice(
            br#"{"id":"page","request":{"accuracy":"Low","timeout":9000}}"#.to_vec(),
        )
        .unwrap();
        let center = ConfigCenter::from_configuration(
            &configuration,
            Overrides {
                accuracy: Some(Accuracy::Best),
                timeout: None,
                interval: Some(1000),
            },
        )
        .unwrap();
        assert_eq!(center.id, "page");
        assert_eq!(center.request.accuracy, Accuracy::Best);
        assert_eq!(center.request.timeout, Duration::from_secs(9));
        assert_eq!(center.poll.interval, Duration::from_secs(1));
    }

    #[test]
    fn zero_overrides_are_rejected_like_file_values() {
        let configuration = Configuration::default();
        for overrides in [
            Overrides {
                timeout: Some(0),
                ..Overrides::default()
            },
            Overrides {
                interval: Some(0),
                ..Overrides::default()
            },
        ] {
            let err = ConfigCenter::from_configuration(&configuration, overrides).unwrap_err();
            assert!(matches!(
                err,
                ConfigurationError::SettingsError(SettingsError::ZeroDuration(_))
            ));
        }
    }

    #[tokio::test]
    async fn no_file_uses_defaults() {
        let center = ConfigCenter::new(None, Overrides::default()).await.unwrap();
        assert_eq!(center.id, "main");
        assert_eq!(center.request, LocationRequest::default());
        assert_eq!(center.poll, PollConfig::default());
    }

    #[tokio::test]
    async fn missing_file_is_read_error() {
        let err = ConfigCenter::new(
            Some("/nonexistent/locator.json".to_string()),
            Overrides::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ConfigurationError::ReadFileError(_)));
    }
}
