use std::time::Duration;

use serde::Deserialize;

use crate::model::Accuracy;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);
/// Longer than the default request timeout so a stop never cuts a fetch short.
pub const DEFAULT_STOP_GRACE: Duration = Duration::from_secs(35);
/// Slack added on top of the request timeout when waiting for a poll loop to stop.
pub const STOP_MARGIN: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("{0}不能为0")]
    ZeroDuration(String),
}

/// 定位请求参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationRequest {
    pub accuracy: Accuracy,
    pub timeout: Duration,
}

impl Default for LocationRequest {
    fn default() -> Self {
        LocationRequest {
            accuracy: Accuracy::Medium,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl LocationRequest {
    /// Short request used to probe whether positioning works at all.
    pub fn probe() -> Self {
        LocationRequest {
            accuracy: Accuracy::Medium,
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

/// 轮询参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollConfig {
    pub interval: Duration,
    pub probe_timeout: Duration,
    pub stop_grace: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        PollConfig {
            interval: DEFAULT_INTERVAL,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            stop_grace: DEFAULT_STOP_GRACE,
        }
    }
}

/// 配置文件中的请求段, 时间单位为毫秒
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestConf {
    pub accuracy: Option<Accuracy>,
    pub timeout: Option<u64>,
}

/// 配置文件中的轮询段, 时间单位为毫秒
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollConf {
    pub interval: Option<u64>,
    pub probe_timeout: Option<u64>,
    pub stop_grace: Option<u64>,
}

pub fn millis(value: Option<u64>, name: &str, default: Duration) -> Result<Duration, SettingsError> {
    match value {
        None => Ok(default),
        Some(0) => Err(SettingsError::ZeroDuration(name.to_string())),
        Some(ms) => Ok(Duration::from_millis(ms)),
    }
}

impl TryFrom<RequestConf> for LocationRequest {
    type Error = SettingsError;

    fn try_from(value: RequestConf) -> Result<Self, Self::Error> {
        Ok(LocationRequest {
            accuracy: value.accuracy.unwrap_or_default(),
            timeout: millis(value.timeout, "超时时间", DEFAULT_TIMEOUT)?,
        })
    }
}

impl TryFrom<PollConf> for PollConfig {
    type Error = SettingsError;

    fn try_from(value: PollConf) -> Result<Self, Self::Error> {
        Ok(PollConfig {
            interval: millis(value.interval, "间隔时间", DEFAULT_INTERVAL)?,
            probe_timeout: millis(value.probe_timeout, "探测超时时间", DEFAULT_PROBE_TIMEOUT)?,
            stop_grace: millis(value.stop_grace, "停止等待时间", DEFAULT_STOP_GRACE)?,
        })
    }
}
