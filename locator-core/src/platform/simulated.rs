use std::time::Duration;

use rand::Rng;
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time;
use tracing::debug;

use crate::model::{Accuracy, Fix};

use super::{Geolocation, PermissionStatus, Permissions, PlatformError};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FixConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
}

impl From<FixConfig> for Fix {
    fn from(value: FixConfig) -> Self {
        let fix = Fix::new(value.latitude, value.longitude);
        match value.accuracy {
            Some(meters) => fix.with_accuracy(meters),
            None => fix,
        }
    }
}

/// 模拟平台配置, 时间单位为毫秒
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedConfig {
    pub permission: Option<PermissionStatus>,
    pub permission_failure: Option<String>,
    pub supported: Option<bool>,
    pub last_known: Option<FixConfig>,
    pub fix: Option<FixConfig>,
    pub fix_delay: Option<u64>,
    pub jitter: Option<f64>,
    pub failure: Option<String>,
}

/// In-process stand-in for a device positioning stack.
///
/// A successful fresh fix is cached and served as the last-known location on
/// later requests, the way mobile platforms behave.
pub struct SimulatedPlatform {
    permission: PermissionStatus,
    permission_failure: Option<String>,
    supported: bool,
    last_known: Mutex<Option<Fix>>,
    fix: Option<FixConfig>,
    fix_delay: Duration,
    jitter: f64,
    failure: Option<String>,
}

impl SimulatedPlatform {
    pub fn new(cfg: SimulatedConfig) -> Self {
        SimulatedPlatform {
            permission: cfg.permission.unwrap_or(PermissionStatus::Granted),
            permission_failure: cfg.permission_failure,
            supported: cfg.supported.unwrap_or(true),
            last_known: Mutex::new(cfg.last_known.map(Fix::from)),
            fix: cfg.fix,
            fix_delay: Duration::from_millis(cfg.fix_delay.unwrap_or(0)),
            jitter: cfg.jitter.unwrap_or(0.0).abs(),
            failure: cfg.failure,
        }
    }

    fn permission(&self) -> Result<PermissionStatus, PlatformError> {
        match &self.permission_failure {
            Some(msg) => Err(PlatformError::Failure(msg.clone())),
            None => Ok(self.permission),
        }
    }

    fn ensure_supported(&self) -> Result<(), PlatformError> {
        if self.supported {
            Ok(())
        } else {
            Err(PlatformError::NotSupported)
        }
    }

    fn jittered(&self, base: FixConfig) -> Fix {
        let mut fix = Fix::from(base);
        if self.jitter > 0.0 {
            let mut rng = rand::rng();
            fix.latitude += rng.random_range(-self.jitter..=self.jitter);
            fix.longitude += rng.random_range(-self.jitter..=self.jitter);
        }
        fix
    }
}

#[async_trait::async_trait]
impl Permissions for SimulatedPlatform {
    async fn check_status(&self) -> Result<PermissionStatus, PlatformError> {
        self.permission()
    }

    async fn request(&self) -> Result<PermissionStatus, PlatformError> {
        self.permission()
    }
}

#[async_trait::async_trait]
impl Geolocation for SimulatedPlatform {
    async fn last_known_location(&self) -> Result<Option<Fix>, PlatformError> {
        self.ensure_supported()?;
        Ok(*self.last_known.lock().await)
    }

    async fn current_location(
        &self,
        accuracy: Accuracy,
        timeout: Duration,
    ) -> Result<Option<Fix>, PlatformError> {
        self.ensure_supported()?;
        debug!(
            "模拟定位: 精度{}, 超时{:?}, 延迟{:?}",
            accuracy, timeout, self.fix_delay
        );
        time::sleep(self.fix_delay).await;
        if let Some(msg) = &self.failure {
            return Err(PlatformError::Failure(msg.clone()));
        }
        let Some(base) = self.fix else {
            return Ok(None);
        };
        let fix = self.jittered(base);
        *self.last_known.lock().await = Some(fix);
        Ok(Some(fix))
    }
}
