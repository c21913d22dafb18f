//! Location provider: permission check, last-known fallback to a fresh fix,
//! timeout handling and error classification.
//!
//! Nothing here fails toward the caller; every failure path ends up as the
//! error side of a [`CoordinateResult`].

mod error;

use std::sync::Arc;
use std::time::Duration;

use tokio::time;
use tracing::{debug, warn};

pub use error::LocationError;

use crate::config::LocationRequest;
use crate::model::{Accuracy, CoordinateResult, Fix};
use crate::platform::{Geolocation, PermissionStatus, Permissions, Platform, PlatformError};

#[derive(Clone)]
pub struct LocationProvider {
    platform: Arc<dyn Platform>,
    probe: LocationRequest,
}

impl LocationProvider {
    pub fn new(platform: Arc<dyn Platform>) -> Self {
        LocationProvider {
            platform,
            probe: LocationRequest::probe(),
        }
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.set_probe_timeout(timeout);
        self
    }

    pub fn set_probe_timeout(&mut self, timeout: Duration) {
        self.probe.timeout = timeout;
    }

    pub async fn get_current_location(&self, request: &LocationRequest) -> CoordinateResult {
        let status = match self.platform.request().await {
            Ok(status) => status,
            Err(err) => {
                warn!("请求定位权限失败: {}", err);
                return LocationError::PermissionSubsystem(err.to_string()).into();
            }
        };
        if status != PermissionStatus::Granted {
            warn!("定位权限未授予: {}", status);
            return LocationError::PermissionDenied.into();
        }
        match self.locate(request.accuracy, request.timeout).await {
            Ok(Some(fix)) => fix.into(),
            Ok(None) => LocationError::Unavailable.into(),
            Err(PlatformError::NotSupported) => LocationError::Unsupported.into(),
            Err(err) => {
                warn!("定位失败: {}", err);
                LocationError::Provider(err.to_string()).into()
            }
        }
    }

    /// Whether a fix can be obtained right now. Never prompts for permission.
    pub async fn is_positioning_available(&self) -> bool {
        match self.platform.check_status().await {
            Ok(PermissionStatus::Granted) => {}
            Ok(status) => {
                debug!("定位权限状态: {}", status);
                return false;
            }
            Err(err) => {
                debug!("检查定位权限失败: {}", err);
                return false;
            }
        }
        match self.locate(self.probe.accuracy, self.probe.timeout).await {
            Ok(fix) => fix.is_some(),
            Err(err) => {
                debug!("定位探测失败: {}", err);
                false
            }
        }
    }

    async fn locate(
        &self,
        accuracy: Accuracy,
        timeout: Duration,
    ) -> Result<Option<Fix>, PlatformError> {
        if let Some(fix) = self.platform.last_known_location().await? {
            debug!("使用缓存位置: {}, {}", fix.latitude, fix.longitude);
            return Ok(Some(fix));
        }
        match time::timeout(timeout, self.platform.current_location(accuracy, timeout)).await {
            Ok(fix) => fix,
            Err(_) => {
                debug!("定位超时: {:?}", timeout);
                Ok(None)
            }
        }
    }
}
