use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::time;

use crate::model::{Accuracy, Fix};
use crate::platform::{Geolocation, PermissionStatus, Permissions, PlatformError};
use crate::view::LocationView;

pub(crate) struct FakePlatform {
    status: PermissionStatus,
    permission_error: Option<String>,
    last_known: Option<Fix>,
    fresh: Option<Fix>,
    delay: Duration,
    error: Option<PlatformError>,
    fresh_error: Option<PlatformError>,
    panic: bool,
    prompts: AtomicUsize,
    cached_calls: AtomicUsize,
    fresh_calls: AtomicUsize,
    last_accuracy: Mutex<Option<Accuracy>>,
}

impl FakePlatform {
    pub(crate) fn with_status(status: PermissionStatus) -> Self {
        FakePlatform {
            status,
            permission_error: None,
            last_known: None,
            fresh: None,
            delay: Duration::ZERO,
            error: None,
            fresh_error: None,
            panic: false,
            prompts: AtomicUsize::new(0),
            cached_calls: AtomicUsize::new(0),
            fresh_calls: AtomicUsize::new(0),
            last_accuracy: Mutex::new(None),
        }
    }

    pub(crate) fn granted() -> Self {
        Self::with_status(PermissionStatus::Granted)
    }

    pub(crate) fn with_last_known(mut self, latitude: f64, longitude: f64) -> Self {
        self.last_known = Some(Fix::new(latitude, longitude));
        self
    }

    pub(crate) fn with_fresh(mut self, latitude: f64, longitude: f64) -> Self {
        self.fresh = Some(Fix::new(latitude, longitude));
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn with_error(mut self, error: PlatformError) -> Self {
        self.error = Some(error);
        self
    }

    /// Fails only the fresh request; the cache read still succeeds.
    pub(crate) fn with_fresh_error(mut self, error: PlatformError) -> Self {
        self.fresh_error = Some(error);
        self
    }

    pub(crate) fn with_permission_error(mut self, msg: &str) -> Self {
        self.permission_error = Some(msg.to_string());
        self
    }

    pub(crate) fn panicking(mut self) -> Self {
        self.panic = true;
        self
    }

    pub(crate) fn prompts(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }

    /// Number of positioning attempts, one per poll.
    pub(crate) fn cached_calls(&self) -> usize {
        self.cached_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn fresh_calls(&self) -> usize {
        self.fresh_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_accuracy(&self) -> Option<Accuracy> {
        *self.last_accuracy.lock().unwrap()
    }

    fn status(&self) -> Result<PermissionStatus, PlatformError> {
        match &self.permission_error {
            Some(msg) => Err(PlatformError::Failure(msg.clone())),
            None => Ok(self.status),
        }
    }
}

#[async_trait::async_trait]
impl Permissions for FakePlatform {
    async fn check_status(&self) -> Result<PermissionStatus, PlatformError> {
        self.status()
    }

    async fn request(&self) -> Result<PermissionStatus, PlatformError> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        self.status()
    }
}

#[async_trait::async_trait]
impl Geolocation for FakePlatform {
    async fn last_known_location(&self) -> Result<Option<Fix>, PlatformError> {
        self.cached_calls.fetch_add(1, Ordering::SeqCst);
        if self.panic {
            panic!("positioning service crashed");
        }
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        Ok(self.last_known)
    }

    async fn current_location(
        &self,
        accuracy: Accuracy,
        _timeout: Duration,
    ) -> Result<Option<Fix>, PlatformError> {
        self.fresh_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_accuracy.lock().unwrap() = Some(accuracy);
        time::sleep(self.delay).await;
        if let Some(err) = &self.fresh_error {
            return Err(err.clone());
        }
        Ok(self.fresh)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Frame {
    pub(crate) latitude: String,
    pub(crate) longitude: String,
    pub(crate) status: String,
    pub(crate) gps_status: String,
}

/// Keeps every committed frame so tests can count renders.
#[derive(Default)]
pub(crate) struct RecordingView {
    current: Mutex<Frame>,
    frames: Mutex<Vec<Frame>>,
    stop_enabled: Mutex<Vec<bool>>,
}

impl RecordingView {
    pub(crate) fn frames(&self) -> Vec<Frame> {
        self.frames.lock().unwrap().clone()
    }

    pub(crate) fn stop_enabled(&self) -> Vec<bool> {
        self.stop_enabled.lock().unwrap().clone()
    }
}

impl LocationView for RecordingView {
    fn set_latitude(&self, text: &str) {
        self.current.lock().unwrap().latitude = text.to_string();
    }

    fn set_longitude(&self, text: &str) {
        self.current.lock().unwrap().longitude = text.to_string();
    }

    fn set_status(&self, text: &str) {
        self.current.lock().unwrap().status = text.to_string();
    }

    fn set_gps_status(&self, text: &str) {
        self.current.lock().unwrap().gps_status = text.to_string();
    }

    fn set_stop_enabled(&self, enabled: bool) {
        self.stop_enabled.lock().unwrap().push(enabled);
    }

    fn commit(&self) {
        let frame = self.current.lock().unwrap().clone();
        self.frames.lock().unwrap().push(frame);
    }
}
