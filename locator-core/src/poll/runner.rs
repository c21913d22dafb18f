use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;
use tracing::{debug, error};

use crate::config::LocationRequest;
use crate::provider::LocationProvider;
use crate::view::{self, LocationView};

/// One location request rendered onto the view.
///
/// The provider runs on its own task so a panicking platform binding shows up
/// as the catch-all message instead of tearing down the caller.
pub(super) async fn request_once(
    id: &str,
    provider: &Arc<LocationProvider>,
    request: LocationRequest,
    view: &dyn LocationView,
) {
    let provider = Arc::clone(provider);
    let task = tokio::spawn(async move { provider.get_current_location(&request).await });
    match task.await {
        Ok(result) => {
            debug!("[{}] 定位结果: {:?}", id, result);
            view::render(view, &result);
        }
        Err(err) => {
            error!("[{}] 定位任务异常: {}", id, err);
            view::render_unexpected(view);
        }
    }
}

pub(super) struct PollRunner {
    pub(super) id: String,
    pub(super) provider: Arc<LocationProvider>,
    pub(super) request: LocationRequest,
    pub(super) view: Arc<dyn LocationView>,
    pub(super) interval: Duration,
    pub(super) stop_rx: watch::Receiver<bool>,
}

impl PollRunner {
    fn stop_requested(stop_rx: &watch::Receiver<bool>) -> bool {
        *stop_rx.borrow()
    }

    /// Request, render, wait; until the stop signal is raised.
    ///
    /// The signal is only looked at between iterations and during the wait,
    /// an in-flight request always completes.
    pub(super) async fn run(mut self) {
        loop {
            if Self::stop_requested(&self.stop_rx) {
                break;
            }
            request_once(&self.id, &self.provider, self.request, self.view.as_ref()).await;
            if Self::stop_requested(&self.stop_rx) {
                break;
            }
            tokio::select! {
                _ = time::sleep(self.interval) => {}
                changed = self.stop_rx.changed() => {
                    if changed.is_err() || Self::stop_requested(&self.stop_rx) {
                        break;
                    }
                }
            }
        }
        debug!("[{}] 轮询结束", self.id);
    }
}
