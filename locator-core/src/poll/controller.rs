use std::sync::Arc;
use std::sync::atomic::AtomicU8;
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{info, warn};

use crate::config::settings::STOP_MARGIN;
use crate::config::{LocationRequest, PollConfig};
use crate::provider::LocationProvider;
use crate::view::{self, LocationView};

use super::runner::{PollRunner, request_once};
use super::state::{PollState, cas_state, load_state};

/// A running poll loop. Dropping the stop sender ends the loop as well.
struct PollSession {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

/// Drives the location provider once or on a fixed interval and renders
/// every result onto the view.
pub struct PollController {
    id: String,
    provider: Arc<LocationProvider>,
    view: Arc<dyn LocationView>,
    request: LocationRequest,
    config: PollConfig,
    state: AtomicU8,
    session: Mutex<Option<PollSession>>,
}

impl PollController {
    pub fn new(
        id: impl Into<String>,
        provider: LocationProvider,
        view: Arc<dyn LocationView>,
    ) -> Self {
        let config = PollConfig::default();
        PollController {
            id: id.into(),
            provider: Arc::new(provider.with_probe_timeout(config.probe_timeout)),
            view,
            request: LocationRequest::default(),
            config,
            state: AtomicU8::new(PollState::Idle as u8),
            session: Mutex::new(None),
        }
    }

    pub fn with_request(mut self, request: LocationRequest) -> Self {
        self.request = request;
        self
    }

    pub fn with_poll_config(mut self, config: PollConfig) -> Self {
        let provider =
            LocationProvider::clone(&self.provider).with_probe_timeout(config.probe_timeout);
        self.provider = Arc::new(provider);
        self.config = config;
        self
    }

    /// Never shorter than one full request, so a stop cannot cut a fetch short.
    fn stop_grace(&self) -> Duration {
        self.config
            .stop_grace
            .max(self.request.timeout.saturating_add(STOP_MARGIN))
    }

    pub fn state(&self) -> PollState {
        load_state(&self.state)
    }

    /// Available in either state; does not touch the poll session.
    pub async fn request_once(&self) {
        request_once(&self.id, &self.provider, self.request, self.view.as_ref()).await;
    }

    pub async fn check_gps(&self) -> bool {
        let enabled = self.provider.is_positioning_available().await;
        info!("[{}] GPS可用: {}", self.id, enabled);
        view::render_gps_status(self.view.as_ref(), enabled);
        enabled
    }

    /// Starts a new poll session. Returns `false` if one is already running.
    pub async fn start_polling(&self) -> bool {
        let mut session = self.session.lock().await;
        if !cas_state(&self.id, &self.state, PollState::Idle, PollState::Polling) {
            warn!("[{}] 已在轮询中, 忽略重复启动", self.id);
            return false;
        }
        self.view.set_stop_enabled(true);
        let (stop_tx, stop_rx) = watch::channel(false);
        let runner = PollRunner {
            id: self.id.clone(),
            provider: Arc::clone(&self.provider),
            request: self.request,
            view: Arc::clone(&self.view),
            interval: self.config.interval,
            stop_rx,
        };
        let task = tokio::spawn(runner.run());
        *session = Some(PollSession { stop_tx, task });
        true
    }

    /// Stops the running session and waits for its in-flight request.
    /// No-op while idle.
    pub async fn stop_polling(&self) {
        let mut session = self.session.lock().await;
        let Some(PollSession { stop_tx, mut task }) = session.take() else {
            return;
        };
        let _ = stop_tx.send(true);
        self.view.set_stop_enabled(false);
        let grace = self.stop_grace();
        tokio::select! {
            _ = time::sleep(grace) => {
                warn!("[{}] 轮询任务未在{:?}内结束, 强制终止", self.id, grace);
                task.abort();
            }
            _ = &mut task => {}
        }
        cas_state(&self.id, &self.state, PollState::Polling, PollState::Idle);
    }
}

impl Drop for PollController {
    fn drop(&mut self) {
        if let Some(session) = self.session.get_mut().take() {
            let _ = session.stop_tx.send(true);
        }
    }
}
