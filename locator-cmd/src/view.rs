use std::io::Write;
use std::sync::Mutex;

use chrono::Local;
use locator_core::LocationView;
use tokio::sync::watch;

#[derive(Debug, Default, Clone)]
struct Surfaces {
    latitude: String,
    longitude: String,
    status: String,
    gps_status: String,
}

/// Prints one line per render to stdout.
pub struct ConsoleView {
    surfaces: Mutex<Surfaces>,
    renders: watch::Sender<usize>,
}

impl ConsoleView {
    pub fn new() -> Self {
        let (renders, _) = watch::channel(0);
        ConsoleView {
            surfaces: Mutex::new(Surfaces::default()),
            renders,
        }
    }

    /// Render counter, bumped after every commit.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.renders.subscribe()
    }

    fn update(&self, f: impl FnOnce(&mut Surfaces)) {
        if let Ok(mut surfaces) = self.surfaces.lock() {
            f(&mut surfaces);
        }
    }

    fn line(surfaces: &Surfaces) -> String {
        let mut parts = Vec::with_capacity(4);
        if !surfaces.latitude.is_empty() {
            parts.push(surfaces.latitude.as_str());
        }
        if !surfaces.longitude.is_empty() {
            parts.push(surfaces.longitude.as_str());
        }
        if !surfaces.status.is_empty() {
            parts.push(surfaces.status.as_str());
        }
        if !surfaces.gps_status.is_empty() {
            parts.push(surfaces.gps_status.as_str());
        }
        parts.join(" | ")
    }
}

impl Default for ConsoleView {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationView for ConsoleView {
    fn set_latitude(&self, text: &str) {
        self.update(|s| s.latitude = text.to_string());
    }

    fn set_longitude(&self, text: &str) {
        self.update(|s| s.longitude = text.to_string());
    }

    fn set_status(&self, text: &str) {
        self.update(|s| s.status = text.to_string());
    }

    fn set_gps_status(&self, text: &str) {
        self.update(|s| s.gps_status = text.to_string());
    }

    fn set_stop_enabled(&self, enabled: bool) {
        tracing::debug!("停止按钮可用: {}", enabled);
    }

    fn commit(&self) {
        let line = match self.surfaces.lock() {
            Ok(surfaces) => Self::line(&surfaces),
            Err(_) => return,
        };
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "[{}] {}", Local::now().format("%H:%M:%S"), line);
        self.renders.send_modify(|n| *n += 1);
    }
}
