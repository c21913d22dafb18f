//! Platform collaborators: the OS permission arbiter and positioning stack.
//!
//! The location provider only talks to these traits, so a mobile binding, a
//! desktop service or the in-process simulator can sit behind them.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::{Accuracy, Fix};

pub mod simulated;

pub use simulated::{SimulatedConfig, SimulatedPlatform};

/// Foreground ("when in use") location permission status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionStatus {
    #[default]
    Unknown,
    Denied,
    Restricted,
    Granted,
}

impl fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionStatus::Unknown => write!(f, "Unknown"),
            PermissionStatus::Denied => write!(f, "Denied"),
            PermissionStatus::Restricted => write!(f, "Restricted"),
            PermissionStatus::Granted => write!(f, "Granted"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlatformError {
    #[error("Location capability is not supported on this device")]
    NotSupported,
    #[error("{0}")]
    Failure(String),
}

#[async_trait::async_trait]
pub trait Permissions: Send + Sync {
    /// Current status, never shows a prompt.
    async fn check_status(&self) -> Result<PermissionStatus, PlatformError>;
    /// Prompts the user if the status is still undecided.
    async fn request(&self) -> Result<PermissionStatus, PlatformError>;
}

#[async_trait::async_trait]
pub trait Geolocation: Send + Sync {
    /// Cached fix from an earlier acquisition, returned without touching the radio.
    async fn last_known_location(&self) -> Result<Option<Fix>, PlatformError>;
    /// Fresh acquisition. `timeout` is a hint; callers still bound the wait themselves.
    async fn current_location(
        &self,
        accuracy: Accuracy,
        timeout: Duration,
    ) -> Result<Option<Fix>, PlatformError>;
}

pub trait Platform: Permissions + Geolocation {}

impl<T: Permissions + Geolocation> Platform for T {}
