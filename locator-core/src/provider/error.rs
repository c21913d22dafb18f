/// Every way a location request can fail, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("Permission Denied")]
    PermissionDenied,
    #[error("GPS is not supported on this device")]
    Unsupported,
    #[error("Unable to get location")]
    Unavailable,
    #[error("An error occurred: {0}")]
    Provider(String),
    #[error("An unexpected error occurred: {0}")]
    PermissionSubsystem(String),
    /// The poll itself failed before a result could be produced.
    #[error("An unexpected error occurred.")]
    UnexpectedUi,
}
