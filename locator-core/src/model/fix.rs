use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::provider::LocationError;

/// 定位精度档位, 精度越高耗电越多
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Accuracy {
    Lowest,
    Low,
    #[default]
    Medium,
    High,
    Best,
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accuracy::Lowest => write!(f, "Lowest"),
            Accuracy::Low => write!(f, "Low"),
            Accuracy::Medium => write!(f, "Medium"),
            Accuracy::High => write!(f, "High"),
            Accuracy::Best => write!(f, "Best"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AccuracyError {
    #[error("Invalid accuracy: {0}")]
    InvalidAccuracy(String),
}

impl TryFrom<&str> for Accuracy {
    type Error = AccuracyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "lowest" => Ok(Accuracy::Lowest),
            "low" => Ok(Accuracy::Low),
            "medium" => Ok(Accuracy::Medium),
            "high" => Ok(Accuracy::High),
            "best" => Ok(Accuracy::Best),
            _ => Err(AccuracyError::InvalidAccuracy(value.to_string())),
        }
    }
}

impl FromStr for Accuracy {
    type Err = AccuracyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Accuracy::try_from(s)
    }
}

/// A single position reading reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    pub latitude: f64,
    pub longitude: f64,
    /// Horizontal accuracy radius in meters, when the platform reports one.
    pub accuracy: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl Fix {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_accuracy(mut self, meters: f64) -> Self {
        self.accuracy = Some(meters);
        self
    }
}

/// Outcome of one location request.
///
/// Either a fix or an error, never both: the coordinates of a failed request
/// are absent rather than zeroed.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateResult {
    Fix(Fix),
    Error(LocationError),
}

impl CoordinateResult {
    pub fn latitude(&self) -> Option<f64> {
        self.fix().map(|f| f.latitude)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.fix().map(|f| f.longitude)
    }

    pub fn fix(&self) -> Option<&Fix> {
        match self {
            CoordinateResult::Fix(fix) => Some(fix),
            CoordinateResult::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&LocationError> {
        match self {
            CoordinateResult::Fix(_) => None,
            CoordinateResult::Error(err) => Some(err),
        }
    }

    pub fn is_fix(&self) -> bool {
        matches!(self, CoordinateResult::Fix(_))
    }
}

impl From<Fix> for CoordinateResult {
    fn from(value: Fix) -> Self {
        CoordinateResult::Fix(value)
    }
}

impl From<LocationError> for CoordinateResult {
    fn from(value: LocationError) -> Self {
        CoordinateResult::Error(value)
    }
}
