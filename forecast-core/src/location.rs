use async_trait::async_trait;
use std::fmt::Debug;

use crate::model::Coordinates;

/// Why a device location could not be obtained.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocationError {
    #[error("Location services are unavailable")]
    Unavailable,
    #[error("Timed out while retrieving location")]
    Timeout,
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Unknown location error: {0}")]
    Unknown(String),
}

impl LocationError {
    /// What the user can do about it.
    pub fn hint(&self) -> &'static str {
        match self {
            LocationError::Unavailable => {
                "Enable location services, or pass --lat/--lon (or --city) explicitly."
            }
            LocationError::Timeout => "Failed to retrieve location. Try again later.",
            LocationError::PermissionDenied => {
                "Location permission is required. Grant it in your system settings."
            }
            LocationError::Unknown(_) => "An unknown error occurred.",
        }
    }
}

#[async_trait]
pub trait LocationProvider: Send + Sync + Debug {
    async fn current_location(&self) -> Result<Coordinates, LocationError>;
}

/// Location source backed by coordinates known up front (flags or config).
#[derive(Debug, Clone, Default)]
pub struct FixedLocation {
    coordinates: Option<Coordinates>,
}

impl FixedLocation {
    pub fn new(coordinates: Option<Coordinates>) -> Self {
        Self { coordinates }
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_location(&self) -> Result<Coordinates, LocationError> {
        self.coordinates.ok_or(LocationError::Unavailable)
    }
}
