//! Errors raised while planning a vehicle load.

use hubroute_core::StoreError;
use thiserror::Error;

/// Errors raised by [`LoadPlanner`](crate::LoadPlanner).
#[derive(Debug, Error)]
pub enum LoadError {
    /// The depot has no vehicle to load.
    #[error("depot {depot} has no vehicles")]
    NoVehicles {
        /// Depot that was queried.
        depot: String,
    },
    /// The requested vehicle is not stationed at the depot.
    #[error("vehicle {vehicle} does not belong to depot {depot}")]
    VehicleNotInDepot {
        /// Requested vehicle id.
        vehicle: String,
        /// Depot that was queried.
        depot: String,
    },
    /// The fleet store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
