use async_trait::async_trait;
use uuid::Uuid;

use carpool_core::StoreError;

use crate::ride::Ride;

/// Data access for rides.
///
/// Implementations must reject duplicate ids on `insert` and unknown ids on
/// `update`. Serializing concurrent writers is the caller's job, through
/// `RideLocks`.
#[async_trait]
pub trait RideRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Ride>, StoreError>;

    async fn insert(&self, ride: Ride) -> Result<(), StoreError>;

    async fn update(&self, ride: Ride) -> Result<(), StoreError>;

    async fn list_by_driver(&self, driver_id: Uuid) -> Result<Vec<Ride>, StoreError>;

    async fn list_all(&self) -> Result<Vec<Ride>, StoreError>;
}
