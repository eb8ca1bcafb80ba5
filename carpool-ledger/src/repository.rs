use async_trait::async_trait;
use uuid::Uuid;

use carpool_core::StoreError;

use crate::booking::Booking;

/// Data access for bookings. The by-ride index is the store's concern and
/// is queried on demand; a ride never holds a live list of its bookings.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Booking>, StoreError>;

    async fn insert(&self, booking: Booking) -> Result<(), StoreError>;

    async fn update(&self, booking: Booking) -> Result<(), StoreError>;

    async fn list_by_passenger(&self, passenger_id: Uuid) -> Result<Vec<Booking>, StoreError>;

    async fn list_by_ride(&self, ride_id: Uuid) -> Result<Vec<Booking>, StoreError>;
}
