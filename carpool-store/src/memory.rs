use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use carpool_catalog::repository::RideRepository;
use carpool_catalog::ride::Ride;
use carpool_core::{StoreError, Vehicle, VehicleDirectory};
use carpool_ledger::booking::Booking;
use carpool_ledger::repository::BookingRepository;

#[derive(Default)]
struct State {
    rides: HashMap<Uuid, Ride>,
    bookings: HashMap<Uuid, Booking>,
    bookings_by_ride: HashMap<Uuid, Vec<Uuid>>,
}

/// In-memory store backing both repositories.
///
/// Single-record reads and writes are atomic behind one `RwLock`;
/// cross-record read-check-write sequences are serialized by the services
/// through `RideLocks`. Records are never deleted, only rewritten.
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RideRepository for MemoryStore {
    async fn get(&self, id: Uuid) -> Result<Option<Ride>, StoreError> {
        Ok(self.state.read().await.rides.get(&id).cloned())
    }

    async fn insert(&self, ride: Ride) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        if state.rides.contains_key(&ride.id) {
            return Err(StoreError::Duplicate(ride.id));
        }
        state.rides.insert(ride.id, ride);
        Ok(())
    }

    async fn update(&self, ride: Ride) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        match state.rides.get_mut(&ride.id) {
            Some(slot) => {
                *slot = ride;
                Ok(())
            }
            None => Err(StoreError::Missing(ride.id)),
        }
    }

    async fn list_by_driver(&self, driver_id: Uuid) -> Result<Vec<Ride>, StoreError> {
        Ok(self
            .state
            .read()
            .await
            .rides
            .values()
            .filter(|ride| ride.driver_id == driver_id)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Ride>, StoreError> {
        Ok(self.state.read().await.rides.values().cloned().collect())
    }
}

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn get(&self, id: Uuid) -> Result<Option<Booking>, StoreError> {
        Ok(self.state.read().await.bookings.get(&id).cloned())
    }

    async fn insert(&self, booking: Booking) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        if state.bookings.contains_key(&booking.id) {
            return Err(StoreError::Duplicate(booking.id));
        }
        state
            .bookings_by_ride
            .entry(booking.ride_id)
            .or_default()
            .push(booking.id);
        state.bookings.insert(booking.id, booking);
        Ok(())
    }

    async fn update(&self, booking: Booking) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        match state.bookings.get_mut(&booking.id) {
            Some(slot) => {
                *slot = booking;
                Ok(())
            }
            None => Err(StoreError::Missing(booking.id)),
        }
    }

    async fn list_by_passenger(&self, passenger_id: Uuid) -> Result<Vec<Booking>, StoreError> {
        Ok(self
            .state
            .read()
            .await
            .bookings
            .values()
            .filter(|booking| booking.passenger_id == passenger_id)
            .cloned()
            .collect())
    }

    async fn list_by_ride(&self, ride_id: Uuid) -> Result<Vec<Booking>, StoreError> {
        let state = self.state.read().await;
        let ids = match state.bookings_by_ride.get(&ride_id) {
            Some(ids) => ids,
            None => return Ok(Vec::new()),
        };
        Ok(ids
            .iter()
            .filter_map(|id| state.bookings.get(id).cloned())
            .collect())
    }
}

/// Vehicle registry for tests and demos; the real one lives outside the
/// engine.
pub struct MemoryVehicleDirectory {
    vehicles: RwLock<HashMap<Uuid, Vehicle>>,
}

impl MemoryVehicleDirectory {
    pub fn new() -> Self {
        Self {
            vehicles: RwLock::new(HashMap::new()),
        }
    }

    pub async fn register(&self, vehicle: Vehicle) {
        self.vehicles.write().await.insert(vehicle.id, vehicle);
    }
}

impl Default for MemoryVehicleDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VehicleDirectory for MemoryVehicleDirectory {
    async fn get_vehicle(&self, id: Uuid) -> Result<Option<Vehicle>, StoreError> {
        Ok(self.vehicles.read().await.get(&id).cloned())
    }
}
