use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use carpool_core::access::{ensure_ride_owner, RideAction};
use carpool_core::{Error, Result, RideLocks, VehicleDirectory};

use crate::repository::RideRepository;
use crate::ride::{Ride, RideDraft, RideStatus};
use crate::search::RideQuery;

/// Ride lifecycle and capacity bookkeeping.
///
/// Mutating operations run under the ride's lock so their read-check-write
/// sequences never interleave with booking operations on the same ride.
pub struct RideCatalog {
    rides: Arc<dyn RideRepository>,
    vehicles: Arc<dyn VehicleDirectory>,
    locks: Arc<RideLocks>,
}

impl RideCatalog {
    pub fn new(
        rides: Arc<dyn RideRepository>,
        vehicles: Arc<dyn VehicleDirectory>,
        locks: Arc<RideLocks>,
    ) -> Self {
        Self {
            rides,
            vehicles,
            locks,
        }
    }

    /// Publish a new ride. The vehicle must exist, belong to the driver and
    /// have room for the offered seats; departure must be in the future.
    pub async fn create_ride(&self, draft: RideDraft, driver_id: Uuid) -> Result<Ride> {
        draft.validate()?;
        if draft.departure_time <= Utc::now() {
            return Err(Error::validation("departure time must be in the future"));
        }

        let vehicle = self
            .vehicles
            .get_vehicle(draft.vehicle_id)
            .await?
            .ok_or_else(|| Error::not_found("vehicle", draft.vehicle_id))?;
        if vehicle.owner_id != driver_id {
            return Err(Error::validation(
                "you can only create a ride with your own vehicle",
            ));
        }
        if draft.seats_total > vehicle.seats_total {
            return Err(Error::validation(
                "offered seats cannot exceed the vehicle capacity",
            ));
        }

        let ride = Ride::publish(&draft, driver_id);
        self.rides.insert(ride.clone()).await?;
        info!(
            ride_id = %ride.id,
            driver_id = %driver_id,
            seats = ride.seats_total,
            "ride published"
        );
        Ok(ride)
    }

    /// Replace the mutable fields of a published ride. The seat total may
    /// only shrink down to the number of seats already booked;
    /// `seats_available` is recomputed so the conservation invariant holds.
    pub async fn update_ride(
        &self,
        ride_id: Uuid,
        draft: RideDraft,
        driver_id: Uuid,
    ) -> Result<Ride> {
        draft.validate()?;

        let _guard = self.locks.acquire(ride_id).await;
        let mut ride = self.get_ride(ride_id).await?;
        ensure_ride_owner(ride.driver_id, driver_id, RideAction::Update)?;
        if ride.status != RideStatus::Published {
            return Err(Error::business_rule(
                "cannot modify a cancelled or completed ride",
            ));
        }
        if draft.departure_time <= Utc::now() {
            return Err(Error::validation("departure time must be in the future"));
        }

        let vehicle = self
            .vehicles
            .get_vehicle(draft.vehicle_id)
            .await?
            .ok_or_else(|| Error::not_found("vehicle", draft.vehicle_id))?;
        if vehicle.owner_id != driver_id {
            return Err(Error::validation("you can only use your own vehicles"));
        }
        if draft.seats_total > vehicle.seats_total {
            return Err(Error::validation(
                "offered seats cannot exceed the vehicle capacity",
            ));
        }

        let booked = ride.seats_booked();
        if draft.seats_total < booked {
            return Err(Error::business_rule(format!(
                "cannot reduce seats to {} because {} seat(s) are already booked",
                draft.seats_total, booked
            )));
        }

        draft.write_fields(&mut ride);
        ride.seats_total = draft.seats_total;
        ride.seats_available = draft.seats_total - booked;
        ride.updated_at = Utc::now();
        self.rides.update(ride.clone()).await?;
        info!(ride_id = %ride.id, seats = ride.seats_total, "ride updated");
        Ok(ride)
    }

    /// Cancel a published ride. Re-cancelling is a business error, not a
    /// no-op.
    pub async fn cancel_ride(&self, ride_id: Uuid, driver_id: Uuid) -> Result<Ride> {
        let _guard = self.locks.acquire(ride_id).await;
        let mut ride = self.get_ride(ride_id).await?;
        ensure_ride_owner(ride.driver_id, driver_id, RideAction::Cancel)?;
        match ride.status {
            RideStatus::Cancelled => Err(Error::business_rule("this ride is already cancelled")),
            RideStatus::Completed => Err(Error::business_rule("cannot cancel a completed ride")),
            RideStatus::Published => {
                ride.status = RideStatus::Cancelled;
                ride.updated_at = Utc::now();
                self.rides.update(ride.clone()).await?;
                info!(ride_id = %ride.id, "ride cancelled");
                Ok(ride)
            }
        }
    }

    /// Mark a published ride as completed.
    pub async fn complete_ride(&self, ride_id: Uuid, driver_id: Uuid) -> Result<Ride> {
        let _guard = self.locks.acquire(ride_id).await;
        let mut ride = self.get_ride(ride_id).await?;
        ensure_ride_owner(ride.driver_id, driver_id, RideAction::Complete)?;
        match ride.status {
            RideStatus::Cancelled => Err(Error::business_rule(
                "cannot complete a cancelled ride",
            )),
            RideStatus::Completed => Err(Error::business_rule("this ride is already completed")),
            RideStatus::Published => {
                ride.status = RideStatus::Completed;
                ride.updated_at = Utc::now();
                self.rides.update(ride.clone()).await?;
                info!(ride_id = %ride.id, "ride completed");
                Ok(ride)
            }
        }
    }

    pub async fn get_ride(&self, ride_id: Uuid) -> Result<Ride> {
        self.rides
            .get(ride_id)
            .await?
            .ok_or_else(|| Error::not_found("ride", ride_id))
    }

    pub async fn list_rides_by_driver(&self, driver_id: Uuid) -> Result<Vec<Ride>> {
        Ok(self.rides.list_by_driver(driver_id).await?)
    }

    /// Text search over the catalog, soonest departure first.
    pub async fn search_rides(&self, query: &RideQuery) -> Result<Vec<Ride>> {
        let mut rides: Vec<Ride> = self
            .rides
            .list_all()
            .await?
            .into_iter()
            .filter(|ride| query.matches(ride))
            .collect();
        rides.sort_by_key(|ride| ride.departure_time);
        Ok(rides)
    }
}
