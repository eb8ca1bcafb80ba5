use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use carpool_catalog::repository::RideRepository;
use carpool_catalog::ride::RideStatus;
use carpool_core::access::{ensure_booking_owner, ensure_ride_owner, BookingAction, RideAction};
use carpool_core::{Error, Result, RideLocks};

use crate::booking::{Booking, BookingStatus, MAX_SEATS_PER_BOOKING};
use crate::repository::BookingRepository;

/// Who is cancelling a booking; decides both the ownership check and the
/// terminal status written.
enum Canceller {
    Passenger(Uuid),
    Driver(Uuid),
}

/// Booking lifecycle and the seat-inventory accounting that goes with it.
///
/// Seats are reserved when the booking is created, not when the driver
/// confirms it: a pending request already removes capacity from the pool,
/// so two passengers can never reserve more seats than exist while a
/// driver decision is outstanding.
pub struct BookingLedger {
    rides: Arc<dyn RideRepository>,
    bookings: Arc<dyn BookingRepository>,
    locks: Arc<RideLocks>,
}

impl BookingLedger {
    pub fn new(
        rides: Arc<dyn RideRepository>,
        bookings: Arc<dyn BookingRepository>,
        locks: Arc<RideLocks>,
    ) -> Self {
        Self {
            rides,
            bookings,
            locks,
        }
    }

    /// Reserve seats on a ride and record the pending booking. The seat
    /// decrement and the insert form one unit under the ride's lock; if the
    /// insert fails the decrement is rolled back before returning.
    pub async fn create_booking(
        &self,
        ride_id: Uuid,
        passenger_id: Uuid,
        seats_requested: u8,
    ) -> Result<Booking> {
        if seats_requested == 0 || seats_requested > MAX_SEATS_PER_BOOKING {
            return Err(Error::validation(
                "a booking must request between 1 and 8 seats",
            ));
        }

        let _guard = self.locks.acquire(ride_id).await;

        let mut ride = self
            .rides
            .get(ride_id)
            .await?
            .ok_or_else(|| Error::not_found("ride", ride_id))?;
        if ride.status != RideStatus::Published {
            return Err(Error::business_rule(
                "this ride is no longer available for booking",
            ));
        }
        if ride.driver_id == passenger_id {
            return Err(Error::validation("you cannot book your own ride"));
        }

        let already_booked = self
            .bookings
            .list_by_ride(ride_id)
            .await?
            .iter()
            .any(|booking| booking.passenger_id == passenger_id && booking.status.is_active());
        if already_booked {
            return Err(Error::business_rule(
                "you already have an active booking for this ride",
            ));
        }

        if seats_requested > ride.seats_available {
            return Err(Error::InsufficientSeats {
                requested: seats_requested,
                available: ride.seats_available,
            });
        }

        let seats_before = ride.seats_available;
        ride.seats_available -= seats_requested;
        ride.updated_at = Utc::now();
        self.rides.update(ride.clone()).await?;

        let booking = Booking::new(ride_id, passenger_id, seats_requested);
        if let Err(err) = self.bookings.insert(booking.clone()).await {
            // Roll the reservation back so no partial state survives.
            ride.seats_available = seats_before;
            self.rides.update(ride).await?;
            return Err(err.into());
        }

        info!(
            booking_id = %booking.id,
            ride_id = %ride_id,
            passenger_id = %passenger_id,
            seats = seats_requested,
            "booking created, seats reserved"
        );
        Ok(booking)
    }

    /// Driver accepts a pending booking. Seats were already reserved at
    /// creation, so the inventory does not move.
    pub async fn confirm_booking(&self, booking_id: Uuid, driver_id: Uuid) -> Result<Booking> {
        let probe = self.get_booking(booking_id).await?;
        let _guard = self.locks.acquire(probe.ride_id).await;

        let mut booking = self.get_booking(booking_id).await?;
        let ride = self
            .rides
            .get(booking.ride_id)
            .await?
            .ok_or_else(|| Error::not_found("ride", booking.ride_id))?;
        ensure_ride_owner(ride.driver_id, driver_id, RideAction::ConfirmBooking)?;
        if booking.status != BookingStatus::Pending {
            return Err(Error::business_rule(
                "this booking can no longer be confirmed",
            ));
        }

        booking.status = BookingStatus::Confirmed;
        booking.updated_at = Utc::now();
        self.bookings.update(booking.clone()).await?;
        info!(booking_id = %booking.id, "booking confirmed");
        Ok(booking)
    }

    /// Passenger withdraws their booking; the reserved seats return to the
    /// pool.
    pub async fn cancel_booking_by_passenger(
        &self,
        booking_id: Uuid,
        passenger_id: Uuid,
    ) -> Result<Booking> {
        self.cancel_booking(booking_id, Canceller::Passenger(passenger_id))
            .await
    }

    /// Driver rejects or revokes a booking; the reserved seats return to
    /// the pool.
    pub async fn cancel_booking_by_driver(
        &self,
        booking_id: Uuid,
        driver_id: Uuid,
    ) -> Result<Booking> {
        self.cancel_booking(booking_id, Canceller::Driver(driver_id))
            .await
    }

    async fn cancel_booking(&self, booking_id: Uuid, by: Canceller) -> Result<Booking> {
        let probe = self.get_booking(booking_id).await?;
        let _guard = self.locks.acquire(probe.ride_id).await;

        let mut booking = self.get_booking(booking_id).await?;
        let mut ride = self
            .rides
            .get(booking.ride_id)
            .await?
            .ok_or_else(|| Error::not_found("ride", booking.ride_id))?;

        match by {
            Canceller::Passenger(user_id) => {
                ensure_booking_owner(booking.passenger_id, user_id, BookingAction::Cancel)?
            }
            Canceller::Driver(user_id) => {
                ensure_ride_owner(ride.driver_id, user_id, RideAction::CancelBooking)?
            }
        }
        let cancelled_status = match by {
            Canceller::Passenger(_) => BookingStatus::CancelledByPassenger,
            Canceller::Driver(_) => BookingStatus::CancelledByDriver,
        };
        if booking.status.is_cancelled() {
            return Err(Error::business_rule("this booking is already cancelled"));
        }

        // Restore the seats first, then flip the booking; if the second
        // write fails the restore is rolled back.
        let seats_before = ride.seats_available;
        ride.seats_available += booking.seats_booked;
        ride.updated_at = Utc::now();
        self.rides.update(ride.clone()).await?;

        booking.status = cancelled_status;
        booking.updated_at = Utc::now();
        if let Err(err) = self.bookings.update(booking.clone()).await {
            ride.seats_available = seats_before;
            self.rides.update(ride).await?;
            return Err(err.into());
        }

        info!(
            booking_id = %booking.id,
            ride_id = %booking.ride_id,
            seats = booking.seats_booked,
            "booking cancelled, seats restored"
        );
        Ok(booking)
    }

    pub async fn get_booking(&self, booking_id: Uuid) -> Result<Booking> {
        self.bookings
            .get(booking_id)
            .await?
            .ok_or_else(|| Error::not_found("booking", booking_id))
    }

    pub async fn list_bookings_by_passenger(&self, passenger_id: Uuid) -> Result<Vec<Booking>> {
        Ok(self.bookings.list_by_passenger(passenger_id).await?)
    }

    pub async fn list_bookings_by_ride(&self, ride_id: Uuid) -> Result<Vec<Booking>> {
        Ok(self.bookings.list_by_ride(ride_id).await?)
    }

    /// Every booking against every ride the driver owns.
    pub async fn list_bookings_for_driver(&self, driver_id: Uuid) -> Result<Vec<Booking>> {
        let mut out = Vec::new();
        for ride in self.rides.list_by_driver(driver_id).await? {
            out.extend(self.bookings.list_by_ride(ride.id).await?);
        }
        Ok(out)
    }
}
