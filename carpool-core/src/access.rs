//! Ownership checks consulted by the catalog and the ledger.
//!
//! These are authorization failures, not business-rule failures: they all
//! surface as `Validation` errors so callers can render them 403-style.

use uuid::Uuid;

use crate::{Error, Result};

/// Ride operations gated on driver ownership, each with its own denial
/// message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RideAction {
    Update,
    Cancel,
    Complete,
    ConfirmBooking,
    CancelBooking,
}

impl RideAction {
    fn denied(&self) -> &'static str {
        match self {
            RideAction::Update => "you are not allowed to modify this ride",
            RideAction::Cancel => "you are not allowed to cancel this ride",
            RideAction::Complete => "you are not allowed to mark this ride as completed",
            RideAction::ConfirmBooking => "you are not allowed to confirm this booking",
            RideAction::CancelBooking => "you are not allowed to cancel this booking",
        }
    }
}

/// Booking operations gated on passenger ownership, each with its own
/// denial message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingAction {
    Cancel,
}

impl BookingAction {
    fn denied(&self) -> &'static str {
        match self {
            BookingAction::Cancel => "you are not allowed to cancel this booking",
        }
    }
}

pub fn is_ride_owner(driver_id: Uuid, user_id: Uuid) -> bool {
    driver_id == user_id
}

pub fn is_booking_owner(passenger_id: Uuid, user_id: Uuid) -> bool {
    passenger_id == user_id
}

/// Require that `user_id` is the driver who owns the ride.
pub fn ensure_ride_owner(driver_id: Uuid, user_id: Uuid, action: RideAction) -> Result<()> {
    if is_ride_owner(driver_id, user_id) {
        Ok(())
    } else {
        Err(Error::validation(action.denied()))
    }
}

/// Require that `user_id` is the passenger who owns the booking.
pub fn ensure_booking_owner(passenger_id: Uuid, user_id: Uuid, action: BookingAction) -> Result<()> {
    if is_booking_owner(passenger_id, user_id) {
        Ok(())
    } else {
        Err(Error::validation(action.denied()))
    }
}
