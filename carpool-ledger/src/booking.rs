use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A booking may request at most as many seats as a ride can offer.
pub const MAX_SEATS_PER_BOOKING: u8 = 8;

/// Booking state machine.
///
/// `Pending` → `Confirmed` (driver action); `Pending`/`Confirmed` →
/// `CancelledByPassenger` | `CancelledByDriver`. Both cancelled states are
/// absorbing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    CancelledByPassenger,
    CancelledByDriver,
}

impl BookingStatus {
    /// Active bookings count against the ride's seat inventory.
    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    pub fn is_cancelled(&self) -> bool {
        !self.is_active()
    }
}

/// A passenger's reservation of seats on a ride. Seats are reserved at
/// creation, while the booking is still pending the driver's decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub ride_id: Uuid,
    pub passenger_id: Uuid,
    pub seats_booked: u8,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(ride_id: Uuid, passenger_id: Uuid, seats_booked: u8) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            ride_id,
            passenger_id,
            seats_booked,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_and_confirmed_are_active() {
        assert!(BookingStatus::Pending.is_active());
        assert!(BookingStatus::Confirmed.is_active());
        assert!(!BookingStatus::CancelledByPassenger.is_active());
        assert!(!BookingStatus::CancelledByDriver.is_active());
    }

    #[test]
    fn new_booking_starts_pending() {
        let booking = Booking::new(Uuid::new_v4(), Uuid::new_v4(), 2);
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.seats_booked, 2);
    }

    #[test]
    fn status_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&BookingStatus::CancelledByPassenger).unwrap();
        assert_eq!(json, "\"CANCELLED_BY_PASSENGER\"");
    }
}
