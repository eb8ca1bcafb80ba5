use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use carpool_core::{Error, Result};

/// A carpool ride offers at most 8 seats regardless of the vehicle.
pub const MAX_SEATS_PER_RIDE: u8 = 8;
/// Price cap per seat, in cents: 999.99.
pub const MAX_PRICE_PER_SEAT_CENTS: u32 = 99_999;

const MAX_CITY_LEN: usize = 150;
const MAX_ADDRESS_LEN: usize = 255;
const MAX_DESCRIPTION_LEN: usize = 5_000;

/// Ride lifecycle. `Published` is the only state accepting mutation;
/// `Cancelled` and `Completed` are terminal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RideStatus {
    Published,
    Cancelled,
    Completed,
}

impl RideStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RideStatus::Published)
    }
}

/// A published offer of seats along a route at a fixed departure time.
///
/// `seats_available` is owned exclusively by the catalog and ledger
/// operations running under the ride's lock; nothing else writes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ride {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub vehicle_id: Uuid,
    pub departure_city: String,
    pub departure_address: Option<String>,
    pub arrival_city: String,
    pub arrival_address: Option<String>,
    pub departure_time: DateTime<Utc>,
    pub duration_minutes: Option<u32>,
    /// Price per seat in cents (99_999 = 999.99).
    pub price_per_seat_cents: u32,
    pub seats_total: u8,
    pub seats_available: u8,
    pub description: Option<String>,
    pub music_enabled: bool,
    pub pets_allowed: bool,
    pub smoking_allowed: bool,
    pub status: RideStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ride {
    /// Build a freshly published ride from a validated draft. All seats
    /// start available.
    pub fn publish(draft: &RideDraft, driver_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            driver_id,
            vehicle_id: draft.vehicle_id,
            departure_city: draft.departure_city.clone(),
            departure_address: draft.departure_address.clone(),
            arrival_city: draft.arrival_city.clone(),
            arrival_address: draft.arrival_address.clone(),
            departure_time: draft.departure_time,
            duration_minutes: draft.duration_minutes,
            price_per_seat_cents: draft.price_per_seat_cents,
            seats_total: draft.seats_total,
            seats_available: draft.seats_total,
            description: draft.description.clone(),
            music_enabled: draft.music_enabled,
            pets_allowed: draft.pets_allowed,
            smoking_allowed: draft.smoking_allowed,
            status: RideStatus::Published,
            created_at: now,
            updated_at: now,
        }
    }

    /// Seats currently committed to active bookings.
    pub fn seats_booked(&self) -> u8 {
        self.seats_total - self.seats_available
    }
}

/// Write-model for creating or updating a ride.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideDraft {
    pub vehicle_id: Uuid,
    pub departure_city: String,
    pub departure_address: Option<String>,
    pub arrival_city: String,
    pub arrival_address: Option<String>,
    pub departure_time: DateTime<Utc>,
    pub duration_minutes: Option<u32>,
    pub price_per_seat_cents: u32,
    pub seats_total: u8,
    pub description: Option<String>,
    #[serde(default)]
    pub music_enabled: bool,
    #[serde(default)]
    pub pets_allowed: bool,
    #[serde(default)]
    pub smoking_allowed: bool,
}

impl RideDraft {
    /// Field-level validation. Departure-time freshness and vehicle checks
    /// need external state and happen in the catalog.
    pub fn validate(&self) -> Result<()> {
        if self.departure_city.trim().is_empty() {
            return Err(Error::validation("departure city is required"));
        }
        if self.departure_city.chars().count() > MAX_CITY_LEN {
            return Err(Error::validation(
                "departure city must not exceed 150 characters",
            ));
        }
        if self.arrival_city.trim().is_empty() {
            return Err(Error::validation("arrival city is required"));
        }
        if self.arrival_city.chars().count() > MAX_CITY_LEN {
            return Err(Error::validation(
                "arrival city must not exceed 150 characters",
            ));
        }
        if let Some(address) = &self.departure_address {
            if address.chars().count() > MAX_ADDRESS_LEN {
                return Err(Error::validation(
                    "departure address must not exceed 255 characters",
                ));
            }
        }
        if let Some(address) = &self.arrival_address {
            if address.chars().count() > MAX_ADDRESS_LEN {
                return Err(Error::validation(
                    "arrival address must not exceed 255 characters",
                ));
            }
        }
        if let Some(description) = &self.description {
            if description.chars().count() > MAX_DESCRIPTION_LEN {
                return Err(Error::validation(
                    "description must not exceed 5000 characters",
                ));
            }
        }
        if self.seats_total == 0 || self.seats_total > MAX_SEATS_PER_RIDE {
            return Err(Error::validation("a ride must offer between 1 and 8 seats"));
        }
        if self.price_per_seat_cents > MAX_PRICE_PER_SEAT_CENTS {
            return Err(Error::validation("price per seat must not exceed 999.99"));
        }
        Ok(())
    }

    /// Copy the mutable fields onto an existing ride. Seat accounting stays
    /// with the catalog.
    pub(crate) fn write_fields(&self, ride: &mut Ride) {
        ride.vehicle_id = self.vehicle_id;
        ride.departure_city = self.departure_city.clone();
        ride.departure_address = self.departure_address.clone();
        ride.arrival_city = self.arrival_city.clone();
        ride.arrival_address = self.arrival_address.clone();
        ride.departure_time = self.departure_time;
        ride.duration_minutes = self.duration_minutes;
        ride.price_per_seat_cents = self.price_per_seat_cents;
        ride.description = self.description.clone();
        ride.music_enabled = self.music_enabled;
        ride.pets_allowed = self.pets_allowed;
        ride.smoking_allowed = self.smoking_allowed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn draft() -> RideDraft {
        RideDraft {
            vehicle_id: Uuid::new_v4(),
            departure_city: "Lyon".to_string(),
            departure_address: Some("Place Bellecour".to_string()),
            arrival_city: "Grenoble".to_string(),
            arrival_address: None,
            departure_time: Utc::now() + Duration::days(3),
            duration_minutes: Some(90),
            price_per_seat_cents: 1_250,
            seats_total: 3,
            description: None,
            music_enabled: true,
            pets_allowed: false,
            smoking_allowed: false,
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn blank_cities_are_rejected() {
        let mut d = draft();
        d.departure_city = "   ".to_string();
        assert!(d.validate().is_err());

        let mut d = draft();
        d.arrival_city = String::new();
        assert!(d.validate().is_err());
    }

    #[test]
    fn seat_count_bounds() {
        let mut d = draft();
        d.seats_total = 0;
        assert!(d.validate().is_err());
        d.seats_total = 9;
        assert!(d.validate().is_err());
        d.seats_total = 8;
        assert!(d.validate().is_ok());
    }

    #[test]
    fn price_cap_is_inclusive() {
        let mut d = draft();
        d.price_per_seat_cents = MAX_PRICE_PER_SEAT_CENTS;
        assert!(d.validate().is_ok());
        d.price_per_seat_cents = MAX_PRICE_PER_SEAT_CENTS + 1;
        assert!(d.validate().is_err());
    }

    #[test]
    fn overlong_description_is_rejected() {
        let mut d = draft();
        d.description = Some("x".repeat(5_001));
        assert!(d.validate().is_err());
    }

    #[test]
    fn publish_makes_every_seat_available() {
        let d = draft();
        let driver = Uuid::new_v4();
        let ride = Ride::publish(&d, driver);
        assert_eq!(ride.status, RideStatus::Published);
        assert_eq!(ride.seats_available, d.seats_total);
        assert_eq!(ride.seats_booked(), 0);
        assert_eq!(ride.driver_id, driver);
    }
}
