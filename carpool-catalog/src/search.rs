use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ride::Ride;

/// Ride search filter: case-insensitive substring match on both cities plus
/// a departure window covering the requested calendar day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideQuery {
    pub departure_city: String,
    pub arrival_city: String,
    pub date: NaiveDate,
}

impl RideQuery {
    /// The half-open departure window `[start of day, start of next day)`.
    pub fn window(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = self.date.and_time(NaiveTime::MIN).and_utc();
        (start, start + Duration::days(1))
    }

    pub fn matches(&self, ride: &Ride) -> bool {
        let (start, end) = self.window();
        contains_ignore_case(&ride.departure_city, &self.departure_city)
            && contains_ignore_case(&ride.arrival_city, &self.arrival_city)
            && ride.departure_time >= start
            && ride.departure_time < end
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ride::{Ride, RideDraft};
    use uuid::Uuid;

    fn ride_departing(city: &str, arrival: &str, departure_time: DateTime<Utc>) -> Ride {
        let draft = RideDraft {
            vehicle_id: Uuid::new_v4(),
            departure_city: city.to_string(),
            departure_address: None,
            arrival_city: arrival.to_string(),
            arrival_address: None,
            departure_time,
            duration_minutes: None,
            price_per_seat_cents: 500,
            seats_total: 3,
            description: None,
            music_enabled: false,
            pets_allowed: false,
            smoking_allowed: false,
        };
        Ride::publish(&draft, Uuid::new_v4())
    }

    fn query(dep: &str, arr: &str, date: NaiveDate) -> RideQuery {
        RideQuery {
            departure_city: dep.to_string(),
            arrival_city: arr.to_string(),
            date,
        }
    }

    #[test]
    fn substring_match_is_case_insensitive() {
        let date = NaiveDate::from_ymd_opt(2030, 6, 15).unwrap();
        let departure = date.and_hms_opt(8, 30, 0).unwrap().and_utc();
        let ride = ride_departing("Saint-Étienne", "Clermont-Ferrand", departure);

        assert!(query("saint", "clermont", date).matches(&ride));
        assert!(query("ÉTIENNE", "ferrand", date).matches(&ride));
        assert!(!query("Lyon", "clermont", date).matches(&ride));
    }

    #[test]
    fn departure_must_fall_on_the_requested_day() {
        let date = NaiveDate::from_ymd_opt(2030, 6, 15).unwrap();
        let same_day = date.and_hms_opt(23, 59, 59).unwrap().and_utc();
        let day_after = date.succ_opt().unwrap().and_hms_opt(0, 0, 0).unwrap().and_utc();

        let q = query("", "", date);
        assert!(q.matches(&ride_departing("Lyon", "Paris", same_day)));
        assert!(!q.matches(&ride_departing("Lyon", "Paris", day_after)));
    }

    #[test]
    fn empty_needles_match_everything_on_the_day() {
        let date = NaiveDate::from_ymd_opt(2030, 1, 2).unwrap();
        let departure = date.and_hms_opt(12, 0, 0).unwrap().and_utc();
        assert!(query("", "", date).matches(&ride_departing("Anywhere", "Elsewhere", departure)));
    }
}
