pub mod booking;
pub mod ledger;
pub mod repository;

pub use booking::{Booking, BookingStatus};
pub use ledger::BookingLedger;
pub use repository::BookingRepository;
