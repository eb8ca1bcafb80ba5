pub mod catalog;
pub mod repository;
pub mod ride;
pub mod search;

pub use catalog::RideCatalog;
pub use repository::RideRepository;
pub use ride::{Ride, RideDraft, RideStatus};
pub use search::RideQuery;
