pub mod access;
pub mod error;
pub mod locks;
pub mod vehicle;

pub use error::{Error, ErrorKind, StoreError};
pub use locks::RideLocks;
pub use vehicle::{Vehicle, VehicleDirectory};

pub type Result<T> = std::result::Result<T, Error>;
