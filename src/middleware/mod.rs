pub mod car_id;
pub mod headers;

pub use car_id::CarId;
