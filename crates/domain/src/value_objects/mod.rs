//! Value Objects - Immutable, identity-less domain primitives

mod geo_location;
mod timezone;
mod unit_system;

pub use geo_location::{GeoLocation, InvalidCoordinates};
pub use timezone::Timezone;
pub use unit_system::UnitSystem;
