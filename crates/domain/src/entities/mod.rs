//! Domain entities - Weather snapshots and the state derived from them

mod display_state;
mod weather_snapshot;

pub use display_state::{DisplayState, HOURS_TO_SHOW, HourlyDisplay, Staleness};
pub use weather_snapshot::{ConditionDescriptor, RawSnapshot, RawWeather};
