pub mod adapter;
pub mod ayanamsa;
pub mod fixed;
pub mod provider;
pub mod types;

pub use adapter::SwissEphemerisAdapter;
pub use fixed::FixedEphemeris;
pub use provider::{EphemerisError, EphemerisProvider};
pub use types::{GeoLocation, HouseCusps, NodeConvention, SiderealMode};
