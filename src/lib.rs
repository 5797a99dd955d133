//! # drik
//!
//! Hindu luni-solar Panchanga engine: derives the five classical elements
//! (tithi, nakshatra, yoga, karana, rashi), the sunrise-anchored calendar
//! day, and the next full moon with its lunar month (masa) for a civil
//! date, time, IANA timezone and geographic location.
//!
//! Positions come from an [`EphemerisProvider`]; the built-in
//! [`Vsop87Provider`] uses the VSOP87D solar theory and the abridged ELP
//! lunar theory. Sidereal longitudes follow the Lahiri ayanamsa.
//!
//! ```rust
//! use chrono::{NaiveDate, NaiveTime};
//! use drik::prelude::*;
//!
//! let request = PanchangaRequest::default_site(
//!     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
//!     NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
//! );
//! let result = drik::compute(&request).unwrap();
//!
//! assert!(result.day_by_sunrise.sunrise_local < result.day_by_sunrise.sunset_local);
//! println!("tithi {} ({})", result.instant.elements.tithi, result.instant.elements.paksha);
//! ```

pub mod astronomy;
pub mod ayanamsa;
pub mod elements;
pub mod error;
pub mod masa;
pub mod panchanga;
pub mod time;
pub mod types;

pub use astronomy::fullmoon::SyzygyFinder;
pub use astronomy::longitude::{LongitudeEngine, normalize_deg};
pub use astronomy::sunrise::{HORIZON_ALTITUDE_DEG, HorizonFinder};
pub use astronomy::{Body, EphemerisProvider, EquatorialPosition, Frame, Vsop87Provider};
pub use error::DrikError;
pub use panchanga::Panchanga;
pub use types::{
    DayPanchanga, FullMoonEvent, InstantPanchanga, Location, Paksha, PanchangaElements,
    PanchangaRequest, PanchangaResult,
};

pub mod prelude {
    pub use crate::astronomy::{Body, EphemerisProvider, Frame, Vsop87Provider};
    pub use crate::error::DrikError;
    pub use crate::panchanga::Panchanga;
    pub use crate::types::*;
}

/// Computes a Panchanga with the built-in VSOP87/ELP provider.
///
/// # Errors
/// See [`Panchanga::compute`].
pub fn compute(request: &PanchangaRequest) -> Result<PanchangaResult, DrikError> {
    Panchanga::new(Vsop87Provider).compute(request)
}
