//! Astronomical substrate.
//!
//! The Panchanga core never models celestial mechanics itself: positions
//! come from an [`EphemerisProvider`], and everything above it (sidereal
//! longitudes, element classification, event searches) is geometry. The
//! production provider delegates to the VSOP87D solar theory and the
//! abridged lunar theory of the `astro` crate.

pub mod coords;
pub mod fullmoon;
pub mod longitude;
pub mod provider;
pub mod sunrise;

pub use provider::Vsop87Provider;

use serde::{Deserialize, Serialize};

use crate::error::DrikError;

/// Celestial body the Panchanga needs positions for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
}

/// Reference frame a provider reports ecliptic longitudes in.
///
/// Exactly one frame strategy is in force per engine: either the provider
/// bakes the ayanamsa in (`Sidereal`), or it reports tropical longitudes
/// and the engine subtracts an explicitly computed ayanamsa (`Tropical`).
/// Mixing values from both paths in one computation is a correctness
/// violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frame {
    Tropical,
    Sidereal,
}

/// Equatorial position of a body, degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquatorialPosition {
    pub right_ascension_deg: f64,
    pub declination_deg: f64,
}

/// Opaque celestial-position engine.
///
/// Calls are blocking; a network-backed implementation should enforce its
/// own timeout and surface it as a `Provider` error. Failures abort the
/// request; the core never retries.
pub trait EphemerisProvider: std::fmt::Debug + Send + Sync {
    /// Reference frame of [`EphemerisProvider::ecliptic_longitude`] values.
    fn frame(&self) -> Frame;

    /// Geocentric ecliptic longitude of `body` at a UT Julian day, degrees
    /// in [0, 360), in the frame declared by [`EphemerisProvider::frame`].
    fn ecliptic_longitude(&self, jd: f64, body: Body) -> Result<f64, DrikError>;

    /// Apparent equatorial position of `body`, for altitude work.
    fn equatorial_position(&self, jd: f64, body: Body) -> Result<EquatorialPosition, DrikError>;

    /// Greenwich mean sidereal time, hours in [0, 24).
    fn sidereal_time(&self, jd: f64) -> Result<f64, DrikError>;
}
