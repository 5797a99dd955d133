//! Production ephemeris provider.
//!
//! The Sun comes from the VSOP87D solar theory (heliocentric Earth turned
//! geocentric), the Moon from the abridged ELP theory in the `astro` crate.
//! Both report tropical ecliptic coordinates of date, so the provider
//! declares [`Frame::Tropical`] and leaves the ayanamsa to the longitude
//! engine.

use crate::astronomy::longitude::normalize_deg;
use crate::astronomy::{Body, EphemerisProvider, EquatorialPosition, Frame, coords};
use crate::error::DrikError;

/// VSOP87D (Sun) + abridged ELP (Moon) provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vsop87Provider;

impl Vsop87Provider {
    /// Geocentric ecliptic longitude and latitude of `body`, degrees.
    fn ecliptic_position(&self, jd: f64, body: Body) -> Result<(f64, f64), DrikError> {
        if !jd.is_finite() {
            return Err(DrikError::provider("non-finite Julian day"));
        }
        let (lon, lat) = match body {
            Body::Sun => {
                // Heliocentric Earth + 180 deg is the geocentric Sun
                let earth = vsop87::vsop87d::earth(jd);
                (
                    normalize_deg(earth.longitude().to_degrees() + 180.0),
                    -earth.latitude().to_degrees(),
                )
            }
            Body::Moon => {
                let (moon, _rad_vec) = astro::lunar::geocent_ecl_pos(jd);
                (normalize_deg(moon.long.to_degrees()), moon.lat.to_degrees())
            }
        };
        if !lon.is_finite() || !lat.is_finite() {
            return Err(DrikError::provider(format!(
                "non-finite position for {body:?} at jd {jd}"
            )));
        }
        Ok((lon, lat))
    }
}

impl EphemerisProvider for Vsop87Provider {
    fn frame(&self) -> Frame {
        Frame::Tropical
    }

    fn ecliptic_longitude(&self, jd: f64, body: Body) -> Result<f64, DrikError> {
        self.ecliptic_position(jd, body).map(|(lon, _)| lon)
    }

    fn equatorial_position(&self, jd: f64, body: Body) -> Result<EquatorialPosition, DrikError> {
        let (lon, lat) = self.ecliptic_position(jd, body)?;
        let obliquity = coords::mean_obliquity_deg(jd);
        let (right_ascension_deg, declination_deg) =
            coords::ecliptic_to_equatorial(lon, lat, obliquity);
        Ok(EquatorialPosition { right_ascension_deg, declination_deg })
    }

    fn sidereal_time(&self, jd: f64) -> Result<f64, DrikError> {
        if !jd.is_finite() {
            return Err(DrikError::provider("non-finite Julian day"));
        }
        Ok(coords::greenwich_mean_sidereal_hours(jd))
    }
}
