//! Sidereal longitude derivation.

use crate::astronomy::{Body, EphemerisProvider, Frame};
use crate::ayanamsa;
use crate::error::DrikError;

/// Normalizes an angle in degrees into [0, 360).
///
/// `((x mod 360) + 360) mod 360`, with a guard so that floating-point
/// rounding can never return 360 itself.
pub fn normalize_deg(x: f64) -> f64 {
    let r = x.rem_euclid(360.0);
    if r >= 360.0 { 0.0 } else { r }
}

/// Derives sidereal longitudes from one provider under one fixed frame
/// strategy.
///
/// The strategy is read from the provider once at construction: a tropical
/// provider has the Lahiri ayanamsa subtracted from every longitude, a
/// sidereal provider is used as-is. The engine never mixes the two paths
/// within a computation.
#[derive(Debug, Clone)]
pub struct LongitudeEngine<P: EphemerisProvider> {
    provider: P,
    frame: Frame,
}

impl<P: EphemerisProvider> LongitudeEngine<P> {
    pub fn new(provider: P) -> Self {
        let frame = provider.frame();
        Self { provider, frame }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Sidereal longitude of `body` at a UT Julian day, degrees in [0, 360).
    ///
    /// # Errors
    /// Propagates the provider's failure as `Provider`.
    pub fn sidereal_longitude(&self, jd: f64, body: Body) -> Result<f64, DrikError> {
        let lon = self.provider.ecliptic_longitude(jd, body)?;
        let sidereal = match self.frame {
            Frame::Sidereal => lon,
            Frame::Tropical => lon - ayanamsa::lahiri_deg(jd),
        };
        Ok(normalize_deg(sidereal))
    }

    /// Moon-Sun elongation at a UT Julian day, degrees in [0, 360).
    pub fn elongation(&self, jd: f64) -> Result<f64, DrikError> {
        let moon = self.sidereal_longitude(jd, Body::Moon)?;
        let sun = self.sidereal_longitude(jd, Body::Sun)?;
        Ok(normalize_deg(moon - sun))
    }
}
