//! Horizon-crossing search for sunrise and sunset.
//!
//! The local 24-hour window starting at local midnight is scanned with a
//! coarse fixed interval; each sign change of `altitude - threshold`
//! between adjacent samples brackets a crossing, which bisection then
//! refines. Only the first sunrise and first sunset in the window count.

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;

use crate::astronomy::{Body, EphemerisProvider, coords};
use crate::error::DrikError;
use crate::time;
use crate::types::Location;

/// Canonical horizon altitude in degrees: atmospheric refraction plus the
/// solar disc radius.
pub const HORIZON_ALTITUDE_DEG: f64 = -0.8333;

/// Coarse scan interval in minutes.
const SCAN_STEP_MINUTES: f64 = 5.0;
/// Bisection iterations per bracket; 5 min / 2^10 is well under 10 seconds.
const BISECTION_ITERATIONS: u32 = 10;

/// Sunrise and sunset of one local civil day, as UT Julian days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizonEvents {
    pub sunrise_jd: f64,
    pub sunset_jd: f64,
}

/// Locates sunrise and sunset for a provider injected at construction.
#[derive(Debug)]
pub struct HorizonFinder<'a, P: EphemerisProvider> {
    provider: &'a P,
    threshold_deg: f64,
}

impl<'a, P: EphemerisProvider> HorizonFinder<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self::with_threshold(provider, HORIZON_ALTITUDE_DEG)
    }

    pub fn with_threshold(provider: &'a P, threshold_deg: f64) -> Self {
        Self { provider, threshold_deg }
    }

    /// Finds the first sunrise and first sunset in the 24-hour window
    /// starting at local midnight of `date`.
    ///
    /// # Errors
    /// Returns `NoEventFound` when either event is absent from the window
    /// (polar day or night), `InvalidInput`/`OutOfRange` for an unusable
    /// midnight, and `Provider` when an ephemeris query fails.
    pub fn find(&self, date: NaiveDate, zone: Tz, location: &Location) -> Result<HorizonEvents, DrikError> {
        let midnight = time::civil_to_instant(date, NaiveTime::MIN, zone)?;
        let start_jd = midnight.jd();
        let step = SCAN_STEP_MINUTES / (24.0 * 60.0);
        let samples = (24.0 * 60.0 / SCAN_STEP_MINUTES) as usize;

        let mut sunrise: Option<f64> = None;
        let mut sunset: Option<f64> = None;

        let mut prev = self.altitude_offset(start_jd, location)?;
        for i in 1..=samples {
            let jd = start_jd + i as f64 * step;
            let current = self.altitude_offset(jd, location)?;

            if sunrise.is_none() && prev < 0.0 && current >= 0.0 {
                sunrise = Some(self.refine(jd - step, jd, true, location)?);
            } else if sunset.is_none() && prev >= 0.0 && current < 0.0 {
                sunset = Some(self.refine(jd - step, jd, false, location)?);
            }

            if sunrise.is_some() && sunset.is_some() {
                break;
            }
            prev = current;
        }

        let sunrise_jd = sunrise.ok_or(DrikError::no_event("sunrise"))?;
        let sunset_jd = sunset.ok_or(DrikError::no_event("sunset"))?;
        Ok(HorizonEvents { sunrise_jd, sunset_jd })
    }

    /// Sun altitude above the configured threshold, degrees.
    fn altitude_offset(&self, jd: f64, location: &Location) -> Result<f64, DrikError> {
        let eq = self.provider.equatorial_position(jd, Body::Sun)?;
        let gmst = self.provider.sidereal_time(jd)?;
        let altitude = coords::altitude_deg(
            gmst,
            eq.right_ascension_deg,
            eq.declination_deg,
            location.latitude,
            location.longitude,
        );
        Ok(altitude - self.threshold_deg)
    }

    /// Narrows a bracketed crossing by bisection.
    fn refine(&self, mut a: f64, mut b: f64, rising: bool, location: &Location) -> Result<f64, DrikError> {
        for _ in 0..BISECTION_ITERATIONS {
            let mid = (a + b) / 2.0;
            let above = self.altitude_offset(mid, location)? >= 0.0;
            if above == rising {
                b = mid;
            } else {
                a = mid;
            }
        }
        Ok((a + b) / 2.0)
    }
}
