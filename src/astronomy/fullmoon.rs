//! Syzygy search: the next full moon after a given instant.
//!
//! The Moon-Sun elongation rises monotonically from 0 (new moon) through
//! 180 (full moon) and wraps back to 0. The search steps forward in a
//! coarse increment looking for a 180-degree crossing between adjacent
//! samples, then refines the bracket by bisection. Crossing detection works
//! on the signed minimal angular step, so the 360/0 wrap at new moon can
//! never masquerade as an opposition.

use crate::astronomy::EphemerisProvider;
use crate::astronomy::longitude::{LongitudeEngine, normalize_deg};
use crate::error::DrikError;

/// Elongation that defines a full moon.
pub const FULL_MOON_ELONGATION_DEG: f64 = 180.0;

/// Coarse forward step in days.
const SCAN_STEP_DAYS: f64 = 0.25;
/// Search horizon in days; a lunation is ~29.5 days, so the horizon always
/// contains at least one full moon.
const SEARCH_HORIZON_DAYS: f64 = 40.0;
/// Bisection iterations per bracket; far below a minute of uncertainty.
const BISECTION_ITERATIONS: u32 = 40;

/// Signed minimal angular difference `b - a`, degrees in [-180, 180).
fn angular_delta_deg(a: f64, b: f64) -> f64 {
    normalize_deg(b - a + 180.0) - 180.0
}

/// Locates 180-degree elongation crossings for an engine injected at
/// construction.
#[derive(Debug)]
pub struct SyzygyFinder<'a, P: EphemerisProvider> {
    engine: &'a LongitudeEngine<P>,
}

impl<'a, P: EphemerisProvider> SyzygyFinder<'a, P> {
    pub fn new(engine: &'a LongitudeEngine<P>) -> Self {
        Self { engine }
    }

    /// The next full moon after `start_jd`, as a UT Julian day.
    ///
    /// # Errors
    /// Returns `NoEventFound` when the horizon is exhausted without a
    /// crossing, and `Provider` when an ephemeris query fails.
    pub fn next_full_moon(&self, start_jd: f64) -> Result<f64, DrikError> {
        let steps = (SEARCH_HORIZON_DAYS / SCAN_STEP_DAYS) as usize;

        let mut jd = start_jd;
        let mut e0 = self.engine.elongation(jd)?;
        for _ in 0..steps {
            let jd_next = jd + SCAN_STEP_DAYS;
            let e1 = self.engine.elongation(jd_next)?;

            let delta = angular_delta_deg(e0, e1);
            let crossed = if delta >= 0.0 {
                e0 < FULL_MOON_ELONGATION_DEG && e0 + delta >= FULL_MOON_ELONGATION_DEG
            } else {
                e0 > FULL_MOON_ELONGATION_DEG && e0 + delta <= FULL_MOON_ELONGATION_DEG
            };
            if crossed {
                return self.refine(jd, jd_next, e0 < FULL_MOON_ELONGATION_DEG);
            }

            jd = jd_next;
            e0 = e1;
        }

        Err(DrikError::no_event("full moon"))
    }

    /// Narrows a bracketed crossing by bisection, direction-aware.
    fn refine(&self, mut a: f64, mut b: f64, rising: bool) -> Result<f64, DrikError> {
        for _ in 0..BISECTION_ITERATIONS {
            let mid = (a + b) / 2.0;
            let above = self.engine.elongation(mid)? >= FULL_MOON_ELONGATION_DEG;
            if above == rising {
                b = mid;
            } else {
                a = mid;
            }
        }
        Ok((a + b) / 2.0)
    }
}
