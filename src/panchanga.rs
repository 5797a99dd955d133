//! Panchanga assembly.
//!
//! Orchestrates the time converter, longitude engine, element calculators
//! and the two event finders into the three-view result: elements at the
//! requested instant, the sunrise-anchored day, and the next full moon.

use crate::astronomy::fullmoon::SyzygyFinder;
use crate::astronomy::longitude::LongitudeEngine;
use crate::astronomy::sunrise::{HORIZON_ALTITUDE_DEG, HorizonFinder};
use crate::astronomy::{Body, EphemerisProvider};
use crate::error::DrikError;
use crate::types::{
    DayPanchanga, FullMoonEvent, InstantPanchanga, PanchangaElements, PanchangaRequest,
    PanchangaResult,
};
use crate::{elements, masa, time};

/// The Panchanga computation engine.
///
/// Holds one longitude engine (and therefore one frame strategy) for its
/// whole lifetime. Stateless across requests; results are built fresh per
/// call.
#[derive(Debug)]
pub struct Panchanga<P: EphemerisProvider> {
    engine: LongitudeEngine<P>,
    horizon_threshold_deg: f64,
}

impl<P: EphemerisProvider> Panchanga<P> {
    pub fn new(provider: P) -> Self {
        Self {
            engine: LongitudeEngine::new(provider),
            horizon_threshold_deg: HORIZON_ALTITUDE_DEG,
        }
    }

    /// Overrides the horizon altitude threshold (degrees).
    pub fn horizon_threshold(mut self, threshold_deg: f64) -> Self {
        self.horizon_threshold_deg = threshold_deg;
        self
    }

    pub fn engine(&self) -> &LongitudeEngine<P> {
        &self.engine
    }

    /// Computes the full three-view Panchanga for a request.
    ///
    /// An absent full moon within the search horizon degrades the result
    /// (the block is `None`); every other failure aborts the request,
    /// since the day Panchanga is meaningless without a valid sunrise.
    ///
    /// # Errors
    /// `InvalidInput` for malformed zone or coordinates, `OutOfRange` for
    /// instants outside the supported span, `Provider` for ephemeris
    /// failures, and `NoEventFound` when sunrise or sunset is absent from
    /// the scanned day.
    ///
    /// # Example
    /// ```rust
    /// use chrono::{NaiveDate, NaiveTime};
    /// use drik::{Panchanga, PanchangaRequest, Vsop87Provider};
    ///
    /// let request = PanchangaRequest::new(
    ///     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
    ///     NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
    ///     "Asia/Kolkata",
    ///     13.6288,
    ///     79.4192,
    /// );
    /// let result = Panchanga::new(Vsop87Provider).compute(&request).unwrap();
    /// assert!((1..=30).contains(&result.instant.elements.tithi));
    /// ```
    pub fn compute(&self, request: &PanchangaRequest) -> Result<PanchangaResult, DrikError> {
        let location = request.location()?;
        let zone = time::resolve_zone(&request.timezone)?;
        let instant = time::civil_to_instant(request.date, request.time, zone)?;

        let instant_elements = self.elements_at(instant.jd())?;

        let horizon = HorizonFinder::with_threshold(self.engine.provider(), self.horizon_threshold_deg);
        let events = horizon.find(request.date, zone, &location)?;
        let day_by_sunrise = DayPanchanga {
            sunrise_local: time::jd_to_local(events.sunrise_jd, zone)?,
            sunset_local: time::jd_to_local(events.sunset_jd, zone)?,
            elements: self.elements_at(events.sunrise_jd)?,
        };

        let full_moon = match SyzygyFinder::new(&self.engine).next_full_moon(instant.jd()) {
            Ok(jd) => {
                let moon = self.engine.sidereal_longitude(jd, Body::Moon)?;
                let (nakshatra_index, nakshatra_name) = elements::nakshatra(moon);
                let utc = time::jd_to_utc(jd)?;
                Some(FullMoonEvent {
                    utc,
                    local: utc.with_timezone(&zone),
                    nakshatra: nakshatra_name,
                    masa: masa::masa_for_nakshatra(nakshatra_index),
                })
            }
            Err(DrikError::NoEventFound { .. }) => None,
            Err(other) => return Err(other),
        };

        Ok(PanchangaResult {
            input: request.clone(),
            instant: InstantPanchanga {
                local_time: instant.local(),
                elements: instant_elements,
            },
            day_by_sunrise,
            full_moon,
        })
    }

    /// Elements from the Moon and Sun sidereal longitudes at a Julian day.
    fn elements_at(&self, jd: f64) -> Result<PanchangaElements, DrikError> {
        let moon = self.engine.sidereal_longitude(jd, Body::Moon)?;
        let sun = self.engine.sidereal_longitude(jd, Body::Sun)?;
        Ok(elements::elements_at(moon, sun))
    }
}
