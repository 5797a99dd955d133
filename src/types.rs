use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DrikError;

/// Geographic location of the observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees, -90..=90, north positive.
    pub latitude: f64,
    /// Longitude in degrees, -180..=180, east positive.
    pub longitude: f64,
    /// Elevation above sea level in meters.
    pub elevation_m: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude, elevation_m: 0.0 }
    }

    pub fn with_elevation(latitude: f64, longitude: f64, elevation_m: f64) -> Self {
        Self { latitude, longitude, elevation_m }
    }

    /// Checks coordinate ranges.
    ///
    /// # Errors
    /// Returns `InvalidInput` for non-finite values or coordinates outside
    /// -90..=90 / -180..=180.
    pub fn validate(&self) -> Result<(), DrikError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(DrikError::invalid_input(format!(
                "latitude {} outside -90..=90",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(DrikError::invalid_input(format!(
                "longitude {} outside -180..=180",
                self.longitude
            )));
        }
        if !self.elevation_m.is_finite() {
            return Err(DrikError::invalid_input("elevation must be finite"));
        }
        Ok(())
    }
}

/// Half of the lunar month: waxing or waning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Paksha {
    Shukla,
    Krishna,
}

impl Paksha {
    pub fn is_waxing(&self) -> bool {
        matches!(self, Paksha::Shukla)
    }
}

impl fmt::Display for Paksha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Paksha::Shukla => "Shukla (Waxing)",
            Paksha::Krishna => "Krishna (Waning)",
        };
        write!(f, "{}", s)
    }
}

/// The five classical Panchanga elements at a single instant, together with
/// the sidereal longitudes they were derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanchangaElements {
    /// Lunar day, 1..=30.
    pub tithi: u8,
    pub paksha: Paksha,
    /// Lunar mansion index, 1..=27.
    pub nakshatra_index: u8,
    pub nakshatra: &'static str,
    /// Yoga index, 1..=27.
    pub yoga_index: u8,
    pub yoga: &'static str,
    /// Slot in the 60-karana cycle, 0..=59.
    pub karana_index: u8,
    pub karana: &'static str,
    /// Zodiac sign index of the Moon, 0..=11.
    pub rashi_index: u8,
    pub rashi: &'static str,
    /// Moon sidereal longitude, degrees in [0, 360).
    pub moon_lon_sidereal_deg: f64,
    /// Sun sidereal longitude, degrees in [0, 360).
    pub sun_lon_sidereal_deg: f64,
}

/// Elements at the requested instant, with its local time echo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstantPanchanga {
    pub local_time: DateTime<Tz>,
    pub elements: PanchangaElements,
}

/// The sunrise-anchored calendar day: by convention the official elements of
/// a civil day are those in force at sunrise, not at midnight or at the
/// query instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPanchanga {
    pub sunrise_local: DateTime<Tz>,
    pub sunset_local: DateTime<Tz>,
    /// Elements evaluated at the sunrise instant.
    pub elements: PanchangaElements,
}

/// The next full moon after the requested instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullMoonEvent {
    pub utc: DateTime<Utc>,
    pub local: DateTime<Tz>,
    /// Nakshatra occupied by the Moon at the event.
    pub nakshatra: &'static str,
    /// Lunar month anchored by that nakshatra, when the traditional table
    /// defines one.
    pub masa: Option<&'static str>,
}

/// Input parameters for a Panchanga computation, echoed in the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanchangaRequest {
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// IANA timezone name, e.g. "Asia/Kolkata".
    pub timezone: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation_m: f64,
}

impl PanchangaRequest {
    pub fn new(
        date: NaiveDate,
        time: NaiveTime,
        timezone: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            date,
            time,
            timezone: timezone.into(),
            latitude,
            longitude,
            elevation_m: 0.0,
        }
    }

    pub fn elevation_m(mut self, elevation_m: f64) -> Self {
        self.elevation_m = elevation_m;
        self
    }

    /// A request for the default site (Tirupati, Asia/Kolkata).
    pub fn default_site(date: NaiveDate, time: NaiveTime) -> Self {
        Self::new(date, time, "Asia/Kolkata", 13.6288, 79.4192)
    }

    /// The validated observer location.
    ///
    /// # Errors
    /// Returns `InvalidInput` for out-of-range coordinates.
    pub fn location(&self) -> Result<Location, DrikError> {
        let location = Location::with_elevation(self.latitude, self.longitude, self.elevation_m);
        location.validate()?;
        Ok(location)
    }
}

/// The complete three-view result: elements at the instant, the
/// sunrise-anchored day, and the next full moon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanchangaResult {
    /// Echo of the request.
    pub input: PanchangaRequest,
    pub instant: InstantPanchanga,
    pub day_by_sunrise: DayPanchanga,
    /// Absent when no full moon was found within the search horizon.
    pub full_moon: Option<FullMoonEvent>,
}
