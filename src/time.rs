//! Civil time to astronomical time conversion.
//!
//! Civil datetimes arrive as date + time + IANA zone and become a single
//! real-valued Julian day (UT) that the ephemeris provider and the search
//! loops can do arithmetic on. Conversions are memoized in a small
//! thread-local cache because one request converts the same instants
//! repeatedly (sunrise recomputation, full-moon search).

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use smallvec::SmallVec;
use std::cell::RefCell;

use crate::error::DrikError;

/// Julian day of the Unix epoch (1970-01-01T00:00:00 UTC).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;
/// Julian day of J2000.0 (2000-01-01T12:00:00).
pub const J2000_JD: f64 = 2_451_545.0;
/// Lower bound of the supported Julian-day window.
pub const JD_MIN: f64 = 2_000_000.0;
/// Upper bound of the supported Julian-day window.
pub const JD_MAX: f64 = 3_500_000.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;
const CACHE_CAPACITY: usize = 64;

// Memo of civil -> JD conversions, FIFO-evicted at capacity. Thread-local,
// so concurrent requests never contend. Optimization only: evicting or
// clearing it cannot change any result.
thread_local! {
    static JD_CACHE: RefCell<SmallVec<[(NaiveDateTime, Tz, f64); CACHE_CAPACITY]>> =
        const { RefCell::new(SmallVec::new_const()) };
}

/// An instant on the uniform timeline: a UT Julian day plus the civil
/// local datetime it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct Instant {
    jd: f64,
    local: DateTime<Tz>,
}

impl Instant {
    /// The Julian day (UT).
    pub fn jd(&self) -> f64 {
        self.jd
    }

    /// The originating civil datetime, zone attached.
    pub fn local(&self) -> DateTime<Tz> {
        self.local
    }

    /// The originating IANA zone.
    pub fn zone(&self) -> Tz {
        self.local.timezone()
    }
}

/// Resolves an IANA zone name (e.g. "Asia/Kolkata").
///
/// # Errors
/// Returns `InvalidInput` for names the tz database does not know.
pub fn resolve_zone(name: &str) -> Result<Tz, DrikError> {
    name.parse::<Tz>()
        .map_err(|_| DrikError::invalid_input(format!("unknown timezone {name:?}")))
}

/// Converts a civil local datetime to an [`Instant`].
///
/// Ambiguous local times (DST fall-back) resolve to the earlier offset;
/// nonexistent local times (DST spring-forward gap) are rejected.
///
/// # Errors
/// Returns `InvalidInput` for nonexistent local times and `OutOfRange` when
/// the Julian day falls outside the supported window.
pub fn civil_to_instant(date: NaiveDate, time: NaiveTime, zone: Tz) -> Result<Instant, DrikError> {
    let naive = date.and_time(time);

    if let Some(jd) = cache_lookup(naive, zone) {
        let local = jd_to_local(jd, zone)?;
        return Ok(Instant { jd, local });
    }

    let local = match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            return Err(DrikError::invalid_input(format!(
                "local time {naive} does not exist in zone {zone}"
            )));
        }
    };

    let jd = check_jd(utc_to_jd(local.with_timezone(&Utc)))?;
    cache_store(naive, zone, jd);
    Ok(Instant { jd, local })
}

/// Converts a UTC datetime to a Julian day (UT).
pub fn utc_to_jd(dt: DateTime<Utc>) -> f64 {
    UNIX_EPOCH_JD + dt.timestamp_millis() as f64 / MILLIS_PER_DAY
}

/// Converts a Julian day (UT) back to a UTC datetime, millisecond resolution.
///
/// # Errors
/// Returns `OutOfRange` when the Julian day falls outside the supported
/// window.
pub fn jd_to_utc(jd: f64) -> Result<DateTime<Utc>, DrikError> {
    check_jd(jd)?;
    let millis = ((jd - UNIX_EPOCH_JD) * MILLIS_PER_DAY).round() as i64;
    DateTime::from_timestamp_millis(millis).ok_or_else(|| DrikError::out_of_range(jd))
}

/// Converts a Julian day (UT) to a civil datetime in `zone`.
///
/// # Errors
/// Returns `OutOfRange` when the Julian day falls outside the supported
/// window.
pub fn jd_to_local(jd: f64, zone: Tz) -> Result<DateTime<Tz>, DrikError> {
    Ok(jd_to_utc(jd)?.with_timezone(&zone))
}

/// Validates a Julian day against the supported window.
pub(crate) fn check_jd(jd: f64) -> Result<f64, DrikError> {
    if !jd.is_finite() || jd <= JD_MIN || jd >= JD_MAX {
        return Err(DrikError::out_of_range(jd));
    }
    Ok(jd)
}

fn cache_lookup(naive: NaiveDateTime, zone: Tz) -> Option<f64> {
    JD_CACHE.with(|cache| {
        cache
            .borrow()
            .iter()
            .find(|(n, z, _)| *n == naive && *z == zone)
            .map(|(_, _, jd)| *jd)
    })
}

fn cache_store(naive: NaiveDateTime, zone: Tz, jd: f64) {
    JD_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if cache.len() == CACHE_CAPACITY {
            cache.remove(0);
        }
        cache.push((naive, zone, jd));
    });
}
