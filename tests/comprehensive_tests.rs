use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use drik::astronomy::longitude::normalize_deg;
use drik::astronomy::sunrise::HORIZON_ALTITUDE_DEG;
use drik::time::{civil_to_instant, utc_to_jd};
use drik::{
    Body, DrikError, EphemerisProvider, EquatorialPosition, Frame, HorizonFinder, Location,
    LongitudeEngine, Panchanga, PanchangaRequest, SyzygyFinder, Vsop87Provider,
};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Synthetic sky for horizon tests: a sun pinned to RA 0 / dec 0 and a
/// sidereal clock arranged so the sun culminates exactly at `noon_jd`.
/// At the equator its altitude is then `90 - |t - noon| * 360` degrees.
#[derive(Debug)]
struct MeridianSun {
    noon_jd: f64,
}

impl EphemerisProvider for MeridianSun {
    fn frame(&self) -> Frame {
        Frame::Sidereal
    }

    fn ecliptic_longitude(&self, _jd: f64, body: Body) -> Result<f64, DrikError> {
        // Fixed longitudes: elongation stays at 90, no syzygy ever occurs
        Ok(match body {
            Body::Moon => 100.0,
            Body::Sun => 10.0,
        })
    }

    fn equatorial_position(&self, _jd: f64, _body: Body) -> Result<EquatorialPosition, DrikError> {
        Ok(EquatorialPosition { right_ascension_deg: 0.0, declination_deg: 0.0 })
    }

    fn sidereal_time(&self, jd: f64) -> Result<f64, DrikError> {
        Ok(((jd - self.noon_jd) * 24.0).rem_euclid(24.0))
    }
}

/// Synthetic circumpolar sky: a body fixed at the celestial pole never
/// crosses the horizon at mid latitudes.
#[derive(Debug)]
struct PolarSun;

impl EphemerisProvider for PolarSun {
    fn frame(&self) -> Frame {
        Frame::Sidereal
    }

    fn ecliptic_longitude(&self, _jd: f64, _body: Body) -> Result<f64, DrikError> {
        Ok(0.0)
    }

    fn equatorial_position(&self, _jd: f64, _body: Body) -> Result<EquatorialPosition, DrikError> {
        Ok(EquatorialPosition { right_ascension_deg: 0.0, declination_deg: 90.0 })
    }

    fn sidereal_time(&self, _jd: f64) -> Result<f64, DrikError> {
        Ok(0.0)
    }
}

/// Synthetic elongation ramp: the sun rests at 0 while the moon advances
/// linearly, so elongation(t) = initial + rate * (t - epoch), mod 360.
#[derive(Debug)]
struct ElongationRamp {
    epoch_jd: f64,
    initial_deg: f64,
    rate_deg_per_day: f64,
}

impl EphemerisProvider for ElongationRamp {
    fn frame(&self) -> Frame {
        Frame::Sidereal
    }

    fn ecliptic_longitude(&self, jd: f64, body: Body) -> Result<f64, DrikError> {
        Ok(match body {
            Body::Sun => 0.0,
            Body::Moon => {
                normalize_deg(self.initial_deg + self.rate_deg_per_day * (jd - self.epoch_jd))
            }
        })
    }

    fn equatorial_position(&self, _jd: f64, _body: Body) -> Result<EquatorialPosition, DrikError> {
        Ok(EquatorialPosition { right_ascension_deg: 0.0, declination_deg: 0.0 })
    }

    fn sidereal_time(&self, _jd: f64) -> Result<f64, DrikError> {
        Ok(0.0)
    }
}

/// A provider whose queries always fail.
#[derive(Debug)]
struct BrokenProvider;

impl EphemerisProvider for BrokenProvider {
    fn frame(&self) -> Frame {
        Frame::Tropical
    }

    fn ecliptic_longitude(&self, _jd: f64, _body: Body) -> Result<f64, DrikError> {
        Err(DrikError::provider("kernel unavailable"))
    }

    fn equatorial_position(&self, _jd: f64, _body: Body) -> Result<EquatorialPosition, DrikError> {
        Err(DrikError::provider("kernel unavailable"))
    }

    fn sidereal_time(&self, _jd: f64) -> Result<f64, DrikError> {
        Err(DrikError::provider("kernel unavailable"))
    }
}

fn utc_midnight_jd(date: NaiveDate) -> f64 {
    let instant = civil_to_instant(date, NaiveTime::MIN, Tz::UTC).unwrap();
    instant.jd()
}

#[test]
fn test_horizon_finder_hits_known_crossing() {
    let date = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
    let midnight = utc_midnight_jd(date);
    let provider = MeridianSun { noon_jd: midnight + 0.5 };

    let finder = HorizonFinder::new(&provider);
    let events = finder.find(date, Tz::UTC, &Location::new(0.0, 0.0)).unwrap();

    // Altitude hits the threshold at noon -/+ (90 - threshold)/360 days
    let offset = (90.0 - HORIZON_ALTITUDE_DEG) / 360.0;
    let expected_rise = provider.noon_jd - offset;
    let expected_set = provider.noon_jd + offset;

    let tolerance = 10.0 / SECONDS_PER_DAY;
    assert!(
        (events.sunrise_jd - expected_rise).abs() < tolerance,
        "sunrise off by {} s",
        (events.sunrise_jd - expected_rise).abs() * SECONDS_PER_DAY
    );
    assert!(
        (events.sunset_jd - expected_set).abs() < tolerance,
        "sunset off by {} s",
        (events.sunset_jd - expected_set).abs() * SECONDS_PER_DAY
    );
    assert!(events.sunrise_jd < events.sunset_jd);
}

#[test]
fn test_horizon_finder_reports_missing_events() {
    let date = NaiveDate::from_ymd_opt(2025, 6, 21).unwrap();
    let provider = PolarSun;
    let finder = HorizonFinder::new(&provider);

    // The pole-pinned body sits at a constant 45 deg altitude: no crossing
    let result = finder.find(date, Tz::UTC, &Location::new(45.0, 0.0));
    assert!(matches!(result, Err(DrikError::NoEventFound { .. })));
}

#[test]
fn test_syzygy_finder_hits_known_crossing() {
    let epoch = utc_midnight_jd(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    let provider = ElongationRamp { epoch_jd: epoch, initial_deg: 170.0, rate_deg_per_day: 12.0 };
    let engine = LongitudeEngine::new(provider);

    let found = SyzygyFinder::new(&engine).next_full_moon(epoch).unwrap();
    let expected = epoch + (180.0 - 170.0) / 12.0;
    assert!(
        (found - expected).abs() < 60.0 / SECONDS_PER_DAY,
        "full moon off by {} s",
        (found - expected).abs() * SECONDS_PER_DAY
    );
}

#[test]
fn test_syzygy_finder_ignores_the_wrap_at_new_moon() {
    // Elongation starts at 350: it wraps through 360/0 (new moon) long
    // before it reaches 180. A naive comparison would misfire at the wrap.
    let epoch = utc_midnight_jd(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    let provider = ElongationRamp { epoch_jd: epoch, initial_deg: 350.0, rate_deg_per_day: 12.0 };
    let engine = LongitudeEngine::new(provider);

    let found = SyzygyFinder::new(&engine).next_full_moon(epoch).unwrap();
    let expected = epoch + (360.0 - 350.0 + 180.0) / 12.0;
    assert!(
        (found - expected).abs() < 60.0 / SECONDS_PER_DAY,
        "full moon off by {} s (wrap misfire would be ~15 days early)",
        (found - expected).abs() * SECONDS_PER_DAY
    );
}

#[test]
fn test_syzygy_finder_exhausts_horizon() {
    // Monotone but too slow to ever reach 180 within 40 days
    let epoch = utc_midnight_jd(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    let provider = ElongationRamp { epoch_jd: epoch, initial_deg: 90.0, rate_deg_per_day: 0.5 };
    let engine = LongitudeEngine::new(provider);

    let result = SyzygyFinder::new(&engine).next_full_moon(epoch);
    assert!(matches!(result, Err(DrikError::NoEventFound { .. })));
}

#[test]
fn test_assembler_degrades_without_full_moon() {
    let date = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
    let midnight = utc_midnight_jd(date);
    let provider = MeridianSun { noon_jd: midnight + 0.5 };

    let request = PanchangaRequest::new(
        date,
        NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        "UTC",
        0.0,
        0.0,
    );
    let result = Panchanga::new(provider).compute(&request).unwrap();

    // Elongation is pinned at 90: no full moon, but the day block stands
    assert!(result.full_moon.is_none());
    assert!(result.day_by_sunrise.sunrise_local < result.day_by_sunrise.sunset_local);
    // Moon 100 / Sun 10: separation 90 -> tithi 8, Shukla
    assert_eq!(result.instant.elements.tithi, 8);
    assert_eq!(result.day_by_sunrise.elements.tithi, 8);
}

#[test]
fn test_assembler_honors_custom_horizon_threshold() {
    let date = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
    let midnight = utc_midnight_jd(date);
    let request = PanchangaRequest::new(
        date,
        NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        "UTC",
        0.0,
        0.0,
    );

    let standard = Panchanga::new(MeridianSun { noon_jd: midnight + 0.5 })
        .compute(&request)
        .unwrap();
    // Civil twilight: the sun reaches -6 deg earlier than -0.8333 deg
    let twilight = Panchanga::new(MeridianSun { noon_jd: midnight + 0.5 })
        .horizon_threshold(-6.0)
        .compute(&request)
        .unwrap();

    assert!(twilight.day_by_sunrise.sunrise_local < standard.day_by_sunrise.sunrise_local);
    assert!(twilight.day_by_sunrise.sunset_local > standard.day_by_sunrise.sunset_local);
}

#[test]
fn test_assembler_rejects_bad_input() {
    let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let time = NaiveTime::from_hms_opt(6, 0, 0).unwrap();

    let bad_zone = PanchangaRequest::new(date, time, "Atlantis/Nowhere", 0.0, 0.0);
    assert!(matches!(
        Panchanga::new(Vsop87Provider).compute(&bad_zone),
        Err(DrikError::InvalidInput { .. })
    ));

    let bad_latitude = PanchangaRequest::new(date, time, "UTC", 99.0, 0.0);
    assert!(matches!(
        Panchanga::new(Vsop87Provider).compute(&bad_latitude),
        Err(DrikError::InvalidInput { .. })
    ));
}

#[test]
fn test_assembler_propagates_provider_failure() {
    let request = PanchangaRequest::new(
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
        "UTC",
        0.0,
        0.0,
    );
    let result = Panchanga::new(BrokenProvider).compute(&request);
    assert!(matches!(result, Err(DrikError::Provider { .. })));
}

#[test]
fn test_identical_requests_are_deterministic() {
    let request = PanchangaRequest::default_site(
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
    );

    let panchanga = Panchanga::new(Vsop87Provider);
    let first = panchanga.compute(&request).unwrap();
    let second = panchanga.compute(&request).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_end_to_end_tirupati() {
    let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let time = NaiveTime::from_hms_opt(6, 0, 0).unwrap();
    let request = PanchangaRequest::default_site(date, time);

    let result = drik::compute(&request).unwrap();

    // Day view
    let day = &result.day_by_sunrise;
    assert!(day.sunrise_local < day.sunset_local);
    assert_eq!(day.sunrise_local.date_naive(), date);
    assert!((1..=30).contains(&day.elements.tithi));

    // Instant view
    assert!((1..=30).contains(&result.instant.elements.tithi));
    assert!((0.0..360.0).contains(&result.instant.elements.moon_lon_sidereal_deg));
    assert!((0.0..360.0).contains(&result.instant.elements.sun_lon_sidereal_deg));

    // Full-moon view: strictly after the request, within 30 days
    let full_moon = result.full_moon.expect("a full moon within the horizon");
    let request_utc = Utc.with_ymd_and_hms(2025, 1, 1, 0, 30, 0).unwrap();
    assert!(full_moon.utc > request_utc);
    assert!(utc_to_jd(full_moon.utc) - utc_to_jd(request_utc) < 30.0);
    // January 2025's full moon falls on the 13th (UTC)
    assert_eq!(full_moon.utc.date_naive(), NaiveDate::from_ymd_opt(2025, 1, 13).unwrap());
    assert!(!full_moon.nakshatra.is_empty());
}
