//! Coordinate transforms between the ecliptic, equatorial and horizontal
//! frames.

use crate::astronomy::longitude::normalize_deg;
use crate::time::J2000_JD;

const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Mean obliquity of the ecliptic in degrees.
pub fn mean_obliquity_deg(jd: f64) -> f64 {
    let t = (jd - J2000_JD) / DAYS_PER_CENTURY;
    23.439_291_111 - 0.013_004_167 * t - 1.638_9e-7 * t * t + 5.036_1e-7 * t * t * t
}

/// Converts ecliptic longitude/latitude to equatorial right ascension and
/// declination. All arguments and results in degrees.
pub fn ecliptic_to_equatorial(lon_deg: f64, lat_deg: f64, obliquity_deg: f64) -> (f64, f64) {
    let lon = lon_deg.to_radians();
    let lat = lat_deg.to_radians();
    let eps = obliquity_deg.to_radians();

    let ra = (lon.sin() * eps.cos() - lat.tan() * eps.sin()).atan2(lon.cos());
    let dec = (lat.sin() * eps.cos() + lat.cos() * eps.sin() * lon.sin()).asin();

    (normalize_deg(ra.to_degrees()), dec.to_degrees())
}

/// Greenwich mean sidereal time in hours, [0, 24).
pub fn greenwich_mean_sidereal_hours(jd: f64) -> f64 {
    let d = jd - J2000_JD;
    let t = d / DAYS_PER_CENTURY;
    let gmst_deg =
        280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t - t * t * t / 38_710_000.0;
    normalize_deg(gmst_deg) / 15.0
}

/// Altitude of a body above the horizon in degrees, hour-angle form:
/// `sin h = sin(lat) sin(dec) + cos(lat) cos(dec) cos(H)`.
pub fn altitude_deg(
    gmst_hours: f64,
    ra_deg: f64,
    dec_deg: f64,
    latitude_deg: f64,
    longitude_deg: f64,
) -> f64 {
    let lst_deg = gmst_hours * 15.0 + longitude_deg;
    let hour_angle = (lst_deg - ra_deg).to_radians();
    let dec = dec_deg.to_radians();
    let lat = latitude_deg.to_radians();

    let sin_alt = lat.sin() * dec.sin() + lat.cos() * dec.cos() * hour_angle.cos();
    sin_alt.asin().to_degrees()
}
