//! Solar geometry pipeline: solar time alignment, declination, altitude,
//! azimuth and the sunrise/sunset window.
//!
//! The stages form a fixed dependency chain. Each stage rounds its result to
//! two decimals (see [`crate::math`]'s rounding rule) and the next stage
//! consumes the rounded value, so intermediate results are reproducible to
//! the same two-decimal precision on every platform.
//!
//! Formula lineage: the solar-time chain (local standard time meridian,
//! equation of time, time correction factor, hour angle) and the
//! altitude/azimuth decomposition follow the standard photovoltaic
//! engineering formulation (see e.g. the PVeducation collection of sun
//! position formulas).

#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]

use crate::error::{
    check_coordinates, check_day_of_year, check_hour, check_latitude, check_local_time,
    check_longitude,
};
#[cfg(feature = "chrono")]
use crate::math::round;
use crate::math::{
    acos, asin, cos, degrees_to_radians, floor, nudged_round, radians_to_degrees, sin, tan,
};
use crate::types::{LocalHours, SolarAngles, SolarPosition};
use crate::{Error, Result};

#[cfg(feature = "chrono")]
use chrono::{DateTime, Duration, NaiveTime, TimeZone, Timelike};

/// Zenith angle of the sun's upper limb at sunrise/sunset, including
/// atmospheric refraction (degrees).
const SUNRISE_ZENITH_DEGREES: f64 = 90.833;

/// Decimal places every stage result is rounded to.
const STAGE_DECIMALS: i32 = 2;

/// Calculates the local standard time meridian in radians for a whole-hour
/// UTC offset.
#[must_use]
pub fn local_standard_time_meridian(utc_offset_hours: i32) -> f64 {
    nudged_round(
        degrees_to_radians(15.0) * f64::from(utc_offset_hours),
        STAGE_DECIMALS,
    )
}

/// Calculates the equation of time in radians for a day of year.
///
/// Corrects for the eccentricity of Earth's orbit and its axial tilt.
#[must_use]
pub fn equation_of_time(day_of_year: u32) -> f64 {
    let b = degrees_to_radians((360.0 / 365.0) * (f64::from(day_of_year) - 81.0));
    nudged_round(
        9.87 * sin(2.0 * b) - 7.53 * cos(b) - 1.5 * sin(b),
        STAGE_DECIMALS,
    )
}

/// Calculates the time correction factor in radians from the longitude and
/// the two preceding stages.
#[must_use]
pub fn time_correction_factor(longitude: f64, lstm_rad: f64, eot_rad: f64) -> f64 {
    nudged_round(
        4.0 * (degrees_to_radians(longitude) - lstm_rad) + eot_rad,
        STAGE_DECIMALS,
    )
}

/// Calculates the local solar time in hours from the whole local hour and
/// the time correction factor.
#[must_use]
pub fn local_solar_time(local_hour: u32, tcf_rad: f64) -> f64 {
    nudged_round(f64::from(local_hour) + tcf_rad / 60.0, STAGE_DECIMALS)
}

/// Calculates the hour angle in radians from the local solar time.
///
/// Negative before local solar noon, positive after.
#[must_use]
pub fn hour_angle(local_solar_time: f64) -> f64 {
    nudged_round(
        degrees_to_radians(15.0) * (local_solar_time - 12.0),
        STAGE_DECIMALS,
    )
}

/// Calculates the declination angle in radians for a day of year.
#[must_use]
pub fn declination_angle(day_of_year: u32) -> f64 {
    nudged_round(
        degrees_to_radians(-23.45)
            * cos(degrees_to_radians(
                (360.0 / 365.0) * (f64::from(day_of_year) + 10.0),
            )),
        STAGE_DECIMALS,
    )
}

/// Computes the full stage-ordered record of solar time-alignment angles.
///
/// # Errors
/// Returns `InvalidLongitude` or `InvalidDateTime` for out-of-range inputs.
///
/// # Example
/// ```
/// # use solar_illuminance::position;
/// // Vienna around the June solstice, UTC+2
/// let angles = position::solar_angles(16.3738, 2, 12, 172).unwrap();
/// assert_eq!(angles.local_standard_time_meridian(), 0.52);
/// assert_eq!(angles.equation_of_time(), -1.45);
/// assert_eq!(angles.declination(), 0.41);
/// ```
pub fn solar_angles(
    longitude: f64,
    utc_offset_hours: i32,
    local_hour: u32,
    day_of_year: u32,
) -> Result<SolarAngles> {
    check_longitude(longitude)?;
    check_hour(local_hour)?;
    check_day_of_year(day_of_year)?;

    let lstm = local_standard_time_meridian(utc_offset_hours);
    let eot = equation_of_time(day_of_year);
    let tcf = time_correction_factor(longitude, lstm, eot);
    let lst = local_solar_time(local_hour, tcf);
    let hra = hour_angle(lst);
    let declination = declination_angle(day_of_year);

    Ok(SolarAngles {
        local_standard_time_meridian: lstm,
        equation_of_time: eot,
        time_correction_factor: tcf,
        local_solar_time: lst,
        hour_angle: hra,
        declination,
    })
}

/// Calculates the solar altitude in degrees.
///
/// The asin argument is guaranteed in [-1, 1] for physically valid
/// latitude/declination/hour-angle combinations; it is checked rather than
/// clamped, since clamping would alter results.
///
/// # Errors
/// Returns `InvalidLatitude` for an out-of-range latitude, or `OutOfDomain`
/// if the asin argument leaves [-1, 1].
pub fn altitude(latitude: f64, declination_rad: f64, hour_angle_rad: f64) -> Result<f64> {
    check_latitude(latitude)?;
    let lat_rad = degrees_to_radians(latitude);
    let arg = sin(declination_rad) * sin(lat_rad)
        + cos(declination_rad) * cos(lat_rad) * cos(hour_angle_rad);
    if !(-1.0..=1.0).contains(&arg) {
        return Err(Error::out_of_domain("altitude asin argument outside [-1, 1]"));
    }
    Ok(nudged_round(radians_to_degrees(asin(arg)), STAGE_DECIMALS))
}

/// Calculates the solar azimuth in degrees.
///
/// The altitude enters as its rounded degree value and is converted back to
/// radians here; the double conversion is part of the pipeline's numeric
/// contract.
///
/// # Errors
/// Returns `InvalidLatitude` for an out-of-range latitude, or `OutOfDomain`
/// if the acos argument leaves [-1, 1] (including the degenerate case of a
/// sun at the zenith, where the cosine divisor vanishes).
pub fn azimuth(
    latitude: f64,
    declination_rad: f64,
    hour_angle_rad: f64,
    altitude_degrees: f64,
) -> Result<f64> {
    check_latitude(latitude)?;
    let lat_rad = degrees_to_radians(latitude);
    let arg = ((sin(declination_rad) * cos(lat_rad))
        - (cos(declination_rad) * sin(lat_rad) * cos(hour_angle_rad)))
        / cos(degrees_to_radians(altitude_degrees));
    if !(-1.0..=1.0).contains(&arg) {
        return Err(Error::out_of_domain("azimuth acos argument outside [-1, 1]"));
    }
    Ok(nudged_round(radians_to_degrees(acos(arg)), STAGE_DECIMALS))
}

/// Calculates the refraction-corrected sunrise/sunset hour angle magnitude
/// in radians (unrounded; it feeds the sunrise and sunset hours directly).
///
/// # Errors
/// Returns `InvalidLatitude` for an out-of-range latitude, or `OutOfDomain`
/// when the sun never crosses the horizon on this day: polar day (the acos
/// argument falls below -1) and polar night (it exceeds +1) are reported as
/// distinct messages.
pub fn sunrise_hour_angle(latitude: f64, declination_rad: f64) -> Result<f64> {
    check_latitude(latitude)?;
    let lat_rad = degrees_to_radians(latitude);
    let arg = cos(degrees_to_radians(SUNRISE_ZENITH_DEGREES))
        / (cos(lat_rad) * cos(declination_rad))
        - tan(lat_rad) * tan(declination_rad);
    if !arg.is_finite() {
        return Err(Error::out_of_domain(
            "sunrise hour angle is undefined at this latitude",
        ));
    }
    if arg < -1.0 {
        return Err(Error::out_of_domain("sun never sets on this day (polar day)"));
    }
    if arg > 1.0 {
        return Err(Error::out_of_domain(
            "sun never rises on this day (polar night)",
        ));
    }
    Ok(acos(arg))
}

/// Calculates the local sunrise and sunset times as hours since local
/// midnight of the calculation day.
///
/// # Errors
/// Propagates the domain errors of [`sunrise_hour_angle`].
pub fn sunrise_sunset_hours(
    latitude: f64,
    declination_rad: f64,
    tcf_rad: f64,
) -> Result<(LocalHours, LocalHours)> {
    let extent = sunrise_hour_angle(latitude, declination_rad)?;
    let hours_per_radian = degrees_to_radians(15.0);
    let sunrise = (-extent / hours_per_radian) - tcf_rad / 60.0 + 12.0;
    let sunset = (extent / hours_per_radian) - tcf_rad / 60.0 + 12.0;
    Ok((
        LocalHours::from_hours(sunrise),
        LocalHours::from_hours(sunset),
    ))
}

/// Calculates the full solar position from resolved numeric inputs.
///
/// The whole hour of `local_time_hours` drives the solar-time chain; the
/// fractional part only decides the sun-up window comparison.
///
/// # Errors
/// Returns input-validation errors for out-of-range coordinates, time or day
/// of year, and `OutOfDomain` for polar day/night or a degenerate azimuth.
///
/// # Example
/// ```
/// # use solar_illuminance::position;
/// let position = position::solar_position_local(
///     48.2082,  // Vienna latitude
///     16.3738,  // Vienna longitude
///     2,        // UTC offset (hours)
///     12.0,     // local time (hours since midnight)
///     172,      // day of year (~June 21)
/// ).unwrap();
/// assert_eq!(position.altitude(), 65.28);
/// assert!(position.is_sun_up());
/// ```
pub fn solar_position_local(
    latitude: f64,
    longitude: f64,
    utc_offset_hours: i32,
    local_time_hours: f64,
    day_of_year: u32,
) -> Result<SolarPosition<LocalHours>> {
    check_coordinates(latitude, longitude)?;
    check_local_time(local_time_hours)?;

    let local_hour = floor(local_time_hours) as u32;
    let angles = solar_angles(longitude, utc_offset_hours, local_hour, day_of_year)?;
    let altitude_degrees = altitude(latitude, angles.declination(), angles.hour_angle())?;
    let azimuth_degrees = azimuth(
        latitude,
        angles.declination(),
        angles.hour_angle(),
        altitude_degrees,
    )?;
    let (sunrise, sunset) =
        sunrise_sunset_hours(latitude, angles.declination(), angles.time_correction_factor())?;
    let sun_up = sunrise.hours() < local_time_hours && local_time_hours < sunset.hours();

    SolarPosition::new(altitude_degrees, azimuth_degrees, sunrise, sunset, sun_up)
}

/// Calculates the full solar position for a timezone-aware date/time.
///
/// Sunrise and sunset are returned as date/times on the query's local
/// calendar day. The sun-up flag compares the query instant strictly against
/// that window, so the boundary instants themselves count as "not up".
///
/// # Errors
/// Returns input-validation errors for out-of-range coordinates, and
/// `OutOfDomain` for polar day/night or a degenerate azimuth.
///
/// # Example
/// ```
/// # #[cfg(feature = "chrono")] {
/// use solar_illuminance::position;
/// use chrono::{DateTime, FixedOffset};
///
/// let datetime = "2023-06-21T12:00:00+02:00".parse::<DateTime<FixedOffset>>().unwrap();
/// let position = position::solar_position(datetime, 48.2082, 16.3738).unwrap();
///
/// assert_eq!(position.altitude(), 65.28);
/// assert_eq!(position.sunrise().format("%H:%M").to_string(), "03:59");
/// assert_eq!(position.sunset().format("%H:%M").to_string(), "20:05");
/// # }
/// ```
#[cfg(feature = "chrono")]
#[allow(clippy::needless_pass_by_value)]
pub fn solar_position<Tz: TimeZone>(
    datetime: DateTime<Tz>,
    latitude: f64,
    longitude: f64,
) -> Result<SolarPosition<DateTime<Tz>>> {
    check_coordinates(latitude, longitude)?;

    let utc_offset = crate::time::utc_offset_hours(&datetime);
    let day_of_year = crate::time::day_of_year(&datetime);
    let angles = solar_angles(longitude, utc_offset, datetime.hour(), day_of_year)?;
    let altitude_degrees = altitude(latitude, angles.declination(), angles.hour_angle())?;
    let azimuth_degrees = azimuth(
        latitude,
        angles.declination(),
        angles.hour_angle(),
        altitude_degrees,
    )?;
    let (sunrise_hours, sunset_hours) =
        sunrise_sunset_hours(latitude, angles.declination(), angles.time_correction_factor())?;
    let sunrise = local_hours_to_datetime(&datetime, sunrise_hours)?;
    let sunset = local_hours_to_datetime(&datetime, sunset_hours)?;
    let sun_up = sunrise < datetime && datetime < sunset;

    SolarPosition::new(altitude_degrees, azimuth_degrees, sunrise, sunset, sun_up)
}

/// Anchors an hours-since-midnight value to the query's local calendar day.
#[cfg(feature = "chrono")]
fn local_hours_to_datetime<Tz: TimeZone>(
    datetime: &DateTime<Tz>,
    hours: LocalHours,
) -> Result<DateTime<Tz>> {
    let midnight = datetime.date_naive().and_time(NaiveTime::MIN);
    let microseconds = round(hours.hours() * 3.6e9) as i64;
    let naive = midnight + Duration::microseconds(microseconds);
    crate::time::local_datetime(&datetime.timezone(), naive)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_local_standard_time_meridian() {
        assert_eq!(local_standard_time_meridian(2), 0.52);
        assert_eq!(local_standard_time_meridian(-5), -1.31);
        assert_eq!(local_standard_time_meridian(0), 0.0);
    }

    #[test]
    fn test_equation_of_time() {
        // B vanishes on day 81; only the cosine term remains.
        assert_eq!(equation_of_time(81), -7.53);
        assert_eq!(equation_of_time(172), -1.45);
        assert_eq!(equation_of_time(264), 7.71);
        assert_eq!(equation_of_time(355), 1.38);
    }

    #[test]
    fn test_declination_angle() {
        assert_eq!(declination_angle(172), 0.41);
        assert_eq!(declination_angle(355), -0.41);
        assert_eq!(declination_angle(81), 0.0);
    }

    #[test]
    fn test_vienna_solstice_stage_chain() {
        let angles = solar_angles(16.3738, 2, 12, 172).unwrap();
        assert_eq!(angles.local_standard_time_meridian(), 0.52);
        assert_eq!(angles.equation_of_time(), -1.45);
        assert_eq!(angles.time_correction_factor(), -2.39);
        assert_eq!(angles.local_solar_time(), 11.96);
        assert_eq!(angles.hour_angle(), -0.01);
        assert_eq!(angles.declination(), 0.41);
    }

    #[test]
    fn test_solar_angles_input_validation() {
        assert!(solar_angles(200.0, 2, 12, 172).is_err());
        assert!(solar_angles(16.3738, 2, 24, 172).is_err());
        assert!(solar_angles(16.3738, 2, 12, 0).is_err());
        assert!(solar_angles(16.3738, 2, 12, 367).is_err());
    }

    #[test]
    fn test_altitude_and_azimuth_vienna() {
        let angles = solar_angles(16.3738, 2, 12, 172).unwrap();
        let alt = altitude(48.2082, angles.declination(), angles.hour_angle()).unwrap();
        assert!((alt - 65.28).abs() < EPSILON);

        let azi = azimuth(48.2082, angles.declination(), angles.hour_angle(), alt).unwrap();
        assert!((azi - 178.86).abs() < EPSILON);
    }

    #[test]
    fn test_sunrise_before_sunset() {
        let angles = solar_angles(16.3738, 2, 12, 172).unwrap();
        let (sunrise, sunset) =
            sunrise_sunset_hours(48.2082, angles.declination(), angles.time_correction_factor())
                .unwrap();
        assert!((sunrise.hours() - 3.995422659103312).abs() < EPSILON);
        assert!((sunset.hours() - 20.084244007563356).abs() < EPSILON);
        assert!(sunrise.hours() < sunset.hours());
    }

    #[test]
    fn test_polar_day_and_night_are_domain_errors() {
        let summer = declination_angle(172);
        let winter = declination_angle(355);

        let polar_day = sunrise_hour_angle(78.0, summer);
        assert_eq!(
            polar_day,
            Err(Error::out_of_domain("sun never sets on this day (polar day)"))
        );

        let polar_night = sunrise_hour_angle(78.0, winter);
        assert_eq!(
            polar_night,
            Err(Error::out_of_domain(
                "sun never rises on this day (polar night)"
            ))
        );

        // Mid latitudes see a regular day in both seasons.
        assert!(sunrise_hour_angle(48.2082, summer).is_ok());
        assert!(sunrise_hour_angle(48.2082, winter).is_ok());
    }

    #[test]
    fn test_solar_position_local_sun_window() {
        let noon = solar_position_local(48.2082, 16.3738, 2, 12.0, 172).unwrap();
        assert!(noon.is_sun_up());

        let midnight = solar_position_local(48.2082, 16.3738, 2, 0.0, 172).unwrap();
        assert!(!midnight.is_sun_up());
        assert!((midnight.altitude() - -18.3).abs() < EPSILON);
    }

    #[test]
    fn test_sun_window_boundaries_count_as_down() {
        let angles = solar_angles(16.3738, 2, 12, 172).unwrap();
        let (sunrise, _) =
            sunrise_sunset_hours(48.2082, angles.declination(), angles.time_correction_factor())
                .unwrap();

        // Query exactly at the sunrise instant: strictly-less comparisons
        // leave the flag false.
        let at_sunrise =
            solar_position_local(48.2082, 16.3738, 2, sunrise.hours(), 172).unwrap();
        assert!(!at_sunrise.is_sun_up());
    }

    #[cfg(feature = "chrono")]
    mod chrono_tests {
        use super::super::*;
        use chrono::{DateTime, Datelike, FixedOffset};

        #[test]
        fn test_solar_position_datetime_matches_numeric_core() {
            let datetime = "2023-06-21T12:00:00+02:00"
                .parse::<DateTime<FixedOffset>>()
                .unwrap();
            let by_datetime = solar_position(datetime, 48.2082, 16.3738).unwrap();
            let by_components = solar_position_local(48.2082, 16.3738, 2, 12.0, 172).unwrap();

            assert_eq!(by_datetime.altitude(), by_components.altitude());
            assert_eq!(by_datetime.azimuth(), by_components.azimuth());
            assert_eq!(by_datetime.is_sun_up(), by_components.is_sun_up());
        }

        #[test]
        fn test_sunrise_sunset_on_query_day() {
            let datetime = "2023-06-21T12:00:00+02:00"
                .parse::<DateTime<FixedOffset>>()
                .unwrap();
            let position = solar_position(datetime, 48.2082, 16.3738).unwrap();

            assert_eq!(position.sunrise().ordinal(), 172);
            assert_eq!(position.sunset().ordinal(), 172);
            assert_eq!(position.sunrise().format("%H:%M").to_string(), "03:59");
            assert_eq!(position.sunset().format("%H:%M").to_string(), "20:05");
            assert!(position.sunrise() < position.sunset());
        }
    }
}
