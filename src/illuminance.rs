//! Illuminance and irradiance pipeline, and the combined daylight query.
//!
//! Builds on the solar geometry of [`crate::position`]: extraterrestrial
//! illuminance is attenuated by air mass and a cloud-dependent extinction
//! coefficient, a diffuse sky component is added, and clear-sky irradiance
//! is scaled by the clear-sky index.
//!
//! The air-mass approximation uses the Kasten & Young (1989) coefficients.
//! Downstream of the altitude stage, the pipeline feeds the rounded degree
//! value of the altitude to the trigonometric functions without conversion;
//! this is part of the pipeline's numeric contract and is kept exactly
//! (altitudes and their sines here are model parameters, not geometry).

use crate::math::{cos, degrees_to_radians, exp, nudged_round, powf, sin, PI};
use crate::position;
use crate::types::{CloudCoefficients, CloudCover, DaylightReport, Illuminance, LocalHours};
use crate::{Error, Result};

#[cfg(feature = "chrono")]
use chrono::{DateTime, TimeZone};

/// Mean extraterrestrial illuminance (klx).
const EXTRATERRESTRIAL_MEAN_KLX: f64 = 129.0;

/// Seasonal modulation amplitude of the extraterrestrial illuminance.
const EXTRATERRESTRIAL_AMPLITUDE: f64 = 0.034;

/// Period in days of the extraterrestrial illuminance modulation.
///
/// 356, not 365: the value is carried unchanged from the published model.
const EXTRATERRESTRIAL_PERIOD_DAYS: f64 = 356.0;

/// Cloud fraction substituted for exactly saturated cover, where the raw
/// power law would degenerate.
const SATURATED_COVER_SUBSTITUTE: f64 = 1.0882;

/// Decimal places every stage result is rounded to.
const STAGE_DECIMALS: i32 = 2;

/// Calculates the extraterrestrial illuminance in kilolux for a day of year.
///
/// # Example
/// ```
/// # use solar_illuminance::illuminance;
/// assert_eq!(illuminance::extraterrestrial_illuminance(172), 124.66);
/// ```
#[must_use]
pub fn extraterrestrial_illuminance(day_of_year: u32) -> f64 {
    nudged_round(
        EXTRATERRESTRIAL_MEAN_KLX
            * (1.0
                + EXTRATERRESTRIAL_AMPLITUDE
                    * cos(((2.0 * PI) / EXTRATERRESTRIAL_PERIOD_DAYS)
                        * (f64::from(day_of_year) - 2.0))),
        STAGE_DECIMALS,
    )
}

/// Estimates the clear-sky index from cloud coverage.
///
/// Monotonically non-decreasing in the coverage; exactly saturated cover is
/// substituted with a fixed fraction before the power law is applied, so
/// 100% coverage yields an index of 1.0 rather than 0.75.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn clear_sky_index(cloud_cover: CloudCover) -> f64 {
    let fraction = cloud_cover.fraction();
    let effective = if fraction == 1.0 {
        SATURATED_COVER_SUBSTITUTE
    } else {
        fraction
    };
    nudged_round(0.75 * powf(effective, 3.4), STAGE_DECIMALS)
}

/// Calculates the relative air mass for a solar altitude in degrees, using
/// the Kasten & Young (1989) approximation.
///
/// The zenith distance enters both terms of the denominator in radians.
///
/// # Errors
/// Returns `OutOfDomain` if the denominator vanishes and the quotient is not
/// finite (this can only happen with the sun very close to the horizon).
pub fn air_mass(altitude_degrees: f64) -> Result<f64> {
    let zenith_rad = degrees_to_radians(90.0 - altitude_degrees);
    let value = 1.0 / (cos(zenith_rad) + 0.50572 / powf(96.07995 - zenith_rad, 1.6364));
    if !value.is_finite() {
        return Err(Error::out_of_domain("air mass diverges at this altitude"));
    }
    Ok(nudged_round(value, STAGE_DECIMALS))
}

/// Attenuates the extraterrestrial illuminance into direct beam illuminance
/// (klx) through the air mass and the extinction coefficient.
///
/// Overcast coefficients carry no extinction coefficient; the direct beam is
/// exactly zero then.
#[must_use]
pub fn direct_illuminance(
    et_illuminance: f64,
    air_mass: f64,
    coefficients: &CloudCoefficients,
) -> f64 {
    match coefficients.extinction() {
        None => 0.0,
        Some(extinction) => nudged_round(
            et_illuminance * exp(-extinction * air_mass),
            STAGE_DECIMALS,
        ),
    }
}

/// Projects the direct beam illuminance onto the horizontal plane (klx).
///
/// The altitude enters the sine as its raw degree value.
#[must_use]
pub fn horizontal_illuminance(direct_illuminance: f64, altitude_degrees: f64) -> f64 {
    nudged_round(direct_illuminance * sin(altitude_degrees), STAGE_DECIMALS)
}

/// Calculates the diffuse sky illuminance on the horizontal plane (klx) as
/// `A + B·sin(altitude)^C` with the tier coefficients.
///
/// The altitude enters the sine as its raw degree value.
///
/// # Errors
/// Returns `OutOfDomain` when the sine is negative and the tier exponent is
/// fractional, which leaves the power undefined.
pub fn horizontal_sky_illuminance(
    altitude_degrees: f64,
    coefficients: &CloudCoefficients,
) -> Result<f64> {
    let value = coefficients.sky_a()
        + coefficients.sky_b() * powf(sin(altitude_degrees), coefficients.sky_c());
    if !value.is_finite() {
        return Err(Error::out_of_domain(
            "sky illuminance is undefined for this altitude and tier",
        ));
    }
    Ok(nudged_round(value, STAGE_DECIMALS))
}

/// Combines the sky and horizontal components into the outdoor daylight
/// illuminance in lux, or zero while the sun is down.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn daylight_illuminance(horizontal_sky: f64, horizontal: f64, sun_up: bool) -> i64 {
    if sun_up {
        nudged_round(1000.0 * (horizontal_sky + horizontal), 0) as i64
    } else {
        0
    }
}

/// Estimates the clear-sky irradiance in W/m² from the solar altitude.
///
/// The altitude enters the sine as its raw degree value.
#[must_use]
pub fn clear_sky_irradiance(altitude_degrees: f64) -> f64 {
    nudged_round(910.0 * sin(altitude_degrees) - 30.0, STAGE_DECIMALS)
}

/// Scales the clear-sky irradiance by the cloud transmission (W/m²).
#[must_use]
pub fn cloud_adjusted_irradiance(clear_sky_irradiance: f64, clear_sky_index: f64) -> f64 {
    nudged_round(clear_sky_irradiance * (1.0 - clear_sky_index), STAGE_DECIMALS)
}

/// Runs the illuminance stages for an already-computed solar altitude.
///
/// # Errors
/// Returns `OutOfDomain` if the air mass or sky illuminance is undefined for
/// this altitude.
pub fn illuminance_estimate(
    altitude_degrees: f64,
    day_of_year: u32,
    cloud_cover: CloudCover,
    sun_up: bool,
) -> Result<Illuminance> {
    let extraterrestrial = extraterrestrial_illuminance(day_of_year);
    let clear_sky = clear_sky_index(cloud_cover);
    let coefficients = CloudCoefficients::for_clear_sky_index(clear_sky);
    let air = air_mass(altitude_degrees)?;
    let direct = direct_illuminance(extraterrestrial, air, &coefficients);
    let horizontal = horizontal_illuminance(direct, altitude_degrees);
    let horizontal_sky = horizontal_sky_illuminance(altitude_degrees, &coefficients)?;
    let daylight = daylight_illuminance(horizontal_sky, horizontal, sun_up);
    let clear_irradiance = clear_sky_irradiance(altitude_degrees);
    let adjusted_irradiance = cloud_adjusted_irradiance(clear_irradiance, clear_sky);

    Ok(Illuminance {
        extraterrestrial,
        air_mass: air,
        clear_sky_index: clear_sky,
        direct,
        horizontal,
        horizontal_sky,
        daylight,
        clear_sky_irradiance: clear_irradiance,
        cloud_adjusted_irradiance: adjusted_irradiance,
    })
}

/// Runs the whole daylight pipeline from resolved numeric inputs: solar
/// position first, then the illuminance stages on its altitude.
///
/// # Errors
/// Returns input-validation errors for out-of-range inputs and `OutOfDomain`
/// for the pipeline's mathematical edge cases (polar day/night, degenerate
/// azimuth, undefined air mass or sky illuminance).
///
/// # Example
/// ```
/// # use solar_illuminance::{illuminance, CloudCover};
/// let report = illuminance::daylight_report_local(
///     48.2082,                 // Vienna latitude
///     16.3738,                 // Vienna longitude
///     2,                       // UTC offset (hours)
///     12.0,                    // local time (hours since midnight)
///     172,                     // day of year (~June 21)
///     CloudCover::clear(),
/// ).unwrap();
///
/// assert!(report.position().is_sun_up());
/// assert_eq!(report.illuminance().daylight(), 76_440);
/// ```
pub fn daylight_report_local(
    latitude: f64,
    longitude: f64,
    utc_offset_hours: i32,
    local_time_hours: f64,
    day_of_year: u32,
    cloud_cover: CloudCover,
) -> Result<DaylightReport<LocalHours>> {
    let solar_position = position::solar_position_local(
        latitude,
        longitude,
        utc_offset_hours,
        local_time_hours,
        day_of_year,
    )?;
    let illuminance = illuminance_estimate(
        solar_position.altitude(),
        day_of_year,
        cloud_cover,
        solar_position.is_sun_up(),
    )?;
    Ok(DaylightReport::new(solar_position, illuminance))
}

/// Runs the whole daylight pipeline for a timezone-aware date/time.
///
/// # Errors
/// Returns input-validation errors for out-of-range inputs and `OutOfDomain`
/// for the pipeline's mathematical edge cases.
///
/// # Example
/// ```
/// # #[cfg(feature = "chrono")] {
/// use solar_illuminance::{illuminance, CloudCover};
/// use chrono::{DateTime, FixedOffset};
///
/// let datetime = "2023-06-21T12:00:00+02:00".parse::<DateTime<FixedOffset>>().unwrap();
/// let cloud = CloudCover::new(50.0).unwrap();
/// let report = illuminance::daylight_report(datetime, 48.2082, 16.3738, cloud).unwrap();
///
/// assert_eq!(report.illuminance().clear_sky_index(), 0.07);
/// assert_eq!(report.illuminance().cloud_adjusted_irradiance(), 513.04);
/// # }
/// ```
#[cfg(feature = "chrono")]
#[allow(clippy::needless_pass_by_value)]
pub fn daylight_report<Tz: TimeZone>(
    datetime: DateTime<Tz>,
    latitude: f64,
    longitude: f64,
    cloud_cover: CloudCover,
) -> Result<DaylightReport<DateTime<Tz>>> {
    let day_of_year = crate::time::day_of_year(&datetime);
    let solar_position = position::solar_position(datetime, latitude, longitude)?;
    let illuminance = illuminance_estimate(
        solar_position.altitude(),
        day_of_year,
        cloud_cover,
        solar_position.is_sun_up(),
    )?;
    Ok(DaylightReport::new(solar_position, illuminance))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    /// Altitude of the Vienna solstice-noon reference scenario.
    const VIENNA_NOON_ALTITUDE: f64 = 65.28;

    #[test]
    fn test_extraterrestrial_illuminance() {
        assert_eq!(extraterrestrial_illuminance(1), 133.39);
        assert_eq!(extraterrestrial_illuminance(172), 124.66);
        assert_eq!(extraterrestrial_illuminance(355), 133.38);
    }

    #[test]
    fn test_clear_sky_index_values() {
        assert_eq!(clear_sky_index(CloudCover::clear()), 0.0);
        assert_eq!(clear_sky_index(CloudCover::new(50.0).unwrap()), 0.07);
        assert_eq!(clear_sky_index(CloudCover::new(80.0).unwrap()), 0.35);
        // Saturated cover goes through the substitution, not the raw power
        // law (which would top out at 0.75).
        assert_eq!(clear_sky_index(CloudCover::overcast()), 1.0);
    }

    #[test]
    fn test_clear_sky_index_monotone_below_saturation() {
        let mut previous = clear_sky_index(CloudCover::clear());
        for percent in 1..=99 {
            let current = clear_sky_index(CloudCover::new(f64::from(percent)).unwrap());
            assert!(
                current >= previous,
                "clear-sky index decreased between {}% and {percent}%",
                percent - 1
            );
            previous = current;
        }
    }

    #[test]
    fn test_air_mass() {
        assert_eq!(air_mass(90.0).unwrap(), 1.0);
        assert_eq!(air_mass(30.0).unwrap(), 2.0);
        assert_eq!(air_mass(VIENNA_NOON_ALTITUDE).unwrap(), 1.1);
    }

    #[test]
    fn test_direct_illuminance() {
        let clear = CloudCoefficients::CLEAR;
        assert!((direct_illuminance(124.66, 1.1, &clear) - 98.95).abs() < EPSILON);

        let intermediate = CloudCoefficients::INTERMEDIATE;
        assert!((direct_illuminance(124.66, 1.1, &intermediate) - 51.71).abs() < EPSILON);

        let overcast = CloudCoefficients::OVERCAST;
        assert_eq!(direct_illuminance(124.66, 1.1, &overcast), 0.0);
    }

    #[test]
    fn test_horizontal_components_vienna() {
        let horizontal = horizontal_illuminance(98.95, VIENNA_NOON_ALTITUDE);
        assert!((horizontal - 63.25).abs() < EPSILON);

        let sky =
            horizontal_sky_illuminance(VIENNA_NOON_ALTITUDE, &CloudCoefficients::CLEAR).unwrap();
        assert!((sky - 13.19).abs() < EPSILON);
    }

    #[test]
    fn test_sky_illuminance_undefined_for_negative_sine() {
        // sin(4.0) < 0 when the degree value is read as radians; the clear
        // tier's fractional exponent has no real result there.
        let result = horizontal_sky_illuminance(4.0, &CloudCoefficients::CLEAR);
        assert_eq!(
            result,
            Err(Error::out_of_domain(
                "sky illuminance is undefined for this altitude and tier"
            ))
        );

        // The integer-exponent tiers stay defined for the same altitude.
        assert!(horizontal_sky_illuminance(4.0, &CloudCoefficients::INTERMEDIATE).is_ok());
        assert!(horizontal_sky_illuminance(4.0, &CloudCoefficients::OVERCAST).is_ok());
    }

    #[test]
    fn test_daylight_illuminance_gated_by_sun_up() {
        assert_eq!(daylight_illuminance(13.19, 63.25, true), 76_440);
        assert_eq!(daylight_illuminance(13.19, 63.25, false), 0);
    }

    #[test]
    fn test_irradiance_vienna() {
        let clear = clear_sky_irradiance(VIENNA_NOON_ALTITUDE);
        assert!((clear - 551.66).abs() < EPSILON);

        assert_eq!(cloud_adjusted_irradiance(clear, 0.0), 551.66);
        assert!((cloud_adjusted_irradiance(clear, 0.07) - 513.04).abs() < EPSILON);
        assert_eq!(cloud_adjusted_irradiance(clear, 1.0), 0.0);
    }

    #[test]
    fn test_illuminance_estimate_cascade() {
        let estimate =
            illuminance_estimate(VIENNA_NOON_ALTITUDE, 172, CloudCover::clear(), true).unwrap();
        assert_eq!(estimate.extraterrestrial(), 124.66);
        assert_eq!(estimate.air_mass(), 1.1);
        assert_eq!(estimate.clear_sky_index(), 0.0);
        assert!((estimate.direct() - 98.95).abs() < EPSILON);
        assert!((estimate.horizontal() - 63.25).abs() < EPSILON);
        assert!((estimate.horizontal_sky() - 13.19).abs() < EPSILON);
        assert_eq!(estimate.daylight(), 76_440);
        assert!((estimate.clear_sky_irradiance() - 551.66).abs() < EPSILON);
        assert_eq!(
            estimate.cloud_adjusted_irradiance(),
            estimate.clear_sky_irradiance()
        );
    }

    #[test]
    fn test_overcast_forces_direct_to_zero() {
        let estimate =
            illuminance_estimate(VIENNA_NOON_ALTITUDE, 172, CloudCover::overcast(), true).unwrap();
        assert_eq!(estimate.clear_sky_index(), 1.0);
        assert_eq!(estimate.direct(), 0.0);
        assert_eq!(estimate.horizontal(), 0.0);
        assert!((estimate.horizontal_sky() - 13.72).abs() < EPSILON);
        assert_eq!(estimate.daylight(), 13_720);
        assert_eq!(estimate.cloud_adjusted_irradiance(), 0.0);
        assert!(estimate.cloud_adjusted_irradiance() < estimate.clear_sky_irradiance());
    }

    #[test]
    fn test_daylight_report_local_night() {
        let report = daylight_report_local(48.2082, 16.3738, 2, 0.0, 172, CloudCover::clear())
            .unwrap();
        assert!(!report.position().is_sun_up());
        assert_eq!(report.illuminance().daylight(), 0);
        assert!((report.position().altitude() - -18.3).abs() < EPSILON);
    }
}
