//! Core data types for solar position and illuminance calculations.

use crate::error::check_cloud_cover;
use crate::math::floor;
use crate::{Error, Result};

/// Validated cloud coverage percentage (0 to 100).
///
/// # Example
/// ```
/// # use solar_illuminance::types::CloudCover;
/// let cover = CloudCover::new(62.5).unwrap();
/// assert_eq!(cover.percent(), 62.5);
/// assert_eq!(cover.fraction(), 0.625);
///
/// assert!(CloudCover::new(120.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudCover {
    /// Cloud coverage in percent (0 to 100)
    percent: f64,
}

impl CloudCover {
    /// Creates a new cloud cover from a percentage.
    ///
    /// # Errors
    /// Returns `InvalidCloudCover` for values outside 0 to 100.
    pub fn new(percent: f64) -> Result<Self> {
        check_cloud_cover(percent)?;
        Ok(Self { percent })
    }

    /// Completely clear sky (0% coverage).
    #[must_use]
    pub const fn clear() -> Self {
        Self { percent: 0.0 }
    }

    /// Fully overcast sky (100% coverage).
    #[must_use]
    pub const fn overcast() -> Self {
        Self { percent: 100.0 }
    }

    /// Gets the cloud coverage in percent.
    #[must_use]
    pub const fn percent(&self) -> f64 {
        self.percent
    }

    /// Gets the cloud coverage as a fraction in [0, 1].
    #[must_use]
    pub fn fraction(&self) -> f64 {
        self.percent / 100.0
    }
}

/// Sky-model coefficients selected from the clear-sky index.
///
/// The extinction coefficient attenuates the direct beam; the three sky
/// coefficients parameterize horizontal sky illuminance as
/// `A + B·sin(altitude)^C`. Exactly one tier applies to any clear-sky-index
/// value, and only the overcast tier has no extinction coefficient, which
/// forces direct illuminance to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudCoefficients {
    /// Extinction coefficient for the direct beam; `None` under overcast sky
    extinction: Option<f64>,
    /// Additive sky illuminance term (klx)
    sky_a: f64,
    /// Multiplicative sky illuminance term (klx)
    sky_b: f64,
    /// Exponent on the altitude sine
    sky_c: f64,
}

impl CloudCoefficients {
    /// Coefficients for clear sky (clear-sky index below 0.3).
    pub const CLEAR: Self = Self {
        extinction: Some(0.21),
        sky_a: 0.8,
        sky_b: 15.5,
        sky_c: 0.5,
    };

    /// Coefficients for partly clouded sky (clear-sky index below 0.8).
    pub const INTERMEDIATE: Self = Self {
        extinction: Some(0.8),
        sky_a: 0.3,
        sky_b: 45.0,
        sky_c: 1.0,
    };

    /// Coefficients for overcast sky (clear-sky index of 0.8 and above).
    pub const OVERCAST: Self = Self {
        extinction: None,
        sky_a: 0.3,
        sky_b: 21.0,
        sky_c: 1.0,
    };

    /// Selects the coefficient tier for a clear-sky index.
    #[must_use]
    pub fn for_clear_sky_index(clear_sky_index: f64) -> Self {
        if clear_sky_index < 0.3 {
            Self::CLEAR
        } else if clear_sky_index < 0.8 {
            Self::INTERMEDIATE
        } else {
            Self::OVERCAST
        }
    }

    /// Gets the extinction coefficient, or `None` under overcast sky.
    #[must_use]
    pub const fn extinction(&self) -> Option<f64> {
        self.extinction
    }

    /// Gets the additive sky illuminance coefficient.
    #[must_use]
    pub const fn sky_a(&self) -> f64 {
        self.sky_a
    }

    /// Gets the multiplicative sky illuminance coefficient.
    #[must_use]
    pub const fn sky_b(&self) -> f64 {
        self.sky_b
    }

    /// Gets the exponent applied to the altitude sine.
    #[must_use]
    pub const fn sky_c(&self) -> f64 {
        self.sky_c
    }
}

/// Hours since local midnight of the calculation day.
///
/// Used for sunrise/sunset times without the chrono dependency. Values below
/// 0.0 fall on the previous local day, values of 24.0 and above on the next.
///
/// # Example
/// ```
/// # use solar_illuminance::types::LocalHours;
/// let sunrise = LocalHours::from_hours(3.9954);
/// let (day_offset, hours) = sunrise.day_and_hours();
/// assert_eq!(day_offset, 0);
/// assert!((hours - 3.9954).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalHours(f64);

impl LocalHours {
    /// Creates a new `LocalHours` from hours since local midnight.
    #[must_use]
    pub const fn from_hours(hours: f64) -> Self {
        Self(hours)
    }

    /// Gets the raw hours value.
    ///
    /// Can be negative (previous day) or ≥ 24.0 (next day).
    #[must_use]
    pub const fn hours(&self) -> f64 {
        self.0
    }

    /// Gets the day offset and normalized hours (0.0 to < 24.0).
    #[must_use]
    pub fn day_and_hours(&self) -> (i32, f64) {
        let hours = self.0;
        if !hours.is_finite() {
            return (0, hours);
        }

        let mut day_offset_raw = floor(hours / 24.0);
        let mut normalized_hours = hours - day_offset_raw * 24.0;

        if normalized_hours < 0.0 {
            normalized_hours += 24.0;
            day_offset_raw -= 1.0;
        } else if normalized_hours >= 24.0 {
            normalized_hours -= 24.0;
            day_offset_raw += 1.0;
        }

        let day_offset = if day_offset_raw >= f64::from(i32::MAX) {
            i32::MAX
        } else if day_offset_raw <= f64::from(i32::MIN) {
            i32::MIN
        } else {
            day_offset_raw as i32
        };

        (day_offset, normalized_hours)
    }
}

/// Stage-ordered intermediate angles of the solar time alignment.
///
/// Each value is rounded to two decimals before the next stage consumes it;
/// the fields therefore hold exactly what the downstream stages saw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarAngles {
    /// Local standard time meridian (radians)
    pub(crate) local_standard_time_meridian: f64,
    /// Equation of time (radians)
    pub(crate) equation_of_time: f64,
    /// Time correction factor (radians)
    pub(crate) time_correction_factor: f64,
    /// Local solar time (hours)
    pub(crate) local_solar_time: f64,
    /// Hour angle (radians)
    pub(crate) hour_angle: f64,
    /// Declination angle (radians)
    pub(crate) declination: f64,
}

impl SolarAngles {
    /// Gets the local standard time meridian in radians.
    #[must_use]
    pub const fn local_standard_time_meridian(&self) -> f64 {
        self.local_standard_time_meridian
    }

    /// Gets the equation of time in radians.
    #[must_use]
    pub const fn equation_of_time(&self) -> f64 {
        self.equation_of_time
    }

    /// Gets the time correction factor in radians.
    #[must_use]
    pub const fn time_correction_factor(&self) -> f64 {
        self.time_correction_factor
    }

    /// Gets the local solar time in hours.
    #[must_use]
    pub const fn local_solar_time(&self) -> f64 {
        self.local_solar_time
    }

    /// Gets the hour angle in radians.
    #[must_use]
    pub const fn hour_angle(&self) -> f64 {
        self.hour_angle
    }

    /// Gets the declination angle in radians.
    #[must_use]
    pub const fn declination(&self) -> f64 {
        self.declination
    }
}

/// Sun position and day window for a single query.
///
/// The sunrise/sunset type parameter is [`LocalHours`] for the numeric API
/// and `chrono::DateTime<Tz>` for the chrono convenience API.
#[derive(Debug, Clone, PartialEq)]
pub struct SolarPosition<T> {
    /// Altitude above the horizon in degrees
    altitude: f64,
    /// Azimuth in degrees
    azimuth: f64,
    /// Local sunrise time
    sunrise: T,
    /// Local sunset time
    sunset: T,
    /// Whether the query instant lies strictly between sunrise and sunset
    sun_up: bool,
}

impl<T> SolarPosition<T> {
    /// Creates a new solar position.
    ///
    /// # Errors
    /// Returns `OutOfDomain` if altitude is outside -90° to +90° or azimuth
    /// is not finite.
    pub fn new(altitude: f64, azimuth: f64, sunrise: T, sunset: T, sun_up: bool) -> Result<Self> {
        if !(-90.0..=90.0).contains(&altitude) {
            return Err(Error::out_of_domain(
                "altitude must be between -90° and +90°",
            ));
        }
        if !azimuth.is_finite() {
            return Err(Error::out_of_domain("azimuth is not finite"));
        }
        Ok(Self {
            altitude,
            azimuth,
            sunrise,
            sunset,
            sun_up,
        })
    }

    /// Gets the altitude above the horizon in degrees.
    #[must_use]
    pub const fn altitude(&self) -> f64 {
        self.altitude
    }

    /// Gets the azimuth in degrees.
    #[must_use]
    pub const fn azimuth(&self) -> f64 {
        self.azimuth
    }

    /// Gets the local sunrise time.
    pub const fn sunrise(&self) -> &T {
        &self.sunrise
    }

    /// Gets the local sunset time.
    pub const fn sunset(&self) -> &T {
        &self.sunset
    }

    /// Checks whether the sun is up at the query instant.
    ///
    /// The window is open: the sunrise and sunset instants themselves count
    /// as "not up".
    #[must_use]
    pub const fn is_sun_up(&self) -> bool {
        self.sun_up
    }
}

/// Illuminance and irradiance estimates derived from one query.
///
/// The illuminance components are in kilolux except the combined daylight
/// illuminance, which is in lux; irradiance is in W/m².
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Illuminance {
    /// Extraterrestrial illuminance (klx)
    pub(crate) extraterrestrial: f64,
    /// Relative air mass along the beam path
    pub(crate) air_mass: f64,
    /// Clear-sky index estimated from cloud coverage
    pub(crate) clear_sky_index: f64,
    /// Direct beam illuminance (klx)
    pub(crate) direct: f64,
    /// Direct illuminance projected on the horizontal plane (klx)
    pub(crate) horizontal: f64,
    /// Diffuse sky illuminance on the horizontal plane (klx)
    pub(crate) horizontal_sky: f64,
    /// Combined outdoor daylight illuminance (lx); zero when the sun is down
    pub(crate) daylight: i64,
    /// Clear-sky irradiance (W/m²)
    pub(crate) clear_sky_irradiance: f64,
    /// Cloud-adjusted irradiance (W/m²)
    pub(crate) cloud_adjusted_irradiance: f64,
}

impl Illuminance {
    /// Gets the extraterrestrial illuminance in kilolux.
    #[must_use]
    pub const fn extraterrestrial(&self) -> f64 {
        self.extraterrestrial
    }

    /// Gets the relative air mass.
    #[must_use]
    pub const fn air_mass(&self) -> f64 {
        self.air_mass
    }

    /// Gets the clear-sky index.
    #[must_use]
    pub const fn clear_sky_index(&self) -> f64 {
        self.clear_sky_index
    }

    /// Gets the direct beam illuminance in kilolux.
    #[must_use]
    pub const fn direct(&self) -> f64 {
        self.direct
    }

    /// Gets the horizontal illuminance in kilolux.
    #[must_use]
    pub const fn horizontal(&self) -> f64 {
        self.horizontal
    }

    /// Gets the horizontal sky illuminance in kilolux.
    #[must_use]
    pub const fn horizontal_sky(&self) -> f64 {
        self.horizontal_sky
    }

    /// Gets the combined daylight illuminance in lux.
    ///
    /// Zero whenever the sun is down.
    #[must_use]
    pub const fn daylight(&self) -> i64 {
        self.daylight
    }

    /// Gets the clear-sky irradiance in W/m².
    #[must_use]
    pub const fn clear_sky_irradiance(&self) -> f64 {
        self.clear_sky_irradiance
    }

    /// Gets the cloud-adjusted irradiance in W/m².
    #[must_use]
    pub const fn cloud_adjusted_irradiance(&self) -> f64 {
        self.cloud_adjusted_irradiance
    }
}

/// Combined result of the single query operation: the sun's position and the
/// illuminance estimates derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct DaylightReport<T> {
    /// Sun position and day window
    position: SolarPosition<T>,
    /// Illuminance and irradiance estimates
    illuminance: Illuminance,
}

impl<T> DaylightReport<T> {
    /// Creates a report from its two halves.
    #[must_use]
    pub const fn new(position: SolarPosition<T>, illuminance: Illuminance) -> Self {
        Self {
            position,
            illuminance,
        }
    }

    /// Gets the solar position half of the report.
    pub const fn position(&self) -> &SolarPosition<T> {
        &self.position
    }

    /// Gets the illuminance half of the report.
    pub const fn illuminance(&self) -> &Illuminance {
        &self.illuminance
    }

    /// Splits the report into its two halves.
    pub fn into_parts(self) -> (SolarPosition<T>, Illuminance) {
        (self.position, self.illuminance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloud_cover_validation() {
        let cover = CloudCover::new(62.5).unwrap();
        assert_eq!(cover.percent(), 62.5);
        assert_eq!(cover.fraction(), 0.625);

        assert_eq!(CloudCover::clear().percent(), 0.0);
        assert_eq!(CloudCover::overcast().percent(), 100.0);

        assert!(CloudCover::new(-0.1).is_err());
        assert!(CloudCover::new(100.1).is_err());
        assert!(CloudCover::new(f64::NAN).is_err());
    }

    #[test]
    fn test_coefficient_tiers() {
        let clear = CloudCoefficients::for_clear_sky_index(0.0);
        assert_eq!(clear, CloudCoefficients::CLEAR);
        assert_eq!(clear.extinction(), Some(0.21));
        assert_eq!(clear.sky_b(), 15.5);

        let mid = CloudCoefficients::for_clear_sky_index(0.3);
        assert_eq!(mid, CloudCoefficients::INTERMEDIATE);
        assert_eq!(mid.extinction(), Some(0.8));
        assert_eq!(mid.sky_b(), 45.0);

        let overcast = CloudCoefficients::for_clear_sky_index(0.8);
        assert_eq!(overcast, CloudCoefficients::OVERCAST);
        assert_eq!(overcast.extinction(), None);
        assert_eq!(overcast.sky_b(), 21.0);
    }

    #[test]
    fn test_coefficient_tier_boundaries_are_half_open() {
        assert_eq!(
            CloudCoefficients::for_clear_sky_index(0.29),
            CloudCoefficients::CLEAR
        );
        assert_eq!(
            CloudCoefficients::for_clear_sky_index(0.79),
            CloudCoefficients::INTERMEDIATE
        );
        assert_eq!(
            CloudCoefficients::for_clear_sky_index(1.0),
            CloudCoefficients::OVERCAST
        );
    }

    #[test]
    fn test_local_hours_day_and_hours() {
        let (day, hours) = LocalHours::from_hours(3.5).day_and_hours();
        assert_eq!(day, 0);
        assert!((hours - 3.5).abs() < 1e-10);

        let (day, hours) = LocalHours::from_hours(25.5).day_and_hours();
        assert_eq!(day, 1);
        assert!((hours - 1.5).abs() < 1e-10);

        let (day, hours) = LocalHours::from_hours(-0.5).day_and_hours();
        assert_eq!(day, -1);
        assert!((hours - 23.5).abs() < 1e-10);
    }

    #[test]
    fn test_solar_position_accessors() {
        let position = SolarPosition::new(
            65.28,
            178.86,
            LocalHours::from_hours(3.99),
            LocalHours::from_hours(20.08),
            true,
        )
        .unwrap();
        assert_eq!(position.altitude(), 65.28);
        assert_eq!(position.azimuth(), 178.86);
        assert!(position.is_sun_up());
        assert!(position.sunrise().hours() < position.sunset().hours());
    }

    #[test]
    fn test_solar_position_validation() {
        let sunrise = LocalHours::from_hours(4.0);
        let sunset = LocalHours::from_hours(20.0);
        assert!(SolarPosition::new(91.0, 180.0, sunrise, sunset, true).is_err());
        assert!(SolarPosition::new(45.0, f64::NAN, sunrise, sunset, true).is_err());
    }
}
