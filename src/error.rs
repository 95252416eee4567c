//! Error types for the daylight illuminance library.

use core::fmt;

/// Result type alias for operations in this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while resolving inputs or evaluating the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid latitude value (must be between -90 and +90 degrees).
    InvalidLatitude {
        /// The invalid latitude value provided.
        value: f64,
    },
    /// Invalid longitude value (must be between -180 and +180 degrees).
    InvalidLongitude {
        /// The invalid longitude value provided.
        value: f64,
    },
    /// Invalid cloud coverage percentage (must be between 0 and 100).
    InvalidCloudCover {
        /// The invalid cloud coverage value provided.
        value: f64,
    },
    /// Invalid or malformed date/time input.
    InvalidDateTime {
        /// Description of the date/time constraint violation.
        message: &'static str,
    },
    /// A formula's mathematical precondition is violated (e.g. an
    /// asin/acos argument outside [-1, 1], or a non-finite result).
    OutOfDomain {
        /// Description of the violated precondition.
        message: &'static str,
    },
    /// An upstream data source (geocoder, weather lookup) failed to supply
    /// an input. Constructed by callers feeding this crate, never by the
    /// pipeline itself, and never retried here.
    UpstreamUnavailable {
        /// Description of the upstream failure.
        message: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLatitude { value } => {
                write!(
                    f,
                    "invalid latitude {value}° (must be between -90° and +90°)"
                )
            }
            Self::InvalidLongitude { value } => {
                write!(
                    f,
                    "invalid longitude {value}° (must be between -180° and +180°)"
                )
            }
            Self::InvalidCloudCover { value } => {
                write!(
                    f,
                    "invalid cloud coverage {value}% (must be between 0% and 100%)"
                )
            }
            Self::InvalidDateTime { message } => {
                write!(f, "invalid date/time: {message}")
            }
            Self::OutOfDomain { message } => {
                write!(f, "out of domain: {message}")
            }
            Self::UpstreamUnavailable { message } => {
                write!(f, "upstream source unavailable: {message}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl Error {
    /// Creates an invalid latitude error.
    #[must_use]
    pub const fn invalid_latitude(value: f64) -> Self {
        Self::InvalidLatitude { value }
    }

    /// Creates an invalid longitude error.
    #[must_use]
    pub const fn invalid_longitude(value: f64) -> Self {
        Self::InvalidLongitude { value }
    }

    /// Creates an invalid cloud coverage error.
    #[must_use]
    pub const fn invalid_cloud_cover(value: f64) -> Self {
        Self::InvalidCloudCover { value }
    }

    /// Creates an invalid date/time error.
    #[must_use]
    pub const fn invalid_datetime(message: &'static str) -> Self {
        Self::InvalidDateTime { message }
    }

    /// Creates an out-of-domain error.
    #[must_use]
    pub const fn out_of_domain(message: &'static str) -> Self {
        Self::OutOfDomain { message }
    }

    /// Creates an upstream-unavailable error.
    #[must_use]
    pub const fn upstream_unavailable(message: &'static str) -> Self {
        Self::UpstreamUnavailable { message }
    }
}

/// Validates latitude is within the valid range (-90 to +90 degrees).
///
/// # Errors
/// Returns `InvalidLatitude` if latitude is outside -90 to +90 degrees.
pub fn check_latitude(latitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::invalid_latitude(latitude));
    }
    Ok(())
}

/// Validates longitude is within the valid range (-180 to +180 degrees).
///
/// # Errors
/// Returns `InvalidLongitude` if longitude is outside -180 to +180 degrees.
pub fn check_longitude(longitude: f64) -> Result<()> {
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(Error::invalid_longitude(longitude));
    }
    Ok(())
}

/// Validates both latitude and longitude are within valid ranges.
///
/// # Errors
/// Returns `InvalidLatitude` or `InvalidLongitude` for out-of-range coordinates.
pub fn check_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    check_latitude(latitude)?;
    check_longitude(longitude)?;
    Ok(())
}

/// Validates a cloud coverage percentage is within 0 to 100.
///
/// # Errors
/// Returns `InvalidCloudCover` for values outside 0 to 100 or non-finite ones.
pub fn check_cloud_cover(percent: f64) -> Result<()> {
    if !(0.0..=100.0).contains(&percent) {
        return Err(Error::invalid_cloud_cover(percent));
    }
    Ok(())
}

/// Validates a day-of-year is within 1 to 366.
///
/// # Errors
/// Returns `InvalidDateTime` for values outside 1 to 366.
pub fn check_day_of_year(day_of_year: u32) -> Result<()> {
    if !(1..=366).contains(&day_of_year) {
        return Err(Error::invalid_datetime(
            "day of year must be between 1 and 366",
        ));
    }
    Ok(())
}

/// Validates an hour-of-day is within 0 to 23.
///
/// # Errors
/// Returns `InvalidDateTime` for values outside 0 to 23.
pub fn check_hour(hour: u32) -> Result<()> {
    if hour > 23 {
        return Err(Error::invalid_datetime("hour must be between 0 and 23"));
    }
    Ok(())
}

/// Validates a fractional local time-of-day is within [0, 24).
///
/// # Errors
/// Returns `InvalidDateTime` for non-finite values or values outside [0, 24).
pub fn check_local_time(hours: f64) -> Result<()> {
    if !hours.is_finite() || !(0.0..24.0).contains(&hours) {
        return Err(Error::invalid_datetime(
            "local time must be at least 0 and below 24 hours",
        ));
    }
    Ok(())
}
