//! # Solar Illuminance Library
//!
//! Solar geometry and daylight illuminance/irradiance estimates for a
//! geographic location, date and time, adjusted for cloud cover.

#![cfg_attr(not(feature = "std"), no_std)]
//!
//! The crate evaluates a fixed cascade of astronomical stages (equation of
//! time, hour angle, declination, altitude, azimuth, sunrise/sunset, air
//! mass) and decomposes daylight into direct, horizontal and diffuse sky
//! illuminance plus clear-sky and cloud-adjusted irradiance. Every stage is
//! a pure function of the resolved inputs; each result is rounded to two
//! decimals before the next stage consumes it, so outputs are reproducible
//! bit-for-bit at that precision.
//!
//! ## Features
//!
//! - Multiple configurations: `std` or `no_std`, with or without `chrono`,
//!   math via native or `libm`
//! - Stateless: every query recomputes the full pipeline; no caching, no
//!   hidden instance state, safe to call from any number of threads
//! - Typed failures: invalid inputs, violated mathematical domains and
//!   unavailable upstream sources are distinct, inspectable error values
//!
//! ## Feature Flags
//!
//! - `std` (default): Use standard library math and enable clock-based
//!   "now" defaults in [`time::resolve`]
//! - `chrono` (default): Enable the `DateTime<Tz>` based convenience API
//! - `libm`: Use pure Rust math for `no_std` environments
//!
//! ## Quick Start
//!
//! ### Full daylight report (with chrono)
//! ```rust
//! # #[cfg(feature = "chrono")] {
//! use solar_illuminance::{illuminance, CloudCover};
//! use chrono::{DateTime, FixedOffset};
//!
//! // Vienna at solstice noon under a clear sky
//! let datetime = "2023-06-21T12:00:00+02:00".parse::<DateTime<FixedOffset>>().unwrap();
//! let report = illuminance::daylight_report(
//!     datetime,
//!     48.2082,              // latitude
//!     16.3738,              // longitude
//!     CloudCover::clear(),
//! ).unwrap();
//!
//! println!("Altitude: {:.2}°", report.position().altitude());
//! println!("Daylight: {} lx", report.illuminance().daylight());
//! # }
//! ```
//!
//! ### Numeric API (no chrono)
//! ```rust
//! use solar_illuminance::{illuminance, CloudCover};
//!
//! // Same query from pre-resolved components: UTC offset +2 h,
//! // 12:00 local, day of year 172
//! let report = illuminance::daylight_report_local(
//!     48.2082, 16.3738, 2, 12.0, 172, CloudCover::clear(),
//! ).unwrap();
//!
//! assert!(report.position().is_sun_up());
//! ```
//!
//! ## References
//!
//! - Sun position formula collection of the PVeducation project
//!   (<https://www.pveducation.org/pvcdrom/properties-of-sunlight/>):
//!   solar time, hour angle, declination, elevation/azimuth
//! - Kasten, F.; Young, A. T. (1989). Revised optical air mass tables and
//!   approximation formula. Applied Optics, 28(22), 4735-4738.
//!
//! ## Coordinate System
//!
//! - **Altitude**: 0° = horizon, 90° = directly overhead (-90° to +90°)
//! - **Azimuth**: degrees from north, from the morning-side arc of the
//!   azimuth cosine (0° to 180°)

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery, clippy::cargo, clippy::all)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cargo_common_metadata,
    clippy::multiple_crate_versions, // Acceptable for dev-dependencies
    clippy::float_cmp, // Exact comparisons of two-decimal stage outputs in tests
)]

// Public API exports
pub use crate::error::{Error, Result};
pub use crate::types::{
    CloudCoefficients, CloudCover, DaylightReport, Illuminance, LocalHours, SolarAngles,
    SolarPosition,
};

// Pipeline modules
pub mod illuminance;
pub mod position;

// Core modules
pub mod error;
pub mod types;

// Internal modules
mod math;

// Public modules
pub mod time;
