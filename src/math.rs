//! Mathematical utilities for the daylight pipeline.

#![allow(clippy::many_single_char_names)]

use core::fmt::{self, Write};

#[cfg(not(feature = "std"))]
use libm;

/// Mathematical constants
pub const PI: f64 = core::f64::consts::PI;

/// Converts degrees to radians.
#[inline]
pub const fn degrees_to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Converts radians to degrees.
#[inline]
pub const fn radians_to_degrees(radians: f64) -> f64 {
    radians.to_degrees()
}

/// Computes sin(x) using the appropriate function for the compilation target.
#[inline]
pub fn sin(x: f64) -> f64 {
    #[cfg(feature = "std")]
    return x.sin();

    #[cfg(not(feature = "std"))]
    return libm::sin(x);
}

/// Computes cos(x) using the appropriate function for the compilation target.
#[inline]
pub fn cos(x: f64) -> f64 {
    #[cfg(feature = "std")]
    return x.cos();

    #[cfg(not(feature = "std"))]
    return libm::cos(x);
}

/// Computes tan(x) using the appropriate function for the compilation target.
#[inline]
pub fn tan(x: f64) -> f64 {
    #[cfg(feature = "std")]
    return x.tan();

    #[cfg(not(feature = "std"))]
    return libm::tan(x);
}

/// Computes asin(x) using the appropriate function for the compilation target.
#[inline]
pub fn asin(x: f64) -> f64 {
    #[cfg(feature = "std")]
    return x.asin();

    #[cfg(not(feature = "std"))]
    return libm::asin(x);
}

/// Computes acos(x) using the appropriate function for the compilation target.
#[inline]
pub fn acos(x: f64) -> f64 {
    #[cfg(feature = "std")]
    return x.acos();

    #[cfg(not(feature = "std"))]
    return libm::acos(x);
}

/// Computes e^x using the appropriate function for the compilation target.
#[inline]
pub fn exp(x: f64) -> f64 {
    #[cfg(feature = "std")]
    return x.exp();

    #[cfg(not(feature = "std"))]
    return libm::exp(x);
}

/// Computes x^y for real y.
#[inline]
pub fn powf(x: f64, y: f64) -> f64 {
    #[cfg(feature = "std")]
    return x.powf(y);

    #[cfg(not(feature = "std"))]
    return libm::pow(x, y);
}

/// Computes x^n for integer n.
#[inline]
pub fn powi(x: f64, n: i32) -> f64 {
    #[cfg(feature = "std")]
    return x.powi(n);

    #[cfg(not(feature = "std"))]
    return libm::pow(x, f64::from(n));
}

/// Computes floor(x) using the appropriate function for the compilation target.
#[inline]
pub fn floor(x: f64) -> f64 {
    #[cfg(feature = "std")]
    return x.floor();

    #[cfg(not(feature = "std"))]
    return libm::floor(x);
}

/// Rounds x to the nearest integer, halfway cases away from zero.
#[inline]
pub fn round(x: f64) -> f64 {
    #[cfg(feature = "std")]
    return x.round();

    #[cfg(not(feature = "std"))]
    return libm::round(x);
}

/// Number of characters in the shortest decimal representation of `value`,
/// including any sign and decimal point.
///
/// Integral values render without a fraction; they are counted as if they
/// carried their trailing `.0`, so `2.0` has width 3, not 1.
fn decimal_width(value: f64) -> usize {
    struct Counter {
        length: usize,
        has_point: bool,
    }

    impl Write for Counter {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            self.length += s.len();
            self.has_point |= s.contains('.');
            Ok(())
        }
    }

    let mut counter = Counter {
        length: 0,
        has_point: false,
    };
    // Display for f64 cannot fail when writing into an infallible sink.
    let _ = write!(counter, "{value}");
    if counter.has_point {
        counter.length
    } else {
        counter.length + 2
    }
}

/// Rounds a stage result to `decimals` places after adding a representation
/// nudge of `10^(-width-1)`, where `width` is the length of the value's
/// decimal string.
///
/// The nudge lifts values whose binary representation sits just below a
/// decimal boundary (e.g. `0.00499999…`) onto it before rounding. Zero is
/// passed through untouched; its string width carries no information about
/// representation error.
///
/// Applying the function to an already-rounded value returns it unchanged.
pub fn nudged_round(value: f64, decimals: i32) -> f64 {
    if value == 0.0 {
        return value;
    }
    let width = i32::try_from(decimal_width(value)).unwrap_or(i32::MAX);
    let nudge = powi(10.0, -width - 1);
    let scale = powi(10.0, decimals);
    round((value + nudge) * scale) / scale
}
