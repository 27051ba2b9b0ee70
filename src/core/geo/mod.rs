//! # Geo Module
//!
//! Converts sexagesimal GPS coordinates into signed decimal degrees.
//!
//! ## How It Works
//! 1. EXIF stores each coordinate as three rationals: degrees, minutes, seconds
//! 2. `decimal = d + m / 60 + s / 3600`, computed in floating point
//! 3. The hemisphere reference ("N"/"S", "E"/"W") decides the sign
//! 4. The signed pair becomes a map link

use crate::error::ConversionError;
use serde::{Deserialize, Serialize};

/// Template prefix for map links; latitude and longitude follow, comma separated
pub const MAPS_URL_PREFIX: &str = "https://maps.google.com/?q=";

/// An unsigned EXIF rational
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rational {
    pub num: u32,
    pub denom: u32,
}

impl Rational {
    pub fn new(num: u32, denom: u32) -> Self {
        Self { num, denom }
    }

    /// Divide in floating point, rejecting a zero denominator
    fn checked_value(&self, component: &'static str) -> Result<f64, ConversionError> {
        if self.denom == 0 {
            return Err(ConversionError::ZeroDenominator { component });
        }
        Ok(self.num as f64 / self.denom as f64)
    }
}

impl From<exif::Rational> for Rational {
    fn from(value: exif::Rational) -> Self {
        Self {
            num: value.num,
            denom: value.denom,
        }
    }
}

/// Degrees, minutes and seconds of one coordinate component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RationalTriple {
    pub degrees: Rational,
    pub minutes: Rational,
    pub seconds: Rational,
}

impl RationalTriple {
    pub fn new(degrees: Rational, minutes: Rational, seconds: Rational) -> Self {
        Self {
            degrees,
            minutes,
            seconds,
        }
    }

    /// Build from raw tag data, which must hold at least three rationals.
    ///
    /// Extra trailing components are ignored, as EXIF readers do.
    pub fn from_rationals<R>(values: &[R]) -> Result<Self, ConversionError>
    where
        R: Copy + Into<Rational>,
    {
        match values {
            [d, m, s, ..] => Ok(Self::new((*d).into(), (*m).into(), (*s).into())),
            _ => Err(ConversionError::MissingComponent {
                found: values.len(),
            }),
        }
    }
}

/// Convert a sexagesimal triple to unsigned decimal degrees.
///
/// The caller applies the hemisphere sign.
pub fn convert_to_decimal_degrees(triple: &RationalTriple) -> Result<f64, ConversionError> {
    let d = triple.degrees.checked_value("degrees")?;
    let m = triple.minutes.checked_value("minutes")?;
    let s = triple.seconds.checked_value("seconds")?;
    Ok(d + (m / 60.0) + (s / 3600.0))
}

/// Apply a hemisphere reference to an unsigned value.
///
/// Only `positive` keeps the sign; every other reference negates.
pub fn apply_hemisphere(value: f64, reference: char, positive: char) -> f64 {
    if reference == positive {
        value
    } else {
        -value
    }
}

/// A resolved location in signed decimal degrees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub maps_url: String,
}

impl GeoLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            maps_url: maps_url(latitude, longitude),
        }
    }
}

/// Build the map link for a coordinate pair
pub fn maps_url(latitude: f64, longitude: f64) -> String {
    format!(
        "{}{},{}",
        MAPS_URL_PREFIX,
        format_degrees(latitude),
        format_degrees(longitude)
    )
}

/// Format decimal degrees so integral values keep one fractional digit.
///
/// `-10.0` stays `-10.0` rather than Rust's default `-10`; other values use
/// the shortest round-trip representation.
pub fn format_degrees(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn whole(d: u32, m: u32, s: u32) -> RationalTriple {
        RationalTriple::new(Rational::new(d, 1), Rational::new(m, 1), Rational::new(s, 1))
    }

    #[test]
    fn degrees_only_is_exact() {
        let triple = RationalTriple::new(Rational::new(7, 2), Rational::new(0, 1), Rational::new(0, 1));
        assert_eq!(convert_to_decimal_degrees(&triple).unwrap(), 3.5);
    }

    #[test]
    fn minutes_and_seconds_are_scaled() {
        let value = convert_to_decimal_degrees(&whole(40, 30, 36)).unwrap();
        assert!((value - 40.51).abs() < 1e-9);
    }

    #[test]
    fn fractional_seconds_are_supported() {
        let triple = RationalTriple::new(
            Rational::new(51, 1),
            Rational::new(30, 1),
            Rational::new(2625, 100),
        );
        let value = convert_to_decimal_degrees(&triple).unwrap();
        assert!((value - 51.507_291_666).abs() < 1e-6);
    }

    #[test]
    fn conversion_is_monotonic_in_each_component() {
        let base = convert_to_decimal_degrees(&whole(10, 10, 10)).unwrap();
        assert!(convert_to_decimal_degrees(&whole(11, 10, 10)).unwrap() > base);
        assert!(convert_to_decimal_degrees(&whole(10, 11, 10)).unwrap() > base);
        assert!(convert_to_decimal_degrees(&whole(10, 10, 11)).unwrap() > base);
    }

    #[test]
    fn zero_denominator_fails() {
        for (triple, component) in [
            (RationalTriple::new(Rational::new(1, 0), Rational::new(0, 1), Rational::new(0, 1)), "degrees"),
            (RationalTriple::new(Rational::new(1, 1), Rational::new(0, 0), Rational::new(0, 1)), "minutes"),
            (RationalTriple::new(Rational::new(1, 1), Rational::new(0, 1), Rational::new(0, 0)), "seconds"),
        ] {
            assert_eq!(
                convert_to_decimal_degrees(&triple),
                Err(ConversionError::ZeroDenominator { component })
            );
        }
    }

    #[test]
    fn from_rationals_requires_three_components() {
        let two = [Rational::new(1, 1), Rational::new(2, 1)];
        assert_eq!(
            RationalTriple::from_rationals(&two),
            Err(ConversionError::MissingComponent { found: 2 })
        );
    }

    #[test]
    fn from_rationals_accepts_exif_values() {
        let raw = [
            exif::Rational { num: 10, denom: 1 },
            exif::Rational { num: 0, denom: 1 },
            exif::Rational { num: 0, denom: 1 },
        ];
        let triple = RationalTriple::from_rationals(&raw).unwrap();
        assert_eq!(triple, whole(10, 0, 0));
    }

    #[test]
    fn hemisphere_sign() {
        assert_eq!(apply_hemisphere(10.0, 'N', 'N'), 10.0);
        assert_eq!(apply_hemisphere(10.0, 'S', 'N'), -10.0);
        assert_eq!(apply_hemisphere(20.0, 'W', 'E'), -20.0);
        // Unknown references fall on the negative side
        assert_eq!(apply_hemisphere(20.0, 'x', 'E'), -20.0);
    }

    #[test]
    fn maps_url_keeps_one_decimal_for_whole_degrees() {
        assert_eq!(maps_url(-10.0, 20.0), "https://maps.google.com/?q=-10.0,20.0");
    }

    #[test]
    fn format_degrees_uses_shortest_repr() {
        assert_eq!(format_degrees(45.5), "45.5");
        assert_eq!(format_degrees(0.0), "0.0");
        assert_eq!(format_degrees(-122.25), "-122.25");
    }
}
