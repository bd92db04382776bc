//! Display precision derived from the reference system
//!
//! Every place that turns a coordinate into text goes through here.

use crate::coordinate::{Point, SpatialReference};

/// Decimal places used for geographic (degree) coordinates
pub const GEOGRAPHIC_DECIMALS: usize = 7;
/// Decimal places used for projected (meter) coordinates
pub const PROJECTED_DECIMALS: usize = 3;

pub struct FormatPolicy;

impl FormatPolicy {
    /// Number of decimals for values in `reference`
    pub fn decimal_places(reference: SpatialReference) -> usize {
        if reference.is_geographic() {
            GEOGRAPHIC_DECIMALS
        } else {
            PROJECTED_DECIMALS
        }
    }

    /// Format a value, or an empty string when it is absent
    pub fn format_value(value: Option<f64>, reference: SpatialReference) -> String {
        match value {
            Some(v) if !v.is_nan() => format!("{:.*}", Self::decimal_places(reference), v),
            _ => String::new(),
        }
    }

    /// Format a pair as `x,y`
    ///
    /// Returns `None` when the pair is absent, so a missing component never
    /// shows up as a lone or leading comma.
    pub fn format_pair(point: Option<Point>, reference: SpatialReference) -> Option<String> {
        point.map(|p| format!(
            "{},{}",
            Self::format_value(Some(p.x), reference),
            Self::format_value(Some(p.y), reference)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_places() {
        assert_eq!(FormatPolicy::decimal_places(SpatialReference::Wgs84), 7);
        assert_eq!(FormatPolicy::decimal_places(SpatialReference::Geographic4996), 7);
        assert_eq!(FormatPolicy::decimal_places(SpatialReference::ColombiaBogota), 3);
        assert_eq!(FormatPolicy::decimal_places(SpatialReference::Other(3857)), 3);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(FormatPolicy::format_value(Some(-74.08), SpatialReference::Wgs84), "-74.0800000");
        assert_eq!(FormatPolicy::format_value(Some(1000420.1234), SpatialReference::OrigenNacional), "1000420.123");
        assert_eq!(FormatPolicy::format_value(None, SpatialReference::Wgs84), "");
        assert_eq!(FormatPolicy::format_value(Some(f64::NAN), SpatialReference::Wgs84), "");
    }

    #[test]
    fn test_format_pair() {
        let text = FormatPolicy::format_pair(Some(Point::new(1.0, 2.5)), SpatialReference::ColombiaWest);
        assert_eq!(text.as_deref(), Some("1.000,2.500"));
        assert_eq!(FormatPolicy::format_pair(None, SpatialReference::ColombiaWest), None);
    }
}
