//! Coordinate coercion.

/// Geographic axis a coordinate belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn bound(self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }
}

/// Parse a coordinate cell. Non-numeric, non-finite and out-of-range values
/// all yield `None`; nothing is defaulted.
pub(crate) fn parse_coordinate(value: &str, axis: Axis) -> Option<f64> {
    let parsed = value.trim().parse::<f64>().ok()?;
    if parsed.is_finite() && parsed.abs() <= axis.bound() {
        Some(parsed)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(parse_coordinate("51.5", Axis::Latitude), Some(51.5));
        assert_eq!(parse_coordinate(" -0.1275 ", Axis::Longitude), Some(-0.1275));
        assert_eq!(parse_coordinate("90", Axis::Latitude), Some(90.0));
        assert_eq!(parse_coordinate("-180", Axis::Longitude), Some(-180.0));
    }

    #[test]
    fn test_parse_rejects_text() {
        assert_eq!(parse_coordinate("bad", Axis::Latitude), None);
        assert_eq!(parse_coordinate("51,5", Axis::Latitude), None);
        assert_eq!(parse_coordinate("", Axis::Longitude), None);
    }

    #[test]
    fn test_parse_rejects_non_finite_and_out_of_range() {
        assert_eq!(parse_coordinate("NaN", Axis::Latitude), None);
        assert_eq!(parse_coordinate("inf", Axis::Longitude), None);
        assert_eq!(parse_coordinate("90.0001", Axis::Latitude), None);
        assert_eq!(parse_coordinate("181", Axis::Longitude), None);
        // A plausible longitude is not a valid latitude.
        assert_eq!(parse_coordinate("120", Axis::Latitude), None);
    }
}
