use crate::error::GeoTypesError;
use crate::geo::{GeoPoint, GeoPoint2d};

/// Borrowed GeoJSON position treated as a geographic point.
///
/// GeoJSON positions are stored as `[lon, lat, ...]`. Any dimensions after the second one are
/// ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoJsonPoint<'a>(&'a [f64]);

impl<'a> TryFrom<&'a [f64]> for GeoJsonPoint<'a> {
    type Error = GeoTypesError;

    fn try_from(value: &'a [f64]) -> Result<Self, Self::Error> {
        if value.len() < 2 {
            Err(GeoTypesError::Conversion(
                "point must contain at least 2 dimensions".to_string(),
            ))
        } else {
            Ok(GeoJsonPoint(value))
        }
    }
}

impl GeoPoint for GeoJsonPoint<'_> {
    type Num = f64;

    fn lat(&self) -> Self::Num {
        self.0[1]
    }

    fn lon(&self) -> Self::Num {
        self.0[0]
    }
}

impl GeoJsonPoint<'_> {
    /// Copies the coordinates into an owned point.
    pub fn to_point(&self) -> GeoPoint2d {
        GeoPoint2d::from(self)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn reads_lon_lat_order() {
        let position = vec![-74.006, 40.7128, 10.0];
        let point = GeoJsonPoint::try_from(&position[..]).expect("valid position");
        assert_eq!(point.lon(), -74.006);
        assert_eq!(point.lat(), 40.7128);
        assert_eq!(point.to_point(), crate::lonlat!(-74.006, 40.7128));
    }

    #[test]
    fn rejects_short_positions() {
        let position = vec![1.0];
        assert_matches!(
            GeoJsonPoint::try_from(&position[..]),
            Err(GeoTypesError::Conversion(_))
        );
    }
}
