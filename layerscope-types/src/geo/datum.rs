/// Sphere used to approximate the shape of a celestial body.
///
/// All geodesic calculations in this crate treat the earth as a perfect sphere. This is accurate
/// to within about 0.5% for distances, which is good enough for proximity analysis, but should not
/// be used for surveying.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Datum {
    radius: f64,
}

impl Datum {
    /// Mean radius of the earth in meters.
    pub const EARTH_RADIUS: f64 = 6_371_000.0;

    /// Spherical earth with the mean radius.
    pub const EARTH: Self = Datum {
        radius: Self::EARTH_RADIUS,
    };

    /// Creates a sphere with the given radius in meters.
    pub const fn new(radius: f64) -> Self {
        Self { radius }
    }

    /// Radius of the sphere in meters.
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Default for Datum {
    fn default() -> Self {
        Self::EARTH
    }
}
