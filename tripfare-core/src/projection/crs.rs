use geo::{Coord, Point};
use serde::{Deserialize, Serialize};

use super::{
    albers::AlbersEqualArea, ellipsoid::GRS80, lambert::LambertConformalConic, ProjectionError,
};

/// linear unit of a projected coordinate reference system
#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LinearUnit {
    #[default]
    Meter,
    UsSurveyFoot,
}

impl LinearUnit {
    pub fn meters_per_unit(&self) -> f64 {
        match self {
            LinearUnit::Meter => 1.0,
            LinearUnit::UsSurveyFoot => 1200.0 / 3937.0,
        }
    }
}

/// parameters shared by the two-standard-parallel conic projections. angles
/// are decimal degrees, false easting/northing are in `unit`.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ConicParameters {
    pub standard_parallel_1: f64,
    pub standard_parallel_2: f64,
    pub latitude_of_origin: f64,
    pub central_meridian: f64,
    #[serde(default)]
    pub false_easting: f64,
    #[serde(default)]
    pub false_northing: f64,
    #[serde(default)]
    pub unit: LinearUnit,
}

/// a coordinate reference system on the GRS80 ellipsoid. geographic
/// coordinates are (x = longitude, y = latitude) in decimal degrees.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Crs {
    Geographic,
    LambertConformalConic(ConicParameters),
    AlbersEqualArea(ConicParameters),
}

impl Crs {
    /// EPSG:2263, NAD83 / New York Long Island (ftUS). the native frame of
    /// the NYC TLC taxi zone shapefile.
    pub fn new_york_long_island() -> Crs {
        Crs::LambertConformalConic(ConicParameters {
            standard_parallel_1: 41.0 + 2.0 / 60.0,
            standard_parallel_2: 40.0 + 40.0 / 60.0,
            latitude_of_origin: 40.0 + 10.0 / 60.0,
            central_meridian: -74.0,
            false_easting: 984_250.0,
            false_northing: 0.0,
            unit: LinearUnit::UsSurveyFoot,
        })
    }

    /// EPSG:3310, NAD83 / California Albers (meters)
    pub fn california_albers() -> Crs {
        Crs::AlbersEqualArea(ConicParameters {
            standard_parallel_1: 34.0,
            standard_parallel_2: 40.5,
            latitude_of_origin: 0.0,
            central_meridian: -120.0,
            false_easting: 0.0,
            false_northing: -4_000_000.0,
            unit: LinearUnit::Meter,
        })
    }

    pub fn is_geographic(&self) -> bool {
        matches!(self, Crs::Geographic)
    }

    /// confirms the projection parameters describe a usable cone.
    pub fn validate(&self) -> Result<(), ProjectionError> {
        match self {
            Crs::Geographic => Ok(()),
            Crs::LambertConformalConic(p) => LambertConformalConic::new(p, GRS80).map(|_| ()),
            Crs::AlbersEqualArea(p) => AlbersEqualArea::new(p, GRS80).map(|_| ()),
        }
    }

    /// converts a coordinate in this CRS into (longitude, latitude) degrees.
    pub fn to_geographic(&self, coord: Coord<f64>) -> Result<Coord<f64>, ProjectionError> {
        let result = match self {
            Crs::Geographic => coord,
            Crs::LambertConformalConic(p) => {
                let (x, y) = to_false_origin_meters(p, coord);
                let (lambda, phi) = LambertConformalConic::new(p, GRS80)?.inverse(x, y)?;
                Coord {
                    x: lambda.to_degrees(),
                    y: phi.to_degrees(),
                }
            }
            Crs::AlbersEqualArea(p) => {
                let (x, y) = to_false_origin_meters(p, coord);
                let (lambda, phi) = AlbersEqualArea::new(p, GRS80)?.inverse(x, y)?;
                Coord {
                    x: lambda.to_degrees(),
                    y: phi.to_degrees(),
                }
            }
        };
        finite_or_error(coord, result)
    }

    /// converts a (longitude, latitude) coordinate in degrees into this CRS.
    pub fn from_geographic(&self, coord: Coord<f64>) -> Result<Coord<f64>, ProjectionError> {
        let (lambda, phi) = (coord.x.to_radians(), coord.y.to_radians());
        let result = match self {
            Crs::Geographic => coord,
            Crs::LambertConformalConic(p) => {
                let (x, y) = LambertConformalConic::new(p, GRS80)?.forward(lambda, phi);
                from_false_origin_meters(p, x, y)
            }
            Crs::AlbersEqualArea(p) => {
                let (x, y) = AlbersEqualArea::new(p, GRS80)?.forward(lambda, phi);
                from_false_origin_meters(p, x, y)
            }
        };
        finite_or_error(coord, result)
    }

    /// reprojects a coordinate from this CRS into the target CRS.
    pub fn transform(&self, target: &Crs, coord: Coord<f64>) -> Result<Coord<f64>, ProjectionError> {
        if self == target {
            return Ok(coord);
        }
        let geographic = self.to_geographic(coord)?;
        target.from_geographic(geographic)
    }

    pub fn transform_point(
        &self,
        target: &Crs,
        point: Point<f64>,
    ) -> Result<Point<f64>, ProjectionError> {
        self.transform(target, point.0).map(Point)
    }
}

fn to_false_origin_meters(p: &ConicParameters, coord: Coord<f64>) -> (f64, f64) {
    let k = p.unit.meters_per_unit();
    (
        (coord.x - p.false_easting) * k,
        (coord.y - p.false_northing) * k,
    )
}

fn from_false_origin_meters(p: &ConicParameters, x: f64, y: f64) -> Coord<f64> {
    let k = p.unit.meters_per_unit();
    Coord {
        x: x / k + p.false_easting,
        y: y / k + p.false_northing,
    }
}

fn finite_or_error(input: Coord<f64>, output: Coord<f64>) -> Result<Coord<f64>, ProjectionError> {
    if output.x.is_finite() && output.y.is_finite() {
        Ok(output)
    } else {
        Err(ProjectionError::NonFinite {
            x: input.x,
            y: input.y,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use geo::Coord;

    fn meridian_distance_meters(lat_deg: f64, delta_deg: f64) -> f64 {
        GRS80.meridional_radius(lat_deg.to_radians()) * delta_deg.to_radians()
    }

    #[test]
    fn test_origin_maps_to_false_origin() {
        let lcc = Crs::new_york_long_island();
        let origin = Coord {
            x: -74.0,
            y: 40.0 + 10.0 / 60.0,
        };
        let projected = lcc.from_geographic(origin).unwrap();
        assert!((projected.x - 984_250.0).abs() < 1e-6);
        assert!(projected.y.abs() < 1e-6);

        let albers = Crs::california_albers();
        let projected = albers.from_geographic(Coord { x: -120.0, y: 0.0 }).unwrap();
        assert!(projected.x.abs() < 1e-6);
        assert!((projected.y + 4_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_inverse_recovers_geographic_coordinate() {
        let manhattan = Coord {
            x: -73.9855,
            y: 40.758,
        };
        for crs in [Crs::new_york_long_island(), Crs::california_albers()] {
            let projected = crs.from_geographic(manhattan).unwrap();
            let back = crs.to_geographic(projected).unwrap();
            assert!((back.x - manhattan.x).abs() < 1e-9, "{crs:?}");
            assert!((back.y - manhattan.y).abs() < 1e-9, "{crs:?}");
        }
    }

    #[test]
    fn test_lcc_scale_near_one_inside_zone() {
        // a small step north along the central meridian should measure
        // nearly the ellipsoidal arc length, in feet.
        let lcc = Crs::new_york_long_island();
        let south = lcc.from_geographic(Coord { x: -74.0, y: 40.75 }).unwrap();
        let north = lcc.from_geographic(Coord { x: -74.0, y: 40.76 }).unwrap();
        let feet = north.y - south.y;
        let meters = feet * LinearUnit::UsSurveyFoot.meters_per_unit();
        let expected = meridian_distance_meters(40.755, 0.01);
        assert!((meters - expected).abs() / expected < 1e-3);
    }

    #[test]
    fn test_albers_scale_near_one_inside_zone() {
        let albers = Crs::california_albers();
        let south = albers.from_geographic(Coord { x: -120.0, y: 37.0 }).unwrap();
        let north = albers.from_geographic(Coord { x: -120.0, y: 37.01 }).unwrap();
        let expected = meridian_distance_meters(37.005, 0.01);
        assert!(((north.y - south.y) - expected).abs() / expected < 1e-2);
    }

    #[test]
    fn test_transform_between_projections() {
        let lcc = Crs::new_york_long_island();
        let albers = Crs::california_albers();
        let geographic = Coord {
            x: -73.95,
            y: 40.7,
        };
        let in_lcc = lcc.from_geographic(geographic).unwrap();
        let direct = albers.from_geographic(geographic).unwrap();
        let via = lcc.transform(&albers, in_lcc).unwrap();
        assert!((direct.x - via.x).abs() < 1e-4);
        assert!((direct.y - via.y).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_cone_is_rejected() {
        let crs = Crs::LambertConformalConic(ConicParameters {
            standard_parallel_1: 0.0,
            standard_parallel_2: 0.0,
            latitude_of_origin: 0.0,
            central_meridian: 0.0,
            false_easting: 0.0,
            false_northing: 0.0,
            unit: LinearUnit::Meter,
        });
        assert!(matches!(
            crs.validate(),
            Err(ProjectionError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_deserialize_from_config_shape() {
        let json = r#"{"type": "albers_equal_area", "standard_parallel_1": 34.0,
            "standard_parallel_2": 40.5, "latitude_of_origin": 0.0,
            "central_meridian": -120.0, "false_northing": -4000000.0}"#;
        let crs: Crs = serde_json::from_str(json).unwrap();
        assert_eq!(crs, Crs::california_albers());
    }
}
