//! Constrained GeoJSON geometries.
//!
//! A [Polygon] carries exactly one exterior ring, and every ring is checked
//! against the full set of ring rules at construction: point count, closure,
//! simplicity, counter-clockwise winding, and no antimeridian crossing. A
//! shape that legitimately spans the antimeridian must be expressed as a
//! two-member [MultiPolygon], each half not crossing.

use crate::error::prefix;
use crate::json::{as_array, as_f64, as_object, as_str, number};
use crate::{Bbox2d, Elevation, Error, FromJson, Latitude, Longitude, Result, Violation};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// The minimum number of positions in a linear ring, closing position included.
pub const MIN_RING_POSITIONS: usize = 4;

/// The maximum number of positions in a linear ring.
pub const MAX_RING_POSITIONS: usize = 512;

/// The maximum number of polygons in a multi polygon.
pub const MAX_POLYGONS: usize = 2;

/// An ordered longitude, latitude pair with an optional elevation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// The longitude in degrees.
    pub longitude: Longitude,

    /// The latitude in degrees.
    pub latitude: Latitude,

    /// The elevation in meters, if present.
    pub elevation: Option<Elevation>,
}

/// A closed, simple, counter-clockwise ring of 4-512 positions.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRing(Vec<Position>);

/// A GeoJSON Polygon with exactly one linear ring.
///
/// Holes are not supported: the ring cardinality is fixed at exactly one,
/// not one-or-more.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    exterior: LinearRing,
}

/// A GeoJSON MultiPolygon with one or two polygons.
///
/// The two-polygon form is the accepted representation of a single shape
/// that crosses the antimeridian, split into two non-crossing halves.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPolygon {
    polygons: Vec<Polygon>,
}

/// A validated geometry: a polygon or a multi polygon.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// A single polygon.
    Polygon(Polygon),

    /// One or two polygons.
    MultiPolygon(MultiPolygon),
}

impl Position {
    /// Creates a new 2D position.
    pub fn new(longitude: f64, latitude: f64) -> Result<Position> {
        Position::build(longitude, latitude, None)
    }

    /// Creates a new 3D position.
    pub fn with_elevation(longitude: f64, latitude: f64, elevation: f64) -> Result<Position> {
        Position::build(longitude, latitude, Some(elevation))
    }

    fn build(longitude: f64, latitude: f64, elevation: Option<f64>) -> Result<Position> {
        let mut violations = Vec::new();
        let longitude = Longitude::new(longitude).map_err(|v| violations.push(v)).ok();
        let latitude = Latitude::new(latitude).map_err(|v| violations.push(v)).ok();
        let elevation = match elevation {
            Some(elevation) => Elevation::new(elevation)
                .map_err(|v| violations.push(v))
                .ok(),
            None => None,
        };
        match (longitude, latitude) {
            (Some(longitude), Some(latitude)) if violations.is_empty() => Ok(Position {
                longitude,
                latitude,
                elevation,
            }),
            _ => Err(Error::Validation(violations)),
        }
    }

    pub(crate) fn parse(value: &Value) -> std::result::Result<Position, Vec<Violation>> {
        let array = as_array(value, "position").map_err(|v| vec![v])?;
        if array.len() < 2 || array.len() > 3 {
            return Err(vec![
                Violation::structural(format!(
                    "position must have 2 or 3 coordinates, got {}",
                    array.len()
                ))
                .with_value(value.clone()),
            ]);
        }
        let mut violations = Vec::new();
        let longitude = as_f64(&array[0], "longitude")
            .and_then(Longitude::new)
            .map_err(|v| violations.push(v.at("[0]")))
            .ok();
        let latitude = as_f64(&array[1], "latitude")
            .and_then(Latitude::new)
            .map_err(|v| violations.push(v.at("[1]")))
            .ok();
        let elevation = array.get(2).and_then(|element| {
            as_f64(element, "elevation")
                .and_then(Elevation::new)
                .map_err(|v| violations.push(v.at("[2]")))
                .ok()
        });
        match (longitude, latitude) {
            (Some(longitude), Some(latitude)) if violations.is_empty() => Ok(Position {
                longitude,
                latitude,
                elevation,
            }),
            _ => Err(violations),
        }
    }

    pub(crate) fn to_value(&self) -> Value {
        let mut coordinates = vec![number(self.longitude.get()), number(self.latitude.get())];
        if let Some(elevation) = self.elevation {
            coordinates.push(number(elevation.get()));
        }
        Value::Array(coordinates)
    }
}

impl LinearRing {
    /// Creates a ring from positions, checking the ring rules.
    pub fn new(positions: Vec<Position>) -> Result<LinearRing> {
        LinearRing::validated(positions).map_err(Error::Validation)
    }

    /// Returns the ring's positions, closing position included.
    pub fn positions(&self) -> &[Position] {
        &self.0
    }

    pub(crate) fn parse(value: &Value) -> std::result::Result<LinearRing, Vec<Violation>> {
        let array = as_array(value, "linear ring").map_err(|v| vec![v])?;
        let mut positions = Vec::with_capacity(array.len());
        let mut violations = Vec::new();
        for (i, element) in array.iter().enumerate() {
            match Position::parse(element) {
                Ok(position) => positions.push(position),
                Err(errors) => violations.extend(prefix(errors, &format!("[{i}]"))),
            }
        }
        if !violations.is_empty() {
            return Err(violations);
        }
        LinearRing::validated(positions)
    }

    // Ring rules in order: point count, closure, simplicity, winding,
    // antimeridian. The first failed rule reports and the rest are skipped.
    fn validated(positions: Vec<Position>) -> std::result::Result<LinearRing, Vec<Violation>> {
        if positions.len() < MIN_RING_POSITIONS || positions.len() > MAX_RING_POSITIONS {
            return Err(vec![Violation::constraint(format!(
                "linear ring must have {MIN_RING_POSITIONS}-{MAX_RING_POSITIONS} positions, got {}",
                positions.len()
            ))]);
        }
        if positions[0] != positions[positions.len() - 1] {
            return Err(vec![Violation::cross_field(
                "linear ring must be closed: first and last positions must be equal",
            )]);
        }
        if let Some((i, j)) = self_intersection(&positions) {
            return Err(vec![Violation::cross_field(format!(
                "linear ring must be simple: segments {i} and {j} intersect"
            ))]);
        }
        if signed_area(&positions) <= 0.0 {
            return Err(vec![Violation::cross_field(
                "linear ring must be wound counter-clockwise",
            )]);
        }
        if let Some(i) = antimeridian_jump(&positions) {
            return Err(vec![Violation::cross_field(format!(
                "linear ring crosses the antimeridian between positions {i} and {}; \
                 split the shape into a MultiPolygon instead",
                i + 1
            ))]);
        }
        Ok(LinearRing(positions))
    }
}

impl Polygon {
    /// Creates a polygon from its exterior ring.
    pub fn new(exterior: LinearRing) -> Polygon {
        Polygon { exterior }
    }

    /// Returns the exterior ring.
    pub fn exterior(&self) -> &LinearRing {
        &self.exterior
    }

    /// The counter-clockwise rectangle around a 2D bounding box.
    ///
    /// Fails for degenerate boxes whose rectangle would not be a valid ring,
    /// e.g. when south equals north.
    pub fn from_bbox(bbox: &Bbox2d) -> Result<Polygon> {
        let corner = |longitude, latitude| Position {
            longitude,
            latitude,
            elevation: None,
        };
        let positions = vec![
            corner(bbox.west, bbox.south),
            corner(bbox.east, bbox.south),
            corner(bbox.east, bbox.north),
            corner(bbox.west, bbox.north),
            corner(bbox.west, bbox.south),
        ];
        LinearRing::new(positions).map(Polygon::new)
    }

    pub(crate) fn parse(value: &Value) -> std::result::Result<Polygon, Vec<Violation>> {
        let object = as_object(value, "geometry").map_err(|v| vec![v])?;
        check_type_tag(object, "Polygon")?;
        Polygon::parse_object(object)
    }

    fn parse_object(object: &Map<String, Value>) -> std::result::Result<Polygon, Vec<Violation>> {
        let Some(coordinates) = object.get("coordinates") else {
            return Err(vec![
                Violation::structural("missing required field").at("coordinates"),
            ]);
        };
        parse_coordinate_group(coordinates).map_err(|violations| prefix(violations, "coordinates"))
    }

    pub(crate) fn coordinates_value(&self) -> Value {
        Value::Array(vec![Value::Array(
            self.exterior
                .positions()
                .iter()
                .map(|position| position.to_value())
                .collect(),
        )])
    }
}

impl MultiPolygon {
    /// Creates a multi polygon from one or two polygons.
    pub fn new(polygons: Vec<Polygon>) -> Result<MultiPolygon> {
        if polygons.is_empty() || polygons.len() > MAX_POLYGONS {
            Err(Error::Validation(vec![
                Violation::constraint(format!(
                    "multi polygon must have 1-{MAX_POLYGONS} polygons, got {}",
                    polygons.len()
                ))
                .at("coordinates"),
            ]))
        } else {
            Ok(MultiPolygon { polygons })
        }
    }

    /// Returns the polygons.
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub(crate) fn parse(value: &Value) -> std::result::Result<MultiPolygon, Vec<Violation>> {
        let object = as_object(value, "geometry").map_err(|v| vec![v])?;
        check_type_tag(object, "MultiPolygon")?;
        MultiPolygon::parse_object(object)
    }

    fn parse_object(
        object: &Map<String, Value>,
    ) -> std::result::Result<MultiPolygon, Vec<Violation>> {
        let Some(coordinates) = object.get("coordinates") else {
            return Err(vec![
                Violation::structural("missing required field").at("coordinates"),
            ]);
        };
        let groups =
            as_array(coordinates, "coordinates").map_err(|v| vec![v.at("coordinates")])?;
        if groups.is_empty() || groups.len() > MAX_POLYGONS {
            return Err(vec![
                Violation::constraint(format!(
                    "multi polygon must have 1-{MAX_POLYGONS} polygons, got {}",
                    groups.len()
                ))
                .at("coordinates"),
            ]);
        }
        let mut polygons = Vec::with_capacity(groups.len());
        let mut violations = Vec::new();
        for (i, group) in groups.iter().enumerate() {
            match parse_coordinate_group(group) {
                Ok(polygon) => polygons.push(polygon),
                Err(errors) => {
                    violations.extend(prefix(prefix(errors, &format!("[{i}]")), "coordinates"));
                }
            }
        }
        if violations.is_empty() {
            Ok(MultiPolygon { polygons })
        } else {
            Err(violations)
        }
    }
}

impl Geometry {
    pub(crate) fn parse(value: &Value) -> std::result::Result<Geometry, Vec<Violation>> {
        let object = as_object(value, "geometry").map_err(|v| vec![v])?;
        let Some(tag) = object.get("type") else {
            return Err(vec![Violation::structural("missing required field").at("type")]);
        };
        let tag = as_str(tag, "type").map_err(|v| vec![v.at("type")])?;
        match tag {
            "Polygon" => Polygon::parse_object(object).map(Geometry::Polygon),
            "MultiPolygon" => MultiPolygon::parse_object(object).map(Geometry::MultiPolygon),
            other => Err(vec![
                Violation::structural(format!(
                    "geometry type must be \"Polygon\" or \"MultiPolygon\", got {other:?}"
                ))
                .with_value(other)
                .at("type"),
            ]),
        }
    }

    /// Converts this geometry to its wire JSON value.
    pub fn to_value(&self) -> Value {
        match self {
            Geometry::Polygon(polygon) => serde_json::json!({
                "type": "Polygon",
                "coordinates": polygon.coordinates_value(),
            }),
            Geometry::MultiPolygon(multi_polygon) => serde_json::json!({
                "type": "MultiPolygon",
                "coordinates": Value::Array(
                    multi_polygon
                        .polygons
                        .iter()
                        .map(|polygon| polygon.coordinates_value())
                        .collect(),
                ),
            }),
        }
    }
}

impl From<Polygon> for Geometry {
    fn from(polygon: Polygon) -> Geometry {
        Geometry::Polygon(polygon)
    }
}

impl From<MultiPolygon> for Geometry {
    fn from(multi_polygon: MultiPolygon) -> Geometry {
        Geometry::MultiPolygon(multi_polygon)
    }
}

impl FromJson for Geometry {
    fn from_value(value: Value) -> Result<Geometry> {
        Geometry::parse(&value).map_err(Error::Validation)
    }
}

impl FromJson for Polygon {
    fn from_value(value: Value) -> Result<Polygon> {
        Polygon::parse(&value).map_err(Error::Validation)
    }
}

impl FromJson for MultiPolygon {
    fn from_value(value: Value) -> Result<MultiPolygon> {
        MultiPolygon::parse(&value).map_err(Error::Validation)
    }
}

impl Serialize for Geometry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl Serialize for Polygon {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serde_json::json!({
            "type": "Polygon",
            "coordinates": self.coordinates_value(),
        })
        .serialize(serializer)
    }
}

impl Serialize for MultiPolygon {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serde_json::json!({
            "type": "MultiPolygon",
            "coordinates": Value::Array(
                self.polygons
                    .iter()
                    .map(|polygon| polygon.coordinates_value())
                    .collect(),
            ),
        })
        .serialize(serializer)
    }
}

impl From<&Polygon> for geojson::Geometry {
    fn from(polygon: &Polygon) -> geojson::Geometry {
        geojson::Geometry::new(geojson::Value::Polygon(rings(polygon)))
    }
}

impl From<&MultiPolygon> for geojson::Geometry {
    fn from(multi_polygon: &MultiPolygon) -> geojson::Geometry {
        geojson::Geometry::new(geojson::Value::MultiPolygon(
            multi_polygon.polygons.iter().map(rings).collect(),
        ))
    }
}

impl From<&Geometry> for geojson::Geometry {
    fn from(geometry: &Geometry) -> geojson::Geometry {
        match geometry {
            Geometry::Polygon(polygon) => polygon.into(),
            Geometry::MultiPolygon(multi_polygon) => multi_polygon.into(),
        }
    }
}

fn rings(polygon: &Polygon) -> Vec<Vec<Vec<f64>>> {
    vec![
        polygon
            .exterior
            .positions()
            .iter()
            .map(|position| {
                let mut coordinates = vec![position.longitude.get(), position.latitude.get()];
                if let Some(elevation) = position.elevation {
                    coordinates.push(elevation.get());
                }
                coordinates
            })
            .collect(),
    ]
}

fn check_type_tag(
    object: &Map<String, Value>,
    expected: &str,
) -> std::result::Result<(), Vec<Violation>> {
    let Some(tag) = object.get("type") else {
        return Err(vec![Violation::structural("missing required field").at("type")]);
    };
    let tag = as_str(tag, "type").map_err(|v| vec![v.at("type")])?;
    if tag == expected {
        Ok(())
    } else {
        Err(vec![
            Violation::structural(format!("geometry type must be {expected:?}, got {tag:?}"))
                .with_value(tag)
                .at("type"),
        ])
    }
}

fn parse_coordinate_group(value: &Value) -> std::result::Result<Polygon, Vec<Violation>> {
    let rings = as_array(value, "polygon coordinates").map_err(|v| vec![v])?;
    if rings.len() != 1 {
        return Err(vec![Violation::constraint(format!(
            "polygon must have exactly one linear ring (holes are not supported), got {}",
            rings.len()
        ))]);
    }
    LinearRing::parse(&rings[0])
        .map(Polygon::new)
        .map_err(|violations| prefix(violations, "[0]"))
}

type Point = (f64, f64);

fn point(position: &Position) -> Point {
    (position.longitude.get(), position.latitude.get())
}

// Shoelace sum over the closed ring; positive means counter-clockwise.
fn signed_area(positions: &[Position]) -> f64 {
    let mut sum = 0.0;
    for pair in positions.windows(2) {
        let (ax, ay) = point(&pair[0]);
        let (bx, by) = point(&pair[1]);
        sum += ax * by - bx * ay;
    }
    sum / 2.0
}

// An adjacent-vertex longitude delta above 180 degrees implies the segment
// wrapped around the back of the globe.
fn antimeridian_jump(positions: &[Position]) -> Option<usize> {
    positions
        .windows(2)
        .position(|pair| (point(&pair[0]).0 - point(&pair[1]).0).abs() > 180.0)
}

// O(n^2) in the vertex count, bounded by MAX_RING_POSITIONS.
fn self_intersection(positions: &[Position]) -> Option<(usize, usize)> {
    let n = positions.len() - 1;
    for i in 0..n {
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                // adjacent through closure
                continue;
            }
            if segments_intersect(
                point(&positions[i]),
                point(&positions[i + 1]),
                point(&positions[j]),
                point(&positions[j + 1]),
            ) {
                return Some((i, j));
            }
        }
    }
    None
}

fn cross(origin: Point, a: Point, b: Point) -> f64 {
    (a.0 - origin.0) * (b.1 - origin.1) - (a.1 - origin.1) * (b.0 - origin.0)
}

fn within_bounds(a: Point, b: Point, p: Point) -> bool {
    p.0 >= a.0.min(b.0) && p.0 <= a.0.max(b.0) && p.1 >= a.1.min(b.1) && p.1 <= a.1.max(b.1)
}

fn segments_intersect(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    let d1 = cross(b1, b2, a1);
    let d2 = cross(b1, b2, a2);
    let d3 = cross(a1, a2, b1);
    let d4 = cross(a1, a2, b2);
    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }
    (d1 == 0.0 && within_bounds(b1, b2, a1))
        || (d2 == 0.0 && within_bounds(b1, b2, a2))
        || (d3 == 0.0 && within_bounds(a1, a2, b1))
        || (d4 == 0.0 && within_bounds(a1, a2, b2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ViolationKind;
    use serde_json::json;

    fn unit_square() -> Value {
        json!({
            "type": "Polygon",
            "coordinates": [[[100.0, 0.0], [101.0, 0.0], [101.0, 1.0], [100.0, 1.0], [100.0, 0.0]]],
        })
    }

    #[test]
    fn valid_polygon() {
        let geometry = Geometry::from_value(unit_square()).unwrap();
        let Geometry::Polygon(polygon) = geometry else {
            panic!("expected a polygon");
        };
        assert_eq!(polygon.exterior().positions().len(), 5);
    }

    #[test]
    fn open_ring() {
        let value = json!({
            "type": "Polygon",
            "coordinates": [[[100.0, 0.0], [101.0, 0.0], [101.0, 1.0], [100.0, 1.0]]],
        });
        let error = Geometry::from_value(value).unwrap_err();
        let violations = error.violations().unwrap();
        assert_eq!(violations[0].path, "coordinates[0]");
        assert!(violations[0].message.contains("closed"));
    }

    #[test]
    fn clockwise_ring() {
        let value = json!({
            "type": "Polygon",
            "coordinates": [[[100.0, 0.0], [100.0, 1.0], [101.0, 1.0], [101.0, 0.0], [100.0, 0.0]]],
        });
        let error = Geometry::from_value(value).unwrap_err();
        let violations = error.violations().unwrap();
        assert_eq!(violations[0].kind, ViolationKind::CrossField);
        assert!(violations[0].message.contains("counter-clockwise"));
    }

    #[test]
    fn bowtie_ring_is_not_simple() {
        let value = json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [1.0, 1.0], [1.0, 0.0], [0.0, 1.0], [0.0, 0.0]]],
        });
        let error = Geometry::from_value(value).unwrap_err();
        assert!(
            error.violations().unwrap()[0]
                .message
                .contains("simple")
        );
    }

    #[test]
    fn holes_are_rejected() {
        let value = json!({
            "type": "Polygon",
            "coordinates": [
                [[100.0, 0.0], [101.0, 0.0], [101.0, 1.0], [100.0, 1.0], [100.0, 0.0]],
                [[100.2, 0.2], [100.2, 0.8], [100.8, 0.8], [100.8, 0.2], [100.2, 0.2]],
            ],
        });
        let error = Geometry::from_value(value).unwrap_err();
        assert!(
            error.violations().unwrap()[0]
                .message
                .contains("holes are not supported")
        );
    }

    #[test]
    fn too_few_positions() {
        let value = json!({
            "type": "Polygon",
            "coordinates": [[[100.0, 0.0], [101.0, 0.0], [100.0, 0.0]]],
        });
        let error = Geometry::from_value(value).unwrap_err();
        assert!(error.violations().unwrap()[0].message.contains("4-512"));
    }

    #[test]
    fn antimeridian_crossing_polygon() {
        // CCW in naive coordinates, but the longitude jumps imply wraparound
        let value = json!({
            "type": "Polygon",
            "coordinates": [[[179.0, 0.0], [179.0, 1.0], [-179.0, 1.0], [-179.0, 0.0], [179.0, 0.0]]],
        });
        let error = Geometry::from_value(value).unwrap_err();
        assert!(
            error.violations().unwrap()[0]
                .message
                .contains("antimeridian")
        );
    }

    #[test]
    fn antimeridian_crossing_as_multi_polygon() {
        // the same strait, split at the antimeridian into two CCW halves
        let value = json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[
                    [180.0, 68.4858038539966],
                    [178.11849452315352, 68.44150171742469],
                    [178.32076050993456, 67.46099994484686],
                    [180.0, 67.50167854411256],
                    [180.0, 68.4858038539966],
                ]],
                [[
                    [-179.20556042231803, 68.49813373282021],
                    [-180.0, 68.4858038540324],
                    [-180.0, 67.50167854415058],
                    [-179.31735654435366, 67.51320396474968],
                    [-179.12603876314654, 67.65097850440162],
                    [-179.20556042231803, 68.49813373282021],
                ]],
            ],
        });
        let geometry = Geometry::from_value(value).unwrap();
        let Geometry::MultiPolygon(multi_polygon) = geometry else {
            panic!("expected a multi polygon");
        };
        assert_eq!(multi_polygon.polygons().len(), 2);
    }

    #[test]
    fn multi_polygon_with_three_members() {
        let ring = json!([[[100.0, 0.0], [101.0, 0.0], [101.0, 1.0], [100.0, 1.0], [100.0, 0.0]]]);
        let value = json!({
            "type": "MultiPolygon",
            "coordinates": [ring.clone(), ring.clone(), ring],
        });
        let error = Geometry::from_value(value).unwrap_err();
        assert!(error.violations().unwrap()[0].message.contains("1-2"));
    }

    #[test]
    fn out_of_range_position_paths() {
        let value = json!({
            "type": "Polygon",
            "coordinates": [[[100.0, 0.0], [181.0, 0.0], [101.0, 91.0], [100.0, 1.0], [100.0, 0.0]]],
        });
        let error = Geometry::from_value(value).unwrap_err();
        let violations = error.violations().unwrap();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].path, "coordinates[0][1][0]");
        assert_eq!(violations[1].path, "coordinates[0][2][1]");
    }

    #[test]
    fn unknown_type_tag() {
        let value = json!({"type": "Point", "coordinates": [100.0, 0.0]});
        let error = Geometry::from_value(value).unwrap_err();
        assert_eq!(error.violations().unwrap()[0].path, "type");
    }

    #[test]
    fn from_bbox() {
        let bbox = Bbox2d::new(-150.0, 40.0, -148.0, 42.0).unwrap();
        let polygon = Polygon::from_bbox(&bbox).unwrap();
        assert_eq!(polygon.exterior().positions().len(), 5);
        let converted: geojson::Geometry = (&polygon).into();
        assert!(matches!(converted.value, geojson::Value::Polygon(_)));
    }

    #[test]
    fn serializes_back_to_wire_shape() {
        let geometry = Geometry::from_value(unit_square()).unwrap();
        assert_eq!(
            geometry.to_value(),
            json!({
                "type": "Polygon",
                "coordinates": [[[100, 0], [101, 0], [101, 1], [100, 1], [100, 0]]],
            })
        );
    }
}
