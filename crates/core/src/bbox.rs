//! Bounding boxes.
//!
//! The wire form is a flat numeric array: four numbers for a 2D box, six for
//! a 3D box. Any other length is rejected.

use crate::json::{as_f64, number};
use crate::{Elevation, Error, FromJson, Latitude, Longitude, Result, Violation};
use serde::{Serialize, Serializer};
use serde_json::Value;

const ARITY_MESSAGE: &str = "BBox requires exactly 4 or 6 coordinates";

/// A two-dimensional bounding box in degrees.
///
/// West and east are deliberately not order-constrained, to tolerate boxes
/// that span the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bbox2d {
    pub(crate) west: Longitude,
    pub(crate) south: Latitude,
    pub(crate) east: Longitude,
    pub(crate) north: Latitude,
}

/// A three-dimensional bounding box: a 2D box plus an elevation range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bbox3d {
    pub(crate) base: Bbox2d,
    pub(crate) bottom: Elevation,
    pub(crate) top: Elevation,
}

/// A 2D or 3D bounding box, dispatched by the arity of its wire form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bbox {
    /// A four-number box.
    TwoDimensional(Bbox2d),

    /// A six-number box.
    ThreeDimensional(Bbox3d),
}

impl Bbox2d {
    /// Creates a new 2D bounding box.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_factory::Bbox2d;
    ///
    /// let bbox = Bbox2d::new(-150.0, 40.0, -148.0, 42.0).unwrap();
    /// assert_eq!(bbox.to_vec(), vec![-150.0, 40.0, -148.0, 42.0]);
    /// Bbox2d::new(-150.0, 40.0, -148.0, 38.0).unwrap_err();
    /// ```
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Result<Bbox2d> {
        Bbox2d::validated(west, south, east, north, ["west", "south", "east", "north"])
            .map_err(Error::Validation)
    }

    /// Returns the west longitude in degrees.
    pub fn west(&self) -> f64 {
        self.west.get()
    }

    /// Returns the south latitude in degrees.
    pub fn south(&self) -> f64 {
        self.south.get()
    }

    /// Returns the east longitude in degrees.
    pub fn east(&self) -> f64 {
        self.east.get()
    }

    /// Returns the north latitude in degrees.
    pub fn north(&self) -> f64 {
        self.north.get()
    }

    /// Returns the box as `[west, south, east, north]`.
    pub fn to_vec(&self) -> Vec<f64> {
        vec![self.west(), self.south(), self.east(), self.north()]
    }

    fn validated(
        west: f64,
        south: f64,
        east: f64,
        north: f64,
        paths: [&str; 4],
    ) -> std::result::Result<Bbox2d, Vec<Violation>> {
        let mut violations = Vec::new();
        let west = Longitude::new(west)
            .map_err(|v| violations.push(v.at(paths[0])))
            .ok();
        let south = Latitude::new(south)
            .map_err(|v| violations.push(v.at(paths[1])))
            .ok();
        let east = Longitude::new(east)
            .map_err(|v| violations.push(v.at(paths[2])))
            .ok();
        let north = Latitude::new(north)
            .map_err(|v| violations.push(v.at(paths[3])))
            .ok();
        let (Some(west), Some(south), Some(east), Some(north)) = (west, south, east, north) else {
            return Err(violations);
        };
        if south > north {
            return Err(vec![Violation::cross_field(
                "south latitude must be less than or equal to north latitude",
            )]);
        }
        Ok(Bbox2d {
            west,
            south,
            east,
            north,
        })
    }
}

impl Bbox3d {
    /// Creates a new 3D bounding box from its wire-order coordinates.
    pub fn new(west: f64, south: f64, bottom: f64, east: f64, north: f64, top: f64) -> Result<Bbox3d> {
        Bbox3d::validated(
            west,
            south,
            bottom,
            east,
            north,
            top,
            ["west", "south", "bottom", "east", "north", "top"],
        )
        .map_err(Error::Validation)
    }

    /// Returns the west longitude in degrees.
    pub fn west(&self) -> f64 {
        self.base.west()
    }

    /// Returns the south latitude in degrees.
    pub fn south(&self) -> f64 {
        self.base.south()
    }

    /// Returns the east longitude in degrees.
    pub fn east(&self) -> f64 {
        self.base.east()
    }

    /// Returns the north latitude in degrees.
    pub fn north(&self) -> f64 {
        self.base.north()
    }

    /// Returns the bottom elevation in meters.
    pub fn bottom(&self) -> f64 {
        self.bottom.get()
    }

    /// Returns the top elevation in meters.
    pub fn top(&self) -> f64 {
        self.top.get()
    }

    /// Returns the box as `[west, south, bottom, east, north, top]`.
    pub fn to_vec(&self) -> Vec<f64> {
        vec![
            self.west(),
            self.south(),
            self.bottom(),
            self.east(),
            self.north(),
            self.top(),
        ]
    }

    #[allow(clippy::too_many_arguments)]
    fn validated(
        west: f64,
        south: f64,
        bottom: f64,
        east: f64,
        north: f64,
        top: f64,
        paths: [&str; 6],
    ) -> std::result::Result<Bbox3d, Vec<Violation>> {
        let mut violations = Vec::new();
        let base = Bbox2d::validated(west, south, east, north, [paths[0], paths[1], paths[3], paths[4]])
            .map_err(|errors| violations.extend(errors))
            .ok();
        let bottom = Elevation::new(bottom)
            .map_err(|v| violations.push(v.at(paths[2])))
            .ok();
        let top = Elevation::new(top)
            .map_err(|v| violations.push(v.at(paths[5])))
            .ok();
        let (Some(base), Some(bottom), Some(top)) = (base, bottom, top) else {
            return Err(violations);
        };
        if bottom >= top {
            return Err(vec![Violation::cross_field(
                "bottom elevation must be strictly below top elevation",
            )]);
        }
        Ok(Bbox3d { base, bottom, top })
    }
}

impl Bbox {
    /// Returns the box as a flat coordinate vector in wire order.
    pub fn to_vec(&self) -> Vec<f64> {
        match self {
            Bbox::TwoDimensional(bbox) => bbox.to_vec(),
            Bbox::ThreeDimensional(bbox) => bbox.to_vec(),
        }
    }

    pub(crate) fn parse(value: &Value) -> std::result::Result<Bbox, Vec<Violation>> {
        let Some(array) = value.as_array() else {
            return Err(vec![
                Violation::structural("bbox must be a JSON array").with_value(value.clone()),
            ]);
        };
        let mut numbers = Vec::with_capacity(array.len());
        let mut violations = Vec::new();
        for (i, element) in array.iter().enumerate() {
            match as_f64(element, "coordinate") {
                Ok(number) => numbers.push(number),
                Err(violation) => violations.push(violation.at(format!("[{i}]"))),
            }
        }
        if !violations.is_empty() {
            return Err(violations);
        }
        match numbers.len() {
            4 => Bbox2d::validated(
                numbers[0],
                numbers[1],
                numbers[2],
                numbers[3],
                ["[0]", "[1]", "[2]", "[3]"],
            )
            .map(Bbox::TwoDimensional),
            6 => Bbox3d::validated(
                numbers[0],
                numbers[1],
                numbers[2],
                numbers[3],
                numbers[4],
                numbers[5],
                ["[0]", "[1]", "[2]", "[3]", "[4]", "[5]"],
            )
            .map(Bbox::ThreeDimensional),
            _ => Err(vec![
                Violation::structural(ARITY_MESSAGE).with_value(value.clone()),
            ]),
        }
    }

    pub(crate) fn to_value(&self) -> Value {
        Value::Array(self.to_vec().into_iter().map(number).collect())
    }
}

impl From<Bbox2d> for Bbox {
    fn from(bbox: Bbox2d) -> Bbox {
        Bbox::TwoDimensional(bbox)
    }
}

impl From<Bbox3d> for Bbox {
    fn from(bbox: Bbox3d) -> Bbox {
        Bbox::ThreeDimensional(bbox)
    }
}

impl FromJson for Bbox {
    fn from_value(value: Value) -> Result<Bbox> {
        Bbox::parse(&value).map_err(Error::Validation)
    }
}

impl Serialize for Bbox {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl Serialize for Bbox2d {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        Bbox::TwoDimensional(*self).to_value().serialize(serializer)
    }
}

impl Serialize for Bbox3d {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        Bbox::ThreeDimensional(*self).to_value().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::{Bbox, Bbox2d, Bbox3d};
    use crate::{FromJson, ViolationKind};
    use serde_json::json;

    #[test]
    fn four_numbers_make_a_2d_box() {
        let bbox = Bbox::from_value(json!([-150, 40, -148, 42])).unwrap();
        let Bbox::TwoDimensional(bbox) = bbox else {
            panic!("expected a 2D box");
        };
        assert_eq!(bbox.west(), -150.0);
        assert_eq!(bbox.south(), 40.0);
        assert_eq!(bbox.east(), -148.0);
        assert_eq!(bbox.north(), 42.0);
    }

    #[test]
    fn six_numbers_make_a_3d_box() {
        let bbox = Bbox::from_value(json!([-150, 40, -1, -148, 42, 1000])).unwrap();
        let Bbox::ThreeDimensional(bbox) = bbox else {
            panic!("expected a 3D box");
        };
        assert_eq!(bbox.bottom(), -1.0);
        assert_eq!(bbox.top(), 1000.0);
    }

    #[test]
    fn five_numbers_are_rejected() {
        let error = Bbox::from_value(json!([-150, 40, -148, 42, 0])).unwrap_err();
        let violations = error.violations().unwrap();
        assert_eq!(violations[0].message, "BBox requires exactly 4 or 6 coordinates");
        let error = Bbox::from_value(json!([])).unwrap_err();
        assert_eq!(
            error.violations().unwrap()[0].message,
            "BBox requires exactly 4 or 6 coordinates"
        );
    }

    #[test]
    fn south_above_north() {
        let error = Bbox2d::new(-150.0, 40.0, -148.0, 38.0).unwrap_err();
        let violations = error.violations().unwrap();
        assert_eq!(violations[0].kind, ViolationKind::CrossField);
        assert!(violations[0].message.contains("south latitude"));
    }

    #[test]
    fn flat_elevation_range() {
        let _ = Bbox3d::new(-150.0, 40.0, 0.0, -148.0, 42.0, 0.0).unwrap_err();
        let _ = Bbox3d::new(-150.0, 40.0, 10.0, -148.0, 42.0, -10.0).unwrap_err();
        let _ = Bbox3d::new(-150.0, 40.0, -10.0, -148.0, 42.0, 10.0).unwrap();
    }

    #[test]
    fn antimeridian_spanning_box_is_allowed() {
        let _ = Bbox2d::new(179.0, 40.0, -179.0, 42.0).unwrap();
    }

    #[test]
    fn out_of_range_coordinates_are_all_reported() {
        let error = Bbox::from_value(json!([-181, 40, -148, 91])).unwrap_err();
        let violations = error.violations().unwrap();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].path, "[0]");
        assert_eq!(violations[1].path, "[3]");
    }

    #[test]
    fn round_trips() {
        let bbox = Bbox::from_value(json!([-150, 40, -148, 42])).unwrap();
        assert_eq!(bbox.to_value(), json!([-150, 40, -148, 42]));
        let bbox = Bbox::from_value(json!([-150, 40, -1, -148, 42, 1000])).unwrap();
        assert_eq!(bbox.to_value(), json!([-150, 40, -1, -148, 42, 1000]));
    }
}
