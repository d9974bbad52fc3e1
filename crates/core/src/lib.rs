#![recursion_limit = "256"]
//! Define, build, validate, and serialize [STAC
//! Items](https://github.com/radiantearth/stac-spec/blob/master/item-spec/item-spec.md).
//!
//! A STAC Item is a GeoJSON Feature augmented with metadata fields that
//! describe a remote-sensing or geospatial asset. This crate models the item
//! and its nested types as constrained values: every type is validated at
//! construction and immutable afterwards, so a value you hold always
//! satisfies its invariants. Validation failures come back as a structured,
//! field-addressable report rather than a bare string.
//!
//! # Examples
//!
//! Parse (and so validate) an item from JSON:
//!
//! ```
//! use stac_factory::{FromJson, Item};
//!
//! let item = Item::from_json_str(include_str!("../tests/fixtures/minimal.json")).unwrap();
//! assert_eq!(item.id(), "minimal-item");
//! ```
//!
//! Build an item programmatically. Builders assemble the wire field set and
//! route it through the same validated parse path as untrusted input:
//!
//! ```
//! use stac_factory::{Bbox2d, Item, Polygon};
//!
//! let bbox = Bbox2d::new(100.0, 0.0, 101.0, 1.0).unwrap();
//! let item = Item::builder("an-id")
//!     .geometry(Polygon::from_bbox(&bbox).unwrap())
//!     .bbox(bbox)
//!     .datetime("2021-01-01T00:00:00Z")
//!     .build()
//!     .unwrap();
//! assert_eq!(item.datetime().unwrap().to_string(), "2021-01-01T00:00:00Z");
//! ```
//!
//! Validation errors are collected across fields and addressed by wire path:
//!
//! ```
//! use stac_factory::Bbox2d;
//!
//! let error = Bbox2d::new(-150.0, 40.0, -148.0, 38.0).unwrap_err();
//! let violations = error.violations().unwrap();
//! assert!(violations[0].message.contains("south latitude"));
//! ```

mod asset;
mod bbox;
pub mod constants;
mod error;
mod extension;
mod geometry;
mod item;
mod json;
mod link;
mod scalar;
mod schema;
mod version;

pub use {
    asset::{Asset, AssetBuilder, NamelessAsset},
    bbox::{Bbox, Bbox2d, Bbox3d},
    error::{Error, Violation, ViolationKind},
    extension::{
        EoExtension, EoExtensionBuilder, Extension, ViewExtension, ViewExtensionBuilder,
    },
    geometry::{
        Geometry, LinearRing, MAX_POLYGONS, MAX_RING_POSITIONS, MIN_RING_POSITIONS,
        MultiPolygon, Polygon, Position,
    },
    item::{Band, CommonMetadata, Item, ItemBuilder, Provider},
    json::{FromJson, ToJson},
    link::{Body, HeaderValue, HttpMethod, Link, LinkBuilder},
    scalar::{
        AssetName, Description, Elevation, ExtensionId, Gsd, Href, Identifier, Latitude,
        Longitude, MediaType, Percentage, Rel, Role, Title, UtcDatetime,
    },
    schema::json_schema,
    version::Version,
};

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, Error>;
