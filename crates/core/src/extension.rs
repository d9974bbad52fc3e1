//! Optional metadata namespaces.
//!
//! An extension contributes alias-prefixed, validated fields to an item's
//! `properties` and declares a stable identifier that ends up in the item's
//! `stac_extensions` list. Instances are supplied explicitly by the caller
//! when building an item; no process-wide registry is consulted.

use crate::json::number;
use crate::scalar::bounded;
use crate::{Error, Percentage, Result};
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt::Debug;

/// A STAC extension: an optional metadata namespace contributing
/// alias-prefixed fields to an item's properties.
pub trait Extension: Debug + Send + Sync {
    /// The stable identifier of this extension, typically a schema URI.
    fn identifier(&self) -> &str;

    /// The fields this extension contributes to the item's `properties`,
    /// keyed by their alias-prefixed names (e.g. `eo:cloud_cover`).
    fn fields(&self) -> IndexMap<String, Value>;
}

/// The electro-optical extension.
///
/// # Examples
///
/// ```
/// use stac_factory::EoExtension;
///
/// let eo = EoExtension::builder().cloud_cover(3.14).build().unwrap();
/// assert_eq!(eo.cloud_cover(), Some(3.14));
/// EoExtension::builder().cloud_cover(101.0).build().unwrap_err();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EoExtension {
    cloud_cover: Option<Percentage>,
    snow_cover: Option<Percentage>,
}

/// Builds an [EoExtension].
#[derive(Debug, Clone, Copy, Default)]
pub struct EoExtensionBuilder {
    cloud_cover: Option<f64>,
    snow_cover: Option<f64>,
}

impl EoExtension {
    /// The schema URI identifying this extension.
    pub const IDENTIFIER: &'static str =
        "https://stac-extensions.github.io/eo/v2.0.0/schema.json";

    /// Creates a builder.
    pub fn builder() -> EoExtensionBuilder {
        EoExtensionBuilder::default()
    }

    /// Returns the cloud cover percentage.
    pub fn cloud_cover(&self) -> Option<f64> {
        self.cloud_cover.map(|percentage| percentage.get())
    }

    /// Returns the snow cover percentage.
    pub fn snow_cover(&self) -> Option<f64> {
        self.snow_cover.map(|percentage| percentage.get())
    }
}

impl EoExtensionBuilder {
    /// Sets the cloud cover percentage.
    pub fn cloud_cover(mut self, cloud_cover: f64) -> EoExtensionBuilder {
        self.cloud_cover = Some(cloud_cover);
        self
    }

    /// Sets the snow cover percentage.
    pub fn snow_cover(mut self, snow_cover: f64) -> EoExtensionBuilder {
        self.snow_cover = Some(snow_cover);
        self
    }

    /// Validates and builds the extension.
    pub fn build(self) -> Result<EoExtension> {
        let mut violations = Vec::new();
        let cloud_cover = self.cloud_cover.and_then(|value| {
            Percentage::new(value)
                .map_err(|v| violations.push(v.at("eo:cloud_cover")))
                .ok()
        });
        let snow_cover = self.snow_cover.and_then(|value| {
            Percentage::new(value)
                .map_err(|v| violations.push(v.at("eo:snow_cover")))
                .ok()
        });
        if violations.is_empty() {
            Ok(EoExtension {
                cloud_cover,
                snow_cover,
            })
        } else {
            Err(Error::Validation(violations))
        }
    }
}

impl Extension for EoExtension {
    fn identifier(&self) -> &str {
        EoExtension::IDENTIFIER
    }

    fn fields(&self) -> IndexMap<String, Value> {
        let mut fields = IndexMap::new();
        if let Some(cloud_cover) = self.cloud_cover {
            let _ = fields.insert("eo:cloud_cover".to_string(), number(cloud_cover.get()));
        }
        if let Some(snow_cover) = self.snow_cover {
            let _ = fields.insert("eo:snow_cover".to_string(), number(snow_cover.get()));
        }
        fields
    }
}

/// The viewing geometry extension.
///
/// All angles are in degrees: `off_nadir` and `incidence_angle` in
/// `[0, 90]`, `azimuth` and `sun_azimuth` in `[0, 360]`, and
/// `sun_elevation` in `[-90, 90]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewExtension {
    off_nadir: Option<f64>,
    incidence_angle: Option<f64>,
    azimuth: Option<f64>,
    sun_azimuth: Option<f64>,
    sun_elevation: Option<f64>,
}

/// Builds a [ViewExtension].
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewExtensionBuilder {
    view: ViewExtension,
}

impl ViewExtension {
    /// The schema URI identifying this extension.
    pub const IDENTIFIER: &'static str =
        "https://stac-extensions.github.io/view/v1.0.0/schema.json";

    /// Creates a builder.
    pub fn builder() -> ViewExtensionBuilder {
        ViewExtensionBuilder::default()
    }

    /// Returns the off-nadir angle.
    pub fn off_nadir(&self) -> Option<f64> {
        self.off_nadir
    }

    /// Returns the incidence angle.
    pub fn incidence_angle(&self) -> Option<f64> {
        self.incidence_angle
    }

    /// Returns the viewing azimuth.
    pub fn azimuth(&self) -> Option<f64> {
        self.azimuth
    }

    /// Returns the sun azimuth.
    pub fn sun_azimuth(&self) -> Option<f64> {
        self.sun_azimuth
    }

    /// Returns the sun elevation.
    pub fn sun_elevation(&self) -> Option<f64> {
        self.sun_elevation
    }
}

impl ViewExtensionBuilder {
    /// Sets the off-nadir angle.
    pub fn off_nadir(mut self, off_nadir: f64) -> ViewExtensionBuilder {
        self.view.off_nadir = Some(off_nadir);
        self
    }

    /// Sets the incidence angle.
    pub fn incidence_angle(mut self, incidence_angle: f64) -> ViewExtensionBuilder {
        self.view.incidence_angle = Some(incidence_angle);
        self
    }

    /// Sets the viewing azimuth.
    pub fn azimuth(mut self, azimuth: f64) -> ViewExtensionBuilder {
        self.view.azimuth = Some(azimuth);
        self
    }

    /// Sets the sun azimuth.
    pub fn sun_azimuth(mut self, sun_azimuth: f64) -> ViewExtensionBuilder {
        self.view.sun_azimuth = Some(sun_azimuth);
        self
    }

    /// Sets the sun elevation.
    pub fn sun_elevation(mut self, sun_elevation: f64) -> ViewExtensionBuilder {
        self.view.sun_elevation = Some(sun_elevation);
        self
    }

    /// Validates and builds the extension.
    pub fn build(self) -> Result<ViewExtension> {
        let mut violations = Vec::new();
        let mut check = |value: Option<f64>, min: f64, max: f64, alias: &str| {
            value.and_then(|value| {
                bounded(value, min, max, alias)
                    .map_err(|v| violations.push(v.at(alias)))
                    .ok()
            })
        };
        let view = ViewExtension {
            off_nadir: check(self.view.off_nadir, 0.0, 90.0, "view:off_nadir"),
            incidence_angle: check(self.view.incidence_angle, 0.0, 90.0, "view:incidence_angle"),
            azimuth: check(self.view.azimuth, 0.0, 360.0, "view:azimuth"),
            sun_azimuth: check(self.view.sun_azimuth, 0.0, 360.0, "view:sun_azimuth"),
            sun_elevation: check(self.view.sun_elevation, -90.0, 90.0, "view:sun_elevation"),
        };
        if violations.is_empty() {
            Ok(view)
        } else {
            Err(Error::Validation(violations))
        }
    }
}

impl Extension for ViewExtension {
    fn identifier(&self) -> &str {
        ViewExtension::IDENTIFIER
    }

    fn fields(&self) -> IndexMap<String, Value> {
        let mut fields = IndexMap::new();
        let mut insert = |alias: &str, value: Option<f64>| {
            if let Some(value) = value {
                let _ = fields.insert(alias.to_string(), number(value));
            }
        };
        insert("view:off_nadir", self.off_nadir);
        insert("view:incidence_angle", self.incidence_angle);
        insert("view:azimuth", self.azimuth);
        insert("view:sun_azimuth", self.sun_azimuth);
        insert("view:sun_elevation", self.sun_elevation);
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::{EoExtension, Extension, ViewExtension};
    use serde_json::json;

    #[test]
    fn eo_fields_are_alias_prefixed() {
        let eo = EoExtension::builder()
            .cloud_cover(3.14)
            .snow_cover(2.7)
            .build()
            .unwrap();
        let fields = eo.fields();
        assert_eq!(fields["eo:cloud_cover"], json!(3.14));
        assert_eq!(fields["eo:snow_cover"], json!(2.7));
    }

    #[test]
    fn eo_skips_unset_fields() {
        let eo = EoExtension::builder().cloud_cover(3.14).build().unwrap();
        assert_eq!(eo.fields().len(), 1);
        assert!(EoExtension::builder().build().unwrap().fields().is_empty());
    }

    #[test]
    fn eo_rejects_out_of_range_percentages() {
        let error = EoExtension::builder().cloud_cover(101.0).build().unwrap_err();
        assert_eq!(error.violations().unwrap()[0].path, "eo:cloud_cover");
        let _ = EoExtension::builder().snow_cover(-0.5).build().unwrap_err();
    }

    #[test]
    fn view_angle_ranges() {
        let view = ViewExtension::builder()
            .off_nadir(10.5)
            .incidence_angle(15.3)
            .azimuth(230.1)
            .sun_azimuth(120.5)
            .sun_elevation(65.2)
            .build()
            .unwrap();
        assert_eq!(view.fields().len(), 5);
        let _ = ViewExtension::builder().off_nadir(90.1).build().unwrap_err();
        let _ = ViewExtension::builder().azimuth(360.5).build().unwrap_err();
        let _ = ViewExtension::builder()
            .sun_elevation(-90.5)
            .build()
            .unwrap_err();
    }

    #[test]
    fn identifiers() {
        assert_eq!(
            EoExtension::default().identifier(),
            "https://stac-extensions.github.io/eo/v2.0.0/schema.json"
        );
        assert_eq!(
            ViewExtension::default().identifier(),
            "https://stac-extensions.github.io/view/v1.0.0/schema.json"
        );
    }
}
