//! Downloadable resources attached to an item.
//!
//! On the wire, assets form a map of name to asset object; internally they
//! are a list of named assets. [Asset] and [NamelessAsset] are two distinct
//! types related by a pure, invertible projection, rather than one type with
//! an optional name.

use crate::json::{as_object, optional_str, optional_str_list, required_str};
use crate::{
    AssetName, Description, Error, FromJson, Href, MediaType, Result, Role, Title, Violation,
};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// An asset without its map key, the wire-serialized projection.
#[derive(Debug, Clone, PartialEq)]
pub struct NamelessAsset {
    /// URI to the asset object.
    ///
    /// Relative and absolute URI are both allowed, and trailing slashes are
    /// significant.
    pub href: Href,

    /// The displayed title for clients and users.
    pub title: Option<Title>,

    /// A description of the asset providing additional details, such as how
    /// it was processed or created.
    pub description: Option<Description>,

    /// Media type of the asset.
    pub r#type: Option<MediaType>,

    /// The semantic roles of the asset, similar to the use of rel in links.
    pub roles: Option<Vec<Role>>,
}

/// A named asset, keyed by its name in an item's asset map.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    /// The asset's key in the containing map.
    pub name: AssetName,

    /// URI to the asset object.
    pub href: Href,

    /// The displayed title for clients and users.
    pub title: Option<Title>,

    /// A description of the asset.
    pub description: Option<Description>,

    /// Media type of the asset.
    pub r#type: Option<MediaType>,

    /// The semantic roles of the asset.
    pub roles: Option<Vec<Role>>,
}

impl NamelessAsset {
    pub(crate) fn parse(value: &Value) -> std::result::Result<NamelessAsset, Vec<Violation>> {
        let object = as_object(value, "asset").map_err(|v| vec![v])?;
        let mut violations = Vec::new();
        let href = required_str(object, "href", |s| Href::new(s), &mut violations);
        let title = optional_str(object, "title", |s| Title::new(s), &mut violations);
        let description = optional_str(object, "description", |s| Description::new(s), &mut violations);
        let r#type = optional_str(object, "type", |s| MediaType::new(s), &mut violations);
        let roles = optional_str_list(object, "roles", |s| Role::new(s), &mut violations);
        match href {
            Some(href) if violations.is_empty() => Ok(NamelessAsset {
                href,
                title,
                description,
                r#type,
                roles,
            }),
            _ => Err(violations),
        }
    }

    /// Converts this asset to its wire JSON value, unset fields serialized as
    /// null.
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "href": self.href.as_str(),
            "title": self.title.as_ref().map(Title::as_str),
            "description": self.description.as_ref().map(Description::as_str),
            "type": self.r#type.as_ref().map(MediaType::as_str),
            "roles": self
                .roles
                .as_ref()
                .map(|roles| roles.iter().map(Role::as_str).collect::<Vec<_>>()),
        })
    }
}

impl Asset {
    /// Creates a builder for an asset with the two required fields.
    ///
    /// The builder assembles the generic field set and delegates to the same
    /// validated parse path used for wire input.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_factory::Asset;
    ///
    /// let asset = Asset::builder("thumbnail", "https://api.example.com/t.jpg")
    ///     .media_type("image/jpeg")
    ///     .role("thumbnail")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(asset.name.as_str(), "thumbnail");
    /// ```
    pub fn builder(name: impl Into<String>, href: impl Into<String>) -> AssetBuilder {
        let mut object = Map::new();
        let _ = object.insert("name".to_string(), Value::String(name.into()));
        let _ = object.insert("href".to_string(), Value::String(href.into()));
        AssetBuilder { object }
    }

    /// Combines a map key and a wire asset into a named asset.
    pub fn from_parts(name: AssetName, asset: NamelessAsset) -> Asset {
        Asset {
            name,
            href: asset.href,
            title: asset.title,
            description: asset.description,
            r#type: asset.r#type,
            roles: asset.roles,
        }
    }

    /// Splits this asset into its map key and its wire projection.
    pub fn into_parts(self) -> (AssetName, NamelessAsset) {
        (
            self.name,
            NamelessAsset {
                href: self.href,
                title: self.title,
                description: self.description,
                r#type: self.r#type,
                roles: self.roles,
            },
        )
    }

    pub(crate) fn parse(value: &Value) -> std::result::Result<Asset, Vec<Violation>> {
        let object = as_object(value, "asset").map_err(|v| vec![v])?;
        let mut violations = Vec::new();
        let name = required_str(object, "name", |s| AssetName::new(s), &mut violations);
        let asset = NamelessAsset::parse(value)
            .map_err(|errors| violations.extend(errors))
            .ok();
        match (name, asset) {
            (Some(name), Some(asset)) if violations.is_empty() => {
                Ok(Asset::from_parts(name, asset))
            }
            _ => Err(violations),
        }
    }
}

impl From<Asset> for NamelessAsset {
    fn from(asset: Asset) -> NamelessAsset {
        asset.into_parts().1
    }
}

impl FromJson for NamelessAsset {
    fn from_value(value: Value) -> Result<NamelessAsset> {
        NamelessAsset::parse(&value).map_err(Error::Validation)
    }
}

impl FromJson for Asset {
    fn from_value(value: Value) -> Result<Asset> {
        Asset::parse(&value).map_err(Error::Validation)
    }
}

impl Serialize for NamelessAsset {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// Builds an [Asset] through the validated parse path.
#[derive(Debug, Clone)]
pub struct AssetBuilder {
    object: Map<String, Value>,
}

impl AssetBuilder {
    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> AssetBuilder {
        let _ = self
            .object
            .insert("title".to_string(), Value::String(title.into()));
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> AssetBuilder {
        let _ = self
            .object
            .insert("description".to_string(), Value::String(description.into()));
        self
    }

    /// Sets the media type.
    pub fn media_type(mut self, media_type: impl Into<String>) -> AssetBuilder {
        let _ = self
            .object
            .insert("type".to_string(), Value::String(media_type.into()));
        self
    }

    /// Adds a semantic role.
    pub fn role(mut self, role: impl Into<String>) -> AssetBuilder {
        let roles = self
            .object
            .entry("roles")
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(roles) = roles {
            roles.push(Value::String(role.into()));
        }
        self
    }

    /// Validates and builds the asset.
    pub fn build(self) -> Result<Asset> {
        Asset::parse(&Value::Object(self.object)).map_err(Error::Validation)
    }
}

#[cfg(test)]
mod tests {
    use super::{Asset, NamelessAsset};
    use crate::FromJson;
    use serde_json::json;

    #[test]
    fn builder() {
        let asset = Asset::builder("asset1", "https://api.example.com/x.json")
            .title("an item")
            .description("an item description")
            .media_type("application/json")
            .role("data")
            .build()
            .unwrap();
        assert_eq!(asset.name.as_str(), "asset1");
        assert_eq!(asset.roles.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn builder_rejects_a_long_name() {
        let error = Asset::builder("x".repeat(33), "https://api.example.com/x.json")
            .build()
            .unwrap_err();
        assert_eq!(error.violations().unwrap()[0].path, "name");
    }

    #[test]
    fn projection_is_invertible() {
        let asset = Asset::builder("asset1", "https://api.example.com/x.json")
            .role("data")
            .build()
            .unwrap();
        let (name, nameless) = asset.clone().into_parts();
        assert_eq!(Asset::from_parts(name, nameless), asset);
    }

    #[test]
    fn wire_projection_has_no_name() {
        let asset = Asset::builder("asset1", "https://api.example.com/x.json")
            .build()
            .unwrap();
        let nameless = NamelessAsset::from(asset);
        assert_eq!(
            nameless.to_value(),
            json!({
                "href": "https://api.example.com/x.json",
                "title": null,
                "description": null,
                "type": null,
                "roles": null,
            })
        );
    }

    #[test]
    fn bad_role_is_reported_with_its_index() {
        let error = NamelessAsset::from_value(json!({
            "href": "https://api.example.com/x.json",
            "roles": ["data", "not a role"],
        }))
        .unwrap_err();
        assert_eq!(error.violations().unwrap()[0].path, "roles[1]");
    }
}
