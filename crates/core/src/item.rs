//! The STAC Item: a GeoJSON Feature augmented with STAC fields.
//!
//! Construction is a single-pass pipeline: legacy datetimes are hoisted out
//! of `properties`, every field is parsed independently with all violations
//! collected, shape dispatch normalizes the bbox arity and the assets map,
//! and cross-field invariants run last. No partially-valid item is ever
//! observable.
//!
//! Internally, common metadata and extension fields are stored flat; on the
//! wire they nest under a `properties` object and assets re-key into a
//! name-to-object map.

use crate::error::prefix;
use crate::json::{
    as_array, as_object, as_str, optional_number, optional_str, optional_str_list, required_str,
};
use crate::{
    Asset, AssetName, Bbox, Description, Error, ExtensionId, FromJson, Geometry, Gsd, Href,
    Identifier, Link, NamelessAsset, Result, Role, Title, UtcDatetime, Version, Violation,
    extension::Extension,
};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::Arc;

const COMMON_KEYS: [&str; 14] = [
    "title",
    "description",
    "keywords",
    "roles",
    "created",
    "updated",
    "license",
    "providers",
    "platform",
    "instruments",
    "constellation",
    "mission",
    "gsd",
    "bands",
];

const DATETIME_KEYS: [&str; 3] = ["datetime", "start_datetime", "end_datetime"];

/// A provider of data for an item.
#[derive(Debug, Clone, PartialEq)]
pub struct Provider {
    /// The name of the organization or the individual.
    pub name: Identifier,

    /// Additional detail about the provider.
    pub description: Option<Description>,

    /// Roles of the provider.
    pub roles: Option<Vec<Role>>,

    /// Homepage on which the provider describes the dataset.
    pub url: Option<Href>,
}

/// A spectral band.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    /// The name of the band.
    pub name: Identifier,

    /// A description of the band.
    pub description: Option<Description>,
}

/// Common metadata, stored flat on the item and nested under `properties` on
/// the wire.
///
/// All fields are optional and serialize as null when unset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommonMetadata {
    /// A human readable title.
    pub title: Option<Title>,

    /// Detailed multi-line description.
    pub description: Option<Description>,

    /// List of keywords describing the entity.
    pub keywords: Option<Vec<Identifier>>,

    /// The semantic roles of the entity.
    pub roles: Option<Vec<Identifier>>,

    /// Creation date and time of the metadata, in UTC.
    pub created: Option<UtcDatetime>,

    /// Date and time the metadata was updated last, in UTC.
    pub updated: Option<UtcDatetime>,

    /// License of the data as an SPDX identifier or expression.
    pub license: Option<Identifier>,

    /// The providers of the data.
    pub providers: Option<Vec<Provider>>,

    /// The unique name of the platform the instrument is attached to.
    pub platform: Option<Identifier>,

    /// The instruments used to collect the data.
    pub instruments: Option<Vec<Identifier>>,

    /// The constellation the platform belongs to.
    pub constellation: Option<Identifier>,

    /// The mission in which the data was collected.
    pub mission: Option<Identifier>,

    /// Ground sample distance in meters.
    pub gsd: Option<Gsd>,

    /// The spectral bands available in the data.
    pub bands: Option<Vec<Band>>,
}

/// A STAC Item.
///
/// Items are immutable once constructed: validation happens exactly once, at
/// parse or build time, and a constructed item satisfies all of its
/// invariants for its lifetime.
#[derive(Debug, Clone)]
pub struct Item {
    version: Version,
    stac_extensions: Vec<ExtensionId>,
    id: Identifier,
    geometry: Geometry,
    bbox: Bbox,
    links: Vec<Link>,
    assets: Vec<Asset>,
    collection: Option<Identifier>,
    datetime: Option<UtcDatetime>,
    start_datetime: Option<UtcDatetime>,
    end_datetime: Option<UtcDatetime>,
    common: CommonMetadata,
    additional_fields: Map<String, Value>,
    attached: Vec<Arc<dyn Extension>>,
}

impl Provider {
    /// Creates a new provider from its name.
    pub fn new(name: impl Into<String>) -> Result<Provider> {
        let name = Identifier::new(name).map_err(|v| Error::Validation(vec![v.at("name")]))?;
        Ok(Provider {
            name,
            description: None,
            roles: None,
            url: None,
        })
    }

    pub(crate) fn parse(value: &Value) -> std::result::Result<Provider, Vec<Violation>> {
        let object = as_object(value, "provider").map_err(|v| vec![v])?;
        let mut violations = Vec::new();
        let name = required_str(object, "name", |s| Identifier::new(s), &mut violations);
        let description = optional_str(object, "description", |s| Description::new(s), &mut violations);
        let roles = optional_str_list(object, "roles", |s| Role::new(s), &mut violations);
        let url = optional_str(object, "url", |s| Href::new(s), &mut violations);
        match name {
            Some(name) if violations.is_empty() => Ok(Provider {
                name,
                description,
                roles,
                url,
            }),
            _ => Err(violations),
        }
    }

    pub(crate) fn to_value(&self) -> Value {
        serde_json::json!({
            "name": self.name.as_str(),
            "description": self.description.as_ref().map(Description::as_str),
            "roles": self
                .roles
                .as_ref()
                .map(|roles| roles.iter().map(Role::as_str).collect::<Vec<_>>()),
            "url": self.url.as_ref().map(Href::as_str),
        })
    }
}

impl Band {
    /// Creates a new band from its name.
    pub fn new(name: impl Into<String>) -> Result<Band> {
        let name = Identifier::new(name).map_err(|v| Error::Validation(vec![v.at("name")]))?;
        Ok(Band {
            name,
            description: None,
        })
    }

    pub(crate) fn parse(value: &Value) -> std::result::Result<Band, Vec<Violation>> {
        let object = as_object(value, "band").map_err(|v| vec![v])?;
        let mut violations = Vec::new();
        let name = required_str(object, "name", |s| Identifier::new(s), &mut violations);
        let description = optional_str(object, "description", |s| Description::new(s), &mut violations);
        match name {
            Some(name) if violations.is_empty() => Ok(Band { name, description }),
            _ => Err(violations),
        }
    }

    pub(crate) fn to_value(&self) -> Value {
        serde_json::json!({
            "name": self.name.as_str(),
            "description": self.description.as_ref().map(Description::as_str),
        })
    }
}

impl CommonMetadata {
    fn parse(properties: &Map<String, Value>) -> (CommonMetadata, Vec<Violation>) {
        let mut violations = Vec::new();
        let common = CommonMetadata {
            title: optional_str(properties, "title", |s| Title::new(s), &mut violations),
            description: optional_str(properties, "description", |s| Description::new(s), &mut violations),
            keywords: optional_str_list(properties, "keywords", |s| Identifier::new(s), &mut violations),
            roles: optional_str_list(properties, "roles", |s| Identifier::new(s), &mut violations),
            created: optional_str(properties, "created", UtcDatetime::parse, &mut violations),
            updated: optional_str(properties, "updated", UtcDatetime::parse, &mut violations),
            license: optional_str(properties, "license", |s| Identifier::new(s), &mut violations),
            providers: parse_object_list(properties, "providers", Provider::parse, &mut violations),
            platform: optional_str(properties, "platform", |s| Identifier::new(s), &mut violations),
            instruments: optional_str_list(
                properties,
                "instruments",
                |s| Identifier::new(s),
                &mut violations,
            ),
            constellation: optional_str(properties, "constellation", |s| Identifier::new(s), &mut violations),
            mission: optional_str(properties, "mission", |s| Identifier::new(s), &mut violations),
            gsd: optional_number(properties, "gsd", |s| Gsd::new(s), &mut violations),
            bands: parse_object_list(properties, "bands", Band::parse, &mut violations),
        };
        (common, violations)
    }

    fn write_into(&self, properties: &mut Map<String, Value>) {
        let _ = properties.insert(
            "title".to_string(),
            serde_json::json!(self.title.as_ref().map(Title::as_str)),
        );
        let _ = properties.insert(
            "description".to_string(),
            serde_json::json!(self.description.as_ref().map(Description::as_str)),
        );
        let _ = properties.insert("keywords".to_string(), identifier_list(&self.keywords));
        let _ = properties.insert("roles".to_string(), identifier_list(&self.roles));
        let _ = properties.insert("created".to_string(), serde_json::json!(self.created));
        let _ = properties.insert("updated".to_string(), serde_json::json!(self.updated));
        let _ = properties.insert(
            "license".to_string(),
            serde_json::json!(self.license.as_ref().map(Identifier::as_str)),
        );
        let _ = properties.insert(
            "providers".to_string(),
            object_list(&self.providers, Provider::to_value),
        );
        let _ = properties.insert(
            "platform".to_string(),
            serde_json::json!(self.platform.as_ref().map(Identifier::as_str)),
        );
        let _ = properties.insert("instruments".to_string(), identifier_list(&self.instruments));
        let _ = properties.insert(
            "constellation".to_string(),
            serde_json::json!(self.constellation.as_ref().map(Identifier::as_str)),
        );
        let _ = properties.insert(
            "mission".to_string(),
            serde_json::json!(self.mission.as_ref().map(Identifier::as_str)),
        );
        let _ = properties.insert(
            "gsd".to_string(),
            self.gsd
                .map(|gsd| crate::json::number(gsd.get()))
                .unwrap_or(Value::Null),
        );
        let _ = properties.insert("bands".to_string(), object_list(&self.bands, Band::to_value));
    }
}

fn identifier_list(identifiers: &Option<Vec<Identifier>>) -> Value {
    match identifiers {
        Some(identifiers) => Value::Array(
            identifiers
                .iter()
                .map(|identifier| Value::String(identifier.as_str().to_string()))
                .collect(),
        ),
        None => Value::Null,
    }
}

fn object_list<T>(items: &Option<Vec<T>>, to_value: impl Fn(&T) -> Value) -> Value {
    match items {
        Some(items) => Value::Array(items.iter().map(to_value).collect()),
        None => Value::Null,
    }
}

fn parse_object_list<T>(
    properties: &Map<String, Value>,
    key: &str,
    parse: impl Fn(&Value) -> std::result::Result<T, Vec<Violation>>,
    violations: &mut Vec<Violation>,
) -> Option<Vec<T>> {
    let value = match properties.get(key) {
        None | Some(Value::Null) => return None,
        Some(value) => value,
    };
    let array = match as_array(value, key) {
        Ok(array) => array,
        Err(violation) => {
            violations.push(violation.at(key));
            return None;
        }
    };
    let mut items = Vec::with_capacity(array.len());
    let mut ok = true;
    for (i, element) in array.iter().enumerate() {
        match parse(element) {
            Ok(item) => items.push(item),
            Err(errors) => {
                violations.extend(prefix(prefix(errors, &format!("[{i}]")), key));
                ok = false;
            }
        }
    }
    ok.then_some(items)
}

impl Item {
    /// Creates a builder for an item with the given id.
    ///
    /// The builder assembles a wire-shaped document and routes it through the
    /// same validated parse path used for untrusted input, then attaches any
    /// extension instances.
    pub fn builder(id: impl Into<String>) -> ItemBuilder {
        let mut object = Map::new();
        let _ = object.insert("id".to_string(), Value::String(id.into()));
        ItemBuilder {
            object,
            properties: Map::new(),
            links: Vec::new(),
            assets: Vec::new(),
            stac_extensions: Vec::new(),
            attached: Vec::new(),
        }
    }

    /// Returns the STAC version this item implements.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns the declared extension identifiers.
    pub fn stac_extensions(&self) -> &[ExtensionId] {
        &self.stac_extensions
    }

    /// Returns the item id.
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the geometry.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Returns the bounding box.
    pub fn bbox(&self) -> &Bbox {
        &self.bbox
    }

    /// Returns the links.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Returns the assets as the canonical internal list of named assets.
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Returns the collection id this item references.
    pub fn collection(&self) -> Option<&str> {
        self.collection.as_ref().map(Identifier::as_str)
    }

    /// Returns the searchable date and time of the assets.
    pub fn datetime(&self) -> Option<UtcDatetime> {
        self.datetime
    }

    /// Returns the start of the acquisition interval.
    pub fn start_datetime(&self) -> Option<UtcDatetime> {
        self.start_datetime
    }

    /// Returns the end of the acquisition interval.
    pub fn end_datetime(&self) -> Option<UtcDatetime> {
        self.end_datetime
    }

    /// Returns the common metadata.
    pub fn common_metadata(&self) -> &CommonMetadata {
        &self.common
    }

    /// Returns the preserved properties this crate does not model, e.g.
    /// namespaced extension fields of documents it did not construct.
    pub fn additional_fields(&self) -> &Map<String, Value> {
        &self.additional_fields
    }

    /// Returns the attached extension instances.
    pub fn extensions(&self) -> &[Arc<dyn Extension>] {
        &self.attached
    }

    /// Converts this item to its wire JSON value.
    ///
    /// Flattened fields re-nest under `properties`, the asset list re-keys
    /// into a name-to-object map, and `stac_extensions` is the declared list
    /// when present, otherwise derived from the attached instances.
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        let _ = object.insert("type".to_string(), Value::String("Feature".to_string()));
        let _ = object.insert(
            "stac_version".to_string(),
            Value::String(self.version.as_str().to_string()),
        );
        let stac_extensions: Vec<Value> = if self.stac_extensions.is_empty() {
            self.attached
                .iter()
                .map(|extension| Value::String(extension.identifier().to_string()))
                .collect()
        } else {
            self.stac_extensions
                .iter()
                .map(|id| Value::String(id.as_str().to_string()))
                .collect()
        };
        let _ = object.insert("stac_extensions".to_string(), Value::Array(stac_extensions));
        let _ = object.insert("id".to_string(), Value::String(self.id.as_str().to_string()));
        let _ = object.insert("geometry".to_string(), self.geometry.to_value());
        let _ = object.insert("bbox".to_string(), self.bbox.to_value());
        let _ = object.insert("properties".to_string(), self.properties_value());
        let _ = object.insert(
            "links".to_string(),
            Value::Array(self.links.iter().map(Link::to_value).collect()),
        );
        let mut assets = Map::new();
        for asset in &self.assets {
            let (name, nameless) = asset.clone().into_parts();
            let _ = assets.insert(name.as_str().to_string(), nameless.to_value());
        }
        let _ = object.insert("assets".to_string(), Value::Object(assets));
        let _ = object.insert(
            "collection".to_string(),
            match &self.collection {
                Some(collection) => Value::String(collection.as_str().to_string()),
                None => Value::Null,
            },
        );
        Value::Object(object)
    }

    fn properties_value(&self) -> Value {
        let mut properties = Map::new();
        let _ = properties.insert("datetime".to_string(), serde_json::json!(self.datetime));
        let _ = properties.insert(
            "start_datetime".to_string(),
            serde_json::json!(self.start_datetime),
        );
        let _ = properties.insert(
            "end_datetime".to_string(),
            serde_json::json!(self.end_datetime),
        );
        self.common.write_into(&mut properties);
        for (key, value) in &self.additional_fields {
            let _ = properties.insert(key.clone(), value.clone());
        }
        for extension in &self.attached {
            for (key, value) in extension.fields() {
                let _ = properties.insert(key, value);
            }
        }
        Value::Object(properties)
    }
}

impl FromJson for Item {
    fn from_value(value: Value) -> Result<Item> {
        let mut object = match value {
            Value::Object(object) => object,
            other => return Err(Error::NotAnObject(other)),
        };

        // Stage 1: hoist the datetimes out of `properties`.
        let mut hoisted = Vec::new();
        if let Some(Value::Object(properties)) = object.get_mut("properties") {
            for key in DATETIME_KEYS {
                if let Some(datetime) = properties.shift_remove(key) {
                    hoisted.push((key.to_string(), datetime));
                }
            }
        }
        for (key, datetime) in hoisted {
            let _ = object.insert(key, datetime);
        }

        // Stage 2: field-level parse, collecting every violation.
        let mut violations = Vec::new();
        match object.get("type") {
            None | Some(Value::Null) => {
                violations.push(Violation::structural("missing required field").at("type"));
            }
            Some(value) => match as_str(value, "type") {
                Ok("Feature") => {}
                Ok(other) => violations.push(
                    Violation::structural(format!("type must be \"Feature\", got {other:?}"))
                        .with_value(other)
                        .at("type"),
                ),
                Err(violation) => violations.push(violation.at("type")),
            },
        }
        let version = required_str(
            &object,
            "stac_version",
            |s| s.parse::<Version>(),
            &mut violations,
        );
        let stac_extensions =
            optional_str_list(&object, "stac_extensions", |s| ExtensionId::new(s), &mut violations)
                .unwrap_or_default();
        let id = required_str(&object, "id", |s| Identifier::new(s), &mut violations);
        let geometry = match object.get("geometry") {
            None | Some(Value::Null) => {
                violations.push(Violation::structural("missing required field").at("geometry"));
                None
            }
            Some(value) => Geometry::parse(value)
                .map_err(|errors| violations.extend(prefix(errors, "geometry")))
                .ok(),
        };
        let bbox = match object.get("bbox") {
            None | Some(Value::Null) => {
                violations.push(Violation::structural("missing required field").at("bbox"));
                None
            }
            Some(value) => Bbox::parse(value)
                .map_err(|errors| violations.extend(prefix(errors, "bbox")))
                .ok(),
        };
        let links = parse_links(&object, &mut violations);

        // Stage 3: shape dispatch for assets, map keys becoming names.
        let assets = parse_assets(&object, &mut violations);

        let collection = match object.get("collection") {
            None => {
                violations.push(Violation::structural("missing required field").at("collection"));
                None
            }
            Some(Value::Null) => None,
            Some(value) => match as_str(value, "collection").and_then(Identifier::new) {
                Ok(collection) => Some(collection),
                Err(violation) => {
                    violations.push(violation.at("collection"));
                    None
                }
            },
        };
        let datetime = match object.get("datetime") {
            None => {
                violations
                    .push(Violation::structural("missing required field").at("properties.datetime"));
                None
            }
            Some(Value::Null) => None,
            Some(value) => match as_str(value, "datetime").and_then(UtcDatetime::parse) {
                Ok(datetime) => Some(datetime),
                Err(violation) => {
                    violations.push(violation.at("properties.datetime"));
                    None
                }
            },
        };
        let start_datetime = optional_datetime(&object, "start_datetime", &mut violations);
        let end_datetime = optional_datetime(&object, "end_datetime", &mut violations);
        let (common, additional_fields) = match object.get("properties") {
            None | Some(Value::Null) => {
                violations.push(Violation::structural("missing required field").at("properties"));
                (CommonMetadata::default(), Map::new())
            }
            Some(value) => match as_object(value, "properties") {
                Err(violation) => {
                    violations.push(violation.at("properties"));
                    (CommonMetadata::default(), Map::new())
                }
                Ok(properties) => {
                    let (common, errors) = CommonMetadata::parse(properties);
                    violations.extend(prefix(errors, "properties"));
                    let additional_fields = properties
                        .iter()
                        .filter(|(key, _)| {
                            !COMMON_KEYS.contains(&key.as_str())
                                && !DATETIME_KEYS.contains(&key.as_str())
                        })
                        .map(|(key, value)| (key.clone(), value.clone()))
                        .collect();
                    (common, additional_fields)
                }
            },
        };

        // Stage 4: cross-field validation.
        let mut seen = HashSet::new();
        for extension_id in &stac_extensions {
            if !seen.insert(extension_id.as_str()) {
                violations.push(
                    Violation::cross_field("stac_extensions must contain unique items")
                        .at("stac_extensions"),
                );
                break;
            }
        }

        match (version, id, geometry, bbox, links, assets) {
            (Some(version), Some(id), Some(geometry), Some(bbox), Some(links), Some(assets))
                if violations.is_empty() =>
            {
                tracing::trace!(id = id.as_str(), "validated item");
                Ok(Item {
                    version,
                    stac_extensions,
                    id,
                    geometry,
                    bbox,
                    links,
                    assets,
                    collection,
                    datetime,
                    start_datetime,
                    end_datetime,
                    common,
                    additional_fields,
                    attached: Vec::new(),
                })
            }
            _ => {
                tracing::debug!(count = violations.len(), "item failed validation");
                Err(Error::Validation(violations))
            }
        }
    }
}

fn optional_datetime(
    object: &Map<String, Value>,
    key: &str,
    violations: &mut Vec<Violation>,
) -> Option<UtcDatetime> {
    match object.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => match as_str(value, key).and_then(UtcDatetime::parse) {
            Ok(datetime) => Some(datetime),
            Err(violation) => {
                violations.push(violation.at(format!("properties.{key}")));
                None
            }
        },
    }
}

fn parse_links(object: &Map<String, Value>, violations: &mut Vec<Violation>) -> Option<Vec<Link>> {
    let value = match object.get("links") {
        None | Some(Value::Null) => {
            violations.push(Violation::structural("missing required field").at("links"));
            return None;
        }
        Some(value) => value,
    };
    let array = match as_array(value, "links") {
        Ok(array) => array,
        Err(violation) => {
            violations.push(violation.at("links"));
            return None;
        }
    };
    let mut links = Vec::with_capacity(array.len());
    let mut ok = true;
    for (i, element) in array.iter().enumerate() {
        match Link::parse(element) {
            Ok(link) => links.push(link),
            Err(errors) => {
                violations.extend(prefix(prefix(errors, &format!("[{i}]")), "links"));
                ok = false;
            }
        }
    }
    ok.then_some(links)
}

fn parse_assets(object: &Map<String, Value>, violations: &mut Vec<Violation>) -> Option<Vec<Asset>> {
    match object.get("assets") {
        None | Some(Value::Null) => {
            violations.push(Violation::structural("missing required field").at("assets"));
            None
        }
        Some(Value::Object(map)) => {
            let mut assets = Vec::with_capacity(map.len());
            let mut ok = true;
            for (name, value) in map {
                let segment = format!("assets.{name}");
                let asset_name = AssetName::new(name.as_str())
                    .map_err(|v| violations.push(v.at(segment.as_str())))
                    .ok();
                let nameless = NamelessAsset::parse(value)
                    .map_err(|errors| violations.extend(prefix(errors, &segment)))
                    .ok();
                match (asset_name, nameless) {
                    (Some(name), Some(asset)) => assets.push(Asset::from_parts(name, asset)),
                    _ => ok = false,
                }
            }
            ok.then_some(assets)
        }
        Some(Value::Array(array)) => {
            let mut assets = Vec::with_capacity(array.len());
            let mut ok = true;
            for (i, element) in array.iter().enumerate() {
                match Asset::parse(element) {
                    Ok(asset) => assets.push(asset),
                    Err(errors) => {
                        violations.extend(prefix(prefix(errors, &format!("[{i}]")), "assets"));
                        ok = false;
                    }
                }
            }
            ok.then_some(assets)
        }
        Some(_) => {
            violations.push(
                Violation::structural("assets must be a JSON object or a JSON array").at("assets"),
            );
            None
        }
    }
}

impl Serialize for Item {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// Builds an [Item] through the validated parse path.
#[derive(Debug)]
pub struct ItemBuilder {
    object: Map<String, Value>,
    properties: Map<String, Value>,
    links: Vec<Value>,
    assets: Vec<Value>,
    stac_extensions: Vec<String>,
    attached: Vec<Arc<dyn Extension>>,
}

impl ItemBuilder {
    /// Sets the geometry.
    pub fn geometry(mut self, geometry: impl Into<Geometry>) -> ItemBuilder {
        let _ = self
            .object
            .insert("geometry".to_string(), geometry.into().to_value());
        self
    }

    /// Sets the bounding box.
    pub fn bbox(mut self, bbox: impl Into<Bbox>) -> ItemBuilder {
        let _ = self.object.insert("bbox".to_string(), bbox.into().to_value());
        self
    }

    /// Sets the collection id this item references.
    pub fn collection(mut self, collection: impl Into<String>) -> ItemBuilder {
        let _ = self
            .object
            .insert("collection".to_string(), Value::String(collection.into()));
        self
    }

    /// Sets the searchable date and time.
    pub fn datetime(mut self, datetime: impl ToString) -> ItemBuilder {
        let _ = self
            .properties
            .insert("datetime".to_string(), Value::String(datetime.to_string()));
        self
    }

    /// Sets the start of the acquisition interval.
    pub fn start_datetime(mut self, datetime: impl ToString) -> ItemBuilder {
        let _ = self.properties.insert(
            "start_datetime".to_string(),
            Value::String(datetime.to_string()),
        );
        self
    }

    /// Sets the end of the acquisition interval.
    pub fn end_datetime(mut self, datetime: impl ToString) -> ItemBuilder {
        let _ = self.properties.insert(
            "end_datetime".to_string(),
            Value::String(datetime.to_string()),
        );
        self
    }

    /// Adds a link.
    pub fn link(mut self, link: Link) -> ItemBuilder {
        self.links.push(link.to_value());
        self
    }

    /// Adds an asset.
    pub fn asset(mut self, asset: Asset) -> ItemBuilder {
        let (name, nameless) = asset.into_parts();
        let mut value = nameless.to_value();
        if let Value::Object(object) = &mut value {
            let _ = object.insert(
                "name".to_string(),
                Value::String(name.as_str().to_string()),
            );
        }
        self.assets.push(value);
        self
    }

    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> ItemBuilder {
        let _ = self
            .properties
            .insert("title".to_string(), Value::String(title.into()));
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> ItemBuilder {
        let _ = self
            .properties
            .insert("description".to_string(), Value::String(description.into()));
        self
    }

    /// Adds a keyword.
    pub fn keyword(mut self, keyword: impl Into<String>) -> ItemBuilder {
        push_to_list(&mut self.properties, "keywords", Value::String(keyword.into()));
        self
    }

    /// Sets the license.
    pub fn license(mut self, license: impl Into<String>) -> ItemBuilder {
        let _ = self
            .properties
            .insert("license".to_string(), Value::String(license.into()));
        self
    }

    /// Sets the platform name.
    pub fn platform(mut self, platform: impl Into<String>) -> ItemBuilder {
        let _ = self
            .properties
            .insert("platform".to_string(), Value::String(platform.into()));
        self
    }

    /// Adds an instrument name.
    pub fn instrument(mut self, instrument: impl Into<String>) -> ItemBuilder {
        push_to_list(
            &mut self.properties,
            "instruments",
            Value::String(instrument.into()),
        );
        self
    }

    /// Sets the constellation name.
    pub fn constellation(mut self, constellation: impl Into<String>) -> ItemBuilder {
        let _ = self.properties.insert(
            "constellation".to_string(),
            Value::String(constellation.into()),
        );
        self
    }

    /// Sets the mission name.
    pub fn mission(mut self, mission: impl Into<String>) -> ItemBuilder {
        let _ = self
            .properties
            .insert("mission".to_string(), Value::String(mission.into()));
        self
    }

    /// Sets the ground sample distance in meters.
    pub fn gsd(mut self, gsd: f64) -> ItemBuilder {
        let _ = self
            .properties
            .insert("gsd".to_string(), crate::json::number(gsd));
        self
    }

    /// Sets the metadata creation timestamp.
    pub fn created(mut self, datetime: impl ToString) -> ItemBuilder {
        let _ = self
            .properties
            .insert("created".to_string(), Value::String(datetime.to_string()));
        self
    }

    /// Sets the metadata update timestamp.
    pub fn updated(mut self, datetime: impl ToString) -> ItemBuilder {
        let _ = self
            .properties
            .insert("updated".to_string(), Value::String(datetime.to_string()));
        self
    }

    /// Adds a provider.
    pub fn provider(mut self, provider: Provider) -> ItemBuilder {
        push_to_list(&mut self.properties, "providers", provider.to_value());
        self
    }

    /// Adds a spectral band.
    pub fn band(mut self, band: Band) -> ItemBuilder {
        push_to_list(&mut self.properties, "bands", band.to_value());
        self
    }

    /// Sets an arbitrary additional property.
    pub fn field(mut self, key: impl Into<String>, value: Value) -> ItemBuilder {
        let _ = self.properties.insert(key.into(), value);
        self
    }

    /// Declares a literal extension identifier without attaching an instance.
    pub fn stac_extension(mut self, id: impl Into<String>) -> ItemBuilder {
        self.stac_extensions.push(id.into());
        self
    }

    /// Attaches an extension instance.
    ///
    /// The instance's identifier populates `stac_extensions` (unless literal
    /// identifiers were declared) and its fields merge into `properties` at
    /// serialization time.
    pub fn extension(mut self, extension: impl Extension + 'static) -> ItemBuilder {
        self.attached.push(Arc::new(extension));
        self
    }

    /// Validates and builds the item.
    ///
    /// A field-name collision between two attached extensions, or between an
    /// extension field and a modeled or preserved property, is a cross-field
    /// violation rather than a silent overwrite.
    pub fn build(self) -> Result<Item> {
        let ItemBuilder {
            mut object,
            properties,
            links,
            assets,
            stac_extensions,
            attached,
        } = self;
        let _ = object.insert("type".to_string(), Value::String("Feature".to_string()));
        let _ = object.insert(
            "stac_version".to_string(),
            Value::String(Version::default().as_str().to_string()),
        );
        let _ = object.insert(
            "stac_extensions".to_string(),
            Value::Array(stac_extensions.into_iter().map(Value::String).collect()),
        );
        let _ = object.entry("collection").or_insert(Value::Null);
        let _ = object.insert("properties".to_string(), Value::Object(properties));
        let _ = object.insert("links".to_string(), Value::Array(links));
        let _ = object.insert("assets".to_string(), Value::Array(assets));
        let mut item = Item::from_value(Value::Object(object))?;

        let mut violations = Vec::new();
        let mut seen: HashSet<String> = item.additional_fields.keys().cloned().collect();
        for key in COMMON_KEYS.iter().chain(DATETIME_KEYS.iter()) {
            let _ = seen.insert((*key).to_string());
        }
        for extension in &attached {
            for key in extension.fields().keys() {
                if !seen.insert(key.clone()) {
                    violations.push(
                        Violation::cross_field(format!(
                            "property key {key:?} is contributed more than once"
                        ))
                        .at(format!("properties.{key}")),
                    );
                }
            }
        }
        if item.stac_extensions.is_empty() {
            let mut ids = Vec::with_capacity(attached.len());
            let mut seen_ids = HashSet::new();
            for extension in &attached {
                match ExtensionId::new(extension.identifier()) {
                    Ok(id) => {
                        if !seen_ids.insert(id.as_str().to_string()) {
                            violations.push(
                                Violation::cross_field(
                                    "stac_extensions must contain unique items",
                                )
                                .at("stac_extensions"),
                            );
                        }
                        ids.push(id);
                    }
                    Err(violation) => violations.push(violation.at("stac_extensions")),
                }
            }
            item.stac_extensions = ids;
        }
        if !violations.is_empty() {
            return Err(Error::Validation(violations));
        }
        item.attached = attached;
        Ok(item)
    }
}

fn push_to_list(properties: &mut Map<String, Value>, key: &str, value: Value) {
    let list = properties
        .entry(key)
        .or_insert_with(|| Value::Array(Vec::new()));
    if let Value::Array(list) = list {
        list.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::Item;
    use crate::{Asset, EoExtension, FromJson, HttpMethod, Link, ViewExtension, ViolationKind};
    use serde_json::{Value, json};

    fn minimal() -> Value {
        json!({
            "type": "Feature",
            "stac_version": "1.1.0",
            "stac_extensions": [],
            "id": "minimal-item",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[100.0, 0.0], [101.0, 0.0], [101.0, 1.0], [100.0, 1.0], [100.0, 0.0]]],
            },
            "bbox": [100, 0, 101, 1],
            "properties": {"datetime": "2021-01-01T00:00:00Z"},
            "links": [],
            "assets": {},
            "collection": null,
        })
    }

    #[test]
    fn minimal_document() {
        let item = Item::from_value(minimal()).unwrap();
        assert_eq!(item.id(), "minimal-item");
        assert_eq!(item.collection(), None);
        assert_eq!(item.datetime().unwrap().to_string(), "2021-01-01T00:00:00Z");
        let value = item.to_value();
        assert_eq!(value["properties"]["datetime"], json!("2021-01-01T00:00:00Z"));
        for key in super::COMMON_KEYS {
            assert_eq!(value["properties"][key], Value::Null, "{key}");
        }
        assert_eq!(value["bbox"], json!([100, 0, 101, 1]));
    }

    #[test]
    fn serialization_is_an_idempotent_projection() {
        let once = Item::from_value(minimal()).unwrap().to_value();
        let twice = Item::from_value(once.clone()).unwrap().to_value();
        assert_eq!(once, twice);
    }

    #[test]
    fn duplicate_stac_extensions() {
        let mut value = minimal();
        value["stac_extensions"] = json!(["same", "same"]);
        let error = Item::from_value(value).unwrap_err();
        let violations = error.violations().unwrap();
        assert_eq!(violations[0].kind, ViolationKind::CrossField);
        assert!(
            violations[0]
                .message
                .contains("stac_extensions must contain unique items")
        );
        let mut value = minimal();
        value["stac_extensions"] = json!(["a", "b"]);
        let _ = Item::from_value(value).unwrap();
    }

    #[test]
    fn bbox_arity_dispatch() {
        let mut value = minimal();
        value["bbox"] = json!([47.014448, 72.738194, 0, 48.35946, 72.985776, 100]);
        let item = Item::from_value(value).unwrap();
        assert!(matches!(item.bbox(), crate::Bbox::ThreeDimensional(_)));
        let mut value = minimal();
        value["bbox"] = json!([100, 0, 101, 1, 0]);
        let error = Item::from_value(value).unwrap_err();
        assert_eq!(
            error.violations().unwrap()[0].message,
            "BBox requires exactly 4 or 6 coordinates"
        );
        assert_eq!(error.violations().unwrap()[0].path, "bbox");
    }

    #[test]
    fn assets_map_keys_become_names() {
        let mut value = minimal();
        value["assets"] = json!({
            "thumbnail": {"href": "https://api.example.com/t.jpg", "type": "image/jpeg"},
        });
        let item = Item::from_value(value).unwrap();
        assert_eq!(item.assets().len(), 1);
        assert_eq!(item.assets()[0].name.as_str(), "thumbnail");
        let value = item.to_value();
        assert_eq!(
            value["assets"]["thumbnail"]["href"],
            json!("https://api.example.com/t.jpg")
        );
        assert_eq!(value["assets"]["thumbnail"].get("name"), None);
    }

    #[test]
    fn nested_datetimes_are_hoisted() {
        let mut value = minimal();
        value["properties"] = json!({
            "datetime": "2021-01-01T00:00:00Z",
            "start_datetime": "2020-12-31T00:00:00Z",
            "end_datetime": "2021-01-02T00:00:00Z",
        });
        let item = Item::from_value(value).unwrap();
        assert!(item.start_datetime().is_some());
        assert!(item.end_datetime().is_some());
        assert!(item.additional_fields().is_empty());
    }

    #[test]
    fn null_datetime_is_allowed_but_missing_is_not() {
        let mut value = minimal();
        value["properties"] = json!({"datetime": null});
        let item = Item::from_value(value).unwrap();
        assert_eq!(item.datetime(), None);
        let mut value = minimal();
        value["properties"] = json!({});
        let error = Item::from_value(value).unwrap_err();
        assert_eq!(error.violations().unwrap()[0].path, "properties.datetime");
    }

    #[test]
    fn violations_are_collected_across_fields() {
        let mut value = minimal();
        value["id"] = json!("has space");
        value["bbox"] = json!([100, 0, 101, 1, 0]);
        value["stac_extensions"] = json!(["same", "same"]);
        let error = Item::from_value(value).unwrap_err();
        let paths: Vec<_> = error
            .violations()
            .unwrap()
            .iter()
            .map(|violation| violation.path.as_str())
            .collect();
        assert!(paths.contains(&"id"));
        assert!(paths.contains(&"bbox"));
        assert!(paths.contains(&"stac_extensions"));
    }

    #[test]
    fn namespaced_properties_are_preserved() {
        let mut value = minimal();
        value["properties"] = json!({
            "datetime": "2021-01-01T00:00:00Z",
            "eo:cloud_cover": 12.5,
        });
        let item = Item::from_value(value).unwrap();
        assert_eq!(item.additional_fields()["eo:cloud_cover"], json!(12.5));
        assert_eq!(item.to_value()["properties"]["eo:cloud_cover"], json!(12.5));
    }

    #[test]
    fn typical_build() {
        let geometry = crate::Geometry::from_value(json!({
            "type": "Polygon",
            "coordinates": [[[100.0, 0.0], [101.0, 0.0], [101.0, 1.0], [100.0, 1.0], [100.0, 0.0]]],
        }))
        .unwrap();
        let bbox = crate::Bbox2d::new(100.0, 0.0, 101.0, 1.0).unwrap();
        let item = Item::builder("normal-item-1")
            .geometry(geometry)
            .bbox(bbox)
            .datetime("2021-01-01T00:00:00Z")
            .link(
                Link::builder("https://api.example.com/x.json", "canonical")
                    .media_type("application/json")
                    .title("an item")
                    .method(HttpMethod::Get)
                    .build()
                    .unwrap(),
            )
            .asset(
                Asset::builder("asset1", "https://api.example.com/x.json")
                    .title("an item")
                    .description("an item description")
                    .media_type("application/json")
                    .role("data")
                    .build()
                    .unwrap(),
            )
            .extension(
                EoExtension::builder()
                    .cloud_cover(3.14)
                    .snow_cover(2.7)
                    .build()
                    .unwrap(),
            )
            .extension(
                ViewExtension::builder()
                    .off_nadir(10.5)
                    .incidence_angle(15.3)
                    .azimuth(230.1)
                    .sun_azimuth(120.5)
                    .sun_elevation(65.2)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();

        assert_eq!(
            item.to_value(),
            json!({
                "type": "Feature",
                "stac_version": "1.1.0",
                "stac_extensions": [
                    "https://stac-extensions.github.io/eo/v2.0.0/schema.json",
                    "https://stac-extensions.github.io/view/v1.0.0/schema.json",
                ],
                "id": "normal-item-1",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[100, 0], [101, 0], [101, 1], [100, 1], [100, 0]]],
                },
                "bbox": [100, 0, 101, 1],
                "properties": {
                    "datetime": "2021-01-01T00:00:00Z",
                    "start_datetime": null,
                    "end_datetime": null,
                    "title": null,
                    "description": null,
                    "keywords": null,
                    "roles": null,
                    "created": null,
                    "updated": null,
                    "license": null,
                    "providers": null,
                    "platform": null,
                    "instruments": null,
                    "constellation": null,
                    "mission": null,
                    "gsd": null,
                    "bands": null,
                    "eo:cloud_cover": 3.14,
                    "eo:snow_cover": 2.7,
                    "view:off_nadir": 10.5,
                    "view:incidence_angle": 15.3,
                    "view:azimuth": 230.1,
                    "view:sun_azimuth": 120.5,
                    "view:sun_elevation": 65.2,
                },
                "links": [{
                    "href": "https://api.example.com/x.json",
                    "rel": "canonical",
                    "type": "application/json",
                    "title": "an item",
                    "description": null,
                    "method": "get",
                    "headers": null,
                    "body": null,
                }],
                "assets": {
                    "asset1": {
                        "href": "https://api.example.com/x.json",
                        "title": "an item",
                        "description": "an item description",
                        "type": "application/json",
                        "roles": ["data"],
                    },
                },
                "collection": null,
            })
        );
    }

    #[test]
    fn builder_requires_a_datetime() {
        let geometry = crate::Geometry::from_value(json!({
            "type": "Polygon",
            "coordinates": [[[100.0, 0.0], [101.0, 0.0], [101.0, 1.0], [100.0, 1.0], [100.0, 0.0]]],
        }))
        .unwrap();
        let bbox = crate::Bbox2d::new(100.0, 0.0, 101.0, 1.0).unwrap();
        let error = Item::builder("an-id")
            .geometry(geometry)
            .bbox(bbox)
            .build()
            .unwrap_err();
        assert_eq!(error.violations().unwrap()[0].path, "properties.datetime");
    }

    #[test]
    fn colliding_extension_fields_are_rejected() {
        let geometry = crate::Geometry::from_value(json!({
            "type": "Polygon",
            "coordinates": [[[100.0, 0.0], [101.0, 0.0], [101.0, 1.0], [100.0, 1.0], [100.0, 0.0]]],
        }))
        .unwrap();
        let bbox = crate::Bbox2d::new(100.0, 0.0, 101.0, 1.0).unwrap();
        let error = Item::builder("an-id")
            .geometry(geometry)
            .bbox(bbox)
            .datetime("2021-01-01T00:00:00Z")
            .extension(EoExtension::builder().cloud_cover(1.0).build().unwrap())
            .extension(EoExtension::builder().cloud_cover(2.0).build().unwrap())
            .build()
            .unwrap_err();
        let violations = error.violations().unwrap();
        assert_eq!(violations[0].kind, ViolationKind::CrossField);
        assert_eq!(violations[0].path, "properties.eo:cloud_cover");
    }

    #[test]
    fn declared_identifiers_win_over_attached_instances() {
        let geometry = crate::Geometry::from_value(json!({
            "type": "Polygon",
            "coordinates": [[[100.0, 0.0], [101.0, 0.0], [101.0, 1.0], [100.0, 1.0], [100.0, 0.0]]],
        }))
        .unwrap();
        let bbox = crate::Bbox2d::new(100.0, 0.0, 101.0, 1.0).unwrap();
        let item = Item::builder("an-id")
            .geometry(geometry)
            .bbox(bbox)
            .datetime("2021-01-01T00:00:00Z")
            .stac_extension("https://example.com/custom/v1.0.0/schema.json")
            .extension(EoExtension::builder().cloud_cover(1.0).build().unwrap())
            .build()
            .unwrap();
        assert_eq!(
            item.to_value()["stac_extensions"],
            json!(["https://example.com/custom/v1.0.0/schema.json"])
        );
    }
}
