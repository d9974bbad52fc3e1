//! A machine-readable description of the accepted wire shape.
//!
//! The schema describes the shape of the document: required keys, arities,
//! patterns, and numeric ranges. The geometric ring rules (closure,
//! simplicity, winding, antimeridian) are enforced by the parser and are not
//! expressible here.

use serde_json::{Value, json};

/// Returns the JSON Schema document for the [Item](crate::Item) wire format.
///
/// # Examples
///
/// ```
/// let schema = stac_factory::json_schema();
/// assert_eq!(schema["title"], "Item");
/// ```
pub fn json_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "https://stac-factory.github.io/schemas/item.json",
        "title": "Item",
        "description": "A STAC Item: a GeoJSON Feature augmented with STAC fields",
        "type": "object",
        "required": [
            "type",
            "stac_version",
            "id",
            "geometry",
            "bbox",
            "properties",
            "links",
            "assets",
            "collection",
        ],
        "properties": {
            "type": {"const": "Feature"},
            "stac_version": {"enum": ["1.0.0", "1.1.0"]},
            "stac_extensions": {
                "type": "array",
                "uniqueItems": true,
                "items": {"$ref": "#/$defs/extensionId"},
            },
            "id": {"$ref": "#/$defs/identifier"},
            "geometry": {
                "oneOf": [
                    {"$ref": "#/$defs/polygon"},
                    {"$ref": "#/$defs/multiPolygon"},
                ],
            },
            "bbox": {"$ref": "#/$defs/bbox"},
            "properties": {"$ref": "#/$defs/properties"},
            "links": {"type": "array", "items": {"$ref": "#/$defs/link"}},
            "assets": {
                "type": "object",
                "propertyNames": {"pattern": "^[-_.a-zA-Z0-9]{1,32}$"},
                "additionalProperties": {"$ref": "#/$defs/asset"},
            },
            "collection": {
                "oneOf": [{"$ref": "#/$defs/identifier"}, {"type": "null"}],
            },
        },
        "$defs": {
            "identifier": {
                "type": "string",
                "minLength": 1,
                "maxLength": 100,
                "pattern": "^[-_.a-zA-Z0-9]+$",
            },
            "extensionId": {
                "type": "string",
                "minLength": 1,
                "maxLength": 100,
                "pattern": "^[-_.:/a-zA-Z0-9]+$",
            },
            "title": {"type": "string", "minLength": 1, "maxLength": 100},
            "description": {"type": "string", "minLength": 1, "maxLength": 10000},
            "mediaType": {
                "type": "string",
                "pattern": "^[a-zA-Z0-9][-a-zA-Z0-9.+]*/[a-zA-Z0-9][-a-zA-Z0-9.+]*(;.*)?$",
            },
            "role": {"type": "string", "pattern": "^[-a-zA-Z0-9]+$"},
            "datetime": {"type": "string", "format": "date-time"},
            "longitude": {"type": "number", "minimum": -180, "maximum": 180},
            "latitude": {"type": "number", "minimum": -90, "maximum": 90},
            "elevation": {"type": "number", "minimum": -10000000, "maximum": 10000000},
            "position": {
                "type": "array",
                "minItems": 2,
                "maxItems": 3,
                "prefixItems": [
                    {"$ref": "#/$defs/longitude"},
                    {"$ref": "#/$defs/latitude"},
                    {"$ref": "#/$defs/elevation"},
                ],
            },
            "linearRing": {
                "type": "array",
                "minItems": 4,
                "maxItems": 512,
                "items": {"$ref": "#/$defs/position"},
            },
            "polygonCoordinates": {
                "type": "array",
                "minItems": 1,
                "maxItems": 1,
                "items": {"$ref": "#/$defs/linearRing"},
            },
            "polygon": {
                "type": "object",
                "required": ["type", "coordinates"],
                "properties": {
                    "type": {"const": "Polygon"},
                    "coordinates": {"$ref": "#/$defs/polygonCoordinates"},
                },
            },
            "multiPolygon": {
                "type": "object",
                "required": ["type", "coordinates"],
                "properties": {
                    "type": {"const": "MultiPolygon"},
                    "coordinates": {
                        "type": "array",
                        "minItems": 1,
                        "maxItems": 2,
                        "items": {"$ref": "#/$defs/polygonCoordinates"},
                    },
                },
            },
            "bbox": {
                "oneOf": [
                    {
                        "type": "array",
                        "minItems": 4,
                        "maxItems": 4,
                        "items": {"type": "number"},
                    },
                    {
                        "type": "array",
                        "minItems": 6,
                        "maxItems": 6,
                        "items": {"type": "number"},
                    },
                ],
            },
            "link": {
                "type": "object",
                "required": ["href", "rel"],
                "properties": {
                    "href": {"type": "string", "minLength": 1},
                    "rel": {"type": "string", "minLength": 1, "maxLength": 256},
                    "type": {"oneOf": [{"$ref": "#/$defs/mediaType"}, {"type": "null"}]},
                    "title": {"oneOf": [{"$ref": "#/$defs/title"}, {"type": "null"}]},
                    "description": {
                        "oneOf": [{"$ref": "#/$defs/description"}, {"type": "null"}],
                    },
                    "method": {"oneOf": [{"type": "string"}, {"type": "null"}]},
                    "headers": {"oneOf": [{"type": "object"}, {"type": "null"}]},
                    "body": {
                        "oneOf": [
                            {"type": "string", "minLength": 1, "maxLength": 10000},
                            {"type": "object"},
                            {"type": "null"},
                        ],
                    },
                },
            },
            "asset": {
                "type": "object",
                "required": ["href"],
                "properties": {
                    "href": {"type": "string", "minLength": 1},
                    "title": {"oneOf": [{"$ref": "#/$defs/title"}, {"type": "null"}]},
                    "description": {
                        "oneOf": [{"$ref": "#/$defs/description"}, {"type": "null"}],
                    },
                    "type": {"oneOf": [{"$ref": "#/$defs/mediaType"}, {"type": "null"}]},
                    "roles": {
                        "oneOf": [
                            {"type": "array", "items": {"$ref": "#/$defs/role"}},
                            {"type": "null"},
                        ],
                    },
                },
            },
            "provider": {
                "type": "object",
                "required": ["name"],
                "properties": {
                    "name": {"$ref": "#/$defs/identifier"},
                    "description": {
                        "oneOf": [{"$ref": "#/$defs/description"}, {"type": "null"}],
                    },
                    "roles": {
                        "oneOf": [
                            {"type": "array", "items": {"$ref": "#/$defs/role"}},
                            {"type": "null"},
                        ],
                    },
                    "url": {"oneOf": [{"type": "string", "minLength": 1}, {"type": "null"}]},
                },
            },
            "band": {
                "type": "object",
                "required": ["name"],
                "properties": {
                    "name": {"$ref": "#/$defs/identifier"},
                    "description": {
                        "oneOf": [{"$ref": "#/$defs/description"}, {"type": "null"}],
                    },
                },
            },
            "properties": {
                "type": "object",
                "required": ["datetime"],
                "additionalProperties": true,
                "properties": {
                    "datetime": {"oneOf": [{"$ref": "#/$defs/datetime"}, {"type": "null"}]},
                    "start_datetime": {
                        "oneOf": [{"$ref": "#/$defs/datetime"}, {"type": "null"}],
                    },
                    "end_datetime": {
                        "oneOf": [{"$ref": "#/$defs/datetime"}, {"type": "null"}],
                    },
                    "title": {"oneOf": [{"$ref": "#/$defs/title"}, {"type": "null"}]},
                    "description": {
                        "oneOf": [{"$ref": "#/$defs/description"}, {"type": "null"}],
                    },
                    "keywords": {
                        "oneOf": [
                            {"type": "array", "items": {"$ref": "#/$defs/identifier"}},
                            {"type": "null"},
                        ],
                    },
                    "roles": {
                        "oneOf": [
                            {"type": "array", "items": {"$ref": "#/$defs/identifier"}},
                            {"type": "null"},
                        ],
                    },
                    "created": {"oneOf": [{"$ref": "#/$defs/datetime"}, {"type": "null"}]},
                    "updated": {"oneOf": [{"$ref": "#/$defs/datetime"}, {"type": "null"}]},
                    "license": {"oneOf": [{"$ref": "#/$defs/identifier"}, {"type": "null"}]},
                    "providers": {
                        "oneOf": [
                            {"type": "array", "items": {"$ref": "#/$defs/provider"}},
                            {"type": "null"},
                        ],
                    },
                    "platform": {"oneOf": [{"$ref": "#/$defs/identifier"}, {"type": "null"}]},
                    "instruments": {
                        "oneOf": [
                            {"type": "array", "items": {"$ref": "#/$defs/identifier"}},
                            {"type": "null"},
                        ],
                    },
                    "constellation": {
                        "oneOf": [{"$ref": "#/$defs/identifier"}, {"type": "null"}],
                    },
                    "mission": {"oneOf": [{"$ref": "#/$defs/identifier"}, {"type": "null"}]},
                    "gsd": {
                        "oneOf": [{"type": "number", "exclusiveMinimum": 0}, {"type": "null"}],
                    },
                    "bands": {
                        "oneOf": [
                            {"type": "array", "items": {"$ref": "#/$defs/band"}},
                            {"type": "null"},
                        ],
                    },
                },
            },
        },
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    #[test]
    fn compiles() {
        let _ = jsonschema::validator_for(&super::json_schema()).unwrap();
    }

    #[test]
    fn accepts_a_minimal_item() {
        let validator = jsonschema::validator_for(&super::json_schema()).unwrap();
        let item = json!({
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
        });
        assert!(validator.is_valid(&item));
    }

    #[test]
    fn rejects_a_five_number_bbox() {
        let validator = jsonschema::validator_for(&super::json_schema()).unwrap();
        let item = json!({
            "type": "Feature",
            "stac_version": "1.1.0",
            "id": "minimal-item",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[100.0, 0.0], [101.0, 0.0], [101.0, 1.0], [100.0, 1.0], [100.0, 0.0]]],
            },
            "bbox": [100, 0, 101, 1, 0],
            "properties": {"datetime": "2021-01-01T00:00:00Z"},
            "links": [],
            "assets": {},
            "collection": null,
        });
        assert!(!validator.is_valid(&item));
    }
}
