//! Well-known vocabularies.
//!
//! Static lookup tables for the common choices of media type, link relation,
//! and asset role. The constraint types accept anything that satisfies their
//! patterns; nothing restricts callers to these values.

/// Well-known media types for assets and links.
pub mod media_type {
    /// Cloud optimized GeoTIFF.
    pub const COG: &str = "image/tiff; application=geotiff; profile=cloud-optimized";

    /// GeoTIFF with standardized georeferencing metadata.
    pub const GEOTIFF: &str = "image/tiff; application=geotiff";

    /// FlatGeobuf.
    pub const FLATGEOBUF: &str = "application/vnd.flatgeobuf";

    /// GeoJSON.
    pub const GEOJSON: &str = "application/geo+json";

    /// OGC GeoPackage.
    pub const GEOPACKAGE: &str = "application/geopackage+sqlite3";

    /// Hierarchical Data Format version 4.
    pub const HDF: &str = "application/x-hdf";

    /// Hierarchical Data Format version 5.
    pub const HDF5: &str = "application/x-hdf5";

    /// HTML.
    pub const HTML: &str = "text/html";

    /// JPEG.
    pub const JPEG: &str = "image/jpeg";

    /// JPEG 2000.
    pub const JPEG2000: &str = "image/jp2";

    /// JSON.
    pub const JSON: &str = "application/json";

    /// PNG.
    pub const PNG: &str = "image/png";

    /// Plain text.
    pub const TEXT: &str = "text/plain";

    /// TIFF.
    pub const TIFF: &str = "image/tiff";

    /// OGC KML.
    pub const KML: &str = "application/vnd.google-earth.kml+xml";

    /// XML.
    pub const XML: &str = "application/xml";

    /// PDF.
    pub const PDF: &str = "application/pdf";

    /// NetCDF.
    pub const NETCDF: &str = "application/netcdf";

    /// Cloud optimized point cloud (LASzip COPC).
    pub const COPC: &str = "application/vnd.laszip+copc";

    /// PMTiles.
    pub const PMTILES: &str = "application/vnd.pmtiles";

    /// Apache Parquet.
    pub const PARQUET: &str = "application/vnd.apache.parquet";

    /// Zarr.
    pub const ZARR: &str = "application/vnd.zarr";
}

/// Well-known link relation types.
pub mod rel {
    /// The link's target is the entity itself.
    pub const SELF: &str = "self";

    /// The source this entity was derived from.
    pub const DERIVED_FROM: &str = "derived_from";

    /// The root catalog or collection.
    pub const ROOT: &str = "root";

    /// The parent catalog or collection.
    pub const PARENT: &str = "parent";

    /// A child catalog or collection.
    pub const CHILD: &str = "child";

    /// An item.
    pub const ITEM: &str = "item";

    /// An alternate representation.
    pub const ALTERNATE: &str = "alternate";

    /// The preferred representation.
    pub const CANONICAL: &str = "canonical";

    /// A related resource.
    pub const VIA: &str = "via";

    /// The previous page of results.
    pub const PREV: &str = "prev";

    /// The next page of results.
    pub const NEXT: &str = "next";

    /// A pre-rendered preview.
    pub const PREVIEW: &str = "preview";

    /// The collection the entity belongs to.
    pub const COLLECTION: &str = "collection";
}

/// Well-known asset roles.
pub mod role {
    /// The primary data.
    pub const DATA: &str = "data";

    /// Additional metadata.
    pub const METADATA: &str = "metadata";

    /// A small preview image.
    pub const THUMBNAIL: &str = "thumbnail";

    /// A medium-sized overview.
    pub const OVERVIEW: &str = "overview";

    /// A full-resolution visual rendering.
    pub const VISUAL: &str = "visual";

    /// A date annotation layer.
    pub const DATE: &str = "date";

    /// A graphic rendering.
    pub const GRAPHIC: &str = "graphic";

    /// A data mask.
    pub const DATA_MASK: &str = "data-mask";

    /// A snow and ice mask.
    pub const SNOW_ICE: &str = "snow-ice";

    /// A land and water mask.
    pub const LAND_WATER: &str = "land-water";

    /// A water mask.
    pub const WATER_MASK: &str = "water-mask";

    /// ISO 19115 metadata.
    pub const ISO_19115: &str = "iso-19115";

    /// Reflectance values (electro-optical).
    pub const REFLECTANCE: &str = "reflectance";

    /// Temperature values (electro-optical).
    pub const TEMPERATURE: &str = "temperature";

    /// Saturation mask (electro-optical).
    pub const SATURATION: &str = "saturation";

    /// Cloud mask (electro-optical).
    pub const CLOUD: &str = "cloud";

    /// Cloud shadow mask (electro-optical).
    pub const CLOUD_SHADOW: &str = "cloud-shadow";

    /// Incidence angle layer (viewing geometry).
    pub const INCIDENCE_ANGLE: &str = "incidence-angle";

    /// Azimuth angle layer (viewing geometry).
    pub const AZIMUTH: &str = "azimuth";

    /// Sun azimuth angle layer (viewing geometry).
    pub const SUN_AZIMUTH: &str = "sun-azimuth";

    /// Sun elevation angle layer (viewing geometry).
    pub const SUN_ELEVATION: &str = "sun-elevation";

    /// Terrain shadow mask (viewing geometry).
    pub const TERRAIN_SHADOW: &str = "terrain-shadow";

    /// Terrain occlusion mask (viewing geometry).
    pub const TERRAIN_OCCLUSION: &str = "terrain-occlusion";

    /// Terrain illumination layer (viewing geometry).
    pub const TERRAIN_ILLUMINATION: &str = "terrain-illumination";
}

#[cfg(test)]
mod tests {
    use crate::{MediaType, Rel, Role};

    #[test]
    fn media_types_satisfy_the_constraint() {
        for media_type in [
            super::media_type::COG,
            super::media_type::GEOTIFF,
            super::media_type::GEOJSON,
            super::media_type::JSON,
            super::media_type::KML,
            super::media_type::PARQUET,
        ] {
            let _ = MediaType::new(media_type).unwrap();
        }
    }

    #[test]
    fn rels_satisfy_the_constraint() {
        let _ = Rel::new(super::rel::DERIVED_FROM).unwrap();
        let _ = Rel::new(super::rel::SELF).unwrap();
    }

    #[test]
    fn roles_satisfy_the_constraint() {
        let _ = Role::new(super::role::SNOW_ICE).unwrap();
        let _ = Role::new(super::role::ISO_19115).unwrap();
        let _ = Role::new(super::role::DATA).unwrap();
    }
}
