//! Constrained primitive types.
//!
//! Every scalar wraps a float or a string behind a predicate and can only be
//! constructed through a validated entry point, so a value of one of these
//! types always satisfies its bounds.

use crate::Violation;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A longitude in degrees, in `[-180, 180]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Longitude(f64);

/// A latitude in degrees, in `[-90, 90]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Latitude(f64);

/// An elevation in meters, in `[-10_000_000, 10_000_000]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Elevation(f64);

/// A percentage, in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Percentage(f64);

/// A ground sample distance in meters, strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Gsd(f64);

impl Longitude {
    /// Creates a new longitude.
    pub fn new(value: f64) -> Result<Longitude, Violation> {
        bounded(value, -180.0, 180.0, "longitude").map(Longitude)
    }

    /// Returns the value in degrees.
    pub fn get(&self) -> f64 {
        self.0
    }
}

impl Latitude {
    /// Creates a new latitude.
    pub fn new(value: f64) -> Result<Latitude, Violation> {
        bounded(value, -90.0, 90.0, "latitude").map(Latitude)
    }

    /// Returns the value in degrees.
    pub fn get(&self) -> f64 {
        self.0
    }
}

impl Elevation {
    /// Creates a new elevation.
    pub fn new(value: f64) -> Result<Elevation, Violation> {
        bounded(value, -10_000_000.0, 10_000_000.0, "elevation").map(Elevation)
    }

    /// Returns the value in meters.
    pub fn get(&self) -> f64 {
        self.0
    }
}

impl Percentage {
    /// Creates a new percentage.
    pub fn new(value: f64) -> Result<Percentage, Violation> {
        bounded(value, 0.0, 100.0, "percentage").map(Percentage)
    }

    /// Returns the value.
    pub fn get(&self) -> f64 {
        self.0
    }
}

impl Gsd {
    /// Creates a new ground sample distance.
    pub fn new(value: f64) -> Result<Gsd, Violation> {
        if value.is_finite() && value > 0.0 {
            Ok(Gsd(value))
        } else {
            Err(Violation::constraint("gsd must be a positive number").with_value(value))
        }
    }

    /// Returns the value in meters.
    pub fn get(&self) -> f64 {
        self.0
    }
}

/// An identifier: 1-100 characters from `[-_.a-zA-Z0-9]`.
///
/// Used for item ids, collection ids, keywords, licenses, and
/// platform/instrument/constellation/mission names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Identifier(String);

/// An extension identifier: 1-100 characters from `[-_.:/a-zA-Z0-9]`.
///
/// The identifier alphabet plus `:` and `/`, enough for the schema URIs
/// extensions use as their stable names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ExtensionId(String);

/// A human readable title, 1-100 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Title(String);

/// A detailed description, 1-10,000 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Description(String);

/// A link relation type, 1-256 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rel(String);

/// A semantic role tag: non-empty characters from `[-a-zA-Z0-9]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Role(String);

/// An asset map key: 1-32 characters from `[-_.a-zA-Z0-9]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AssetName(String);

/// An RFC 6838 media type, e.g. `image/tiff; application=geotiff`.
///
/// The string is validated by parsing it with [mime] but kept verbatim, so
/// parameters round-trip exactly as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaType(String);

/// A URI reference. Relative and absolute references are both allowed.
///
/// Trailing slashes are significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Href(String);

impl Identifier {
    /// Creates a new identifier.
    pub fn new(value: impl Into<String>) -> Result<Identifier, Violation> {
        let value = value.into();
        check_len(&value, 1, 100, "identifier")?;
        check_chars(&value, "identifier", "[-_.a-zA-Z0-9]", identifier_char)?;
        Ok(Identifier(value))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ExtensionId {
    /// Creates a new extension identifier.
    pub fn new(value: impl Into<String>) -> Result<ExtensionId, Violation> {
        let value = value.into();
        check_len(&value, 1, 100, "extension identifier")?;
        check_chars(&value, "extension identifier", "[-_.:/a-zA-Z0-9]", |c| {
            identifier_char(c) || c == ':' || c == '/'
        })?;
        Ok(ExtensionId(value))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Title {
    /// Creates a new title.
    pub fn new(value: impl Into<String>) -> Result<Title, Violation> {
        let value = value.into();
        check_len(&value, 1, 100, "title")?;
        Ok(Title(value))
    }

    /// Returns the title as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Description {
    /// Creates a new description.
    pub fn new(value: impl Into<String>) -> Result<Description, Violation> {
        let value = value.into();
        check_len(&value, 1, 10_000, "description")?;
        Ok(Description(value))
    }

    /// Returns the description as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Rel {
    /// Creates a new relation type.
    pub fn new(value: impl Into<String>) -> Result<Rel, Violation> {
        let value = value.into();
        check_len(&value, 1, 256, "rel")?;
        Ok(Rel(value))
    }

    /// Returns the relation type as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Role {
    /// Creates a new role.
    pub fn new(value: impl Into<String>) -> Result<Role, Violation> {
        let value = value.into();
        check_len(&value, 1, 100, "role")?;
        check_chars(&value, "role", "[-a-zA-Z0-9]", |c| {
            c.is_ascii_alphanumeric() || c == '-'
        })?;
        Ok(Role(value))
    }

    /// Returns the role as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AssetName {
    /// Creates a new asset name.
    pub fn new(value: impl Into<String>) -> Result<AssetName, Violation> {
        let value = value.into();
        check_len(&value, 1, 32, "asset name")?;
        check_chars(&value, "asset name", "[-_.a-zA-Z0-9]", identifier_char)?;
        Ok(AssetName(value))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl MediaType {
    /// Creates a new media type.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_factory::MediaType;
    ///
    /// MediaType::new("image/tiff; application=geotiff; profile=cloud-optimized").unwrap();
    /// MediaType::new("not a media type").unwrap_err();
    /// ```
    pub fn new(value: impl Into<String>) -> Result<MediaType, Violation> {
        let value = value.into();
        match value.parse::<mime::Mime>() {
            Ok(_) => Ok(MediaType(value)),
            Err(err) => {
                Err(Violation::constraint(format!("invalid media type: {err}")).with_value(value))
            }
        }
    }

    /// Returns the media type as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Href {
    /// Creates a new href.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_factory::Href;
    ///
    /// Href::new("https://api.example.com/x.json").unwrap();
    /// Href::new("./a/relative/path.json").unwrap();
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Href, Violation> {
        let value = value.into();
        if value.is_empty() {
            return Err(Violation::constraint("href must not be empty"));
        }
        let error = fluent_uri::UriRef::parse(value.as_str())
            .err()
            .map(|err| err.to_string());
        if let Some(message) = error {
            return Err(
                Violation::constraint(format!("invalid URI reference: {message}"))
                    .with_value(value),
            );
        }
        Ok(Href(value))
    }

    /// Returns the href as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An RFC 3339 timestamp with an explicit offset, normalized to UTC.
///
/// A timestamp with a non-UTC offset is accepted and converted, not rejected.
///
/// # Examples
///
/// ```
/// use stac_factory::UtcDatetime;
///
/// let datetime = UtcDatetime::parse("2021-01-01T02:00:00+02:00").unwrap();
/// assert_eq!(datetime.to_string(), "2021-01-01T00:00:00Z");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UtcDatetime(DateTime<Utc>);

impl UtcDatetime {
    /// Parses an RFC 3339 timestamp.
    pub fn parse(value: &str) -> Result<UtcDatetime, Violation> {
        DateTime::parse_from_rfc3339(value)
            .map(|datetime| UtcDatetime(datetime.with_timezone(&Utc)))
            .map_err(|err| {
                Violation::constraint(format!("invalid RFC 3339 datetime: {err}"))
                    .with_value(value)
            })
    }

    /// Returns the inner UTC datetime.
    pub fn get(&self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for UtcDatetime {
    fn from(datetime: DateTime<Utc>) -> UtcDatetime {
        UtcDatetime(datetime)
    }
}

impl fmt::Display for UtcDatetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl Serialize for UtcDatetime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl FromStr for UtcDatetime {
    type Err = Violation;

    fn from_str(s: &str) -> Result<UtcDatetime, Violation> {
        UtcDatetime::parse(s)
    }
}

macro_rules! display_as_str {
    ($($name:ident),*) => {
        $(impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        })*
    };
}

display_as_str!(Identifier, ExtensionId, Title, Description, Rel, Role, AssetName, MediaType, Href);

pub(crate) fn identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

pub(crate) fn bounded(value: f64, min: f64, max: f64, what: &str) -> Result<f64, Violation> {
    if !value.is_finite() {
        Err(Violation::constraint(format!("{what} must be a finite number")))
    } else if value < min || value > max {
        Err(Violation::constraint(format!("{what} must be in [{min}, {max}]")).with_value(value))
    } else {
        Ok(value)
    }
}

pub(crate) fn check_len(value: &str, min: usize, max: usize, what: &str) -> Result<(), Violation> {
    let len = value.chars().count();
    if len < min || len > max {
        Err(
            Violation::constraint(format!("{what} must be {min}-{max} characters, got {len}"))
                .with_value(value),
        )
    } else {
        Ok(())
    }
}

pub(crate) fn check_chars(
    value: &str,
    what: &str,
    alphabet: &str,
    allowed: impl Fn(char) -> bool,
) -> Result<(), Violation> {
    if let Some(c) = value.chars().find(|&c| !allowed(c)) {
        Err(
            Violation::constraint(format!("{what} contains {c:?}, allowed characters: {alphabet}"))
                .with_value(value),
        )
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longitude_bounds() {
        assert_eq!(Longitude::new(-180.0).unwrap().get(), -180.0);
        assert_eq!(Longitude::new(180.0).unwrap().get(), 180.0);
        let _ = Longitude::new(180.1).unwrap_err();
        let _ = Longitude::new(f64::NAN).unwrap_err();
    }

    #[test]
    fn latitude_bounds() {
        assert_eq!(Latitude::new(90.0).unwrap().get(), 90.0);
        let _ = Latitude::new(-90.5).unwrap_err();
    }

    #[test]
    fn elevation_bounds() {
        let _ = Elevation::new(8848.0).unwrap();
        let _ = Elevation::new(10_000_001.0).unwrap_err();
    }

    #[test]
    fn percentage_bounds() {
        let _ = Percentage::new(0.0).unwrap();
        let _ = Percentage::new(100.0).unwrap();
        let _ = Percentage::new(100.1).unwrap_err();
        let _ = Percentage::new(-0.1).unwrap_err();
    }

    #[test]
    fn gsd_positive() {
        let _ = Gsd::new(10.5).unwrap();
        let _ = Gsd::new(0.0).unwrap_err();
        let _ = Gsd::new(-1.0).unwrap_err();
    }

    #[test]
    fn identifier_pattern() {
        let _ = Identifier::new("S2B_T38XNF_20250422T091553_L2A").unwrap();
        let _ = Identifier::new("sentinel-2-c1-l2a").unwrap();
        let _ = Identifier::new("").unwrap_err();
        let _ = Identifier::new("has space").unwrap_err();
        let _ = Identifier::new("has:colon").unwrap_err();
        let _ = Identifier::new("x".repeat(101)).unwrap_err();
    }

    #[test]
    fn extension_id_pattern() {
        let _ = ExtensionId::new("https://stac-extensions.github.io/eo/v2.0.0/schema.json").unwrap();
        let _ = ExtensionId::new("has space").unwrap_err();
    }

    #[test]
    fn asset_name_length() {
        let _ = AssetName::new("thumbnail").unwrap();
        let _ = AssetName::new("x".repeat(33)).unwrap_err();
    }

    #[test]
    fn media_type() {
        let _ = MediaType::new("application/geo+json").unwrap();
        let _ = MediaType::new("image/tiff; application=geotiff; profile=cloud-optimized").unwrap();
        let _ = MediaType::new("nonsense").unwrap_err();
    }

    #[test]
    fn href_relative_and_absolute() {
        let _ = Href::new("s3://bucket/key.json").unwrap();
        let _ = Href::new("./item.json").unwrap();
        let _ = Href::new("").unwrap_err();
    }

    #[test]
    fn datetime_requires_offset() {
        let _ = UtcDatetime::parse("2021-01-01T00:00:00Z").unwrap();
        let _ = UtcDatetime::parse("2021-01-01T00:00:00").unwrap_err();
    }

    #[test]
    fn datetime_normalizes_to_utc() {
        let datetime = UtcDatetime::parse("2021-01-01T05:30:00+05:30").unwrap();
        assert_eq!(datetime.to_string(), "2021-01-01T00:00:00Z");
    }

    #[test]
    fn datetime_keeps_subsecond_precision() {
        let datetime = UtcDatetime::parse("2025-04-22T09:19:42.556Z").unwrap();
        assert_eq!(datetime.to_string(), "2025-04-22T09:19:42.556Z");
    }
}
