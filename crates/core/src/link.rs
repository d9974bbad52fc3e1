//! Hyperlinks between STAC entities and related resources.

use crate::json::{as_object, as_str, optional_str, required_str};
use crate::scalar::{check_chars, check_len, identifier_char};
use crate::{Description, Error, FromJson, Href, MediaType, Rel, Result, Title, Violation};
use indexmap::IndexMap;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// An HTTP request method for a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    /// GET, the default when a link carries no method.
    #[default]
    Get,

    /// POST
    Post,

    /// PUT
    Put,

    /// DELETE
    Delete,

    /// PATCH
    Patch,

    /// HEAD
    Head,

    /// OPTIONS
    Options,

    /// TRACE
    Trace,

    /// CONNECT
    Connect,
}

impl HttpMethod {
    /// Returns the method as its lowercase wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Head => "head",
            HttpMethod::Options => "options",
            HttpMethod::Trace => "trace",
            HttpMethod::Connect => "connect",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = Violation;

    fn from_str(s: &str) -> std::result::Result<HttpMethod, Violation> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(HttpMethod::Get),
            "post" => Ok(HttpMethod::Post),
            "put" => Ok(HttpMethod::Put),
            "delete" => Ok(HttpMethod::Delete),
            "patch" => Ok(HttpMethod::Patch),
            "head" => Ok(HttpMethod::Head),
            "options" => Ok(HttpMethod::Options),
            "trace" => Ok(HttpMethod::Trace),
            "connect" => Ok(HttpMethod::Connect),
            _ => Err(
                Violation::constraint(format!("unknown HTTP method: {s:?}")).with_value(s),
            ),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for HttpMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A header value: a single string or a list of strings, each independently
/// bounded at 256 characters.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderValue {
    /// A single value.
    One(String),

    /// Multiple values.
    Many(Vec<String>),
}

impl HeaderValue {
    fn parse(value: &Value) -> std::result::Result<HeaderValue, Violation> {
        match value {
            Value::String(s) => {
                check_len(s, 1, 256, "header value")?;
                Ok(HeaderValue::One(s.clone()))
            }
            Value::Array(array) => {
                let mut values = Vec::with_capacity(array.len());
                for (i, element) in array.iter().enumerate() {
                    let s = as_str(element, "header value").map_err(|v| v.at(format!("[{i}]")))?;
                    check_len(s, 1, 256, "header value").map_err(|v| v.at(format!("[{i}]")))?;
                    values.push(s.to_string());
                }
                Ok(HeaderValue::Many(values))
            }
            _ => Err(Violation::structural(
                "header value must be a string or a list of strings",
            )),
        }
    }
}

impl Serialize for HeaderValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            HeaderValue::One(value) => serializer.serialize_str(value),
            HeaderValue::Many(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for value in values {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
        }
    }
}

/// A link body: bounded free text or a JSON object with constrained keys.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Free text, 1-10,000 characters.
    Text(String),

    /// A JSON object whose keys, at every level, match `[-_.:a-zA-Z0-9]{1,100}`.
    Object(Map<String, Value>),
}

impl Body {
    fn parse(value: &Value) -> std::result::Result<Body, Violation> {
        match value {
            Value::String(s) => {
                check_len(s, 1, 10_000, "body")?;
                Ok(Body::Text(s.clone()))
            }
            Value::Object(object) => {
                check_field_names(object)?;
                Ok(Body::Object(object.clone()))
            }
            _ => Err(Violation::structural(
                "body must be a string or a JSON object",
            )),
        }
    }
}

impl Serialize for Body {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Body::Text(text) => serializer.serialize_str(text),
            Body::Object(object) => object.serialize(serializer),
        }
    }
}

fn check_field_names(object: &Map<String, Value>) -> std::result::Result<(), Violation> {
    for (key, value) in object {
        check_len(key, 1, 100, "body field name")?;
        check_chars(key, "body field name", "[-_.:a-zA-Z0-9]", |c| {
            identifier_char(c) || c == ':'
        })?;
        check_nested_field_names(value)?;
    }
    Ok(())
}

fn check_nested_field_names(value: &Value) -> std::result::Result<(), Violation> {
    match value {
        Value::Object(object) => check_field_names(object),
        Value::Array(array) => array.iter().try_for_each(check_nested_field_names),
        _ => Ok(()),
    }
}

/// A hyperlink to a resource.
///
/// Required fields are the target and the relation type; everything else is
/// descriptive metadata for the request a client would make to follow the
/// link.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    /// The actual link in the format of an URL.
    ///
    /// Relative and absolute links are both allowed, and trailing slashes are
    /// significant.
    pub href: Href,

    /// Relationship between the current document and the linked document.
    pub rel: Rel,

    /// Media type of the referenced entity.
    pub r#type: Option<MediaType>,

    /// A human readable title to be used in rendered displays of the link.
    pub title: Option<Title>,

    /// Additional detail about the linked resource.
    pub description: Option<Description>,

    /// The HTTP method to use for the request. GET when absent.
    pub method: Option<HttpMethod>,

    /// The HTTP headers to be sent for the request to the target resource.
    pub headers: Option<IndexMap<String, HeaderValue>>,

    /// The HTTP body to be sent to the target resource.
    pub body: Option<Body>,
}

impl Link {
    /// Creates a builder for a link with the two required fields.
    ///
    /// The builder assembles the generic field set and delegates to the same
    /// validated parse path used for wire input.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_factory::{HttpMethod, Link};
    ///
    /// let link = Link::builder("https://api.example.com/x.json", "canonical")
    ///     .media_type("application/json")
    ///     .title("an item")
    ///     .method(HttpMethod::Get)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(link.rel.as_str(), "canonical");
    /// ```
    pub fn builder(href: impl Into<String>, rel: impl Into<String>) -> LinkBuilder {
        let mut object = Map::new();
        let _ = object.insert("href".to_string(), Value::String(href.into()));
        let _ = object.insert("rel".to_string(), Value::String(rel.into()));
        LinkBuilder { object }
    }

    pub(crate) fn parse(value: &Value) -> std::result::Result<Link, Vec<Violation>> {
        let object = as_object(value, "link").map_err(|v| vec![v])?;
        let mut violations = Vec::new();
        let href = required_str(object, "href", |s| Href::new(s), &mut violations);
        let rel = required_str(object, "rel", |s| Rel::new(s), &mut violations);
        let r#type = optional_str(object, "type", |s| MediaType::new(s), &mut violations);
        let title = optional_str(object, "title", |s| Title::new(s), &mut violations);
        let description = optional_str(object, "description", |s| Description::new(s), &mut violations);
        let method = optional_str(object, "method", HttpMethod::from_str, &mut violations);
        let headers = match object.get("headers") {
            None | Some(Value::Null) => None,
            Some(value) => parse_headers(value, &mut violations),
        };
        let body = match object.get("body") {
            None | Some(Value::Null) => None,
            Some(value) => Body::parse(value)
                .map_err(|v| violations.push(v.at("body")))
                .ok(),
        };
        match (href, rel) {
            (Some(href), Some(rel)) if violations.is_empty() => Ok(Link {
                href,
                rel,
                r#type,
                title,
                description,
                method,
                headers,
                body,
            }),
            _ => Err(violations),
        }
    }

    /// Converts this link to its wire JSON value, unset fields serialized as
    /// null.
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "href": self.href.as_str(),
            "rel": self.rel.as_str(),
            "type": self.r#type.as_ref().map(MediaType::as_str),
            "title": self.title.as_ref().map(Title::as_str),
            "description": self.description.as_ref().map(Description::as_str),
            "method": self.method.map(|method| method.as_str()),
            "headers": &self.headers,
            "body": &self.body,
        })
    }
}

fn parse_headers(
    value: &Value,
    violations: &mut Vec<Violation>,
) -> Option<IndexMap<String, HeaderValue>> {
    let object = match as_object(value, "headers") {
        Ok(object) => object,
        Err(violation) => {
            violations.push(violation.at("headers"));
            return None;
        }
    };
    let mut headers = IndexMap::new();
    let mut ok = true;
    for (name, value) in object {
        if let Err(violation) = check_len(name, 1, 100, "header name") {
            violations.push(violation.at(format!("headers.{name}")));
            ok = false;
            continue;
        }
        match HeaderValue::parse(value) {
            Ok(header) => {
                let _ = headers.insert(name.clone(), header);
            }
            Err(violation) => {
                violations.push(violation.at(format!("headers.{name}")));
                ok = false;
            }
        }
    }
    ok.then_some(headers)
}

impl FromJson for Link {
    fn from_value(value: Value) -> Result<Link> {
        Link::parse(&value).map_err(Error::Validation)
    }
}

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// Builds a [Link] through the validated parse path.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    object: Map<String, Value>,
}

impl LinkBuilder {
    /// Sets the media type of the referenced entity.
    pub fn media_type(mut self, media_type: impl Into<String>) -> LinkBuilder {
        let _ = self
            .object
            .insert("type".to_string(), Value::String(media_type.into()));
        self
    }

    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> LinkBuilder {
        let _ = self
            .object
            .insert("title".to_string(), Value::String(title.into()));
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> LinkBuilder {
        let _ = self
            .object
            .insert("description".to_string(), Value::String(description.into()));
        self
    }

    /// Sets the HTTP method.
    pub fn method(mut self, method: HttpMethod) -> LinkBuilder {
        let _ = self
            .object
            .insert("method".to_string(), Value::String(method.as_str().to_string()));
        self
    }

    /// Adds a single-valued header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> LinkBuilder {
        let headers = self
            .object
            .entry("headers")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(headers) = headers {
            let _ = headers.insert(name.into(), Value::String(value.into()));
        }
        self
    }

    /// Sets a free text body.
    pub fn body_text(mut self, body: impl Into<String>) -> LinkBuilder {
        let _ = self
            .object
            .insert("body".to_string(), Value::String(body.into()));
        self
    }

    /// Sets a JSON object body.
    pub fn body_object(mut self, body: Map<String, Value>) -> LinkBuilder {
        let _ = self.object.insert("body".to_string(), Value::Object(body));
        self
    }

    /// Validates and builds the link.
    pub fn build(self) -> Result<Link> {
        Link::parse(&Value::Object(self.object)).map_err(Error::Validation)
    }
}
