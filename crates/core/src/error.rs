use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Error enum for crate-specific errors.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// This is not a JSON object.
    #[error("json value is not an object")]
    NotAnObject(Value),

    /// [serde_json::Error]
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    /// One or more fields failed validation.
    #[error("{} validation error(s)", .0.len())]
    Validation(Vec<Violation>),
}

/// A single validation failure, addressable by field path.
///
/// Paths are expressed in wire terms, e.g. `geometry.coordinates[0][2]` or
/// `properties.title`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// The path to the offending field.
    pub path: String,

    /// The category of rule that failed.
    pub kind: ViolationKind,

    /// A human readable reason.
    pub message: String,

    /// The offending value, when it is representable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// The category of a [Violation].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationKind {
    /// A single field failed a range, pattern, or length check.
    Constraint,

    /// The input shape could not be normalized into the model.
    Structural,

    /// An invariant spanning multiple fields failed.
    CrossField,
}

impl Violation {
    /// Creates a new constraint violation with an empty path.
    pub fn constraint(message: impl Into<String>) -> Violation {
        Violation::new(ViolationKind::Constraint, message)
    }

    /// Creates a new structural violation with an empty path.
    pub fn structural(message: impl Into<String>) -> Violation {
        Violation::new(ViolationKind::Structural, message)
    }

    /// Creates a new cross-field violation with an empty path.
    pub fn cross_field(message: impl Into<String>) -> Violation {
        Violation::new(ViolationKind::CrossField, message)
    }

    fn new(kind: ViolationKind, message: impl Into<String>) -> Violation {
        Violation {
            path: String::new(),
            kind,
            message: message.into(),
            value: None,
        }
    }

    /// Attaches the offending value.
    pub fn with_value(mut self, value: impl Into<Value>) -> Violation {
        self.value = Some(value.into());
        self
    }

    /// Prefixes this violation's path with a parent segment.
    ///
    /// Index segments (`[0]`) attach without a separating dot.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_factory::Violation;
    ///
    /// let violation = Violation::constraint("out of range").at("[2]").at("coordinates");
    /// assert_eq!(violation.path, "coordinates[2]");
    /// ```
    pub fn at(mut self, segment: impl Into<String>) -> Violation {
        let segment = segment.into();
        if self.path.is_empty() {
            self.path = segment;
        } else if self.path.starts_with('[') {
            self.path = format!("{segment}{}", self.path);
        } else {
            self.path = format!("{segment}.{}", self.path);
        }
        self
    }
}

impl Error {
    /// Returns the violations if this is a validation error.
    pub fn violations(&self) -> Option<&[Violation]> {
        match self {
            Error::Validation(violations) => Some(violations),
            _ => None,
        }
    }

    /// Converts this error into a machine-readable JSON report.
    pub fn into_json(self) -> Value {
        match self {
            Error::Validation(violations) => serde_json::json!({
                "error": "validation",
                "violations": violations,
            }),
            other => serde_json::json!({
                "error": "other",
                "message": other.to_string(),
            }),
        }
    }
}

pub(crate) fn prefix(violations: Vec<Violation>, segment: &str) -> Vec<Violation> {
    violations
        .into_iter()
        .map(|violation| violation.at(segment))
        .collect()
}
