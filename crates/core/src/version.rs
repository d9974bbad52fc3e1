use crate::Violation;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A STAC specification version accepted by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Version {
    /// STAC v1.0.0
    V1_0_0,

    /// STAC v1.1.0
    #[default]
    V1_1_0,
}

impl Version {
    /// Returns the version as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Version::V1_0_0 => "1.0.0",
            Version::V1_1_0 => "1.1.0",
        }
    }
}

impl FromStr for Version {
    type Err = Violation;

    fn from_str(s: &str) -> Result<Version, Violation> {
        match s {
            "1.0.0" => Ok(Version::V1_0_0),
            "1.1.0" => Ok(Version::V1_1_0),
            _ => Err(Violation::constraint(format!(
                "stac_version must be \"1.0.0\" or \"1.1.0\", got {s:?}"
            ))
            .with_value(s)),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Version;

    #[test]
    fn parse() {
        assert_eq!("1.0.0".parse::<Version>().unwrap(), Version::V1_0_0);
        assert_eq!("1.1.0".parse::<Version>().unwrap(), Version::V1_1_0);
        let _ = "2.0.0".parse::<Version>().unwrap_err();
    }

    #[test]
    fn default_is_latest() {
        assert_eq!(Version::default(), Version::V1_1_0);
    }
}
