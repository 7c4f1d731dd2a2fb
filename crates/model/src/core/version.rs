use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Server version as reported by a node, e.g. `0.42.0`.
///
/// Ordering is field-wise (major, then minor, then patch), which is what the
/// capability checks compare against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ServerVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionParseError {
    #[error("Empty version string")]
    Empty,

    #[error("Invalid version '{0}': expected MAJOR.MINOR[.PATCH]")]
    Malformed(String),
}

impl ServerVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl FromStr for ServerVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(VersionParseError::Empty);
        }

        let parts = s
            .split('.')
            .map(|p| p.parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| VersionParseError::Malformed(s.to_string()))?;

        match parts.as_slice() {
            [major, minor] => Ok(Self::new(*major, *minor, 0)),
            [major, minor, patch] => Ok(Self::new(*major, *minor, *patch)),
            _ => Err(VersionParseError::Malformed(s.to_string())),
        }
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_order() {
        let old: ServerVersion = "0.41.9".parse().unwrap();
        let min: ServerVersion = "0.42".parse().unwrap();
        let new: ServerVersion = "1.0.2".parse().unwrap();

        assert!(old < min);
        assert!(min < new);
        assert_eq!(min, ServerVersion::new(0, 42, 0));
        assert_eq!(new.to_string(), "1.0.2");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<ServerVersion>(), Err(VersionParseError::Empty));
        assert!(matches!(
            "1".parse::<ServerVersion>(),
            Err(VersionParseError::Malformed(_))
        ));
        assert!(matches!(
            "1.x.0".parse::<ServerVersion>(),
            Err(VersionParseError::Malformed(_))
        ));
    }
}
